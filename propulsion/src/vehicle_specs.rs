use serde::{Deserialize, Serialize};

use crate::body::SimpleBody;
use crate::coordinator::PropulsionCoordinator;
use crate::math::Vec3f;
use crate::rocket::{EngineId, EngineMount, FixedEfficiency, RocketEngine};
use crate::spec::{RocketSpec, ThrusterSpec};
use crate::tuning::ControlTuning;

/// One rocket engine as authored in a vehicle file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSpec {
    pub id: u32,
    /// Mount yaw from the nose (degrees, positive toward the left).
    #[serde(default)]
    pub yaw_deg: f32,
    /// Mount point relative to the centre of mass, vehicle frame (m).
    #[serde(default)]
    pub offset: Vec3f,
    #[serde(default = "unit_efficiency")]
    pub efficiency: f32,
}

fn unit_efficiency() -> f32 {
    1.0
}

impl EngineSpec {
    pub fn build(&self) -> RocketEngine {
        RocketEngine::new(
            EngineId(self.id),
            EngineMount::from_yaw_deg(self.yaw_deg, self.offset),
            FixedEfficiency(self.efficiency),
        )
    }
}

/// Everything needed to put a vehicle in the sandbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSpec {
    pub mass: f32,
    /// Principal moments about body X, Y, Z (kg·m²).
    pub inertia: Vec3f,
    pub thrusters: ThrusterSpec,
    pub rockets: RocketSpec,
    #[serde(default)]
    pub tuning: ControlTuning,
    #[serde(default)]
    pub engines: Vec<EngineSpec>,
}

impl VehicleSpec {
    pub fn body(&self) -> SimpleBody {
        SimpleBody::new(self.mass, self.inertia)
    }

    /// Coordinator with every engine in `engines` registered.
    pub fn coordinator(&self) -> PropulsionCoordinator {
        let mut coordinator = PropulsionCoordinator::new(self.thrusters.clone(), self.rockets.clone(), self.tuning);
        for engine in &self.engines {
            coordinator.add_rocket(engine.build());
        }
        coordinator
    }
}

pub mod vehiclespecs {
    use super::*;
    use crate::spec::{Direction, DirectionalMultiplierTable};

    // Light courier: twin main engines, weak retro thrusters.
    pub fn courier_spec() -> VehicleSpec {
        VehicleSpec {
            mass: 12_000.0, // kg
            // Flat hull: yaw inertia is the largest moment.
            inertia: Vec3f::new(20_000.0, 40_000.0, 55_000.0),
            thrusters: ThrusterSpec {
                linear_thrust_kn: 120.0,
                torque_knm: 90.0,
                max_angular_speed_deg: 60.0,
                thrust_multiplier: DirectionalMultiplierTable::EMPTY
                    .with(Direction::Back, 1.0)
                    .with(Direction::Front, 0.5)
                    .with(Direction::Left, 0.6)
                    .with(Direction::Right, 0.6),
                // Boost only helps going forward.
                boost_multiplier: DirectionalMultiplierTable::EMPTY
                    .with(Direction::Back, 1.0)
                    .with(Direction::Front, 0.0)
                    .with(Direction::Left, 0.0)
                    .with(Direction::Right, 0.0),
            },
            rockets: RocketSpec {
                linear_thrust_kn: 250.0,
                boost_multiplier: DirectionalMultiplierTable::EMPTY
                    .with(Direction::Back, 1.0)
                    .with(Direction::Front, 0.0)
                    .with(Direction::Left, 0.25)
                    .with(Direction::Right, 0.25),
            },
            tuning: ControlTuning::default(),
            engines: vec![
                EngineSpec { id: 1, yaw_deg: 0.0, offset: Vec3f::new(-6.0, 2.0, 0.0), efficiency: 1.0 },
                EngineSpec { id: 2, yaw_deg: 0.0, offset: Vec3f::new(-6.0, -2.0, 0.0), efficiency: 1.0 },
            ],
        }
    }

    // Heavy hauler: slow to turn, strong braking, four canted boosters.
    pub fn hauler_spec() -> VehicleSpec {
        VehicleSpec {
            mass: 80_000.0,
            inertia: Vec3f::new(300_000.0, 900_000.0, 1_100_000.0),
            thrusters: ThrusterSpec {
                linear_thrust_kn: 400.0,
                torque_knm: 350.0,
                max_angular_speed_deg: 20.0,
                thrust_multiplier: DirectionalMultiplierTable::uniform(1.0).with(Direction::Front, 0.8),
                boost_multiplier: DirectionalMultiplierTable::EMPTY.with(Direction::Back, 0.5).with(Direction::Front, 0.0),
            },
            rockets: RocketSpec {
                linear_thrust_kn: 600.0,
                boost_multiplier: DirectionalMultiplierTable::EMPTY.with(Direction::Back, 1.0).with(Direction::Front, 0.0),
            },
            tuning: ControlTuning { brake_aggressiveness: 25.0, ..ControlTuning::default() },
            engines: vec![
                EngineSpec { id: 1, yaw_deg: 10.0, offset: Vec3f::new(-15.0, 4.0, 0.0), efficiency: 1.0 },
                EngineSpec { id: 2, yaw_deg: -10.0, offset: Vec3f::new(-15.0, -4.0, 0.0), efficiency: 1.0 },
                EngineSpec { id: 3, yaw_deg: 25.0, offset: Vec3f::new(-12.0, 6.0, 1.5), efficiency: 0.9 },
                EngineSpec { id: 4, yaw_deg: -25.0, offset: Vec3f::new(-12.0, -6.0, 1.5), efficiency: 0.9 },
            ],
        }
    }

    pub fn by_name(name: &str) -> Option<VehicleSpec> {
        match name {
            "courier" => Some(courier_spec()),
            "hauler" => Some(hauler_spec()),
            _ => None,
        }
    }
}
