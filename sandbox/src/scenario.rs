use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, warn};

use propulsion::{EngineId, PropulsionCoordinator, PropulsionTelemetry, SimpleBody, Vec3f, VehicleSpec};

use crate::config::{Config, PilotAction, ScheduledEvent, SimConfig};

/// A resolved, validated run: vehicle, initial body and time-ordered events.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub sim: SimConfig,
    pub vehicle: VehicleSpec,
    pub body: SimpleBody,
    pub events: Vec<ScheduledEvent>,
}

impl Scenario {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        cfg.validate()?;
        let vehicle = cfg.vehicle()?;
        let body = vehicle
            .body()
            .with_yaw(cfg.body.yaw_deg.to_radians())
            .with_velocity(cfg.body.velocity)
            .with_yaw_rate(cfg.body.yaw_rate_deg.to_radians());
        let mut events = cfg.events.clone();
        // Stable: same-tick events keep file order.
        events.sort_by_key(|e| e.tick);
        Ok(Self { sim: cfg.sim.clone(), vehicle, body, events })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub tick: u32,
    pub position: Vec3f,
    pub velocity: Vec3f,
    pub yaw_deg: f32,
    pub yaw_rate: f32,
    pub telemetry: PropulsionTelemetry,
}

impl Sample {
    fn capture(tick: u32, body: &SimpleBody, coordinator: &PropulsionCoordinator) -> Self {
        Self {
            tick,
            position: body.position,
            velocity: body.velocity,
            yaw_deg: body.yaw().to_degrees(),
            yaw_rate: body.yaw_rate(),
            telemetry: coordinator.telemetry(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub ticks: u32,
    pub body: SimpleBody,
    pub telemetry: PropulsionTelemetry,
    pub peak_speed: f32,
    pub samples: Vec<Sample>,
}

/// Route one pilot action into the coordinator.
pub fn apply_action(coordinator: &mut PropulsionCoordinator, vehicle: &VehicleSpec, action: &PilotAction) {
    match *action {
        PilotAction::LinearThrust { x, y } => coordinator.tick_linear_thrust(Vec3f::new(x, y, 0.0)),
        PilotAction::EndLinearThrust => coordinator.end_linear_thrust(),
        PilotAction::Yaw { rate } => coordinator.tick_angular_thrust(Vec3f::new(rate, 0.0, 0.0)),
        PilotAction::SeekHeading { heading_deg } => {
            let r = heading_deg.to_radians();
            coordinator.tick_angular_thrust(Vec3f::new(r.cos(), r.sin(), 0.0));
        }
        PilotAction::EndAngularThrust => coordinator.end_angular_thrust(),
        PilotAction::Boost { amount } => coordinator.tick_boosting(amount),
        PilotAction::EndBoost => coordinator.end_boosting(),
        PilotAction::LinearBrake { enabled } => coordinator.set_linear_braking(enabled),
        PilotAction::AngularBrake { enabled } => coordinator.set_angular_braking(enabled),
        PilotAction::AlternateTurning { enabled } => coordinator.set_alternate_turning(enabled),
        PilotAction::DetachEngine { id } => {
            coordinator.remove_rocket(EngineId(id));
        }
        PilotAction::AttachEngine { id } => match vehicle.engines.iter().find(|e| e.id == id) {
            Some(engine) => {
                coordinator.add_rocket(engine.build());
            }
            None => warn!(id, "no [[engines]] entry to attach"),
        },
    }
}

/// Fly the scenario against a [`SimpleBody`] at a fixed step.
pub fn run_scenario(scenario: &Scenario) -> ScenarioReport {
    let sim = &scenario.sim;
    let mut coordinator = scenario.vehicle.coordinator().with_label("sandbox");
    let mut body = scenario.body.clone();
    let mut samples = Vec::new();
    let mut peak_speed = body.velocity.length();
    let mut pending = scenario.events.iter().peekable();

    for tick in 0..sim.ticks {
        while let Some(event) = pending.next_if(|e| e.tick <= tick) {
            debug!(tick, action = ?event.action, "pilot event");
            apply_action(&mut coordinator, &scenario.vehicle, &event.action);
        }

        coordinator.tick(Some(&mut body), sim.dt);
        body.step(sim.dt);
        peak_speed = peak_speed.max(body.velocity.length());

        if sim.log_every > 0 && tick % sim.log_every == 0 {
            let sample = Sample::capture(tick, &body, &coordinator);
            info!(
                tick,
                x = sample.position.x,
                y = sample.position.y,
                speed = sample.velocity.length(),
                yaw_deg = sample.yaw_deg,
                yaw_rate = sample.yaw_rate,
                thrust = sample.telemetry.linear_thrust.length(),
                yaw_torque = sample.telemetry.yaw_torque,
                rockets = sample.telemetry.combined_rocket_thrust.length(),
                seek = ?sample.telemetry.seek_branch,
                "tick"
            );
            samples.push(sample);
        }
    }

    let telemetry = coordinator.telemetry();
    ScenarioReport { ticks: sim.ticks, body, telemetry, peak_speed, samples }
}
