//! Thruster and rocket control for rigid-body vehicles.
//!
//! Pilot or AI intent goes in as direction vectors and a few toggles; forces
//! and torques come out through the [`RigidBody`] trait once per physics
//! tick. Nothing here owns a physics world, a clock or any I/O.

mod math;
pub use math::{Vec3f, Quatf, BODY_FWD, BODY_RIGHT, BODY_UP, yaw_of};
mod units;
pub use units::ForceUnit;
mod error;
pub use error::SpecError;
mod spec;
pub use spec::{Direction, DirectionalMultiplierTable, ThrusterSpec, RocketSpec};
mod tuning;
pub use tuning::ControlTuning;

pub mod engagement;
pub use engagement::engagement_vector;

mod body;
pub use body::{RigidBody, SimpleBody};

pub mod thrusters;
pub use thrusters::{Thrusters, ThrusterTelemetry, InputState};

pub mod rocket;
pub use rocket::{EngineId, EngineMount, EfficiencySource, FixedEfficiency, SharedEfficiency, RocketEngine, engagement_value};

mod telemetry;
pub use telemetry::PropulsionTelemetry;
mod coordinator;
pub use coordinator::PropulsionCoordinator;

mod vehicle_specs;
pub use vehicle_specs::{EngineSpec, VehicleSpec};
pub use vehicle_specs::vehiclespecs;
