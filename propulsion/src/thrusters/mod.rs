mod types;
mod model;
mod linear;
mod angular;
mod seek;

pub use types::{InputState, ThrusterTelemetry};
pub use model::Thrusters;
pub use seek::{seek, MissQuadrant, SeekBranch, SeekCommand, SeekDecision, SeekState};
