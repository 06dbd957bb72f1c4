use thiserror::Error;

use crate::spec::Direction;

/// Validation failure for a [`ThrusterSpec`](crate::ThrusterSpec),
/// [`RocketSpec`](crate::RocketSpec) or [`ControlTuning`](crate::ControlTuning).
///
/// The controllers never reject a spec at runtime; they log this and run on a
/// sanitized copy instead. Hosts loading configuration treat it as fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecError {
    #[error("{field} must be finite and non-negative (got {value})")]
    NegativeCapacity { field: &'static str, value: f32 },
    #[error("{table} gain for {direction:?} must be finite and non-negative (got {gain})")]
    NegativeGain {
        table: &'static str,
        direction: Direction,
        gain: f32,
    },
    #[error("tuning parameter {field} must be finite and positive (got {value})")]
    InvalidTuning { field: &'static str, value: f32 },
}
