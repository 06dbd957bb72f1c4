use serde::{Deserialize, Serialize};

use super::seek::SeekBranch;
use crate::math::Vec3f;

/// Pilot intent as last routed into the thrusters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    /// World-space push direction, each axis in [-1, 1].
    pub linear_direction: Vec3f,
    /// Rate mode: `x` is the yaw command in [-1, 1] (+ turns left).
    /// Alternate turning: world-space heading to seek.
    pub angular_direction: Vec3f,
    pub linear_brake: bool,
    pub angular_brake: bool,
    pub alternate_turning: bool,
    pub boosting: bool,
    /// In [0, 1].
    pub boost_amount: f32,
}

/// What the thrusters did on the most recent tick. Rebuilt from scratch every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThrusterTelemetry {
    /// Force handed to the body (world space, native units).
    pub linear_thrust: Vec3f,
    /// Torque about +Z handed to the body (native units).
    pub yaw_torque: f32,
    pub linear_thrust_active: bool,
    pub angular_thrust_active: bool,
    pub linear_brake_engaged: bool,
    pub angular_brake_engaged: bool,
    /// Rung of the seek ladder taken, when alternate turning ran.
    pub seek_branch: Option<SeekBranch>,
}
