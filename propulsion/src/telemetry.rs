use serde::{Deserialize, Serialize};

use crate::math::Vec3f;
use crate::thrusters::SeekBranch;

/// Snapshot of what the vehicle's propulsion did on the last tick, for HUDs,
/// AI and logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PropulsionTelemetry {
    pub linear_thrust: Vec3f,
    pub linear_thrust_normal: Vec3f,
    pub yaw_torque: f32,
    pub yaw_torque_normalized: f32,
    pub boosting: bool,
    pub boost_amount: f32,
    pub linear_braking: bool,
    pub angular_braking: bool,
    pub alternate_turning: bool,
    pub seek_branch: Option<SeekBranch>,
    pub rocket_count: usize,
    pub average_rocket_power: f32,
    pub combined_rocket_thrust: Vec3f,
}
