//! Heading seek for alternate turning.
//!
//! Given where the nose points, where it should point and how fast it is
//! already turning, pick one yaw torque for this tick. The decision is a
//! fixed ladder; the first rung that matches wins, and every input lands on
//! exactly one rung.

use std::f32::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

use crate::math::{horizontal, sign, Vec3f, SMALL_NUMBER};
use crate::tuning::ControlTuning;

/// Where the predicted stop lands relative to the target when decelerating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissQuadrant {
    /// Stops up to 90° before the target.
    NearShort,
    /// Stops more than 90° before the target.
    FarShort,
    /// Stops up to 90° past the target.
    NearLong,
    /// Stops more than 90° past the target.
    FarLong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeekBranch {
    NoTarget,
    /// Vertical forward axis, or no torque/inertia to work with.
    Unavailable,
    Settle,
    Start,
    Accelerate,
    AcceptOvershoot,
    Reverse,
    Decelerate(MissQuadrant),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekCommand {
    /// Apply nothing.
    Hold,
    /// Zero the angular velocity outright.
    Snap,
    /// Signed yaw torque about +Z, native units.
    Torque(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekDecision {
    pub branch: SeekBranch,
    pub command: SeekCommand,
}

impl SeekDecision {
    const fn hold(branch: SeekBranch) -> Self {
        Self { branch, command: SeekCommand::Hold }
    }

    const fn torque(branch: SeekBranch, torque: f32) -> Self {
        Self { branch, command: SeekCommand::Torque(torque) }
    }
}

/// Inputs for one seek decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekState {
    /// Current body forward axis (world).
    pub forward: Vec3f,
    /// Desired heading (world). Only its horizontal part is used.
    pub target: Vec3f,
    /// Yaw rate (rad/s, positive turns +X toward +Y).
    pub angular_velocity: f32,
    /// Yaw torque capacity, native units.
    pub torque_capacity: f32,
    pub inertia: f32,
    pub dt: f32,
}

pub fn seek(state: &SeekState, tuning: &ControlTuning) -> SeekDecision {
    let target = horizontal(state.target);
    let target_len = target.length();
    if target_len <= SMALL_NUMBER {
        return SeekDecision::hold(SeekBranch::NoTarget);
    }
    let t = target / target_len;

    let forward = horizontal(state.forward);
    let forward_len = forward.length();
    let capacity = state.torque_capacity;
    let inertia = state.inertia;
    if forward_len <= SMALL_NUMBER || inertia <= SMALL_NUMBER || !(capacity > 0.0) || !(state.dt > 0.0) {
        return SeekDecision::hold(SeekBranch::Unavailable);
    }
    let f = forward / forward_len;

    let w = state.angular_velocity;
    let max_accel = capacity / inertia;
    let max_tick_accel = max_accel * state.dt;

    let aligned = (f - t).abs().max_element() <= tuning.alignment_tolerance;
    if aligned && w.abs() <= max_tick_accel {
        if w == 0.0 {
            return SeekDecision::hold(SeekBranch::Settle);
        }
        let settle = tuning.seek_gain * inertia * w.abs();
        if settle < capacity * tuning.settle_torque_fraction {
            return SeekDecision { branch: SeekBranch::Settle, command: SeekCommand::Snap };
        }
        return SeekDecision::torque(SeekBranch::Settle, -sign(w) * settle.min(capacity));
    }

    let cross_z = f.x * t.y - f.y * t.x;
    let angle = cross_z.abs().atan2(f.dot(t));
    let turn_sign = if cross_z.abs() > SMALL_NUMBER {
        sign(cross_z)
    } else if w != 0.0 {
        // Facing away: keep turning the way we already spin.
        sign(w)
    } else {
        1.0
    };
    let braking = w * w / (2.0 * max_accel);
    let magnitude = capacity.min(tuning.seek_gain * inertia * (w + angle).abs());

    if w.abs() <= SMALL_NUMBER {
        return SeekDecision::torque(SeekBranch::Start, turn_sign * magnitude);
    }
    let spin = sign(w);
    if spin == turn_sign && braking < angle {
        return SeekDecision::torque(SeekBranch::Accelerate, turn_sign * magnitude);
    }
    if spin == turn_sign && braking > angle && braking - angle < tuning.miss_tolerance_rad() {
        return SeekDecision::torque(SeekBranch::AcceptOvershoot, -turn_sign * magnitude);
    }
    if spin == -turn_sign {
        return SeekDecision::torque(SeekBranch::Reverse, turn_sign * magnitude);
    }

    let revolutions = braking / TAU;
    let miss = revolutions.fract() * TAU - angle;
    let (quadrant, torque_sign) = if miss <= 0.0 && miss >= -FRAC_PI_2 {
        (MissQuadrant::NearShort, spin)
    } else if miss < -FRAC_PI_2 {
        (MissQuadrant::FarShort, spin)
    } else if miss <= FRAC_PI_2 {
        (MissQuadrant::NearLong, -spin)
    } else {
        (MissQuadrant::FarLong, spin)
    };
    SeekDecision::torque(SeekBranch::Decelerate(quadrant), torque_sign * magnitude)
}
