use crate::math::{heading_frame, Vec3f};
use crate::spec::DirectionalMultiplierTable;

/// Portion of `desired` the vehicle can push along, given per-side gains.
///
/// `desired` is expressed in the frame whose +X is `forward` (yaw then pitch,
/// no roll), each local axis is scaled by the gain for the side that fires,
/// and the result is rotated back. An empty table or degenerate `forward`
/// yields zero.
pub fn engagement_vector(forward: Vec3f, desired: Vec3f, multipliers: &DirectionalMultiplierTable) -> Vec3f {
    if multipliers.is_empty() {
        return Vec3f::ZERO;
    }
    let Some(frame) = heading_frame(forward) else {
        return Vec3f::ZERO;
    };

    let mut local = frame.inverse() * desired;
    // Pushing backward fires the front thrusters and vice versa.
    if local.x < 0.0 {
        if let Some(gain) = multipliers.front {
            local.x *= gain;
        }
    } else if local.x > 0.0 {
        if let Some(gain) = multipliers.back {
            local.x *= gain;
        }
    }
    if local.y < 0.0 {
        if let Some(gain) = multipliers.right {
            local.y *= gain;
        }
    } else if local.y > 0.0 {
        if let Some(gain) = multipliers.left {
            local.y *= gain;
        }
    }
    frame * local
}
