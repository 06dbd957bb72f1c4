pub type Vec3f = bevy_math::Vec3;
pub type Quatf = bevy_math::Quat;

// Basis: right-handed, +X forward, +Y left, +Z up
pub const BODY_FWD: Vec3f = Vec3f::new(1.0, 0.0, 0.0);
pub const BODY_RIGHT: Vec3f = Vec3f::new(0.0, -1.0, 0.0);
pub const BODY_UP: Vec3f = Vec3f::new(0.0, 0.0, 1.0);

/// Threshold used by every near-zero guard in the controllers.
pub(crate) const SMALL_NUMBER: f32 = 1e-6;

/// Sign that maps zero to zero (`f32::signum` returns 1.0 for +0.0).
#[inline]
pub fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[inline]
pub fn is_nearly_zero(v: Vec3f) -> bool {
    v.abs().max_element() <= SMALL_NUMBER
}

/// Projection onto the horizontal (XY) plane.
#[inline]
pub fn horizontal(v: Vec3f) -> Vec3f {
    Vec3f::new(v.x, v.y, 0.0)
}

/// Per-axis clamp to [-1, 1]; NaN components become zero.
#[inline]
pub fn clamp_axes(v: Vec3f) -> Vec3f {
    let c = |x: f32| if x.is_nan() { 0.0 } else { x.clamp(-1.0, 1.0) };
    Vec3f::new(c(v.x), c(v.y), c(v.z))
}

/// Per-axis sign of `v`, zero components staying zero.
#[inline]
pub fn sign_axes(v: Vec3f) -> Vec3f {
    Vec3f::new(sign(v.x), sign(v.y), sign(v.z))
}

/// Rotation taking body +X onto `forward`: yaw about +Z, then pitch, no roll.
/// Returns `None` for a zero or non-finite forward vector.
pub fn heading_frame(forward: Vec3f) -> Option<Quatf> {
    let len = forward.length();
    if !(len > SMALL_NUMBER) || !len.is_finite() {
        return None;
    }
    let f = forward / len;
    let yaw = f.y.atan2(f.x);
    let pitch = f.z.atan2((f.x * f.x + f.y * f.y).sqrt());
    Some(Quatf::from_rotation_z(yaw) * Quatf::from_rotation_y(-pitch))
}

/// Heading of the body forward axis on the horizontal plane (radians, CCW from +X).
#[inline]
pub fn yaw_of(q: Quatf) -> f32 {
    let fwd = q * BODY_FWD;
    fwd.y.atan2(fwd.x)
}

/// Linear map of `value` from `[in_a, in_b]` onto `[out_a, out_b]`, clamped to the output range.
pub fn map_range_clamped(value: f32, in_a: f32, in_b: f32, out_a: f32, out_b: f32) -> f32 {
    let span = in_b - in_a;
    if span.abs() <= SMALL_NUMBER {
        return out_a;
    }
    let t = ((value - in_a) / span).clamp(0.0, 1.0);
    out_a + (out_b - out_a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_of_zero_is_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(3.0), 1.0);
        assert_eq!(sign(-0.5), -1.0);
    }

    #[test]
    fn heading_frame_maps_body_forward_onto_forward() {
        for f in [
            Vec3f::new(1.0, 0.0, 0.0),
            Vec3f::new(0.0, 1.0, 0.0),
            Vec3f::new(-1.0, -1.0, 0.5),
            Vec3f::new(0.2, -3.0, -1.0),
        ] {
            let q = heading_frame(f).expect("non-degenerate forward");
            let mapped = q * BODY_FWD;
            assert!(
                (mapped - f.normalize()).length() < 1e-5,
                "frame should carry +X onto {f:?}, got {mapped:?}"
            );
            // No roll: the frame's right axis stays horizontal.
            assert!((q * BODY_RIGHT).z.abs() < 1e-5);
        }
        assert!(heading_frame(Vec3f::ZERO).is_none());
    }

    #[test]
    fn map_range_clamps_to_output() {
        assert_eq!(map_range_clamped(5.0, -10.0, 10.0, -1.0, 1.0), 0.5);
        assert_eq!(map_range_clamped(50.0, -10.0, 10.0, -1.0, 1.0), 1.0);
        assert_eq!(map_range_clamped(-50.0, -10.0, 10.0, -1.0, 1.0), -1.0);
    }
}
