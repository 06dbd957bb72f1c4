use super::model::Thrusters;
use crate::body::RigidBody;
use crate::engagement::engagement_vector;
use crate::math::{horizontal, sign_axes, Vec3f};

impl Thrusters {
    /// Force the thrusters produce pushing along `direction` with the nose at
    /// `forward`, boost included when active (native units, world space).
    pub fn current_thrust_output(&self, forward: Vec3f, direction: Vec3f) -> Vec3f {
        let spec = self.spec();
        let mut engagement = engagement_vector(forward, direction, &spec.thrust_multiplier);
        if self.input.boosting {
            engagement += engagement_vector(forward, direction, &spec.boost_multiplier) * self.input.boost_amount;
        }
        engagement * self.max_linear_force()
    }

    /// Output for a full-deflection command toward `direction`: only the sign
    /// of each axis counts.
    pub fn max_thrust_output(&self, forward: Vec3f, direction: Vec3f) -> Vec3f {
        self.current_thrust_output(forward, sign_axes(direction))
    }

    pub(super) fn tick_linear_thrust<B: RigidBody + ?Sized>(&mut self, body: &mut B, forward: Vec3f, direction: Vec3f) {
        let force = self.current_thrust_output(forward, direction);
        body.apply_force(force, true);
        self.telemetry.linear_thrust = force;
    }

    /// Oppose horizontal drift, proportionally to speed and capped by what the
    /// thrusters on the opposing side can deliver.
    pub(super) fn tick_linear_brake<B: RigidBody + ?Sized>(&mut self, body: &mut B, forward: Vec3f) {
        self.telemetry.linear_brake_engaged = true;
        let planar = horizontal(body.linear_velocity());
        let speed = planar.length();
        if speed <= self.tuning().rest_speed {
            body.set_linear_velocity(Vec3f::ZERO);
            self.telemetry.linear_thrust = Vec3f::ZERO;
            return;
        }

        let direction = planar / speed;
        let available = self.max_thrust_output(forward, -direction).length();
        let requested = self
            .tuning()
            .force_unit
            .kilonewtons_to_native(speed * self.tuning().brake_aggressiveness);
        let force = -direction * requested.min(available);
        body.apply_force(force, true);
        self.telemetry.linear_thrust = force;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{Direction, DirectionalMultiplierTable, ThrusterSpec};
    use crate::tuning::ControlTuning;
    use crate::SimpleBody;

    fn spec() -> ThrusterSpec {
        ThrusterSpec {
            linear_thrust_kn: 10.0,
            torque_knm: 5.0,
            max_angular_speed_deg: 90.0,
            thrust_multiplier: DirectionalMultiplierTable::EMPTY
                .with(Direction::Back, 1.0)
                .with(Direction::Front, 0.5),
            boost_multiplier: DirectionalMultiplierTable::EMPTY
                .with(Direction::Back, 2.0)
                .with(Direction::Front, 0.0),
        }
    }

    #[test]
    fn boost_adds_scaled_boost_engagement() {
        let mut thrusters = Thrusters::new(spec(), ControlTuning::default());
        let plain = thrusters.current_thrust_output(Vec3f::X, Vec3f::X);
        assert!((plain.x - 10_000.0).abs() < 1e-2);

        thrusters.set_boosting(true);
        thrusters.set_boost_amount(0.5);
        let boosted = thrusters.current_thrust_output(Vec3f::X, Vec3f::X);
        // 1.0 + 2.0 * 0.5 = 2.0 engagement
        assert!((boosted.x - 20_000.0).abs() < 1e-2, "got {boosted:?}");
    }

    #[test]
    fn max_output_uses_axis_signs_only() {
        let thrusters = Thrusters::new(spec(), ControlTuning::default());
        let small = thrusters.max_thrust_output(Vec3f::X, Vec3f::new(-0.01, 0.0, 0.0));
        assert!((small.x + 5_000.0).abs() < 1e-2, "front side runs at 0.5 (got {small:?})");
    }

    #[test]
    fn brake_is_capped_by_opposing_side() {
        let mut thrusters = Thrusters::new(spec(), ControlTuning::default());
        thrusters.set_linear_braking(true);
        // 20 m/s forward: request 200 kN, front thrusters give 5 kN.
        let mut body = SimpleBody::new(1_000.0, Vec3f::splat(100.0)).with_velocity(Vec3f::new(20.0, 0.0, 0.0));
        thrusters.tick(Some(&mut body), 1.0 / 60.0);
        let f = thrusters.linear_thrust_vector();
        assert!((f.x + 5_000.0).abs() < 1e-2, "got {f:?}");
        assert!(thrusters.telemetry().linear_brake_engaged);
        assert_eq!(body.pending_force(), f);
    }

    #[test]
    fn brake_is_proportional_at_low_speed() {
        let mut thrusters = Thrusters::new(spec(), ControlTuning::default());
        thrusters.set_linear_braking(true);
        // 0.2 m/s sideways: request 2 kN, the (absent) right entry gives the full 10 kN.
        let mut body = SimpleBody::new(1_000.0, Vec3f::splat(100.0)).with_velocity(Vec3f::new(0.0, 0.2, 0.0));
        thrusters.tick(Some(&mut body), 1.0 / 60.0);
        let f = thrusters.linear_thrust_vector();
        assert!((f.y + 2_000.0).abs() < 1e-1, "got {f:?}");
    }

    #[test]
    fn thrust_suppresses_brake() {
        let mut thrusters = Thrusters::new(spec(), ControlTuning::default());
        thrusters.set_linear_braking(true);
        thrusters.set_linear_thrust_direction(Vec3f::X);
        let mut body = SimpleBody::new(1_000.0, Vec3f::splat(100.0)).with_velocity(Vec3f::new(5.0, 0.0, 0.0));
        thrusters.tick(Some(&mut body), 1.0 / 60.0);
        assert!(!thrusters.telemetry().linear_brake_engaged);
        assert!(thrusters.linear_thrust_vector().x > 0.0);
    }
}
