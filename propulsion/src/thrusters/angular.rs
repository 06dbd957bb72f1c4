use super::model::Thrusters;
use crate::body::RigidBody;
use crate::math::{sign, Vec3f, SMALL_NUMBER};

impl Thrusters {
    pub(super) fn tick_angular_rate<B: RigidBody + ?Sized>(&mut self, body: &mut B, dt: f32) {
        let inertia = body.inertia_principal_max();
        if inertia <= SMALL_NUMBER {
            return;
        }
        let omega = body.angular_velocity().z;
        let max_speed = self.spec().max_angular_speed_rad();
        // Hard ceiling: something else spun us past the limit.
        if omega.abs() - max_speed > self.tuning().rate_limit_epsilon {
            return;
        }

        let requested = self.max_yaw_torque() * self.input.angular_direction.x;
        let torque = limit_rate_torque(requested, omega, inertia, dt, max_speed);
        if torque == 0.0 {
            return;
        }
        body.apply_torque(Vec3f::new(0.0, 0.0, torque), true);
        self.telemetry.yaw_torque = torque;
        self.telemetry.angular_thrust_active = true;
    }

    pub(super) fn tick_angular_brake<B: RigidBody + ?Sized>(&mut self, body: &mut B, dt: f32) {
        self.telemetry.angular_brake_engaged = true;
        let angular_velocity = body.angular_velocity();
        if angular_velocity.abs().max_element() <= self.tuning().rest_angular_speed {
            body.set_angular_velocity(Vec3f::ZERO);
            self.telemetry.yaw_torque = 0.0;
            return;
        }
        let inertia = body.inertia_principal_max();
        if inertia <= SMALL_NUMBER {
            return;
        }

        let omega = angular_velocity.z;
        let stopping = (inertia * omega / dt).abs().min(self.max_yaw_torque());
        let torque = -sign(omega) * stopping;
        body.apply_torque(Vec3f::new(0.0, 0.0, torque), true);
        self.telemetry.yaw_torque = torque;
    }
}

/// Reduce `torque` so the yaw rate predicted after `dt` does not pass
/// `max_speed`. Never flips the sign of the request; torque that slows the
/// spin is left alone.
pub(crate) fn limit_rate_torque(torque: f32, omega: f32, inertia: f32, dt: f32, max_speed: f32) -> f32 {
    let predicted = omega + torque / inertia * dt;
    if predicted.abs() <= max_speed || sign(predicted) != sign(torque) {
        return torque;
    }
    // Torque that lands the prediction exactly on the limit.
    let capped = (sign(predicted) * max_speed - omega) * inertia / dt;
    if sign(capped) == sign(torque) {
        capped
    } else {
        0.0
    }
}
