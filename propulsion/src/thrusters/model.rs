use std::sync::Arc;

use tracing::{trace, warn};

use super::seek::{seek, SeekCommand, SeekState};
use super::types::{InputState, ThrusterTelemetry};
use crate::body::RigidBody;
use crate::math::{clamp_axes, is_nearly_zero, map_range_clamped, Vec3f};
use crate::spec::ThrusterSpec;
use crate::tuning::ControlTuning;

/// Reaction-control thrusters: linear thrust and brake, yaw rate control,
/// yaw brake and heading seek.
#[derive(Debug, Clone)]
pub struct Thrusters {
    spec: Arc<ThrusterSpec>,
    tuning: ControlTuning,
    pub(super) input: InputState,
    pub(super) telemetry: ThrusterTelemetry,
}

impl Thrusters {
    pub fn new(spec: impl Into<Arc<ThrusterSpec>>, tuning: ControlTuning) -> Self {
        Self {
            spec: checked_spec(spec.into()),
            tuning: checked_tuning(tuning),
            input: InputState::default(),
            telemetry: ThrusterTelemetry::default(),
        }
    }

    pub fn spec(&self) -> &Arc<ThrusterSpec> {
        &self.spec
    }

    /// Swap the whole spec. Invalid values are logged and clamped to zero.
    pub fn set_spec(&mut self, spec: impl Into<Arc<ThrusterSpec>>) {
        self.spec = checked_spec(spec.into());
    }

    pub fn tuning(&self) -> &ControlTuning {
        &self.tuning
    }

    pub fn set_tuning(&mut self, tuning: ControlTuning) {
        self.tuning = checked_tuning(tuning);
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn telemetry(&self) -> &ThrusterTelemetry {
        &self.telemetry
    }

    // ---- input ----

    pub fn set_linear_thrust_direction(&mut self, direction: Vec3f) {
        self.input.linear_direction = clamp_axes(direction);
    }

    pub fn end_linear_thrust(&mut self) {
        self.input.linear_direction = Vec3f::ZERO;
        self.telemetry.linear_thrust = Vec3f::ZERO;
        self.telemetry.linear_thrust_active = false;
    }

    pub fn set_angular_thrust_direction(&mut self, direction: Vec3f) {
        self.input.angular_direction = clamp_axes(direction);
    }

    pub fn end_angular_thrust(&mut self) {
        self.input.angular_direction = Vec3f::ZERO;
        self.telemetry.yaw_torque = 0.0;
        self.telemetry.angular_thrust_active = false;
    }

    pub fn set_boosting(&mut self, boosting: bool) {
        self.input.boosting = boosting;
        if !boosting {
            self.input.boost_amount = 0.0;
        }
    }

    pub fn is_boosting(&self) -> bool {
        self.input.boosting
    }

    pub fn set_boost_amount(&mut self, amount: f32) {
        self.input.boost_amount = if amount.is_nan() { 0.0 } else { amount.clamp(0.0, 1.0) };
    }

    pub fn boost_amount(&self) -> f32 {
        self.input.boost_amount
    }

    pub fn set_linear_braking(&mut self, enabled: bool) {
        self.input.linear_brake = enabled;
    }

    pub fn toggle_linear_braking(&mut self) {
        self.input.linear_brake = !self.input.linear_brake;
    }

    pub fn is_linear_braking(&self) -> bool {
        self.input.linear_brake
    }

    pub fn set_angular_braking(&mut self, enabled: bool) {
        self.input.angular_brake = enabled;
    }

    pub fn toggle_angular_braking(&mut self) {
        self.input.angular_brake = !self.input.angular_brake;
    }

    pub fn is_angular_braking(&self) -> bool {
        self.input.angular_brake
    }

    pub fn set_alternate_turning(&mut self, enabled: bool) {
        self.input.alternate_turning = enabled;
    }

    pub fn toggle_alternate_turning(&mut self) {
        self.input.alternate_turning = !self.input.alternate_turning;
    }

    pub fn is_alternate_turning(&self) -> bool {
        self.input.alternate_turning
    }

    // ---- capacities & telemetry ----

    /// Linear capacity in native force units.
    pub fn max_linear_force(&self) -> f32 {
        self.tuning.force_unit.kilonewtons_to_native(self.spec.linear_thrust_kn)
    }

    /// Yaw torque capacity in native units.
    pub fn max_yaw_torque(&self) -> f32 {
        self.tuning.force_unit.kilonewtons_to_native(self.spec.torque_knm)
    }

    pub fn linear_thrust_vector(&self) -> Vec3f {
        self.telemetry.linear_thrust
    }

    pub fn yaw_torque(&self) -> f32 {
        self.telemetry.yaw_torque
    }

    /// Applied yaw torque as a fraction of capacity, in [-1, 1].
    pub fn yaw_torque_normalized(&self) -> f32 {
        let cap = self.max_yaw_torque();
        map_range_clamped(self.telemetry.yaw_torque, -cap, cap, -1.0, 1.0)
    }

    /// Applied thrust direction scaled by how much of the linear capacity it uses.
    pub fn current_linear_thrust_normal(&self) -> Vec3f {
        let thrust = self.telemetry.linear_thrust;
        let cap = self.max_linear_force();
        if cap <= 0.0 || is_nearly_zero(thrust) {
            return Vec3f::ZERO;
        }
        thrust.normalize_or_zero() * (thrust.length() / cap)
    }

    /// Direction the thrusters push this tick: pilot input, or the nose while
    /// boosting without input.
    pub(super) fn effective_linear_direction(&self, forward: Vec3f) -> Vec3f {
        if self.input.boosting && is_nearly_zero(self.input.linear_direction) {
            forward
        } else {
            self.input.linear_direction
        }
    }

    // ---- physics ----

    /// Run one physics step against `body`. A missing or frozen body, or a
    /// non-positive `dt`, skips the tick with empty telemetry.
    pub fn tick<B: RigidBody + ?Sized>(&mut self, body: Option<&mut B>, dt: f32) {
        self.telemetry = ThrusterTelemetry::default();
        let Some(body) = body else {
            trace!("thrusters: no rigid body, tick skipped");
            return;
        };
        if !body.is_simulating() || !(dt > 0.0) {
            trace!(dt, "thrusters: body not simulating, tick skipped");
            return;
        }

        let forward = body.forward();
        let linear_direction = self.effective_linear_direction(forward);
        let linear_active = !is_nearly_zero(linear_direction);
        let angular_active = !is_nearly_zero(self.input.angular_direction);
        self.telemetry.linear_thrust_active = linear_active;

        if self.input.linear_brake && !linear_active {
            self.tick_linear_brake(body, forward);
        }
        if linear_active {
            self.tick_linear_thrust(body, forward, linear_direction);
        }
        if self.input.angular_brake && !angular_active {
            self.tick_angular_brake(body, dt);
        }
        if angular_active {
            if self.input.alternate_turning {
                self.tick_seek(body, forward, dt);
            } else {
                self.tick_angular_rate(body, dt);
            }
        }
    }

    fn tick_seek<B: RigidBody + ?Sized>(&mut self, body: &mut B, forward: Vec3f, dt: f32) {
        let state = SeekState {
            forward,
            target: self.input.angular_direction,
            angular_velocity: body.angular_velocity().z,
            torque_capacity: self.max_yaw_torque(),
            inertia: body.inertia_principal_max(),
            dt,
        };
        let decision = seek(&state, &self.tuning);
        self.telemetry.seek_branch = Some(decision.branch);
        match decision.command {
            SeekCommand::Hold => {}
            SeekCommand::Snap => body.set_angular_velocity(Vec3f::ZERO),
            SeekCommand::Torque(torque) => {
                body.apply_torque(Vec3f::new(0.0, 0.0, torque), true);
                self.telemetry.yaw_torque = torque;
                self.telemetry.angular_thrust_active = torque != 0.0;
            }
        }
    }
}

fn checked_spec(spec: Arc<ThrusterSpec>) -> Arc<ThrusterSpec> {
    match spec.validate() {
        Ok(()) => spec,
        Err(err) => {
            warn!(%err, "thruster spec has invalid values; running on a sanitized copy");
            Arc::new(spec.sanitized())
        }
    }
}

fn checked_tuning(tuning: ControlTuning) -> ControlTuning {
    match tuning.validate() {
        Ok(()) => tuning,
        Err(err) => {
            warn!(%err, "control tuning has invalid values; using defaults for them");
            tuning.sanitized()
        }
    }
}
