use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::body::RigidBody;
use crate::math::{clamp_axes, is_nearly_zero, Vec3f};
use crate::rocket::{EngineId, RocketEngine};
use crate::spec::{RocketSpec, ThrusterSpec};
use crate::telemetry::PropulsionTelemetry;
use crate::thrusters::Thrusters;
use crate::tuning::ControlTuning;

/// Owns a vehicle's thrusters and rocket engines, routes pilot input to them
/// and steps them against the rigid body once per physics tick.
#[derive(Debug)]
pub struct PropulsionCoordinator {
    label: String,
    thrusters: Thrusters,
    rocket_spec: Arc<RocketSpec>,
    rockets: Vec<RocketEngine>,
}

impl PropulsionCoordinator {
    pub fn new(thruster_spec: impl Into<Arc<ThrusterSpec>>, rocket_spec: impl Into<Arc<RocketSpec>>, tuning: ControlTuning) -> Self {
        Self {
            label: String::from("vehicle"),
            thrusters: Thrusters::new(thruster_spec, tuning),
            rocket_spec: checked_rocket_spec(rocket_spec.into()),
            rockets: Vec::new(),
        }
    }

    /// Name used in log fields.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn thrusters(&self) -> &Thrusters {
        &self.thrusters
    }

    // ---- specs ----

    pub fn set_thruster_spec(&mut self, spec: impl Into<Arc<ThrusterSpec>>) {
        self.thrusters.set_spec(spec);
        debug!(vehicle = %self.label, "thruster spec replaced");
    }

    /// Replace the shared rocket spec and re-derive every engine's capacity.
    pub fn set_rocket_spec(&mut self, spec: impl Into<Arc<RocketSpec>>) {
        self.rocket_spec = checked_rocket_spec(spec.into());
        let unit = self.thrusters.tuning().force_unit;
        for engine in &mut self.rockets {
            engine.apply_spec(&self.rocket_spec, unit);
        }
        debug!(vehicle = %self.label, engines = self.rockets.len(), "rocket spec replaced");
    }

    pub fn rocket_spec(&self) -> &Arc<RocketSpec> {
        &self.rocket_spec
    }

    pub fn set_tuning(&mut self, tuning: ControlTuning) {
        self.thrusters.set_tuning(tuning);
        // The native force unit may have changed.
        let unit = self.thrusters.tuning().force_unit;
        for engine in &mut self.rockets {
            engine.apply_spec(&self.rocket_spec, unit);
        }
    }

    pub fn tuning(&self) -> &ControlTuning {
        self.thrusters.tuning()
    }

    // ---- registration ----

    /// Register an engine. A second engine with the same id is refused.
    pub fn add_rocket(&mut self, mut engine: RocketEngine) -> bool {
        let id = engine.id();
        if self.rockets.iter().any(|e| e.id() == id) {
            warn!(vehicle = %self.label, %id, "rocket engine already registered; ignoring");
            return false;
        }
        engine.apply_spec(&self.rocket_spec, self.thrusters.tuning().force_unit);
        debug!(vehicle = %self.label, %id, capacity_kn = engine.capacity_kn(), "rocket engine registered");
        self.rockets.push(engine);
        true
    }

    pub fn remove_rocket(&mut self, id: EngineId) -> Option<RocketEngine> {
        let Some(index) = self.rockets.iter().position(|e| e.id() == id) else {
            warn!(vehicle = %self.label, %id, "rocket engine not registered; nothing removed");
            return None;
        };
        debug!(vehicle = %self.label, %id, "rocket engine removed");
        Some(self.rockets.remove(index))
    }

    pub fn rockets(&self) -> &[RocketEngine] {
        &self.rockets
    }

    pub fn rocket(&self, id: EngineId) -> Option<&RocketEngine> {
        self.rockets.iter().find(|e| e.id() == id)
    }

    // ---- toggles ----

    pub fn set_linear_braking(&mut self, enabled: bool) {
        self.thrusters.set_linear_braking(enabled);
        debug!(vehicle = %self.label, enabled, "linear braking");
    }

    pub fn toggle_linear_braking(&mut self) {
        self.set_linear_braking(!self.thrusters.is_linear_braking());
    }

    pub fn set_angular_braking(&mut self, enabled: bool) {
        self.thrusters.set_angular_braking(enabled);
        debug!(vehicle = %self.label, enabled, "angular braking");
    }

    pub fn toggle_angular_braking(&mut self) {
        self.set_angular_braking(!self.thrusters.is_angular_braking());
    }

    /// Switching turn mode also drops the current angular command, which means
    /// something different in each mode.
    pub fn set_alternate_turning(&mut self, enabled: bool) {
        self.thrusters.set_alternate_turning(enabled);
        self.thrusters.end_angular_thrust();
        debug!(vehicle = %self.label, enabled, "alternate turning");
    }

    pub fn toggle_alternate_turning(&mut self) {
        self.set_alternate_turning(!self.thrusters.is_alternate_turning());
    }

    // ---- input ----

    /// Near-zero input is ignored; the previous command stays in effect.
    pub fn tick_linear_thrust(&mut self, direction: Vec3f) {
        if is_nearly_zero(direction) {
            return;
        }
        self.thrusters.set_linear_thrust_direction(clamp_axes(direction));
    }

    pub fn end_linear_thrust(&mut self) {
        self.thrusters.end_linear_thrust();
    }

    /// Rate mode: `x` is the yaw command. Alternate turning: world heading to seek.
    pub fn tick_angular_thrust(&mut self, direction: Vec3f) {
        if is_nearly_zero(direction) {
            return;
        }
        self.thrusters.set_angular_thrust_direction(clamp_axes(direction));
    }

    pub fn end_angular_thrust(&mut self) {
        self.thrusters.end_angular_thrust();
    }

    pub fn tick_boosting(&mut self, amount: f32) {
        if !self.thrusters.is_boosting() {
            debug!(vehicle = %self.label, amount, "boost engaged");
        }
        self.thrusters.set_boosting(true);
        self.thrusters.set_boost_amount(amount);
    }

    pub fn end_boosting(&mut self) {
        if self.thrusters.is_boosting() {
            debug!(vehicle = %self.label, "boost released");
        }
        self.thrusters.set_boosting(false);
        for engine in &mut self.rockets {
            engine.end_thrust();
        }
    }

    // ---- physics ----

    /// One physics step. Thrusters run first, then (while boosting) each
    /// rocket's throttle is set from its engagement toward the push direction.
    pub fn tick<B: RigidBody + ?Sized>(&mut self, mut body: Option<&mut B>, dt: f32) {
        self.thrusters.tick(body.as_deref_mut(), dt);

        let Some(body) = body else {
            return;
        };
        if !body.is_simulating() || !(dt > 0.0) || !self.thrusters.is_boosting() {
            return;
        }

        let orientation = body.orientation();
        let linear = self.thrusters.input().linear_direction;
        let (direction, weight) = if is_nearly_zero(linear) {
            (body.forward(), 1.0)
        } else {
            (linear, linear.length())
        };
        let amount = self.thrusters.boost_amount();
        for engine in &mut self.rockets {
            let scale = amount * engine.engagement_toward(orientation, direction) * weight;
            engine.tick_thrust(scale, orientation);
            engine.apply_to(body);
        }
        trace!(vehicle = %self.label, engines = self.rockets.len(), amount, "rockets ticked");
    }

    // ---- telemetry ----

    pub fn linear_thrust_vector(&self) -> Vec3f {
        self.thrusters.linear_thrust_vector()
    }

    pub fn current_linear_thrust_normal(&self) -> Vec3f {
        self.thrusters.current_linear_thrust_normal()
    }

    pub fn yaw_torque(&self) -> f32 {
        self.thrusters.yaw_torque()
    }

    pub fn yaw_torque_normalized(&self) -> f32 {
        self.thrusters.yaw_torque_normalized()
    }

    pub fn is_boosting(&self) -> bool {
        self.thrusters.is_boosting()
    }

    pub fn boost_amount(&self) -> f32 {
        self.thrusters.boost_amount()
    }

    pub fn is_linear_braking(&self) -> bool {
        self.thrusters.is_linear_braking()
    }

    pub fn is_angular_braking(&self) -> bool {
        self.thrusters.is_angular_braking()
    }

    pub fn is_alternate_turning(&self) -> bool {
        self.thrusters.is_alternate_turning()
    }

    /// Mean of current/max power over engines that can produce thrust at all.
    pub fn average_rocket_power(&self) -> f32 {
        let (sum, count) = self
            .rockets
            .iter()
            .filter_map(|e| {
                let max = e.max_thrust_power();
                (max > 0.0).then(|| e.current_thrust_power() / max)
            })
            .fold((0.0_f32, 0_u32), |(sum, n), ratio| (sum + ratio, n + 1));
        if count == 0 {
            0.0
        } else {
            sum / count as f32
        }
    }

    pub fn combined_rocket_thrust(&self) -> Vec3f {
        self.rockets
            .iter()
            .fold(Vec3f::ZERO, |acc, e| acc + e.current_thrust_vector())
    }

    pub fn telemetry(&self) -> PropulsionTelemetry {
        let t = self.thrusters.telemetry();
        PropulsionTelemetry {
            linear_thrust: t.linear_thrust,
            linear_thrust_normal: self.current_linear_thrust_normal(),
            yaw_torque: t.yaw_torque,
            yaw_torque_normalized: self.yaw_torque_normalized(),
            boosting: self.is_boosting(),
            boost_amount: self.boost_amount(),
            linear_braking: self.is_linear_braking(),
            angular_braking: self.is_angular_braking(),
            alternate_turning: self.is_alternate_turning(),
            seek_branch: t.seek_branch,
            rocket_count: self.rockets.len(),
            average_rocket_power: self.average_rocket_power(),
            combined_rocket_thrust: self.combined_rocket_thrust(),
        }
    }
}

fn checked_rocket_spec(spec: Arc<RocketSpec>) -> Arc<RocketSpec> {
    match spec.validate() {
        Ok(()) => spec,
        Err(err) => {
            warn!(%err, "rocket spec has invalid values; running on a sanitized copy");
            Arc::new(spec.sanitized())
        }
    }
}
