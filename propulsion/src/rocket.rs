use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::body::RigidBody;
use crate::engagement::engagement_vector;
use crate::math::{is_nearly_zero, Quatf, Vec3f, BODY_FWD, BODY_UP, SMALL_NUMBER};
use crate::spec::{non_negative, RocketSpec};
use crate::units::ForceUnit;

/// Stable handle for a registered rocket engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EngineId(pub u32);

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "engine#{}", self.0)
    }
}

/// Supplies the current efficiency multiplier of an engine (fuel, heat,
/// damage...). Read every time the engine's power is evaluated.
pub trait EfficiencySource: Send + Sync {
    fn efficiency_multiplier(&self) -> f32;
}

/// Constant efficiency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedEfficiency(pub f32);

impl EfficiencySource for FixedEfficiency {
    fn efficiency_multiplier(&self) -> f32 {
        self.0
    }
}

/// Efficiency shared with an outside system that updates it between ticks.
#[derive(Debug, Clone, Default)]
pub struct SharedEfficiency(Arc<AtomicU32>);

impl SharedEfficiency {
    pub fn new(value: f32) -> Self {
        Self(Arc::new(AtomicU32::new(value.to_bits())))
    }

    pub fn set(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

impl EfficiencySource for SharedEfficiency {
    fn efficiency_multiplier(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }
}

/// Where an engine sits on the vehicle, in the vehicle's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineMount {
    /// Direction the engine pushes the vehicle.
    pub forward: Vec3f,
    /// Offset from the centre of mass; zero pushes through the centre.
    #[serde(default)]
    pub offset: Vec3f,
}

impl EngineMount {
    pub fn new(forward: Vec3f, offset: Vec3f) -> Self {
        Self { forward, offset }
    }

    /// Engine yawed `yaw_deg` from the vehicle nose (positive toward the left).
    pub fn from_yaw_deg(yaw_deg: f32, offset: Vec3f) -> Self {
        Self::new(Quatf::from_rotation_z(yaw_deg.to_radians()) * BODY_FWD, offset)
    }

    /// Side axis of the engine: its forward turned a quarter toward body right.
    pub fn right(&self) -> Vec3f {
        self.forward.cross(BODY_UP).normalize_or_zero()
    }
}

/// How much of an engine pointing along `engine_forward` helps push along
/// `desired`, in [0, 1].
///
/// The side axis on the same side as `desired` scores 0, the engine's own
/// forward scores 1, and directions in between interpolate by projection.
pub fn engagement_value(engine_forward: Vec3f, engine_right: Vec3f, desired: Vec3f) -> f32 {
    // (desired × forward).z > 0 when desired lies clockwise of forward, i.e. on its right.
    let lateral = if desired.cross(engine_forward).z > 0.0 { engine_right } else { -engine_right };
    let span = engine_forward - lateral;
    let span_len_sq = span.length_squared();
    if span_len_sq <= SMALL_NUMBER {
        return 0.0;
    }
    ((desired - lateral).dot(span) / span_len_sq).clamp(0.0, 1.0)
}

/// A discrete booster. Pushes only along its own forward axis.
pub struct RocketEngine {
    id: EngineId,
    mount: EngineMount,
    efficiency: Box<dyn EfficiencySource>,
    force_unit: ForceUnit,
    /// Mount-derated capacity (kN).
    capacity_kn: f32,
    current_thrust: Vec3f,
    thrusting: bool,
}

impl fmt::Debug for RocketEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RocketEngine")
            .field("id", &self.id)
            .field("mount", &self.mount)
            .field("efficiency", &self.efficiency.efficiency_multiplier())
            .field("capacity_kn", &self.capacity_kn)
            .field("current_thrust", &self.current_thrust)
            .field("thrusting", &self.thrusting)
            .finish()
    }
}

impl RocketEngine {
    /// An engine has no capacity until a [`RocketSpec`] is applied, which the
    /// coordinator does on registration.
    pub fn new(id: EngineId, mount: EngineMount, efficiency: impl EfficiencySource + 'static) -> Self {
        Self {
            id,
            mount,
            efficiency: Box::new(efficiency),
            force_unit: ForceUnit::default(),
            capacity_kn: 0.0,
            current_thrust: Vec3f::ZERO,
            thrusting: false,
        }
    }

    pub fn id(&self) -> EngineId {
        self.id
    }

    pub fn mount(&self) -> &EngineMount {
        &self.mount
    }

    /// Derive this engine's capacity from the shared spec: mounts angled away
    /// from the vehicle nose lose capacity per the boost table.
    pub fn apply_spec(&mut self, spec: &RocketSpec, force_unit: ForceUnit) {
        let derate = engagement_vector(BODY_FWD, self.mount.forward, &spec.boost_multiplier).length();
        // Rounding off a yawed mount must not leave a sliver of capacity.
        let derate = if derate > SMALL_NUMBER { derate } else { 0.0 };
        self.capacity_kn = non_negative(spec.linear_thrust_kn * derate);
        self.force_unit = force_unit;
    }

    pub fn capacity_kn(&self) -> f32 {
        self.capacity_kn
    }

    /// Current multiplier from the efficiency source; negative or NaN reads as 0.
    pub fn efficiency_multiplier(&self) -> f32 {
        non_negative(self.efficiency.efficiency_multiplier())
    }

    /// Full-throttle force magnitude right now (native units).
    pub fn max_thrust_power(&self) -> f32 {
        self.force_unit
            .kilonewtons_to_native(self.capacity_kn * self.efficiency_multiplier())
    }

    /// Engine forward and side axes in world space.
    pub fn world_axes(&self, orientation: Quatf) -> (Vec3f, Vec3f) {
        (orientation * self.mount.forward.normalize_or_zero(), orientation * self.mount.right())
    }

    pub fn max_thrust_vector(&self, orientation: Quatf) -> Vec3f {
        self.world_axes(orientation).0 * self.max_thrust_power()
    }

    /// Engagement toward a world-space `desired` push with the vehicle at `orientation`.
    pub fn engagement_toward(&self, orientation: Quatf, desired: Vec3f) -> f32 {
        let (forward, right) = self.world_axes(orientation);
        engagement_value(forward, right, desired)
    }

    pub fn tick_thrust(&mut self, scale: f32, orientation: Quatf) {
        let scale = if scale.is_nan() { 0.0 } else { scale.clamp(0.0, 1.0) };
        self.current_thrust = self.max_thrust_vector(orientation) * scale;
        self.thrusting = true;
    }

    pub fn end_thrust(&mut self) {
        self.current_thrust = Vec3f::ZERO;
        self.thrusting = false;
    }

    pub fn is_thrusting(&self) -> bool {
        self.thrusting
    }

    pub fn current_thrust_vector(&self) -> Vec3f {
        self.current_thrust
    }

    pub fn current_thrust_power(&self) -> f32 {
        self.current_thrust.length()
    }

    /// Hand the current thrust to the body at the mount point.
    pub(crate) fn apply_to<B: RigidBody + ?Sized>(&self, body: &mut B) {
        if !self.thrusting || is_nearly_zero(self.current_thrust) {
            return;
        }
        if self.mount.offset == Vec3f::ZERO {
            body.apply_force(self.current_thrust, true);
        } else {
            let point = body.position() + body.orientation() * self.mount.offset;
            body.apply_force_at_point(self.current_thrust, point);
        }
    }
}
