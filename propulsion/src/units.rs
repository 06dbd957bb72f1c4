use serde::{Deserialize, Serialize};

pub const CENTINEWTONS_PER_NEWTON: f32 = 100.0;
pub const CENTINEWTONS_PER_KILONEWTON: f32 = 100_000.0;
pub const CENTINEWTONS_PER_MEGANEWTON: f32 = 100_000_000.0;

/// Force unit the host physics engine expects in `apply_force`/`apply_torque`.
///
/// Configuration is authored in newton multiples (kN for thrust, kN·m for
/// torque); everything handed to a [`RigidBody`](crate::RigidBody) is first
/// converted through this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceUnit {
    #[default]
    Newton,
    /// Engines working in centimetres (kg·cm/s²).
    Centinewton,
}

impl ForceUnit {
    pub const fn per_newton(self) -> f32 {
        match self {
            ForceUnit::Newton => 1.0,
            ForceUnit::Centinewton => CENTINEWTONS_PER_NEWTON,
        }
    }

    #[inline]
    pub fn newtons_to_native(self, newtons: f32) -> f32 {
        newtons * self.per_newton()
    }

    #[inline]
    pub fn kilonewtons_to_native(self, kilonewtons: f32) -> f32 {
        self.newtons_to_native(kilonewtons * 1_000.0)
    }

    #[inline]
    pub fn meganewtons_to_native(self, meganewtons: f32) -> f32 {
        self.newtons_to_native(meganewtons * 1_000_000.0)
    }

    #[inline]
    pub fn native_to_newtons(self, native: f32) -> f32 {
        native / self.per_newton()
    }
}
