use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::units::ForceUnit;

/// Controller constants. Defaults reproduce the stock vehicle feel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlTuning {
    /// Linear brake gain: requested stopping force is this many kN per m/s.
    pub brake_aggressiveness: f32,
    /// Overshoot the seek controller accepts instead of reversing (degrees).
    pub miss_tolerance_deg: f32,
    /// Seek torque request per unit of `inertia * rad/s` (1/s).
    pub seek_gain: f32,
    /// Per-component tolerance for "forward equals target".
    pub alignment_tolerance: f32,
    /// Horizontal speed under which the linear brake snaps to rest (m/s).
    pub rest_speed: f32,
    /// Angular speed under which the angular brake snaps to rest (rad/s).
    pub rest_angular_speed: f32,
    /// Overspeed allowed before rate control stops applying torque (rad/s).
    pub rate_limit_epsilon: f32,
    /// Fraction of torque capacity below which residual spin at the target is snapped.
    pub settle_torque_fraction: f32,
    pub force_unit: ForceUnit,
}

impl Default for ControlTuning {
    fn default() -> Self {
        Self {
            brake_aggressiveness: 10.0,
            miss_tolerance_deg: 5.0,
            seek_gain: 100.0,
            alignment_tolerance: 1e-3,
            rest_speed: 1e-3,
            rest_angular_speed: 1e-4,
            rate_limit_epsilon: 1e-4,
            settle_torque_fraction: 1e-3,
            force_unit: ForceUnit::Newton,
        }
    }
}

impl ControlTuning {
    pub fn miss_tolerance_rad(&self) -> f32 {
        self.miss_tolerance_deg.to_radians()
    }

    fn fields(&self) -> [(&'static str, f32); 8] {
        [
            ("brake_aggressiveness", self.brake_aggressiveness),
            ("miss_tolerance_deg", self.miss_tolerance_deg),
            ("seek_gain", self.seek_gain),
            ("alignment_tolerance", self.alignment_tolerance),
            ("rest_speed", self.rest_speed),
            ("rest_angular_speed", self.rest_angular_speed),
            ("rate_limit_epsilon", self.rate_limit_epsilon),
            ("settle_torque_fraction", self.settle_torque_fraction),
        ]
    }

    pub fn validate(&self) -> Result<(), SpecError> {
        for (field, value) in self.fields() {
            if !(value.is_finite() && value > 0.0) {
                return Err(SpecError::InvalidTuning { field, value });
            }
        }
        Ok(())
    }

    /// Copy with each invalid field replaced by its default.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let pick = |value: f32, fallback: f32| if value.is_finite() && value > 0.0 { value } else { fallback };
        Self {
            brake_aggressiveness: pick(self.brake_aggressiveness, defaults.brake_aggressiveness),
            miss_tolerance_deg: pick(self.miss_tolerance_deg, defaults.miss_tolerance_deg),
            seek_gain: pick(self.seek_gain, defaults.seek_gain),
            alignment_tolerance: pick(self.alignment_tolerance, defaults.alignment_tolerance),
            rest_speed: pick(self.rest_speed, defaults.rest_speed),
            rest_angular_speed: pick(self.rest_angular_speed, defaults.rest_angular_speed),
            rate_limit_epsilon: pick(self.rate_limit_epsilon, defaults.rate_limit_epsilon),
            settle_torque_fraction: pick(self.settle_torque_fraction, defaults.settle_torque_fraction),
            force_unit: self.force_unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ControlTuning::default().validate().is_ok());
    }

    #[test]
    fn zero_gain_falls_back_to_default() {
        let tuning = ControlTuning { seek_gain: 0.0, ..Default::default() };
        assert_eq!(
            tuning.validate(),
            Err(SpecError::InvalidTuning { field: "seek_gain", value: 0.0 })
        );
        assert_eq!(tuning.sanitized().seek_gain, 100.0);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let tuning: ControlTuning = toml::from_str(
            r#"
            brake_aggressiveness = 4.0
            force_unit = "centinewton"
            "#,
        )
        .expect("valid tuning");
        assert_eq!(tuning.brake_aggressiveness, 4.0);
        assert_eq!(tuning.force_unit, ForceUnit::Centinewton);
        assert_eq!(tuning.miss_tolerance_deg, 5.0);
    }
}
