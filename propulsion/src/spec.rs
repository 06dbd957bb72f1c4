use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// Side of the vehicle a multiplier applies to. Lookup key only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Front,
    Back,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Front, Direction::Back, Direction::Left, Direction::Right];
}

/// Per-side gain applied when a push is expressed in the vehicle frame.
///
/// `front` scales local −X pushes (the nose thrusters fire), `back` scales
/// local +X, `right` local −Y and `left` local +Y.
/// A missing entry means gain 1.0. A table with no entries at all means the
/// vehicle has no thrusters of that kind and yields zero engagement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectionalMultiplierTable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f32>,
}

impl DirectionalMultiplierTable {
    pub const EMPTY: Self = Self { front: None, back: None, left: None, right: None };

    pub const fn uniform(gain: f32) -> Self {
        Self { front: Some(gain), back: Some(gain), left: Some(gain), right: Some(gain) }
    }

    pub fn with(mut self, direction: Direction, gain: f32) -> Self {
        *self.slot_mut(direction) = Some(gain);
        self
    }

    pub fn get(&self, direction: Direction) -> Option<f32> {
        match direction {
            Direction::Front => self.front,
            Direction::Back => self.back,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Gain for `direction`, 1.0 when the entry is absent.
    pub fn gain(&self, direction: Direction) -> f32 {
        self.get(direction).unwrap_or(1.0)
    }

    pub fn is_empty(&self) -> bool {
        Direction::ALL.iter().all(|d| self.get(*d).is_none())
    }

    fn slot_mut(&mut self, direction: Direction) -> &mut Option<f32> {
        match direction {
            Direction::Front => &mut self.front,
            Direction::Back => &mut self.back,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }

    fn validate(&self, table: &'static str) -> Result<(), SpecError> {
        for direction in Direction::ALL {
            if let Some(gain) = self.get(direction) {
                if !(gain.is_finite() && gain >= 0.0) {
                    return Err(SpecError::NegativeGain { table, direction, gain });
                }
            }
        }
        Ok(())
    }

    fn sanitized(&self) -> Self {
        let mut out = *self;
        for direction in Direction::ALL {
            if let Some(gain) = out.slot_mut(direction) {
                *gain = non_negative(*gain);
            }
        }
        out
    }
}

/// Thruster capacities for one vehicle class. Replaced wholesale on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrusterSpec {
    /// Linear thrust capacity (kN).
    pub linear_thrust_kn: f32,
    /// Yaw torque capacity (kN·m).
    pub torque_knm: f32,
    /// Yaw rate ceiling enforced by rate control (deg/s).
    pub max_angular_speed_deg: f32,
    #[serde(default)]
    pub thrust_multiplier: DirectionalMultiplierTable,
    /// Extra engagement added on top of `thrust_multiplier` while boosting.
    #[serde(default)]
    pub boost_multiplier: DirectionalMultiplierTable,
}

impl ThrusterSpec {
    pub fn max_angular_speed_rad(&self) -> f32 {
        self.max_angular_speed_deg.to_radians()
    }

    pub fn validate(&self) -> Result<(), SpecError> {
        check_capacity("linear_thrust_kn", self.linear_thrust_kn)?;
        check_capacity("torque_knm", self.torque_knm)?;
        check_capacity("max_angular_speed_deg", self.max_angular_speed_deg)?;
        self.thrust_multiplier.validate("thrust_multiplier")?;
        self.boost_multiplier.validate("boost_multiplier")
    }

    /// Copy with every negative or non-finite number clamped to zero.
    pub fn sanitized(&self) -> Self {
        Self {
            linear_thrust_kn: non_negative(self.linear_thrust_kn),
            torque_knm: non_negative(self.torque_knm),
            max_angular_speed_deg: non_negative(self.max_angular_speed_deg),
            thrust_multiplier: self.thrust_multiplier.sanitized(),
            boost_multiplier: self.boost_multiplier.sanitized(),
        }
    }
}

/// Shared by every registered rocket engine; each engine derates the capacity
/// by its mount angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocketSpec {
    /// Per-engine thrust capacity before mount derating (kN).
    pub linear_thrust_kn: f32,
    #[serde(default)]
    pub boost_multiplier: DirectionalMultiplierTable,
}

impl RocketSpec {
    pub fn validate(&self) -> Result<(), SpecError> {
        check_capacity("linear_thrust_kn", self.linear_thrust_kn)?;
        self.boost_multiplier.validate("boost_multiplier")
    }

    pub fn sanitized(&self) -> Self {
        Self {
            linear_thrust_kn: non_negative(self.linear_thrust_kn),
            boost_multiplier: self.boost_multiplier.sanitized(),
        }
    }
}

fn check_capacity(field: &'static str, value: f32) -> Result<(), SpecError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SpecError::NegativeCapacity { field, value })
    }
}

pub(crate) fn non_negative(x: f32) -> f32 {
    if x.is_finite() { x.max(0.0) } else { 0.0 }
}
