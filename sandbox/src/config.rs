use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use propulsion::{vehiclespecs, ControlTuning, EngineSpec, RocketSpec, ThrusterSpec, Vec3f, VehicleSpec};

/// Preset used when neither the file nor the command line names one.
pub const DEFAULT_PRESET: &str = "courier";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed physics step (s).
    pub dt: f32,
    pub ticks: u32,
    /// Log (and sample) every N ticks; 0 disables periodic samples.
    pub log_every: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { dt: 1.0 / 60.0, ticks: 600, log_every: 60 }
    }
}

/// Initial rigid body state. Mass and inertia fall back to the preset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BodyConfig {
    pub mass: Option<f32>,
    pub inertia: Option<Vec3f>,
    pub yaw_deg: f32,
    pub velocity: Vec3f,
    /// Initial yaw rate (deg/s).
    pub yaw_rate_deg: f32,
}

/// Something the pilot does at a given tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PilotAction {
    /// World-space push direction on the horizontal plane.
    LinearThrust { x: f32, y: f32 },
    EndLinearThrust,
    /// Rate-mode yaw command in [-1, 1], positive turns left.
    Yaw { rate: f32 },
    /// Heading to seek while alternate turning (degrees from +X).
    SeekHeading { heading_deg: f32 },
    EndAngularThrust,
    Boost { amount: f32 },
    EndBoost,
    LinearBrake { enabled: bool },
    AngularBrake { enabled: bool },
    AlternateTurning { enabled: bool },
    DetachEngine { id: u32 },
    /// Re-attach an engine listed in `[[engines]]`.
    AttachEngine { id: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub tick: u32,
    #[serde(flatten)]
    pub action: PilotAction,
}

/// On-disk scenario. Every vehicle section is optional and falls back to the
/// preset's value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub sim: SimConfig,
    pub preset: Option<String>,
    pub body: BodyConfig,
    pub thrusters: Option<ThrusterSpec>,
    pub rockets: Option<RocketSpec>,
    pub tuning: Option<ControlTuning>,
    pub engines: Option<Vec<EngineSpec>>,
    pub events: Vec<ScheduledEvent>,
}

impl Config {
    /// The vehicle this scenario flies: the preset with file sections laid over it.
    pub fn vehicle(&self) -> Result<VehicleSpec> {
        let name = self.preset.as_deref().unwrap_or(DEFAULT_PRESET);
        let mut vehicle =
            vehiclespecs::by_name(name).ok_or_else(|| anyhow!("unknown vehicle preset {name:?}"))?;
        if let Some(mass) = self.body.mass {
            vehicle.mass = mass;
        }
        if let Some(inertia) = self.body.inertia {
            vehicle.inertia = inertia;
        }
        if let Some(thrusters) = &self.thrusters {
            vehicle.thrusters = thrusters.clone();
        }
        if let Some(rockets) = &self.rockets {
            vehicle.rockets = rockets.clone();
        }
        if let Some(tuning) = self.tuning {
            vehicle.tuning = tuning;
        }
        if let Some(engines) = &self.engines {
            vehicle.engines = engines.clone();
        }
        Ok(vehicle)
    }

    /// Reject anything the controllers would otherwise have to sanitize.
    pub fn validate(&self) -> Result<()> {
        if !(self.sim.dt > 0.0 && self.sim.dt.is_finite()) {
            bail!("[sim] dt must be positive (got {})", self.sim.dt);
        }
        let vehicle = self.vehicle()?;
        if !(vehicle.mass > 0.0) {
            bail!("[body] mass must be positive (got {})", vehicle.mass);
        }
        if !(vehicle.inertia.min_element() > 0.0) {
            bail!("[body] inertia must be positive on every axis (got {:?})", vehicle.inertia);
        }
        vehicle.thrusters.validate().context("invalid [thrusters]")?;
        vehicle.rockets.validate().context("invalid [rockets]")?;
        vehicle.tuning.validate().context("invalid [tuning]")?;

        let mut ids: Vec<u32> = vehicle.engines.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|w| w[0] == w[1]) {
            bail!("[[engines]] id {} listed twice", pair[0]);
        }
        for event in &self.events {
            if event.tick >= self.sim.ticks {
                warn!(tick = event.tick, ticks = self.sim.ticks, action = ?event.action, "event scheduled after the last tick");
            }
        }
        Ok(())
    }
}

/// Deserialize only. Values are checked once, by [`Scenario::from_config`],
/// after any command-line overrides are applied.
///
/// [`Scenario::from_config`]: crate::Scenario::from_config
pub fn parse_config(text: &str) -> Result<Config> {
    toml::from_str(text).context("failed to parse scenario TOML")
}

pub fn load_config(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario {}", path.display()))?;
    parse_config(&text).with_context(|| format!("in {}", path.display()))
}
