//! Headless host for the propulsion controllers: loads a scenario, flies it
//! against a reference rigid body and logs what happened.

use std::path::PathBuf;

use clap::Parser;

mod config;
pub use config::{load_config, parse_config, BodyConfig, Config, PilotAction, ScheduledEvent, SimConfig, DEFAULT_PRESET};
mod scenario;
pub use scenario::{apply_action, run_scenario, Sample, Scenario, ScenarioReport};

#[derive(Debug, Clone, Parser)]
#[command(name = "sandbox", version, about = "Fly a propulsion scenario headlessly")]
pub struct Args {
    /// Scenario TOML. Without one the preset idles for the configured ticks.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Vehicle preset for sections the scenario leaves out (overrides the file).
    #[arg(long)]
    pub preset: Option<String>,

    /// Override [sim] ticks.
    #[arg(long)]
    pub ticks: Option<u32>,
}
