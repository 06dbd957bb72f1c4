use anyhow::Result;
use clap::Parser;
use tracing::info;

use sandbox::{load_config, run_scenario, Args, Config, Scenario};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut cfg = match &args.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    if let Some(preset) = args.preset {
        cfg.preset = Some(preset);
    }
    if let Some(ticks) = args.ticks {
        cfg.sim.ticks = ticks;
    }
    let scenario = Scenario::from_config(&cfg)?;
    info!(sim = ?scenario.sim, events = scenario.events.len(), engines = scenario.vehicle.engines.len(), "Sandbox scenario loaded");

    let report = run_scenario(&scenario);
    info!(
        ticks = report.ticks,
        peak_speed = report.peak_speed,
        final_speed = report.body.velocity.length(),
        final_yaw_deg = report.body.yaw().to_degrees(),
        telemetry = ?report.telemetry,
        "Scenario finished"
    );
    Ok(())
}
