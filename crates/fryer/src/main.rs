use anyhow::Context;
use clap::Parser;
use fryer::Fryer;
use fryer::config::AppConfig;
use fryer::scenario::{ScenarioDefinition, ScenarioExecutor, ScenarioExecutorConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file (RON); without one a single fry is dropped at the start
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Configuration file (RON); defaults to fryer.ron in the working directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated seconds to run (overrides config and scenario)
    #[arg(long)]
    duration: Option<f32>,

    /// Ticks per simulated second
    #[arg(long)]
    fps: Option<u32>,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Starting oil temperature in °C (160-190)
    #[arg(long)]
    oil_temp: Option<f32>,

    /// Seconds between status samples (0 disables)
    #[arg(long)]
    sample_interval: Option<f32>,

    /// Write the run report (RON) to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log every executed action
    #[arg(long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command-line arguments
    let args = Args::parse();

    let mut app = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // Command-line flags take precedence over every config layer
    if let Some(fps) = args.fps {
        app.run.fps = fps;
    }
    if let Some(seed) = args.seed {
        app.run.seed = seed;
    }
    if let Some(interval) = args.sample_interval {
        app.run.sample_interval_secs = interval;
    }
    if let Some(temperature) = args.oil_temp {
        app.simulation.initial_temperature = temperature;
    }

    let seed = if app.run.seed == 0 {
        rand::random()
    } else {
        app.run.seed
    };

    let mut scenario = match &args.scenario {
        Some(path) => ScenarioDefinition::from_file(path)?,
        None => ScenarioDefinition::drop_and_fry(),
    };
    if let Some(duration) = args.duration {
        scenario.duration_secs = Some(duration);
    }

    let mut fryer = Fryer::new(app.simulation.clone()).context("Invalid simulation configuration")?;
    let mut rng = fryer_core::seeded_rng(seed);

    log::info!(
        "Running '{}' with seed {} at {:.0}°C",
        scenario.name,
        seed,
        fryer.oil().temperature()
    );

    let mut executor = ScenarioExecutor::with_config(ScenarioExecutorConfig {
        fps: app.run.fps,
        default_duration_secs: app.run.duration_secs,
        sample_interval_secs: app.run.sample_interval_secs,
        seed,
        verbose: args.verbose,
    });
    let report = executor.execute_scenario(&scenario, &mut fryer, &mut rng)?;

    if let Some(status) = &report.final_status {
        log::info!("Final: {}", status.summary());
    }
    log::info!(
        "Bubbles: {} spawned, {} surfaced, {} skipped at cap",
        report.census.total_spawned(),
        report.census.total_surfaced(),
        report.census.skipped
    );
    log::info!("Performance: {}", report.performance.summary());

    if let Some(path) = &args.report {
        report.save_ron(path)?;
        log::info!("Report written to {}", path.display());
    }

    Ok(())
}
