//! Runner configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `fryer.ron` file (if exists)
//! 3. Environment variables prefixed with `FRYER_`
//!
//! Example environment variable: `FRYER_SIMULATION__MAX_BUBBLES=500`

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use fryer_core::SimulationConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main runner configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub run: RunConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Headless run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Simulated seconds to run when the scenario does not say
    pub duration_secs: f32,
    /// Ticks per simulated second
    pub fps: u32,
    /// Seconds between status samples
    pub sample_interval_secs: f32,
    /// RNG seed; 0 picks a random one
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            duration_secs: 120.0,
            fps: 60,
            sample_interval_secs: 10.0,
            seed: 0,
        }
    }
}

impl AppConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `fryer.ron` in the working directory (if exists)
    /// 3. Environment variables prefixed with `FRYER_` (highest priority)
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("fryer"))
    }

    /// Same layering with an explicit config file (extension optional)
    pub fn load_from(path: &Path) -> Result<Self> {
        let defaults = Config::try_from(&AppConfig::default())
            .context("Failed to serialize default configuration")?;

        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .add_source(defaults)
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::from(path)
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (FRYER_RUN__FPS, etc.)
            .add_source(
                Environment::with_prefix("FRYER")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let config = builder.build().context("Failed to build configuration")?;

        let app: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app.simulation
            .validate()
            .context("Invalid simulation configuration")?;

        Ok(app)
    }
}
