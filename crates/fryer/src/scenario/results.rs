//! Run results and reporting

use anyhow::{Context, Result};
use fryer_core::{BubbleCensus, FryerStatus};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Wall-clock cost of a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Total wall-clock time (milliseconds)
    pub total_duration_ms: f64,

    /// Average time per tick (milliseconds)
    pub avg_tick_time_ms: f64,

    /// Peak tick time (milliseconds)
    pub peak_tick_time_ms: f64,

    /// Most bubbles alive at once
    pub peak_bubbles: usize,
}

impl PerformanceMetrics {
    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "Total: {:.1}ms | Avg tick: {:.3}ms | Peak: {:.3}ms | Peak bubbles: {}",
            self.total_duration_ms, self.avg_tick_time_ms, self.peak_tick_time_ms, self.peak_bubbles
        )
    }
}

/// Report from a scenario run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Scenario name
    pub scenario_name: String,

    /// Timestamp (ISO 8601)
    pub timestamp: String,

    /// Seed the run was driven with
    pub seed: u64,

    /// Total frames executed (paused frames included)
    pub frames_executed: usize,

    /// Number of actions executed
    pub actions_executed: usize,

    /// Simulated fryer time at the end of the run
    pub sim_time: f32,

    /// Bubble event totals
    pub census: BubbleCensus,

    /// Periodic status snapshots
    pub samples: Vec<FryerStatus>,

    /// Status at the end of the run
    pub final_status: Option<FryerStatus>,

    /// Execution log messages
    pub log: Vec<String>,

    pub performance: PerformanceMetrics,
}

impl RunReport {
    pub fn new(scenario_name: String, seed: u64) -> Self {
        Self {
            scenario_name,
            timestamp: chrono::Utc::now().to_rfc3339(),
            seed,
            frames_executed: 0,
            actions_executed: 0,
            sim_time: 0.0,
            census: BubbleCensus::default(),
            samples: Vec::new(),
            final_status: None,
            log: Vec::new(),
            performance: PerformanceMetrics::default(),
        }
    }

    /// Save report to RON file
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<()> {
        let ron = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize run report to RON")?;

        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path.as_ref(), ron).with_context(|| {
            format!("Failed to write run report: {}", path.as_ref().display())
        })?;

        Ok(())
    }

    /// Load report from RON file
    pub fn from_ron(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read report file: {}", path.as_ref().display()))?;

        let report = ron::from_str(&content)
            .with_context(|| format!("Failed to parse RON report: {}", path.as_ref().display()))?;

        Ok(report)
    }
}
