//! Scenario execution engine

use anyhow::{Result, bail};
use fryer_core::simulation::SimRng;
use fryer_core::{BubbleCensus, Fryer};
use glam::Vec2;
use std::time::Instant;

use super::definition::{ScenarioAction, ScenarioDefinition};
use super::results::RunReport;

/// Configuration for scenario executor
#[derive(Debug, Clone)]
pub struct ScenarioExecutorConfig {
    /// Ticks per simulated second
    pub fps: u32,

    /// Run length when the scenario does not set one
    pub default_duration_secs: f32,

    /// Seconds between status samples; 0 disables sampling
    pub sample_interval_secs: f32,

    /// Seed recorded in the report
    pub seed: u64,

    /// Verbose logging
    pub verbose: bool,
}

impl Default for ScenarioExecutorConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            default_duration_secs: 120.0,
            sample_interval_secs: 10.0,
            seed: 0,
            verbose: false,
        }
    }
}

/// Drives a fryer through a scenario at a fixed frame rate
pub struct ScenarioExecutor {
    config: ScenarioExecutorConfig,

    /// Current frame counter (for timing)
    frame_count: usize,

    /// Action execution log
    log: Vec<String>,
}

impl ScenarioExecutor {
    /// Create new executor with default config
    pub fn new() -> Self {
        Self::with_config(ScenarioExecutorConfig::default())
    }

    /// Create new executor with custom config
    pub fn with_config(config: ScenarioExecutorConfig) -> Self {
        Self {
            config,
            frame_count: 0,
            log: Vec::new(),
        }
    }

    /// Execute a complete scenario
    pub fn execute_scenario<R: SimRng + ?Sized>(
        &mut self,
        scenario: &ScenarioDefinition,
        fryer: &mut Fryer,
        rng: &mut R,
    ) -> Result<RunReport> {
        if self.config.fps == 0 {
            bail!("Frame rate must be at least 1");
        }
        scenario.validate()?;

        let start_time = Instant::now();
        let mut report = RunReport::new(scenario.name.clone(), self.config.seed);
        let mut census = BubbleCensus::default();

        self.log.clear();
        self.frame_count = 0;

        let dt = 1.0 / self.config.fps as f32;
        let duration = scenario
            .duration_secs
            .unwrap_or(self.config.default_duration_secs);
        let total_frames = (duration * self.config.fps as f32).ceil() as usize;

        self.log(&format!("Starting scenario: {}", scenario.name));
        if !scenario.description.is_empty() {
            self.log(&format!("Description: {}", scenario.description));
        }
        self.log(&format!(
            "Running {} frames at {} fps ({:.1}s)",
            total_frames, self.config.fps, duration
        ));

        let mut pending = scenario.actions.iter().peekable();
        let mut next_sample = 0.0;
        let mut peak_tick_ms: f64 = 0.0;

        for frame in 0..total_frames {
            let scenario_time = frame as f32 * dt;

            while let Some(timed) = pending.next_if(|timed| timed.at_secs <= scenario_time) {
                self.execute_action(&timed.action, fryer);
                report.actions_executed += 1;
            }

            if self.config.sample_interval_secs > 0.0 && scenario_time >= next_sample {
                let status = fryer.status();
                log::info!("{}", status.summary());
                report.samples.push(status);
                next_sample += self.config.sample_interval_secs;
            }

            let tick_start = Instant::now();
            fryer.tick(dt, &mut census, rng);
            peak_tick_ms = peak_tick_ms.max(tick_start.elapsed().as_secs_f64() * 1000.0);

            report.performance.peak_bubbles = report.performance.peak_bubbles.max(fryer.bubbles().len());
            self.frame_count += 1;
        }

        // Actions scheduled at or past the end still fire
        for timed in pending {
            self.execute_action(&timed.action, fryer);
            report.actions_executed += 1;
        }

        let final_status = fryer.status();
        self.log(&format!("Final: {}", final_status.summary()));

        report.frames_executed = self.frame_count;
        report.sim_time = fryer.sim_time();
        report.census = census;
        report.final_status = Some(final_status);

        report.performance.total_duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
        report.performance.peak_tick_time_ms = peak_tick_ms;
        if self.frame_count > 0 {
            report.performance.avg_tick_time_ms =
                report.performance.total_duration_ms / self.frame_count as f64;
        }

        self.log(&format!(
            "Scenario complete: {} frames, {} bubbles spawned",
            self.frame_count,
            report.census.total_spawned()
        ));
        self.log(&format!("  Performance: {}", report.performance.summary()));
        report.log = self.log.clone();

        Ok(report)
    }

    /// Execute a single action
    fn execute_action(&mut self, action: &ScenarioAction, fryer: &mut Fryer) {
        if self.config.verbose {
            self.log(&format!("[Frame {}] {:?}", self.frame_count, action));
        }

        match action {
            ScenarioAction::DropBody => {
                fryer.drop_body();
                self.log("  Dropped fry");
            }

            ScenarioAction::SpawnBody {
                x,
                y,
                width,
                height,
            } => {
                fryer.spawn_body(Vec2::new(*x, *y), Vec2::new(*width, *height));
                self.log(&format!("  Placed fry at ({}, {})", x, y));
            }

            ScenarioAction::RemoveBody => match fryer.remove_body() {
                Some(body) => self.log(&format!(
                    "  Removed fry: cookedness {:.0}%, moisture {:.0}%",
                    body.cookedness() * 100.0,
                    body.moisture() * 100.0
                )),
                None => self.log("  Nothing to remove"),
            },

            ScenarioAction::ToggleBody => {
                fryer.toggle_body();
                let state = if fryer.body().is_some() { "in" } else { "out" };
                self.log(&format!("  Toggled fry {}", state));
            }

            ScenarioAction::SetTemperature { celsius } => {
                fryer.set_target_temperature(*celsius);
                self.log(&format!("  Target set to {:.0}°C", fryer.target_temperature()));
            }

            ScenarioAction::RaiseTemperature => {
                fryer.raise_target_temperature();
                self.log(&format!("  Target raised to {:.0}°C", fryer.target_temperature()));
            }

            ScenarioAction::LowerTemperature => {
                fryer.lower_target_temperature();
                self.log(&format!("  Target lowered to {:.0}°C", fryer.target_temperature()));
            }

            ScenarioAction::Pause => {
                fryer.pause();
                self.log("  Paused");
            }

            ScenarioAction::Resume => {
                fryer.resume();
                self.log("  Resumed");
            }

            ScenarioAction::Reset => {
                fryer.reset();
                self.log("  Reset fryer");
            }

            ScenarioAction::Grab { x, y } => {
                if fryer.begin_drag(Vec2::new(*x, *y)) {
                    self.log(&format!("  Grabbed fry at ({}, {})", x, y));
                } else {
                    log::warn!("Grab at ({}, {}) missed the fry", x, y);
                    self.log(&format!("  Grab at ({}, {}) missed", x, y));
                }
            }

            ScenarioAction::DragTo { x, y } => {
                fryer.drag_to(Vec2::new(*x, *y));
                self.log(&format!("  Dragged to ({}, {})", x, y));
            }

            ScenarioAction::Release => {
                fryer.end_drag();
                self.log("  Released");
            }

            ScenarioAction::Log { message } => {
                self.log(&format!("  [USER] {}", message));
            }
        }
    }

    fn log(&mut self, message: &str) {
        log::debug!("{}", message);
        self.log.push(message.to_string());
    }
}

impl Default for ScenarioExecutor {
    fn default() -> Self {
        Self::new()
    }
}
