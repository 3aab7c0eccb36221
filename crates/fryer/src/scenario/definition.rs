//! Scenario definition and RON file loading

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A command issued to the fryer at a scripted time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScenarioAction {
    /// Drop the default body from the drop point
    DropBody,

    /// Place a raw body at an explicit position
    SpawnBody {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },

    RemoveBody,

    /// Drop a body if there is none, otherwise remove it
    ToggleBody,

    SetTemperature { celsius: f32 },

    RaiseTemperature,

    LowerTemperature,

    Pause,

    Resume,

    /// Clear bubbles, remove the body, restart the clock
    Reset,

    /// Grab the body at a pointer position
    Grab { x: f32, y: f32 },

    /// Move the grabbed body
    DragTo { x: f32, y: f32 },

    Release,

    /// Write a message to the run log
    Log { message: String },
}

/// An action and the scenario time it fires at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedAction {
    /// Seconds since the start of the run (wall clock of the scenario, not the fryer)
    pub at_secs: f32,
    pub action: ScenarioAction,
}

/// Top-level scenario definition loaded from RON files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    /// Scenario name
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Run length; falls back to the runner's configured duration
    #[serde(default)]
    pub duration_secs: Option<f32>,

    /// Actions in ascending time order
    pub actions: Vec<TimedAction>,
}

impl ScenarioDefinition {
    /// Drop one body at the start and let it fry
    pub fn drop_and_fry() -> Self {
        Self {
            name: "Drop and fry".to_string(),
            description: "A single fry dropped into oil at the start temperature".to_string(),
            duration_secs: None,
            actions: vec![TimedAction {
                at_secs: 0.0,
                action: ScenarioAction::DropBody,
            }],
        }
    }

    /// Load scenario from RON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file: {}", path.display()))?;

        let scenario = Self::from_ron(&content)
            .with_context(|| format!("Failed to load scenario: {}", path.display()))?;

        Ok(scenario)
    }

    pub fn from_ron(content: &str) -> Result<Self> {
        let scenario: Self = ron::from_str(content).context("Failed to parse RON scenario")?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Save scenario to RON file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let ron = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize scenario to RON")?;

        std::fs::write(path.as_ref(), ron).with_context(|| {
            format!("Failed to write scenario file: {}", path.as_ref().display())
        })?;

        Ok(())
    }

    /// Check timings: finite, non-negative and in ascending order
    pub fn validate(&self) -> Result<()> {
        if let Some(duration) = self.duration_secs
            && !(duration.is_finite() && duration > 0.0)
        {
            bail!("Scenario '{}' has invalid duration {}", self.name, duration);
        }

        let mut last = 0.0;
        for (idx, timed) in self.actions.iter().enumerate() {
            if !timed.at_secs.is_finite() || timed.at_secs < 0.0 {
                bail!("Action {} has invalid time {}", idx, timed.at_secs);
            }
            if timed.at_secs < last {
                bail!(
                    "Action {} at {}s comes before the previous action at {}s",
                    idx,
                    timed.at_secs,
                    last
                );
            }
            last = timed.at_secs;
        }

        Ok(())
    }
}
