//! Scripted fryer runs
//!
//! A scenario is a RON list of timed actions (drop, remove, temperature
//! changes, pause, drag) replayed against a [`fryer_core::Fryer`] at a fixed
//! frame rate. The executor samples the fryer status periodically and
//! returns a [`RunReport`].

mod definition;
mod executor;
mod results;

pub use definition::{ScenarioAction, ScenarioDefinition, TimedAction};
pub use executor::{ScenarioExecutor, ScenarioExecutorConfig};
pub use results::{PerformanceMetrics, RunReport};
