//! # Fryer - headless deep-fryer runner
//!
//! Loads layered configuration, replays scripted scenarios against the
//! fryer simulation and writes run reports.

pub mod config;
pub mod scenario;

// Re-export core modules for convenience
pub use fryer_core::simulation;
pub use fryer_core::{Fryer, FryerStatus, SimulationConfig};
