//! Deep-fryer orchestration
//!
//! [`Fryer`] owns the oil, at most one frying body and the live bubbles, and
//! advances them together one tick at a time. Everything tunable lives in
//! [`SimulationConfig`].

mod config;
mod emission;
mod fryer;
mod stats;
mod status;

pub use config::{ConfigError, EmissionParams, FryerGeometry, SimulationConfig};
pub use emission::bubble_count;
pub use fryer::Fryer;
pub use stats::{BubbleCensus, NoopStats, SimStats};
pub use status::{BodyStatus, FryerStatus, TemperatureTrend};

// Models are re-exported so callers only need this crate
pub use fryer_simulation as simulation;

/// RNG used when the caller does not bring one
pub type DefaultRng = rand_xoshiro::Xoshiro256StarStar;

/// Seeded default RNG for reproducible runs
pub fn seeded_rng(seed: u64) -> DefaultRng {
    use rand::SeedableRng;
    DefaultRng::seed_from_u64(seed)
}
