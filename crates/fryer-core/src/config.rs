//! Simulation configuration - every calibrated constant in one serializable tree
//!
//! `SimulationConfig::default()` reproduces the calibrated fryer. Configs
//! loaded from disk should be checked with [`SimulationConfig::validate`]
//! before building a [`crate::Fryer`].

use fryer_simulation::{BubbleTable, FryingParams, OilParams, Range};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a configuration is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("oil surface ({surface}) must lie above the oil bottom ({bottom})")]
    SurfaceBelowBottom { surface: f32, bottom: f32 },

    #[error("basket floor ({floor}) must lie between the oil surface ({surface}) and bottom ({bottom})")]
    FloorOutsideOil { floor: f32, surface: f32, bottom: f32 },

    #[error("oil walls out of order: left {left} >= right {right}")]
    WallsOutOfOrder { left: f32, right: f32 },

    #[error("temperature band out of order: min {min} >= max {max}")]
    TemperatureBandOutOfOrder { min: f32, max: f32 },

    #[error("initial temperature {initial} outside the band [{min}, {max}]")]
    InitialTemperatureOutOfBand { initial: f32, min: f32, max: f32 },

    #[error("max dt must be positive and finite, got {0}")]
    InvalidMaxDt(f32),

    #[error("{name} range out of order: {min} > {max}")]
    RangeOutOfOrder {
        name: &'static str,
        min: f32,
        max: f32,
    },

    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("{0} bubbles need a trail capacity of at least 1")]
    ZeroTrailCapacity(&'static str),

    #[error("max bubbles per tick must be at least 1")]
    ZeroBubblesPerTick,
}

/// Fryer layout in screen coordinates (+y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FryerGeometry {
    /// y of the oil surface line
    pub oil_surface: f32,
    /// y of the bottom of the oil
    pub oil_bottom: f32,
    pub oil_left: f32,
    pub oil_right: f32,
    /// y of the basket floor the body rests on
    pub basket_floor: f32,
    /// Where `drop_body` places a new body
    pub drop_point: Vec2,
    pub body_size: Vec2,
    pub drop_velocity: Vec2,
    /// Maximum distance from the body centre for a drag to grab it
    pub drag_pick_radius: f32,
}

impl Default for FryerGeometry {
    fn default() -> Self {
        Self {
            oil_surface: 315.0,
            oil_bottom: 548.8,
            oil_left: 271.0,
            oil_right: 753.0,
            basket_floor: 508.8,
            drop_point: Vec2::new(512.0, 235.0),
            body_size: Vec2::new(120.0, 20.0),
            drop_velocity: Vec2::new(0.0, 100.0),
            drag_pick_radius: 60.0,
        }
    }
}

/// Bubble count policy per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionParams {
    /// Target bubble count at emission factor 0 and 1
    pub target_count: Range,
    /// Half-width of the uniform jitter around the target
    pub jitter: f32,
    pub max_per_tick: u32,
    /// Counts below this are subject to random suppression
    pub sparse_threshold: u32,
    /// Factor multiplier in the suppression test
    pub suppression_gain: f32,
    /// Spawn points are kept this far inside the oil surface and bottom
    pub spawn_margin: f32,
}

impl Default for EmissionParams {
    fn default() -> Self {
        Self {
            target_count: Range::new(0.5, 20.0),
            jitter: 3.0,
            max_per_tick: 20,
            sparse_threshold: 2,
            suppression_gain: 8.0,
            spawn_margin: 5.0,
        }
    }
}

/// Complete fryer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub oil: OilParams,
    pub frying: FryingParams,
    pub bubbles: BubbleTable,
    pub emission: EmissionParams,
    pub geometry: FryerGeometry,
    /// Oil temperature (and initial target) at startup (°C)
    pub initial_temperature: f32,
    /// Ceiling applied to every tick's dt (s)
    pub max_dt: f32,
    /// Upper bound on live bubbles; spawns beyond it are skipped
    pub max_bubbles: usize,
    /// Target temperature step for raise/lower commands (°C)
    pub temperature_step: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            oil: OilParams::default(),
            frying: FryingParams::default(),
            bubbles: BubbleTable::default(),
            emission: EmissionParams::default(),
            geometry: FryerGeometry::default(),
            initial_temperature: 175.0,
            max_dt: 0.1,
            max_bubbles: 2000,
            temperature_step: 5.0,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.geometry;
        if g.oil_surface >= g.oil_bottom {
            return Err(ConfigError::SurfaceBelowBottom {
                surface: g.oil_surface,
                bottom: g.oil_bottom,
            });
        }
        if g.basket_floor <= g.oil_surface || g.basket_floor > g.oil_bottom {
            return Err(ConfigError::FloorOutsideOil {
                floor: g.basket_floor,
                surface: g.oil_surface,
                bottom: g.oil_bottom,
            });
        }
        if g.oil_left >= g.oil_right {
            return Err(ConfigError::WallsOutOfOrder {
                left: g.oil_left,
                right: g.oil_right,
            });
        }

        let oil = &self.oil;
        if oil.min_temperature >= oil.max_temperature {
            return Err(ConfigError::TemperatureBandOutOfOrder {
                min: oil.min_temperature,
                max: oil.max_temperature,
            });
        }
        if !(oil.min_temperature..=oil.max_temperature).contains(&self.initial_temperature) {
            return Err(ConfigError::InitialTemperatureOutOfBand {
                initial: self.initial_temperature,
                min: oil.min_temperature,
                max: oil.max_temperature,
            });
        }

        if !self.max_dt.is_finite() || self.max_dt <= 0.0 {
            return Err(ConfigError::InvalidMaxDt(self.max_dt));
        }

        check_range("emission target count", self.emission.target_count)?;
        if self.emission.max_per_tick == 0 {
            return Err(ConfigError::ZeroBubblesPerTick);
        }

        let frying = &self.frying;
        check_positive("raw moisture", frying.raw_moisture)?;
        check_range(
            "moisture",
            Range::new(frying.min_moisture, frying.raw_moisture),
        )?;
        check_positive("evaporation span", frying.evaporation_span)?;
        check_positive("browning span", frying.browning_span)?;
        check_positive("bubble boost decay", frying.bubble_boost_decay_secs)?;

        check_range("bubble radius", self.bubbles.radius)?;
        check_positive("bubble radius", self.bubbles.radius.min)?;
        for kind in fryer_simulation::BubbleKind::ALL {
            let params = self.bubbles.params(kind);
            check_range("bubble velocity x", params.velocity_x)?;
            check_range("bubble velocity y", params.velocity_y)?;
            check_range("bubble start size", params.start_size)?;
            check_range("bubble end scale", params.end_scale)?;
            check_range("bubble lifespan", params.lifespan_secs)?;
            check_positive("bubble lifespan", params.lifespan_secs.min)?;
            if let Some(rate) = params.oscillation_rate {
                check_range("bubble oscillation rate", rate)?;
            }
            if params.trail_capacity == 0 {
                return Err(ConfigError::ZeroTrailCapacity(kind.name()));
            }
        }

        Ok(())
    }
}

fn check_range(name: &'static str, range: Range) -> Result<(), ConfigError> {
    if range.min > range.max {
        return Err(ConfigError::RangeOutOfOrder {
            name,
            min: range.min,
            max: range.max,
        });
    }
    Ok(())
}

fn check_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ConfigError::NotPositive { name, value });
    }
    Ok(())
}
