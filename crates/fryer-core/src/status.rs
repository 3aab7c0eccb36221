//! Status readout - a plain snapshot of what the fryer is doing

use serde::{Deserialize, Serialize};

use crate::fryer::Fryer;

/// Which way the oil temperature is heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureTrend {
    Rising,
    Falling,
    Steady,
}

impl TemperatureTrend {
    /// Gap between target and actual temperature treated as "reached"
    pub const DEADBAND: f32 = 0.5;

    pub fn between(current: f32, target: f32) -> Self {
        let diff = target - current;
        if diff > Self::DEADBAND {
            TemperatureTrend::Rising
        } else if diff < -Self::DEADBAND {
            TemperatureTrend::Falling
        } else {
            TemperatureTrend::Steady
        }
    }
}

/// Body readout; percentages are 0-100
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyStatus {
    pub temperature: f32,
    /// Oil is more than 5°C hotter than the body
    pub heating: bool,
    pub density: f32,
    /// Body is less dense than the oil
    pub floating: bool,
    pub moisture_percent: f32,
    /// Above boiling with water left to drive off
    pub boiling: bool,
    pub cookedness_percent: f32,
    pub done: bool,
    pub crust_percent: f32,
    pub immersed: bool,
    pub time_in_oil: f32,
}

/// Fryer readout at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FryerStatus {
    pub sim_time: f32,
    pub oil_temperature: f32,
    pub target_temperature: f32,
    pub trend: TemperatureTrend,
    pub oil_density: f32,
    pub oil_viscosity: f32,
    pub bubble_count: usize,
    pub paused: bool,
    pub body: Option<BodyStatus>,
}

const HEATING_MARGIN: f32 = 5.0;
const BOILING_MIN_MOISTURE: f32 = 0.05;
const DONE_PERCENT: f32 = 70.0;

impl FryerStatus {
    pub fn capture(fryer: &Fryer) -> Self {
        let oil = fryer.oil();
        let body = fryer.body().map(|body| {
            let cookedness_percent = body.cookedness() * 100.0;
            BodyStatus {
                temperature: body.temperature(),
                heating: oil.temperature() - body.temperature() > HEATING_MARGIN,
                density: body.density(),
                floating: body.density() < oil.density(),
                moisture_percent: body.moisture() * 100.0,
                boiling: body.temperature() > body.params().boiling_point
                    && body.moisture() > BOILING_MIN_MOISTURE,
                cookedness_percent,
                done: cookedness_percent >= DONE_PERCENT,
                crust_percent: body.crust() * 100.0,
                immersed: body.is_immersed(),
                time_in_oil: body.time_immersed(),
            }
        });

        Self {
            sim_time: oil.clock(),
            oil_temperature: oil.temperature(),
            target_temperature: fryer.target_temperature(),
            trend: TemperatureTrend::between(oil.temperature(), fryer.target_temperature()),
            oil_density: oil.density(),
            oil_viscosity: oil.viscosity(),
            bubble_count: fryer.bubbles().len(),
            paused: fryer.is_paused(),
            body,
        }
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        let trend = match self.trend {
            TemperatureTrend::Rising => " ^",
            TemperatureTrend::Falling => " v",
            TemperatureTrend::Steady => "",
        };
        let mut line = format!(
            "t={:.1}s oil={:.1}°C{} (target {:.0}°C) bubbles={}",
            self.sim_time, self.oil_temperature, trend, self.target_temperature, self.bubble_count
        );
        if let Some(body) = &self.body {
            line.push_str(&format!(
                " | fry {:.1}°C moisture={:.0}% crust={:.0}% cooked={:.0}%{}{}",
                body.temperature,
                body.moisture_percent,
                body.crust_percent,
                body.cookedness_percent,
                if body.floating { " floating" } else { "" },
                if body.done { " DONE" } else { "" },
            ));
        }
        line
    }
}
