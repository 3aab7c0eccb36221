//! Frying oil state
//!
//! Temperature is the only driven quantity. Viscosity and density are pure
//! functions of it and are recomputed (never integrated) whenever it changes:
//! - Viscosity: Arrhenius form `mu = mu_inf * exp(Ea/R / T_kelvin)`
//! - Density: linear thermal expansion `rho = rho_0 - alpha * (T - T_0)`

use serde::{Deserialize, Serialize};

use crate::color::{ColorRamp, Rgba};
use crate::math::map_range;

const KELVIN_OFFSET: f32 = 273.15;

/// Calibration constants for the oil model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OilParams {
    /// Arrhenius pre-exponential viscosity (Pa·s)
    pub viscosity_inf: f32,
    /// Activation energy over gas constant (K)
    pub activation_over_r: f32,
    pub min_viscosity: f32,
    pub max_viscosity: f32,
    /// Density at the reference temperature (g/cm³)
    pub reference_density: f32,
    /// Reference temperature for the density model (°C)
    pub reference_temperature: f32,
    /// Density loss per °C (g/cm³/°C)
    pub expansion_coefficient: f32,
    /// Lowest controllable oil temperature (°C)
    pub min_temperature: f32,
    /// Highest controllable oil temperature (°C)
    pub max_temperature: f32,
    /// Fraction of the gap to the target closed per tick
    pub smoothing_factor: f32,
}

impl Default for OilParams {
    fn default() -> Self {
        Self {
            viscosity_inf: 0.00001,
            activation_over_r: 2500.0,
            min_viscosity: 0.003,
            max_viscosity: 0.030,
            reference_density: 0.915,
            reference_temperature: 20.0,
            expansion_coefficient: 0.00064,
            min_temperature: 160.0,
            max_temperature: 190.0,
            smoothing_factor: 0.05,
        }
    }
}

impl OilParams {
    /// Arrhenius viscosity at `temperature` (°C), clamped to the valid band
    pub fn compute_viscosity(&self, temperature: f32) -> f32 {
        let kelvin = temperature + KELVIN_OFFSET;
        let viscosity = self.viscosity_inf * (self.activation_over_r / kelvin).exp();
        viscosity.clamp(self.min_viscosity, self.max_viscosity)
    }

    /// Oil density at `temperature` (°C); ~0.825 g/cm³ at 160°C, ~0.806 at 190°C
    pub fn compute_density(&self, temperature: f32) -> f32 {
        self.reference_density - self.expansion_coefficient * (temperature - self.reference_temperature)
    }

    pub fn clamp_temperature(&self, temperature: f32) -> f32 {
        temperature.clamp(self.min_temperature, self.max_temperature)
    }
}

/// Oil temperature with its derived properties and the simulation clock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OilState {
    temperature: f32,
    viscosity: f32,
    density: f32,
    clock: f32,
    params: OilParams,
}

impl OilState {
    pub fn new(initial_temperature: f32, params: OilParams) -> Self {
        let temperature = params.clamp_temperature(initial_temperature);
        Self {
            temperature,
            viscosity: params.compute_viscosity(temperature),
            density: params.compute_density(temperature),
            clock: 0.0,
            params,
        }
    }

    /// Advance the simulation clock
    pub fn advance(&mut self, dt: f32) {
        self.clock += dt;
    }

    /// One exponential-smoothing step toward `target`, then refresh derived properties
    pub fn smooth_toward(&mut self, target: f32) {
        let next = self.temperature + (target - self.temperature) * self.params.smoothing_factor;
        self.set_temperature(next);
    }

    /// Set the temperature directly (clamped) and refresh derived properties
    pub fn set_temperature(&mut self, temperature: f32) {
        self.temperature = self.params.clamp_temperature(temperature);
        self.viscosity = self.params.compute_viscosity(self.temperature);
        self.density = self.params.compute_density(self.temperature);
    }

    pub fn reset_clock(&mut self) {
        self.clock = 0.0;
    }

    /// Tint of the oil body, cool amber at 160°C to bright gold at 190°C
    pub fn temperature_color(&self) -> Rgba {
        let t = map_range(
            self.temperature,
            self.params.min_temperature,
            self.params.max_temperature,
            0.0,
            1.0,
            true,
        );
        ColorRamp::oil().sample(t)
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn viscosity(&self) -> f32 {
        self.viscosity
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn params(&self) -> &OilParams {
        &self.params
    }
}
