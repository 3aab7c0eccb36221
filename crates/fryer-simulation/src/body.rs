//! Frying body - thermodynamic and buoyancy model of a potato fry
//!
//! Physical models:
//! - Heat transfer: Newton's law of cooling with a phase-dependent coefficient
//! - Moisture: first-order evaporation above 100°C, damped by the crust
//! - Density: linear in moisture-loss progress, raw 1.08 g/cm³ to fried 0.60 g/cm³
//! - Crust: approach-to-one growth, fast for the first 40 s then slow
//! - Cookedness: Maillard browning, quadratic in temperature above 100°C
//! - Buoyancy: Archimedes force with linear viscous drag
//!
//! Calibration follows Pedreschi et al. (2005) for water loss, Costa et al.
//! (2008) for density and shrinkage, and van Koerten et al. (2015) for crust
//! development.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::{ColorRamp, Rgba};
use crate::math::map_range;
use crate::rng::SimRng;

/// Calibration constants for the frying body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FryingParams {
    // Initial (raw) state
    pub raw_moisture: f32,
    pub min_moisture: f32,
    pub ambient_temperature: f32,
    /// Raw potato density (g/cm³)
    pub raw_density: f32,
    /// Fully fried density (g/cm³)
    pub fried_density: f32,

    // Phases
    /// Length of the vigorous boiling phase after immersion (s)
    pub vigorous_phase_secs: f32,
    /// Time after which crust growth slows down (s)
    pub crust_fast_phase_secs: f32,

    // Evaporation
    pub boiling_point: f32,
    /// Temperature excess over boiling that gives the full evaporation rate (°C)
    pub evaporation_span: f32,
    pub vigorous_evaporation_rate: f32,
    pub settled_evaporation_rate: f32,
    /// Fraction of evaporation blocked by a full crust
    pub crust_moisture_barrier: f32,

    // Crust
    pub crust_fast_rate: f32,
    pub crust_slow_rate: f32,

    // Heat transfer
    pub base_heat_transfer: f32,
    /// Peak multiplier of the vigorous-phase boost over the base coefficient
    pub bubble_boost: f32,
    /// Decay time of the vigorous-phase boost (s)
    pub bubble_boost_decay_secs: f32,
    /// Fraction of heat transfer blocked by a full crust
    pub crust_thermal_barrier: f32,

    // Cookedness
    pub browning_start_temperature: f32,
    pub browning_span: f32,

    // Motion
    pub buoyancy_scale: f32,
    pub drag_coefficient: f32,
    pub terminal_velocity: f32,
    /// Downward acceleration while above the oil
    pub air_gravity: f32,
    /// Depth below the surface where a floating body starts to settle
    pub settle_band: f32,
    /// Minimum depth a floating body keeps below the surface line
    pub surface_offset: f32,
    pub settle_damping: f32,
    /// Velocity multiplier on floor contact (negative reflects)
    pub floor_restitution: f32,
}

impl Default for FryingParams {
    fn default() -> Self {
        Self {
            raw_moisture: 0.79,
            min_moisture: 0.01,
            ambient_temperature: 20.0,
            raw_density: 1.08,
            fried_density: 0.60,

            vigorous_phase_secs: 20.0,
            crust_fast_phase_secs: 40.0,

            boiling_point: 100.0,
            evaporation_span: 75.0,
            vigorous_evaporation_rate: 0.02,
            settled_evaporation_rate: 0.015,
            crust_moisture_barrier: 0.3,

            crust_fast_rate: 0.035,
            crust_slow_rate: 0.010,

            base_heat_transfer: 0.025,
            bubble_boost: 4.0,
            bubble_boost_decay_secs: 20.0,
            crust_thermal_barrier: 0.5,

            browning_start_temperature: 100.0,
            browning_span: 70.0,

            buoyancy_scale: 800.0,
            drag_coefficient: 3.0,
            terminal_velocity: 150.0,
            air_gravity: 600.0,
            settle_band: 20.0,
            surface_offset: 5.0,
            settle_damping: 0.85,
            floor_restitution: -0.3,
        }
    }
}

impl FryingParams {
    /// Temperature at which browning completes
    pub fn browning_end_temperature(&self) -> f32 {
        self.browning_start_temperature + self.browning_span
    }
}

/// Whether the body is in the oil
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Immersion {
    /// Above the surface line, falling under gravity
    #[default]
    Above,
    /// Below the surface line, frying
    Immersed,
}

/// A potato fry being cooked in the oil
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FryingBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,

    /// Water fraction, [0.01, 0.79]
    moisture: f32,
    /// Core temperature (°C), [20, oil temperature]
    temperature: f32,
    /// Normalized browning, [0, 1]
    cookedness: f32,
    /// Normalized crust thickness, [0, 1]
    crust: f32,
    /// g/cm³, [0.60, 1.08]
    density: f32,
    /// Seconds since the body last entered the oil
    time_immersed: f32,
    immersion: Immersion,

    params: FryingParams,
}

impl FryingBody {
    /// Fresh raw fry centred at `position` with bounding-box `size`
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self::with_params(position, size, FryingParams::default())
    }

    pub fn with_params(position: Vec2, size: Vec2, params: FryingParams) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
            moisture: params.raw_moisture,
            temperature: params.ambient_temperature,
            cookedness: 0.0,
            crust: 0.0,
            density: params.raw_density,
            time_immersed: 0.0,
            immersion: Immersion::Above,
            params,
        }
    }

    /// Advance the body by `dt` seconds
    ///
    /// `surface_level` and `floor_level` are y coordinates; the body is
    /// immersed while its centre is below (greater y than) the surface.
    pub fn update(
        &mut self,
        dt: f32,
        oil_temperature: f32,
        surface_level: f32,
        oil_density: f32,
        floor_level: f32,
    ) {
        if self.position.y > surface_level {
            if self.immersion == Immersion::Above {
                self.immersion = Immersion::Immersed;
                self.time_immersed = 0.0;
                log::debug!(
                    "Fry entered oil at ({:.1}, {:.1}), moisture {:.2}",
                    self.position.x,
                    self.position.y,
                    self.moisture
                );
            }

            self.time_immersed += dt;

            self.evaporate(dt);
            self.update_density();
            self.grow_crust(dt);
            self.transfer_heat(dt, oil_temperature);
            self.update_cookedness();
            self.apply_buoyancy(dt, oil_density);
            self.settle_at_surface(surface_level, oil_density);
            self.collide_with_floor(floor_level);
        } else {
            if self.immersion == Immersion::Immersed {
                log::debug!("Fry left oil after {:.1}s", self.time_immersed);
            }
            self.immersion = Immersion::Above;
            self.velocity.y += self.params.air_gravity * dt;
        }

        self.position += self.velocity * dt;
    }

    fn evaporate(&mut self, dt: f32) {
        let p = &self.params;
        if self.temperature <= p.boiling_point {
            return;
        }

        // Intense boiling early on, slower once the surface dries
        let rate = if self.time_immersed < p.vigorous_phase_secs {
            p.vigorous_evaporation_rate
        } else {
            p.settled_evaporation_rate
        };
        let base = rate * dt * (self.temperature - p.boiling_point) / p.evaporation_span;
        let effective = base * (1.0 - p.crust_moisture_barrier * self.crust);

        self.moisture = (self.moisture - effective).clamp(p.min_moisture, p.raw_moisture);
    }

    fn update_density(&mut self) {
        let p = &self.params;
        let progress = 1.0 - self.moisture / p.raw_moisture;
        let density = p.raw_density - (p.raw_density - p.fried_density) * progress;
        self.density = density.clamp(p.fried_density, p.raw_density);
    }

    fn grow_crust(&mut self, dt: f32) {
        let p = &self.params;
        let coeff = if self.time_immersed < p.crust_fast_phase_secs {
            p.crust_fast_rate
        } else {
            p.crust_slow_rate
        };
        self.crust = (self.crust + coeff * dt * (1.0 - self.crust)).clamp(0.0, 1.0);
    }

    fn transfer_heat(&mut self, dt: f32, oil_temperature: f32) {
        let h = self.effective_heat_transfer_coefficient();
        self.temperature += (oil_temperature - self.temperature) * h * dt;

        let floor = self.params.ambient_temperature;
        self.temperature = self.temperature.clamp(floor, oil_temperature.max(floor));
    }

    fn update_cookedness(&mut self) {
        let p = &self.params;
        let end = p.browning_end_temperature();

        let browning = if self.temperature >= end {
            1.0
        } else if self.temperature > p.browning_start_temperature {
            let progression = (self.temperature - p.browning_start_temperature) / p.browning_span;
            (progression * progression).clamp(0.0, 1.0)
        } else {
            return;
        };

        // Browning is irreversible even if the oil is turned down
        self.cookedness = self.cookedness.max(browning);
    }

    fn apply_buoyancy(&mut self, dt: f32, oil_density: f32) {
        let p = &self.params;

        // Positive (downward) when denser than the oil
        let buoyancy = (self.density - oil_density) * p.buoyancy_scale;
        let drag = -self.velocity.y * p.drag_coefficient;

        self.velocity.y += (buoyancy + drag) * dt;
        self.velocity.y = self.velocity.y.clamp(-p.terminal_velocity, p.terminal_velocity);
    }

    fn settle_at_surface(&mut self, surface_level: f32, oil_density: f32) {
        let p = &self.params;
        if self.density >= oil_density || self.position.y >= surface_level + p.settle_band {
            return;
        }

        self.velocity.y *= p.settle_damping;
        if self.position.y < surface_level + p.surface_offset {
            self.position.y = surface_level + p.surface_offset;
            self.velocity.y = self.velocity.y.max(0.0);
        }
    }

    fn collide_with_floor(&mut self, floor_level: f32) {
        let rest_y = floor_level - self.size.y / 2.0;
        if self.position.y > rest_y {
            self.position.y = rest_y;
            self.velocity.y *= self.params.floor_restitution;
        }
    }

    /// Heat transfer coefficient for the current state (1/s)
    ///
    /// Boosted while bubbling is vigorous (agitation improves convection)
    /// and reduced by the crust acting as a thermal barrier.
    pub fn effective_heat_transfer_coefficient(&self) -> f32 {
        let p = &self.params;
        let mut coeff = p.base_heat_transfer;

        if self.is_in_vigorous_phase() {
            coeff *= 1.0 + p.bubble_boost * (-self.time_immersed / p.bubble_boost_decay_secs).exp();
        }

        coeff * (1.0 - p.crust_thermal_barrier * self.crust)
    }

    /// Color for the current degree of browning
    pub fn appearance_color(&self) -> Rgba {
        ColorRamp::cooking().sample(self.cookedness)
    }

    /// Point on the body where a bubble should form
    ///
    /// 90% of samples land on one of the four edges of the bounding box, the
    /// rest anywhere inside it.
    pub fn surface_sample_for_emission<R: SimRng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let half = self.size / 2.0;
        let mut offset = Vec2::new(rng.range_f32(-half.x, half.x), rng.range_f32(-half.y, half.y));

        if rng.check_probability(0.9) {
            if rng.gen_bool() {
                offset.y = rng.signed(half.y);
            } else {
                offset.x = rng.signed(half.x);
            }
        }

        self.position + offset
    }

    /// How strongly the body should be bubbling this tick, in [0, 1]
    ///
    /// Zero out of the oil, once dried out, or when the body has nearly
    /// reached oil temperature.
    pub fn emission_factor(&self, oil_temperature: f32) -> f32 {
        let p = &self.params;
        if !self.is_immersed() || self.moisture <= p.min_moisture {
            return 0.0;
        }

        let temperature_diff = oil_temperature - self.temperature;
        if temperature_diff < 5.0 {
            return 0.0;
        }

        let t = self.time_immersed;
        let time_factor = if t < p.vigorous_phase_secs {
            (-t / 8.0).exp().clamp(0.0, 1.0)
        } else if t < 90.0 {
            map_range(t, p.vigorous_phase_secs, 90.0, 1.0, 0.0, true)
        } else {
            0.02
        };

        // Quadratic falloff once below 10% moisture
        let moisture_factor = if self.moisture > 0.1 {
            1.0
        } else if self.moisture > p.min_moisture {
            let ratio = self.moisture / 0.1;
            ratio * ratio
        } else {
            0.01
        };

        let temperature_factor = map_range(temperature_diff, 5.0, 100.0, 0.1, 1.0, true);

        let factor = moisture_factor * temperature_factor * time_factor * (1.0 - 0.5 * self.crust);
        factor.max(0.01)
    }

    pub fn moisture(&self) -> f32 {
        self.moisture
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn cookedness(&self) -> f32 {
        self.cookedness
    }

    pub fn crust(&self) -> f32 {
        self.crust
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    pub fn time_immersed(&self) -> f32 {
        self.time_immersed
    }

    pub fn immersion(&self) -> Immersion {
        self.immersion
    }

    pub fn is_immersed(&self) -> bool {
        self.immersion == Immersion::Immersed
    }

    pub fn is_in_vigorous_phase(&self) -> bool {
        self.is_immersed() && self.time_immersed < self.params.vigorous_phase_secs
    }

    pub fn params(&self) -> &FryingParams {
        &self.params
    }

    /// Pin the body to `position` with zero velocity (drag override)
    pub fn pin_to(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
    }

    pub fn contains_point(&self, point: Vec2, radius: f32) -> bool {
        self.position.distance(point) < radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    const DT: f32 = 1.0 / 60.0;
    const SURFACE: f32 = 315.0;
    const FLOOR: f32 = 508.8;
    const OIL_DENSITY: f32 = 0.8030;

    fn immersed_body() -> FryingBody {
        FryingBody::new(Vec2::new(512.0, 400.0), Vec2::new(120.0, 20.0))
    }

    fn step(body: &mut FryingBody, oil_temperature: f32) {
        body.update(DT, oil_temperature, SURFACE, OIL_DENSITY, FLOOR);
    }

    #[test]
    fn test_new_body_is_raw() {
        let body = immersed_body();
        assert_eq!(body.moisture(), 0.79);
        assert_eq!(body.temperature(), 20.0);
        assert_eq!(body.density(), 1.08);
        assert_eq!(body.crust(), 0.0);
        assert_eq!(body.cookedness(), 0.0);
        assert!(!body.is_immersed());
        assert!(!body.is_in_vigorous_phase());
    }

    #[test]
    fn test_above_surface_falls_without_cooking() {
        let mut body = FryingBody::new(Vec2::new(512.0, 200.0), Vec2::new(120.0, 20.0));
        step(&mut body, 175.0);

        assert!(!body.is_immersed());
        assert!((body.velocity.y - 600.0 * DT).abs() < 1e-4);
        assert_eq!(body.temperature(), 20.0);
        assert_eq!(body.crust(), 0.0);
        assert_eq!(body.time_immersed(), 0.0);
    }

    #[test]
    fn test_immersion_resets_timer_on_reentry() {
        let mut body = immersed_body();
        for _ in 0..120 {
            step(&mut body, 175.0);
        }
        assert!(body.is_immersed());
        assert!(body.time_immersed() > 1.9);

        // Lift out, then drop back in
        body.pin_to(Vec2::new(512.0, 250.0));
        step(&mut body, 175.0);
        assert!(!body.is_immersed());

        body.pin_to(Vec2::new(512.0, 400.0));
        step(&mut body, 175.0);
        assert!(body.is_immersed());
        assert!((body.time_immersed() - DT).abs() < 1e-6);
    }

    #[test]
    fn test_vigorous_phase_window() {
        let mut body = immersed_body();
        step(&mut body, 175.0);
        assert!(body.is_in_vigorous_phase());

        for _ in 0..(21 * 60) {
            step(&mut body, 175.0);
        }
        assert!(!body.is_in_vigorous_phase());
    }

    #[test]
    fn test_temperature_monotonic_and_bounded() {
        let mut body = immersed_body();
        let mut last = body.temperature();
        for _ in 0..(120 * 60) {
            step(&mut body, 175.0);
            assert!(body.temperature() >= last);
            assert!(body.temperature() <= 175.0);
            last = body.temperature();
        }
    }

    #[test]
    fn test_moisture_non_increasing_and_floored() {
        let mut body = immersed_body();
        let mut last = body.moisture();
        for _ in 0..(300 * 60) {
            step(&mut body, 190.0);
            assert!(body.moisture() <= last);
            assert!(body.moisture() >= 0.01);
            last = body.moisture();
        }
        assert_eq!(body.moisture(), 0.01);
    }

    #[test]
    fn test_no_evaporation_below_boiling() {
        let mut body = immersed_body();
        step(&mut body, 175.0);
        assert!(body.temperature() < 100.0);
        assert_eq!(body.moisture(), 0.79);
    }

    #[test]
    fn test_density_tracks_moisture_loss() {
        let mut body = immersed_body();
        for _ in 0..(60 * 60) {
            step(&mut body, 175.0);
            let progress = 1.0 - body.moisture() / 0.79;
            let expected = 1.08 - 0.48 * progress;
            assert!((body.density() - expected).abs() < 1e-5);
            assert!((0.60..=1.08).contains(&body.density()));
        }
    }

    #[test]
    fn test_crust_approaches_one() {
        let mut body = immersed_body();
        let mut last = 0.0;
        for _ in 0..(200 * 60) {
            step(&mut body, 175.0);
            assert!(body.crust() >= last);
            assert!(body.crust() <= 1.0);
            last = body.crust();
        }
        assert!(body.crust() > 0.9);
    }

    #[test]
    fn test_cookedness_ratchet_survives_oil_cooling() {
        let mut body = immersed_body();
        for _ in 0..(240 * 60) {
            step(&mut body, 190.0);
        }
        assert_eq!(body.cookedness(), 1.0);

        // Oil drops to 160: body temperature is clamped down, browning stays
        for _ in 0..60 {
            step(&mut body, 160.0);
        }
        assert!(body.temperature() <= 160.0);
        assert_eq!(body.cookedness(), 1.0);
    }

    #[test]
    fn test_cookedness_quadratic_in_browning_window() {
        let mut body = immersed_body();
        while body.temperature() < 135.0 {
            step(&mut body, 175.0);
        }
        let progression = (body.temperature() - 100.0) / 70.0;
        assert!((body.cookedness() - progression * progression).abs() < 1e-5);
    }

    #[test]
    fn test_heat_coefficient_boost_and_crust_damping() {
        let mut body = immersed_body();
        // Not immersed: base only
        assert!((body.effective_heat_transfer_coefficient() - 0.025).abs() < 1e-6);

        step(&mut body, 175.0);
        let boosted = body.effective_heat_transfer_coefficient();
        // ≈ 0.025 * 5 * (1 - 0.5 * crust) right after entry
        assert!(boosted > 0.12 && boosted <= 0.125);

        for _ in 0..(30 * 60) {
            step(&mut body, 175.0);
        }
        let settled = body.effective_heat_transfer_coefficient();
        let expected = 0.025 * (1.0 - 0.5 * body.crust());
        assert!((settled - expected).abs() < 1e-6);
    }

    #[test]
    fn test_raw_body_sinks_and_rebounds_off_floor() {
        let mut body = immersed_body();
        let rest_y = FLOOR - 10.0;

        let mut hit_floor = false;
        for _ in 0..(10 * 60) {
            let before = body.velocity.y;
            step(&mut body, 175.0);
            assert!(body.position.y <= rest_y + 150.0 * DT + 1e-3);
            if body.velocity.y < 0.0 && before > 0.0 {
                hit_floor = true;
                // Rebound keeps at most 30% of the impact speed
                assert!(body.velocity.y.abs() <= 150.0 * 0.3 + 1e-3);
            }
        }
        assert!(hit_floor);
    }

    #[test]
    fn test_terminal_velocity_clamp() {
        let mut body = immersed_body();
        body.velocity.y = 1000.0;
        step(&mut body, 175.0);
        assert!(body.velocity.y <= 150.0);
    }

    #[test]
    fn test_fried_body_floats_at_surface() {
        let mut body = immersed_body();
        for _ in 0..(240 * 60) {
            step(&mut body, 190.0);
        }
        assert!(body.density() < OIL_DENSITY);

        // Rises, then settles just below the surface line; buoyancy nudges it
        // up by a fraction of a unit between clamps
        assert!(body.position.y >= SURFACE + 5.0 - 0.1);
        assert!(body.position.y < SURFACE + 20.0);
        assert!(body.velocity.y.abs() < 5.0);
    }

    #[test]
    fn test_emission_factor_zero_cases() {
        let mut body = immersed_body();
        // Not yet immersed
        assert_eq!(body.emission_factor(175.0), 0.0);

        step(&mut body, 175.0);
        assert!(body.emission_factor(175.0) > 0.0);

        // Oil barely hotter than the body
        assert_eq!(body.emission_factor(body.temperature() + 4.0), 0.0);

        for _ in 0..(400 * 60) {
            step(&mut body, 190.0);
        }
        assert_eq!(body.moisture(), 0.01);
        assert_eq!(body.emission_factor(190.0), 0.0);
    }

    #[test]
    fn test_emission_factor_bounds() {
        let mut body = immersed_body();
        for _ in 0..(120 * 60) {
            step(&mut body, 175.0);
            let factor = body.emission_factor(175.0);
            if factor > 0.0 {
                assert!((0.01..=1.0).contains(&factor), "factor {}", factor);
            }
        }
    }

    #[test]
    fn test_emission_factor_decays_in_vigorous_phase() {
        let mut body = immersed_body();
        step(&mut body, 175.0);
        let early = body.emission_factor(175.0);
        for _ in 0..(10 * 60) {
            step(&mut body, 175.0);
        }
        let later = body.emission_factor(175.0);
        assert!(later < early);
    }

    #[test]
    fn test_surface_sample_within_bounding_box() {
        let body = immersed_body();
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);

        let mut on_edge = 0;
        for _ in 0..1000 {
            let p = body.surface_sample_for_emission(&mut rng) - body.position;
            assert!(p.x.abs() <= 60.0 + 1e-3 && p.y.abs() <= 10.0 + 1e-3);
            if (p.x.abs() - 60.0).abs() < 1e-3 || (p.y.abs() - 10.0).abs() < 1e-3 {
                on_edge += 1;
            }
        }
        // ~90% edge bias
        assert!(on_edge > 850, "edge samples: {}", on_edge);
    }

    #[test]
    fn test_appearance_color_follows_cookedness() {
        let mut body = immersed_body();
        assert_eq!(body.appearance_color(), [235, 220, 175, 255]);

        for _ in 0..(240 * 60) {
            step(&mut body, 190.0);
        }
        assert_eq!(body.appearance_color(), [190, 150, 80, 255]);
    }

    #[test]
    fn test_pin_to_zeroes_velocity() {
        let mut body = immersed_body();
        body.velocity = Vec2::new(3.0, 40.0);
        body.pin_to(Vec2::new(10.0, 20.0));
        assert_eq!(body.position, Vec2::new(10.0, 20.0));
        assert_eq!(body.velocity, Vec2::ZERO);
        assert!(body.contains_point(Vec2::new(40.0, 20.0), 60.0));
        assert!(!body.contains_point(Vec2::new(80.0, 20.0), 60.0));
    }
}
