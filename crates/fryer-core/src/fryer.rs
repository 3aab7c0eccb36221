//! The fryer - owns the oil, the body and every live bubble
//!
//! A tick runs its stages in a fixed order, each seeing the values the
//! previous stage produced this tick:
//! 1. Oil: advance the clock, smooth toward the target temperature
//! 2. Body: heat, dry, crust, brown and move; re-pin while dragged
//! 3. Emission: spawn bubbles from the body surface
//! 4. Bubbles: advance every particle, keep it between the oil walls
//! 5. Reap: drop dead particles

use fryer_simulation::{BubbleParticle, BubbleSpawn, FryingBody, OilState, SimRng};
use glam::Vec2;

use crate::config::{ConfigError, SimulationConfig};
use crate::emission::bubble_count;
use crate::stats::SimStats;
use crate::status::FryerStatus;

pub struct Fryer {
    config: SimulationConfig,
    oil: OilState,
    target_temperature: f32,
    body: Option<FryingBody>,
    bubbles: Vec<BubbleParticle>,
    /// Pointer position pinning the body while it is dragged
    drag: Option<Vec2>,
    paused: bool,
    tick_count: u64,
}

impl Default for Fryer {
    fn default() -> Self {
        Self::build(SimulationConfig::default())
    }
}

impl Fryer {
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SimulationConfig) -> Self {
        let oil = OilState::new(config.initial_temperature, config.oil);
        let target_temperature = oil.temperature();
        Self {
            bubbles: Vec::with_capacity(config.max_bubbles.min(1024)),
            config,
            oil,
            target_temperature,
            body: None,
            drag: None,
            paused: false,
            tick_count: 0,
        }
    }

    /// Advance the fryer by `dt` seconds
    ///
    /// `dt` must be finite and non-negative; it is capped at the configured
    /// ceiling. Does nothing while paused.
    pub fn tick<R: SimRng + ?Sized>(&mut self, dt: f32, stats: &mut dyn SimStats, rng: &mut R) {
        debug_assert!(dt.is_finite() && dt >= 0.0, "invalid tick dt: {}", dt);
        if self.paused {
            return;
        }
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.config.max_dt)
        } else {
            0.0
        };

        self.update_oil(dt);
        self.update_body(dt, stats);
        self.emit_bubbles(stats, rng);
        self.update_bubbles(dt, stats);
        self.reap_bubbles(stats);

        self.tick_count += 1;
    }

    fn update_oil(&mut self, dt: f32) {
        self.oil.advance(dt);
        self.oil.smooth_toward(self.target_temperature);
    }

    fn update_body(&mut self, dt: f32, stats: &mut dyn SimStats) {
        let Some(body) = self.body.as_mut() else {
            return;
        };

        let geometry = &self.config.geometry;
        let was_immersed = body.is_immersed();
        body.update(
            dt,
            self.oil.temperature(),
            geometry.oil_surface,
            self.oil.density(),
            geometry.basket_floor,
        );
        if body.is_immersed() && !was_immersed {
            stats.record_immersion();
        }

        if let Some(point) = self.drag {
            body.pin_to(point);
        }
    }

    fn emit_bubbles<R: SimRng + ?Sized>(&mut self, stats: &mut dyn SimStats, rng: &mut R) {
        let Some(body) = self.body.as_ref() else {
            return;
        };

        let factor = body.emission_factor(self.oil.temperature());
        if factor <= 0.0 {
            return;
        }

        let count = bubble_count(&self.config.emission, factor, rng);
        if count > 0 {
            log::trace!("Spawning {} bubbles (factor {:.3})", count, factor);
        }

        let geometry = &self.config.geometry;
        let margin = self.config.emission.spawn_margin;
        let top = geometry.oil_surface + margin;
        let bottom = (geometry.oil_bottom - margin).max(top);

        let mut skipped = 0;
        for _ in 0..count {
            if self.bubbles.len() >= self.config.max_bubbles {
                stats.record_bubble_skipped();
                skipped += 1;
                continue;
            }

            let mut position = body.surface_sample_for_emission(rng);
            position.y = position.y.clamp(top, bottom);

            let spawn = BubbleSpawn {
                position,
                oil_temperature: self.oil.temperature(),
                depth_below_surface: position.y - geometry.oil_surface,
                surface_level: geometry.oil_surface,
            };
            let bubble = BubbleParticle::spawn(rng, &self.config.bubbles, spawn);
            stats.record_bubble_spawned(bubble.kind());
            self.bubbles.push(bubble);
        }

        if skipped > 0 {
            log::warn!(
                "Bubble cap of {} reached, skipped {} spawns",
                self.config.max_bubbles,
                skipped
            );
        }
    }

    fn update_bubbles(&mut self, dt: f32, stats: &mut dyn SimStats) {
        let viscosity = self.oil.viscosity();
        let sim_time = self.oil.clock();
        let left = self.config.geometry.oil_left;
        let right = self.config.geometry.oil_right;

        for bubble in &mut self.bubbles {
            let was_surfaced = bubble.has_reached_surface();
            bubble.update(dt, viscosity, sim_time);
            bubble.position.x = bubble.position.x.clamp(left, right);

            if bubble.has_reached_surface() && !was_surfaced {
                stats.record_bubble_surfaced(bubble.kind());
            }
        }
    }

    fn reap_bubbles(&mut self, stats: &mut dyn SimStats) {
        self.bubbles.retain(|bubble| {
            if bubble.is_dead() {
                stats.record_bubble_reaped(bubble.kind());
                false
            } else {
                true
            }
        });
    }

    /// Place a fresh raw body at `position`, replacing any existing one
    pub fn spawn_body(&mut self, position: Vec2, size: Vec2) -> &mut FryingBody {
        if self.body.is_some() {
            log::info!("Replacing fry in the fryer");
        }
        self.drag = None;
        self.body.insert(FryingBody::with_params(position, size, self.config.frying))
    }

    /// Drop a fresh body from the configured drop point
    pub fn drop_body(&mut self) -> &mut FryingBody {
        let geometry = self.config.geometry;
        log::info!(
            "Dropping fry at ({:.0}, {:.0})",
            geometry.drop_point.x,
            geometry.drop_point.y
        );
        let body = self.spawn_body(geometry.drop_point, geometry.body_size);
        body.velocity = geometry.drop_velocity;
        body
    }

    pub fn remove_body(&mut self) -> Option<FryingBody> {
        self.drag = None;
        let body = self.body.take();
        if let Some(body) = &body {
            log::info!(
                "Removed fry after {:.1}s in oil, cookedness {:.0}%",
                body.time_immersed(),
                body.cookedness() * 100.0
            );
        }
        body
    }

    /// Drop a body if the fryer is empty, otherwise take it out
    pub fn toggle_body(&mut self) {
        if self.body.is_some() {
            self.remove_body();
        } else {
            self.drop_body();
        }
    }

    /// Clear bubbles, remove the body and restart the clock
    ///
    /// Oil temperature, target and pause state are kept.
    pub fn reset(&mut self) {
        self.bubbles.clear();
        self.body = None;
        self.drag = None;
        self.oil.reset_clock();
        self.tick_count = 0;
        log::info!("Fryer reset");
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Simulation paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            log::info!("Simulation resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Set the target oil temperature, clamped to the oil's band
    pub fn set_target_temperature(&mut self, temperature: f32) {
        let clamped = self.config.oil.clamp_temperature(temperature);
        if clamped != temperature {
            log::debug!("Target {:.1}°C clamped to {:.1}°C", temperature, clamped);
        }
        self.target_temperature = clamped;
    }

    pub fn raise_target_temperature(&mut self) {
        self.set_target_temperature(self.target_temperature + self.config.temperature_step);
    }

    pub fn lower_target_temperature(&mut self) {
        self.set_target_temperature(self.target_temperature - self.config.temperature_step);
    }

    /// Grab the body if `point` is within the pick radius of its centre
    pub fn begin_drag(&mut self, point: Vec2) -> bool {
        let radius = self.config.geometry.drag_pick_radius;
        match self.body.as_mut() {
            Some(body) if body.contains_point(point, radius) => {
                body.pin_to(point);
                self.drag = Some(point);
                log::debug!("Grabbed fry at ({:.0}, {:.0})", point.x, point.y);
                true
            }
            Some(_) => false,
            None => {
                log::warn!("Drag ignored: no fry in the fryer");
                false
            }
        }
    }

    /// Move the grabbed body to `point`
    pub fn drag_to(&mut self, point: Vec2) {
        if self.drag.is_none() {
            return;
        }
        self.drag = Some(point);
        if let Some(body) = self.body.as_mut() {
            body.pin_to(point);
        }
    }

    pub fn end_drag(&mut self) {
        if self.drag.take().is_some() {
            log::debug!("Released fry");
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn status(&self) -> FryerStatus {
        FryerStatus::capture(self)
    }

    pub fn oil(&self) -> &OilState {
        &self.oil
    }

    pub fn body(&self) -> Option<&FryingBody> {
        self.body.as_ref()
    }

    pub fn bubbles(&self) -> &[BubbleParticle] {
        &self.bubbles
    }

    pub fn target_temperature(&self) -> f32 {
        self.target_temperature
    }

    pub fn sim_time(&self) -> f32 {
        self.oil.clock()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{BubbleCensus, NoopStats};
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    const DT: f32 = 1.0 / 60.0;

    fn rng() -> Xoshiro256StarStar {
        Xoshiro256StarStar::seed_from_u64(42)
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SimulationConfig {
            max_dt: -1.0,
            ..SimulationConfig::default()
        };
        assert!(Fryer::new(config).is_err());
    }

    #[test]
    fn test_empty_fryer_only_advances_oil() {
        let mut fryer = Fryer::default();
        let mut rng = rng();
        fryer.set_target_temperature(185.0);

        fryer.tick(DT, &mut NoopStats, &mut rng);
        assert!((fryer.oil().temperature() - 175.5).abs() < 1e-4);
        assert!((fryer.sim_time() - DT).abs() < 1e-6);
        assert!(fryer.bubbles().is_empty());
        assert_eq!(fryer.tick_count(), 1);
    }

    #[test]
    fn test_dt_is_capped() {
        let mut fryer = Fryer::default();
        fryer.tick(5.0, &mut NoopStats, &mut rng());
        assert!((fryer.sim_time() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_pause_skips_ticks() {
        let mut fryer = Fryer::default();
        let mut rng = rng();
        fryer.drop_body();
        fryer.pause();

        let position = fryer.body().map(|b| b.position);
        for _ in 0..10 {
            fryer.tick(DT, &mut NoopStats, &mut rng);
        }
        assert_eq!(fryer.sim_time(), 0.0);
        assert_eq!(fryer.body().map(|b| b.position), position);

        fryer.resume();
        fryer.tick(DT, &mut NoopStats, &mut rng);
        assert!(fryer.sim_time() > 0.0);
    }

    #[test]
    fn test_target_temperature_steps_clamp_to_band() {
        let mut fryer = Fryer::default();
        fryer.raise_target_temperature();
        assert_eq!(fryer.target_temperature(), 180.0);

        for _ in 0..10 {
            fryer.raise_target_temperature();
        }
        assert_eq!(fryer.target_temperature(), 190.0);

        fryer.set_target_temperature(100.0);
        assert_eq!(fryer.target_temperature(), 160.0);
        fryer.lower_target_temperature();
        assert_eq!(fryer.target_temperature(), 160.0);
    }

    #[test]
    fn test_drop_and_toggle_body() {
        let mut fryer = Fryer::default();
        fryer.toggle_body();
        let body = fryer.body().expect("body dropped");
        assert_eq!(body.position, Vec2::new(512.0, 235.0));
        assert_eq!(body.velocity, Vec2::new(0.0, 100.0));
        assert_eq!(body.size, Vec2::new(120.0, 20.0));

        fryer.toggle_body();
        assert!(fryer.body().is_none());
    }

    #[test]
    fn test_dropped_body_enters_oil() {
        let mut fryer = Fryer::default();
        let mut rng = rng();
        let mut census = BubbleCensus::default();
        fryer.drop_body();

        for _ in 0..60 {
            fryer.tick(DT, &mut census, &mut rng);
        }
        let body = fryer.body().expect("body present");
        assert!(body.is_immersed());
        assert_eq!(census.immersions, 1);
        assert!(census.total_spawned() > 0);
    }

    #[test]
    fn test_drag_pins_body_after_update() {
        let mut fryer = Fryer::default();
        let mut rng = rng();
        fryer.drop_body();

        // Outside the pick radius
        assert!(!fryer.begin_drag(Vec2::new(700.0, 235.0)));
        assert!(fryer.begin_drag(Vec2::new(530.0, 240.0)));
        assert!(fryer.is_dragging());

        fryer.drag_to(Vec2::new(600.0, 400.0));
        for _ in 0..30 {
            fryer.tick(DT, &mut NoopStats, &mut rng);
            let body = fryer.body().expect("body present");
            assert_eq!(body.position, Vec2::new(600.0, 400.0));
            assert_eq!(body.velocity, Vec2::ZERO);
        }

        fryer.end_drag();
        fryer.tick(DT, &mut NoopStats, &mut rng);
        assert!(!fryer.is_dragging());
        assert_ne!(fryer.body().map(|b| b.velocity), Some(Vec2::ZERO));
    }

    #[test]
    fn test_drag_without_body_is_ignored() {
        let mut fryer = Fryer::default();
        assert!(!fryer.begin_drag(Vec2::new(512.0, 235.0)));
        fryer.drag_to(Vec2::new(0.0, 0.0));
        assert!(!fryer.is_dragging());
    }

    #[test]
    fn test_remove_body_ends_drag() {
        let mut fryer = Fryer::default();
        fryer.drop_body();
        assert!(fryer.begin_drag(Vec2::new(512.0, 235.0)));

        let removed = fryer.remove_body();
        assert!(removed.is_some());
        assert!(!fryer.is_dragging());
        assert!(fryer.remove_body().is_none());
    }

    #[test]
    fn test_bubble_cap_skips_spawns() {
        let config = SimulationConfig {
            max_bubbles: 5,
            ..SimulationConfig::default()
        };
        let mut fryer = Fryer::new(config).expect("valid config");
        let mut rng = rng();
        let mut census = BubbleCensus::default();
        fryer.spawn_body(Vec2::new(512.0, 400.0), Vec2::new(120.0, 20.0));

        for _ in 0..30 {
            fryer.tick(DT, &mut census, &mut rng);
            assert!(fryer.bubbles().len() <= 5);
        }
        assert!(census.skipped > 0);
    }
}
