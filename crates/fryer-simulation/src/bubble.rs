//! Steam bubbles released by the frying body
//!
//! Bubble behavior is classified by the formation depth ratio h/R
//! (Kiyama et al., 2022, "Morphology of bubble dynamics and sound in heated oil"):
//! - Explosion:   h/R < 0.5  - rapid fragmentation near the surface
//! - Elongated:   h/R < 1.5  - stretched shape, fast rise
//! - Oscillating: h/R >= 1.5 - large wobbling bubbles
//!
//! The kind is fixed at spawn and selects every motion, size, lifespan and
//! trail parameter from [`BubbleTable`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::math::map_range;
use crate::rng::SimRng;
use crate::trail::Trail;

/// Closed interval used for randomized spawn parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn sample<R: SimRng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.range_f32(self.min, self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Bubble classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BubbleKind {
    Explosion,
    Elongated,
    Oscillating,
}

impl BubbleKind {
    pub const ALL: [BubbleKind; 3] = [
        BubbleKind::Explosion,
        BubbleKind::Elongated,
        BubbleKind::Oscillating,
    ];

    /// Classify by depth-to-radius ratio with the standard 0.5 / 1.5 boundaries
    pub fn classify(depth_below_surface: f32, estimated_radius: f32) -> Self {
        BubbleTable::default().classify(depth_below_surface, estimated_radius)
    }

    pub fn name(&self) -> &'static str {
        match self {
            BubbleKind::Explosion => "explosion",
            BubbleKind::Elongated => "elongated",
            BubbleKind::Oscillating => "oscillating",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            BubbleKind::Explosion => 0,
            BubbleKind::Elongated => 1,
            BubbleKind::Oscillating => 2,
        }
    }
}

/// Spawn ranges for one bubble kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubbleKindParams {
    pub velocity_x: Range,
    /// Negative is upward
    pub velocity_y: Range,
    pub start_size: Range,
    /// End size as a multiple of the start size
    pub end_scale: Range,
    pub lifespan_secs: Range,
    /// Size oscillation rate (rad/s); only oscillating bubbles have one
    pub oscillation_rate: Option<Range>,
    pub trail_capacity: usize,
}

/// Per-tick dynamics shared by every bubble
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubbleDynamics {
    /// Distance below the surface line that counts as surfacing
    pub surface_tolerance: f32,
    /// Remaining normalized life once a bubble surfaces
    pub pop_window: f32,
    pub drag_constant: f32,
    pub wobble_amplitude: f32,
    pub wobble_frequency: f32,
    /// Oscillation amplitude as a fraction of the start size
    pub oscillation_size_fraction: f32,
    /// Minimum movement before a new trail point is recorded
    pub trail_min_distance: f32,
    pub base_alpha: f32,
    /// Alpha of a rising bubble at the end of its life
    pub faded_alpha: f32,
    /// Extra size fraction gained by the end of the pop
    pub pop_inflation: f32,
}

impl Default for BubbleDynamics {
    fn default() -> Self {
        Self {
            surface_tolerance: 5.0,
            pop_window: 0.15,
            drag_constant: 20.0,
            wobble_amplitude: 15.0,
            wobble_frequency: 8.0,
            oscillation_size_fraction: 0.22,
            trail_min_distance: 3.0,
            base_alpha: 200.0,
            faded_alpha: 60.0,
            pop_inflation: 0.5,
        }
    }
}

/// Classification boundaries and the kind → parameters lookup table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubbleTable {
    /// Range of the radius estimate drawn at spawn
    pub radius: Range,
    /// Ratios below this are explosions
    pub explosion_ratio: f32,
    /// Ratios below this (and not explosions) are elongated
    pub elongated_ratio: f32,
    pub explosion: BubbleKindParams,
    pub elongated: BubbleKindParams,
    pub oscillating: BubbleKindParams,
    pub dynamics: BubbleDynamics,
}

impl Default for BubbleTable {
    fn default() -> Self {
        Self {
            radius: Range::new(2.5, 7.0),
            explosion_ratio: 0.5,
            elongated_ratio: 1.5,
            explosion: BubbleKindParams {
                velocity_x: Range::new(-70.0, 70.0),
                velocity_y: Range::new(-200.0, -140.0),
                start_size: Range::new(3.0, 7.0),
                end_scale: Range::new(0.15, 0.35),
                lifespan_secs: Range::new(0.4, 0.9),
                oscillation_rate: None,
                trail_capacity: 3,
            },
            elongated: BubbleKindParams {
                velocity_x: Range::new(-20.0, 20.0),
                velocity_y: Range::new(-220.0, -150.0),
                start_size: Range::new(3.0, 6.0),
                end_scale: Range::new(1.8, 2.8),
                lifespan_secs: Range::new(0.7, 1.4),
                oscillation_rate: None,
                trail_capacity: 6,
            },
            oscillating: BubbleKindParams {
                velocity_x: Range::new(-25.0, 25.0),
                velocity_y: Range::new(-130.0, -80.0),
                start_size: Range::new(6.0, 14.0),
                end_scale: Range::new(0.9, 1.3),
                lifespan_secs: Range::new(1.2, 2.5),
                oscillation_rate: Some(Range::new(14.0, 30.0)),
                trail_capacity: 8,
            },
            dynamics: BubbleDynamics::default(),
        }
    }
}

impl BubbleTable {
    pub fn classify(&self, depth_below_surface: f32, estimated_radius: f32) -> BubbleKind {
        let ratio = depth_below_surface / estimated_radius;
        if ratio < self.explosion_ratio {
            BubbleKind::Explosion
        } else if ratio < self.elongated_ratio {
            BubbleKind::Elongated
        } else {
            BubbleKind::Oscillating
        }
    }

    pub fn params(&self, kind: BubbleKind) -> &BubbleKindParams {
        match kind {
            BubbleKind::Explosion => &self.explosion,
            BubbleKind::Elongated => &self.elongated,
            BubbleKind::Oscillating => &self.oscillating,
        }
    }
}

/// Lifecycle of a bubble: `Rising → Popping → Dead`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BubblePhase {
    /// Below the surface, life decaying normally
    Rising,
    /// Reached the surface; remaining life capped to the pop window
    Popping,
    /// Life exhausted; terminal
    Dead { surfaced: bool },
}

/// Where and in what conditions a bubble forms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubbleSpawn {
    pub position: Vec2,
    pub oil_temperature: f32,
    pub depth_below_surface: f32,
    pub surface_level: f32,
}

/// A single steam bubble
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BubbleParticle {
    kind: BubbleKind,
    phase: BubblePhase,

    pub position: Vec2,
    pub velocity: Vec2,
    acceleration: Vec2,

    start_size: f32,
    end_size: f32,
    size: f32,

    /// Normalized remaining life, 1.0 at spawn
    life: f32,
    lifespan_secs: f32,

    wobble_phase: f32,
    oscillation_phase: f32,
    oscillation_rate: f32,

    surface_level: f32,
    initial_depth: f32,
    estimated_radius: f32,

    tint: [u8; 3],
    alpha: f32,
    trail: Trail,

    dynamics: BubbleDynamics,
}

impl BubbleParticle {
    /// Spawn a bubble, drawing its radius estimate from the table
    pub fn spawn<R: SimRng + ?Sized>(rng: &mut R, table: &BubbleTable, spawn: BubbleSpawn) -> Self {
        let radius = table.radius.sample(rng);
        Self::with_radius(rng, table, spawn, radius)
    }

    /// Spawn a bubble with a known radius estimate
    pub fn with_radius<R: SimRng + ?Sized>(
        rng: &mut R,
        table: &BubbleTable,
        spawn: BubbleSpawn,
        estimated_radius: f32,
    ) -> Self {
        let kind = table.classify(spawn.depth_below_surface, estimated_radius);
        let params = table.params(kind);

        let velocity = Vec2::new(params.velocity_x.sample(rng), params.velocity_y.sample(rng));
        let start_size = params.start_size.sample(rng);
        let end_size = start_size * params.end_scale.sample(rng);
        let lifespan_secs = params.lifespan_secs.sample(rng);
        let oscillation_rate = params.oscillation_rate.map_or(0.0, |r| r.sample(rng));
        let wobble_phase = rng.range_f32(0.0, std::f32::consts::TAU);

        // Hotter oil gives brighter bubbles
        let intensity = map_range(spawn.oil_temperature, 160.0, 190.0, 200.0, 255.0, true) as i32;
        let tint = [
            intensity.clamp(0, 255) as u8,
            (intensity - 5).clamp(0, 255) as u8,
            (intensity - 30).clamp(0, 255) as u8,
        ];

        Self {
            kind,
            phase: BubblePhase::Rising,
            position: spawn.position,
            velocity,
            acceleration: Vec2::ZERO,
            start_size,
            end_size,
            size: start_size,
            life: 1.0,
            lifespan_secs,
            wobble_phase,
            oscillation_phase: 0.0,
            oscillation_rate,
            surface_level: spawn.surface_level,
            initial_depth: spawn.depth_below_surface,
            estimated_radius,
            tint,
            alpha: table.dynamics.base_alpha,
            trail: Trail::new(params.trail_capacity),
            dynamics: table.dynamics,
        }
    }

    /// Advance by `dt` seconds through oil of `ambient_viscosity`
    ///
    /// `sim_time` is the fryer clock and drives the horizontal wobble.
    pub fn update(&mut self, dt: f32, ambient_viscosity: f32, sim_time: f32) {
        if self.is_dead() {
            return;
        }

        let d = self.dynamics;

        self.life -= dt / self.lifespan_secs;
        if self.life <= 0.0 {
            self.phase = BubblePhase::Dead {
                surfaced: self.has_reached_surface(),
            };
            return;
        }

        if self.phase == BubblePhase::Rising
            && self.position.y <= self.surface_level + d.surface_tolerance
        {
            self.phase = BubblePhase::Popping;
            self.life = self.life.min(d.pop_window);
            log::trace!(
                "{} bubble surfaced at ({:.1}, {:.1})",
                self.kind.name(),
                self.position.x,
                self.position.y
            );
        }

        // Viscous drag: F = -mu * c * v
        self.apply_force(-self.velocity * ambient_viscosity * d.drag_constant);

        let wobble = (self.wobble_phase + sim_time * d.wobble_frequency).sin() * d.wobble_amplitude;
        self.acceleration.x += wobble * dt;

        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;

        // Quadratic easing from start to end size
        let progress = 1.0 - self.life;
        let eased = progress * progress;
        self.size = self.start_size + (self.end_size - self.start_size) * eased;

        if self.kind == BubbleKind::Oscillating {
            self.oscillation_phase += self.oscillation_rate * dt;
            self.size += self.oscillation_phase.sin() * self.start_size * d.oscillation_size_fraction;
        }

        self.trail.push_if_moved(self.position, d.trail_min_distance);

        if self.phase == BubblePhase::Popping {
            let pop = self.pop_progress();
            self.alpha = map_range(pop, 0.0, 1.0, d.base_alpha, 0.0, false);
            self.size *= 1.0 + pop * d.pop_inflation;
        } else {
            self.alpha = map_range(self.life, 0.0, 1.0, d.faded_alpha, d.base_alpha, true);
        }

        self.acceleration = Vec2::ZERO;
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    /// Fraction of the pop window already consumed, 0 while rising
    pub fn pop_progress(&self) -> f32 {
        match self.phase {
            BubblePhase::Rising => 0.0,
            BubblePhase::Popping => (1.0 - self.life / self.dynamics.pop_window).clamp(0.0, 1.0),
            BubblePhase::Dead { .. } => 1.0,
        }
    }

    pub fn kind(&self) -> BubbleKind {
        self.kind
    }

    pub fn phase(&self) -> BubblePhase {
        self.phase
    }

    pub fn is_dead(&self) -> bool {
        matches!(self.phase, BubblePhase::Dead { .. })
    }

    pub fn has_reached_surface(&self) -> bool {
        matches!(
            self.phase,
            BubblePhase::Popping | BubblePhase::Dead { surfaced: true }
        )
    }

    pub fn life(&self) -> f32 {
        self.life
    }

    pub fn lifespan_secs(&self) -> f32 {
        self.lifespan_secs
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn start_size(&self) -> f32 {
        self.start_size
    }

    pub fn end_size(&self) -> f32 {
        self.end_size
    }

    pub fn oscillation_rate(&self) -> f32 {
        self.oscillation_rate
    }

    pub fn initial_depth(&self) -> f32 {
        self.initial_depth
    }

    pub fn estimated_radius(&self) -> f32 {
        self.estimated_radius
    }

    /// Alpha driving the bubble's visibility, 0-200
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn color(&self) -> Rgba {
        [
            self.tint[0],
            self.tint[1],
            self.tint[2],
            self.alpha.round().clamp(0.0, 255.0) as u8,
        ]
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }
}
