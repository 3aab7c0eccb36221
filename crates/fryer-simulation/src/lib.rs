//! Physical models for the deep-fryer simulation
//!
//! This crate provides the per-entity models stepped by the fryer:
//! - Oil state with temperature-derived viscosity and density (OilState, OilParams)
//! - The frying potato body: heat, moisture, crust, density and buoyancy (FryingBody, FryingParams)
//! - Steam bubbles classified by formation depth (BubbleParticle, BubbleKind, BubbleTable)
//! - Small helpers shared by the models (SimRng, Trail, ColorRamp, map_range)
//!
//! Coordinates are screen-style: +y points down, so "below the surface" means
//! a larger y than the surface line.

mod body;
mod bubble;
mod color;
mod math;
mod oil;
mod rng;
mod trail;

pub use body::{FryingBody, FryingParams, Immersion};
pub use bubble::{
    BubbleDynamics, BubbleKind, BubbleKindParams, BubbleParticle, BubblePhase, BubbleSpawn,
    BubbleTable, Range,
};
pub use color::{ColorRamp, Rgba, lerp_color};
pub use math::map_range;
pub use oil::{OilParams, OilState};
pub use rng::SimRng;
pub use trail::Trail;
