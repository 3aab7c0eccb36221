//! RGBA color helpers and piecewise-linear color ramps

use serde::{Deserialize, Serialize};

/// Color as RGBA bytes
pub type Rgba = [u8; 4];

/// Per-channel linear interpolation between two colors (alpha included)
pub fn lerp_color(from: Rgba, to: Rgba, t: f32) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    let mut out = [0u8; 4];
    for (i, channel) in out.iter_mut().enumerate() {
        let a = from[i] as f32;
        let b = to[i] as f32;
        *channel = (a + (b - a) * t).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Piecewise-linear ramp over calibrated stops
///
/// Stops are `(position, color)` pairs in ascending position order. Sampling
/// below the first stop returns the first color, above the last the last color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRamp {
    stops: Vec<(f32, Rgba)>,
}

impl ColorRamp {
    pub fn new(stops: Vec<(f32, Rgba)>) -> Self {
        debug_assert!(!stops.is_empty(), "color ramp needs at least one stop");
        debug_assert!(
            stops.windows(2).all(|w| w[0].0 < w[1].0),
            "color ramp stops must be strictly ascending"
        );
        Self { stops }
    }

    /// Potato color from raw (0.0) to dark golden (1.0), keyed by cookedness
    pub fn cooking() -> Self {
        Self::new(vec![
            (0.0, [235, 220, 175, 255]),  // Raw
            (0.25, [245, 230, 160, 255]), // Very light
            (0.5, [245, 225, 140, 255]),  // Light
            (0.65, [240, 205, 120, 255]), // Medium
            (0.85, [220, 180, 100, 255]), // Golden
            (1.0, [190, 150, 80, 255]),   // Dark golden
        ])
    }

    /// Oil tint from cool (0.0) to hot (1.0), keyed by normalized temperature
    pub fn oil() -> Self {
        Self::new(vec![
            (0.0, [210, 170, 70, 180]),
            (0.5, [230, 185, 85, 190]),
            (1.0, [245, 200, 100, 200]),
        ])
    }

    pub fn sample(&self, t: f32) -> Rgba {
        let Some(&(first_pos, first_color)) = self.stops.first() else {
            return [0, 0, 0, 0];
        };
        if t <= first_pos {
            return first_color;
        }

        for pair in self.stops.windows(2) {
            let (lo_pos, lo_color) = pair[0];
            let (hi_pos, hi_color) = pair[1];
            if t < hi_pos {
                return lerp_color(lo_color, hi_color, (t - lo_pos) / (hi_pos - lo_pos));
            }
        }

        self.stops[self.stops.len() - 1].1
    }

    pub fn stops(&self) -> &[(f32, Rgba)] {
        &self.stops
    }
}
