//! Scalar helpers

/// Linearly remap `value` from `[in_min, in_max]` onto `[out_min, out_max]`
///
/// With `clamp` set the result is limited to the output range (either
/// orientation). A degenerate input range maps everything to `out_min`.
#[inline]
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32, clamp: bool) -> f32 {
    let span = in_max - in_min;
    if span.abs() < f32::EPSILON {
        return out_min;
    }

    let mapped = out_min + (value - in_min) / span * (out_max - out_min);
    if clamp {
        let (lo, hi) = if out_min <= out_max {
            (out_min, out_max)
        } else {
            (out_max, out_min)
        };
        mapped.clamp(lo, hi)
    } else {
        mapped
    }
}
