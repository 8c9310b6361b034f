//! Scalar helpers behind the tilt mapping and the settle curve.

use crate::constants::OUTPUT_PRECISION;

#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Clamp into the percent range \[0, 100\].
#[inline]
pub fn clamp_percent(value: f64) -> f64 {
    clamp(value, 0.0, 100.0)
}

/// Round to the fixed output precision (three decimal places).
#[inline]
pub fn round(value: f64) -> f64 {
    let scale = 10f64.powi(OUTPUT_PRECISION);
    let rounded = (value * scale).round() / scale;
    // avoid emitting "-0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Linearly remap `value` from `[from_min, from_max]` onto `[to_min, to_max]`,
/// rounded to output precision.
#[inline]
pub fn adjust(value: f64, from_min: f64, from_max: f64, to_min: f64, to_max: f64) -> f64 {
    round(to_min + ((to_max - to_min) * (value - from_min)) / (from_max - from_min))
}

#[inline]
pub fn ease_in_out_cubic(x: f64) -> f64 {
    if x < 0.5 {
        4.0 * x * x * x
    } else {
        1.0 - (-2.0 * x + 2.0).powi(3) / 2.0
    }
}
