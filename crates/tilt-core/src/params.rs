//! Mapping from a pointer offset on a card to the visual parameters that drive
//! its tilt, highlight and glare.

use crate::constants::{
    BACKGROUND_MAX_PERCENT, BACKGROUND_MIN_PERCENT, ROTATE_X_DIVISOR, ROTATE_Y_DIVISOR,
};
use crate::math::{adjust, clamp, clamp_percent, round};
use glam::DVec2;
use std::fmt::Write;

/// Card size in CSS pixels as read from layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Zero, negative or non-finite sizes cannot be mapped.
    #[inline]
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Derived visual state for one pointer sample.
///
/// Percent fields are in \[0, 100\], the `pointer_from_*` fields in \[0, 1\] and
/// rotations in degrees. Every value is rounded to three decimal places.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualParameterSet {
    pub pointer_x: f64,
    pub pointer_y: f64,
    pub background_x: f64,
    pub background_y: f64,
    pub pointer_from_center: f64,
    pub pointer_from_top: f64,
    pub pointer_from_left: f64,
    pub rotate_x: f64,
    pub rotate_y: f64,
}

/// CSS custom property name, numeric value and unit suffix.
pub type CssProperty = (&'static str, f64, &'static str);

impl VisualParameterSet {
    /// Compute the parameter set for an offset in card pixel space.
    ///
    /// Returns `None` when the dimensions cannot be mapped.
    pub fn compute(offset: DVec2, dims: Dimensions) -> Option<Self> {
        if !dims.is_usable() {
            return None;
        }
        // derived fields read the raw percent; only emitted values are rounded
        let percent_x = clamp_percent(100.0 * offset.x / dims.width);
        let percent_y = clamp_percent(100.0 * offset.y / dims.height);

        let center_x = percent_x - 50.0;
        let center_y = percent_y - 50.0;

        // X is more sensitive than Y; the divisors differ on purpose.
        let rotate_x = round(-(center_x / ROTATE_X_DIVISOR));
        let rotate_y = round(center_y / ROTATE_Y_DIVISOR);

        Some(Self {
            pointer_x: round(percent_x),
            pointer_y: round(percent_y),
            background_x: adjust(
                percent_x,
                0.0,
                100.0,
                BACKGROUND_MIN_PERCENT,
                BACKGROUND_MAX_PERCENT,
            ),
            background_y: adjust(
                percent_y,
                0.0,
                100.0,
                BACKGROUND_MIN_PERCENT,
                BACKGROUND_MAX_PERCENT,
            ),
            pointer_from_center: round(clamp(center_y.hypot(center_x) / 50.0, 0.0, 1.0)),
            pointer_from_top: round(percent_y / 100.0),
            pointer_from_left: round(percent_x / 100.0),
            rotate_x,
            rotate_y,
        })
    }

    /// Parameters at the geometric center of `dims`.
    pub fn centered(dims: Dimensions) -> Option<Self> {
        Self::compute(dims.center(), dims)
    }

    /// CSS custom properties in a stable order.
    pub fn css_properties(&self) -> [CssProperty; 9] {
        [
            ("--pointer-x", self.pointer_x, "%"),
            ("--pointer-y", self.pointer_y, "%"),
            ("--background-x", self.background_x, "%"),
            ("--background-y", self.background_y, "%"),
            ("--pointer-from-center", self.pointer_from_center, ""),
            ("--pointer-from-top", self.pointer_from_top, ""),
            ("--pointer-from-left", self.pointer_from_left, ""),
            ("--rotate-x", self.rotate_x, "deg"),
            ("--rotate-y", self.rotate_y, "deg"),
        ]
    }

    /// Format every property into `buf` in turn and pass it to `sink`.
    pub fn write_css<F>(&self, buf: &mut String, sink: F)
    where
        F: FnMut(&'static str, &str),
    {
        write_properties(&self.css_properties(), buf, sink);
    }

    /// Largest absolute difference across all fields.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        [
            self.pointer_x - other.pointer_x,
            self.pointer_y - other.pointer_y,
            self.background_x - other.background_x,
            self.background_y - other.background_y,
            self.pointer_from_center - other.pointer_from_center,
            self.pointer_from_top - other.pointer_from_top,
            self.pointer_from_left - other.pointer_from_left,
            self.rotate_x - other.rotate_x,
            self.rotate_y - other.rotate_y,
        ]
        .iter()
        .fold(0.0_f64, |acc, d| acc.max(d.abs()))
    }
}

/// Format `props` one at a time into `buf` and hand each to `sink`.
///
/// The buffer is cleared before each property, so one long-lived `String`
/// serves every write once it has grown to the longest value.
pub fn write_properties<F>(props: &[CssProperty], buf: &mut String, mut sink: F)
where
    F: FnMut(&'static str, &str),
{
    for &(name, value, unit) in props {
        buf.clear();
        // writing into a String cannot fail
        let _ = write!(buf, "{}{}", value, unit);
        sink(name, buf.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_properties_carry_units() {
        let p = VisualParameterSet::compute(DVec2::new(0.0, 0.0), Dimensions::new(200.0, 200.0))
            .unwrap();
        let mut buf = String::new();
        let mut props = Vec::new();
        p.write_css(&mut buf, |name, value| props.push((name, value.to_string())));
        assert_eq!(props.len(), 9);
        assert_eq!(props[0], ("--pointer-x", "0%".to_string()));
        assert_eq!(props[2], ("--background-x", "35%".to_string()));
        assert_eq!(props[4], ("--pointer-from-center", "1".to_string()));
        assert_eq!(props[7], ("--rotate-x", "10deg".to_string()));
        assert_eq!(props[8], ("--rotate-y", "-12.5deg".to_string()));
    }

    #[test]
    fn css_buffer_is_reused_between_writes() {
        let dims = Dimensions::new(997.0, 1013.0);
        let mut buf = String::with_capacity(32);
        let ptr = buf.as_ptr();
        for x in [0.0, 123.456, 997.0] {
            let p = VisualParameterSet::compute(DVec2::new(x, 7.0), dims).unwrap();
            p.write_css(&mut buf, |_, value| assert!(!value.is_empty()));
        }
        // no value outgrew the initial capacity, so the buffer never moved
        assert_eq!(buf.as_ptr(), ptr);
    }

    #[test]
    fn unusable_dimensions_yield_nothing() {
        let at = DVec2::new(10.0, 10.0);
        assert!(VisualParameterSet::compute(at, Dimensions::new(0.0, 100.0)).is_none());
        assert!(VisualParameterSet::compute(at, Dimensions::new(100.0, -1.0)).is_none());
        assert!(VisualParameterSet::compute(at, Dimensions::new(f64::NAN, 100.0)).is_none());
    }
}
