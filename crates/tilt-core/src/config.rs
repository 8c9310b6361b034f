//! Construction-time settings for the tilt engine.

use crate::constants::DEFAULT_ORIENTATION_SENSITIVITY;
use crate::error::{Result, TiltError};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltConfig {
    /// Master switch; a disabled engine ignores every call.
    pub enable_tilt: bool,
    /// Opt-in alternate input for devices without pointer events.
    pub enable_orientation_tilt: bool,
    /// Pixels of offset per degree of device tilt.
    pub orientation_sensitivity: f64,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            enable_tilt: true,
            enable_orientation_tilt: false,
            orientation_sensitivity: DEFAULT_ORIENTATION_SENSITIVITY,
        }
    }
}

impl TiltConfig {
    pub fn validated(self) -> Result<Self> {
        let s = self.orientation_sensitivity;
        if !s.is_finite() || s <= 0.0 {
            return Err(TiltError::InvalidSensitivity(s));
        }
        Ok(self)
    }

    /// Build a config from string settings (e.g. HTML data attributes).
    ///
    /// Missing keys keep their defaults; malformed ones are reported.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = lookup("tilt") {
            cfg.enable_tilt = parse_flag("tilt", &v)?;
        }
        if let Some(v) = lookup("mobile-tilt") {
            cfg.enable_orientation_tilt = parse_flag("mobile-tilt", &v)?;
        }
        if let Some(v) = lookup("tilt-sensitivity") {
            cfg.orientation_sensitivity =
                v.trim().parse().map_err(|_| TiltError::InvalidAttribute {
                    key: "tilt-sensitivity".into(),
                    value: v.clone(),
                })?;
        }
        cfg.validated()
    }
}

/// Accepts the boolean spellings HTML authors tend to use. An empty value
/// (bare attribute) counts as true.
pub fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "1" | "on" | "yes" => Ok(true),
        "false" | "0" | "off" | "no" => Ok(false),
        _ => Err(TiltError::InvalidAttribute {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}
