// Pure parsing of per-element settings. Kept free of web-sys so host-side
// tests can include it directly.

use tilt_core::error::{Result, TiltError};
use tilt_core::{SpeedRange, SpotlightConfig, TypewriterConfig};

/// Split a `data-typewriter` value into sentences, dropping empty entries.
pub fn split_sentences(raw: &str, separator: char) -> Vec<String> {
    raw.split(separator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_ms(key: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| TiltError::InvalidAttribute {
            key: key.to_string(),
            value: raw.to_string(),
        })
}

/// `"min..max"` or `"min-max"` in milliseconds.
fn parse_speed_range(key: &str, raw: &str) -> Result<SpeedRange> {
    let invalid = || TiltError::InvalidAttribute {
        key: key.to_string(),
        value: raw.to_string(),
    };
    let (lo, hi) = raw
        .split_once("..")
        .or_else(|| raw.split_once('-'))
        .ok_or_else(invalid)?;
    Ok(SpeedRange {
        min: parse_ms(key, lo)?,
        max: parse_ms(key, hi)?,
    })
}

/// Build a typewriter config from `typing-speed`, `deleting-speed`, `pause`,
/// `initial-delay`, `variable-speed`, `loop`, `reverse`, `hide-cursor`,
/// `start-on-visible` and `colors` (comma separated) settings.
pub fn typewriter_config<F>(lookup: F) -> Result<TypewriterConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = TypewriterConfig::default();
    if let Some(v) = lookup("typing-speed") {
        cfg.typing_speed_ms = parse_ms("typing-speed", &v)?;
    }
    if let Some(v) = lookup("deleting-speed") {
        cfg.deleting_speed_ms = parse_ms("deleting-speed", &v)?;
    }
    if let Some(v) = lookup("pause") {
        cfg.pause_ms = parse_ms("pause", &v)?;
    }
    if let Some(v) = lookup("initial-delay") {
        cfg.initial_delay_ms = parse_ms("initial-delay", &v)?;
    }
    if let Some(v) = lookup("variable-speed") {
        cfg.variable_speed = Some(parse_speed_range("variable-speed", &v)?);
    }
    if let Some(v) = lookup("loop") {
        cfg.looping = tilt_core::config::parse_flag("loop", &v)?;
    }
    if let Some(v) = lookup("reverse") {
        cfg.reverse = tilt_core::config::parse_flag("reverse", &v)?;
    }
    if let Some(v) = lookup("hide-cursor") {
        cfg.hide_cursor_while_typing = tilt_core::config::parse_flag("hide-cursor", &v)?;
    }
    if let Some(v) = lookup("start-on-visible") {
        cfg.start_on_visible = tilt_core::config::parse_flag("start-on-visible", &v)?;
    }
    if let Some(v) = lookup("colors") {
        cfg.text_colors = split_sentences(&v, ',');
    }
    Ok(cfg)
}

/// Magnetic strength from a bare `data-magnetic` attribute (empty means default).
pub fn magnetic_strength(raw: &str) -> Result<Option<f32>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| TiltError::InvalidAttribute {
            key: "magnetic".into(),
            value: raw.to_string(),
        })
}

/// `"r, g, b"` with each channel 0..=255, normalised to `"r, g, b"`.
fn parse_rgb(key: &str, raw: &str) -> Result<String> {
    let channels: Vec<u8> = raw
        .split(',')
        .map(|c| c.trim().parse::<u8>())
        .collect::<std::result::Result<_, _>>()
        .ok()
        .filter(|c: &Vec<u8>| c.len() == 3)
        .ok_or_else(|| TiltError::InvalidAttribute {
            key: key.to_string(),
            value: raw.to_string(),
        })?;
    Ok(format!("{}, {}, {}", channels[0], channels[1], channels[2]))
}

/// Spotlight settings from a section's `spotlight-radius` (px) and
/// `glow-color` (rgb triple).
pub fn spotlight_config<F>(lookup: F) -> Result<SpotlightConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = SpotlightConfig::default();
    if let Some(v) = lookup("spotlight-radius") {
        cfg.radius = v.trim().parse().map_err(|_| TiltError::InvalidAttribute {
            key: "spotlight-radius".into(),
            value: v.clone(),
        })?;
    }
    if let Some(v) = lookup("glow-color") {
        cfg.glow_color = parse_rgb("glow-color", &v)?;
    }
    cfg.validated()
}
