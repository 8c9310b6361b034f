// Host-side tests for per-element setting parsing.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod attrs {
    include!("../src/attrs.rs");
}

use attrs::*;
use std::collections::HashMap;
use tilt_core::{SpeedRange, TiltConfig, TiltError, TypewriterConfig};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |k| map.get(k).cloned()
}

#[test]
fn sentences_split_and_trim() {
    assert_eq!(
        split_sentences(" Software Engineer | Rust ||  Open source ", '|'),
        vec!["Software Engineer", "Rust", "Open source"]
    );
    assert!(split_sentences("  ", '|').is_empty());
}

#[test]
fn typewriter_defaults_without_attributes() {
    assert_eq!(
        typewriter_config(lookup(&[])).unwrap(),
        TypewriterConfig::default()
    );
}

#[test]
fn typewriter_attributes_override_defaults() {
    let cfg = typewriter_config(lookup(&[
        ("typing-speed", "75"),
        ("deleting-speed", "20"),
        ("pause", "1500"),
        ("initial-delay", "300"),
        ("variable-speed", "40..90"),
        ("loop", "false"),
        ("reverse", "yes"),
        ("hide-cursor", ""),
        ("colors", "#fff, #0ff"),
    ]))
    .unwrap();
    assert_eq!(cfg.typing_speed_ms, 75.0);
    assert_eq!(cfg.deleting_speed_ms, 20.0);
    assert_eq!(cfg.pause_ms, 1500.0);
    assert_eq!(cfg.initial_delay_ms, 300.0);
    assert_eq!(
        cfg.variable_speed,
        Some(SpeedRange {
            min: 40.0,
            max: 90.0
        })
    );
    assert!(!cfg.looping);
    assert!(cfg.reverse);
    assert!(cfg.hide_cursor_while_typing);
    assert_eq!(cfg.text_colors, vec!["#fff", "#0ff"]);
}

#[test]
fn dash_separated_speed_range() {
    let cfg = typewriter_config(lookup(&[("variable-speed", "10-20")])).unwrap();
    assert_eq!(
        cfg.variable_speed,
        Some(SpeedRange {
            min: 10.0,
            max: 20.0
        })
    );
}

#[test]
fn bad_typewriter_values_name_the_key() {
    let err = typewriter_config(lookup(&[("pause", "-5")])).unwrap_err();
    assert_eq!(
        err,
        TiltError::InvalidAttribute {
            key: "pause".into(),
            value: "-5".into()
        }
    );
    let err = typewriter_config(lookup(&[("variable-speed", "fast")])).unwrap_err();
    assert!(err.to_string().contains("variable-speed"));
}

#[test]
fn magnetic_strength_parsing() {
    assert_eq!(magnetic_strength("").unwrap(), None);
    assert_eq!(magnetic_strength(" 0.4 ").unwrap(), Some(0.4));
    assert!(magnetic_strength("strong").is_err());
    assert!(magnetic_strength("inf").is_err());
}

#[test]
fn card_config_reads_data_attributes() {
    // same lookup shape the web front-end feeds from `data-*`
    let cfg = TiltConfig::from_lookup(lookup(&[("mobile-tilt", "true"), ("tilt-sensitivity", "8")]))
        .unwrap();
    assert!(cfg.enable_tilt);
    assert!(cfg.enable_orientation_tilt);
    assert_eq!(cfg.orientation_sensitivity, 8.0);
}

#[test]
fn start_on_visible_is_opt_in() {
    assert!(!typewriter_config(lookup(&[])).unwrap().start_on_visible);
    let cfg = typewriter_config(lookup(&[("start-on-visible", "")])).unwrap();
    assert!(cfg.start_on_visible);
    let cfg = typewriter_config(lookup(&[("start-on-visible", "false")])).unwrap();
    assert!(!cfg.start_on_visible);
    assert!(typewriter_config(lookup(&[("start-on-visible", "later")])).is_err());
}

#[test]
fn spotlight_defaults_without_attributes() {
    let cfg = spotlight_config(lookup(&[])).unwrap();
    assert_eq!(cfg.radius, 300.0);
    assert_eq!(cfg.glow_color, "132, 0, 255");
}

#[test]
fn spotlight_attributes_are_normalised() {
    let cfg = spotlight_config(lookup(&[("spotlight-radius", " 420 "), ("glow-color", "0,255 , 12")]))
        .unwrap();
    assert_eq!(cfg.radius, 420.0);
    assert_eq!(cfg.glow_color, "0, 255, 12");
}

#[test]
fn bad_spotlight_attributes_are_rejected() {
    assert!(spotlight_config(lookup(&[("glow-color", "0, 256, 0")])).is_err());
    assert!(spotlight_config(lookup(&[("glow-color", "red")])).is_err());
    assert!(spotlight_config(lookup(&[("glow-color", "1, 2")])).is_err());
    assert_eq!(
        spotlight_config(lookup(&[("spotlight-radius", "0")])).unwrap_err(),
        TiltError::InvalidSpotlightRadius(0.0)
    );
    let err = spotlight_config(lookup(&[("spotlight-radius", "wide")])).unwrap_err();
    assert!(err.to_string().contains("spotlight-radius"));
}
