// Spotlight glow over a grid of cards, in viewport pixels.

use tilt_core::{DVec2, Rect, Spotlight, SpotlightConfig, SpotlightFrame};

fn section() -> Option<Rect> {
    Some(Rect::new(0.0, 0.0, 1200.0, 800.0))
}

/// Two 200x100 cards side by side with a wide gap.
fn cards() -> [Rect; 2] {
    [
        Rect::new(100.0, 100.0, 200.0, 100.0),
        Rect::new(900.0, 100.0, 200.0, 100.0),
    ]
}

fn lit(frame: SpotlightFrame) -> (DVec2, f64, Vec<tilt_core::CardGlow>) {
    match frame {
        SpotlightFrame::Lit { at, opacity, glows } => (at, opacity, glows.into_vec()),
        SpotlightFrame::Hidden => panic!("expected a lit frame"),
    }
}

#[test]
fn pointer_outside_section_hides_everything() {
    let s = Spotlight::default();
    assert_eq!(
        s.update(DVec2::new(-5.0, 10.0), section(), &cards()),
        SpotlightFrame::Hidden
    );
    // no layout for the section at all
    assert_eq!(
        s.update(DVec2::new(10.0, 10.0), None, &cards()),
        SpotlightFrame::Hidden
    );
}

#[test]
fn card_under_pointer_glows_fully() {
    let s = Spotlight::default();
    let (at, opacity, glows) = lit(s.update(DVec2::new(200.0, 150.0), section(), &cards()));
    assert_eq!(at, DVec2::new(200.0, 150.0));
    assert_eq!(opacity, 0.8);
    assert_eq!(glows[0].intensity, 1.0);
    assert_eq!(glows[0].x, 50.0);
    assert_eq!(glows[0].y, 50.0);
    // 700px from the far card's edge, well past the fade distance
    assert_eq!(glows[1].intensity, 0.0);
}

#[test]
fn glow_fades_between_proximity_and_fade_distance() {
    let s = Spotlight::default();
    // card center (200, 150), half extent 100; 287.5px away -> edge distance 187.5
    let (_, opacity, glows) = lit(s.update(DVec2::new(487.5, 150.0), section(), &cards()));
    assert_eq!(glows[0].intensity, 0.5);
    assert_eq!(opacity, 0.4);
    // relative position is not clamped to the card
    assert_eq!(glows[0].x, 193.75);
}

#[test]
fn light_goes_dark_far_from_every_card() {
    let s = Spotlight::default();
    let (_, opacity, glows) = lit(s.update(DVec2::new(600.0, 750.0), section(), &cards()));
    assert_eq!(opacity, 0.0);
    assert!(glows.iter().all(|g| g.intensity == 0.0));
}

#[test]
fn empty_grid_keeps_light_off() {
    let s = Spotlight::default();
    let (_, opacity, glows) = lit(s.update(DVec2::new(10.0, 10.0), section(), &[]));
    assert_eq!(opacity, 0.0);
    assert!(glows.is_empty());
}

#[test]
fn zero_sized_card_does_not_produce_nan() {
    let s = Spotlight::default();
    let (_, _, glows) = lit(s.update(
        DVec2::new(10.0, 10.0),
        section(),
        &[Rect::new(10.0, 10.0, 0.0, 0.0)],
    ));
    assert_eq!(glows[0].x, 0.0);
    assert_eq!(glows[0].intensity, 1.0);
}

#[test]
fn glow_properties_carry_radius() {
    let s = Spotlight::new(SpotlightConfig {
        radius: 120.0,
        ..SpotlightConfig::default()
    });
    let (_, _, glows) = lit(s.update(DVec2::new(200.0, 150.0), section(), &cards()));
    let props = glows[0].css_properties(s.config().radius);
    assert_eq!(props[0], ("--glow-x", 50.0, "%"));
    assert_eq!(props[2], ("--glow-intensity", 1.0, ""));
    assert_eq!(props[3], ("--glow-radius", 120.0, "px"));
}

#[test]
fn gradient_uses_glow_color() {
    let cfg = SpotlightConfig {
        glow_color: "0, 255, 200".into(),
        ..SpotlightConfig::default()
    };
    let g = cfg.gradient();
    assert!(g.starts_with("radial-gradient(circle, rgba(0, 255, 200, 0.15) 0%"));
    assert!(g.ends_with("transparent 70%)"));
}
