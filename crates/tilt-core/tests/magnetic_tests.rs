// Magnetic hover follow and spring return.

use tilt_core::{MagneticConfig, MagneticHover, MagneticTransform, PointerKind, TiltError, Vec2};

#[test]
fn mouse_pulls_element_by_strength() {
    let mut m = MagneticHover::default();
    assert!(m.on_pointer_move(PointerKind::Mouse, Vec2::new(40.0, -20.0)));
    let t = m.transform();
    assert_eq!(t.x, 10.0);
    assert_eq!(t.y, -5.0);
    assert!((t.rotate_deg - 0.1).abs() < 1e-6);
}

#[test]
fn touch_is_ignored() {
    let mut m = MagneticHover::default();
    assert!(!m.on_pointer_move(PointerKind::Touch, Vec2::new(40.0, 40.0)));
    assert_eq!(m.transform().x, 0.0);
    assert_eq!(PointerKind::from_dom("touch"), PointerKind::Touch);
    assert_eq!(PointerKind::from_dom("pen"), PointerKind::Pen);
}

#[test]
fn leave_springs_back_to_rest() {
    let mut m = MagneticHover::default();
    m.on_pointer_move(PointerKind::Pen, Vec2::new(100.0, 100.0));
    m.on_pointer_leave();
    assert!(m.is_returning());

    let mut frames = 0;
    while m.step(1.0 / 60.0) {
        frames += 1;
        assert!(frames < 600, "spring never settled");
    }
    assert_eq!(m.transform(), MagneticTransform::default());
    assert!(!m.is_returning());
}

#[test]
fn move_during_return_cancels_spring() {
    let mut m = MagneticHover::default();
    m.on_pointer_move(PointerKind::Mouse, Vec2::new(80.0, 0.0));
    m.on_pointer_leave();
    m.step(1.0 / 60.0);
    m.on_pointer_move(PointerKind::Mouse, Vec2::new(8.0, 0.0));
    assert!(!m.is_returning());
    assert!(!m.step(1.0 / 60.0));
    assert_eq!(m.transform().x, 2.0);
}

#[test]
fn step_without_leave_does_nothing() {
    let mut m = MagneticHover::default();
    m.on_pointer_move(PointerKind::Mouse, Vec2::new(8.0, 8.0));
    assert!(!m.step(0.5));
    assert_eq!(m.transform().x, 2.0);
}

#[test]
fn css_transform_formatting() {
    let mut m = MagneticHover::new(MagneticConfig::with_strength(0.5).unwrap());
    m.on_pointer_move(PointerKind::Mouse, Vec2::new(10.0, 0.0));
    assert_eq!(
        m.transform().to_css(),
        "translate(5.000px, 0.000px) rotate(0.100deg)"
    );
}

#[test]
fn non_finite_strength_is_rejected() {
    assert_eq!(
        MagneticConfig::with_strength(f32::NAN).unwrap_err().to_string(),
        TiltError::InvalidStrength(f32::NAN).to_string()
    );
}
