// Engine lifecycle tests driven by the deterministic frame scheduler.

use std::cell::RefCell;
use std::rc::Rc;
use tilt_core::{
    DVec2, Dimensions, ManualScheduler, OrientationPermission, OrientationReading,
    RecordingSurface, TiltConfig, TiltEngine, TiltState, VisualParameterSet,
};

const FRAME_MS: f64 = 1000.0 / 60.0;

type Engine = TiltEngine<Rc<RefCell<RecordingSurface>>, Rc<ManualScheduler>>;

struct Rig {
    surface: Rc<RefCell<RecordingSurface>>,
    sched: Rc<ManualScheduler>,
    engine: Engine,
}

fn rig_with(config: TiltConfig, w: f64, h: f64) -> Rig {
    let surface = Rc::new(RefCell::new(RecordingSurface::new(w, h)));
    let sched = Rc::new(ManualScheduler::new());
    let engine = TiltEngine::new(surface.clone(), sched.clone(), config);
    Rig {
        surface,
        sched,
        engine,
    }
}

fn rig() -> Rig {
    rig_with(TiltConfig::default(), 300.0, 400.0)
}

fn center(w: f64, h: f64) -> VisualParameterSet {
    VisualParameterSet::centered(Dimensions::new(w, h)).unwrap()
}

#[test]
fn starts_idle_and_mounted() {
    let r = rig();
    assert_eq!(r.engine.state(), TiltState::Idle);
    assert!(r.engine.is_mounted());
    assert!(r.engine.last_parameters().is_none());
}

#[test]
fn mount_applies_initial_offset_then_sweeps_to_center() {
    let r = rig();
    let first = r.engine.on_mount(None).unwrap();
    // default start is (width - 70, 60)
    let expected =
        VisualParameterSet::compute(DVec2::new(230.0, 60.0), Dimensions::new(300.0, 400.0))
            .unwrap();
    assert_eq!(first, expected);
    assert_eq!(r.engine.state(), TiltState::Settling);
    assert_eq!(r.surface.borrow().get("--rotate-x"), Some("-5.333deg"));

    let frames = r.sched.run_until_idle(FRAME_MS, 1000);
    // 1500ms at 60fps
    assert!((89..=92).contains(&frames), "frames={}", frames);
    assert_eq!(r.engine.state(), TiltState::Idle);
    let last = r.engine.last_parameters().unwrap();
    assert!(last.max_abs_diff(&center(300.0, 400.0)) <= 0.001);
}

#[test]
fn mount_with_explicit_offset() {
    let r = rig();
    let first = r.engine.on_mount(Some(DVec2::new(0.0, 0.0))).unwrap();
    assert_eq!(first.rotate_x, 10.0);
    assert_eq!(first.rotate_y, -12.5);
}

#[test]
fn sweep_moves_monotonically_toward_center() {
    let r = rig();
    r.engine.on_mount(Some(DVec2::new(0.0, 0.0)));
    let mut prev = r.engine.last_parameters().unwrap().pointer_from_center;
    while r.sched.has_pending() {
        r.sched.advance(FRAME_MS);
        let now = r.engine.last_parameters().unwrap().pointer_from_center;
        assert!(now <= prev + 1e-9, "{} then {}", prev, now);
        prev = now;
    }
    assert_eq!(prev, 0.0);
}

#[test]
fn enter_move_leave_cycle() {
    let r = rig();
    r.engine.on_pointer_enter();
    assert_eq!(r.engine.state(), TiltState::Active);
    assert!(r.surface.borrow().active);

    let p = r.engine.on_pointer_move(150.0, 200.0).unwrap();
    assert_eq!(p.rotate_x, 0.0);
    assert_eq!(r.engine.state(), TiltState::Active);
    assert_eq!(r.surface.borrow().get_number("--pointer-x"), Some(50.0));

    r.engine.on_pointer_move(300.0, 0.0);
    r.engine.on_pointer_leave(300.0, 0.0);
    assert!(!r.surface.borrow().active);
    assert_eq!(r.engine.state(), TiltState::Settling);

    let frames = r.sched.run_until_idle(FRAME_MS, 1000);
    // 600ms at 60fps
    assert!((35..=38).contains(&frames), "frames={}", frames);
    assert_eq!(r.engine.state(), TiltState::Idle);
    let last = r.engine.last_parameters().unwrap();
    assert!(last.max_abs_diff(&center(300.0, 400.0)) <= 0.001);
}

#[test]
fn move_writes_every_parameter() {
    let r = rig();
    r.engine.on_pointer_move(10.0, 10.0);
    let s = r.surface.borrow();
    assert_eq!(s.writes, 9);
    for name in [
        "--pointer-x",
        "--pointer-y",
        "--background-x",
        "--background-y",
        "--pointer-from-center",
        "--pointer-from-top",
        "--pointer-from-left",
        "--rotate-x",
        "--rotate-y",
    ] {
        assert!(s.get(name).is_some(), "missing {}", name);
    }
}

#[test]
fn reentering_cancels_the_settle() {
    let r = rig();
    r.engine.on_pointer_enter();
    r.engine.on_pointer_leave(0.0, 0.0);
    r.sched.advance(FRAME_MS);
    r.sched.advance(FRAME_MS);
    let frames_before = r.sched.frames_run();
    let writes_before = r.surface.borrow().writes;

    r.engine.on_pointer_enter();
    assert_eq!(r.engine.state(), TiltState::Active);
    assert!(!r.engine.is_settling());
    assert!(!r.sched.has_pending());

    for _ in 0..60 {
        r.sched.advance(FRAME_MS);
    }
    assert_eq!(r.sched.frames_run(), frames_before);
    assert_eq!(r.surface.borrow().writes, writes_before);
}

#[test]
fn new_settle_replaces_the_previous_one() {
    let r = rig();
    r.engine.on_mount(None);
    r.sched.advance(FRAME_MS);
    r.engine.on_pointer_leave(0.0, 0.0);
    // only one driver may be scheduled at a time
    assert_eq!(r.sched.pending_count(), 1);
    r.sched.run_until_idle(FRAME_MS, 1000);
    assert_eq!(r.engine.state(), TiltState::Idle);
}

#[test]
fn unmount_mid_settle_stops_writes() {
    let r = rig();
    r.engine.on_pointer_leave(0.0, 0.0);
    r.sched.advance(FRAME_MS);
    r.sched.advance(FRAME_MS);
    let writes = r.surface.borrow().writes;
    assert!(writes > 0);

    r.engine.unmount();
    assert!(!r.engine.is_mounted());
    assert_eq!(r.engine.state(), TiltState::Idle);
    for _ in 0..60 {
        r.sched.advance(FRAME_MS);
    }
    r.engine.on_pointer_enter();
    assert!(r.engine.on_pointer_move(10.0, 10.0).is_none());
    r.engine.on_pointer_leave(10.0, 10.0);
    assert_eq!(r.surface.borrow().writes, writes);
    assert_eq!(r.engine.state(), TiltState::Idle);
}

#[test]
fn dropping_the_engine_silences_pending_frames() {
    let r = rig();
    r.engine.on_pointer_leave(0.0, 0.0);
    let writes = r.surface.borrow().writes;
    let Rig { surface, sched, engine } = r;
    drop(engine);
    sched.advance(FRAME_MS);
    assert_eq!(surface.borrow().writes, writes);
}

#[test]
fn zero_dimensions_make_every_call_a_no_op() {
    let r = rig_with(TiltConfig::default(), 0.0, 0.0);
    assert!(r.engine.on_mount(None).is_none());
    assert!(r.engine.on_pointer_move(5.0, 5.0).is_none());
    r.engine.on_pointer_leave(5.0, 5.0);
    assert!(!r.sched.has_pending());
    assert_eq!(r.surface.borrow().writes, 0);
    assert_eq!(r.engine.state(), TiltState::Idle);
}

#[test]
fn surface_losing_its_size_ends_the_settle() {
    let r = rig();
    r.engine.on_pointer_leave(0.0, 0.0);
    r.sched.advance(FRAME_MS);
    let writes = r.surface.borrow().writes;
    r.surface.borrow_mut().dims = None;
    r.sched.advance(FRAME_MS);
    assert_eq!(r.surface.borrow().writes, writes);
    assert_eq!(r.engine.state(), TiltState::Idle);
    assert!(!r.sched.has_pending());
}

#[test]
fn disabled_tilt_ignores_input() {
    let cfg = TiltConfig {
        enable_tilt: false,
        ..TiltConfig::default()
    };
    let r = rig_with(cfg, 300.0, 300.0);
    assert!(r.engine.on_mount(None).is_none());
    r.engine.on_pointer_enter();
    assert!(r.engine.on_pointer_move(1.0, 1.0).is_none());
    assert!(!r.surface.borrow().active);
    assert_eq!(r.surface.borrow().writes, 0);
    assert_eq!(r.engine.state(), TiltState::Idle);
}

fn orientation_rig() -> Rig {
    let cfg = TiltConfig {
        enable_orientation_tilt: true,
        ..TiltConfig::default()
    };
    rig_with(cfg, 300.0, 300.0)
}

#[test]
fn orientation_requires_opt_in_and_permission() {
    let r = rig_with(TiltConfig::default(), 300.0, 300.0);
    assert!(!r.engine.attach_orientation(OrientationPermission::Granted));
    assert!(r.engine.on_device_orientation(OrientationReading::new(20.0, 0.0)).is_none());

    let r = orientation_rig();
    assert!(r.engine.on_device_orientation(OrientationReading::new(20.0, 0.0)).is_none());
    assert!(!r.engine.attach_orientation(OrientationPermission::Denied("denied".into())));
    assert!(!r.engine.attach_orientation(OrientationPermission::Unsupported));
    assert!(!r.engine.orientation_attached());
    assert!(r.engine.attach_orientation(OrientationPermission::Granted));

    // beta at the hand-held offset and gamma 0 lands on center
    let p = r.engine.on_device_orientation(OrientationReading::new(20.0, 0.0)).unwrap();
    assert_eq!(p.rotate_x, 0.0);
    assert_eq!(p.rotate_y, 0.0);

    let p = r.engine.on_device_orientation(OrientationReading::new(30.0, 10.0)).unwrap();
    // x = 150 + 50, y = 150 + 50
    assert_eq!(p.pointer_x, 66.667);
    assert_eq!(p.pointer_y, 66.667);
}

#[test]
fn absent_orientation_axes_leave_parameters_alone() {
    let r = orientation_rig();
    r.engine.attach_orientation(OrientationPermission::Granted);
    let before = r.engine.on_pointer_move(40.0, 40.0).unwrap();
    let writes = r.surface.borrow().writes;

    let absent = OrientationReading {
        beta: None,
        gamma: None,
    };
    assert!(r.engine.on_device_orientation(absent).is_none());
    assert!(r
        .engine
        .on_device_orientation(OrientationReading::new(f64::NAN, f64::INFINITY))
        .is_none());
    assert_eq!(r.engine.last_parameters(), Some(before));
    assert_eq!(r.surface.borrow().writes, writes);
}

#[test]
fn unmount_detaches_orientation() {
    let r = orientation_rig();
    assert!(r.engine.attach_orientation(OrientationPermission::Granted));
    r.engine.unmount();
    assert!(!r.engine.orientation_attached());
    assert!(r.engine.on_device_orientation(OrientationReading::new(0.0, 0.0)).is_none());
}

#[test]
fn engines_are_independent() {
    let a = rig();
    let b = rig();
    a.engine.on_pointer_leave(0.0, 0.0);
    b.engine.on_pointer_enter();
    a.sched.run_until_idle(FRAME_MS, 1000);
    assert_eq!(a.engine.state(), TiltState::Idle);
    assert_eq!(b.engine.state(), TiltState::Active);
    assert_eq!(b.surface.borrow().writes, 0);
}
