use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, Context};
use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tilt_core::{
    ManualScheduler, OrientationPermission, OrientationReading, RecordingSurface, Rect, Spotlight,
    SpotlightFrame, TiltConfig, TiltEngine, TiltState, Typewriter, TypewriterConfig,
    TypewriterEvent, VisualParameterSet,
};

const FRAME_MS: f64 = 1000.0 / 60.0;
const MAX_FRAMES: usize = 10_000;
const DEFAULT_SIZE: (f64, f64) = (320.0, 440.0);

type Engine = TiltEngine<Rc<RefCell<RecordingSurface>>, Rc<ManualScheduler>>;

fn parse_size() -> anyhow::Result<(f64, f64)> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => Ok(DEFAULT_SIZE),
        [w, h] => {
            let w: f64 = w.parse().with_context(|| format!("bad width {:?}", w))?;
            let h: f64 = h.parse().with_context(|| format!("bad height {:?}", h))?;
            if !(w > 0.0 && h > 0.0) {
                bail!("card size must be positive, got {}x{}", w, h);
            }
            Ok((w, h))
        }
        _ => bail!("usage: tilt-native [width height]"),
    }
}

fn log_params(label: &str, p: &VisualParameterSet) {
    log::info!(
        "[{}] pointer=({:>7.3}%,{:>7.3}%) bg=({:>6.3}%,{:>6.3}%) center={:.3} rot=({:>7.3},{:>7.3})",
        label,
        p.pointer_x,
        p.pointer_y,
        p.background_x,
        p.background_y,
        p.pointer_from_center,
        p.rotate_x,
        p.rotate_y
    );
}

/// Step the clock until the engine rests, logging every frame.
fn run_settle(label: &str, engine: &Engine, sched: &ManualScheduler) -> usize {
    let mut frames = 0;
    while sched.has_pending() && frames < MAX_FRAMES {
        sched.advance(FRAME_MS);
        frames += 1;
        if let Some(p) = engine.last_parameters() {
            log_params(label, &p);
        }
    }
    log::info!("[{}] settled after {} frames -> {:?}", label, frames, engine.state());
    frames
}

fn demo_card(width: f64, height: f64) -> anyhow::Result<()> {
    let config = TiltConfig {
        enable_orientation_tilt: true,
        ..TiltConfig::default()
    }
    .validated()?;
    let surface = Rc::new(RefCell::new(RecordingSurface::new(width, height)));
    let sched = Rc::new(ManualScheduler::new());
    let engine: Engine = TiltEngine::new(surface.clone(), sched.clone(), config);

    if let Some(p) = engine.on_mount(None) {
        log_params("mount", &p);
    }
    run_settle("mount", &engine, &sched);

    // diagonal pass across the card, then leave from the bottom-right corner
    engine.on_pointer_enter();
    let steps = 12;
    let end = DVec2::new(width, height);
    for i in 0..=steps {
        let at = end * (i as f64 / steps as f64);
        if let Some(p) = engine.on_pointer_move(at.x, at.y) {
            log_params("move", &p);
        }
    }
    engine.on_pointer_leave(end.x, end.y);
    run_settle("leave", &engine, &sched);

    if engine.attach_orientation(OrientationPermission::Granted) {
        for (beta, gamma) in [(20.0, 0.0), (35.0, -8.0), (5.0, 12.0)] {
            if let Some(p) = engine.on_device_orientation(OrientationReading::new(beta, gamma)) {
                log_params("orient", &p);
            }
        }
    }

    let writes = surface.borrow().writes;
    engine.unmount();
    if engine.state() != TiltState::Idle {
        bail!("engine did not come to rest after unmount");
    }
    log::info!(
        "[card] {} parameter writes across {} properties",
        writes,
        surface.borrow().values.len()
    );
    Ok(())
}

fn demo_typewriter() -> anyhow::Result<()> {
    let config = TypewriterConfig {
        looping: false,
        ..TypewriterConfig::default()
    };
    let mut tw = Typewriter::new(["Software Engineer", "Rust enjoyer"], config)?;
    let mut rng = StdRng::seed_from_u64(1);
    let mut clock_ms = 0.0;
    while let Some(delay) = tw.next_delay(&mut rng) {
        clock_ms += delay;
        match tw.tick() {
            Some(TypewriterEvent::SentenceComplete { index }) => {
                log::info!("[typewriter] {:>8.0}ms sentence {} complete", clock_ms, index)
            }
            Some(TypewriterEvent::Finished) => break,
            Some(_) => log::debug!("[typewriter] {:>8.0}ms {:?}", clock_ms, tw.text()),
            None => break,
        }
    }
    log::info!("[typewriter] finished at {:.0}ms", clock_ms);
    Ok(())
}

/// Sweep the pointer across a 3x2 grid of cards and log glow per card.
fn demo_spotlight(width: f64, height: f64) {
    let gap = 16.0;
    let cards: Vec<Rect> = (0..6)
        .map(|i| {
            let (col, row) = ((i % 3) as f64, (i / 3) as f64);
            Rect::new(col * (width + gap), row * (height + gap), width, height)
        })
        .collect();
    let section = Rect::new(0.0, 0.0, 3.0 * width + 2.0 * gap, 2.0 * height + gap);
    let spotlight = Spotlight::default();
    let steps = 8;
    for i in 0..=steps + 1 {
        // last sample lands past the section's right edge
        let at = DVec2::new(section.size.x * i as f64 / steps as f64, height / 2.0);
        match spotlight.update(at, Some(section), &cards) {
            SpotlightFrame::Hidden => log::info!("[spotlight] ({:>6.1}) outside, dark", at.x),
            SpotlightFrame::Lit { opacity, glows, .. } => {
                let levels: Vec<String> = glows
                    .iter()
                    .map(|g| format!("{:.2}", g.intensity))
                    .collect();
                log::info!(
                    "[spotlight] ({:>6.1}) light {:.2} glow [{}]",
                    at.x,
                    opacity,
                    levels.join(" ")
                );
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let (width, height) = parse_size()?;
    log::info!("card {}x{}", width, height);
    demo_card(width, height)?;
    demo_typewriter()?;
    demo_spotlight(width, height);
    Ok(())
}
