//! Pointer tilt engine: turns pointer and orientation input for one card into
//! a stream of [`VisualParameterSet`]s, with a smooth presentation sweep on
//! mount and a smooth return to center when the pointer leaves.
//!
//! The engine owns its surface and its frame scheduler. Settle animations are
//! driven by frame callbacks that hold only a weak reference back to the
//! engine, so dropping or unmounting the engine silences them.

use crate::config::TiltConfig;
use crate::constants::{INITIAL_DURATION_MS, INITIAL_X_OFFSET, INITIAL_Y_OFFSET, SMOOTH_DURATION_MS};
use crate::math::{adjust, clamp, ease_in_out_cubic};
use crate::orientation::{OrientationPermission, OrientationReading};
use crate::params::{Dimensions, VisualParameterSet};
use crate::scheduler::{FrameId, FrameScheduler};
use crate::surface::CardSurface;
use glam::DVec2;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

// longest formatted value is well under this ("-12.345deg")
const CSS_BUF_CAPACITY: usize = 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TiltState {
    /// Resting at center, pointer elsewhere.
    Idle,
    /// Pointer over the card.
    Active,
    /// A settle animation is moving the card back to center.
    Settling,
}

#[derive(Clone, Copy, Debug)]
struct Settle {
    frame: FrameId,
    generation: u64,
    from: DVec2,
    to: DVec2,
    start_ms: f64,
    duration_ms: f64,
}

struct Inner<S, F> {
    config: TiltConfig,
    scheduler: F,
    surface: RefCell<Option<S>>,
    state: Cell<TiltState>,
    settle: Cell<Option<Settle>>,
    // bumped on every settle start/cancel; frames from older generations are ignored
    generation: Cell<u64>,
    last: Cell<Option<VisualParameterSet>>,
    orientation_attached: Cell<bool>,
    // formatting scratch shared by every parameter write
    css_buf: RefCell<String>,
}

pub struct TiltEngine<S, F>
where
    S: CardSurface + 'static,
    F: FrameScheduler + 'static,
{
    inner: Rc<Inner<S, F>>,
}

impl<S, F> TiltEngine<S, F>
where
    S: CardSurface + 'static,
    F: FrameScheduler + 'static,
{
    pub fn new(surface: S, scheduler: F, config: TiltConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                config,
                scheduler,
                surface: RefCell::new(Some(surface)),
                state: Cell::new(TiltState::Idle),
                settle: Cell::new(None),
                generation: Cell::new(0),
                last: Cell::new(None),
                orientation_attached: Cell::new(false),
                css_buf: RefCell::new(String::with_capacity(CSS_BUF_CAPACITY)),
            }),
        }
    }

    pub fn config(&self) -> &TiltConfig {
        &self.inner.config
    }

    pub fn state(&self) -> TiltState {
        self.inner.state.get()
    }

    /// Most recently applied parameters, if any.
    pub fn last_parameters(&self) -> Option<VisualParameterSet> {
        self.inner.last.get()
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.surface.borrow().is_some()
    }

    pub fn is_settling(&self) -> bool {
        self.inner.settle.get().is_some()
    }

    pub fn orientation_attached(&self) -> bool {
        self.inner.orientation_attached.get()
    }

    /// Borrow the surface, unless it has been released by [`unmount`](Self::unmount).
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        self.inner.surface.borrow().as_ref().map(f)
    }

    /// Apply the initial parameters and start the presentation sweep toward
    /// center. Without an explicit offset the sweep starts near the top-right
    /// corner.
    pub fn on_mount(&self, initial: Option<DVec2>) -> Option<VisualParameterSet> {
        if !self.inner.config.enable_tilt {
            return None;
        }
        let dims = self.inner.dimensions()?;
        let start = initial.unwrap_or_else(|| {
            DVec2::new(dims.width - INITIAL_X_OFFSET, INITIAL_Y_OFFSET)
        });
        let params = self.inner.apply(start, dims);
        Inner::start_settle(&self.inner, start, INITIAL_DURATION_MS);
        params
    }

    pub fn on_pointer_enter(&self) {
        if !self.inner.ready() {
            return;
        }
        self.inner.cancel_settle();
        if let Some(surface) = self.inner.surface.borrow_mut().as_mut() {
            surface.set_active(true);
        }
        self.inner.transition(TiltState::Active);
    }

    pub fn on_pointer_move(&self, offset_x: f64, offset_y: f64) -> Option<VisualParameterSet> {
        if !self.inner.ready() {
            return None;
        }
        let dims = self.inner.dimensions()?;
        self.inner.apply(DVec2::new(offset_x, offset_y), dims)
    }

    pub fn on_pointer_leave(&self, last_x: f64, last_y: f64) {
        if !self.inner.ready() {
            return;
        }
        if let Some(surface) = self.inner.surface.borrow_mut().as_mut() {
            surface.set_active(false);
        }
        Inner::start_settle(&self.inner, DVec2::new(last_x, last_y), SMOOTH_DURATION_MS);
    }

    /// Record the outcome of the platform permission flow. Orientation samples
    /// are ignored until this returns `true`.
    pub fn attach_orientation(&self, permission: OrientationPermission) -> bool {
        if !self.inner.ready() || !self.inner.config.enable_orientation_tilt {
            return false;
        }
        match permission.into_result() {
            Ok(()) => {
                self.inner.orientation_attached.set(true);
                log::debug!("[tilt] orientation input attached");
                true
            }
            Err(e) => {
                log::debug!("[tilt] orientation tilt unavailable: {}", e);
                false
            }
        }
    }

    pub fn detach_orientation(&self) {
        self.inner.orientation_attached.set(false);
    }

    pub fn on_device_orientation(&self, reading: OrientationReading) -> Option<VisualParameterSet> {
        if !self.inner.ready() || !self.inner.orientation_attached.get() {
            return None;
        }
        let dims = self.inner.dimensions()?;
        let offset = reading.to_offset(dims, self.inner.config.orientation_sensitivity)?;
        self.inner.apply(offset, dims)
    }

    /// Cancel any animation, drop orientation input and release the surface.
    /// The engine is inert afterwards.
    pub fn unmount(&self) {
        self.inner.cancel_settle();
        self.inner.orientation_attached.set(false);
        self.inner.surface.borrow_mut().take();
        self.inner.transition(TiltState::Idle);
    }
}

impl<S, F> Drop for TiltEngine<S, F>
where
    S: CardSurface + 'static,
    F: FrameScheduler + 'static,
{
    fn drop(&mut self) {
        self.inner.cancel_settle();
    }
}

impl<S, F> Inner<S, F>
where
    S: CardSurface + 'static,
    F: FrameScheduler + 'static,
{
    fn ready(&self) -> bool {
        self.config.enable_tilt && self.surface.borrow().is_some()
    }

    fn dimensions(&self) -> Option<Dimensions> {
        self.surface
            .borrow()
            .as_ref()?
            .dimensions()
            .filter(Dimensions::is_usable)
    }

    fn transition(&self, next: TiltState) {
        let prev = self.state.replace(next);
        if prev != next {
            log::trace!("[tilt] {:?} -> {:?}", prev, next);
        }
    }

    fn apply(&self, offset: DVec2, dims: Dimensions) -> Option<VisualParameterSet> {
        let params = VisualParameterSet::compute(offset, dims)?;
        let mut surface = self.surface.borrow_mut();
        let surface = surface.as_mut()?;
        let mut buf = self.css_buf.borrow_mut();
        params.write_css(&mut *buf, |name, value| surface.set_parameter(name, value));
        self.last.set(Some(params));
        Some(params)
    }

    fn cancel_settle(&self) {
        self.generation.set(self.generation.get() + 1);
        if let Some(settle) = self.settle.take() {
            self.scheduler.cancel_frame(settle.frame);
            log::debug!("[tilt] settle cancelled");
        }
    }

    fn start_settle(this: &Rc<Self>, from: DVec2, duration_ms: f64) {
        this.cancel_settle();
        let Some(dims) = this.dimensions() else {
            this.transition(TiltState::Idle);
            return;
        };
        let generation = this.generation.get();
        let frame = Self::request_settle_frame(this, generation);
        this.settle.set(Some(Settle {
            frame,
            generation,
            from,
            to: dims.center(),
            start_ms: this.scheduler.now_ms(),
            duration_ms,
        }));
        this.transition(TiltState::Settling);
        log::debug!(
            "[tilt] settle from ({:.1},{:.1}) over {}ms",
            from.x,
            from.y,
            duration_ms
        );
    }

    fn request_settle_frame(this: &Rc<Self>, generation: u64) -> FrameId {
        let weak: Weak<Self> = Rc::downgrade(this);
        this.scheduler.request_frame(Box::new(move |now_ms| {
            if let Some(inner) = weak.upgrade() {
                Self::settle_frame(&inner, generation, now_ms);
            }
        }))
    }

    fn settle_frame(this: &Rc<Self>, generation: u64, now_ms: f64) {
        let Some(mut settle) = this.settle.get() else {
            return;
        };
        if settle.generation != generation || this.generation.get() != generation {
            return;
        }
        let Some(dims) = this.dimensions() else {
            this.settle.set(None);
            this.transition(TiltState::Idle);
            return;
        };

        let progress = clamp((now_ms - settle.start_ms) / settle.duration_ms, 0.0, 1.0);
        let eased = ease_in_out_cubic(progress);
        let at = DVec2::new(
            adjust(eased, 0.0, 1.0, settle.from.x, settle.to.x),
            adjust(eased, 0.0, 1.0, settle.from.y, settle.to.y),
        );
        this.apply(at, dims);

        if progress < 1.0 {
            settle.frame = Self::request_settle_frame(this, generation);
            this.settle.set(Some(settle));
        } else {
            this.settle.set(None);
            this.transition(TiltState::Idle);
            log::debug!("[tilt] settle finished");
        }
    }
}
