//! Next-frame callback sources.
//!
//! The settle animation advances one step per frame callback. On the web the
//! callbacks come from `requestAnimationFrame`; [`ManualScheduler`] is a
//! deterministic clock that runs pending callbacks when it is advanced.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Identifies a scheduled frame so it can be cancelled.
pub type FrameId = u64;

/// Callback receiving the frame timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

pub trait FrameScheduler {
    /// Run `callback` once on the next frame.
    fn request_frame(&self, callback: FrameCallback) -> FrameId;
    /// Drop a pending callback. Unknown or already-run ids are ignored.
    fn cancel_frame(&self, id: FrameId);
    /// Current time on the same clock as the frame timestamps.
    fn now_ms(&self) -> f64;
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for Rc<T> {
    fn request_frame(&self, callback: FrameCallback) -> FrameId {
        (**self).request_frame(callback)
    }
    fn cancel_frame(&self, id: FrameId) {
        (**self).cancel_frame(id)
    }
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}

/// Deterministic frame source driven by explicit [`advance`](Self::advance)
/// calls.
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<f64>,
    next_id: Cell<FrameId>,
    pending: RefCell<Vec<(FrameId, FrameCallback)>>,
    frames_run: Cell<usize>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `dt_ms` and run every callback that was
    /// pending before the call. Callbacks requested while running wait for the
    /// next advance. Returns how many callbacks ran.
    pub fn advance(&self, dt_ms: f64) -> usize {
        self.now.set(self.now.get() + dt_ms);
        let due = std::mem::take(&mut *self.pending.borrow_mut());
        let ran = due.len();
        let now = self.now.get();
        for (_, callback) in due {
            callback(now);
        }
        self.frames_run.set(self.frames_run.get() + ran);
        ran
    }

    /// Advance in `step_ms` increments until nothing is pending or
    /// `max_frames` steps have elapsed. Returns the number of steps taken.
    pub fn run_until_idle(&self, step_ms: f64, max_frames: usize) -> usize {
        let mut steps = 0;
        while self.has_pending() && steps < max_frames {
            self.advance(step_ms);
            steps += 1;
        }
        steps
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.borrow().is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Total callbacks executed since creation.
    pub fn frames_run(&self) -> usize {
        self.frames_run.get()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameId {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.pending.borrow_mut().push((id, callback));
        id
    }

    fn cancel_frame(&self, id: FrameId) {
        self.pending.borrow_mut().retain(|(pending, _)| *pending != id);
    }

    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}
