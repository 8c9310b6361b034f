use crate::frames::FrameSlots;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tilt_core::{FrameCallback, FrameId, FrameScheduler};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type RafClosure = Closure<dyn FnMut(f64)>;

/// `requestAnimationFrame` as a [`FrameScheduler`].
///
/// Keeps every closure it hands to the browser, so a cancelled frame frees
/// its closure instead of leaking it.
#[derive(Clone, Default)]
pub struct RafScheduler {
    slots: Rc<RefCell<FrameSlots<RafClosure>>>,
}

fn retire(slots: &Weak<RefCell<FrameSlots<RafClosure>>>, key: FrameId) {
    let Some(slots) = slots.upgrade() else {
        return;
    };
    let finished = slots.borrow_mut().retire(key);
    drop(finished);
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameId {
        let Some(w) = web::window() else {
            return 0;
        };
        let key = self.slots.borrow_mut().next_key();
        let slots = Rc::downgrade(&self.slots);
        let mut callback = Some(callback);
        let closure = Closure::wrap(Box::new(move |timestamp: f64| {
            retire(&slots, key);
            if let Some(cb) = callback.take() {
                cb(timestamp);
            }
        }) as Box<dyn FnMut(f64)>);
        match w.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => {
                self.slots.borrow_mut().insert(key, handle, closure);
                key
            }
            Err(e) => {
                log::warn!("[raf] request failed: {:?}", e);
                0
            }
        }
    }

    fn cancel_frame(&self, id: FrameId) {
        let entry = self.slots.borrow_mut().cancel(id);
        if let (Some((handle, closure)), Some(w)) = (entry, web::window()) {
            _ = w.cancel_animation_frame(handle);
            drop(closure);
        }
    }

    fn now_ms(&self) -> f64 {
        // same clock as the rAF timestamp (performance.now)
        instant::now()
    }
}
