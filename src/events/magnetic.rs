use crate::attrs;
use crate::constants::MAGNETIC_STRENGTH_ATTR;
use crate::dom;
use crate::scheduler::RafScheduler;
use anyhow::anyhow;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tilt_core::{FrameId, FrameScheduler, MagneticConfig, MagneticHover, PointerKind, Vec2};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct MagneticState {
    el: web::HtmlElement,
    hover: RefCell<MagneticHover>,
    frame: Cell<Option<FrameId>>,
    sched: RafScheduler,
}

impl MagneticState {
    fn render(&self) {
        let css = self.hover.borrow().transform().to_css();
        _ = self.el.style().set_property("transform", &css);
    }

    fn cancel_return(&self) {
        if let Some(id) = self.frame.take() {
            self.sched.cancel_frame(id);
        }
    }
}

pub struct MagneticBinding {
    state: Rc<MagneticState>,
    on_move: Closure<dyn FnMut(web::PointerEvent)>,
    on_leave: Closure<dyn FnMut(web::PointerEvent)>,
}

impl MagneticBinding {
    pub fn unmount(self) {
        dom::remove_listener(&self.state.el, "pointermove", &self.on_move);
        dom::remove_listener(&self.state.el, "pointerleave", &self.on_leave);
        self.state.cancel_return();
        _ = self.state.el.style().remove_property("transform");
    }
}

fn config_for(el: &web::Element) -> MagneticConfig {
    let raw = el.get_attribute(MAGNETIC_STRENGTH_ATTR).unwrap_or_default();
    match attrs::magnetic_strength(&raw).and_then(|s| match s {
        Some(s) => MagneticConfig::with_strength(s),
        None => Ok(MagneticConfig::default()),
    }) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("[magnetic] {}; using defaults", e);
            MagneticConfig::default()
        }
    }
}

fn schedule_return(state: &Rc<MagneticState>, last_ms: f64) {
    let next = state.clone();
    let id = state.sched.request_frame(Box::new(move |now_ms| {
        next.frame.set(None);
        let dt = ((now_ms - last_ms) / 1000.0) as f32;
        let more = next.hover.borrow_mut().step(dt);
        next.render();
        if more {
            schedule_return(&next, now_ms);
        }
    }));
    state.frame.set(Some(id));
}

pub fn bind_magnetic(el: web::Element) -> anyhow::Result<MagneticBinding> {
    let config = config_for(&el);
    let el: web::HtmlElement = el
        .dyn_into()
        .map_err(|_| anyhow!("magnetic target is not an HTML element"))?;
    let state = Rc::new(MagneticState {
        el,
        hover: RefCell::new(MagneticHover::new(config)),
        frame: Cell::new(None),
        sched: RafScheduler::default(),
    });

    let s = state.clone();
    let on_move = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let rect = s.el.get_bounding_client_rect();
        let from_center = Vec2::new(
            (ev.client_x() as f64 - (rect.left() + rect.width() / 2.0)) as f32,
            (ev.client_y() as f64 - (rect.top() + rect.height() / 2.0)) as f32,
        );
        let kind = PointerKind::from_dom(&ev.pointer_type());
        if s.hover.borrow_mut().on_pointer_move(kind, from_center) {
            s.cancel_return();
            s.render();
        }
    }) as Box<dyn FnMut(_)>);

    let s = state.clone();
    let on_leave = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        s.hover.borrow_mut().on_pointer_leave();
        s.cancel_return();
        schedule_return(&s, s.sched.now_ms());
    }) as Box<dyn FnMut(_)>);

    dom::add_listener(&state.el, "pointermove", &on_move);
    dom::add_listener(&state.el, "pointerleave", &on_leave);

    Ok(MagneticBinding {
        state,
        on_move,
        on_leave,
    })
}
