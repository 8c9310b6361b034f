use crate::constants::CARD_SELECTOR;
use crate::dom;
use crate::events::orientation::{self, OrientationListener};
use crate::scheduler::RafScheduler;
use crate::surface::ElementSurface;
use anyhow::anyhow;
use std::rc::Rc;
use tilt_core::{TiltConfig, TiltEngine};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type CardEngine = TiltEngine<ElementSurface, RafScheduler>;

/// One mounted profile card: its engine plus the listeners feeding it.
pub struct CardBinding {
    card: web::Element,
    engine: Rc<CardEngine>,
    on_enter: Closure<dyn FnMut(web::PointerEvent)>,
    on_move: Closure<dyn FnMut(web::PointerEvent)>,
    on_leave: Closure<dyn FnMut(web::PointerEvent)>,
    on_click: Closure<dyn FnMut(web::MouseEvent)>,
    orientation: Rc<OrientationListener>,
}

impl CardBinding {
    /// Detach every listener and stop the engine writing to the card.
    pub fn unmount(self) {
        dom::remove_listener(&self.card, "pointerenter", &self.on_enter);
        dom::remove_listener(&self.card, "pointermove", &self.on_move);
        dom::remove_listener(&self.card, "pointerleave", &self.on_leave);
        dom::remove_listener(&self.card, "click", &self.on_click);
        orientation::detach(&self.orientation);
        self.engine.unmount();
    }
}

/// Bind a `.pc-card-wrapper` element and start its presentation sweep.
pub fn bind_card(wrapper: web::Element, config: TiltConfig) -> anyhow::Result<CardBinding> {
    let card = dom::query_in(&wrapper, CARD_SELECTOR)
        .ok_or_else(|| anyhow!("card wrapper has no {} child", CARD_SELECTOR))?;
    let wrapper: web::HtmlElement = wrapper
        .dyn_into()
        .map_err(|_| anyhow!("card wrapper is not an HTML element"))?;

    let engine = Rc::new(TiltEngine::new(
        ElementSurface::new(wrapper, card.clone()),
        RafScheduler::default(),
        config,
    ));
    let orientation = Rc::new(OrientationListener::default());

    let e = engine.clone();
    let on_enter = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        e.on_pointer_enter();
    }) as Box<dyn FnMut(_)>);

    let e = engine.clone();
    let card_for_move = card.clone();
    let on_move = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let rect = card_for_move.get_bounding_client_rect();
        e.on_pointer_move(
            ev.client_x() as f64 - rect.left(),
            ev.client_y() as f64 - rect.top(),
        );
    }) as Box<dyn FnMut(_)>);

    let e = engine.clone();
    let on_leave = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        e.on_pointer_leave(ev.offset_x() as f64, ev.offset_y() as f64);
    }) as Box<dyn FnMut(_)>);

    let e = engine.clone();
    let listener = orientation.clone();
    let on_click = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
        orientation::request_permission(&e, &listener);
    }) as Box<dyn FnMut(_)>);

    dom::add_listener(&card, "pointerenter", &on_enter);
    dom::add_listener(&card, "pointermove", &on_move);
    dom::add_listener(&card, "pointerleave", &on_leave);
    dom::add_listener(&card, "click", &on_click);

    engine.on_mount(None);
    log::info!(
        "[card] mounted (tilt={}, orientation={})",
        config.enable_tilt,
        config.enable_orientation_tilt
    );

    Ok(CardBinding {
        card,
        engine,
        on_enter,
        on_move,
        on_leave,
        on_click,
        orientation,
    })
}
