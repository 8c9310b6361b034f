#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use tilt_core::constants::SPOTLIGHT_MOBILE_BREAKPOINT;
use tilt_core::TiltConfig;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod attrs;
mod constants;
mod dom;
mod events;
mod frames;
mod scheduler;
mod surface;
mod typewriter;

use constants::{
    CARD_WRAPPER_SELECTOR, MAGNETIC_SELECTOR, SPOTLIGHT_SECTION_SELECTOR, TYPEWRITER_SELECTOR,
};
use events::{CardBinding, MagneticBinding, SpotlightService};
use typewriter::TypewriterBinding;

/// Everything bound on the current page.
#[derive(Default)]
struct Page {
    cards: Vec<CardBinding>,
    magnets: Vec<MagneticBinding>,
    typewriters: Vec<TypewriterBinding>,
    spotlight: Option<SpotlightService>,
}

impl Page {
    fn unmount(self) {
        for card in self.cards {
            card.unmount();
        }
        for magnet in self.magnets {
            magnet.unmount();
        }
        for tw in self.typewriters {
            tw.unmount();
        }
        if let Some(spotlight) = self.spotlight {
            spotlight.detach();
        }
    }
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

fn tilt_config_for(el: &web::Element) -> TiltConfig {
    TiltConfig::from_lookup(|k| dom::data_attr(el, k)).unwrap_or_else(|e| {
        log::warn!("[card] {}; using defaults", e);
        TiltConfig::default()
    })
}

fn bind_page(document: &web::Document) -> Page {
    let mut page = Page::default();

    for wrapper in dom::query_all(document, CARD_WRAPPER_SELECTOR) {
        let config = tilt_config_for(&wrapper);
        match events::bind_card(wrapper, config) {
            Ok(card) => page.cards.push(card),
            Err(e) => log::warn!("[card] not bound: {:?}", e),
        }
    }
    for el in dom::query_all(document, MAGNETIC_SELECTOR) {
        match events::bind_magnetic(el) {
            Ok(m) => page.magnets.push(m),
            Err(e) => log::warn!("[magnetic] not bound: {:?}", e),
        }
    }
    for el in dom::query_all(document, TYPEWRITER_SELECTOR) {
        match typewriter::bind_typewriter(el) {
            Ok(t) => page.typewriters.push(t),
            Err(e) => log::warn!("[typewriter] not bound: {:?}", e),
        }
    }
    page.spotlight = bind_spotlight(document);
    page
}

/// One spotlight per page, over the first card section, skipped on narrow
/// viewports.
fn bind_spotlight(document: &web::Document) -> Option<SpotlightService> {
    let wide = web::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .is_some_and(|width| width > SPOTLIGHT_MOBILE_BREAKPOINT);
    if !wide {
        return None;
    }
    let mut sections = dom::query_all(document, SPOTLIGHT_SECTION_SELECTOR).into_iter();
    let section = sections.next()?;
    if sections.next().is_some() {
        log::debug!("[spotlight] several sections found; lighting the first");
    }
    match SpotlightService::attach(document, section) {
        Ok(service) => Some(service),
        Err(e) => {
            log::warn!("[spotlight] not bound: {:?}", e);
            None
        }
    }
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    unmount_effects();
    let page = bind_page(&document);
    log::info!(
        "bound {} card(s), {} magnetic, {} typewriter(s), spotlight {}",
        page.cards.len(),
        page.magnets.len(),
        page.typewriters.len(),
        if page.spotlight.is_some() { "on" } else { "off" }
    );
    PAGE.with(|slot| *slot.borrow_mut() = Some(page));
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tilt-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

/// Re-scan the document, e.g. after client-side navigation swapped content.
#[wasm_bindgen]
pub fn remount_effects() {
    if let Err(e) = init() {
        log::error!("remount error: {:?}", e);
    }
}

/// Detach every effect from the page.
#[wasm_bindgen]
pub fn unmount_effects() {
    let page = PAGE.with(|slot| slot.borrow_mut().take());
    if let Some(page) = page {
        page.unmount();
        log::info!("effects unmounted");
    }
}
