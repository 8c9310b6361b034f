use crate::constants::DATA_PREFIX;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

fn elements(list: web::NodeList) -> Vec<web::Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web::Element>().ok())
        .collect()
}

/// All elements matching `selector`, in document order.
pub fn query_all(root: &web::Document, selector: &str) -> Vec<web::Element> {
    match root.query_selector_all(selector) {
        Ok(list) => elements(list),
        Err(_) => {
            log::warn!("[dom] bad selector {}", selector);
            Vec::new()
        }
    }
}

/// Descendants of `parent` matching `selector`.
pub fn query_all_in(parent: &web::Element, selector: &str) -> Vec<web::Element> {
    match parent.query_selector_all(selector) {
        Ok(list) => elements(list),
        Err(_) => {
            log::warn!("[dom] bad selector {}", selector);
            Vec::new()
        }
    }
}

#[inline]
pub fn query_in(parent: &web::Element, selector: &str) -> Option<web::Element> {
    parent.query_selector(selector).ok().flatten()
}

/// Read `data-<key>` from an element.
#[inline]
pub fn data_attr(el: &web::Element, key: &str) -> Option<String> {
    el.get_attribute(&format!("{}{}", DATA_PREFIX, key))
}

pub fn add_listener<T: ?Sized>(target: &web::EventTarget, event: &str, closure: &Closure<T>) {
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::warn!("[dom] add {} listener failed: {:?}", event, e);
    }
}

pub fn remove_listener<T: ?Sized>(target: &web::EventTarget, event: &str, closure: &Closure<T>) {
    _ = target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
}

#[inline]
pub fn is_secure_page(window: &web::Window, secure_protocol: &str) -> bool {
    window
        .location()
        .protocol()
        .map(|p| p == secure_protocol)
        .unwrap_or(false)
}
