use crate::attrs;
use crate::constants::{
    SENTENCE_SEPARATOR, TYPEWRITER_CONTENT_SELECTOR, TYPEWRITER_CURSOR_HIDDEN_CLASS,
    TYPEWRITER_CURSOR_SELECTOR, TYPEWRITER_VISIBLE_THRESHOLD,
};
use crate::dom;
use anyhow::anyhow;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use tilt_core::{Typewriter, TypewriterConfig, TypewriterEvent};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

type VisibleCallback = Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>;

/// Holds typing back until the element scrolls into view.
struct VisibilityGate {
    observer: web::IntersectionObserver,
    _on_visible: VisibleCallback,
}

struct TypewriterRun {
    content: web::HtmlElement,
    cursor: Option<web::Element>,
    machine: Typewriter,
    rng: StdRng,
    timeout: Option<i32>,
    stopped: bool,
}

impl TypewriterRun {
    fn render(&self) {
        self.content.set_text_content(Some(&self.machine.text()));
        _ = self.content.style().set_property("color", self.machine.color());
        if let Some(cursor) = &self.cursor {
            let list = cursor.class_list();
            _ = if self.machine.cursor_hidden() {
                list.add_1(TYPEWRITER_CURSOR_HIDDEN_CLASS)
            } else {
                list.remove_1(TYPEWRITER_CURSOR_HIDDEN_CLASS)
            };
        }
    }
}

pub struct TypewriterBinding {
    run: Rc<RefCell<TypewriterRun>>,
    gate: Option<VisibilityGate>,
}

impl TypewriterBinding {
    pub fn unmount(self) {
        if let Some(gate) = &self.gate {
            gate.observer.disconnect();
        }
        let mut run = self.run.borrow_mut();
        run.stopped = true;
        if let (Some(id), Some(w)) = (run.timeout.take(), web::window()) {
            w.clear_timeout_with_handle(id);
        }
    }
}

fn config_for(el: &web::Element) -> TypewriterConfig {
    attrs::typewriter_config(|k| dom::data_attr(el, k)).unwrap_or_else(|e| {
        log::warn!("[typewriter] {}; using defaults", e);
        TypewriterConfig::default()
    })
}

fn schedule(run: &Rc<RefCell<TypewriterRun>>) {
    let delay = {
        let mut guard = run.borrow_mut();
        let r = &mut *guard;
        if r.stopped {
            return;
        }
        r.machine.next_delay(&mut r.rng)
    };
    let Some(delay) = delay else {
        return;
    };
    let Some(w) = web::window() else {
        return;
    };
    let next = run.clone();
    let cb = Closure::once_into_js(move || step(&next));
    match w.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.unchecked_ref(),
        delay.round() as i32,
    ) {
        Ok(id) => run.borrow_mut().timeout = Some(id),
        Err(e) => log::warn!("[typewriter] setTimeout failed: {:?}", e),
    }
}

fn step(run: &Rc<RefCell<TypewriterRun>>) {
    {
        let mut r = run.borrow_mut();
        if r.stopped {
            return;
        }
        r.timeout = None;
        if let Some(TypewriterEvent::SentenceComplete { index }) = r.machine.tick() {
            log::debug!("[typewriter] sentence {} complete", index);
        }
        r.render();
    }
    schedule(run);
}

/// Start typing into a `[data-typewriter]` element. Sentences are separated
/// by `|`; text goes into a `.text-type__content` child when present.
pub fn bind_typewriter(el: web::Element) -> anyhow::Result<TypewriterBinding> {
    let raw = dom::data_attr(&el, "typewriter").unwrap_or_default();
    let sentences = attrs::split_sentences(&raw, SENTENCE_SEPARATOR);
    let machine = Typewriter::new(sentences, config_for(&el))?;

    let content: web::HtmlElement = dom::query_in(&el, TYPEWRITER_CONTENT_SELECTOR)
        .unwrap_or_else(|| el.clone())
        .dyn_into()
        .map_err(|_| anyhow!("typewriter target is not an HTML element"))?;
    let cursor = dom::query_in(&el, TYPEWRITER_CURSOR_SELECTOR);

    let run = Rc::new(RefCell::new(TypewriterRun {
        content,
        cursor,
        machine,
        rng: StdRng::from_entropy(),
        timeout: None,
        stopped: false,
    }));
    run.borrow().render();

    let gate = if run.borrow().machine.config().start_on_visible {
        match gate_on_visible(&el, &run) {
            Ok(gate) => Some(gate),
            Err(e) => {
                log::warn!("[typewriter] no IntersectionObserver ({:?}); starting now", e);
                schedule(&run);
                None
            }
        }
    } else {
        schedule(&run);
        None
    };
    Ok(TypewriterBinding { run, gate })
}

fn gate_on_visible(
    el: &web::Element,
    run: &Rc<RefCell<TypewriterRun>>,
) -> Result<VisibilityGate, JsValue> {
    let r = run.clone();
    let on_visible = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: web::IntersectionObserver| {
            let visible = entries
                .iter()
                .filter_map(|e| e.dyn_into::<web::IntersectionObserverEntry>().ok())
                .any(|e| e.is_intersecting());
            if visible {
                // start once, then stop watching
                observer.disconnect();
                schedule(&r);
            }
        },
    ) as Box<dyn FnMut(_, _)>);

    let options = web::IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(TYPEWRITER_VISIBLE_THRESHOLD));
    let observer = web::IntersectionObserver::new_with_options(
        on_visible.as_ref().unchecked_ref(),
        &options,
    )?;
    observer.observe(el);
    Ok(VisibilityGate {
        observer,
        _on_visible: on_visible,
    })
}
