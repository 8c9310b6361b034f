use crate::attrs;
use crate::constants::{SPOTLIGHT_BASE_CSS, SPOTLIGHT_CARD_SELECTOR, SPOTLIGHT_CLASS};
use crate::dom;
use anyhow::anyhow;
use std::cell::RefCell;
use std::rc::Rc;
use tilt_core::{write_properties, DVec2, Rect, Spotlight, SpotlightConfig, SpotlightFrame};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn rect_of(el: &web::Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

struct SpotlightState {
    section: web::Element,
    cards: Vec<web::HtmlElement>,
    light: web::HtmlElement,
    spotlight: Spotlight,
    // per-move scratch, reused
    rects: RefCell<Vec<Rect>>,
    buf: RefCell<String>,
}

impl SpotlightState {
    fn go_dark(&self) {
        for card in &self.cards {
            _ = card.style().set_property("--glow-intensity", "0");
        }
        _ = self.light.style().set_property("opacity", "0");
    }

    fn on_pointer(&self, pointer: DVec2) {
        let section = self.section.is_connected().then(|| rect_of(&self.section));
        let frame = {
            let mut rects = self.rects.borrow_mut();
            rects.clear();
            rects.extend(self.cards.iter().map(|c| rect_of(c)));
            self.spotlight.update(pointer, section, &rects)
        };
        match frame {
            SpotlightFrame::Hidden => self.go_dark(),
            SpotlightFrame::Lit { at, opacity, glows } => {
                let radius = self.spotlight.config().radius;
                let mut buf = self.buf.borrow_mut();
                for (card, glow) in self.cards.iter().zip(&glows) {
                    let style = card.style();
                    write_properties(&glow.css_properties(radius), &mut *buf, |name, value| {
                        _ = style.set_property(name, value);
                    });
                }
                let style = self.light.style();
                write_properties(
                    &[("left", at.x, "px"), ("top", at.y, "px"), ("opacity", opacity, "")],
                    &mut *buf,
                    |name, value| {
                        _ = style.set_property(name, value);
                    },
                );
            }
        }
    }
}

/// The page's one spotlight. Owns the floating light element and the
/// document-level pointer listeners for as long as it is attached.
pub struct SpotlightService {
    document: web::Document,
    state: Rc<SpotlightState>,
    on_move: Closure<dyn FnMut(web::MouseEvent)>,
    on_leave: Closure<dyn FnMut(web::MouseEvent)>,
}

impl SpotlightService {
    pub fn attach(document: &web::Document, section: web::Element) -> anyhow::Result<Self> {
        let config = attrs::spotlight_config(|k| dom::data_attr(&section, k)).unwrap_or_else(|e| {
            log::warn!("[spotlight] {}; using defaults", e);
            SpotlightConfig::default()
        });
        let body = document.body().ok_or_else(|| anyhow!("document has no body"))?;
        let light: web::HtmlElement = document
            .create_element("div")
            .map_err(|e| anyhow!("create spotlight element: {:?}", e))?
            .dyn_into()
            .map_err(|_| anyhow!("spotlight element is not an HTML element"))?;
        light.set_class_name(SPOTLIGHT_CLASS);
        light
            .style()
            .set_css_text(&format!("{} background: {};", SPOTLIGHT_BASE_CSS, config.gradient()));
        body.append_child(&light)
            .map_err(|e| anyhow!("append spotlight element: {:?}", e))?;

        let cards: Vec<web::HtmlElement> = dom::query_all_in(&section, SPOTLIGHT_CARD_SELECTOR)
            .into_iter()
            .filter_map(|el| el.dyn_into().ok())
            .collect();
        log::info!(
            "[spotlight] attached over {} card(s), radius {}px",
            cards.len(),
            config.radius
        );
        let state = Rc::new(SpotlightState {
            section,
            rects: RefCell::new(Vec::with_capacity(cards.len())),
            cards,
            light,
            spotlight: Spotlight::new(config),
            buf: RefCell::new(String::new()),
        });

        let s = state.clone();
        let on_move = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            s.on_pointer(DVec2::new(ev.client_x() as f64, ev.client_y() as f64));
        }) as Box<dyn FnMut(_)>);
        let s = state.clone();
        let on_leave = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
            s.go_dark();
        }) as Box<dyn FnMut(_)>);

        dom::add_listener(document, "mousemove", &on_move);
        dom::add_listener(document, "mouseleave", &on_leave);

        Ok(Self {
            document: document.clone(),
            state,
            on_move,
            on_leave,
        })
    }

    /// Stop following the pointer, darken every card and remove the light.
    pub fn detach(self) {
        dom::remove_listener(&self.document, "mousemove", &self.on_move);
        dom::remove_listener(&self.document, "mouseleave", &self.on_leave);
        self.state.go_dark();
        self.state.light.remove();
        log::info!("[spotlight] detached");
    }
}
