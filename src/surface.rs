use crate::constants::ACTIVE_CLASS;
use tilt_core::{CardSurface, Dimensions};
use web_sys as web;

/// Profile card bound to the DOM: parameters land as CSS custom properties on
/// the wrapper, size is read from the inner card.
pub struct ElementSurface {
    wrapper: web::HtmlElement,
    card: web::Element,
}

impl ElementSurface {
    pub fn new(wrapper: web::HtmlElement, card: web::Element) -> Self {
        Self { wrapper, card }
    }
}

impl CardSurface for ElementSurface {
    fn dimensions(&self) -> Option<Dimensions> {
        if !self.card.is_connected() {
            return None;
        }
        Some(Dimensions::new(
            self.card.client_width() as f64,
            self.card.client_height() as f64,
        ))
    }

    fn set_parameter(&mut self, name: &str, value: &str) {
        _ = self.wrapper.style().set_property(name, value);
    }

    fn set_active(&mut self, active: bool) {
        for list in [self.wrapper.class_list(), self.card.class_list()] {
            _ = if active {
                list.add_1(ACTIVE_CLASS)
            } else {
                list.remove_1(ACTIVE_CLASS)
            };
        }
    }
}
