//! The render target a tilt engine writes to.
//!
//! Front-ends implement [`CardSurface`] over whatever they draw with (a DOM
//! element on the web, an in-memory map natively). The engine never touches a
//! rendering API directly.

use crate::params::Dimensions;
use fnv::FnvHashMap;
use std::cell::RefCell;
use std::rc::Rc;

pub trait CardSurface {
    /// Current layout size, or `None` once the surface is gone.
    fn dimensions(&self) -> Option<Dimensions>;
    /// Write a single named visual parameter.
    fn set_parameter(&mut self, name: &str, value: &str);
    /// Toggle the "pointer is over the card" display flag.
    fn set_active(&mut self, active: bool);
}

/// In-memory surface that remembers the latest value of every parameter and
/// counts writes. Used by the native demo and by tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub dims: Option<Dimensions>,
    pub values: FnvHashMap<String, String>,
    pub active: bool,
    pub writes: usize,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            dims: Some(Dimensions::new(width, height)),
            ..Default::default()
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Parse a numeric parameter, stripping its unit suffix.
    pub fn get_number(&self, name: &str) -> Option<f64> {
        let raw = self.get(name)?;
        raw.trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%')
            .parse()
            .ok()
    }
}

impl CardSurface for RecordingSurface {
    fn dimensions(&self) -> Option<Dimensions> {
        self.dims
    }

    fn set_parameter(&mut self, name: &str, value: &str) {
        self.writes += 1;
        self.values.insert(name.to_string(), value.to_string());
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl<T: CardSurface + ?Sized> CardSurface for Box<T> {
    fn dimensions(&self) -> Option<Dimensions> {
        (**self).dimensions()
    }
    fn set_parameter(&mut self, name: &str, value: &str) {
        (**self).set_parameter(name, value)
    }
    fn set_active(&mut self, active: bool) {
        (**self).set_active(active)
    }
}

/// Shared handle, so a host can keep observing a surface it handed over.
impl<T: CardSurface> CardSurface for Rc<RefCell<T>> {
    fn dimensions(&self) -> Option<Dimensions> {
        self.borrow().dimensions()
    }
    fn set_parameter(&mut self, name: &str, value: &str) {
        self.borrow_mut().set_parameter(name, value)
    }
    fn set_active(&mut self, active: bool) {
        self.borrow_mut().set_active(active)
    }
}
