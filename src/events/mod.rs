pub mod magnetic;
pub mod orientation;
pub mod pointer;
pub mod spotlight;

pub use magnetic::{bind_magnetic, MagneticBinding};
pub use pointer::{bind_card, CardBinding};
pub use spotlight::SpotlightService;
