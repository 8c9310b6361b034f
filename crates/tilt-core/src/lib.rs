pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod magnetic;
pub mod math;
pub mod orientation;
pub mod params;
pub mod scheduler;
pub mod spotlight;
pub mod surface;
pub mod typewriter;

pub use config::TiltConfig;
pub use engine::{TiltEngine, TiltState};
pub use error::TiltError;
pub use magnetic::{MagneticConfig, MagneticHover, MagneticTransform, PointerKind};
pub use orientation::{OrientationPermission, OrientationReading};
pub use params::{write_properties, CssProperty, Dimensions, VisualParameterSet};
pub use scheduler::{FrameCallback, FrameId, FrameScheduler, ManualScheduler};
pub use spotlight::{CardGlow, Rect, Spotlight, SpotlightConfig, SpotlightFrame, SpotlightRange};
pub use surface::{CardSurface, RecordingSurface};
pub use typewriter::{SpeedRange, Typewriter, TypewriterConfig, TypewriterEvent};

// Re-exported so hosts can build offsets without naming glam themselves.
pub use glam::{DVec2, Vec2};
