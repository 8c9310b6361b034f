/// DOM hooks the web front-end binds to.
///
/// Markup only needs these class names and data attributes; everything else
/// (gradients, layout) lives in CSS.
// Profile card
pub const CARD_WRAPPER_SELECTOR: &str = ".pc-card-wrapper";
pub const CARD_SELECTOR: &str = ".pc-card";
pub const ACTIVE_CLASS: &str = "active";

// Companion effects
pub const MAGNETIC_SELECTOR: &str = "[data-magnetic]";
pub const MAGNETIC_STRENGTH_ATTR: &str = "data-magnetic";
pub const TYPEWRITER_SELECTOR: &str = "[data-typewriter]";
pub const TYPEWRITER_CONTENT_SELECTOR: &str = ".text-type__content";
pub const TYPEWRITER_CURSOR_SELECTOR: &str = ".text-type__cursor";
pub const TYPEWRITER_CURSOR_HIDDEN_CLASS: &str = "text-type__cursor--hidden";
pub const SENTENCE_SEPARATOR: char = '|';
pub const TYPEWRITER_VISIBLE_THRESHOLD: f64 = 0.1; // share of the element on screen

// Spotlight glow over a card grid
pub const SPOTLIGHT_SECTION_SELECTOR: &str = ".bento-section";
pub const SPOTLIGHT_CARD_SELECTOR: &str = ".card";
pub const SPOTLIGHT_CLASS: &str = "global-spotlight";
pub const SPOTLIGHT_BASE_CSS: &str = "position: fixed; width: 800px; height: 800px; \
     border-radius: 50%; pointer-events: none; z-index: 200; opacity: 0; \
     transform: translate(-50%, -50%); mix-blend-mode: screen; \
     transition: opacity 0.2s ease-out, left 0.1s ease-out, top 0.1s ease-out;";

// Orientation permission is only requested on secure pages
pub const SECURE_PROTOCOL: &str = "https:";

// Data attribute prefix shared by every effect setting
pub const DATA_PREFIX: &str = "data-";
