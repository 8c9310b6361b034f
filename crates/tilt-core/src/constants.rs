// Shared tuning constants used by both web and native front-ends.

// Settle animation
pub const SMOOTH_DURATION_MS: f64 = 600.0; // pointer-leave return to center
pub const INITIAL_DURATION_MS: f64 = 1500.0; // presentation sweep after mount
pub const INITIAL_X_OFFSET: f64 = 70.0; // measured from the right edge
pub const INITIAL_Y_OFFSET: f64 = 60.0; // measured from the top edge

// Device orientation
pub const DEVICE_BETA_OFFSET: f64 = 20.0; // typical hand-held viewing angle (deg)
pub const DEFAULT_ORIENTATION_SENSITIVITY: f64 = 5.0;

// Tilt mapping
pub const ROTATE_X_DIVISOR: f64 = 5.0;
pub const ROTATE_Y_DIVISOR: f64 = 4.0;
pub const BACKGROUND_MIN_PERCENT: f64 = 35.0;
pub const BACKGROUND_MAX_PERCENT: f64 = 65.0;
pub const OUTPUT_PRECISION: i32 = 3; // decimal places on every emitted value

// Magnetic hover
pub const MAGNETIC_DEFAULT_STRENGTH: f32 = 0.25;
pub const MAGNETIC_ROTATE_FACTOR: f32 = 0.02; // deg per px of (x + y)
pub const MAGNETIC_SPRING_STIFFNESS: f32 = 300.0;
pub const MAGNETIC_SPRING_DAMPING: f32 = 20.0;
pub const MAGNETIC_REST_THRESHOLD: f32 = 0.01; // px and px/s
pub const MAGNETIC_MAX_SUBSTEP_SEC: f32 = 1.0 / 240.0;
pub const MAGNETIC_MAX_DT_SEC: f32 = 0.1; // ignore longer gaps (tab switches)

// Typewriter
pub const TYPEWRITER_TYPING_SPEED_MS: f64 = 50.0;
pub const TYPEWRITER_DELETING_SPEED_MS: f64 = 30.0;
pub const TYPEWRITER_PAUSE_MS: f64 = 2000.0;
pub const TYPEWRITER_DEFAULT_COLOR: &str = "#ffffff";

// Spotlight glow
pub const SPOTLIGHT_DEFAULT_RADIUS: f64 = 300.0; // px
pub const SPOTLIGHT_PROXIMITY_FACTOR: f64 = 0.5; // full glow within radius * this
pub const SPOTLIGHT_FADE_FACTOR: f64 = 0.75; // no glow beyond radius * this
pub const SPOTLIGHT_MAX_OPACITY: f64 = 0.8;
pub const SPOTLIGHT_DEFAULT_COLOR: &str = "132, 0, 255"; // rgb triple for rgba()
pub const SPOTLIGHT_MOBILE_BREAKPOINT: f64 = 768.0; // viewport px; disabled at or below
