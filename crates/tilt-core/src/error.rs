use thiserror::Error;

/// Diagnostics raised while configuring effects or attaching optional inputs.
///
/// Engine operations themselves never fail; these only surface from config
/// validation and from the orientation permission path, where they are logged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TiltError {
    #[error("orientation sensitivity must be finite and positive, got {0}")]
    InvalidSensitivity(f64),
    #[error("invalid value {value:?} for `{key}`")]
    InvalidAttribute { key: String, value: String },
    #[error("magnetic strength must be finite, got {0}")]
    InvalidStrength(f32),
    #[error("spotlight radius must be finite and positive, got {0}")]
    InvalidSpotlightRadius(f64),
    #[error("typewriter needs at least one sentence")]
    NoSentences,
    #[error("typewriter speed range {min}..{max} is empty or negative")]
    InvalidSpeedRange { min: f64, max: f64 },
    #[error("device orientation is not supported on this platform")]
    OrientationUnsupported,
    #[error("device orientation permission was denied ({0})")]
    OrientationDenied(String),
}

pub type Result<T> = std::result::Result<T, TiltError>;
