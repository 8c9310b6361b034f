//! Device-orientation input path for cards on devices without a pointer.

use crate::constants::DEVICE_BETA_OFFSET;
use crate::error::TiltError;
use crate::params::Dimensions;
use glam::DVec2;

/// One `deviceorientation` sample. Sensors that are absent report `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrientationReading {
    /// Front-to-back tilt in degrees.
    pub beta: Option<f64>,
    /// Left-to-right tilt in degrees.
    pub gamma: Option<f64>,
}

impl OrientationReading {
    pub fn new(beta: f64, gamma: f64) -> Self {
        Self {
            beta: Some(beta),
            gamma: Some(gamma),
        }
    }

    /// Map the reading to an equivalent pointer offset on the card.
    ///
    /// The axes cross over: gamma drives x around half the height and beta
    /// drives y around half the width.
    pub fn to_offset(self, dims: Dimensions, sensitivity: f64) -> Option<DVec2> {
        let beta = self.beta.filter(|b| b.is_finite())?;
        let gamma = self.gamma.filter(|g| g.is_finite())?;
        Some(DVec2::new(
            dims.height / 2.0 + gamma * sensitivity,
            dims.width / 2.0 + (beta - DEVICE_BETA_OFFSET) * sensitivity,
        ))
    }
}

/// Result of the platform permission flow for orientation events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrientationPermission {
    /// Permission granted, or the platform needs none.
    Granted,
    /// The user or platform refused; carries the reported state.
    Denied(String),
    /// No orientation API on this platform.
    Unsupported,
}

impl OrientationPermission {
    /// Interpret the string state returned by a permission prompt.
    pub fn from_state(state: &str) -> Self {
        if state == "granted" {
            Self::Granted
        } else {
            Self::Denied(state.to_string())
        }
    }

    pub fn into_result(self) -> Result<(), TiltError> {
        match self {
            Self::Granted => Ok(()),
            Self::Denied(state) => Err(TiltError::OrientationDenied(state)),
            Self::Unsupported => Err(TiltError::OrientationUnsupported),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_device_maps_near_center_of_square_card() {
        let dims = Dimensions::new(300.0, 300.0);
        let at = OrientationReading::new(20.0, 0.0).to_offset(dims, 5.0).unwrap();
        assert_eq!(at, DVec2::new(150.0, 150.0));
    }

    #[test]
    fn axes_cross_over_on_non_square_cards() {
        let dims = Dimensions::new(200.0, 400.0);
        let at = OrientationReading::new(30.0, -4.0).to_offset(dims, 5.0).unwrap();
        assert_eq!(at.x, 200.0 - 20.0);
        assert_eq!(at.y, 100.0 + 50.0);
    }

    #[test]
    fn missing_or_non_finite_axes_give_no_offset() {
        let dims = Dimensions::new(200.0, 200.0);
        let absent = OrientationReading {
            beta: None,
            gamma: Some(3.0),
        };
        assert!(absent.to_offset(dims, 5.0).is_none());
        assert!(OrientationReading::new(f64::NAN, 0.0).to_offset(dims, 5.0).is_none());
    }

    #[test]
    fn permission_states() {
        assert_eq!(OrientationPermission::from_state("granted"), OrientationPermission::Granted);
        assert_eq!(
            OrientationPermission::from_state("denied").into_result(),
            Err(TiltError::OrientationDenied("denied".into()))
        );
        assert_eq!(
            OrientationPermission::Unsupported.into_result(),
            Err(TiltError::OrientationUnsupported)
        );
    }
}
