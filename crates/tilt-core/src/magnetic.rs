//! Magnetic hover: an element drifts toward the pointer while hovered and
//! springs back to rest when the pointer leaves.

use crate::constants::{
    MAGNETIC_DEFAULT_STRENGTH, MAGNETIC_MAX_DT_SEC, MAGNETIC_MAX_SUBSTEP_SEC,
    MAGNETIC_REST_THRESHOLD, MAGNETIC_ROTATE_FACTOR, MAGNETIC_SPRING_DAMPING,
    MAGNETIC_SPRING_STIFFNESS,
};
use crate::error::{Result, TiltError};
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MagneticConfig {
    /// Fraction of the pointer's distance from center the element follows.
    pub strength: f32,
    pub stiffness: f32,
    pub damping: f32,
}

impl Default for MagneticConfig {
    fn default() -> Self {
        Self {
            strength: MAGNETIC_DEFAULT_STRENGTH,
            stiffness: MAGNETIC_SPRING_STIFFNESS,
            damping: MAGNETIC_SPRING_DAMPING,
        }
    }
}

impl MagneticConfig {
    pub fn with_strength(strength: f32) -> Result<Self> {
        if !strength.is_finite() {
            return Err(TiltError::InvalidStrength(strength));
        }
        Ok(Self {
            strength,
            ..Self::default()
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Pen,
    Touch,
}

impl PointerKind {
    /// Parse a DOM `pointerType`. Unknown kinds are treated as touch.
    pub fn from_dom(kind: &str) -> Self {
        match kind {
            "mouse" => Self::Mouse,
            "pen" => Self::Pen,
            _ => Self::Touch,
        }
    }
}

/// Translation and rotation to apply to the element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MagneticTransform {
    pub x: f32,
    pub y: f32,
    pub rotate_deg: f32,
}

impl MagneticTransform {
    pub fn to_css(&self) -> String {
        format!(
            "translate({:.3}px, {:.3}px) rotate({:.3}deg)",
            self.x, self.y, self.rotate_deg
        )
    }
}

#[derive(Clone, Debug)]
pub struct MagneticHover {
    config: MagneticConfig,
    offset: Vec2,
    velocity: Vec2,
    returning: bool,
}

impl MagneticHover {
    pub fn new(config: MagneticConfig) -> Self {
        Self {
            config,
            offset: Vec2::ZERO,
            velocity: Vec2::ZERO,
            returning: false,
        }
    }

    /// `from_center` is the pointer position relative to the element center.
    /// Returns whether the offset changed. Touch pointers are ignored so the
    /// page can still scroll.
    pub fn on_pointer_move(&mut self, kind: PointerKind, from_center: Vec2) -> bool {
        if kind == PointerKind::Touch {
            return false;
        }
        self.offset = from_center * self.config.strength;
        self.velocity = Vec2::ZERO;
        self.returning = false;
        true
    }

    pub fn on_pointer_leave(&mut self) {
        self.returning = true;
    }

    pub fn is_returning(&self) -> bool {
        self.returning
    }

    /// Advance the return spring by `dt_sec`. Returns `true` while it still
    /// needs frames.
    pub fn step(&mut self, dt_sec: f32) -> bool {
        if !self.returning {
            return false;
        }
        let mut remaining = dt_sec.clamp(0.0, MAGNETIC_MAX_DT_SEC);
        while remaining > 0.0 {
            let h = remaining.min(MAGNETIC_MAX_SUBSTEP_SEC);
            let accel = -self.config.stiffness * self.offset - self.config.damping * self.velocity;
            self.velocity += accel * h;
            self.offset += self.velocity * h;
            remaining -= h;
        }
        if self.offset.length() < MAGNETIC_REST_THRESHOLD
            && self.velocity.length() < MAGNETIC_REST_THRESHOLD
        {
            self.offset = Vec2::ZERO;
            self.velocity = Vec2::ZERO;
            self.returning = false;
        }
        self.returning
    }

    pub fn transform(&self) -> MagneticTransform {
        MagneticTransform {
            x: self.offset.x,
            y: self.offset.y,
            rotate_deg: (self.offset.x + self.offset.y) * MAGNETIC_ROTATE_FACTOR,
        }
    }
}

impl Default for MagneticHover {
    fn default() -> Self {
        Self::new(MagneticConfig::default())
    }
}
