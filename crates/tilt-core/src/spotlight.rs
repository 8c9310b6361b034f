//! Page-wide spotlight: one soft light follows the pointer across a section
//! and every card in it glows by how close the pointer is to its edge.
//!
//! Geometry is in viewport pixels, the same space `getBoundingClientRect`
//! and `clientX/Y` use.

use crate::constants::{
    SPOTLIGHT_DEFAULT_COLOR, SPOTLIGHT_DEFAULT_RADIUS, SPOTLIGHT_FADE_FACTOR,
    SPOTLIGHT_MAX_OPACITY, SPOTLIGHT_PROXIMITY_FACTOR,
};
use crate::error::{Result, TiltError};
use crate::math::round;
use crate::params::CssProperty;
use glam::DVec2;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub origin: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            origin: DVec2::new(left, top),
            size: DVec2::new(width, height),
        }
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        self.origin + self.size / 2.0
    }

    /// Edges count as inside.
    pub fn contains(&self, point: DVec2) -> bool {
        let max = self.origin + self.size;
        point.x >= self.origin.x && point.x <= max.x && point.y >= self.origin.y && point.y <= max.y
    }

    /// Distance from `point` to the card, treating the card as a circle
    /// around its center with radius half its longer side. Zero inside.
    pub fn edge_distance(&self, point: DVec2) -> f64 {
        let half = self.size.x.max(self.size.y) / 2.0;
        (point.distance(self.center()) - half).max(0.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpotlightConfig {
    pub radius: f64,
    /// Comma separated rgb triple, e.g. `"132, 0, 255"`.
    pub glow_color: String,
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        Self {
            radius: SPOTLIGHT_DEFAULT_RADIUS,
            glow_color: SPOTLIGHT_DEFAULT_COLOR.to_string(),
        }
    }
}

impl SpotlightConfig {
    pub fn validated(self) -> Result<Self> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(TiltError::InvalidSpotlightRadius(self.radius));
        }
        Ok(self)
    }

    /// Radial gradient for the floating light element.
    pub fn gradient(&self) -> String {
        let c = &self.glow_color;
        format!(
            "radial-gradient(circle, rgba({c}, 0.15) 0%, rgba({c}, 0.08) 15%, \
             rgba({c}, 0.04) 25%, rgba({c}, 0.02) 40%, rgba({c}, 0.01) 65%, transparent 70%)"
        )
    }
}

/// Distances at which a card's glow is full and where it reaches zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotlightRange {
    pub proximity: f64,
    pub fade_distance: f64,
}

impl SpotlightRange {
    pub fn from_radius(radius: f64) -> Self {
        Self {
            proximity: radius * SPOTLIGHT_PROXIMITY_FACTOR,
            fade_distance: radius * SPOTLIGHT_FADE_FACTOR,
        }
    }

    /// 1 within `proximity`, falling linearly to 0 at `fade_distance`.
    pub fn falloff(&self, distance: f64) -> f64 {
        if distance <= self.proximity {
            1.0
        } else if distance <= self.fade_distance {
            (self.fade_distance - distance) / (self.fade_distance - self.proximity)
        } else {
            0.0
        }
    }
}

/// Glow written onto one card. `x`/`y` are the pointer position relative to
/// the card in percent and may fall outside 0..100.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardGlow {
    pub x: f64,
    pub y: f64,
    pub intensity: f64,
}

impl CardGlow {
    pub fn at(pointer: DVec2, card: Rect, intensity: f64) -> Self {
        let percent = |p: f64, origin: f64, size: f64| {
            if size > 0.0 {
                round((p - origin) / size * 100.0)
            } else {
                0.0
            }
        };
        Self {
            x: percent(pointer.x, card.origin.x, card.size.x),
            y: percent(pointer.y, card.origin.y, card.size.y),
            intensity: round(intensity),
        }
    }

    pub fn css_properties(&self, radius: f64) -> [CssProperty; 4] {
        [
            ("--glow-x", self.x, "%"),
            ("--glow-y", self.y, "%"),
            ("--glow-intensity", self.intensity, ""),
            ("--glow-radius", radius, "px"),
        ]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SpotlightFrame {
    /// Pointer is outside the section: light off, every card dark.
    Hidden,
    /// One glow per card, in the order the cards were given.
    Lit {
        at: DVec2,
        opacity: f64,
        glows: SmallVec<[CardGlow; 8]>,
    },
}

#[derive(Clone, Debug)]
pub struct Spotlight {
    config: SpotlightConfig,
    range: SpotlightRange,
}

impl Spotlight {
    pub fn new(config: SpotlightConfig) -> Self {
        let range = SpotlightRange::from_radius(config.radius);
        Self { config, range }
    }

    pub fn config(&self) -> &SpotlightConfig {
        &self.config
    }

    pub fn range(&self) -> SpotlightRange {
        self.range
    }

    /// Light the section for a pointer at `pointer`. `section` is `None` when
    /// the section has no layout.
    pub fn update(&self, pointer: DVec2, section: Option<Rect>, cards: &[Rect]) -> SpotlightFrame {
        if !section.is_some_and(|s| s.contains(pointer)) {
            return SpotlightFrame::Hidden;
        }
        let mut nearest = f64::INFINITY;
        let glows = cards
            .iter()
            .map(|card| {
                let distance = card.edge_distance(pointer);
                nearest = nearest.min(distance);
                CardGlow::at(pointer, *card, self.range.falloff(distance))
            })
            .collect();
        SpotlightFrame::Lit {
            at: pointer,
            opacity: round(self.range.falloff(nearest) * SPOTLIGHT_MAX_OPACITY),
            glows,
        }
    }
}

impl Default for Spotlight {
    fn default() -> Self {
        Self::new(SpotlightConfig::default())
    }
}
