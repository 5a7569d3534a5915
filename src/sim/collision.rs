//! Axis-aligned collision detection
//!
//! Rectangles live in play-area space with the origin at the bottom-left
//! corner and y growing upward, matching the `bottom`/`left` offsets the
//! display uses. Anything that can report a rectangle implements
//! [`BoundsProvider`], so tests can collide synthetic boxes without a display.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle from its bottom-left corner and size
    pub fn from_bottom_left(left: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(left, bottom),
            max: Vec2::new(left + width, bottom + height),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// True unless one rectangle lies strictly left, right, above or below
    /// the other. Shared edges count as contact.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y)
    }
}

/// Source of a current screen rectangle
pub trait BoundsProvider {
    fn bounds(&self) -> Rect;
}

impl BoundsProvider for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Collision test between any two bounded things
#[inline]
pub fn collides(a: &impl BoundsProvider, b: &impl BoundsProvider) -> bool {
    a.bounds().overlaps(&b.bounds())
}
