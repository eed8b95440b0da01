//! Axis-aligned rectangle bodies
//!
//! Both the ball and the paddles are plain rectangles in the normalized
//! field. Positions are rectangle centers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A rectangle with a center position, a fixed size and a velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectBody {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
}

impl RectBody {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
        }
    }

    /// Advance position linearly. No clamping happens here.
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Strict AABB overlap; rectangles that only touch do not overlap.
    pub fn overlaps(&self, other: &RectBody) -> bool {
        let reach = (self.size + other.size) * 0.5;
        let gap = (self.pos - other.pos).abs();
        gap.x < reach.x && gap.y < reach.y
    }

    /// Vertical offset of `other`'s center from this center, in units of
    /// this body's height.
    ///
    /// Zero at dead center, about ±0.5 at this body's edges and a little
    /// beyond that when `other` only grazes a corner. Only meaningful when
    /// the bodies overlap.
    pub fn relative_hit_offset(&self, other: &RectBody) -> f32 {
        (other.pos.y - self.pos.y) / self.size.y
    }

    /// Left, top, width, height - the form most renderers want
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        let min = self.pos - self.size * 0.5;
        (min.x, min.y, self.size.x, self.size.y)
    }
}
