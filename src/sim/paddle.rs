//! Player paddles
//!
//! A paddle never moves sideways. Its height on the field comes straight from
//! the player's normalized input each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::RectBody;
use crate::settings::Settings;

/// Which half of the field a paddle (or a score) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Index into per-side arrays
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    /// Horizontal sign a ball gets when this side's paddle returns it
    pub fn direction(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub body: RectBody,
    top_gap: f32,
    bottom_gap: f32,
}

impl Paddle {
    /// Create a centered paddle at a fixed x
    pub fn new(side: Side, x: f32, size: Vec2, top_gap: f32, bottom_gap: f32) -> Self {
        let mut paddle = Self {
            side,
            body: RectBody::new(Vec2::new(x, 0.5), size),
            top_gap,
            bottom_gap,
        };
        paddle.set_offset(0.0);
        paddle
    }

    pub fn from_settings(side: Side, settings: &Settings) -> Self {
        Self::new(
            side,
            settings.paddle_x_for(side),
            settings.paddle_size,
            settings.top_gap,
            settings.bottom_gap,
        )
    }

    /// Place the paddle from a normalized offset.
    ///
    /// -1 puts the top edge on the top gap, +1 puts the bottom edge on the
    /// bottom gap. Out-of-range input is clamped and NaN reads as centered.
    pub fn set_offset(&mut self, offset: f32) {
        let offset = if offset.is_nan() {
            0.0
        } else {
            offset.clamp(-1.0, 1.0)
        };
        let height = self.body.size.y;
        let travel = 1.0 - self.top_gap - self.bottom_gap - height;
        self.body.pos.y = travel * 0.5 * (offset + 1.0) + self.top_gap + 0.5 * height;
    }

    #[inline]
    pub fn direction(&self) -> f32 {
        self.side.direction()
    }

    #[inline]
    pub fn overlaps(&self, body: &RectBody) -> bool {
        self.body.overlaps(body)
    }

    /// Where `body` struck this paddle, relative to its center
    #[inline]
    pub fn relative_hit_offset(&self, body: &RectBody) -> f32 {
        self.body.relative_hit_offset(body)
    }

    /// Top and bottom y the paddle center can reach
    pub fn travel(&self) -> (f32, f32) {
        let half = self.body.size.y * 0.5;
        (self.top_gap + half, 1.0 - self.bottom_gap - half)
    }
}
