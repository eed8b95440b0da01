//! Retro Paddle - a two-paddle ball game simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball/paddle physics, serve sequencing, scoring)
//! - `settings`: Field constants, speed tables and match rules
//! - `audio`: Sound event boundary (the core never synthesizes sound)
//! - `platform`: Input and frame clock boundaries

pub mod audio;
pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{ScoringPolicy, Settings, SettingsError, SpeedTier};

/// Reference field constants
///
/// The field is normalized to `[0,1]×[0,1]` but the reference machine lays it
/// out on a 375 × 246 pixel grid, so sizes are expressed in grid units.
pub mod consts {
    /// Visible field width in grid pixels
    pub const FIELD_WIDTH_PX: f32 = 375.0;
    /// Visible field height in grid pixels
    pub const FIELD_HEIGHT_PX: f32 = 246.0;

    /// One grid pixel horizontally
    pub const H: f32 = 1.0 / FIELD_WIDTH_PX;
    /// One grid pixel vertically
    pub const V: f32 = 1.0 / FIELD_HEIGHT_PX;

    pub const PADDLE_WIDTH: f32 = 4.0 * H;
    pub const PADDLE_HEIGHT: f32 = 16.0 * V;
    pub const BALL_WIDTH: f32 = 4.0 * H;
    pub const BALL_HEIGHT: f32 = 4.0 * V;

    /// Empty band above the paddles' travel
    pub const TOP_GAP: f32 = 6.0 * V;
    /// Empty band below the paddles' travel
    pub const BOTTOM_GAP: f32 = 4.0 * V;

    /// Left edges of the two paddles
    pub const LEFT_PADDLE_X_START: f32 = 48.0 * H;
    pub const RIGHT_PADDLE_X_START: f32 = 304.0 * H;

    /// Net stripe x (only the serve position derives from it)
    pub const NET_X_START: f32 = 176.0 * H;
    /// Ball left edge when served
    pub const BALL_X_START: f32 = NET_X_START + 6.0 * H;

    /// Seconds the ball stays parked after a point
    pub const SERVE_DELAY: f32 = 1.5;
    /// Reference frame rate
    pub const FRAME_RATE: f32 = 60.0;
    /// Fraction of the analog axis travel that spans the whole field
    pub const INPUT_RANGE: f32 = 0.7;
    /// Points needed to end a match
    pub const POINTS_TO_WIN: u32 = 11;
}
