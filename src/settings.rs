//! Game settings
//!
//! Every constant the simulation needs, loaded once at startup. Settings are
//! validated before any simulation object is built; a bad file is a fatal
//! startup error, never a mid-game one.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{Exit, Side};

/// Environment variable naming a JSON settings file
pub const SETTINGS_ENV: &str = "RETRO_PADDLE_SETTINGS";

/// Errors detected while loading or validating settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("horizontal speed tier table is empty")]
    EmptyTiers,
    #[error("tier thresholds must strictly increase (tier {index})")]
    TierOrder { index: usize },
    #[error("tier speeds must be finite, non-negative and non-decreasing (tier {index})")]
    TierSpeed { index: usize },
    #[error("vertical speed table is empty")]
    EmptyVerticalSpeeds,
    #[error("vertical speed {index} is not finite")]
    VerticalSpeed { index: usize },
    #[error("hit zone table is empty")]
    EmptyHitZones,
    #[error("hit zone {index} references load {load}, table has {len} loads")]
    HitZoneRange { index: usize, load: usize, len: usize },
    #[error("hit zones must be non-decreasing (zone {index})")]
    HitZoneOrder { index: usize },
    #[error("attract load {load} is outside the {len}-entry speed table")]
    AttractLoad { load: usize, len: usize },

    #[error("{what} size must be finite and positive, got {size}")]
    Size { what: &'static str, size: Vec2 },
    #[error("gaps {top} + {bottom} leave no room for a paddle")]
    Gaps { top: f32, bottom: f32 },
    #[error("{what} must lie inside the field, got {value}")]
    OutOfField { what: &'static str, value: f32 },
    #[error("serve delay must be finite and non-negative, got {0}")]
    ServeDelay(f32),
    #[error("input range must be finite and positive, got {0}")]
    InputRange(f32),
    #[error("frame rate must be finite and positive, got {0}")]
    FrameRate(f32),
    #[error("point target must be at least 1")]
    PointsToWin,
}

/// One row of the horizontal speed table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedTier {
    /// Rally hits needed before this tier applies
    pub hits: u32,
    /// Horizontal speed in field widths per second
    pub speed: f32,
}

impl SpeedTier {
    pub const fn new(hits: u32, speed: f32) -> Self {
        Self { hits, speed }
    }
}

/// Which side is credited when the ball leaves the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// The player on the far side of the exit scores (classic rules)
    #[default]
    OppositeSide,
    /// The player guarding the exit scores
    SameSide,
}

impl ScoringPolicy {
    pub fn scorer(self, exit: Exit) -> Side {
        match (self, exit) {
            (ScoringPolicy::OppositeSide, Exit::MinX) => Side::Right,
            (ScoringPolicy::OppositeSide, Exit::MaxX) => Side::Left,
            (ScoringPolicy::SameSide, Exit::MinX) => Side::Left,
            (ScoringPolicy::SameSide, Exit::MaxX) => Side::Right,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    /// Width over height, for renderers
    pub aspect_ratio: f32,
    pub paddle_size: Vec2,
    pub ball_size: Vec2,
    /// Paddle center x, left then right
    pub paddle_x: [f32; 2],
    pub top_gap: f32,
    pub bottom_gap: f32,

    // === Ball ===
    /// Ball center x while served
    pub serve_x: f32,
    /// Seconds between a point and the next serve
    pub serve_delay: f32,
    pub horizontal_tiers: Vec<SpeedTier>,
    /// Vertical speeds, steepest upward first
    pub vertical_speeds: Vec<f32>,
    /// Paddle hit zones, top to bottom, each naming a vertical load
    pub hit_zones: Vec<usize>,
    /// Load used while no match is running
    pub attract_load: usize,

    // === Match ===
    pub points_to_win: u32,
    pub scoring: ScoringPolicy,

    // === Platform ===
    /// Analog axis deflection that maps to a full paddle stroke
    pub input_range: f32,
    pub frame_rate: f32,
    /// Suppress sound events
    pub silent: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            aspect_ratio: FIELD_WIDTH_PX / FIELD_HEIGHT_PX,
            paddle_size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            ball_size: Vec2::new(BALL_WIDTH, BALL_HEIGHT),
            paddle_x: [
                LEFT_PADDLE_X_START + PADDLE_WIDTH * 0.5,
                RIGHT_PADDLE_X_START + PADDLE_WIDTH * 0.5,
            ],
            top_gap: TOP_GAP,
            bottom_gap: BOTTOM_GAP,

            serve_x: BALL_X_START - BALL_WIDTH * 0.5,
            serve_delay: SERVE_DELAY,
            horizontal_tiers: vec![
                SpeedTier::new(0, 0.26),
                SpeedTier::new(4, 0.39),
                SpeedTier::new(12, 0.53),
            ],
            vertical_speeds: vec![-0.695, -0.462, -0.226, 0.0, 0.228, 0.455, 0.680],
            hit_zones: vec![0, 1, 2, 3, 3, 4, 5, 6],
            attract_load: 0,

            points_to_win: POINTS_TO_WIN,
            scoring: ScoringPolicy::OppositeSide,

            input_range: INPUT_RANGE,
            frame_rate: FRAME_RATE,
            silent: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and validate a JSON settings file
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from the file named by `RETRO_PADDLE_SETTINGS`, or defaults
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(SETTINGS_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from_path(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", Path::new(&path).display());
                settings
            }
            Err(err) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    /// Check every rule the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_size("paddle", self.paddle_size)?;
        check_size("ball", self.ball_size)?;

        if !(self.top_gap >= 0.0 && self.bottom_gap >= 0.0)
            || self.top_gap + self.bottom_gap + self.paddle_size.y > 1.0
        {
            return Err(SettingsError::Gaps {
                top: self.top_gap,
                bottom: self.bottom_gap,
            });
        }
        if self.ball_size.x >= 1.0 || self.ball_size.y >= 1.0 {
            return Err(SettingsError::Size {
                what: "ball",
                size: self.ball_size,
            });
        }
        for x in self.paddle_x {
            check_in_field("paddle x", x)?;
        }
        check_in_field("serve x", self.serve_x)?;

        if !(self.serve_delay.is_finite() && self.serve_delay >= 0.0) {
            return Err(SettingsError::ServeDelay(self.serve_delay));
        }
        if !(self.input_range.is_finite() && self.input_range > 0.0) {
            return Err(SettingsError::InputRange(self.input_range));
        }
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Err(SettingsError::FrameRate(self.frame_rate));
        }
        if self.points_to_win == 0 {
            return Err(SettingsError::PointsToWin);
        }

        validate_tables(
            &self.horizontal_tiers,
            &self.vertical_speeds,
            &self.hit_zones,
        )?;
        if self.attract_load >= self.vertical_speeds.len() {
            return Err(SettingsError::AttractLoad {
                load: self.attract_load,
                len: self.vertical_speeds.len(),
            });
        }

        Ok(())
    }

    /// Paddle center x for a side
    pub fn paddle_x_for(&self, side: Side) -> f32 {
        self.paddle_x[side.index()]
    }
}

/// Speed table rules, shared with `SpeedTables::new`
pub(crate) fn validate_tables(
    tiers: &[SpeedTier],
    speeds: &[f32],
    zones: &[usize],
) -> Result<(), SettingsError> {
    if tiers.is_empty() {
        return Err(SettingsError::EmptyTiers);
    }
    for (index, tier) in tiers.iter().enumerate() {
        if !(tier.speed.is_finite() && tier.speed >= 0.0) {
            return Err(SettingsError::TierSpeed { index });
        }
        if index > 0 {
            let prev = tiers[index - 1];
            if tier.hits <= prev.hits {
                return Err(SettingsError::TierOrder { index });
            }
            if tier.speed < prev.speed {
                return Err(SettingsError::TierSpeed { index });
            }
        }
    }

    if speeds.is_empty() {
        return Err(SettingsError::EmptyVerticalSpeeds);
    }
    if let Some(index) = speeds.iter().position(|s| !s.is_finite()) {
        return Err(SettingsError::VerticalSpeed { index });
    }

    if zones.is_empty() {
        return Err(SettingsError::EmptyHitZones);
    }
    for (index, &load) in zones.iter().enumerate() {
        if load >= speeds.len() {
            return Err(SettingsError::HitZoneRange {
                index,
                load,
                len: speeds.len(),
            });
        }
        if index > 0 && load < zones[index - 1] {
            return Err(SettingsError::HitZoneOrder { index });
        }
    }

    Ok(())
}

fn check_size(what: &'static str, size: Vec2) -> Result<(), SettingsError> {
    if size.is_finite() && size.x > 0.0 && size.y > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::Size { what, size })
    }
}

fn check_in_field(what: &'static str, value: f32) -> Result<(), SettingsError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::OutOfField { what, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        Settings::default().validate().expect("defaults must validate");
    }

    #[test]
    fn test_default_geometry() {
        let settings = Settings::default();
        assert!((settings.paddle_x[0] - 50.0 / 375.0).abs() < 1e-6);
        assert!((settings.paddle_x[1] - 306.0 / 375.0).abs() < 1e-6);
        assert!((settings.serve_x - 180.0 / 375.0).abs() < 1e-6);
        assert_eq!(settings.hit_zones.len(), settings.vertical_speeds.len() + 1);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "points_to_win": 10, "scoring": "same_side" }"#)
            .expect("valid json");
        assert_eq!(settings.points_to_win, 10);
        assert_eq!(settings.scoring, ScoringPolicy::SameSide);
        assert_eq!(settings.serve_delay, SERVE_DELAY);
        assert_eq!(settings.horizontal_tiers.len(), 3);
    }

    #[test]
    fn test_json_round_trip() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        let settings = Settings::from_json(&json).unwrap();
        assert_eq!(settings.vertical_speeds, Settings::default().vertical_speeds);
        assert_eq!(settings.paddle_size, Settings::default().paddle_size);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load_from_path("/nonexistent/retro-paddle.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn test_empty_tables_rejected() {
        let mut settings = Settings::default();
        settings.horizontal_tiers.clear();
        assert!(matches!(settings.validate(), Err(SettingsError::EmptyTiers)));

        let mut settings = Settings::default();
        settings.vertical_speeds.clear();
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::EmptyVerticalSpeeds)
        ));

        let mut settings = Settings::default();
        settings.hit_zones.clear();
        assert!(matches!(settings.validate(), Err(SettingsError::EmptyHitZones)));
    }

    #[test]
    fn test_tier_order_rejected() {
        let mut settings = Settings::default();
        settings.horizontal_tiers = vec![SpeedTier::new(0, 0.2), SpeedTier::new(0, 0.3)];
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::TierOrder { index: 1 })
        ));

        settings.horizontal_tiers = vec![SpeedTier::new(0, 0.3), SpeedTier::new(4, 0.2)];
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::TierSpeed { index: 1 })
        ));
    }

    #[test]
    fn test_hit_zones_rejected() {
        let mut settings = Settings::default();
        settings.hit_zones = vec![0, 1, 9];
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::HitZoneRange { index: 2, load: 9, .. })
        ));

        settings.hit_zones = vec![0, 2, 1];
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::HitZoneOrder { index: 2 })
        ));
    }

    #[test]
    fn test_zero_sized_bodies_rejected() {
        let mut settings = Settings::default();
        settings.ball_size = Vec2::new(0.0, BALL_HEIGHT);
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Size { what: "ball", .. })
        ));

        let mut settings = Settings::default();
        settings.paddle_size = Vec2::new(PADDLE_WIDTH, f32::NAN);
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Size { what: "paddle", .. })
        ));
    }

    #[test]
    fn test_rules_rejected() {
        let mut settings = Settings::default();
        settings.points_to_win = 0;
        assert!(matches!(settings.validate(), Err(SettingsError::PointsToWin)));

        let mut settings = Settings::default();
        settings.attract_load = 7;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::AttractLoad { load: 7, len: 7 })
        ));

        let mut settings = Settings::default();
        settings.top_gap = 0.6;
        settings.bottom_gap = 0.4;
        assert!(matches!(settings.validate(), Err(SettingsError::Gaps { .. })));

        let mut settings = Settings::default();
        settings.input_range = 0.0;
        assert!(matches!(settings.validate(), Err(SettingsError::InputRange(_))));
    }

    #[test]
    fn test_scoring_policy() {
        assert_eq!(ScoringPolicy::OppositeSide.scorer(Exit::MinX), Side::Right);
        assert_eq!(ScoringPolicy::OppositeSide.scorer(Exit::MaxX), Side::Left);
        assert_eq!(ScoringPolicy::SameSide.scorer(Exit::MinX), Side::Left);
        assert_eq!(ScoringPolicy::SameSide.scorer(Exit::MaxX), Side::Right);
    }
}
