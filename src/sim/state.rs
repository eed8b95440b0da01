//! Session state
//!
//! Everything the simulation mutates is owned here: the ball, the paddles
//! (only while a match is running), the score pair and the RNG.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::paddle::{Paddle, Side};
use super::rect::RectBody;
use super::tables::SpeedTables;
use crate::settings::{Settings, SettingsError};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No paddles, ball bouncing around on its own
    Attract,
    /// Match in progress
    Playing,
}

/// Points for each side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn winner(&self, points_to_win: u32) -> Option<Side> {
        Side::BOTH
            .into_iter()
            .find(|&side| self.get(side) >= points_to_win)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// What a renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldView {
    pub phase: GamePhase,
    /// Only present while the ball is live
    pub ball: Option<RectBody>,
    /// Empty outside a match, otherwise left then right
    pub paddles: Vec<RectBody>,
    pub score: Score,
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG started from
    pub seed: u64,
    pub phase: GamePhase,
    pub ball: Ball,
    /// Left then right; empty in attract mode
    pub paddles: Vec<Paddle>,
    pub score: Score,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) tables: SpeedTables,
    pub(crate) settings: Settings,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a session in attract mode.
    ///
    /// Fails if the settings are invalid; nothing later in the session can.
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        let tables = SpeedTables::from_settings(&settings)?;
        let ball = Ball::from_settings(&settings, &tables);

        Ok(Self {
            seed,
            phase: GamePhase::Attract,
            ball,
            paddles: Vec::new(),
            score: Score::new(),
            time_ticks: 0,
            tables,
            settings,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tables(&self) -> &SpeedTables {
        &self.tables
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Start a match. Ignored while one is already running.
    pub fn start(&mut self) {
        if self.is_playing() {
            return;
        }
        self.paddles = Side::BOTH
            .iter()
            .map(|&side| Paddle::from_settings(side, &self.settings))
            .collect();
        self.score.reset();
        self.ball.serve();
        self.phase = GamePhase::Playing;
        log::info!("Match started (first to {})", self.settings.points_to_win);
    }

    /// Drop back to attract mode. The score stays up until the next start.
    pub fn attract(&mut self) {
        self.paddles.clear();
        self.ball.attract(self.settings.attract_load, &self.tables);
        self.phase = GamePhase::Attract;
    }

    /// Abandon the running match
    pub fn reset(&mut self) {
        if self.is_playing() {
            log::info!(
                "Match reset at {}-{}",
                self.score.left,
                self.score.right
            );
            self.attract();
        }
    }

    /// Credit a point and end the match if it was the last one.
    ///
    /// Returns the winner when the match ends.
    pub(crate) fn award_point(&mut self, scorer: Side) -> Option<Side> {
        self.score.increment(scorer);
        let winner = self.score.winner(self.settings.points_to_win)?;
        log::info!(
            "{winner:?} wins {}-{}",
            self.score.left,
            self.score.right
        );
        self.attract();
        Some(winner)
    }

    pub fn paddle(&self, side: Side) -> Option<&Paddle> {
        self.paddles.iter().find(|p| p.side == side)
    }

    /// Snapshot for the renderer
    pub fn view(&self) -> FieldView {
        FieldView {
            phase: self.phase,
            ball: self.ball.is_live().then_some(self.ball.body),
            paddles: self.paddles.iter().map(|p| p.body).collect(),
            score: self.score,
        }
    }
}
