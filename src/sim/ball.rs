//! The ball and its serve/rally state machine
//!
//! The ball is either parked waiting to be served or live. A live ball moves,
//! bounces off the top and bottom of the field, takes speed and spin from the
//! paddles, and produces a scoring edge when it leaves through either end.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::paddle::{Paddle, Side};
use super::rect::RectBody;
use super::tables::SpeedTables;
use crate::settings::{ScoringPolicy, Settings};

/// Where the ball starts when the program boots
const BOOT_POSITION: Vec2 = Vec2::new(0.4, 0.5);

/// Serve/rally state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BallState {
    /// Parked at the serve origin, neither drawn nor collidable
    Serving { wait: f32 },
    /// In play
    Live,
}

/// Which end of the field the ball left through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Exit {
    MinX,
    MaxX,
}

/// A point was won this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEvent {
    pub scorer: Side,
    pub exit: Exit,
}

/// Non-scoring contacts during the last `advance`, for sound and effects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contacts {
    pub wall: bool,
    pub paddle: bool,
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub body: RectBody,
    /// Index into the vertical speed table
    pub load: usize,
    /// Paddle touches since the last serve
    pub rally_hits: u32,
    pub state: BallState,
    /// Horizontal sign applied when the serve wait runs out
    pub serve_direction: f32,
    /// Lowest legal center position
    min: Vec2,
    /// Highest legal center position
    max: Vec2,
    serve_x: f32,
    serve_delay: f32,
    scoring: ScoringPolicy,
    contacts: Contacts,
}

impl Ball {
    /// Boot-time ball: live, heading right, carrying the attract load
    pub fn from_settings(settings: &Settings, tables: &SpeedTables) -> Self {
        let size = settings.ball_size;
        let half = size * 0.5;
        let mut ball = Self {
            body: RectBody::new(BOOT_POSITION, size),
            load: 0,
            rally_hits: 0,
            state: BallState::Live,
            serve_direction: 1.0,
            min: half,
            max: Vec2::ONE - half,
            serve_x: settings.serve_x,
            serve_delay: settings.serve_delay,
            scoring: settings.scoring,
            contacts: Contacts::default(),
        };
        ball.body.vel.x = ball.serve_direction * tables.horizontal_speed(0);
        ball.set_load(settings.attract_load, tables);
        ball
    }

    /// Set the load and the vertical speed it implies
    pub fn set_load(&mut self, load: usize, tables: &SpeedTables) {
        self.load = load;
        self.body.vel.y = tables.vertical_speed(load);
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.state == BallState::Live
    }

    /// Seconds left before the ball goes live (0 when live)
    pub fn serve_wait(&self) -> f32 {
        match self.state {
            BallState::Serving { wait } => wait,
            BallState::Live => 0.0,
        }
    }

    /// Contacts recorded by the last `advance`
    pub fn contacts(&self) -> Contacts {
        self.contacts
    }

    /// Legal range of the ball center, `(min, max)`
    pub fn limits(&self) -> (Vec2, Vec2) {
        (self.min, self.max)
    }

    pub fn serve_origin(&self) -> Vec2 {
        Vec2::new(self.serve_x, 0.5)
    }

    /// Park the ball for a fresh serve, keeping its current heading
    pub fn serve(&mut self) {
        if self.body.vel.x != 0.0 {
            self.serve_direction = self.body.vel.x.signum();
        }
        self.park();
    }

    /// Put the ball straight back in play with a fixed load.
    ///
    /// Used when no match is running, so there is no serve wait.
    pub fn attract(&mut self, load: usize, tables: &SpeedTables) {
        let heading = if self.body.vel.x != 0.0 {
            self.body.vel.x.signum()
        } else {
            self.serve_direction
        };
        self.state = BallState::Live;
        self.rally_hits = 0;
        self.body.vel.x = heading * tables.horizontal_speed(0);
        self.set_load(load, tables);
    }

    /// Advance the ball by `dt` seconds.
    ///
    /// Paddles are checked in slice order. With no paddles the ball rebounds
    /// off both ends and never scores. Negative or NaN `dt` counts as zero.
    pub fn advance<R: Rng>(
        &mut self,
        dt: f32,
        paddles: &[Paddle],
        tables: &SpeedTables,
        rng: &mut R,
    ) -> Option<ScoreEvent> {
        self.contacts = Contacts::default();
        let dt = dt.max(0.0);

        if let BallState::Serving { wait } = &mut self.state {
            *wait -= dt;
            if *wait > 0.0 {
                return None;
            }
            self.go_live(tables, rng);
        }

        self.body.integrate(dt);
        self.bounce_off_walls(tables);
        self.strike_paddles(paddles, tables);
        self.check_exit(!paddles.is_empty())
    }

    fn park(&mut self) {
        self.state = BallState::Serving {
            wait: self.serve_delay,
        };
        self.body.pos = self.serve_origin();
    }

    fn go_live<R: Rng>(&mut self, tables: &SpeedTables, rng: &mut R) {
        self.state = BallState::Live;
        self.rally_hits = 0;
        self.body.pos = Vec2::new(self.serve_x, rng.random_range(self.min.y..=self.max.y));
        self.body.vel.x = self.serve_direction * tables.horizontal_speed(0);
        self.set_load(rng.random_range(0..tables.load_count()), tables);
        log::debug!(
            "Serve: heading {}, y {:.3}, load {}",
            self.serve_direction,
            self.body.pos.y,
            self.load
        );
    }

    fn bounce_off_walls(&mut self, tables: &SpeedTables) {
        let y = self.body.pos.y;
        let mirrored = if y > self.max.y {
            self.max.y * 2.0 - y
        } else if y < self.min.y {
            self.min.y * 2.0 - y
        } else {
            return;
        };
        // Clamp catches a tick long enough to carry the ball past both walls
        self.body.pos.y = mirrored.clamp(self.min.y, self.max.y);
        self.set_load(tables.mirror_load(self.load), tables);
        self.contacts.wall = true;
    }

    fn strike_paddles(&mut self, paddles: &[Paddle], tables: &SpeedTables) {
        for paddle in paddles {
            if !paddle.overlaps(&self.body) {
                continue;
            }
            self.rally_hits = self.rally_hits.saturating_add(1);
            self.body.vel.x = paddle.direction() * tables.horizontal_speed(self.rally_hits);
            let offset = paddle.relative_hit_offset(&self.body);
            self.set_load(tables.vertical_load_from_offset(offset), tables);
            self.contacts.paddle = true;
        }
    }

    fn check_exit(&mut self, scoring: bool) -> Option<ScoreEvent> {
        let x = self.body.pos.x;
        let exit = if x < self.min.x {
            self.body.pos.x = self.min.x;
            self.body.vel.x = self.body.vel.x.abs();
            Exit::MinX
        } else if x > self.max.x {
            self.body.pos.x = self.max.x;
            self.body.vel.x = -self.body.vel.x.abs();
            Exit::MaxX
        } else {
            return None;
        };

        if !scoring {
            return None;
        }

        let scorer = self.scoring.scorer(exit);
        // Next serve heads from the scorer back toward center
        self.serve_direction = scorer.direction();
        self.park();
        log::debug!("{scorer:?} scores ({exit:?})");
        Some(ScoreEvent { scorer, exit })
    }
}
