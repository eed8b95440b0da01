//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in as `dt` from the caller
//! - Randomness only from the state's seeded RNG
//! - Stable paddle order (left then right)
//! - No rendering, audio or input dependencies

pub mod ball;
pub mod paddle;
pub mod rect;
pub mod state;
pub mod tables;
pub mod tick;

pub use ball::{Ball, BallState, Contacts, Exit, ScoreEvent};
pub use paddle::{Paddle, Side};
pub use rect::RectBody;
pub use state::{FieldView, GamePhase, GameState, Score};
pub use tables::SpeedTables;
pub use tick::{TickEvents, TickInput, tick};
