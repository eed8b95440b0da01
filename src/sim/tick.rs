//! Per-frame simulation tick
//!
//! Core game loop that advances the session by one frame.

use serde::{Deserialize, Serialize};

use super::paddle::Side;
use super::state::{GamePhase, GameState};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Normalized paddle offsets in `[-1, 1]`, left then right
    pub paddle_offsets: [f32; 2],
    /// Start a match (ignored while playing)
    pub start: bool,
    /// Abandon the running match
    pub reset: bool,
}

/// What happened during a tick, at most one of each
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickEvents {
    pub paddle_hit: bool,
    pub wall_bounce: bool,
    /// Side credited with a point
    pub scored: Option<Side>,
    /// Side that reached the point target, ending the match
    pub winner: Option<Side>,
}

impl TickEvents {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Advance the session by `dt` seconds.
///
/// Negative or NaN `dt` is treated as zero.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> TickEvents {
    let dt = dt.max(0.0);

    if input.reset {
        state.reset();
    }
    if input.start && state.phase == GamePhase::Attract {
        state.start();
    }

    state.time_ticks += 1;

    for paddle in &mut state.paddles {
        paddle.set_offset(input.paddle_offsets[paddle.side.index()]);
    }

    let edge = state
        .ball
        .advance(dt, &state.paddles, &state.tables, &mut state.rng);
    let contacts = state.ball.contacts();

    let mut events = TickEvents {
        paddle_hit: contacts.paddle,
        wall_bounce: contacts.wall,
        ..Default::default()
    };

    if let Some(edge) = edge
        && state.is_playing()
    {
        events.scored = Some(edge.scorer);
        events.winner = state.award_point(edge.scorer);
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_RATE;
    use crate::settings::Settings;
    use crate::sim::BallState;
    use glam::Vec2;

    const DT: f32 = 1.0 / FRAME_RATE;

    fn state() -> GameState {
        GameState::new(Settings::default(), 99999).unwrap()
    }

    #[test]
    fn test_start_input_begins_match() {
        let mut state = state();
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::Attract);

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(matches!(state.ball.state, BallState::Serving { .. }));
    }

    #[test]
    fn test_paddles_follow_input() {
        let mut state = state();
        state.start();
        let input = TickInput {
            paddle_offsets: [-1.0, 1.0],
            ..Default::default()
        };
        tick(&mut state, &input, DT);

        let (top, _) = state.paddles[0].travel();
        let (_, bottom) = state.paddles[1].travel();
        assert!((state.paddles[0].body.pos.y - top).abs() < 1e-6);
        assert!((state.paddles[1].body.pos.y - bottom).abs() < 1e-6);
    }

    #[test]
    fn test_attract_never_scores() {
        let mut state = state();
        for _ in 0..(FRAME_RATE as usize * 30) {
            let events = tick(&mut state, &TickInput::default(), DT);
            assert_eq!(events.scored, None);
            assert!(!events.paddle_hit);
        }
        assert_eq!(state.score, Default::default());
        assert!(state.ball.is_live());
    }

    #[test]
    fn test_score_is_credited() {
        let mut state = state();
        state.start();
        let (min, _) = state.ball.limits();
        state.ball.state = BallState::Live;
        state.ball.body.pos = Vec2::new(min.x - 0.001, 0.5);
        state.ball.body.vel.x = -0.26;

        let events = tick(&mut state, &TickInput::default(), 0.0);

        assert_eq!(events.scored, Some(Side::Right));
        assert_eq!(events.winner, None);
        assert_eq!(state.score.right, 1);
        assert!(!state.ball.is_live());
    }

    #[test]
    fn test_final_point_ends_match() {
        let mut state = state();
        state.start();
        state.score.left = state.settings().points_to_win - 1;
        let (_, max) = state.ball.limits();
        state.ball.state = BallState::Live;
        state.ball.body.pos = Vec2::new(max.x + 0.001, 0.5);

        let events = tick(&mut state, &TickInput::default(), 0.0);

        assert_eq!(events.scored, Some(Side::Left));
        assert_eq!(events.winner, Some(Side::Left));
        assert_eq!(state.phase, GamePhase::Attract);
        assert!(state.paddles.is_empty());
        assert!(state.ball.is_live());
    }

    #[test]
    fn test_reset_input() {
        let mut state = state();
        state.start();
        let input = TickInput {
            reset: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.phase, GamePhase::Attract);
    }

    #[test]
    fn test_determinism() {
        // Two states with the same seed and inputs stay identical
        let mut state1 = state();
        let mut state2 = state();

        let mut inputs = vec![TickInput::default(); 30];
        inputs.push(TickInput {
            start: true,
            ..Default::default()
        });
        for i in 0..600 {
            let phase = i as f32 * 0.05;
            inputs.push(TickInput {
                paddle_offsets: [phase.sin(), (phase * 0.7).cos()],
                ..Default::default()
            });
        }

        for input in &inputs {
            let a = tick(&mut state1, input, DT);
            let b = tick(&mut state2, input, DT);
            assert_eq!(a, b);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.ball.body, state2.ball.body);
        assert_eq!(state1.ball.load, state2.ball.load);
        assert_eq!(state1.score, state2.score);
    }
}
