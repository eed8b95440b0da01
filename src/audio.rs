//! Sound event boundary
//!
//! The simulation reports what happened; a sink decides what it sounds like.
//! Each effect carries the square-wave tone the reference machine beeps.

use crate::sim::TickEvents;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits top or bottom wall
    WallBounce,
    /// A point was scored
    Score,
}

/// A plain square-wave beep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_secs: f32,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 3] = [
        SoundEffect::PaddleHit,
        SoundEffect::WallBounce,
        SoundEffect::Score,
    ];

    pub fn tone(self) -> Tone {
        let (frequency_hz, duration_secs) = match self {
            SoundEffect::PaddleHit => (491.0, 0.016),
            SoundEffect::WallBounce => (246.0, 0.016),
            SoundEffect::Score => (246.0, 0.220),
        };
        Tone {
            frequency_hz,
            duration_secs,
        }
    }
}

impl TickEvents {
    /// Effects to play for this tick, in a fixed order
    pub fn sounds(&self) -> impl Iterator<Item = SoundEffect> + use<> {
        [
            (self.paddle_hit, SoundEffect::PaddleHit),
            (self.wall_bounce, SoundEffect::WallBounce),
            (self.scored.is_some(), SoundEffect::Score),
        ]
        .into_iter()
        .filter_map(|(fired, effect)| fired.then_some(effect))
    }
}

/// Anything that can play a sound effect
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect) {
        let tone = effect.tone();
        log::debug!(
            "Sound {effect:?}: {} Hz for {} ms",
            tone.frequency_hz,
            tone.duration_secs * 1000.0
        );
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, muted: false }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Play everything a tick reported
    pub fn dispatch(&mut self, events: &TickEvents) {
        if self.muted {
            return;
        }
        for effect in events.sounds() {
            self.sink.play(effect);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
