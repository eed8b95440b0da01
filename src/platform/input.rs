//! Player input boundary
//!
//! Physical paddle controllers report an analog axis. Only part of the axis
//! travel is comfortable to reach, so the reading is divided by a sensitivity
//! range before it becomes a paddle offset.

use std::f32::consts::TAU;

use crate::sim::{Side, TickInput};

/// Something that can be polled once per frame for player input
pub trait InputSource {
    /// Raw axis reading for a side's controller, nominally `[-1, 1]`
    fn axis(&mut self, side: Side) -> f32;

    /// True once per start button press
    fn take_start(&mut self) -> bool;

    /// True once per reset request
    fn take_reset(&mut self) -> bool {
        false
    }
}

/// Map a raw axis reading to a paddle offset in `[-1, 1]`
#[inline]
pub fn scale_axis(raw: f32, range: f32) -> f32 {
    (raw / range).clamp(-1.0, 1.0)
}

impl TickInput {
    /// Poll a source for one tick's worth of input
    pub fn sample<S: InputSource + ?Sized>(source: &mut S, range: f32) -> Self {
        let mut paddle_offsets = [0.0; 2];
        for side in Side::BOTH {
            paddle_offsets[side.index()] = scale_axis(source.axis(side), range);
        }
        Self {
            paddle_offsets,
            start: source.take_start(),
            reset: source.take_reset(),
        }
    }
}

/// Sinusoidal axis motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub amplitude: f32,
    /// Seconds per full cycle
    pub period: f32,
    /// Radians
    pub phase: f32,
}

impl Sweep {
    pub fn new(amplitude: f32, period: f32, phase: f32) -> Self {
        Self {
            amplitude,
            period,
            phase,
        }
    }

    pub fn sample(&self, time: f32) -> f32 {
        self.amplitude * (TAU * time / self.period + self.phase).sin()
    }
}

/// Deterministic input for headless runs: each controller follows a sweep
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    sweeps: [Sweep; 2],
    time: f32,
    start_pending: bool,
    reset_pending: bool,
}

impl ScriptedInput {
    pub fn new(left: Sweep, right: Sweep) -> Self {
        Self {
            sweeps: [left, right],
            time: 0.0,
            start_pending: false,
            reset_pending: false,
        }
    }

    /// Move the script forward
    pub fn advance(&mut self, dt: f32) {
        self.time += dt.max(0.0);
    }

    pub fn press_start(&mut self) {
        self.start_pending = true;
    }

    pub fn press_reset(&mut self) {
        self.reset_pending = true;
    }
}

impl InputSource for ScriptedInput {
    fn axis(&mut self, side: Side) -> f32 {
        self.sweeps[side.index()].sample(self.time)
    }

    fn take_start(&mut self) -> bool {
        std::mem::take(&mut self.start_pending)
    }

    fn take_reset(&mut self) -> bool {
        std::mem::take(&mut self.reset_pending)
    }
}
