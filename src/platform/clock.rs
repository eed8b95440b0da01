//! Frame time boundary

use std::time::Instant;

/// Hands the simulation the time elapsed since the previous frame
pub trait FrameClock {
    /// Seconds since the last call; never negative
    fn tick(&mut self) -> f32;
}

/// Constant frame time, for headless runs and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock {
    dt: f32,
}

impl FixedClock {
    pub fn from_rate(frame_rate: f32) -> Self {
        Self {
            dt: 1.0 / frame_rate,
        }
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

impl FrameClock for FixedClock {
    fn tick(&mut self) -> f32 {
        self.dt
    }
}

/// Wall clock time, capped so a stall doesn't fling the ball across the field
#[derive(Debug, Clone)]
pub struct SystemClock {
    last: Instant,
    max_dt: f32,
}

impl SystemClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last: Instant::now(),
            max_dt,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl FrameClock for SystemClock {
    fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt.min(self.max_dt)
    }
}
