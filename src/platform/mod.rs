//! Platform boundary
//!
//! The simulation never reads devices or clocks itself. These traits are the
//! seams where a frontend plugs in:
//! - Input (analog paddle axes, start/reset buttons)
//! - Frame time

pub mod clock;
pub mod input;

pub use clock::{FixedClock, FrameClock, SystemClock};
pub use input::{InputSource, ScriptedInput, scale_axis};
