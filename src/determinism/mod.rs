//! Logical clock and seeded randomness for reproducible rendering.
//!
//! Nothing here is process-global: a [`FrameContext`] is built by the caller for each frame
//! and handed to the pipeline by `&mut`. Frames rendered on different threads each own their
//! context, so no locking is needed.

mod clock;
mod rng;

pub use clock::FrameClock;
pub use rng::SeededRng;

use crate::foundation::core::{FrameIndex, Fps};

#[derive(Clone, Debug, Default)]
pub struct FrameContext {
    pub clock: FrameClock,
    pub rng: SeededRng,
}

impl FrameContext {
    pub fn new(seed: u64, time_secs: f64) -> Self {
        Self {
            clock: FrameClock::at(time_secs),
            rng: SeededRng::new(seed),
        }
    }

    /// Context for one frame of an exported sequence.
    ///
    /// The seed is mixed with the frame index so neighbouring frames draw different values
    /// while any single frame can be re-rendered in isolation.
    pub fn for_frame(seed: u64, frame: FrameIndex, fps: Fps) -> Self {
        let frame_seed = rng::mix64(seed ^ frame.0.wrapping_mul(0xD6E8_FEB8_6659_FD93));
        Self {
            clock: FrameClock::from_frame(frame, fps),
            rng: SeededRng::new(frame_seed),
        }
    }

    pub fn time(&self) -> f64 {
        self.clock.now()
    }

    pub fn set_time(&mut self, secs: f64) {
        self.clock.set(secs);
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.rng.set_seed(seed);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/determinism/context.rs"]
mod tests;
