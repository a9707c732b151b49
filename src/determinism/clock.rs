use crate::foundation::core::{FrameIndex, Fps};

/// Logical clock read by animated filters instead of wall-clock time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameClock {
    secs: f64,
}

impl FrameClock {
    pub fn at(secs: f64) -> Self {
        let mut clock = Self::default();
        clock.set(secs);
        clock
    }

    pub fn from_frame(frame: FrameIndex, fps: Fps) -> Self {
        Self::at(fps.frames_to_secs(frame.0))
    }

    /// Non-finite values are ignored.
    pub fn set(&mut self, secs: f64) {
        if secs.is_finite() {
            self.secs = secs;
        }
    }

    pub fn now(&self) -> f64 {
        self.secs
    }
}
