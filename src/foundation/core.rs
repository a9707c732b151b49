//! Frame timing, colors and the `kurbo` geometry types used across the crate.

use crate::foundation::error::{PosefxError, PosefxResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Zero-based frame number within a sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frame rate as the rational `num/den` frames per second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Frames.
    pub num: u32,
    /// Seconds; must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Validated frame rate; both parts must be non-zero.
    pub fn new(num: u32, den: u32) -> PosefxResult<Self> {
        if den == 0 {
            return Err(PosefxError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(PosefxError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Length of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Logical time of frame `frames`, in seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

/// Straight (non-premultiplied) RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from possibly out-of-range channel values, clamping each to `0..=255`.
    pub fn from_clamped(r: i64, g: i64, b: i64) -> Self {
        fn ch(v: i64) -> u8 {
            v.clamp(0, 255) as u8
        }
        Self::new(ch(r), ch(g), ch(b))
    }

    /// Channels as `[r, g, b]`.
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
