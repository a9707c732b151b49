//! 17-joint COCO pose input.
//!
//! Keypoints arrive as a flat `f32` slice of `(y, x, score)` triples with coordinates
//! normalized to `[0, 1]`. [`Pose::from_flat`] validates the length; everything downstream
//! works in pixel space via [`Pose::position`].

use crate::foundation::core::Point;

pub const JOINT_COUNT: usize = 17;
pub const KEYPOINT_FLOATS: usize = JOINT_COUNT * 3;

/// Confidence a joint must exceed before filters draw it.
pub const MIN_CONFIDENCE: f32 = 0.3;

pub const NOSE: usize = 0;
pub const LEFT_EYE: usize = 1;
pub const RIGHT_EYE: usize = 2;
pub const LEFT_EAR: usize = 3;
pub const RIGHT_EAR: usize = 4;
pub const LEFT_SHOULDER: usize = 5;
pub const RIGHT_SHOULDER: usize = 6;
pub const LEFT_ELBOW: usize = 7;
pub const RIGHT_ELBOW: usize = 8;
pub const LEFT_WRIST: usize = 9;
pub const RIGHT_WRIST: usize = 10;
pub const LEFT_HIP: usize = 11;
pub const RIGHT_HIP: usize = 12;
pub const LEFT_KNEE: usize = 13;
pub const RIGHT_KNEE: usize = 14;
pub const LEFT_ANKLE: usize = 15;
pub const RIGHT_ANKLE: usize = 16;

/// Bone list drawn by the skeleton filter.
pub const BONES: &[(usize, usize)] = &[
    (NOSE, LEFT_EYE),
    (NOSE, RIGHT_EYE),
    (LEFT_EYE, LEFT_EAR),
    (RIGHT_EYE, RIGHT_EAR),
    (LEFT_SHOULDER, RIGHT_SHOULDER),
    (LEFT_SHOULDER, LEFT_ELBOW),
    (LEFT_ELBOW, LEFT_WRIST),
    (RIGHT_SHOULDER, RIGHT_ELBOW),
    (RIGHT_ELBOW, RIGHT_WRIST),
    (LEFT_SHOULDER, LEFT_HIP),
    (RIGHT_SHOULDER, RIGHT_HIP),
    (LEFT_HIP, RIGHT_HIP),
    (LEFT_HIP, LEFT_KNEE),
    (LEFT_KNEE, LEFT_ANKLE),
    (RIGHT_HIP, RIGHT_KNEE),
    (RIGHT_KNEE, RIGHT_ANKLE),
];

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keypoint {
    pub y: f32,
    pub x: f32,
    pub score: f32,
}

impl Keypoint {
    pub fn is_confident(&self) -> bool {
        self.score > MIN_CONFIDENCE
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pose {
    keypoints: [Keypoint; JOINT_COUNT],
}

impl Pose {
    /// `None` when fewer than [`KEYPOINT_FLOATS`] values are supplied. Extra values are ignored.
    pub fn from_flat(flat: &[f32]) -> Option<Self> {
        if flat.len() < KEYPOINT_FLOATS {
            return None;
        }
        let mut keypoints = [Keypoint {
            y: 0.0,
            x: 0.0,
            score: 0.0,
        }; JOINT_COUNT];
        for (kp, triple) in keypoints.iter_mut().zip(flat.chunks_exact(3)) {
            let score = if triple[2].is_finite() { triple[2] } else { 0.0 };
            *kp = Keypoint {
                y: triple[0],
                x: triple[1],
                score,
            };
        }
        Some(Self { keypoints })
    }

    pub fn keypoint(&self, joint: usize) -> Option<&Keypoint> {
        self.keypoints.get(joint)
    }

    pub fn keypoints(&self) -> &[Keypoint; JOINT_COUNT] {
        &self.keypoints
    }

    /// Pixel position of `joint` on a `width`×`height` frame.
    pub fn position(&self, joint: usize, width: u32, height: u32) -> Option<Point> {
        let kp = self.keypoints.get(joint)?;
        if !(kp.x.is_finite() && kp.y.is_finite()) {
            return None;
        }
        Some(Point::new(
            f64::from(kp.x) * f64::from(width),
            f64::from(kp.y) * f64::from(height),
        ))
    }

    /// Pixel position of `joint` if its confidence clears [`MIN_CONFIDENCE`].
    pub fn confident_position(&self, joint: usize, width: u32, height: u32) -> Option<Point> {
        if !self.keypoints.get(joint)?.is_confident() {
            return None;
        }
        self.position(joint, width, height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pose/mod.rs"]
mod tests;
