//! Short-lived filtered boxes that pop up on individual joints.
//!
//! Unlike the filters in [`crate::filter`], this system carries state across frames: boxes
//! are spawned and evicted by frame count, so frames must be fed in order.

use std::collections::BTreeMap;

use kurbo::Shape;
use serde::{Deserialize, Serialize};

use crate::determinism::FrameContext;
use crate::filter::urban_boxes::InnerEffect;
use crate::foundation::core::{Point, Rect, Rgb8};
use crate::foundation::error::{PosefxError, PosefxResult};
use crate::pose::{self, Pose};
use crate::raster::shape::PATH_TOLERANCE;
use crate::raster::{Canvas, PixelRect, RasterBuffer, SobelOptions};

/// Joints that may carry a box.
pub const ACTIVE_JOINTS: &[usize] = &[
    pose::LEFT_SHOULDER,
    pose::RIGHT_SHOULDER,
    pose::LEFT_ELBOW,
    pose::RIGHT_ELBOW,
    pose::LEFT_WRIST,
    pose::RIGHT_WRIST,
    pose::LEFT_HIP,
    pose::RIGHT_HIP,
    pose::LEFT_KNEE,
    pose::RIGHT_KNEE,
    pose::LEFT_ANKLE,
    pose::RIGHT_ANKLE,
];

pub const PALETTE: &[Rgb8] = &[
    Rgb8::new(255, 59, 48),
    Rgb8::new(255, 204, 0),
    Rgb8::new(52, 199, 89),
    Rgb8::new(0, 199, 190),
    Rgb8::new(0, 122, 255),
    Rgb8::new(175, 82, 222),
];

const BOX_EFFECTS: [InnerEffect; 3] = [
    InnerEffect::Grayscale,
    InnerEffect::Sobel,
    InnerEffect::Pixelate,
];

/// How long a box lives before eviction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationPolicy {
    /// Lifetime drawn once when the box spawns.
    #[default]
    FixedAtSpawn,
    /// Lifetime redrawn from `[min_duration, max_duration]` at every eviction check.
    RerollEachCheck,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UrbanEffectsConfig {
    pub spawn_probability: f32,
    pub min_confidence: f32,
    pub min_size: f64,
    pub max_size: f64,
    /// Lifetime bounds in frames, inclusive.
    pub min_duration: u64,
    pub max_duration: u64,
    pub opacity: f32,
    pub border_width: f64,
    pub pixel_size: u32,
    pub duration_policy: DurationPolicy,
}

impl Default for UrbanEffectsConfig {
    fn default() -> Self {
        Self {
            spawn_probability: 0.05,
            min_confidence: pose::MIN_CONFIDENCE,
            min_size: 40.0,
            max_size: 120.0,
            min_duration: 10,
            max_duration: 45,
            opacity: 0.85,
            border_width: 2.0,
            pixel_size: 8,
            duration_policy: DurationPolicy::FixedAtSpawn,
        }
    }
}

impl UrbanEffectsConfig {
    pub fn validate(&self) -> PosefxResult<()> {
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(PosefxError::validation(
                "urban_effects.spawn_probability must be in [0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(PosefxError::validation(
                "urban_effects.min_confidence must be in [0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(PosefxError::validation(
                "urban_effects.opacity must be in [0, 1]",
            ));
        }
        if !(self.min_size.is_finite() && self.min_size > 0.0 && self.min_size <= self.max_size) {
            return Err(PosefxError::validation(
                "urban_effects sizes must satisfy 0 < min_size <= max_size",
            ));
        }
        if self.min_duration > self.max_duration {
            return Err(PosefxError::validation(
                "urban_effects.min_duration must be <= max_duration",
            ));
        }
        if !(self.border_width.is_finite() && self.border_width >= 0.0) {
            return Err(PosefxError::validation(
                "urban_effects.border_width must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct JointBox {
    pub joint_index: usize,
    pub x: f64,
    pub y: f64,
    pub score: f32,
    pub size: f64,
    pub effect: InnerEffect,
    pub frame_created: u64,
    pub duration: u64,
}

impl JointBox {
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(Point::new(self.x, self.y), (self.size, self.size))
    }
}

#[derive(Clone, Debug, Default)]
pub struct UrbanEffects {
    config: UrbanEffectsConfig,
    boxes: BTreeMap<usize, JointBox>,
    frame_counter: u64,
}

impl UrbanEffects {
    pub fn new(config: UrbanEffectsConfig) -> PosefxResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            boxes: BTreeMap::new(),
            frame_counter: 0,
        })
    }

    pub fn config(&self) -> &UrbanEffectsConfig {
        &self.config
    }

    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    pub fn active_boxes(&self) -> &BTreeMap<usize, JointBox> {
        &self.boxes
    }

    pub fn reset(&mut self) {
        self.boxes.clear();
        self.frame_counter = 0;
    }

    fn draw_duration(&self, ctx: &mut FrameContext) -> u64 {
        let (lo, hi) = (self.config.min_duration, self.config.max_duration);
        lo + ctx.rng.next_u64() % (hi - lo).saturating_add(1)
    }

    /// Advances one frame: evicts expired boxes, follows surviving joints, spawns new boxes.
    #[tracing::instrument(skip(self, pose, ctx), fields(frame = self.frame_counter + 1))]
    pub fn update_boxes(
        &mut self,
        pose: Option<&Pose>,
        width: u32,
        height: u32,
        ctx: &mut FrameContext,
    ) {
        self.frame_counter += 1;
        let now = self.frame_counter;

        let mut expired = Vec::new();
        for (&joint, b) in &self.boxes {
            let limit = match self.config.duration_policy {
                DurationPolicy::FixedAtSpawn => b.duration,
                DurationPolicy::RerollEachCheck => self.draw_duration(ctx),
            };
            if now - b.frame_created > limit {
                expired.push(joint);
            }
        }
        for joint in expired {
            self.boxes.remove(&joint);
            tracing::trace!(joint, "evicted joint box");
        }

        let Some(pose) = pose else {
            return;
        };

        for b in self.boxes.values_mut() {
            if let Some(kp) = pose.keypoint(b.joint_index)
                && kp.score > self.config.min_confidence
                && let Some(p) = pose.position(b.joint_index, width, height)
            {
                b.x = p.x;
                b.y = p.y;
                b.score = kp.score;
            }
        }

        for &joint in ACTIVE_JOINTS {
            if self.boxes.contains_key(&joint) {
                continue;
            }
            let Some(kp) = pose.keypoint(joint) else {
                continue;
            };
            if kp.score <= self.config.min_confidence {
                continue;
            }
            let Some(p) = pose.position(joint, width, height) else {
                continue;
            };
            if !ctx.rng.chance(self.config.spawn_probability) {
                continue;
            }
            let size = f64::from(ctx.rng.range_f32(
                self.config.min_size as f32,
                self.config.max_size as f32,
            ))
            .max(self.config.min_size);
            let effect = BOX_EFFECTS[ctx.rng.range_usize(0, BOX_EFFECTS.len())];
            let duration = self.draw_duration(ctx);
            self.boxes.insert(
                joint,
                JointBox {
                    joint_index: joint,
                    x: p.x,
                    y: p.y,
                    score: kp.score,
                    size,
                    effect,
                    frame_created: now,
                    duration,
                },
            );
        }
    }

    /// Filtered crop at the configured opacity, then a palette border, for every live box.
    pub fn draw_boxes(&self, buf: &mut RasterBuffer) -> PosefxResult<()> {
        let (w, h) = (buf.width(), buf.height());
        for b in self.boxes.values() {
            let Some(rect) = PixelRect::clamped(b.rect(), w, h) else {
                continue;
            };
            let Some(mut crop) = buf.crop(rect) else {
                continue;
            };
            b.effect
                .run(&mut crop, self.config.pixel_size, SobelOptions::default());
            buf.draw_buffer(
                &crop,
                i64::from(rect.x),
                i64::from(rect.y),
                None,
                self.config.opacity,
            );

            let bw = self.config.border_width;
            if bw > 0.0 {
                let r = b.rect();
                let Some(mut canvas) = Canvas::around(buf, r.inflate(bw, bw))? else {
                    continue;
                };
                let color = PALETTE[b.joint_index % PALETTE.len()];
                canvas.stroke(&r.to_path(PATH_TOLERANCE), bw, color, 1.0);
                canvas.finish(buf);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/urban/mod.rs"]
mod tests;
