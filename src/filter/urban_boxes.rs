use kurbo::{BezPath, Shape};

use crate::determinism::FrameContext;
use crate::foundation::core::{Point, Rgb8};
use crate::foundation::error::PosefxResult;
use crate::params::{Choice, ColorParam, Param, ParamMut, Parameterized, Slider, Toggle};
use crate::pose::{self, Pose};
use crate::raster::shape::SHAPE_NAMES;
use crate::raster::{BoxShape, Canvas, Mask, PixelRect, RasterBuffer, SobelOptions, kernels};

pub const SIZE_MODES: &[&str] = &["Fixed", "Animated", "Random"];
pub const INNER_EFFECTS: &[&str] = &["None", "Pixelate", "Sobel", "Grayscale", "Blur", "Random"];

/// Joints that carry a box, in drawing order. "Next keypoint" for rotation follows this order.
pub const BOX_JOINTS: &[usize] = &[
    pose::NOSE,
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

const MIN_BOX_SIZE: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeMode {
    Fixed,
    Animated,
    Random,
}

/// Pixel algorithm applied inside a shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InnerEffect {
    Pixelate,
    Sobel,
    Grayscale,
    Blur,
}

impl InnerEffect {
    const ALL: [InnerEffect; 4] = [Self::Pixelate, Self::Sobel, Self::Grayscale, Self::Blur];

    pub fn run(self, crop: &mut RasterBuffer, pixel_size: u32, sobel: SobelOptions) {
        match self {
            Self::Pixelate => kernels::pixelate(crop, pixel_size),
            Self::Sobel => kernels::sobel(crop, sobel),
            Self::Grayscale => kernels::grayscale(crop),
            Self::Blur => kernels::box_blur(crop, kernels::BLUR_RADIUS),
        }
    }
}

/// Keypoint-anchored shapes, either flat-filled or used as a clip for a pixel effect.
#[derive(Clone, Debug, PartialEq)]
pub struct UrbanBoxes {
    pub box_size: Slider,
    pub size_mode: Choice,
    pub size_variance: Slider,
    pub animation_speed: Slider,
    pub shape: Choice,
    pub rotate_to_next: Toggle,
    pub inner_effect: Choice,
    pub pixel_size: Slider,
    pub edge_threshold: Slider,
    pub fill_color: ColorParam,
    pub fill_opacity: Slider,
    pub stroke_color: ColorParam,
    pub stroke_width: Slider,
}

impl Default for UrbanBoxes {
    fn default() -> Self {
        Self {
            box_size: Slider::new(60.0, 10.0, 200.0, 1.0),
            size_mode: Choice::new(0, SIZE_MODES),
            size_variance: Slider::new(0.3, 0.0, 1.0, 0.05),
            animation_speed: Slider::new(1.0, 0.0, 5.0, 0.1),
            shape: Choice::new(0, SHAPE_NAMES),
            rotate_to_next: Toggle::new(false),
            inner_effect: Choice::new(0, INNER_EFFECTS),
            pixel_size: Slider::new(8.0, 1.0, 40.0, 1.0),
            edge_threshold: Slider::new(60.0, 0.0, 255.0, 1.0),
            fill_color: ColorParam::new(Rgb8::new(255, 255, 255)),
            fill_opacity: Slider::new(0.35, 0.0, 1.0, 0.05),
            stroke_color: ColorParam::new(Rgb8::new(255, 255, 255)),
            stroke_width: Slider::new(2.0, 0.0, 10.0, 1.0),
        }
    }
}

impl UrbanBoxes {
    pub fn size_mode(&self) -> SizeMode {
        match self.size_mode.selected() {
            1 => SizeMode::Animated,
            2 => SizeMode::Random,
            _ => SizeMode::Fixed,
        }
    }

    pub fn box_shape(&self) -> BoxShape {
        BoxShape::from_index(self.shape.selected())
    }

    /// Size of the box drawn for the `index`-th joint.
    pub fn size_for(&self, index: usize, ctx: &mut FrameContext) -> f64 {
        let base = self.box_size.value();
        let variance = self.size_variance.value();
        let size = match self.size_mode() {
            SizeMode::Fixed => base,
            SizeMode::Animated => {
                let phase = std::f64::consts::TAU * ctx.time() * self.animation_speed.value()
                    + index as f64;
                base * (1.0 + variance * phase.sin())
            }
            SizeMode::Random => base * (1.0 + variance * f64::from(ctx.rng.range_f32(-1.0, 1.0))),
        };
        size.max(MIN_BOX_SIZE)
    }

    /// `None` means flat fill; `Random` is resolved with the frame's rng.
    fn inner_effect_for(&self, ctx: &mut FrameContext) -> Option<InnerEffect> {
        match self.inner_effect.selected() {
            1 => Some(InnerEffect::Pixelate),
            2 => Some(InnerEffect::Sobel),
            3 => Some(InnerEffect::Grayscale),
            4 => Some(InnerEffect::Blur),
            5 => Some(InnerEffect::ALL[ctx.rng.range_usize(0, InnerEffect::ALL.len())]),
            _ => None,
        }
    }

    fn angle_for(&self, index: usize, center: Point, pose: &Pose, width: u32, height: u32) -> f64 {
        if !self.rotate_to_next.enabled() {
            return 0.0;
        }
        let next = BOX_JOINTS[(index + 1) % BOX_JOINTS.len()];
        match pose.confident_position(next, width, height) {
            Some(target) => {
                let d = target - center;
                d.y.atan2(d.x)
            }
            None => 0.0,
        }
    }

    pub(crate) fn apply(
        &self,
        buf: &mut RasterBuffer,
        pose: &Pose,
        ctx: &mut FrameContext,
    ) -> PosefxResult<()> {
        let (w, h) = (buf.width(), buf.height());
        let sobel = SobelOptions {
            threshold: self.edge_threshold.value_f32(),
            ..SobelOptions::default()
        };

        for (index, &joint) in BOX_JOINTS.iter().enumerate() {
            let Some(center) = pose.confident_position(joint, w, h) else {
                continue;
            };
            let size = self.size_for(index, ctx);
            let angle = self.angle_for(index, center, pose, w, h);
            let path = self.box_shape().path(center, size, angle);
            let effect = self.inner_effect_for(ctx);
            if let Some(effect) = effect {
                clip_effect(buf, &path, effect, self.pixel_size.value_u32(), sobel)?;
            }

            let stroke = self.stroke_width.value();
            let area = path.bounding_box().inflate(stroke, stroke);
            let Some(mut canvas) = Canvas::around(buf, area)? else {
                continue;
            };
            if effect.is_none() {
                canvas.fill(&path, self.fill_color.color(), self.fill_opacity.value_f32());
            }
            if stroke > 0.0 {
                canvas.stroke(&path, stroke, self.stroke_color.color(), 1.0);
            }
            canvas.finish(buf);
        }
        Ok(())
    }
}

/// Crops under `path`, runs `effect` on the crop and writes it back through the path's
/// anti-aliased coverage. Returns false when the clamped region or the mask is empty and
/// nothing was drawn.
pub(crate) fn clip_effect(
    buf: &mut RasterBuffer,
    path: &BezPath,
    effect: InnerEffect,
    pixel_size: u32,
    sobel: SobelOptions,
) -> PosefxResult<bool> {
    let Some(rect) = PixelRect::clamped(path.bounding_box(), buf.width(), buf.height()) else {
        return Ok(false);
    };
    let mask = Mask::from_paths(rect, std::slice::from_ref(path))?;
    if mask.covered() == 0 {
        return Ok(false);
    }
    let Some(mut crop) = buf.crop(rect) else {
        return Ok(false);
    };
    effect.run(&mut crop, pixel_size, sobel);
    buf.draw_buffer(&crop, i64::from(rect.x), i64::from(rect.y), Some(&mask), 1.0);
    Ok(true)
}

impl Parameterized for UrbanBoxes {
    fn params(&self) -> Vec<(&'static str, Param)> {
        vec![
            ("box_size", Param::Slider(self.box_size.clone())),
            ("size_mode", Param::Choice(self.size_mode.clone())),
            ("size_variance", Param::Slider(self.size_variance.clone())),
            ("animation_speed", Param::Slider(self.animation_speed.clone())),
            ("shape", Param::Choice(self.shape.clone())),
            ("rotate_to_next", Param::Toggle(self.rotate_to_next.clone())),
            ("inner_effect", Param::Choice(self.inner_effect.clone())),
            ("pixel_size", Param::Slider(self.pixel_size.clone())),
            ("edge_threshold", Param::Slider(self.edge_threshold.clone())),
            ("fill_color", Param::Color(self.fill_color.clone())),
            ("fill_opacity", Param::Slider(self.fill_opacity.clone())),
            ("stroke_color", Param::Color(self.stroke_color.clone())),
            ("stroke_width", Param::Slider(self.stroke_width.clone())),
        ]
    }

    fn param_mut(&mut self, key: &str) -> Option<ParamMut<'_>> {
        Some(match key {
            "box_size" => ParamMut::Slider(&mut self.box_size),
            "size_mode" => ParamMut::Choice(&mut self.size_mode),
            "size_variance" => ParamMut::Slider(&mut self.size_variance),
            "animation_speed" => ParamMut::Slider(&mut self.animation_speed),
            "shape" => ParamMut::Choice(&mut self.shape),
            "rotate_to_next" => ParamMut::Toggle(&mut self.rotate_to_next),
            "inner_effect" => ParamMut::Choice(&mut self.inner_effect),
            "pixel_size" => ParamMut::Slider(&mut self.pixel_size),
            "edge_threshold" => ParamMut::Slider(&mut self.edge_threshold),
            "fill_color" => ParamMut::Color(&mut self.fill_color),
            "fill_opacity" => ParamMut::Slider(&mut self.fill_opacity),
            "stroke_color" => ParamMut::Color(&mut self.stroke_color),
            "stroke_width" => ParamMut::Slider(&mut self.stroke_width),
            _ => return None,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/urban_boxes.rs"]
mod tests;
