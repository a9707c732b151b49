use crate::determinism::FrameContext;
use crate::foundation::core::Rgb8;
use crate::foundation::error::PosefxResult;
use crate::params::{Choice, ColorParam, Param, ParamMut, Parameterized, Slider, Toggle};
use crate::pose::{self, Pose};
use crate::raster::{Canvas, RasterBuffer};

pub const KEYPOINT_SETS: &[&str] = &["All", "Upper body", "Extremities"];

const UPPER_BODY: &[usize] = &[
    pose::NOSE,
    pose::LEFT_EYE,
    pose::RIGHT_EYE,
    pose::LEFT_EAR,
    pose::RIGHT_EAR,
    pose::LEFT_SHOULDER,
    pose::RIGHT_SHOULDER,
    pose::LEFT_ELBOW,
    pose::RIGHT_ELBOW,
    pose::LEFT_WRIST,
    pose::RIGHT_WRIST,
];

const EXTREMITIES: &[usize] = &[
    pose::NOSE,
    pose::LEFT_WRIST,
    pose::RIGHT_WRIST,
    pose::LEFT_ANKLE,
    pose::RIGHT_ANKLE,
];

/// Soft halo plus solid disc on each confident keypoint, pulsing with the frame clock.
#[derive(Clone, Debug, PartialEq)]
pub struct GlowDots {
    pub dot_radius: Slider,
    pub glow_scale: Slider,
    pub glow_opacity: Slider,
    pub color: ColorParam,
    pub pulse: Toggle,
    pub pulse_speed: Slider,
    pub keypoint_set: Choice,
}

impl Default for GlowDots {
    fn default() -> Self {
        Self {
            dot_radius: Slider::new(6.0, 1.0, 40.0, 1.0),
            glow_scale: Slider::new(2.5, 1.0, 5.0, 0.1),
            glow_opacity: Slider::new(0.3, 0.0, 1.0, 0.05),
            color: ColorParam::new(Rgb8::new(0, 255, 255)),
            pulse: Toggle::new(true),
            pulse_speed: Slider::new(1.0, 0.0, 5.0, 0.1),
            keypoint_set: Choice::new(0, KEYPOINT_SETS),
        }
    }
}

impl GlowDots {
    pub fn joints(&self) -> Vec<usize> {
        match self.keypoint_set.selected() {
            1 => UPPER_BODY.to_vec(),
            2 => EXTREMITIES.to_vec(),
            _ => (0..pose::JOINT_COUNT).collect(),
        }
    }

    /// Radius multiplier at logical time `secs`.
    pub fn pulse_factor(&self, secs: f64) -> f64 {
        if !self.pulse.enabled() {
            return 1.0;
        }
        0.8 + 0.2 * (std::f64::consts::TAU * secs * self.pulse_speed.value()).sin()
    }

    pub(crate) fn apply(
        &self,
        buf: &mut RasterBuffer,
        pose: &Pose,
        ctx: &mut FrameContext,
    ) -> PosefxResult<()> {
        let radius = self.dot_radius.value() * self.pulse_factor(ctx.time());
        let halo = radius * self.glow_scale.value();
        let color = self.color.color();
        let (w, h) = (buf.width(), buf.height());

        let mut canvas = Canvas::for_buffer(buf)?;
        for joint in self.joints() {
            let Some(center) = pose.confident_position(joint, w, h) else {
                continue;
            };
            canvas.fill_circle(center, halo, color, self.glow_opacity.value_f32());
            canvas.fill_circle(center, radius, color, 1.0);
        }
        canvas.finish(buf);
        Ok(())
    }
}

impl Parameterized for GlowDots {
    fn params(&self) -> Vec<(&'static str, Param)> {
        vec![
            ("dot_radius", Param::Slider(self.dot_radius.clone())),
            ("glow_scale", Param::Slider(self.glow_scale.clone())),
            ("glow_opacity", Param::Slider(self.glow_opacity.clone())),
            ("color", Param::Color(self.color.clone())),
            ("pulse", Param::Toggle(self.pulse.clone())),
            ("pulse_speed", Param::Slider(self.pulse_speed.clone())),
            ("keypoint_set", Param::Choice(self.keypoint_set.clone())),
        ]
    }

    fn param_mut(&mut self, key: &str) -> Option<ParamMut<'_>> {
        Some(match key {
            "dot_radius" => ParamMut::Slider(&mut self.dot_radius),
            "glow_scale" => ParamMut::Slider(&mut self.glow_scale),
            "glow_opacity" => ParamMut::Slider(&mut self.glow_opacity),
            "color" => ParamMut::Color(&mut self.color),
            "pulse" => ParamMut::Toggle(&mut self.pulse),
            "pulse_speed" => ParamMut::Slider(&mut self.pulse_speed),
            "keypoint_set" => ParamMut::Choice(&mut self.keypoint_set),
            _ => return None,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/glow_dots.rs"]
mod tests;
