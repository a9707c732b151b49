use crate::foundation::core::Rgb8;
use crate::foundation::error::PosefxResult;
use crate::params::{ColorParam, Param, ParamMut, Parameterized, Slider, Toggle};
use crate::pose::{BONES, JOINT_COUNT, Pose};
use crate::raster::{Canvas, RasterBuffer};

/// Bones between confident joint pairs, then joint discs on top.
#[derive(Clone, Debug, PartialEq)]
pub struct Skeleton {
    pub line_width: Slider,
    pub line_color: ColorParam,
    pub joint_radius: Slider,
    pub joint_color: ColorParam,
    pub show_joints: Toggle,
}

impl Default for Skeleton {
    fn default() -> Self {
        Self {
            line_width: Slider::new(3.0, 1.0, 12.0, 1.0),
            line_color: ColorParam::new(Rgb8::new(0, 255, 0)),
            joint_radius: Slider::new(4.0, 0.0, 15.0, 1.0),
            joint_color: ColorParam::new(Rgb8::WHITE),
            show_joints: Toggle::new(true),
        }
    }
}

impl Skeleton {
    pub(crate) fn apply(&self, buf: &mut RasterBuffer, pose: &Pose) -> PosefxResult<()> {
        let (w, h) = (buf.width(), buf.height());
        let mut canvas = Canvas::for_buffer(buf)?;
        for &(a, b) in BONES {
            let (Some(pa), Some(pb)) = (
                pose.confident_position(a, w, h),
                pose.confident_position(b, w, h),
            ) else {
                continue;
            };
            canvas.line(
                pa,
                pb,
                self.line_width.value(),
                self.line_color.color(),
                1.0,
            );
        }

        if self.show_joints.enabled() {
            for joint in 0..JOINT_COUNT {
                if let Some(p) = pose.confident_position(joint, w, h) {
                    canvas.fill_circle(
                        p,
                        self.joint_radius.value(),
                        self.joint_color.color(),
                        1.0,
                    );
                }
            }
        }
        canvas.finish(buf);
        Ok(())
    }
}

impl Parameterized for Skeleton {
    fn params(&self) -> Vec<(&'static str, Param)> {
        vec![
            ("line_width", Param::Slider(self.line_width.clone())),
            ("line_color", Param::Color(self.line_color.clone())),
            ("joint_radius", Param::Slider(self.joint_radius.clone())),
            ("joint_color", Param::Color(self.joint_color.clone())),
            ("show_joints", Param::Toggle(self.show_joints.clone())),
        ]
    }

    fn param_mut(&mut self, key: &str) -> Option<ParamMut<'_>> {
        Some(match key {
            "line_width" => ParamMut::Slider(&mut self.line_width),
            "line_color" => ParamMut::Color(&mut self.line_color),
            "joint_radius" => ParamMut::Slider(&mut self.joint_radius),
            "joint_color" => ParamMut::Color(&mut self.joint_color),
            "show_joints" => ParamMut::Toggle(&mut self.show_joints),
            _ => return None,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/skeleton.rs"]
mod tests;
