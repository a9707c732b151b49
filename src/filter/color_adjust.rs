use crate::foundation::core::Rgb8;
use crate::foundation::error::PosefxResult;
use crate::params::{ColorParam, Param, ParamMut, Parameterized, Slider};
use crate::raster::{ColorMatrix, RasterBuffer};

/// Contrast / saturation / brightness / hue / tint folded into one color matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorAdjust {
    pub contrast: Slider,
    pub saturation: Slider,
    pub brightness: Slider,
    pub hue: Slider,
    pub tint_color: ColorParam,
    pub tint_strength: Slider,
}

impl Default for ColorAdjust {
    fn default() -> Self {
        Self {
            contrast: Slider::new(1.0, 0.0, 2.0, 0.01),
            saturation: Slider::new(1.0, 0.0, 2.0, 0.01),
            brightness: Slider::new(0.0, -100.0, 100.0, 1.0),
            hue: Slider::new(0.0, -180.0, 180.0, 1.0),
            tint_color: ColorParam::new(Rgb8::new(255, 140, 0)),
            tint_strength: Slider::new(0.0, 0.0, 1.0, 0.01),
        }
    }
}

impl ColorAdjust {
    pub fn matrix(&self) -> ColorMatrix {
        ColorMatrix::saturation(self.saturation.value_f32())
            .then(&ColorMatrix::contrast_brightness(
                self.contrast.value_f32(),
                self.brightness.value_f32(),
            ))
            .then(&ColorMatrix::hue_rotation(self.hue.value_f32()))
            .then(&ColorMatrix::tint(
                self.tint_color.color(),
                self.tint_strength.value_f32(),
            ))
    }

    pub(crate) fn apply(&self, buf: &mut RasterBuffer) -> PosefxResult<()> {
        let m = self.matrix();
        if !m.is_identity() {
            m.apply(buf);
        }
        Ok(())
    }
}

impl Parameterized for ColorAdjust {
    fn params(&self) -> Vec<(&'static str, Param)> {
        vec![
            ("contrast", Param::Slider(self.contrast.clone())),
            ("saturation", Param::Slider(self.saturation.clone())),
            ("brightness", Param::Slider(self.brightness.clone())),
            ("hue", Param::Slider(self.hue.clone())),
            ("tint_color", Param::Color(self.tint_color.clone())),
            ("tint_strength", Param::Slider(self.tint_strength.clone())),
        ]
    }

    fn param_mut(&mut self, key: &str) -> Option<ParamMut<'_>> {
        Some(match key {
            "contrast" => ParamMut::Slider(&mut self.contrast),
            "saturation" => ParamMut::Slider(&mut self.saturation),
            "brightness" => ParamMut::Slider(&mut self.brightness),
            "hue" => ParamMut::Slider(&mut self.hue),
            "tint_color" => ParamMut::Color(&mut self.tint_color),
            "tint_strength" => ParamMut::Slider(&mut self.tint_strength),
            _ => return None,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/color_adjust.rs"]
mod tests;
