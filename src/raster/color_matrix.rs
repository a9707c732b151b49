use crate::foundation::core::Rgb8;
use crate::raster::buffer::RasterBuffer;

// Luminance weights used by the saturation and hue-rotation matrices.
const LUM_R: f32 = 0.213;
const LUM_G: f32 = 0.715;
const LUM_B: f32 = 0.072;

/// 4×5 color matrix over 0..255 channels.
///
/// Row `i` computes `out_i = m[i*5]*R + m[i*5+1]*G + m[i*5+2]*B + m[i*5+3]*A + m[i*5+4]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMatrix(pub [f32; 20]);

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ColorMatrix {
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);

    #[rustfmt::skip]
    pub fn saturation(s: f32) -> Self {
        let inv = 1.0 - s;
        let (r, g, b) = (inv * LUM_R, inv * LUM_G, inv * LUM_B);
        Self([
            r + s, g,     b,     0.0, 0.0,
            r,     g + s, b,     0.0, 0.0,
            r,     g,     b + s, 0.0, 0.0,
            0.0,   0.0,   0.0,   1.0, 0.0,
        ])
    }

    /// Linear contrast around mid-gray plus an additive brightness offset.
    #[rustfmt::skip]
    pub fn contrast_brightness(contrast: f32, brightness: f32) -> Self {
        let t = (1.0 - contrast) * 127.5 + brightness;
        Self([
            contrast, 0.0,      0.0,      0.0, t,
            0.0,      contrast, 0.0,      0.0, t,
            0.0,      0.0,      contrast, 0.0, t,
            0.0,      0.0,      0.0,      1.0, 0.0,
        ])
    }

    /// Luminance-preserving hue rotation.
    #[rustfmt::skip]
    pub fn hue_rotation(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self([
            LUM_R + cos * (1.0 - LUM_R) - sin * LUM_R,
            LUM_G - cos * LUM_G - sin * LUM_G,
            LUM_B - cos * LUM_B + sin * (1.0 - LUM_B),
            0.0, 0.0,

            LUM_R - cos * LUM_R + sin * 0.143,
            LUM_G + cos * (1.0 - LUM_G) + sin * 0.140,
            LUM_B - cos * LUM_B - sin * 0.283,
            0.0, 0.0,

            LUM_R - cos * LUM_R - sin * (1.0 - LUM_R),
            LUM_G - cos * LUM_G + sin * LUM_G,
            LUM_B + cos * (1.0 - LUM_B) + sin * LUM_B,
            0.0, 0.0,

            0.0, 0.0, 0.0, 1.0, 0.0,
        ])
    }

    /// Linear blend toward `tint` weighted by `strength` (0..=1).
    #[rustfmt::skip]
    pub fn tint(tint: Rgb8, strength: f32) -> Self {
        let s = strength.clamp(0.0, 1.0);
        let k = 1.0 - s;
        Self([
            k,   0.0, 0.0, 0.0, s * f32::from(tint.r),
            0.0, k,   0.0, 0.0, s * f32::from(tint.g),
            0.0, 0.0, k,   0.0, s * f32::from(tint.b),
            0.0, 0.0, 0.0, 1.0, 0.0,
        ])
    }

    /// Matrix equivalent to applying `self` first and then `next`.
    pub fn then(&self, next: &ColorMatrix) -> ColorMatrix {
        let a = &self.0;
        let b = &next.0;
        let mut out = [0.0f32; 20];
        for row in 0..4 {
            for col in 0..5 {
                let mut v = 0.0;
                for k in 0..4 {
                    v += b[row * 5 + k] * a[k * 5 + col];
                }
                if col == 4 {
                    v += b[row * 5 + 4];
                }
                out[row * 5 + col] = v;
            }
        }
        ColorMatrix(out)
    }

    pub fn is_identity(&self) -> bool {
        self.0
            .iter()
            .zip(Self::IDENTITY.0.iter())
            .all(|(a, b)| (a - b).abs() <= 1e-6)
    }

    pub fn apply(&self, buf: &mut RasterBuffer) {
        let m = &self.0;
        for px in buf.as_bytes_mut().chunks_exact_mut(4) {
            let src = [
                f32::from(px[0]),
                f32::from(px[1]),
                f32::from(px[2]),
                f32::from(px[3]),
            ];
            for row in 0..4 {
                let r = row * 5;
                let v = m[r] * src[0] + m[r + 1] * src[1] + m[r + 2] * src[2] + m[r + 3] * src[3]
                    + m[r + 4];
                px[row] = v.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/color_matrix.rs"]
mod tests;
