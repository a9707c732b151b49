use crate::foundation::core::Rect;
use crate::foundation::error::{PosefxError, PosefxResult};
use crate::raster::mask::Mask;

/// Integer pixel rectangle, always non-empty and inside the buffer it was clamped to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Clamps `rect` to a `width`×`height` buffer. Returns `None` when nothing is left.
    pub fn clamped(rect: Rect, width: u32, height: u32) -> Option<Self> {
        if !(rect.x0.is_finite() && rect.y0.is_finite() && rect.x1.is_finite() && rect.y1.is_finite())
        {
            return None;
        }
        let rect = rect.abs();
        let x0 = rect.x0.floor().clamp(0.0, f64::from(width)) as u32;
        let y0 = rect.y0.floor().clamp(0.0, f64::from(height)) as u32;
        let x1 = rect.x1.ceil().clamp(0.0, f64::from(width)) as u32;
        let y1 = rect.y1.ceil().clamp(0.0, f64::from(height)) as u32;
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }

    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.x + self.width),
            f64::from(self.y + self.height),
        )
    }
}

/// Straight-alpha RGBA8 raster, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self {
            width,
            height,
            data: rgba.repeat(width as usize * height as usize),
        }
    }

    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> PosefxResult<Self> {
        let expected_len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| PosefxError::raster("buffer size overflow"))?;
        if data.len() != expected_len {
            return Err(PosefxError::raster(format!(
                "expected {expected_len} bytes for {width}x{height} rgba8, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn full_rect(&self) -> Option<PixelRect> {
        PixelRect::clamped(
            Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height)),
            self.width,
            self.height,
        )
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    pub fn pixel(&self, x: i64, y: i64) -> Option<[u8; 4]> {
        let i = self.index(x, y)?;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Out-of-bounds writes are dropped.
    pub fn set_pixel(&mut self, x: i64, y: i64, rgba: [u8; 4]) {
        if let Some(i) = self.index(x, y) {
            self.data[i..i + 4].copy_from_slice(&rgba);
        }
    }

    /// Copies a sub-rectangle into a new buffer.
    pub fn crop(&self, rect: PixelRect) -> Option<RasterBuffer> {
        if rect.width == 0
            || rect.height == 0
            || rect.x + rect.width > self.width
            || rect.y + rect.height > self.height
        {
            return None;
        }
        let row_bytes = rect.width as usize * 4;
        let mut data = Vec::with_capacity(row_bytes * rect.height as usize);
        for row in rect.y..rect.y + rect.height {
            let start = (row as usize * self.width as usize + rect.x as usize) * 4;
            data.extend_from_slice(&self.data[start..start + row_bytes]);
        }
        Some(RasterBuffer {
            width: rect.width,
            height: rect.height,
            data,
        })
    }

    /// Draws `src` with its top-left corner at (`x`, `y`). With a mask (coordinates relative
    /// to `src`) each pixel is weighted by its coverage. Full weight replaces, partial weight
    /// blends the color channels.
    pub fn draw_buffer(
        &mut self,
        src: &RasterBuffer,
        x: i64,
        y: i64,
        mask: Option<&Mask>,
        opacity: f32,
    ) {
        let a = opacity.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        for sy in 0..src.height {
            for sx in 0..src.width {
                let weight = match mask {
                    Some(mask) => a * f32::from(mask.coverage(sx, sy)) / 255.0,
                    None => a,
                };
                if weight <= 0.0 {
                    continue;
                }
                let Some(s) = src.pixel(i64::from(sx), i64::from(sy)) else {
                    continue;
                };
                let (dx, dy) = (x + i64::from(sx), y + i64::from(sy));
                if weight >= 1.0 {
                    self.set_pixel(dx, dy, s);
                } else if let Some(i) = self.index(dx, dy) {
                    for c in 0..3 {
                        self.data[i + c] = lerp_u8(self.data[i + c], s[c], weight);
                    }
                }
            }
        }
    }

    /// Source-over of a premultiplied RGBA8 layer whose pixels map onto `region`.
    pub(crate) fn composite_premul(&mut self, region: PixelRect, layer: &[u8]) {
        let row_px = region.width as usize;
        for (n, s) in layer.chunks_exact(4).enumerate() {
            let sa = s[3];
            if sa == 0 {
                continue;
            }
            let x = i64::from(region.x) + (n % row_px) as i64;
            let y = i64::from(region.y) + (n / row_px) as i64;
            let Some(i) = self.index(x, y) else {
                continue;
            };
            let t = f32::from(sa) / 255.0;
            for c in 0..3 {
                self.data[i + c] = lerp_u8(self.data[i + c], unpremul(s[c], sa), t);
            }
            self.data[i + 3] = lerp_u8(self.data[i + 3], 255, t);
        }
    }

    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }
}

impl From<image::RgbaImage> for RasterBuffer {
    fn from(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

fn unpremul(c: u8, a: u8) -> u8 {
    let a = u16::from(a);
    ((u16::from(c) * 255 + a / 2) / a).min(255) as u8
}

pub(crate) fn lerp_u8(dst: u8, src: u8, t: f32) -> u8 {
    let v = f32::from(dst) + (f32::from(src) - f32::from(dst)) * t;
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;
