//! Whole-buffer pixel algorithms. Callers crop first to restrict them to a region.

use crate::raster::buffer::RasterBuffer;

/// Box blur radius used by region effects.
pub const BLUR_RADIUS: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SobelOptions {
    pub threshold: f32,
    pub scale: f32,
    pub invert: bool,
}

impl Default for SobelOptions {
    fn default() -> Self {
        Self {
            threshold: 100.0,
            scale: 1.0,
            invert: false,
        }
    }
}

/// Replaces each pixel with its thresholded Sobel gradient magnitude (gray = channel mean).
/// Border pixels have no full 3×3 neighbourhood and get magnitude 0. Alpha is kept.
pub fn sobel(buf: &mut RasterBuffer, opts: SobelOptions) {
    let (w, h) = (buf.width() as usize, buf.height() as usize);
    if w == 0 || h == 0 {
        return;
    }
    let gray: Vec<f32> = buf
        .as_bytes()
        .chunks_exact(4)
        .map(|px| (f32::from(px[0]) + f32::from(px[1]) + f32::from(px[2])) / 3.0)
        .collect();

    let mut mags = vec![0u8; w * h];
    for y in 1..h.saturating_sub(1) {
        for x in 1..w.saturating_sub(1) {
            let g = |dx: usize, dy: usize| gray[(y + dy - 1) * w + (x + dx - 1)];
            let gx = -g(0, 0) + g(2, 0) - 2.0 * g(0, 1) + 2.0 * g(2, 1) - g(0, 2) + g(2, 2);
            let gy = -g(0, 0) - 2.0 * g(1, 0) - g(2, 0) + g(0, 2) + 2.0 * g(1, 2) + g(2, 2);
            let mag = (gx * gx + gy * gy).sqrt() * opts.scale;
            if mag > opts.threshold {
                mags[y * w + x] = mag.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    for (px, &m) in buf.as_bytes_mut().chunks_exact_mut(4).zip(&mags) {
        let v = if opts.invert { 255 - m } else { m };
        px[0] = v;
        px[1] = v;
        px[2] = v;
    }
}

/// Luma via `0.299R + 0.587G + 0.114B`.
pub fn grayscale(buf: &mut RasterBuffer) {
    for px in buf.as_bytes_mut().chunks_exact_mut(4) {
        let l = 0.299 * f32::from(px[0]) + 0.587 * f32::from(px[1]) + 0.114 * f32::from(px[2]);
        let l = l.round().clamp(0.0, 255.0) as u8;
        px[0] = l;
        px[1] = l;
        px[2] = l;
    }
}

/// Tiles the buffer into `block`×`block` cells and fills each with its center pixel.
/// A block size of 0 or 1 leaves the buffer unchanged.
pub fn pixelate(buf: &mut RasterBuffer, block: u32) {
    if block <= 1 {
        return;
    }
    let (w, h) = (buf.width(), buf.height());
    let mut by = 0;
    while by < h {
        let bh = block.min(h - by);
        let mut bx = 0;
        while bx < w {
            let bw = block.min(w - bx);
            let cx = i64::from(bx + bw / 2);
            let cy = i64::from(by + bh / 2);
            if let Some(sample) = buf.pixel(cx, cy) {
                for y in by..by + bh {
                    for x in bx..bx + bw {
                        buf.set_pixel(i64::from(x), i64::from(y), sample);
                    }
                }
            }
            bx += block;
        }
        by += block;
    }
}

/// Mean over the `(2r+1)`² window, counting only in-bounds samples. Alpha is kept.
pub fn box_blur(buf: &mut RasterBuffer, radius: u32) {
    if radius == 0 || buf.is_empty() {
        return;
    }
    let (w, h) = (buf.width() as usize, buf.height() as usize);
    let r = radius as usize;
    let src = buf.as_bytes().to_vec();

    // Horizontal window sums, stored unnormalized.
    let mut row_sums = vec![[0u32; 3]; w * h];
    for y in 0..h {
        for x in 0..w {
            let lo = x.saturating_sub(r);
            let hi = (x + r).min(w - 1);
            let mut acc = [0u32; 3];
            for sx in lo..=hi {
                let i = (y * w + sx) * 4;
                for c in 0..3 {
                    acc[c] += u32::from(src[i + c]);
                }
            }
            row_sums[y * w + x] = acc;
        }
    }

    let out = buf.as_bytes_mut();
    for y in 0..h {
        let lo_y = y.saturating_sub(r);
        let hi_y = (y + r).min(h - 1);
        for x in 0..w {
            let lo_x = x.saturating_sub(r);
            let hi_x = (x + r).min(w - 1);
            let count = ((hi_x - lo_x + 1) * (hi_y - lo_y + 1)) as u32;
            let mut acc = [0u32; 3];
            for sy in lo_y..=hi_y {
                let s = row_sums[sy * w + x];
                for c in 0..3 {
                    acc[c] += s[c];
                }
            }
            let i = (y * w + x) * 4;
            for c in 0..3 {
                out[i + c] = ((acc[c] + count / 2) / count) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/kernels.rs"]
mod tests;
