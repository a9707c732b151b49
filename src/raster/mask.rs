use kurbo::BezPath;

use crate::foundation::core::Rgb8;
use crate::foundation::error::PosefxResult;
use crate::raster::buffer::PixelRect;
use crate::raster::draw::Canvas;

/// Coverage at or above which a pixel counts as inside.
const HALF_COVERED: u8 = 128;

/// Anti-aliased coverage mask used as a clip path, one byte per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    coverage: Vec<u8>,
}

impl Mask {
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            coverage: vec![0; width as usize * height as usize],
        }
    }

    /// Union of the filled `paths` over `region`. Paths are in buffer coordinates; mask
    /// coordinates are relative to the region's top-left corner.
    pub fn from_paths(region: PixelRect, paths: &[BezPath]) -> PosefxResult<Self> {
        let mut canvas = Canvas::over(region)?;
        for path in paths {
            canvas.fill(path, Rgb8::WHITE, 1.0);
        }
        let layer = canvas.render();
        Ok(Self {
            width: region.width,
            height: region.height,
            coverage: layer
                .data_as_u8_slice()
                .chunks_exact(4)
                .map(|px| px[3])
                .collect(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Coverage in 0..=255, zero outside the mask.
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.coverage[y as usize * self.width as usize + x as usize]
    }

    /// At least half covered.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.coverage(x, y) >= HALF_COVERED
    }

    pub fn covered(&self) -> usize {
        self.coverage.iter().filter(|c| **c >= HALF_COVERED).count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/mask.rs"]
mod tests;
