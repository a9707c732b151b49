//! Anti-aliased vector drawing over [`RasterBuffer`], rasterized by `vello_cpu`.
//!
//! `vello_cpu` renders into a fresh surface, so a [`Canvas`] collects fills and strokes for one
//! region of the frame, renders them to a transparent premultiplied layer and composites that
//! layer over the buffer in [`Canvas::finish`].

use kurbo::{BezPath, Circle, PathEl, Shape};

use crate::foundation::core::{Point, Rect, Rgb8};
use crate::foundation::error::{PosefxError, PosefxResult};
use crate::raster::buffer::{PixelRect, RasterBuffer};
use crate::raster::shape::PATH_TOLERANCE;

pub struct Canvas {
    ctx: vello_cpu::RenderContext,
    region: PixelRect,
    width: u16,
    height: u16,
    ops: usize,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("region", &self.region)
            .field("ops", &self.ops)
            .finish_non_exhaustive()
    }
}

impl Canvas {
    /// Canvas covering `region`, drawn in buffer coordinates.
    pub fn over(region: PixelRect) -> PosefxResult<Self> {
        let (width, height) = surface_size(region.width, region.height)?;
        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            -f64::from(region.x),
            -f64::from(region.y),
        )));
        Ok(Self {
            ctx,
            region,
            width,
            height,
            ops: 0,
        })
    }

    /// Canvas over the whole buffer.
    pub fn for_buffer(buf: &RasterBuffer) -> PosefxResult<Self> {
        let region = buf
            .full_rect()
            .ok_or_else(|| PosefxError::raster("cannot draw on an empty buffer"))?;
        Self::over(region)
    }

    /// Canvas over the part of `area` that lies inside `buf`, `None` when nothing does.
    pub fn around(buf: &RasterBuffer, area: Rect) -> PosefxResult<Option<Self>> {
        PixelRect::clamped(area, buf.width(), buf.height())
            .map(Self::over)
            .transpose()
    }

    pub fn region(&self) -> PixelRect {
        self.region
    }

    pub fn fill(&mut self, path: &BezPath, color: Rgb8, opacity: f32) {
        let path = path_to_cpu(path);
        self.paint(color, opacity, |ctx| ctx.fill_path(&path));
    }

    /// Strokes `path` with round caps and joins.
    pub fn stroke(&mut self, path: &BezPath, width: f64, color: Rgb8, opacity: f32) {
        if !(width.is_finite() && width > 0.0) {
            return;
        }
        let path = path_to_cpu(path);
        self.ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(width)
                .with_caps(vello_cpu::kurbo::Cap::Round)
                .with_join(vello_cpu::kurbo::Join::Round),
        );
        self.paint(color, opacity, |ctx| ctx.stroke_path(&path));
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Rgb8, opacity: f32) {
        if !(radius.is_finite() && radius > 0.0 && center.x.is_finite() && center.y.is_finite()) {
            return;
        }
        self.fill(
            &Circle::new(center, radius).to_path(PATH_TOLERANCE),
            color,
            opacity,
        );
    }

    pub fn line(&mut self, a: Point, b: Point, width: f64, color: Rgb8, opacity: f32) {
        if !(a.x.is_finite() && a.y.is_finite() && b.x.is_finite() && b.y.is_finite()) {
            return;
        }
        let mut path = BezPath::new();
        path.move_to(a);
        path.line_to(b);
        self.stroke(&path, width, color, opacity);
    }

    fn paint(
        &mut self,
        color: Rgb8,
        opacity: f32,
        draw: impl FnOnce(&mut vello_cpu::RenderContext),
    ) {
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity <= 0.0 {
            return;
        }
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, 255));
        if opacity < 1.0 {
            self.ctx.push_opacity_layer(opacity);
        }
        draw(&mut self.ctx);
        if opacity < 1.0 {
            self.ctx.pop_layer();
        }
        self.ops += 1;
    }

    /// Premultiplied RGBA8 layer of everything drawn so far, sized to the region.
    pub(crate) fn render(&mut self) -> vello_cpu::Pixmap {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        if self.ops > 0 {
            self.ctx.flush();
            self.ctx.render_to_pixmap(&mut pixmap);
        }
        pixmap
    }

    /// Composites the drawing over `buf`.
    pub fn finish(mut self, buf: &mut RasterBuffer) {
        if self.ops == 0 {
            return;
        }
        let layer = self.render();
        buf.composite_premul(self.region, layer.data_as_u8_slice());
    }
}

fn surface_size(width: u32, height: u32) -> PosefxResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PosefxError::raster(format!("canvas width {width} exceeds u16")))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PosefxError::raster(format!("canvas height {height} exceeds u16")))?;
    if w == 0 || h == 0 {
        return Err(PosefxError::raster("canvas must be non-empty"));
    }
    Ok((w, h))
}

fn path_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let pt = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/raster/draw.rs"]
mod tests;
