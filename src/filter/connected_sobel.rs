use crate::determinism::FrameContext;
use crate::foundation::core::{Point, Rect, Rgb8, Vec2};
use crate::foundation::error::PosefxResult;
use crate::params::{ColorParam, Param, ParamMut, Parameterized, Slider, Toggle};
use crate::raster::{Canvas, PixelRect, RasterBuffer, SobelOptions, kernels, shape};

const SUB_LINE_OPACITY: f32 = 0.7;

/// Sobel edges inside a centered square, overlaid with a closed loop through random points.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectedSobel {
    pub region_size: Slider,
    pub threshold: Slider,
    pub scale: Slider,
    pub invert: Toggle,
    pub point_count: Slider,
    pub line_width: Slider,
    pub line_color: ColorParam,
    pub sub_lines: Slider,
    pub sub_line_jitter: Slider,
    pub show_points: Toggle,
}

impl Default for ConnectedSobel {
    fn default() -> Self {
        Self {
            region_size: Slider::new(300.0, 50.0, 1000.0, 10.0),
            threshold: Slider::new(100.0, 0.0, 255.0, 1.0),
            scale: Slider::new(1.0, 0.1, 5.0, 0.1),
            invert: Toggle::new(false),
            point_count: Slider::new(8.0, 3.0, 30.0, 1.0),
            line_width: Slider::new(2.0, 1.0, 10.0, 1.0),
            line_color: ColorParam::new(Rgb8::WHITE),
            sub_lines: Slider::new(3.0, 0.0, 20.0, 1.0),
            sub_line_jitter: Slider::new(5.0, 0.0, 20.0, 1.0),
            show_points: Toggle::new(true),
        }
    }
}

impl ConnectedSobel {
    /// Centered square region, shrunk to fit the buffer.
    pub fn region(&self, width: u32, height: u32) -> Option<PixelRect> {
        let side = self.region_size.value().min(f64::from(width.min(height)));
        let (cx, cy) = (f64::from(width) / 2.0, f64::from(height) / 2.0);
        let half = (side / 2.0).floor();
        PixelRect::clamped(
            Rect::new(cx - half, cy - half, cx + half, cy + half).round(),
            width,
            height,
        )
    }

    pub fn sobel_options(&self) -> SobelOptions {
        SobelOptions {
            threshold: self.threshold.value_f32(),
            scale: self.scale.value_f32(),
            invert: self.invert.enabled(),
        }
    }

    /// Random loop vertices inside `region`, ordered so the loop never crosses itself.
    pub fn loop_points(&self, region: PixelRect, ctx: &mut FrameContext) -> Vec<Point> {
        let r = region.to_rect();
        let n = self.point_count.value_u32() as usize;
        let mut pts: Vec<Point> = (0..n)
            .map(|_| {
                let x = r.x0 + f64::from(ctx.rng.next_f32()) * r.width();
                let y = r.y0 + f64::from(ctx.rng.next_f32()) * r.height();
                Point::new(x, y)
            })
            .collect();
        shape::order_as_simple_loop(&mut pts, r.center());
        pts
    }

    pub(crate) fn apply(&self, buf: &mut RasterBuffer, ctx: &mut FrameContext) -> PosefxResult<()> {
        let Some(region) = self.region(buf.width(), buf.height()) else {
            return Ok(());
        };
        let Some(mut crop) = buf.crop(region) else {
            return Ok(());
        };
        kernels::sobel(&mut crop, self.sobel_options());
        buf.draw_buffer(&crop, i64::from(region.x), i64::from(region.y), None, 1.0);

        let pts = self.loop_points(region, ctx);
        let color = self.line_color.color();
        let width = self.line_width.value();
        let mut canvas = Canvas::for_buffer(buf)?;
        canvas.stroke(&shape::polygon_path(&pts), width, color, 1.0);

        let jitter = self.sub_line_jitter.value_f32();
        let sub_width = (width / 2.0).max(1.0);
        for _ in 0..self.sub_lines.value_u32() {
            let i = ctx.rng.range_usize(0, pts.len());
            let j = ctx.rng.range_usize(0, pts.len());
            let ja = Vec2::new(
                f64::from(ctx.rng.range_f32(-jitter, jitter)),
                f64::from(ctx.rng.range_f32(-jitter, jitter)),
            );
            let jb = Vec2::new(
                f64::from(ctx.rng.range_f32(-jitter, jitter)),
                f64::from(ctx.rng.range_f32(-jitter, jitter)),
            );
            if i == j {
                continue;
            }
            canvas.line(pts[i] + ja, pts[j] + jb, sub_width, color, SUB_LINE_OPACITY);
        }

        if self.show_points.enabled() {
            for p in &pts {
                canvas.fill_circle(*p, width * 1.5, color, 1.0);
            }
        }
        canvas.finish(buf);
        Ok(())
    }
}

impl Parameterized for ConnectedSobel {
    fn params(&self) -> Vec<(&'static str, Param)> {
        vec![
            ("region_size", Param::Slider(self.region_size.clone())),
            ("threshold", Param::Slider(self.threshold.clone())),
            ("scale", Param::Slider(self.scale.clone())),
            ("invert", Param::Toggle(self.invert.clone())),
            ("point_count", Param::Slider(self.point_count.clone())),
            ("line_width", Param::Slider(self.line_width.clone())),
            ("line_color", Param::Color(self.line_color.clone())),
            ("sub_lines", Param::Slider(self.sub_lines.clone())),
            ("sub_line_jitter", Param::Slider(self.sub_line_jitter.clone())),
            ("show_points", Param::Toggle(self.show_points.clone())),
        ]
    }

    fn param_mut(&mut self, key: &str) -> Option<ParamMut<'_>> {
        Some(match key {
            "region_size" => ParamMut::Slider(&mut self.region_size),
            "threshold" => ParamMut::Slider(&mut self.threshold),
            "scale" => ParamMut::Slider(&mut self.scale),
            "invert" => ParamMut::Toggle(&mut self.invert),
            "point_count" => ParamMut::Slider(&mut self.point_count),
            "line_width" => ParamMut::Slider(&mut self.line_width),
            "line_color" => ParamMut::Color(&mut self.line_color),
            "sub_lines" => ParamMut::Slider(&mut self.sub_lines),
            "sub_line_jitter" => ParamMut::Slider(&mut self.sub_line_jitter),
            "show_points" => ParamMut::Toggle(&mut self.show_points),
            _ => return None,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/connected_sobel.rs"]
mod tests;
