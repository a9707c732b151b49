use super::*;
use crate::raster::shape;

fn count_color(buf: &RasterBuffer, rgb: [u8; 3]) -> usize {
    buf.as_bytes()
        .chunks_exact(4)
        .filter(|px| px[..3] == rgb)
        .count()
}

fn draw(buf: &mut RasterBuffer, f: impl FnOnce(&mut Canvas)) {
    let mut canvas = Canvas::for_buffer(buf).unwrap();
    f(&mut canvas);
    canvas.finish(buf);
}

#[test]
fn fill_circle_stays_inside_radius() {
    let mut buf = RasterBuffer::filled(21, 21, [0, 0, 0, 255]);
    draw(&mut buf, |c| {
        c.fill_circle(Point::new(10.5, 10.5), 5.0, Rgb8::WHITE, 1.0)
    });
    // Fully covered pixels sit strictly inside the circle.
    let n = count_color(&buf, [255, 255, 255]);
    let area = std::f64::consts::PI * 25.0;
    assert!(n as f64 <= area && n as f64 > area - 40.0, "covered {n}");
    assert_eq!(buf.pixel(10, 10), Some([255, 255, 255, 255]));
    assert_eq!(buf.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(buf.pixel(10, 2), Some([0, 0, 0, 255]));
}

#[test]
fn circle_edge_is_anti_aliased() {
    let mut buf = RasterBuffer::filled(21, 21, [0, 0, 0, 255]);
    draw(&mut buf, |c| {
        c.fill_circle(Point::new(10.5, 10.5), 5.0, Rgb8::WHITE, 1.0)
    });
    let partial = buf
        .as_bytes()
        .chunks_exact(4)
        .filter(|px| px[0] > 0 && px[0] < 255)
        .count();
    assert!(partial > 0);
}

#[test]
fn degenerate_input_draws_nothing() {
    let mut buf = RasterBuffer::filled(4, 4, [0, 0, 0, 255]);
    let before = buf.clone();
    draw(&mut buf, |c| {
        c.fill_circle(Point::new(2.0, 2.0), 0.0, Rgb8::WHITE, 1.0);
        c.fill_circle(Point::new(2.0, 2.0), f64::NAN, Rgb8::WHITE, 1.0);
        c.line(Point::ORIGIN, Point::new(3.0, 3.0), 0.0, Rgb8::WHITE, 1.0);
        c.line(Point::ORIGIN, Point::new(f64::NAN, 3.0), 2.0, Rgb8::WHITE, 1.0);
        c.fill(&BezPath::new(), Rgb8::WHITE, 0.0);
    });
    assert_eq!(buf, before);
}

#[test]
fn horizontal_line_has_requested_width() {
    let mut buf = RasterBuffer::filled(20, 20, [0, 0, 0, 255]);
    draw(&mut buf, |c| {
        c.line(
            Point::new(2.0, 10.0),
            Point::new(17.0, 10.0),
            2.0,
            Rgb8::WHITE,
            1.0,
        )
    });
    assert_eq!(buf.pixel(10, 9), Some([255, 255, 255, 255]));
    assert_eq!(buf.pixel(10, 10), Some([255, 255, 255, 255]));
    assert_eq!(buf.pixel(10, 7), Some([0, 0, 0, 255]));
    assert_eq!(buf.pixel(10, 12), Some([0, 0, 0, 255]));
}

#[test]
fn fill_blends_with_opacity_layer() {
    let mut buf = RasterBuffer::filled(8, 8, [0, 0, 0, 255]);
    let tri = shape::polygon_path(&[
        Point::new(0.0, 0.0),
        Point::new(8.0, 0.0),
        Point::new(0.0, 8.0),
    ]);
    draw(&mut buf, |c| c.fill(&tri, Rgb8::new(200, 0, 0), 0.5));
    let [r, g, b, a] = buf.pixel(1, 1).unwrap();
    assert!(r.abs_diff(100) <= 2, "{r}");
    assert_eq!((g, b, a), (0, 0, 255));
    assert_eq!(buf.pixel(7, 7), Some([0, 0, 0, 255]));
}

#[test]
fn stroke_leaves_interior_untouched() {
    let mut buf = RasterBuffer::filled(20, 20, [0, 0, 0, 255]);
    let sq = shape::polygon_path(&[
        Point::new(2.0, 2.0),
        Point::new(18.0, 2.0),
        Point::new(18.0, 18.0),
        Point::new(2.0, 18.0),
    ]);
    draw(&mut buf, |c| c.stroke(&sq, 2.0, Rgb8::WHITE, 1.0));
    assert_eq!(buf.pixel(10, 10), Some([0, 0, 0, 255]));
    assert_eq!(buf.pixel(10, 2), Some([255, 255, 255, 255]));
    assert_eq!(buf.pixel(2, 10), Some([255, 255, 255, 255]));
}

#[test]
fn region_canvas_draws_in_buffer_coordinates() {
    let mut buf = RasterBuffer::filled(20, 20, [0, 0, 0, 255]);
    let area = Rect::new(10.0, 10.0, 20.0, 20.0);
    let mut canvas = Canvas::around(&buf, area).unwrap().unwrap();
    assert_eq!(canvas.region().x, 10);
    canvas.fill_circle(Point::new(15.0, 15.0), 3.0, Rgb8::WHITE, 1.0);
    // Outside the region: clipped away.
    canvas.fill_circle(Point::new(3.0, 3.0), 3.0, Rgb8::WHITE, 1.0);
    canvas.finish(&mut buf);
    assert_eq!(buf.pixel(15, 15), Some([255, 255, 255, 255]));
    assert_eq!(buf.pixel(3, 3), Some([0, 0, 0, 255]));
    assert!(
        Canvas::around(&buf, Rect::new(30.0, 30.0, 40.0, 40.0))
            .unwrap()
            .is_none()
    );
}

#[test]
fn oversized_surface_is_an_error() {
    let buf = RasterBuffer::new(70_000, 1);
    let err = Canvas::for_buffer(&buf).unwrap_err();
    assert!(err.to_string().contains("exceeds u16"), "{err}");
    assert!(Canvas::for_buffer(&RasterBuffer::new(0, 0)).is_err());
}
