use super::*;

fn gradient(w: u32, h: u32) -> RasterBuffer {
    let mut buf = RasterBuffer::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let v = ((x * 13 + y * 7) % 256) as u8;
            buf.set_pixel(i64::from(x), i64::from(y), [v, 255 - v, v / 3, 255]);
        }
    }
    buf
}

#[test]
fn fixed_seed_is_byte_identical() {
    let fx = ConnectedSobel::default();
    let render = || {
        let mut buf = gradient(320, 240);
        let mut ctx = FrameContext::new(42, 1.5);
        fx.apply(&mut buf, &mut ctx).unwrap();
        buf
    };
    assert_eq!(render(), render());

    let mut other = gradient(320, 240);
    fx.apply(&mut other, &mut FrameContext::new(43, 1.5)).unwrap();
    assert_ne!(render(), other);
}

#[test]
fn uniform_gray_region_turns_black() {
    let mut fx = ConnectedSobel::default();
    fx.line_color.set(Rgb8::BLACK);
    fx.sub_lines.set(0.0);
    fx.show_points.set(false);
    let mut buf = RasterBuffer::filled(400, 400, [128, 128, 128, 255]);
    fx.apply(&mut buf, &mut FrameContext::new(7, 0.0)).unwrap();

    let region = fx.region(400, 400).unwrap();
    assert_eq!((region.x, region.y, region.width, region.height), (50, 50, 300, 300));
    for y in region.y..region.y + region.height {
        for x in region.x..region.x + region.width {
            assert_eq!(buf.pixel(i64::from(x), i64::from(y)), Some([0, 0, 0, 255]));
        }
    }
    assert_eq!(buf.pixel(10, 10), Some([128, 128, 128, 255]));
}

#[test]
fn region_shrinks_to_small_buffers() {
    let fx = ConnectedSobel::default();
    let region = fx.region(120, 80).unwrap();
    assert!(region.width <= 80 && region.height <= 80);
    assert!(region.x + region.width <= 120);
    assert!(region.y + region.height <= 80);
    assert!(fx.region(0, 0).is_none());
}

#[test]
fn loop_points_stay_inside_region_and_form_simple_loop() {
    let fx = ConnectedSobel::default();
    let region = fx.region(400, 400).unwrap();
    let r = region.to_rect();
    let mut ctx = FrameContext::new(9, 0.0);
    for _ in 0..20 {
        let pts = fx.loop_points(region, &mut ctx);
        assert_eq!(pts.len(), 8);
        assert!(pts.iter().all(|p| r.contains(*p) || p.x == r.x1 || p.y == r.y1));
        let n = pts.len();
        for i in 0..n {
            for j in i + 2..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                assert!(!shape::segments_intersect(
                    pts[i],
                    pts[(i + 1) % n],
                    pts[j],
                    pts[(j + 1) % n]
                ));
            }
        }
    }
}
