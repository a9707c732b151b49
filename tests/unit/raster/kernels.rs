use super::*;

fn gradient(w: u32, h: u32) -> RasterBuffer {
    let mut buf = RasterBuffer::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let v = ((x * 37 + y * 11) % 256) as u8;
            buf.set_pixel(i64::from(x), i64::from(y), [v, v / 2, 255 - v, 255]);
        }
    }
    buf
}

#[test]
fn sobel_on_uniform_gray_is_black() {
    let mut buf = RasterBuffer::filled(400, 400, [128, 128, 128, 255]);
    sobel(
        &mut buf,
        SobelOptions {
            threshold: 100.0,
            scale: 1.0,
            invert: false,
        },
    );
    assert!(buf.as_bytes().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn sobel_invert_turns_flat_regions_white() {
    let mut buf = RasterBuffer::filled(8, 8, [40, 40, 40, 255]);
    sobel(
        &mut buf,
        SobelOptions {
            invert: true,
            ..SobelOptions::default()
        },
    );
    assert!(buf.as_bytes().chunks_exact(4).all(|px| px == [255, 255, 255, 255]));
}

#[test]
fn sobel_detects_vertical_edge() {
    let mut buf = RasterBuffer::filled(8, 8, [0, 0, 0, 255]);
    for y in 0..8 {
        for x in 4..8 {
            buf.set_pixel(x, y, [255, 255, 255, 255]);
        }
    }
    sobel(&mut buf, SobelOptions::default());
    assert_eq!(buf.pixel(3, 4), Some([255, 255, 255, 255]));
    assert_eq!(buf.pixel(1, 4), Some([0, 0, 0, 255]));
    assert_eq!(buf.pixel(6, 4), Some([0, 0, 0, 255]));
}

#[test]
fn grayscale_uses_luma_weights() {
    let mut buf = RasterBuffer::filled(1, 1, [255, 0, 0, 200]);
    grayscale(&mut buf);
    assert_eq!(buf.pixel(0, 0), Some([76, 76, 76, 200]));
}

#[test]
fn pixelate_block_one_is_identity() {
    let mut buf = gradient(13, 7);
    let before = buf.clone();
    pixelate(&mut buf, 1);
    assert_eq!(buf, before);
}

#[test]
fn pixelate_fills_blocks_with_center_sample() {
    let src = gradient(10, 10);
    let mut buf = src.clone();
    pixelate(&mut buf, 4);
    let center = src.pixel(2, 2).unwrap();
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(buf.pixel(x, y), Some(center));
        }
    }
    // Partial edge block samples its own center.
    assert_eq!(buf.pixel(9, 9), src.pixel(9, 9));
}

#[test]
fn box_blur_keeps_constant_image() {
    let mut buf = RasterBuffer::filled(9, 5, [10, 20, 30, 40]);
    let before = buf.clone();
    box_blur(&mut buf, BLUR_RADIUS);
    assert_eq!(buf, before);
}

#[test]
fn box_blur_averages_window() {
    let mut buf = RasterBuffer::filled(7, 7, [0, 0, 0, 255]);
    buf.set_pixel(3, 3, [245, 0, 0, 255]);
    box_blur(&mut buf, 3);
    // 7x7 window around the center covers the whole image: 245 / 49 = 5.
    assert_eq!(buf.pixel(3, 3), Some([5, 0, 0, 255]));
    // Corner window is 4x4 = 16 samples and includes the spike: 245 / 16 = 15.3.
    assert_eq!(buf.pixel(0, 0), Some([15, 0, 0, 255]));
}
