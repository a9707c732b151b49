use super::*;
use crate::params::ParamValue;

fn sample() -> RasterBuffer {
    let mut buf = RasterBuffer::new(4, 4);
    for y in 0..4 {
        for x in 0..4 {
            buf.set_pixel(x, y, [200, (x * 50) as u8, (y * 60) as u8, 255]);
        }
    }
    buf
}

#[test]
fn defaults_leave_pixels_untouched() {
    let mut buf = sample();
    ColorAdjust::default().apply(&mut buf).unwrap();
    assert_eq!(buf, sample());
}

#[test]
fn zero_saturation_produces_gray() {
    let mut fx = ColorAdjust::default();
    fx.set_param("saturation", &ParamValue::Number(0.0)).unwrap();
    let mut buf = sample();
    fx.apply(&mut buf).unwrap();
    for px in buf.as_bytes().chunks_exact(4) {
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
        assert_eq!(px[3], 255);
    }
}

#[test]
fn brightness_shifts_every_channel() {
    let mut fx = ColorAdjust::default();
    fx.brightness.set(20.0);
    let mut buf = RasterBuffer::filled(2, 2, [10, 100, 250, 128]);
    fx.apply(&mut buf).unwrap();
    assert_eq!(buf.pixel(1, 1), Some([30, 120, 255, 128]));
}

#[test]
fn set_param_clamps_and_rejects_unknown_keys() {
    let mut fx = ColorAdjust::default();
    fx.set_param("contrast", &ParamValue::Number(9.0)).unwrap();
    assert_eq!(fx.contrast.value(), 2.0);
    assert!(fx.set_param("gamma", &ParamValue::Number(1.0)).is_err());
    fx.reset_params();
    assert_eq!(fx, ColorAdjust::default());
}
