use super::*;

fn pose_with(joints: &[(usize, f32, f32)], score: f32) -> Pose {
    let mut flat = vec![0.0f32; pose::KEYPOINT_FLOATS];
    for &(j, x, y) in joints {
        flat[j * 3] = y;
        flat[j * 3 + 1] = x;
        flat[j * 3 + 2] = score;
    }
    Pose::from_flat(&flat).unwrap()
}

#[test]
fn pulse_factor_follows_the_clock() {
    let mut fx = GlowDots::default();
    assert!((fx.pulse_factor(0.0) - 0.8).abs() < 1e-9);
    assert!((fx.pulse_factor(0.25) - 1.0).abs() < 1e-9);
    fx.pulse.set(false);
    assert_eq!(fx.pulse_factor(0.25), 1.0);
}

#[test]
fn draws_only_at_confident_joints() {
    let fx = GlowDots::default();
    let mut buf = RasterBuffer::filled(100, 100, [0, 0, 0, 255]);
    let mut ctx = FrameContext::new(1, 0.0);
    let pose = pose_with(&[(pose::NOSE, 0.5, 0.5)], 0.9);
    fx.apply(&mut buf, &pose, &mut ctx).unwrap();
    assert_eq!(buf.pixel(50, 50), Some([0, 255, 255, 255]));
    assert_eq!(buf.pixel(5, 5), Some([0, 0, 0, 255]));

    let mut buf = RasterBuffer::filled(100, 100, [0, 0, 0, 255]);
    let weak = pose_with(&[(pose::NOSE, 0.5, 0.5)], 0.2);
    fx.apply(&mut buf, &weak, &mut ctx).unwrap();
    assert_eq!(buf, RasterBuffer::filled(100, 100, [0, 0, 0, 255]));
}

#[test]
fn keypoint_sets_select_subsets() {
    let mut fx = GlowDots::default();
    assert_eq!(fx.joints().len(), pose::JOINT_COUNT);
    fx.keypoint_set.select(2);
    assert_eq!(fx.joints(), EXTREMITIES.to_vec());
    fx.keypoint_set.select(1);
    assert!(!fx.joints().contains(&pose::LEFT_ANKLE));
}
