use super::*;
use crate::pose::{KEYPOINT_FLOATS, LEFT_ELBOW, LEFT_SHOULDER};

fn pose_with(joints: &[(usize, f32, f32, f32)]) -> Pose {
    let mut flat = vec![0.0f32; KEYPOINT_FLOATS];
    for &(j, x, y, score) in joints {
        flat[j * 3] = y;
        flat[j * 3 + 1] = x;
        flat[j * 3 + 2] = score;
    }
    Pose::from_flat(&flat).unwrap()
}

#[test]
fn bone_is_drawn_between_confident_joints() {
    let fx = Skeleton::default();
    let mut buf = RasterBuffer::filled(100, 100, [0, 0, 0, 255]);
    let pose = pose_with(&[(LEFT_SHOULDER, 0.2, 0.5, 0.9), (LEFT_ELBOW, 0.8, 0.5, 0.9)]);
    fx.apply(&mut buf, &pose).unwrap();
    assert_eq!(buf.pixel(50, 50), Some([0, 255, 0, 255]));
    assert_eq!(buf.pixel(20, 50), Some([255, 255, 255, 255]));
}

#[test]
fn weak_joint_suppresses_its_bones() {
    let mut fx = Skeleton::default();
    fx.show_joints.set(false);
    let mut buf = RasterBuffer::filled(100, 100, [0, 0, 0, 255]);
    let pose = pose_with(&[(LEFT_SHOULDER, 0.2, 0.5, 0.9), (LEFT_ELBOW, 0.8, 0.5, 0.1)]);
    fx.apply(&mut buf, &pose).unwrap();
    assert_eq!(buf, RasterBuffer::filled(100, 100, [0, 0, 0, 255]));
}
