use super::*;
use crate::pose::{JOINT_COUNT, KEYPOINT_FLOATS};

fn pose_at(score: f32) -> Pose {
    let flat: Vec<f32> = (0..JOINT_COUNT)
        .flat_map(|j| [0.1 + j as f32 * 0.04, 0.2 + (j % 5) as f32 * 0.15, score])
        .collect();
    Pose::from_flat(&flat).unwrap()
}

fn always_spawn() -> UrbanEffectsConfig {
    UrbanEffectsConfig {
        spawn_probability: 1.0,
        ..UrbanEffectsConfig::default()
    }
}

#[test]
fn full_spawn_fills_every_active_joint() {
    let mut fx = UrbanEffects::new(always_spawn()).unwrap();
    let mut ctx = FrameContext::new(11, 0.0);
    fx.update_boxes(Some(&pose_at(1.0)), 640, 480, &mut ctx);
    assert_eq!(fx.active_boxes().len(), ACTIVE_JOINTS.len());
    for (joint, b) in fx.active_boxes() {
        assert_eq!(*joint, b.joint_index);
        assert_eq!(b.frame_created, 1);
        assert!((fx.config().min_size..=fx.config().max_size).contains(&b.size));
        assert!(BOX_EFFECTS.contains(&b.effect));
    }
}

#[test]
fn low_confidence_and_missing_pose_spawn_nothing() {
    let mut fx = UrbanEffects::new(always_spawn()).unwrap();
    let mut ctx = FrameContext::new(11, 0.0);
    fx.update_boxes(Some(&pose_at(0.2)), 640, 480, &mut ctx);
    fx.update_boxes(None, 640, 480, &mut ctx);
    assert!(fx.active_boxes().is_empty());
    assert_eq!(fx.frame_counter(), 2);
}

fn box_born_at_frame_10(policy: DurationPolicy) -> UrbanEffects {
    let mut fx = UrbanEffects::new(UrbanEffectsConfig {
        min_duration: 3,
        max_duration: 6,
        duration_policy: policy,
        ..always_spawn()
    })
    .unwrap();
    let mut ctx = FrameContext::new(2, 0.0);
    for _ in 0..9 {
        fx.update_boxes(None, 100, 100, &mut ctx);
    }
    fx.update_boxes(Some(&pose_at(1.0)), 100, 100, &mut ctx);
    assert!(fx.active_boxes().values().all(|b| b.frame_created == 10));
    fx
}

#[test]
fn boxes_expire_after_max_duration() {
    for policy in [DurationPolicy::FixedAtSpawn, DurationPolicy::RerollEachCheck] {
        let mut fx = box_born_at_frame_10(policy);
        let mut ctx = FrameContext::new(3, 0.0);
        while fx.frame_counter() - 10 <= 6 {
            fx.update_boxes(None, 100, 100, &mut ctx);
        }
        assert!(fx.active_boxes().is_empty(), "{policy:?}");
    }
}

#[test]
fn fixed_durations_survive_their_lifetime() {
    let mut fx = box_born_at_frame_10(DurationPolicy::FixedAtSpawn);
    let mut ctx = FrameContext::new(3, 0.0);
    // 3 is the shortest possible lifetime.
    for _ in 0..3 {
        fx.update_boxes(None, 100, 100, &mut ctx);
    }
    assert_eq!(fx.active_boxes().len(), ACTIVE_JOINTS.len());
    assert!(fx.active_boxes().values().all(|b| (3..=6).contains(&b.duration)));
}

#[test]
fn boxes_follow_their_joint() {
    let mut fx = UrbanEffects::new(always_spawn()).unwrap();
    let mut ctx = FrameContext::new(4, 0.0);
    fx.update_boxes(Some(&pose_at(1.0)), 100, 100, &mut ctx);

    let mut flat = vec![0.9f32; KEYPOINT_FLOATS];
    flat[pose::LEFT_WRIST * 3] = 0.5;
    flat[pose::LEFT_WRIST * 3 + 1] = 0.25;
    let moved = Pose::from_flat(&flat).unwrap();
    fx.update_boxes(Some(&moved), 100, 100, &mut ctx);
    let b = &fx.active_boxes()[&pose::LEFT_WRIST];
    assert!((b.x - 25.0).abs() < 1e-4 && (b.y - 50.0).abs() < 1e-4);
}

#[test]
fn draw_adds_palette_border_and_reset_clears() {
    let mut fx = UrbanEffects::new(UrbanEffectsConfig {
        min_size: 40.0,
        max_size: 40.0,
        ..always_spawn()
    })
    .unwrap();
    let mut ctx = FrameContext::new(5, 0.0);
    let mut flat = vec![0.0f32; KEYPOINT_FLOATS];
    flat[pose::LEFT_KNEE * 3] = 0.5;
    flat[pose::LEFT_KNEE * 3 + 1] = 0.5;
    flat[pose::LEFT_KNEE * 3 + 2] = 1.0;
    fx.update_boxes(Some(&Pose::from_flat(&flat).unwrap()), 100, 100, &mut ctx);
    assert_eq!(fx.active_boxes().len(), 1);

    let mut buf = RasterBuffer::filled(100, 100, [120, 120, 120, 255]);
    fx.draw_boxes(&mut buf).unwrap();
    let border = PALETTE[pose::LEFT_KNEE % PALETTE.len()].to_array();
    // A 2px border centered on x = 30 fully covers columns 29 and 30.
    assert_eq!(buf.pixel(29, 50), Some([border[0], border[1], border[2], 255]));
    assert_eq!(buf.pixel(30, 50), Some([border[0], border[1], border[2], 255]));
    assert_eq!(buf.pixel(5, 5), Some([120, 120, 120, 255]));

    fx.reset();
    assert!(fx.active_boxes().is_empty());
    assert_eq!(fx.frame_counter(), 0);
}

#[test]
fn config_validation() {
    assert!(UrbanEffectsConfig::default().validate().is_ok());
    let bad = UrbanEffectsConfig {
        min_duration: 9,
        max_duration: 2,
        ..UrbanEffectsConfig::default()
    };
    assert!(UrbanEffects::new(bad).is_err());
    let bad = UrbanEffectsConfig {
        spawn_probability: 1.5,
        ..UrbanEffectsConfig::default()
    };
    assert!(bad.validate().is_err());
}

#[test]
fn min_confidence_must_be_a_unit_fraction() {
    for min_confidence in [-0.1, 1.5, f32::NAN, f32::INFINITY] {
        let bad = UrbanEffectsConfig {
            min_confidence,
            ..UrbanEffectsConfig::default()
        };
        let err = bad.validate().unwrap_err();
        assert!(err.to_string().contains("min_confidence"), "{err}");
    }
    for min_confidence in [0.0, 1.0] {
        let ok = UrbanEffectsConfig {
            min_confidence,
            ..UrbanEffectsConfig::default()
        };
        assert!(ok.validate().is_ok());
    }
}
