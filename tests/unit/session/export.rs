use std::sync::Mutex;

use super::*;
use crate::config::PipelineConfig;
use crate::pose::KEYPOINT_FLOATS;
use crate::urban::UrbanEffectsConfig;

fn source() -> RasterBuffer {
    let mut buf = RasterBuffer::new(80, 60);
    for y in 0..60 {
        for x in 0..80 {
            buf.set_pixel(x, y, [(x * 3) as u8, (y * 4) as u8, ((x + y) * 2) as u8, 255]);
        }
    }
    buf
}

fn session() -> EffectSession {
    let cfg = PipelineConfig::from_json(
        r#"{
            "seed": 21,
            "filters": [
                { "id": "glow_dots", "active": true },
                { "id": "connected_sobel", "active": true, "params": { "region_size": 50 } }
            ]
        }"#,
    )
    .unwrap();
    EffectSession::from_config(&cfg).unwrap()
}

fn collect(session: &mut EffectSession, opts: SequenceOpts) -> (SequenceStats, Vec<RasterBuffer>) {
    let track = vec![vec![0.5f32; KEYPOINT_FLOATS], vec![0.4f32; KEYPOINT_FLOATS]];
    let out = Mutex::new(vec![None; 6]);
    let stats = session
        .render_sequence(&source(), &track, 6, &opts, |f, buf| {
            out.lock().unwrap()[f.0 as usize] = Some(buf);
            Ok(())
        })
        .unwrap();
    let frames = out.into_inner().unwrap().into_iter().map(Option::unwrap).collect();
    (stats, frames)
}

#[test]
fn parallel_matches_sequential() {
    let (seq_stats, seq) = collect(&mut session(), SequenceOpts::default());
    let (par_stats, par) = collect(
        &mut session(),
        SequenceOpts {
            parallel: true,
            threads: Some(2),
        },
    );
    assert!(!seq_stats.parallel);
    assert!(par_stats.parallel);
    assert_eq!(par_stats.frames, 6);
    assert_eq!(seq, par);
    assert_ne!(seq[0], seq[1]);
}

#[test]
fn urban_sessions_fall_back_to_sequential() {
    let mut s = session();
    s.set_urban_effects(Some(UrbanEffectsConfig::default())).unwrap();
    let (stats, _) = collect(
        &mut s,
        SequenceOpts {
            parallel: true,
            threads: None,
        },
    );
    assert!(!stats.parallel);
    assert_eq!(s.urban().unwrap().frame_counter(), 6);
}

#[test]
fn zero_threads_is_rejected() {
    let err = session()
        .render_sequence(
            &source(),
            &[],
            1,
            &SequenceOpts {
                parallel: true,
                threads: Some(0),
            },
            |_, _| Ok(()),
        )
        .unwrap_err();
    assert!(err.to_string().starts_with("validation error:"));
}

#[test]
fn keypoint_track_cycles() {
    let track = vec![vec![1.0], vec![2.0], vec![3.0]];
    assert_eq!(keypoints_at(&track, 4), Some(&[2.0f32][..]));
    assert_eq!(keypoints_at(&[], 4), None);
}
