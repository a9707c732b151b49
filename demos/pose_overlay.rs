use posefx::{EffectSession, FrameIndex, PipelineConfig, RasterBuffer};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cfg = PipelineConfig::from_json(
        r#"{
            "seed": 1,
            "filters": [
                { "id": "color_adjust", "active": true, "params": { "hue": 30, "contrast": 1.2 } },
                { "id": "urban_boxes", "active": true, "params": { "inner_effect": "Random", "shape": "Hexagon" } },
                { "id": "glow_dots", "active": true }
            ],
            "urban_effects": { "spawn_probability": 0.2 }
        }"#,
    )?;
    let mut session = EffectSession::from_config(&cfg)?;

    let mut kps = Vec::with_capacity(51);
    for j in 0..17 {
        kps.extend([0.15 + j as f32 * 0.045, 0.35 + (j % 3) as f32 * 0.15, 0.9]);
    }

    for f in 0..10u64 {
        let mut buf = RasterBuffer::filled(320, 240, [40, 90, 160, 255]);
        session.render_index(&mut buf, Some(&kps), FrameIndex(f));
        let boxes = session.urban().map_or(0, |u| u.active_boxes().len());
        println!("frame {f}: {boxes} joint boxes");
    }

    Ok(())
}
