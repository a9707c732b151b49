use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "posefx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every built-in filter with its parameters as JSON.
    Filters(FiltersArgs),
    /// Filter a single image into a PNG.
    Frame(FrameArgs),
    /// Render a numbered PNG sequence from one source image.
    Sequence(SequenceArgs),
}

#[derive(Parser, Debug)]
struct FiltersArgs {
    /// Print a pipeline config document instead of the parameter listing.
    #[arg(long)]
    as_config: bool,

    /// Pipeline config JSON to start from.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Source image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Pipeline config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Keypoints JSON: one flat array of (y, x, score) triples, or an array of them.
    #[arg(long)]
    keypoints: Option<PathBuf>,

    /// Frame index (0-based); selects clock time and per-frame seed.
    #[arg(long, default_value_t = 0)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    /// Source image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Pipeline config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Keypoints JSON; a track is cycled over the frames.
    #[arg(long)]
    keypoints: Option<PathBuf>,

    /// Number of frames to render.
    #[arg(long)]
    frames: u64,

    /// Output directory; frames are written as `frame_00000.png`, ...
    #[arg(long)]
    out_dir: PathBuf,

    /// Render frames in parallel (ignored when urban effects are configured).
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum KeypointFile {
    Single(Vec<f32>),
    Track(Vec<Vec<f32>>),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Filters(args) => cmd_filters(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse {what} JSON '{}'", path.display()))
}

fn load_session(path: &Path) -> anyhow::Result<posefx::EffectSession> {
    let cfg: posefx::PipelineConfig = read_json(path, "pipeline config")?;
    Ok(posefx::EffectSession::from_config(&cfg)?)
}

fn read_keypoints(path: Option<&Path>) -> anyhow::Result<Vec<Vec<f32>>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    Ok(match read_json(path, "keypoints")? {
        KeypointFile::Single(flat) => vec![flat],
        KeypointFile::Track(track) => track,
    })
}

fn read_image(path: &Path) -> anyhow::Result<posefx::RasterBuffer> {
    let img = image::open(path)
        .with_context(|| format!("decode image '{}'", path.display()))?
        .into_rgba8();
    Ok(img.into())
}

fn write_png(path: &Path, buf: &posefx::RasterBuffer) -> anyhow::Result<()> {
    image::save_buffer_with_format(
        path,
        buf.as_bytes(),
        buf.width(),
        buf.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn create_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_filters(args: FiltersArgs) -> anyhow::Result<()> {
    let session = match &args.config {
        Some(path) => load_session(path)?,
        None => posefx::EffectSession::default(),
    };

    let json = if args.as_config {
        serde_json::to_string_pretty(&session.to_config())?
    } else {
        use posefx::Parameterized as _;
        let listing: Vec<serde_json::Value> = session
            .manager()
            .available()
            .iter()
            .map(|f| {
                let params: Vec<serde_json::Value> = f
                    .params()
                    .into_iter()
                    .map(|(key, p)| serde_json::json!({ "key": key, "param": p }))
                    .collect();
                serde_json::json!({
                    "id": f.id(),
                    "kind": f.kind().name(),
                    "requires_pose": f.requires_pose(),
                    "active": session.manager().is_active(f.id()),
                    "params": params,
                })
            })
            .collect();
        serde_json::to_string_pretty(&listing)?
    };
    println!("{json}");
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut session = load_session(&args.config)?;
    let track = read_keypoints(args.keypoints.as_deref())?;
    let mut buf = read_image(&args.in_path)?;

    let keypoints = if track.is_empty() {
        None
    } else {
        let i = (args.frame % track.len() as u64) as usize;
        Some(track[i].as_slice())
    };
    session.render_index(&mut buf, keypoints, posefx::FrameIndex(args.frame));

    create_parent(&args.out)?;
    write_png(&args.out, &buf)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let mut session = load_session(&args.config)?;
    let track = read_keypoints(args.keypoints.as_deref())?;
    let source = read_image(&args.in_path)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let opts = posefx::SequenceOpts {
        parallel: args.parallel,
        threads: args.threads,
    };
    let out_dir = args.out_dir.as_path();
    let stats = session.render_sequence(&source, &track, args.frames, &opts, |f, buf| {
        let path = out_dir.join(format!("frame_{:05}.png", f.0));
        write_png(&path, &buf).map_err(posefx::PosefxError::Other)
    })?;

    eprintln!(
        "wrote {} frames to {}{}",
        stats.frames,
        out_dir.display(),
        if stats.parallel { " (parallel)" } else { "" }
    );
    Ok(())
}
