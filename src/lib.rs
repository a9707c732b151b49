//! posefx is a composable CPU filter pipeline for camera frames, optionally driven by
//! human-pose keypoints.
//!
//! # Pipeline overview
//!
//! 1. **Context**: the host builds a [`FrameContext`] (logical clock + seeded rng) per frame.
//! 2. **Filters**: [`FilterManager::apply_all`] runs every active [`Filter`] in order on the
//!    same [`RasterBuffer`]. Each filter sees the output of the previous one.
//! 3. **Urban effects** (optional): [`UrbanEffects`] spawns and evicts per-joint boxes across
//!    frames and draws them on top.
//!
//! [`EffectSession`] bundles all three behind a single `render_frame` call and can be built
//! from a JSON [`PipelineConfig`].
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No globals**: time and randomness flow through [`FrameContext`], so the same seed and
//!   frame always render the same pixels, on any thread.
//! - **Straight RGBA8** end-to-end.
#![forbid(unsafe_code)]

pub mod config;
pub mod determinism;
pub mod filter;
pub mod foundation;
pub mod manager;
pub mod params;
pub mod pose;
pub mod raster;
pub mod session;
pub mod urban;

pub use config::{FilterConfig, PipelineConfig};
pub use determinism::{FrameClock, FrameContext, SeededRng};
pub use filter::{Filter, FilterKind};
pub use foundation::core::{Fps, FrameIndex, Rgb8};
pub use foundation::error::{PosefxError, PosefxResult};
pub use manager::{FilterChain, FilterChangeListener, FilterManager, ListenerId};
pub use params::{Param, ParamValue, Parameterized};
pub use pose::{Keypoint, Pose};
pub use raster::RasterBuffer;
pub use session::{EffectSession, SequenceOpts, SequenceStats};
pub use urban::{DurationPolicy, JointBox, UrbanEffects, UrbanEffectsConfig};
