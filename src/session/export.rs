use rayon::prelude::*;

use crate::determinism::FrameContext;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{PosefxError, PosefxResult};
use crate::pose::Pose;
use crate::raster::RasterBuffer;
use crate::session::EffectSession;

/// Options for [`EffectSession::render_sequence`].
#[derive(Clone, Debug, Default)]
pub struct SequenceOpts {
    /// Render frames on a rayon pool. Ignored for sessions with urban effects.
    pub parallel: bool,
    /// Override the number of worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SequenceStats {
    pub frames: u64,
    pub parallel: bool,
}

/// Keypoints for `frame`, cycling through `track`. An empty track means no pose.
fn keypoints_at(track: &[Vec<f32>], frame: u64) -> Option<&[f32]> {
    if track.is_empty() {
        return None;
    }
    let i = (frame % track.len() as u64) as usize;
    Some(track[i].as_slice())
}

fn build_thread_pool(threads: Option<usize>) -> PosefxResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(PosefxError::validation(
            "sequence 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| PosefxError::Other(anyhow::Error::new(e).context("build rayon thread pool")))
}

impl EffectSession {
    /// Renders `frames` frames of `source`, handing each result to `sink`.
    ///
    /// Frame `f` always uses `FrameContext::for_frame(seed, f, fps)`, so parallel and
    /// sequential runs produce identical pixels. `sink` may be called out of order when
    /// rendering in parallel.
    pub fn render_sequence<F>(
        &mut self,
        source: &RasterBuffer,
        keypoints: &[Vec<f32>],
        frames: u64,
        opts: &SequenceOpts,
        sink: F,
    ) -> PosefxResult<SequenceStats>
    where
        F: Fn(FrameIndex, RasterBuffer) -> PosefxResult<()> + Sync,
    {
        let parallel = opts.parallel && !self.is_temporal();
        if opts.parallel && !parallel {
            tracing::debug!("urban effects are stateful, rendering sequentially");
        }

        if !parallel {
            for f in 0..frames {
                let mut buf = source.clone();
                self.render_index(&mut buf, keypoints_at(keypoints, f), FrameIndex(f));
                sink(FrameIndex(f), buf)?;
            }
            return Ok(SequenceStats {
                frames,
                parallel: false,
            });
        }

        let pool = build_thread_pool(opts.threads)?;
        let chain = self.snapshot();
        let (seed, fps) = (self.seed(), self.fps());
        pool.install(|| {
            (0..frames).into_par_iter().try_for_each(|f| {
                let mut buf = source.clone();
                let pose = keypoints_at(keypoints, f).and_then(Pose::from_flat);
                let mut ctx = FrameContext::for_frame(seed, FrameIndex(f), fps);
                chain.apply(&mut buf, pose.as_ref(), &mut ctx);
                sink(FrameIndex(f), buf)
            })
        })?;
        Ok(SequenceStats {
            frames,
            parallel: true,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/export.rs"]
mod tests;
