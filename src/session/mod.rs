//! Per-frame entry point that hosts drive: filters, urban effects and configuration in one
//! place.

mod export;

pub use export::{SequenceOpts, SequenceStats};

use crate::config::{FilterConfig, PipelineConfig};
use crate::determinism::FrameContext;
use crate::filter::{Filter, FilterKind};
use crate::foundation::core::{FrameIndex, Fps};
use crate::foundation::error::{PosefxError, PosefxResult};
use crate::manager::{FilterChain, FilterChangeListener, FilterManager, ListenerId};
use crate::params::{ParamValue, Parameterized};
use crate::pose::Pose;
use crate::raster::RasterBuffer;
use crate::urban::{UrbanEffects, UrbanEffectsConfig};

#[derive(Debug)]
pub struct EffectSession {
    seed: u64,
    fps: Fps,
    manager: FilterManager,
    urban: Option<UrbanEffects>,
}

impl Default for EffectSession {
    fn default() -> Self {
        Self::new(0, Fps::default())
    }
}

impl EffectSession {
    /// Session with every built-in filter registered and none active.
    pub fn new(seed: u64, fps: Fps) -> Self {
        Self {
            seed,
            fps,
            manager: FilterManager::with_defaults(),
            urban: None,
        }
    }

    pub fn from_config(cfg: &PipelineConfig) -> PosefxResult<Self> {
        cfg.validate()?;
        let mut session = Self::new(cfg.seed, cfg.fps);

        for fc in &cfg.filters {
            if session.manager.filter(&fc.id).is_none() {
                let kind_name = fc.kind.as_deref().unwrap_or(&fc.id);
                session
                    .manager
                    .register(Filter::new(fc.id.clone(), FilterKind::from_name(kind_name)?)?)?;
            }
            for (key, value) in &fc.params {
                session
                    .manager
                    .set_param(&fc.id, key, value)
                    .map_err(|e| PosefxError::validation(format!("filter '{}': {e}", fc.id)))?;
            }
            if fc.active {
                session.manager.activate(&fc.id)?;
            }
        }

        if let Some(urban) = &cfg.urban_effects {
            session.urban = Some(UrbanEffects::new(urban.clone())?);
        }
        tracing::debug!(
            active = ?session.manager.active_ids(),
            urban = session.urban.is_some(),
            "session configured"
        );
        Ok(session)
    }

    /// Current state as a config document. Active filters come first, in order.
    pub fn to_config(&self) -> PipelineConfig {
        let active = self.manager.active_ids();
        let mut filters: Vec<FilterConfig> = active
            .iter()
            .filter_map(|id| self.manager.filter(id))
            .map(|f| filter_config(f, true))
            .collect();
        filters.extend(
            self.manager
                .available()
                .iter()
                .filter(|f| !active.contains(&f.id()))
                .map(|f| filter_config(f, false)),
        );
        PipelineConfig {
            seed: self.seed,
            fps: self.fps,
            filters,
            urban_effects: self.urban.as_ref().map(|u| u.config().clone()),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn manager(&self) -> &FilterManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut FilterManager {
        &mut self.manager
    }

    pub fn urban(&self) -> Option<&UrbanEffects> {
        self.urban.as_ref()
    }

    /// Enables urban effects with a fresh box set, or disables them with `None`.
    pub fn set_urban_effects(&mut self, cfg: Option<UrbanEffectsConfig>) -> PosefxResult<()> {
        self.urban = cfg.map(UrbanEffects::new).transpose()?;
        Ok(())
    }

    /// True when the host should run pose estimation for the next frame.
    pub fn needs_pose(&self) -> bool {
        self.manager.requires_pose() || self.urban.is_some()
    }

    /// Urban effects carry state across frames, so such sessions must render in order.
    pub fn is_temporal(&self) -> bool {
        self.urban.is_some()
    }

    /// Renders one frame in place. Keypoints are flat `(y, x, score)` triples normalized to
    /// `[0, 1]`; fewer than 51 values count as no pose.
    #[tracing::instrument(skip_all, fields(w = buf.width(), h = buf.height()))]
    pub fn render_frame(
        &mut self,
        buf: &mut RasterBuffer,
        keypoints: Option<&[f32]>,
        ctx: &mut FrameContext,
    ) {
        let pose = keypoints.and_then(Pose::from_flat);
        self.manager.apply_all(buf, pose.as_ref(), ctx);
        if let Some(urban) = &mut self.urban {
            urban.update_boxes(pose.as_ref(), buf.width(), buf.height(), ctx);
            if let Err(err) = urban.draw_boxes(buf) {
                tracing::warn!(%err, "urban effects failed, skipping");
            }
        }
    }

    /// [`Self::render_frame`] with the context derived from the session seed and frame rate.
    pub fn render_index(&mut self, buf: &mut RasterBuffer, keypoints: Option<&[f32]>, frame: FrameIndex) {
        let mut ctx = FrameContext::for_frame(self.seed, frame, self.fps);
        self.render_frame(buf, keypoints, &mut ctx);
    }

    pub fn set_param(&mut self, id: &str, key: &str, value: &ParamValue) -> PosefxResult<()> {
        self.manager.set_param(id, key, value)
    }

    pub fn activate(&mut self, id: &str) -> PosefxResult<bool> {
        self.manager.activate(id)
    }

    pub fn deactivate(&mut self, id: &str) -> PosefxResult<bool> {
        self.manager.deactivate(id)
    }

    pub fn move_active(&mut self, from: usize, to: usize) -> PosefxResult<()> {
        self.manager.move_active(from, to)
    }

    /// Restores every filter's defaults and clears urban box state.
    pub fn reset_all(&mut self) {
        self.manager.reset_all();
        if let Some(urban) = &mut self.urban {
            urban.reset();
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn FilterChangeListener>) -> ListenerId {
        self.manager.add_listener(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.manager.remove_listener(id)
    }

    pub fn snapshot(&self) -> FilterChain {
        self.manager.snapshot()
    }
}

fn filter_config(filter: &Filter, active: bool) -> FilterConfig {
    let kind = filter.kind().name();
    FilterConfig {
        id: filter.id().to_owned(),
        kind: (kind != filter.id()).then(|| kind.to_owned()),
        active,
        params: filter
            .params()
            .into_iter()
            .map(|(k, p)| (k.to_owned(), p.value()))
            .collect(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/mod.rs"]
mod tests;
