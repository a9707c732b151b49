//! Ordered registry of filters with an active subset applied per frame.

use crate::determinism::FrameContext;
use crate::filter::Filter;
use crate::foundation::error::{PosefxError, PosefxResult};
use crate::params::{Parameterized, ParamValue};
use crate::pose::Pose;
use crate::raster::RasterBuffer;

/// Observer of activation and ordering changes. All callbacks default to no-ops.
pub trait FilterChangeListener: Send {
    fn on_filter_activated(&mut self, _filter: &Filter) {}
    fn on_filter_deactivated(&mut self, _filter: &Filter) {}
    fn on_filters_reordered(&mut self, _active: &[&Filter]) {}
    fn on_all_filters_deactivated(&mut self) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
pub struct FilterManager {
    available: Vec<Filter>,
    /// Indices into `available`, in application order. Never contains duplicates.
    active: Vec<usize>,
    listeners: Vec<(ListenerId, Box<dyn FilterChangeListener>)>,
    next_listener: u64,
}

impl std::fmt::Debug for FilterManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterManager")
            .field("available", &self.available)
            .field("active", &self.active)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl FilterManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut manager = Self::new();
        manager.register_default();
        manager
    }

    /// Adds one default instance of each filter kind whose id is not taken yet.
    pub fn register_default(&mut self) {
        for filter in Filter::defaults() {
            if self.index_of(filter.id()).is_none() {
                self.available.push(filter);
            }
        }
    }

    pub fn register(&mut self, filter: Filter) -> PosefxResult<()> {
        if self.index_of(filter.id()).is_some() {
            return Err(PosefxError::validation(format!(
                "filter id '{}' is already registered",
                filter.id()
            )));
        }
        tracing::debug!(id = filter.id(), "registered filter");
        self.available.push(filter);
        Ok(())
    }

    pub fn available(&self) -> &[Filter] {
        &self.available
    }

    pub fn active(&self) -> Vec<&Filter> {
        self.active.iter().map(|&i| &self.available[i]).collect()
    }

    pub fn active_ids(&self) -> Vec<&str> {
        self.active.iter().map(|&i| self.available[i].id()).collect()
    }

    pub fn filter(&self, id: &str) -> Option<&Filter> {
        self.index_of(id).map(|i| &self.available[i])
    }

    pub fn filter_mut(&mut self, id: &str) -> Option<&mut Filter> {
        self.index_of(id).map(move |i| &mut self.available[i])
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.index_of(id).is_some_and(|i| self.active.contains(&i))
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.available.iter().position(|f| f.id() == id)
    }

    fn lookup(&self, id: &str) -> PosefxResult<usize> {
        self.index_of(id)
            .ok_or_else(|| PosefxError::validation(format!("unknown filter '{id}'")))
    }

    /// Appends the filter to the active list. `Ok(false)` when it already was active.
    pub fn activate(&mut self, id: &str) -> PosefxResult<bool> {
        let idx = self.lookup(id)?;
        if self.active.contains(&idx) {
            return Ok(false);
        }
        self.active.push(idx);
        tracing::debug!(id, "activated filter");
        let filter = &self.available[idx];
        for (_, l) in &mut self.listeners {
            l.on_filter_activated(filter);
        }
        Ok(true)
    }

    /// `Ok(false)` when the filter was not active.
    pub fn deactivate(&mut self, id: &str) -> PosefxResult<bool> {
        let idx = self.lookup(id)?;
        let Some(pos) = self.active.iter().position(|&i| i == idx) else {
            return Ok(false);
        };
        self.active.remove(pos);
        tracing::debug!(id, "deactivated filter");
        let filter = &self.available[idx];
        for (_, l) in &mut self.listeners {
            l.on_filter_deactivated(filter);
        }
        Ok(true)
    }

    pub fn deactivate_all(&mut self) {
        self.active.clear();
        tracing::debug!("deactivated all filters");
        for (_, l) in &mut self.listeners {
            l.on_all_filters_deactivated();
        }
    }

    /// Moves the active entry at `from` to position `to`.
    pub fn move_active(&mut self, from: usize, to: usize) -> PosefxResult<()> {
        let len = self.active.len();
        if from >= len || to >= len {
            return Err(PosefxError::validation(format!(
                "move_active({from}, {to}) out of range for {len} active filters"
            )));
        }
        if from == to {
            return Ok(());
        }
        let idx = self.active.remove(from);
        self.active.insert(to, idx);
        let ordered: Vec<&Filter> = self.active.iter().map(|&i| &self.available[i]).collect();
        for (_, l) in &mut self.listeners {
            l.on_filters_reordered(&ordered);
        }
        Ok(())
    }

    pub fn requires_pose(&self) -> bool {
        self.active.iter().any(|&i| self.available[i].requires_pose())
    }

    pub fn reset_all(&mut self) {
        for filter in &mut self.available {
            filter.reset();
        }
    }

    pub fn set_param(&mut self, id: &str, key: &str, value: &ParamValue) -> PosefxResult<()> {
        let idx = self.lookup(id)?;
        self.available[idx].set_param(key, value)
    }

    pub fn add_listener(&mut self, listener: Box<dyn FilterChangeListener>) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Returns whether a listener was removed.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Runs every active filter in order on the same buffer. A failing filter is logged and
    /// skipped.
    #[tracing::instrument(skip(self, buf, pose, ctx), fields(active = self.active.len()))]
    pub fn apply_all(&self, buf: &mut RasterBuffer, pose: Option<&Pose>, ctx: &mut FrameContext) {
        for &i in &self.active {
            run_filter(&self.available[i], buf, pose, ctx);
        }
    }

    /// Independent copy of the active filters, in order.
    pub fn snapshot(&self) -> FilterChain {
        FilterChain {
            filters: self.active().into_iter().cloned().collect(),
        }
    }
}

/// A failing filter is logged and skipped; the buffer keeps whatever it had drawn so far.
fn run_filter(filter: &Filter, buf: &mut RasterBuffer, pose: Option<&Pose>, ctx: &mut FrameContext) {
    if let Err(err) = filter.apply(buf, pose, ctx) {
        tracing::warn!(id = filter.id(), %err, "filter failed, skipping");
    }
}

/// Frozen active list that can be shared across render threads.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterChain {
    filters: Vec<Filter>,
}

impl FilterChain {
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn requires_pose(&self) -> bool {
        self.filters.iter().any(Filter::requires_pose)
    }

    pub fn apply(&self, buf: &mut RasterBuffer, pose: Option<&Pose>, ctx: &mut FrameContext) {
        for filter in &self.filters {
            run_filter(filter, buf, pose, ctx);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/manager/mod.rs"]
mod tests;
