//! Concrete filters and the closed [`FilterKind`] enum that dispatches to them.

pub mod color_adjust;
pub mod connected_sobel;
pub mod glow_dots;
pub mod skeleton;
pub mod urban_boxes;

pub use color_adjust::ColorAdjust;
pub use connected_sobel::ConnectedSobel;
pub use glow_dots::GlowDots;
pub use skeleton::Skeleton;
pub use urban_boxes::UrbanBoxes;

use crate::determinism::FrameContext;
use crate::foundation::error::{PosefxError, PosefxResult};
use crate::params::{Param, ParamMut, Parameterized};
use crate::pose::Pose;
use crate::raster::RasterBuffer;

#[derive(Clone, Debug, PartialEq)]
pub enum FilterKind {
    ColorAdjust(ColorAdjust),
    GlowDots(GlowDots),
    ConnectedSobel(ConnectedSobel),
    UrbanBoxes(UrbanBoxes),
    Skeleton(Skeleton),
}

impl FilterKind {
    pub const NAMES: &'static [&'static str] = &[
        "color_adjust",
        "glow_dots",
        "connected_sobel",
        "urban_boxes",
        "skeleton",
    ];

    /// Default-parameter instance for a kind name; `-` and case are ignored.
    pub fn from_name(name: &str) -> PosefxResult<Self> {
        let name = name.trim().to_ascii_lowercase().replace('-', "_");
        Ok(match name.as_str() {
            "color_adjust" | "coloradjust" => Self::ColorAdjust(ColorAdjust::default()),
            "glow_dots" | "glowdots" => Self::GlowDots(GlowDots::default()),
            "connected_sobel" | "connectedsobel" => Self::ConnectedSobel(ConnectedSobel::default()),
            "urban_boxes" | "urbanboxes" => Self::UrbanBoxes(UrbanBoxes::default()),
            "skeleton" => Self::Skeleton(Skeleton::default()),
            _ => {
                return Err(PosefxError::validation(format!(
                    "unknown filter kind '{name}'"
                )));
            }
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ColorAdjust(_) => "color_adjust",
            Self::GlowDots(_) => "glow_dots",
            Self::ConnectedSobel(_) => "connected_sobel",
            Self::UrbanBoxes(_) => "urban_boxes",
            Self::Skeleton(_) => "skeleton",
        }
    }

    pub fn requires_pose(&self) -> bool {
        matches!(
            self,
            Self::GlowDots(_) | Self::UrbanBoxes(_) | Self::Skeleton(_)
        )
    }

    fn params_dyn(&self) -> &dyn Parameterized {
        match self {
            Self::ColorAdjust(f) => f,
            Self::GlowDots(f) => f,
            Self::ConnectedSobel(f) => f,
            Self::UrbanBoxes(f) => f,
            Self::Skeleton(f) => f,
        }
    }

    fn params_dyn_mut(&mut self) -> &mut dyn Parameterized {
        match self {
            Self::ColorAdjust(f) => f,
            Self::GlowDots(f) => f,
            Self::ConnectedSobel(f) => f,
            Self::UrbanBoxes(f) => f,
            Self::Skeleton(f) => f,
        }
    }
}

/// A filter instance with a stable id. Cloning yields an independent deep copy.
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    id: String,
    kind: FilterKind,
}

impl Filter {
    pub fn new(id: impl Into<String>, kind: FilterKind) -> PosefxResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(PosefxError::validation("filter id must be non-empty"));
        }
        Ok(Self { id, kind })
    }

    /// One instance of every kind, ids equal to the kind names.
    pub fn defaults() -> Vec<Filter> {
        FilterKind::NAMES
            .iter()
            .filter_map(|name| FilterKind::from_name(name).ok())
            .map(|kind| Self {
                id: kind.name().to_owned(),
                kind,
            })
            .collect()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &FilterKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut FilterKind {
        &mut self.kind
    }

    pub fn requires_pose(&self) -> bool {
        self.kind.requires_pose()
    }

    /// Deep copy under a new id.
    pub fn duplicate(&self, id: impl Into<String>) -> PosefxResult<Self> {
        Self::new(id, self.kind.clone())
    }

    pub fn reset(&mut self) {
        self.kind.params_dyn_mut().reset_params();
    }

    /// Runs the filter in place. Pose filters are a no-op without a pose.
    ///
    /// Drawing filters fail with [`PosefxError::Raster`] when the buffer exceeds the
    /// drawing surface limit of 65535 px per side.
    pub fn apply(
        &self,
        buf: &mut RasterBuffer,
        pose: Option<&Pose>,
        ctx: &mut FrameContext,
    ) -> PosefxResult<()> {
        if buf.is_empty() {
            return Ok(());
        }
        match (&self.kind, pose) {
            (FilterKind::ColorAdjust(f), _) => f.apply(buf),
            (FilterKind::ConnectedSobel(f), _) => f.apply(buf, ctx),
            (FilterKind::GlowDots(f), Some(pose)) => f.apply(buf, pose, ctx),
            (FilterKind::UrbanBoxes(f), Some(pose)) => f.apply(buf, pose, ctx),
            (FilterKind::Skeleton(f), Some(pose)) => f.apply(buf, pose),
            (_, None) => {
                tracing::trace!(id = %self.id, "no pose, skipping filter");
                Ok(())
            }
        }
    }
}

impl Parameterized for Filter {
    fn params(&self) -> Vec<(&'static str, Param)> {
        self.kind.params_dyn().params()
    }

    fn param_mut(&mut self, key: &str) -> Option<ParamMut<'_>> {
        self.kind.params_dyn_mut().param_mut(key)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/mod.rs"]
mod tests;
