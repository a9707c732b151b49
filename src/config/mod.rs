//! JSON pipeline description: seed, frame rate, filter parameters and activation order.

use std::collections::{BTreeMap, BTreeSet};

use crate::filter::FilterKind;
use crate::foundation::core::Fps;
use crate::foundation::error::{PosefxError, PosefxResult};
use crate::params::ParamValue;
use crate::urban::UrbanEffectsConfig;

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub fps: Fps,
    /// Active filters run in the order they appear here.
    #[serde(default)]
    pub filters: Vec<FilterConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urban_effects: Option<UrbanEffectsConfig>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    pub id: String,
    /// Needed only for ids that are not one of the built-in filters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, ParamValue>,
}

impl PipelineConfig {
    pub fn from_json(s: &str) -> PosefxResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json_pretty(&self) -> PosefxResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> PosefxResult<()> {
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(PosefxError::validation("fps must have num>0 and den>0"));
        }

        let mut seen = BTreeSet::new();
        for f in &self.filters {
            if f.id.trim().is_empty() {
                return Err(PosefxError::validation("filter id must be non-empty"));
            }
            if !seen.insert(f.id.as_str()) {
                return Err(PosefxError::validation(format!(
                    "filter '{}' is listed more than once",
                    f.id
                )));
            }
            match &f.kind {
                Some(kind) => {
                    let resolved = FilterKind::from_name(kind)?.name();
                    if FilterKind::NAMES.contains(&f.id.as_str()) && resolved != f.id {
                        return Err(PosefxError::validation(format!(
                            "filter '{}' is built in with kind '{}', not '{kind}'",
                            f.id, f.id
                        )));
                    }
                }
                None if !FilterKind::NAMES.contains(&f.id.as_str()) => {
                    return Err(PosefxError::validation(format!(
                        "filter '{}' is not built in and needs a kind",
                        f.id
                    )));
                }
                None => {}
            }
        }

        if let Some(urban) = &self.urban_effects {
            urban.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/mod.rs"]
mod tests;
