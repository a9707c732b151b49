//! Bounded, runtime-adjustable filter parameters.
//!
//! Every filter stores its parameters as typed fields ([`Slider`], [`Toggle`], [`Choice`],
//! [`ColorParam`]). The [`Parameterized`] trait is the reflection layer on top: it lists the
//! parameters in UI order and routes string-keyed updates to the right field.

mod value;

pub use value::ParamValue;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{PosefxError, PosefxResult};

/// Numeric parameter bounded to `[min, max]` and snapped to `step`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Slider {
    value: f64,
    min: f64,
    max: f64,
    step: f64,
    #[serde(skip)]
    default: f64,
}

impl Slider {
    /// Swapped bounds are reordered; a non-positive or non-finite `step` disables snapping.
    pub fn new(default: f64, min: f64, max: f64, step: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let step = if step.is_finite() && step > 0.0 { step } else { 0.0 };
        let default = default.clamp(min, max);
        Self {
            value: default,
            min,
            max,
            step,
            default,
        }
    }

    /// Current value, always inside `[min, max]`.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn value_f32(&self) -> f32 {
        self.value as f32
    }

    /// Value rounded to the nearest non-negative integer.
    pub fn value_u32(&self) -> u32 {
        self.value.round().max(0.0) as u32
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Snaps to the step grid anchored at `min`, then clamps. Non-finite input is ignored.
    pub fn set(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        let snapped = if self.step > 0.0 {
            let grid = self.min + ((value - self.min) / self.step).round() * self.step;
            // Values already on the grid are kept as given so they survive a round trip.
            if (grid - value).abs() <= self.step * 1e-9 { value } else { grid }
        } else {
            value
        };
        self.value = snapped.clamp(self.min, self.max);
    }

    /// Restores the construction-time default.
    pub fn reset(&mut self) {
        self.value = self.default;
    }
}

/// On/off parameter.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Toggle {
    enabled: bool,
    #[serde(skip)]
    default: bool,
}

impl Toggle {
    pub fn new(default: bool) -> Self {
        Self {
            enabled: default,
            default,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn reset(&mut self) {
        self.enabled = self.default;
    }
}

/// Single choice out of a fixed, non-empty option list.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Choice {
    selected: usize,
    options: &'static [&'static str],
    #[serde(skip)]
    default: usize,
}

impl Choice {
    /// `default` is clamped to the last option. Panics on an empty option list.
    pub fn new(default: usize, options: &'static [&'static str]) -> Self {
        assert!(!options.is_empty(), "Choice requires at least one option");
        let default = default.min(options.len() - 1);
        Self {
            selected: default,
            options,
            default,
        }
    }

    /// Index into [`Self::options`].
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_name(&self) -> &'static str {
        self.options[self.selected]
    }

    pub fn options(&self) -> &'static [&'static str] {
        self.options
    }

    /// Out-of-range indices select the last option.
    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.options.len() - 1);
    }

    /// Selects by option name, ignoring ASCII case.
    pub fn select_name(&mut self, name: &str) -> PosefxResult<()> {
        let name = name.trim();
        let Some(idx) = self
            .options
            .iter()
            .position(|opt| opt.eq_ignore_ascii_case(name))
        else {
            return Err(PosefxError::param(format!(
                "unknown option '{name}' (expected one of {:?})",
                self.options
            )));
        };
        self.selected = idx;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.selected = self.default;
    }
}

/// Opaque RGB color parameter.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ColorParam {
    color: Rgb8,
    #[serde(skip)]
    default: Rgb8,
}

impl ColorParam {
    pub fn new(default: Rgb8) -> Self {
        Self {
            color: default,
            default,
        }
    }

    pub fn color(&self) -> Rgb8 {
        self.color
    }

    pub fn set(&mut self, color: Rgb8) {
        self.color = color;
    }

    pub fn reset(&mut self) {
        self.color = self.default;
    }
}

/// Snapshot of one parameter, used for listing.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Param {
    /// Bounded number.
    Slider(Slider),
    /// Boolean switch.
    Toggle(Toggle),
    /// One of a fixed list of names.
    Choice(Choice),
    /// RGB color.
    Color(ColorParam),
}

impl Param {
    /// Current value in the form [`ParamMut::apply`] accepts.
    pub fn value(&self) -> ParamValue {
        match self {
            Param::Slider(s) => ParamValue::Number(s.value()),
            Param::Toggle(t) => ParamValue::Bool(t.enabled()),
            Param::Choice(c) => ParamValue::Text(c.selected_name().to_owned()),
            Param::Color(c) => c.color().into(),
        }
    }
}

/// Mutable handle to one typed parameter field.
#[derive(Debug)]
pub enum ParamMut<'a> {
    Slider(&'a mut Slider),
    Toggle(&'a mut Toggle),
    Choice(&'a mut Choice),
    Color(&'a mut ColorParam),
}

impl ParamMut<'_> {
    /// Writes `value` through the field's own clamping. Choices take an index or an option
    /// name; any other type mismatch is a [`PosefxError::Param`].
    pub fn apply(self, value: &ParamValue) -> PosefxResult<()> {
        match (self, value) {
            (ParamMut::Slider(s), ParamValue::Number(n)) => s.set(*n),
            (ParamMut::Toggle(t), ParamValue::Bool(b)) => t.set(*b),
            (ParamMut::Choice(c), ParamValue::Number(n)) => {
                if !n.is_finite() {
                    return Err(PosefxError::param("choice index must be finite"));
                }
                c.select(n.round().max(0.0) as usize);
            }
            (ParamMut::Choice(c), ParamValue::Text(name)) => c.select_name(name)?,
            (ParamMut::Color(c), ParamValue::Color([r, g, b])) => {
                c.set(Rgb8::from_clamped(*r, *g, *b));
            }
            (target, value) => {
                return Err(PosefxError::param(format!(
                    "{} parameter cannot take {}",
                    target.kind_name(),
                    value.kind_name()
                )));
            }
        }
        Ok(())
    }

    /// Restores the field's default.
    pub fn reset(self) {
        match self {
            ParamMut::Slider(s) => s.reset(),
            ParamMut::Toggle(t) => t.reset(),
            ParamMut::Choice(c) => c.reset(),
            ParamMut::Color(c) => c.reset(),
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            ParamMut::Slider(_) => "slider",
            ParamMut::Toggle(_) => "toggle",
            ParamMut::Choice(_) => "choice",
            ParamMut::Color(_) => "color",
        }
    }
}

/// Reflection over a filter's typed parameter fields.
pub trait Parameterized {
    /// Parameters in UI listing order.
    fn params(&self) -> Vec<(&'static str, Param)>;

    /// Typed handle for `key`, `None` for unknown keys.
    fn param_mut(&mut self, key: &str) -> Option<ParamMut<'_>>;

    /// Applies `value` to `key`. Unknown keys are a [`PosefxError::Param`].
    fn set_param(&mut self, key: &str, value: &ParamValue) -> PosefxResult<()> {
        let Some(param) = self.param_mut(key) else {
            return Err(PosefxError::param(format!("unknown parameter '{key}'")));
        };
        param.apply(value)
    }

    /// Restores every listed parameter to its default.
    fn reset_params(&mut self) {
        let keys: Vec<&'static str> = self.params().into_iter().map(|(k, _)| k).collect();
        for key in keys {
            if let Some(param) = self.param_mut(key) {
                param.reset();
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/mod.rs"]
mod tests;
