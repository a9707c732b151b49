/// A value handed to a parameter setter.
///
/// Deserializes from plain JSON: `true`, `0.5`, `"Hexagon"` (choice option) or `[r, g, b]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Color([i64; 3]),
}

impl ParamValue {
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            ParamValue::Bool(_) => "a bool",
            ParamValue::Number(_) => "a number",
            ParamValue::Text(_) => "text",
            ParamValue::Color(_) => "a color",
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<crate::foundation::core::Rgb8> for ParamValue {
    fn from(c: crate::foundation::core::Rgb8) -> Self {
        Self::Color([i64::from(c.r), i64::from(c.g), i64::from(c.b)])
    }
}
