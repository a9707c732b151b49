/// Result type used across the crate.
pub type PosefxResult<T> = Result<T, PosefxError>;

/// Error taxonomy for pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum PosefxError {
    /// Malformed config, ids, keypoints or other caller-supplied data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown parameter key or a value of the wrong type for a parameter.
    #[error("parameter error: {0}")]
    Param(String),

    /// Buffer sizes that do not match their pixel data or exceed drawing limits.
    #[error("raster error: {0}")]
    Raster(String),

    /// Failures reading or writing JSON documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PosefxError {
    /// Build a [`PosefxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PosefxError::Param`] value.
    pub fn param(msg: impl Into<String>) -> Self {
        Self::Param(msg.into())
    }

    /// Build a [`PosefxError::Raster`] value.
    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }

    /// Build a [`PosefxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for PosefxError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
