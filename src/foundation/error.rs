/// Convenience result type used across framefold.
pub type FramefoldResult<T> = Result<T, FramefoldError>;

/// Top-level error taxonomy used by compositor APIs.
#[derive(thiserror::Error, Debug)]
pub enum FramefoldError {
    /// Invalid user-provided data, geometry, or frame shapes.
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing or contradictory render configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Errors raised while resolving parameters or producing a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors reported by a frame sink.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramefoldError {
    /// Build a [`FramefoldError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FramefoldError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`FramefoldError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`FramefoldError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`FramefoldError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
