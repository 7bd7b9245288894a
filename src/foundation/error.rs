/// Convenience result type used across inkfield.
pub type InkResult<T> = Result<T, InkError>;

/// Top-level error taxonomy used by canvas APIs.
///
/// Geometric degeneracies (zero radius, empty chunks) are not errors; they are skipped.
#[derive(thiserror::Error, Debug)]
pub enum InkError {
    /// Invalid configuration, viewport or script data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A bounded region or buffer ran out of room.
    #[error("capacity error: {0}")]
    Capacity(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InkError {
    /// Build an [`InkError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`InkError::Capacity`] value.
    pub fn capacity(msg: impl Into<String>) -> Self {
        Self::Capacity(msg.into())
    }

    /// Build an [`InkError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for InkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
