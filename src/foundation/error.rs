use crate::playback::cursor::Cursor;

/// Convenience result type used across the crate.
pub type PlaybackResult<T> = Result<T, PlaybackError>;

/// Contract violations reported by the engine.
///
/// None of these describe bad user input; input is filtered before it reaches the engine. Every
/// operation that returns one of these leaves tree and visual state as it was before the call.
#[derive(thiserror::Error, Debug)]
pub enum PlaybackError {
    /// A snapshot was requested for a position that was never captured.
    #[error("missing snapshot at {0}")]
    MissingSnapshot(Cursor),

    /// A jump target lies outside the trace.
    #[error("invalid pointer: {0} is outside the trace")]
    InvalidPointer(Cursor),

    /// An instruction does not fit the tree or scene it is applied to.
    #[error("malformed trace: {0}")]
    MalformedTrace(String),

    /// Invalid configuration values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlaybackError {
    /// Build a [`PlaybackError::MalformedTrace`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedTrace(msg.into())
    }

    /// Build a [`PlaybackError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PlaybackError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
