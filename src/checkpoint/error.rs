//! Checkpoint error types.

use thiserror::Error;

/// Errors that can occur during checkpoint operations
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Checkpoint version is not supported by this version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Checkpoint was taken from a controller of another category
    #[error("Checkpoint is for category '{found}', expected '{expected}'")]
    CategoryMismatch {
        expected: &'static str,
        found: String,
    },

    /// Checkpoint names a state the graph does not have
    #[error("Checkpoint state '{name}' does not exist in the graph")]
    UnknownState { name: String },
}
