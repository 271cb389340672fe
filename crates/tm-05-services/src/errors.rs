//! Service error types.

use thiserror::Error;

/// Errors from preset persistence.
#[derive(Debug, Error)]
pub enum PresetError {
    /// Preset names must be non-empty after trimming.
    #[error("Preset name must not be empty")]
    EmptyName,

    #[error("Failed to access preset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode presets: {0}")]
    Serialize(#[from] serde_json::Error),
}
