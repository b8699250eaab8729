//! Settings error types.

use thiserror::Error;

/// Errors that can occur when loading, parsing or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read or write a config file.
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    /// Failed to parse JSON in a config file.
    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A config value was invalid (unknown provider, ...).
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
