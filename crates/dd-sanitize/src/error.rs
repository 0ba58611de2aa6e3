//! Error types for sanitizer configuration and logging set-up.
//!
//! Sanitizing itself never fails; these errors only surface while loading
//! policies and configs or installing the log subscriber.

use thiserror::Error;

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, SanitizeError>;

/// Errors that can occur outside the sanitizing path.
#[derive(Error, Debug)]
pub enum SanitizeError {
    /// I/O error during policy or config file operations.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error in a policy or config file.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A config value was present but not understood.
    #[error("config error: {0}")]
    Config(String),

    /// The global log subscriber could not be installed.
    #[error("logging error: {0}")]
    Logging(String),
}
