//! Error types for document inspection.

use thiserror::Error;

/// Errors raised while parsing or querying a document.
///
/// These are assertion failures for test suites; none of them are retried.
#[derive(Error, Debug)]
pub enum InspectError {
    /// Input bytes are not valid UTF-8.
    #[error("failed to decode JSON input as UTF-8: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),

    /// Input text is not valid JSON.
    #[error("malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// An accessor needed an object but found something else.
    #[error("expected a JSON object, got {actual}")]
    NotAMap {
        /// Kind of the value that was found.
        actual: String,
    },

    /// A required key was absent.
    #[error("missing required key: {0}")]
    MissingKey(String),

    /// A key was present with the wrong type.
    #[error("expected value of type {expected} at '{key}', but got {actual}")]
    TypeMismatch {
        /// The key that was looked up.
        key: String,
        /// The requested type.
        expected: String,
        /// Kind and text of the value that was found.
        actual: String,
    },
}

/// Result type for inspection operations.
pub type Result<T> = std::result::Result<T, InspectError>;
