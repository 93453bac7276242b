//! Error types for the session library.

use thiserror::Error;

/// Errors that can occur while managing session state.
#[derive(Error, Debug)]
pub enum SessionError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    Unreachable(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a server response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// A server setting entry carried a value that is not valid JSON, or a
    /// known key carried a value of the wrong shape
    #[error("Corrupt setting entry `{key}`: {source}")]
    CorruptSetting {
        key: String,
        source: serde_json::Error,
    },

    /// JSON encoding/decoding error outside the setting merge
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Preference storage error
    #[error("Preference storage error: {0}")]
    Storage(String),

    /// I/O error from preference storage
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
