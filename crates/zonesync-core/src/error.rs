//! Error types for zonesync
//!
//! This module defines all error types used throughout the workspace.

use thiserror::Error;

/// Result type alias for zonesync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for zonesync
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors (missing credential, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport or API failure reported by the remote DNS store
    #[error("Remote call failed ({provider}): {message}")]
    RemoteCall {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// Zone or record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Record type is outside the set a provider can encode
    #[error("Unsupported record type: {0}")]
    UnsupportedType(String),

    /// Record payload does not follow its type-specific format
    #[error("Malformed {record_type} value: {message}")]
    MalformedValue {
        /// Record type whose payload failed to parse
        record_type: String,
        /// What was wrong with the payload
        message: String,
    },

    /// The caller cancelled the operation
    #[error("Operation cancelled")]
    Cancelled,

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a remote call error
    pub fn remote_call(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RemoteCall {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an unsupported type error
    pub fn unsupported_type(record_type: impl ToString) -> Self {
        Self::UnsupportedType(record_type.to_string())
    }

    /// Create a malformed value error
    pub fn malformed(record_type: impl ToString, message: impl Into<String>) -> Self {
        Self::MalformedValue {
            record_type: record_type.to_string(),
            message: message.into(),
        }
    }

    /// Whether the error was caused by a configuration problem
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
