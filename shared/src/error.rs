//! Error types shared by the browser console and the CLI

use thiserror::Error;

/// Failure of a backend call.
///
/// Malformed list bodies are not errors: they are coerced to an empty list
/// by the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Network failure, DNS failure, refused connection, timeout
    #[error("Connection failed: {0}")]
    Transport(String),

    /// Backend answered with a non-2xx status
    #[error("HTTP {status}: {text}")]
    Status { status: u16, text: String },

    /// Body could not be encoded or decoded
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Backend answered 2xx but the operation result says it failed
    #[error("{0}")]
    Rejected(String),
}

impl ApiError {
    pub fn status(status: u16, text: impl Into<String>) -> Self {
        ApiError::Status {
            status,
            text: text.into(),
        }
    }
}

/// Local form validation failure; never reaches the network
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Port must be a number between 1 and 65535")]
    InvalidPort,
}

/// Failure of the persistence medium behind the address store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to write setting: {0}")]
    Write(String),
}
