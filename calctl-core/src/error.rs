//! Error types for calctl.

use thiserror::Error;

/// Errors that can occur while authenticating or operating on a calendar.
#[derive(Error, Debug)]
pub enum CalctlError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("No cached credential at {0}")]
    CredentialNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid time format '{input}' (use {expected})")]
    InvalidFormat { input: String, expected: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid calendar number: {selection} (choose 1-{count})")]
    InvalidSelection { selection: String, count: usize },

    #[error("No calendars found in your account")]
    NoCalendars,

    #[error("Remote error: {0}")]
    Remote(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Input closed before a value was entered")]
    InputClosed,
}

impl From<serde_json::Error> for CalctlError {
    fn from(err: serde_json::Error) -> Self {
        CalctlError::Serialization(err.to_string())
    }
}

/// Result type alias for calctl operations.
pub type CalctlResult<T> = Result<T, CalctlError>;
