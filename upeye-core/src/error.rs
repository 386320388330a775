//! Error types for upeye-core

use thiserror::Error;

/// Main error type for the upeye-core library
#[derive(Error, Debug)]
pub enum Error {
    /// The membership filter was invoked without any selected activity
    #[error("at least one activity must be selected")]
    EmptySelection,

    /// An activity record violates the input contract
    #[error("malformed activity record {id}: {message}")]
    MalformedRecord { id: String, message: String },

    /// Pattern length outside 1..=4
    #[error("invalid pattern length {0}: expected 1, 2, 3 or 4")]
    InvalidPatternLength(u8),

    /// Unrecognized membership filter mode
    #[error("unknown filter mode: {0}")]
    UnknownFilterMode(String),

    /// User not present in the snapshot
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// A new user row was rejected
    #[error("invalid user: {0}")]
    InvalidUser(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn malformed(id: &str, message: impl Into<String>) -> Self {
        Error::MalformedRecord {
            id: id.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for upeye-core
pub type Result<T> = std::result::Result<T, Error>;
