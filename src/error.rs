//! Error types for tabboard
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, bad config, unknown profile)
//! - 4: Operation failed (io, serialization, network)
//!
//! The task core itself never produces an error for empty input or unknown
//! ids; those are no-ops. Errors here come from the ambient layers.

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the tabboard CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for tabboard operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("User not found")]
    ProfileNotFound(String),

    // Operation failures (exit code 4)
    #[error("Something went wrong: {0}")]
    ProfileLookup(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidConfig(_)
            | Error::InvalidArgument(_)
            | Error::ConfigNotFound(_)
            | Error::ProfileNotFound(_) => exit_codes::USER_ERROR,

            Error::ProfileLookup(_)
            | Error::Http(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured details attached to JSON error output
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::ProfileNotFound(username) => {
                Some(serde_json::json!({ "username": username }))
            }
            Error::ConfigNotFound(path) => Some(serde_json::json!({ "path": path })),
            _ => None,
        }
    }
}

/// Result type alias for tabboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: err.details(),
        }
    }
}
