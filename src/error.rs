//! Error types for taskgraph
//!
//! The layout core never fails; these errors belong to the shell around it
//! (loading inputs, reading configuration, reporting check results).
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (missing or unreadable input, invalid config)
//! - 3: Check failed (input problems reported by `taskgraph check --strict`)
//! - 4: Operation failed (I/O, serialization)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the taskgraph CLI
pub mod exit_codes {
    pub const USER_ERROR: i32 = 2;
    pub const CHECK_FAILED: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for taskgraph operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid task input in {path}: {message}")]
    InvalidInput { path: PathBuf, message: String },

    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    // Check failures (exit code 3)
    #[error("Task input has {count} problem(s)")]
    CheckFailed { count: usize },

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidConfig(_)
            | Error::InvalidInput { .. }
            | Error::InputNotFound(_)
            | Error::ConfigNotFound(_) => exit_codes::USER_ERROR,

            Error::CheckFailed { .. } => exit_codes::CHECK_FAILED,

            Error::Io(_) | Error::Json(_) | Error::TomlParse(_) | Error::TomlSerialize(_) => {
                exit_codes::OPERATION_FAILED
            }
        }
    }

    /// Structured fields for the JSON error envelope
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::InvalidConfig(message) => Some(serde_json::json!({ "message": message })),
            Error::InvalidInput { path, message } => Some(serde_json::json!({
                "path": path.to_string_lossy(),
                "message": message,
            })),
            Error::InputNotFound(path) | Error::ConfigNotFound(path) => {
                Some(serde_json::json!({ "path": path.to_string_lossy() }))
            }
            Error::CheckFailed { count } => Some(serde_json::json!({ "count": count })),
            _ => None,
        }
    }
}

/// Result type alias for taskgraph operations
pub type Result<T> = std::result::Result<T, Error>;
