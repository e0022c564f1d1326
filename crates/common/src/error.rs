//! Error types shared across Steadycam crates.

use std::path::PathBuf;

/// Top-level error type for Steadycam operations.
#[derive(Debug, thiserror::Error)]
pub enum SteadycamError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Session error: {message}")]
    Session { message: String },

    #[error("Trace error at line {line}: {message}")]
    Trace { line: usize, message: String },

    #[error("Unknown stabilization mode: {value} (expected cinematic, standard, auto or off)")]
    InvalidMode { value: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using SteadycamError.
pub type SteadycamResult<T> = Result<T, SteadycamError>;

impl SteadycamError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session {
            message: msg.into(),
        }
    }

    pub fn trace(line: usize, msg: impl Into<String>) -> Self {
        Self::Trace {
            line,
            message: msg.into(),
        }
    }

    pub fn invalid_mode(value: impl Into<String>) -> Self {
        Self::InvalidMode {
            value: value.into(),
        }
    }
}
