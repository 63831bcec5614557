//! Error types for mailsplit.
//!
//! Library crates use [`MailsplitError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Classification and markup normalization never fail; these variants cover
//! configuration and the generation round-trip around them.

use std::path::PathBuf;

/// Top-level error type for all mailsplit operations.
#[derive(Debug, thiserror::Error)]
pub enum MailsplitError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while talking to the generation endpoint.
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint answered, but not with a usable response body.
    #[error("response error: {message}")]
    Response { message: String },

    /// The endpoint reported `success: false`.
    #[error("generation failed: {0}")]
    Generation(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Input validation error (empty prompt, bad endpoint URL, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, MailsplitError>;

impl MailsplitError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a response error from any displayable message.
    pub fn response(msg: impl Into<String>) -> Self {
        Self::Response {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
