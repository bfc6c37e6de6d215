//! Unified error type for the jacket-lib crate.
//!
//! [`JacketError`] wraps mention source errors ([`SourceError`]), I/O and JSON
//! failures, and configuration problems. The extraction engine itself never
//! returns an error; these only surface from the layers around it.
//! `From` impls allow `?` to propagate across module boundaries.

use std::fmt;

use crate::platform::SourceError;

/// Unified error type for jacket-lib operations.
#[derive(Debug)]
pub enum JacketError {
    /// Mention source error (initialization, lookup, fetch).
    Source(SourceError),
    /// Standard I/O error (feed file read, config persistence).
    Io(std::io::Error),
    /// Malformed JSON in a mention feed.
    Json(serde_json::Error),
    /// Configuration validation error.
    Config(String),
}

impl fmt::Display for JacketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JacketError::Source(e) => write!(f, "{e}"),
            JacketError::Io(e) => write!(f, "I/O error: {e}"),
            JacketError::Json(e) => write!(f, "JSON error: {e}"),
            JacketError::Config(e) => write!(f, "Config error: {e}"),
        }
    }
}

impl std::error::Error for JacketError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JacketError::Source(e) => Some(e),
            JacketError::Io(e) => Some(e),
            JacketError::Json(e) => Some(e),
            JacketError::Config(_) => None,
        }
    }
}

impl From<SourceError> for JacketError {
    fn from(e: SourceError) -> Self {
        JacketError::Source(e)
    }
}

impl From<std::io::Error> for JacketError {
    fn from(e: std::io::Error) -> Self {
        JacketError::Io(e)
    }
}

impl From<serde_json::Error> for JacketError {
    fn from(e: serde_json::Error) -> Self {
        JacketError::Json(e)
    }
}

/// Crate-level Result alias using [`JacketError`].
pub type Result<T> = std::result::Result<T, JacketError>;
