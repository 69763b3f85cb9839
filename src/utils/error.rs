//! Error types for the client utilities.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use thiserror::Error;
use serde::Serialize;

/// Validation errors for caller-supplied options, files and ranges.
///
/// These indicate programmer error at the call site rather than a runtime
/// condition, so they are the only errors the compression entry points
/// propagate.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum ValidationError {
    /// Malformed compression options
    #[error("Options error: {0}")]
    Options(String),
    /// File rejected before compression
    #[error("File error: {0}")]
    File(String),
    /// Inverted or otherwise unusable date range
    #[error("Date range error: {0}")]
    DateRange(String),
}

/// Main error type for the client utilities.
#[derive(Error, Debug, Serialize)]
pub enum ClientError {
    /// Caller input validation failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Image decode, resize or encode failed
    #[error("Processing error: {0}")]
    Processing(String),

    /// File IO error
    #[error("IO error: {0}")]
    IO(String),

    /// Unsupported or invalid image format
    #[error("Format error: {0}")]
    Format(String),
}

/// Convenience result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub fn processing<T: Into<String>>(msg: T) -> Self {
        Self::Processing(msg.into())
    }

    pub fn format<T: Into<String>>(msg: T) -> Self {
        Self::Format(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        Self::IO(msg.into())
    }

    /// Returns `true` when the error came from caller input rather than the encoder.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl ValidationError {
    pub fn options(msg: impl Into<String>) -> Self {
        Self::Options(msg.into())
    }

    pub fn file(msg: impl Into<String>) -> Self {
        Self::File(msg.into())
    }

    pub fn date_range(msg: impl Into<String>) -> Self {
        Self::DateRange(msg.into())
    }
}

impl From<io::Error> for ClientError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

impl From<image::ImageError> for ClientError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Unsupported(e) => Self::Format(e.to_string()),
            image::ImageError::IoError(e) => Self::IO(e.to_string()),
            other => Self::Processing(other.to_string()),
        }
    }
}
