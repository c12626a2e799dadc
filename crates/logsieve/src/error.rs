//! Error types for logsieve.
//!
//! This module defines all error types used throughout the logsieve crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for logsieve operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Sink Errors ===
    /// Failed to open or create the sink file.
    #[error("failed to open log sink at {path}: {source}")]
    SinkOpen {
        /// Path to the sink file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Writing a record to the sink failed.
    #[error("failed to write to log sink at {path}: {source}")]
    SinkWrite {
        /// Path to the sink file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Rotating the sink file failed.
    #[error("failed to rotate log sink at {path}: {source}")]
    SinkRotate {
        /// Path to the sink file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Blacklist Fetch Errors ===
    /// The blacklist request could not be sent or read.
    #[error("blacklist request failed: {0}")]
    BlacklistRequest(#[from] reqwest::Error),

    /// The blacklist endpoint answered with an error status.
    #[error("blacklist endpoint returned {status}")]
    BlacklistStatus {
        /// The HTTP status code.
        status: reqwest::StatusCode,
        /// The response body, as read before the status was checked.
        body: String,
    },

    /// Writing the blacklist CSV failed.
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for logsieve operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a sink open error.
    #[must_use]
    pub fn sink_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SinkOpen {
            path: path.into(),
            source,
        }
    }

    /// Create a sink write error.
    #[must_use]
    pub fn sink_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SinkWrite {
            path: path.into(),
            source,
        }
    }

    /// Create a sink rotate error.
    #[must_use]
    pub fn sink_rotate(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SinkRotate {
            path: path.into(),
            source,
        }
    }

    /// Check if this error originated in the sink layer.
    #[must_use]
    pub fn is_sink_error(&self) -> bool {
        matches!(
            self,
            Self::SinkOpen { .. } | Self::SinkWrite { .. } | Self::SinkRotate { .. }
        )
    }

    /// Check if this error came from the blacklist fetch.
    #[must_use]
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Self::BlacklistRequest(_) | Self::BlacklistStatus { .. } | Self::Csv(_)
        )
    }
}
