//! Core record types for the logging pipeline.
//!
//! This module defines the in-memory representation of a log event: its
//! severity, its message payload, and the metadata carried alongside it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Severity of a log record.
///
/// Levels are ordered, so a logger's minimum severity can be compared
/// directly against a record's level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// Diagnostic detail.
    Debug,
    /// Normal operational messages.
    Info,
    /// Something unexpected that the operation survived.
    Warn,
    /// The operation failed.
    Error,
}

impl Level {
    /// Parse a level from its name, case-insensitively.
    ///
    /// Returns `None` for unrecognized names; callers that need a default
    /// should use [`Level::parse_or_default`].
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Parse a level from its name, falling back to [`Level::Info`] when the
    /// name is unrecognized.
    #[must_use]
    pub fn parse_or_default(name: &str) -> Self {
        Self::parse(name).unwrap_or(Self::Info)
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// The message payload of a log record.
///
/// A payload is either free-form text or a structured value; the two shapes
/// take different paths through the pipeline. Text is scrubbed by the
/// pattern stage, structured values by the structural stage. Each stage is a
/// no-op on the shape it does not own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    /// A free-form text message.
    Text(String),
    /// A structured value (nested mappings, sequences, scalars).
    Structured(Value),
}

impl Payload {
    /// Check whether this payload is free-form text.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Check whether this payload is a structured value.
    #[must_use]
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Structured(_))
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self::Structured(value)
    }
}

/// A single log event flowing through the pipeline.
///
/// The metadata fields (timestamp, logger, function) identify where and when
/// the event happened and are never redacted; only the payload is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// When this record was created.
    pub timestamp: DateTime<Utc>,

    /// Name of the logger that emitted the record.
    pub logger: String,

    /// Name of the function the record originated from.
    pub function: String,

    /// Severity of the record.
    pub level: Level,

    /// The message payload.
    pub payload: Payload,
}

impl LogRecord {
    /// Create a new record stamped with the current time.
    #[must_use]
    pub fn new(
        logger: impl Into<String>,
        function: impl Into<String>,
        level: Level,
        payload: Payload,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            logger: logger.into(),
            function: function.into(),
            level,
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_level_parse() {
        assert_eq!(Level::parse("debug"), Some(Level::Debug));
        assert_eq!(Level::parse("DEBUG"), Some(Level::Debug));
        assert_eq!(Level::parse("Info"), Some(Level::Info));
        assert_eq!(Level::parse("warning"), Some(Level::Warn));
        assert_eq!(Level::parse("WARN"), Some(Level::Warn));
        assert_eq!(Level::parse("error"), Some(Level::Error));
        assert_eq!(Level::parse("verbose"), None);
        assert_eq!(Level::parse(""), None);
    }

    #[test]
    fn test_level_parse_or_default() {
        assert_eq!(Level::parse_or_default("DEBUG"), Level::Debug);
        assert_eq!(Level::parse_or_default("nonsense"), Level::Info);
        assert_eq!(Level::parse_or_default(""), Level::Info);
    }

    #[test]
    fn test_level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
    }

    #[test]
    fn test_level_display() {
        assert_eq!(Level::Debug.to_string(), "DEBUG");
        assert_eq!(Level::Info.to_string(), "INFO");
        assert_eq!(Level::Warn.to_string(), "WARNING");
        assert_eq!(Level::Error.to_string(), "ERROR");
    }

    #[test]
    fn test_payload_shape_checks() {
        assert!(Payload::from("hello").is_text());
        assert!(!Payload::from("hello").is_structured());
        assert!(Payload::from(json!({"a": 1})).is_structured());
        assert!(!Payload::from(json!({"a": 1})).is_text());
    }

    #[test]
    fn test_payload_from_string() {
        let payload = Payload::from("login ok".to_string());
        assert_eq!(payload, Payload::Text("login ok".to_string()));
    }

    #[test]
    fn test_record_new_carries_metadata() {
        let record = LogRecord::new("svc", "handle_request", Level::Info, Payload::from("ok"));
        assert_eq!(record.logger, "svc");
        assert_eq!(record.function, "handle_request");
        assert_eq!(record.level, Level::Info);
        assert!(record.payload.is_text());
    }

    #[test]
    fn test_record_timestamp_is_recent() {
        let before = Utc::now();
        let record = LogRecord::new("svc", "f", Level::Info, Payload::from("ok"));
        let after = Utc::now();
        assert!(record.timestamp >= before);
        assert!(record.timestamp <= after);
    }
}
