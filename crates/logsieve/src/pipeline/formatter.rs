//! Record formatting with structural redaction.
//!
//! The formatter is the second redaction stage: structured payloads are
//! masked by the structural redactor and rendered to text, then the record
//! is laid out as `timestamp | logger | function | message`. Text payloads
//! pass through untouched here; scrubbing those is the filter stage's job.

use tracing::debug;

use crate::record::{LogRecord, Payload};
use crate::redact::StructuralRedactor;

/// Timestamp layout used in formatted lines.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Opaque stand-in emitted when a redacted payload cannot be rendered.
/// The record is still written; the raw payload never is.
const RENDER_FALLBACK: &str = "[payload withheld]";

/// Formatter that structurally redacts structured payloads before layout.
#[derive(Debug, Clone)]
pub struct RedactingFormatter {
    structural: StructuralRedactor,
    debug_trace: bool,
    emit_json: bool,
}

impl RedactingFormatter {
    /// Create a formatter around the given structural redactor.
    ///
    /// Debug tracing and JSON encoding start disabled.
    #[must_use]
    pub fn new(structural: StructuralRedactor) -> Self {
        Self {
            structural,
            debug_trace: false,
            emit_json: false,
        }
    }

    /// Echo each record's pre-redaction payload to the tracing debug
    /// channel. The echo goes to ephemeral diagnostics only, never to the
    /// sink.
    #[must_use]
    pub fn with_debug_trace(mut self, enabled: bool) -> Self {
        self.debug_trace = enabled;
        self
    }

    /// Render redacted structured payloads as compact JSON instead of their
    /// default debug representation.
    #[must_use]
    pub fn with_json_encoding(mut self, enabled: bool) -> Self {
        self.emit_json = enabled;
        self
    }

    /// Format a record into its sink line.
    ///
    /// Structured payloads are redacted and rendered; a rendering failure
    /// falls back to an opaque placeholder so the record is emitted without
    /// leaking the unredacted payload. Record metadata is never altered.
    #[must_use]
    pub fn format(&self, record: &LogRecord) -> String {
        if self.debug_trace {
            debug!(payload = ?record.payload, "pre-redaction payload");
        }

        let message = match &record.payload {
            Payload::Text(text) => text.clone(),
            Payload::Structured(value) => {
                let redacted = self.structural.redact(value);
                if self.emit_json {
                    match serde_json::to_string(&redacted) {
                        Ok(rendered) => rendered,
                        Err(e) => {
                            debug!(error = %e, "payload rendering failed");
                            RENDER_FALLBACK.to_string()
                        }
                    }
                } else {
                    format!("{redacted:?}")
                }
            }
        };

        format!(
            "{} | {} | {} | {}",
            record.timestamp.format(TIMESTAMP_FORMAT),
            record.logger,
            record.function,
            message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Level;
    use serde_json::json;

    fn record(payload: Payload) -> LogRecord {
        LogRecord::new("svc", "handler", Level::Info, payload)
    }

    #[test]
    fn test_layout_fields_in_order() {
        let formatter = RedactingFormatter::new(StructuralRedactor::default());
        let line = formatter.format(&record(Payload::from("hello")));

        let fields: Vec<&str> = line.split(" | ").collect();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[1], "svc");
        assert_eq!(fields[2], "handler");
        assert_eq!(fields[3], "hello");
    }

    #[test]
    fn test_text_payload_passes_through() {
        // Pattern scrubbing is the filter stage's job; even a sensitive
        // fragment in text is left for that stage.
        let formatter = RedactingFormatter::new(StructuralRedactor::default());
        let line = formatter.format(&record(Payload::from("token=abcd1234")));
        assert!(line.ends_with("token=abcd1234"));
    }

    #[test]
    fn test_structured_payload_is_redacted() {
        let formatter = RedactingFormatter::new(StructuralRedactor::default());
        let line = formatter.format(&record(Payload::from(json!({"user_id": 42, "note": "ok"}))));
        assert!(line.contains("REDACTED"));
        assert!(!line.contains("42"));
        assert!(line.contains("ok"));
    }

    #[test]
    fn test_json_encoding() {
        let formatter =
            RedactingFormatter::new(StructuralRedactor::default()).with_json_encoding(true);
        let line = formatter.format(&record(Payload::from(json!({"token": "xyz", "n": 7}))));
        assert!(line.ends_with(r#"{"token":"REDACTED","n":7}"#));
    }

    #[test]
    fn test_debug_encoding_is_default() {
        let formatter = RedactingFormatter::new(StructuralRedactor::default());
        let line = formatter.format(&record(Payload::from(json!({"token": "xyz"}))));
        // The debug rendering spells out the value variants.
        assert!(line.contains("Object"));
        assert!(line.contains("REDACTED"));
        assert!(!line.contains("xyz"));
    }

    #[test]
    fn test_nested_structured_payload() {
        let formatter =
            RedactingFormatter::new(StructuralRedactor::default()).with_json_encoding(true);
        let payload = json!({"meta": {"token": "xyz9999"}, "items": [1, {"ip": "1.2.3.4"}]});
        let line = formatter.format(&record(Payload::from(payload)));
        assert!(!line.contains("xyz9999"));
        assert!(!line.contains("1.2.3.4"));
    }

    #[test]
    fn test_metadata_not_redacted() {
        // A sensitive-looking logger or function name is metadata, not
        // payload, and survives intact.
        let formatter = RedactingFormatter::new(StructuralRedactor::default());
        let rec = LogRecord::new("token", "password", Level::Info, Payload::from("ok"));
        let line = formatter.format(&rec);
        assert!(line.contains("| token |"));
        assert!(line.contains("| password |"));
    }

    #[test]
    fn test_timestamp_layout() {
        let formatter = RedactingFormatter::new(StructuralRedactor::default());
        let line = formatter.format(&record(Payload::from("x")));
        let stamp = line.split(" | ").next().unwrap();
        // e.g. 2025-03-01 12:34:56.789
        assert_eq!(stamp.len(), 23);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[10..11], " ");
        assert_eq!(&stamp[19..20], ".");
    }

    #[test]
    fn test_debug_trace_does_not_change_output() {
        let plain = RedactingFormatter::new(StructuralRedactor::default());
        let tracing = RedactingFormatter::new(StructuralRedactor::default()).with_debug_trace(true);
        let rec = record(Payload::from(json!({"password": "hunter2"})));
        let a = plain.format(&rec);
        let b = tracing.format(&rec);
        assert_eq!(a.split(" | ").last(), b.split(" | ").last());
        assert!(!b.contains("hunter2"));
    }
}
