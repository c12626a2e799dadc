//! Pre-emission record filter.
//!
//! The filter is the first redaction stage: text payloads are rewritten
//! through the pattern scrubber before the record reaches the formatter.
//! It never suppresses a record; admission control is not its job.

use crate::record::{LogRecord, Payload};
use crate::redact::PatternRedactor;

/// Filter that scrubs `key=value` fragments out of text payloads in place.
#[derive(Debug, Clone)]
pub struct RedactingFilter {
    pattern: PatternRedactor,
}

impl RedactingFilter {
    /// Create a filter around the given pattern scrubber.
    #[must_use]
    pub fn new(pattern: PatternRedactor) -> Self {
        Self { pattern }
    }

    /// Scrub the record's payload if it is text; structured payloads are
    /// left for the formatter's structural stage.
    ///
    /// Always returns `true`: every record is admitted, edited or not.
    pub fn apply(&self, record: &mut LogRecord) -> bool {
        if let Payload::Text(text) = &mut record.payload {
            *text = self.pattern.redact(text);
        }
        true
    }
}

impl Default for RedactingFilter {
    fn default() -> Self {
        Self::new(PatternRedactor::default())
    }
}
