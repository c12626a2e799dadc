//! Structural redaction of nested payloads.
//!
//! The structural redactor walks a structured value and masks every entry
//! whose key is in the sensitive set, preserving the shape of everything
//! else. It is the counterpart of the pattern scrubber in
//! [`pattern`](super::pattern): this one owns structured payloads, that one
//! owns free-form text.

use serde_json::Value;

use super::keys::SensitiveKeySet;

/// The default replacement for masked values.
pub const DEFAULT_MARKER: &str = "REDACTED";

/// Shape-preserving redactor for structured values.
///
/// Mappings keep their key order, sequences keep their length, scalars pass
/// through untouched. A value attached to a sensitive key is replaced with
/// the marker in full, however deeply structured it was; redaction at a
/// sensitive key is total, not recursive into that branch.
#[derive(Debug, Clone)]
pub struct StructuralRedactor {
    keys: SensitiveKeySet,
    marker: String,
}

impl StructuralRedactor {
    /// Create a redactor over the given key set with the default marker.
    #[must_use]
    pub fn new(keys: SensitiveKeySet) -> Self {
        Self::with_marker(keys, DEFAULT_MARKER)
    }

    /// Create a redactor with a custom marker string.
    #[must_use]
    pub fn with_marker(keys: SensitiveKeySet, marker: impl Into<String>) -> Self {
        Self {
            keys,
            marker: marker.into(),
        }
    }

    /// The key set this redactor masks.
    #[must_use]
    pub fn keys(&self) -> &SensitiveKeySet {
        &self.keys
    }

    /// Produce a redacted copy of `value`.
    ///
    /// Pure: the input is never mutated, and the result for a value with no
    /// sensitive keys is structurally equal to the input. Terminates on any
    /// finite tree; log payloads are trees by construction.
    #[must_use]
    pub fn redact(&self, value: &Value) -> Value {
        match value {
            Value::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, entry)| {
                        if self.keys.contains(key) {
                            (key.clone(), Value::String(self.marker.clone()))
                        } else {
                            (key.clone(), self.redact(entry))
                        }
                    })
                    .collect(),
            ),
            Value::Array(items) => Value::Array(items.iter().map(|item| self.redact(item)).collect()),
            scalar => scalar.clone(),
        }
    }
}

impl Default for StructuralRedactor {
    fn default() -> Self {
        Self::new(SensitiveKeySet::default())
    }
}
