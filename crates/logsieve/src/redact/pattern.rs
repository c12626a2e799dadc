//! Pattern-based scrubbing of `key=value` fragments in free-form text.
//!
//! Each sensitive key compiles to a case-insensitive regex matching the key
//! followed by `=` and a value of at least four characters. On a match, the
//! value segment is replaced with the marker while the key and surrounding
//! text survive.

use regex::Regex;
use tracing::warn;

use super::keys::SensitiveKeySet;
use super::structural::DEFAULT_MARKER;

/// Scrubber for sensitive `key=value` fragments embedded in text.
///
/// Patterns apply independently per key, in the key set's iteration order,
/// one pass each over the whole string. Text without matches comes back
/// unchanged, and scrubbing already-scrubbed text is a no-op.
#[derive(Debug, Clone)]
pub struct PatternRedactor {
    patterns: Vec<Regex>,
    marker: String,
}

impl PatternRedactor {
    /// Create a scrubber over the given key set with the default marker.
    #[must_use]
    pub fn new(keys: &SensitiveKeySet) -> Self {
        Self::with_marker(keys, DEFAULT_MARKER)
    }

    /// Create a scrubber with a custom marker string.
    ///
    /// A key whose pattern fails to compile is skipped with a warning rather
    /// than aborting construction; the remaining keys still scrub.
    #[must_use]
    pub fn with_marker(keys: &SensitiveKeySet, marker: impl Into<String>) -> Self {
        let patterns = keys
            .iter()
            .filter_map(|key| {
                let source = format!(r#"(?i){}\s*=\s*['"]?[\w\-.@:]{{4,}}['"]?"#, regex::escape(key));
                match Regex::new(&source) {
                    Ok(regex) => Some(regex),
                    Err(e) => {
                        warn!(key = %key, error = %e, "Skipping unusable redaction key");
                        None
                    }
                }
            })
            .collect();

        Self {
            patterns,
            marker: marker.into(),
        }
    }

    /// Number of usable key patterns.
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Produce a scrubbed copy of `text`.
    ///
    /// Within each match, everything from the first `:` or `=` through the
    /// end of the match becomes `": "` followed by the marker; whitespace
    /// between the key and the separator is dropped, so `key = value` and
    /// `key='value'` both normalize to `key: MARKER`.
    #[must_use]
    pub fn redact(&self, text: &str) -> String {
        let mut scrubbed = text.to_string();
        for pattern in &self.patterns {
            scrubbed = pattern
                .replace_all(&scrubbed, |caps: &regex::Captures<'_>| {
                    let matched = &caps[0];
                    match matched.find([':', '=']) {
                        Some(at) => {
                            format!("{}: {}", matched[..at].trim_end(), self.marker)
                        }
                        // The pattern guarantees a separator; keep the match
                        // untouched if one is somehow absent.
                        None => matched.to_string(),
                    }
                })
                .into_owned();
        }
        scrubbed
    }
}

impl Default for PatternRedactor {
    fn default() -> Self {
        Self::new(&SensitiveKeySet::default())
    }
}
