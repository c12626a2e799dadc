//! Redaction of sensitive values in log payloads.
//!
//! This module provides the two pure redaction stages the pipeline is built
//! around:
//!
//! - **Structural redaction**: a shape-preserving walk of nested structured
//!   payloads that masks values by key membership.
//!
//! - **Pattern redaction**: regex-based masking of `key=value`-shaped
//!   fragments inside free-form text.
//!
//! Both consult a [`SensitiveKeySet`] and replace matched values with a
//! marker, `"REDACTED"` by default. Both are pure and reentrant; they read
//! only their inputs and the immutable key set.
//!
//! # Example
//!
//! ```
//! use logsieve::redact::{PatternRedactor, SensitiveKeySet, StructuralRedactor};
//! use serde_json::json;
//!
//! let keys = SensitiveKeySet::default();
//!
//! let structural = StructuralRedactor::new(keys.clone());
//! let masked = structural.redact(&json!({"user_id": 42, "note": "ok"}));
//! assert_eq!(masked, json!({"user_id": "REDACTED", "note": "ok"}));
//!
//! let pattern = PatternRedactor::new(&keys);
//! let scrubbed = pattern.redact("login with token=abc123 ok");
//! assert_eq!(scrubbed, "login with token: REDACTED ok");
//! ```

mod keys;
mod pattern;
mod structural;

pub use keys::{SensitiveKeySet, DEFAULT_SENSITIVE_KEYS};
pub use pattern::PatternRedactor;
pub use structural::{StructuralRedactor, DEFAULT_MARKER};
