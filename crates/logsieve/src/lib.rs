//! `logsieve` - A redacting logging pipeline
//!
//! This library keeps sensitive values (API keys, tokens, passwords, IP
//! addresses, user identifiers, and any caller-designated key) out of
//! persisted log output. Records pass through two pure redaction stages,
//! pattern scrubbing of free-form text and structural masking of nested
//! payloads, before landing in a size- and count-bounded rotating file
//! sink.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod instrument;
pub mod logging;
pub mod pipeline;
pub mod record;
pub mod redact;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use pipeline::{Logger, LoggerRegistry, PipelineConfig};
pub use record::{Level, LogRecord, Payload};
pub use redact::{PatternRedactor, SensitiveKeySet, StructuralRedactor};
