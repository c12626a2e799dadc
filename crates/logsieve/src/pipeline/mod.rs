//! The redacting logging pipeline.
//!
//! A [`Logger`] runs each record through filter (pattern scrubbing of text),
//! formatter (structural redaction plus layout), and sink (rotating file),
//! inline on the caller's thread. Loggers live in an explicit
//! [`LoggerRegistry`] addressed by name; [`LoggerRegistry::ensure_configured`]
//! is idempotent, so repeated configuration never duplicates output.
//!
//! # Example
//!
//! ```no_run
//! use logsieve::pipeline::{LoggerRegistry, PipelineConfig};
//! use serde_json::json;
//!
//! let registry = LoggerRegistry::new();
//! let config = PipelineConfig::default();
//!
//! let logger = registry.ensure_configured("svc", "DEBUG", &config)?;
//! logger.info("handle_request", json!({"user_id": 42, "note": "ok"}))?;
//! logger.info("handle_request", "retry with token=abc123")?;
//! # Ok::<(), logsieve::Error>(())
//! ```

mod filter;
mod formatter;
mod sink;

pub use filter::RedactingFilter;
pub use formatter::{RedactingFormatter, TIMESTAMP_FORMAT};
pub use sink::RotatingFileSink;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::error::Result;
use crate::record::{Level, LogRecord, Payload};
use crate::redact::{PatternRedactor, SensitiveKeySet, StructuralRedactor, DEFAULT_MARKER};

/// Configuration for attaching a pipeline to a logger.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Path of the live sink file.
    pub file_path: PathBuf,

    /// Size bound that triggers sink rotation.
    pub max_bytes: u64,

    /// Number of rotated generations to retain.
    pub backup_count: usize,

    /// Keys masked by both redaction stages.
    pub sensitive_keys: SensitiveKeySet,

    /// Replacement text for masked values.
    pub marker: String,

    /// Echo pre-redaction payloads to the tracing debug channel.
    pub debug_trace: bool,

    /// Render structured payloads as compact JSON.
    pub emit_json: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from("logsieve.log"),
            max_bytes: 10_000,
            backup_count: 10,
            sensitive_keys: SensitiveKeySet::default(),
            marker: DEFAULT_MARKER.to_string(),
            debug_trace: false,
            emit_json: false,
        }
    }
}

/// The attached processing chain: filter, formatter, sink.
#[derive(Debug)]
struct Handler {
    filter: RedactingFilter,
    formatter: RedactingFormatter,
    sink: RotatingFileSink,
}

impl Handler {
    fn from_config(config: &PipelineConfig) -> Result<Self> {
        let sink = RotatingFileSink::new(&config.file_path, config.max_bytes, config.backup_count)?;
        let formatter = RedactingFormatter::new(StructuralRedactor::with_marker(
            config.sensitive_keys.clone(),
            &config.marker,
        ))
        .with_debug_trace(config.debug_trace)
        .with_json_encoding(config.emit_json);
        let filter = RedactingFilter::new(PatternRedactor::with_marker(
            &config.sensitive_keys,
            &config.marker,
        ));
        Ok(Self {
            filter,
            formatter,
            sink,
        })
    }
}

/// A named logger with an optional attached pipeline.
///
/// Records below the logger's minimum severity are dropped by the gate;
/// everything else flows filter -> formatter -> sink. A logger with no
/// handler attached accepts records and discards them.
#[derive(Debug)]
pub struct Logger {
    name: String,
    level: RwLock<Level>,
    handler: RwLock<Option<Arc<Handler>>>,
}

impl Logger {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: RwLock::new(Level::Info),
            handler: RwLock::new(None),
        }
    }

    /// The logger's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current minimum severity.
    #[must_use]
    pub fn level(&self) -> Level {
        *self.level.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Set the minimum severity.
    pub fn set_level(&self, level: Level) {
        *self.level.write().unwrap_or_else(PoisonError::into_inner) = level;
    }

    /// Whether a pipeline is attached.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.handler
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Attach the handler built by `build` if none is attached yet.
    /// The check and the attachment happen under one write lock, so
    /// concurrent configuration still yields exactly one handler.
    fn ensure_handler(&self, build: impl FnOnce() -> Result<Handler>) -> Result<()> {
        let mut guard = self.handler.write().unwrap_or_else(PoisonError::into_inner);
        if guard.is_none() {
            *guard = Some(Arc::new(build()?));
        }
        Ok(())
    }

    fn current_handler(&self) -> Option<Arc<Handler>> {
        self.handler
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run one record through the pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink write fails; redaction itself never
    /// fails a record.
    pub fn log(&self, level: Level, function: &str, payload: impl Into<Payload>) -> Result<()> {
        if level < self.level() {
            return Ok(());
        }
        let Some(handler) = self.current_handler() else {
            return Ok(());
        };

        let mut record = LogRecord::new(self.name.clone(), function, level, payload.into());
        if handler.filter.apply(&mut record) {
            let line = handler.formatter.format(&record);
            handler.sink.write_line(&line)?;
        }
        Ok(())
    }

    /// Log at [`Level::Debug`].
    ///
    /// # Errors
    ///
    /// Returns an error if the sink write fails.
    pub fn debug(&self, function: &str, payload: impl Into<Payload>) -> Result<()> {
        self.log(Level::Debug, function, payload)
    }

    /// Log at [`Level::Info`].
    ///
    /// # Errors
    ///
    /// Returns an error if the sink write fails.
    pub fn info(&self, function: &str, payload: impl Into<Payload>) -> Result<()> {
        self.log(Level::Info, function, payload)
    }

    /// Log at [`Level::Warn`].
    ///
    /// # Errors
    ///
    /// Returns an error if the sink write fails.
    pub fn warn(&self, function: &str, payload: impl Into<Payload>) -> Result<()> {
        self.log(Level::Warn, function, payload)
    }

    /// Log at [`Level::Error`].
    ///
    /// # Errors
    ///
    /// Returns an error if the sink write fails.
    pub fn error(&self, function: &str, payload: impl Into<Payload>) -> Result<()> {
        self.log(Level::Error, function, payload)
    }
}

/// Explicit process-local registry of named loggers.
///
/// Loggers are addressed by name; the registry is the only shared state in
/// the pipeline and is safe to use from multiple threads.
#[derive(Debug, Default)]
pub struct LoggerRegistry {
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
}

impl LoggerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a logger by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Logger>> {
        self.loggers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Check whether a named logger exists and has a pipeline attached.
    #[must_use]
    pub fn is_configured(&self, name: &str) -> bool {
        self.get(name).is_some_and(|logger| logger.is_configured())
    }

    /// Resolve or create the named logger, set its severity, and attach the
    /// pipeline exactly once.
    ///
    /// An unrecognized `level_name` falls back to Info. Each call emits one
    /// informational record announcing the effective level and target, but
    /// however many times this is called, the logger ends up with exactly
    /// one attached sink; one log call emits one line.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot be opened or the announcement
    /// record cannot be written.
    pub fn ensure_configured(
        &self,
        name: &str,
        level_name: &str,
        config: &PipelineConfig,
    ) -> Result<Arc<Logger>> {
        let logger = {
            let mut loggers = self.loggers.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(
                loggers
                    .entry(name.to_string())
                    .or_insert_with(|| Arc::new(Logger::new(name))),
            )
        };

        logger.set_level(Level::parse_or_default(level_name));
        logger.ensure_handler(|| Handler::from_config(config))?;
        logger.info(
            "ensure_configured",
            format!("Log level set to: {level_name} for: {name}"),
        )?;
        Ok(logger)
    }
}
