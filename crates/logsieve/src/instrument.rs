//! Instrumented function calls.
//!
//! Thin plumbing around the pipeline: wrap a function, make sure its logger
//! is configured, run it, and log a structured call record plus a completion
//! message. The pipeline redacts whatever those records carry, so callers
//! may pass their real arguments, API keys included.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::Result;
use crate::pipeline::{Logger, LoggerRegistry, PipelineConfig};
use crate::record::Payload;

/// How the wrapped call picks its logger name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggerNaming {
    /// Use the wrapped function's own name.
    FunctionName,
    /// Use an explicit logger name.
    Named(String),
}

impl LoggerNaming {
    /// Resolve the effective logger name for a function.
    #[must_use]
    pub fn resolve<'a>(&'a self, function: &'a str) -> &'a str {
        match self {
            Self::FunctionName => function,
            Self::Named(name) => name,
        }
    }
}

/// Run `f` with its entry and exit logged through the redacting pipeline.
///
/// The logger is resolved per `naming` and configured idempotently before
/// the call. After `f` returns, two records are emitted: a structured
/// `{event: "function_call", function, args}` record and a text completion
/// message. Returns the wrapped function's value alongside the logger so
/// callers can keep logging through it.
///
/// # Errors
///
/// Returns an error if logger configuration or a sink write fails; `f`
/// itself is infallible here, matching the synchronous inline call model.
pub fn logged_call<F, T>(
    registry: &LoggerRegistry,
    config: &PipelineConfig,
    level_name: &str,
    naming: &LoggerNaming,
    function: &str,
    args: Value,
    f: F,
) -> Result<(T, Arc<Logger>)>
where
    F: FnOnce(&Logger) -> T,
{
    let logger = registry.ensure_configured(naming.resolve(function), level_name, config)?;

    let value = f(&logger);

    logger.info(
        function,
        Payload::Structured(json!({
            "event": "function_call",
            "function": function,
            "args": args,
        })),
    )?;
    logger.info(function, format!("Function {function} finished"))?;

    Ok((value, logger))
}
