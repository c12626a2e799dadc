//! Diagnostic logging for logsieve itself.
//!
//! The redacting pipeline writes to its own rotating file sink; this module
//! configures the tracing diagnostics that sit beside it on stderr. Skipped
//! redaction keys, formatter fallbacks, and the debug-trace echo of
//! pre-redaction payloads all land here, never in the sink.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verbosity of the stderr diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Info and above.
    #[default]
    Normal,
    /// Debug and above. The debug-trace payload echo becomes visible here.
    Verbose,
    /// Everything.
    Trace,
}

impl Verbosity {
    /// Map CLI-style flags to a verbosity: `quiet` wins, then each repeat
    /// of the verbose flag steps the level up.
    #[must_use]
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else {
            match verbose {
                0 => Self::Normal,
                1 => Self::Verbose,
                _ => Self::Trace,
            }
        }
    }

    fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

/// Install the stderr diagnostics subscriber.
///
/// Call once at startup. `RUST_LOG` overrides the verbosity when set.
/// Calling again is harmless; the first subscriber stays installed.
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("logsieve={}", verbosity.level())));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(false)
                .with_line_number(false),
        )
        .try_init();
}
