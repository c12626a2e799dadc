//! Command-line interface for logsieve.
//!
//! This module provides the CLI structure and command handlers for the
//! `logsv` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, EmitCommand, FetchCommand};

/// logsv - Redacting logging pipeline
///
/// Sends log records through a two-stage redaction chain before they reach
/// a rotating file sink, and drives the blacklist fetch through it.
#[derive(Debug, Parser)]
#[command(name = "logsv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the IP blacklist and store it as CSV
    Fetch(FetchCommand),

    /// Send one message through the redacting pipeline
    Emit(EmitCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.verbose, self.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "logsv");
    }

    #[test]
    fn test_cli_verify() {
        // Verify the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_quiet() {
        let cli = Cli::try_parse_from(["logsv", "-q", "config", "path"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_normal() {
        let cli = Cli::try_parse_from(["logsv", "config", "path"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_verbose() {
        let cli = Cli::try_parse_from(["logsv", "-v", "config", "path"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Verbose);
    }

    #[test]
    fn test_verbosity_trace() {
        let cli = Cli::try_parse_from(["logsv", "-vv", "config", "path"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Trace);
    }

    #[test]
    fn test_parse_fetch() {
        let cli = Cli::try_parse_from(["logsv", "fetch", "--api-key", "abc"]).unwrap();
        match cli.command {
            Command::Fetch(cmd) => {
                assert_eq!(cmd.api_key, "abc");
                assert!(cmd.url.is_none());
                assert!(cmd.limit.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_fetch_requires_api_key() {
        assert!(Cli::try_parse_from(["logsv", "fetch"]).is_err());
    }

    #[test]
    fn test_parse_fetch_with_overrides() {
        let cli = Cli::try_parse_from([
            "logsv", "fetch", "-k", "abc", "-u", "http://example.test", "-l", "50", "-o",
            "out.csv",
        ])
        .unwrap();
        match cli.command {
            Command::Fetch(cmd) => {
                assert_eq!(cmd.url.as_deref(), Some("http://example.test"));
                assert_eq!(cmd.limit, Some(50));
                assert_eq!(cmd.output, Some(PathBuf::from("out.csv")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_emit() {
        let cli = Cli::try_parse_from(["logsv", "emit", "token=abcd1234"]).unwrap();
        match cli.command {
            Command::Emit(cmd) => {
                assert_eq!(cmd.message, "token=abcd1234");
                assert!(!cmd.json);
                assert_eq!(cmd.level, "info");
                assert_eq!(cmd.function, "emit");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_emit_json() {
        let cli =
            Cli::try_parse_from(["logsv", "emit", "--json", r#"{"user_id": 1}"#, "-l", "debug"])
                .unwrap();
        match cli.command {
            Command::Emit(cmd) => {
                assert!(cmd.json);
                assert_eq!(cmd.level, "debug");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_config_show() {
        let cli = Cli::try_parse_from(["logsv", "config", "show", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Show { json: true })
        ));
    }

    #[test]
    fn test_parse_with_config_path() {
        let cli = Cli::try_parse_from(["logsv", "-c", "/custom/config.toml", "config", "path"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }
}
