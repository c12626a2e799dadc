//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Fetch command arguments.
#[derive(Debug, Args)]
pub struct FetchCommand {
    /// API key sent in the request's Key header
    #[arg(short = 'k', long)]
    pub api_key: String,

    /// Override the blacklist endpoint URL
    #[arg(short, long)]
    pub url: Option<String>,

    /// Override the maximum number of addresses to request
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Override the output CSV path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Emit command arguments.
#[derive(Debug, Args)]
pub struct EmitCommand {
    /// The message to send through the pipeline
    pub message: String,

    /// Parse the message as JSON and emit it as a structured payload
    #[arg(short, long)]
    pub json: bool,

    /// Severity name for the record (unrecognized names fall back to info)
    #[arg(short, long, default_value = "info")]
    pub level: String,

    /// Function name recorded in the line's metadata
    #[arg(short, long, default_value = "emit")]
    pub function: String,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
