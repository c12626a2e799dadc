//! `logsv` - CLI for logsieve
//!
//! This binary drives the redacting logging pipeline: fetching the IP
//! blacklist through an instrumented call, emitting ad-hoc records, and
//! inspecting configuration.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context};
use clap::Parser;
use serde_json::json;

use logsieve::cli::{Cli, Command, ConfigCommand, EmitCommand, FetchCommand};
use logsieve::fetch::{fetch_and_store, BlacklistClient};
use logsieve::instrument::{logged_call, LoggerNaming};
use logsieve::pipeline::LoggerRegistry;
use logsieve::record::{Level, Payload};
use logsieve::{init_logging, Config};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize diagnostics based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // The registry is the process's logger namespace
    let registry = LoggerRegistry::new();

    match cli.command {
        Command::Fetch(fetch_cmd) => handle_fetch(&registry, &config, &fetch_cmd),
        Command::Emit(emit_cmd) => handle_emit(&registry, &config, &emit_cmd),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn handle_fetch(
    registry: &LoggerRegistry,
    config: &Config,
    cmd: &FetchCommand,
) -> anyhow::Result<()> {
    let url = cmd.url.clone().unwrap_or_else(|| config.blacklist.url.clone());
    let limit = cmd.limit.unwrap_or(config.blacklist.limit);
    let output = cmd
        .output
        .clone()
        .unwrap_or_else(|| config.blacklist.output_path.clone());

    let client = BlacklistClient::new(&url, &cmd.api_key, limit)?;
    let pipeline = config.pipeline_config();

    // The call record carries the real arguments, API key included; the
    // pipeline masks it before anything reaches the sink.
    let (count, _logger) = logged_call(
        registry,
        &pipeline,
        &config.logging.level,
        &LoggerNaming::FunctionName,
        "fetch_and_store",
        json!({"url": url, "limit": limit, "api_key": cmd.api_key}),
        |logger| fetch_and_store(&client, &output, logger),
    )?;
    let count = count?;

    if count == 0 {
        bail!("no blacklist entries fetched");
    }
    println!("Saved {} addresses to {}", count, output.display());
    Ok(())
}

fn handle_emit(
    registry: &LoggerRegistry,
    config: &Config,
    cmd: &EmitCommand,
) -> anyhow::Result<()> {
    let pipeline = config.pipeline_config();
    let logger = registry.ensure_configured(
        &config.logging.logger_name,
        &config.logging.level,
        &pipeline,
    )?;

    let payload = if cmd.json {
        let value = serde_json::from_str(&cmd.message)
            .context("message is not valid JSON (did you mean to drop --json?)")?;
        Payload::Structured(value)
    } else {
        Payload::Text(cmd.message.clone())
    };

    logger.log(Level::parse_or_default(&cmd.level), &cmd.function, payload)?;
    println!("Wrote one record to {}", pipeline.file_path.display());
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Logging]");
                println!("  Sink path:          {}", config.log_file_path().display());
                println!("  Max bytes:          {}", config.logging.max_bytes);
                println!("  Backup count:       {}", config.logging.backup_count);
                println!("  Level:              {}", config.logging.level);
                println!("  Logger name:        {}", config.logging.logger_name);
                println!();
                println!("[Redaction]");
                println!(
                    "  Sensitive keys:     {}",
                    config.redaction.sensitive_keys.join(", ")
                );
                println!("  Marker:             {}", config.redaction.marker);
                println!("  Debug trace:        {}", config.redaction.debug_trace);
                println!("  Emit JSON:          {}", config.redaction.emit_json);
                println!();
                println!("[Blacklist]");
                println!("  URL:                {}", config.blacklist.url);
                println!("  Limit:              {}", config.blacklist.limit);
                println!(
                    "  Output path:        {}",
                    config.blacklist.output_path.display()
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
