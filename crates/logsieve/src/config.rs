//! Configuration management for logsieve.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pipeline::PipelineConfig;
use crate::redact::{SensitiveKeySet, DEFAULT_MARKER, DEFAULT_SENSITIVE_KEYS};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "logsieve";

/// Default sink file name.
const LOG_FILE_NAME: &str = "logsieve.log";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `LOGSIEVE_`)
/// 2. TOML config file at `~/.config/logsieve/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging pipeline configuration.
    pub logging: LoggingConfig,
    /// Redaction configuration.
    pub redaction: RedactionConfig,
    /// Blacklist fetch configuration.
    pub blacklist: BlacklistConfig,
}

/// Pipeline- and sink-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Path to the sink file.
    /// Defaults to `~/.local/share/logsieve/logsieve.log`
    pub file_path: Option<PathBuf>,
    /// Size bound, in bytes, that triggers sink rotation.
    pub max_bytes: u64,
    /// Number of rotated generations to retain.
    pub backup_count: usize,
    /// Minimum severity name; unrecognized names fall back to info.
    pub level: String,
    /// Name of the default logger.
    pub logger_name: String,
}

/// Redaction-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedactionConfig {
    /// Key names whose values are masked.
    pub sensitive_keys: Vec<String>,
    /// Replacement text for masked values.
    pub marker: String,
    /// Echo pre-redaction payloads to the tracing debug channel.
    pub debug_trace: bool,
    /// Render structured payloads as compact JSON.
    pub emit_json: bool,
}

/// Blacklist-fetch configuration. The API key is deliberately not part of
/// the configuration surface; it is passed explicitly on the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlacklistConfig {
    /// Endpoint to fetch the blacklist from.
    pub url: String,
    /// Maximum number of addresses to request.
    pub limit: u32,
    /// Path of the CSV file the addresses are written to.
    pub output_path: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file_path: None, // Will be resolved to default at runtime
            max_bytes: 10_000,
            backup_count: 10,
            level: "info".to_string(),
            logger_name: "logsieve".to_string(),
        }
    }
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            sensitive_keys: DEFAULT_SENSITIVE_KEYS
                .iter()
                .map(ToString::to_string)
                .collect(),
            marker: DEFAULT_MARKER.to_string(),
            debug_trace: false,
            emit_json: false,
        }
    }
}

impl Default for BlacklistConfig {
    fn default() -> Self {
        Self {
            url: crate::fetch::DEFAULT_BLACKLIST_URL.to_string(),
            limit: 10_000,
            output_path: PathBuf::from("known_bad_ips.csv"),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `LOGSIEVE_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("LOGSIEVE_").split("_"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.logging.max_bytes == 0 {
            return Err(Error::ConfigValidation {
                message: "max_bytes must be greater than 0".to_string(),
            });
        }

        if self.logging.logger_name.is_empty() {
            return Err(Error::ConfigValidation {
                message: "logger_name must not be empty".to_string(),
            });
        }

        if self.redaction.marker.is_empty() {
            return Err(Error::ConfigValidation {
                message: "redaction marker must not be empty".to_string(),
            });
        }

        if self.blacklist.url.is_empty() {
            return Err(Error::ConfigValidation {
                message: "blacklist url must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Get the sink file path, resolving defaults if not set.
    #[must_use]
    pub fn log_file_path(&self) -> PathBuf {
        self.logging
            .file_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(LOG_FILE_NAME))
    }

    /// Build the pipeline configuration for attaching a logger.
    #[must_use]
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            file_path: self.log_file_path(),
            max_bytes: self.logging.max_bytes,
            backup_count: self.logging.backup_count,
            sensitive_keys: SensitiveKeySet::new(&self.redaction.sensitive_keys),
            marker: self.redaction.marker.clone(),
            debug_trace: self.redaction.debug_trace,
            emit_json: self.redaction.emit_json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.logging.max_bytes, 10_000);
        assert_eq!(config.logging.backup_count, 10);
        assert_eq!(config.logging.level, "info");
        assert!(!config.redaction.debug_trace);
        assert!(!config.redaction.emit_json);
    }

    #[test]
    fn test_default_redaction_config() {
        let redaction = RedactionConfig::default();

        assert_eq!(redaction.marker, "REDACTED");
        assert_eq!(redaction.sensitive_keys.len(), 5);
        assert!(redaction.sensitive_keys.contains(&"api_key".to_string()));
        assert!(redaction.sensitive_keys.contains(&"password".to_string()));
    }

    #[test]
    fn test_default_blacklist_config() {
        let blacklist = BlacklistConfig::default();

        assert_eq!(blacklist.limit, 10_000);
        assert!(blacklist.url.contains("blacklist"));
        assert_eq!(blacklist.output_path, PathBuf::from("known_bad_ips.csv"));
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_max_bytes() {
        let mut config = Config::default();
        config.logging.max_bytes = 0;

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("max_bytes"));
    }

    #[test]
    fn test_validate_empty_logger_name() {
        let mut config = Config::default();
        config.logging.logger_name = String::new();

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("logger_name"));
    }

    #[test]
    fn test_validate_empty_marker() {
        let mut config = Config::default();
        config.redaction.marker = String::new();

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("marker"));
    }

    #[test]
    fn test_validate_empty_url() {
        let mut config = Config::default();
        config.blacklist.url = String::new();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_file_path_default() {
        let config = Config::default();
        let path = config.log_file_path();

        assert!(path.to_string_lossy().contains("logsieve.log"));
    }

    #[test]
    fn test_log_file_path_custom() {
        let mut config = Config::default();
        config.logging.file_path = Some(PathBuf::from("/custom/path/app.log"));

        assert_eq!(config.log_file_path(), PathBuf::from("/custom/path/app.log"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("logsieve"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_pipeline_config_carries_redaction_settings() {
        let mut config = Config::default();
        config.redaction.marker = "***".to_string();
        config.redaction.emit_json = true;
        config.redaction.sensitive_keys = vec!["SESSION".to_string()];

        let pipeline = config.pipeline_config();
        assert_eq!(pipeline.marker, "***");
        assert!(pipeline.emit_json);
        assert!(pipeline.sensitive_keys.contains("session"));
        assert!(!pipeline.sensitive_keys.contains("token"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults)
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());

        let config = result.unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[logging]
max_bytes = 2048
level = "debug"

[redaction]
marker = "[HIDDEN]"
"#,
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.logging.max_bytes, 2048);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.redaction.marker, "[HIDDEN]");
        // Untouched sections keep their defaults.
        assert_eq!(config.blacklist.limit, 10_000);
    }

    #[test]
    fn test_config_serialize() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("sensitive_keys"));
        assert!(json.contains("max_bytes"));
    }

    #[test]
    fn test_logging_config_deserialize() {
        let json = r#"{"max_bytes": 5000, "backup_count": 3}"#;
        let logging: LoggingConfig = serde_json::from_str(json).unwrap();
        assert_eq!(logging.max_bytes, 5000);
        assert_eq!(logging.backup_count, 3);
        assert_eq!(logging.level, "info");
    }

    #[test]
    fn test_config_clone_and_eq() {
        let config = Config::default();
        let cloned = config.clone();
        assert_eq!(config, cloned);
    }
}
