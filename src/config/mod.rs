//! Configuration management for pgsh
//!
//! This module handles loading, parsing, and saving the TOML configuration
//! file. Every field has a default so partial files load.
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Connection configuration
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Tab completion configuration
    #[serde(default)]
    pub completion: CompletionConfig,

    /// History configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connection-related configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectionConfig {
    /// Default PostgreSQL connection URI
    #[serde(default = "default_uri")]
    pub default_uri: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Maximum pool size
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,
}

/// Tab completion configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionConfig {
    /// Row cap appended to every catalog query
    #[serde(default = "default_max_records")]
    pub max_records: usize,

    /// Typed prefix that makes system schema objects visible
    #[serde(default = "default_system_schema_prefix")]
    pub system_schema_prefix: String,

    /// Schema hidden from relation completion unless the prefix is typed
    #[serde(default = "default_system_schema")]
    pub system_schema: String,

    /// Server treats backslashes in literals as ordinary characters
    #[serde(default = "default_standard_conforming_strings")]
    pub standard_conforming_strings: bool,
}

/// Command history configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryConfig {
    /// Maximum number of history entries
    #[serde(default = "default_max_history_size")]
    pub max_size: usize,

    /// Path to history file
    #[serde(default = "default_history_file")]
    pub file_path: PathBuf,

    /// Enable history persistence
    #[serde(default = "default_persist_history")]
    pub persist: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// Default value functions
fn default_uri() -> String {
    "postgres://localhost:5432/postgres".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_max_pool_size() -> u32 {
    2
}

fn default_max_records() -> usize {
    1000
}

fn default_system_schema_prefix() -> String {
    "pg_".to_string()
}

fn default_system_schema() -> String {
    "pg_catalog".to_string()
}

fn default_standard_conforming_strings() -> bool {
    true
}

fn default_max_history_size() -> usize {
    1000
}

fn default_history_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".pgsh_history")
}

fn default_persist_history() -> bool {
    true
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    true
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            default_uri: default_uri(),
            timeout: default_timeout(),
            max_pool_size: default_max_pool_size(),
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            max_records: default_max_records(),
            system_schema_prefix: default_system_schema_prefix(),
            system_schema: default_system_schema(),
            standard_conforming_strings: default_standard_conforming_strings(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_history_size(),
            file_path: default_history_file(),
            persist: default_persist_history(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: default_log_timestamps(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    ///
    /// A missing file yields the defaults.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file (TOML format)
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from an explicit path or the default location
    ///
    /// # Arguments
    /// * `path` - Optional override of the configuration file path
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::from_file(Self::default_path()),
        }
    }

    /// Get the default configuration file path
    ///
    /// # Returns
    /// * `PathBuf` - Path to default configuration file
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pgsh")
            .join("config.toml")
    }

    /// Save configuration to a file, creating its directory
    ///
    /// # Arguments
    /// * `path` - Path where to save the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Success or error
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Render the configuration as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Ok if valid, error otherwise
    pub fn validate(&self) -> Result<()> {
        if self.completion.max_records == 0 {
            return Err(invalid("completion.max_records", "0"));
        }
        if self.completion.system_schema.trim().is_empty() {
            return Err(invalid("completion.system_schema", &self.completion.system_schema));
        }
        if self.connection.max_pool_size == 0 {
            return Err(invalid("connection.max_pool_size", "0"));
        }
        self.connection.validate_uri()
    }

    /// Get connection timeout as Duration
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection.timeout)
    }
}

impl ConnectionConfig {
    /// Check that the default URI uses a PostgreSQL scheme
    ///
    /// # Returns
    /// * `Result<()>` - Ok if URI is valid, error otherwise
    pub fn validate_uri(&self) -> Result<()> {
        let uri = self.default_uri.as_str();
        if uri.starts_with("postgres://") || uri.starts_with("postgresql://") {
            Ok(())
        } else {
            Err(invalid("connection.default_uri", uri))
        }
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

fn invalid(field: &str, value: &str) -> crate::error::PgshError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.connection.default_uri, "postgres://localhost:5432/postgres");
        assert_eq!(config.completion.max_records, 1000);
        assert_eq!(config.completion.system_schema_prefix, "pg_");
        assert!(config.completion.standard_conforming_strings);
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_connection_timeout() {
        let config = Config::default();
        assert_eq!(config.connection_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[completion]\nmax_records = 50\n").unwrap();
        assert_eq!(config.completion.max_records, 50);
        assert_eq!(config.completion.system_schema, "pg_catalog");
        assert_eq!(config.connection.timeout, 10);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_file(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.completion.max_records = 20;
        config.logging.level = LogLevel::Debug;
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_file_reports_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[completion\nmax_records = ").unwrap();
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.completion.max_records = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.completion.system_schema = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.connection.max_pool_size = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.connection.default_uri = "mysql://localhost".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Trace.to_tracing_level(), tracing::Level::TRACE);
        let level: LoggingConfig = toml::from_str("level = \"error\"").unwrap();
        assert_eq!(level.level, LogLevel::Error);
    }
}
