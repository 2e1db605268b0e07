use std::{fmt, io};

use crate::error::database::format_database_error;

/// Crate-wide `Result` type using [`PgshError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, PgshError>;

/// Top-level error type for pgsh operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum PgshError {
    /// Connection-related errors.
    Connection(ConnectionError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// PostgreSQL driver errors.
    Database(sqlx::Error),

    /// Line editor errors.
    Readline(String),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Connection-specific errors.
#[derive(Debug)]
pub enum ConnectionError {
    /// Failed to establish a connection.
    ConnectionFailed(String),

    /// Connection timeout.
    Timeout,

    /// Invalid connection URI.
    InvalidUri(String),

    /// Not currently connected to PostgreSQL.
    NotConnected,

    /// No async runtime is available to drive a blocking call.
    NoRuntime,

    /// Ping query failed.
    PingFailed(String),

    /// Catalog query failed.
    QueryFailed(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for PgshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PgshError::Connection(e) => write!(f, "Connection error: {e}"),
            PgshError::Config(e) => write!(f, "Configuration error: {e}"),
            PgshError::Io(e) => write!(f, "I/O error: {e}"),
            PgshError::Database(e) => format_database_error(f, e),
            PgshError::Readline(msg) => write!(f, "Readline error: {msg}"),
            PgshError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::ConnectionFailed(msg) => write!(f, "Failed to connect: {msg}"),
            ConnectionError::Timeout => write!(f, "Connection timeout"),
            ConnectionError::InvalidUri(uri) => write!(f, "Invalid connection URI: {uri}"),
            ConnectionError::NotConnected => write!(f, "Not connected to PostgreSQL"),
            ConnectionError::NoRuntime => write!(f, "No async runtime available"),
            ConnectionError::PingFailed(msg) => write!(f, "Ping failed: {msg}"),
            ConnectionError::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl std::error::Error for PgshError {}
impl std::error::Error for ConnectionError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to PgshError ========================= */

impl From<io::Error> for PgshError {
    fn from(err: io::Error) -> Self {
        PgshError::Io(err)
    }
}

impl From<sqlx::Error> for PgshError {
    fn from(err: sqlx::Error) -> Self {
        PgshError::Database(err)
    }
}

impl From<ConnectionError> for PgshError {
    fn from(err: ConnectionError) -> Self {
        PgshError::Connection(err)
    }
}

impl From<ConfigError> for PgshError {
    fn from(err: ConfigError) -> Self {
        PgshError::Config(err)
    }
}

impl From<toml::de::Error> for PgshError {
    fn from(err: toml::de::Error) -> Self {
        PgshError::Config(ConfigError::InvalidFormat(err.to_string()))
    }
}

impl From<toml::ser::Error> for PgshError {
    fn from(err: toml::ser::Error) -> Self {
        PgshError::Config(ConfigError::InvalidFormat(err.to_string()))
    }
}

impl From<String> for PgshError {
    fn from(msg: String) -> Self {
        PgshError::Generic(msg)
    }
}

impl From<&str> for PgshError {
    fn from(msg: &str) -> Self {
        PgshError::Generic(msg.to_owned())
    }
}

impl From<reedline::ReedlineError> for PgshError {
    fn from(err: reedline::ReedlineError) -> Self {
        PgshError::Readline(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err: PgshError = ConnectionError::NotConnected.into();
        assert_eq!(err.to_string(), "Connection error: Not connected to PostgreSQL");

        let err: PgshError = ConfigError::InvalidValue {
            field: "completion.max_records".to_string(),
            value: "0".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid value '0' for field 'completion.max_records'"
        );

        let err: PgshError = "plain".into();
        assert_eq!(err.to_string(), "plain");
    }

    #[test]
    fn test_toml_error_becomes_config_error() {
        let parse = toml::from_str::<toml::Table>("not = [valid").unwrap_err();
        let err: PgshError = parse.into();
        assert!(matches!(err, PgshError::Config(ConfigError::InvalidFormat(_))));
    }
}
