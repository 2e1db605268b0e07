use std::fmt;

use serde::{Deserialize, Serialize};

/// Structured error information extracted from PostgreSQL driver errors.
///
/// This is intended to be serialized to JSON and consumed by other
/// components (e.g. logging, the `complete` subcommand).
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub(crate) error_type: Option<String>,
    /// SQLSTATE code reported by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) details: Option<ErrorDetails>,
}

/// Additional server-side error fields.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) table: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) constraint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) hint: Option<String>,
}

impl ErrorInfo {
    /// Convert error info to pretty-printed JSON string.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Convert error info to compact JSON string (single line).
    pub fn to_json_compact(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl ErrorDetails {
    fn is_empty(&self) -> bool {
        self.table.is_none()
            && self.constraint.is_none()
            && self.detail.is_none()
            && self.hint.is_none()
    }
}

/// Format driver errors as pretty JSON wrapped in an `error` field.
///
/// Used by the parent module's `Display` implementation for
/// `PgshError::Database`.
pub fn format_database_error(f: &mut fmt::Formatter<'_>, error: &sqlx::Error) -> fmt::Result {
    let info = extract_error_info(error);
    let wrapper = serde_json::json!({ "error": info });
    let json_output = serde_json::to_string_pretty(&wrapper).map_err(|_| fmt::Error)?;
    write!(f, "\n{json_output}")
}

/// Extract structured information from a driver error.
///
/// Server errors carry their SQLSTATE and optional fields; every other
/// failure falls back to the driver's message.
pub fn extract_error_info(error: &sqlx::Error) -> ErrorInfo {
    let mut info = ErrorInfo::default();

    match error {
        sqlx::Error::Database(db_error) => {
            info.error_type = Some("pg.server_error".to_string());
            info.code = db_error.code().map(|code| code.into_owned());
            info.name = info.code.as_deref().and_then(get_error_name);
            info.message = Some(db_error.message().to_string());

            let mut details = ErrorDetails {
                table: db_error.table().map(str::to_string),
                constraint: db_error.constraint().map(str::to_string),
                ..ErrorDetails::default()
            };
            if let Some(pg_error) = db_error.try_downcast_ref::<sqlx::postgres::PgDatabaseError>() {
                details.detail = pg_error.detail().map(str::to_string);
                details.hint = pg_error.hint().map(str::to_string);
            }
            if !details.is_empty() {
                info.details = Some(details);
            }
        }
        sqlx::Error::PoolTimedOut => {
            info.error_type = Some("pg.pool_timeout".to_string());
            info.message = Some(error.to_string());
        }
        sqlx::Error::PoolClosed => {
            info.error_type = Some("pg.pool_closed".to_string());
            info.message = Some(error.to_string());
        }
        sqlx::Error::Io(io_error) => {
            info.error_type = Some("pg.io_error".to_string());
            info.message = Some(io_error.to_string());
        }
        sqlx::Error::Configuration(config_error) => {
            info.error_type = Some("pg.configuration_error".to_string());
            info.message = Some(config_error.to_string());
        }
        _ => {
            info.message = Some(error.to_string());
        }
    }

    info
}

/// Get a human-readable error name from a SQLSTATE code.
fn get_error_name(code: &str) -> Option<String> {
    let name = match code {
        "23505" => "UniqueViolation",
        "23503" => "ForeignKeyViolation",
        "42501" => "InsufficientPrivilege",
        "42601" => "SyntaxError",
        "42P01" => "UndefinedTable",
        "42703" => "UndefinedColumn",
        "28P01" => "InvalidPassword",
        "3D000" => "InvalidCatalogName",
        "57014" => "QueryCanceled",
        _ => return None,
    };

    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_name_lookup() {
        assert_eq!(get_error_name("42P01").as_deref(), Some("UndefinedTable"));
        assert_eq!(get_error_name("99999"), None);
    }

    #[test]
    fn test_extract_non_server_error() {
        let info = extract_error_info(&sqlx::Error::PoolTimedOut);
        assert_eq!(info.error_type.as_deref(), Some("pg.pool_timeout"));
        assert!(info.code.is_none());

        let json = info.to_json_compact().unwrap();
        assert!(json.contains("\"type\":\"pg.pool_timeout\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_extract_fallback_message() {
        let info = extract_error_info(&sqlx::Error::RowNotFound);
        assert!(info.error_type.is_none());
        assert!(info.message.is_some());
    }
}
