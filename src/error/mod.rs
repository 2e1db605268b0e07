//! Error handling module for pgsh.
//!
//! This module provides:
//! - Application-specific error types with a crate-wide `Result` alias
//! - Structured error information extracted from PostgreSQL driver errors
//!
//! Errors inside the completion engine never reach the user: failed catalog
//! queries simply produce no candidates. The types here cover the shell
//! around it (configuration, connection, line editor).
//!
//! # Example
//!
//! ```rust,no_run
//! use pgsh::error::{Result, PgshError};
//! use pgsh::error::database::extract_error_info;
//!
//! fn example_operation() -> Result<()> {
//!     Ok(())
//! }
//!
//! fn handle_error(err: &sqlx::Error) {
//!     let info = extract_error_info(err);
//!     println!("{}", info.to_json().unwrap());
//! }
//! ```

pub mod database;
pub mod kinds;

// Re-export commonly used types
pub use database::{ErrorDetails, ErrorInfo};
pub use kinds::{ConfigError, ConnectionError, PgshError, Result};
