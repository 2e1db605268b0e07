//! pgsh library
//!
//! This library provides the core of pgsh, a PostgreSQL shell with psql-style
//! context-sensitive tab completion. The completion engine can be embedded in
//! other line editors.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `connection`: PostgreSQL connection management and catalog access
//! - `error`: Error types and handling
//! - `repl`: Interactive REPL and the completion engine
//!
//! # Example
//!
//! ```no_run
//! use pgsh::{config::Config, connection::ConnectionManager};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let manager = ConnectionManager::new(
//!         "postgres://localhost:5432/postgres".to_string(),
//!         config.connection,
//!     );
//!
//!     manager.connect().await?;
//!     println!("Connected to {}", manager.ping().await?);
//!
//!     manager.disconnect().await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod connection;
pub mod error;
pub mod repl;

// Re-export commonly used types
pub use config::Config;
pub use connection::{CatalogSource, ConnectionManager};
pub use error::{PgshError, Result};
pub use repl::completion::{CompletionEngine, CompletionPair, CompletionSession};
pub use repl::{ReplEngine, SharedState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
