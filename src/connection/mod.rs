//! Connection management for PostgreSQL
//!
//! This module provides connection management functionality including:
//! - Connection establishment and termination over a small sqlx pool
//! - Health checks
//! - The synchronous catalog access used by tab completion

use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::{debug, info};

use crate::config::ConnectionConfig;
use crate::error::database::extract_error_info;
use crate::error::{ConnectionError, Result};

/// Read-only access to the catalog for completion queries.
///
/// Implementations run one `SELECT` and return its first column.
pub trait CatalogSource: Send + Sync {
    /// Run a query and collect the first column of every row.
    ///
    /// Rows whose first column is NULL or not text are skipped.
    ///
    /// # Arguments
    /// * `sql` - Complete query text
    ///
    /// # Returns
    /// * `Result<Vec<String>>` - Column values in result order
    fn fetch_column(&self, sql: &str) -> Result<Vec<String>>;

    /// Whether queries can currently be answered
    fn is_connected(&self) -> bool;
}

/// PostgreSQL connection manager
///
/// Owns the pool used both for health checks and for completion queries.
pub struct ConnectionManager {
    /// Pool, present while connected
    pool: RwLock<Option<PgPool>>,

    /// Connection configuration
    config: ConnectionConfig,

    /// Current connection state
    state: RwLock<ConnectionState>,

    /// Connection URI
    uri: String,
}

/// Connection state information
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected
    Disconnected,

    /// Connected and ready
    Connected,

    /// Connection failed
    Failed(String),
}

impl ConnectionManager {
    /// Create a new connection manager
    ///
    /// # Arguments
    /// * `uri` - PostgreSQL connection URI
    /// * `config` - Connection configuration
    ///
    /// # Returns
    /// * `Self` - New connection manager instance
    pub fn new(uri: String, config: ConnectionConfig) -> Self {
        Self {
            pool: RwLock::new(None),
            config,
            state: RwLock::new(ConnectionState::Disconnected),
            uri,
        }
    }

    /// Establish connection to PostgreSQL
    ///
    /// # Returns
    /// * `Result<()>` - Success or connection error
    pub async fn connect(&self) -> Result<()> {
        Self::check_uri(&self.uri)?;

        let result = PgPoolOptions::new()
            .max_connections(self.config.max_pool_size)
            .acquire_timeout(Duration::from_secs(self.config.timeout))
            .connect(&self.uri)
            .await;

        match result {
            Ok(pool) => {
                *self.pool.write().unwrap_or_else(PoisonError::into_inner) = Some(pool);
                self.set_state(ConnectionState::Connected);
                info!("connected to {}", self.uri);
                Ok(())
            }
            Err(err) => {
                if let Ok(details) = extract_error_info(&err).to_json_compact() {
                    debug!("connection error details: {}", details);
                }
                let error = match err {
                    sqlx::Error::PoolTimedOut => ConnectionError::Timeout,
                    other => ConnectionError::ConnectionFailed(other.to_string()),
                };
                self.set_state(ConnectionState::Failed(error.to_string()));
                Err(error.into())
            }
        }
    }

    /// Disconnect from PostgreSQL
    ///
    /// Closes all pooled connections
    ///
    /// # Returns
    /// * `Result<()>` - Success or error
    pub async fn disconnect(&self) -> Result<()> {
        let pool = self.pool.write().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(pool) = pool {
            pool.close().await;
            debug!("connection pool closed");
        }
        self.set_state(ConnectionState::Disconnected);
        Ok(())
    }

    /// Verify the connection is alive
    ///
    /// # Returns
    /// * `Result<String>` - Server version string
    pub async fn ping(&self) -> Result<String> {
        let pool = self.pool()?;
        sqlx::query_scalar::<_, String>("SELECT pg_catalog.version()")
            .fetch_one(&pool)
            .await
            .map_err(|e| ConnectionError::PingFailed(e.to_string()).into())
    }

    /// Ask the server whether it uses standard-conforming string literals
    ///
    /// # Returns
    /// * `Result<bool>` - True when backslashes in literals are ordinary characters
    pub async fn standard_conforming_strings(&self) -> Result<bool> {
        let pool = self.pool()?;
        let value = sqlx::query_scalar::<_, String>("SHOW standard_conforming_strings")
            .fetch_one(&pool)
            .await?;
        Ok(value.eq_ignore_ascii_case("on"))
    }

    /// Get current connection state
    pub fn get_state(&self) -> ConnectionState {
        self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Connection URI this manager connects to
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Check that a URI names a PostgreSQL server
    ///
    /// # Arguments
    /// * `uri` - Connection URI
    ///
    /// # Returns
    /// * `Result<()>` - Ok for `postgres://` and `postgresql://` URIs
    pub fn check_uri(uri: &str) -> Result<()> {
        if uri.starts_with("postgres://") || uri.starts_with("postgresql://") {
            Ok(())
        } else {
            Err(ConnectionError::InvalidUri(uri.to_string()).into())
        }
    }

    fn pool(&self) -> Result<PgPool> {
        self.pool
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| ConnectionError::NotConnected.into())
    }

    fn set_state(&self, new_state: ConnectionState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = new_state;
    }
}

impl CatalogSource for ConnectionManager {
    fn fetch_column(&self, sql: &str) -> Result<Vec<String>> {
        let pool = self.pool()?;

        // block_in_place needs the multi-threaded scheduler
        let handle = match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => handle,
            _ => return Err(ConnectionError::NoRuntime.into()),
        };

        let rows = tokio::task::block_in_place(|| {
            handle.block_on(sqlx::query(sql).persistent(false).fetch_all(&pool))
        })
        .map_err(|e| ConnectionError::QueryFailed(e.to_string()))?;

        Ok(rows
            .iter()
            .filter_map(|row| row.try_get::<Option<String>, _>(0).ok().flatten())
            .collect())
    }

    fn is_connected(&self) -> bool {
        matches!(self.get_state(), ConnectionState::Connected)
    }
}

/// In-memory catalog that records the queries it is asked to run
#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Canned rows, an optional failure and the text of every query received
    #[derive(Default)]
    pub struct RecordingCatalog {
        rows: Vec<String>,
        fail: bool,
        connected: bool,
        queries: Mutex<Vec<String>>,
    }

    impl RecordingCatalog {
        /// Connected catalog answering every query with `rows`
        pub fn with_rows(rows: &[&str]) -> Self {
            Self {
                rows: rows.iter().map(|row| row.to_string()).collect(),
                connected: true,
                ..Default::default()
            }
        }

        /// Connected catalog whose queries all fail
        pub fn failing() -> Self {
            Self {
                fail: true,
                connected: true,
                ..Default::default()
            }
        }

        /// Catalog with no connection
        pub fn disconnected() -> Self {
            Self::default()
        }

        /// Queries received so far
        pub fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    impl CatalogSource for RecordingCatalog {
        fn fetch_column(&self, sql: &str) -> Result<Vec<String>> {
            self.queries.lock().unwrap().push(sql.to_string());
            if !self.connected {
                return Err(ConnectionError::NotConnected.into());
            }
            if self.fail {
                return Err(
                    ConnectionError::QueryFailed("relation does not exist".to_string()).into(),
                );
            }
            Ok(self.rows.clone())
        }

        fn is_connected(&self) -> bool {
            self.connected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PgshError;

    fn manager() -> ConnectionManager {
        ConnectionManager::new(
            "postgres://localhost:5432/postgres".to_string(),
            ConnectionConfig::default(),
        )
    }

    #[test]
    fn test_new_manager_is_disconnected() {
        let manager = manager();
        assert_eq!(manager.get_state(), ConnectionState::Disconnected);
        assert!(!manager.is_connected());
        assert_eq!(manager.uri(), "postgres://localhost:5432/postgres");
    }

    #[test]
    fn test_fetch_without_connection_fails() {
        let err = manager().fetch_column("SELECT 1").unwrap_err();
        assert!(matches!(
            err,
            PgshError::Connection(ConnectionError::NotConnected)
        ));
    }

    #[test]
    fn test_check_uri() {
        assert!(ConnectionManager::check_uri("postgresql://u@h/db").is_ok());
        assert!(ConnectionManager::check_uri("postgres://h").is_ok());
        assert!(matches!(
            ConnectionManager::check_uri("mysql://h"),
            Err(PgshError::Connection(ConnectionError::InvalidUri(_)))
        ));
    }

    #[tokio::test]
    async fn test_connect_rejects_foreign_scheme() {
        let manager =
            ConnectionManager::new("mysql://localhost".to_string(), ConnectionConfig::default());
        assert!(manager.connect().await.is_err());
        assert_eq!(manager.get_state(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_ping_and_disconnect_without_connection() {
        let manager = manager();
        assert!(tokio_test::block_on(manager.ping()).is_err());
        assert!(tokio_test::block_on(manager.standard_conforming_strings()).is_err());
        assert!(tokio_test::block_on(manager.disconnect()).is_ok());
        assert_eq!(manager.get_state(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_recording_catalog() {
        let catalog = testing::RecordingCatalog::with_rows(&["a", "b"]);
        assert_eq!(catalog.fetch_column("SELECT x").unwrap(), vec!["a", "b"]);
        assert_eq!(catalog.queries(), vec!["SELECT x"]);

        assert!(testing::RecordingCatalog::failing().fetch_column("SELECT").is_err());
        assert!(!testing::RecordingCatalog::disconnected().is_connected());
    }
}
