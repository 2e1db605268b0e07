use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Shared state between the REPL, the completer and the connection.
#[derive(Debug, Clone)]
pub struct SharedState {
    /// Current database name
    pub current_database: Arc<RwLock<String>>,

    /// Whether connected to server
    pub connected: Arc<RwLock<bool>>,

    /// Server version
    pub server_version: Arc<RwLock<Option<String>>>,

    /// Shell variables set with `\set`, kept sorted by name
    variables: Arc<RwLock<BTreeMap<String, String>>>,
}

impl SharedState {
    /// Create a new shared state.
    ///
    /// * `database` - Initial database name
    pub fn new(database: String) -> Self {
        Self {
            current_database: Arc::new(RwLock::new(database)),
            connected: Arc::new(RwLock::new(false)),
            server_version: Arc::new(RwLock::new(None)),
            variables: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Get current database name.
    pub fn get_database(&self) -> String {
        self.current_database
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Set current database name.
    pub fn set_database(&mut self, database: String) {
        *self
            .current_database
            .write()
            .unwrap_or_else(PoisonError::into_inner) = database;
    }

    /// Check if connected.
    pub fn is_connected(&self) -> bool {
        *self.connected.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mark as connected and update server version.
    pub fn set_connected(&mut self, version: Option<String>) {
        *self.connected.write().unwrap_or_else(PoisonError::into_inner) = true;
        *self
            .server_version
            .write()
            .unwrap_or_else(PoisonError::into_inner) = version;
    }

    /// Mark as disconnected.
    pub fn set_disconnected(&mut self) {
        *self.connected.write().unwrap_or_else(PoisonError::into_inner) = false;
        *self
            .server_version
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Get server version.
    pub fn get_server_version(&self) -> Option<String> {
        self.server_version
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Set a shell variable, replacing any previous value.
    ///
    /// # Arguments
    /// * `name` - Variable name
    /// * `value` - Variable value (may be empty)
    pub fn set_variable(&self, name: &str, value: &str) {
        self.variables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), value.to_string());
    }

    /// Remove a shell variable.
    ///
    /// # Returns
    /// * `bool` - True if the variable existed
    pub fn unset_variable(&self, name: &str) -> bool {
        self.variables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
            .is_some()
    }

    /// Get the value of a shell variable.
    pub fn get_variable(&self, name: &str) -> Option<String> {
        self.variables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Names of all shell variables, sorted.
    pub fn variable_names(&self) -> Vec<String> {
        self.variables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// All shell variables with their values, sorted by name.
    pub fn variables(&self) -> Vec<(String, String)> {
        self.variables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}
