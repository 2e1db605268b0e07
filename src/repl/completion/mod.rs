//! Completion system for the pgsh REPL
//!
//! This module provides context-sensitive tab completion for SQL statements
//! and backslash commands. It never parses the statement: it looks at the few
//! words before the cursor, matches them against an ordered rule table and
//! completes from whatever the first matching rule names.
//!
//! # Architecture
//!
//! The completion system consists of several components:
//!
//! - **Words**: Finds the word under the cursor and the words before it
//! - **Rules**: Ordered table mapping preceding words to an action
//! - **Dispatcher**: Picks exactly one pattern for the current word
//! - **Catalog**: Keyword tables and the catalog query templates
//! - **Schema queries**: Builds the SQL for names that may be schema-qualified
//! - **Provider**: Streams candidates from lists, queries, variables or files
//! - **Engine**: Orchestrates the entire completion flow
//!
//! # Examples
//!
//! ```no_run
//! use pgsh::config::CompletionConfig;
//! use pgsh::connection::ConnectionManager;
//! use pgsh::repl::completion::CompletionEngine;
//! use pgsh::repl::SharedState;
//! use std::sync::Arc;
//!
//! let manager = Arc::new(ConnectionManager::new(
//!     "postgres://localhost/postgres".to_string(),
//!     Default::default(),
//! ));
//! let shared_state = SharedState::new("postgres".to_string());
//! let engine = CompletionEngine::new(manager, shared_state, CompletionConfig::default());
//!
//! // Complete "SELECT * FROM us" with cursor at the end
//! let (start, candidates) = engine.complete("SELECT * FROM us", 16);
//! // Returns relation names starting with "us"
//! ```

mod catalog;
mod context;
mod dispatcher;
mod engine;
mod provider;
mod rules;
mod schema_query;
mod words;

pub use context::{ContextWords, Pattern, ProviderKind, Selection};
pub use dispatcher::dispatch;
pub use engine::{CompletionEngine, CompletionPair, CompletionSession};
pub use provider::{CandidateProvider, ProviderEnv};
pub use words::{current_word, previous_words};
