//! REPL (Read-Eval-Print Loop) for pgsh
//!
//! This module provides an interactive shell interface with features:
//! - Command line editing with reedline
//! - File-backed command history with inline hints
//! - Context-sensitive tab completion backed by the catalog
//! - Multi-line statements terminated by `;`
//! - The `\set`, `\unset` and `\q` meta-commands

mod completer;
pub mod completion;
mod engine;
mod hinter;
mod meta;
mod prompt;
mod shared_state;
mod validator;

pub use completer::PgCompleter;
pub use engine::ReplEngine;
pub use hinter::HistoryHinter;
pub use meta::{Evaluation, MetaCommand, evaluate};
pub use prompt::PgPrompt;
pub use shared_state::SharedState;
pub use validator::StatementValidator;

#[cfg(test)]
mod tests;
