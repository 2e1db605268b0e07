//! Meta-command parser
//!
//! Handles the backslash commands the shell evaluates itself:
//! - `\set` lists variables, `\set name [value ...]` assigns one
//! - `\unset name`
//! - `\q`, `\quit`
//!
//! Everything else is a statement, which is recorded but not executed.

use crate::error::{PgshError, Result};

use super::shared_state::SharedState;

/// Commands understood by the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    /// `\set` without arguments
    ListVariables,

    /// `\set name value...`, values concatenated
    Set { name: String, value: String },

    /// `\unset name`
    Unset(String),

    /// `\q`
    Quit,
}

/// What the REPL does with one line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// Nothing to do
    Empty,

    /// Print this text and keep reading
    Output(String),

    /// Leave the REPL
    Quit,
}

impl MetaCommand {
    /// Parse a meta command
    ///
    /// # Arguments
    /// * `input` - One input line
    ///
    /// # Returns
    /// * `Option<Result<MetaCommand>>` - None when the line is not a meta
    ///   command handled here, otherwise the command or why it is malformed
    pub fn parse(input: &str) -> Option<Result<Self>> {
        let mut parts = input.trim().split_whitespace();
        let command = parts.next()?;

        match command {
            "\\q" | "\\quit" => Some(Ok(MetaCommand::Quit)),
            "\\set" => Some(match parts.next() {
                None => Ok(MetaCommand::ListVariables),
                Some(name) => Self::check_name(name).map(|name| MetaCommand::Set {
                    name,
                    value: parts.collect(),
                }),
            }),
            "\\unset" => Some(match parts.next() {
                None => Err(PgshError::Generic("\\unset: missing required argument".to_string())),
                Some(name) => Self::check_name(name).map(MetaCommand::Unset),
            }),
            _ => None,
        }
    }

    /// Apply the command to the shared state
    pub fn apply(self, shared_state: &SharedState) -> Evaluation {
        match self {
            MetaCommand::ListVariables => Evaluation::Output(
                shared_state
                    .variables()
                    .iter()
                    .map(|(name, value)| format!("{} = '{}'", name, value))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            MetaCommand::Set { name, value } => {
                shared_state.set_variable(&name, &value);
                Evaluation::Empty
            }
            MetaCommand::Unset(name) => {
                shared_state.unset_variable(&name);
                Evaluation::Empty
            }
            MetaCommand::Quit => Evaluation::Quit,
        }
    }

    /// Variable names are letters, digits and underscores
    fn check_name(name: &str) -> Result<String> {
        if name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            Ok(name.to_string())
        } else {
            Err(PgshError::Generic(format!("invalid variable name: \"{}\"", name)))
        }
    }
}

/// Evaluate one line of input
///
/// # Arguments
/// * `shared_state` - State holding the shell variables
/// * `input` - The submitted line
///
/// # Returns
/// * `Evaluation` - What the REPL should do next
pub fn evaluate(shared_state: &SharedState, input: &str) -> Evaluation {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Evaluation::Empty;
    }

    match MetaCommand::parse(trimmed) {
        Some(Ok(command)) => command.apply(shared_state),
        Some(Err(e)) => Evaluation::Output(e.to_string()),
        None if trimmed.starts_with('\\') => {
            let command = trimmed.split_whitespace().next().unwrap_or(trimmed);
            Evaluation::Output(format!("invalid command {}", command))
        }
        None => Evaluation::Output(
            "statement recorded in history (execution is not supported)".to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quit() {
        assert_eq!(MetaCommand::parse("\\q").unwrap().unwrap(), MetaCommand::Quit);
        assert_eq!(MetaCommand::parse("  \\quit ").unwrap().unwrap(), MetaCommand::Quit);
    }

    #[test]
    fn test_parse_set() {
        assert_eq!(
            MetaCommand::parse("\\set").unwrap().unwrap(),
            MetaCommand::ListVariables
        );
        assert_eq!(
            MetaCommand::parse("\\set ON_ERROR_STOP").unwrap().unwrap(),
            MetaCommand::Set {
                name: "ON_ERROR_STOP".to_string(),
                value: String::new(),
            }
        );
        assert_eq!(
            MetaCommand::parse("\\set x a b").unwrap().unwrap(),
            MetaCommand::Set {
                name: "x".to_string(),
                value: "ab".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!(MetaCommand::parse("\\set a-b 1").unwrap().is_err());
        assert!(MetaCommand::parse("\\unset").unwrap().is_err());
        assert!(MetaCommand::parse("SELECT 1;").is_none());
        assert!(MetaCommand::parse("\\dt").is_none());
        assert!(MetaCommand::parse("").is_none());
    }

    #[test]
    fn test_evaluate_non_meta_input() {
        let state = SharedState::new("postgres".to_string());
        assert_eq!(evaluate(&state, "   "), Evaluation::Empty);
        assert_eq!(
            evaluate(&state, "\\dt public.*"),
            Evaluation::Output("invalid command \\dt".to_string())
        );
        assert!(matches!(evaluate(&state, "SELECT 1;"), Evaluation::Output(_)));
        assert_eq!(evaluate(&state, "\\q"), Evaluation::Quit);
    }
}
