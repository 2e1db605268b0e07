//! Completer for reedline - provides completion suggestions

use std::sync::Arc;

use reedline::{Completer, Span, Suggestion};

use super::completion::CompletionEngine;
use super::shared_state::SharedState;
use crate::config::CompletionConfig;
use crate::connection::CatalogSource;

/// PostgreSQL completer for reedline
pub struct PgCompleter {
    /// Completion engine for context-sensitive suggestions
    completion_engine: CompletionEngine,
}

impl PgCompleter {
    /// Create a new completer
    ///
    /// # Arguments
    /// * `source` - Catalog queried for object names
    /// * `shared_state` - Shared state holding the shell variables
    /// * `config` - Completion settings
    ///
    /// # Returns
    /// * `Self` - New completer
    pub fn new(
        source: Arc<dyn CatalogSource>,
        shared_state: SharedState,
        config: CompletionConfig,
    ) -> Self {
        Self {
            completion_engine: CompletionEngine::new(source, shared_state, config),
        }
    }
}

impl Completer for PgCompleter {
    /// Complete the input at the given cursor position
    ///
    /// # Arguments
    /// * `line` - The input line
    /// * `pos` - Cursor position (byte index)
    ///
    /// # Returns
    /// * `Vec<Suggestion>` - List of completion suggestions
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let (start, candidates) = self.completion_engine.complete(line, pos);

        candidates
            .into_iter()
            .map(|pair| Suggestion {
                value: pair.replacement,
                description: None,
                style: None,
                extra: None,
                span: Span::new(start, pos),
                append_whitespace: pair.append == Some(' '),
                match_indices: None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::testing::RecordingCatalog;

    fn create_test_completer(catalog: RecordingCatalog) -> PgCompleter {
        let shared_state = SharedState::new("postgres".to_string());
        shared_state.set_variable("ECHO", "all");
        PgCompleter::new(Arc::new(catalog), shared_state, CompletionConfig::default())
    }

    #[test]
    fn test_complete_sql_command() {
        let mut completer = create_test_completer(RecordingCatalog::disconnected());
        let suggestions = completer.complete("UPD", 3);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].value, "UPDATE");
        assert!(suggestions[0].append_whitespace);
    }

    #[test]
    fn test_span_position() {
        let mut completer = create_test_completer(RecordingCatalog::with_rows(&["users"]));
        let line = "SELECT * FROM us";
        let suggestions = completer.complete(line, line.len());

        assert_eq!(suggestions.len(), 1);
        for suggestion in suggestions {
            assert_eq!(suggestion.span.start, 14); // Start of "us"
            assert_eq!(suggestion.span.end, 16); // Current cursor position
        }
    }

    #[test]
    fn test_variable_suggestions() {
        let mut completer = create_test_completer(RecordingCatalog::disconnected());
        let suggestions = completer.complete("\\echo :E", 8);
        let values: Vec<_> = suggestions.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, vec![":ECHO"]);
    }

    #[test]
    fn test_no_suggestions_when_nothing_applies() {
        let mut completer = create_test_completer(RecordingCatalog::disconnected());
        assert!(completer.complete("VACUUM FULL x ", 14).is_empty());
    }
}
