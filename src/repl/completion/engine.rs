//! Completion engine - orchestrates the completion flow
//!
//! This module ties the completion components together: it locates the word
//! under the cursor, scans the words before it, asks the dispatcher for a
//! pattern and builds the provider that streams the candidates.
//!
//! Line editors that pull candidates one at a time use
//! [`CompletionEngine::next_candidate`]; editors that want the whole list use
//! [`CompletionEngine::complete`].

use std::sync::Arc;

use tracing::{debug, trace};

use super::context::{ContextWords, ProviderKind};
use super::dispatcher::dispatch;
use super::provider::{CandidateProvider, ProviderEnv};
use super::words::current_word;
use crate::config::CompletionConfig;
use crate::connection::CatalogSource;
use crate::repl::SharedState;

/// Completion pair representing a candidate suggestion
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionPair {
    /// Display text for the candidate
    pub display: String,
    /// Replacement text to insert
    pub replacement: String,
    /// Character to insert after the replacement when it is accepted
    pub append: Option<char>,
}

/// State of one completion request.
///
/// Owns the provider, and with it any fetched result rows, until it is
/// dropped.
pub struct CompletionSession {
    text: String,
    start: usize,
    kind: ProviderKind,
    append: Option<char>,
    provider: CandidateProvider,
}

impl CompletionSession {
    /// Byte offset where the completed word starts
    pub fn start(&self) -> usize {
        self.start
    }

    /// The word typed so far
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Strategy serving this session
    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// Character to append after a unique match
    pub fn append(&self) -> Option<char> {
        self.append
    }
}

impl Iterator for CompletionSession {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let candidate = self.provider.next();
        trace!("candidate: {:?}", candidate);
        candidate
    }
}

/// Main completion engine
pub struct CompletionEngine {
    /// Catalog queried for object names
    source: Arc<dyn CatalogSource>,
    /// Shell variables for variable completion
    shared_state: SharedState,
    /// Completion settings
    config: CompletionConfig,
    /// Session of the pull protocol, alive between `state == 0` and exhaustion
    session: Option<CompletionSession>,
    /// Append hint for the last candidate pulled; outlives the session
    append: Option<char>,
}

impl CompletionEngine {
    /// Create a new completion engine
    ///
    /// # Arguments
    /// * `source` - Catalog queried for object names
    /// * `shared_state` - Shared state holding the shell variables
    /// * `config` - Completion settings
    pub fn new(
        source: Arc<dyn CatalogSource>,
        shared_state: SharedState,
        config: CompletionConfig,
    ) -> Self {
        Self {
            source,
            shared_state,
            config,
            session: None,
            append: None,
        }
    }

    /// Completion settings in use
    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Replace the completion settings; takes effect on the next session
    pub fn set_config(&mut self, config: CompletionConfig) {
        self.config = config;
    }

    /// Begin a completion request for the word under the cursor
    ///
    /// # Arguments
    /// * `line` - The input line
    /// * `pos` - Cursor position (byte index)
    ///
    /// # Returns
    /// * `CompletionSession` - Iterator over the candidates
    pub fn start(&self, line: &str, pos: usize) -> CompletionSession {
        let (start, text) = current_word(line, pos);
        let words = ContextWords::scan(line, pos);
        let selection = dispatch(text, &words, &self.config);
        debug!(
            "completing {:?} after {:?} with {:?}",
            text,
            words.word(0),
            selection.kind()
        );

        let env = ProviderEnv {
            source: &self.source,
            config: &self.config,
            variables: self.shared_state.variable_names(),
        };

        CompletionSession {
            text: text.to_string(),
            start,
            kind: selection.kind(),
            append: selection.append,
            provider: CandidateProvider::build(&selection.pattern, text, env),
        }
    }

    /// Pull-style completion: candidate number `state` for the cursor word
    ///
    /// `state == 0` starts a new session, dropping any previous one. Later
    /// calls continue it. The session is released once it runs dry, but the
    /// append hint of the last candidate stays readable through
    /// [`CompletionEngine::append_character`].
    ///
    /// # Arguments
    /// * `line` - The input line
    /// * `pos` - Cursor position (byte index)
    /// * `state` - 0 for the first candidate, then increasing
    ///
    /// # Returns
    /// * `Option<String>` - The next candidate, or None when exhausted
    pub fn next_candidate(&mut self, line: &str, pos: usize, state: usize) -> Option<String> {
        if state == 0 {
            let session = self.start(line, pos);
            self.append = session.append();
            self.session = Some(session);
        }

        let Some(session) = self.session.as_mut() else {
            return None;
        };

        match session.next() {
            Some(candidate) => {
                self.append = candidate_append(session.kind(), session.append(), &candidate);
                Some(candidate)
            }
            None => {
                self.session = None;
                None
            }
        }
    }

    /// Character to append after the last candidate pulled
    ///
    /// Still answers after the session has run dry, so a caller that drains
    /// the candidates to learn a match is unique can read it afterwards.
    pub fn append_character(&self) -> Option<char> {
        self.append
    }

    /// Complete the input at the given cursor position
    ///
    /// # Arguments
    /// * `line` - The input line
    /// * `pos` - Cursor position (byte index)
    ///
    /// # Returns
    /// * `(usize, Vec<CompletionPair>)` - Completion start position and candidate pairs
    pub fn complete(&self, line: &str, pos: usize) -> (usize, Vec<CompletionPair>) {
        let session = self.start(line, pos);
        let start = session.start();
        let kind = session.kind();
        let append = session.append();
        let dir_prefix = match session.text().rfind('/') {
            Some(i) if kind == ProviderKind::Filenames => session.text()[..=i].to_string(),
            _ => String::new(),
        };

        // The empty constant only tells the editor not to fall back to anything else
        let pairs = session
            .filter(|candidate| !candidate.is_empty())
            .map(|candidate| {
                if kind == ProviderKind::Filenames {
                    let display = candidate
                        .strip_prefix(dir_prefix.as_str())
                        .unwrap_or(&candidate)
                        .to_string();
                    let append = candidate_append(kind, append, &candidate);
                    CompletionPair {
                        display,
                        replacement: candidate,
                        append,
                    }
                } else {
                    CompletionPair {
                        display: candidate.clone(),
                        replacement: candidate,
                        append,
                    }
                }
            })
            .collect();

        (start, pairs)
    }
}

/// Append hint for one candidate; directories never take one
fn candidate_append(kind: ProviderKind, append: Option<char>, candidate: &str) -> Option<char> {
    if kind == ProviderKind::Filenames && candidate.ends_with('/') {
        None
    } else {
        append
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::testing::RecordingCatalog;

    fn engine_with(catalog: Arc<RecordingCatalog>) -> CompletionEngine {
        let shared_state = SharedState::new("postgres".to_string());
        shared_state.set_variable("myvar", "1");
        shared_state.set_variable("mydb", "x");
        shared_state.set_variable("other", "2");
        CompletionEngine::new(catalog, shared_state, CompletionConfig::default())
    }

    fn create_test_engine() -> CompletionEngine {
        engine_with(Arc::new(RecordingCatalog::disconnected()))
    }

    fn replacements(pairs: &[CompletionPair]) -> Vec<&str> {
        pairs.iter().map(|p| p.replacement.as_str()).collect()
    }

    #[test]
    fn test_complete_first_word() {
        let engine = create_test_engine();
        let (start, pairs) = engine.complete("SEL", 3);

        assert_eq!(start, 0);
        assert_eq!(replacements(&pairs), vec!["SELECT"]);
        assert_eq!(pairs[0].append, Some(' '));
    }

    #[test]
    fn test_complete_lowercase_keyword_prefix() {
        let engine = create_test_engine();
        let (_start, pairs) = engine.complete("begin tr", 8);
        assert_eq!(replacements(&pairs), vec!["TRANSACTION"]);
    }

    #[test]
    fn test_complete_table_after_statement_start() {
        let catalog = Arc::new(RecordingCatalog::with_rows(&["users", "public."]));
        let engine = engine_with(catalog.clone());
        let (start, pairs) = engine.complete("TABLE ", 6);

        assert_eq!(start, 6);
        assert_eq!(replacements(&pairs), vec!["users", "public."]);
        let queries = catalog.queries();
        assert_eq!(queries.len(), 1);
        assert!(queries[0].contains("pg_catalog.pg_class c"));
        assert!(queries[0].ends_with("\nLIMIT 1000"));
    }

    #[test]
    fn test_complete_insert_into_uses_insertable_relations() {
        let catalog = Arc::new(RecordingCatalog::with_rows(&["orders"]));
        let engine = engine_with(catalog.clone());
        let line = "INSERT INTO ";
        let (_start, pairs) = engine.complete(line, line.len());

        assert_eq!(replacements(&pairs), vec!["orders"]);
        assert!(catalog.queries()[0].contains("t.tgtype & (1 << 2) <> 0"));
    }

    #[test]
    fn test_complete_variable_reference() {
        let engine = create_test_engine();
        let line = "SELECT :my";
        let (start, pairs) = engine.complete(line, line.len());

        assert_eq!(start, 7);
        assert_eq!(replacements(&pairs), vec![":mydb", ":myvar"]);
    }

    #[test]
    fn test_complete_backslash_command() {
        let engine = create_test_engine();
        let (_start, pairs) = engine.complete("\\co", 3);
        assert_eq!(
            replacements(&pairs),
            vec!["\\connect", "\\conninfo", "\\copy", "\\copyright"]
        );
    }

    #[test]
    fn test_complete_nothing_hides_empty_constant() {
        let engine = create_test_engine();
        let (_start, pairs) = engine.complete("SELECT foo ", 11);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_complete_without_connection_is_empty() {
        let engine = create_test_engine();
        let (_start, pairs) = engine.complete("SELECT * FROM ", 14);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_complete_query_failure_is_empty() {
        let engine = engine_with(Arc::new(RecordingCatalog::failing()));
        let (_start, pairs) = engine.complete("DROP TABLE ", 11);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_next_candidate_protocol() {
        let mut engine = create_test_engine();
        let line = "BEGIN ";

        assert_eq!(engine.next_candidate(line, 6, 0).as_deref(), Some("WORK"));
        assert_eq!(engine.append_character(), Some(' '));
        assert_eq!(engine.next_candidate(line, 6, 1).as_deref(), Some("TRANSACTION"));
        assert_eq!(engine.next_candidate(line, 6, 2), None);
        assert_eq!(engine.append_character(), Some(' '));

        // Restarting yields the same candidates again
        assert_eq!(engine.next_candidate(line, 6, 0).as_deref(), Some("WORK"));
    }

    #[test]
    fn test_next_candidate_queries_once_per_session() {
        let catalog = Arc::new(RecordingCatalog::with_rows(&["alice", "bob"]));
        let mut engine = engine_with(catalog.clone());
        let line = "ALTER GROUP staff ADD USER ";
        let pos = line.len();

        assert_eq!(engine.next_candidate(line, pos, 0).as_deref(), Some("alice"));
        assert_eq!(engine.next_candidate(line, pos, 1).as_deref(), Some("bob"));
        assert_eq!(engine.next_candidate(line, pos, 2), None);
        assert_eq!(catalog.queries().len(), 1);

        assert_eq!(engine.next_candidate(line, pos, 0).as_deref(), Some("alice"));
        assert_eq!(catalog.queries().len(), 2);
    }

    #[test]
    fn test_abandoned_session_is_replaced() {
        let mut engine = create_test_engine();
        assert_eq!(engine.next_candidate("COMMIT ", 7, 0).as_deref(), Some("WORK"));
        // The user kept typing; state 0 starts over for the new word
        assert_eq!(engine.next_candidate("COMMIT P", 8, 0).as_deref(), Some("PREPARED"));
        assert_eq!(engine.next_candidate("COMMIT P", 8, 1), None);
    }

    #[test]
    fn test_constant_ignores_typed_text() {
        let engine = create_test_engine();
        let (start, pairs) = engine.complete("INSERT IN", 9);
        assert_eq!(start, 7);
        assert_eq!(replacements(&pairs), vec!["INTO"]);
    }

    #[test]
    fn test_complete_filenames() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("load.sql"), "").unwrap();
        std::fs::create_dir(dir.path().join("lib")).unwrap();

        let engine = create_test_engine();
        let line = format!("\\i {}/l", dir.path().display());
        let (start, pairs) = engine.complete(&line, line.len());

        assert_eq!(start, 3);
        let displays: Vec<&str> = pairs.iter().map(|p| p.display.as_str()).collect();
        assert_eq!(displays, vec!["lib/", "load.sql"]);
        assert_eq!(pairs[0].append, None);
        assert_eq!(pairs[1].append, Some(' '));
        assert!(pairs[1].replacement.ends_with("/load.sql"));
    }

    #[test]
    fn test_append_character_after_sole_match_drained() {
        let mut engine = create_test_engine();
        let line = "INSERT ";

        assert_eq!(engine.next_candidate(line, 7, 0).as_deref(), Some("INTO"));
        assert_eq!(engine.next_candidate(line, 7, 1), None);
        assert_eq!(engine.append_character(), Some(' '));
    }

    #[test]
    fn test_next_candidate_directory_has_no_append() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("lib")).unwrap();

        let mut engine = create_test_engine();
        let line = format!("\\i {}/l", dir.path().display());
        let pos = line.len();

        let first = engine.next_candidate(&line, pos, 0).unwrap();
        assert!(first.ends_with("/lib/"));
        assert_eq!(engine.append_character(), None);
        assert_eq!(engine.next_candidate(&line, pos, 1), None);
        assert_eq!(engine.append_character(), None);
    }

    #[test]
    fn test_next_candidate_file_keeps_append() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("load.sql"), "").unwrap();

        let mut engine = create_test_engine();
        let line = format!("\\i {}/l", dir.path().display());
        let pos = line.len();

        let first = engine.next_candidate(&line, pos, 0).unwrap();
        assert!(first.ends_with("/load.sql"));
        assert_eq!(engine.next_candidate(&line, pos, 1), None);
        assert_eq!(engine.append_character(), Some(' '));
    }

    #[test]
    fn test_session_accessors() {
        let engine = create_test_engine();
        let session = engine.start("CREATE TA", 9);
        assert_eq!(session.start(), 7);
        assert_eq!(session.text(), "TA");
        assert_eq!(session.kind(), ProviderKind::Keywords);
        assert_eq!(session.collect::<Vec<_>>(), vec!["TABLE", "TABLESPACE"]);
    }
}
