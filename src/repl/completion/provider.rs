//! Candidate providers
//!
//! One provider is built per completion session from the dispatcher's
//! pattern. Each is an iterator yielding the candidates for the typed text in
//! order; the front end pulls as many as it needs.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::vec;

use tracing::{debug, trace};

use super::catalog::{Thing, WORDS_AFTER_CREATE};
use super::context::Pattern;
use super::schema_query::{build_schema_query, build_simple_query};
use crate::config::CompletionConfig;
use crate::connection::CatalogSource;

/// Everything a provider may need besides the pattern and the typed text
pub struct ProviderEnv<'a> {
    /// Where catalog queries are sent
    pub source: &'a Arc<dyn CatalogSource>,
    /// Row limit and escaping settings
    pub config: &'a CompletionConfig,
    /// Names of the shell variables, for variable completion
    pub variables: Vec<String>,
}

/// Candidate generator for one completion session
pub enum CandidateProvider {
    /// Yields one fixed string, once
    Constant(Option<String>),
    /// Filters a list of words by prefix
    List(ListProvider),
    /// Runs a catalog query on first use and streams its rows
    Query(QueryProvider),
    /// Names from the CREATE/DROP keyword table
    Keywords(KeywordProvider),
    /// Local file names
    Filenames(FilenameProvider),
}

impl CandidateProvider {
    /// Build the provider serving `pattern` for the typed `text`
    ///
    /// # Arguments
    /// * `pattern` - Pattern chosen by the dispatcher
    /// * `text` - The word typed so far
    /// * `env` - Catalog access, settings and variable names
    pub fn build(pattern: &Pattern, text: &str, env: ProviderEnv<'_>) -> Self {
        match pattern {
            Pattern::Constant(value) => CandidateProvider::Constant(Some(value.clone())),
            Pattern::StaticList(items) => CandidateProvider::List(ListProvider::new(
                items.iter().map(|item| item.to_string()).collect(),
                text,
            )),
            Pattern::Variables { prefix, suffix } => CandidateProvider::List(ListProvider::new(
                env.variables
                    .iter()
                    .map(|name| format!("{prefix}{name}{suffix}"))
                    .collect(),
                text,
            )),
            Pattern::SimpleQuery {
                template,
                info,
                info2,
            } => {
                let sql = build_simple_query(
                    template,
                    text,
                    info.as_deref(),
                    info2.as_deref(),
                    env.config,
                );
                CandidateProvider::Query(QueryProvider::new(sql, text, Arc::clone(env.source)))
            }
            Pattern::SchemaQuery { descriptor, addon } => {
                let sql = build_schema_query(descriptor, text, *addon, env.config);
                CandidateProvider::Query(QueryProvider::new(sql, text, Arc::clone(env.source)))
            }
            Pattern::Keywords { excluded } => CandidateProvider::Keywords(KeywordProvider::new(
                WORDS_AFTER_CREATE,
                *excluded,
                text,
            )),
            Pattern::Filenames => CandidateProvider::Filenames(FilenameProvider::new(text)),
        }
    }
}

impl Iterator for CandidateProvider {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        match self {
            CandidateProvider::Constant(value) => value.take(),
            CandidateProvider::List(list) => list.next(),
            CandidateProvider::Query(query) => query.next(),
            CandidateProvider::Keywords(keywords) => keywords.next(),
            CandidateProvider::Filenames(files) => files.next(),
        }
    }
}

/// Case-insensitive ASCII prefix test; `item` must be at least as long as `prefix`
pub fn has_prefix_ignore_case(item: &str, prefix: &str) -> bool {
    item.as_bytes()
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}

/* ========================= List ========================= */

/// Prefix filter over an ordered word list.
///
/// The first pass compares case-sensitively. Only when it matched nothing is
/// the list scanned again ignoring case.
pub struct ListProvider {
    items: Vec<String>,
    text: String,
    index: usize,
    matches: usize,
    case_sensitive: bool,
}

impl ListProvider {
    /// Create a provider over `items` for the typed `text`
    pub fn new(items: Vec<String>, text: &str) -> Self {
        Self {
            items,
            text: text.to_string(),
            index: 0,
            matches: 0,
            case_sensitive: true,
        }
    }
}

impl Iterator for ListProvider {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            while let Some(item) = self.items.get(self.index) {
                self.index += 1;
                let hit = if self.case_sensitive {
                    item.starts_with(&self.text)
                } else {
                    has_prefix_ignore_case(item, &self.text)
                };
                if hit {
                    self.matches += 1;
                    return Some(item.clone());
                }
            }

            if self.case_sensitive && self.matches == 0 {
                trace!("no case-sensitive match for {:?}, retrying ignoring case", self.text);
                self.case_sensitive = false;
                self.index = 0;
                continue;
            }
            return None;
        }
    }
}

/* ========================= Query ========================= */

enum QueryState {
    NotStarted,
    Streaming(vec::IntoIter<String>),
    Exhausted,
}

/// Catalog query executed once, on the first pull.
///
/// Rows are offered when they start with the typed text, ignoring case. Any
/// failure ends the stream without candidates.
pub struct QueryProvider {
    sql: String,
    text: String,
    source: Arc<dyn CatalogSource>,
    state: QueryState,
}

impl QueryProvider {
    /// Create a provider that will run `sql`
    pub fn new(sql: String, text: &str, source: Arc<dyn CatalogSource>) -> Self {
        Self {
            sql,
            text: text.to_string(),
            source,
            state: QueryState::NotStarted,
        }
    }

    /// The query this provider runs
    pub fn sql(&self) -> &str {
        &self.sql
    }

    fn execute(&self) -> QueryState {
        if !self.source.is_connected() {
            debug!("not connected, skipping completion query");
            return QueryState::Exhausted;
        }

        debug!("completion query: {}", self.sql);
        match self.source.fetch_column(&self.sql) {
            Ok(rows) => {
                debug!("completion query returned {} rows", rows.len());
                QueryState::Streaming(rows.into_iter())
            }
            Err(e) => {
                debug!("completion query failed: {}", e);
                QueryState::Exhausted
            }
        }
    }
}

impl Iterator for QueryProvider {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if matches!(self.state, QueryState::NotStarted) {
            self.state = self.execute();
        }

        let QueryState::Streaming(rows) = &mut self.state else {
            return None;
        };
        let text = &self.text;
        let found = rows.find(|row| has_prefix_ignore_case(row, text));
        if found.is_none() {
            // Release the result set as soon as it is consumed
            self.state = QueryState::Exhausted;
        }
        found
    }
}

/* ========================= Keywords ========================= */

/// Names from the keyword table not excluded by the given flags
pub struct KeywordProvider {
    things: std::slice::Iter<'static, Thing>,
    excluded: u8,
    text: String,
}

impl KeywordProvider {
    /// Create a provider over `things`, skipping entries flagged with `excluded`
    pub fn new(things: &'static [Thing], excluded: u8, text: &str) -> Self {
        Self {
            things: things.iter(),
            excluded,
            text: text.to_string(),
        }
    }
}

impl Iterator for KeywordProvider {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let (excluded, text) = (self.excluded, &self.text);
        self.things
            .find(|thing| thing.flags & excluded == 0 && has_prefix_ignore_case(thing.name, text))
            .map(|thing| thing.name.to_string())
    }
}

/* ========================= Filenames ========================= */

/// Entries of the directory named by the typed text
pub struct FilenameProvider {
    text: String,
    entries: Option<vec::IntoIter<String>>,
}

impl FilenameProvider {
    /// Create a provider listing matches for the typed path
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            entries: None,
        }
    }

    fn list(&self) -> Vec<String> {
        let (dir_part, file_prefix) = match self.text.rfind('/') {
            Some(i) => self.text.split_at(i + 1),
            None => ("", self.text.as_str()),
        };

        let dir = expand_home(dir_part);
        let read = match fs::read_dir(&dir) {
            Ok(read) => read,
            Err(e) => {
                debug!("cannot list {}: {}", dir.display(), e);
                return Vec::new();
            }
        };

        let show_hidden = file_prefix.starts_with('.');
        let mut names: Vec<String> = read
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                if !name.starts_with(file_prefix) || (name.starts_with('.') && !show_hidden) {
                    return None;
                }
                let is_dir = entry.file_type().is_ok_and(|t| t.is_dir())
                    || entry.path().is_dir();
                Some(if is_dir {
                    format!("{dir_part}{name}/")
                } else {
                    format!("{dir_part}{name}")
                })
            })
            .collect();
        names.sort();

        trace!("{} file candidates for {:?}", names.len(), self.text);
        names
    }
}

impl Iterator for FilenameProvider {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.entries.is_none() {
            self.entries = Some(self.list().into_iter());
        }
        self.entries.as_mut().and_then(Iterator::next)
    }
}

/// Directory to read for the typed directory part, expanding a leading `~/`
fn expand_home(dir_part: &str) -> PathBuf {
    if dir_part.is_empty() {
        return PathBuf::from(".");
    }
    if let Some(rest) = dir_part.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(dir_part)
}
