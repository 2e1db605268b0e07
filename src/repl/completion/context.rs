//! Completion context definitions
//!
//! This module defines the values that flow between the tokenizer, the
//! dispatcher and the providers: the window of preceding words, the pattern
//! describing how candidates are obtained, and the descriptor for
//! schema-qualified catalog lookups.

use super::words::previous_words;

/// Number of preceding words the dispatcher can look at
pub const CONTEXT_WINDOW: usize = 6;

/// Fixed window of the words preceding the word being completed.
///
/// Index 0 is the word immediately left of the cursor's word, index 5 the
/// farthest. Missing words are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextWords {
    words: [String; CONTEXT_WINDOW],
}

impl ContextWords {
    /// Scan a line and capture the words before the cursor
    pub fn scan(line: &str, cursor: usize) -> Self {
        Self::from_words(previous_words(line, cursor, CONTEXT_WINDOW))
    }

    /// Build a window from explicit words, nearest first.
    ///
    /// Extra words are ignored and missing ones are left empty.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut window: [String; CONTEXT_WINDOW] = Default::default();
        for (slot, word) in window.iter_mut().zip(words) {
            *slot = word.into();
        }
        Self { words: window }
    }

    /// Word at `index`, or an empty string past the window
    pub fn word(&self, index: usize) -> &str {
        self.words.get(index).map_or("", String::as_str)
    }

    /// Case-insensitive keyword comparison
    pub fn is(&self, index: usize, keyword: &str) -> bool {
        self.word(index).eq_ignore_ascii_case(keyword)
    }

    /// Case-insensitive comparison against several keywords
    pub fn is_any(&self, index: usize, keywords: &[&str]) -> bool {
        keywords.iter().any(|keyword| self.is(index, keyword))
    }

    /// True when there is no word at `index`
    pub fn is_empty(&self, index: usize) -> bool {
        self.word(index).is_empty()
    }

    /// True when the word at `index` ends with `ch` (never for an empty word)
    pub fn ends_with(&self, index: usize, ch: char) -> bool {
        self.word(index).ends_with(ch)
    }

    /// Upper-cased byte `position` of the word at `index`, if it exists
    pub fn upper_char_at(&self, index: usize, position: usize) -> Option<char> {
        self.word(index)
            .as_bytes()
            .get(position)
            .map(|b| b.to_ascii_uppercase() as char)
    }

    /// Exact, case-sensitive comparison (backslash commands, `=`)
    pub fn equals(&self, index: usize, text: &str) -> bool {
        self.word(index) == text
    }

    /// Case-sensitive prefix test (backslash command families)
    pub fn starts_with(&self, index: usize, prefix: &str) -> bool {
        self.word(index).starts_with(prefix)
    }

    /// All words, nearest first
    pub fn as_slice(&self) -> &[String] {
        &self.words
    }
}

/// Assembly instructions for a schema-qualified catalog lookup
#[derive(Debug, PartialEq, Eq)]
pub struct SchemaQuery {
    /// Catalog relation(s) to query, with alias, e.g. `pg_catalog.pg_class c`
    pub catalog: &'static str,
    /// Extra selection condition (including join conditions), if any
    pub selection: Option<&'static str>,
    /// Which rows are visible without schema qualification
    pub visibility: &'static str,
    /// Column joined to `pg_namespace.oid`
    pub namespace: &'static str,
    /// Quoted name returned for unqualified candidates
    pub result: &'static str,
    /// Name used for qualified candidates when it differs from `result`
    pub qualified_result: Option<&'static str>,
}

impl SchemaQuery {
    /// Result expression used in the qualified branch
    pub fn qualified(&self) -> &'static str {
        self.qualified_result.unwrap_or(self.result)
    }
}

/// How candidates for the current word are obtained
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// Exactly one fixed suggestion
    Constant(String),

    /// Literal keywords or phrases, in order
    StaticList(&'static [&'static str]),

    /// Catalog query template with the typed text and up to two extra parameters
    SimpleQuery {
        /// `%d`/`%s` template
        template: String,
        /// Bound to the second and third placeholders
        info: Option<String>,
        /// Bound to the fourth and fifth placeholders
        info2: Option<String>,
    },

    /// Schema-qualified catalog lookup
    SchemaQuery {
        /// The lookup to assemble
        descriptor: &'static SchemaQuery,
        /// SQL appended as a further UNION branch
        addon: Option<&'static str>,
    },

    /// Object kinds that may follow CREATE or DROP
    Keywords {
        /// Visibility flags that exclude an entry
        excluded: u8,
    },

    /// Shell variable names wrapped in a prefix and suffix
    Variables {
        /// Text placed before each name
        prefix: &'static str,
        /// Text placed after each name
        suffix: &'static str,
    },

    /// Paths on the local filesystem
    Filenames,
}

impl Pattern {
    /// The provider strategy this pattern is served by
    pub fn kind(&self) -> ProviderKind {
        match self {
            Pattern::Constant(_) => ProviderKind::Constant,
            Pattern::StaticList(_) => ProviderKind::List,
            Pattern::SimpleQuery { .. } => ProviderKind::SimpleQuery,
            Pattern::SchemaQuery { .. } => ProviderKind::SchemaQuery,
            Pattern::Keywords { .. } => ProviderKind::Keywords,
            Pattern::Variables { .. } => ProviderKind::Variables,
            Pattern::Filenames => ProviderKind::Filenames,
        }
    }
}

/// Provider strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Constant,
    List,
    SimpleQuery,
    SchemaQuery,
    Keywords,
    Variables,
    Filenames,
}

/// Result of dispatching: what to complete with and what to append after it
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// How to obtain candidates
    pub pattern: Pattern,
    /// Character the front end should insert after a unique match
    pub append: Option<char>,
}

impl Selection {
    /// Select a pattern with the default trailing space
    pub fn new(pattern: Pattern) -> Self {
        Self {
            pattern,
            append: Some(' '),
        }
    }

    /// The no-op selection: one empty candidate and nothing appended
    pub fn empty() -> Self {
        Self {
            pattern: Pattern::Constant(String::new()),
            append: None,
        }
    }

    /// Constant completion
    pub fn constant(text: impl Into<String>) -> Self {
        Self::new(Pattern::Constant(text.into()))
    }

    /// Static list completion
    pub fn list(items: &'static [&'static str]) -> Self {
        Self::new(Pattern::StaticList(items))
    }

    /// Schema-qualified catalog completion
    pub fn schema(descriptor: &'static SchemaQuery, addon: Option<&'static str>) -> Self {
        Self::new(Pattern::SchemaQuery { descriptor, addon })
    }

    /// Catalog query completion
    pub fn query(template: impl Into<String>, info: Option<String>, info2: Option<String>) -> Self {
        Self::new(Pattern::SimpleQuery {
            template: template.into(),
            info,
            info2,
        })
    }

    /// Provider strategy of the selected pattern
    pub fn kind(&self) -> ProviderKind {
        self.pattern.kind()
    }
}
