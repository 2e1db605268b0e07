//! Ordered completion rules
//!
//! Each rule pairs a predicate over the preceding words with the completion
//! to offer. Rules are tried top to bottom and the first match wins, so a
//! specific rule must always sit above any broader rule that also matches
//! its context.
//!
//! Word indices count back from the cursor: `0` is the word right before
//! the one being completed, `5` the farthest one kept.

use super::catalog::{self, NO_CREATE, NO_DROP};
use super::context::{ContextWords, Pattern, SchemaQuery, Selection};
use super::schema_query::escape_literal;
use crate::config::CompletionConfig;

/// One row of the rule table
pub(crate) struct Rule {
    /// Context the rule applies to
    pub when: fn(&ContextWords) -> bool,
    /// Completion offered when it does
    pub then: Action,
}

/// What a matching rule completes with
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Action {
    /// Things that can be created
    Create,
    /// Things that can be dropped
    Drop,
    /// Fixed keywords or phrases
    List(&'static [&'static str]),
    /// A single suggestion offered regardless of the typed text
    Const(&'static str),
    /// Catalog query with no extra parameters
    Query(&'static str),
    /// Catalog query parameterized with the word at the given index
    QueryWith(&'static str, usize),
    /// Schema-qualified lookup with an optional extra UNION branch
    Schema(&'static SchemaQuery, Option<&'static str>),
    /// Columns of the relation named by the word at the given index
    Attributes(usize, &'static str),
    /// Argument lists of the function named by the word at the given index
    Arguments(usize),
    /// Bare shell variable names
    Variables,
    /// Local file names
    Filenames,
    /// The context is recognized but nothing can be suggested
    Nothing,
}

impl Action {
    /// Turn the action into a selection for the current words
    pub fn select(&self, words: &ContextWords, config: &CompletionConfig) -> Selection {
        match *self {
            Action::Create => Selection::new(Pattern::Keywords { excluded: NO_CREATE }),
            Action::Drop => Selection::new(Pattern::Keywords { excluded: NO_DROP }),
            Action::List(items) => Selection::list(items),
            Action::Const(text) => Selection::constant(text),
            Action::Query(template) => Selection::query(template, None, None),
            Action::QueryWith(template, index) => {
                Selection::query(template, Some(words.word(index).to_string()), None)
            }
            Action::Schema(descriptor, addon) => Selection::schema(descriptor, addon),
            Action::Attributes(index, addon) => attributes(words.word(index), addon),
            Action::Arguments(index) => {
                let name = escape_literal(words.word(index), config.standard_conforming_strings);
                // The name lands in a template, so a literal % must not start a placeholder
                let template = catalog::ARGUMENTS.replace("{name}", &name.replace('%', "%%"));
                Selection::query(template, None, None)
            }
            Action::Variables => Selection::new(Pattern::Variables {
                prefix: "",
                suffix: "",
            }),
            Action::Filenames => Selection::new(Pattern::Filenames),
            Action::Nothing => Selection::empty(),
        }
    }
}

/// Column completion for a possibly schema-qualified relation name
fn attributes(relation: &str, addon: &str) -> Selection {
    match split_qualified(relation) {
        Some((schema, table)) => Selection::query(
            format!("{}{addon}", catalog::ATTRIBUTES_WITH_SCHEMA),
            Some(table.to_string()),
            Some(schema.to_string()),
        ),
        None => Selection::query(
            format!("{}{addon}", catalog::ATTRIBUTES),
            Some(relation.to_string()),
            None,
        ),
    }
}

/// Split `schema.table` at the first dot outside double quotes.
///
/// Quotes are kept on both parts. Returns `None` for an unqualified name.
pub(crate) fn split_qualified(relation: &str) -> Option<(&str, &str)> {
    let mut in_quotes = false;
    for (i, ch) in relation.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '.' if !in_quotes => {
                let table = &relation[i + 1..];
                return (!table.is_empty()).then(|| (&relation[..i], table));
            }
            _ => {}
        }
    }
    None
}

/// Find the first rule matching the words
pub(crate) fn find(words: &ContextWords) -> Option<(usize, &'static Rule)> {
    RULES.iter().enumerate().find(|(_, rule)| (rule.when)(words))
}

macro_rules! rule {
    (|$w:ident| $cond:expr => $then:expr) => {
        Rule {
            when: |$w: &ContextWords| $cond,
            then: $then,
        }
    };
}

use Action::*;

const LIST_ALTER: &[&str] = &[
    "AGGREGATE", "COLLATION", "CONVERSION", "DATABASE", "DEFAULT PRIVILEGES", "DOMAIN",
    "EXTENSION", "FOREIGN DATA WRAPPER", "FOREIGN TABLE", "FUNCTION",
    "GROUP", "INDEX", "LANGUAGE", "LARGE OBJECT", "OPERATOR",
    "ROLE", "SCHEMA", "SERVER", "SEQUENCE", "TABLE",
    "TABLESPACE", "TEXT SEARCH", "TRIGGER", "TYPE",
    "USER", "USER MAPPING FOR", "VIEW",
];

const LIST_ALTER_USER: &[&str] = &[
    "CONNECTION LIMIT", "CREATEDB", "CREATEROLE", "CREATEUSER",
    "ENCRYPTED", "INHERIT", "LOGIN", "NOCREATEDB", "NOCREATEROLE",
    "NOCREATEUSER", "NOINHERIT", "NOLOGIN", "NOREPLICATION",
    "NOSUPERUSER", "RENAME TO", "REPLICATION", "RESET", "SET",
    "SUPERUSER", "UNENCRYPTED", "VALID UNTIL",
];

const LIST_ALTER_TABLE: &[&str] = &[
    "ADD", "ALTER", "CLUSTER ON", "DISABLE", "DROP", "ENABLE", "INHERIT",
    "NO INHERIT", "RENAME", "RESET", "OWNER TO", "SET", "VALIDATE CONSTRAINT",
];

const LIST_TABLE_OPTIONS: &[&str] = &[
    "autovacuum_analyze_scale_factor",
    "autovacuum_analyze_threshold",
    "autovacuum_enabled",
    "autovacuum_freeze_max_age",
    "autovacuum_freeze_min_age",
    "autovacuum_freeze_table_age",
    "autovacuum_vacuum_cost_delay",
    "autovacuum_vacuum_cost_limit",
    "autovacuum_vacuum_scale_factor",
    "autovacuum_vacuum_threshold",
    "fillfactor",
    "toast.autovacuum_enabled",
    "toast.autovacuum_freeze_max_age",
    "toast.autovacuum_freeze_min_age",
    "toast.autovacuum_freeze_table_age",
    "toast.autovacuum_vacuum_cost_delay",
    "toast.autovacuum_vacuum_cost_limit",
    "toast.autovacuum_vacuum_scale_factor",
    "toast.autovacuum_vacuum_threshold",
];

const LIST_COMMENT: &[&str] = &[
    "CAST", "COLLATION", "CONVERSION", "DATABASE", "EXTENSION",
    "FOREIGN DATA WRAPPER", "FOREIGN TABLE",
    "SERVER", "INDEX", "LANGUAGE", "RULE", "SCHEMA", "SEQUENCE",
    "TABLE", "TYPE", "VIEW", "COLUMN", "AGGREGATE", "FUNCTION",
    "OPERATOR", "TRIGGER", "CONSTRAINT", "DOMAIN", "LARGE OBJECT",
    "TABLESPACE", "TEXT SEARCH", "ROLE",
];

const LIST_CREATE_ROLE: &[&str] = &[
    "ADMIN", "CONNECTION LIMIT", "CREATEDB", "CREATEROLE", "CREATEUSER",
    "ENCRYPTED", "IN", "INHERIT", "LOGIN", "NOCREATEDB",
    "NOCREATEROLE", "NOCREATEUSER", "NOINHERIT", "NOLOGIN",
    "NOREPLICATION", "NOSUPERUSER", "REPLICATION", "ROLE",
    "SUPERUSER", "SYSID", "UNENCRYPTED", "VALID UNTIL",
];

const LIST_PRIVILEGES: &[&str] = &[
    "SELECT", "INSERT", "UPDATE", "DELETE", "TRUNCATE", "REFERENCES",
    "TRIGGER", "CREATE", "CONNECT", "TEMPORARY", "EXECUTE", "USAGE", "ALL",
];

const LIST_LOCK_MODES: &[&str] = &[
    "ACCESS SHARE MODE",
    "ROW SHARE MODE", "ROW EXCLUSIVE MODE",
    "SHARE UPDATE EXCLUSIVE MODE", "SHARE MODE",
    "SHARE ROW EXCLUSIVE MODE",
    "EXCLUSIVE MODE", "ACCESS EXCLUSIVE MODE",
];

const LIST_SECURITY_LABEL_TARGETS: &[&str] = &[
    "LANGUAGE", "SCHEMA", "SEQUENCE", "TABLE", "TYPE", "VIEW", "COLUMN",
    "AGGREGATE", "FUNCTION", "DOMAIN", "LARGE OBJECT",
];

const LIST_DATESTYLE: &[&str] = &[
    "ISO", "SQL", "Postgres", "German",
    "YMD", "DMY", "MDY",
    "US", "European", "NonEuropean",
    "DEFAULT",
];

const LIST_PSET: &[&str] = &[
    "format", "border", "expanded",
    "null", "fieldsep", "tuples_only", "title", "tableattr",
    "linestyle", "pager", "recordsep",
];

const LIST_TEXT_SEARCH: &[&str] = &["CONFIGURATION", "DICTIONARY", "PARSER", "TEMPLATE"];
const LIST_EXPLAINABLE: &[&str] = &["SELECT", "INSERT", "DELETE", "UPDATE", "DECLARE"];
const LIST_OWNER_RENAME_SCHEMA: &[&str] = &["OWNER TO", "RENAME TO", "SET SCHEMA"];
const LIST_OWNER_RENAME: &[&str] = &["OWNER TO", "RENAME TO"];
const LIST_RULE_EVENTS: &[&str] = &["SELECT", "UPDATE", "INSERT", "DELETE"];

const GRANT_TARGETS: &str = concat!(
    " UNION SELECT 'DATABASE'",
    " UNION SELECT 'DOMAIN'",
    " UNION SELECT 'FOREIGN DATA WRAPPER'",
    " UNION SELECT 'FOREIGN SERVER'",
    " UNION SELECT 'FUNCTION'",
    " UNION SELECT 'LANGUAGE'",
    " UNION SELECT 'LARGE OBJECT'",
    " UNION SELECT 'SCHEMA'",
    " UNION SELECT 'TABLESPACE'",
    " UNION SELECT 'TYPE'"
);

const COPY: &[&str] = &["COPY", "\\copy", "BINARY"];
const ROLE_KINDS: &[&str] = &["ROLE", "GROUP", "USER"];
const TRANSACTION_STARTS: &[&str] = &["SET", "BEGIN", "START"];

/// True when the words at `index` and `index + 1` read `USER MAPPING` backwards
fn is_user_mapping(w: &ContextWords, index: usize) -> bool {
    w.is(index + 1, "USER") && w.is(index, "MAPPING")
}

/// The rule table, in priority order
pub(crate) static RULES: &[Rule] = &[
    /* ========================= CREATE / DROP / ALTER ========================= */
    rule!(|w| w.is(0, "CREATE") => Create),
    rule!(|w| w.is(0, "DROP") && w.is_empty(1) => Drop),
    rule!(|w| w.is(0, "ALTER") && !w.is(2, "TABLE") => List(LIST_ALTER)),
    rule!(|w| w.is(2, "ALTER") && w.is_any(1, &["AGGREGATE", "FUNCTION"]) => Const("(")),
    rule!(|w| w.is(3, "ALTER") && w.is_any(2, &["AGGREGATE", "FUNCTION"]) && w.ends_with(0, ')')
        => List(LIST_OWNER_RENAME_SCHEMA)),
    rule!(|w| w.is(3, "ALTER") && w.is_any(2, &["AGGREGATE", "FUNCTION"]) => Arguments(1)),
    rule!(|w| w.is(2, "ALTER") && w.is(1, "SCHEMA") => List(LIST_OWNER_RENAME)),
    rule!(|w| w.is(2, "ALTER") && w.is_any(1, &["COLLATION", "CONVERSION"])
        => List(LIST_OWNER_RENAME_SCHEMA)),
    rule!(|w| w.is(2, "ALTER") && w.is(1, "DATABASE")
        => List(&["RESET", "SET", "OWNER TO", "RENAME TO", "CONNECTION LIMIT"])),
    rule!(|w| w.is(2, "ALTER") && w.is(1, "EXTENSION")
        => List(&["ADD", "DROP", "UPDATE", "SET SCHEMA"])),
    rule!(|w| w.is(1, "ALTER") && w.is(0, "FOREIGN") => List(&["DATA WRAPPER", "TABLE"])),
    rule!(|w| w.is(4, "ALTER") && w.is(3, "FOREIGN") && w.is(2, "DATA") && w.is(1, "WRAPPER")
        => List(&["HANDLER", "VALIDATOR", "OPTIONS", "OWNER TO"])),
    rule!(|w| w.is(3, "ALTER") && w.is(2, "FOREIGN") && w.is(1, "TABLE")
        => List(&["ALTER", "DROP", "RENAME", "OWNER TO", "SET SCHEMA"])),

    // ALTER INDEX
    rule!(|w| w.is(2, "ALTER") && w.is(1, "INDEX")
        => List(&["OWNER TO", "RENAME TO", "SET", "RESET"])),
    rule!(|w| w.is(3, "ALTER") && w.is(2, "INDEX") && w.is(0, "SET") => List(&["(", "TABLESPACE"])),
    rule!(|w| w.is(3, "ALTER") && w.is(2, "INDEX") && w.is(0, "RESET") => Const("(")),
    rule!(|w| w.is(4, "ALTER") && w.is(3, "INDEX") && w.is_any(1, &["SET", "RESET"]) && w.is(0, "(")
        => List(&["fillfactor", "fastupdate"])),

    rule!(|w| w.is(2, "ALTER") && w.is(1, "LANGUAGE") => List(LIST_OWNER_RENAME)),
    rule!(|w| w.is(3, "ALTER") && w.is(2, "LARGE") && w.is(1, "OBJECT") => List(&["OWNER TO"])),

    // ALTER USER / ROLE
    rule!(|w| w.is(2, "ALTER") && !is_user_mapping(w, 0) && w.is_any(1, &["USER", "ROLE"])
        => List(LIST_ALTER_USER)),
    rule!(|w| w.is(3, "ALTER") && w.is_any(2, &["ROLE", "USER"])
        && w.is_any(0, &["ENCRYPTED", "UNENCRYPTED"]) => Const("PASSWORD")),

    // ALTER DEFAULT PRIVILEGES
    rule!(|w| w.is(2, "ALTER") && w.is(1, "DEFAULT") && w.is(0, "PRIVILEGES")
        => List(&["FOR ROLE", "FOR USER", "IN SCHEMA"])),
    rule!(|w| w.is(3, "ALTER") && w.is(2, "DEFAULT") && w.is(1, "PRIVILEGES") && w.is(0, "FOR")
        => List(&["ROLE", "USER"])),
    rule!(|w| w.is(4, "DEFAULT") && w.is(3, "PRIVILEGES") && w.is_any(2, &["FOR", "IN"])
        => List(&["GRANT", "REVOKE"])),

    // ALTER DOMAIN
    rule!(|w| w.is(2, "ALTER") && w.is(1, "DOMAIN") => List(&["ADD", "DROP", "OWNER TO", "SET"])),
    rule!(|w| w.is(3, "ALTER") && w.is(2, "DOMAIN") && w.is(0, "DROP")
        => List(&["CONSTRAINT", "DEFAULT", "NOT NULL"])),
    rule!(|w| w.is(3, "ALTER") && w.is(2, "DOMAIN") && w.is(0, "SET")
        => List(&["DEFAULT", "NOT NULL", "SCHEMA"])),

    // ALTER SEQUENCE
    rule!(|w| w.is(2, "ALTER") && w.is(1, "SEQUENCE") => List(&[
        "INCREMENT", "MINVALUE", "MAXVALUE", "RESTART", "NO", "CACHE", "CYCLE",
        "SET SCHEMA", "OWNED BY", "OWNER TO", "RENAME TO",
    ])),
    rule!(|w| w.is(3, "ALTER") && w.is(2, "SEQUENCE") && w.is(0, "NO")
        => List(&["MINVALUE", "MAXVALUE", "CYCLE"])),

    rule!(|w| w.is(2, "ALTER") && w.is(1, "SERVER") => List(&["VERSION", "OPTIONS", "OWNER TO"])),
    rule!(|w| w.is(2, "ALTER") && w.is(1, "VIEW")
        => List(&["ALTER COLUMN", "OWNER TO", "RENAME TO", "SET SCHEMA"])),

    // ALTER TRIGGER
    rule!(|w| w.is(2, "ALTER") && w.is(1, "TRIGGER") => Const("ON")),
    rule!(|w| w.is(3, "ALTER") && w.is(2, "TRIGGER") => QueryWith(catalog::TABLES_FOR_TRIGGER, 1)),
    // Shadowed by the rule above; kept to preserve the table order
    rule!(|w| w.is(3, "ALTER") && w.is(2, "TRIGGER") && w.is(0, "ON") => Schema(&catalog::TABLES, None)),
    rule!(|w| w.is(3, "TRIGGER") && w.is(1, "ON") => Const("RENAME TO")),

    /* ========================= ALTER TABLE ========================= */
    rule!(|w| w.is(2, "ALTER") && w.is(1, "TABLE") => List(LIST_ALTER_TABLE)),
    rule!(|w| w.is(3, "ALTER") && w.is(2, "TABLE") && w.is(0, "ENABLE")
        => List(&["ALWAYS", "REPLICA", "RULE", "TRIGGER"])),
    rule!(|w| w.is(3, "TABLE") && w.is(1, "ENABLE") && w.is_any(0, &["REPLICA", "ALWAYS"])
        => List(&["RULE", "TRIGGER"])),
    rule!(|w| w.is(3, "ALTER") && w.is(2, "TABLE") && w.is(0, "DISABLE") => List(&["RULE", "TRIGGER"])),
    rule!(|w| w.is(2, "TABLE") && w.is_any(0, &["ALTER", "RENAME"])
        => Attributes(1, " UNION SELECT 'COLUMN'")),
    rule!(|w| w.is(3, "TABLE") && w.is_any(1, &["ALTER", "RENAME"]) && w.is(0, "COLUMN")
        => Attributes(2, "")),
    rule!(|w| w.is(3, "TABLE") && w.is(1, "RENAME") && !w.is(0, "TO") => Const("TO")),
    rule!(|w| w.is(4, "TABLE") && w.is(2, "RENAME") && w.is(1, "COLUMN") && !w.is(0, "TO")
        => Const("TO")),
    rule!(|w| w.is(2, "TABLE") && w.is(0, "DROP") => List(&["COLUMN", "CONSTRAINT"])),
    rule!(|w| w.is(3, "TABLE") && w.is(1, "DROP") && w.is(0, "COLUMN") => Attributes(2, "")),

    // ALTER [TABLE x] ALTER [COLUMN] y
    rule!(|w| (w.is(2, "ALTER") && w.is(1, "COLUMN")) || (w.is(3, "TABLE") && w.is(1, "ALTER"))
        => List(&["TYPE", "SET", "RESET", "DROP"])),
    rule!(|w| ((w.is(3, "ALTER") && w.is(2, "COLUMN")) || (w.is(4, "TABLE") && w.is(2, "ALTER")))
        && w.is(0, "SET") => List(&["(", "DEFAULT", "NOT NULL", "STATISTICS", "STORAGE"])),
    rule!(|w| ((w.is(4, "ALTER") && w.is(3, "COLUMN")) || w.is(3, "ALTER"))
        && w.is(1, "SET") && w.is(0, "(") => List(&["n_distinct", "n_distinct_inherited"])),
    rule!(|w| ((w.is(4, "ALTER") && w.is(3, "COLUMN")) || w.is(3, "ALTER"))
        && w.is(1, "SET") && w.is(0, "STORAGE") => List(&["PLAIN", "EXTERNAL", "EXTENDED", "MAIN"])),
    rule!(|w| ((w.is(3, "ALTER") && w.is(2, "COLUMN")) || (w.is(4, "TABLE") && w.is(2, "ALTER")))
        && w.is(0, "DROP") => List(&["DEFAULT", "NOT NULL"])),

    rule!(|w| w.is(2, "TABLE") && w.is(0, "CLUSTER") => Const("ON")),
    rule!(|w| w.is(3, "TABLE") && w.is(1, "CLUSTER") && w.is(0, "ON")
        => QueryWith(catalog::INDEX_OF_TABLE, 2)),
    rule!(|w| w.is(2, "TABLE") && w.is(0, "SET") => List(&["(", "WITHOUT", "TABLESPACE", "SCHEMA"])),
    rule!(|w| w.is(3, "TABLE") && w.is(1, "SET") && w.is(0, "TABLESPACE") => Query(catalog::TABLESPACES)),
    rule!(|w| w.is(3, "TABLE") && w.is(1, "SET") && w.is(0, "WITHOUT") => List(&["CLUSTER", "OIDS"])),
    rule!(|w| w.is(2, "TABLE") && w.is(0, "RESET") => Const("(")),
    rule!(|w| w.is(3, "TABLE") && w.is_any(1, &["SET", "RESET"]) && w.is(0, "(")
        => List(LIST_TABLE_OPTIONS)),

    /* ========================= ALTER TABLESPACE / TEXT SEARCH / TYPE / GROUP ========================= */
    rule!(|w| w.is(2, "ALTER") && w.is(1, "TABLESPACE")
        => List(&["RENAME TO", "OWNER TO", "SET", "RESET"])),
    rule!(|w| w.is(3, "ALTER") && w.is(2, "TABLESPACE") && w.is_any(0, &["SET", "RESET"]) => Const("(")),
    rule!(|w| w.is(4, "ALTER") && w.is(3, "TABLESPACE") && w.is_any(1, &["SET", "RESET"]) && w.is(0, "(")
        => List(&["seq_page_cost", "random_page_cost"])),
    rule!(|w| w.is(2, "ALTER") && w.is(1, "TEXT") && w.is(0, "SEARCH") => List(LIST_TEXT_SEARCH)),
    rule!(|w| w.is(4, "ALTER") && w.is(3, "TEXT") && w.is(2, "SEARCH") && w.is_any(1, &["TEMPLATE", "PARSER"])
        => List(&["RENAME TO", "SET SCHEMA"])),
    rule!(|w| w.is(4, "ALTER") && w.is(3, "TEXT") && w.is(2, "SEARCH") && w.is(1, "DICTIONARY")
        => List(LIST_OWNER_RENAME_SCHEMA)),
    rule!(|w| w.is(4, "ALTER") && w.is(3, "TEXT") && w.is(2, "SEARCH") && w.is(1, "CONFIGURATION")
        => List(&["ADD MAPPING FOR", "ALTER MAPPING", "DROP MAPPING FOR", "OWNER TO", "RENAME TO", "SET SCHEMA"])),
    rule!(|w| w.is(2, "ALTER") && w.is(1, "TYPE") => List(&[
        "ADD ATTRIBUTE", "ADD VALUE", "ALTER ATTRIBUTE", "DROP ATTRIBUTE",
        "OWNER TO", "RENAME", "SET SCHEMA",
    ])),
    rule!(|w| w.is(3, "ALTER") && w.is(2, "TYPE") && w.is(0, "ADD") => List(&["ATTRIBUTE", "VALUE"])),
    rule!(|w| w.is(3, "ALTER") && w.is(2, "TYPE") && w.is(0, "RENAME") => List(&["ATTRIBUTE", "TO"])),
    rule!(|w| w.is(4, "TYPE") && w.is(2, "RENAME") && w.is(1, "ATTRIBUTE") => Const("TO")),
    rule!(|w| w.is(3, "TYPE") && w.is_any(1, &["ALTER", "DROP", "RENAME"]) && w.is(0, "ATTRIBUTE")
        => Attributes(2, "")),
    rule!(|w| w.is(2, "ALTER") && w.is(1, "ATTRIBUTE") => Const("TYPE")),
    rule!(|w| w.is(2, "ALTER") && w.is(1, "GROUP") => List(&["ADD USER", "DROP USER", "RENAME TO"])),
    rule!(|w| w.is(3, "ALTER") && w.is(2, "GROUP") && w.is_any(0, &["ADD", "DROP"]) => Const("USER")),
    rule!(|w| w.is(3, "GROUP") && w.is_any(1, &["ADD", "DROP"]) && w.is(0, "USER") => Query(catalog::ROLES)),

    /* ========================= Transactions / CLUSTER / COMMENT ========================= */
    rule!(|w| w.is_any(0, &["BEGIN", "END", "ABORT"]) => List(&["WORK", "TRANSACTION"])),
    rule!(|w| w.is(0, "COMMIT") => List(&["WORK", "TRANSACTION", "PREPARED"])),
    rule!(|w| w.is(0, "RELEASE") => Const("SAVEPOINT")),
    rule!(|w| w.is(0, "ROLLBACK") => List(&["WORK", "TRANSACTION", "TO SAVEPOINT", "PREPARED"])),
    rule!(|w| w.is(0, "CLUSTER") && !w.is(1, "WITHOUT") => Schema(&catalog::TABLES, None)),
    rule!(|w| w.is(1, "CLUSTER") && !w.is(0, "ON") => Const("USING")),
    rule!(|w| w.is(2, "CLUSTER") && w.is(0, "USING") => QueryWith(catalog::INDEX_OF_TABLE, 1)),
    rule!(|w| w.is(0, "COMMENT") => Const("ON")),
    rule!(|w| w.is(1, "COMMENT") && w.is(0, "ON") => List(LIST_COMMENT)),
    rule!(|w| w.is(2, "COMMENT") && w.is(1, "ON") && w.is(0, "FOREIGN") => List(&["DATA WRAPPER", "TABLE"])),
    rule!(|w| w.is(3, "COMMENT") && w.is(2, "ON") && w.is(1, "TEXT") && w.is(0, "SEARCH")
        => List(LIST_TEXT_SEARCH)),
    rule!(|w| (w.is(3, "COMMENT") && w.is(2, "ON"))
        || (w.is(4, "COMMENT") && w.is(3, "ON"))
        || (w.is(5, "COMMENT") && w.is(4, "ON")) => Const("IS")),

    /* ========================= COPY ========================= */
    rule!(|w| w.is(0, "COPY") || w.is(0, "\\copy") || (w.is(1, "COPY") && w.is(0, "BINARY"))
        => Schema(&catalog::TABLES, None)),
    rule!(|w| w.is_any(1, COPY) => List(&["FROM", "TO"])),
    rule!(|w| w.is_any(2, COPY) && w.is_any(0, &["FROM", "TO"]) => Filenames),
    rule!(|w| w.is_any(3, COPY) && w.is_any(1, &["FROM", "TO"])
        => List(&["BINARY", "OIDS", "DELIMITER", "NULL", "CSV", "ENCODING"])),
    rule!(|w| w.is(0, "CSV") && w.is_any(2, &["FROM", "TO"])
        => List(&["HEADER", "QUOTE", "ESCAPE", "FORCE QUOTE", "FORCE NOT NULL"])),

    /* ========================= CREATE ... ========================= */
    rule!(|w| w.is(2, "CREATE") && w.is(1, "DATABASE")
        => List(&["OWNER", "TEMPLATE", "ENCODING", "TABLESPACE", "CONNECTION LIMIT"])),
    rule!(|w| w.is(3, "CREATE") && w.is(2, "DATABASE") && w.is(0, "TEMPLATE")
        => Query(catalog::TEMPLATE_DATABASES)),
    rule!(|w| w.is(1, "CREATE") && w.is(0, "EXTENSION") => Query(catalog::AVAILABLE_EXTENSIONS)),
    rule!(|w| w.is(2, "CREATE") && w.is(1, "EXTENSION") => Const("WITH SCHEMA")),
    rule!(|w| w.is(1, "CREATE") && w.is(0, "FOREIGN") => List(&["DATA WRAPPER", "TABLE"])),
    rule!(|w| w.is(4, "CREATE") && w.is(3, "FOREIGN") && w.is(2, "DATA") && w.is(1, "WRAPPER")
        => List(&["HANDLER", "VALIDATOR"])),

    // CREATE [UNIQUE] INDEX
    rule!(|w| w.is(1, "CREATE") && w.is(0, "UNIQUE") => Const("INDEX")),
    rule!(|w| w.is(0, "INDEX") && w.is_any(1, &["CREATE", "UNIQUE"])
        => Schema(&catalog::INDEXES, Some(" UNION SELECT 'ON' UNION SELECT 'CONCURRENTLY'"))),
    rule!(|w| (w.is(2, "INDEX") || w.is(1, "INDEX") || w.is(1, "CONCURRENTLY")) && w.is(0, "ON")
        => Schema(&catalog::TABLES, None)),
    rule!(|w| (w.is(2, "INDEX") || w.is(1, "INDEX")) && w.is(0, "CONCURRENTLY") => Const("ON")),
    rule!(|w| w.is_any(2, &["CREATE", "UNIQUE"]) && w.is(1, "INDEX") => List(&["CONCURRENTLY", "ON"])),
    rule!(|w| (w.is(3, "INDEX") || w.is(2, "INDEX") || w.is(2, "CONCURRENTLY")) && w.is(1, "ON")
        => List(&["(", "USING"])),
    rule!(|w| (w.is(4, "INDEX") || w.is(3, "INDEX") || w.is(3, "CONCURRENTLY"))
        && w.is(2, "ON") && w.is(0, "(") => Attributes(1, "")),
    rule!(|w| w.is(4, "ON") && w.is(2, "USING") && w.is(0, "(") => Attributes(3, "")),
    rule!(|w| w.is(0, "USING") => Query(catalog::ACCESS_METHODS)),
    rule!(|w| w.is(3, "ON") && w.is(1, "USING") => Const("(")),

    // CREATE RULE
    rule!(|w| w.is(2, "CREATE") && w.is(1, "RULE") => Const("AS")),
    rule!(|w| w.is(3, "CREATE") && w.is(2, "RULE") && w.is(0, "AS") => Const("ON")),
    rule!(|w| w.is(3, "RULE") && w.is(1, "AS") && w.is(0, "ON") => List(LIST_RULE_EVENTS)),
    rule!(|w| w.is(2, "AS") && w.is(1, "ON")
        && (w.upper_char_at(0, 4) == Some('T') || w.upper_char_at(0, 5) == Some('T')) => Const("TO")),
    rule!(|w| w.is(3, "AS") && w.is(2, "ON") && w.is(0, "TO") => Schema(&catalog::TABLES, None)),

    rule!(|w| w.is(2, "CREATE") && w.is(1, "SERVER") => List(&["TYPE", "VERSION", "FOREIGN DATA WRAPPER"])),
    rule!(|w| w.is(1, "CREATE") && w.is_any(0, &["TEMP", "TEMPORARY"]) => List(&["SEQUENCE", "TABLE", "VIEW"])),
    rule!(|w| w.is(1, "CREATE") && w.is(0, "UNLOGGED") => Const("TABLE")),
    rule!(|w| w.is(2, "CREATE") && w.is(1, "TABLESPACE") => List(&["OWNER", "LOCATION"])),
    rule!(|w| w.is(4, "CREATE") && w.is(3, "TABLESPACE") && w.is(1, "OWNER") => Const("LOCATION")),
    rule!(|w| w.is(2, "CREATE") && w.is(1, "TEXT") && w.is(0, "SEARCH") => List(LIST_TEXT_SEARCH)),
    rule!(|w| w.is(3, "TEXT") && w.is(2, "SEARCH") && w.is(1, "CONFIGURATION") => Const("(")),

    // CREATE TRIGGER
    rule!(|w| w.is(2, "CREATE") && w.is(1, "TRIGGER") => List(&["BEFORE", "AFTER", "INSTEAD OF"])),
    rule!(|w| w.is(3, "CREATE") && w.is(2, "TRIGGER") && w.is_any(0, &["BEFORE", "AFTER"])
        => List(&["INSERT", "DELETE", "UPDATE", "TRUNCATE"])),
    rule!(|w| w.is(4, "CREATE") && w.is(3, "TRIGGER") && w.is(1, "INSTEAD") && w.is(0, "OF")
        => List(&["INSERT", "DELETE", "UPDATE"])),
    rule!(|w| (w.is(4, "CREATE") && w.is(3, "TRIGGER") && w.is_any(1, &["BEFORE", "AFTER"]))
        || (w.is(4, "TRIGGER") && w.is(2, "INSTEAD") && w.is(1, "OF")) => List(&["ON", "OR"])),
    rule!(|w| w.is(4, "TRIGGER") && w.is_any(2, &["BEFORE", "AFTER"]) && w.is(0, "ON")
        => Schema(&catalog::TABLES, None)),
    rule!(|w| w.is(3, "INSTEAD") && w.is(2, "OF") && w.is(0, "ON") => Schema(&catalog::VIEWS, None)),
    rule!(|w| w.is(0, "EXECUTE") && !w.is_empty(1) => Const("PROCEDURE")),

    // CREATE ROLE / USER / GROUP
    rule!(|w| w.is(2, "CREATE") && !is_user_mapping(w, 0) && w.is_any(1, ROLE_KINDS)
        => List(LIST_CREATE_ROLE)),
    rule!(|w| w.is(3, "CREATE") && w.is_any(2, ROLE_KINDS) && w.is_any(0, &["ENCRYPTED", "UNENCRYPTED"])
        => Const("PASSWORD")),
    rule!(|w| w.is(3, "CREATE") && w.is_any(2, ROLE_KINDS) && w.is(0, "IN") => List(&["GROUP", "ROLE"])),

    rule!(|w| w.is(2, "CREATE") && w.is(1, "VIEW") => Const("AS")),
    rule!(|w| w.is(3, "CREATE") && w.is(2, "VIEW") && w.is(0, "AS") => Const("SELECT")),

    /* ========================= DECLARE / DELETE / DISCARD / DO ========================= */
    rule!(|w| w.is(1, "DECLARE") => List(&["BINARY", "INSENSITIVE", "SCROLL", "NO SCROLL", "CURSOR"])),
    rule!(|w| w.is(0, "CURSOR") => List(&["WITH HOLD", "WITHOUT HOLD", "FOR"])),
    rule!(|w| w.is(0, "DELETE") && !w.is_any(1, &["ON", "GRANT", "BEFORE", "AFTER"]) => Const("FROM")),
    rule!(|w| w.is(1, "DELETE") && w.is(0, "FROM") => Schema(&catalog::DELETABLES, None)),
    rule!(|w| w.is(2, "DELETE") && w.is(1, "FROM") => List(&["USING", "WHERE", "SET"])),
    rule!(|w| w.is(0, "DISCARD") => List(&["ALL", "PLANS", "TEMP"])),
    rule!(|w| w.is(0, "DO") => List(&["LANGUAGE"])),

    /* ========================= DROP (not first word) ========================= */
    rule!(|w| w.is(2, "DROP") && w.is(1, "AGGREGATE") => Const("(")),
    rule!(|w| w.is(2, "DROP") && w.is(1, "FUNCTION") => Const("(")),
    rule!(|w| (w.is(2, "DROP") && w.is_any(1, &[
            "COLLATION", "CONVERSION", "DOMAIN", "EXTENSION", "FUNCTION", "INDEX",
            "LANGUAGE", "SCHEMA", "SEQUENCE", "SERVER", "TABLE", "TYPE", "VIEW",
        ]))
        || (w.is(3, "DROP") && w.is(2, "AGGREGATE") && w.ends_with(0, ')'))
        || (w.is(4, "DROP") && w.is(3, "FOREIGN") && w.is(2, "DATA") && w.is(1, "WRAPPER"))
        || (w.is(4, "DROP") && w.is(3, "TEXT") && w.is(2, "SEARCH") && w.is_any(1, LIST_TEXT_SEARCH))
        => List(&["CASCADE", "RESTRICT"])),
    rule!(|w| w.is(1, "DROP") && w.is(0, "FOREIGN") => List(&["DATA WRAPPER", "TABLE"])),
    rule!(|w| w.is(3, "DROP") && w.is_any(2, &["AGGREGATE", "FUNCTION"]) && w.is(0, "(") => Arguments(1)),
    rule!(|w| w.is(1, "DROP") && w.is(0, "OWNED") => Const("BY")),
    rule!(|w| w.is(2, "DROP") && w.is(1, "OWNED") && w.is(0, "BY") => Query(catalog::ROLES)),
    rule!(|w| w.is(2, "DROP") && w.is(1, "TEXT") && w.is(0, "SEARCH") => List(LIST_TEXT_SEARCH)),

    /* ========================= EXECUTE / EXPLAIN / FETCH ========================= */
    rule!(|w| w.is(0, "EXECUTE") && w.is_empty(1) => Query(catalog::PREPARED_STATEMENTS)),
    rule!(|w| w.is(0, "EXPLAIN")
        => List(&["SELECT", "INSERT", "DELETE", "UPDATE", "DECLARE", "ANALYZE", "VERBOSE"])),
    rule!(|w| w.is(1, "EXPLAIN") && w.is(0, "ANALYZE")
        => List(&["SELECT", "INSERT", "DELETE", "UPDATE", "DECLARE", "VERBOSE"])),
    rule!(|w| (w.is(1, "EXPLAIN") && w.is(0, "VERBOSE"))
        || (w.is(2, "EXPLAIN") && w.is(1, "ANALYZE") && w.is(0, "VERBOSE")) => List(LIST_EXPLAINABLE)),
    rule!(|w| w.is_any(0, &["FETCH", "MOVE"]) => List(&["ABSOLUTE", "BACKWARD", "FORWARD", "RELATIVE"])),
    rule!(|w| w.is_any(1, &["FETCH", "MOVE"]) => List(&["ALL", "NEXT", "PRIOR"])),
    rule!(|w| w.is_any(2, &["FETCH", "MOVE"]) => List(&["FROM", "IN"])),

    /* ========================= FOREIGN DATA WRAPPER / FOREIGN TABLE ========================= */
    rule!(|w| !w.is(3, "CREATE") && w.is(2, "FOREIGN") && w.is(1, "DATA") && w.is(0, "WRAPPER")
        => Query(catalog::FDWS)),
    rule!(|w| !w.is(2, "CREATE") && w.is(1, "FOREIGN") && w.is(0, "TABLE")
        => Schema(&catalog::FOREIGN_TABLES, None)),

    /* ========================= GRANT / REVOKE ========================= */
    rule!(|w| w.is_any(0, &["GRANT", "REVOKE"]) => List(LIST_PRIVILEGES)),
    rule!(|w| w.is_any(1, &["GRANT", "REVOKE"]) => Const("ON")),
    rule!(|w| w.is_any(2, &["GRANT", "REVOKE"]) && w.is(0, "ON")
        => Schema(&catalog::TSVF, Some(GRANT_TARGETS))),
    rule!(|w| w.is_any(3, &["GRANT", "REVOKE"]) && w.is(1, "ON") && w.is(0, "FOREIGN")
        => List(&["DATA WRAPPER", "SERVER"])),
    rule!(|w| w.is_any(3, &["GRANT", "REVOKE"]) && w.is(1, "ON") && w.is(0, "DATABASE")
        => Query(catalog::DATABASES)),
    rule!(|w| w.is_any(3, &["GRANT", "REVOKE"]) && w.is(1, "ON") && w.is(0, "DOMAIN")
        => Schema(&catalog::DOMAINS, None)),
    rule!(|w| w.is_any(3, &["GRANT", "REVOKE"]) && w.is(1, "ON") && w.is(0, "FUNCTION")
        => Schema(&catalog::FUNCTIONS, None)),
    rule!(|w| w.is_any(3, &["GRANT", "REVOKE"]) && w.is(1, "ON") && w.is(0, "LANGUAGE")
        => Query(catalog::LANGUAGES)),
    rule!(|w| w.is_any(3, &["GRANT", "REVOKE"]) && w.is(1, "ON") && w.is(0, "SCHEMA")
        => Query(catalog::SCHEMAS)),
    rule!(|w| w.is_any(3, &["GRANT", "REVOKE"]) && w.is(1, "ON") && w.is(0, "TABLESPACE")
        => Query(catalog::TABLESPACES)),
    rule!(|w| w.is_any(3, &["GRANT", "REVOKE"]) && w.is(1, "ON") && w.is(0, "TYPE")
        => Schema(&catalog::DATATYPES, None)),
    rule!(|w| w.is(3, "GRANT") && w.is(1, "ON") => Const("TO")),
    rule!(|w| w.is(3, "REVOKE") && w.is(1, "ON") => Const("FROM")),
    rule!(|w| w.is(4, "GRANT") && w.is(2, "ON") && w.is(0, "TO") => Query(catalog::GRANT_ROLES)),
    rule!(|w| w.is(4, "GRANT") && w.is(2, "ON") => Const("TO")),
    rule!(|w| w.is(4, "REVOKE") && w.is(2, "ON") && w.is(0, "FROM") => Query(catalog::GRANT_ROLES)),
    rule!(|w| w.is(4, "REVOKE") && w.is(2, "ON") => Const("FROM")),

    /* ========================= GROUP BY / INSERT ========================= */
    rule!(|w| w.is(2, "FROM") && w.is(0, "GROUP") => Const("BY")),
    rule!(|w| w.is(0, "INSERT") => Const("INTO")),
    rule!(|w| w.is(1, "INSERT") && w.is(0, "INTO") => Schema(&catalog::INSERTABLES, None)),
    rule!(|w| w.is(3, "INSERT") && w.is(2, "INTO") && w.is(0, "(") => Attributes(1, "")),
    rule!(|w| w.is(2, "INSERT") && w.is(1, "INTO")
        => List(&["(", "DEFAULT VALUES", "SELECT", "TABLE", "VALUES"])),
    rule!(|w| w.is(3, "INSERT") && w.is(2, "INTO") && w.ends_with(0, ')')
        => List(&["SELECT", "TABLE", "VALUES"])),
    rule!(|w| w.is(0, "VALUES") && !w.is(1, "DEFAULT") => Const("(")),

    /* ========================= LOCK ========================= */
    rule!(|w| w.is(0, "LOCK") => Schema(&catalog::TABLES, Some(" UNION SELECT 'TABLE'"))),
    rule!(|w| w.is(0, "TABLE") && w.is(1, "LOCK") => Schema(&catalog::TABLES, Some(""))),
    rule!(|w| (w.is(1, "LOCK") && !w.is(0, "TABLE")) || (w.is(1, "TABLE") && w.is(2, "LOCK"))
        => Const("IN")),
    rule!(|w| w.is(0, "IN") && (w.is(2, "LOCK") || (w.is(2, "TABLE") && w.is(3, "LOCK")))
        => List(LIST_LOCK_MODES)),

    /* ========================= NOTIFY / OPTIONS / OWNER / ORDER BY / PREPARE / REASSIGN ========================= */
    rule!(|w| w.is(0, "NOTIFY") => Query(catalog::LISTENING_CHANNELS)),
    rule!(|w| w.is(0, "OPTIONS") => Const("(")),
    rule!(|w| w.is(1, "OWNER") && w.is(0, "TO") => Query(catalog::ROLES)),
    rule!(|w| w.is(2, "FROM") && w.is(0, "ORDER") => Const("BY")),
    rule!(|w| w.is(3, "FROM") && w.is(1, "ORDER") && w.is(0, "BY") => Attributes(2, "")),
    rule!(|w| w.is(0, "AS") && w.is(2, "PREPARE") => List(LIST_RULE_EVENTS)),
    rule!(|w| w.is(0, "REASSIGN") => Const("OWNED")),
    rule!(|w| w.is(0, "OWNED") && w.is(1, "REASSIGN") => Const("BY")),
    rule!(|w| w.is(0, "BY") && w.is(1, "OWNED") && w.is(2, "REASSIGN") => Query(catalog::ROLES)),
    rule!(|w| w.is(1, "BY") && w.is(2, "OWNED") && w.is(3, "REASSIGN") => Const("TO")),
    rule!(|w| w.is(0, "TO") && w.is(2, "BY") && w.is(3, "OWNED") && w.is(4, "REASSIGN")
        => Query(catalog::ROLES)),

    /* ========================= REINDEX / SECURITY LABEL ========================= */
    rule!(|w| w.is(0, "REINDEX") => List(&["TABLE", "INDEX", "SYSTEM", "DATABASE"])),
    rule!(|w| w.is(1, "REINDEX") && w.is(0, "TABLE") => Schema(&catalog::TABLES, None)),
    rule!(|w| w.is(1, "REINDEX") && w.is(0, "INDEX") => Schema(&catalog::INDEXES, None)),
    rule!(|w| w.is(1, "REINDEX") && w.is_any(0, &["SYSTEM", "DATABASE"]) => Query(catalog::DATABASES)),
    rule!(|w| w.is(1, "REINDEX") => Nothing),
    rule!(|w| w.is(0, "SECURITY") => Const("LABEL")),
    rule!(|w| w.is(1, "SECURITY") && w.is(0, "LABEL") => List(&["ON", "FOR"])),
    rule!(|w| w.is(3, "SECURITY") && w.is(2, "LABEL") && w.is(1, "FOR") => Const("ON")),
    rule!(|w| (w.is(2, "SECURITY") && w.is(1, "LABEL") && w.is(0, "ON"))
        || (w.is(4, "SECURITY") && w.is(3, "LABEL") && w.is(2, "FOR") && w.is(0, "ON"))
        => List(LIST_SECURITY_LABEL_TARGETS)),
    rule!(|w| w.is(4, "SECURITY") && w.is(3, "LABEL") && w.is(2, "ON") => Const("IS")),

    /* ========================= SET / RESET / SHOW ========================= */
    rule!(|w| (w.is(0, "SET") && !w.is(2, "UPDATE")) || w.is(0, "RESET") => Query(catalog::SET_VARS)),
    rule!(|w| w.is(0, "SHOW") => Query(catalog::SHOW_VARS)),
    rule!(|w| (w.is(1, "SET") && w.is(0, "TRANSACTION"))
        || (w.is(1, "START") && w.is(0, "TRANSACTION"))
        || (w.is(1, "BEGIN") && w.is(0, "WORK"))
        || (w.is(1, "BEGIN") && w.is(0, "TRANSACTION"))
        || (w.is(3, "SESSION") && w.is(2, "CHARACTERISTICS") && w.is(1, "AS") && w.is(0, "TRANSACTION"))
        => List(&["ISOLATION LEVEL", "READ"])),
    rule!(|w| (w.is_any(2, TRANSACTION_STARTS) || (w.is(3, "CHARACTERISTICS") && w.is(2, "AS")))
        && w.is_any(1, &["TRANSACTION", "WORK"]) && w.is(0, "ISOLATION") => Const("LEVEL")),
    rule!(|w| w.is_any(3, &["SET", "BEGIN", "START", "AS"]) && w.is_any(2, &["TRANSACTION", "WORK"])
        && w.is(1, "ISOLATION") && w.is(0, "LEVEL") => List(&["READ", "REPEATABLE", "SERIALIZABLE"])),
    rule!(|w| w.is_any(3, &["TRANSACTION", "WORK"]) && w.is(2, "ISOLATION") && w.is(1, "LEVEL")
        && w.is(0, "READ") => List(&["UNCOMMITTED", "COMMITTED"])),
    rule!(|w| w.is_any(3, &["TRANSACTION", "WORK"]) && w.is(2, "ISOLATION") && w.is(1, "LEVEL")
        && w.is(0, "REPEATABLE") => Const("READ")),
    rule!(|w| w.is_any(2, &["SET", "BEGIN", "START", "AS"]) && w.is_any(1, &["TRANSACTION", "WORK"])
        && w.is(0, "READ") => List(&["ONLY", "WRITE"])),
    rule!(|w| w.is(2, "SET") && w.is(1, "CONSTRAINTS") => List(&["DEFERRED", "IMMEDIATE"])),
    rule!(|w| w.is(1, "SET") && w.is(0, "ROLE") => Query(catalog::ROLES)),
    rule!(|w| w.is(1, "SET") && w.is(0, "SESSION")
        => List(&["AUTHORIZATION", "CHARACTERISTICS AS TRANSACTION"])),
    rule!(|w| w.is(2, "SET") && w.is(1, "SESSION") && w.is(0, "AUTHORIZATION")
        => Query(catalog::ROLES_OR_DEFAULT)),
    rule!(|w| w.is(1, "RESET") && w.is(0, "SESSION") => Const("AUTHORIZATION")),
    rule!(|w| w.is(1, "SET") && !w.is(3, "UPDATE") && !w.is_any(0, &["TABLESPACE", "SCHEMA"])
        && !w.ends_with(0, ')') && !w.is(3, "DOMAIN") => Const("TO")),
    rule!(|w| w.is(2, "SET") && (w.is(0, "TO") || w.equals(0, "=")) && w.is(1, "DateStyle")
        => List(LIST_DATESTYLE)),
    rule!(|w| w.is(2, "SET") && (w.is(0, "TO") || w.equals(0, "=")) && w.is(1, "IntervalStyle")
        => List(&["postgres", "postgres_verbose", "sql_standard", "iso_8601"])),
    rule!(|w| w.is(2, "SET") && (w.is(0, "TO") || w.equals(0, "=")) && w.is(1, "GEQO")
        => List(&["ON", "OFF", "DEFAULT"])),
    rule!(|w| w.is(2, "SET") && (w.is(0, "TO") || w.equals(0, "=")) => List(&["DEFAULT"])),

    /* ========================= START / TABLE / TRUNCATE / UNLISTEN / UPDATE ========================= */
    rule!(|w| w.is(0, "START") => Const("TRANSACTION")),
    rule!(|w| w.is(0, "TABLE") && w.is_empty(1) => Schema(&catalog::RELATIONS, None)),
    rule!(|w| w.is(0, "TRUNCATE") => Schema(&catalog::TABLES, None)),
    rule!(|w| w.is(0, "UNLISTEN") => Query(catalog::LISTENING_CHANNELS_OR_ALL)),
    rule!(|w| w.is(0, "UPDATE") => Schema(&catalog::UPDATABLES, None)),
    rule!(|w| w.is(1, "UPDATE") => Const("SET")),
    rule!(|w| w.is(0, "SET") => Attributes(1, "")),
    rule!(|w| w.is(1, "SET") && w.is(3, "UPDATE") => Const("=")),

    /* ========================= USER MAPPING ========================= */
    rule!(|w| w.is_any(2, &["ALTER", "CREATE", "DROP"]) && is_user_mapping(w, 0) => Const("FOR")),
    rule!(|w| w.is(3, "CREATE") && is_user_mapping(w, 1) && w.is(0, "FOR")
        => Query(catalog::USER_MAPPING_ROLES)),
    rule!(|w| w.is_any(3, &["ALTER", "DROP"]) && is_user_mapping(w, 1) && w.is(0, "FOR")
        => Query(catalog::USER_MAPPINGS)),
    rule!(|w| w.is_any(4, &["CREATE", "ALTER", "DROP"]) && is_user_mapping(w, 2) && w.is(1, "FOR")
        => Const("SERVER")),

    /* ========================= VACUUM / WITH / ANALYZE / WHERE / FROM / JOIN ========================= */
    rule!(|w| w.is(0, "VACUUM") => Schema(&catalog::TABLES, Some(concat!(
        " UNION SELECT 'FULL'",
        " UNION SELECT 'FREEZE'",
        " UNION SELECT 'ANALYZE'",
        " UNION SELECT 'VERBOSE'"
    )))),
    rule!(|w| w.is(1, "VACUUM") && w.is_any(0, &["FULL", "FREEZE"])
        => Schema(&catalog::TABLES, Some(" UNION SELECT 'ANALYZE' UNION SELECT 'VERBOSE'"))),
    rule!(|w| w.is(2, "VACUUM") && w.is(0, "ANALYZE") && w.is_any(1, &["FULL", "FREEZE"])
        => Schema(&catalog::TABLES, Some(" UNION SELECT 'VERBOSE'"))),
    rule!(|w| w.is(2, "VACUUM") && w.is(0, "VERBOSE") && w.is_any(1, &["FULL", "FREEZE"])
        => Schema(&catalog::TABLES, Some(" UNION SELECT 'ANALYZE'"))),
    rule!(|w| w.is(1, "VACUUM") && w.is(0, "VERBOSE")
        => Schema(&catalog::TABLES, Some(" UNION SELECT 'ANALYZE'"))),
    rule!(|w| w.is(1, "VACUUM") && w.is(0, "ANALYZE")
        => Schema(&catalog::TABLES, Some(" UNION SELECT 'VERBOSE'"))),
    rule!(|w| (w.is(0, "ANALYZE") && w.is(1, "VERBOSE")) || (w.is(0, "VERBOSE") && w.is(1, "ANALYZE"))
        => Schema(&catalog::TABLES, None)),
    rule!(|w| w.is(0, "WITH") => Const("RECURSIVE")),
    rule!(|w| w.is(0, "ANALYZE") => Schema(&catalog::TABLES, None)),
    rule!(|w| w.is(0, "WHERE") => Attributes(1, "")),
    rule!(|w| w.is(0, "FROM") && !w.is(2, "COPY") && !w.is(2, "\\copy") => Schema(&catalog::TSVF, None)),
    rule!(|w| w.is(0, "JOIN") => Schema(&catalog::TSVF, None)),

    /* ========================= Backslash commands ========================= */
    rule!(|w| w.equals(0, "\\connect") || w.equals(0, "\\c") => Query(catalog::DATABASES)),
    rule!(|w| w.starts_with(0, "\\da") => Schema(&catalog::AGGREGATES, None)),
    rule!(|w| w.starts_with(0, "\\db") => Query(catalog::TABLESPACES)),
    rule!(|w| w.starts_with(0, "\\dD") => Schema(&catalog::DOMAINS, None)),
    rule!(|w| w.starts_with(0, "\\des") => Query(catalog::SERVERS)),
    rule!(|w| w.starts_with(0, "\\deu") => Query(catalog::USER_MAPPINGS)),
    rule!(|w| w.starts_with(0, "\\dew") => Query(catalog::FDWS)),
    rule!(|w| w.starts_with(0, "\\df") => Schema(&catalog::FUNCTIONS, None)),
    rule!(|w| w.starts_with(0, "\\dFd") => Query(catalog::TS_DICTIONARIES)),
    rule!(|w| w.starts_with(0, "\\dFp") => Query(catalog::TS_PARSERS)),
    rule!(|w| w.starts_with(0, "\\dFt") => Query(catalog::TS_TEMPLATES)),
    rule!(|w| w.starts_with(0, "\\dF") => Query(catalog::TS_CONFIGURATIONS)),
    rule!(|w| w.starts_with(0, "\\di") => Schema(&catalog::INDEXES, None)),
    rule!(|w| w.starts_with(0, "\\dL") => Query(catalog::LANGUAGES)),
    rule!(|w| w.starts_with(0, "\\dn") => Query(catalog::SCHEMAS)),
    rule!(|w| w.starts_with(0, "\\dp") || w.starts_with(0, "\\z") => Schema(&catalog::TSVF, None)),
    rule!(|w| w.starts_with(0, "\\ds") => Schema(&catalog::SEQUENCES, None)),
    rule!(|w| w.starts_with(0, "\\dt") => Schema(&catalog::TABLES, None)),
    rule!(|w| w.starts_with(0, "\\dT") => Schema(&catalog::DATATYPES, None)),
    rule!(|w| w.starts_with(0, "\\du") || w.starts_with(0, "\\dg") => Query(catalog::ROLES)),
    rule!(|w| w.starts_with(0, "\\dv") => Schema(&catalog::VIEWS, None)),
    rule!(|w| w.starts_with(0, "\\d") => Schema(&catalog::RELATIONS, None)),
    rule!(|w| w.equals(0, "\\ef") => Schema(&catalog::FUNCTIONS, None)),
    rule!(|w| w.equals(0, "\\encoding") => Query(catalog::ENCODINGS)),
    rule!(|w| w.equals(0, "\\h") || w.equals(0, "\\help") => List(catalog::SQL_COMMANDS)),
    rule!(|w| w.equals(0, "\\password") => Query(catalog::ROLES)),
    rule!(|w| w.equals(0, "\\pset") => List(LIST_PSET)),
    rule!(|w| w.equals(1, "\\pset") && w.equals(0, "format")
        => List(&["unaligned", "aligned", "wrapped", "html", "latex", "troff-ms"])),
    rule!(|w| w.equals(1, "\\pset") && w.equals(0, "linestyle") => List(&["ascii", "old-ascii", "unicode"])),
    rule!(|w| w.equals(1, "\\pset") => Nothing),
    rule!(|w| w.equals(0, "\\set") => Variables),
    rule!(|w| w.equals(0, "\\sf") || w.equals(0, "\\sf+") => Schema(&catalog::FUNCTIONS, None)),
    rule!(|w| [
            "\\cd", "\\e", "\\edit", "\\g", "\\i", "\\include", "\\ir", "\\include_relative",
            "\\o", "\\out", "\\s", "\\w", "\\write",
        ]
        .iter()
        .any(|command| w.equals(0, command)) => Filenames),
];
