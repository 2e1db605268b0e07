//! Catalog data for completion
//!
//! Schema query descriptors, catalog query templates and the keyword tables
//! consulted by the dispatcher.
//!
//! Query templates use `%d` for the length of the typed text and `%s` for
//! escaped strings. The first `%s` receives the typed text, the second and
//! third the first info string, the fourth and fifth the second info string.

use super::context::SchemaQuery;

/* ========================= Schema queries ========================= */

pub static AGGREGATES: SchemaQuery = SchemaQuery {
    catalog: "pg_catalog.pg_proc p",
    selection: Some("p.proisagg"),
    visibility: "pg_catalog.pg_function_is_visible(p.oid)",
    namespace: "p.pronamespace",
    result: "pg_catalog.quote_ident(p.proname)",
    qualified_result: None,
};

/// Ignores table rowtypes and array types
pub static DATATYPES: SchemaQuery = SchemaQuery {
    catalog: "pg_catalog.pg_type t",
    selection: Some(concat!(
        "(t.typrelid = 0 ",
        " OR (SELECT c.relkind = 'c' FROM pg_catalog.pg_class c WHERE c.oid = t.typrelid)) ",
        "AND t.typname !~ '^_'"
    )),
    visibility: "pg_catalog.pg_type_is_visible(t.oid)",
    namespace: "t.typnamespace",
    result: "pg_catalog.format_type(t.oid, NULL)",
    qualified_result: Some("pg_catalog.quote_ident(t.typname)"),
};

pub static DOMAINS: SchemaQuery = SchemaQuery {
    catalog: "pg_catalog.pg_type t",
    selection: Some("t.typtype = 'd'"),
    visibility: "pg_catalog.pg_type_is_visible(t.oid)",
    namespace: "t.typnamespace",
    result: "pg_catalog.quote_ident(t.typname)",
    qualified_result: None,
};

pub static FUNCTIONS: SchemaQuery = SchemaQuery {
    catalog: "pg_catalog.pg_proc p",
    selection: None,
    visibility: "pg_catalog.pg_function_is_visible(p.oid)",
    namespace: "p.pronamespace",
    result: "pg_catalog.quote_ident(p.proname)",
    qualified_result: None,
};

/// Relations of the given `relkind` selection, visible through the search path
macro_rules! relation_query {
    ($selection:expr) => {
        SchemaQuery {
            catalog: "pg_catalog.pg_class c",
            selection: $selection,
            visibility: "pg_catalog.pg_table_is_visible(c.oid)",
            namespace: "c.relnamespace",
            result: "pg_catalog.quote_ident(c.relname)",
            qualified_result: None,
        }
    };
}

pub static INDEXES: SchemaQuery = relation_query!(Some("c.relkind IN ('i')"));
pub static SEQUENCES: SchemaQuery = relation_query!(Some("c.relkind IN ('S')"));
pub static FOREIGN_TABLES: SchemaQuery = relation_query!(Some("c.relkind IN ('f')"));
pub static TABLES: SchemaQuery = relation_query!(Some("c.relkind IN ('r')"));
pub static VIEWS: SchemaQuery = relation_query!(Some("c.relkind IN ('v')"));
pub static RELATIONS: SchemaQuery = relation_query!(None);
/// Tables, sequences, views and foreign tables
pub static TSVF: SchemaQuery = relation_query!(Some("c.relkind IN ('r', 'S', 'v', 'f')"));

// The trigger type bits come from pg_trigger.h: 1 << 2 insert, 1 << 3 delete,
// 1 << 4 update.

pub static INSERTABLES: SchemaQuery = relation_query!(Some(concat!(
    "(c.relkind = 'r' OR (c.relkind = 'v' AND c.relhastriggers AND EXISTS ",
    "(SELECT 1 FROM pg_catalog.pg_trigger t WHERE t.tgrelid = c.oid AND t.tgtype & (1 << 2) <> 0)))"
)));

pub static DELETABLES: SchemaQuery = relation_query!(Some(concat!(
    "(c.relkind = 'r' OR (c.relkind = 'v' AND c.relhastriggers AND EXISTS ",
    "(SELECT 1 FROM pg_catalog.pg_trigger t WHERE t.tgrelid = c.oid AND t.tgtype & (1 << 3) <> 0)))"
)));

pub static UPDATABLES: SchemaQuery = relation_query!(Some(concat!(
    "(c.relkind = 'r' OR (c.relkind = 'v' AND c.relhastriggers AND EXISTS ",
    "(SELECT 1 FROM pg_catalog.pg_trigger t WHERE t.tgrelid = c.oid AND t.tgtype & (1 << 4) <> 0)))"
)));

/* ========================= Simple queries ========================= */

pub const ATTRIBUTES: &str = concat!(
    "SELECT pg_catalog.quote_ident(attname) ",
    "  FROM pg_catalog.pg_attribute a, pg_catalog.pg_class c ",
    " WHERE c.oid = a.attrelid ",
    "   AND a.attnum > 0 ",
    "   AND NOT a.attisdropped ",
    "   AND substring(pg_catalog.quote_ident(attname),1,%d)='%s' ",
    "   AND (pg_catalog.quote_ident(relname)='%s' ",
    "        OR '\"' || relname || '\"'='%s') ",
    "   AND pg_catalog.pg_table_is_visible(c.oid)"
);

pub const ATTRIBUTES_WITH_SCHEMA: &str = concat!(
    "SELECT pg_catalog.quote_ident(attname) ",
    "  FROM pg_catalog.pg_attribute a, pg_catalog.pg_class c, pg_catalog.pg_namespace n ",
    " WHERE c.oid = a.attrelid ",
    "   AND n.oid = c.relnamespace ",
    "   AND a.attnum > 0 ",
    "   AND NOT a.attisdropped ",
    "   AND substring(pg_catalog.quote_ident(attname),1,%d)='%s' ",
    "   AND (pg_catalog.quote_ident(relname)='%s' ",
    "        OR '\"' || relname || '\"' ='%s') ",
    "   AND (pg_catalog.quote_ident(nspname)='%s' ",
    "        OR '\"' || nspname || '\"' ='%s') "
);

pub const TEMPLATE_DATABASES: &str = concat!(
    "SELECT pg_catalog.quote_ident(datname) FROM pg_catalog.pg_database ",
    " WHERE substring(pg_catalog.quote_ident(datname),1,%d)='%s' AND datistemplate"
);

pub const DATABASES: &str = concat!(
    "SELECT pg_catalog.quote_ident(datname) FROM pg_catalog.pg_database ",
    " WHERE substring(pg_catalog.quote_ident(datname),1,%d)='%s'"
);

pub const TABLESPACES: &str = concat!(
    "SELECT pg_catalog.quote_ident(spcname) FROM pg_catalog.pg_tablespace ",
    " WHERE substring(pg_catalog.quote_ident(spcname),1,%d)='%s'"
);

pub const ENCODINGS: &str = concat!(
    " SELECT DISTINCT pg_catalog.pg_encoding_to_char(conforencoding) ",
    "   FROM pg_catalog.pg_conversion ",
    "  WHERE substring(pg_catalog.pg_encoding_to_char(conforencoding),1,%d)=UPPER('%s')"
);

pub const LANGUAGES: &str = concat!(
    "SELECT pg_catalog.quote_ident(lanname) ",
    "  FROM pg_catalog.pg_language ",
    " WHERE lanname != 'internal' ",
    "   AND substring(pg_catalog.quote_ident(lanname),1,%d)='%s'"
);

pub const SCHEMAS: &str = concat!(
    "SELECT pg_catalog.quote_ident(nspname) FROM pg_catalog.pg_namespace ",
    " WHERE substring(pg_catalog.quote_ident(nspname),1,%d)='%s'"
);

pub const SET_VARS: &str = concat!(
    "SELECT name FROM ",
    " (SELECT pg_catalog.lower(name) AS name FROM pg_catalog.pg_settings ",
    "  WHERE context IN ('user', 'superuser') ",
    "  UNION ALL SELECT 'constraints' ",
    "  UNION ALL SELECT 'transaction' ",
    "  UNION ALL SELECT 'session' ",
    "  UNION ALL SELECT 'role' ",
    "  UNION ALL SELECT 'tablespace' ",
    "  UNION ALL SELECT 'all') ss ",
    " WHERE substring(name,1,%d)='%s'"
);

pub const SHOW_VARS: &str = concat!(
    "SELECT name FROM ",
    " (SELECT pg_catalog.lower(name) AS name FROM pg_catalog.pg_settings ",
    "  UNION ALL SELECT 'session authorization' ",
    "  UNION ALL SELECT 'all') ss ",
    " WHERE substring(name,1,%d)='%s'"
);

macro_rules! roles_query {
    () => {
        concat!(
            " SELECT pg_catalog.quote_ident(rolname) ",
            "   FROM pg_catalog.pg_roles ",
            "  WHERE substring(pg_catalog.quote_ident(rolname),1,%d)='%s'"
        )
    };
}

pub const ROLES: &str = roles_query!();
pub const GRANT_ROLES: &str = concat!(roles_query!(), " UNION ALL SELECT 'PUBLIC'");
pub const ROLES_OR_DEFAULT: &str = concat!(roles_query!(), " UNION SELECT 'DEFAULT'");
pub const USER_MAPPING_ROLES: &str = concat!(
    roles_query!(),
    " UNION SELECT 'CURRENT_USER'",
    " UNION SELECT 'PUBLIC'",
    " UNION SELECT 'USER'"
);

// The length comparisons in the next two only consume the typed text.

pub const INDEX_OF_TABLE: &str = concat!(
    "SELECT pg_catalog.quote_ident(c2.relname) ",
    "  FROM pg_catalog.pg_class c1, pg_catalog.pg_class c2, pg_catalog.pg_index i",
    " WHERE c1.oid=i.indrelid and i.indexrelid=c2.oid",
    "       and (%d = pg_catalog.length('%s'))",
    "       and pg_catalog.quote_ident(c1.relname)='%s'",
    "       and pg_catalog.pg_table_is_visible(c2.oid)"
);

pub const TABLES_FOR_TRIGGER: &str = concat!(
    "SELECT pg_catalog.quote_ident(relname) ",
    "  FROM pg_catalog.pg_class",
    " WHERE (%d = pg_catalog.length('%s'))",
    "   AND oid IN ",
    "       (SELECT tgrelid FROM pg_catalog.pg_trigger ",
    "         WHERE pg_catalog.quote_ident(tgname)='%s')"
);

pub const TS_CONFIGURATIONS: &str = concat!(
    "SELECT pg_catalog.quote_ident(cfgname) FROM pg_catalog.pg_ts_config ",
    " WHERE substring(pg_catalog.quote_ident(cfgname),1,%d)='%s'"
);

pub const TS_DICTIONARIES: &str = concat!(
    "SELECT pg_catalog.quote_ident(dictname) FROM pg_catalog.pg_ts_dict ",
    " WHERE substring(pg_catalog.quote_ident(dictname),1,%d)='%s'"
);

pub const TS_PARSERS: &str = concat!(
    "SELECT pg_catalog.quote_ident(prsname) FROM pg_catalog.pg_ts_parser ",
    " WHERE substring(pg_catalog.quote_ident(prsname),1,%d)='%s'"
);

pub const TS_TEMPLATES: &str = concat!(
    "SELECT pg_catalog.quote_ident(tmplname) FROM pg_catalog.pg_ts_template ",
    " WHERE substring(pg_catalog.quote_ident(tmplname),1,%d)='%s'"
);

pub const FDWS: &str = concat!(
    " SELECT pg_catalog.quote_ident(fdwname) ",
    "   FROM pg_catalog.pg_foreign_data_wrapper ",
    "  WHERE substring(pg_catalog.quote_ident(fdwname),1,%d)='%s'"
);

pub const SERVERS: &str = concat!(
    " SELECT pg_catalog.quote_ident(srvname) ",
    "   FROM pg_catalog.pg_foreign_server ",
    "  WHERE substring(pg_catalog.quote_ident(srvname),1,%d)='%s'"
);

pub const USER_MAPPINGS: &str = concat!(
    " SELECT pg_catalog.quote_ident(usename) ",
    "   FROM pg_catalog.pg_user_mappings ",
    "  WHERE substring(pg_catalog.quote_ident(usename),1,%d)='%s'"
);

pub const ACCESS_METHODS: &str = concat!(
    " SELECT pg_catalog.quote_ident(amname) ",
    "   FROM pg_catalog.pg_am ",
    "  WHERE substring(pg_catalog.quote_ident(amname),1,%d)='%s'"
);

/// Argument type lists of a function; `{name}` is replaced before use.
///
/// The template has no typed-text placeholder, so every row is offered.
pub const ARGUMENTS: &str = concat!(
    " SELECT pg_catalog.oidvectortypes(proargtypes)||')' ",
    "   FROM pg_catalog.pg_proc ",
    "  WHERE proname='{name}'"
);

pub const EXTENSIONS: &str = concat!(
    " SELECT pg_catalog.quote_ident(extname) ",
    "   FROM pg_catalog.pg_extension ",
    "  WHERE substring(pg_catalog.quote_ident(extname),1,%d)='%s'"
);

pub const AVAILABLE_EXTENSIONS: &str = concat!(
    " SELECT pg_catalog.quote_ident(name) ",
    "   FROM pg_catalog.pg_available_extensions ",
    "  WHERE substring(pg_catalog.quote_ident(name),1,%d)='%s' AND installed_version IS NULL"
);

pub const PREPARED_STATEMENTS: &str = concat!(
    " SELECT pg_catalog.quote_ident(name) ",
    "   FROM pg_catalog.pg_prepared_statements ",
    "  WHERE substring(pg_catalog.quote_ident(name),1,%d)='%s'"
);

pub const COLLATIONS: &str = "SELECT pg_catalog.quote_ident(collname) FROM pg_catalog.pg_collation WHERE collencoding IN (-1, pg_catalog.pg_char_to_encoding(pg_catalog.getdatabaseencoding())) AND substring(pg_catalog.quote_ident(collname),1,%d)='%s'";

pub const CONVERSIONS: &str = "SELECT pg_catalog.quote_ident(conname) FROM pg_catalog.pg_conversion WHERE substring(pg_catalog.quote_ident(conname),1,%d)='%s'";

pub const RULES: &str = "SELECT pg_catalog.quote_ident(rulename) FROM pg_catalog.pg_rules WHERE substring(pg_catalog.quote_ident(rulename),1,%d)='%s'";

pub const TRIGGERS: &str = "SELECT pg_catalog.quote_ident(tgname) FROM pg_catalog.pg_trigger WHERE substring(pg_catalog.quote_ident(tgname),1,%d)='%s'";

pub const LISTENING_CHANNELS: &str = "SELECT pg_catalog.quote_ident(channel) FROM pg_catalog.pg_listening_channels() AS channel WHERE substring(pg_catalog.quote_ident(channel),1,%d)='%s'";

pub const LISTENING_CHANNELS_OR_ALL: &str = "SELECT pg_catalog.quote_ident(channel) FROM pg_catalog.pg_listening_channels() AS channel WHERE substring(pg_catalog.quote_ident(channel),1,%d)='%s' UNION SELECT '*'";

/* ========================= Things after CREATE / DROP ========================= */

/// Should not be offered after CREATE
pub const NO_CREATE: u8 = 1 << 0;
/// Should not be offered after DROP
pub const NO_DROP: u8 = 1 << 1;
/// Offered after neither
pub const NO_SHOW: u8 = NO_CREATE | NO_DROP;

/// Where candidates for a thing's names come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThingSource {
    /// Simple catalog query
    Query(&'static str),
    /// Schema-qualified catalog query
    Schema(&'static SchemaQuery),
    /// Names are not looked up
    None,
}

/// An object kind that can follow CREATE or DROP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thing {
    pub name: &'static str,
    pub source: ThingSource,
    pub flags: u8,
}

const fn thing(name: &'static str, source: ThingSource, flags: u8) -> Thing {
    Thing {
        name,
        source,
        flags,
    }
}

pub static WORDS_AFTER_CREATE: &[Thing] = &[
    thing("AGGREGATE", ThingSource::Schema(&AGGREGATES), 0),
    // Cast names are too complex to look up
    thing("CAST", ThingSource::None, 0),
    thing("COLLATION", ThingSource::Query(COLLATIONS), 0),
    thing("CONFIGURATION", ThingSource::Query(TS_CONFIGURATIONS), NO_SHOW),
    thing("CONVERSION", ThingSource::Query(CONVERSIONS), 0),
    thing("DATABASE", ThingSource::Query(DATABASES), 0),
    thing("DICTIONARY", ThingSource::Query(TS_DICTIONARIES), NO_SHOW),
    thing("DOMAIN", ThingSource::Schema(&DOMAINS), 0),
    thing("EXTENSION", ThingSource::Query(EXTENSIONS), 0),
    thing("FOREIGN DATA WRAPPER", ThingSource::None, 0),
    thing("FOREIGN TABLE", ThingSource::None, 0),
    thing("FUNCTION", ThingSource::Schema(&FUNCTIONS), 0),
    thing("GROUP", ThingSource::Query(ROLES), 0),
    thing("LANGUAGE", ThingSource::Query(LANGUAGES), 0),
    thing("INDEX", ThingSource::Schema(&INDEXES), 0),
    thing("OPERATOR", ThingSource::None, 0),
    // DROP OWNED BY
    thing("OWNED", ThingSource::None, NO_CREATE),
    thing("PARSER", ThingSource::Query(TS_PARSERS), NO_SHOW),
    thing("ROLE", ThingSource::Query(ROLES), 0),
    thing("RULE", ThingSource::Query(RULES), 0),
    thing("SCHEMA", ThingSource::Query(SCHEMAS), 0),
    thing("SEQUENCE", ThingSource::Schema(&SEQUENCES), 0),
    thing("SERVER", ThingSource::Query(SERVERS), 0),
    thing("TABLE", ThingSource::Schema(&TABLES), 0),
    thing("TABLESPACE", ThingSource::Query(TABLESPACES), 0),
    // CREATE TEMP TABLE
    thing("TEMP", ThingSource::None, NO_DROP),
    thing("TEMPLATE", ThingSource::Query(TS_TEMPLATES), NO_SHOW),
    thing("TEXT SEARCH", ThingSource::None, 0),
    thing("TRIGGER", ThingSource::Query(TRIGGERS), 0),
    thing("TYPE", ThingSource::Schema(&DATATYPES), 0),
    // CREATE UNIQUE INDEX
    thing("UNIQUE", ThingSource::None, NO_DROP),
    // CREATE UNLOGGED TABLE
    thing("UNLOGGED", ThingSource::None, NO_DROP),
    thing("USER", ThingSource::Query(ROLES), 0),
    thing("USER MAPPING FOR", ThingSource::None, 0),
    thing("VIEW", ThingSource::Schema(&VIEWS), 0),
];

/// Find the thing named exactly `word`, ignoring case
pub fn lookup_thing(word: &str) -> Option<&'static Thing> {
    WORDS_AFTER_CREATE
        .iter()
        .find(|thing| thing.name.eq_ignore_ascii_case(word))
}

/* ========================= Command lists ========================= */

pub static SQL_COMMANDS: &[&str] = &[
    "ABORT", "ALTER", "ANALYZE", "BEGIN", "CHECKPOINT", "CLOSE", "CLUSTER",
    "COMMENT", "COMMIT", "COPY", "CREATE", "DEALLOCATE", "DECLARE",
    "DELETE FROM", "DISCARD", "DO", "DROP", "END", "EXECUTE", "EXPLAIN", "FETCH",
    "GRANT", "INSERT", "LISTEN", "LOAD", "LOCK", "MOVE", "NOTIFY", "PREPARE",
    "REASSIGN", "REINDEX", "RELEASE", "RESET", "REVOKE", "ROLLBACK",
    "SAVEPOINT", "SECURITY LABEL", "SELECT", "SET", "SHOW", "START",
    "TABLE", "TRUNCATE", "UNLISTEN", "UPDATE", "VACUUM", "VALUES", "WITH",
];

pub static BACKSLASH_COMMANDS: &[&str] = &[
    "\\a", "\\connect", "\\conninfo", "\\C", "\\cd", "\\copy", "\\copyright",
    "\\d", "\\da", "\\db", "\\dc", "\\dC", "\\dd", "\\dD", "\\des", "\\det", "\\deu", "\\dew", "\\df",
    "\\dF", "\\dFd", "\\dFp", "\\dFt", "\\dg", "\\di", "\\dl", "\\dL",
    "\\dn", "\\do", "\\dp", "\\drds", "\\ds", "\\dS", "\\dt", "\\dT", "\\dv", "\\du",
    "\\e", "\\echo", "\\ef", "\\encoding",
    "\\f", "\\g", "\\h", "\\help", "\\H", "\\i", "\\ir", "\\l",
    "\\lo_import", "\\lo_export", "\\lo_list", "\\lo_unlink",
    "\\o", "\\p", "\\password", "\\prompt", "\\pset", "\\q", "\\qecho", "\\r",
    "\\set", "\\sf", "\\t", "\\T",
    "\\timing", "\\unset", "\\x", "\\w", "\\z", "\\!",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_thing_is_case_insensitive() {
        let thing = lookup_thing("table").expect("TABLE is a thing");
        assert_eq!(thing.source, ThingSource::Schema(&TABLES));
        assert!(lookup_thing("SELECT").is_none());
    }

    #[test]
    fn test_multi_word_things() {
        assert!(lookup_thing("user mapping for").is_some());
        assert_eq!(lookup_thing("CAST").map(|t| t.source), Some(ThingSource::None));
    }

    #[test]
    fn test_thing_flags() {
        let flags = |name: &str| lookup_thing(name).map(|t| t.flags);
        assert_eq!(flags("OWNED"), Some(NO_CREATE));
        assert_eq!(flags("UNIQUE"), Some(NO_DROP));
        assert_eq!(flags("PARSER"), Some(NO_SHOW));
        assert_eq!(flags("VIEW"), Some(0));
    }

    #[test]
    fn test_simple_queries_have_text_placeholders() {
        for template in [DATABASES, ROLES, GRANT_ROLES, SCHEMAS, SET_VARS, COLLATIONS, TRIGGERS] {
            assert!(template.contains("%d"), "{template}");
            assert!(template.contains("'%s'"), "{template}");
        }
        assert!(GRANT_ROLES.ends_with("UNION ALL SELECT 'PUBLIC'"));
    }

    #[test]
    fn test_relation_queries_share_pg_class() {
        for query in [&TABLES, &VIEWS, &INDEXES, &RELATIONS, &TSVF, &INSERTABLES] {
            assert_eq!(query.catalog, "pg_catalog.pg_class c");
            assert_eq!(query.qualified(), query.result);
        }
        assert_eq!(DATATYPES.qualified(), "pg_catalog.quote_ident(t.typname)");
        assert!(RELATIONS.selection.is_none());
    }
}
