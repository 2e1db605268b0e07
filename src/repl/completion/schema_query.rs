//! Catalog query assembly
//!
//! Turns query templates and schema query descriptors into the SQL sent to the
//! server. Every string coming from the input line is escaped as a literal
//! before it is placed in the query.

use std::fmt::Write;

use super::context::SchemaQuery;
use crate::config::CompletionConfig;

/// Catalog relation whose schema query also hides the system schema
const CLASS_CATALOG: &str = "pg_catalog.pg_class c";

/// Escape text for use inside a single-quoted SQL literal.
///
/// Quotes are doubled. Without standard-conforming strings backslashes are
/// doubled as well.
pub fn escape_literal(text: &str, standard_conforming_strings: bool) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    for ch in text.chars() {
        match ch {
            '\'' => escaped.push_str("''"),
            '\\' if !standard_conforming_strings => escaped.push_str("\\\\"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Substitute the placeholders of a simple query template.
///
/// Placeholders are consumed in order from the list: length of `text`,
/// `text`, `info`, `info`, `info2`, `info2`. `%%` yields a literal `%`.
/// Strings are escaped, missing ones become empty.
pub fn fill_template(
    template: &str,
    text: &str,
    info: Option<&str>,
    info2: Option<&str>,
    config: &CompletionConfig,
) -> String {
    let escape =
        |s: Option<&str>| escape_literal(s.unwrap_or(""), config.standard_conforming_strings);
    let e_text = escape(Some(text));
    let e_info = escape(info);
    let e_info2 = escape(info2);
    let length = text.chars().count().to_string();
    let args = [&length, &e_text, &e_info, &e_info, &e_info2, &e_info2];

    let mut sql = String::with_capacity(template.len() + 64);
    let mut next_arg = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            sql.push(ch);
            continue;
        }
        match chars.peek() {
            Some('d') | Some('s') => {
                chars.next();
                if let Some(arg) = next_arg.next() {
                    sql.push_str(arg);
                }
            }
            Some('%') => {
                chars.next();
                sql.push('%');
            }
            _ => sql.push('%'),
        }
    }

    sql
}

/// Build a complete simple query, capped at the configured row limit
pub fn build_simple_query(
    template: &str,
    text: &str,
    info: Option<&str>,
    info2: Option<&str>,
    config: &CompletionConfig,
) -> String {
    let mut sql = fill_template(template, text, info, info2, config);
    push_limit(&mut sql, config);
    sql
}

/// Build the three-branch query for a schema-qualified lookup.
///
/// The branches return, in order:
/// 1. unqualified names visible through the search path,
/// 2. schema names followed by `.`, when more than one schema matches the text,
/// 3. qualified names, when exactly one schema matches the text.
///
/// # Arguments
/// * `query` - Descriptor of the objects to look up
/// * `text` - Text typed so far
/// * `addon` - SQL appended after the three branches, usually `UNION SELECT ...`
/// * `config` - Row limit, escaping and system schema settings
pub fn build_schema_query(
    query: &SchemaQuery,
    text: &str,
    addon: Option<&str>,
    config: &CompletionConfig,
) -> String {
    let e_text = escape_literal(text, config.standard_conforming_strings);
    let length = text.chars().count();
    let qualified = query.qualified();
    let mut sql = String::with_capacity(2048);

    // Writing into a String cannot fail
    let _ = write!(sql, "SELECT {} FROM {} WHERE ", query.result, query.catalog);
    if let Some(selection) = query.selection {
        let _ = write!(sql, "{selection} AND ");
    }
    let _ = write!(sql, "substring({},1,{length})='{e_text}'", query.result);
    let _ = write!(sql, " AND {}", query.visibility);

    if query.catalog == CLASS_CATALOG && !text.starts_with(config.system_schema_prefix.as_str()) {
        let _ = write!(
            sql,
            " AND c.relnamespace <> (SELECT oid FROM pg_catalog.pg_namespace WHERE nspname = '{}')",
            escape_literal(&config.system_schema, config.standard_conforming_strings)
        );
    }

    let _ = write!(
        sql,
        "\nUNION\nSELECT pg_catalog.quote_ident(n.nspname) || '.' FROM pg_catalog.pg_namespace n \
         WHERE substring(pg_catalog.quote_ident(n.nspname) || '.',1,{length})='{e_text}'"
    );
    let _ = write!(sql, " AND {} > 1", matching_schema_count(length, &e_text));

    let _ = write!(
        sql,
        "\nUNION\nSELECT pg_catalog.quote_ident(n.nspname) || '.' || {qualified} \
         FROM {}, pg_catalog.pg_namespace n WHERE {} = n.oid AND ",
        query.catalog, query.namespace
    );
    if let Some(selection) = query.selection {
        let _ = write!(sql, "{selection} AND ");
    }
    let _ = write!(
        sql,
        "substring(pg_catalog.quote_ident(n.nspname) || '.' || {qualified},1,{length})='{e_text}'"
    );
    let _ = write!(
        sql,
        " AND substring(pg_catalog.quote_ident(n.nspname) || '.',1,{length}) = \
         substring('{e_text}',1,pg_catalog.length(pg_catalog.quote_ident(n.nspname))+1)"
    );
    let _ = write!(sql, " AND {} = 1", matching_schema_count(length, &e_text));

    if let Some(addon) = addon {
        let _ = write!(sql, "\n{addon}");
    }

    push_limit(&mut sql, config);
    sql
}

/// Subquery counting the schemas whose qualifier prefix matches the text
fn matching_schema_count(length: usize, e_text: &str) -> String {
    format!(
        "(SELECT pg_catalog.count(*) FROM pg_catalog.pg_namespace \
         WHERE substring(pg_catalog.quote_ident(nspname) || '.',1,{length}) = \
         substring('{e_text}',1,pg_catalog.length(pg_catalog.quote_ident(nspname))+1))"
    )
}

fn push_limit(sql: &mut String, config: &CompletionConfig) {
    let _ = write!(sql, "\nLIMIT {}", config.max_records);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::completion::catalog;
    use pretty_assertions::assert_eq;

    fn config() -> CompletionConfig {
        CompletionConfig::default()
    }

    #[test]
    fn test_escape_literal_doubles_quotes() {
        assert_eq!(escape_literal("o'brien", true), "o''brien");
        assert_eq!(escape_literal("a\\b", true), "a\\b");
        assert_eq!(escape_literal("a\\b'", false), "a\\\\b''");
    }

    #[test]
    fn test_fill_template_positional() {
        let sql = fill_template(
            "x=%d AND y='%s' AND r='%s' OR r='%s' AND n='%s' OR n='%s'",
            "ab",
            Some("t"),
            Some("s"),
            &config(),
        );
        assert_eq!(sql, "x=2 AND y='ab' AND r='t' OR r='t' AND n='s' OR n='s'");
    }

    #[test]
    fn test_fill_template_escapes_every_parameter() {
        let sql = fill_template(catalog::INDEX_OF_TABLE, "x'", Some("it's"), None, &config());
        assert!(sql.contains("(2 = pg_catalog.length('x'''))"));
        assert!(sql.contains("quote_ident(c1.relname)='it''s'"));
    }

    #[test]
    fn test_fill_template_percent_escape_and_missing_info() {
        let template = "LIKE '100%%' AND %d a='%s' AND b='%s'";
        let sql = fill_template(template, "q", None, None, &config());
        assert_eq!(sql, "LIKE '100%' AND 1 a='q' AND b=''");
    }

    #[test]
    fn test_fill_template_counts_characters() {
        let sql = fill_template("%d", "é", None, None, &config());
        assert_eq!(sql, "1");
    }

    #[test]
    fn test_build_simple_query_appends_limit() {
        let mut config = config();
        config.max_records = 25;
        let sql = build_simple_query(catalog::DATABASES, "po", None, None, &config);
        assert!(sql.contains("substring(pg_catalog.quote_ident(datname),1,2)='po'"));
        assert!(sql.ends_with("\nLIMIT 25"));
    }

    #[test]
    fn test_build_schema_query_for_tables() {
        let sql = build_schema_query(&catalog::TABLES, "us", None, &config());
        let expected = "SELECT pg_catalog.quote_ident(c.relname) FROM pg_catalog.pg_class c WHERE \
            c.relkind IN ('r') AND substring(pg_catalog.quote_ident(c.relname),1,2)='us' \
            AND pg_catalog.pg_table_is_visible(c.oid) \
            AND c.relnamespace <> (SELECT oid FROM pg_catalog.pg_namespace WHERE nspname = 'pg_catalog')\
            \nUNION\n\
            SELECT pg_catalog.quote_ident(n.nspname) || '.' FROM pg_catalog.pg_namespace n \
            WHERE substring(pg_catalog.quote_ident(n.nspname) || '.',1,2)='us' \
            AND (SELECT pg_catalog.count(*) FROM pg_catalog.pg_namespace \
            WHERE substring(pg_catalog.quote_ident(nspname) || '.',1,2) = \
            substring('us',1,pg_catalog.length(pg_catalog.quote_ident(nspname))+1)) > 1\
            \nUNION\n\
            SELECT pg_catalog.quote_ident(n.nspname) || '.' || pg_catalog.quote_ident(c.relname) \
            FROM pg_catalog.pg_class c, pg_catalog.pg_namespace n WHERE c.relnamespace = n.oid AND \
            c.relkind IN ('r') AND \
            substring(pg_catalog.quote_ident(n.nspname) || '.' || pg_catalog.quote_ident(c.relname),1,2)='us' \
            AND substring(pg_catalog.quote_ident(n.nspname) || '.',1,2) = \
            substring('us',1,pg_catalog.length(pg_catalog.quote_ident(n.nspname))+1) \
            AND (SELECT pg_catalog.count(*) FROM pg_catalog.pg_namespace \
            WHERE substring(pg_catalog.quote_ident(nspname) || '.',1,2) = \
            substring('us',1,pg_catalog.length(pg_catalog.quote_ident(nspname))+1)) = 1\
            \nLIMIT 1000";
        assert_eq!(sql, expected);
    }

    #[test]
    fn test_system_schema_shown_for_system_prefix() {
        let sql = build_schema_query(&catalog::TABLES, "pg_cl", None, &config());
        assert!(!sql.contains("c.relnamespace <>"));
    }

    #[test]
    fn test_system_schema_prefix_is_configurable() {
        let mut config = config();
        config.system_schema_prefix = "sys_".to_string();
        config.system_schema = "sys".to_string();

        let hidden = build_schema_query(&catalog::VIEWS, "pg_", None, &config);
        assert!(hidden.contains("WHERE nspname = 'sys')"));

        let shown = build_schema_query(&catalog::VIEWS, "sys_v", None, &config);
        assert!(!shown.contains("c.relnamespace <>"));
    }

    #[test]
    fn test_non_class_catalog_never_hides_system_schema() {
        let sql = build_schema_query(&catalog::FUNCTIONS, "", None, &config());
        assert!(!sql.contains("relnamespace <>"));
        assert!(sql.starts_with(
            "SELECT pg_catalog.quote_ident(p.proname) FROM pg_catalog.pg_proc p WHERE substring("
        ));
    }

    #[test]
    fn test_build_schema_query_escapes_text() {
        let sql = build_schema_query(&catalog::TABLES, "a'; DROP TABLE x; --", None, &config());
        assert!(sql.contains("='a''; DROP TABLE x; --'"));
        assert!(!sql.contains("='a'; DROP"));
    }

    #[test]
    fn test_build_schema_query_addon_and_qualified_result() {
        let addon = Some(" UNION SELECT 'ON'");
        let sql = build_schema_query(&catalog::DATATYPES, "in", addon, &config());
        assert!(
            sql.contains("SELECT pg_catalog.format_type(t.oid, NULL) FROM pg_catalog.pg_type t")
        );
        assert!(
            sql.contains("|| '.' || pg_catalog.quote_ident(t.typname) FROM pg_catalog.pg_type t")
        );
        assert!(sql.ends_with("\n UNION SELECT 'ON'\nLIMIT 1000"));
    }
}
