//! Completion dispatcher
//!
//! Picks exactly one pattern for the word under the cursor. The checks run in
//! a fixed order: backslash commands, variable interpolation, the first word
//! of a statement, the rule table, and finally the keyword table fallback.

use tracing::debug;

use super::catalog::{self, ThingSource};
use super::context::{ContextWords, Pattern, Selection};
use super::rules;
use crate::config::CompletionConfig;

/// Select what to complete the current word with.
///
/// # Arguments
/// * `text` - The word typed so far
/// * `words` - Words preceding it
/// * `config` - Escaping settings for parameters bound from the line
///
/// # Returns
/// * `Selection` - The pattern and the character to append after a unique match
pub fn dispatch(text: &str, words: &ContextWords, config: &CompletionConfig) -> Selection {
    if text.starts_with('\\') {
        debug!("completing backslash command {:?}", text);
        return Selection::list(catalog::BACKSLASH_COMMANDS);
    }

    if let Some(selection) = variable_reference(text) {
        debug!("completing variable reference {:?}", text);
        return selection;
    }

    if words.is_empty(0) {
        debug!("completing first word of a statement");
        return Selection::list(catalog::SQL_COMMANDS);
    }

    if let Some((index, rule)) = rules::find(words) {
        debug!("rule #{} matched: {:?}", index, rule.then);
        return rule.then.select(words, config);
    }

    keyword_fallback(words.word(0))
}

/// `:name`, `:'name'` and `:"name"` references, but not `::` casts
fn variable_reference(text: &str) -> Option<Selection> {
    let mut chars = text.chars();
    if chars.next() != Some(':') {
        return None;
    }
    let (prefix, suffix) = match chars.next() {
        Some(':') => return None,
        Some('\'') => (":'", "'"),
        Some('"') => (":\"", "\""),
        _ => (":", ""),
    };
    Some(Selection::new(Pattern::Variables { prefix, suffix }))
}

/// Complete names of the object kind named by the previous word, if any
fn keyword_fallback(previous: &str) -> Selection {
    match catalog::lookup_thing(previous).map(|thing| thing.source) {
        Some(ThingSource::Query(template)) => {
            debug!("falling back to names of {}", previous);
            Selection::query(template, None, None)
        }
        Some(ThingSource::Schema(descriptor)) => {
            debug!("falling back to qualified names of {}", previous);
            Selection::schema(descriptor, None)
        }
        Some(ThingSource::None) | None => {
            debug!("nothing to complete after {:?}", previous);
            Selection::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::completion::context::ProviderKind;

    fn run(text: &str, words: &[&str]) -> Selection {
        dispatch(
            text,
            &ContextWords::from_words(words.iter().copied()),
            &CompletionConfig::default(),
        )
    }

    #[test]
    fn test_first_word_offers_sql_commands() {
        let selection = run("SEL", &[]);
        assert_eq!(selection.pattern, Pattern::StaticList(catalog::SQL_COMMANDS));
        assert_eq!(selection.append, Some(' '));
    }

    #[test]
    fn test_backslash_takes_priority() {
        let selection = run("\\d", &["FROM", "SELECT"]);
        assert_eq!(selection.pattern, Pattern::StaticList(catalog::BACKSLASH_COMMANDS));
    }

    #[test]
    fn test_table_after_statement_start_offers_relations() {
        let selection = run("", &["TABLE"]);
        assert_eq!(
            selection.pattern,
            Pattern::SchemaQuery {
                descriptor: &catalog::RELATIONS,
                addon: None,
            }
        );
    }

    #[test]
    fn test_drop_table_uses_keyword_table() {
        let selection = run("", &["TABLE", "DROP"]);
        assert_eq!(
            selection.pattern,
            Pattern::SchemaQuery {
                descriptor: &catalog::TABLES,
                addon: None,
            }
        );
    }

    #[test]
    fn test_insert_into_wins_over_from() {
        let selection = run("", &["INTO", "INSERT"]);
        assert_eq!(
            selection.pattern,
            Pattern::SchemaQuery {
                descriptor: &catalog::INSERTABLES,
                addon: None,
            }
        );

        let selection = run("", &["FROM", "x", "SELECT"]);
        assert_eq!(
            selection.pattern,
            Pattern::SchemaQuery {
                descriptor: &catalog::TSVF,
                addon: None,
            }
        );
    }

    #[test]
    fn test_variable_forms() {
        assert_eq!(
            run(":my", &["SELECT"]).pattern,
            Pattern::Variables { prefix: ":", suffix: "" }
        );
        assert_eq!(
            run(":'my", &[]).pattern,
            Pattern::Variables { prefix: ":'", suffix: "'" }
        );
        assert_eq!(
            run(":\"my", &[]).pattern,
            Pattern::Variables { prefix: ":\"", suffix: "\"" }
        );
        assert_eq!(
            run("", &["\\set"]).pattern,
            Pattern::Variables { prefix: "", suffix: "" }
        );
    }

    #[test]
    fn test_cast_is_not_a_variable() {
        // `x::` falls through to the rule table and then the fallback
        let selection = run("::int", &["x", "SELECT"]);
        assert_eq!(selection, Selection::empty());
    }

    #[test]
    fn test_keyword_fallback_without_lookup() {
        // CAST names are never looked up
        assert_eq!(run("", &["CAST", "DROP", "x"]), Selection::empty());
        assert_eq!(run("", &["users"]), Selection::empty());
    }

    #[test]
    fn test_keyword_fallback_simple_query() {
        let selection = run("my", &["SCHEMA", "DROP"]);
        assert_eq!(selection.kind(), ProviderKind::SimpleQuery);
        assert_eq!(
            selection.pattern,
            Pattern::SimpleQuery {
                template: catalog::SCHEMAS.to_string(),
                info: None,
                info2: None,
            }
        );
    }

    #[test]
    fn test_matched_rule_with_nothing_is_empty() {
        assert_eq!(run("", &["whatever", "REINDEX"]), Selection::empty());
    }

    #[test]
    fn test_create_offers_keywords() {
        let selection = run("TA", &["CREATE"]);
        assert_eq!(selection.kind(), ProviderKind::Keywords);
    }
}
