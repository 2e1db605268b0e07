use super::*;

#[test]
fn test_shared_state_creation() {
    let state = SharedState::new("postgres".to_string());
    assert_eq!(state.get_database(), "postgres");
    assert!(!state.is_connected());
    assert!(state.variable_names().is_empty());
}

#[test]
fn test_shared_state_connection() {
    let mut state = SharedState::new("postgres".to_string());
    state.set_connected(Some("PostgreSQL 16.2".to_string()));
    assert!(state.is_connected());
    assert_eq!(state.get_server_version().as_deref(), Some("PostgreSQL 16.2"));

    state.set_disconnected();
    assert!(!state.is_connected());
    assert_eq!(state.get_server_version(), None);
}

#[test]
fn test_shared_state_database_change() {
    let mut state = SharedState::new("postgres".to_string());
    state.set_database("shop".to_string());
    assert_eq!(state.get_database(), "shop");
}

#[test]
fn test_variables_are_shared_between_clones() {
    let state = SharedState::new("postgres".to_string());
    let completer_view = state.clone();

    state.set_variable("PROMPT1", "%/=> ");
    state.set_variable("AUTOCOMMIT", "on");

    assert_eq!(completer_view.variable_names(), vec!["AUTOCOMMIT", "PROMPT1"]);
    assert_eq!(completer_view.get_variable("AUTOCOMMIT").as_deref(), Some("on"));

    assert!(state.unset_variable("AUTOCOMMIT"));
    assert!(!state.unset_variable("AUTOCOMMIT"));
    assert_eq!(completer_view.variable_names(), vec!["PROMPT1"]);
}

#[test]
fn test_set_and_unset_through_meta_commands() {
    let state = SharedState::new("postgres".to_string());

    assert_eq!(evaluate(&state, "\\set limit 10"), Evaluation::Empty);
    assert_eq!(evaluate(&state, "\\set empty"), Evaluation::Empty);
    assert_eq!(state.get_variable("limit").as_deref(), Some("10"));
    assert_eq!(state.get_variable("empty").as_deref(), Some(""));

    assert_eq!(
        evaluate(&state, "\\set"),
        Evaluation::Output("empty = ''\nlimit = '10'".to_string())
    );

    assert_eq!(evaluate(&state, "\\unset limit"), Evaluation::Empty);
    assert_eq!(state.variable_names(), vec!["empty"]);
}

#[test]
fn test_variables_feed_completion() {
    use crate::config::CompletionConfig;
    use crate::connection::testing::RecordingCatalog;
    use std::sync::Arc;

    let state = SharedState::new("postgres".to_string());
    let engine = completion::CompletionEngine::new(
        Arc::new(RecordingCatalog::disconnected()),
        state.clone(),
        CompletionConfig::default(),
    );

    evaluate(&state, "\\set owner_id 42");
    let (_start, pairs) = engine.complete("SELECT :'ow", 11);
    let values: Vec<_> = pairs.iter().map(|p| p.replacement.as_str()).collect();
    assert_eq!(values, vec![":'owner_id'"]);

    evaluate(&state, "\\unset owner_id");
    let (_start, pairs) = engine.complete("SELECT :'ow", 11);
    assert!(pairs.is_empty());
}
