//! Custom prompt implementation for pgsh

use std::borrow::Cow;

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

/// psql-style prompt showing the database and connection state
pub struct PgPrompt {
    /// Database name
    database: String,
    /// Whether connected to the server
    connected: bool,
}

impl PgPrompt {
    /// Create a new prompt
    ///
    /// # Arguments
    /// * `database` - Database name
    /// * `connected` - Whether connected to the server
    ///
    /// # Returns
    /// * `Self` - New prompt
    pub fn new(database: String, connected: bool) -> Self {
        Self {
            database,
            connected,
        }
    }
}

impl Prompt for PgPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        if self.connected {
            format!("{}=> ", self.database).into()
        } else {
            format!("{} (disconnected)=> ", self.database).into()
        }
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        "".into()
    }

    /// The indicator is part of the left prompt
    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        "".into()
    }

    /// Continuation lines of an unterminated statement
    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        format!("{}-> ", self.database).into()
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({}reverse-i-search: {}) ", prefix, history_search.term).into()
    }
}
