//! Hinter for reedline - suggests the rest of a previously entered line

use nu_ansi_term::{Color, Style};
use reedline::{Hinter, History, SearchQuery};

/// History-based hinter
pub struct HistoryHinter {
    /// Style for hints
    style: Style,
    /// Current hint text
    current_hint: String,
}

impl HistoryHinter {
    /// Create a new hinter with the default dimmed style
    pub fn new() -> Self {
        Self {
            style: Style::new().italic().fg(Color::DarkGray),
            current_hint: String::new(),
        }
    }
}

impl Default for HistoryHinter {
    fn default() -> Self {
        Self::new()
    }
}

impl Hinter for HistoryHinter {
    /// Provide a hint for the current line
    ///
    /// Only lines with the cursor at the end get a hint, taken from the most
    /// recent history entry that extends the line.
    fn handle(
        &mut self,
        line: &str,
        pos: usize,
        history: &dyn History,
        use_ansi_coloring: bool,
        _cwd: &str,
    ) -> String {
        self.current_hint.clear();

        if pos != line.len() || line.trim().is_empty() {
            return String::new();
        }

        let entry = history
            .search(SearchQuery::last_with_prefix(line.to_string(), None))
            .ok()
            .and_then(|results| results.into_iter().next());

        let Some(entry) = entry else {
            return String::new();
        };

        match entry.command_line.strip_prefix(line) {
            Some(rest) if !rest.is_empty() => {
                self.current_hint = rest.to_string();
                if use_ansi_coloring {
                    self.style.paint(rest).to_string()
                } else {
                    rest.to_string()
                }
            }
            _ => String::new(),
        }
    }

    fn complete_hint(&self) -> String {
        self.current_hint.clone()
    }

    /// Next word of the hint, with its leading whitespace
    fn next_hint_token(&self) -> String {
        let trimmed = self.current_hint.trim_start();
        let leading = self.current_hint.len() - trimmed.len();
        let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
        self.current_hint[..leading + end].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reedline::{FileBackedHistory, HistoryItem};

    fn history_with(lines: &[&str]) -> Box<dyn History> {
        let mut history = FileBackedHistory::new(100).unwrap();
        for line in lines {
            history.save(HistoryItem::from_command_line(*line)).unwrap();
        }
        Box::new(history)
    }

    #[test]
    fn test_empty_line_no_hint() {
        let mut hinter = HistoryHinter::new();
        let history = history_with(&["SELECT 1;"]);
        assert_eq!(hinter.handle("", 0, history.as_ref(), false, "/tmp"), "");
    }

    #[test]
    fn test_cursor_not_at_end_no_hint() {
        let mut hinter = HistoryHinter::new();
        let history = history_with(&["SELECT 1;"]);
        assert_eq!(hinter.handle("SELECT", 2, history.as_ref(), false, "/tmp"), "");
    }

    #[test]
    fn test_hint_from_history() {
        let mut hinter = HistoryHinter::new();
        let history = history_with(&["SELECT * FROM users;"]);

        let hint = hinter.handle("SELECT *", 8, history.as_ref(), false, "/tmp");
        assert_eq!(hint, " FROM users;");
        assert_eq!(hinter.complete_hint(), " FROM users;");
        assert_eq!(hinter.next_hint_token(), " FROM");
    }

    #[test]
    fn test_default_has_no_hint() {
        let hinter = HistoryHinter::default();
        assert_eq!(hinter.next_hint_token(), "");
        assert_eq!(hinter.complete_hint(), "");
    }
}
