//! Validator for reedline - decides when a statement is ready to submit

use reedline::{ValidationResult, Validator};

/// Statement validator
///
/// Backslash commands end at the newline. SQL continues on the next line
/// until a `;` appears outside quotes, comments and parentheses.
pub struct StatementValidator;

impl StatementValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Check whether SQL input is terminated by a top-level semicolon
    fn is_terminated(&self, input: &str) -> bool {
        let mut quote: Option<char> = None;
        let mut paren_depth = 0i32;
        let mut in_line_comment = false;
        let mut terminated = false;
        let mut chars = input.chars().peekable();

        while let Some(ch) = chars.next() {
            if in_line_comment {
                in_line_comment = ch != '\n';
                continue;
            }

            if let Some(open) = quote {
                if ch == open {
                    // Doubled quotes stay inside the literal
                    if chars.peek() == Some(&open) {
                        chars.next();
                    } else {
                        quote = None;
                    }
                }
                continue;
            }

            match ch {
                '\'' | '"' => quote = Some(ch),
                '-' if chars.peek() == Some(&'-') => {
                    in_line_comment = true;
                    continue;
                }
                '(' => paren_depth += 1,
                ')' => paren_depth -= 1,
                ';' if paren_depth <= 0 => {
                    terminated = true;
                    continue;
                }
                _ => {}
            }

            if !ch.is_whitespace() {
                terminated = false;
            }
        }

        quote.is_none() && terminated
    }
}

impl Default for StatementValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for StatementValidator {
    fn validate(&self, line: &str) -> ValidationResult {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('\\') {
            return ValidationResult::Complete;
        }

        if self.is_terminated(trimmed) {
            ValidationResult::Complete
        } else {
            ValidationResult::Incomplete
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(line: &str) -> ValidationResult {
        StatementValidator::new().validate(line)
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(validate(""), ValidationResult::Complete));
        assert!(matches!(validate("   "), ValidationResult::Complete));
    }

    #[test]
    fn test_backslash_commands_are_single_line() {
        assert!(matches!(validate("\\set x 1"), ValidationResult::Complete));
        assert!(matches!(validate("\\q"), ValidationResult::Complete));
    }

    #[test]
    fn test_statement_needs_semicolon() {
        assert!(matches!(validate("SELECT 1"), ValidationResult::Incomplete));
        assert!(matches!(validate("SELECT 1;"), ValidationResult::Complete));
        assert!(matches!(validate("SELECT 1;  "), ValidationResult::Complete));
    }

    #[test]
    fn test_semicolon_inside_literal_or_parens() {
        assert!(matches!(validate("SELECT ';'"), ValidationResult::Incomplete));
        assert!(matches!(validate("SELECT 'it''s;'"), ValidationResult::Incomplete));
        assert!(matches!(validate("SELECT 'it''s';"), ValidationResult::Complete));
        assert!(matches!(
            validate("CREATE RULE r AS ON INSERT TO t DO (SELECT 1;"),
            ValidationResult::Incomplete
        ));
    }

    #[test]
    fn test_semicolon_in_comment() {
        assert!(matches!(validate("SELECT 1 -- done;"), ValidationResult::Incomplete));
        assert!(matches!(validate("SELECT 1; -- done"), ValidationResult::Complete));
    }

    #[test]
    fn test_text_after_semicolon() {
        assert!(matches!(validate("SELECT 1; SELECT 2"), ValidationResult::Incomplete));
    }
}
