//! Left-context tokenizer
//!
//! Recovers the words that precede the cursor from a raw input line. The scan
//! runs right to left and is deliberately forgiving: unbalanced quotes or
//! parentheses never fail, they only produce odd words.

/// Characters that separate words for completion purposes.
pub const WORD_BREAKS: &[u8] = b"\t\n@$><=;|&{() ";

/// Check whether a byte is one of the word-break characters
fn is_break(byte: u8) -> bool {
    WORD_BREAKS.contains(&byte)
}

/// Clamp a cursor to the buffer length and back it off to a char boundary
fn clamp_cursor(buffer: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(buffer.len());
    while !buffer.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}

/// Locate the word being completed.
///
/// # Arguments
/// * `buffer` - The full input line
/// * `cursor` - Cursor position (byte index)
///
/// # Returns
/// * `(usize, &str)` - Byte offset where the word starts and the text typed so far
pub fn current_word(buffer: &str, cursor: usize) -> (usize, &str) {
    let cursor = clamp_cursor(buffer, cursor);
    let start = buffer.as_bytes()[..cursor]
        .iter()
        .rposition(|&b| is_break(b))
        .map_or(0, |i| i + 1);

    (start, &buffer[start..cursor])
}

/// Return the `count` words before the word under the cursor.
///
/// Index 0 is the word immediately left of the current one. Missing words are
/// returned as empty strings, so the result always has exactly `count`
/// entries.
///
/// # Arguments
/// * `buffer` - The full input line
/// * `cursor` - Cursor position (byte index)
/// * `count` - Number of words to recover
pub fn previous_words(buffer: &str, cursor: usize, count: usize) -> Vec<String> {
    let cursor = clamp_cursor(buffer, cursor);
    let buf = buffer.as_bytes();

    // Skip the word under the cursor; `point` is the last byte still to scan.
    let mut point = buf[..cursor].iter().rposition(|&b| is_break(b));
    let mut words = Vec::with_capacity(count);

    for _ in 0..count {
        let end = point.and_then(|p| buf[..=p].iter().rposition(|b| !b.is_ascii_whitespace()));

        match end {
            Some(end) => {
                let start = word_start(buf, end);
                point = start.checked_sub(1);
                words.push(String::from_utf8_lossy(&buf[start..=end]).into_owned());
            }
            None => {
                point = None;
                words.push(String::new());
            }
        }
    }

    tracing::trace!("previous words: {:?}", words);
    words
}

/// Find where the word ending at `end` begins.
///
/// Break characters inside double quotes do not end a word. A parenthesized
/// group is returned as its own word, starting at the opening parenthesis.
fn word_start(buf: &[u8], end: usize) -> usize {
    let mut in_quotes = false;
    let mut depth: i32 = 0;
    let mut start = end;

    while start > 0 {
        let byte = buf[start];

        if byte == b'"' {
            in_quotes = !in_quotes;
            // A closing scan over an opening quote may sit right after a break
            if !in_quotes && depth == 0 && is_break(buf[start - 1]) {
                break;
            }
        } else if !in_quotes {
            if byte == b')' {
                depth += 1;
            } else if byte == b'(' {
                depth -= 1;
                if depth <= 0 {
                    break;
                }
            } else if depth == 0 && is_break(buf[start - 1]) {
                break;
            }
        }

        start -= 1;
    }

    start
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &str, count: usize) -> Vec<String> {
        previous_words(line, line.len(), count)
    }

    #[test]
    fn test_previous_words_simple() {
        assert_eq!(words("SELECT * FROM ", 2), vec!["FROM", "*"]);
        assert_eq!(words("INSERT INTO fo", 3), vec!["INTO", "INSERT", ""]);
    }

    #[test]
    fn test_previous_words_empty_buffer() {
        assert_eq!(words("", 6), vec![""; 6]);
        assert_eq!(previous_words("ALTER TABLE ", 0, 3), vec![""; 3]);
    }

    #[test]
    fn test_previous_words_first_word_has_no_context() {
        assert_eq!(words("SEL", 2), vec!["", ""]);
    }

    #[test]
    fn test_previous_words_quoted_identifier() {
        assert_eq!(words("SELECT \"a b\" FROM", 1), vec!["\"a b\""]);
        assert_eq!(words("SELECT \"a b\" FROM", 2), vec!["\"a b\"", "SELECT"]);
    }

    #[test]
    fn test_previous_words_parenthesized_group() {
        let result = words("DROP FUNCTION foo(int, text) ", 4);
        assert_eq!(result, vec!["(int, text)", "foo", "FUNCTION", "DROP"]);
    }

    #[test]
    fn test_previous_words_open_paren() {
        assert_eq!(words("INSERT INTO t (", 4), vec!["(", "t", "INTO", "INSERT"]);
    }

    #[test]
    fn test_previous_words_equals_is_a_word() {
        assert_eq!(words("SET DateStyle = ", 3), vec!["=", "DateStyle", "SET"]);
    }

    #[test]
    fn test_previous_words_cursor_mid_line() {
        let line = "ALTER TABLE users RENAME";
        // Cursor right after "users "
        assert_eq!(previous_words(line, 18, 2), vec!["users", "TABLE"]);
    }

    #[test]
    fn test_previous_words_always_returns_count() {
        for line in ["", "(", "\"", "a b c", ")))", "((( x", "\"unterminated quote ", "  "] {
            for cursor in 0..=line.len() {
                let result = previous_words(line, cursor, 6);
                assert_eq!(result.len(), 6, "line {line:?} cursor {cursor}");
                for word in result {
                    assert!(word.is_empty() || line.contains(&word), "{word:?} not in {line:?}");
                }
            }
        }
    }

    #[test]
    fn test_previous_words_non_ascii() {
        assert_eq!(words("SELECT * FROM café ", 2), vec!["café", "FROM"]);
        // Cursor inside a multi-byte char is backed off
        let line = "FROM é";
        assert_eq!(previous_words(line, 6, 1), vec!["FROM"]);
    }

    #[test]
    fn test_current_word() {
        assert_eq!(current_word("SELECT * FROM us", 16), (14, "us"));
        assert_eq!(current_word("SELECT * FROM ", 14), (14, ""));
        assert_eq!(current_word("\\dt pub", 7), (4, "pub"));
        assert_eq!(current_word(":my", 3), (0, ":my"));
        assert_eq!(current_word("", 0), (0, ""));
    }

    #[test]
    fn test_current_word_after_paren() {
        assert_eq!(current_word("INSERT INTO t (na", 17), (15, "na"));
    }
}
