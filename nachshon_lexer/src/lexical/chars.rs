//! Character classes used by the lexer and the completion provider.
//!
//! All functions are total: every `char` gets an answer.

/// Hebrew block, U+0590 through U+05FF
pub fn is_hebrew(ch: char) -> bool {
    ('\u{0590}'..='\u{05FF}').contains(&ch)
}

pub fn is_identifier_start(ch: char) -> bool {
    is_hebrew(ch) || ch.is_ascii_alphabetic() || ch == '_'
}

pub fn is_identifier_continue(ch: char) -> bool {
    is_identifier_start(ch) || ch.is_ascii_digit()
}

/// Horizontal whitespace only; line breaks are tokens of their own
pub fn is_whitespace(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

pub fn is_line_break(ch: char) -> bool {
    ch == '\n' || ch == '\r'
}

pub fn is_quote(ch: char) -> bool {
    ch == '"' || ch == '\''
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hebrew_block_bounds() {
        assert!(is_hebrew('\u{0590}'));
        assert!(is_hebrew('א'));
        assert!(is_hebrew('ת'));
        assert!(is_hebrew('\u{05FF}'));
        assert!(!is_hebrew('\u{058F}'));
        assert!(!is_hebrew('\u{0600}'));
    }

    #[test]
    fn test_identifier_classes() {
        for ch in ['א', 'ש', 'a', 'Z', '_'] {
            assert!(is_identifier_start(ch), "{:?}", ch);
            assert!(is_identifier_continue(ch), "{:?}", ch);
        }

        assert!(!is_identifier_start('7'));
        assert!(is_identifier_continue('7'));

        for ch in ['-', '.', ' ', 'é', 'ب', '$'] {
            assert!(!is_identifier_continue(ch), "{:?}", ch);
        }
    }

    #[test]
    fn test_whitespace_excludes_line_breaks() {
        assert!(is_whitespace(' '));
        assert!(is_whitespace('\t'));
        assert!(!is_whitespace('\n'));
        assert!(!is_whitespace('\r'));
        assert!(!is_whitespace('\u{00A0}'));
        assert!(is_line_break('\r'));
    }
}
