//! Core token-producing state machine
//!
//! The lexer walks the buffer one character at a time and never fails on user
//! text: malformed input becomes a diagnostic plus the best-effort token. Only the
//! caller-facing entry point `next_token` can fail, and only for an offset that
//! lands inside a multi-byte character.

use super::chars::{
    is_digit, is_identifier_continue, is_identifier_start, is_line_break, is_quote,
    is_whitespace,
};
use super::diagnostic::{DiagnosticKind, Diagnostics, LexicalDiagnostic};
use crate::logging::codes;
use crate::symbols::SymbolTable;
use crate::tokens::{Token, TokenKind};
use crate::utils::{Position, Span};

/// Contract violations for the offset-based entry point
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("Offset {offset} does not fall on a character boundary")]
    NotCharBoundary { offset: usize },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::NotCharBoundary { .. } => codes::lexical::OFFSET_NOT_CHAR_BOUNDARY,
        }
    }
}

/// Operators, longest spelling first so the first match is the maximal munch
pub const OPERATORS: &[&str] = &[
    "**=", "//=", "==", "!=", "<=", ">=", "+=", "-=", "*=", "/=", "%=", "**", "//", "->", "<",
    ">", "+", "-", "*", "/", "%", "=", "@",
];

pub const PUNCTUATION: &[char] = &['(', ')', '[', ']', '{', '}', ':', ',', '.'];

/// What the character at the cursor starts, decided before anything is consumed
#[derive(Debug, Clone, Copy)]
enum Scan {
    Newline,
    Comment,
    String(char),
    Number,
    Word,
    Operator(&'static str),
    Punctuation,
}

pub struct LexicalAnalyzer<'a> {
    source: &'a str,
    pos: Position,
    table: &'static SymbolTable,
    diagnostics: Diagnostics,
}

impl<'a> LexicalAnalyzer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: Position::start(),
            table: SymbolTable::global(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Analyzer positioned at a byte offset. Offsets at or past the end of the
    /// buffer position it at the end.
    pub fn at_offset(source: &'a str, offset: usize) -> Result<Self, LexerError> {
        let mut analyzer = Self::new(source);
        if offset >= source.len() {
            analyzer.advance_to(source.len());
        } else if source.is_char_boundary(offset) {
            analyzer.advance_to(offset);
        } else {
            return Err(LexerError::NotCharBoundary { offset });
        }
        Ok(analyzer)
    }

    /// Walk the cursor forward to `offset` without producing tokens
    fn advance_to(&mut self, offset: usize) {
        while self.pos.offset < offset && self.bump().is_some() {}
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos.offset >= self.source.len()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub(crate) fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    /// Run of spaces and tabs at the cursor, not consumed
    pub fn leading_whitespace(&self) -> &'a str {
        let rest = self.rest();
        let end = rest.find(|c| !is_whitespace(c)).unwrap_or(rest.len());
        &rest[..end]
    }

    /// Character after the leading whitespace run, if any
    pub fn char_after_whitespace(&self) -> Option<char> {
        self.rest()[self.leading_whitespace().len()..].chars().next()
    }

    /// Produce the next token; `EndOfInput` once the buffer is exhausted.
    ///
    /// Whitespace and unrecognized characters before the token become its trivia.
    pub fn next_token(&mut self) -> Token {
        let trivia_start = self.pos;
        let mut unknown_start: Option<Position> = None;

        loop {
            let Some(ch) = self.peek() else {
                self.flush_unrecognized(&mut unknown_start);
                let end = Span::point(self.pos);
                return Token::new(
                    TokenKind::EndOfInput,
                    "",
                    end,
                    Span::new(trivia_start, self.pos),
                );
            };

            if is_whitespace(ch) {
                self.flush_unrecognized(&mut unknown_start);
                self.bump();
                continue;
            }

            let Some(scan) = self.classify_start(ch) else {
                unknown_start.get_or_insert(self.pos);
                self.bump();
                continue;
            };

            self.flush_unrecognized(&mut unknown_start);
            let start = self.pos;
            let kind = match scan {
                Scan::Newline => {
                    self.lex_newline();
                    TokenKind::Newline
                }
                Scan::Comment => {
                    self.bump_while(|c| !is_line_break(c));
                    TokenKind::Comment
                }
                Scan::String(quote) => {
                    self.lex_string(quote);
                    TokenKind::String
                }
                Scan::Number => {
                    self.lex_number();
                    TokenKind::Number
                }
                Scan::Word => self.lex_word(),
                Scan::Operator(op) => {
                    for _ in op.chars() {
                        self.bump();
                    }
                    TokenKind::Operator
                }
                Scan::Punctuation => {
                    self.bump();
                    TokenKind::Punctuation
                }
            };

            let span = Span::new(start, self.pos);
            return Token::new(
                kind,
                span.slice(self.source),
                span,
                Span::new(trivia_start, start),
            );
        }
    }

    // ========================================================================
    // Private scanning methods
    // ========================================================================

    fn rest(&self) -> &'a str {
        &self.source[self.pos.offset..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    /// Consume one character; a lone `\r` counts as a line break
    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos = if ch == '\r' && self.peek_second() != Some('\n') {
            Position::new(self.pos.offset + 1, self.pos.line + 1, 1)
        } else {
            self.pos.advance(ch)
        };
        Some(ch)
    }

    fn bump_while(&mut self, predicate: impl Fn(char) -> bool) -> usize {
        let mut count = 0;
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.bump();
            count += 1;
        }
        count
    }

    fn classify_start(&self, ch: char) -> Option<Scan> {
        if is_line_break(ch) {
            return Some(Scan::Newline);
        }
        if ch == '#' {
            return Some(Scan::Comment);
        }
        if is_quote(ch) {
            return Some(Scan::String(ch));
        }
        if is_digit(ch) || (ch == '.' && self.peek_second().is_some_and(is_digit)) {
            return Some(Scan::Number);
        }
        if is_identifier_start(ch) {
            return Some(Scan::Word);
        }
        let rest = self.rest();
        if let Some(op) = OPERATORS.iter().find(|op| rest.starts_with(**op)) {
            return Some(Scan::Operator(*op));
        }
        if PUNCTUATION.contains(&ch) {
            return Some(Scan::Punctuation);
        }
        None
    }

    fn flush_unrecognized(&mut self, unknown_start: &mut Option<Position>) {
        let Some(start) = unknown_start.take() else {
            return;
        };
        let span = Span::new(start, self.pos);
        let text = span.slice(self.source);
        self.diagnostics.push(LexicalDiagnostic::new(
            DiagnosticKind::UnrecognizedCharacter,
            span,
            format!("Unrecognized character sequence '{}'", text.escape_debug()),
        ));
    }

    fn lex_newline(&mut self) {
        if self.bump() == Some('\r') && self.peek() == Some('\n') {
            self.bump();
        }
    }

    fn lex_string(&mut self, quote: char) {
        let start = self.pos;
        self.bump();

        loop {
            match self.bump() {
                None => {
                    self.diagnostics.push(LexicalDiagnostic::new(
                        DiagnosticKind::UnterminatedString,
                        Span::new(start, self.pos),
                        format!("String literal opened with {} is never closed", quote),
                    ));
                    return;
                }
                Some('\\') => {
                    self.bump();
                }
                Some(c) if c == quote => return,
                Some(_) => {}
            }
        }
    }

    fn lex_number(&mut self) {
        let start = self.pos;
        let mut dots = 0;
        while let Some(ch) = self.peek() {
            match ch {
                '.' => dots += 1,
                c if is_digit(c) => {}
                _ => break,
            }
            self.bump();
        }

        if dots > 1 {
            let span = Span::new(start, self.pos);
            self.diagnostics.push(LexicalDiagnostic::new(
                DiagnosticKind::MalformedNumber,
                span,
                format!(
                    "Number literal '{}' has {} decimal points",
                    span.slice(self.source),
                    dots
                ),
            ));
        }
    }

    fn lex_word(&mut self) -> TokenKind {
        let start = self.pos.offset;
        self.bump_while(is_identifier_continue);
        let word = &self.source[start..self.pos.offset];

        match self.table.lookup(word) {
            Some(entry) => TokenKind::Keyword(entry.role),
            None => TokenKind::Identifier,
        }
    }
}

/// Lex one token starting at byte `offset`; returns the token and the offset after it.
///
/// Repeated calls starting from 0 walk the buffer until `EndOfInput`, which is
/// returned with `next == buffer.len()` for any offset at or past the end.
/// Indentation tokens are not produced here.
///
/// Each call re-walks the buffer up to `offset` to recover line and column, so
/// driving a whole buffer this way is quadratic. [`super::Scanner`] and
/// [`LexicalAnalyzer::next_token`] keep the cursor between tokens and are linear.
/// Anomalies found by this call are dropped; use [`next_token_with_diagnostics`]
/// to keep them.
pub fn next_token(buffer: &str, offset: usize) -> Result<(Token, usize), LexerError> {
    let (token, next, _) = next_token_with_diagnostics(buffer, offset)?;
    Ok((token, next))
}

/// [`next_token`] plus the anomalies found while producing the token
pub fn next_token_with_diagnostics(
    buffer: &str,
    offset: usize,
) -> Result<(Token, usize, Vec<LexicalDiagnostic>), LexerError> {
    let mut analyzer = LexicalAnalyzer::at_offset(buffer, offset)?;
    let token = analyzer.next_token();
    let next = analyzer.position().offset;
    let (diagnostics, _) = analyzer.into_diagnostics().into_parts();
    Ok((token, next, diagnostics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::SymbolRole;
    use assert_matches::assert_matches;

    fn lex_all(source: &str) -> (Vec<Token>, Diagnostics) {
        let mut analyzer = LexicalAnalyzer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = analyzer.next_token();
            let done = token.kind == TokenKind::EndOfInput;
            tokens.push(token);
            if done {
                break;
            }
        }
        (tokens, analyzer.into_diagnostics())
    }

    fn kinds_and_text(source: &str) -> Vec<(TokenKind, String)> {
        lex_all(source)
            .0
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn test_empty_input_is_end_of_input() {
        let (tokens, diagnostics) = lex_all("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::EndOfInput);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_keyword_precedence() {
        for source in ["אם", "  אם  ", "(אם)", "x=אם"] {
            let tokens = lex_all(source).0;
            let keyword = tokens.iter().find(|t| t.text == "אם").unwrap();
            assert_eq!(keyword.kind, TokenKind::Keyword(SymbolRole::ControlFlow));
        }

        // Longer words containing a keyword are identifiers
        let tokens = lex_all("אםם").0;
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_maximal_munch_operators() {
        assert_eq!(
            kinds_and_text("== // ** -> **= = /"),
            vec![
                (TokenKind::Operator, "==".to_string()),
                (TokenKind::Operator, "//".to_string()),
                (TokenKind::Operator, "**".to_string()),
                (TokenKind::Operator, "->".to_string()),
                (TokenKind::Operator, "**=".to_string()),
                (TokenKind::Operator, "=".to_string()),
                (TokenKind::Operator, "/".to_string()),
                (TokenKind::EndOfInput, String::new()),
            ]
        );
    }

    #[test]
    fn test_newlines_preserve_exact_text() {
        let texts: Vec<String> = lex_all("א\r\nב\nג\rד")
            .0
            .into_iter()
            .filter(|t| t.kind == TokenKind::Newline)
            .map(|t| t.text)
            .collect();
        assert_eq!(texts, vec!["\r\n", "\n", "\r"]);

        let tokens = lex_all("א\rב").0;
        assert_eq!(tokens[2].span.start().line, 2);
        assert_eq!(tokens[2].span.start().column, 1);
    }

    #[test]
    fn test_comment_runs_to_line_end() {
        let tokens = lex_all("# הערה\nא").0;
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].text, "# הערה");
        assert_eq!(tokens[1].kind, TokenKind::Newline);
    }

    #[test]
    fn test_strings_with_escapes() {
        let tokens = lex_all(r#""שלום \"עולם\"" 'a\'b'"#).0;
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, r#""שלום \"עולם\"""#);
        assert_eq!(tokens[1].kind, TokenKind::String);
        assert_eq!(tokens[1].text, r"'a\'b'");
    }

    #[test]
    fn test_unterminated_string_spans_to_end_of_input() {
        let source = "הדפס(\"שלום\n";
        let (tokens, diagnostics) = lex_all(source);

        let string = tokens.iter().find(|t| t.kind == TokenKind::String).unwrap();
        assert_eq!(string.end(), source.len());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.entries()[0].kind,
            DiagnosticKind::UnterminatedString
        );
        assert_eq!(tokens.last().unwrap().kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_trailing_backslash_in_string() {
        let (tokens, diagnostics) = lex_all("'\\");
        assert_eq!(tokens[0].text, "'\\");
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds_and_text("42 3.14 .5 1.2.3"),
            vec![
                (TokenKind::Number, "42".to_string()),
                (TokenKind::Number, "3.14".to_string()),
                (TokenKind::Number, ".5".to_string()),
                (TokenKind::Number, "1.2.3".to_string()),
                (TokenKind::EndOfInput, String::new()),
            ]
        );

        let diagnostics = lex_all("1.2.3").1;
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.entries()[0].kind, DiagnosticKind::MalformedNumber);
    }

    #[test]
    fn test_dot_without_digit_is_punctuation() {
        assert_eq!(
            kinds_and_text("א.ב"),
            vec![
                (TokenKind::Identifier, "א".to_string()),
                (TokenKind::Punctuation, ".".to_string()),
                (TokenKind::Identifier, "ב".to_string()),
                (TokenKind::EndOfInput, String::new()),
            ]
        );
    }

    #[test]
    fn test_unrecognized_characters_become_trivia() {
        let source = "א $$ ב ! ג";
        let (tokens, diagnostics) = lex_all(source);

        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::EndOfInput
            ]
        );
        assert_eq!(tokens[1].trivia.slice(source), " $$ ");
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.entries()[0].span.slice(source), "$$");
        assert_eq!(diagnostics.entries()[1].span.slice(source), "!");
    }

    #[test]
    fn test_trivia_and_text_reconstruct_source() {
        let source = "פונקציה   שלום(x):\t# הערה\r\n  החזר x ** 2 ¤\n";
        let tokens = lex_all(source).0;

        let mut rebuilt = String::new();
        for token in &tokens {
            rebuilt.push_str(token.trivia.slice(source));
            rebuilt.push_str(&token.text);
        }
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn test_columns_count_characters() {
        let tokens = lex_all("אם אמת").0;
        assert_eq!(tokens[1].span.start().column, 4);
        assert_eq!(tokens[1].span.start().offset, "אם ".len());
    }

    #[test]
    fn test_next_token_contract() {
        let source = "אם אמת";
        let (token, next) = next_token(source, 0).unwrap();
        assert_eq!(token.text, "אם");
        assert_eq!(next, 4);

        let (token, next) = next_token(source, next).unwrap();
        assert_eq!(token.text, "אמת");
        assert_eq!(next, source.len());

        let (token, next) = next_token(source, next).unwrap();
        assert_eq!(token.kind, TokenKind::EndOfInput);
        assert_eq!(next, source.len());

        assert_matches!(
            next_token(source, 1),
            Err(LexerError::NotCharBoundary { offset: 1 })
        );
    }

    #[test]
    fn test_offset_past_end_yields_end_of_input() {
        let source = "אם";
        let (token, next) = next_token(source, 10).unwrap();
        assert_eq!(token.kind, TokenKind::EndOfInput);
        assert_eq!(token.text, "");
        assert_eq!(next, source.len());
        assert_eq!(token.span.start().offset, source.len());
        assert_eq!(token.span.start().column, 3);

        assert_matches!(next_token("", 0), Ok((Token { kind: TokenKind::EndOfInput, .. }, 0)));
        assert_matches!(next_token("", 3), Ok((Token { kind: TokenKind::EndOfInput, .. }, 0)));
    }

    #[test]
    fn test_offset_position_tracks_lines() {
        let source = "א\r\nב\rג";
        let (token, _) = next_token(source, "א\r\nב\r".len()).unwrap();
        assert_eq!(token.text, "ג");
        assert_eq!(token.span.start().line, 3);
        assert_eq!(token.span.start().column, 1);

        let (token, _) = next_token(source, "א\r\n".len()).unwrap();
        assert_eq!(token.text, "ב");
        assert_eq!(token.span.start().line, 2);
    }

    #[test]
    fn test_next_token_with_diagnostics() {
        let source = "א \"פתוח";
        let (token, next, diagnostics) =
            next_token_with_diagnostics(source, "א ".len()).unwrap();
        assert_eq!(token.kind, TokenKind::String);
        assert_eq!(next, source.len());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::UnterminatedString);

        let (_, _, diagnostics) = next_token_with_diagnostics(source, 0).unwrap();
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_leading_whitespace_is_not_consumed() {
        let analyzer = LexicalAnalyzer::new("  \tאם");
        assert_eq!(analyzer.leading_whitespace(), "  \t");
        assert_eq!(analyzer.char_after_whitespace(), Some('א'));
        assert_eq!(analyzer.position().offset, 0);
    }
}
