//! Token value type

use crate::symbols::SymbolRole;
use crate::utils::Span;
use serde::Serialize;
use std::fmt;

/// Closed set of token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Comment,
    String,
    Number,
    Keyword(SymbolRole),
    Identifier,
    Operator,
    Punctuation,
    Newline,
    IndentOpen,
    IndentClose,
    EndOfInput,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Comment => "Comment",
            TokenKind::String => "String",
            TokenKind::Number => "Number",
            TokenKind::Keyword(_) => "Keyword",
            TokenKind::Identifier => "Identifier",
            TokenKind::Operator => "Operator",
            TokenKind::Punctuation => "Punctuation",
            TokenKind::Newline => "Newline",
            TokenKind::IndentOpen => "IndentOpen",
            TokenKind::IndentClose => "IndentClose",
            TokenKind::EndOfInput => "EndOfInput",
        }
    }

    /// Zero-width tokens produced by the indentation tracker
    pub fn is_synthetic(&self) -> bool {
        matches!(self, TokenKind::IndentOpen | TokenKind::IndentClose)
    }

    pub fn role(&self) -> Option<SymbolRole> {
        match self {
            TokenKind::Keyword(role) => Some(*role),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(role) => write!(f, "Keyword[{}]", role),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// One lexed token.
///
/// `text` is the exact source substring under `span`. Whitespace and unrecognized
/// characters skipped before the token are recorded in `trivia`, which ends where
/// `span` starts. Synthetic tokens have empty text and empty trivia.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
    pub trivia: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span, trivia: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            trivia,
        }
    }

    /// Zero-width synthetic token at `span.start`
    pub fn synthetic(kind: TokenKind, span: Span) -> Self {
        let point = Span::point(span.start());
        Self {
            kind,
            text: String::new(),
            span: point,
            trivia: point,
        }
    }

    pub fn start(&self) -> usize {
        self.span.start().offset
    }

    pub fn end(&self) -> usize {
        self.span.end().offset
    }

    pub fn is_keyword(&self) -> bool {
        matches!(self.kind, TokenKind::Keyword(_))
    }

    pub fn is_punctuation(&self, text: &str) -> bool {
        self.kind == TokenKind::Punctuation && self.text == text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}({:?})", self.kind, self.text)
        }
    }
}
