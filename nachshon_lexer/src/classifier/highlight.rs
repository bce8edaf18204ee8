//! Highlight categories attached to tokens for the rendering layer

use crate::symbols::SymbolRole;
use crate::tokens::TokenKind;
use serde::Serialize;

/// Presentation-neutral tag; color and style are decided by the consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HighlightCategory {
    ControlKeyword,
    DefinitionKeyword,
    ModuleKeyword,
    OperatorKeyword,
    Keyword,
    LiteralValue,
    BuiltinFunction,
    IdentifierBinding,
    IdentifierUse,
    StringLiteral,
    NumericLiteral,
    Comment,
    Operator,
    Punctuation,
    Bracket,
    /// Newlines, indentation and end of input
    Layout,
}

impl HighlightCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            HighlightCategory::ControlKeyword => "controlKeyword",
            HighlightCategory::DefinitionKeyword => "definitionKeyword",
            HighlightCategory::ModuleKeyword => "moduleKeyword",
            HighlightCategory::OperatorKeyword => "operatorKeyword",
            HighlightCategory::Keyword => "keyword",
            HighlightCategory::LiteralValue => "literalValue",
            HighlightCategory::BuiltinFunction => "builtinFunction",
            HighlightCategory::IdentifierBinding => "identifierBinding",
            HighlightCategory::IdentifierUse => "identifierUse",
            HighlightCategory::StringLiteral => "stringLiteral",
            HighlightCategory::NumericLiteral => "numericLiteral",
            HighlightCategory::Comment => "comment",
            HighlightCategory::Operator => "operator",
            HighlightCategory::Punctuation => "punctuation",
            HighlightCategory::Bracket => "bracket",
            HighlightCategory::Layout => "layout",
        }
    }
}

/// Every category, in legend order
pub const HIGHLIGHT_CATEGORIES: &[HighlightCategory] = &[
    HighlightCategory::ControlKeyword,
    HighlightCategory::DefinitionKeyword,
    HighlightCategory::ModuleKeyword,
    HighlightCategory::OperatorKeyword,
    HighlightCategory::Keyword,
    HighlightCategory::LiteralValue,
    HighlightCategory::BuiltinFunction,
    HighlightCategory::IdentifierBinding,
    HighlightCategory::IdentifierUse,
    HighlightCategory::StringLiteral,
    HighlightCategory::NumericLiteral,
    HighlightCategory::Comment,
    HighlightCategory::Operator,
    HighlightCategory::Punctuation,
    HighlightCategory::Bracket,
    HighlightCategory::Layout,
];

pub fn is_bracket(text: &str) -> bool {
    matches!(text, "(" | ")" | "[" | "]" | "{" | "}")
}

fn keyword_category(role: SymbolRole) -> HighlightCategory {
    match role {
        SymbolRole::ControlFlow | SymbolRole::Exception => HighlightCategory::ControlKeyword,
        SymbolRole::Definition => HighlightCategory::DefinitionKeyword,
        SymbolRole::Literal => HighlightCategory::LiteralValue,
        SymbolRole::LogicalOperator => HighlightCategory::OperatorKeyword,
        SymbolRole::Import => HighlightCategory::ModuleKeyword,
        SymbolRole::Builtin => HighlightCategory::BuiltinFunction,
        SymbolRole::Other => HighlightCategory::Keyword,
    }
}

/// Category for a token.
///
/// `text` only matters for punctuation (brackets) and `binds` only for identifiers
/// (whether a binding keyword precedes them).
pub fn category_for(kind: TokenKind, text: &str, binds: bool) -> HighlightCategory {
    match kind {
        TokenKind::Keyword(role) => keyword_category(role),
        TokenKind::Identifier if binds => HighlightCategory::IdentifierBinding,
        TokenKind::Identifier => HighlightCategory::IdentifierUse,
        TokenKind::String => HighlightCategory::StringLiteral,
        TokenKind::Number => HighlightCategory::NumericLiteral,
        TokenKind::Comment => HighlightCategory::Comment,
        TokenKind::Operator => HighlightCategory::Operator,
        TokenKind::Punctuation if is_bracket(text) => HighlightCategory::Bracket,
        TokenKind::Punctuation => HighlightCategory::Punctuation,
        TokenKind::Newline
        | TokenKind::IndentOpen
        | TokenKind::IndentClose
        | TokenKind::EndOfInput => HighlightCategory::Layout,
    }
}
