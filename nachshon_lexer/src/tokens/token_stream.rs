//! Replayable, fully classified token sequence for one buffer

use crate::classifier::{self, FoldRange, HighlightCategory};
use crate::lexical::LexicalDiagnostic;
use crate::tokens::token::{Token, TokenKind};
use serde::Serialize;

/// A token with the tags the rendering layer consumes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedToken {
    pub token: Token,
    pub category: HighlightCategory,
    pub fold_boundary: bool,
}

impl ClassifiedToken {
    pub fn kind(&self) -> TokenKind {
        self.token.kind
    }
}

/// Token counts gathered when detailed metrics are enabled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub keywords: usize,
    pub builtins: usize,
    pub identifiers: usize,
    pub literals: usize,
    pub operators: usize,
    pub punctuation: usize,
    pub comments: usize,
    pub newlines: usize,
    pub synthetic: usize,
    pub max_indent_depth: usize,
}

impl LexicalMetrics {
    pub fn from_tokens(tokens: &[ClassifiedToken]) -> Self {
        let mut metrics = LexicalMetrics {
            total_tokens: tokens.len(),
            ..Default::default()
        };
        let mut depth = 0usize;

        for classified in tokens {
            match classified.token.kind {
                TokenKind::Keyword(role) if role.is_builtin() => metrics.builtins += 1,
                TokenKind::Keyword(_) => metrics.keywords += 1,
                TokenKind::Identifier => metrics.identifiers += 1,
                TokenKind::String | TokenKind::Number => metrics.literals += 1,
                TokenKind::Operator => metrics.operators += 1,
                TokenKind::Punctuation => metrics.punctuation += 1,
                TokenKind::Comment => metrics.comments += 1,
                TokenKind::Newline => metrics.newlines += 1,
                TokenKind::IndentOpen => {
                    metrics.synthetic += 1;
                    depth += 1;
                    metrics.max_indent_depth = metrics.max_indent_depth.max(depth);
                }
                TokenKind::IndentClose => {
                    metrics.synthetic += 1;
                    depth = depth.saturating_sub(1);
                }
                TokenKind::EndOfInput => {}
            }
        }
        metrics
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenStream {
    #[serde(skip)]
    source: String,
    tokens: Vec<ClassifiedToken>,
    diagnostics: Vec<LexicalDiagnostic>,
    suppressed_diagnostics: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<LexicalMetrics>,
}

impl TokenStream {
    pub fn new(
        source: impl Into<String>,
        tokens: Vec<ClassifiedToken>,
        diagnostics: Vec<LexicalDiagnostic>,
        suppressed_diagnostics: usize,
        metrics: Option<LexicalMetrics>,
    ) -> Self {
        Self {
            source: source.into(),
            tokens,
            diagnostics,
            suppressed_diagnostics,
            metrics,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[ClassifiedToken] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClassifiedToken> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ClassifiedToken> {
        self.tokens.get(index)
    }

    pub fn diagnostics(&self) -> &[LexicalDiagnostic] {
        &self.diagnostics
    }

    /// Anomalies dropped after the diagnostic cap was reached
    pub fn suppressed_diagnostics(&self) -> usize {
        self.suppressed_diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(LexicalDiagnostic::is_error)
    }

    pub fn metrics(&self) -> Option<&LexicalMetrics> {
        self.metrics.as_ref()
    }

    /// Rebuild the buffer from trivia and token text
    pub fn reconstruct(&self) -> String {
        let mut out = String::with_capacity(self.source.len());
        for classified in &self.tokens {
            out.push_str(classified.token.trivia.slice(&self.source));
            out.push_str(&classified.token.text);
        }
        out
    }

    /// `IndentOpen` count minus `IndentClose` count
    pub fn indent_balance(&self) -> isize {
        self.tokens.iter().fold(0, |balance, t| match t.token.kind {
            TokenKind::IndentOpen => balance + 1,
            TokenKind::IndentClose => balance - 1,
            _ => balance,
        })
    }

    pub fn fold_ranges(&self) -> Vec<FoldRange> {
        classifier::fold_ranges(&self.tokens)
    }

    /// Matched bracket pairs as (open index, close index), ordered by open index
    pub fn bracket_pairs(&self) -> Vec<(usize, usize)> {
        classifier::bracket_pairs(&self.tokens)
    }

    pub fn matching_bracket(&self, index: usize) -> Option<usize> {
        classifier::matching_bracket(&self.tokens, index)
    }

    /// Index of the token whose text covers `offset`, if any
    pub fn token_at_offset(&self, offset: usize) -> Option<usize> {
        self.tokens.iter().position(|t| {
            !t.token.kind.is_synthetic() && t.token.start() <= offset && offset < t.token.end()
        })
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a ClassifiedToken;
    type IntoIter = std::slice::Iter<'a, ClassifiedToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
