//! Token stream facade: drives the scanner and tags every token with a highlight
//! category and a fold flag.
//!
//! [`Classifier`] is the lazy form; [`tokenize`] collects it into a replayable
//! [`TokenStream`]. Re-running on the same buffer yields the same sequence.

pub mod brackets;
pub mod folding;
pub mod highlight;

pub use brackets::{bracket_pairs, matching_bracket};
pub use folding::{fold_ranges, FoldRange};
pub use highlight::{category_for, HighlightCategory, HIGHLIGHT_CATEGORIES};

use crate::config::LexicalPreferences;
use crate::lexical::{Diagnostics, Scanner};
use crate::logging::codes;
use crate::symbols::SymbolTable;
use crate::tokens::{ClassifiedToken, LexicalMetrics, Token, TokenKind, TokenStream};
use std::collections::VecDeque;
use std::iter::FusedIterator;

/// Lazy classified token sequence for one buffer
pub struct Classifier<'a> {
    scanner: Scanner<'a>,
    lookahead: VecDeque<Token>,
    table: &'static SymbolTable,
    after_binder: bool,
}

impl<'a> Classifier<'a> {
    pub fn new(source: &'a str, preferences: &LexicalPreferences) -> Self {
        Self {
            scanner: Scanner::new(source, preferences),
            lookahead: VecDeque::new(),
            table: SymbolTable::global(),
            after_binder: false,
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        self.scanner.diagnostics()
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.scanner.into_diagnostics()
    }

    fn pull(&mut self) -> Option<Token> {
        self.lookahead.pop_front().or_else(|| self.scanner.next())
    }

    /// Whether an `IndentOpen` follows, skipping comments and newlines
    fn block_opens_next(&mut self) -> bool {
        let mut index = 0;
        loop {
            if index == self.lookahead.len() {
                match self.scanner.next() {
                    Some(token) => self.lookahead.push_back(token),
                    None => return false,
                }
            }
            match self.lookahead[index].kind {
                TokenKind::IndentOpen => return true,
                TokenKind::Comment | TokenKind::Newline => index += 1,
                _ => return false,
            }
        }
    }

    fn binds_identifier(&self, token: &Token) -> bool {
        token.is_keyword()
            && self
                .table
                .lookup(&token.text)
                .is_some_and(|entry| entry.binds_identifier)
    }
}

impl Iterator for Classifier<'_> {
    type Item = ClassifiedToken;

    fn next(&mut self) -> Option<ClassifiedToken> {
        let token = self.pull()?;

        let category = category_for(token.kind, &token.text, self.after_binder);
        let fold_boundary = match token.kind {
            TokenKind::IndentOpen | TokenKind::IndentClose => true,
            TokenKind::Punctuation if token.text == ":" => self.block_opens_next(),
            _ => false,
        };
        self.after_binder = self.binds_identifier(&token);

        Some(ClassifiedToken {
            token,
            category,
            fold_boundary,
        })
    }
}

impl FusedIterator for Classifier<'_> {}

/// Tokenize with the built-in preferences. The result depends only on `source`.
pub fn tokenize(source: &str) -> TokenStream {
    tokenize_with_preferences(source, &LexicalPreferences::builtin())
}

pub fn tokenize_with_preferences(source: &str, preferences: &LexicalPreferences) -> TokenStream {
    let mut classifier = Classifier::new(source, preferences);
    let tokens: Vec<ClassifiedToken> = classifier.by_ref().collect();
    let (diagnostics, suppressed) = classifier.into_diagnostics().into_parts();

    let metrics = preferences
        .collect_detailed_metrics
        .then(|| LexicalMetrics::from_tokens(&tokens));

    crate::log_success!(
        codes::success::TOKENIZATION_COMPLETE,
        "Tokenization completed",
        "bytes" => source.len(),
        "tokens" => tokens.len(),
        "diagnostics" => diagnostics.len(),
        "suppressed" => suppressed
    );

    TokenStream::new(source, tokens, diagnostics, suppressed, metrics)
}
