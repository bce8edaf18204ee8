//! Lazy token sequence combining the lexer with the indentation tracker

use super::analyzer::LexicalAnalyzer;
use super::diagnostic::Diagnostics;
use super::indentation::{IndentChange, IndentationTracker};
use crate::config::LexicalPreferences;
use crate::tokens::{Token, TokenKind};
use crate::utils::Span;
use std::collections::VecDeque;
use std::iter::FusedIterator;

/// Yields every token of a buffer, indentation tokens included, ending with
/// exactly one `EndOfInput`.
pub struct Scanner<'a> {
    analyzer: LexicalAnalyzer<'a>,
    tracker: IndentationTracker,
    pending: VecDeque<Token>,
    at_line_start: bool,
    finished: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str, preferences: &LexicalPreferences) -> Self {
        Self {
            analyzer: LexicalAnalyzer::new(source),
            tracker: IndentationTracker::new(preferences),
            pending: VecDeque::new(),
            at_line_start: true,
            finished: false,
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        self.analyzer.diagnostics()
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.analyzer.into_diagnostics()
    }

    /// Feed the current line's indentation to the tracker.
    ///
    /// Blank and comment-only lines are skipped. Whitespace is left in place so the
    /// next real token picks it up as trivia.
    fn measure_line(&mut self) {
        match self.analyzer.char_after_whitespace() {
            None | Some('\n') | Some('\r') | Some('#') => return,
            Some(_) => {}
        }

        let whitespace = self.analyzer.leading_whitespace();
        let start = self.analyzer.position();
        let span = Span::new(start, start.advance_str(whitespace));

        let changes =
            self.tracker
                .process_line(whitespace, span, self.analyzer.diagnostics_mut());
        for change in changes {
            let kind = match change {
                IndentChange::Open => TokenKind::IndentOpen,
                IndentChange::Close => TokenKind::IndentClose,
            };
            self.pending
                .push_back(Token::synthetic(kind, Span::point(span.end())));
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if let Some(token) = self.pending.pop_front() {
            return Some(token);
        }
        if self.finished {
            return None;
        }

        if self.at_line_start {
            self.at_line_start = false;
            self.measure_line();
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
        }

        let token = self.analyzer.next_token();
        match token.kind {
            TokenKind::Newline => self.at_line_start = true,
            TokenKind::EndOfInput => {
                self.finished = true;
                for _ in 0..self.tracker.finish() {
                    self.pending
                        .push_back(Token::synthetic(TokenKind::IndentClose, token.span));
                }
                self.pending.push_back(token);
                return self.pending.pop_front();
            }
            _ => {}
        }
        Some(token)
    }
}

impl FusedIterator for Scanner<'_> {}
