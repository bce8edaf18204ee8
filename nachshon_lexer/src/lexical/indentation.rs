//! Indent stack driven once per logical line
//!
//! The bottom frame (column 0) is never popped. Frames above it are strictly
//! increasing.

use super::diagnostic::{DiagnosticKind, Diagnostics, LexicalDiagnostic};
use crate::config::compile_time::lexical::MAX_TAB_WIDTH;
use crate::config::{LexicalPreferences, TabExpansion};
use crate::utils::Span;

/// Structural change produced for one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentChange {
    Open,
    Close,
}

#[derive(Debug, Clone)]
pub struct IndentationTracker {
    stack: Vec<usize>,
    tab_width: usize,
    tab_expansion: TabExpansion,
    report_mixed: bool,
}

impl IndentationTracker {
    pub fn new(preferences: &LexicalPreferences) -> Self {
        Self {
            stack: vec![0],
            tab_width: preferences.tab_width.clamp(1, MAX_TAB_WIDTH),
            tab_expansion: preferences.tab_expansion,
            report_mixed: preferences.report_mixed_indentation,
        }
    }

    /// Indentation width of a run of spaces and tabs
    pub fn measure(&self, whitespace: &str) -> usize {
        whitespace.chars().fold(0, |column, ch| match ch {
            '\t' => self.tab_expansion.expand(column, self.tab_width),
            _ => column + 1,
        })
    }

    /// Compare a line's leading whitespace against the stack.
    ///
    /// `span` covers the whitespace and is used for diagnostics. Closes always come
    /// before the resynchronizing open of an inconsistent dedent.
    pub fn process_line(
        &mut self,
        whitespace: &str,
        span: Span,
        diagnostics: &mut Diagnostics,
    ) -> Vec<IndentChange> {
        if self.report_mixed && whitespace.contains('\t') && whitespace.contains(' ') {
            diagnostics.push(LexicalDiagnostic::new(
                DiagnosticKind::MixedIndentation,
                span,
                format!(
                    "Indentation mixes tabs and spaces (tabs measured as {} columns, {})",
                    self.tab_width,
                    self.tab_expansion.as_str()
                ),
            ));
        }

        let width = self.measure(whitespace);
        let top = self.current();
        let mut changes = Vec::new();

        if width > top {
            self.stack.push(width);
            changes.push(IndentChange::Open);
        } else if width < top {
            while self.stack.len() > 1 && self.current() > width {
                self.stack.pop();
                changes.push(IndentChange::Close);
            }

            if self.current() != width {
                diagnostics.push(LexicalDiagnostic::new(
                    DiagnosticKind::InconsistentIndentation,
                    span,
                    format!(
                        "Dedent to column {} matches no enclosing block (nearest is {})",
                        width,
                        self.current()
                    ),
                ));
                self.stack.push(width);
                changes.push(IndentChange::Open);
            }
        }

        changes
    }

    /// Pop every frame above the base; returns how many were closed
    pub fn finish(&mut self) -> usize {
        let open = self.depth();
        self.stack.truncate(1);
        open
    }

    /// Column of the innermost open block
    pub fn current(&self) -> usize {
        self.stack.last().copied().unwrap_or(0)
    }

    /// Number of frames above the base
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    pub fn frames(&self) -> &[usize] {
        &self.stack
    }

    pub fn reset(&mut self) {
        self.stack.clear();
        self.stack.push(0);
    }
}
