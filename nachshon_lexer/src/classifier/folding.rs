//! Fold regions derived from indentation structure

use crate::tokens::{ClassifiedToken, TokenKind};
use serde::Serialize;

/// Inclusive 1-based line range a host may collapse
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct FoldRange {
    pub start_line: u32,
    pub end_line: u32,
}

fn is_layout(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Newline | TokenKind::IndentOpen | TokenKind::IndentClose | TokenKind::EndOfInput
    )
}

/// Header line for the block opened at `open`: the line of a folding `:` when one
/// precedes it, otherwise the line above the body.
fn header_line(tokens: &[ClassifiedToken], open: usize) -> u32 {
    let colon = tokens[..open]
        .iter()
        .rev()
        .find(|t| !matches!(t.kind(), TokenKind::Newline | TokenKind::Comment));

    match colon {
        Some(t) if t.fold_boundary && t.token.is_punctuation(":") => t.token.span.start().line,
        _ => tokens[open].token.span.start().line.saturating_sub(1).max(1),
    }
}

/// One range per indented block whose body ends below its header, in header order
pub fn fold_ranges(tokens: &[ClassifiedToken]) -> Vec<FoldRange> {
    let mut open_blocks: Vec<usize> = Vec::new();
    let mut ranges = Vec::new();

    for (index, classified) in tokens.iter().enumerate() {
        match classified.kind() {
            TokenKind::IndentOpen => open_blocks.push(index),
            TokenKind::IndentClose => {
                let Some(open) = open_blocks.pop() else {
                    continue;
                };
                let body_end = tokens[open..index]
                    .iter()
                    .rev()
                    .find(|t| !is_layout(t.kind()))
                    .map(|t| t.token.span.end().line);

                let start_line = header_line(tokens, open);
                if let Some(end_line) = body_end {
                    if end_line > start_line {
                        ranges.push(FoldRange {
                            start_line,
                            end_line,
                        });
                    }
                }
            }
            _ => {}
        }
    }

    ranges.sort_unstable();
    ranges
}
