//! Keyword and builtin completion at a cursor offset

use crate::lexical::chars::is_identifier_continue;
use crate::logging::codes;
use crate::symbols::{SymbolEntry, SymbolRole, SymbolTable, BUILTIN_FALLBACK_HINT};
use serde::Serialize;

#[derive(Debug, Clone, thiserror::Error)]
pub enum CompletionError {
    #[error("Cursor offset {cursor} is beyond the end of the buffer ({len} bytes)")]
    CursorOutOfBounds { cursor: usize, len: usize },

    #[error("Cursor offset {cursor} is not on a character boundary")]
    CursorNotCharBoundary { cursor: usize },
}

impl CompletionError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            CompletionError::CursorOutOfBounds { .. } => codes::completion::CURSOR_OUT_OF_BOUNDS,
            CompletionError::CursorNotCharBoundary { .. } => {
                codes::completion::CURSOR_NOT_CHAR_BOUNDARY
            }
        }
    }
}

/// Whether the user asked for completion or it fired while typing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionTrigger {
    #[default]
    Typing,
    Explicit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionKind {
    Keyword,
    Function,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionCandidate {
    pub label: String,
    pub role: SymbolRole,
    pub kind: CompletionKind,
    pub detail: Option<String>,
    /// Text to insert in place of the prefix; the label when absent
    pub insert_text: Option<String>,
    /// Byte offset where the replaced prefix begins
    pub replace_start: usize,
}

impl CompletionCandidate {
    fn new(label: impl Into<String>, role: SymbolRole, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            role,
            kind,
            detail: None,
            insert_text: None,
            replace_start: 0,
        }
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    fn with_insert_text(mut self, text: impl Into<String>) -> Self {
        self.insert_text = Some(text.into());
        self
    }

    fn replacing_from(mut self, offset: usize) -> Self {
        self.replace_start = offset;
        self
    }

    fn from_entry(entry: &SymbolEntry, replace_start: usize) -> Self {
        let candidate = if entry.role.is_builtin() {
            CompletionCandidate::new(entry.spelling, entry.role, CompletionKind::Function)
                .with_detail(entry.display_hint.unwrap_or(BUILTIN_FALLBACK_HINT))
                .with_insert_text(format!("{}(", entry.spelling))
        } else {
            let candidate =
                CompletionCandidate::new(entry.spelling, entry.role, CompletionKind::Keyword);
            match entry.display_hint {
                Some(hint) => candidate.with_detail(hint),
                None => candidate,
            }
        };
        candidate.replacing_from(replace_start)
    }

    pub fn text_to_insert(&self) -> &str {
        self.insert_text.as_deref().unwrap_or(&self.label)
    }
}

/// Start offset of the identifier run ending at `cursor`
pub fn prefix_start(buffer: &str, cursor: usize) -> usize {
    buffer[..cursor]
        .char_indices()
        .rev()
        .take_while(|&(_, ch)| is_identifier_continue(ch))
        .last()
        .map_or(cursor, |(offset, _)| offset)
}

fn check_cursor(buffer: &str, cursor: usize) -> Result<(), CompletionError> {
    if cursor > buffer.len() {
        return Err(CompletionError::CursorOutOfBounds {
            cursor,
            len: buffer.len(),
        });
    }
    if !buffer.is_char_boundary(cursor) {
        return Err(CompletionError::CursorNotCharBoundary { cursor });
    }
    Ok(())
}

/// Candidates whose spelling starts with the identifier prefix ending at `cursor`,
/// in symbol table order.
///
/// An empty prefix yields nothing unless the request is explicit, in which case
/// every entry is offered.
pub fn complete(
    buffer: &str,
    cursor: usize,
    trigger: CompletionTrigger,
) -> Result<Vec<CompletionCandidate>, CompletionError> {
    if let Err(error) = check_cursor(buffer, cursor) {
        crate::log_error!(error.error_code(), "Rejected completion request",
            "cursor" => cursor,
            "buffer_len" => buffer.len());
        return Err(error);
    }

    let start = prefix_start(buffer, cursor);
    let prefix = &buffer[start..cursor];
    if prefix.is_empty() && trigger == CompletionTrigger::Typing {
        return Ok(Vec::new());
    }

    let candidates: Vec<CompletionCandidate> = SymbolTable::global()
        .all_entries()
        .iter()
        .filter(|entry| entry.spelling.starts_with(prefix))
        .map(|entry| CompletionCandidate::from_entry(entry, start))
        .collect();

    crate::log_success!(
        codes::success::COMPLETION_COMPLETE,
        "Completion computed",
        "prefix" => prefix,
        "candidates" => candidates.len()
    );

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn labels(candidates: &[CompletionCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.label.as_str()).collect()
    }

    #[test]
    fn test_builtin_prefix() {
        let buffer = "הד";
        let candidates = complete(buffer, buffer.len(), CompletionTrigger::Typing).unwrap();

        assert_eq!(labels(&candidates), vec!["הדפס"]);
        let print = &candidates[0];
        assert_eq!(print.kind, CompletionKind::Function);
        assert_eq!(print.role, SymbolRole::Builtin);
        assert_eq!(print.text_to_insert(), "הדפס(");
        assert_eq!(print.detail.as_deref(), Some("print - הדפס"));
        assert_eq!(print.replace_start, 0);
    }

    #[test]
    fn test_no_match() {
        let buffer = "זד";
        assert!(complete(buffer, buffer.len(), CompletionTrigger::Typing)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_keywords_precede_builtins() {
        let buffer = "א = כל";
        let candidates = complete(buffer, buffer.len(), CompletionTrigger::Typing).unwrap();

        assert_eq!(labels(&candidates), vec!["כל_עוד", "כלום", "כל", "כלשהו"]);
        assert_eq!(candidates[0].kind, CompletionKind::Keyword);
        assert_eq!(candidates[0].text_to_insert(), "כל_עוד");
        assert_eq!(candidates[2].detail.as_deref(), Some(BUILTIN_FALLBACK_HINT));
        assert!(candidates.iter().all(|c| c.replace_start == "א = ".len()));
    }

    #[test]
    fn test_prefix_stops_at_non_identifier() {
        let buffer = "הדפס(אור";
        assert_eq!(prefix_start(buffer, buffer.len()), "הדפס(".len());

        let candidates = complete(buffer, buffer.len(), CompletionTrigger::Typing).unwrap();
        assert_eq!(labels(&candidates), vec!["אורך"]);
    }

    #[test]
    fn test_cursor_mid_buffer() {
        let buffer = "עצ ב";
        let candidates = complete(buffer, "עצ".len(), CompletionTrigger::Typing).unwrap();
        assert_eq!(labels(&candidates), vec!["עצור", "עצמי"]);
    }

    #[test]
    fn test_empty_prefix_requires_explicit_request() {
        assert!(complete("", 0, CompletionTrigger::Typing).unwrap().is_empty());
        assert!(complete("א ", "א ".len(), CompletionTrigger::Typing).unwrap().is_empty());

        let all = complete("", 0, CompletionTrigger::Explicit).unwrap();
        assert_eq!(all.len(), SymbolTable::global().len());
    }

    #[test]
    fn test_contract_violations() {
        assert_matches!(
            complete("הד", 10, CompletionTrigger::Typing),
            Err(CompletionError::CursorOutOfBounds { cursor: 10, len: 4 })
        );
        assert_matches!(
            complete("הד", 1, CompletionTrigger::Typing),
            Err(CompletionError::CursorNotCharBoundary { cursor: 1 })
        );
    }
}
