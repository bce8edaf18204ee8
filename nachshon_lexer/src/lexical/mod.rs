//! Lexical analysis: character classes, the token state machine, indentation
//! tracking and the lazy scanner that combines them.

pub mod analyzer;
pub mod chars;
pub mod diagnostic;
pub mod indentation;
pub mod scanner;

pub use analyzer::{next_token, next_token_with_diagnostics, LexerError, LexicalAnalyzer, OPERATORS, PUNCTUATION};
pub use diagnostic::{DiagnosticKind, DiagnosticSeverity, Diagnostics, LexicalDiagnostic};
pub use indentation::{IndentChange, IndentationTracker};
pub use scanner::Scanner;

use crate::config::LexicalPreferences;

/// Lazy token sequence for `source` with the given preferences
pub fn scan<'a>(source: &'a str, preferences: &LexicalPreferences) -> Scanner<'a> {
    Scanner::new(source, preferences)
}

/// Checks that every lexical code used by diagnostics has registry metadata
pub fn validate_lexical_codes() -> Result<(), String> {
    let kinds = [
        DiagnosticKind::UnterminatedString,
        DiagnosticKind::UnrecognizedCharacter,
        DiagnosticKind::MalformedNumber,
        DiagnosticKind::InconsistentIndentation,
        DiagnosticKind::MixedIndentation,
    ];

    for kind in kinds {
        let code = kind.code();
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical code {} for {:?} not found in metadata registry",
                code, kind
            ));
        }
    }
    Ok(())
}
