//! Recoverable lexical anomalies reported alongside the token stream.

use crate::config::compile_time::lexical::MAX_DIAGNOSTICS;
use crate::logging::{codes, Code};
use crate::utils::Span;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    UnterminatedString,
    UnrecognizedCharacter,
    MalformedNumber,
    InconsistentIndentation,
    MixedIndentation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

impl DiagnosticSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
        }
    }
}

impl DiagnosticKind {
    pub fn code(&self) -> Code {
        match self {
            DiagnosticKind::UnterminatedString => codes::lexical::UNTERMINATED_STRING,
            DiagnosticKind::UnrecognizedCharacter => codes::lexical::UNRECOGNIZED_CHARACTER,
            DiagnosticKind::MalformedNumber => codes::lexical::MALFORMED_NUMBER,
            DiagnosticKind::InconsistentIndentation => {
                codes::indentation::INCONSISTENT_INDENTATION
            }
            DiagnosticKind::MixedIndentation => codes::indentation::MIXED_INDENTATION,
        }
    }

    pub fn severity(&self) -> DiagnosticSeverity {
        match self {
            DiagnosticKind::UnterminatedString
            | DiagnosticKind::UnrecognizedCharacter
            | DiagnosticKind::InconsistentIndentation => DiagnosticSeverity::Error,
            DiagnosticKind::MalformedNumber | DiagnosticKind::MixedIndentation => {
                DiagnosticSeverity::Warning
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexicalDiagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
    pub message: String,
}

impl LexicalDiagnostic {
    pub fn new(kind: DiagnosticKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    pub fn severity(&self) -> DiagnosticSeverity {
        self.kind.severity()
    }

    pub fn code(&self) -> Code {
        self.kind.code()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == DiagnosticSeverity::Error
    }
}

/// Bounded diagnostic collection. Anomalies past `MAX_DIAGNOSTICS` are counted only.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<LexicalDiagnostic>,
    suppressed: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: LexicalDiagnostic) {
        crate::log_debug!("Lexical anomaly recorded",
            "code" => diagnostic.code(),
            "at" => diagnostic.span.start(),
            "message" => diagnostic.message.as_str()
        );

        if self.entries.len() < MAX_DIAGNOSTICS {
            self.entries.push(diagnostic);
            return;
        }

        if self.suppressed == 0 {
            crate::log_warning!(
                codes::lexical::DIAGNOSTIC_LIMIT_REACHED,
                "Diagnostic limit reached, further anomalies are counted only",
                "limit" => MAX_DIAGNOSTICS
            );
        }
        self.suppressed += 1;
    }

    pub fn entries(&self) -> &[LexicalDiagnostic] {
        &self.entries
    }

    pub fn suppressed(&self) -> usize {
        self.suppressed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(LexicalDiagnostic::is_error)
    }

    pub fn into_parts(self) -> (Vec<LexicalDiagnostic>, usize) {
        (self.entries, self.suppressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogLevel, LoggingService, MemoryLogger};
    use crate::utils::Position;
    use std::sync::Arc;

    fn at(offset: usize) -> Span {
        Span::point(Position::new(offset, 1, offset as u32 + 1))
    }

    #[test]
    fn test_kind_codes_and_severity() {
        assert_eq!(DiagnosticKind::UnterminatedString.code().as_str(), "E021");
        assert_eq!(DiagnosticKind::InconsistentIndentation.code().as_str(), "E030");
        assert_eq!(
            DiagnosticKind::MalformedNumber.severity(),
            DiagnosticSeverity::Warning
        );
        assert_eq!(
            DiagnosticKind::UnrecognizedCharacter.severity(),
            DiagnosticSeverity::Error
        );
    }

    #[test]
    fn test_collection_is_capped() {
        let memory = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(Arc::new(memory.clone()), LogLevel::Warning);
        crate::logging::init_global_logging_with_service(Arc::new(service)).unwrap();

        let mut diagnostics = Diagnostics::new();
        for i in 0..MAX_DIAGNOSTICS + 5 {
            diagnostics.push(LexicalDiagnostic::new(
                DiagnosticKind::UnrecognizedCharacter,
                at(i),
                "unrecognized",
            ));
        }

        assert_eq!(diagnostics.len(), MAX_DIAGNOSTICS);
        assert_eq!(diagnostics.suppressed(), 5);
        assert!(diagnostics.has_errors());

        let limit_events = memory.get_events_with_code(codes::lexical::DIAGNOSTIC_LIMIT_REACHED);
        assert_eq!(limit_events.len(), 1);
    }

    #[test]
    fn test_warnings_are_not_errors() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(LexicalDiagnostic::new(
            DiagnosticKind::MixedIndentation,
            at(0),
            "mixed",
        ));
        assert!(!diagnostics.has_errors());
        assert!(!diagnostics.is_empty());
    }
}
