//! Log codes and their classification metadata
//!
//! Every error, warning and success event the lexer emits carries a `Code`.
//! Metadata for each code (category, severity, recoverability) lives in a single
//! registry that is built once on first access.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const TOO_MANY_LINES: Code = Code::new("E013");
}

/// Lexical diagnostic codes
pub mod lexical {
    use super::Code;

    pub const UNRECOGNIZED_CHARACTER: Code = Code::new("E020");
    pub const UNTERMINATED_STRING: Code = Code::new("E021");
    pub const MALFORMED_NUMBER: Code = Code::new("E022");
    pub const DIAGNOSTIC_LIMIT_REACHED: Code = Code::new("E023");
    pub const OFFSET_NOT_CHAR_BOUNDARY: Code = Code::new("E025");
}

/// Indentation diagnostic codes
pub mod indentation {
    use super::Code;

    pub const INCONSISTENT_INDENTATION: Code = Code::new("E030");
    pub const MIXED_INDENTATION: Code = Code::new("E031");
}

/// Completion request error codes
pub mod completion {
    use super::Code;

    pub const CURSOR_OUT_OF_BOUNDS: Code = Code::new("E060");
    pub const CURSOR_NOT_CHAR_BOUNDARY: Code = Code::new("E061");
}

/// Configuration error codes
pub mod configuration {
    use super::Code;

    pub const INVALID_TAB_WIDTH: Code = Code::new("E070");
    pub const CONFIG_PARSE_ERROR: Code = Code::new("E071");
    pub const CONFIG_IO_ERROR: Code = Code::new("E072");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const COMPLETION_COMPLETE: Code = Code::new("I030");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

/// (code, category, severity, recoverable, requires_halt, description, action)
type Row = (
    &'static str,
    &'static str,
    Severity,
    bool,
    bool,
    &'static str,
    &'static str,
);

const REGISTRY_ROWS: &[Row] = &[
    // System
    ("ERR001", "System", Severity::Critical, false, true,
        "Critical internal error",
        "File a bug report with the input that triggered it"),
    ("ERR002", "System", Severity::Critical, false, true,
        "Initialization failure",
        "Check configuration and environment"),
    // File processing
    ("E005", "FileProcessing", Severity::Medium, false, false,
        "Source file not found",
        "Check the file path"),
    ("E006", "FileProcessing", Severity::Low, false, false,
        "File does not carry the Nachshon source extension",
        "Rename the file to use the .נח extension"),
    ("E007", "FileProcessing", Severity::Medium, false, false,
        "Source file exceeds the maximum allowed size",
        "Split the file or raise max_file_size in the build profile"),
    ("E009", "FileProcessing", Severity::Medium, false, false,
        "Permission denied reading source file",
        "Check file permissions"),
    ("E010", "FileProcessing", Severity::Medium, false, false,
        "Source file is not valid UTF-8",
        "Re-save the file with UTF-8 encoding"),
    ("E011", "FileProcessing", Severity::Medium, false, false,
        "I/O error while reading source file",
        "Retry or check the underlying storage"),
    ("E012", "FileProcessing", Severity::Low, false, false,
        "Path does not refer to a regular file",
        "Pass a source file rather than a directory"),
    ("E013", "FileProcessing", Severity::Medium, false, false,
        "Source file exceeds the maximum line count",
        "Split the file or raise max_line_count in the build profile"),
    // Lexical
    ("E020", "Lexical", Severity::Low, true, false,
        "Character not recognized by the lexer",
        "Remove the character or quote it inside a string"),
    ("E021", "Lexical", Severity::Medium, true, false,
        "String literal not closed before end of input",
        "Add the matching closing quote"),
    ("E022", "Lexical", Severity::Low, true, false,
        "Number literal contains more than one decimal point",
        "Remove the extra decimal points"),
    ("E023", "Lexical", Severity::Low, true, false,
        "Diagnostic limit reached, further diagnostics suppressed",
        "Fix the reported problems and re-run"),
    ("E025", "Lexical", Severity::High, false, false,
        "Lexer offset falls inside a multi-byte character",
        "Pass a byte offset on a character boundary"),
    // Indentation
    ("E030", "Indentation", Severity::Medium, true, false,
        "Dedent does not return to any enclosing indentation level",
        "Align the line with an enclosing block"),
    ("E031", "Indentation", Severity::Low, true, false,
        "Indentation mixes tabs and spaces",
        "Indent with spaces only or tabs only"),
    // Completion
    ("E060", "Completion", Severity::Low, true, false,
        "Cursor offset lies beyond the end of the buffer",
        "Clamp the cursor to the buffer length"),
    ("E061", "Completion", Severity::Low, true, false,
        "Cursor offset falls inside a multi-byte character",
        "Pass a byte offset on a character boundary"),
    // Configuration
    ("E070", "Configuration", Severity::Medium, false, false,
        "Tab width outside the supported range",
        "Use a tab width between 1 and the profile maximum"),
    ("E071", "Configuration", Severity::Medium, false, false,
        "Configuration file is not valid TOML",
        "Fix the configuration syntax"),
    ("E072", "Configuration", Severity::Medium, false, false,
        "Configuration file could not be read",
        "Check the configuration path"),
    // Success
    ("I001", "Success", Severity::Low, true, false,
        "Operation completed successfully",
        "None"),
    ("I004", "Success", Severity::Low, true, false,
        "Logging system initialized",
        "None"),
    ("I006", "Success", Severity::Low, true, false,
        "Source file read and validated",
        "Continue to tokenization"),
    ("I020", "Success", Severity::Low, true, false,
        "Tokenization completed",
        "Consume the token stream"),
    ("I030", "Success", Severity::Low, true, false,
        "Completion candidates produced",
        "Present candidates to the user"),
];

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTRY_ROWS
            .iter()
            .map(
                |&(code, category, severity, recoverable, requires_halt, description, action)| {
                    (
                        code,
                        ErrorMetadata {
                            code,
                            category,
                            severity,
                            recoverable,
                            requires_halt,
                            description,
                            recommended_action: action,
                        },
                    )
                },
            )
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Human-readable description for a code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
