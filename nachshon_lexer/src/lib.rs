//! Lexical core for the Nachshon language: a right-to-left scripting language with
//! Hebrew keywords.
//!
//! The crate turns source text into a classified, position-tagged token stream
//! with indentation-derived block structure, and answers keyword/builtin
//! completion requests. It does no parsing and no I/O of its own beyond the
//! optional [`file_processor`].
//!
//! ```no_run
//! let stream = nachshon_lexer::tokenize("אם אמת:\n    הדפס(1)\n");
//! assert_eq!(stream.reconstruct(), "אם אמת:\n    הדפס(1)\n");
//!
//! let candidates = nachshon_lexer::complete("הד", "הד".len(), Default::default())?;
//! assert_eq!(candidates[0].label, "הדפס");
//! # Ok::<(), nachshon_lexer::CompletionError>(())
//! ```

pub mod classifier;
pub mod completion;
pub mod config;
pub mod file_processor;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod symbols;
pub mod tokens;
pub mod utils;

pub use classifier::{tokenize, tokenize_with_preferences, Classifier, FoldRange, HighlightCategory};
pub use completion::{complete, CompletionCandidate, CompletionError, CompletionTrigger};
pub use config::{LexicalPreferences, RuntimeConfig, TabExpansion};
pub use lexical::{next_token, next_token_with_diagnostics, DiagnosticKind, LexerError, LexicalDiagnostic};
pub use symbols::{SymbolEntry, SymbolRole, SymbolTable};
pub use tokens::{ClassifiedToken, Token, TokenKind, TokenStream};
pub use utils::{Position, SourceMap, Span};
