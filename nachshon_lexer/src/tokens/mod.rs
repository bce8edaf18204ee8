//! Token values and the classified, replayable token stream
//!
//! - **[`Token`]** carries its [`TokenKind`], exact source text, span and leading
//!   trivia. Keyword tokens carry the [`SymbolRole`](crate::symbols::SymbolRole)
//!   from the symbol table.
//! - **[`TokenStream`]** is what the facade returns: every token tagged with a
//!   highlight category and a fold flag, plus the lexical diagnostics.
//!
//! Token texts and trivia together cover the buffer without gaps, so a stream can
//! always reproduce its source.

pub mod token;
pub mod token_stream;

pub use token::{Token, TokenKind};
pub use token_stream::{ClassifiedToken, LexicalMetrics, TokenStream};

pub use crate::utils::{Position, SourceMap, Span};
