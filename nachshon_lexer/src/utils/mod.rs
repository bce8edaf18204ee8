//! Shared source-location types used by the lexer, facade and completion provider.

pub mod span;

pub use span::{Position, SourceMap, Span};
