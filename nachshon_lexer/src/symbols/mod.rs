//! Reserved spellings of the language: keywords and builtin function names.

pub mod table;

pub use table::{SymbolEntry, SymbolRole, SymbolTable, BUILTIN_FALLBACK_HINT};
