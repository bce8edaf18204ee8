//! Completion candidates drawn from the symbol table. Stateless: every request is a
//! pure function of the buffer and cursor.

pub mod provider;

pub use provider::{
    complete, prefix_start, CompletionCandidate, CompletionError, CompletionKind,
    CompletionTrigger,
};
