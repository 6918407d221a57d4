//! Calculator program parsing.
//!
//! - `lexer`: Type 4 tokenizer
//! - `source`: loading program text from bytes or readers

pub mod lexer;
pub mod source;

// Re-export main types for convenience
pub use lexer::{CalcLexer, CalcToken};
pub use source::ProgramSource;
