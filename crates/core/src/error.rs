//! Error types for PDF function evaluation.

use thiserror::Error;

/// Primary error type for function loading and evaluation.
#[derive(Error, Debug)]
pub enum PdfError {
    #[error("invalid token at position {pos}: {msg}")]
    TokenError { pos: usize, msg: String },

    #[error("unknown operator at position {pos}: {name}")]
    UnknownOperator { pos: usize, name: String },

    #[error("stack underflow in {op}: needs {needed} operand(s), {available} available")]
    StackUnderflow {
        op: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("operand stack overflow (limit {limit})")]
    StackOverflow { limit: usize },

    #[error("type error: expected {expected}, got {got}")]
    TypeError {
        expected: &'static str,
        got: &'static str,
    },

    #[error("undefined result in {op}")]
    UndefinedResult { op: &'static str },

    #[error("range check in {op}: {msg}")]
    RangeCheck { op: &'static str, msg: String },

    #[error("pending procedure bodies exceed {limit} values")]
    ProcedureTooLarge { limit: usize },

    #[error("procedure nesting deeper than {limit}")]
    NestingTooDeep { limit: usize },

    #[error("function expects {expected} input(s), got {got}")]
    InputArity { expected: usize, got: usize },

    #[error("malformed function: {0}")]
    MalformedFunction(String),

    #[error("key not found: {0}")]
    KeyError(String),

    #[error("unsupported function type: {0}")]
    UnsupportedFunctionType(i64),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias for PdfError.
pub type Result<T> = std::result::Result<T, PdfError>;
