//! Operand stack values.

use crate::calc::operators::Operator;
use crate::error::{PdfError, Result};
use std::fmt;

/// A value on the calculator's operand stack.
///
/// `Operator`, `BeginProc` and `EndProc` only appear while a `{ ... }` body
/// is waiting on the stack for the `if`/`ifelse` that will consume it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Number(f64),
    Bool(bool),
    /// Deferred operator inside a pending procedure body
    Operator(Operator),
    /// Deferred `{`
    BeginProc,
    /// Deferred `}`
    EndProc,
}

impl Value {
    /// Get type name for error messages
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Operator(_) => "operator",
            Self::BeginProc | Self::EndProc => "procedure marker",
        }
    }

    /// Get as number
    pub const fn as_number(&self) -> Result<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            _ => Err(PdfError::TypeError {
                expected: "number",
                got: self.type_name(),
            }),
        }
    }

    /// Get as boolean
    pub const fn as_bool(&self) -> Result<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(PdfError::TypeError {
                expected: "boolean",
                got: self.type_name(),
            }),
        }
    }

    /// True for the deferred-execution variants.
    pub const fn is_deferred(&self) -> bool {
        matches!(self, Self::Operator(_) | Self::BeginProc | Self::EndProc)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Operator(op) => f.write_str(op.name()),
            Self::BeginProc => f.write_str("{"),
            Self::EndProc => f.write_str("}"),
        }
    }
}
