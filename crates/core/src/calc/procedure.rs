//! Deferred `{ ... }` bodies.
//!
//! While a body is being scanned its tokens are pushed onto the operand
//! stack between `BeginProc` and `EndProc` markers. Everything after the
//! opening marker is deferred, so a whole body occupies one operand slot.
//! When `if` or `ifelse` runs, each body is lifted back off the stack as a
//! `Procedure`.

use crate::calc::stack::OperandStack;
use crate::calc::value::Value;
use crate::error::{PdfError, Result};

/// A captured procedure body, without its outer braces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Procedure {
    body: Vec<Value>,
}

impl Procedure {
    pub fn new(body: Vec<Value>) -> Self {
        Self { body }
    }

    pub fn body(&self) -> &[Value] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Pop the procedure on top of the stack.
    ///
    /// The top value must be an `EndProc`; values are collected down to its
    /// matching `BeginProc`, keeping nested bodies intact.
    pub fn pop_from(stack: &mut OperandStack, op: &'static str) -> Result<Self> {
        match stack.pop(op)? {
            Value::EndProc => {}
            other => {
                return Err(PdfError::TypeError {
                    expected: "procedure",
                    got: other.type_name(),
                });
            }
        }

        let mut body = Vec::new();
        let mut nested = 0usize;
        loop {
            let value = stack.pop(op)?;
            match value {
                Value::BeginProc if nested == 0 => break,
                Value::BeginProc => nested -= 1,
                Value::EndProc => nested += 1,
                _ => {}
            }
            body.push(value);
        }

        // Closing marker plus body; the opening marker was a live operand.
        stack.release_deferred(body.len() + 1);
        body.reverse();
        Ok(Self { body })
    }
}
