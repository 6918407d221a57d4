//! Stack manipulation operators.
//!
//! Handles: dup, pop, exch, copy, index, roll
//!
//! These move values without inspecting them, so pending procedure markers
//! and deferred operators are carried along like numbers.

use crate::calc::operators::Operator;
use crate::calc::stack::OperandStack;
use crate::error::{PdfError, Result};

/// Execute one stack operator.
pub fn apply(op: Operator, stack: &mut OperandStack) -> Result<()> {
    let name = op.name();

    match op {
        Operator::Dup => {
            stack.duplicate_top(name, 1)?;
        }
        Operator::Pop => {
            stack.pop(name)?;
        }
        Operator::Exch => {
            stack.top_mut(name, 2)?.swap(0, 1);
        }
        Operator::Copy => {
            let n = count_operand(stack, name)?;
            stack.duplicate_top(name, n)?;
        }
        Operator::Index => {
            let n = count_operand(stack, name)?;
            let value = *stack.peek_at(n).ok_or(PdfError::StackUnderflow {
                op: name,
                needed: n + 1,
                available: stack.len(),
            })?;
            stack.push(value)?;
        }
        Operator::Roll => {
            let j = stack.pop_int(name)?;
            let n = count_operand(stack, name)?;
            if n > 0 {
                // n fits in i64: it came from one.
                let shift = j.rem_euclid(n as i64) as usize;
                stack.top_mut(name, n)?.rotate_right(shift);
            }
        }
        other => {
            return Err(PdfError::TypeError {
                expected: "stack operator",
                got: other.name(),
            });
        }
    }

    Ok(())
}

/// Pop a non-negative count operand.
fn count_operand(stack: &mut OperandStack, name: &'static str) -> Result<usize> {
    let n = stack.pop_int(name)?;
    usize::try_from(n).map_err(|_| PdfError::RangeCheck {
        op: name,
        msg: format!("negative count {n}"),
    })
}
