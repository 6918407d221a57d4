//! Comparison, boolean and bitwise operators.
//!
//! Handles: eq, ne, gt, ge, lt, le, and, or, xor, not, bitshift
//!
//! `and`, `or`, `xor` and `not` are logical on booleans and bitwise on
//! integers. `bitshift` works on 32-bit integers: positive shifts move left,
//! negative shifts move right filling with zeros.

use crate::calc::operators::Operator;
use crate::calc::stack::{OperandStack, to_int};
use crate::calc::value::Value;
use crate::error::{PdfError, Result};

/// Execute one comparison or boolean operator against the stack.
pub fn apply(op: Operator, stack: &mut OperandStack) -> Result<()> {
    let name = op.name();

    let result = match op {
        Operator::Eq | Operator::Ne => {
            stack.require(name, 2)?;
            let b = stack.pop(name)?;
            let a = stack.pop(name)?;
            let equal = values_equal(a, b)?;
            Value::Bool(if op == Operator::Eq { equal } else { !equal })
        }
        Operator::Gt => compare(stack, name, |a, b| a > b)?,
        Operator::Ge => compare(stack, name, |a, b| a >= b)?,
        Operator::Lt => compare(stack, name, |a, b| a < b)?,
        Operator::Le => compare(stack, name, |a, b| a <= b)?,
        Operator::And => logical(stack, name, |a, b| a && b, |a, b| a & b)?,
        Operator::Or => logical(stack, name, |a, b| a || b, |a, b| a | b)?,
        Operator::Xor => logical(stack, name, |a, b| a ^ b, |a, b| a ^ b)?,
        Operator::Not => match stack.pop(name)? {
            Value::Bool(b) => Value::Bool(!b),
            Value::Number(n) => Value::Number(!to_int(name, n)? as f64),
            other => {
                return Err(PdfError::TypeError {
                    expected: "boolean or integer",
                    got: other.type_name(),
                });
            }
        },
        Operator::Bitshift => {
            let (value, shift) = stack.pop_two_ints(name)?;
            let value = i32::try_from(value).map_err(|_| PdfError::RangeCheck {
                op: name,
                msg: format!("{value} does not fit in 32 bits"),
            })?;
            Value::Number(bitshift(value, shift) as f64)
        }
        other => {
            return Err(PdfError::TypeError {
                expected: "relational operator",
                got: other.name(),
            });
        }
    };

    stack.push(result)
}

fn values_equal(a: Value, b: Value) -> Result<bool> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => Ok(x == y),
        (Value::Bool(x), Value::Bool(y)) => Ok(x == y),
        (Value::Number(_), Value::Bool(_)) | (Value::Bool(_), Value::Number(_)) => Ok(false),
        (other, Value::Number(_) | Value::Bool(_)) | (_, other) => Err(PdfError::TypeError {
            expected: "number or boolean",
            got: other.type_name(),
        }),
    }
}

fn compare(stack: &mut OperandStack, name: &'static str, f: fn(f64, f64) -> bool) -> Result<Value> {
    let (a, b) = stack.pop_two_numbers(name)?;
    Ok(Value::Bool(f(a, b)))
}

fn logical(
    stack: &mut OperandStack,
    name: &'static str,
    on_bools: fn(bool, bool) -> bool,
    on_ints: fn(i64, i64) -> i64,
) -> Result<Value> {
    stack.require(name, 2)?;
    let b = stack.pop(name)?;
    let a = stack.pop(name)?;

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => Ok(Value::Bool(on_bools(x, y))),
        (Value::Number(x), Value::Number(y)) => {
            Ok(Value::Number(on_ints(to_int(name, x)?, to_int(name, y)?) as f64))
        }
        (Value::Bool(_), other) | (Value::Number(_), other) | (other, _) => {
            Err(PdfError::TypeError {
                expected: "two booleans or two integers",
                got: other.type_name(),
            })
        }
    }
}

fn bitshift(value: i32, shift: i64) -> i32 {
    let bits = value as u32;
    let shifted = if shift >= 32 || shift <= -32 {
        0
    } else if shift >= 0 {
        bits << shift
    } else {
        bits >> -shift
    };
    shifted as i32
}
