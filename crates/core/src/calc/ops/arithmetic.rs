//! Arithmetic operators.
//!
//! Handles: add, sub, mul, div, idiv, mod, neg, abs, ceiling, floor, round,
//! truncate, sqrt, sin, cos, atan, exp, ln, log, cvi, cvr
//!
//! Angles are in degrees. `idiv` and `mod` truncate their operands to
//! integers first; `mod` takes the sign of the dividend.

use crate::calc::operators::Operator;
use crate::calc::stack::{OperandStack, to_int};
use crate::calc::value::Value;
use crate::error::{PdfError, Result};

/// Execute one arithmetic operator against the stack.
pub fn apply(op: Operator, stack: &mut OperandStack) -> Result<()> {
    let name = op.name();

    let result = match op {
        Operator::Add => {
            let (a, b) = stack.pop_two_numbers(name)?;
            a + b
        }
        Operator::Sub => {
            let (a, b) = stack.pop_two_numbers(name)?;
            a - b
        }
        Operator::Mul => {
            let (a, b) = stack.pop_two_numbers(name)?;
            a * b
        }
        Operator::Div => {
            let (a, b) = stack.pop_two_numbers(name)?;
            if b == 0.0 {
                return Err(PdfError::UndefinedResult { op: name });
            }
            a / b
        }
        Operator::Idiv => {
            let (a, b) = stack.pop_two_ints(name)?;
            a.checked_div(b)
                .ok_or(PdfError::UndefinedResult { op: name })? as f64
        }
        Operator::Mod => {
            let (a, b) = stack.pop_two_ints(name)?;
            a.checked_rem(b)
                .ok_or(PdfError::UndefinedResult { op: name })? as f64
        }
        Operator::Neg => -stack.pop_number(name)?,
        Operator::Abs => stack.pop_number(name)?.abs(),
        Operator::Ceiling => stack.pop_number(name)?.ceil(),
        Operator::Floor => stack.pop_number(name)?.floor(),
        Operator::Round => round_half_up(stack.pop_number(name)?),
        Operator::Truncate => stack.pop_number(name)?.trunc(),
        Operator::Sqrt => {
            let x = stack.pop_number(name)?;
            if x < 0.0 {
                return Err(PdfError::RangeCheck {
                    op: name,
                    msg: format!("square root of {x}"),
                });
            }
            x.sqrt()
        }
        Operator::Sin => stack.pop_number(name)?.to_radians().sin(),
        Operator::Cos => stack.pop_number(name)?.to_radians().cos(),
        Operator::Atan => {
            let (num, den) = stack.pop_two_numbers(name)?;
            atan_degrees(num, den).ok_or(PdfError::UndefinedResult { op: name })?
        }
        Operator::Exp => {
            let (base, exponent) = stack.pop_two_numbers(name)?;
            if base < 0.0 && exponent.fract() != 0.0 {
                return Err(PdfError::UndefinedResult { op: name });
            }
            let value = base.powf(exponent);
            if !value.is_finite() {
                return Err(PdfError::UndefinedResult { op: name });
            }
            value
        }
        Operator::Ln | Operator::Log => {
            let x = stack.pop_number(name)?;
            if x <= 0.0 {
                return Err(PdfError::RangeCheck {
                    op: name,
                    msg: format!("logarithm of {x}"),
                });
            }
            if op == Operator::Ln { x.ln() } else { x.log10() }
        }
        Operator::Cvi => {
            let x = stack.pop_number(name)?;
            to_int(name, x)? as f64
        }
        Operator::Cvr => stack.pop_number(name)?,
        other => {
            return Err(PdfError::TypeError {
                expected: "arithmetic operator",
                got: other.name(),
            });
        }
    };

    stack.push(Value::Number(result))
}

/// Nearest integer, halves toward positive infinity: -4.5 -> -4.
fn round_half_up(x: f64) -> f64 {
    let f = x.floor();
    if x - f >= 0.5 { f + 1.0 } else { f }
}

/// Angle of the vector (den, num) in degrees, normalized to [0, 360).
fn atan_degrees(num: f64, den: f64) -> Option<f64> {
    if num == 0.0 && den == 0.0 {
        return None;
    }
    let mut angle = num.atan2(den).to_degrees();
    if angle < 0.0 {
        angle += 360.0;
    }
    if angle >= 360.0 {
        angle -= 360.0;
    }
    // atan2 yields -0.0 for (-0, +x); report it as 0.
    Some(angle + 0.0)
}
