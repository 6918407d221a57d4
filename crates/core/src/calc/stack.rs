//! Operand stack with typed, arity-checked accessors.

use crate::calc::value::Value;
use crate::error::{PdfError, Result};
use num_traits::ToPrimitive;
use smallvec::SmallVec;
use std::fmt;

/// Bounded operand stack owned by one evaluation.
///
/// Tokens of a pending procedure body sit on the stack after the body's
/// opening marker but are tracked as `deferred`; only the marker counts
/// toward `limit`.
#[derive(Clone, PartialEq)]
pub struct OperandStack {
    values: SmallVec<[Value; 16]>,
    limit: usize,
    deferred: usize,
}

impl fmt::Debug for OperandStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.values)
    }
}

impl fmt::Display for OperandStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

impl OperandStack {
    /// Create an empty stack holding at most `limit` values.
    pub fn new(limit: usize) -> Self {
        Self {
            values: SmallVec::new(),
            limit,
            deferred: 0,
        }
    }

    /// Create a stack with the function inputs pushed in order.
    pub fn from_numbers(inputs: &[f64], limit: usize) -> Result<Self> {
        let mut stack = Self::new(limit);
        for &x in inputs {
            stack.push(Value::Number(x))?;
        }
        Ok(stack)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Values counted against `limit`.
    pub fn live_len(&self) -> usize {
        self.values.len().saturating_sub(self.deferred)
    }

    /// Values held inside pending procedure bodies.
    pub fn deferred_len(&self) -> usize {
        self.deferred
    }

    /// Values from bottom to top.
    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.values.into_vec()
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.deferred = 0;
    }

    pub fn push(&mut self, value: Value) -> Result<()> {
        if self.live_len() >= self.limit {
            return Err(PdfError::StackOverflow { limit: self.limit });
        }
        self.values.push(value);
        Ok(())
    }

    /// Push a token belonging to a pending procedure body.
    pub fn push_deferred(&mut self, value: Value, max_deferred: usize) -> Result<()> {
        if self.deferred >= max_deferred {
            return Err(PdfError::ProcedureTooLarge {
                limit: max_deferred,
            });
        }
        self.values.push(value);
        self.deferred += 1;
        Ok(())
    }

    /// Stop tracking `n` deferred values after a body has been popped.
    pub fn release_deferred(&mut self, n: usize) {
        self.deferred = self.deferred.saturating_sub(n);
    }

    /// Fail unless at least `needed` values are present.
    pub fn require(&self, op: &'static str, needed: usize) -> Result<()> {
        if self.values.len() < needed {
            return Err(self.underflow(op, needed));
        }
        Ok(())
    }

    pub fn pop(&mut self, op: &'static str) -> Result<Value> {
        self.values.pop().ok_or_else(|| self.underflow(op, 1))
    }

    pub fn pop_number(&mut self, op: &'static str) -> Result<f64> {
        self.pop(op)?.as_number()
    }

    pub fn pop_bool(&mut self, op: &'static str) -> Result<bool> {
        self.pop(op)?.as_bool()
    }

    /// Pop a number truncated toward zero.
    pub fn pop_int(&mut self, op: &'static str) -> Result<i64> {
        let n = self.pop_number(op)?;
        to_int(op, n)
    }

    /// Pop two numbers, returned in push order.
    pub fn pop_two_numbers(&mut self, op: &'static str) -> Result<(f64, f64)> {
        self.require(op, 2)?;
        let b = self.pop_number(op)?;
        let a = self.pop_number(op)?;
        Ok((a, b))
    }

    /// Pop two truncated integers, returned in push order.
    pub fn pop_two_ints(&mut self, op: &'static str) -> Result<(i64, i64)> {
        let (a, b) = self.pop_two_numbers(op)?;
        Ok((to_int(op, a)?, to_int(op, b)?))
    }

    /// Top value without removing it.
    pub fn peek(&self) -> Option<&Value> {
        self.values.last()
    }

    /// Value `depth` positions below the top (0 is the top).
    pub fn peek_at(&self, depth: usize) -> Option<&Value> {
        let len = self.values.len();
        if depth >= len {
            return None;
        }
        self.values.get(len - 1 - depth)
    }

    /// Push copies of the top `n` values, preserving their order.
    pub fn duplicate_top(&mut self, op: &'static str, n: usize) -> Result<()> {
        self.require(op, n)?;
        let start = self.values.len() - n;
        for i in start..start + n {
            let value = self.values[i];
            self.push(value)?;
        }
        Ok(())
    }

    /// Mutable view of the top `n` values, bottom first.
    pub fn top_mut(&mut self, op: &'static str, n: usize) -> Result<&mut [Value]> {
        self.require(op, n)?;
        let start = self.values.len() - n;
        Ok(&mut self.values[start..])
    }

    fn underflow(&self, op: &'static str, needed: usize) -> PdfError {
        PdfError::StackUnderflow {
            op,
            needed,
            available: self.values.len(),
        }
    }
}

/// Truncate toward zero and convert, failing on NaN or out-of-range values.
pub(crate) fn to_int(op: &'static str, n: f64) -> Result<i64> {
    n.trunc().to_i64().ok_or_else(|| PdfError::RangeCheck {
        op,
        msg: format!("{n} is not representable as an integer"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_order() {
        let mut stack = OperandStack::from_numbers(&[1.0, 2.0], 10).unwrap();
        assert_eq!(stack.pop_two_numbers("test").unwrap(), (1.0, 2.0));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_overflow() {
        let mut stack = OperandStack::new(2);
        stack.push(Value::Number(1.0)).unwrap();
        stack.push(Value::Number(2.0)).unwrap();
        assert!(matches!(
            stack.push(Value::Number(3.0)),
            Err(PdfError::StackOverflow { limit: 2 })
        ));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_deferred_values_do_not_count_toward_limit() {
        let mut stack = OperandStack::new(2);
        stack.push(Value::BeginProc).unwrap();
        for _ in 0..10 {
            stack.push_deferred(Value::Number(1.0), 100).unwrap();
        }
        stack.push_deferred(Value::EndProc, 100).unwrap();
        assert_eq!(stack.len(), 12);
        assert_eq!(stack.live_len(), 1);
        stack.push(Value::Number(2.0)).unwrap();
        assert!(matches!(
            stack.push(Value::Number(3.0)),
            Err(PdfError::StackOverflow { limit: 2 })
        ));
    }

    #[test]
    fn test_deferred_cap() {
        let mut stack = OperandStack::new(2);
        stack.push_deferred(Value::Number(1.0), 1).unwrap();
        assert!(matches!(
            stack.push_deferred(Value::Number(2.0), 1),
            Err(PdfError::ProcedureTooLarge { limit: 1 })
        ));
        stack.release_deferred(1);
        assert_eq!(stack.deferred_len(), 0);
        assert_eq!(stack.live_len(), 1);
    }

    #[test]
    fn test_underflow_reports_operator() {
        let mut stack = OperandStack::from_numbers(&[1.0], 10).unwrap();
        match stack.pop_two_numbers("add") {
            Err(PdfError::StackUnderflow {
                op,
                needed,
                available,
            }) => {
                assert_eq!(op, "add");
                assert_eq!(needed, 2);
                assert_eq!(available, 1);
            }
            other => panic!("expected underflow, got {:?}", other),
        }
        // Nothing was consumed.
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_type_mismatch() {
        let mut stack = OperandStack::new(10);
        stack.push(Value::Bool(true)).unwrap();
        assert!(matches!(
            stack.pop_number("neg"),
            Err(PdfError::TypeError {
                expected: "number",
                got: "boolean"
            })
        ));
    }

    #[test]
    fn test_pop_int_truncates() {
        let mut stack = OperandStack::from_numbers(&[-7.9, 7.9], 10).unwrap();
        assert_eq!(stack.pop_int("cvi").unwrap(), 7);
        assert_eq!(stack.pop_int("cvi").unwrap(), -7);
    }

    #[test]
    fn test_pop_int_rejects_nan() {
        let mut stack = OperandStack::from_numbers(&[f64::NAN], 10).unwrap();
        assert!(matches!(
            stack.pop_int("cvi"),
            Err(PdfError::RangeCheck { op: "cvi", .. })
        ));
    }

    #[test]
    fn test_peek_at() {
        let stack = OperandStack::from_numbers(&[1.0, 2.0, 3.0], 10).unwrap();
        assert_eq!(stack.peek_at(0), Some(&Value::Number(3.0)));
        assert_eq!(stack.peek_at(2), Some(&Value::Number(1.0)));
        assert_eq!(stack.peek_at(3), None);
    }

    #[test]
    fn test_display() {
        let mut stack = OperandStack::from_numbers(&[1.5], 10).unwrap();
        stack.push(Value::Bool(false)).unwrap();
        stack.push(Value::BeginProc).unwrap();
        assert_eq!(stack.to_string(), "[1.5 false {]");
    }
}
