//! Calculator execution.
//!
//! `CalcMachine` feeds tokens through the expression-depth rules:
//!
//! - the outermost `{ ... }` is the function wrapper and is stepped over;
//! - inside a nested body (depth > 1) every token, braces included, is pushed
//!   onto the operand stack instead of being executed; the body as a whole
//!   takes one operand slot;
//! - `if`/`ifelse` reached at the executing depth lift their bodies back off
//!   the stack and run the selected one as if its tokens appeared inline.

use crate::calc::operators::{self, Operator, OperatorCategory};
use crate::calc::ops::{arithmetic, relational, stack};
use crate::calc::procedure::Procedure;
use crate::calc::stack::OperandStack;
use crate::calc::value::Value;
use crate::error::{PdfError, Result};
use crate::params::EvalParams;
use crate::parser::lexer::{CalcLexer, CalcToken, name_from_bytes};
use tracing::{trace, warn};

/// Operand stack plus expression depth for one evaluation.
pub struct CalcMachine<'p> {
    stack: OperandStack,
    depth: usize,
    params: &'p EvalParams,
}

impl<'p> CalcMachine<'p> {
    pub fn new(params: &'p EvalParams) -> Self {
        Self::with_stack(OperandStack::new(params.max_stack_depth), params)
    }

    /// Start from an existing stack, typically holding the function inputs.
    pub fn with_stack(stack: OperandStack, params: &'p EvalParams) -> Self {
        Self {
            stack,
            depth: 0,
            params,
        }
    }

    pub fn stack(&self) -> &OperandStack {
        &self.stack
    }

    pub fn into_stack(self) -> OperandStack {
        self.stack
    }

    /// Current `{` nesting level.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Scan and execute a whole program.
    pub fn run(&mut self, program: &[u8]) -> Result<()> {
        for item in CalcLexer::new(program) {
            let (pos, token) = match item {
                Ok(item) => item,
                Err(e) if self.params.strict => return Err(e),
                Err(e) => {
                    warn!(error = %e, "skipping malformed token");
                    continue;
                }
            };

            let value = match token {
                CalcToken::Number(n) => Value::Number(n),
                CalcToken::Bool(b) => Value::Bool(b),
                CalcToken::BraceOpen => Value::BeginProc,
                CalcToken::BraceClose => Value::EndProc,
                CalcToken::Name(name) => match operators::lookup(name) {
                    Some(op) => Value::Operator(op),
                    None => {
                        let name = name_from_bytes(name);
                        if self.params.strict {
                            return Err(PdfError::UnknownOperator { pos, name });
                        }
                        warn!(pos, name = %name, "skipping unknown operator");
                        continue;
                    }
                },
            };

            self.dispatch(value)?;
        }

        if self.depth > 0 {
            warn!(depth = self.depth, "program ended inside an unterminated procedure");
        }
        Ok(())
    }

    /// Feed one value through the depth rules.
    pub fn dispatch(&mut self, value: Value) -> Result<()> {
        match value {
            Value::BeginProc => {
                if self.depth >= self.params.max_nesting {
                    return Err(PdfError::NestingTooDeep {
                        limit: self.params.max_nesting,
                    });
                }
                self.depth += 1;
                match self.depth {
                    1 => Ok(()),
                    // A body opened at the executing depth is one operand.
                    2 => self.stack.push(Value::BeginProc),
                    _ => self.defer(Value::BeginProc),
                }
            }
            Value::EndProc => {
                match self.depth {
                    0 => warn!("ignoring unmatched '}}'"),
                    1 => self.depth = 0,
                    _ => {
                        self.defer(Value::EndProc)?;
                        self.depth -= 1;
                    }
                }
                Ok(())
            }
            Value::Operator(op) if self.depth <= 1 => self.execute(op),
            _ if self.depth > 1 => self.defer(value),
            _ => self.stack.push(value),
        }
    }

    fn defer(&mut self, value: Value) -> Result<()> {
        self.stack.push_deferred(value, self.params.max_procedure_size)
    }

    /// Execute one operator against the stack.
    ///
    /// The stack must hold at least the operator's declared inputs; nothing is
    /// popped otherwise.
    pub fn execute(&mut self, op: Operator) -> Result<()> {
        let desc = op.descriptor();
        trace!(op = desc.name, stack = self.stack.len(), "execute");
        self.stack.require(desc.name, desc.arity.inputs)?;

        match desc.category {
            OperatorCategory::Arithmetic => arithmetic::apply(op, &mut self.stack),
            OperatorCategory::Comparison | OperatorCategory::Boolean => {
                relational::apply(op, &mut self.stack)
            }
            OperatorCategory::StackManipulation => stack::apply(op, &mut self.stack),
            OperatorCategory::Control => self.execute_control(op),
        }
    }

    fn execute_control(&mut self, op: Operator) -> Result<()> {
        let name = op.name();
        match op {
            Operator::True => self.stack.push(Value::Bool(true)),
            Operator::False => self.stack.push(Value::Bool(false)),
            Operator::If => {
                let body = Procedure::pop_from(&mut self.stack, name)?;
                if self.stack.pop_bool(name)? {
                    self.run_procedure(&body)?;
                }
                Ok(())
            }
            Operator::IfElse => {
                let otherwise = Procedure::pop_from(&mut self.stack, name)?;
                let then = Procedure::pop_from(&mut self.stack, name)?;
                let selected = if self.stack.pop_bool(name)? {
                    &then
                } else {
                    &otherwise
                };
                self.run_procedure(selected)
            }
            other => Err(PdfError::TypeError {
                expected: "control operator",
                got: other.name(),
            }),
        }
    }

    /// Execute a captured body as if its tokens appeared inline.
    pub fn run_procedure(&mut self, procedure: &Procedure) -> Result<()> {
        let saved = self.depth;
        self.depth = 1;
        let result = procedure
            .body()
            .iter()
            .try_for_each(|&value| self.dispatch(value));
        self.depth = saved;
        result
    }
}
