//! PostScript calculator: the Type 4 function language.
//!
//! - `value`: operand stack values
//! - `stack`: bounded operand stack
//! - `operators`: operator table
//! - `ops`: operator semantics
//! - `procedure`: deferred `{ ... }` bodies
//! - `machine`: tokenizer-driven execution

pub mod machine;
pub mod operators;
pub mod ops;
pub mod procedure;
pub mod stack;
pub mod value;

pub use machine::CalcMachine;
pub use operators::{Arity, Operator, OperatorCategory, OperatorDescriptor, ResultKind, lookup};
pub use procedure::Procedure;
pub use stack::OperandStack;
pub use value::Value;

use crate::error::Result;
use crate::params::EvalParams;

/// Run `program` over `initial_stack` and return the final stack.
///
/// The program starts at expression depth 0, so its outer `{ ... }` wrapper
/// is stepped over. A program that ends inside an unterminated body keeps
/// whatever it had pushed.
pub fn tokenize_and_evaluate(
    program: &[u8],
    initial_stack: OperandStack,
    params: &EvalParams,
) -> Result<OperandStack> {
    let mut machine = CalcMachine::with_stack(initial_stack, params);
    machine.run(program)?;
    Ok(machine.into_stack())
}
