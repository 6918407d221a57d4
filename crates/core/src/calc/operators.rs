//! PostScript calculator operator table.
//!
//! Every operator a Type 4 function may use, with its category and operand
//! contract. The table is a constant; name lookup goes through a map built on
//! first use and shared read-only by all evaluations.

use rustc_hash::FxHashMap;
use std::sync::LazyLock;

/// Calculator operators.
///
/// Discriminants index into [`OPERATORS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Idiv,
    Mod,
    Neg,
    Abs,
    Ceiling,
    Floor,
    Round,
    Truncate,
    Sqrt,
    Sin,
    Cos,
    Atan,
    Exp,
    Ln,
    Log,
    Cvi,
    Cvr,

    // Relational
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,

    // Boolean and bitwise
    And,
    Or,
    Xor,
    Not,
    Bitshift,

    // Stack
    Dup,
    Pop,
    Exch,
    Copy,
    Index,
    Roll,

    // Control
    If,
    IfElse,
    True,
    False,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorCategory {
    Arithmetic,
    Comparison,
    Boolean,
    StackManipulation,
    Control,
}

/// What an operator leaves on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    /// Numbers only
    Number,
    /// Booleans only
    Boolean,
    /// Boolean for boolean operands, number for integer operands
    SameAsOperands,
    /// Copies or reorders existing values
    Operands,
    /// Whatever the selected procedure body leaves
    Procedure,
}

/// Operand contract of an operator.
///
/// `inputs` values are popped and `outputs` values pushed. When `variable` is
/// set the operator also reaches below its popped operands (`copy`, `index`,
/// `roll`) or runs a procedure body (`if`, `ifelse`), so the net effect
/// depends on operand values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub inputs: usize,
    pub outputs: usize,
    pub variable: bool,
}

impl Arity {
    const fn fixed(inputs: usize, outputs: usize) -> Self {
        Self {
            inputs,
            outputs,
            variable: false,
        }
    }

    const fn variable(inputs: usize) -> Self {
        Self {
            inputs,
            outputs: 0,
            variable: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorDescriptor {
    pub name: &'static str,
    pub operator: Operator,
    pub category: OperatorCategory,
    pub arity: Arity,
    pub result: ResultKind,
}

const fn op(
    name: &'static str,
    operator: Operator,
    category: OperatorCategory,
    arity: Arity,
    result: ResultKind,
) -> OperatorDescriptor {
    OperatorDescriptor {
        name,
        operator,
        category,
        arity,
        result,
    }
}

use Operator as O;
use OperatorCategory::{Arithmetic, Boolean, Comparison, Control, StackManipulation};

/// All calculator operators, in `Operator` discriminant order.
pub static OPERATORS: [OperatorDescriptor; 42] = [
    op("add", O::Add, Arithmetic, Arity::fixed(2, 1), ResultKind::Number),
    op("sub", O::Sub, Arithmetic, Arity::fixed(2, 1), ResultKind::Number),
    op("mul", O::Mul, Arithmetic, Arity::fixed(2, 1), ResultKind::Number),
    op("div", O::Div, Arithmetic, Arity::fixed(2, 1), ResultKind::Number),
    op("idiv", O::Idiv, Arithmetic, Arity::fixed(2, 1), ResultKind::Number),
    op("mod", O::Mod, Arithmetic, Arity::fixed(2, 1), ResultKind::Number),
    op("neg", O::Neg, Arithmetic, Arity::fixed(1, 1), ResultKind::Number),
    op("abs", O::Abs, Arithmetic, Arity::fixed(1, 1), ResultKind::Number),
    op("ceiling", O::Ceiling, Arithmetic, Arity::fixed(1, 1), ResultKind::Number),
    op("floor", O::Floor, Arithmetic, Arity::fixed(1, 1), ResultKind::Number),
    op("round", O::Round, Arithmetic, Arity::fixed(1, 1), ResultKind::Number),
    op("truncate", O::Truncate, Arithmetic, Arity::fixed(1, 1), ResultKind::Number),
    op("sqrt", O::Sqrt, Arithmetic, Arity::fixed(1, 1), ResultKind::Number),
    op("sin", O::Sin, Arithmetic, Arity::fixed(1, 1), ResultKind::Number),
    op("cos", O::Cos, Arithmetic, Arity::fixed(1, 1), ResultKind::Number),
    op("atan", O::Atan, Arithmetic, Arity::fixed(2, 1), ResultKind::Number),
    op("exp", O::Exp, Arithmetic, Arity::fixed(2, 1), ResultKind::Number),
    op("ln", O::Ln, Arithmetic, Arity::fixed(1, 1), ResultKind::Number),
    op("log", O::Log, Arithmetic, Arity::fixed(1, 1), ResultKind::Number),
    op("cvi", O::Cvi, Arithmetic, Arity::fixed(1, 1), ResultKind::Number),
    op("cvr", O::Cvr, Arithmetic, Arity::fixed(1, 1), ResultKind::Number),
    op("eq", O::Eq, Comparison, Arity::fixed(2, 1), ResultKind::Boolean),
    op("ne", O::Ne, Comparison, Arity::fixed(2, 1), ResultKind::Boolean),
    op("gt", O::Gt, Comparison, Arity::fixed(2, 1), ResultKind::Boolean),
    op("ge", O::Ge, Comparison, Arity::fixed(2, 1), ResultKind::Boolean),
    op("lt", O::Lt, Comparison, Arity::fixed(2, 1), ResultKind::Boolean),
    op("le", O::Le, Comparison, Arity::fixed(2, 1), ResultKind::Boolean),
    op("and", O::And, Boolean, Arity::fixed(2, 1), ResultKind::SameAsOperands),
    op("or", O::Or, Boolean, Arity::fixed(2, 1), ResultKind::SameAsOperands),
    op("xor", O::Xor, Boolean, Arity::fixed(2, 1), ResultKind::SameAsOperands),
    op("not", O::Not, Boolean, Arity::fixed(1, 1), ResultKind::SameAsOperands),
    op("bitshift", O::Bitshift, Boolean, Arity::fixed(2, 1), ResultKind::Number),
    op("dup", O::Dup, StackManipulation, Arity::fixed(1, 2), ResultKind::Operands),
    op("pop", O::Pop, StackManipulation, Arity::fixed(1, 0), ResultKind::Operands),
    op("exch", O::Exch, StackManipulation, Arity::fixed(2, 2), ResultKind::Operands),
    op("copy", O::Copy, StackManipulation, Arity::variable(1), ResultKind::Operands),
    op("index", O::Index, StackManipulation, Arity::variable(1), ResultKind::Operands),
    op("roll", O::Roll, StackManipulation, Arity::variable(2), ResultKind::Operands),
    op("if", O::If, Control, Arity::variable(2), ResultKind::Procedure),
    op("ifelse", O::IfElse, Control, Arity::variable(3), ResultKind::Procedure),
    op("true", O::True, Control, Arity::fixed(0, 1), ResultKind::Boolean),
    op("false", O::False, Control, Arity::fixed(0, 1), ResultKind::Boolean),
];

static OPERATOR_TABLE: LazyLock<FxHashMap<&'static [u8], Operator>> = LazyLock::new(|| {
    OPERATORS
        .iter()
        .map(|desc| (desc.name.as_bytes(), desc.operator))
        .collect()
});

/// Resolve an operator name.
pub fn lookup(name: &[u8]) -> Option<Operator> {
    OPERATOR_TABLE.get(name).copied()
}

impl Operator {
    pub fn descriptor(self) -> &'static OperatorDescriptor {
        &OPERATORS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn category(self) -> OperatorCategory {
        self.descriptor().category
    }

    pub fn arity(self) -> Arity {
        self.descriptor().arity
    }
}
