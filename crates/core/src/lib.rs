//! pdfcalc - PDF function evaluation.
//!
//! Type 4 PostScript calculator programs run on a small stack machine
//! (`calc`); Types 0, 2 and 3 and dictionary loading live in `function`.

pub mod calc;
pub mod error;
pub mod function;
pub mod model;
pub mod params;
pub mod parser;

pub use calc::{OperandStack, Operator, Value, tokenize_and_evaluate};
pub use error::{PdfError, Result};
pub use function::{
    CalculatorFunction, ExponentialFunction, Function, Interval, PdfFunction, Range,
    SampledFunction, StitchingFunction,
};
pub use params::EvalParams;
pub use parser::{CalcLexer, CalcToken, ProgramSource};
