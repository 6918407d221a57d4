//! Type 4 (PostScript calculator) functions.

use crate::calc::{OperandStack, tokenize_and_evaluate};
use crate::error::{PdfError, Result};
use crate::function::range::Range;
use crate::function::{Function, prepare_inputs};
use crate::params::EvalParams;
use crate::parser::source::ProgramSource;
use tracing::debug;

/// A function whose body is a small PostScript program.
///
/// Evaluation pushes the inputs, runs the program, reads the bottom-most
/// `Range.len()` stack values as outputs and clips them into `Range`.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorFunction {
    program: ProgramSource,
    domain: Option<Range>,
    range: Range,
    params: EvalParams,
}

impl CalculatorFunction {
    /// Create a calculator function. `range` must declare at least one output.
    pub fn new(program: impl Into<ProgramSource>, range: Range) -> Result<Self> {
        if range.is_empty() {
            return Err(PdfError::MalformedFunction(
                "Type 4 function requires a Range".into(),
            ));
        }
        Ok(Self {
            program: program.into(),
            domain: None,
            range,
            params: EvalParams::default(),
        })
    }

    /// Declare the input domain: inputs are then counted and clipped.
    pub fn with_domain(mut self, domain: Range) -> Self {
        self.domain = Some(domain);
        self
    }

    pub fn with_params(mut self, params: EvalParams) -> Self {
        self.params = params;
        self
    }

    pub fn program(&self) -> &ProgramSource {
        &self.program
    }

    pub fn domain(&self) -> Option<&Range> {
        self.domain.as_ref()
    }

    pub fn range(&self) -> &Range {
        &self.range
    }

    pub fn params(&self) -> &EvalParams {
        &self.params
    }

    /// Run the program and return the whole final stack, before output
    /// extraction and clipping.
    pub fn run(&self, input: &[f64]) -> Result<OperandStack> {
        let input = prepare_inputs(self.domain.as_ref(), input)?;
        let stack = OperandStack::from_numbers(&input, self.params.max_stack_depth)?;
        tokenize_and_evaluate(self.program.as_bytes(), stack, &self.params)
    }

    fn extract_outputs(&self, stack: &OperandStack) -> Result<Vec<f64>> {
        let n = self.range.len();
        if stack.len() < n {
            return Err(PdfError::MalformedFunction(format!(
                "program left {} value(s) on the stack, {} output(s) declared",
                stack.len(),
                n
            )));
        }
        if stack.len() > n {
            debug!(
                extra = stack.len() - n,
                "ignoring values above the declared outputs"
            );
        }

        let mut outputs = stack.as_slice()[..n]
            .iter()
            .map(|value| value.as_number())
            .collect::<Result<Vec<_>>>()?;
        self.range.clip(&mut outputs);
        Ok(outputs)
    }
}

impl Function for CalculatorFunction {
    fn num_inputs(&self) -> Option<usize> {
        self.domain.as_ref().map(Range::len)
    }

    fn num_outputs(&self) -> usize {
        self.range.len()
    }

    fn evaluate(&self, input: &[f64]) -> Result<Vec<f64>> {
        let stack = self.run(input)?;
        self.extract_outputs(&stack)
    }
}

/// Evaluate a calculator program once with default parameters.
pub fn evaluate(program: &[u8], input: &[f64], range: &Range) -> Result<Vec<f64>> {
    CalculatorFunction::new(program.to_vec(), range.clone())?.evaluate(input)
}
