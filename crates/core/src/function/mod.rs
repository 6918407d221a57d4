//! PDF function objects.
//!
//! Functions map m inputs to n outputs for color spaces, shadings and
//! transfer functions. Four kinds exist:
//! - Type 0: sampled table (`sampled`)
//! - Type 2: exponential interpolation (`exponential`)
//! - Type 3: stitching of one-input functions (`stitching`)
//! - Type 4: PostScript calculator program (`calculator`)

pub mod calculator;
pub mod dict;
pub mod exponential;
pub mod range;
pub mod sampled;
pub mod stitching;

pub use calculator::CalculatorFunction;
pub use exponential::ExponentialFunction;
pub use range::{Interval, Range};
pub use sampled::SampledFunction;
pub use stitching::StitchingFunction;

use crate::error::{PdfError, Result};

/// Common interface of all function types.
pub trait Function {
    /// Number of inputs, when the function declares it.
    fn num_inputs(&self) -> Option<usize>;

    fn num_outputs(&self) -> usize;

    /// Evaluate for one input vector. Each call is independent.
    fn evaluate(&self, input: &[f64]) -> Result<Vec<f64>>;
}

/// Any PDF function.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfFunction {
    Sampled(SampledFunction),
    Exponential(ExponentialFunction),
    Stitching(StitchingFunction),
    Calculator(CalculatorFunction),
}

impl PdfFunction {
    /// The `FunctionType` value.
    pub const fn function_type(&self) -> u8 {
        match self {
            Self::Sampled(_) => 0,
            Self::Exponential(_) => 2,
            Self::Stitching(_) => 3,
            Self::Calculator(_) => 4,
        }
    }

    fn inner(&self) -> &dyn Function {
        match self {
            Self::Sampled(f) => f,
            Self::Exponential(f) => f,
            Self::Stitching(f) => f,
            Self::Calculator(f) => f,
        }
    }
}

impl Function for PdfFunction {
    fn num_inputs(&self) -> Option<usize> {
        self.inner().num_inputs()
    }

    fn num_outputs(&self) -> usize {
        self.inner().num_outputs()
    }

    fn evaluate(&self, input: &[f64]) -> Result<Vec<f64>> {
        self.inner().evaluate(input)
    }
}

impl From<SampledFunction> for PdfFunction {
    fn from(f: SampledFunction) -> Self {
        Self::Sampled(f)
    }
}

impl From<ExponentialFunction> for PdfFunction {
    fn from(f: ExponentialFunction) -> Self {
        Self::Exponential(f)
    }
}

impl From<StitchingFunction> for PdfFunction {
    fn from(f: StitchingFunction) -> Self {
        Self::Stitching(f)
    }
}

impl From<CalculatorFunction> for PdfFunction {
    fn from(f: CalculatorFunction) -> Self {
        Self::Calculator(f)
    }
}

/// Check the input count against `domain` and clip each input into it.
pub(crate) fn prepare_inputs(domain: Option<&Range>, input: &[f64]) -> Result<Vec<f64>> {
    let Some(domain) = domain else {
        return Ok(input.to_vec());
    };
    if input.len() != domain.len() {
        return Err(PdfError::InputArity {
            expected: domain.len(),
            got: input.len(),
        });
    }
    Ok(domain.clipped(input.to_vec()))
}
