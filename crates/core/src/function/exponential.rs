//! Type 2 (exponential interpolation) functions.

use crate::error::{PdfError, Result};
use crate::function::Function;
use crate::function::range::{Interval, Range};
use tracing::debug;

/// `y[j] = C0[j] + x^N * (C1[j] - C0[j])`
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialFunction {
    domain: Option<Interval>,
    range: Option<Range>,
    c0: Vec<f64>,
    c1: Vec<f64>,
    n: f64,
}

impl ExponentialFunction {
    /// Create an exponential function. Missing `C0`/`C1` default to `[0.0]`
    /// and `[1.0]`; both must have the same length.
    pub fn new(c0: Option<Vec<f64>>, c1: Option<Vec<f64>>, n: f64) -> Result<Self> {
        let c0 = c0.unwrap_or_else(|| vec![0.0]);
        let c1 = c1.unwrap_or_else(|| vec![1.0]);
        if c0.len() != c1.len() {
            return Err(PdfError::MalformedFunction(format!(
                "C0 has {} value(s) but C1 has {}",
                c0.len(),
                c1.len()
            )));
        }
        if !n.is_finite() {
            return Err(PdfError::MalformedFunction(format!("invalid exponent {n}")));
        }
        Ok(Self {
            domain: None,
            range: None,
            c0,
            c1,
            n,
        })
    }

    pub fn with_domain(mut self, domain: Interval) -> Self {
        self.domain = Some(domain);
        self
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }

    pub fn exponent(&self) -> f64 {
        self.n
    }

    pub fn c0(&self) -> &[f64] {
        &self.c0
    }

    pub fn c1(&self) -> &[f64] {
        &self.c1
    }
}

impl Function for ExponentialFunction {
    fn num_inputs(&self) -> Option<usize> {
        Some(1)
    }

    fn num_outputs(&self) -> usize {
        self.c0.len()
    }

    fn evaluate(&self, input: &[f64]) -> Result<Vec<f64>> {
        let &[x] = input else {
            return Err(PdfError::InputArity {
                expected: 1,
                got: input.len(),
            });
        };
        let x = self.domain.map_or(x, |d| d.clip(x));

        if x < 0.0 && self.n.fract() != 0.0 {
            debug!(x, n = self.n, "negative input with non-integer exponent");
        } else if x == 0.0 && self.n < 0.0 {
            debug!(n = self.n, "zero input with negative exponent");
        }

        let p = x.powf(self.n);
        let mut outputs: Vec<f64> = self
            .c0
            .iter()
            .zip(&self.c1)
            .map(|(&c0, &c1)| c0 + p * (c1 - c0))
            .collect();

        if let Some(range) = &self.range {
            range.clip(&mut outputs);
        }
        Ok(outputs)
    }
}
