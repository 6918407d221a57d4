//! Type 3 (stitching) functions.

use crate::error::{PdfError, Result};
use crate::function::range::{Interval, Range, interpolate, pairs_from_flat};
use crate::function::{Function, PdfFunction};

/// Combines k one-input functions over adjacent sub-domains of one input.
///
/// `Bounds` splits the domain into k intervals; an input in interval i is
/// mapped onto the i-th `Encode` pair and handed to function i.
#[derive(Debug, Clone, PartialEq)]
pub struct StitchingFunction {
    domain: Interval,
    range: Option<Range>,
    functions: Vec<PdfFunction>,
    bounds: Vec<f64>,
    encode: Vec<[f64; 2]>,
}

impl StitchingFunction {
    pub fn new(
        domain: Interval,
        functions: Vec<PdfFunction>,
        bounds: Vec<f64>,
        encode: &[f64],
    ) -> Result<Self> {
        let k = functions.len();
        if k == 0 {
            return Err(PdfError::MalformedFunction(
                "Type 3 function has no sub-functions".into(),
            ));
        }
        if bounds.len() != k - 1 {
            return Err(PdfError::MalformedFunction(format!(
                "Bounds has {} value(s) for {} function(s)",
                bounds.len(),
                k
            )));
        }
        let mut previous = domain.min;
        for &b in &bounds {
            if !(previous <= b) {
                return Err(PdfError::MalformedFunction(format!(
                    "Bounds must increase within the domain, got {b} after {previous}"
                )));
            }
            previous = b;
        }
        if !(previous <= domain.max) {
            return Err(PdfError::MalformedFunction(format!(
                "bound {previous} lies past the domain end {}",
                domain.max
            )));
        }

        let encode = pairs_from_flat(encode)?;
        if encode.len() != k {
            return Err(PdfError::MalformedFunction(format!(
                "Encode has {} pair(s) for {} function(s)",
                encode.len(),
                k
            )));
        }

        let outputs = functions[0].num_outputs();
        for function in &functions {
            if !matches!(function.num_inputs(), None | Some(1)) {
                return Err(PdfError::MalformedFunction(
                    "stitched functions must take one input".into(),
                ));
            }
            if function.num_outputs() != outputs {
                return Err(PdfError::MalformedFunction(
                    "stitched functions disagree on output count".into(),
                ));
            }
        }

        Ok(Self {
            domain,
            range: None,
            functions,
            bounds,
            encode,
        })
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }

    pub fn functions(&self) -> &[PdfFunction] {
        &self.functions
    }

    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    /// Index of the sub-domain holding `x`.
    ///
    /// Sub-domains are half-open on the right except the last; when the first
    /// bound equals the domain start, the first sub-domain is the single point.
    fn select(&self, x: f64) -> usize {
        if self.bounds.first() == Some(&self.domain.min) && x == self.domain.min {
            return 0;
        }
        self.bounds
            .iter()
            .position(|&b| x < b)
            .unwrap_or(self.functions.len() - 1)
    }
}

impl Function for StitchingFunction {
    fn num_inputs(&self) -> Option<usize> {
        Some(1)
    }

    fn num_outputs(&self) -> usize {
        self.functions[0].num_outputs()
    }

    fn evaluate(&self, input: &[f64]) -> Result<Vec<f64>> {
        let &[x] = input else {
            return Err(PdfError::InputArity {
                expected: 1,
                got: input.len(),
            });
        };
        let x = self.domain.clip(x);

        let i = self.select(x);
        let low = if i == 0 { self.domain.min } else { self.bounds[i - 1] };
        let high = if i == self.bounds.len() {
            self.domain.max
        } else {
            self.bounds[i]
        };
        let [e0, e1] = self.encode[i];

        let mut outputs = self.functions[i].evaluate(&[interpolate(x, low, high, e0, e1)])?;
        if let Some(range) = &self.range {
            range.clip(&mut outputs);
        }
        Ok(outputs)
    }
}
