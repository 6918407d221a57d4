//! Type 0 (sampled) functions.
//!
//! Samples form an m-dimensional table of n-component values, packed
//! big-endian with `BitsPerSample` bits each and the first input dimension
//! varying fastest. Inputs are encoded into table coordinates, the table is
//! interpolated multilinearly, and samples are decoded into the output range.

use crate::error::{PdfError, Result};
use crate::function::range::{Range, interpolate, pairs_from_flat};
use crate::function::{Function, prepare_inputs};
use bytes::Bytes;
use tracing::debug;

const VALID_BITS_PER_SAMPLE: [u8; 8] = [1, 2, 4, 8, 12, 16, 24, 32];

/// Interpolation over 2^m corners gets unreasonable past this.
const MAX_INPUTS: usize = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct SampledFunction {
    domain: Range,
    range: Range,
    size: Vec<usize>,
    bits_per_sample: u8,
    order: u8,
    encode: Vec<[f64; 2]>,
    decode: Vec<[f64; 2]>,
    samples: Bytes,
}

impl SampledFunction {
    /// Create a sampled function with default `Encode` and `Decode`.
    ///
    /// Fails if the dimensions disagree or `samples` is too short for the
    /// declared table.
    pub fn new(
        domain: Range,
        range: Range,
        size: Vec<usize>,
        bits_per_sample: u8,
        samples: impl Into<Bytes>,
    ) -> Result<Self> {
        let m = domain.len();
        if m == 0 || range.is_empty() {
            return Err(PdfError::MalformedFunction(
                "Type 0 function requires Domain and Range".into(),
            ));
        }
        if m > MAX_INPUTS {
            return Err(PdfError::MalformedFunction(format!(
                "{m} inputs exceeds the supported {MAX_INPUTS}"
            )));
        }
        if size.len() != m {
            return Err(PdfError::MalformedFunction(format!(
                "Size has {} entries for {} input(s)",
                size.len(),
                m
            )));
        }
        if size.contains(&0) {
            return Err(PdfError::MalformedFunction("Size entries must be positive".into()));
        }
        if !VALID_BITS_PER_SAMPLE.contains(&bits_per_sample) {
            return Err(PdfError::MalformedFunction(format!(
                "unsupported BitsPerSample {bits_per_sample}"
            )));
        }

        let samples = samples.into();
        let needed_bits = size
            .iter()
            .try_fold(range.len(), |acc, &s| acc.checked_mul(s))
            .and_then(|count| count.checked_mul(bits_per_sample as usize))
            .ok_or_else(|| PdfError::MalformedFunction("sample table too large".into()))?;
        if samples.len() < needed_bits.div_ceil(8) {
            return Err(PdfError::MalformedFunction(format!(
                "sample data has {} byte(s), table needs {}",
                samples.len(),
                needed_bits.div_ceil(8)
            )));
        }

        let encode = size.iter().map(|&s| [0.0, (s - 1) as f64]).collect();
        let decode = range.intervals().iter().map(|i| [i.min, i.max]).collect();

        Ok(Self {
            domain,
            range,
            size,
            bits_per_sample,
            order: 1,
            encode,
            decode,
            samples,
        })
    }

    /// Override `Encode` with a flat `[e0 e1 ...]` array of m pairs.
    pub fn with_encode(mut self, encode: &[f64]) -> Result<Self> {
        let pairs = pairs_from_flat(encode)?;
        if pairs.len() != self.size.len() {
            return Err(PdfError::MalformedFunction(format!(
                "Encode has {} pair(s) for {} input(s)",
                pairs.len(),
                self.size.len()
            )));
        }
        self.encode = pairs;
        Ok(self)
    }

    /// Override `Decode` with a flat `[d0 d1 ...]` array of n pairs.
    pub fn with_decode(mut self, decode: &[f64]) -> Result<Self> {
        let pairs = pairs_from_flat(decode)?;
        if pairs.len() != self.range.len() {
            return Err(PdfError::MalformedFunction(format!(
                "Decode has {} pair(s) for {} output(s)",
                pairs.len(),
                self.range.len()
            )));
        }
        self.decode = pairs;
        Ok(self)
    }

    /// Set `Order`: 1 (linear) or 3 (cubic, evaluated as linear).
    pub fn with_order(mut self, order: u8) -> Result<Self> {
        match order {
            1 => {}
            3 => debug!("cubic spline order evaluated with multilinear interpolation"),
            _ => {
                return Err(PdfError::MalformedFunction(format!(
                    "unsupported Order {order}"
                )));
            }
        }
        self.order = order;
        Ok(self)
    }

    pub fn size(&self) -> &[usize] {
        &self.size
    }

    pub fn bits_per_sample(&self) -> u8 {
        self.bits_per_sample
    }

    pub fn order(&self) -> u8 {
        self.order
    }

    /// Raw sample value for table entry `index`, output component `j`.
    fn sample(&self, index: usize, j: usize) -> u32 {
        let bps = self.bits_per_sample as usize;
        let start = (index * self.range.len() + j) * bps;
        let mut value = 0u32;
        for bit in start..start + bps {
            let byte = self.samples.get(bit / 8).copied().unwrap_or(0);
            let b = (byte >> (7 - bit % 8)) & 1;
            value = (value << 1) | b as u32;
        }
        value
    }
}

impl Function for SampledFunction {
    fn num_inputs(&self) -> Option<usize> {
        Some(self.domain.len())
    }

    fn num_outputs(&self) -> usize {
        self.range.len()
    }

    fn evaluate(&self, input: &[f64]) -> Result<Vec<f64>> {
        let input = prepare_inputs(Some(&self.domain), input)?;
        let m = input.len();

        // Per dimension: lower table index, upper table index, weight of upper.
        let mut cells = Vec::with_capacity(m);
        for (k, &x) in input.iter().enumerate() {
            let interval = self.domain.intervals()[k];
            let [e0, e1] = self.encode[k];
            let last = (self.size[k] - 1) as f64;
            let e = interpolate(x, interval.min, interval.max, e0, e1).clamp(0.0, last);
            if self.size[k] == 1 {
                cells.push((0usize, 0usize, 0.0));
            } else {
                let lower = e.floor().min(last - 1.0);
                cells.push((lower as usize, lower as usize + 1, e - lower));
            }
        }

        let max_sample = ((1u64 << self.bits_per_sample) - 1) as f64;
        let mut outputs = Vec::with_capacity(self.range.len());

        for j in 0..self.range.len() {
            let mut acc = 0.0;
            for corner in 0..(1usize << m) {
                let mut weight = 1.0;
                let mut index = 0;
                let mut stride = 1;
                for (k, &(lower, upper, t)) in cells.iter().enumerate() {
                    let (pos, w) = if corner & (1 << k) != 0 {
                        (upper, t)
                    } else {
                        (lower, 1.0 - t)
                    };
                    weight *= w;
                    index += pos * stride;
                    stride *= self.size[k];
                }
                if weight != 0.0 {
                    acc += weight * self.sample(index, j) as f64;
                }
            }

            let [d0, d1] = self.decode[j];
            outputs.push(interpolate(acc, 0.0, max_sample, d0, d1));
        }

        self.range.clip(&mut outputs);
        Ok(outputs)
    }
}
