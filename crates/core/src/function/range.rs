//! Domain and range intervals.

use crate::error::{PdfError, Result};

/// A closed interval `[min, max]` with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        // Also rejects NaN bounds.
        if !(min <= max) {
            return Err(PdfError::MalformedFunction(format!(
                "invalid interval [{min} {max}]"
            )));
        }
        Ok(Self { min, max })
    }

    /// `[0 1]`
    pub const fn unit() -> Self {
        Self { min: 0.0, max: 1.0 }
    }

    /// Clamp `value` to the nearest bound. NaN passes through unchanged.
    pub fn clip(&self, value: f64) -> f64 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Ordered per-component intervals: a function's `Domain` or `Range`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Range {
    intervals: Vec<Interval>,
}

impl Range {
    pub fn new(intervals: Vec<Interval>) -> Self {
        Self { intervals }
    }

    /// Build from a flat `[min0 max0 min1 max1 ...]` array.
    pub fn from_flat(values: &[f64]) -> Result<Self> {
        let intervals = pairs_from_flat(values)?
            .into_iter()
            .map(|[min, max]| Interval::new(min, max))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { intervals })
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn get(&self, index: usize) -> Option<&Interval> {
        self.intervals.get(index)
    }

    /// Clip each value into its interval; values without one are untouched.
    pub fn clip(&self, values: &mut [f64]) {
        for (value, interval) in values.iter_mut().zip(&self.intervals) {
            *value = interval.clip(*value);
        }
    }

    pub fn clipped(&self, mut values: Vec<f64>) -> Vec<f64> {
        self.clip(&mut values);
        values
    }
}

/// Split a flat array into `[a b]` pairs, without ordering checks.
///
/// `Encode` and `Decode` pairs may run backwards, so they use this directly.
pub fn pairs_from_flat(values: &[f64]) -> Result<Vec<[f64; 2]>> {
    if values.len() % 2 != 0 {
        return Err(PdfError::MalformedFunction(format!(
            "expected pairs, got {} value(s)",
            values.len()
        )));
    }
    Ok(values.chunks_exact(2).map(|c| [c[0], c[1]]).collect())
}

/// Linear map of `x` from `[xmin, xmax]` onto `[ymin, ymax]`.
pub fn interpolate(x: f64, xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> f64 {
    if xmax == xmin {
        return ymin;
    }
    ymin + (x - xmin) * (ymax - ymin) / (xmax - xmin)
}
