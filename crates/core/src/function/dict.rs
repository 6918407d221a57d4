//! Loading functions from function dictionaries.
//!
//! Types 0 and 4 must be streams; types 2 and 3 may be plain dictionaries.
//! Stream data is expected to be decoded already.

use crate::error::{PdfError, Result};
use crate::function::range::{Interval, Range};
use crate::function::{
    CalculatorFunction, ExponentialFunction, PdfFunction, SampledFunction, StitchingFunction,
};
use crate::model::objects::PDFObject;
use crate::params::EvalParams;
use std::collections::HashMap;
use tracing::debug;

/// Type 3 functions may nest; stop before a cyclic or absurd tree does harm.
const MAX_FUNCTION_DEPTH: usize = 16;

type Dict = HashMap<String, PDFObject>;

impl PdfFunction {
    /// Load a function from its dictionary or stream object.
    pub fn from_object(obj: &PDFObject) -> Result<Self> {
        Self::from_object_with_params(obj, &EvalParams::default())
    }

    /// Load a function, giving calculator functions `params`.
    pub fn from_object_with_params(obj: &PDFObject, params: &EvalParams) -> Result<Self> {
        load(obj, params, 0)
    }
}

fn load(obj: &PDFObject, params: &EvalParams, depth: usize) -> Result<PdfFunction> {
    if depth > MAX_FUNCTION_DEPTH {
        return Err(PdfError::MalformedFunction(
            "function tree nested too deeply".into(),
        ));
    }

    let (dict, data) = match obj {
        PDFObject::Dict(dict) => (dict, None),
        PDFObject::Stream(stream) => (&stream.attrs, Some(stream.data_bytes())),
        other => {
            return Err(PdfError::TypeError {
                expected: "dict or stream",
                got: other.type_name(),
            });
        }
    };

    let function_type = required(dict, "FunctionType")?.as_int()?;
    debug!(function_type, depth, "loading function");

    let domain = optional_range(dict, "Domain")?;
    let range = optional_range(dict, "Range")?;

    let function = match function_type {
        0 => {
            let data = data.ok_or_else(|| {
                PdfError::MalformedFunction("Type 0 function must be a stream".into())
            })?;
            let size = required(dict, "Size")?
                .as_array()?
                .iter()
                .map(|s| {
                    let n = s.as_int()?;
                    usize::try_from(n).map_err(|_| {
                        PdfError::MalformedFunction(format!("invalid Size entry {n}"))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            let bps = required(dict, "BitsPerSample")?.as_int()?;
            let bps = u8::try_from(bps).map_err(|_| {
                PdfError::MalformedFunction(format!("unsupported BitsPerSample {bps}"))
            })?;

            let mut f = SampledFunction::new(
                domain.unwrap_or_default(),
                range.unwrap_or_default(),
                size,
                bps,
                data,
            )?;
            if let Some(encode) = optional_numbers(dict, "Encode")? {
                f = f.with_encode(&encode)?;
            }
            if let Some(decode) = optional_numbers(dict, "Decode")? {
                f = f.with_decode(&decode)?;
            }
            if let Some(order) = dict.get("Order") {
                let order = u8::try_from(order.as_int()?).unwrap_or(0);
                f = f.with_order(order)?;
            }
            PdfFunction::Sampled(f)
        }
        2 => {
            let n = required(dict, "N")?.as_num()?;
            let mut f = ExponentialFunction::new(
                optional_numbers(dict, "C0")?,
                optional_numbers(dict, "C1")?,
                n,
            )?;
            if let Some(domain) = domain {
                f = f.with_domain(single_interval(&domain)?);
            }
            if let Some(range) = range {
                f = f.with_range(range);
            }
            PdfFunction::Exponential(f)
        }
        3 => {
            let domain = domain.ok_or_else(|| PdfError::KeyError("Domain".into()))?;
            let functions = required(dict, "Functions")?
                .as_array()?
                .iter()
                .map(|f| load(f, params, depth + 1))
                .collect::<Result<Vec<_>>>()?;
            let bounds = required(dict, "Bounds")?.as_num_array()?;
            let encode = required(dict, "Encode")?.as_num_array()?;

            let mut f =
                StitchingFunction::new(single_interval(&domain)?, functions, bounds, &encode)?;
            if let Some(range) = range {
                f = f.with_range(range);
            }
            PdfFunction::Stitching(f)
        }
        4 => {
            let data = data.ok_or_else(|| {
                PdfError::MalformedFunction("Type 4 function must be a stream".into())
            })?;
            let range = range.ok_or_else(|| PdfError::KeyError("Range".into()))?;
            let mut f = CalculatorFunction::new(data, range)?.with_params(params.clone());
            if let Some(domain) = domain {
                f = f.with_domain(domain);
            }
            PdfFunction::Calculator(f)
        }
        other => return Err(PdfError::UnsupportedFunctionType(other)),
    };

    Ok(function)
}

fn required<'a>(dict: &'a Dict, key: &str) -> Result<&'a PDFObject> {
    dict.get(key)
        .ok_or_else(|| PdfError::KeyError(key.to_string()))
}

fn optional_numbers(dict: &Dict, key: &str) -> Result<Option<Vec<f64>>> {
    match dict.get(key) {
        None | Some(PDFObject::Null) => Ok(None),
        Some(obj) => obj.as_num_array().map(Some),
    }
}

fn optional_range(dict: &Dict, key: &str) -> Result<Option<Range>> {
    optional_numbers(dict, key)?
        .map(|values| Range::from_flat(&values))
        .transpose()
}

fn single_interval(domain: &Range) -> Result<Interval> {
    match domain.intervals() {
        [interval] => Ok(*interval),
        other => Err(PdfError::MalformedFunction(format!(
            "expected a one-input Domain, got {} interval(s)",
            other.len()
        ))),
    }
}
