//! Function dictionary objects.
//!
//! The slice of the PDF object model that function dictionaries use. The
//! document layer resolves references and decodes stream filters before
//! handing objects over, so there is no reference variant and stream data
//! is already decoded.

use crate::error::{PdfError, Result};
use bytes::Bytes;
use std::collections::HashMap;

/// PDF object value.
#[derive(Debug, Clone, PartialEq)]
pub enum PDFObject {
    /// Null object
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Real (floating point) value
    Real(f64),
    /// Name object (e.g., /FunctionType)
    Name(String),
    /// String (byte array)
    String(Vec<u8>),
    /// Array of objects
    Array(Vec<Self>),
    /// Dictionary (name -> object mapping)
    Dict(HashMap<String, Self>),
    /// Stream (dictionary + decoded data)
    Stream(Box<PDFStream>),
}

impl PDFObject {
    /// Array of numbers, the shape of `Domain`, `Range`, `C0` and friends.
    pub fn num_array(values: &[f64]) -> Self {
        Self::Array(values.iter().map(|&v| Self::Real(v)).collect())
    }

    /// Check if this is a null object
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get as boolean
    pub const fn as_bool(&self) -> Result<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(PdfError::TypeError {
                expected: "bool",
                got: self.type_name(),
            }),
        }
    }

    /// Get as integer
    ///
    /// Reals with no fractional part are accepted, since writers emit `2.0`
    /// for integer-valued keys often enough.
    pub fn as_int(&self) -> Result<i64> {
        match self {
            Self::Int(n) => Ok(*n),
            Self::Real(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => Ok(*n as i64),
            _ => Err(PdfError::TypeError {
                expected: "int",
                got: self.type_name(),
            }),
        }
    }

    /// Get numeric value (int or real coerced to f64)
    pub const fn as_num(&self) -> Result<f64> {
        match self {
            Self::Int(n) => Ok(*n as f64),
            Self::Real(n) => Ok(*n),
            _ => Err(PdfError::TypeError {
                expected: "number",
                got: self.type_name(),
            }),
        }
    }

    /// Get as name string
    pub fn as_name(&self) -> Result<&str> {
        match self {
            Self::Name(s) => Ok(s),
            _ => Err(PdfError::TypeError {
                expected: "name",
                got: self.type_name(),
            }),
        }
    }

    /// Get as array
    pub const fn as_array(&self) -> Result<&Vec<Self>> {
        match self {
            Self::Array(arr) => Ok(arr),
            _ => Err(PdfError::TypeError {
                expected: "array",
                got: self.type_name(),
            }),
        }
    }

    /// Get as array of numbers
    pub fn as_num_array(&self) -> Result<Vec<f64>> {
        self.as_array()?.iter().map(Self::as_num).collect()
    }

    /// Get as dictionary
    pub const fn as_dict(&self) -> Result<&HashMap<String, Self>> {
        match self {
            Self::Dict(d) => Ok(d),
            _ => Err(PdfError::TypeError {
                expected: "dict",
                got: self.type_name(),
            }),
        }
    }

    /// Get as stream
    pub fn as_stream(&self) -> Result<&PDFStream> {
        match self {
            Self::Stream(s) => Ok(s),
            _ => Err(PdfError::TypeError {
                expected: "stream",
                got: self.type_name(),
            }),
        }
    }

    /// Get type name for error messages
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Real(_) => "real",
            Self::Name(_) => "name",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Dict(_) => "dict",
            Self::Stream(_) => "stream",
        }
    }
}

impl From<f64> for PDFObject {
    fn from(n: f64) -> Self {
        Self::Real(n)
    }
}

impl From<i64> for PDFObject {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

/// PDF Stream - dictionary attributes + decoded data.
#[derive(Debug, Clone, PartialEq)]
pub struct PDFStream {
    /// Stream dictionary attributes
    pub attrs: HashMap<String, PDFObject>,
    data: Bytes,
}

impl PDFStream {
    /// Create a new stream over already-decoded data.
    pub fn new(attrs: HashMap<String, PDFObject>, data: impl Into<Bytes>) -> Self {
        Self {
            attrs,
            data: data.into(),
        }
    }

    /// Get decoded data.
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    /// Get decoded data as shared bytes.
    pub fn data_bytes(&self) -> Bytes {
        self.data.clone()
    }

    /// Check if stream contains a key.
    pub fn contains(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    /// Get attribute by name.
    pub fn get(&self, name: &str) -> Option<&PDFObject> {
        self.attrs.get(name)
    }
}
