//! PDF model types used around functions.
//!
//! - `objects` - function dictionary objects (PDFObject, PDFStream)
//! - `color` - colour spaces and tint/shading evaluation with fallback

pub mod color;
pub mod objects;

pub use color::{Color, ColorFunction, PDFColorSpace, TintTransform};
pub use objects::{PDFObject, PDFStream};
