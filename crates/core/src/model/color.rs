//! Colour spaces and function-driven colour conversion.
//!
//! Separation/DeviceN tint transforms and shading colour functions are the
//! consumers of PDF functions. A function that fails to evaluate must not
//! take the page down with it, so conversions here substitute black in the
//! target space and log a warning.

use crate::error::{PdfError, Result};
use crate::function::{Function, PdfFunction};
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::warn;

/// Represents a PDF color space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PDFColorSpace {
    /// Name of the color space (e.g., "DeviceRGB")
    pub name: String,
    /// Number of color components
    pub ncomponents: usize,
}

impl PDFColorSpace {
    /// Create a new color space.
    pub fn new(name: &str, ncomponents: usize) -> Self {
        Self {
            name: name.to_string(),
            ncomponents,
        }
    }

    /// Look up one of the predefined color spaces.
    pub fn predefined(name: &str) -> Option<&'static PDFColorSpace> {
        PREDEFINED_COLORSPACE.get(name)
    }
}

/// Predefined PDF color spaces, by name.
pub static PREDEFINED_COLORSPACE: LazyLock<HashMap<&'static str, PDFColorSpace>> =
    LazyLock::new(|| {
        let entries = [
            ("DeviceGray", 1),
            ("CalRGB", 3),
            ("CalGray", 1),
            ("Lab", 3),
            ("DeviceRGB", 3),
            ("DeviceCMYK", 4),
            ("Separation", 1),
            ("Indexed", 1),
            ("Pattern", 1),
        ];

        let mut map = HashMap::with_capacity(entries.len());
        for (name, n) in entries {
            map.insert(name, PDFColorSpace::new(name, n));
        }
        map
    });

/// A device colour value.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// Greyscale color (0.0 = black, 1.0 = white)
    Gray(f64),
    Rgb(f64, f64, f64),
    Cmyk(f64, f64, f64, f64),
}

impl Default for Color {
    fn default() -> Self {
        Color::Gray(0.0)
    }
}

impl Color {
    /// Black in `space`.
    ///
    /// The variant follows the component count, not the colour model: any
    /// three-component space, `Lab` included, gets `Color::Rgb` holding zeros,
    /// which is also black in `Lab`.
    pub fn black_for(space: &PDFColorSpace) -> Self {
        match space.ncomponents {
            3 => Color::Rgb(0.0, 0.0, 0.0),
            4 => Color::Cmyk(0.0, 0.0, 0.0, 1.0),
            _ => Color::Gray(0.0),
        }
    }

    /// Build a colour from 1, 3 or 4 components.
    pub fn from_components(components: &[f64]) -> Result<Self> {
        match *components {
            [g] => Ok(Color::Gray(g)),
            [r, g, b] => Ok(Color::Rgb(r, g, b)),
            [c, m, y, k] => Ok(Color::Cmyk(c, m, y, k)),
            _ => Err(PdfError::MalformedFunction(format!(
                "{} colour component(s) fit no device space",
                components.len()
            ))),
        }
    }

    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            Color::Gray(g) => vec![*g],
            Color::Rgb(r, g, b) => vec![*r, *g, *b],
            Color::Cmyk(c, m, y, k) => vec![*c, *m, *y, *k],
        }
    }
}

/// The colour function of a shading: one n-output function, or n
/// one-output functions whose results are concatenated.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorFunction {
    Single(PdfFunction),
    PerComponent(Vec<PdfFunction>),
}

impl ColorFunction {
    pub fn evaluate(&self, input: &[f64]) -> Result<Vec<f64>> {
        match self {
            ColorFunction::Single(f) => f.evaluate(input),
            ColorFunction::PerComponent(fs) => {
                let mut out = Vec::with_capacity(fs.len());
                for f in fs {
                    let values = f.evaluate(input)?;
                    let &[v] = values.as_slice() else {
                        return Err(PdfError::MalformedFunction(format!(
                            "per-component colour function returned {} values",
                            values.len()
                        )));
                    };
                    out.push(v);
                }
                Ok(out)
            }
        }
    }

    /// Evaluate into a colour of `space`, falling back to black.
    pub fn to_color(&self, input: &[f64], space: &PDFColorSpace) -> Color {
        let result = self
            .evaluate(input)
            .and_then(|components| checked_color(&components, space));
        result.unwrap_or_else(|err| {
            warn!(space = %space.name, %err, "colour function failed, using black");
            Color::black_for(space)
        })
    }
}

/// Tint transform of a Separation or DeviceN colour space.
#[derive(Debug, Clone, PartialEq)]
pub struct TintTransform {
    pub alternate: PDFColorSpace,
    pub function: PdfFunction,
}

impl TintTransform {
    pub fn new(alternate: PDFColorSpace, function: PdfFunction) -> Self {
        Self {
            alternate,
            function,
        }
    }

    /// Map tint values into the alternate space. Never fails: an evaluation
    /// error or a component count that does not fit the alternate space
    /// yields black there.
    pub fn to_alternate(&self, tints: &[f64]) -> Color {
        let result = self
            .function
            .evaluate(tints)
            .and_then(|components| checked_color(&components, &self.alternate));
        match result {
            Ok(color) => color,
            Err(err) => {
                warn!(
                    alternate = %self.alternate.name,
                    %err,
                    "tint transform failed, using black"
                );
                Color::black_for(&self.alternate)
            }
        }
    }
}

fn checked_color(components: &[f64], space: &PDFColorSpace) -> Result<Color> {
    if components.len() != space.ncomponents {
        return Err(PdfError::MalformedFunction(format!(
            "{} component(s) for {} which takes {}",
            components.len(),
            space.name,
            space.ncomponents
        )));
    }
    Color::from_components(components)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predefined_lookup() {
        let cmyk = PDFColorSpace::predefined("DeviceCMYK").unwrap();
        assert_eq!(cmyk.ncomponents, 4);
        assert!(PDFColorSpace::predefined("DeviceN").is_none());
    }

    #[test]
    fn test_black_for() {
        assert_eq!(
            Color::black_for(&PDFColorSpace::new("DeviceRGB", 3)),
            Color::Rgb(0.0, 0.0, 0.0)
        );
        assert_eq!(
            Color::black_for(&PDFColorSpace::new("DeviceCMYK", 4)),
            Color::Cmyk(0.0, 0.0, 0.0, 1.0)
        );
        assert_eq!(
            Color::black_for(&PDFColorSpace::new("Lab", 3)),
            Color::Rgb(0.0, 0.0, 0.0)
        );
        assert_eq!(
            Color::black_for(&PDFColorSpace::new("DeviceGray", 1)),
            Color::Gray(0.0)
        );
    }

    #[test]
    fn test_from_components() {
        assert_eq!(Color::from_components(&[0.5]).unwrap(), Color::Gray(0.5));
        assert!(Color::from_components(&[0.5, 0.5]).is_err());
        assert!(Color::from_components(&[]).is_err());
    }
}
