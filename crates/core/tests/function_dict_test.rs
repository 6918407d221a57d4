//! Loading functions from function dictionaries and streams.

use pdfcalc_core::error::PdfError;
use pdfcalc_core::function::{Function, PdfFunction};
use pdfcalc_core::model::{PDFObject, PDFStream};
use pdfcalc_core::params::EvalParams;
use std::collections::HashMap;

fn dict(entries: Vec<(&str, PDFObject)>) -> HashMap<String, PDFObject> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn stream(entries: Vec<(&str, PDFObject)>, data: &[u8]) -> PDFObject {
    PDFObject::Stream(Box::new(PDFStream::new(dict(entries), data.to_vec())))
}

fn nums(values: &[f64]) -> PDFObject {
    PDFObject::num_array(values)
}

fn exponential_dict(c0: f64, c1: f64) -> PDFObject {
    PDFObject::Dict(dict(vec![
        ("FunctionType", PDFObject::Int(2)),
        ("Domain", nums(&[0.0, 1.0])),
        ("C0", nums(&[c0])),
        ("C1", nums(&[c1])),
        ("N", PDFObject::Int(1)),
    ]))
}

#[test]
fn test_load_exponential() {
    let f = PdfFunction::from_object(&exponential_dict(0.0, 1.0)).unwrap();
    assert_eq!(f.function_type(), 2);
    assert_eq!(f.evaluate(&[0.5]).unwrap(), vec![0.5]);
    assert_eq!(f.evaluate(&[4.0]).unwrap(), vec![1.0], "Domain applied");
}

#[test]
fn test_load_calculator_stream() {
    let obj = stream(
        vec![
            ("FunctionType", PDFObject::Int(4)),
            ("Domain", nums(&[0.0, 1.0, 0.0, 1.0])),
            ("Range", nums(&[0.0, 1.0])),
        ],
        b"{ 2 copy gt { exch } if pop }",
    );
    let f = PdfFunction::from_object(&obj).unwrap();
    assert_eq!(f.function_type(), 4);
    assert_eq!(f.num_inputs(), Some(2));
    assert_eq!(f.num_outputs(), 1);
    assert_eq!(f.evaluate(&[0.6, 0.3]).unwrap(), vec![0.3]);
}

#[test]
fn test_calculator_params_are_passed_down() {
    let obj = stream(
        vec![
            ("FunctionType", PDFObject::Int(4)),
            ("Range", nums(&[0.0, 1.0])),
        ],
        b"{ 1 nonsense }",
    );
    let strict = EvalParams::default().with_strict(true);
    let f = PdfFunction::from_object_with_params(&obj, &strict).unwrap();
    assert!(matches!(f.evaluate(&[]), Err(PdfError::UnknownOperator { .. })));

    let lenient = PdfFunction::from_object(&obj).unwrap();
    assert_eq!(lenient.evaluate(&[]).unwrap(), vec![1.0]);
}

#[test]
fn test_load_sampled_stream() {
    let obj = stream(
        vec![
            ("FunctionType", PDFObject::Int(0)),
            ("Domain", nums(&[0.0, 1.0])),
            ("Range", nums(&[0.0, 1.0, 0.0, 1.0])),
            ("Size", PDFObject::Array(vec![PDFObject::Int(2)])),
            ("BitsPerSample", PDFObject::Int(8)),
            ("Decode", nums(&[0.0, 1.0, 1.0, 0.0])),
        ],
        &hex::decode("00FF FF00".replace(' ', "")).unwrap(),
    );
    let f = PdfFunction::from_object(&obj).unwrap();
    assert_eq!(f.function_type(), 0);
    assert_eq!(f.evaluate(&[0.0]).unwrap(), vec![0.0, 0.0]);
    assert_eq!(f.evaluate(&[1.0]).unwrap(), vec![1.0, 1.0]);
}

#[test]
fn test_load_stitching() {
    let obj = PDFObject::Dict(dict(vec![
        ("FunctionType", PDFObject::Int(3)),
        ("Domain", nums(&[0.0, 1.0])),
        (
            "Functions",
            PDFObject::Array(vec![exponential_dict(0.0, 1.0), exponential_dict(1.0, 0.0)]),
        ),
        ("Bounds", nums(&[0.5])),
        ("Encode", nums(&[0.0, 1.0, 0.0, 1.0])),
    ]));
    let f = PdfFunction::from_object(&obj).unwrap();
    assert_eq!(f.function_type(), 3);
    assert_eq!(f.evaluate(&[0.25]).unwrap(), vec![0.5]);
    assert_eq!(f.evaluate(&[1.0]).unwrap(), vec![0.0]);
}

#[test]
fn test_integral_reals_accepted_for_integer_keys() {
    let obj = PDFObject::Dict(dict(vec![
        ("FunctionType", PDFObject::Real(2.0)),
        ("N", PDFObject::Real(2.0)),
    ]));
    let f = PdfFunction::from_object(&obj).unwrap();
    assert_eq!(f.evaluate(&[0.5]).unwrap(), vec![0.25]);
}

#[test]
fn test_missing_keys() {
    let no_type = PDFObject::Dict(dict(vec![("N", PDFObject::Int(1))]));
    assert!(matches!(
        PdfFunction::from_object(&no_type),
        Err(PdfError::KeyError(key)) if key == "FunctionType"
    ));

    let no_range = stream(vec![("FunctionType", PDFObject::Int(4))], b"{ }");
    assert!(matches!(
        PdfFunction::from_object(&no_range),
        Err(PdfError::KeyError(key)) if key == "Range"
    ));

    let no_n = PDFObject::Dict(dict(vec![("FunctionType", PDFObject::Int(2))]));
    assert!(matches!(
        PdfFunction::from_object(&no_n),
        Err(PdfError::KeyError(key)) if key == "N"
    ));
}

#[test]
fn test_calculator_must_be_stream() {
    let obj = PDFObject::Dict(dict(vec![
        ("FunctionType", PDFObject::Int(4)),
        ("Range", nums(&[0.0, 1.0])),
    ]));
    assert!(matches!(
        PdfFunction::from_object(&obj),
        Err(PdfError::MalformedFunction(_))
    ));
}

#[test]
fn test_unsupported_type() {
    for t in [1, 5, -2] {
        let obj = PDFObject::Dict(dict(vec![("FunctionType", PDFObject::Int(t))]));
        assert!(matches!(
            PdfFunction::from_object(&obj),
            Err(PdfError::UnsupportedFunctionType(got)) if got == t
        ));
    }
}

#[test]
fn test_bad_ranges() {
    let odd = stream(
        vec![
            ("FunctionType", PDFObject::Int(4)),
            ("Range", nums(&[0.0, 1.0, 0.0])),
        ],
        b"{ }",
    );
    assert!(matches!(
        PdfFunction::from_object(&odd),
        Err(PdfError::MalformedFunction(_))
    ));

    let inverted = stream(
        vec![
            ("FunctionType", PDFObject::Int(4)),
            ("Range", nums(&[1.0, 0.0])),
        ],
        b"{ }",
    );
    assert!(matches!(
        PdfFunction::from_object(&inverted),
        Err(PdfError::MalformedFunction(_))
    ));
}

#[test]
fn test_not_a_dictionary() {
    assert!(matches!(
        PdfFunction::from_object(&PDFObject::Int(4)),
        Err(PdfError::TypeError {
            expected: "dict or stream",
            got: "int"
        })
    ));
    let bad_entry = PDFObject::Dict(dict(vec![
        ("FunctionType", PDFObject::Name("Exponential".into())),
    ]));
    assert!(matches!(
        PdfFunction::from_object(&bad_entry),
        Err(PdfError::TypeError { .. })
    ));
}

#[test]
fn test_stitching_depth_is_limited() {
    let mut obj = exponential_dict(0.0, 1.0);
    for _ in 0..40 {
        obj = PDFObject::Dict(dict(vec![
            ("FunctionType", PDFObject::Int(3)),
            ("Domain", nums(&[0.0, 1.0])),
            ("Functions", PDFObject::Array(vec![obj])),
            ("Bounds", nums(&[])),
            ("Encode", nums(&[0.0, 1.0])),
        ]));
    }
    assert!(matches!(
        PdfFunction::from_object(&obj),
        Err(PdfError::MalformedFunction(_))
    ));
}
