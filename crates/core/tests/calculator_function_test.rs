//! Type 4 function evaluation: inputs, output extraction and clipping.

use pdfcalc_core::calc::Value;
use pdfcalc_core::error::PdfError;
use pdfcalc_core::function::calculator::evaluate;
use pdfcalc_core::function::{CalculatorFunction, Function, Range};
use pdfcalc_core::params::EvalParams;
use pdfcalc_core::parser::ProgramSource;

const MIN_OF_TWO: &str = "{ 2 copy gt { exch } if pop }";

fn unit_range(n: usize) -> Range {
    Range::from_flat(&[0.0, 1.0].repeat(n)).unwrap()
}

#[test]
fn test_min_of_two() {
    let range = Range::from_flat(&[0.0, 10.0]).unwrap();
    assert_eq!(evaluate(MIN_OF_TWO.as_bytes(), &[3.0, 5.0], &range).unwrap(), vec![3.0]);
    assert_eq!(evaluate(MIN_OF_TWO.as_bytes(), &[5.0, 3.0], &range).unwrap(), vec![3.0]);
}

#[test]
fn test_outputs_are_clipped() {
    let range = Range::from_flat(&[0.0, 1.0]).unwrap();
    assert_eq!(evaluate(b"{ 2 mul }", &[0.75], &range).unwrap(), vec![1.0]);
    assert_eq!(evaluate(b"{ 2 mul }", &[-0.75], &range).unwrap(), vec![0.0]);
    assert_eq!(evaluate(b"{ 2 mul }", &[0.25], &range).unwrap(), vec![0.5]);
}

#[test]
fn test_outputs_come_from_the_bottom_of_the_stack() {
    // Three values remain; the two bottom-most are the outputs.
    let function = CalculatorFunction::new("{ dup dup 0.5 mul }", unit_range(2)).unwrap();
    assert_eq!(function.evaluate(&[0.8]).unwrap(), vec![0.8, 0.8]);
}

#[test]
fn test_gray_to_cmyk() {
    let function = CalculatorFunction::new("{ 0 exch 0 exch 0 exch }", unit_range(4)).unwrap();
    assert_eq!(function.num_outputs(), 4);
    assert_eq!(function.evaluate(&[0.3]).unwrap(), vec![0.0, 0.0, 0.0, 0.3]);
}

#[test]
fn test_too_few_outputs() {
    let function = CalculatorFunction::new("{ pop }", unit_range(1)).unwrap();
    assert!(matches!(
        function.evaluate(&[0.5]),
        Err(PdfError::MalformedFunction(_))
    ));
}

#[test]
fn test_boolean_output_is_a_type_error() {
    let function = CalculatorFunction::new("{ 0.5 gt }", unit_range(1)).unwrap();
    assert!(matches!(
        function.evaluate(&[0.7]),
        Err(PdfError::TypeError {
            expected: "number",
            got: "boolean"
        })
    ));
}

#[test]
fn test_range_is_required() {
    assert!(matches!(
        CalculatorFunction::new("{ }", Range::default()),
        Err(PdfError::MalformedFunction(_))
    ));
}

#[test]
fn test_evaluations_do_not_share_state() {
    let function = CalculatorFunction::new("{ 1 add }", Range::from_flat(&[0.0, 100.0]).unwrap())
        .unwrap();
    let first = function.evaluate(&[1.0]).unwrap();
    let _ = function.evaluate(&[50.0]).unwrap();
    let third = function.evaluate(&[1.0]).unwrap();
    assert_eq!(first, vec![2.0]);
    assert_eq!(first, third, "same input, same output");
}

#[test]
fn test_failed_evaluation_does_not_poison_later_calls() {
    let function = CalculatorFunction::new("{ 1 exch div }", unit_range(1)).unwrap();
    assert!(matches!(
        function.evaluate(&[0.0]),
        Err(PdfError::UndefinedResult { op: "div" })
    ));
    assert_eq!(function.evaluate(&[4.0]).unwrap(), vec![0.25]);
}

#[test]
fn test_domain_clips_and_counts_inputs() {
    let function = CalculatorFunction::new("{ }", unit_range(1))
        .unwrap()
        .with_domain(Range::from_flat(&[0.0, 0.5]).unwrap());
    assert_eq!(function.num_inputs(), Some(1));
    assert_eq!(function.evaluate(&[0.9]).unwrap(), vec![0.5]);
    assert!(matches!(
        function.evaluate(&[0.1, 0.2]),
        Err(PdfError::InputArity {
            expected: 1,
            got: 2
        })
    ));
}

#[test]
fn test_without_domain_inputs_pass_unclipped() {
    let function = CalculatorFunction::new("{ 10 div }", unit_range(1)).unwrap();
    assert_eq!(function.num_inputs(), None);
    assert_eq!(function.evaluate(&[5.0]).unwrap(), vec![0.5]);
}

#[test]
fn test_run_returns_raw_stack() {
    let function = CalculatorFunction::new(MIN_OF_TWO, unit_range(1)).unwrap();
    let stack = function.run(&[7.0, 2.0]).unwrap();
    assert_eq!(stack.as_slice(), &[Value::Number(2.0)]);
}

#[test]
fn test_params_apply_per_function() {
    let strict = CalculatorFunction::new("{ 1 bogus }", unit_range(1))
        .unwrap()
        .with_params(EvalParams::default().with_strict(true));
    assert!(matches!(
        strict.evaluate(&[]),
        Err(PdfError::UnknownOperator { .. })
    ));

    let lenient = CalculatorFunction::new("{ 1 bogus }", unit_range(1)).unwrap();
    assert_eq!(lenient.evaluate(&[]).unwrap(), vec![1.0]);
}

#[test]
fn test_too_many_inputs_for_stack_limit() {
    let function = CalculatorFunction::new("{ }", unit_range(1))
        .unwrap()
        .with_params(EvalParams::default().with_max_stack_depth(2));
    assert!(matches!(
        function.evaluate(&[0.1, 0.2, 0.3]),
        Err(PdfError::StackOverflow { limit: 2 })
    ));
}

#[test]
fn test_program_from_reader() {
    let source = ProgramSource::from_reader(&b"{ 0.5 mul }"[..]).unwrap();
    let function = CalculatorFunction::new(source, unit_range(1)).unwrap();
    assert_eq!(function.evaluate(&[0.5]).unwrap(), vec![0.25]);
}

#[test]
fn test_nan_output_passes_through_clip() {
    let function = CalculatorFunction::new("{ 1 mul }", unit_range(1)).unwrap();
    let out = function.evaluate(&[f64::NAN]).unwrap();
    assert!(out[0].is_nan());
}

#[test]
fn test_round_just_below_half() {
    let function = CalculatorFunction::new("{ round }", Range::from_flat(&[-10.0, 10.0]).unwrap())
        .unwrap();
    assert_eq!(function.evaluate(&[0.49999999999999994]).unwrap(), vec![0.0]);
    assert_eq!(function.evaluate(&[-4.5]).unwrap(), vec![-4.0]);
}
