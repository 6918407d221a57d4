//! pdfcalc - Evaluate PDF functions from the command line
//!
//! Runs Type 4 (PostScript calculator) programs and Type 2 (exponential)
//! functions on given inputs and prints the outputs as text or JSON.

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use pdfcalc_core::calc::Value;
use pdfcalc_core::function::{CalculatorFunction, ExponentialFunction, Function, Range};
use pdfcalc_core::params::EvalParams;
use pdfcalc_core::parser::ProgramSource;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputType {
    /// One value per line
    #[default]
    Text,
    /// A JSON document
    Json,
}

/// Evaluate PDF functions.
#[derive(Parser, Debug)]
#[command(name = "pdfcalc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Use debug logging level
    #[arg(short = 'd', long, global = true, action = ArgAction::SetTrue)]
    debug: bool,

    /// Output format
    #[arg(short = 'o', long = "output-type", global = true, value_enum, default_value_t)]
    output_type: OutputType,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a Type 4 (PostScript calculator) program
    Calc(CalcArgs),
    /// Evaluate a Type 2 (exponential interpolation) function
    Exp(ExpArgs),
}

#[derive(Args, Debug)]
struct CalcArgs {
    /// Program text, e.g. "{ 2 copy gt { exch } if pop }"
    #[arg(conflicts_with = "file")]
    program: Option<String>,

    /// Read the program from a file ("-" for stdin)
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,

    /// Space-separated input values
    #[arg(short = 'i', long, default_value = "", allow_hyphen_values = true)]
    inputs: String,

    /// Space-separated Range pairs: "min0 max0 min1 max1 ..."
    #[arg(short = 'r', long, allow_hyphen_values = true)]
    range: String,

    /// Space-separated Domain pairs; inputs are clipped into it
    #[arg(long, allow_hyphen_values = true)]
    domain: Option<String>,

    /// Fail on malformed tokens and unknown operators instead of skipping
    #[arg(long, action = ArgAction::SetTrue)]
    strict: bool,

    /// Operand stack limit
    #[arg(long = "max-stack", default_value = "100")]
    max_stack: usize,

    /// Print the whole final stack instead of the clipped outputs
    #[arg(long, action = ArgAction::SetTrue)]
    stack: bool,
}

#[derive(Args, Debug)]
struct ExpArgs {
    /// Interpolation exponent
    #[arg(long = "n", allow_hyphen_values = true)]
    exponent: f64,

    /// Output at x = 0 (default "0")
    #[arg(long, allow_hyphen_values = true)]
    c0: Option<String>,

    /// Output at x = 1 (default "1")
    #[arg(long, allow_hyphen_values = true)]
    c1: Option<String>,

    /// Space-separated Range pairs to clip outputs into
    #[arg(short = 'r', long, allow_hyphen_values = true)]
    range: Option<String>,

    /// Input value
    #[arg(allow_hyphen_values = true)]
    x: f64,
}

#[derive(Serialize)]
#[serde(untagged)]
enum StackEntry {
    Number(f64),
    Bool(bool),
    Other(String),
}

impl From<&Value> for StackEntry {
    fn from(value: &Value) -> Self {
        match value {
            Value::Number(n) => StackEntry::Number(*n),
            Value::Bool(b) => StackEntry::Bool(*b),
            other => StackEntry::Other(other.to_string()),
        }
    }
}

#[derive(Serialize)]
struct Report {
    outputs: Vec<StackEntry>,
}

fn parse_numbers(text: &str, what: &str) -> Result<Vec<f64>> {
    text.split_whitespace()
        .map(|s| {
            s.parse::<f64>()
                .with_context(|| format!("invalid number {s:?} in {what}"))
        })
        .collect()
}

fn parse_range(text: &str, what: &str) -> Result<Range> {
    let values = parse_numbers(text, what)?;
    Range::from_flat(&values).with_context(|| format!("invalid {what}"))
}

fn load_program(args: &CalcArgs) -> Result<ProgramSource> {
    match (&args.program, &args.file) {
        (Some(text), None) => Ok(ProgramSource::from(text.as_str())),
        (None, Some(path)) if path.as_os_str() == "-" => {
            ProgramSource::from_reader(io::stdin().lock()).context("failed to read stdin")
        }
        (None, Some(path)) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            ProgramSource::from_reader(file)
                .with_context(|| format!("failed to read {}", path.display()))
        }
        _ => bail!("give a program or --file"),
    }
}

fn run_calc(args: &CalcArgs) -> Result<Vec<StackEntry>> {
    if args.max_stack == 0 {
        bail!("--max-stack must be at least 1");
    }
    let program = load_program(args)?;
    let inputs = parse_numbers(&args.inputs, "inputs")?;
    let range = parse_range(&args.range, "range")?;
    let params = EvalParams::default()
        .with_strict(args.strict)
        .with_max_stack_depth(args.max_stack);

    debug!(bytes = program.len(), inputs = inputs.len(), "evaluating calculator program");
    let mut function = CalculatorFunction::new(program, range)?.with_params(params);
    if let Some(domain) = &args.domain {
        function = function.with_domain(parse_range(domain, "domain")?);
    }

    if args.stack {
        let stack = function.run(&inputs)?;
        return Ok(stack.as_slice().iter().map(StackEntry::from).collect());
    }
    let outputs = function.evaluate(&inputs)?;
    Ok(outputs.into_iter().map(StackEntry::Number).collect())
}

fn run_exp(args: &ExpArgs) -> Result<Vec<StackEntry>> {
    let c0 = args
        .c0
        .as_deref()
        .map(|s| parse_numbers(s, "c0"))
        .transpose()?;
    let c1 = args
        .c1
        .as_deref()
        .map(|s| parse_numbers(s, "c1"))
        .transpose()?;

    debug!(n = args.exponent, x = args.x, "evaluating exponential function");
    let mut function = ExponentialFunction::new(c0, c1, args.exponent)?;
    if let Some(range) = &args.range {
        function = function.with_range(parse_range(range, "range")?);
    }
    let outputs = function.evaluate(&[args.x])?;
    Ok(outputs.into_iter().map(StackEntry::Number).collect())
}

fn write_report(
    out: &mut impl Write,
    outputs: Vec<StackEntry>,
    output_type: OutputType,
) -> Result<()> {
    match output_type {
        OutputType::Text => {
            for entry in &outputs {
                match entry {
                    StackEntry::Number(n) => writeln!(out, "{n}")?,
                    StackEntry::Bool(b) => writeln!(out, "{b}")?,
                    StackEntry::Other(s) => writeln!(out, "{s}")?,
                }
            }
        }
        OutputType::Json => {
            serde_json::to_writer_pretty(&mut *out, &Report { outputs })?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    use tracing_subscriber::{EnvFilter, fmt};

    // PDFCALC_LOG, then RUST_LOG; -d forces debug.
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("PDFCALC_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let outputs = match &cli.command {
        Command::Calc(args) => run_calc(args)?,
        Command::Exp(args) => run_exp(args)?,
    };

    let mut stdout = io::stdout().lock();
    write_report(&mut stdout, outputs, cli.output_type)?;
    stdout.flush()?;
    Ok(())
}
