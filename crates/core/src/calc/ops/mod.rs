//! Operator semantics, grouped by category.
//!
//! - `arithmetic`: add through cvr
//! - `relational`: comparisons, boolean/bitwise operators and bitshift
//! - `stack`: dup, pop, exch, copy, index, roll
//!
//! Control operators (`if`, `ifelse`, `true`, `false`) need the machine and
//! live in `calc::machine`.

pub mod arithmetic;
pub mod relational;
pub mod stack;
