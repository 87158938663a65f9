//! # Calculator Error Type
//!
//! This module defines [`CalcError`], a unified error enum for the calculator
//! pipeline. It aggregates failures from:
//!
//! - **Grammar loading** (table validation),
//! - **Parsing** (lexical and syntax errors reported by the engine),
//! - **Evaluation** (numeric literals, arithmetic faults, recovered errors),
//! - **I/O** (reading input files).
//!
//! Conversions from underlying error types are derived with `#[from]`, enabling
//! ergonomic propagation via the `?` operator in functions that return
//! `Result<T, CalcError>`.
use lalrex::{GrammarError, ParseError};
use smartstring::alias::String;
use thiserror::Error;

/// Represents all possible errors that can occur within the calculator.
///
/// # Examples
/// Propagating a literal that does not fit:
/// ```rust
/// # use lalrex_calc::CalcError;
/// # fn demo(s: &str) -> Result<i64, CalcError> {
/// let n: i64 = s.parse()?; // ParseIntError -> CalcError via #[from]
/// # Ok(n) }
/// ```
#[derive(Debug, Error)]
pub enum CalcError {
    /// An integer literal could not be parsed from its string representation.
    #[error("unable to parse {0:?}")]
    ParseInt(#[from] std::num::ParseIntError),

    /// The engine rejected the input.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The compiled tables failed validation.
    #[error("grammar error: {0}")]
    Grammar(#[from] GrammarError),

    #[error("division by zero at line {line}")]
    DivisionByZero { line: usize },

    #[error("integer overflow at line {line}")]
    Overflow { line: usize },

    /// The tree holds an `error` node left behind by error recovery, so it
    /// has no value.
    #[error("syntax error recovered at line {line}")]
    Recovered { line: usize },

    /// A node the evaluator does not know how to fold.
    #[error("unexpected node <{name}> at line {line}")]
    UnexpectedNode { name: String, line: usize },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
