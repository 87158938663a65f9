//! # lalrex-calc
//!
//! A small demonstration crate built on **lalrex**, providing a complete,
//! minimal example of running precompiled grammar tables through the engine
//! for a calculator language.
//!
//! ## Overview
//!
//! The `lalrex-calc` crate defines the following components:
//!
//! - [`tables`]: the compiled calculator grammar (symbols, character sets,
//!   DFA, LALR states, rules) written out as data.
//! - [`parser`]: [`CalcParser`], which loads the tables once and parses
//!   input into a [`lalrex::SyntaxNode`] tree, optionally trimmed and with
//!   error recovery.
//! - [`eval`]: [`evaluate`], which folds a tree into an `i64`.
//! - [`error`]: [`CalcError`], the crate-wide error type.
//!
//! ## Example
//!
//! ```rust
//! use lalrex_calc::{CalcParser, evaluate};
//!
//! let calc = CalcParser::try_new().unwrap();
//! let tree = calc.parse(b"1 + 2 * 3 /* seven */", true, false).unwrap();
//! assert_eq!(tree.name.as_str(), "Expr");
//! assert_eq!(evaluate(&tree).unwrap(), 7);
//! ```
pub mod error;
pub mod eval;
pub mod parser;
pub mod tables;

pub use error::CalcError;
pub use eval::evaluate;
pub use parser::CalcParser;
pub use tables::{ERROR_TERMINAL, calc_grammar};
