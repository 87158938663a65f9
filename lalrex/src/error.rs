//! Error types for grammar loading, byte sources, and parsing.
//!
//! - [`GrammarError`]: raised once, by [`Grammar::try_new`](crate::Grammar::try_new),
//!   when the compiled tables reference something that does not exist.
//! - [`SourceError`]: raised by a [`LexSource`](crate::LexSource) when asked to
//!   seek or read outside its bytes.
//! - [`ParseError`]: everything that can end a parse without a tree.
//!
//! A parse either hands back an owned syntax tree or one of these errors; no
//! partial tree ever escapes.

use smartstring::alias::String;
use thiserror::Error;

/// Table validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// A table entry references an id past the end of the table it indexes.
    #[error("{table} table references {what} {id}, but only {len} exist")]
    Dangling {
        table: &'static str,
        what: &'static str,
        id: usize,
        len: usize,
    },

    /// A table entry's id does not match its position in the table.
    #[error("{table} table entry at index {index} carries id {id}")]
    Misnumbered {
        table: &'static str,
        id: usize,
        index: usize,
    },

    #[error("symbol table has no end-of-stream symbol")]
    MissingEndSymbol,
}

/// Byte-source failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("seek to offset {offset} past end of source ({len} bytes)")]
    SeekOutOfRange { offset: usize, len: usize },

    #[error("requested {requested} bytes at offset {offset}, only {available} available")]
    Truncated {
        offset: usize,
        requested: usize,
        available: usize,
    },
}

/// Reasons a parse ends without a syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The scanner could not classify the input and recovery is disabled.
    #[error("lexical error at line {line}: unexpected {lexeme:?}")]
    Lexical { line: usize, lexeme: String },

    /// No parser action for the current token and recovery is disabled.
    #[error("syntax error at line {line}: unexpected {found}, expected one of {expected:?}")]
    Syntax {
        line: usize,
        found: String,
        expected: Vec<String>,
    },

    /// Recovery unwound the whole stack without finding a state that accepts
    /// the error terminal.
    #[error("unrecoverable syntax error at line {line}")]
    Unrecoverable { line: usize },

    #[error("end of input inside block comment (line {line})")]
    UnterminatedComment { line: usize },

    /// The tables drove the parser into a state they do not describe.
    #[error("malformed parse table: {0}")]
    MalformedTable(std::string::String),

    #[error("source error: {0}")]
    Source(#[from] SourceError),
}

impl ParseError {
    /// Source line the error was reported at, when it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Lexical { line, .. }
            | ParseError::Syntax { line, .. }
            | ParseError::Unrecoverable { line }
            | ParseError::UnterminatedComment { line } => Some(*line),
            ParseError::MalformedTable(_) | ParseError::Source(_) => None,
        }
    }
}
