//! Copyright (c) 2025 lalrex contributors.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! Table-driven DFA lexer and LALR(1) parser engine.
//!
//! The engine runs grammars that were compiled elsewhere: a [`Grammar`] is
//! built once from plain [`GrammarTables`] (symbols, character sets, DFA
//! states, LALR states, rules), validated, and then shared read-only by any
//! number of [`Parser`]s. A parse scans bytes with longest-match semantics,
//! drops whitespace and comments, drives the LALR automaton and returns an
//! owned [`SyntaxNode`] tree or a [`ParseError`].
//!
//! Key components:
//! - `grammar`: table types and the validated [`Grammar`]
//! - `source`: the [`LexSource`] contract and the in-memory [`ByteSource`]
//! - `scanner`: longest-match [`Scanner`] producing [`Token`]s
//! - `stack`: the state-tagged [`ParserStack`]
//! - `parser`: the LALR driver with unit-rule trimming and panic-mode recovery
//! - `syntax`: the [`SyntaxNode`] tree
//!
//! # Example
//!
//! ```rust
//! use lalrex::{
//!     CharSet, DfaEdge, DfaState, DfaStateID, Grammar, GrammarTables, LalrAction, LalrState,
//!     LalrStateID, Parser, ParserAction, Rule, RuleID, Symbol, SymbolID, SymbolKind,
//! };
//!
//! // <Word> ::= Letters
//! let tables = GrammarTables {
//!     symbols: vec![
//!         Symbol::new(0, SymbolKind::End, "EOF"),
//!         Symbol::new(1, SymbolKind::Terminal, "Letters"),
//!         Symbol::new(2, SymbolKind::Nonterminal, "Word"),
//!     ],
//!     char_sets: vec![CharSet::from_range(0, b'a'..=b'z')],
//!     dfa_states: vec![
//!         DfaState::new(0, None, vec![DfaEdge::new(0, 1)]),
//!         DfaState::new(1, Some(1), vec![DfaEdge::new(0, 1)]),
//!     ],
//!     lalr_states: vec![
//!         LalrState::new(0, vec![
//!             LalrAction::new(1, ParserAction::Shift(LalrStateID(2))),
//!             LalrAction::new(2, ParserAction::Goto(LalrStateID(1))),
//!         ]),
//!         LalrState::new(1, vec![LalrAction::new(0, ParserAction::Accept)]),
//!         LalrState::new(2, vec![LalrAction::new(0, ParserAction::Reduce(RuleID(0)))]),
//!     ],
//!     rules: vec![Rule::new(0, 2, &[1])],
//!     start_symbol: SymbolID(2),
//!     dfa_initial: DfaStateID(0),
//!     lalr_initial: LalrStateID(0),
//! };
//!
//! let grammar = Grammar::try_new(tables).unwrap();
//! let tree = Parser::new(&grammar).parse_bytes(b"hello").unwrap();
//! assert_eq!(tree.name.as_str(), "Word");
//! assert_eq!(tree.leaves().collect::<Vec<_>>(), vec!["hello"]);
//! ```

mod error;
mod grammar;
mod parser;
mod scanner;
mod source;
mod stack;
mod syntax;

#[cfg(test)]
mod test_grammar;

pub use crate::error::{GrammarError, ParseError, SourceError};
pub use crate::grammar::{
    CharSet, CharSetID, DfaEdge, DfaState, DfaStateID, Grammar, GrammarTables, LalrAction,
    LalrState, LalrStateID, ParserAction, Rule, RuleID, Symbol, SymbolID, SymbolKind,
};
pub use crate::parser::{Parser, ParserStats, Signal};
pub use crate::scanner::{Scanner, ScannerStats, Token};
pub use crate::source::{ByteSource, LexSource};
pub use crate::stack::ParserStack;
pub use crate::syntax::{Preorder, SyntaxNode, TreeDisplay};
