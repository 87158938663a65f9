//! The parser's working stack.
//!
//! Each entry is a [`Token`] tagged with the LALR state it was pushed from
//! (`token.state`), so an entry is the `(state, token)` pair the automaton
//! needs to unwind: popping an entry exposes the state it left. The bottom
//! entry is the start sentinel pushed at the beginning of every parse.

use crate::{LalrStateID, Token};
use smartstring::alias::String;

#[derive(Debug, Default)]
pub struct ParserStack {
    entries: Vec<Token>,
}

impl ParserStack {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[inline]
    pub fn push(&mut self, state: LalrStateID, mut token: Token) {
        token.state = state;
        self.entries.push(token);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Token> {
        self.entries.pop()
    }

    /// Removes the top `n` entries and returns them bottom-to-top, i.e. in
    /// the left-to-right order of the rule's right-hand side.
    ///
    /// Returns `None`, leaving the stack untouched, when fewer than `n`
    /// entries sit above the start sentinel.
    pub fn pop_handle(&mut self, n: usize) -> Option<Vec<Token>> {
        if n >= self.entries.len() {
            return None;
        }
        let at = self.entries.len() - n;
        Some(self.entries.split_off(at))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn dump_state(&self, current: LalrStateID, incoming: &Token) {
        let mut output = String::new();
        for token in &self.entries {
            output.push_str(&format!("<{}> {}  ", token.state, token.symbol.name));
        }
        output.push_str(&format!("<{}>  <-  {}", current, incoming.symbol.name));
        log::trace!("{}", output);
    }
}
