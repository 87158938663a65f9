//! # Compiled grammar tables
//!
//! This module defines [`Grammar`], the immutable description that drives both
//! automata of the engine:
//!
//! - the **symbol table** ([`Symbol`], [`SymbolKind`]),
//! - the **character-set table** ([`CharSet`]),
//! - the **DFA table** used by the scanner ([`DfaState`], [`DfaEdge`]),
//! - the **LALR table** used by the parser ([`LalrState`], [`LalrAction`],
//!   [`ParserAction`]),
//! - the **rule table** ([`Rule`]).
//!
//! Tables are produced by an external grammar compiler and handed over as a
//! plain [`GrammarTables`] value. [`Grammar::try_new`] validates every
//! cross-reference once, so lookups made while parsing never go out of range.
//! After construction nothing in a [`Grammar`] is ever written, which makes a
//! single instance safe to share by reference between concurrent parses.

use crate::GrammarError;
use smartstring::alias::String;
use std::fmt;

macro_rules! table_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u16);

        impl From<$name> for usize {
            #[inline]
            fn from(id: $name) -> Self {
                id.0 as usize
            }
        }

        impl From<u16> for $name {
            #[inline]
            fn from(id: u16) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

table_id!(
    /// Index into the symbol table.
    SymbolID
);
table_id!(
    /// Index into the character-set table.
    CharSetID
);
table_id!(
    /// Index into the DFA state table.
    DfaStateID
);
table_id!(
    /// Index into the LALR state table.
    LalrStateID
);
table_id!(
    /// Index into the rule table.
    RuleID
);

/// The role a symbol plays for the scanner and the parser driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Produced by reductions, never by the scanner.
    Nonterminal,
    /// An ordinary token fed to the automaton.
    Terminal,
    /// Discarded by the driver.
    Whitespace,
    /// End of the input stream.
    End,
    /// Opens a block comment region.
    CommentStart,
    /// Closes a block comment region.
    CommentEnd,
    /// Comments out the remainder of the line.
    CommentLine,
    /// Lexical error pseudo-symbol.
    Error,
}

/// An entry of the symbol table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub id: SymbolID,
    pub kind: SymbolKind,
    pub name: String,
}

impl Symbol {
    pub fn new(id: u16, kind: SymbolKind, name: &str) -> Self {
        Self {
            id: SymbolID(id),
            kind,
            name: name.into(),
        }
    }
}

/// A named set of raw byte values.
///
/// Membership is kept as a 256-bit set, so [`CharSet::contains`] is a constant
/// time bit test regardless of how many bytes the set holds.
#[derive(Clone, PartialEq, Eq)]
pub struct CharSet {
    pub id: CharSetID,
    bits: [u64; 4],
}

impl CharSet {
    pub fn new(id: u16, members: impl AsRef<[u8]>) -> Self {
        let mut bits = [0u64; 4];
        for &b in members.as_ref() {
            bits[(b >> 6) as usize] |= 1u64 << (b & 63);
        }
        Self {
            id: CharSetID(id),
            bits,
        }
    }

    /// Builds a set from an inclusive byte range, e.g. `b'0'..=b'9'`.
    pub fn from_range(id: u16, range: std::ops::RangeInclusive<u8>) -> Self {
        let members: Vec<u8> = range.collect();
        Self::new(id, members)
    }

    #[inline]
    pub fn contains(&self, b: u8) -> bool {
        self.bits[(b >> 6) as usize] & (1u64 << (b & 63)) != 0
    }

    /// Member bytes in ascending order.
    pub fn members(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(|&b| self.contains(b))
    }

    pub fn len(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }
}

impl fmt::Debug for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members: Vec<u8> = self.members().collect();
        f.debug_struct("CharSet")
            .field("id", &self.id)
            .field("members", &std::string::String::from_utf8_lossy(&members))
            .finish()
    }
}

/// A transition of the lexer automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DfaEdge {
    pub char_set: CharSetID,
    pub target: DfaStateID,
}

impl DfaEdge {
    pub fn new(char_set: u16, target: u16) -> Self {
        Self {
            char_set: CharSetID(char_set),
            target: DfaStateID(target),
        }
    }
}

/// A node of the lexer automaton.
///
/// `accept` is `Some(symbol)` for accepting states. Edges are tried in order;
/// the compiler is expected to emit non-overlapping character sets per state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfaState {
    pub id: DfaStateID,
    pub accept: Option<SymbolID>,
    pub edges: Vec<DfaEdge>,
}

impl DfaState {
    pub fn new(id: u16, accept: Option<u16>, edges: Vec<DfaEdge>) -> Self {
        Self {
            id: DfaStateID(id),
            accept: accept.map(SymbolID),
            edges,
        }
    }
}

/// What the parser does on a given input symbol in a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserAction {
    Shift(LalrStateID),
    Reduce(RuleID),
    Goto(LalrStateID),
    Accept,
    Error,
}

/// One keyed entry of an LALR state's action list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LalrAction {
    pub symbol: SymbolID,
    pub action: ParserAction,
}

impl LalrAction {
    pub fn new(symbol: u16, action: ParserAction) -> Self {
        Self {
            symbol: SymbolID(symbol),
            action,
        }
    }
}

/// A node of the parser automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LalrState {
    pub id: LalrStateID,
    pub actions: Vec<LalrAction>,
}

impl LalrState {
    pub fn new(id: u16, actions: Vec<LalrAction>) -> Self {
        Self {
            id: LalrStateID(id),
            actions,
        }
    }

    /// Returns the action keyed on `symbol`, if any.
    ///
    /// Action lists are short, so this is a linear scan. Explicit
    /// [`ParserAction::Error`] entries are treated as absent.
    #[inline]
    pub fn action_for(&self, symbol: SymbolID) -> Option<ParserAction> {
        self.actions
            .iter()
            .find(|a| a.symbol == symbol && a.action != ParserAction::Error)
            .map(|a| a.action)
    }
}

/// A grammar production `head -> symbols...`; `symbols` may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub id: RuleID,
    pub head: SymbolID,
    pub symbols: Vec<SymbolID>,
}

impl Rule {
    pub fn new(id: u16, head: u16, symbols: &[u16]) -> Self {
        Self {
            id: RuleID(id),
            head: SymbolID(head),
            symbols: symbols.iter().map(|&s| SymbolID(s)).collect(),
        }
    }

    /// Number of right-hand symbols (the handle length).
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Raw tables as delivered by a grammar loader, before validation.
#[derive(Debug, Clone, Default)]
pub struct GrammarTables {
    pub symbols: Vec<Symbol>,
    pub char_sets: Vec<CharSet>,
    pub dfa_states: Vec<DfaState>,
    pub lalr_states: Vec<LalrState>,
    pub rules: Vec<Rule>,
    pub start_symbol: SymbolID,
    pub dfa_initial: DfaStateID,
    pub lalr_initial: LalrStateID,
}

/// A validated, read-only grammar.
#[derive(Debug, Clone)]
pub struct Grammar {
    symbols: Vec<Symbol>,
    char_sets: Vec<CharSet>,
    dfa_states: Vec<DfaState>,
    lalr_states: Vec<LalrState>,
    rules: Vec<Rule>,
    start_symbol: SymbolID,
    dfa_initial: DfaStateID,
    lalr_initial: LalrStateID,
    end_symbol: SymbolID,
    lexical_error_symbol: Option<SymbolID>,
}

impl Grammar {
    /// Validates `tables` and freezes them into a [`Grammar`].
    pub fn try_new(tables: GrammarTables) -> Result<Self, GrammarError> {
        let GrammarTables {
            symbols,
            char_sets,
            dfa_states,
            lalr_states,
            rules,
            start_symbol,
            dfa_initial,
            lalr_initial,
        } = tables;

        let n_symbols = symbols.len();
        let n_char_sets = char_sets.len();
        let n_dfa = dfa_states.len();
        let n_lalr = lalr_states.len();
        let n_rules = rules.len();

        for (i, s) in symbols.iter().enumerate() {
            check_position("symbol", s.id.into(), i)?;
        }
        for (i, c) in char_sets.iter().enumerate() {
            check_position("char-set", c.id.into(), i)?;
        }
        for (i, d) in dfa_states.iter().enumerate() {
            check_position("DFA", d.id.into(), i)?;
            if let Some(sym) = d.accept {
                check_ref("DFA", "symbol", sym.into(), n_symbols)?;
            }
            for edge in &d.edges {
                check_ref("DFA", "char-set", edge.char_set.into(), n_char_sets)?;
                check_ref("DFA", "DFA state", edge.target.into(), n_dfa)?;
            }
        }
        for (i, l) in lalr_states.iter().enumerate() {
            check_position("LALR", l.id.into(), i)?;
            for a in &l.actions {
                check_ref("LALR", "symbol", a.symbol.into(), n_symbols)?;
                match a.action {
                    ParserAction::Shift(s) | ParserAction::Goto(s) => {
                        check_ref("LALR", "LALR state", s.into(), n_lalr)?
                    }
                    ParserAction::Reduce(r) => check_ref("LALR", "rule", r.into(), n_rules)?,
                    ParserAction::Accept | ParserAction::Error => {}
                }
            }
        }
        for (i, r) in rules.iter().enumerate() {
            check_position("rule", r.id.into(), i)?;
            check_ref("rule", "symbol", r.head.into(), n_symbols)?;
            for &s in &r.symbols {
                check_ref("rule", "symbol", s.into(), n_symbols)?;
            }
        }
        check_ref("grammar", "symbol", start_symbol.into(), n_symbols)?;
        check_ref("grammar", "DFA state", dfa_initial.into(), n_dfa)?;
        check_ref("grammar", "LALR state", lalr_initial.into(), n_lalr)?;

        let end_symbol = symbols
            .iter()
            .find(|s| s.kind == SymbolKind::End)
            .map(|s| s.id)
            .ok_or(GrammarError::MissingEndSymbol)?;
        let lexical_error_symbol = symbols
            .iter()
            .find(|s| s.kind == SymbolKind::Error)
            .map(|s| s.id);

        log::debug!(
            "grammar: {} symbols, {} char sets, {} DFA states, {} LALR states, {} rules",
            n_symbols,
            n_char_sets,
            n_dfa,
            n_lalr,
            n_rules
        );

        Ok(Self {
            symbols,
            char_sets,
            dfa_states,
            lalr_states,
            rules,
            start_symbol,
            dfa_initial,
            lalr_initial,
            end_symbol,
            lexical_error_symbol,
        })
    }

    #[inline]
    pub fn symbol(&self, id: SymbolID) -> &Symbol {
        &self.symbols[usize::from(id)]
    }

    #[inline]
    pub fn char_set(&self, id: CharSetID) -> &CharSet {
        &self.char_sets[usize::from(id)]
    }

    #[inline]
    pub fn dfa_state(&self, id: DfaStateID) -> &DfaState {
        &self.dfa_states[usize::from(id)]
    }

    #[inline]
    pub fn lalr_state(&self, id: LalrStateID) -> &LalrState {
        &self.lalr_states[usize::from(id)]
    }

    #[inline]
    pub fn rule(&self, id: RuleID) -> &Rule {
        &self.rules[usize::from(id)]
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn start_symbol(&self) -> SymbolID {
        self.start_symbol
    }

    pub fn dfa_initial(&self) -> DfaStateID {
        self.dfa_initial
    }

    pub fn lalr_initial(&self) -> LalrStateID {
        self.lalr_initial
    }

    /// The symbol used for the synthetic end-of-stream token.
    pub fn end_symbol(&self) -> SymbolID {
        self.end_symbol
    }

    /// The symbol of kind [`SymbolKind::Error`] used to tag lexical errors,
    /// or a synthetic one when the table has none.
    pub fn lexical_error_symbol(&self) -> Symbol {
        match self.lexical_error_symbol {
            Some(id) => self.symbol(id).clone(),
            None => Symbol::new(u16::MAX, SymbolKind::Error, "Error"),
        }
    }

    /// Looks up a terminal symbol by name.
    pub fn find_terminal(&self, name: &str) -> Option<&Symbol> {
        self.symbols
            .iter()
            .find(|s| s.kind == SymbolKind::Terminal && s.name.as_str() == name)
    }
}

fn check_position(table: &'static str, id: usize, index: usize) -> Result<(), GrammarError> {
    if id != index {
        return Err(GrammarError::Misnumbered { table, id, index });
    }
    Ok(())
}

fn check_ref(
    table: &'static str,
    what: &'static str,
    id: usize,
    len: usize,
) -> Result<(), GrammarError> {
    if id >= len {
        return Err(GrammarError::Dangling {
            table,
            what,
            id,
            len,
        });
    }
    Ok(())
}
