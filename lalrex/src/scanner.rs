//! DFA-driven lexical scanner.
//!
//! [`Scanner::retrieve_token`] walks the grammar's DFA from its initial state
//! over the bytes at the source cursor and returns one [`Token`]. The walk
//! keeps going past accepting states and remembers the last one it saw, so the
//! token produced is always the longest accepted prefix; once the DFA has no
//! edge for the next byte, the source is rewound to the token start and
//! advanced over exactly the emitted length.

use crate::{
    Grammar, LalrStateID, LexSource, ParseError, Symbol, SymbolID, SymbolKind, SyntaxNode,
};
use smartstring::alias::String;

/// One lexed unit, as consumed by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub symbol: Symbol,
    pub line: usize,
    pub text: String,
    /// The LALR state the token was pushed from; set when it enters the stack.
    pub state: LalrStateID,
    pub node: Option<SyntaxNode>,
}

impl Token {
    pub fn new(symbol: Symbol, line: usize, text: &str) -> Self {
        Self {
            symbol,
            line,
            text: text.into(),
            state: LalrStateID::default(),
            node: None,
        }
    }

    #[inline]
    pub fn kind(&self) -> SymbolKind {
        self.symbol.kind
    }

    #[inline]
    pub fn id(&self) -> SymbolID {
        self.symbol.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScannerStats {
    pub tokens: usize,
    pub chars: usize,
    pub unreads: usize,
}

/// Longest-match scanner over a [`Grammar`]'s DFA.
pub struct Scanner<'g> {
    grammar: &'g Grammar,
    error_symbol: Option<SymbolID>,
    stats: ScannerStats,
}

impl<'g> Scanner<'g> {
    /// `error_symbol` is the error terminal used to tag unrecognized input
    /// when recovery is enabled; with `None` such input yields a one-byte
    /// lexical-error token.
    pub fn new(grammar: &'g Grammar, error_symbol: Option<SymbolID>) -> Self {
        Self {
            grammar,
            error_symbol,
            stats: ScannerStats::default(),
        }
    }

    pub fn stats(&self) -> ScannerStats {
        self.stats.clone()
    }

    /// Scans the next token at the source cursor.
    pub fn retrieve_token<S>(&mut self, source: &mut S) -> Result<Token, ParseError>
    where
        S: LexSource + ?Sized,
    {
        let grammar = self.grammar;
        if source.is_at_end() {
            let end = grammar.symbol(grammar.end_symbol());
            return Ok(Token::new(
                Symbol::new(end.id.0, SymbolKind::End, "EOF"),
                source.line(),
                "EOF",
            ));
        }

        let start = source.cursor();
        let mut state = grammar.dfa_state(grammar.dfa_initial());
        let mut accept: Option<(SymbolID, usize)> = None;
        let mut exhausted = false;

        loop {
            if let Some(sym) = state.accept {
                accept = Some((sym, source.cursor() - start));
            }
            let lookahead = match source.read_byte() {
                Some(b) => b,
                None if exhausted => break,
                None => {
                    exhausted = true;
                    0
                }
            };
            match state
                .edges
                .iter()
                .find(|edge| grammar.char_set(edge.char_set).contains(lookahead))
            {
                Some(edge) => {
                    log::trace!(
                        "DFA: {} --{:?}--> {}",
                        state.id,
                        lookahead as char,
                        edge.target
                    );
                    state = grammar.dfa_state(edge.target);
                }
                None => break,
            }
        }

        let walked = source.cursor() - start;
        let (symbol, len) = match (accept, self.error_symbol) {
            (Some((sym, len)), _) => (grammar.symbol(sym).clone(), len),
            (None, Some(error)) => {
                let mut symbol = grammar.symbol(error).clone();
                symbol.kind = SymbolKind::Terminal;
                (symbol, walked)
            }
            (None, None) => (grammar.lexical_error_symbol(), 1),
        };

        self.stats.chars += walked;
        self.stats.unreads += walked - len;
        self.stats.tokens += 1;

        source.seek(start)?;
        let line = source.line();
        let bytes = source.read_bytes(len)?;
        let text = std::string::String::from_utf8_lossy(&bytes);

        if log::log_enabled!(log::Level::Trace) {
            let shown = match std::str::from_utf8(&bytes) {
                Ok(s) => s.to_owned(),
                Err(_) => hex::encode(&bytes),
            };
            log::trace!(
                "TOKEN: {:?} line={} len={} text={:?}",
                symbol.name,
                line,
                len,
                shown
            );
        }

        Ok(Token::new(symbol, line, &text))
    }
}
