//! Hand-compiled grammar tables used by the unit tests.
//!
//! The main fixture is a tiny sum language with comments and an `error`
//! terminal:
//!
//! ```text
//! R0  <Expr> ::= <Expr> '+' <Term>
//! R1  <Expr> ::= <Term>
//! R2  <Term> ::= Num
//! R3  <Term> ::= error
//! ```

use crate::{
    CharSet, DfaEdge, DfaState, DfaStateID, Grammar, GrammarTables, LalrAction, LalrState,
    LalrStateID, ParserAction, Rule, RuleID, Symbol, SymbolID, SymbolKind,
};

pub mod sym {
    pub const EOF: u16 = 0;
    pub const LEX_ERROR: u16 = 1;
    pub const WHITESPACE: u16 = 2;
    pub const COMMENT_END: u16 = 3;
    pub const COMMENT_LINE: u16 = 4;
    pub const COMMENT_START: u16 = 5;
    pub const PLUS: u16 = 6;
    pub const ERROR_TERM: u16 = 7;
    pub const NUM: u16 = 8;
    pub const EXPR: u16 = 9;
    pub const TERM: u16 = 10;
}

pub fn shift(symbol: u16, state: u16) -> LalrAction {
    LalrAction::new(symbol, ParserAction::Shift(LalrStateID(state)))
}

pub fn goto(symbol: u16, state: u16) -> LalrAction {
    LalrAction::new(symbol, ParserAction::Goto(LalrStateID(state)))
}

pub fn reduce(symbol: u16, rule: u16) -> LalrAction {
    LalrAction::new(symbol, ParserAction::Reduce(RuleID(rule)))
}

pub fn accept(symbol: u16) -> LalrAction {
    LalrAction::new(symbol, ParserAction::Accept)
}

pub fn expr_tables() -> GrammarTables {
    use SymbolKind::*;
    use sym::*;

    let symbols = vec![
        Symbol::new(EOF, End, "EOF"),
        Symbol::new(LEX_ERROR, Error, "Error"),
        Symbol::new(WHITESPACE, Whitespace, "Whitespace"),
        Symbol::new(COMMENT_END, CommentEnd, "Comment End"),
        Symbol::new(COMMENT_LINE, CommentLine, "Comment Line"),
        Symbol::new(COMMENT_START, CommentStart, "Comment Start"),
        Symbol::new(PLUS, Terminal, "+"),
        Symbol::new(ERROR_TERM, Terminal, "error"),
        Symbol::new(NUM, Terminal, "Num"),
        Symbol::new(EXPR, Nonterminal, "Expr"),
        Symbol::new(TERM, Nonterminal, "Term"),
    ];

    let char_sets = vec![
        CharSet::from_range(0, b'0'..=b'9'),
        CharSet::new(1, b" \t\r\n"),
        CharSet::new(2, b"+"),
        CharSet::new(3, b"/"),
        CharSet::new(4, b"*"),
    ];

    let dfa_states = vec![
        DfaState::new(
            0,
            None,
            vec![
                DfaEdge::new(0, 1),
                DfaEdge::new(1, 2),
                DfaEdge::new(2, 3),
                DfaEdge::new(3, 4),
                DfaEdge::new(4, 5),
            ],
        ),
        DfaState::new(1, Some(NUM), vec![DfaEdge::new(0, 1)]),
        DfaState::new(2, Some(WHITESPACE), vec![DfaEdge::new(1, 2)]),
        DfaState::new(3, Some(PLUS), vec![]),
        // "/" is not a token by itself
        DfaState::new(4, None, vec![DfaEdge::new(4, 6), DfaEdge::new(3, 7)]),
        DfaState::new(5, None, vec![DfaEdge::new(3, 8)]),
        DfaState::new(6, Some(COMMENT_START), vec![]),
        DfaState::new(7, Some(COMMENT_LINE), vec![]),
        DfaState::new(8, Some(COMMENT_END), vec![]),
    ];

    let rules = vec![
        Rule::new(0, EXPR, &[EXPR, PLUS, TERM]),
        Rule::new(1, EXPR, &[TERM]),
        Rule::new(2, TERM, &[NUM]),
        Rule::new(3, TERM, &[ERROR_TERM]),
    ];

    let lalr_states = vec![
        LalrState::new(
            0,
            vec![shift(NUM, 3), shift(ERROR_TERM, 4), goto(EXPR, 1), goto(TERM, 2)],
        ),
        LalrState::new(1, vec![accept(EOF), shift(PLUS, 5)]),
        LalrState::new(2, vec![reduce(EOF, 1), reduce(PLUS, 1)]),
        LalrState::new(3, vec![reduce(EOF, 2), reduce(PLUS, 2)]),
        LalrState::new(4, vec![reduce(EOF, 3), reduce(PLUS, 3)]),
        LalrState::new(5, vec![shift(NUM, 3), shift(ERROR_TERM, 4), goto(TERM, 6)]),
        LalrState::new(6, vec![reduce(EOF, 0), reduce(PLUS, 0)]),
    ];

    GrammarTables {
        symbols,
        char_sets,
        dfa_states,
        lalr_states,
        rules,
        start_symbol: SymbolID(EXPR),
        dfa_initial: DfaStateID(0),
        lalr_initial: LalrStateID(0),
    }
}

pub fn expr_grammar() -> Grammar {
    Grammar::try_new(expr_tables()).unwrap()
}

/// Scanner-only tables: `.` is `Dot`, `...` is `Ellipsis`, `..` is nothing.
pub fn dots_grammar() -> Grammar {
    let tables = GrammarTables {
        symbols: vec![
            Symbol::new(0, SymbolKind::End, "EOF"),
            Symbol::new(1, SymbolKind::Terminal, "Dot"),
            Symbol::new(2, SymbolKind::Terminal, "Ellipsis"),
            Symbol::new(3, SymbolKind::Nonterminal, "Start"),
        ],
        char_sets: vec![CharSet::new(0, b".")],
        dfa_states: vec![
            DfaState::new(0, None, vec![DfaEdge::new(0, 1)]),
            DfaState::new(1, Some(1), vec![DfaEdge::new(0, 2)]),
            DfaState::new(2, None, vec![DfaEdge::new(0, 3)]),
            DfaState::new(3, Some(2), vec![]),
        ],
        lalr_states: vec![LalrState::new(0, vec![])],
        rules: vec![],
        start_symbol: SymbolID(3),
        dfa_initial: DfaStateID(0),
        lalr_initial: LalrStateID(0),
    };
    Grammar::try_new(tables).unwrap()
}

/// Scanner-only tables whose accepting state loops on byte 0.
pub fn nul_loop_grammar() -> Grammar {
    let tables = GrammarTables {
        symbols: vec![
            Symbol::new(0, SymbolKind::End, "EOF"),
            Symbol::new(1, SymbolKind::Terminal, "A"),
            Symbol::new(2, SymbolKind::Nonterminal, "Start"),
        ],
        char_sets: vec![CharSet::new(0, b"a"), CharSet::new(1, [0u8])],
        dfa_states: vec![
            DfaState::new(0, None, vec![DfaEdge::new(0, 1)]),
            DfaState::new(1, Some(1), vec![DfaEdge::new(1, 1)]),
        ],
        lalr_states: vec![LalrState::new(0, vec![])],
        rules: vec![],
        start_symbol: SymbolID(2),
        dfa_initial: DfaStateID(0),
        lalr_initial: LalrStateID(0),
    };
    Grammar::try_new(tables).unwrap()
}

/// Left-recursive list with an empty base case; `error` is declared but no
/// state accepts it.
///
/// ```text
/// R0  <List> ::= <List> Num
/// R1  <List> ::=
/// ```
pub fn list_grammar() -> Grammar {
    const EOF: u16 = 0;
    const WS: u16 = 2;
    const NUM: u16 = 3;
    const LIST: u16 = 5;

    let tables = GrammarTables {
        symbols: vec![
            Symbol::new(EOF, SymbolKind::End, "EOF"),
            Symbol::new(1, SymbolKind::Error, "Error"),
            Symbol::new(WS, SymbolKind::Whitespace, "Whitespace"),
            Symbol::new(NUM, SymbolKind::Terminal, "Num"),
            Symbol::new(4, SymbolKind::Terminal, "error"),
            Symbol::new(LIST, SymbolKind::Nonterminal, "List"),
        ],
        char_sets: vec![
            CharSet::from_range(0, b'0'..=b'9'),
            CharSet::new(1, b" \t\r\n"),
        ],
        dfa_states: vec![
            DfaState::new(0, None, vec![DfaEdge::new(0, 1), DfaEdge::new(1, 2)]),
            DfaState::new(1, Some(NUM), vec![DfaEdge::new(0, 1)]),
            DfaState::new(2, Some(WS), vec![DfaEdge::new(1, 2)]),
        ],
        lalr_states: vec![
            LalrState::new(0, vec![reduce(NUM, 1), reduce(EOF, 1), goto(LIST, 1)]),
            LalrState::new(1, vec![shift(NUM, 2), accept(EOF)]),
            LalrState::new(2, vec![reduce(NUM, 0), reduce(EOF, 0)]),
        ],
        rules: vec![Rule::new(0, LIST, &[LIST, NUM]), Rule::new(1, LIST, &[])],
        start_symbol: SymbolID(LIST),
        dfa_initial: DfaStateID(0),
        lalr_initial: LalrStateID(0),
    };
    Grammar::try_new(tables).unwrap()
}

/// An empty production reduced after a shifted token.
///
/// ```text
/// R0  <S>   ::= Num <Opt>
/// R1  <Opt> ::= '+'
/// R2  <Opt> ::=
/// ```
pub fn opt_grammar() -> Grammar {
    const EOF: u16 = 0;
    const WS: u16 = 2;
    const PLUS: u16 = 3;
    const NUM: u16 = 4;
    const OPT: u16 = 5;
    const S: u16 = 6;

    let tables = GrammarTables {
        symbols: vec![
            Symbol::new(EOF, SymbolKind::End, "EOF"),
            Symbol::new(1, SymbolKind::Error, "Error"),
            Symbol::new(WS, SymbolKind::Whitespace, "Whitespace"),
            Symbol::new(PLUS, SymbolKind::Terminal, "+"),
            Symbol::new(NUM, SymbolKind::Terminal, "Num"),
            Symbol::new(OPT, SymbolKind::Nonterminal, "Opt"),
            Symbol::new(S, SymbolKind::Nonterminal, "S"),
        ],
        char_sets: vec![
            CharSet::from_range(0, b'0'..=b'9'),
            CharSet::new(1, b"+"),
            CharSet::new(2, b" \t\r\n"),
        ],
        dfa_states: vec![
            DfaState::new(
                0,
                None,
                vec![DfaEdge::new(0, 1), DfaEdge::new(1, 2), DfaEdge::new(2, 3)],
            ),
            DfaState::new(1, Some(NUM), vec![DfaEdge::new(0, 1)]),
            DfaState::new(2, Some(PLUS), vec![]),
            DfaState::new(3, Some(WS), vec![DfaEdge::new(2, 3)]),
        ],
        lalr_states: vec![
            LalrState::new(0, vec![shift(NUM, 2), goto(S, 1)]),
            LalrState::new(1, vec![accept(EOF)]),
            LalrState::new(2, vec![shift(PLUS, 3), reduce(EOF, 2), goto(OPT, 4)]),
            LalrState::new(3, vec![reduce(EOF, 1)]),
            LalrState::new(4, vec![reduce(EOF, 0)]),
        ],
        rules: vec![
            Rule::new(0, S, &[NUM, OPT]),
            Rule::new(1, OPT, &[PLUS]),
            Rule::new(2, OPT, &[]),
        ],
        start_symbol: SymbolID(S),
        dfa_initial: DfaStateID(0),
        lalr_initial: LalrStateID(0),
    };
    Grammar::try_new(tables).unwrap()
}
