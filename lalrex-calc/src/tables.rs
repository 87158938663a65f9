//! # Calculator grammar tables
//!
//! Compiled tables for a four-operation integer calculator with parentheses,
//! prefix minus, block and line comments, and an `error` terminal for
//! recovery. The grammar they were compiled from:
//!
//! ```text
//! "Start Symbol" = <Expr>
//! Num            = {Digit}+
//! Comment Start  = '/*'
//! Comment End    = '*/'
//! Comment Line   = '//'
//!
//! <Expr>   ::= <Expr> '+' <Term>        ! R0
//!            | <Expr> '-' <Term>        ! R1
//!            | <Term>                   ! R2
//! <Term>   ::= <Term> '*' <Factor>      ! R3
//!            | <Term> '/' <Factor>      ! R4
//!            | <Factor>                 ! R5
//! <Factor> ::= Num                      ! R6
//!            | '(' <Expr> ')'           ! R7
//!            | '-' <Factor>             ! R8
//!            | error                    ! R9
//! ```
//!
//! The tables are written out as data, in the layout a grammar compiler
//! emits, and validated by [`Grammar::try_new`] on load.

use lalrex::{
    CharSet, DfaEdge, DfaState, DfaStateID, Grammar, GrammarError, GrammarTables, LalrAction,
    LalrState, LalrStateID, ParserAction, Rule, RuleID, Symbol, SymbolID, SymbolKind,
};

/// Name of the terminal used for error recovery.
pub const ERROR_TERMINAL: &str = "error";

/// Symbol-table indices.
pub mod sym {
    pub const EOF: u16 = 0;
    pub const LEX_ERROR: u16 = 1;
    pub const WHITESPACE: u16 = 2;
    pub const COMMENT_END: u16 = 3;
    pub const COMMENT_LINE: u16 = 4;
    pub const COMMENT_START: u16 = 5;
    pub const MINUS: u16 = 6;
    pub const LPAREN: u16 = 7;
    pub const RPAREN: u16 = 8;
    pub const TIMES: u16 = 9;
    pub const DIVIDE: u16 = 10;
    pub const PLUS: u16 = 11;
    pub const ERROR: u16 = 12;
    pub const NUM: u16 = 13;
    pub const EXPR: u16 = 14;
    pub const FACTOR: u16 = 15;
    pub const TERM: u16 = 16;
}

/// Rule-table indices; an internal syntax node's `id` is one of these.
pub mod rule {
    pub const ADD: usize = 0;
    pub const SUB: usize = 1;
    pub const EXPR_TERM: usize = 2;
    pub const MUL: usize = 3;
    pub const DIV: usize = 4;
    pub const TERM_FACTOR: usize = 5;
    pub const NUM: usize = 6;
    pub const PAREN: usize = 7;
    pub const NEG: usize = 8;
    pub const ERROR: usize = 9;
}

use sym::*;

fn shift(symbol: u16, state: u16) -> LalrAction {
    LalrAction::new(symbol, ParserAction::Shift(LalrStateID(state)))
}

fn goto(symbol: u16, state: u16) -> LalrAction {
    LalrAction::new(symbol, ParserAction::Goto(LalrStateID(state)))
}

/// One reduce entry per lookahead.
fn reduce_on(lookaheads: &[u16], rule: u16) -> Vec<LalrAction> {
    lookaheads
        .iter()
        .map(|&symbol| LalrAction::new(symbol, ParserAction::Reduce(RuleID(rule))))
        .collect()
}

const FOLLOW_EXPR: &[u16] = &[EOF, PLUS, MINUS, RPAREN];
const FOLLOW_TERM: &[u16] = &[EOF, PLUS, MINUS, RPAREN, TIMES, DIVIDE];

/// Shifts shared by every state that expects a `<Factor>`.
fn factor_shifts() -> Vec<LalrAction> {
    vec![shift(NUM, 4), shift(LPAREN, 5), shift(MINUS, 6), shift(ERROR, 7)]
}

fn with(mut actions: Vec<LalrAction>, more: Vec<LalrAction>) -> Vec<LalrAction> {
    actions.extend(more);
    actions
}

fn symbols() -> Vec<Symbol> {
    use SymbolKind::*;
    vec![
        Symbol::new(EOF, End, "EOF"),
        Symbol::new(LEX_ERROR, Error, "Error"),
        Symbol::new(WHITESPACE, Whitespace, "Whitespace"),
        Symbol::new(COMMENT_END, CommentEnd, "Comment End"),
        Symbol::new(COMMENT_LINE, CommentLine, "Comment Line"),
        Symbol::new(COMMENT_START, CommentStart, "Comment Start"),
        Symbol::new(MINUS, Terminal, "-"),
        Symbol::new(LPAREN, Terminal, "("),
        Symbol::new(RPAREN, Terminal, ")"),
        Symbol::new(TIMES, Terminal, "*"),
        Symbol::new(DIVIDE, Terminal, "/"),
        Symbol::new(PLUS, Terminal, "+"),
        Symbol::new(ERROR, Terminal, ERROR_TERMINAL),
        Symbol::new(NUM, Terminal, "Num"),
        Symbol::new(EXPR, Nonterminal, "Expr"),
        Symbol::new(FACTOR, Nonterminal, "Factor"),
        Symbol::new(TERM, Nonterminal, "Term"),
    ]
}

fn char_sets() -> Vec<CharSet> {
    vec![
        CharSet::from_range(0, b'0'..=b'9'),
        CharSet::new(1, b" \t\r\n"),
        CharSet::new(2, b"+"),
        CharSet::new(3, b"-"),
        CharSet::new(4, b"*"),
        CharSet::new(5, b"/"),
        CharSet::new(6, b"("),
        CharSet::new(7, b")"),
    ]
}

fn dfa_states() -> Vec<DfaState> {
    vec![
        DfaState::new(
            0,
            None,
            vec![
                DfaEdge::new(0, 1),
                DfaEdge::new(1, 2),
                DfaEdge::new(2, 3),
                DfaEdge::new(3, 4),
                DfaEdge::new(4, 5),
                DfaEdge::new(5, 6),
                DfaEdge::new(6, 7),
                DfaEdge::new(7, 8),
            ],
        ),
        DfaState::new(1, Some(NUM), vec![DfaEdge::new(0, 1)]),
        DfaState::new(2, Some(WHITESPACE), vec![DfaEdge::new(1, 2)]),
        DfaState::new(3, Some(PLUS), vec![]),
        DfaState::new(4, Some(MINUS), vec![]),
        DfaState::new(5, Some(TIMES), vec![DfaEdge::new(5, 9)]),
        DfaState::new(6, Some(DIVIDE), vec![DfaEdge::new(4, 10), DfaEdge::new(5, 11)]),
        DfaState::new(7, Some(LPAREN), vec![]),
        DfaState::new(8, Some(RPAREN), vec![]),
        DfaState::new(9, Some(COMMENT_END), vec![]),
        DfaState::new(10, Some(COMMENT_START), vec![]),
        DfaState::new(11, Some(COMMENT_LINE), vec![]),
    ]
}

fn rules() -> Vec<Rule> {
    vec![
        Rule::new(0, EXPR, &[EXPR, PLUS, TERM]),
        Rule::new(1, EXPR, &[EXPR, MINUS, TERM]),
        Rule::new(2, EXPR, &[TERM]),
        Rule::new(3, TERM, &[TERM, TIMES, FACTOR]),
        Rule::new(4, TERM, &[TERM, DIVIDE, FACTOR]),
        Rule::new(5, TERM, &[FACTOR]),
        Rule::new(6, FACTOR, &[NUM]),
        Rule::new(7, FACTOR, &[LPAREN, EXPR, RPAREN]),
        Rule::new(8, FACTOR, &[MINUS, FACTOR]),
        Rule::new(9, FACTOR, &[ERROR]),
    ]
}

fn lalr_states() -> Vec<LalrState> {
    let mul_div = || vec![shift(TIMES, 10), shift(DIVIDE, 11)];
    vec![
        LalrState::new(
            0,
            with(factor_shifts(), vec![goto(EXPR, 1), goto(TERM, 2), goto(FACTOR, 3)]),
        ),
        LalrState::new(
            1,
            vec![LalrAction::new(EOF, ParserAction::Accept), shift(PLUS, 8), shift(MINUS, 9)],
        ),
        LalrState::new(2, with(mul_div(), reduce_on(FOLLOW_EXPR, 2))),
        LalrState::new(3, reduce_on(FOLLOW_TERM, 5)),
        LalrState::new(4, reduce_on(FOLLOW_TERM, 6)),
        LalrState::new(
            5,
            with(factor_shifts(), vec![goto(EXPR, 12), goto(TERM, 2), goto(FACTOR, 3)]),
        ),
        LalrState::new(6, with(factor_shifts(), vec![goto(FACTOR, 13)])),
        LalrState::new(7, reduce_on(FOLLOW_TERM, 9)),
        LalrState::new(8, with(factor_shifts(), vec![goto(TERM, 14), goto(FACTOR, 3)])),
        LalrState::new(9, with(factor_shifts(), vec![goto(TERM, 15), goto(FACTOR, 3)])),
        LalrState::new(10, with(factor_shifts(), vec![goto(FACTOR, 16)])),
        LalrState::new(11, with(factor_shifts(), vec![goto(FACTOR, 17)])),
        LalrState::new(12, vec![shift(RPAREN, 18), shift(PLUS, 8), shift(MINUS, 9)]),
        LalrState::new(13, reduce_on(FOLLOW_TERM, 8)),
        LalrState::new(14, with(mul_div(), reduce_on(FOLLOW_EXPR, 0))),
        LalrState::new(15, with(mul_div(), reduce_on(FOLLOW_EXPR, 1))),
        LalrState::new(16, reduce_on(FOLLOW_TERM, 3)),
        LalrState::new(17, reduce_on(FOLLOW_TERM, 4)),
        LalrState::new(18, reduce_on(FOLLOW_TERM, 7)),
    ]
}

/// The raw calculator tables, before validation.
pub fn calc_tables() -> GrammarTables {
    GrammarTables {
        symbols: symbols(),
        char_sets: char_sets(),
        dfa_states: dfa_states(),
        lalr_states: lalr_states(),
        rules: rules(),
        start_symbol: SymbolID(EXPR),
        dfa_initial: DfaStateID(0),
        lalr_initial: LalrStateID(0),
    }
}

/// Loads and validates the calculator grammar.
pub fn calc_grammar() -> Result<Grammar, GrammarError> {
    Grammar::try_new(calc_tables())
}
