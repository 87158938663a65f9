//! LALR(1) driver.
//!
//! [`Parser::parse`] pulls tokens from a [`Scanner`], filters whitespace and
//! comments, and feeds everything else to the automaton one step at a time.
//! Each step either consumes the token (shift), rewrites the stack without
//! consuming it (reduce), accepts, or fails. With an error terminal
//! configured, failures first go through panic-mode recovery.

use crate::{
    ByteSource, Grammar, LalrStateID, LexSource, ParseError, ParserAction, ParserStack, RuleID,
    Scanner, ScannerStats, SymbolID, SymbolKind, SyntaxNode, Token,
};

/// Outcome of feeding one token to the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// The token was pushed; fetch the next one.
    Shift,
    /// The stack was rewritten; offer the same token again.
    Reduce,
    /// A nonterminal was pushed by a goto transition.
    Goto,
    Accept,
    Error,
}

#[derive(Debug, Clone, Default)]
pub struct ParserStats {
    pub tokens: usize,
    pub shifts: usize,
    pub reductions: usize,
    pub trims: usize,
    pub recoveries: usize,
    /// Totals of the scanners run by this parser.
    pub scanner: ScannerStats,
}

/// Table-driven parser over a shared [`Grammar`].
///
/// A parser holds only per-parse state, so any number of them can run at
/// once against the same grammar. One parser may be reused for many inputs;
/// every call to [`parse`](Parser::parse) starts from a fresh stack.
pub struct Parser<'g> {
    grammar: &'g Grammar,
    error_symbol: Option<SymbolID>,
    state: LalrStateID,
    stack: ParserStack,
    stats: ParserStats,
}

impl<'g> Parser<'g> {
    /// A parser without error recovery.
    pub fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            error_symbol: None,
            state: grammar.lalr_initial(),
            stack: ParserStack::new(),
            stats: ParserStats::default(),
        }
    }

    /// A parser that recovers from syntax errors through the terminal named
    /// `name`. If the grammar has no such terminal, recovery stays disabled.
    pub fn with_error_terminal(grammar: &'g Grammar, name: &str) -> Self {
        let mut parser = Self::new(grammar);
        match grammar.find_terminal(name) {
            Some(symbol) => parser.error_symbol = Some(symbol.id),
            None => log::warn!("no terminal named {:?}; error recovery disabled", name),
        }
        parser
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    pub fn error_symbol(&self) -> Option<SymbolID> {
        self.error_symbol
    }

    pub fn stats(&self) -> ParserStats {
        self.stats.clone()
    }

    /// Parses an in-memory buffer without trimming.
    pub fn parse_bytes(&mut self, input: &[u8]) -> Result<SyntaxNode, ParseError> {
        let mut source = ByteSource::new(input);
        self.parse(&mut source, false)
    }

    /// Parses `source` to the end and returns the root of the syntax tree.
    ///
    /// With `trim` set, reductions of rules of the form `A -> B` where `B` is
    /// a nonterminal reuse `B`'s node instead of wrapping it.
    pub fn parse<S>(&mut self, source: &mut S, trim: bool) -> Result<SyntaxNode, ParseError>
    where
        S: LexSource + ?Sized,
    {
        self.begin();
        let mut scanner = Scanner::new(self.grammar, self.error_symbol);
        let result = self.run(&mut scanner, source, trim);
        self.stack.clear();

        let scanned = scanner.stats();
        let totals = &mut self.stats.scanner;
        totals.tokens += scanned.tokens;
        totals.chars += scanned.chars;
        totals.unreads += scanned.unreads;
        result
    }

    fn begin(&mut self) {
        let grammar = self.grammar;
        let initial = grammar.lalr_initial();
        let start = grammar.symbol(grammar.start_symbol()).clone();
        self.stack.clear();
        self.stack.push(initial, Token::new(start, 0, ""));
        self.state = initial;
    }

    fn run<S>(
        &mut self,
        scanner: &mut Scanner<'g>,
        source: &mut S,
        trim: bool,
    ) -> Result<SyntaxNode, ParseError>
    where
        S: LexSource + ?Sized,
    {
        let mut token = self.next_token(scanner, source)?;
        // block comments do not nest: any comment-end closes all of them
        let mut comment_level = 0usize;

        loop {
            if comment_level > 0 {
                match token.kind() {
                    SymbolKind::CommentEnd => comment_level = 0,
                    SymbolKind::CommentStart => comment_level += 1,
                    SymbolKind::End => {
                        return Err(ParseError::UnterminatedComment { line: token.line });
                    }
                    _ => {}
                }
                token = self.next_token(scanner, source)?;
                continue;
            }

            match token.kind() {
                SymbolKind::Whitespace => {}
                SymbolKind::CommentStart => comment_level += 1,
                SymbolKind::CommentLine => skip_line(source),
                SymbolKind::Error => {
                    return Err(ParseError::Lexical {
                        line: token.line,
                        lexeme: token.text.clone(),
                    });
                }
                SymbolKind::End
                | SymbolKind::Terminal
                | SymbolKind::Nonterminal
                | SymbolKind::CommentEnd => {
                    if log::log_enabled!(log::Level::Trace) {
                        self.stack.dump_state(self.state, &token);
                    }
                    match self.parse_token(&mut token, trim)? {
                        Signal::Reduce => continue,
                        Signal::Shift | Signal::Goto => {}
                        Signal::Accept => return Ok(self.accept()),
                        Signal::Error => return Err(self.syntax_error(&token)),
                    }
                }
            }
            token = self.next_token(scanner, source)?;
        }
    }

    fn next_token<S>(
        &mut self,
        scanner: &mut Scanner<'g>,
        source: &mut S,
    ) -> Result<Token, ParseError>
    where
        S: LexSource + ?Sized,
    {
        let token = scanner.retrieve_token(source)?;
        self.stats.tokens += 1;
        Ok(token)
    }

    /// Performs one automaton step for `token`.
    ///
    /// On [`Signal::Reduce`] the token has not been consumed and must be
    /// offered again; during recovery it may have been rewritten into the
    /// error terminal.
    fn parse_token(&mut self, token: &mut Token, trim: bool) -> Result<Signal, ParseError> {
        let Some(action) = self.grammar.lalr_state(self.state).action_for(token.id()) else {
            return self.recover(token);
        };

        match action {
            ParserAction::Shift(target) => {
                log::trace!("Shift {}", target);
                self.stack.push(self.state, leaf_entry(token));
                self.state = target;
                self.stats.shifts += 1;
                Ok(Signal::Shift)
            }
            ParserAction::Goto(target) => {
                log::trace!("Goto {}", target);
                self.stack.push(self.state, leaf_entry(token));
                self.state = target;
                Ok(Signal::Goto)
            }
            ParserAction::Reduce(rule) => {
                self.reduce(rule, token, trim)?;
                Ok(Signal::Reduce)
            }
            ParserAction::Accept => {
                log::trace!("Accept");
                Ok(Signal::Accept)
            }
            ParserAction::Error => unreachable!("action_for never yields error entries"),
        }
    }

    fn reduce(&mut self, rule_id: RuleID, lookahead: &Token, trim: bool) -> Result<(), ParseError> {
        let grammar = self.grammar;
        let rule = grammar.rule(rule_id);
        let head = grammar.symbol(rule.head);
        let trim = trim
            && rule.len() == 1
            && grammar.symbol(rule.symbols[0]).kind == SymbolKind::Nonterminal;
        log::trace!(
            "Reduce {} <{}> ({} symbols){}",
            rule_id,
            head.name,
            rule.len(),
            if trim { " trimmed" } else { "" }
        );

        let (node, state) = if rule.is_empty() {
            // an empty handle still gets one child so the node marks where
            // in the input the production was recognized
            let marker = SyntaxNode::leaf(
                0,
                &lookahead.symbol.name,
                lookahead.line,
                &lookahead.text,
            );
            let node = SyntaxNode::branch(
                usize::from(rule_id),
                &head.name,
                lookahead.line,
                vec![marker],
            );
            (node, self.state)
        } else {
            let handle = self.stack.pop_handle(rule.len()).ok_or_else(|| {
                ParseError::MalformedTable(format!(
                    "rule {} needs {} entries, stack holds {}",
                    rule_id,
                    rule.len(),
                    self.stack.len().saturating_sub(1)
                ))
            })?;
            let state = handle[0].state;
            let mut children = handle
                .into_iter()
                .map(|entry| {
                    entry.node.ok_or_else(|| {
                        ParseError::MalformedTable(format!(
                            "rule {} pops <{}>, which carries no syntax node",
                            rule_id, entry.symbol.name
                        ))
                    })
                })
                .collect::<Result<Vec<SyntaxNode>, ParseError>>()?;
            if trim && children.len() == 1 {
                self.stats.trims += 1;
                (children.remove(0), state)
            } else {
                let line = children.first().map_or(lookahead.line, |c| c.line);
                let node = SyntaxNode::branch(usize::from(rule_id), &head.name, line, children);
                (node, state)
            }
        };

        self.state = state;
        self.stats.reductions += 1;

        let mut reduced = Token::new(head.clone(), node.line, "");
        reduced.node = Some(node);
        self.goto(reduced)
    }

    /// Pushes a reduced nonterminal and follows the goto transition out of
    /// the exposed state.
    fn goto(&mut self, reduced: Token) -> Result<(), ParseError> {
        match self.grammar.lalr_state(self.state).action_for(reduced.id()) {
            Some(ParserAction::Goto(target)) | Some(ParserAction::Shift(target)) => {
                log::trace!("Goto {}", target);
                self.stack.push(self.state, reduced);
                self.state = target;
                Ok(())
            }
            other => Err(ParseError::MalformedTable(format!(
                "state {} has {:?} instead of a goto on <{}>",
                self.state, other, reduced.symbol.name
            ))),
        }
    }

    /// Panic-mode recovery for a token the current state has no action for.
    ///
    /// An ordinary token is first rewritten into the error terminal. If the
    /// error terminal itself is rejected, states are popped until one has an
    /// action for it. Either way the caller re-offers the token.
    fn recover(&mut self, token: &mut Token) -> Result<Signal, ParseError> {
        let Some(error) = self.error_symbol else {
            return Ok(Signal::Error);
        };

        if token.id() != error {
            log::debug!(
                "line {}: unexpected {:?} in state {}, substituting error terminal",
                token.line,
                token.symbol.name,
                self.state
            );
            let mut symbol = self.grammar.symbol(error).clone();
            symbol.kind = SymbolKind::Terminal;
            token.symbol = symbol;
            token.text = "error".into();
            token.node = None;
            self.stats.recoveries += 1;
            return Ok(Signal::Reduce);
        }

        while self.stack.len() > 1 {
            let Some(entry) = self.stack.pop() else {
                break;
            };
            self.state = entry.state;
            if self.grammar.lalr_state(self.state).action_for(error).is_some() {
                log::debug!("line {}: resuming in state {}", token.line, self.state);
                return Ok(Signal::Reduce);
            }
        }
        Err(ParseError::Unrecoverable { line: token.line })
    }

    fn accept(&mut self) -> SyntaxNode {
        let root = self.stack.pop().and_then(|entry| entry.node);
        assert_eq!(
            self.stack.len(),
            1,
            "accept must leave only the start entry on the stack"
        );
        match root {
            Some(root) => root,
            None => unreachable!("accepted entry carries no syntax node"),
        }
    }

    fn syntax_error(&self, token: &Token) -> ParseError {
        let grammar = self.grammar;
        let expected = grammar
            .lalr_state(self.state)
            .actions
            .iter()
            .filter(|a| !matches!(a.action, ParserAction::Goto(_) | ParserAction::Error))
            .map(|a| grammar.symbol(a.symbol).name.clone())
            .collect();
        ParseError::Syntax {
            line: token.line,
            found: token.symbol.name.clone(),
            expected,
        }
    }
}

/// A copy of a token read from the source, carrying its leaf node.
fn leaf_entry(token: &Token) -> Token {
    let mut entry = token.clone();
    entry.node = Some(SyntaxNode::leaf(
        usize::from(entry.id()),
        &entry.symbol.name,
        entry.line,
        &entry.text,
    ));
    entry
}

/// Discards bytes up to and including the next newline.
fn skip_line<S: LexSource + ?Sized>(source: &mut S) {
    while let Some(b) = source.read_byte() {
        if b == b'\n' {
            break;
        }
    }
}
