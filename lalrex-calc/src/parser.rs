//! # Calculator Parser
//!
//! [`CalcParser`] owns the validated calculator [`Grammar`] and runs the
//! engine over it. Each call creates a short-lived [`lalrex::Parser`], so a
//! single `CalcParser` can serve several threads at once.
//!
//! ## Behavior highlights
//! - **Operator precedence & associativity** come from the grammar itself:
//!   `*` and `/` bind tighter than `+` and `-`, all four are left-associative,
//!   and prefix minus applies to a single factor.
//! - **Comments** (`/* ... */` and `// ...`) are skipped by the engine.
//! - **Recovery**, when enabled, replaces unparsable input with `error`
//!   nodes instead of failing; such trees parse but do not evaluate.

use crate::tables::{ERROR_TERMINAL, calc_grammar};
use crate::{CalcError, evaluate};
use lalrex::{ByteSource, Grammar, LexSource, Parser, SyntaxNode};
use std::fs::File;
use std::path::Path;

/// The calculator front end.
pub struct CalcParser {
    grammar: Grammar,
}

impl CalcParser {
    /// Loads the calculator tables.
    pub fn try_new() -> Result<Self, CalcError> {
        Ok(Self {
            grammar: calc_grammar()?,
        })
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Parses `input` into a syntax tree.
    ///
    /// `trim` collapses unit reductions (`Expr -> Term`, `Term -> Factor`);
    /// `recover` enables panic-mode recovery through the `error` terminal.
    pub fn parse(&self, input: &[u8], trim: bool, recover: bool) -> Result<SyntaxNode, CalcError> {
        self.parse_source(&mut ByteSource::new(input), trim, recover)
    }

    /// Reads the file at `path` and parses its contents, as [`parse`](Self::parse).
    pub fn parse_file<P: AsRef<Path>>(
        &self,
        path: P,
        trim: bool,
        recover: bool,
    ) -> Result<SyntaxNode, CalcError> {
        let file = File::open(path)?;
        let mut source = ByteSource::from_reader(file)?;
        self.parse_source(&mut source, trim, recover)
    }

    fn parse_source<S: LexSource>(
        &self,
        source: &mut S,
        trim: bool,
        recover: bool,
    ) -> Result<SyntaxNode, CalcError> {
        let mut parser = if recover {
            Parser::with_error_terminal(&self.grammar, ERROR_TERMINAL)
        } else {
            Parser::new(&self.grammar)
        };
        let result = parser.parse(source, trim);
        let stats = parser.stats();
        log::debug!(
            "parser stats: tokens={} shifts={} reductions={} trims={} recoveries={}",
            stats.tokens,
            stats.shifts,
            stats.reductions,
            stats.trims,
            stats.recoveries
        );
        log::debug!(
            "scanner stats: tokens={} chars={} unreads={}",
            stats.scanner.tokens,
            stats.scanner.chars,
            stats.scanner.unreads
        );
        Ok(result?)
    }

    /// Parses and evaluates `input`.
    pub fn eval(&self, input: &[u8]) -> Result<i64, CalcError> {
        let tree = self.parse(input, true, false)?;
        evaluate(&tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::sym;
    use lalrex::ParseError;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn eval(input: &str) -> Result<i64, CalcError> {
        CalcParser::try_new().unwrap().eval(input.as_bytes())
    }

    #[test]
    fn respects_precedence_and_associativity() {
        init_logger();
        assert_eq!(eval("1 + 2 * 3").unwrap(), 7);
        assert_eq!(eval("(1 + 2) * 3").unwrap(), 9);
        assert_eq!(eval("10 - 4 - 3").unwrap(), 3);
        assert_eq!(eval("100 / 10 / 5").unwrap(), 2);
        assert_eq!(eval("2 * (3 + 4) - 5 / (1 + 1)").unwrap(), 12);
    }

    #[test]
    fn unary_minus_binds_to_a_factor() {
        assert_eq!(eval("-2 * -3").unwrap(), 6);
        assert_eq!(eval("--4").unwrap(), 4);
        assert_eq!(eval("1 - -1").unwrap(), 2);
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(eval("1 + /* two\n */ 2 // tail").unwrap(), 3);
        assert_eq!(eval("// lead\n6 / 3").unwrap(), 2);
    }

    #[test]
    fn trimming_does_not_change_the_value() {
        let calc = CalcParser::try_new().unwrap();
        let input = b"(8 - 3) * 2 + -1";
        let full = calc.parse(input, false, false).unwrap();
        let trimmed = calc.parse(input, true, false).unwrap();
        assert!(full.iter().count() > trimmed.iter().count());
        assert_eq!(evaluate(&full).unwrap(), 9);
        assert_eq!(evaluate(&trimmed).unwrap(), 9);
        assert_eq!(
            full.leaves().collect::<Vec<_>>(),
            trimmed.leaves().collect::<Vec<_>>()
        );
    }

    #[test]
    fn division_by_zero() {
        assert!(matches!(
            eval("1 +\n8 / (2 - 2)"),
            Err(CalcError::DivisionByZero { line: 2 })
        ));
    }

    #[test]
    fn literal_out_of_range() {
        assert!(matches!(
            eval("99999999999999999999"),
            Err(CalcError::ParseInt(_))
        ));
    }

    #[test]
    fn syntax_error_reports_expectations() {
        match eval("1 +\n2 *\n(3") {
            Err(CalcError::Parse(ParseError::Syntax {
                line,
                found,
                expected,
            })) => {
                assert_eq!(line, 3);
                assert_eq!(found.as_str(), "EOF");
                let expected: Vec<&str> = expected.iter().map(|s| s.as_str()).collect();
                assert_eq!(expected, vec![")", "+", "-"]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn lexical_error() {
        assert!(matches!(
            eval("1 + x"),
            Err(CalcError::Parse(ParseError::Lexical { line: 1, .. }))
        ));
    }

    #[test]
    fn recovery_builds_a_tree_with_error_nodes() {
        init_logger();
        let calc = CalcParser::try_new().unwrap();
        let tree = calc.parse(b"1 + * 2", true, true).unwrap();
        let error = tree.find("error").unwrap();
        assert_eq!(error.id, sym::ERROR as usize);
        assert!(matches!(
            evaluate(&tree),
            Err(CalcError::Recovered { line: 1 })
        ));

        assert!(matches!(
            calc.parse(b"1 + * 2", true, false),
            Err(CalcError::Parse(ParseError::Syntax { .. }))
        ));
    }

    #[test]
    fn recovery_covers_unknown_bytes() {
        let calc = CalcParser::try_new().unwrap();
        let tree = calc.parse(b"2 * $", true, true).unwrap();
        assert!(tree.find("error").is_some());
    }

    #[test]
    fn long_operand_chains() {
        init_logger();
        let calc = CalcParser::try_new().unwrap();
        let mut input = String::from("0");
        for _ in 0..100_000 {
            input.push_str(" + 1");
        }
        assert_eq!(calc.eval(input.as_bytes()).unwrap(), 100_000);

        let full = calc.parse(input.as_bytes(), false, false).unwrap();
        assert_eq!(evaluate(&full).unwrap(), 100_000);

        let negated = format!("{}7", "-".repeat(50_001));
        assert_eq!(calc.eval(negated.as_bytes()).unwrap(), -7);
    }

    #[test]
    fn parses_files() {
        let calc = CalcParser::try_new().unwrap();
        let path = std::env::temp_dir().join(format!("lalrex-calc-{}.txt", std::process::id()));
        std::fs::write(&path, "6 * 7 // answer\n").unwrap();
        let tree = calc.parse_file(&path, true, false);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(evaluate(&tree.unwrap()).unwrap(), 42);

        let missing = std::env::temp_dir().join("lalrex-calc-no-such-file.txt");
        assert!(matches!(
            calc.parse_file(&missing, true, false),
            Err(CalcError::Io(_))
        ));
    }

    #[test]
    fn shared_across_threads() {
        let calc = CalcParser::try_new().unwrap();
        std::thread::scope(|s| {
            let handles: Vec<_> = (1..=4i64)
                .map(|n| {
                    let calc = &calc;
                    s.spawn(move || calc.eval(format!("{} * 10 + 1", n).as_bytes()).unwrap())
                })
                .collect();
            let values: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            assert_eq!(values, vec![11, 21, 31, 41]);
        });
    }
}
