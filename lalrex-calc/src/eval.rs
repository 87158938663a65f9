//! Folds a calculator syntax tree into a value.
//!
//! Internal nodes are dispatched on their rule id, leaves on their symbol id.
//! Trees built with and without unit-rule trimming evaluate the same.

use crate::CalcError;
use crate::tables::{rule, sym};
use lalrex::SyntaxNode;

/// A pending step of the fold.
enum Step<'a> {
    /// Evaluate the node, or schedule its operands.
    Visit(&'a SyntaxNode),
    /// Combine the operand values already on the value stack.
    Apply(&'a SyntaxNode),
}

/// Evaluates the expression rooted at `root`.
///
/// The tree is folded with an explicit work list, so left-recursive chains
/// of any length evaluate without growing the call stack.
pub fn evaluate(root: &SyntaxNode) -> Result<i64, CalcError> {
    let mut work = vec![Step::Visit(root)];
    let mut values: Vec<i64> = Vec::new();

    while let Some(step) = work.pop() {
        match step {
            Step::Visit(node) => visit(node, &mut work, &mut values)?,
            Step::Apply(node) => {
                let value = apply(node, &mut values)?;
                values.push(value);
            }
        }
    }

    match (values.pop(), values.is_empty()) {
        (Some(value), true) => Ok(value),
        _ => Err(unexpected(root)),
    }
}

fn visit<'a>(
    node: &'a SyntaxNode,
    work: &mut Vec<Step<'a>>,
    values: &mut Vec<i64>,
) -> Result<(), CalcError> {
    if let Some(text) = node.terminal() {
        let value = match u16::try_from(node.id) {
            Ok(sym::NUM) => text.parse::<i64>()?,
            Ok(sym::ERROR) => return Err(CalcError::Recovered { line: node.line }),
            _ => return Err(unexpected(node)),
        };
        values.push(value);
        return Ok(());
    }

    match node.id {
        rule::ADD | rule::SUB | rule::MUL | rule::DIV => {
            let lhs = child(node, 0)?;
            let rhs = child(node, 2)?;
            // lhs is popped, and evaluated, first
            work.push(Step::Apply(node));
            work.push(Step::Visit(rhs));
            work.push(Step::Visit(lhs));
        }
        rule::EXPR_TERM | rule::TERM_FACTOR | rule::NUM => {
            work.push(Step::Visit(child(node, 0)?));
        }
        rule::PAREN => work.push(Step::Visit(child(node, 1)?)),
        rule::NEG => {
            let operand = child(node, 1)?;
            work.push(Step::Apply(node));
            work.push(Step::Visit(operand));
        }
        rule::ERROR => return Err(CalcError::Recovered { line: node.line }),
        _ => return Err(unexpected(node)),
    }
    Ok(())
}

fn apply(node: &SyntaxNode, values: &mut Vec<i64>) -> Result<i64, CalcError> {
    let overflow = || CalcError::Overflow { line: node.line };
    let mut operand = || values.pop().ok_or_else(|| unexpected(node));

    if node.id == rule::NEG {
        return operand()?.checked_neg().ok_or_else(overflow);
    }
    let rhs = operand()?;
    let lhs = operand()?;
    let value = match node.id {
        rule::ADD => lhs.checked_add(rhs),
        rule::SUB => lhs.checked_sub(rhs),
        rule::MUL => lhs.checked_mul(rhs),
        rule::DIV => {
            if rhs == 0 {
                return Err(CalcError::DivisionByZero { line: node.line });
            }
            lhs.checked_div(rhs)
        }
        _ => return Err(unexpected(node)),
    };
    value.ok_or_else(overflow)
}

fn child(node: &SyntaxNode, index: usize) -> Result<&SyntaxNode, CalcError> {
    node.children().get(index).ok_or_else(|| unexpected(node))
}

fn unexpected(node: &SyntaxNode) -> CalcError {
    CalcError::UnexpectedNode {
        name: node.name.clone(),
        line: node.line,
    }
}
