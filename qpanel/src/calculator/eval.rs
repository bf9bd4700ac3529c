use super::{CalcParser, Rule};
use once_cell::sync::Lazy;
use pest::Parser;
use pest::iterators::Pairs;
use pest::pratt_parser::{Assoc, Op, PrattParser};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("syntax error: {0}")]
    Syntax(String),
}

// `*` and `/` bind tighter than `+` and `-`, all left-associative,
// unary minus tightest.
static PRATT: Lazy<PrattParser<Rule>> = Lazy::new(|| {
    PrattParser::new()
        .op(Op::infix(Rule::add, Assoc::Left) | Op::infix(Rule::subtract, Assoc::Left))
        .op(Op::infix(Rule::multiply, Assoc::Left) | Op::infix(Rule::divide, Assoc::Left))
        .op(Op::prefix(Rule::unary_minus))
});

/// Evaluate a character-validated arithmetic expression.
///
/// Pure function. Division by zero follows IEEE-754 and propagates an
/// infinite or NaN result instead of failing; only malformed input is an
/// error.
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    let trimmed = expression.trim();
    if trimmed.is_empty() {
        return Err(EvalError::Syntax("nothing to compute".to_string()));
    }
    let mut pairs = CalcParser::parse(Rule::equation, trimmed)
        .map_err(|err| EvalError::Syntax(err.to_string()))?;
    match pairs.next() {
        Some(pair) => Ok(eval_expr(pair.into_inner())),
        None => Err(EvalError::Syntax("nothing to compute".to_string())),
    }
}

fn eval_expr(pairs: Pairs<Rule>) -> f64 {
    PRATT
        .map_primary(|primary| match primary.as_rule() {
            Rule::num => primary.as_str().parse::<f64>().unwrap_or(f64::NAN),
            Rule::expr => eval_expr(primary.into_inner()),
            rule => unreachable!("unexpected primary rule {:?}", rule),
        })
        .map_prefix(|op, rhs| match op.as_rule() {
            Rule::unary_minus => -rhs,
            rule => unreachable!("unexpected prefix rule {:?}", rule),
        })
        .map_infix(|lhs, op, rhs| match op.as_rule() {
            Rule::add => lhs + rhs,
            Rule::subtract => lhs - rhs,
            Rule::multiply => lhs * rhs,
            Rule::divide => lhs / rhs,
            rule => unreachable!("unexpected infix rule {:?}", rule),
        })
        .parse(pairs)
}

/// Render a result the way the display (and the history log) records it
pub fn format_result(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        format!("{value}")
    }
}
