use pest_derive::Parser;

#[derive(Parser, Debug, Clone)]
#[grammar = "calculator/calc.pest"]
pub struct CalcParser;

mod eval;
mod validate;


// Re-exports
pub use eval::{EvalError, evaluate, format_result};
pub use validate::validate;
