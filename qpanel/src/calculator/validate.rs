/// Character gate applied before any expression reaches the evaluator.
///
/// True iff every character is a digit, one of `+ - * / ( ) .`, or
/// whitespace. The empty string passes; evaluation still rejects it as
/// nothing to compute.
pub fn validate(input: &str) -> bool {
    input.chars().all(|c| {
        c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.')
    })
}
