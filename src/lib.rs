pub mod ast;
pub mod functions;

use ast::{Expression, ParseError, ParseNumberError, Parser};
use log::debug;

/// Parses a formula over the given single-character variables. Malformed text
/// yields [`Expression::Invalid`].
pub fn parse_expression(expression: &str, variables: &[char]) -> Expression {
    Parser::new(variables).parse(expression)
}

/// Like [`parse_expression`] but reports why the text was rejected.
pub fn try_parse_expression(
    expression: &str,
    variables: &[char],
) -> Result<Expression, ParseError> {
    Parser::new(variables).try_parse(expression)
}

/// Reads a plain numeric field such as a bound or a resolution. Arithmetic
/// and builtins are allowed (`2pi` is not, `2*pi` is); the result must be
/// finite.
pub fn parse_number(text: &str) -> Result<f64, ParseNumberError> {
    let ast = try_parse_expression(text, &[]).map_err(|err| {
        debug!("Rejected number {:?}: {}", text, err);
        ParseNumberError::Invalid(text.to_string())
    })?;

    let value = ast.eval(&[]);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseNumberError::NonFinite {
            text: text.to_string(),
            value,
        })
    }
}
