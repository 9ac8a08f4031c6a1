use nom::{character::complete::multispace0, error::context};

use super::token::LexResult;

/// Consumes any run of spaces, tabs, carriage returns and newlines.
///
/// Whitespace separates tokens but is never emitted as one. Never fails;
/// an empty run is returned when the input starts with anything else.
pub fn skip_whitespace(input: &str) -> LexResult<'_, &str> {
    context("whitespace", multispace0)(input)
}
