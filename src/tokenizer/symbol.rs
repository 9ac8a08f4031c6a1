//! # Punctuation
//!
//! Every operator of the process syntax is a single character, so there is
//! no longest-match ordering to worry about: each alternative in
//! [`parse_symbol`] consumes exactly one character.

use nom::{branch::alt, character::complete::char, combinator::value, error::context};

use super::token::{LexResult, TokenKind};

/// Parses one punctuation character into its [`TokenKind`].
pub fn parse_symbol(input: &str) -> LexResult<'_, TokenKind> {
    context(
        "symbol",
        alt((
            value(TokenKind::Pipe, char('|')),
            value(TokenKind::Plus, char('+')),
            value(TokenKind::Backslash, char('\\')),
            value(TokenKind::BracketOpen, char('[')),
            value(TokenKind::BracketClose, char(']')),
            value(TokenKind::Dot, char('.')),
            value(TokenKind::ParenOpen, char('(')),
            value(TokenKind::ParenClose, char(')')),
        )),
    )(input)
}
