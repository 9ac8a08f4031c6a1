use std::str::FromStr;

use nom::{bytes::complete::take_while1, error::context};

use super::token::{LexResult, TokenKind};

/// Reserved words of the process syntax.
///
/// Matching is case sensitive and applies to a whole letter run only, so
/// `nils` and `Rec` are ordinary identifiers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display, strum::EnumIter, strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
    Nil,
    Rec,
}

impl From<Keyword> for TokenKind {
    fn from(keyword: Keyword) -> Self {
        match keyword {
            Keyword::Nil => TokenKind::Nil,
            Keyword::Rec => TokenKind::Rec,
        }
    }
}

/// Classifies a complete letter run as a keyword or an identifier.
pub fn lookup_word(word: &str) -> TokenKind {
    Keyword::from_str(word)
        .map(TokenKind::from)
        .unwrap_or(TokenKind::Identifier)
}

/// Recognizes a maximal run of ASCII letters.
///
/// Digits and underscores never belong to a word.
pub fn parse_word(input: &str) -> LexResult<'_, &str> {
    context("word", take_while1(|c: char| c.is_ascii_alphabetic()))(input)
}
