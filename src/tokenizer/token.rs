//! Token types produced by the [`Lexer`](super::lexer::Lexer).

use nom::{error::VerboseError, IResult};
use strum_macros::Display;

/// The category of a lexed token.
///
/// The lexer never decides whether an identifier is an action label or a
/// process variable; that is settled later by its position in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TokenKind {
    #[strum(serialize = "end of input")]
    Eof,
    #[strum(serialize = "illegal character")]
    Illegal,
    #[strum(serialize = "identifier")]
    Identifier,
    /// Parallel composition (`|`)
    #[strum(serialize = "'|'")]
    Pipe,
    /// Summation (`+`)
    #[strum(serialize = "'+'")]
    Plus,
    /// Restriction (`\`)
    #[strum(serialize = "'\\'")]
    Backslash,
    /// Opens a relabelling (`[`)
    #[strum(serialize = "'['")]
    BracketOpen,
    /// Closes a relabelling (`]`)
    #[strum(serialize = "']'")]
    BracketClose,
    /// Action prefix (`.`)
    #[strum(serialize = "'.'")]
    Dot,
    #[strum(serialize = "'('")]
    ParenOpen,
    #[strum(serialize = "')'")]
    ParenClose,
    #[strum(serialize = "'nil'")]
    Nil,
    #[strum(serialize = "'rec'")]
    Rec,
}

/// Location of a token in the source text.
///
/// `start` and `end` are byte offsets; `line` and `column` are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Default for Span {
    fn default() -> Self {
        Self {
            start: 0,
            end: 0,
            line: 1,
            column: 1,
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A single token together with the exact text it matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            literal: literal.into(),
            span,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

pub type LexResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;
