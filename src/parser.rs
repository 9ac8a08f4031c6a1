//! Recursive-descent parser for CCS process terms.
//!
//! ```text
//! process := '(' process ')'
//!          | IDENT
//!          | 'rec' IDENT '.' process
//!          | 'nil'
//! followed by zero or more of
//!          '.' process        (only after a bare IDENT)
//!          '+' process
//!          '|' process
//!          '\' IDENT
//!          '[' IDENT ']'
//! ```
//!
//! All operators share one precedence level and every right-hand side is a
//! full recursive [`Parser::parse_process`] call, so chains associate to the
//! right: `a.b + c` is `a.(b + c)` and `a + b | c` is `a + (b | c)`.
//! `rec` and `nil` return straight from the base case; anything after
//! `rec x. ...` belongs to the recursion body.

use thiserror::Error;
use tracing::{debug, error};

use crate::ast::{AstProcess, Identifier};
use crate::stack::with_headroom;
use crate::tokenizer::{Lexer, Token, TokenKind};

/// Fatal, unrecoverable syntax errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected}, found '{found}' at line {line}, column {column}")]
    UnexpectedToken {
        expected: String,
        found: String,
        line: usize,
        column: usize,
    },

    #[error("expected {expected}, found end of input")]
    UnexpectedEndOfInput { expected: String },

    #[error("illegal character '{character}' at line {line}, column {column}")]
    IllegalCharacter {
        character: String,
        line: usize,
        column: usize,
    },

    #[error("prefixes must be identifiers ('.' at line {line}, column {column})")]
    PrefixNotIdentifier { line: usize, column: usize },

    #[error("unexpected '{found}' after the end of the process at line {line}, column {column}")]
    TrailingInput {
        found: String,
        line: usize,
        column: usize,
    },
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Parser with two tokens of lookahead (current and peek).
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    cur_token: Token,
    peek_token: Token,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let cur_token = lexer.next_token();
        let peek_token = lexer.next_token();
        Self {
            lexer,
            cur_token,
            peek_token,
        }
    }

    pub fn current_token(&self) -> &Token {
        &self.cur_token
    }

    pub fn peek_token(&self) -> &Token {
        &self.peek_token
    }

    /// Parses one process and requires the input to end right after it.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn parse(&mut self) -> ParseResult<AstProcess> {
        let process = self.parse_process()?;
        if !self.cur_token.is_eof() {
            let err = ParseError::TrailingInput {
                found: self.cur_token.literal.clone(),
                line: self.cur_token.span.line,
                column: self.cur_token.span.column,
            };
            error!("{}", err);
            return Err(err);
        }
        debug!("parsed {}", process);
        Ok(process)
    }

    /// Parses one process, stopping at the first token no rule can continue
    /// with. Leftover tokens are not an error here; see [`Parser::parse`].
    pub fn parse_process(&mut self) -> ParseResult<AstProcess> {
        with_headroom(|| self.parse_process_at_depth())
    }

    fn parse_process_at_depth(&mut self) -> ParseResult<AstProcess> {
        // Only a bare identifier may be the action of a prefix.
        let mut can_be_prefix = false;

        let mut left = match self.cur_token.kind {
            TokenKind::ParenOpen => {
                self.next_token();
                let inner = self.parse_process()?;
                self.expect(TokenKind::ParenClose, "')' after expression")?;
                inner
            }
            TokenKind::Identifier => {
                can_be_prefix = true;
                let identifier = Identifier::from(&self.cur_token);
                self.next_token();
                AstProcess::Identifier(identifier)
            }
            TokenKind::Rec => {
                self.next_token();
                let bound = self.expect_identifier("identifier after 'rec'")?;
                self.expect(TokenKind::Dot, "'.' after identifier")?;
                let body = self.parse_process()?;
                return Ok(AstProcess::Recursion {
                    bound,
                    body: Box::new(body),
                });
            }
            TokenKind::Nil => {
                self.next_token();
                return Ok(AstProcess::Nil);
            }
            _ => return Err(self.unexpected("process")),
        };

        loop {
            match self.cur_token.kind {
                TokenKind::Dot => {
                    let action = match &left {
                        AstProcess::Identifier(action) if can_be_prefix => action.clone(),
                        _ => return Err(self.prefix_error()),
                    };
                    self.next_token();
                    let continuation = self.parse_process()?;
                    left = AstProcess::Prefix {
                        action,
                        continuation: Box::new(continuation),
                    };
                }
                TokenKind::Plus => {
                    self.next_token();
                    let right = self.parse_process()?;
                    left = AstProcess::Summation {
                        left: Box::new(left),
                        right: Box::new(right),
                    };
                }
                TokenKind::Pipe => {
                    self.next_token();
                    let right = self.parse_process()?;
                    left = AstProcess::Composition {
                        left: Box::new(left),
                        right: Box::new(right),
                    };
                }
                TokenKind::Backslash => {
                    self.next_token();
                    let label = self.expect_identifier("identifier after '\\'")?;
                    left = AstProcess::Restriction {
                        body: Box::new(left),
                        label,
                    };
                }
                TokenKind::BracketOpen => {
                    self.next_token();
                    let relabelling = self.expect_identifier("identifier after '['")?;
                    self.expect(TokenKind::BracketClose, "']' after identifier")?;
                    left = AstProcess::Relabelling {
                        body: Box::new(left),
                        relabelling,
                    };
                }
                _ => return Ok(left),
            }
        }
    }

    fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.cur_token = std::mem::replace(&mut self.peek_token, next);
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> ParseResult<()> {
        if self.cur_token.kind != kind {
            return Err(self.unexpected(expected));
        }
        self.next_token();
        Ok(())
    }

    fn expect_identifier(&mut self, expected: &str) -> ParseResult<Identifier> {
        if self.cur_token.kind != TokenKind::Identifier {
            return Err(self.unexpected(expected));
        }
        let identifier = Identifier::from(&self.cur_token);
        self.next_token();
        Ok(identifier)
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = &self.cur_token;
        let err = match token.kind {
            TokenKind::Eof => ParseError::UnexpectedEndOfInput {
                expected: expected.to_string(),
            },
            TokenKind::Illegal => ParseError::IllegalCharacter {
                character: token.literal.clone(),
                line: token.span.line,
                column: token.span.column,
            },
            _ => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: token.literal.clone(),
                line: token.span.line,
                column: token.span.column,
            },
        };
        error!("{}", err);
        err
    }

    fn prefix_error(&self) -> ParseError {
        let err = ParseError::PrefixNotIdentifier {
            line: self.cur_token.span.line,
            column: self.cur_token.span.column,
        };
        error!("{}", err);
        err
    }
}

/// Parses a complete term; trailing tokens are rejected.
pub fn parse(source: &str) -> ParseResult<AstProcess> {
    Parser::new(Lexer::new(source)).parse()
}
