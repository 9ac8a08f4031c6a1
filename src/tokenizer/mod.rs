//! # Tokenizer
//!
//! Lexical analysis of CCS process terms.
//!
//! ## Component Structure
//!
//! * [`token`]: token kinds, spans and the [`Token`](token::Token) value
//! * [`keyword`]: the `nil`/`rec` keyword table and letter-run recognizer
//! * [`symbol`]: single-character operators and brackets
//! * [`whitespace`]: whitespace skipping
//! * [`lexer`]: the pull-based [`Lexer`](lexer::Lexer)
//!
//! ## Surface Syntax
//!
//! Operators are `|`, `+`, `\`, `.`, `[`, `]`, `(` and `)`. Identifiers are
//! runs of ASCII letters. There are no numbers, no comments and no line
//! continuations. Anything else is lexed as an illegal one-character token
//! and left for the parser to reject.
//!
//! ```rust
//! use ccs_guard::tokenizer::{Lexer, TokenKind};
//!
//! let mut lexer = Lexer::new("rec x. x");
//! assert_eq!(lexer.next_token().kind, TokenKind::Rec);
//! assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
//! ```

pub mod keyword;
pub mod lexer;
pub mod symbol;
pub mod token;
pub mod whitespace;

pub use lexer::Lexer;
pub use token::{Span, Token, TokenKind};
