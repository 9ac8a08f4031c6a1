//! # ccs-guard: guardedness checking for CCS process terms
//!
//! A process term of the Calculus of Communicating Systems is *guarded* when
//! every variable bound by `rec` occurs only beneath at least one action
//! prefix. An unguarded variable could be unfolded forever without
//! performing a single observable action.
//!
//! ## Pipeline
//!
//! ```text
//! source → Tokenizer → Parser → AST → lowering → Process → Checker → bool
//! ```
//!
//! - Lexical analysis ([`tokenizer`])
//! - Recursive-descent parsing ([`parser`]) into an [`ast::AstProcess`]
//! - Lowering ([`process`]) into the flat [`process::Process`] record
//! - Guardedness checking ([`checker`]), concurrently by default
//!
//! A malformed term is a [`parser::ParseError`] and never yields an answer;
//! it is kept apart from a term that was checked and found not guarded.
//!
//! ```rust
//! # #[tokio::main]
//! # async fn main() -> Result<(), ccs_guard::Error> {
//! use ccs_guard::{check_guardedness, config::GuardConfig};
//!
//! let config = GuardConfig::default();
//! assert!(check_guardedness("rec x. a.x+b", &config).await?);
//! assert!(!check_guardedness("rec x. x", &config).await?);
//! # Ok(())
//! # }
//! ```

pub mod ast;
pub mod checker;
pub mod config;
pub mod error;
pub mod parser;
pub mod process;
mod stack;
pub mod tokenizer;

use std::sync::Arc;

// Re-exports
pub use ast::*;
pub use checker::{is_guarded, CheckError, CheckResult, ExposedNames, GuardednessChecker};
pub use error::*;
pub use parser::{parse, ParseError, ParseResult, Parser};
pub use process::{Process, ProcessKind};

use config::GuardConfig;
use tokenizer::Lexer;

/// Parses `source` according to the parser settings of `config`.
#[tracing::instrument(level = "debug", skip(config))]
pub fn parse_with(source: &str, config: &GuardConfig) -> ParseResult<AstProcess> {
    let mut parser = Parser::new(Lexer::new(source));
    if config.parser.require_end_of_input {
        parser.parse()
    } else {
        parser.parse_process()
    }
}

/// Runs the whole pipeline on one term.
///
/// Returns `Ok(true)` for a guarded term, `Ok(false)` for an unguarded one
/// and an error when the term does not parse.
#[tracing::instrument(level = "debug", skip(config))]
pub async fn check_guardedness(source: &str, config: &GuardConfig) -> InternalResult<bool> {
    let ast = parse_with(source, config)?;
    let process = Arc::new(Process::from(&ast));
    tracing::debug!("lowered to {}", process);

    let checker = GuardednessChecker::new(config.checker.clone());
    Ok(checker.is_guarded(process).await?)
}
