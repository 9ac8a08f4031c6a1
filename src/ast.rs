//! Syntax tree produced by the [`Parser`](crate::parser::Parser).
//!
//! The tree keeps the span of every identifier for diagnostics. Rendering a
//! node with [`Display`](std::fmt::Display) produces text that parses back to
//! the same tree.

use std::fmt;

use crate::stack::with_headroom;
use crate::tokenizer::{Span, Token};

/// An action label, process variable, restricted channel or relabelling.
///
/// Which of these it is depends only on where it sits in the tree.
#[derive(Debug, Clone, Eq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            span: Span::default(),
        }
    }
}

impl From<&Token> for Identifier {
    fn from(token: &Token) -> Self {
        Self {
            name: token.literal.clone(),
            span: token.span,
        }
    }
}

// Spans are diagnostic only; two identifiers with the same name are the same.
impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstProcess {
    /// The inactive process, `nil`
    Nil,
    /// A bare identifier, `x`
    Identifier(Identifier),
    /// `action.continuation`
    Prefix {
        action: Identifier,
        continuation: Box<AstProcess>,
    },
    /// `rec bound. body`; the only binding construct
    Recursion {
        bound: Identifier,
        body: Box<AstProcess>,
    },
    /// `left|right`
    Composition {
        left: Box<AstProcess>,
        right: Box<AstProcess>,
    },
    /// `left+right`
    Summation {
        left: Box<AstProcess>,
        right: Box<AstProcess>,
    },
    /// `body\label`
    Restriction {
        body: Box<AstProcess>,
        label: Identifier,
    },
    /// `body[relabelling]`
    Relabelling {
        body: Box<AstProcess>,
        relabelling: Identifier,
    },
}

impl AstProcess {
    pub fn identifier(name: impl Into<String>) -> Self {
        AstProcess::Identifier(Identifier::new(name))
    }

    pub fn prefix(action: impl Into<String>, continuation: AstProcess) -> Self {
        AstProcess::Prefix {
            action: Identifier::new(action),
            continuation: Box::new(continuation),
        }
    }

    pub fn recursion(bound: impl Into<String>, body: AstProcess) -> Self {
        AstProcess::Recursion {
            bound: Identifier::new(bound),
            body: Box::new(body),
        }
    }

    pub fn composition(left: AstProcess, right: AstProcess) -> Self {
        AstProcess::Composition {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn summation(left: AstProcess, right: AstProcess) -> Self {
        AstProcess::Summation {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn restriction(body: AstProcess, label: impl Into<String>) -> Self {
        AstProcess::Restriction {
            body: Box::new(body),
            label: Identifier::new(label),
        }
    }

    pub fn relabelling(body: AstProcess, relabelling: impl Into<String>) -> Self {
        AstProcess::Relabelling {
            body: Box::new(body),
            relabelling: Identifier::new(relabelling),
        }
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        let mut pending = vec![self];
        let mut size = 0;
        while let Some(node) = pending.pop() {
            size += 1;
            match node {
                AstProcess::Nil | AstProcess::Identifier(_) => {}
                AstProcess::Prefix { continuation, .. } => pending.push(continuation),
                AstProcess::Recursion { body, .. }
                | AstProcess::Restriction { body, .. }
                | AstProcess::Relabelling { body, .. } => pending.push(body),
                AstProcess::Composition { left, right }
                | AstProcess::Summation { left, right } => {
                    pending.push(left);
                    pending.push(right);
                }
            }
        }
        size
    }

    /// Moves the children out into `detached`, leaving `nil` in their place.
    fn detach_children(&mut self, detached: &mut Vec<AstProcess>) {
        match self {
            AstProcess::Nil | AstProcess::Identifier(_) => {}
            AstProcess::Prefix {
                continuation: child,
                ..
            }
            | AstProcess::Recursion { body: child, .. }
            | AstProcess::Restriction { body: child, .. }
            | AstProcess::Relabelling { body: child, .. } => {
                detached.push(std::mem::replace(child.as_mut(), AstProcess::Nil));
            }
            AstProcess::Composition { left, right } | AstProcess::Summation { left, right } => {
                detached.push(std::mem::replace(left.as_mut(), AstProcess::Nil));
                detached.push(std::mem::replace(right.as_mut(), AstProcess::Nil));
            }
        }
    }

    /// Renders a node that is followed by an operator.
    ///
    /// `nil` and `rec` never pick up trailing operators and a prefix would
    /// swallow them into its continuation, so those three are parenthesized.
    fn fmt_operand(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AstProcess::Nil | AstProcess::Prefix { .. } | AstProcess::Recursion { .. } => {
                write!(f, "({})", self)
            }
            _ => write!(f, "{}", self),
        }
    }
}

// Dropping a deep tree node by node would recurse once per level.
impl Drop for AstProcess {
    fn drop(&mut self) {
        let mut detached = Vec::new();
        self.detach_children(&mut detached);
        while let Some(mut node) = detached.pop() {
            node.detach_children(&mut detached);
        }
    }
}

impl fmt::Display for AstProcess {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        with_headroom(|| self.fmt_node(f))
    }
}

impl AstProcess {
    fn fmt_node(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AstProcess::Nil => write!(f, "nil"),
            AstProcess::Identifier(identifier) => write!(f, "{}", identifier),
            AstProcess::Prefix {
                action,
                continuation,
            } => write!(f, "{}.{}", action, continuation),
            AstProcess::Recursion { bound, body } => write!(f, "rec {}. {}", bound, body),
            AstProcess::Composition { left, right } => {
                write!(f, "(")?;
                left.fmt_operand(f)?;
                write!(f, "|{})", right)
            }
            AstProcess::Summation { left, right } => {
                write!(f, "(")?;
                left.fmt_operand(f)?;
                write!(f, " + {})", right)
            }
            AstProcess::Restriction { body, label } => {
                body.fmt_operand(f)?;
                write!(f, "\\{}", label)
            }
            AstProcess::Relabelling { body, relabelling } => {
                body.fmt_operand(f)?;
                write!(f, "[{}]", relabelling)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_shapes() {
        let cases = [
            (AstProcess::Nil, "nil"),
            (AstProcess::identifier("x"), "x"),
            (AstProcess::prefix("a", AstProcess::identifier("x")), "a.x"),
            (AstProcess::recursion("x", AstProcess::identifier("x")), "rec x. x"),
            (
                AstProcess::composition(AstProcess::identifier("a"), AstProcess::identifier("b")),
                "(a|b)",
            ),
            (
                AstProcess::summation(AstProcess::identifier("a"), AstProcess::identifier("b")),
                "(a + b)",
            ),
            (AstProcess::restriction(AstProcess::identifier("p"), "a"), "p\\a"),
            (AstProcess::relabelling(AstProcess::identifier("p"), "f"), "p[f]"),
        ];

        for (process, expected) in cases.iter() {
            assert_eq!(process.to_string(), *expected);
        }
    }

    #[test]
    fn test_render_parenthesizes_greedy_operands() {
        let sum = AstProcess::summation(
            AstProcess::prefix("a", AstProcess::identifier("b")),
            AstProcess::identifier("c"),
        );
        assert_eq!(sum.to_string(), "((a.b) + c)");

        let restricted = AstProcess::restriction(AstProcess::Nil, "a");
        assert_eq!(restricted.to_string(), "(nil)\\a");

        let relabelled =
            AstProcess::relabelling(AstProcess::recursion("x", AstProcess::identifier("x")), "f");
        assert_eq!(relabelled.to_string(), "(rec x. x)[f]");
    }

    #[test]
    fn test_identifier_equality_ignores_span() {
        let here = Identifier {
            name: "a".to_string(),
            span: Span {
                start: 4,
                end: 5,
                line: 1,
                column: 5,
            },
        };
        assert_eq!(here, Identifier::new("a"));
        assert_ne!(here, Identifier::new("b"));
    }

    #[test]
    fn test_size() {
        let process = AstProcess::recursion(
            "x",
            AstProcess::summation(
                AstProcess::prefix("a", AstProcess::identifier("x")),
                AstProcess::Nil,
            ),
        );
        assert_eq!(process.size(), 5);
    }

    #[test]
    fn test_deep_tree_renders_and_drops() {
        let mut process = AstProcess::identifier("x");
        for _ in 0..100_000 {
            process = AstProcess::prefix("a", process);
        }
        assert_eq!(process.size(), 100_001);

        let rendered = process.to_string();
        assert!(rendered.starts_with("a.a.a."));
        assert!(rendered.ends_with("a.x"));
        drop(process);
    }
}
