//! Lowered process tree consumed by the guardedness checker.
//!
//! Every node is the same record: a [`ProcessKind`] discriminant, a `name`
//! and up to two children. The `name` holds the action of a prefix, the
//! variable of a reference or recursion, the label of a restriction or the
//! relabelling; it is always read through the discriminant.

use std::fmt;
use std::sync::Arc;

use strum_macros::Display;

use crate::ast::AstProcess;
use crate::stack::with_headroom;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ProcessKind {
    Nil,
    Variable,
    Prefix,
    Sum,
    Composition,
    Restriction,
    Relabeling,
    Recursion,
}

/// A node of the process tree.
///
/// Children sit behind [`Arc`] so that a subtree can be handed to a spawned
/// task, but no node is ever referenced from two parents. Fields are only
/// reachable through the constructors, which guarantee that every kind has
/// the children it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    kind: ProcessKind,
    name: String,
    left: Option<Arc<Process>>,
    right: Option<Arc<Process>>,
}

impl Process {
    fn node(
        kind: ProcessKind,
        name: impl Into<String>,
        left: Option<Process>,
        right: Option<Process>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            left: left.map(Arc::new),
            right: right.map(Arc::new),
        }
    }

    pub fn nil() -> Self {
        Self::node(ProcessKind::Nil, "", None, None)
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::node(ProcessKind::Variable, name, None, None)
    }

    pub fn prefix(action: impl Into<String>, continuation: Process) -> Self {
        Self::node(ProcessKind::Prefix, action, Some(continuation), None)
    }

    pub fn sum(left: Process, right: Process) -> Self {
        Self::node(ProcessKind::Sum, "", Some(left), Some(right))
    }

    pub fn composition(left: Process, right: Process) -> Self {
        Self::node(ProcessKind::Composition, "", Some(left), Some(right))
    }

    pub fn restriction(body: Process, label: impl Into<String>) -> Self {
        Self::node(ProcessKind::Restriction, label, Some(body), None)
    }

    pub fn relabeling(body: Process, relabeling: impl Into<String>) -> Self {
        Self::node(ProcessKind::Relabeling, relabeling, Some(body), None)
    }

    pub fn recursion(bound: impl Into<String>, body: Process) -> Self {
        Self::node(ProcessKind::Recursion, bound, Some(body), None)
    }

    pub fn kind(&self) -> ProcessKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The only child of unary nodes, or the left operand of `+` and `|`.
    pub fn left(&self) -> Option<&Arc<Process>> {
        self.left.as_ref()
    }

    pub fn right(&self) -> Option<&Arc<Process>> {
        self.right.as_ref()
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        let mut pending = vec![self];
        let mut size = 0;
        while let Some(node) = pending.pop() {
            size += 1;
            pending.extend(node.left.as_deref());
            pending.extend(node.right.as_deref());
        }
        size
    }

    fn fmt_node(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ProcessKind::Nil => write!(f, "nil"),
            ProcessKind::Variable => write!(f, "{}", self.name),
            ProcessKind::Prefix => {
                write!(f, "{}.", self.name)?;
                fmt_child(&self.left, f)
            }
            ProcessKind::Recursion => {
                write!(f, "rec {}. ", self.name)?;
                fmt_child(&self.left, f)
            }
            ProcessKind::Sum | ProcessKind::Composition => {
                let operator = if self.kind == ProcessKind::Sum { " + " } else { "|" };
                write!(f, "(")?;
                fmt_child(&self.left, f)?;
                write!(f, "{}", operator)?;
                fmt_child(&self.right, f)?;
                write!(f, ")")
            }
            ProcessKind::Restriction => {
                fmt_child(&self.left, f)?;
                write!(f, "\\{}", self.name)
            }
            ProcessKind::Relabeling => {
                fmt_child(&self.left, f)?;
                write!(f, "[{}]", self.name)
            }
        }
    }
}

fn fmt_child(child: &Option<Arc<Process>>, f: &mut fmt::Formatter) -> fmt::Result {
    match child {
        Some(child) => write!(f, "{}", child),
        None => Ok(()),
    }
}

// Children are released one at a time so a deep chain never drops recursively.
impl Drop for Process {
    fn drop(&mut self) {
        let mut detached: Vec<Arc<Process>> = Vec::new();
        detached.extend(self.left.take());
        detached.extend(self.right.take());
        while let Some(child) = detached.pop() {
            // A child still shared with a running task is released by its last owner.
            if let Ok(mut node) = Arc::try_unwrap(child) {
                detached.extend(node.left.take());
                detached.extend(node.right.take());
            }
        }
    }
}

impl From<&AstProcess> for Process {
    fn from(ast: &AstProcess) -> Self {
        with_headroom(|| Process::lower(ast))
    }
}

impl Process {
    fn lower(ast: &AstProcess) -> Self {
        match ast {
            AstProcess::Nil => Process::nil(),
            AstProcess::Identifier(identifier) => Process::variable(identifier.name.as_str()),
            AstProcess::Prefix {
                action,
                continuation,
            } => Process::prefix(action.name.as_str(), Process::from(continuation.as_ref())),
            AstProcess::Recursion { bound, body } => {
                Process::recursion(bound.name.as_str(), Process::from(body.as_ref()))
            }
            AstProcess::Composition { left, right } => Process::composition(
                Process::from(left.as_ref()),
                Process::from(right.as_ref()),
            ),
            AstProcess::Summation { left, right } => {
                Process::sum(Process::from(left.as_ref()), Process::from(right.as_ref()))
            }
            AstProcess::Restriction { body, label } => {
                Process::restriction(Process::from(body.as_ref()), label.name.as_str())
            }
            AstProcess::Relabelling { body, relabelling } => {
                Process::relabeling(Process::from(body.as_ref()), relabelling.name.as_str())
            }
        }
    }
}

impl From<AstProcess> for Process {
    fn from(ast: AstProcess) -> Self {
        Process::from(&ast)
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        with_headroom(|| self.fmt_node(f))
    }
}
