//! # Guardedness Checker
//!
//! Decides whether every recursion variable of a [`Process`] occurs beneath
//! at least one action prefix. With `X` the set of [`ExposedNames`]:
//!
//! ```text
//! G(nil, X)      = true
//! G(x, X)        = x ∉ X
//! G(a.P, X)      = G(P, ∅)
//! G(P\a, X)      = G(P, X)
//! G(P[f], X)     = G(P, X)
//! G(P + Q, X)    = G(P, X) ∧ G(Q, X)
//! G(P | Q, X)    = G(P, X) ∧ G(Q, X)
//! G(rec x. P, X) = G(P, X ∪ {x})
//! ```
//!
//! A term is guarded iff `G(P, ∅)` holds.
//!
//! ## Evaluation
//!
//! In [`EvaluationMode::Concurrent`] every visited node is checked by its own
//! tokio task which reports back over a one-shot channel. Both operands of
//! `+` and `|` run at the same time; the parent takes whichever answer comes
//! first and then waits for the other one. `X` travels down each branch as
//! its own copy. [`EvaluationMode::Inline`] combines the same branch futures
//! without spawning, and [`EvaluationMode::Sequential`] walks the tree with an
//! explicit worklist. All three give the same answer at any nesting depth.

pub mod scope;

use std::future::Future;
use std::sync::Arc;

use async_recursion::async_recursion;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, trace};

pub use scope::ExposedNames;

use crate::config::{CheckerConfig, EvaluationMode};
use crate::process::{Process, ProcessKind};
use crate::stack::Headroom;

/// Internal failures of the checker.
///
/// Neither can be caused by input text: a process built through the
/// public constructors always has its children, and a worker only goes
/// missing if it panicked or the runtime shut down under it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("a task spawned below a {kind} node ended without delivering its result")]
    WorkerLost { kind: ProcessKind },

    #[error("{kind} node has no {side} child")]
    MissingChild {
        kind: ProcessKind,
        side: &'static str,
    },
}

pub type CheckResult<T> = Result<T, CheckError>;

#[derive(Debug, Clone, Default)]
pub struct GuardednessChecker {
    config: CheckerConfig,
}

impl GuardednessChecker {
    pub fn new(config: CheckerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// `G(process, ∅)`.
    ///
    /// In concurrent mode this must be awaited inside a tokio runtime.
    pub async fn is_guarded(&self, process: Arc<Process>) -> CheckResult<bool> {
        self.is_guarded_under(process, ExposedNames::new()).await
    }

    /// `G(process, exposed)`.
    #[tracing::instrument(level = "debug", skip(self, process, exposed), fields(mode = ?self.config.evaluation, size = process.size()))]
    pub async fn is_guarded_under(
        &self,
        process: Arc<Process>,
        exposed: ExposedNames,
    ) -> CheckResult<bool> {
        let result = match self.config.evaluation {
            EvaluationMode::Concurrent => {
                let kind = process.kind();
                receive(self.spawn_check(process, exposed), kind).await
            }
            EvaluationMode::Inline => Headroom(self.check_inline(&process, exposed)).await,
            EvaluationMode::Sequential => guarded_sequential(&process, &exposed),
        };
        debug!(?result, "guardedness check finished");
        result
    }

    /// Starts a task checking `process` and returns the channel its answer
    /// arrives on.
    fn spawn_check(
        &self,
        process: Arc<Process>,
        exposed: ExposedNames,
    ) -> oneshot::Receiver<CheckResult<bool>> {
        let (tx, rx) = oneshot::channel();
        let checker = self.clone();
        tokio::spawn(async move {
            let result = checker.check_node(process, exposed).await;
            // The receiver is only gone after a short-circuited join.
            let _ = tx.send(result);
        });
        rx
    }

    async fn check_node(&self, process: Arc<Process>, exposed: ExposedNames) -> CheckResult<bool> {
        let kind = process.kind();
        trace!(%kind, name = process.name(), exposed = exposed.len(), "checking node");

        match kind {
            ProcessKind::Nil => Ok(true),
            ProcessKind::Variable => Ok(!exposed.contains(process.name())),
            ProcessKind::Prefix => {
                let child = Arc::clone(left_child(&process)?);
                receive(self.spawn_check(child, ExposedNames::new()), kind).await
            }
            ProcessKind::Restriction | ProcessKind::Relabeling => {
                let child = Arc::clone(left_child(&process)?);
                receive(self.spawn_check(child, exposed), kind).await
            }
            ProcessKind::Recursion => {
                let child = Arc::clone(left_child(&process)?);
                let extended = exposed.with(process.name());
                receive(self.spawn_check(child, extended), kind).await
            }
            ProcessKind::Sum | ProcessKind::Composition => {
                let left = self.spawn_check(Arc::clone(left_child(&process)?), exposed.clone());
                let right = self.spawn_check(Arc::clone(right_child(&process)?), exposed);
                self.join_branches(receive(left, kind), receive(right, kind))
                    .await
            }
        }
    }

    #[async_recursion]
    async fn check_inline(&self, process: &Process, exposed: ExposedNames) -> CheckResult<bool> {
        match process.kind() {
            ProcessKind::Nil => Ok(true),
            ProcessKind::Variable => Ok(!exposed.contains(process.name())),
            ProcessKind::Prefix => {
                Headroom(self.check_inline(left_child(process)?, ExposedNames::new())).await
            }
            ProcessKind::Restriction | ProcessKind::Relabeling => {
                Headroom(self.check_inline(left_child(process)?, exposed)).await
            }
            ProcessKind::Recursion => {
                let extended = exposed.with(process.name());
                Headroom(self.check_inline(left_child(process)?, extended)).await
            }
            ProcessKind::Sum | ProcessKind::Composition => {
                let left = Headroom(self.check_inline(left_child(process)?, exposed.clone()));
                let right = Headroom(self.check_inline(right_child(process)?, exposed));
                self.join_branches(left, right).await
            }
        }
    }

    /// ANDs the answers of two branches, taking them in arrival order.
    async fn join_branches<L, R>(&self, left: L, right: R) -> CheckResult<bool>
    where
        L: Future<Output = CheckResult<bool>>,
        R: Future<Output = CheckResult<bool>>,
    {
        tokio::pin!(left);
        tokio::pin!(right);

        tokio::select! {
            first = &mut left => self.combine(first?, right).await,
            first = &mut right => self.combine(first?, left).await,
        }
    }

    async fn combine<F>(&self, first: bool, other: F) -> CheckResult<bool>
    where
        F: Future<Output = CheckResult<bool>>,
    {
        if !first && self.config.short_circuit {
            trace!("short-circuiting on an unguarded branch");
            return Ok(false);
        }
        let second = other.await?;
        Ok(first && second)
    }
}

async fn receive(rx: oneshot::Receiver<CheckResult<bool>>, kind: ProcessKind) -> CheckResult<bool> {
    rx.await.unwrap_or(Err(CheckError::WorkerLost { kind }))
}

fn left_child(process: &Process) -> CheckResult<&Arc<Process>> {
    process.left().ok_or(CheckError::MissingChild {
        kind: process.kind(),
        side: "left",
    })
}

fn right_child(process: &Process) -> CheckResult<&Arc<Process>> {
    process.right().ok_or(CheckError::MissingChild {
        kind: process.kind(),
        side: "right",
    })
}

/// `G(process, exposed)` on the calling thread.
///
/// Walks the tree with an explicit worklist and stops at the first exposed
/// variable, so the answer is the conjunction over all leaves.
pub fn guarded_sequential(process: &Process, exposed: &ExposedNames) -> CheckResult<bool> {
    let mut pending = vec![(process, exposed.clone())];
    while let Some((node, exposed)) = pending.pop() {
        match node.kind() {
            ProcessKind::Nil => {}
            ProcessKind::Variable => {
                if exposed.contains(node.name()) {
                    return Ok(false);
                }
            }
            ProcessKind::Prefix => {
                pending.push((left_child(node)?.as_ref(), ExposedNames::new()));
            }
            ProcessKind::Restriction | ProcessKind::Relabeling => {
                pending.push((left_child(node)?.as_ref(), exposed));
            }
            ProcessKind::Recursion => {
                let extended = exposed.with(node.name());
                pending.push((left_child(node)?.as_ref(), extended));
            }
            ProcessKind::Sum | ProcessKind::Composition => {
                pending.push((right_child(node)?.as_ref(), exposed.clone()));
                pending.push((left_child(node)?.as_ref(), exposed));
            }
        }
    }
    Ok(true)
}

/// `G(process, ∅)` with the default, concurrent checker.
pub async fn is_guarded(process: Arc<Process>) -> CheckResult<bool> {
    GuardednessChecker::default().is_guarded(process).await
}
