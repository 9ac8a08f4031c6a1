//! Stack headroom for walks that recurse once per nesting level.
//!
//! A term is only bounded by the length of its source, so the parser, the
//! lowering, rendering and the inline checker all go through
//! [`with_headroom`]. When the current stack runs low it continues on a fresh
//! heap-allocated segment instead of overflowing.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

const RED_ZONE: usize = 128 * 1024;
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

pub(crate) fn with_headroom<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// Polls the wrapped future through [`with_headroom`].
///
/// Nested boxed futures poll each other recursively, one frame per level.
pub(crate) struct Headroom<F>(pub(crate) F);

impl<F: Future + Unpin> Future for Headroom<F> {
    type Output = F::Output;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let inner = &mut self.0;
        with_headroom(|| Pin::new(inner).poll(cx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depth(n: usize) -> usize {
        with_headroom(|| if n == 0 { 0 } else { 1 + depth(n - 1) })
    }

    #[test]
    fn test_recursion_deeper_than_thread_stack() {
        let handle = std::thread::Builder::new()
            .stack_size(256 * 1024)
            .spawn(|| depth(200_000))
            .unwrap();
        assert_eq!(handle.join().unwrap(), 200_000);
    }

    #[tokio::test]
    async fn test_headroom_future_passes_output_through() {
        let future = Box::pin(async { 7 });
        assert_eq!(Headroom(future).await, 7);
    }
}
