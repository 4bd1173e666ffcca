//! # Tracing decorator for emit.
//!
//! [`Traced`] wraps any [`Emit`] implementation and records every dispatch
//! through the `tracing` crate, together with the current nesting depth.
//!
//! ## Output
//! ```text
//! DEBUG emit{event="foo" depth=1}: dispatch started
//! DEBUG emit{event="foo" depth=1}:emit{event="foo" depth=2}: dispatch started
//! DEBUG emit{event="foo" depth=1}:emit{event="foo" depth=2}: dispatch finished
//! DEBUG emit{event="foo" depth=1}: dispatch finished
//! WARN  emit{event="bar" depth=1}: dispatch failed label="emit_listener_failed" ...
//! ```
//!
//! ## Rules
//! - Depth counts emits entered through this decorator (or its clones) that
//!   have not returned yet. Listeners must emit through a clone of the
//!   decorator for nested passes to be counted.
//! - Depth is restored on return, on error and on unwind.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::emit::Emit;
use crate::error::EmitError;

/// Emit decorator that records dispatches with `tracing`.
///
/// ## Example
/// ```rust
/// use reemit::{Emit, Emitter, Traced};
///
/// let em: Emitter<u8> = Emitter::new();
/// let traced = Traced::new(em.clone());
///
/// let t = traced.clone();
/// em.on("probe", move |_| {
///     assert_eq!(t.depth(), 1);
///     Ok(())
/// });
///
/// traced.emit("probe", &0).unwrap();
/// assert_eq!(traced.depth(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Traced<E> {
    inner: E,
    depth: Arc<AtomicUsize>,
}

impl<E> Traced<E> {
    /// Wraps `inner`, starting at depth 0.
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            depth: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of emits currently in progress through this decorator.
    pub fn depth(&self) -> usize {
        self.depth.load(Ordering::Acquire)
    }

    /// The wrapped emitter.
    pub fn inner(&self) -> &E {
        &self.inner
    }

    /// Unwraps the decorator.
    pub fn into_inner(self) -> E {
        self.inner
    }
}

/// Decrements the depth when dropped.
struct DepthGuard<'a>(&'a AtomicUsize);

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl<A, E> Emit<A> for Traced<E>
where
    E: Emit<A>,
{
    type Event = E::Event;

    fn emit<Q>(&self, event: &Q, args: &A) -> Result<(), EmitError>
    where
        Self::Event: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        let depth = self.depth.fetch_add(1, Ordering::AcqRel) + 1;
        let _guard = DepthGuard(&self.depth);

        let span = tracing::debug_span!("emit", event = ?event, depth);
        let _enter = span.enter();

        tracing::debug!("dispatch started");
        let result = self.inner.emit(event, args);
        match &result {
            Ok(()) => tracing::debug!("dispatch finished"),
            Err(err) => tracing::warn!(
                label = err.as_label(),
                listener = %err.listener(),
                error = %err,
                "dispatch failed"
            ),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::{Emitter, ListenerError};

    #[test]
    fn test_depth_tracks_nested_emits() {
        let em: Emitter<u32> = Emitter::new();
        let traced = Traced::new(em.clone());
        let depths = Arc::new(Mutex::new(Vec::new()));

        let (t, d) = (traced.clone(), depths.clone());
        em.on("foo", move |n| {
            d.lock().unwrap().push(t.depth());
            if *n > 0 {
                t.emit("foo", &(n - 1))?;
            }
            Ok(())
        });

        traced.emit("foo", &2).unwrap();
        assert_eq!(*depths.lock().unwrap(), vec![1, 2, 3]);
        assert_eq!(traced.depth(), 0);
        em.clear();
    }

    #[test]
    fn test_depth_restored_after_failure() {
        let em: Emitter<()> = Emitter::new();
        em.on("bad", |_| Err(ListenerError::fail("boom")));
        let traced = Traced::new(em);

        let err = traced.emit("bad", &()).unwrap_err();
        assert_eq!(err.as_label(), "emit_listener_failed");
        assert_eq!(traced.depth(), 0);
    }

    #[test]
    fn test_depth_restored_after_panic() {
        let em: Emitter<()> = Emitter::new();
        em.on("panics", |_| panic!("listener panicked"));
        let traced = Traced::new(em.clone());

        let t = traced.clone();
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            t.emit("panics", &())
        }));
        assert!(res.is_err());
        assert_eq!(traced.depth(), 0);

        // Registry stays usable after the unwind.
        em.off_all("panics");
        assert!(em.is_empty());
    }

    #[test]
    fn test_wraps_borrowed_emitter() {
        let em: Emitter<()> = Emitter::new();
        let traced = Traced::new(&em);
        traced.emit("nothing", &()).unwrap();
        assert!(std::ptr::eq(*traced.inner(), &em));
        assert_eq!(traced.into_inner().len(), 0);
    }
}
