//! # Composable emit entry point.
//!
//! [`Emit`] is the seam for cross-cutting concerns around dispatch (logging,
//! depth tracking, metrics). Decorators wrap another `Emit` and forward to it
//! instead of reaching into the registry.
//!
//! ```text
//! caller ──► Traced::emit ──► Emitter::emit ──► listeners
//!              (span, depth)     (snapshot + dispatch)
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use crate::emitter::Emitter;
use crate::error::EmitError;

/// Something events of payload `A` can be emitted through.
///
/// ## Example: counting decorator
/// ```rust
/// use std::borrow::Borrow;
/// use std::fmt;
/// use std::hash::Hash;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use reemit::{Emit, EmitError, Emitter};
///
/// struct Counted<E> {
///     inner: E,
///     calls: AtomicUsize,
/// }
///
/// impl<A, E: Emit<A>> Emit<A> for Counted<E> {
///     type Event = E::Event;
///
///     fn emit<Q>(&self, event: &Q, args: &A) -> Result<(), EmitError>
///     where
///         Self::Event: Borrow<Q>,
///         Q: Hash + Eq + fmt::Debug + ?Sized,
///     {
///         self.calls.fetch_add(1, Ordering::Relaxed);
///         self.inner.emit(event, args)
///     }
/// }
///
/// let em: Emitter<()> = Emitter::new();
/// let counted = Counted { inner: em, calls: AtomicUsize::new(0) };
/// Emit::emit(&counted, "nobody-listens", &()).unwrap();
/// assert_eq!(counted.calls.load(Ordering::Relaxed), 1);
/// ```
pub trait Emit<A> {
    /// Event name type.
    type Event: Eq + Hash;

    /// Dispatches `args` to the listeners of `event`.
    fn emit<Q>(&self, event: &Q, args: &A) -> Result<(), EmitError>
    where
        Self::Event: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized;
}

impl<A, K> Emit<A> for Emitter<A, K>
where
    K: Eq + Hash + Clone,
{
    type Event = K;

    fn emit<Q>(&self, event: &Q, args: &A) -> Result<(), EmitError>
    where
        Self::Event: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        Emitter::emit(self, event, args)
    }
}

impl<A, E> Emit<A> for &E
where
    E: Emit<A> + ?Sized,
{
    type Event = E::Event;

    fn emit<Q>(&self, event: &Q, args: &A) -> Result<(), EmitError>
    where
        Self::Event: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        (**self).emit(event, args)
    }
}
