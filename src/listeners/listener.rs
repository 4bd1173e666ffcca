use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::ListenerError;
use crate::subscription::Subscription;

use super::ListenerId;

/// Callable stored in a listener entry.
///
/// `Extended` handlers also receive the [`Subscription`] of their own entry.
pub(crate) enum ListenerFn<A, K> {
    Plain(Box<dyn Fn(&A) -> Result<(), ListenerError> + Send + Sync>),
    Extended(Box<dyn Fn(&A, &Subscription<A, K>) -> Result<(), ListenerError> + Send + Sync>),
}

/// One registration of a handler for one event.
///
/// Entries are shared (`Arc`) between the live sequence and any dispatch
/// snapshots that captured them. `connected` is cleared by every removal path
/// while the registry lock is held; a snapshot consults it before invoking.
pub(crate) struct Listener<A, K> {
    id: ListenerId,
    event: K,
    once: bool,
    connected: AtomicBool,
    handler: ListenerFn<A, K>,
}

impl<A, K> Listener<A, K> {
    pub(crate) fn new(id: ListenerId, event: K, once: bool, handler: ListenerFn<A, K>) -> Self {
        Self {
            id,
            event,
            once,
            connected: AtomicBool::new(true),
            handler,
        }
    }

    #[inline]
    pub(crate) fn id(&self) -> ListenerId {
        self.id
    }

    #[inline]
    pub(crate) fn event(&self) -> &K {
        &self.event
    }

    #[inline]
    pub(crate) fn is_once(&self) -> bool {
        self.once
    }

    #[inline]
    pub(crate) fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Must be called with the registry lock held, as the entry leaves its sequence.
    #[inline]
    pub(crate) fn mark_removed(&self) {
        self.connected.store(false, Ordering::Release);
    }

    /// Invokes the handler. `subscription` is only built for extended handlers.
    pub(crate) fn call<S>(&self, args: &A, subscription: S) -> Result<(), ListenerError>
    where
        S: FnOnce() -> Subscription<A, K>,
    {
        match &self.handler {
            ListenerFn::Plain(f) => f(args),
            ListenerFn::Extended(f) => f(args, &subscription()),
        }
    }
}
