//! # Emitter: the event registry and its dispatch loop.
//!
//! [`Emitter`] binds event names to ordered sequences of listeners and
//! dispatches payloads to them synchronously, on the caller's thread.
//!
//! ## Dispatch pass
//! ```text
//! emit(event, args)
//!   ├─► lock ─► snapshot = live sequence (clone of Arc entries) ─► unlock
//!   │            (absent / empty → return Ok)
//!   └─► for entry in snapshot:
//!         ├─ once:       lock ─► detach from live sequence ─► unlock
//!         │              (already gone → skip)
//!         ├─ persistent: entry removed since snapshot? → skip
//!         └─ invoke handler (no lock held)
//!              ├─ Ok  ─► next entry
//!              └─ Err ─► return EmitError (rest of the pass is not invoked)
//! ```
//!
//! ## Rules
//! - Entries added during a pass are not part of its snapshot; they fire from
//!   the next emit on.
//! - Entries removed during a pass (by `off_all`, `clear`, a subscription, or a
//!   once-detach in a nested pass) are skipped if their turn has not come yet.
//! - A once entry is detached *before* its handler runs, so the handler already
//!   observes the registry without it.
//! - Nested emits take their own snapshot and complete before the outer pass
//!   resumes.
//! - The lock is never held while user code runs: handlers may call any
//!   emitter method, including `emit`, without deadlocking.

mod registry;

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::config::Config;
use crate::error::{EmitError, ListenerError};
use crate::listeners::{Listener, ListenerFn};
use crate::subscription::Subscription;

use registry::Registry;

/// State shared by all clones of an emitter.
pub(crate) struct Shared<A, K> {
    registry: Mutex<Registry<A, K>>,
    config: Config,
}

impl<A, K> Shared<A, K> {
    /// Locks the registry.
    ///
    /// No user code runs under this lock, so a poisoned lock still guards a
    /// consistent registry and is recovered.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Registry<A, K>> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Synchronous event emitter.
///
/// Cloning is cheap and every clone refers to the same registry, which is how
/// listeners get hold of the emitter they are registered on.
///
/// - `A`: payload passed by reference to every listener (use a tuple or struct
///   for several arguments).
/// - `K`: event name, `String` by default. Methods taking a name accept any
///   borrowed form (`&str` for `String`).
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use reemit::Emitter;
///
/// let em: Emitter<usize> = Emitter::new();
/// let total = Arc::new(AtomicUsize::new(0));
///
/// let t = total.clone();
/// em.on("add", move |n| {
///     t.fetch_add(*n, Ordering::SeqCst);
///     Ok(())
/// });
/// let t = total.clone();
/// em.once("add", move |n| {
///     t.fetch_add(*n * 100, Ordering::SeqCst);
///     Ok(())
/// });
///
/// em.emit("add", &1).unwrap();
/// em.emit("add", &1).unwrap();
/// assert_eq!(total.load(Ordering::SeqCst), 102);
/// assert_eq!(em.listener_count("add"), 1);
/// ```
///
/// ## Reference cycles
/// A listener that captures a clone of its own emitter keeps the registry
/// alive. Capture a [`WeakEmitter`] instead, or call [`Emitter::clear`] when
/// the emitter is no longer needed.
pub struct Emitter<A, K = String> {
    shared: Arc<Shared<A, K>>,
}

impl<A, K> Clone for Emitter<A, K> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<A, K> Emitter<A, K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty emitter with [`Config::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty emitter with the given configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            shared: Arc::new(Shared {
                registry: Mutex::new(Registry::new(&config)),
                config,
            }),
        }
    }

    /// Configuration this emitter was created with.
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    /// Registers a persistent listener at the end of `event`'s sequence.
    ///
    /// The same handler may be registered any number of times; each
    /// registration is a separate entry and is invoked separately.
    pub fn on<F>(&self, event: impl Into<K>, handler: F) -> Subscription<A, K>
    where
        F: Fn(&A) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.register(event.into(), false, ListenerFn::Plain(Box::new(handler)))
    }

    /// Registers a listener that is removed right before its first invocation.
    pub fn once<F>(&self, event: impl Into<K>, handler: F) -> Subscription<A, K>
    where
        F: Fn(&A) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.register(event.into(), true, ListenerFn::Plain(Box::new(handler)))
    }

    /// Registers a persistent listener that also receives its own [`Subscription`].
    ///
    /// ## Example
    /// ```rust
    /// use reemit::Emitter;
    ///
    /// let em: Emitter<u32> = Emitter::new();
    /// // Stays registered until it sees a value above 10.
    /// em.on_extended("level", |n, sub| {
    ///     if *n > 10 {
    ///         sub.disconnect();
    ///     }
    ///     Ok(())
    /// });
    ///
    /// em.emit("level", &3).unwrap();
    /// assert!(em.has_listeners("level"));
    /// em.emit("level", &11).unwrap();
    /// assert!(!em.has_listeners("level"));
    /// ```
    pub fn on_extended<F>(&self, event: impl Into<K>, handler: F) -> Subscription<A, K>
    where
        F: Fn(&A, &Subscription<A, K>) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.register(event.into(), false, ListenerFn::Extended(Box::new(handler)))
    }

    /// Re-emits every payload of `event` as `target_event` on `target`.
    ///
    /// `target` is held weakly. Once it has been dropped, the forwarding entry
    /// disconnects itself the next time it is invoked. Failures of the target's
    /// listeners surface as [`ListenerError::Nested`].
    pub fn forward(
        &self,
        event: impl Into<K>,
        target: &Emitter<A, K>,
        target_event: impl Into<K>,
    ) -> Subscription<A, K>
    where
        A: 'static,
        K: fmt::Debug + Send + Sync + 'static,
    {
        let target = target.downgrade();
        let target_event = target_event.into();
        self.on_extended(event, move |args, subscription| match target.upgrade() {
            Some(target) => target.emit(&target_event, args).map_err(ListenerError::from),
            None => {
                subscription.disconnect();
                Ok(())
            }
        })
    }

    /// Removes every listener of `event`.
    ///
    /// A pass already dispatching `event` skips the removed entries whose turn
    /// has not come yet. Unknown events are a no-op.
    pub fn off_all<Q>(&self, event: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        // Dropped outside the lock: handlers may own guards that call back in.
        let removed = self.shared.lock().remove_event(event);
        drop(removed);
    }

    /// Removes every listener of every event.
    pub fn clear(&self) {
        let removed = self.shared.lock().clear();
        drop(removed);
    }

    /// Removes the entry behind `subscription`.
    ///
    /// Returns `true` if it was registered on this emitter and has now been
    /// removed. Subscriptions of other emitters are left untouched.
    pub fn disconnect(&self, subscription: &Subscription<A, K>) -> bool {
        if !subscription.belongs_to(&self.shared) {
            return false;
        }
        subscription.disconnect()
    }

    /// Whether the entry behind `subscription` is registered on this emitter.
    pub fn is_connected(&self, subscription: &Subscription<A, K>) -> bool {
        subscription.belongs_to(&self.shared) && subscription.is_connected()
    }

    /// Dispatches `args` to the listeners of `event`.
    ///
    /// Returns once every eligible listener of the pass has run, or at the
    /// first listener failure. Emitting an event without listeners is a no-op.
    ///
    /// ## Example
    /// ```rust
    /// use std::sync::{Arc, Mutex};
    /// use reemit::Emitter;
    ///
    /// let em: Emitter<&'static str> = Emitter::new();
    /// let log = Arc::new(Mutex::new(Vec::new()));
    ///
    /// let (e, l) = (em.downgrade(), log.clone());
    /// em.on("msg", move |m| {
    ///     l.lock().unwrap().push(format!("first {m}"));
    ///     // Added mid-pass: not part of this pass.
    ///     if let Some(em) = e.upgrade() {
    ///         let l = l.clone();
    ///         em.once("msg", move |m| {
    ///             l.lock().unwrap().push(format!("late {m}"));
    ///             Ok(())
    ///         });
    ///     }
    ///     Ok(())
    /// });
    ///
    /// em.emit("msg", &"a").unwrap();
    /// assert_eq!(*log.lock().unwrap(), vec!["first a"]);
    ///
    /// em.emit("msg", &"b").unwrap();
    /// assert_eq!(*log.lock().unwrap(), vec!["first a", "first b", "late b"]);
    /// ```
    pub fn emit<Q>(&self, event: &Q, args: &A) -> Result<(), EmitError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        let Some(snapshot) = self.shared.lock().snapshot(event) else {
            return Ok(());
        };

        for listener in &snapshot {
            if listener.is_once() {
                let detached = self.shared.lock().detach(listener.event(), listener.id());
                if detached.is_none() {
                    continue;
                }
            } else if !listener.is_connected() {
                continue;
            }

            self.invoke(listener, args)
                .map_err(|source| EmitError::ListenerFailed {
                    event: format!("{event:?}"),
                    listener: listener.id(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Number of listeners currently registered for `event`.
    pub fn listener_count<Q>(&self, event: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.shared.lock().count(event)
    }

    /// Whether `event` has at least one listener.
    pub fn has_listeners<Q>(&self, event: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.listener_count(event) > 0
    }

    /// Number of listeners across all events.
    pub fn len(&self) -> usize {
        self.shared.lock().len()
    }

    /// True if no event has listeners.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of the events that currently have listeners, in no particular order.
    pub fn event_names(&self) -> Vec<K> {
        self.shared.lock().event_names()
    }

    /// Creates a handle that does not keep the registry alive.
    pub fn downgrade(&self) -> WeakEmitter<A, K> {
        WeakEmitter {
            shared: Arc::downgrade(&self.shared),
        }
    }

    fn register(&self, event: K, once: bool, handler: ListenerFn<A, K>) -> Subscription<A, K> {
        let mut registry = self.shared.lock();
        let id = registry.next_id();
        registry.insert(Arc::new(Listener::new(id, event.clone(), once, handler)));
        drop(registry);

        Subscription::new(Arc::downgrade(&self.shared), event, id)
    }

    fn invoke(&self, listener: &Listener<A, K>, args: &A) -> Result<(), ListenerError> {
        listener.call(args, || {
            Subscription::new(
                Arc::downgrade(&self.shared),
                listener.event().clone(),
                listener.id(),
            )
        })
    }
}

impl<A, K> Default for Emitter<A, K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A, K> fmt::Debug for Emitter<A, K>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("events", &self.event_names())
            .field("listeners", &self.len())
            .finish()
    }
}

/// Non-owning handle to an [`Emitter`].
pub struct WeakEmitter<A, K = String> {
    shared: Weak<Shared<A, K>>,
}

impl<A, K> WeakEmitter<A, K> {
    /// Returns the emitter if it is still alive.
    pub fn upgrade(&self) -> Option<Emitter<A, K>> {
        self.shared.upgrade().map(|shared| Emitter { shared })
    }
}

impl<A, K> Clone for WeakEmitter<A, K> {
    fn clone(&self) -> Self {
        Self {
            shared: Weak::clone(&self.shared),
        }
    }
}

impl<A, K> fmt::Debug for WeakEmitter<A, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakEmitter")
            .field("alive", &(self.shared.strong_count() > 0))
            .finish()
    }
}
