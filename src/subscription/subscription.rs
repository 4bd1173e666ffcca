use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Weak};

use crate::emitter::Shared;
use crate::listeners::ListenerId;

use super::ScopedSubscription;

/// Handle to one listener entry.
///
/// ## Example
/// ```rust
/// use reemit::Emitter;
///
/// let em: Emitter<()> = Emitter::new();
/// let sub = em.on("ping", |_| Ok(()));
/// let copy = sub.clone();
///
/// assert!(sub.is_connected());
/// assert!(copy.disconnect());
/// assert!(!sub.is_connected());
/// assert!(!sub.disconnect()); // already gone
/// assert_eq!(em.listener_count("ping"), 0);
/// ```
pub struct Subscription<A, K = String> {
    shared: Weak<Shared<A, K>>,
    event: K,
    id: ListenerId,
}

impl<A, K> Subscription<A, K> {
    pub(crate) fn new(shared: Weak<Shared<A, K>>, event: K, id: ListenerId) -> Self {
        Self { shared, event, id }
    }

    /// Identity of the entry.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Event the entry was registered for.
    pub fn event(&self) -> &K {
        &self.event
    }

    pub(crate) fn belongs_to(&self, shared: &Arc<Shared<A, K>>) -> bool {
        std::ptr::eq(self.shared.as_ptr(), Arc::as_ptr(shared))
    }
}

impl<A, K> Subscription<A, K>
where
    K: Eq + Hash + Clone,
{
    /// Removes the entry from its emitter.
    ///
    /// Returns `true` if the entry was still registered. If its event is being
    /// dispatched and its turn has not come yet, it is skipped.
    pub fn disconnect(&self) -> bool {
        let Some(shared) = self.shared.upgrade() else {
            return false;
        };
        let removed = shared.lock().detach(&self.event, self.id);
        removed.is_some()
    }

    /// Whether the entry is still registered.
    ///
    /// A once entry reports `false` from the moment its dispatch begins.
    pub fn is_connected(&self) -> bool {
        match self.shared.upgrade() {
            Some(shared) => shared.lock().contains(&self.event, self.id),
            None => false,
        }
    }

    /// Converts into a guard that disconnects the entry on drop.
    pub fn scoped(self) -> ScopedSubscription<A, K> {
        ScopedSubscription::new(self)
    }
}

impl<A, K: Clone> Clone for Subscription<A, K> {
    fn clone(&self) -> Self {
        Self {
            shared: Weak::clone(&self.shared),
            event: self.event.clone(),
            id: self.id,
        }
    }
}

impl<A, K: fmt::Debug> fmt::Debug for Subscription<A, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("event", &self.event)
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::Emitter;

    #[test]
    fn test_handle_outlives_emitter() {
        let em: Emitter<()> = Emitter::new();
        let sub = em.on("a", |_| Ok(()));
        drop(em);

        assert!(!sub.is_connected());
        assert!(!sub.disconnect());
    }

    #[test]
    fn test_dropping_handle_keeps_listener() {
        let em: Emitter<()> = Emitter::new();
        {
            let _sub = em.on("a", |_| Ok(()));
        }
        assert_eq!(em.listener_count("a"), 1);
    }

    #[test]
    fn test_disconnect_removes_only_its_entry() {
        let em: Emitter<()> = Emitter::new();
        let first = em.on("a", |_| Ok(()));
        let second = em.on("a", |_| Ok(()));

        assert!(first.disconnect());
        assert!(!first.is_connected());
        assert!(second.is_connected());
        assert_eq!(em.listener_count("a"), 1);
    }

    #[test]
    fn test_reports_event_and_id() {
        let em: Emitter<()> = Emitter::new();
        let first = em.on("a", |_| Ok(()));
        let second = em.once("b", |_| Ok(()));

        assert_eq!(first.event(), "a");
        assert_eq!(second.event(), "b");
        assert!(first.id() < second.id());
    }

    #[test]
    fn test_belongs_only_to_its_emitter() {
        let em: Emitter<()> = Emitter::new();
        let other: Emitter<()> = Emitter::new();
        let sub = em.on("a", |_| Ok(()));
        other.on("a", |_| Ok(()));

        assert!(!other.is_connected(&sub));
        assert!(!other.disconnect(&sub));
        assert!(em.is_connected(&sub));
        assert_eq!(other.listener_count("a"), 1);

        assert!(em.disconnect(&sub));
        assert!(!em.is_connected(&sub));
    }
}
