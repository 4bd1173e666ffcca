use std::fmt;
use std::hash::Hash;

use super::Subscription;

/// Guard that disconnects its listener when dropped.
///
/// ## Example
/// ```rust
/// use reemit::Emitter;
///
/// let em: Emitter<()> = Emitter::new();
/// {
///     let _guard = em.on("tick", |_| Ok(())).scoped();
///     assert!(em.has_listeners("tick"));
/// }
/// assert!(!em.has_listeners("tick"));
/// ```
pub struct ScopedSubscription<A, K = String>
where
    K: Eq + Hash + Clone,
{
    inner: Subscription<A, K>,
    armed: bool,
}

impl<A, K> ScopedSubscription<A, K>
where
    K: Eq + Hash + Clone,
{
    pub(crate) fn new(inner: Subscription<A, K>) -> Self {
        Self { inner, armed: true }
    }

    /// The guarded subscription.
    pub fn subscription(&self) -> &Subscription<A, K> {
        &self.inner
    }

    /// Disarms the guard and returns the plain subscription.
    ///
    /// The listener stays registered.
    pub fn release(mut self) -> Subscription<A, K> {
        self.armed = false;
        self.inner.clone()
    }
}

impl<A, K> From<Subscription<A, K>> for ScopedSubscription<A, K>
where
    K: Eq + Hash + Clone,
{
    fn from(inner: Subscription<A, K>) -> Self {
        Self::new(inner)
    }
}

impl<A, K> Drop for ScopedSubscription<A, K>
where
    K: Eq + Hash + Clone,
{
    fn drop(&mut self) {
        if self.armed {
            self.inner.disconnect();
        }
    }
}

impl<A, K> fmt::Debug for ScopedSubscription<A, K>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedSubscription")
            .field("inner", &self.inner)
            .field("armed", &self.armed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::Emitter;

    #[test]
    fn test_guard_disconnects_on_drop() {
        let em: Emitter<()> = Emitter::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        {
            let _guard = em
                .on("a", move |_| {
                    h.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
                .scoped();
            em.emit("a", &()).unwrap();
        }
        em.emit("a", &()).unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(em.is_empty());
    }

    #[test]
    fn test_release_keeps_listener() {
        let em: Emitter<()> = Emitter::new();
        let sub = {
            let guard = em.on("a", |_| Ok(())).scoped();
            guard.release()
        };

        assert!(sub.is_connected());
        assert_eq!(em.listener_count("a"), 1);
    }

    #[test]
    fn test_guard_updates_shared_handle_state() {
        let em: Emitter<()> = Emitter::new();
        let sub = em.on("a", |_| Ok(()));
        {
            let guard: super::ScopedSubscription<(), String> = sub.clone().into();
            assert_eq!(guard.subscription().id(), sub.id());
        }
        assert!(!sub.is_connected());
    }

    #[test]
    fn test_guard_after_emitter_dropped_is_noop() {
        let em: Emitter<()> = Emitter::new();
        let guard = em.on("a", |_| Ok(())).scoped();
        drop(em);
        drop(guard);
    }

    #[test]
    fn test_guard_owned_by_listener_is_dropped_outside_the_lock() {
        // The guard lives inside a listener; removing that listener drops the
        // guard, which calls back into the emitter.
        let em: Emitter<()> = Emitter::new();
        let target = em.on("b", |_| Ok(())).scoped();
        let holder = std::sync::Mutex::new(Some(target));
        em.on("a", move |_| {
            let _ = holder.lock().map(|g| g.is_some());
            Ok(())
        });

        em.off_all("a");
        assert_eq!(em.listener_count("b"), 0);
        assert!(em.is_empty());
    }
}
