//! # Live listener sequences, keyed by event name.
//!
//! [`Registry`] is the state behind an emitter's lock. It never runs user code:
//! handlers are only invoked by the emitter after the lock is released.
//!
//! ## Rules
//! - Sequence order is registration order; entries are removed in place
//!   (`Vec::remove`), never swapped, so order survives removals.
//! - An event with no listeners has no key; empty sequences are dropped.
//! - Every removal path marks the entry removed and hands it back to the caller,
//!   so entries are dropped after the lock is released.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use crate::config::Config;
use crate::listeners::{Listener, ListenerId};

type Sequence<A, K> = Vec<Arc<Listener<A, K>>>;

pub(crate) struct Registry<A, K> {
    events: HashMap<K, Sequence<A, K>>,
    last_id: u64,
    reservation: Option<usize>,
}

impl<A, K> Registry<A, K>
where
    K: Eq + Hash + Clone,
{
    pub(crate) fn new(cfg: &Config) -> Self {
        Self {
            events: HashMap::with_capacity(cfg.event_capacity),
            last_id: 0,
            reservation: cfg.listener_reservation(),
        }
    }

    /// Hands out the next listener id (1-based, monotonic).
    pub(crate) fn next_id(&mut self) -> ListenerId {
        self.last_id += 1;
        ListenerId::new(self.last_id)
    }

    /// Appends the entry to the end of its event's sequence.
    pub(crate) fn insert(&mut self, listener: Arc<Listener<A, K>>) {
        let reservation = self.reservation;
        self.events
            .entry(listener.event().clone())
            .or_insert_with(|| match reservation {
                Some(n) => Vec::with_capacity(n),
                None => Vec::new(),
            })
            .push(listener);
    }

    /// Ordered copy of the entries currently registered for `event`.
    pub(crate) fn snapshot<Q>(&self, event: &Q) -> Option<Sequence<A, K>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.events
            .get(event)
            .filter(|seq| !seq.is_empty())
            .cloned()
    }

    /// Removes a single entry. Returns it if it was still registered.
    pub(crate) fn detach(&mut self, event: &K, id: ListenerId) -> Option<Arc<Listener<A, K>>> {
        let seq = self.events.get_mut(event)?;
        let pos = seq.iter().position(|l| l.id() == id)?;
        let listener = seq.remove(pos);
        listener.mark_removed();
        if seq.is_empty() {
            self.events.remove(event);
        }
        Some(listener)
    }

    /// Removes every entry of `event`.
    pub(crate) fn remove_event<Q>(&mut self, event: &Q) -> Sequence<A, K>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.events.remove(event).unwrap_or_default();
        for listener in &removed {
            listener.mark_removed();
        }
        removed
    }

    /// Removes every entry of every event.
    pub(crate) fn clear(&mut self) -> Sequence<A, K> {
        let removed: Sequence<A, K> = self.events.drain().flat_map(|(_, seq)| seq).collect();
        for listener in &removed {
            listener.mark_removed();
        }
        removed
    }

    pub(crate) fn contains(&self, event: &K, id: ListenerId) -> bool {
        self.events
            .get(event)
            .is_some_and(|seq| seq.iter().any(|l| l.id() == id))
    }

    pub(crate) fn count<Q>(&self, event: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.events.get(event).map_or(0, Vec::len)
    }

    pub(crate) fn len(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }

    pub(crate) fn event_names(&self) -> Vec<K> {
        self.events.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::ListenerFn;

    fn registry() -> Registry<(), String> {
        Registry::new(&Config::default())
    }

    fn add(reg: &mut Registry<(), String>, event: &str) -> Arc<Listener<(), String>> {
        let id = reg.next_id();
        let l = Arc::new(Listener::new(
            id,
            event.to_string(),
            false,
            ListenerFn::Plain(Box::new(|_| Ok(()))),
        ));
        reg.insert(l.clone());
        l
    }

    fn ids(seq: &[Arc<Listener<(), String>>]) -> Vec<u64> {
        seq.iter().map(|l| l.id().get()).collect()
    }

    #[test]
    fn test_ids_are_monotonic_from_one() {
        let mut reg = registry();
        assert_eq!(reg.next_id().get(), 1);
        assert_eq!(reg.next_id().get(), 2);
    }

    #[test]
    fn test_snapshot_keeps_insertion_order() {
        let mut reg = registry();
        add(&mut reg, "a");
        add(&mut reg, "b");
        add(&mut reg, "a");

        let snap = reg.snapshot("a").unwrap_or_default();
        assert_eq!(ids(&snap), vec![1, 3]);
        assert!(reg.snapshot("missing").is_none());
    }

    #[test]
    fn test_detach_preserves_order_and_marks_removed() {
        let mut reg = registry();
        add(&mut reg, "a");
        let middle = add(&mut reg, "a");
        add(&mut reg, "a");

        let removed = reg.detach(&"a".to_string(), middle.id());
        assert!(removed.is_some());
        assert!(!middle.is_connected());
        assert_eq!(ids(&reg.snapshot("a").unwrap_or_default()), vec![1, 3]);

        assert!(reg.detach(&"a".to_string(), middle.id()).is_none());
    }

    #[test]
    fn test_detaching_last_entry_drops_the_key() {
        let mut reg = registry();
        let only = add(&mut reg, "a");
        reg.detach(&"a".to_string(), only.id());

        assert!(reg.event_names().is_empty());
        assert_eq!(reg.count("a"), 0);
    }

    #[test]
    fn test_remove_event_marks_every_entry() {
        let mut reg = registry();
        let l1 = add(&mut reg, "a");
        let l2 = add(&mut reg, "a");
        let other = add(&mut reg, "b");

        let removed = reg.remove_event("a");
        assert_eq!(removed.len(), 2);
        assert!(!l1.is_connected());
        assert!(!l2.is_connected());
        assert!(other.is_connected());
        assert_eq!(reg.len(), 1);

        assert!(reg.remove_event("a").is_empty());
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut reg = registry();
        let l1 = add(&mut reg, "a");
        let l2 = add(&mut reg, "b");

        assert_eq!(reg.clear().len(), 2);
        assert!(!l1.is_connected());
        assert!(!l2.is_connected());
        assert_eq!(reg.len(), 0);
    }

    #[test]
    fn test_contains_and_counts() {
        let mut reg = registry();
        let l1 = add(&mut reg, "a");
        add(&mut reg, "a");
        add(&mut reg, "b");

        assert!(reg.contains(&"a".to_string(), l1.id()));
        assert!(!reg.contains(&"b".to_string(), l1.id()));
        assert_eq!(reg.count("a"), 2);
        assert_eq!(reg.len(), 3);

        let mut names = reg.event_names();
        names.sort();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    }
}
