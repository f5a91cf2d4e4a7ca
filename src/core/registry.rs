//! # Subscriber registry - membership of one subject.
//!
//! Keeps the subscribers of a [`Subject`](crate::Subject) as non-owning
//! references, in registration order, without duplicates.
//!
//! ## Architecture
//! ```text
//! register(&Arc<S>)   ──► insert(id, Weak<dyn Subscribe>)   (no-op if present)
//! unregister(&Arc<S>) ──► remove(id)                         (no-op if absent)
//! set_value(v)        ──► snapshot() ──► Vec<Arc<dyn Subscribe>>
//!                                          └─► dead entries pruned
//! ```
//!
//! ## Rules
//! - Identity is the address of the shared allocation ([`SubscriberId`]).
//!   A live `Weak` keeps the allocation reserved, so an id is never reused
//!   while its entry exists.
//! - The registry never keeps a subscriber alive.
//! - Snapshot order is registration order.

use std::sync::{Arc, Weak};

use crate::subscribers::Subscribe;

/// Identity of a registered subscriber.
///
/// Derived from the address of the `Arc` allocation, so the same subscriber
/// seen through `Arc<S>` or `Arc<dyn Subscribe>` maps to the same id.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubscriberId(usize);

impl SubscriberId {
    /// Id of the subscriber behind `sub`.
    pub fn of<S: ?Sized>(sub: &Arc<S>) -> Self {
        SubscriberId(Arc::as_ptr(sub).cast::<()>() as usize)
    }
}

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

struct Entry {
    id: SubscriberId,
    name: &'static str,
    sub: Weak<dyn Subscribe>,
}

/// Ordered, duplicate-free set of weak subscriber references.
#[derive(Default)]
pub(crate) struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    /// Adds `sub`; returns `false` if it was already present.
    pub(crate) fn insert(&mut self, sub: &Arc<dyn Subscribe>) -> bool {
        let id = SubscriberId::of(sub);
        if self.entries.iter().any(|e| e.id == id) {
            return false;
        }
        self.entries.push(Entry {
            id,
            name: sub.name(),
            sub: Arc::downgrade(sub),
        });
        true
    }

    /// Removes the entry with `id`; returns `false` if absent.
    pub(crate) fn remove(&mut self, id: SubscriberId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// True if a live subscriber with `id` is registered.
    pub(crate) fn contains(&self, id: SubscriberId) -> bool {
        self.entries
            .iter()
            .any(|e| e.id == id && e.sub.strong_count() > 0)
    }

    /// Number of live subscribers.
    pub(crate) fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.sub.strong_count() > 0)
            .count()
    }

    /// Names of live subscribers, in registration order.
    pub(crate) fn names(&self) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|e| e.sub.strong_count() > 0)
            .map(|e| e.name)
            .collect()
    }

    /// Upgrades every live entry and drops the dead ones.
    ///
    /// The returned strong references keep each subscriber alive for the
    /// whole pass, even if its owner drops it mid-pass.
    pub(crate) fn snapshot(&mut self) -> Vec<(SubscriberId, Arc<dyn Subscribe>)> {
        let mut live = Vec::with_capacity(self.entries.len());
        self.entries.retain(|e| match e.sub.upgrade() {
            Some(sub) => {
                live.push((e.id, sub));
                true
            }
            None => {
                tracing::debug!(subscriber = e.name, id = %e.id, "pruning dropped subscriber");
                false
            }
        });
        live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscribers::{AverageSubscriber, LatestValueSubscriber};

    #[test]
    fn test_id_is_stable_across_coercion() {
        let avg = Arc::new(AverageSubscriber::new());
        let as_dyn: Arc<dyn Subscribe> = avg.clone();
        assert_eq!(SubscriberId::of(&avg), SubscriberId::of(&as_dyn));
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut reg = Registry::default();
        let sub: Arc<dyn Subscribe> = Arc::new(LatestValueSubscriber::new());

        assert!(reg.insert(&sub));
        assert!(!reg.insert(&sub));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_snapshot_keeps_registration_order_and_prunes_dead() {
        let mut reg = Registry::default();
        let a: Arc<dyn Subscribe> = Arc::new(AverageSubscriber::new());
        let b: Arc<dyn Subscribe> = Arc::new(LatestValueSubscriber::new());
        let c: Arc<dyn Subscribe> = Arc::new(AverageSubscriber::new());
        reg.insert(&a);
        reg.insert(&b);
        reg.insert(&c);

        let b_id = SubscriberId::of(&b);
        drop(b);
        assert!(!reg.contains(b_id));

        let snap: Vec<SubscriberId> = reg.snapshot().into_iter().map(|(id, _)| id).collect();
        assert_eq!(snap, vec![SubscriberId::of(&a), SubscriberId::of(&c)]);
        assert_eq!(reg.entries.len(), 2);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut reg = Registry::default();
        let sub: Arc<dyn Subscribe> = Arc::new(LatestValueSubscriber::new());
        assert!(!reg.remove(SubscriberId::of(&sub)));
        reg.insert(&sub);
        assert!(reg.remove(SubscriberId::of(&sub)));
        assert!(!reg.remove(SubscriberId::of(&sub)));
    }
}
