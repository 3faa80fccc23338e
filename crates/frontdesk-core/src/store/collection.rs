// ── Generic reactive entity collection ──
//
// Insertion-ordered storage with O(1) lookups by id and push-based
// change notification via `watch` channels.

use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::watch;

use crate::model::{EntityId, Identified};

/// An insertion-ordered, reactive collection for a single entity type.
///
/// Order matters: table views and queue tie-breaks fall back to the order
/// records arrived in. Every mutation rebuilds the snapshot that
/// subscribers receive.
pub(crate) struct EntityCollection<T: Identified + Clone + Send + Sync + 'static> {
    /// Primary storage: id -> entity, in insertion order.
    items: IndexMap<EntityId, Arc<T>>,

    /// Full snapshot, rebuilt on mutation for efficient subscription.
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
}

impl<T: Identified + Clone + Send + Sync + 'static> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            items: IndexMap::new(),
            snapshot,
        }
    }

    /// Insert or replace an entity. Returns `true` if the id was new.
    ///
    /// Replacing keeps the entity's original position.
    pub(crate) fn upsert(&mut self, entity: T) -> bool {
        let id = entity.id().clone();
        let is_new = self.items.insert(id, Arc::new(entity)).is_none();
        self.publish();
        is_new
    }

    /// Apply `f` to the entity with `id` in place. Returns `None` if absent.
    pub(crate) fn update<R>(&mut self, id: &EntityId, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let slot = self.items.get_mut(id)?;
        let out = f(Arc::make_mut(slot));
        self.publish();
        Some(out)
    }

    /// Remove an entity by id, preserving the order of the rest.
    pub(crate) fn remove(&mut self, id: &EntityId) -> Option<Arc<T>> {
        let removed = self.items.shift_remove(id);
        if removed.is_some() {
            self.publish();
        }
        removed
    }

    pub(crate) fn get(&self, id: &EntityId) -> Option<Arc<T>> {
        self.items.get(id).map(Arc::clone)
    }

    /// Find the first entity matching `pred`.
    pub(crate) fn find(&self, pred: impl Fn(&T) -> bool) -> Option<Arc<T>> {
        self.items.values().find(|e| pred(e)).map(Arc::clone)
    }

    pub(crate) fn contains(&self, id: &EntityId) -> bool {
        self.items.contains_key(id)
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All current ids, in order.
    pub(crate) fn ids(&self) -> Vec<EntityId> {
        self.items.keys().cloned().collect()
    }

    /// Owned copies of every entity, in order.
    pub(crate) fn to_vec(&self) -> Vec<T> {
        self.items.values().map(|e| T::clone(e)).collect()
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Rebuild the snapshot and broadcast it.
    fn publish(&self) {
        let values: Vec<Arc<T>> = self.items.values().map(Arc::clone).collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: EntityId,
        text: String,
    }

    impl Identified for Note {
        fn id(&self) -> &EntityId {
            &self.id
        }
    }

    fn note(id: &str, text: &str) -> Note {
        Note {
            id: EntityId::from(id),
            text: text.into(),
        }
    }

    #[test]
    fn upsert_returns_true_for_new_id() {
        let mut col = EntityCollection::new();
        assert!(col.upsert(note("n1", "hello")));
    }

    #[test]
    fn upsert_returns_false_for_existing_id_and_keeps_position() {
        let mut col = EntityCollection::new();
        col.upsert(note("n1", "first"));
        col.upsert(note("n2", "second"));
        assert!(!col.upsert(note("n1", "updated")));

        let snap = col.snapshot();
        assert_eq!(snap[0].text, "updated");
        assert_eq!(snap[1].text, "second");
    }

    #[test]
    fn update_mutates_in_place() {
        let mut col = EntityCollection::new();
        col.upsert(note("n1", "hello"));
        let len = col.update(&EntityId::from("n1"), |n| {
            n.text.push_str(" world");
            n.text.len()
        });
        assert_eq!(len, Some(11));
        assert_eq!(col.get(&EntityId::from("n1")).unwrap().text, "hello world");
        assert!(col.update(&EntityId::from("missing"), |_| ()).is_none());
    }

    #[test]
    fn snapshots_held_by_readers_are_not_mutated() {
        let mut col = EntityCollection::new();
        col.upsert(note("n1", "before"));
        let held = col.snapshot();
        col.update(&EntityId::from("n1"), |n| n.text = "after".into());
        assert_eq!(held[0].text, "before");
        assert_eq!(col.snapshot()[0].text, "after");
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let mut col = EntityCollection::new();
        col.upsert(note("a", "1"));
        col.upsert(note("b", "2"));
        col.upsert(note("c", "3"));

        let removed = col.remove(&EntityId::from("b"));
        assert_eq!(removed.unwrap().text, "2");
        assert_eq!(col.ids(), vec![EntityId::from("a"), EntityId::from("c")]);
        assert!(col.remove(&EntityId::from("b")).is_none());
    }

    #[test]
    fn every_mutation_reaches_subscribers() {
        let mut col = EntityCollection::new();
        let mut rx = col.subscribe();

        col.upsert(note("a", "1"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);

        col.update(&EntityId::from("a"), |n| n.text = "2".into());
        assert_eq!(rx.borrow_and_update()[0].text, "2");

        col.remove(&EntityId::from("a"));
        assert!(rx.has_changed().unwrap());
        assert!(col.is_empty());
        assert_eq!(col.len(), 0);
        assert!(rx.borrow_and_update().is_empty());
    }
}
