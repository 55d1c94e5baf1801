//! Collection store: the authoritative keyed set of programmes
//!
//! Entries live behind an `Arc` and are copied on write, so a [`Snapshot`]
//! taken before a mutation keeps seeing the entries as they were.

use std::collections::HashMap;
use std::sync::Arc;

use crate::programme::Programme;

/// Mapping from programme id to programme. Order is not significant.
#[derive(Debug, Clone, Default)]
pub struct CollectionStore {
    entries: Arc<HashMap<i64, Programme>>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite by `programme.id`
    pub fn put(&mut self, programme: Programme) {
        Arc::make_mut(&mut self.entries).insert(programme.id, programme);
    }

    /// Remove `id` if present. Absent ids are a no-op.
    pub fn delete(&mut self, id: i64) -> Option<Programme> {
        if !self.entries.contains_key(&id) {
            return None;
        }
        Arc::make_mut(&mut self.entries).remove(&id)
    }

    /// Re-key on id edit: drop `old_id` when it differs, then put
    pub fn replace(&mut self, old_id: i64, programme: Programme) {
        if old_id != programme.id {
            self.delete(old_id);
        }
        self.put(programme);
    }

    pub fn get(&self, id: i64) -> Option<&Programme> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Point-in-time view of all entities
    pub fn values(&self) -> Snapshot {
        Snapshot {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl FromIterator<Programme> for CollectionStore {
    fn from_iter<I: IntoIterator<Item = Programme>>(iter: I) -> Self {
        let entries = iter.into_iter().map(|p| (p.id, p)).collect();
        Self {
            entries: Arc::new(entries),
        }
    }
}

/// Immutable view of the store contents at the time [`CollectionStore::values`] was called
#[derive(Debug, Clone)]
pub struct Snapshot {
    entries: Arc<HashMap<i64, Programme>>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entities ordered by id, the persisted form of the collection
    pub fn to_sorted_vec(&self) -> Vec<Programme> {
        let mut all: Vec<Programme> = self.entries.values().cloned().collect();
        all.sort_by_key(|p| p.id);
        all
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Programme;
    type IntoIter = std::collections::hash_map::Values<'a, i64, Programme>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn programme(id: i64, name: &str) -> Programme {
        Programme {
            id,
            slug: String::new(),
            name: name.to_string(),
            description: "d".to_string(),
            active: true,
            image_url: None,
        }
    }

    fn ids(store: &CollectionStore) -> Vec<i64> {
        store.values().to_sorted_vec().iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_put_overwrites_by_id() {
        let mut store = CollectionStore::new();
        store.put(programme(1, "A"));
        store.put(programme(1, "B"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().name, "B");
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut store: CollectionStore =
            [programme(5, "A"), programme(7, "B")].into_iter().collect();

        assert!(store.delete(7).is_some());
        assert_eq!(ids(&store), vec![5]);

        assert!(store.delete(7).is_none());
        assert_eq!(ids(&store), vec![5]);
    }

    #[test]
    fn test_replace_rekeys() {
        let mut store: CollectionStore = [programme(5, "A")].into_iter().collect();
        store.replace(5, programme(6, "A2"));
        assert_eq!(ids(&store), vec![6]);
        assert_eq!(store.get(6).unwrap().name, "A2");
    }

    #[test]
    fn test_replace_same_id_overwrites() {
        let mut store: CollectionStore = [programme(5, "A")].into_iter().collect();
        store.replace(5, programme(5, "A2"));
        assert_eq!(ids(&store), vec![5]);
        assert_eq!(store.get(5).unwrap().name, "A2");
    }

    #[test]
    fn test_snapshot_unaffected_by_later_mutation() {
        let mut store: CollectionStore =
            [programme(1, "A"), programme(2, "B")].into_iter().collect();
        let before = store.values();

        store.delete(1);
        store.put(programme(3, "C"));
        store.replace(2, programme(2, "B2"));

        let names: Vec<String> = before.to_sorted_vec().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["A", "B"]);

        assert_eq!(ids(&store), vec![2, 3]);
    }
}
