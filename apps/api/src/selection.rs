//! Selection Set: the candidates the user has chosen to compare.
//!
//! `toggle` is the only mutation. Every mutation bumps `generation`, which the
//! matrix uses to discard results computed for an older selection.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{RwLock, RwLockReadGuard};

#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    ids: Vec<String>,
    generation: u64,
}

impl SelectionSet {
    /// Flips membership of `id`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        self.generation += 1;
        match self.ids.iter().position(|existing| existing == id) {
            Some(index) => {
                self.ids.remove(index);
                false
            }
            None => {
                self.ids.push(id.to_string());
                true
            }
        }
    }

    /// Empties the set. Counts as a change even if it was already empty.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.ids.clear();
    }

    /// Selected ids in insertion order; used as the matrix request list.
    pub fn to_vec(&self) -> Vec<String> {
        self.ids.clone()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            ids: self.to_vec(),
            generation: self.generation,
        }
    }
}

/// Read-only copy of the selection at one generation.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SelectionSnapshot {
    pub ids: Vec<String>,
    pub generation: u64,
}

impl SelectionSnapshot {
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }
}

/// Shared handle to the process-wide selection.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    inner: Arc<RwLock<SelectionSet>>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the new membership and the resulting snapshot.
    pub async fn toggle(&self, id: &str) -> (bool, SelectionSnapshot) {
        let mut set = self.inner.write().await;
        let selected = set.toggle(id);
        (selected, set.snapshot())
    }

    pub async fn clear(&self) -> SelectionSnapshot {
        let mut set = self.inner.write().await;
        set.clear();
        set.snapshot()
    }

    pub async fn snapshot(&self) -> SelectionSnapshot {
        self.inner.read().await.snapshot()
    }

    pub async fn generation(&self) -> u64 {
        self.inner.read().await.generation()
    }

    /// Holds off every mutation until the guard is dropped.
    pub async fn read(&self) -> RwLockReadGuard<'_, SelectionSet> {
        self.inner.read().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut set = SelectionSet::default();
        assert!(set.toggle("a"));
        assert!(set.snapshot().contains("a"));
        assert!(!set.toggle("a"));
        assert!(!set.snapshot().contains("a"));
        assert!(set.to_vec().is_empty());
    }

    #[test]
    fn test_double_toggle_restores_membership() {
        let mut set = SelectionSet::default();
        set.toggle("a");
        set.toggle("b");
        let before: Vec<String> = set.to_vec();

        set.toggle("c");
        set.toggle("c");
        assert_eq!(set.to_vec(), before);

        set.toggle("a");
        set.toggle("a");
        let mut after = set.to_vec();
        after.sort();
        assert_eq!(after, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_insertion_order_and_no_duplicates() {
        let mut set = SelectionSet::default();
        set.toggle("c2");
        set.toggle("c1");
        set.toggle("c3");
        assert_eq!(set.to_vec(), vec!["c2", "c1", "c3"]);
        assert_eq!(set.to_vec().len(), 3);
    }

    #[test]
    fn test_every_mutation_bumps_generation() {
        let mut set = SelectionSet::default();
        assert_eq!(set.generation(), 0);
        set.toggle("a");
        set.toggle("a");
        assert_eq!(set.generation(), 2);
        set.clear();
        assert_eq!(set.generation(), 3);
    }

    #[tokio::test]
    async fn test_store_toggle_returns_snapshot() {
        let store = SelectionStore::new();
        let (selected, snapshot) = store.toggle("c1").await;
        assert!(selected);
        assert_eq!(snapshot.ids, vec!["c1"]);
        assert_eq!(snapshot.generation, 1);
        assert!(snapshot.contains("c1"));

        let cleared = store.clear().await;
        assert!(cleared.ids.is_empty());
        assert_eq!(store.generation().await, 2);
    }
}
