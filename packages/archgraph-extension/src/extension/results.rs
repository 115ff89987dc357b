use std::sync::Arc;

use archgraph_lang::EvaluationResult;
use dashmap::DashMap;

use crate::snapshot::Snapshot;

/// Snapshot -> accumulated results
///
/// Lock-sharded map of append-only result sets. Appends to the same or
/// different snapshots may run concurrently without lost updates. A result is
/// kept once per snapshot, compared by identity.
#[derive(Debug, Default)]
pub struct ResultStore {
    results: DashMap<Snapshot, Vec<Arc<EvaluationResult>>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if `result` was already filed for `snapshot`
    pub fn append(&self, snapshot: &Snapshot, result: Arc<EvaluationResult>) -> bool {
        let mut entry = self.results.entry(snapshot.clone()).or_default();
        if entry.iter().any(|known| Arc::ptr_eq(known, &result)) {
            return false;
        }
        entry.push(result);
        true
    }

    pub fn contains(&self, snapshot: &Snapshot) -> bool {
        self.results.contains_key(snapshot)
    }

    /// Copy of the results filed for `snapshot`
    pub fn results_for(&self, snapshot: &Snapshot) -> Option<Vec<Arc<EvaluationResult>>> {
        self.results.get(snapshot).map(|entry| entry.value().clone())
    }

    pub fn take(&self, snapshot: &Snapshot) -> Option<Vec<Arc<EvaluationResult>>> {
        self.results.remove(snapshot).map(|(_, results)| results)
    }

    /// Number of snapshots with at least one result
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn clear(&self) {
        self.results.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgraph_lang::EventAggregator;

    fn result(rule: &str) -> Arc<EvaluationResult> {
        Arc::new(EvaluationResult::new(rule, EventAggregator::new()))
    }

    #[test]
    fn test_append_creates_entry_on_first_result() {
        let store = ResultStore::new();
        let snapshot = Snapshot::new("core", vec![]);
        assert!(!store.contains(&snapshot));

        store.append(&snapshot, result("r1"));
        assert!(store.contains(&snapshot));
        assert_eq!(store.results_for(&snapshot).unwrap().len(), 1);
    }

    #[test]
    fn test_same_result_is_kept_once() {
        let store = ResultStore::new();
        let snapshot = Snapshot::new("core", vec![]);
        let r1 = result("r1");

        assert!(store.append(&snapshot, Arc::clone(&r1)));
        assert!(!store.append(&snapshot, Arc::clone(&r1)));
        // Equal content, different instance
        assert!(store.append(&snapshot, result("r1")));

        assert_eq!(store.results_for(&snapshot).unwrap().len(), 2);
    }

    #[test]
    fn test_take_removes_only_that_snapshot() {
        let store = ResultStore::new();
        let first = Snapshot::new("first", vec![]);
        let second = Snapshot::new("second", vec![]);
        store.append(&first, result("r1"));
        store.append(&second, result("r2"));

        assert_eq!(store.take(&first).unwrap().len(), 1);
        assert!(store.take(&first).is_none());
        assert_eq!(store.len(), 1);

        store.clear();
        assert!(store.is_empty());
    }
}
