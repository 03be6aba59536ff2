use std::sync::{Arc, Mutex};

use super::{poisoned, HistoryEntry, HistoryError, HistoryStore, NewHistoryEntry};

#[derive(Debug, Default)]
struct Inner {
    entries: Vec<HistoryEntry>,
    next_id: u64,
}

/// Process-local history. Clones share the same underlying list.
#[derive(Debug, Default, Clone)]
pub struct InMemoryHistoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl HistoryStore for InMemoryHistoryStore {
    fn append(&self, entry: NewHistoryEntry) -> Result<HistoryEntry, HistoryError> {
        let mut guard = self.inner.lock().map_err(|_| poisoned())?;
        guard.next_id += 1;
        let stored = HistoryEntry::from_new(guard.next_id, entry);
        guard.entries.push(stored.clone());
        Ok(stored)
    }

    fn list_all(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let guard = self.inner.lock().map_err(|_| poisoned())?;
        Ok(guard.entries.iter().rev().cloned().collect())
    }

    fn count(&self) -> Result<usize, HistoryError> {
        let guard = self.inner.lock().map_err(|_| poisoned())?;
        Ok(guard.entries.len())
    }

    fn clear(&self) -> Result<usize, HistoryError> {
        let mut guard = self.inner.lock().map_err(|_| poisoned())?;
        let previous = guard.entries.len();
        guard.entries.clear();
        Ok(previous)
    }
}
