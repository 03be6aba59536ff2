use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{poisoned, HistoryEntry, HistoryError, HistoryStore, NewHistoryEntry};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Persisted {
    #[serde(default)]
    next_id: u64,
    entries: Vec<HistoryEntry>,
}

/// History persisted as a single JSON document, rewritten after every mutation.
#[derive(Debug)]
pub struct JsonFileHistoryStore {
    path: PathBuf,
    state: Mutex<Persisted>,
}

impl JsonFileHistoryStore {
    /// Opens the document at `path`, creating it (and parent directories) if missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut persisted = if path.exists() {
            let bytes = fs::read(&path)?;
            serde_json::from_slice::<Persisted>(&bytes)?
        } else {
            let persisted = Persisted::default();
            write_document(&path, &persisted)?;
            persisted
        };

        let highest = persisted
            .entries
            .iter()
            .map(|entry| entry.id)
            .max()
            .unwrap_or(0);
        persisted.next_id = persisted.next_id.max(highest);

        debug!(path = %path.display(), entries = persisted.entries.len(), "opened history file");

        Ok(Self {
            path,
            state: Mutex::new(persisted),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonFileHistoryStore {
    fn append(&self, entry: NewHistoryEntry) -> Result<HistoryEntry, HistoryError> {
        let mut guard = self.state.lock().map_err(|_| poisoned())?;
        let id = guard.next_id + 1;
        let stored = HistoryEntry::from_new(id, entry);
        guard.entries.push(stored.clone());
        guard.next_id = id;

        if let Err(err) = write_document(&self.path, &guard) {
            guard.entries.pop();
            guard.next_id = id - 1;
            return Err(err);
        }
        Ok(stored)
    }

    fn list_all(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let guard = self.state.lock().map_err(|_| poisoned())?;
        Ok(guard.entries.iter().rev().cloned().collect())
    }

    fn count(&self) -> Result<usize, HistoryError> {
        let guard = self.state.lock().map_err(|_| poisoned())?;
        Ok(guard.entries.len())
    }

    fn clear(&self) -> Result<usize, HistoryError> {
        let mut guard = self.state.lock().map_err(|_| poisoned())?;
        let previous = std::mem::take(&mut guard.entries);
        if let Err(err) = write_document(&self.path, &guard) {
            guard.entries = previous;
            return Err(err);
        }
        Ok(previous.len())
    }
}

// Write to a sibling file and rename so readers never see a half-written document.
fn write_document(path: &Path, persisted: &Persisted) -> Result<(), HistoryError> {
    let bytes = serde_json::to_vec_pretty(persisted)?;
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, bytes)?;
    fs::rename(&staging, path)?;
    Ok(())
}
