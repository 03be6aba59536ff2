//! Evaluation history: the record type, the storage seam, and its backends.

mod file;
mod memory;

pub use file::JsonFileHistoryStore;
pub use memory::InMemoryHistoryStore;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::evaluation::{render_summary, CriteriaGrid, MethodScore, ScoringEngine};

/// Display format for history timestamps in listings and exports.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Evaluation waiting to be stored; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHistoryEntry {
    pub recorded_at: NaiveDateTime,
    pub engine: ScoringEngine,
    pub grid: CriteriaGrid,
    pub results: Vec<MethodScore>,
}

/// Stored evaluation. `results` are in ranked order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub recorded_at: NaiveDateTime,
    pub engine: ScoringEngine,
    pub grid: CriteriaGrid,
    pub results: Vec<MethodScore>,
}

impl HistoryEntry {
    pub(crate) fn from_new(id: u64, entry: NewHistoryEntry) -> Self {
        Self {
            id,
            recorded_at: entry.recorded_at,
            engine: entry.engine,
            grid: entry.grid,
            results: entry.results,
        }
    }

    pub fn recorded_at_label(&self) -> String {
        self.recorded_at.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn summary(&self) -> String {
        render_summary(self.engine, &self.results)
    }
}

/// Storage abstraction so the service can run against any backend.
///
/// `list_all` returns the most recent entry first.
pub trait HistoryStore: Send + Sync {
    fn append(&self, entry: NewHistoryEntry) -> Result<HistoryEntry, HistoryError>;
    fn list_all(&self) -> Result<Vec<HistoryEntry>, HistoryError>;
    fn count(&self) -> Result<usize, HistoryError>;
    /// Empties the store and returns how many entries it held.
    fn clear(&self) -> Result<usize, HistoryError>;
}

/// Error enumeration for history storage failures.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history store unavailable: {0}")]
    Unavailable(String),
    #[error("history io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("history encoding error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub(crate) fn poisoned() -> HistoryError {
    HistoryError::Unavailable("history lock poisoned".to_string())
}
