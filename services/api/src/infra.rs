use metrics_exporter_prometheus::PrometheusHandle;
use method_eval::config::HistoryConfig;
use method_eval::evaluation::ScoringEngine;
use method_eval::history::{
    HistoryEntry, HistoryError, HistoryStore, InMemoryHistoryStore, JsonFileHistoryStore,
    NewHistoryEntry,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// History backend chosen at startup from `HISTORY_PATH`.
pub(crate) enum HistoryBackend {
    Memory(InMemoryHistoryStore),
    File(JsonFileHistoryStore),
}

impl HistoryBackend {
    pub(crate) fn open(config: &HistoryConfig) -> Result<Self, HistoryError> {
        match &config.path {
            Some(path) => Ok(Self::File(JsonFileHistoryStore::open(path)?)),
            None => Ok(Self::Memory(InMemoryHistoryStore::default())),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Memory(_) => "in-memory".to_string(),
            Self::File(store) => format!("file:{}", store.path().display()),
        }
    }
}

impl HistoryStore for HistoryBackend {
    fn append(&self, entry: NewHistoryEntry) -> Result<HistoryEntry, HistoryError> {
        match self {
            Self::Memory(store) => store.append(entry),
            Self::File(store) => store.append(entry),
        }
    }

    fn list_all(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        match self {
            Self::Memory(store) => store.list_all(),
            Self::File(store) => store.list_all(),
        }
    }

    fn count(&self) -> Result<usize, HistoryError> {
        match self {
            Self::Memory(store) => store.count(),
            Self::File(store) => store.count(),
        }
    }

    fn clear(&self) -> Result<usize, HistoryError> {
        match self {
            Self::Memory(store) => store.clear(),
            Self::File(store) => store.clear(),
        }
    }
}

pub(crate) fn parse_engine(raw: &str) -> Result<ScoringEngine, String> {
    ScoringEngine::parse(raw)
        .ok_or_else(|| format!("unknown scoring engine '{raw}' (expected weighted or rule-table)"))
}
