use std::collections::HashMap;
use std::sync::Arc;

use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::evaluation::{
    evaluation_router, field_name, CriteriaGrid, EvaluationService, ScoringEngine,
};
use crate::history::{
    HistoryEntry, HistoryError, HistoryStore, InMemoryHistoryStore, NewHistoryEntry,
};

pub(super) fn recorded_at(minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 4, 10)
        .and_then(|date| date.and_hms_opt(11, minute, 0))
        .expect("valid timestamp")
}

/// Rule table ranks A, B, C; weighted average ranks C, B, A.
pub(super) fn sample_grid() -> CriteriaGrid {
    CriteriaGrid::new([
        [0.4, 2.5, 3.5],
        [25.0, 12.0, 4.0],
        [6.0, 3.0, 1.0],
        [82.0, 55.0, 30.0],
        [97.0, 80.0, 70.0],
    ])
}

pub(super) fn form_fields(grid: &CriteriaGrid) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    for (criterion_idx, row) in grid.rows().iter().enumerate() {
        for (value_idx, value) in row.iter().enumerate() {
            fields.insert(field_name(criterion_idx, value_idx), value.to_string());
        }
    }
    fields
}

pub(super) fn form_body(grid: &CriteriaGrid) -> String {
    let mut pairs: Vec<String> = form_fields(grid)
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    pairs.sort();
    pairs.join("&")
}

pub(super) fn build_service(
    engine: ScoringEngine,
) -> (EvaluationService<InMemoryHistoryStore>, InMemoryHistoryStore) {
    let store = InMemoryHistoryStore::default();
    let service = EvaluationService::new(Arc::new(store.clone()), engine);
    (service, store)
}

pub(super) fn router_with_service(
    service: EvaluationService<InMemoryHistoryStore>,
) -> axum::Router {
    evaluation_router(Arc::new(service))
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = read_body(response).await;
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) struct UnavailableStore;

impl HistoryStore for UnavailableStore {
    fn append(&self, _entry: NewHistoryEntry) -> Result<HistoryEntry, HistoryError> {
        Err(HistoryError::Unavailable("database offline".to_string()))
    }

    fn list_all(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        Err(HistoryError::Unavailable("database offline".to_string()))
    }

    fn count(&self) -> Result<usize, HistoryError> {
        Err(HistoryError::Unavailable("database offline".to_string()))
    }

    fn clear(&self) -> Result<usize, HistoryError> {
        Err(HistoryError::Unavailable("database offline".to_string()))
    }
}

/// Records entries but cannot list them back.
#[derive(Default)]
pub(super) struct AppendOnlyStore {
    inner: InMemoryHistoryStore,
}

impl HistoryStore for AppendOnlyStore {
    fn append(&self, entry: NewHistoryEntry) -> Result<HistoryEntry, HistoryError> {
        self.inner.append(entry)
    }

    fn list_all(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        Err(HistoryError::Unavailable("replica lagging".to_string()))
    }

    fn count(&self) -> Result<usize, HistoryError> {
        self.inner.count()
    }

    fn clear(&self) -> Result<usize, HistoryError> {
        self.inner.clear()
    }
}
