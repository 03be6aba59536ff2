use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::grid::CriteriaGrid;
use super::service::{EvaluationService, EvaluationServiceError};
use super::views::{
    ClearHistoryResponse, EvaluationResponse, HistoryEntryView, HistoryResponse, MethodScoreView,
};
use crate::export::{ExportFormat, EMPTY_HISTORY_MESSAGE};
use crate::history::HistoryStore;

/// Router builder exposing evaluation, history, and export endpoints.
pub fn evaluation_router<S>(service: Arc<EvaluationService<S>>) -> Router
where
    S: HistoryStore + 'static,
{
    Router::new()
        .route("/api/v1/evaluations", post(evaluate_handler::<S>))
        .route(
            "/api/v1/evaluations/history",
            get(history_handler::<S>).delete(clear_handler::<S>),
        )
        .route("/api/v1/evaluations/export", get(export_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExportQuery {
    #[serde(default)]
    pub(crate) format: ExportFormat,
}

// Stores may touch the filesystem, so service calls run on the blocking pool.
async fn run_blocking<S, T, F>(
    service: &Arc<EvaluationService<S>>,
    job: F,
) -> Result<T, EvaluationServiceError>
where
    S: HistoryStore + 'static,
    T: Send + 'static,
    F: FnOnce(&EvaluationService<S>) -> Result<T, EvaluationServiceError> + Send + 'static,
{
    let service = Arc::clone(service);
    tokio::task::spawn_blocking(move || job(&service)).await?
}

pub(crate) async fn evaluate_handler<S>(
    State(service): State<Arc<EvaluationService<S>>>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response
where
    S: HistoryStore + 'static,
{
    let grid = CriteriaGrid::from_form(&fields);
    let entry = match run_blocking(&service, move |service| service.evaluate(grid)).await {
        Ok(entry) => entry,
        Err(err) => return internal_error(err),
    };

    // The entry is already stored; a failed listing only trims the response.
    let history = match run_blocking(&service, |service| service.history()).await {
        Ok(history) => Some(history),
        Err(err) => {
            warn!(entry_id = entry.id, error = %err, "evaluation recorded but history listing failed");
            None
        }
    };

    let body = EvaluationResponse {
        engine: entry.engine,
        summary: entry.summary(),
        results: entry
            .results
            .iter()
            .map(|score| MethodScoreView::new(entry.engine, score))
            .collect(),
        history_count: history.as_ref().map(Vec::len),
        history: history.map(|entries| entries.iter().map(HistoryEntryView::from).collect()),
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub(crate) async fn history_handler<S>(State(service): State<Arc<EvaluationService<S>>>) -> Response
where
    S: HistoryStore + 'static,
{
    match run_blocking(&service, |service| service.history()).await {
        Ok(entries) => {
            let body = HistoryResponse {
                count: entries.len(),
                entries: entries.iter().map(HistoryEntryView::from).collect(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => internal_error(err),
    }
}

pub(crate) async fn clear_handler<S>(State(service): State<Arc<EvaluationService<S>>>) -> Response
where
    S: HistoryStore + 'static,
{
    match run_blocking(&service, |service| service.clear_history()).await {
        Ok(cleared) => {
            let body = ClearHistoryResponse {
                message: "Історія очищена",
                count: 0,
                cleared,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => internal_error(err),
    }
}

pub(crate) async fn export_handler<S>(
    State(service): State<Arc<EvaluationService<S>>>,
    Query(query): Query<ExportQuery>,
) -> Response
where
    S: HistoryStore + 'static,
{
    let format = query.format;
    match run_blocking(&service, move |service| service.export(format)).await {
        Ok(Some(export)) => {
            let disposition = format!("attachment; filename={}", export.file_name);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, export.format.content_type().to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                export.bytes,
            )
                .into_response()
        }
        Ok(None) => {
            let payload = json!({ "message": EMPTY_HISTORY_MESSAGE });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => internal_error(err),
    }
}

fn internal_error(err: EvaluationServiceError) -> Response {
    warn!(error = %err, "evaluation request failed");
    let payload = json!({ "error": err.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}
