use std::sync::Arc;

use chrono::{Local, NaiveDateTime, SubsecRound};
use tracing::{debug, info};

use super::domain::ScoringEngine;
use super::grid::CriteriaGrid;
use crate::export::{
    build_table, write_table, ExportError, ExportFormat, ExportLayout, SpreadsheetExport,
};
use crate::history::{HistoryEntry, HistoryError, HistoryStore, NewHistoryEntry};

/// Service composing the configured scoring engine with a history store.
pub struct EvaluationService<S> {
    store: Arc<S>,
    engine: ScoringEngine,
}

impl<S> EvaluationService<S>
where
    S: HistoryStore + 'static,
{
    pub fn new(store: Arc<S>, engine: ScoringEngine) -> Self {
        Self { store, engine }
    }

    pub fn engine(&self) -> ScoringEngine {
        self.engine
    }

    /// Score, rank, and record an evaluation stamped with the current local time.
    pub fn evaluate(&self, grid: CriteriaGrid) -> Result<HistoryEntry, EvaluationServiceError> {
        let now = Local::now().naive_local().trunc_subsecs(0);
        self.evaluate_at(grid, now)
    }

    pub fn evaluate_at(
        &self,
        grid: CriteriaGrid,
        recorded_at: NaiveDateTime,
    ) -> Result<HistoryEntry, EvaluationServiceError> {
        let results = self.engine.evaluate(&grid);
        let stored = self.store.append(NewHistoryEntry {
            recorded_at,
            engine: self.engine,
            grid,
            results,
        })?;

        info!(
            entry_id = stored.id,
            engine = self.engine.label(),
            leader = stored.results.first().map(|result| result.method.label()),
            "evaluation recorded"
        );
        Ok(stored)
    }

    /// All recorded evaluations, most recent first.
    pub fn history(&self) -> Result<Vec<HistoryEntry>, EvaluationServiceError> {
        Ok(self.store.list_all()?)
    }

    pub fn history_count(&self) -> Result<usize, EvaluationServiceError> {
        Ok(self.store.count()?)
    }

    /// Drops every entry and returns how many there were.
    pub fn clear_history(&self) -> Result<usize, EvaluationServiceError> {
        let cleared = self.store.clear()?;
        info!(cleared, "evaluation history cleared");
        Ok(cleared)
    }

    /// Spreadsheet of the full history in chronological order, or `None` when empty.
    ///
    /// The column layout follows the engines recorded on the entries, not the one
    /// configured now.
    pub fn export(
        &self,
        format: ExportFormat,
    ) -> Result<Option<SpreadsheetExport>, EvaluationServiceError> {
        let mut entries = self.store.list_all()?;
        if entries.is_empty() {
            debug!("export requested with empty history");
            return Ok(None);
        }
        entries.reverse();

        let layout = ExportLayout::for_entries(&entries);
        let table = build_table(&entries, layout);
        let row_count = table.rows.len();
        let bytes = write_table(&table, format)?;

        info!(
            entries = entries.len(),
            rows = row_count,
            ?format,
            ?layout,
            "history exported"
        );
        Ok(Some(SpreadsheetExport {
            format,
            file_name: format.file_name(),
            row_count,
            bytes,
        }))
    }
}

/// Error raised by the evaluation service.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationServiceError {
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("evaluation worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
