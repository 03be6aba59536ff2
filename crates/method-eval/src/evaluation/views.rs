use serde::Serialize;

use super::domain::{format_score, MethodScore, ScoringEngine, TestingMethod};
use crate::history::HistoryEntry;

/// Serialized method score with the label and the formatted value the summary shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodScoreView {
    pub method: TestingMethod,
    pub label: &'static str,
    pub score: f64,
    pub display: String,
}

impl MethodScoreView {
    pub fn new(engine: ScoringEngine, score: &MethodScore) -> Self {
        Self {
            method: score.method,
            label: score.method.label(),
            score: score.score,
            display: format_score(engine, score.score),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntryView {
    pub id: u64,
    pub recorded_at: String,
    pub engine: ScoringEngine,
    pub criteria: Vec<[f64; 3]>,
    pub results: Vec<MethodScoreView>,
}

impl From<&HistoryEntry> for HistoryEntryView {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id,
            recorded_at: entry.recorded_at_label(),
            engine: entry.engine,
            criteria: entry.grid.rows().to_vec(),
            results: entry
                .results
                .iter()
                .map(|score| MethodScoreView::new(entry.engine, score))
                .collect(),
        }
    }
}

/// Response body for a submitted evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResponse {
    pub engine: ScoringEngine,
    pub summary: String,
    pub results: Vec<MethodScoreView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<HistoryEntryView>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub count: usize,
    pub entries: Vec<HistoryEntryView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClearHistoryResponse {
    pub message: &'static str,
    pub count: usize,
    pub cleared: usize,
}
