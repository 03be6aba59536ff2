//! Scoring engines, ranking, and the service that records each evaluation.

mod domain;
mod grid;
mod ranking;
pub mod router;
mod rules;
pub mod service;
mod summary;
pub mod views;
mod weighted;

#[cfg(test)]
mod tests;

pub use domain::{
    format_score, Criterion, MethodScore, ScoringEngine, TestingMethod, CRITERIA_COUNT,
    VALUES_PER_CRITERION,
};
pub use grid::{field_name, CriteriaGrid, GridParseError};
pub use ranking::rank;
pub use router::evaluation_router;
pub use service::{EvaluationService, EvaluationServiceError};
pub use summary::{render_summary, SUMMARY_HEADER};
pub use weighted::round_to_cents;

/// Public entry points to the individual engines.
pub mod engines {
    pub use super::rules::{points as rule_points, scores as rule_scores};
    pub use super::weighted::{score as weighted_score, weight as weighted_weight};
}

impl ScoringEngine {
    /// Scores every method, in enumeration order.
    pub fn score_all(self, grid: &CriteriaGrid) -> Vec<MethodScore> {
        match self {
            ScoringEngine::WeightedAverage => TestingMethod::ordered()
                .into_iter()
                .map(|method| MethodScore::new(method, weighted::score(method, grid)))
                .collect(),
            ScoringEngine::RuleTable => {
                let totals = rules::scores(grid);
                TestingMethod::ordered()
                    .into_iter()
                    .map(|method| MethodScore::new(method, f64::from(totals[method.index()])))
                    .collect()
            }
        }
    }

    /// Scores and ranks every method.
    pub fn evaluate(self, grid: &CriteriaGrid) -> Vec<MethodScore> {
        rank(self.score_all(grid))
    }
}
