use super::domain::{Criterion, TestingMethod};
use super::grid::CriteriaGrid;

/// Multiplier applied to a criterion mean for the given method.
pub fn weight(method: TestingMethod, criterion: Criterion) -> f64 {
    match (method, criterion) {
        (TestingMethod::MethodA, Criterion::Duration | Criterion::CaseCount) => 1.5,
        (TestingMethod::MethodA, _) => 0.8,
        (TestingMethod::MethodB, Criterion::BugCount | Criterion::Coverage) => 1.5,
        (TestingMethod::MethodB, _) => 0.8,
        (TestingMethod::MethodC, Criterion::Stability) => 2.0,
        (TestingMethod::MethodC, _) => 0.5,
    }
}

/// Weighted sum of criterion means, rounded to two decimals.
pub fn score(method: TestingMethod, grid: &CriteriaGrid) -> f64 {
    let total = Criterion::ordered()
        .into_iter()
        .map(|criterion| grid.mean(criterion) * weight(method, criterion))
        .sum::<f64>();
    round_to_cents(total)
}

/// Two-decimal rounding via `f64::round`, which rounds half away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
