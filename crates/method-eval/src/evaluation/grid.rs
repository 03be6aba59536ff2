use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::domain::{Criterion, TestingMethod, CRITERIA_COUNT, VALUES_PER_CRITERION};

/// Fixed 5×3 matrix of raw ratings: one row per criterion, one column per value slot.
///
/// Under the rule-table engine the column index is also the method index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriteriaGrid {
    rows: [[f64; VALUES_PER_CRITERION]; CRITERIA_COUNT],
}

impl Default for CriteriaGrid {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl CriteriaGrid {
    pub fn new(rows: [[f64; VALUES_PER_CRITERION]; CRITERIA_COUNT]) -> Self {
        Self { rows }
    }

    pub fn zeroed() -> Self {
        Self::new([[0.0; VALUES_PER_CRITERION]; CRITERIA_COUNT])
    }

    /// Builds a grid from flat `crit_<i>_val_<j>` form fields.
    ///
    /// Missing, unparseable, or non-finite fields become `0.0`.
    pub fn from_form(fields: &HashMap<String, String>) -> Self {
        let mut rows = [[0.0; VALUES_PER_CRITERION]; CRITERIA_COUNT];
        for (criterion_idx, row) in rows.iter_mut().enumerate() {
            for (value_idx, cell) in row.iter_mut().enumerate() {
                let key = field_name(criterion_idx, value_idx);
                *cell = parse_cell(fields.get(&key).map(String::as_str));
            }
        }
        Self::new(rows)
    }

    /// Strict parser for a comma separated list of 15 values in row-major order.
    pub fn parse_list(raw: &str) -> Result<Self, GridParseError> {
        let values = raw
            .split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| {
                value
                    .parse::<f64>()
                    .ok()
                    .filter(|parsed| parsed.is_finite())
                    .ok_or_else(|| GridParseError::InvalidNumber(value.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_values(&values)
    }

    pub fn from_values(values: &[f64]) -> Result<Self, GridParseError> {
        let expected = CRITERIA_COUNT * VALUES_PER_CRITERION;
        if values.len() != expected {
            return Err(GridParseError::WrongLength {
                expected,
                actual: values.len(),
            });
        }

        let mut rows = [[0.0; VALUES_PER_CRITERION]; CRITERIA_COUNT];
        for (row, chunk) in rows.iter_mut().zip(values.chunks(VALUES_PER_CRITERION)) {
            row.copy_from_slice(chunk);
        }
        Ok(Self::new(rows))
    }

    pub fn rows(&self) -> &[[f64; VALUES_PER_CRITERION]; CRITERIA_COUNT] {
        &self.rows
    }

    pub fn row(&self, criterion: Criterion) -> &[f64; VALUES_PER_CRITERION] {
        &self.rows[criterion.index()]
    }

    pub fn value(&self, criterion: Criterion, method: TestingMethod) -> f64 {
        self.rows[criterion.index()][method.index()]
    }

    pub fn mean(&self, criterion: Criterion) -> f64 {
        let row = self.row(criterion);
        row.iter().sum::<f64>() / row.len() as f64
    }
}

/// Form field key for a grid cell.
pub fn field_name(criterion_idx: usize, value_idx: usize) -> String {
    format!("crit_{criterion_idx}_val_{value_idx}")
}

fn parse_cell(raw: Option<&str>) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Rejected CLI grid input. Form input never produces this.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GridParseError {
    #[error("expected {expected} values, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("'{0}' is not a finite number")]
    InvalidNumber(String),
}
