use super::domain::{Criterion, TestingMethod, VALUES_PER_CRITERION};
use super::grid::CriteriaGrid;

/// Points (1-5) a raw value earns on the step table of its criterion.
///
/// Count tables are evaluated as upper bounds so fractional values between the
/// integer bands land in the next band up.
pub fn points(criterion: Criterion, value: f64) -> u8 {
    match criterion {
        Criterion::Duration => duration_points(value),
        Criterion::CaseCount => case_count_points(value),
        Criterion::BugCount => bug_count_points(value),
        Criterion::Coverage => ascending_points(value, [20.0, 40.0, 60.0, 80.0]),
        Criterion::Stability => ascending_points(value, [60.0, 75.0, 85.0, 95.0]),
    }
}

/// Per-method totals indexed by method; each lies in `5..=25`.
pub fn scores(grid: &CriteriaGrid) -> [u8; VALUES_PER_CRITERION] {
    let mut totals = [0u8; VALUES_PER_CRITERION];
    for criterion in Criterion::ordered() {
        for method in TestingMethod::ordered() {
            totals[method.index()] += points(criterion, grid.value(criterion, method));
        }
    }
    totals
}

// Shorter runs score higher.
fn duration_points(hours: f64) -> u8 {
    if hours > 3.0 {
        1
    } else if hours >= 2.0 {
        2
    } else if hours >= 1.0 {
        3
    } else if hours >= 0.5 {
        4
    } else {
        5
    }
}

fn case_count_points(count: f64) -> u8 {
    if count <= 5.0 {
        1
    } else if count <= 10.0 {
        2
    } else if count <= 20.0 {
        3
    } else if count <= 30.0 {
        4
    } else {
        5
    }
}

fn bug_count_points(count: f64) -> u8 {
    if count <= 1.0 {
        1
    } else if count <= 3.0 {
        2
    } else if count <= 4.0 {
        3
    } else if count <= 5.0 {
        4
    } else {
        5
    }
}

/// Lower bounds are inclusive: a value equal to a threshold earns the higher band.
fn ascending_points(value: f64, thresholds: [f64; 4]) -> u8 {
    let passed = thresholds
        .iter()
        .filter(|threshold| value >= **threshold)
        .count();
    1 + passed as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_boundaries_resolve_to_inclusive_side() {
        assert_eq!(points(Criterion::Duration, 3.5), 1);
        assert_eq!(points(Criterion::Duration, 3.001), 1);
        assert_eq!(points(Criterion::Duration, 3.0), 2);
        assert_eq!(points(Criterion::Duration, 2.999), 2);
        assert_eq!(points(Criterion::Duration, 2.0), 2);
        assert_eq!(points(Criterion::Duration, 1.999), 3);
        assert_eq!(points(Criterion::Duration, 1.0), 3);
        assert_eq!(points(Criterion::Duration, 0.5), 4);
        assert_eq!(points(Criterion::Duration, 0.49), 5);
    }

    #[test]
    fn empty_duration_earns_top_band() {
        // A blank field parses to 0.0, which sits in the fastest band.
        assert_eq!(points(Criterion::Duration, 0.0), 5);
        assert_eq!(scores(&CriteriaGrid::zeroed()), [9, 9, 9]);
    }

    #[test]
    fn case_count_bands() {
        assert_eq!(points(Criterion::CaseCount, 5.0), 1);
        assert_eq!(points(Criterion::CaseCount, 6.0), 2);
        assert_eq!(points(Criterion::CaseCount, 10.0), 2);
        assert_eq!(points(Criterion::CaseCount, 11.0), 3);
        assert_eq!(points(Criterion::CaseCount, 20.0), 3);
        assert_eq!(points(Criterion::CaseCount, 21.0), 4);
        assert_eq!(points(Criterion::CaseCount, 30.0), 4);
        assert_eq!(points(Criterion::CaseCount, 31.0), 5);
        assert_eq!(points(Criterion::CaseCount, 5.5), 2);
    }

    #[test]
    fn bug_count_bands() {
        assert_eq!(points(Criterion::BugCount, 0.0), 1);
        assert_eq!(points(Criterion::BugCount, 1.0), 1);
        assert_eq!(points(Criterion::BugCount, 2.0), 2);
        assert_eq!(points(Criterion::BugCount, 3.0), 2);
        assert_eq!(points(Criterion::BugCount, 4.0), 3);
        assert_eq!(points(Criterion::BugCount, 5.0), 4);
        assert_eq!(points(Criterion::BugCount, 6.0), 5);
        assert_eq!(points(Criterion::BugCount, 3.5), 3);
    }

    #[test]
    fn percentage_boundaries() {
        assert_eq!(points(Criterion::Coverage, 19.9), 1);
        assert_eq!(points(Criterion::Coverage, 20.0), 2);
        assert_eq!(points(Criterion::Coverage, 40.0), 3);
        assert_eq!(points(Criterion::Coverage, 60.0), 4);
        assert_eq!(points(Criterion::Coverage, 79.999), 4);
        assert_eq!(points(Criterion::Coverage, 80.0), 5);

        assert_eq!(points(Criterion::Stability, 59.0), 1);
        assert_eq!(points(Criterion::Stability, 60.0), 2);
        assert_eq!(points(Criterion::Stability, 75.0), 3);
        assert_eq!(points(Criterion::Stability, 85.0), 4);
        assert_eq!(points(Criterion::Stability, 94.99), 4);
        assert_eq!(points(Criterion::Stability, 95.0), 5);
    }

    #[test]
    fn scores_use_column_as_method() {
        let grid = CriteriaGrid::new([
            [0.25, 2.5, 4.0],
            [35.0, 8.0, 3.0],
            [7.0, 2.0, 4.0],
            [85.0, 45.0, 10.0],
            [96.0, 70.0, 50.0],
        ]);

        // A: 5+5+5+5+5, B: 2+2+2+3+2, C: 1+1+3+1+1
        assert_eq!(scores(&grid), [25, 11, 7]);
    }
}
