use super::domain::MethodScore;

/// Orders scores from highest to lowest.
///
/// `sort_by` is stable, so tied methods keep the order they were passed in.
pub fn rank(mut scores: Vec<MethodScore>) -> Vec<MethodScore> {
    scores.sort_by(|left, right| right.score.total_cmp(&left.score));
    scores
}
