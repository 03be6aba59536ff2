use super::domain::{format_score, MethodScore, ScoringEngine};

pub const SUMMARY_HEADER: &str = "Результати оцінки методів:";

/// Human readable result block: a header, a blank line, then one line per method.
pub fn render_summary(engine: ScoringEngine, ranked: &[MethodScore]) -> String {
    let mut text = format!("{SUMMARY_HEADER}\n\n");
    for entry in ranked {
        text.push_str(&format!(
            "{}: {} балів\n",
            entry.method.label(),
            format_score(engine, entry.score)
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::domain::TestingMethod;

    #[test]
    fn lists_methods_in_ranked_order() {
        let ranked = [
            MethodScore::new(TestingMethod::MethodC, 18.0),
            MethodScore::new(TestingMethod::MethodA, 12.0),
            MethodScore::new(TestingMethod::MethodB, 9.0),
        ];
        let text = render_summary(ScoringEngine::RuleTable, &ranked);
        assert_eq!(
            text,
            "Результати оцінки методів:\n\nМетод C: 18 балів\nМетод A: 12 балів\nМетод B: 9 балів\n"
        );
    }

    #[test]
    fn weighted_scores_keep_decimals() {
        let ranked = [MethodScore::new(TestingMethod::MethodB, 4.35)];
        let text = render_summary(ScoringEngine::WeightedAverage, &ranked);
        assert!(text.ends_with("Метод B: 4.35 балів\n"));
    }
}
