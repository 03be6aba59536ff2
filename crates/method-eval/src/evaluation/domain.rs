use serde::{Deserialize, Serialize};

pub const CRITERIA_COUNT: usize = 5;
pub const VALUES_PER_CRITERION: usize = 3;

/// Testing methods being compared. Enumeration order doubles as the tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestingMethod {
    MethodA,
    MethodB,
    MethodC,
}

impl TestingMethod {
    pub fn ordered() -> [Self; VALUES_PER_CRITERION] {
        [Self::MethodA, Self::MethodB, Self::MethodC]
    }

    pub fn index(self) -> usize {
        match self {
            Self::MethodA => 0,
            Self::MethodB => 1,
            Self::MethodC => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::MethodA => "Метод A",
            Self::MethodB => "Метод B",
            Self::MethodC => "Метод C",
        }
    }
}

/// Evaluation dimensions, one row of the criteria grid each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// Hours spent executing the method.
    Duration,
    CaseCount,
    BugCount,
    /// Code coverage, percent.
    Coverage,
    /// Share of stable runs, percent.
    Stability,
}

impl Criterion {
    pub fn ordered() -> [Self; CRITERIA_COUNT] {
        [
            Self::Duration,
            Self::CaseCount,
            Self::BugCount,
            Self::Coverage,
            Self::Stability,
        ]
    }

    pub fn index(self) -> usize {
        match self {
            Self::Duration => 0,
            Self::CaseCount => 1,
            Self::BugCount => 2,
            Self::Coverage => 3,
            Self::Stability => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Duration => "Тривалість",
            Self::CaseCount => "Кількість тест-кейсів",
            Self::BugCount => "Знайдені дефекти",
            Self::Coverage => "Покриття коду, %",
            Self::Stability => "Стабільність, %",
        }
    }
}

/// Named scoring strategies. Each history entry records the one that produced it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringEngine {
    #[default]
    WeightedAverage,
    RuleTable,
}

impl ScoringEngine {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "weighted" | "weighted_average" => Some(Self::WeightedAverage),
            "rule_table" | "rules" => Some(Self::RuleTable),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::WeightedAverage => "weighted average",
            Self::RuleTable => "rule table",
        }
    }
}

/// Score earned by a single method under one engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MethodScore {
    pub method: TestingMethod,
    pub score: f64,
}

impl MethodScore {
    pub fn new(method: TestingMethod, score: f64) -> Self {
        Self { method, score }
    }
}

/// Renders a score the way the result summary and export show it.
///
/// Rule-table scores are whole numbers. Weighted scores keep their two-decimal
/// precision and always show at least one fractional digit (`12.0`, `7.25`).
pub fn format_score(engine: ScoringEngine, score: f64) -> String {
    match engine {
        ScoringEngine::RuleTable => format!("{:.0}", score),
        ScoringEngine::WeightedAverage => {
            if score.fract() == 0.0 {
                format!("{:.1}", score)
            } else {
                format!("{}", score)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_parse_accepts_aliases() {
        assert_eq!(
            ScoringEngine::parse("Weighted"),
            Some(ScoringEngine::WeightedAverage)
        );
        assert_eq!(
            ScoringEngine::parse("rule-table"),
            Some(ScoringEngine::RuleTable)
        );
        assert_eq!(ScoringEngine::parse(" rule_table "), Some(ScoringEngine::RuleTable));
        assert_eq!(ScoringEngine::parse("median"), None);
    }

    #[test]
    fn format_score_matches_engine_precision() {
        assert_eq!(format_score(ScoringEngine::RuleTable, 17.0), "17");
        assert_eq!(format_score(ScoringEngine::WeightedAverage, 0.0), "0.0");
        assert_eq!(format_score(ScoringEngine::WeightedAverage, 12.0), "12.0");
        assert_eq!(format_score(ScoringEngine::WeightedAverage, 7.25), "7.25");
    }

    #[test]
    fn indices_follow_enumeration_order() {
        for (idx, method) in TestingMethod::ordered().into_iter().enumerate() {
            assert_eq!(method.index(), idx);
        }
        for (idx, criterion) in Criterion::ordered().into_iter().enumerate() {
            assert_eq!(criterion.index(), idx);
        }
    }
}
