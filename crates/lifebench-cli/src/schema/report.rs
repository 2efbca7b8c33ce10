use chrono::{DateTime, Utc};
use lifebench_engine::DifficultySpec;
use lifebench_evaluator::{extractor::CandidateSource, scorer::ScoreRecord, summary::ScoreSummary};
use serde::{Deserialize, Serialize};

use crate::model::provider::Usage;

/// Results of running a suite against one model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Model identifier the suite was run against
    pub model: String,
    /// Time the run finished
    pub timestamp: DateTime<Utc>,
    /// Per-test results, in suite order
    pub results: Vec<TestResult>,
    pub summary: RunSummary,
}

impl BenchmarkReport {
    #[must_use]
    pub fn new(model: impl Into<String>, results: Vec<TestResult>) -> Self {
        let summary = RunSummary::new(&results);
        Self {
            model: model.into(),
            timestamp: Utc::now(),
            results,
            summary,
        }
    }
}

/// Everything recorded about one test of a run.
///
/// Boards are stored in their text form, rendered with the symbols used for the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub label: String,
    pub spec: DifficultySpec,
    pub initial_board: String,
    pub expected_board: String,
    /// Candidate answer taken from the response, if any was found
    pub predicted_board: Option<String>,
    /// Extraction tier that produced `predicted_board`
    pub candidate_source: Option<CandidateSource>,
    pub outcome: Outcome,
    pub max_points: usize,
    pub response_time_secs: f64,
    pub usage: Option<Usage>,
    /// Provider failure, if the model could not be queried
    pub error: Option<String>,
    pub raw_response: String,
}

impl TestResult {
    #[must_use]
    pub fn score(&self) -> Option<&ScoreRecord> {
        self.outcome.score()
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.score().is_some_and(ScoreRecord::perfect_match)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The answer had the expected dimensions and was scored.
    Scored(ScoreRecord),
    /// No answer of the expected dimensions could be recovered. Earns no points.
    Unscorable { reason: String },
}

impl Outcome {
    #[must_use]
    pub fn score(&self) -> Option<&ScoreRecord> {
        match self {
            Self::Scored(record) => Some(record),
            Self::Unscorable { .. } => None,
        }
    }
}

/// Aggregate metrics of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(flatten)]
    pub scores: ScoreSummary,
    /// Sum of reported costs, `None` when no request reported one
    pub total_cost: Option<f64>,
    pub total_tokens: u64,
}

impl RunSummary {
    #[must_use]
    pub fn new(results: &[TestResult]) -> Self {
        let scores = ScoreSummary::new(
            results
                .iter()
                .map(|result| (result.spec.size, result.score())),
        );
        let usages = results.iter().filter_map(|result| result.usage);
        let total_cost = usages
            .clone()
            .filter_map(|usage| usage.cost)
            .reduce(|a, b| a + b);
        let total_tokens = usages.map(|usage| usage.total_tokens).sum();
        Self {
            scores,
            total_cost,
            total_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use lifebench_engine::GridSize;
    use lifebench_evaluator::scorer::score;
    use serde_json::json;

    use super::*;

    fn result(outcome: Outcome, usage: Option<Usage>) -> TestResult {
        TestResult {
            label: "Easy".to_owned(),
            spec: DifficultySpec::new(GridSize::square(3).unwrap(), 0.3, 42),
            initial_board: ".#.\n##.\n.#.".to_owned(),
            expected_board: "##.\n###\n##.".to_owned(),
            predicted_board: None,
            candidate_source: None,
            outcome,
            max_points: 9,
            response_time_secs: 1.0,
            usage,
            error: None,
            raw_response: String::new(),
        }
    }

    fn perfect() -> Outcome {
        let grid = "##.\n###\n##.".parse().unwrap();
        Outcome::Scored(score(&grid, &grid))
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = Outcome::Unscorable {
            reason: "predicted grid is 2x2, expected 3x3".to_owned(),
        };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"status": "unscorable", "reason": "predicted grid is 2x2, expected 3x3"})
        );

        let value = serde_json::to_value(perfect()).unwrap();
        assert_eq!(value["status"], "scored");
        assert_eq!(value["perfect_match"], true);
        assert_eq!(value["points"], 9.0);
        let parsed: Outcome = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, perfect());
    }

    #[test]
    fn test_run_summary() {
        let usage = |total_tokens, cost| Usage {
            total_tokens,
            cost,
            ..Usage::default()
        };
        let results = [
            result(perfect(), Some(usage(100, Some(0.5)))),
            result(perfect(), Some(usage(50, None))),
            result(
                Outcome::Unscorable {
                    reason: "provider request failed".to_owned(),
                },
                None,
            ),
        ];
        let summary = RunSummary::new(&results);
        assert_eq!(summary.scores.total_tests, 3);
        assert_eq!(summary.scores.scored_tests, 2);
        assert_eq!(summary.scores.perfect_matches, 2);
        assert_eq!(summary.scores.max_points, 27);
        assert_eq!(summary.total_tokens, 150);
        assert_eq!(summary.total_cost, Some(0.5));

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["total_tests"], 3);
        assert_eq!(value["points_earned"], 18.0);
        assert_eq!(value["total_tokens"], 150);
    }

    #[test]
    fn test_run_summary_without_costs() {
        let summary = RunSummary::new(&[result(perfect(), None)]);
        assert_eq!(summary.total_cost, None);
        assert_eq!(summary.total_tokens, 0);
    }
}
