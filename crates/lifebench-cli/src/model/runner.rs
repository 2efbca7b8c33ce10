use std::time::Instant;

use futures::{StreamExt as _, stream};
use lifebench_engine::{CellSymbols, Grid, decode, encode, step};
use lifebench_evaluator::{
    extractor::{CandidateSource, ExtractionError, ResponseExtractor},
    scorer,
};
use tracing::{debug, info, warn};

use super::{prompt::build_prompt, provider::ModelProvider, test_case::TestCase};
use crate::schema::report::{BenchmarkReport, Outcome, TestResult};

/// Runs every case of `cases` against `provider` and summarizes the results.
///
/// Up to `concurrency` requests are in flight at once. Results keep the order of
/// `cases`.
pub async fn run_suite<P>(
    provider: &P,
    cases: &[TestCase],
    symbols: CellSymbols,
    concurrency: usize,
) -> BenchmarkReport
where
    P: ModelProvider + ?Sized,
{
    info!(
        model = provider.model(),
        tests = cases.len(),
        concurrency,
        "running benchmark"
    );
    let results = stream::iter(cases)
        .map(|case| run_test(provider, case, symbols))
        .buffered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await;
    BenchmarkReport::new(provider.model(), results)
}

/// Asks `provider` for the next generation of one test case and scores the answer.
///
/// Never fails: a provider error is recorded in [`TestResult::error`] and leaves the test
/// unscorable.
pub async fn run_test<P>(provider: &P, case: &TestCase, symbols: CellSymbols) -> TestResult
where
    P: ModelProvider + ?Sized,
{
    let initial = case.initial_grid();
    let expected = step(&initial);
    let prompt = build_prompt(&initial, symbols);

    info!(
        label = %case.label,
        size = %case.spec.size,
        seed = case.spec.seed,
        "running test"
    );

    let mut result = TestResult {
        label: case.label.clone(),
        spec: case.spec,
        initial_board: encode(&initial, symbols),
        expected_board: encode(&expected, symbols),
        predicted_board: None,
        candidate_source: None,
        outcome: Outcome::Unscorable {
            reason: "provider request failed".to_owned(),
        },
        max_points: case.max_points(),
        response_time_secs: 0.0,
        usage: None,
        error: None,
        raw_response: String::new(),
    };

    let start = Instant::now();
    match provider.query(&prompt).await {
        Ok(response) => {
            debug!(model = %response.model, "model answered");
            let evaluation = evaluate(&response.content, &expected, symbols);
            result.predicted_board = evaluation.predicted_board;
            result.candidate_source = evaluation.candidate_source;
            result.outcome = evaluation.outcome;
            result.response_time_secs = response.response_time.as_secs_f64();
            result.usage = response.usage;
            result.raw_response = response.content;
        }
        Err(e) => {
            let error = format!("{e:#}");
            warn!(label = %case.label, seed = case.spec.seed, %error, "model query failed");
            result.response_time_secs = start.elapsed().as_secs_f64();
            result.error = Some(error);
            return result;
        }
    }

    match &result.outcome {
        Outcome::Scored(record) => info!(
            label = %case.label,
            seed = case.spec.seed,
            accuracy = record.cell_accuracy(),
            correctness = record.correctness(),
            perfect = record.perfect_match(),
            time_secs = result.response_time_secs,
            "test scored"
        ),
        Outcome::Unscorable { reason } => {
            warn!(label = %case.label, seed = case.spec.seed, %reason, "answer is unscorable");
        }
    }
    result
}

struct Evaluation {
    predicted_board: Option<String>,
    candidate_source: Option<CandidateSource>,
    outcome: Outcome,
}

/// Extracts the answer from `response` and scores it against `expected`.
///
/// Answers that cannot be decoded, or whose dimensions differ from `expected`, are
/// unscorable. They are never padded or truncated to fit.
fn evaluate(response: &str, expected: &Grid, symbols: CellSymbols) -> Evaluation {
    let candidate = match ResponseExtractor::new(symbols).extract(response) {
        Ok(candidate) => candidate,
        Err(e) => {
            return Evaluation {
                predicted_board: None,
                candidate_source: None,
                outcome: Outcome::Unscorable {
                    reason: ExtractionError::from(e).to_string(),
                },
            };
        }
    };

    let outcome = match decode(candidate.text(), symbols) {
        Err(e) => Outcome::Unscorable {
            reason: ExtractionError::from(e).to_string(),
        },
        Ok(predicted) if predicted.size() != expected.size() => Outcome::Unscorable {
            reason: format!(
                "predicted grid is {}, expected {}",
                predicted.size(),
                expected.size()
            ),
        },
        Ok(predicted) => Outcome::Scored(scorer::score(&predicted, expected)),
    };
    Evaluation {
        candidate_source: Some(candidate.source()),
        predicted_board: Some(candidate.into_text()),
        outcome,
    }
}
