//! Aggregation of per-test scores over a benchmark run.

use lifebench_engine::GridSize;
use serde::{Deserialize, Serialize};

use crate::scorer::ScoreRecord;

/// Descriptive statistics summarizing a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Upper median (`sorted[len / 2]`).
    pub median: f64,
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// Returns `None` if `values` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lifebench_evaluator::summary::DescriptiveStats;
    /// let stats = DescriptiveStats::new([0.5, 1.0, 0.0, 0.25, 0.75]).unwrap();
    /// assert_eq!(stats.min, 0.0);
    /// assert_eq!(stats.max, 1.0);
    /// assert_eq!(stats.mean, 0.5);
    /// assert_eq!(stats.median, 0.5);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Like [`Self::new`], for values already sorted in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let n = sorted_values.len() as f64;
        let mean = sorted_values.iter().sum::<f64>() / n;
        let median = sorted_values[sorted_values.len() / 2];
        let variance = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / n;

        Some(Self {
            min,
            max,
            mean,
            median,
            std_dev: variance.sqrt(),
        })
    }
}

/// Totals and averages over every test of a run.
///
/// Tests without a score (no usable answer, or an answer of the wrong shape) count as
/// zero accuracy, zero correctness and zero points, but still contribute their maximum
/// points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub total_tests: usize,
    pub scored_tests: usize,
    pub perfect_matches: usize,
    /// Mean cell accuracy over all tests.
    pub overall_accuracy: f64,
    /// Mean correctness over all tests.
    pub mean_correctness: f64,
    pub points_earned: f64,
    /// Sum of `rows × cols` over all tests.
    pub max_points: usize,
    /// Distribution of correctness over all tests, `None` for an empty run.
    pub correctness_stats: Option<DescriptiveStats>,
}

impl ScoreSummary {
    /// Summarizes a run from each test's grid size and score, if it has one.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<'a, I>(tests: I) -> Self
    where
        I: IntoIterator<Item = (GridSize, Option<&'a ScoreRecord>)>,
    {
        let mut summary = Self {
            total_tests: 0,
            scored_tests: 0,
            perfect_matches: 0,
            overall_accuracy: 0.0,
            mean_correctness: 0.0,
            points_earned: 0.0,
            max_points: 0,
            correctness_stats: None,
        };
        let mut accuracy_sum = 0.0;
        let mut correctness = vec![];

        for (size, record) in tests {
            summary.total_tests += 1;
            summary.max_points += size.cell_count();
            let Some(record) = record else {
                correctness.push(0.0);
                continue;
            };
            summary.scored_tests += 1;
            if record.perfect_match() {
                summary.perfect_matches += 1;
            }
            accuracy_sum += record.cell_accuracy();
            summary.points_earned += record.points();
            correctness.push(record.correctness());
        }

        if summary.total_tests > 0 {
            let n = summary.total_tests as f64;
            summary.overall_accuracy = accuracy_sum / n;
            summary.mean_correctness = correctness.iter().sum::<f64>() / n;
        }
        summary.correctness_stats = DescriptiveStats::new(correctness);
        summary
    }
}
