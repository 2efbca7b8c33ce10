//! Comparison of a predicted grid against the expected next generation.
//!
//! # Metrics
//!
//! ```text
//! cell_accuracy = matching cells / (rows × cols)
//! F1_k          = 2 × precision_k × recall_k / (precision_k + recall_k)   for k ∈ {alive, dead}
//! correctness   = sqrt(F1_alive × F1_dead)                                  clamped to [0, 1]
//! points        = correctness × rows × cols
//! ```
//!
//! Cell accuracy alone rewards "predict everything dead" on sparse boards. The geometric
//! mean of per-class F1 scores is zero whenever either class is missed entirely, so it is
//! the primary metric, and points scale it by board size.
//!
//! # Absent Classes
//!
//! When the expected grid has no cell of a class, precision and recall are undefined. This
//! case is checked first and tagged as [`ClassF1::Absent`]: the class scores 1.0 if the
//! prediction also has no cell of that class, and 0.0 otherwise.

use lifebench_engine::Grid;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CellClass {
    #[display("alive")]
    Alive,
    #[display("dead")]
    Dead,
}

impl CellClass {
    fn matches(self, alive: bool) -> bool {
        match self {
            Self::Alive => alive,
            Self::Dead => !alive,
        }
    }
}

/// Confusion counts for one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassCounts {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl ClassCounts {
    /// Counts cells of `class` in `predicted` against `expected`.
    ///
    /// # Panics
    ///
    /// Panics if the grids have different dimensions.
    #[must_use]
    pub fn count(predicted: &Grid, expected: &Grid, class: CellClass) -> Self {
        assert_same_size(predicted, expected);
        let mut counts = Self::default();
        for (&p, &e) in predicted.cells().iter().zip(expected.cells()) {
            match (class.matches(p), class.matches(e)) {
                (true, true) => counts.true_positives += 1,
                (true, false) => counts.false_positives += 1,
                (false, true) => counts.false_negatives += 1,
                (false, false) => {}
            }
        }
        counts
    }

    /// Number of cells of the class in the expected grid.
    #[must_use]
    pub fn expected_total(&self) -> usize {
        self.true_positives + self.false_negatives
    }

    /// Number of cells of the class in the predicted grid.
    #[must_use]
    pub fn predicted_total(&self) -> usize {
        self.true_positives + self.false_positives
    }
}

/// F1 score of one class, with the absent-class case kept distinct.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::IsVariant)]
pub enum ClassF1 {
    /// The expected grid has no cell of the class.
    Absent {
        /// Whether the prediction also has no cell of the class.
        predicted_absent: bool,
    },
    Measured {
        precision: f64,
        recall: f64,
        f1: f64,
    },
}

impl ClassF1 {
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_counts(counts: ClassCounts) -> Self {
        if counts.expected_total() == 0 {
            return Self::Absent {
                predicted_absent: counts.predicted_total() == 0,
            };
        }

        let tp = counts.true_positives as f64;
        let precision = if counts.predicted_total() == 0 {
            0.0
        } else {
            tp / counts.predicted_total() as f64
        };
        let recall = tp / counts.expected_total() as f64;
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        Self::Measured {
            precision,
            recall,
            f1,
        }
    }

    #[must_use]
    pub fn evaluate(predicted: &Grid, expected: &Grid, class: CellClass) -> Self {
        Self::from_counts(ClassCounts::count(predicted, expected, class))
    }

    #[must_use]
    pub fn f1(&self) -> f64 {
        match *self {
            Self::Absent { predicted_absent } => {
                if predicted_absent {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Measured { f1, .. } => f1,
        }
    }
}

/// Scores of one predicted grid against its expected grid.
///
/// Built once by [`score`] and never modified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    cell_accuracy: f64,
    f1_alive: f64,
    f1_dead: f64,
    correctness: f64,
    perfect_match: bool,
    points: f64,
}

impl ScoreRecord {
    /// Fraction of cells predicted correctly, in `[0, 1]`.
    #[must_use]
    pub const fn cell_accuracy(&self) -> f64 {
        self.cell_accuracy
    }

    #[must_use]
    pub const fn f1_alive(&self) -> f64 {
        self.f1_alive
    }

    #[must_use]
    pub const fn f1_dead(&self) -> f64 {
        self.f1_dead
    }

    /// Geometric mean of the per-class F1 scores, in `[0, 1]`.
    #[must_use]
    pub const fn correctness(&self) -> f64 {
        self.correctness
    }

    #[must_use]
    pub const fn perfect_match(&self) -> bool {
        self.perfect_match
    }

    /// `correctness × rows × cols`.
    #[must_use]
    pub const fn points(&self) -> f64 {
        self.points
    }
}

/// Scores `predicted` against `expected`.
///
/// # Panics
///
/// Panics if the grids have different dimensions. Callers decide how to treat a
/// prediction of the wrong shape before scoring it.
///
/// # Example
///
/// ```
/// use lifebench_engine::Grid;
/// use lifebench_evaluator::scorer::score;
///
/// let expected: Grid = "##.\n###\n##.".parse().unwrap();
/// let all_dead: Grid = "...\n...\n...".parse().unwrap();
///
/// let record = score(&all_dead, &expected);
/// assert_eq!(record.correctness(), 0.0);
/// assert_eq!(record.points(), 0.0);
/// assert!((record.cell_accuracy() - 2.0 / 9.0).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn score(predicted: &Grid, expected: &Grid) -> ScoreRecord {
    assert_same_size(predicted, expected);

    let cell_count = expected.size().cell_count();
    let matching = predicted
        .cells()
        .iter()
        .zip(expected.cells())
        .filter(|(p, e)| p == e)
        .count();
    let cell_accuracy = matching as f64 / cell_count as f64;

    let f1_alive = ClassF1::evaluate(predicted, expected, CellClass::Alive).f1();
    let f1_dead = ClassF1::evaluate(predicted, expected, CellClass::Dead).f1();
    let correctness = (f1_alive * f1_dead).sqrt().clamp(0.0, 1.0);

    ScoreRecord {
        cell_accuracy,
        f1_alive,
        f1_dead,
        correctness,
        perfect_match: predicted == expected,
        points: correctness * cell_count as f64,
    }
}

fn assert_same_size(predicted: &Grid, expected: &Grid) {
    assert_eq!(
        predicted.size(),
        expected.size(),
        "predicted and expected grids must have the same dimensions"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(text: &str) -> Grid {
        text.parse().unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_perfect_match() {
        let expected = grid("##.\n###\n##.");
        let record = score(&expected.clone(), &expected);
        assert!(record.perfect_match());
        assert_close(record.cell_accuracy(), 1.0);
        assert_close(record.f1_alive(), 1.0);
        assert_close(record.f1_dead(), 1.0);
        assert_close(record.correctness(), 1.0);
        assert_close(record.points(), 9.0);
    }

    #[test]
    fn test_all_dead_prediction() {
        let expected = grid("##.\n###\n##.");
        let record = score(&grid("...\n...\n..."), &expected);
        assert!(!record.perfect_match());
        assert_close(record.cell_accuracy(), 2.0 / 9.0);
        assert_close(record.f1_alive(), 0.0);
        assert_close(record.correctness(), 0.0);
        assert_close(record.points(), 0.0);
    }

    #[test]
    fn test_inverted_prediction() {
        let predicted = grid("##\n##");
        let expected = grid("..\n..");
        let record = score(&predicted, &expected);
        assert_close(record.cell_accuracy(), 0.0);
        assert_close(record.f1_alive(), 0.0);
        assert_close(record.f1_dead(), 0.0);
        assert_close(record.correctness(), 0.0);
    }

    #[test]
    fn test_expected_all_dead() {
        let expected = grid("...\n...");

        let record = score(&grid("...\n..."), &expected);
        assert_close(record.f1_alive(), 1.0);
        assert_close(record.f1_dead(), 1.0);
        assert_close(record.correctness(), 1.0);
        assert_close(record.points(), 6.0);

        let record = score(&grid("...\n.#."), &expected);
        assert_close(record.f1_alive(), 0.0);
        assert_close(record.correctness(), 0.0);
        assert_close(record.cell_accuracy(), 5.0 / 6.0);
    }

    #[test]
    fn test_expected_all_alive() {
        let expected = grid("##\n##");
        assert_close(score(&grid("##\n##"), &expected).f1_dead(), 1.0);
        assert_close(score(&grid("#.\n##"), &expected).f1_dead(), 0.0);
    }

    #[test]
    fn test_absent_class_is_tagged() {
        let expected = grid("...");
        assert_eq!(
            ClassF1::evaluate(&grid("..."), &expected, CellClass::Alive),
            ClassF1::Absent {
                predicted_absent: true
            }
        );
        assert_eq!(
            ClassF1::evaluate(&grid("#.."), &expected, CellClass::Alive),
            ClassF1::Absent {
                predicted_absent: false
            }
        );
        assert!(ClassF1::evaluate(&grid("#.."), &expected, CellClass::Dead).is_measured());
    }

    #[test]
    fn test_partial_match() {
        // expected alive: (0,0), (1,1); predicted alive: (0,0), (1,0)
        let predicted = grid("#.\n#.");
        let expected = grid("#.\n.#");

        let alive = ClassCounts::count(&predicted, &expected, CellClass::Alive);
        assert_eq!(
            alive,
            ClassCounts {
                true_positives: 1,
                false_positives: 1,
                false_negatives: 1,
            }
        );

        let ClassF1::Measured {
            precision,
            recall,
            f1,
        } = ClassF1::from_counts(alive)
        else {
            panic!("alive class should be measured");
        };
        assert_close(precision, 0.5);
        assert_close(recall, 0.5);
        assert_close(f1, 0.5);

        let record = score(&predicted, &expected);
        assert_close(record.cell_accuracy(), 0.5);
        assert_close(record.f1_alive(), 0.5);
        assert_close(record.f1_dead(), 0.5);
        assert_close(record.correctness(), 0.5);
        assert_close(record.points(), 2.0);
    }

    #[test]
    fn test_geometric_mean_of_unequal_f1() {
        // alive: tp=1, fp=0, fn=1 -> p=1, r=0.5, f1=2/3
        // dead:  tp=2, fp=1, fn=0 -> p=2/3, r=1, f1=0.8
        let predicted = grid("#...");
        let expected = grid("##..");
        let record = score(&predicted, &expected);
        assert_close(record.f1_alive(), 2.0 / 3.0);
        assert_close(record.f1_dead(), 0.8);
        assert_close(record.correctness(), (2.0 / 3.0 * 0.8_f64).sqrt());
        assert_close(record.points(), 4.0 * (2.0 / 3.0 * 0.8_f64).sqrt());
    }

    #[test]
    fn test_no_predicted_cells_of_class() {
        let counts = ClassCounts {
            true_positives: 0,
            false_positives: 0,
            false_negatives: 3,
        };
        assert_eq!(
            ClassF1::from_counts(counts),
            ClassF1::Measured {
                precision: 0.0,
                recall: 0.0,
                f1: 0.0
            }
        );
    }

    #[test]
    fn test_record_serialization() {
        let record = score(&grid("#."), &grid("#."));
        let serialized = serde_json::to_string(&record).unwrap();
        assert_eq!(
            serialized,
            r#"{"cell_accuracy":1.0,"f1_alive":1.0,"f1_dead":1.0,"correctness":1.0,"perfect_match":true,"points":2.0}"#
        );
        let deserialized: ScoreRecord = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, record);
    }

    #[test]
    #[should_panic(expected = "same dimensions")]
    fn test_shape_mismatch_panics() {
        let _ = score(&grid("#."), &grid("#.\n.."));
    }
}
