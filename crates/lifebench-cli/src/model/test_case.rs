use std::{fs, path::Path};

use anyhow::{Context as _, bail, ensure};
use lifebench_engine::{DifficultySpec, Grid, GridSize};
use serde::{Deserialize, Serialize};

/// Grid size presets.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::FromStr,
)]
pub enum Difficulty {
    /// 3×3
    #[default]
    Easy,
    /// 5×5
    Medium,
    /// 8×8
    Hard,
    /// 10×10
    Expert,
}

impl Difficulty {
    #[must_use]
    pub const fn side(self) -> usize {
        match self {
            Self::Easy => 3,
            Self::Medium => 5,
            Self::Hard => 8,
            Self::Expert => 10,
        }
    }

    #[must_use]
    pub fn size(self) -> GridSize {
        GridSize::square(self.side()).expect("preset sides are non-zero")
    }
}

/// One benchmark question: a labelled, reproducible initial grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub label: String,
    pub spec: DifficultySpec,
}

impl TestCase {
    pub const ADVANCED_LABEL: &'static str = "Advanced";
    const ADVANCED_BASE_SEED: u64 = 42;

    #[must_use]
    pub fn new(label: impl Into<String>, spec: DifficultySpec) -> Self {
        Self {
            label: label.into(),
            spec,
        }
    }

    #[must_use]
    pub fn preset(difficulty: Difficulty, density: f64, seed: u64) -> Self {
        Self::new(
            difficulty.to_string(),
            DifficultySpec::new(difficulty.size(), density, seed),
        )
    }

    #[must_use]
    pub fn initial_grid(&self) -> Grid {
        self.spec.generate()
    }

    /// Points awarded for a perfect answer.
    #[must_use]
    pub fn max_points(&self) -> usize {
        self.spec.size.cell_count()
    }
}

/// The built-in suite: two or three seeds per difficulty at the default density.
#[must_use]
pub fn default_suite() -> Vec<TestCase> {
    use Difficulty::{Easy, Expert, Hard, Medium};

    [
        (Easy, 42),
        (Easy, 43),
        (Medium, 42),
        (Medium, 43),
        (Medium, 44),
        (Hard, 42),
        (Hard, 43),
        (Expert, 42),
        (Expert, 43),
    ]
    .into_iter()
    .map(|(difficulty, seed)| {
        TestCase::preset(difficulty, DifficultySpec::DEFAULT_DENSITY, seed)
    })
    .collect()
}

/// Reads a suite file. See [`parse_suite`] for the format.
pub fn load_suite<P>(path: P) -> anyhow::Result<Vec<TestCase>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read test suite file: {}", path.display()))?;
    parse_suite(&text).with_context(|| format!("Invalid test suite file: {}", path.display()))
}

/// Parses a suite definition.
///
/// Each non-blank line defines one test as a size and a density, separated by whitespace
/// or a comma. The size is either a side length (`8`) or `<rows>x<cols>` (`6x10`).
/// Everything after `#` is a comment.
///
/// ```text
/// # size  density
/// 5       0.3
/// 8x12,   0.45
/// ```
///
/// The n-th test (counting from 1) is labelled `Advanced` and uses seed `42 + n`.
pub fn parse_suite(text: &str) -> anyhow::Result<Vec<TestCase>> {
    let mut cases = vec![];
    for (line_index, line) in text.lines().enumerate() {
        let content = line.split_once('#').map_or(line, |(content, _)| content);
        let mut fields = content
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|field| !field.is_empty());
        let Some(size) = fields.next() else {
            continue;
        };
        let line_number = line_index + 1;
        let (Some(density), None) = (fields.next(), fields.next()) else {
            bail!("line {line_number}: expected `<size> <density>`, got `{}`", line.trim());
        };

        let size = size
            .parse::<GridSize>()
            .with_context(|| format!("line {line_number}: invalid size `{size}`"))?;
        let density = density
            .parse::<f64>()
            .with_context(|| format!("line {line_number}: invalid density `{density}`"))?;
        ensure!(
            (0.0..=1.0).contains(&density),
            "line {line_number}: density must be between 0 and 1, got {density}"
        );

        let seed = TestCase::ADVANCED_BASE_SEED + cases.len() as u64 + 1;
        cases.push(TestCase::new(
            TestCase::ADVANCED_LABEL,
            DifficultySpec::new(size, density, seed),
        ));
    }
    ensure!(!cases.is_empty(), "no test cases defined");
    Ok(cases)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("Expert".parse::<Difficulty>().unwrap(), Difficulty::Expert);
        assert!("impossible".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Hard.to_string(), "Hard");
        assert_eq!(Difficulty::Hard.size().to_string(), "8x8");
    }

    #[test]
    fn test_default_suite() {
        let suite = default_suite();
        assert_eq!(suite.len(), 9);
        let summary = suite
            .iter()
            .map(|case| (case.label.as_str(), case.spec.size.rows(), case.spec.seed))
            .collect::<Vec<_>>();
        assert_eq!(
            summary,
            [
                ("Easy", 3, 42),
                ("Easy", 3, 43),
                ("Medium", 5, 42),
                ("Medium", 5, 43),
                ("Medium", 5, 44),
                ("Hard", 8, 42),
                ("Hard", 8, 43),
                ("Expert", 10, 42),
                ("Expert", 10, 43),
            ]
        );
        assert!(suite.iter().all(|case| case.spec.density == 0.3));
        assert_eq!(
            suite.iter().map(TestCase::max_points).sum::<usize>(),
            2 * 9 + 3 * 25 + 2 * 64 + 2 * 100
        );
    }

    #[test]
    fn test_parse_suite() {
        let text = "\
# advanced tests
5 0.3

8x12, 0.45   # wide board
  10\t0.5
";
        let suite = parse_suite(text).unwrap();
        assert_eq!(suite.len(), 3);

        assert_eq!(suite[0].label, "Advanced");
        assert_eq!(suite[0].spec.size, GridSize::square(5).unwrap());
        assert_eq!(suite[0].spec.density, 0.3);
        assert_eq!(suite[0].spec.seed, 43);

        assert_eq!(suite[1].spec.size, GridSize::new(8, 12).unwrap());
        assert_eq!(suite[1].spec.density, 0.45);
        assert_eq!(suite[1].spec.seed, 44);
        assert_eq!(suite[1].max_points(), 96);

        assert_eq!(suite[2].spec.seed, 45);
    }

    #[test]
    fn test_parse_suite_errors_name_the_line() {
        let err = parse_suite("5 0.3\n7\n").unwrap_err();
        assert!(err.to_string().starts_with("line 2:"), "{err}");

        let err = parse_suite("5 0.3 extra").unwrap_err();
        assert!(err.to_string().starts_with("line 1:"), "{err}");

        let err = parse_suite("\n\nabc 0.3").unwrap_err();
        assert!(err.to_string().contains("line 3: invalid size"), "{err}");

        let err = parse_suite("0 0.3").unwrap_err();
        assert!(err.to_string().contains("line 1: invalid size"), "{err}");

        let huge = format!("2 0.3\n{0}x{0} 0.3", usize::MAX);
        let err = parse_suite(&huge).unwrap_err();
        assert!(err.to_string().contains("line 2: invalid size"), "{err}");
        assert!(format!("{err:#}").contains("too large"), "{err:#}");

        let err = parse_suite("4 dense").unwrap_err();
        assert!(err.to_string().contains("invalid density"), "{err}");

        let err = parse_suite("4 1.5").unwrap_err();
        assert!(err.to_string().contains("between 0 and 1"), "{err}");
    }

    #[test]
    fn test_parse_empty_suite() {
        let err = parse_suite("# nothing here\n\n").unwrap_err();
        assert!(err.to_string().contains("no test cases"));
    }
}
