//! Recovery of a grid from free-form model output.
//!
//! Models usually reason in prose before giving their answer, and they are asked to put
//! the final grid in a fenced code block. The extractor tries three tiers, in order:
//!
//! 1. **Fenced block** - the *last* triple-backtick block in the response, if its content
//!    is non-empty. An info string directly after the opening fence (```` ```text ````) is
//!    skipped. Earlier blocks are never used when a later one exists.
//! 2. **Symbol run** - the last maximal run of consecutive lines made only of the alive
//!    and dead symbols (ignoring surrounding whitespace) whose lines all have the same
//!    length.
//! 3. **Whole response** - the entire response, trimmed.
//!
//! Only an empty response fails with [`NoCandidateFound`]. Whether the chosen candidate
//! decodes into a grid of the right shape is decided later, by
//! [`decode`](lifebench_engine::decode) and by the caller.

use std::sync::LazyLock;

use lifebench_engine::{CellSymbols, Grid, ShapeError, decode};
use regex::Regex;
use serde::{Deserialize, Serialize};

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:\w*\r?\n)?(.*?)```").expect("fenced block pattern should be valid")
});

/// Which extraction tier produced a [`Candidate`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    #[display("fenced block")]
    FencedBlock,
    #[display("symbol run")]
    SymbolRun,
    #[display("whole response")]
    WholeResponse,
}

/// Text selected from a model response as the most likely answer grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    text: String,
    source: CandidateSource,
}

impl Candidate {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn source(&self) -> CandidateSource {
        self.source
    }

    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

/// The response is empty, so there is nothing to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no candidate grid text found in response")]
pub struct NoCandidateFound;

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
    derive_more::IsVariant,
)]
pub enum ExtractionError {
    #[display("{_0}")]
    NoCandidate(NoCandidateFound),
    #[display("candidate text is not a grid: {_0}")]
    Shape(ShapeError),
}

/// Extracts answer grids from model responses using a given symbol pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseExtractor {
    symbols: CellSymbols,
}

impl ResponseExtractor {
    #[must_use]
    pub const fn new(symbols: CellSymbols) -> Self {
        Self { symbols }
    }

    #[must_use]
    pub const fn symbols(&self) -> CellSymbols {
        self.symbols
    }

    /// Selects the candidate answer text from `response`.
    ///
    /// See the [module documentation](self) for the tier order.
    ///
    /// The content of a fenced block is returned as is, without checking that it is
    /// rectangular. Only the unfenced symbol-run tier requires a rectangular block.
    pub fn extract(&self, response: &str) -> Result<Candidate, NoCandidateFound> {
        if let Some(text) = last_fenced_block(response) {
            return Ok(Candidate {
                text: text.to_owned(),
                source: CandidateSource::FencedBlock,
            });
        }
        if let Some(text) = self.last_symbol_run(response) {
            return Ok(Candidate {
                text,
                source: CandidateSource::SymbolRun,
            });
        }
        let whole = response.trim();
        if whole.is_empty() {
            return Err(NoCandidateFound);
        }
        Ok(Candidate {
            text: whole.to_owned(),
            source: CandidateSource::WholeResponse,
        })
    }

    /// Selects the candidate answer text and decodes it into a grid.
    pub fn extract_grid(&self, response: &str) -> Result<(Candidate, Grid), ExtractionError> {
        let candidate = self.extract(response)?;
        let grid = decode(candidate.text(), self.symbols)?;
        Ok((candidate, grid))
    }

    fn is_symbol_line(&self, line: &str) -> bool {
        !line.is_empty() && line.chars().all(|c| self.symbols.contains(c))
    }

    fn last_symbol_run(&self, response: &str) -> Option<String> {
        let lines = response.lines().map(str::trim).collect::<Vec<_>>();
        lines
            .chunk_by(|a, b| self.is_symbol_line(a) == self.is_symbol_line(b))
            .filter(|run| self.is_symbol_line(run[0]))
            .rfind(|run| is_rectangular(run))
            .map(|run| run.join("\n"))
    }
}

/// Selects the candidate answer text from `response` using [`CellSymbols::DEFAULT`].
pub fn extract(response: &str) -> Result<Candidate, NoCandidateFound> {
    ResponseExtractor::default().extract(response)
}

fn last_fenced_block(response: &str) -> Option<&str> {
    FENCED_BLOCK
        .captures_iter(response)
        .filter_map(|captures| captures.get(1))
        .last()
        .map(|content| content.as_str().trim())
        .filter(|content| !content.is_empty())
}

fn is_rectangular(lines: &[&str]) -> bool {
    let width = lines[0].chars().count();
    lines.iter().all(|line| line.chars().count() == width)
}
