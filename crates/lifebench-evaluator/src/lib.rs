//! Scoring of model answers for the lifebench benchmark.
//!
//! A benchmark answer goes through two stages:
//!
//! 1. **Extraction** ([`extractor`]) - recover the grid-shaped part of a free-form model
//!    response (reasoning text, fenced code blocks, stray symbols) and decode it.
//! 2. **Scoring** ([`scorer`]) - compare the predicted grid with the expected next
//!    generation and produce a [`ScoreRecord`](scorer::ScoreRecord).
//!
//! Per-test records are aggregated over a benchmark run with [`summary`].
//!
//! ```text
//! raw response ──extract──▶ candidate text ──decode──▶ predicted grid ──score──▶ ScoreRecord
//! ```
//!
//! # Example
//!
//! ```
//! use lifebench_engine::{CellSymbols, step};
//! use lifebench_evaluator::{extractor::ResponseExtractor, scorer};
//!
//! let initial = ".#.\n##.\n.#.".parse().unwrap();
//! let expected = step(&initial);
//!
//! let response = "Counting neighbours...\n```\n##.\n###\n##.\n```";
//! let extractor = ResponseExtractor::new(CellSymbols::DEFAULT);
//! let (_candidate, predicted) = extractor.extract_grid(response).unwrap();
//!
//! let record = scorer::score(&predicted, &expected);
//! assert!(record.perfect_match());
//! assert_eq!(record.points(), 9.0);
//! ```
//!
//! Nothing in this crate performs I/O or logs; every function is a pure function of its
//! inputs and safe to call from concurrent evaluation tasks.

pub mod extractor;
pub mod scorer;
pub mod summary;
