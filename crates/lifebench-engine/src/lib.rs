//! Game of Life grid engine for the lifebench benchmark.
//!
//! - [`core`] - the [`Grid`] data model and its line-based text codec
//! - [`engine`] - the one-step transition function and the seeded grid generator
//!
//! Everything in this crate is pure and synchronous: grids are immutable once built and
//! every operation returns a new value.
//!
//! # Example
//!
//! ```
//! use lifebench_engine::{CellSymbols, decode, encode, step};
//!
//! let grid = decode(".#.\n##.\n.#.", CellSymbols::DEFAULT).unwrap();
//! let next = step(&grid);
//! assert_eq!(encode(&next, CellSymbols::DEFAULT), "##.\n###\n##.");
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// The text or cell data does not describe a rectangular grid with at least one cell.
#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum ShapeError {
    #[display("grid dimensions must be non-zero, got {rows}x{cols}")]
    ZeroDimension { rows: usize, cols: usize },
    #[display("grid of {rows}x{cols} cells is too large to address")]
    TooLarge { rows: usize, cols: usize },
    #[display("grid text contains no rows")]
    Empty,
    #[display("row {row} has {actual} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[display("expected {expected} cells, got {actual}")]
    CellCount { expected: usize, actual: usize },
}

/// The alive/dead symbol pair cannot be decoded unambiguously.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SymbolError {
    #[display("alive and dead symbols must differ, both are {symbol:?}")]
    Identical { symbol: char },
    #[display("cell symbols must not be whitespace, got {symbol:?}")]
    Whitespace { symbol: char },
    #[display("cell symbols must not be the code fence character '`'")]
    FenceCharacter,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseGridSizeError {
    #[display("invalid grid size {input:?}: expected `N` or `ROWSxCOLS`")]
    Syntax { input: String },
    #[display("invalid grid size: {_0}")]
    Shape(ShapeError),
}
