//! Grid data model and its text representation.
//!
//! - [`Grid`] - immutable rectangular matrix of alive/dead cells
//! - [`GridSize`] - validated, non-zero grid dimensions
//! - [`CellSymbols`] - the alive/dead character pair used by the text codec
//! - [`encode`] / [`decode`] - conversion between a grid and its line-per-row text form

pub use self::{codec::*, grid::*};

mod codec;
mod grid;
