//! Grid evolution and test-case generation.
//!
//! - [`step`] - computes the next Game of Life generation with a dead boundary
//! - [`generate`] / [`DifficultySpec`] - reproducible random grids from a seed
//!
//! # Example
//!
//! ```
//! use lifebench_engine::{DifficultySpec, GridSize, step};
//!
//! let spec = DifficultySpec::new(GridSize::square(5).unwrap(), 0.3, 42);
//! let initial = spec.generate();
//! let expected = step(&initial);
//!
//! assert_eq!(initial, spec.generate());
//! assert_eq!(expected.size(), initial.size());
//! ```

pub use self::{generator::*, life::*};

mod generator;
mod life;
