use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{
    ShapeError,
    core::{Grid, GridSize},
};

/// Parameters identifying a reproducible benchmark grid.
///
/// Two specs with identical fields always generate bit-identical grids, across runs and
/// across processes, so benchmark results for the same spec are comparable.
///
/// # Random Source
///
/// The generator is part of the contract:
///
/// 1. Seed a [`Pcg32`] (PCG-XSH-RR 64/32) with [`SeedableRng::seed_from_u64`](rand::SeedableRng::seed_from_u64)
/// 2. Visit cells in row-major order
/// 3. For each cell draw one uniform `f64` in `[0, 1)`; the cell is alive iff the draw is
///    below `density`
///
/// `density` is clamped to `[0, 1]` (NaN is treated as 0).
///
/// # Example
///
/// ```
/// use lifebench_engine::{DifficultySpec, GridSize};
///
/// let spec = DifficultySpec::new(GridSize::new(8, 8).unwrap(), 0.3, 42);
/// assert_eq!(spec.generate(), spec.generate());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultySpec {
    pub size: GridSize,
    pub density: f64,
    pub seed: u64,
}

impl DifficultySpec {
    pub const DEFAULT_DENSITY: f64 = 0.3;
    pub const DEFAULT_SEED: u64 = 42;

    #[must_use]
    pub const fn new(size: GridSize, density: f64, seed: u64) -> Self {
        Self {
            size,
            density,
            seed,
        }
    }

    /// Density actually used for generation, clamped to `[0, 1]`.
    #[must_use]
    pub fn effective_density(&self) -> f64 {
        if self.density.is_nan() {
            0.0
        } else {
            self.density.clamp(0.0, 1.0)
        }
    }

    /// Generates the initial grid for this spec.
    #[must_use]
    pub fn generate(&self) -> Grid {
        let density = self.effective_density();
        let mut rng = Pcg32::seed_from_u64(self.seed);
        Grid::from_fn(self.size, |_, _| rng.random::<f64>() < density)
    }
}

/// Generates a random grid where each cell is alive with probability `density`.
///
/// See [`DifficultySpec`] for the exact random source and draw order.
///
/// # Errors
///
/// Returns [`ShapeError::ZeroDimension`] if `rows` or `cols` is zero.
pub fn generate(rows: usize, cols: usize, density: f64, seed: u64) -> Result<Grid, ShapeError> {
    let size = GridSize::new(rows, cols)?;
    Ok(DifficultySpec::new(size, density, seed).generate())
}
