use crate::core::Grid;

/// Computes the next generation of `grid`.
///
/// Each cell counts its alive neighbours among the 8 surrounding cells. Cells outside
/// the grid count as dead; there is no wraparound.
///
/// - An alive cell with 2 or 3 alive neighbours survives, otherwise it dies.
/// - A dead cell with exactly 3 alive neighbours becomes alive, otherwise it stays dead.
///
/// The result has the same dimensions as the input.
#[must_use]
pub fn step(grid: &Grid) -> Grid {
    Grid::from_fn(grid.size(), |row, col| {
        let alive = grid.at(row, col);
        matches!(
            (alive, grid.live_neighbors(row, col)),
            (true, 2 | 3) | (false, 3)
        )
    })
}

impl Grid {
    /// Returns the next generation of this grid. See [`step`].
    #[must_use]
    pub fn next_generation(&self) -> Self {
        step(self)
    }

    /// Counts alive cells at Chebyshev distance 1 from `(row, col)`.
    ///
    /// The 3×3 window is clipped to the grid bounds.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the grid.
    #[must_use]
    pub fn live_neighbors(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows() && col < self.cols(),
            "cell ({row}, {col}) is outside the {} grid",
            self.size()
        );
        let rows = row.saturating_sub(1)..=usize::min(row + 1, self.rows() - 1);
        let cols = col.saturating_sub(1)..=usize::min(col + 1, self.cols() - 1);
        rows.flat_map(|y| cols.clone().map(move |x| (y, x)))
            .filter(|&(y, x)| (y, x) != (row, col) && self.at(y, x))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::GridSize;

    use super::*;

    fn grid(text: &str) -> Grid {
        text.parse().unwrap()
    }

    #[test]
    fn test_empty_board_stays_empty() {
        let board = Grid::dead(GridSize::square(5).unwrap());
        assert_eq!(step(&board), board);
    }

    #[test]
    fn test_lonely_cell_dies() {
        let board = grid(
            "
.....
.....
..#..
.....
.....",
        );
        assert_eq!(step(&board).alive_count(), 0);
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = grid(
            "
.....
.....
.###.
.....
.....",
        );
        let vertical = grid(
            "
.....
..#..
..#..
..#..
.....",
        );
        assert_eq!(step(&horizontal), vertical);
        assert_eq!(step(&vertical), horizontal);
    }

    #[test]
    fn test_block_is_fixed_point() {
        let block = grid("##\n##");
        assert_eq!(step(&block), block);

        let padded = grid(
            "
....
.##.
.##.
....",
        );
        assert_eq!(step(&padded), padded);
    }

    #[test]
    fn test_overpopulation() {
        let cross = grid(
            "
.....
..#..
.###.
..#..
.....",
        );
        assert_eq!(cross.live_neighbors(2, 2), 4);
        assert_eq!(step(&cross).get(2, 2), Some(false));
    }

    #[test]
    fn test_birth_with_three_neighbors() {
        let l_shape = grid(
            "
.....
.##..
.#...
.....
.....",
        );
        assert_eq!(l_shape.live_neighbors(2, 2), 3);
        assert_eq!(step(&l_shape).get(2, 2), Some(true));
    }

    #[test]
    fn test_edges_are_dead() {
        let board = grid("##.\n...\n...");
        let next = step(&board);
        assert_eq!(next.get(0, 0), Some(false));
        assert_eq!(next.get(0, 1), Some(false));

        // On a torus the bottom row would also count the top row as neighbours.
        let top = grid("###\n...\n...");
        assert_eq!(step(&top), grid(".#.\n.#.\n..."));
    }

    #[test]
    fn test_single_cell_grid() {
        let alive = grid("#");
        assert_eq!(alive.live_neighbors(0, 0), 0);
        assert_eq!(step(&alive), grid("."));

        let dead = grid(".");
        assert_eq!(step(&dead), dead);
    }

    #[test]
    fn test_degenerate_dimensions() {
        let row = grid("###");
        assert_eq!(step(&row), grid(".#."));

        let column = grid("#\n#\n#");
        assert_eq!(step(&column), grid(".\n#\n."));
    }

    #[test]
    fn test_corner_neighbor_window() {
        let full = Grid::from_fn(GridSize::new(3, 4).unwrap(), |_, _| true);
        assert_eq!(full.live_neighbors(0, 0), 3);
        assert_eq!(full.live_neighbors(0, 1), 5);
        assert_eq!(full.live_neighbors(1, 1), 8);
        assert_eq!(full.live_neighbors(2, 3), 3);
    }

    #[test]
    fn test_reference_scenario() {
        let initial = grid(".#.\n##.\n.#.");
        assert_eq!(step(&initial), grid("##.\n###\n##."));
        assert_eq!(initial.next_generation(), step(&initial));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_live_neighbors_out_of_bounds() {
        let _ = grid("..\n..").live_neighbors(2, 0);
    }
}
