use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ParseGridSizeError, ShapeError};

use super::codec::{self, CellSymbols};

/// Non-zero grid dimensions.
///
/// Text form is `ROWSxCOLS` (`5x7`); a single number `N` is accepted when parsing
/// and means a square `NxN` grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize {
    rows: usize,
    cols: usize,
}

impl GridSize {
    /// Creates a new grid size.
    ///
    /// Fails with [`ShapeError::ZeroDimension`] if either side is zero, and with
    /// [`ShapeError::TooLarge`] if `rows × cols` overflows `usize`.
    pub const fn new(rows: usize, cols: usize) -> Result<Self, ShapeError> {
        if rows == 0 || cols == 0 {
            return Err(ShapeError::ZeroDimension { rows, cols });
        }
        if rows.checked_mul(cols).is_none() {
            return Err(ShapeError::TooLarge { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Creates a square `side × side` grid size.
    pub const fn square(side: usize) -> Result<Self, ShapeError> {
        Self::new(side, side)
    }

    #[must_use]
    pub const fn rows(self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(self) -> usize {
        self.cols
    }

    /// Returns `rows × cols`.
    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.rows * self.cols
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

impl FromStr for GridSize {
    type Err = ParseGridSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let syntax_error = || ParseGridSizeError::Syntax {
            input: s.to_owned(),
        };
        let parse_side = |side: &str| side.trim().parse::<usize>().map_err(|_| syntax_error());

        let size = match s.trim().split_once(['x', 'X']) {
            Some((rows, cols)) => Self::new(parse_side(rows)?, parse_side(cols)?),
            None => Self::square(parse_side(s)?),
        };
        size.map_err(ParseGridSizeError::Shape)
    }
}

impl Serialize for GridSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GridSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Rectangular matrix of Game of Life cells (`true` = alive).
///
/// A `Grid` always has at least one row and one column, and it is never modified after
/// construction: [`step`](crate::step) and the codec produce new grids.
///
/// Cells are stored row-major. Reads go through [`Grid::get`], which returns `None`
/// outside `[0, rows) × [0, cols)`.
///
/// Serialized (serde) as its text form with the default symbols, e.g. `"##.\n###\n##."`.
///
/// # Example
///
/// ```
/// use lifebench_engine::{Grid, GridSize};
///
/// let size = GridSize::new(2, 3).unwrap();
/// let grid = Grid::from_fn(size, |row, col| row == col);
///
/// assert_eq!(grid.get(1, 1), Some(true));
/// assert_eq!(grid.get(1, 2), Some(false));
/// assert_eq!(grid.get(2, 0), None);
/// assert_eq!(grid.to_string(), "#..\n.#.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: GridSize,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates a grid with every cell dead.
    #[must_use]
    pub fn dead(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![false; size.cell_count()],
        }
    }

    /// Creates a grid by calling `f(row, col)` for every cell.
    ///
    /// Cells are visited in row-major order, so a stateful `f` (such as one drawing from
    /// a random source) sees a deterministic sequence.
    pub fn from_fn<F>(size: GridSize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut cells = Vec::with_capacity(size.cell_count());
        for row in 0..size.rows() {
            for col in 0..size.cols() {
                cells.push(f(row, col));
            }
        }
        Self { size, cells }
    }

    /// Creates a grid from row-major cell states.
    pub fn from_cells(size: GridSize, cells: Vec<bool>) -> Result<Self, ShapeError> {
        if cells.len() != size.cell_count() {
            return Err(ShapeError::CellCount {
                expected: size.cell_count(),
                actual: cells.len(),
            });
        }
        Ok(Self { size, cells })
    }

    /// Creates a grid from nested rows.
    ///
    /// All rows must have the same non-zero length.
    pub fn from_rows<I, R>(rows: I) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = bool>,
    {
        let mut cells = vec![];
        let mut num_rows = 0;
        let mut num_cols = None;
        for (row, cols) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(cols);
            let actual = cells.len() - before;
            let expected = *num_cols.get_or_insert(actual);
            if actual != expected {
                return Err(ShapeError::RaggedRows {
                    row,
                    expected,
                    actual,
                });
            }
            num_rows += 1;
        }
        let num_cols = num_cols.ok_or(ShapeError::Empty)?;
        let size = GridSize::new(num_rows, num_cols)?;
        Self::from_cells(size, cells)
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.size.rows()
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.size.cols()
    }

    /// Returns the state of the cell at `(row, col)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        (row < self.rows() && col < self.cols()).then(|| self.cells[row * self.cols() + col])
    }

    /// Like [`Self::get`], for coordinates already known to be inside the grid.
    pub(crate) fn at(&self, row: usize, col: usize) -> bool {
        debug_assert!(row < self.rows() && col < self.cols());
        self.cells[row * self.cols() + col]
    }

    /// Returns all cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Returns an iterator over the rows of the grid.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks_exact(self.cols())
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|alive| **alive).count()
    }

    #[must_use]
    pub fn dead_count(&self) -> usize {
        self.cells.len() - self.alive_count()
    }

    pub(crate) fn write_text<W>(&self, out: &mut W, symbols: CellSymbols) -> fmt::Result
    where
        W: fmt::Write,
    {
        for (i, row) in self.iter_rows().enumerate() {
            if i > 0 {
                out.write_char('\n')?;
            }
            for &alive in row {
                out.write_char(symbols.symbol_for(alive))?;
            }
        }
        Ok(())
    }
}

/// Renders the grid with [`CellSymbols::DEFAULT`].
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_text(f, CellSymbols::DEFAULT)
    }
}

/// Decodes the grid with [`CellSymbols::DEFAULT`].
impl FromStr for Grid {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        codec::decode(s, CellSymbols::DEFAULT)
    }
}

impl Serialize for Grid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid grid text: {e}")))
    }
}
