use crate::{ShapeError, SymbolError};

use super::grid::{Grid, GridSize};

/// Characters used for alive and dead cells in the text form of a grid.
///
/// The pair is always passed explicitly to [`encode`] and [`decode`], so concurrent
/// evaluations can use different symbol sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellSymbols {
    alive: char,
    dead: char,
}

impl Default for CellSymbols {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CellSymbols {
    /// `#` for alive cells, `.` for dead cells.
    pub const DEFAULT: Self = Self {
        alive: '#',
        dead: '.',
    };

    /// Creates a symbol pair.
    ///
    /// The symbols must differ and must not be whitespace, since the decoder trims
    /// blank lines around the grid. The backtick is also rejected: a row of backticks
    /// would read as a code fence when the answer is extracted.
    pub fn new(alive: char, dead: char) -> Result<Self, SymbolError> {
        for symbol in [alive, dead] {
            if symbol.is_whitespace() {
                return Err(SymbolError::Whitespace { symbol });
            }
            if symbol == '`' {
                return Err(SymbolError::FenceCharacter);
            }
        }
        if alive == dead {
            return Err(SymbolError::Identical { symbol: alive });
        }
        Ok(Self { alive, dead })
    }

    #[must_use]
    pub const fn alive(self) -> char {
        self.alive
    }

    #[must_use]
    pub const fn dead(self) -> char {
        self.dead
    }

    #[must_use]
    pub const fn symbol_for(self, alive: bool) -> char {
        if alive { self.alive } else { self.dead }
    }

    /// Returns `true` if `c` is one of the two symbols.
    #[must_use]
    pub fn contains(self, c: char) -> bool {
        c == self.alive || c == self.dead
    }
}

/// Renders a grid as text: one line per row, one symbol per cell, rows joined by `\n`.
///
/// There is no trailing newline.
#[must_use]
pub fn encode(grid: &Grid, symbols: CellSymbols) -> String {
    let mut text = String::with_capacity(grid.rows() * (grid.cols() + 1));
    grid.write_text(&mut text, symbols)
        .expect("writing to a String cannot fail");
    text
}

/// Parses the text form of a grid.
///
/// Blank lines before and after the grid are ignored; every other line is one row.
/// A character equal to `symbols.alive()` is an alive cell, and any other character
/// (the dead symbol, whitespace, or anything unexpected) is a dead cell.
///
/// # Errors
///
/// - [`ShapeError::Empty`] if the text has no non-blank line
/// - [`ShapeError::RaggedRows`] if the rows do not all have the same length
///
/// # Example
///
/// ```
/// use lifebench_engine::{CellSymbols, ShapeError, decode};
///
/// let grid = decode("\n#.\n.#\n\n", CellSymbols::DEFAULT).unwrap();
/// assert_eq!((grid.rows(), grid.cols()), (2, 2));
///
/// let err = decode("#.\n#", CellSymbols::DEFAULT).unwrap_err();
/// assert!(matches!(err, ShapeError::RaggedRows { row: 1, .. }));
/// ```
pub fn decode(text: &str, symbols: CellSymbols) -> Result<Grid, ShapeError> {
    let lines = text.lines().collect::<Vec<_>>();
    let is_blank = |line: &&str| line.trim().is_empty();
    let first = lines
        .iter()
        .position(|line| !is_blank(line))
        .ok_or(ShapeError::Empty)?;
    let last = lines
        .iter()
        .rposition(|line| !is_blank(line))
        .ok_or(ShapeError::Empty)?;
    let block = &lines[first..=last];

    let cols = block[0].chars().count();
    let mut cells = Vec::with_capacity(block.len() * cols);
    for (row, line) in block.iter().enumerate() {
        let before = cells.len();
        cells.extend(line.chars().map(|c| c == symbols.alive()));
        let actual = cells.len() - before;
        if actual != cols {
            return Err(ShapeError::RaggedRows {
                row,
                expected: cols,
                actual,
            });
        }
    }

    let size = GridSize::new(block.len(), cols)?;
    Grid::from_cells(size, cells)
}
