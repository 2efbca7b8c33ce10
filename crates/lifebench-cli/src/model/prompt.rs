use lifebench_engine::{CellSymbols, Grid, encode};

/// Builds the instruction sent to the model for predicting the next generation of
/// `initial`.
///
/// The board is rendered with `symbols`, and the rules refer to the same symbols.
#[must_use]
pub fn build_prompt(initial: &Grid, symbols: CellSymbols) -> String {
    let board = encode(initial, symbols);
    let alive = symbols.alive();
    let dead = symbols.dead();
    format!(
        "\
You are playing Conway's Game of Life. Given the current board state below, compute the next generation.

Rules:
- Any live cell ({alive}) with 2-3 live neighbors survives
- Any dead cell ({dead}) with exactly 3 live neighbors becomes alive
- All other cells die or stay dead
- Neighbors are the 8 adjacent cells (horizontal, vertical, and diagonal)
- Cells outside the grid boundaries are considered dead

Current board state:
```
{board}
```

Think through this carefully. For each cell, count its live neighbors and apply the rules.

After your reasoning, output ONLY the final board in a code block like this:
```
<your board here>
```
Use '{alive}' for live cells and '{dead}' for dead cells. The board must be the same dimensions as the input."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_board() {
        let grid = ".#.\n##.\n.#.".parse().unwrap();
        let prompt = build_prompt(&grid, CellSymbols::DEFAULT);
        assert!(prompt.starts_with("You are playing Conway's Game of Life."));
        assert!(prompt.contains("Current board state:\n```\n.#.\n##.\n.#.\n```\n"));
        assert!(prompt.contains("Use '#' for live cells and '.' for dead cells."));
        assert!(prompt.ends_with("The board must be the same dimensions as the input."));
    }

    #[test]
    fn test_prompt_uses_custom_symbols() {
        let grid = "#.\n.#".parse().unwrap();
        let symbols = CellSymbols::new('O', '-').unwrap();
        let prompt = build_prompt(&grid, symbols);
        assert!(prompt.contains("```\nO-\n-O\n```"));
        assert!(prompt.contains("Any live cell (O)"));
        assert!(prompt.contains("Any dead cell (-)"));
        assert!(!prompt.contains("'#'"));
    }
}
