use std::fmt;

/// A complete board: one queen column per row.
pub type Solution = Vec<u8>;

/// A partially assigned N-queens board.
/// One cell per row, `None` = no queen placed in that row yet.
///
/// Boards have value semantics: they are cloned into the work queue and
/// out to each worker, never shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Option<u8>>,
}

impl Board {
    /// Creates an empty board of the given size.
    pub fn empty(size: usize) -> Self {
        Board {
            cells: vec![None; size],
        }
    }

    /// Reconstructs a board from a complete solution.
    pub fn from_solution(solution: &[u8]) -> Self {
        Board {
            cells: solution.iter().map(|&col| Some(col)).collect(),
        }
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, row: usize) -> Option<u8> {
        self.cells[row]
    }

    /// Places a queen. The row must be unassigned.
    pub fn place(&mut self, row: usize, col: u8) {
        debug_assert!(
            self.cells[row].is_none(),
            "Trying to place a queen in the already assigned row {}.",
            row
        );
        self.cells[row] = Some(col);
    }

    /// Removes the queen from a row during backtracking.
    pub fn clear(&mut self, row: usize) {
        self.cells[row] = None;
    }

    /// Number of rows with a queen placed.
    pub fn assigned_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Index of the lowest unassigned row, `None` when the board is complete.
    pub fn first_unassigned_row(&self) -> Option<usize> {
        self.cells.iter().position(|c| c.is_none())
    }

    /// Checks whether a queen at `(row, col)` would be attacked by any
    /// already placed queen in another row.
    pub fn conflicts(&self, row: usize, col: u8) -> bool {
        for (other_row, cell) in self.cells.iter().enumerate() {
            if other_row == row {
                continue;
            }
            let Some(other_col) = *cell else { continue };
            if Self::attacks(row, col, other_row, other_col) {
                return true;
            }
        }
        false
    }

    /// Checks that no two placed queens attack each other.
    pub fn is_consistent(&self) -> bool {
        for (row, cell) in self.cells.iter().enumerate() {
            let Some(col) = *cell else { continue };
            for (other_row, other_cell) in self.cells.iter().enumerate().skip(row + 1) {
                let Some(other_col) = *other_cell else { continue };
                if Self::attacks(row, col, other_row, other_col) {
                    return false;
                }
            }
        }
        true
    }

    /// Converts a complete board to a solution. `None` if any row is unassigned.
    pub fn to_solution(&self) -> Option<Solution> {
        self.cells.iter().copied().collect()
    }

    /// True when two queens at the given squares attack each other.
    /// Rows are distinct by construction, so only columns and diagonals matter.
    pub fn attacks(row_a: usize, col_a: u8, row_b: usize, col_b: u8) -> bool {
        if col_a == col_b {
            return true;
        }
        let row_diff = row_a.abs_diff(row_b);
        let col_diff = (col_a as usize).abs_diff(col_b as usize);
        row_diff == col_diff
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size();
        for row in 0..size {
            for col in 0..size as u8 {
                if self.cells[row] == Some(col) {
                    write!(f, "Q ")?;
                } else {
                    write!(f, ". ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
