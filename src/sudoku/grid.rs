//! 9x9 Sudoku grid

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the grid
pub const SIZE: usize = 9;
/// Side length of a block
pub const BLOCK: usize = 3;

/// A 9x9 Sudoku grid, `0` meaning blank.
///
/// Serialized as its rows; deserializing goes through [`SudokuGrid::from_rows`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct SudokuGrid {
    cells: [[u8; SIZE]; SIZE],
}

impl SudokuGrid {
    /// An all-blank grid
    pub fn empty() -> Self {
        Self {
            cells: [[0; SIZE]; SIZE],
        }
    }

    /// Create a grid from rows, rejecting wrong dimensions and digits above 9
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        if rows.len() != SIZE {
            return Err(Error::InvalidRowCount {
                expected: SIZE,
                found: rows.len(),
            });
        }

        let mut grid = Self::empty();
        for (row, values) in rows.iter().enumerate() {
            if values.len() != SIZE {
                return Err(Error::InvalidRowLength {
                    row,
                    expected: SIZE,
                    found: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                grid.set(row, col, value)?;
            }
        }
        Ok(grid)
    }

    /// Get cell value at coordinates
    pub fn get(&self, row: usize, col: usize) -> u8 {
        if row < SIZE && col < SIZE {
            self.cells[row][col]
        } else {
            0 // Out of bounds cells read as blank
        }
    }

    /// Set cell value at coordinates
    pub fn set(&mut self, row: usize, col: usize, value: u8) -> Result<()> {
        if row >= SIZE || col >= SIZE {
            return Err(Error::CellOutOfRange { row, col, size: SIZE });
        }
        if value > SIZE as u8 {
            return Err(Error::InvalidDigit { row, col, value });
        }
        self.cells[row][col] = value;
        Ok(())
    }

    /// Rows as nested vectors
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells.iter().map(|row| row.to_vec()).collect()
    }

    /// Non-blank cells as `(row, col, value)`
    pub fn givens(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, values)| {
            values
                .iter()
                .enumerate()
                .filter(|(_, &value)| value != 0)
                .map(move |(col, &value)| (row, col, value))
        })
    }

    pub fn given_count(&self) -> usize {
        self.givens().count()
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().flatten().all(|&value| value != 0)
    }

    /// Rule violations among the filled cells (duplicates in a row, column or block)
    pub fn violations(&self) -> Vec<String> {
        let mut violations = Vec::new();

        for i in 0..SIZE {
            let row: Vec<u8> = (0..SIZE).map(|c| self.get(i, c)).collect();
            if let Some(dup) = first_duplicate(&row) {
                violations.push(format!("row {} repeats {}", i, dup));
            }
            let col: Vec<u8> = (0..SIZE).map(|r| self.get(r, i)).collect();
            if let Some(dup) = first_duplicate(&col) {
                violations.push(format!("column {} repeats {}", i, dup));
            }
        }

        for block in 0..SIZE {
            let (br, bc) = ((block / BLOCK) * BLOCK, (block % BLOCK) * BLOCK);
            let values: Vec<u8> = (0..SIZE)
                .map(|k| self.get(br + k / BLOCK, bc + k % BLOCK))
                .collect();
            if let Some(dup) = first_duplicate(&values) {
                violations.push(format!("block {} repeats {}", block, dup));
            }
        }

        violations
    }

    /// Whether this grid is a complete, rule-abiding filling of `puzzle`
    pub fn is_solution_of(&self, puzzle: &SudokuGrid) -> bool {
        self.is_complete()
            && self.violations().is_empty()
            && puzzle.givens().all(|(row, col, value)| self.get(row, col) == value)
    }

    /// The 81-character line form, `0` for blanks
    pub fn to_line(&self) -> String {
        self.cells
            .iter()
            .flatten()
            .map(|&value| char::from(b'0' + value))
            .collect()
    }
}

impl Default for SudokuGrid {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Vec<Vec<u8>>> for SudokuGrid {
    type Error = Error;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<SudokuGrid> for Vec<Vec<u8>> {
    fn from(grid: SudokuGrid) -> Self {
        grid.to_rows()
    }
}

fn first_duplicate(values: &[u8]) -> Option<u8> {
    let mut seen = [false; SIZE + 1];
    for &value in values.iter().filter(|&&v| v != 0) {
        if seen[value as usize] {
            return Some(value);
        }
        seen[value as usize] = true;
    }
    None
}

impl fmt::Display for SudokuGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            if row > 0 && row % BLOCK == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for col in 0..SIZE {
                if col > 0 && col % BLOCK == 0 {
                    write!(f, "| ")?;
                }
                match self.get(row, col) {
                    0 => write!(f, ".")?,
                    value => write!(f, "{}", value)?,
                }
                if col + 1 < SIZE {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
