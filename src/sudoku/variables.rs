//! Sudoku variable numbering
//!
//! `cell (row, col) holds value` is variable `81 * row + 9 * col + value`,
//! giving IDs `1..=729` in row-major order.

use super::grid::SIZE;
use crate::error::{Error, Result};
use crate::sat::VariableEncoding;

/// A Sudoku proposition: cell `(row, col)` holds `value`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellValue {
    pub row: usize,
    pub col: usize,
    pub value: u8,
}

impl CellValue {
    pub fn new(row: usize, col: usize, value: u8) -> Self {
        Self { row, col, value }
    }
}

/// Number of Sudoku variables
pub const VARIABLE_COUNT: usize = SIZE * SIZE * SIZE;

/// The row-major Sudoku bijection
#[derive(Debug, Clone, Copy, Default)]
pub struct SudokuVariables;

impl SudokuVariables {
    /// Variable for cell `(row, col)` holding `value`
    pub fn cell(&self, row: usize, col: usize, value: u8) -> Result<i32> {
        self.encode(&CellValue::new(row, col, value))
    }
}

impl VariableEncoding for SudokuVariables {
    type Key = CellValue;

    fn encode(&self, key: &CellValue) -> Result<i32> {
        if key.row >= SIZE || key.col >= SIZE || key.value == 0 || key.value as usize > SIZE {
            return Err(Error::VariableOutOfRange(format!(
                "cell ({}, {}) value {}",
                key.row, key.col, key.value
            )));
        }
        Ok((SIZE * SIZE * key.row + SIZE * key.col + key.value as usize) as i32)
    }

    fn decode(&self, variable: i32) -> Result<CellValue> {
        if variable < 1 || variable as usize > VARIABLE_COUNT {
            return Err(Error::UnknownVariable(variable));
        }
        let index = variable as usize - 1;
        Ok(CellValue {
            row: index / (SIZE * SIZE),
            col: (index / SIZE) % SIZE,
            value: (index % SIZE) as u8 + 1,
        })
    }

    fn variable_count(&self) -> usize {
        VARIABLE_COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_round_trip_covers_all_ids() {
        let vars = SudokuVariables;
        let mut seen = HashSet::new();

        for row in 0..SIZE {
            for col in 0..SIZE {
                for value in 1..=SIZE as u8 {
                    let key = CellValue::new(row, col, value);
                    let id = vars.encode(&key).unwrap();
                    assert!((1..=729).contains(&id));
                    assert_eq!(vars.decode(id).unwrap(), key);
                    assert!(seen.insert(id), "duplicate id {}", id);
                }
            }
        }
        assert_eq!(seen.len(), VARIABLE_COUNT);
    }

    #[test]
    fn test_known_ids() {
        let vars = SudokuVariables;
        assert_eq!(vars.cell(0, 0, 1).unwrap(), 1);
        assert_eq!(vars.cell(0, 1, 1).unwrap(), 10);
        assert_eq!(vars.cell(1, 0, 1).unwrap(), 82);
        assert_eq!(vars.cell(8, 8, 9).unwrap(), 729);
    }

    #[test]
    fn test_out_of_range() {
        let vars = SudokuVariables;
        assert!(vars.cell(9, 0, 1).is_err());
        assert!(vars.cell(0, 9, 1).is_err());
        assert!(vars.cell(0, 0, 0).is_err());
        assert!(vars.cell(0, 0, 10).is_err());
        assert_eq!(vars.decode(0), Err(Error::UnknownVariable(0)));
        assert_eq!(vars.decode(730), Err(Error::UnknownVariable(730)));
        assert_eq!(vars.decode(-5), Err(Error::UnknownVariable(-5)));
    }

    #[test]
    fn test_true_propositions_ignores_negatives() {
        let vars = SudokuVariables;
        let model = vec![-1, 2, -10, 729, 900];
        let keys = vars.true_propositions(&model);
        assert_eq!(keys, vec![CellValue::new(0, 0, 2), CellValue::new(8, 8, 9)]);
    }
}
