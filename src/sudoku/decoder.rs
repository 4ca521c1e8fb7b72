//! Model decoding for Sudoku

use super::grid::{SudokuGrid, SIZE};
use super::variables::SudokuVariables;
use crate::error::{Error, Result};
use crate::sat::VariableEncoding;

/// Rebuild the filled grid from a satisfying model.
///
/// Only positive literals are read. A cell with no true value, or with more
/// than one, means the encoding is broken and is reported as an error rather
/// than resolved.
pub fn decode_grid(model: &[i32]) -> Result<SudokuGrid> {
    let variables = SudokuVariables;
    let mut values: Vec<Vec<Vec<u8>>> = vec![vec![Vec::new(); SIZE]; SIZE];

    for key in variables.true_propositions(model) {
        values[key.row][key.col].push(key.value);
    }

    let mut grid = SudokuGrid::empty();
    for (row, cols) in values.into_iter().enumerate() {
        for (col, mut candidates) in cols.into_iter().enumerate() {
            match candidates.len() {
                0 => return Err(Error::CellUnassigned { row, col }),
                1 => grid.set(row, col, candidates[0])?,
                _ => {
                    candidates.sort_unstable();
                    return Err(Error::CellOverassigned {
                        row,
                        col,
                        values: candidates,
                    });
                }
            }
        }
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Model for the grid whose cell (r, c) holds ((r * 3 + r / 3 + c) % 9) + 1
    fn pattern_model() -> Vec<i32> {
        let vars = SudokuVariables;
        let mut model = Vec::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                let chosen = ((row * 3 + row / 3 + col) % SIZE) as u8 + 1;
                for value in 1..=SIZE as u8 {
                    let var = vars.cell(row, col, value).unwrap();
                    model.push(if value == chosen { var } else { -var });
                }
            }
        }
        model
    }

    #[test]
    fn test_decode_valid_model() {
        let grid = decode_grid(&pattern_model()).unwrap();
        assert!(grid.is_complete());
        assert!(grid.violations().is_empty());
        assert_eq!(grid.get(0, 0), 1);
        assert_eq!(grid.get(1, 0), 4);
    }

    #[test]
    fn test_decode_is_order_independent() {
        let mut model = pattern_model();
        model.reverse();
        assert_eq!(decode_grid(&model).unwrap(), decode_grid(&pattern_model()).unwrap());
    }

    #[test]
    fn test_unassigned_cell_is_an_error() {
        let vars = SudokuVariables;
        let mut model = pattern_model();
        // (3, 5) holds ((9 + 1 + 5) % 9) + 1 = 7
        let true_var = vars.cell(3, 5, 7).unwrap();
        model.retain(|&lit| lit != true_var);

        assert_eq!(decode_grid(&model), Err(Error::CellUnassigned { row: 3, col: 5 }));
    }

    #[test]
    fn test_overassigned_cell_is_an_error() {
        let vars = SudokuVariables;
        let mut model = pattern_model();
        let extra = vars.cell(0, 0, 9).unwrap();
        for lit in model.iter_mut() {
            if *lit == -extra {
                *lit = extra;
            }
        }

        assert_eq!(
            decode_grid(&model),
            Err(Error::CellOverassigned {
                row: 0,
                col: 0,
                values: vec![1, 9]
            })
        );
    }
}
