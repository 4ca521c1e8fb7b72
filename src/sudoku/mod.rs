//! Sudoku as SAT

pub mod constraints;
pub mod decoder;
pub mod grid;
pub mod io;
pub mod solver;
pub mod variables;

pub use constraints::ConstraintGenerator;
pub use decoder::decode_grid;
pub use grid::SudokuGrid;
pub use io::{load_puzzles, parse_puzzle_line, save_puzzles};
pub use solver::{count_solutions, solve_sudoku, solve_sudoku_with_statistics, verify_grid, SudokuEncoding, SudokuOutcome};
pub use variables::{CellValue, SudokuVariables};
