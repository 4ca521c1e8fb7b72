//! Sudoku and Sokoban as SAT
//!
//! Each puzzle is encoded into CNF, handed to CaDiCaL, and the satisfying
//! assignment is decoded back into a filled grid or a move sequence.

pub mod config;
pub mod error;
pub mod harness;
pub mod sat;
pub mod sokoban;
pub mod sudoku;
pub mod utils;

pub use config::Settings;
pub use error::{Error, Result};
pub use sat::Outcome;
pub use sokoban::{solve_sokoban, Level, Move, Plan, SokobanOutcome};
pub use sudoku::{solve_sudoku, SudokuGrid, SudokuOutcome};
