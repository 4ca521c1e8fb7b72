//! Sudoku entry points

use super::constraints::ConstraintGenerator;
use super::decoder::decode_grid;
use super::grid::SudokuGrid;
use super::variables::VARIABLE_COUNT;
use crate::error::{Error, Result};
use crate::sat::{solve_encoding, EncodingStatistics, Formula, Outcome, PuzzleEncoding, SatBackend, SatSolver};

/// Result of solving a Sudoku: the filled grid, or an explicit "no solution"
pub type SudokuOutcome = Outcome<SudokuGrid>;

/// One puzzle as a SAT instance
pub struct SudokuEncoding<'a> {
    puzzle: &'a SudokuGrid,
}

impl<'a> SudokuEncoding<'a> {
    pub fn new(puzzle: &'a SudokuGrid) -> Self {
        Self { puzzle }
    }
}

impl PuzzleEncoding for SudokuEncoding<'_> {
    type Solution = SudokuGrid;

    fn name(&self) -> &'static str {
        "sudoku"
    }

    fn variable_count(&self) -> usize {
        VARIABLE_COUNT
    }

    fn build_formula(&self) -> Result<Formula> {
        ConstraintGenerator::new(self.puzzle).generate_all_constraints()
    }

    fn decode_model(&self, model: &[i32]) -> Result<SudokuGrid> {
        decode_grid(model)
    }
}

/// Solve a Sudoku puzzle with CaDiCaL
pub fn solve_sudoku(puzzle: &SudokuGrid) -> Result<SudokuOutcome> {
    solve_sudoku_with_statistics(puzzle, true).map(|(outcome, _)| outcome)
}

/// Solve a Sudoku puzzle and report encoding statistics.
///
/// With `verify`, a decoded grid that is not a valid filling of `puzzle` is
/// an error.
pub fn solve_sudoku_with_statistics(puzzle: &SudokuGrid, verify: bool) -> Result<(SudokuOutcome, EncodingStatistics)> {
    let mut solver = SatSolver::new();
    let (outcome, statistics) = solve_encoding(&SudokuEncoding::new(puzzle), &mut solver)?;

    if let (true, Outcome::Solved(grid)) = (verify, &outcome) {
        verify_grid(puzzle, grid)?;
    }

    Ok((outcome, statistics))
}

/// Check that `grid` is a complete, rule-abiding filling of `puzzle`
pub fn verify_grid(puzzle: &SudokuGrid, grid: &SudokuGrid) -> Result<()> {
    if grid.is_solution_of(puzzle) {
        return Ok(());
    }

    let mut problems = grid.violations();
    if !grid.is_complete() {
        problems.push("grid has blank cells".to_string());
    }
    if problems.is_empty() {
        problems.push("givens were not preserved".to_string());
    }
    log::warn!("sudoku model decoded to an invalid grid: {}", problems.join("; "));
    Err(Error::InvalidSolution(problems.join("; ")))
}

/// Count distinct solutions of `puzzle`, stopping at `limit`.
///
/// A well-posed puzzle returns 1.
pub fn count_solutions(puzzle: &SudokuGrid, limit: usize) -> Result<usize> {
    let formula = SudokuEncoding::new(puzzle).build_formula()?;
    let mut solver = SatSolver::new();
    solver.add_clauses(formula.clauses())?;

    let solutions = solver.solve_multiple(limit, VARIABLE_COUNT as i32)?;
    Ok(solutions.len())
}
