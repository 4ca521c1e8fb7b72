//! Clause generation for Sudoku

use super::grid::{SudokuGrid, BLOCK, SIZE};
use super::variables::SudokuVariables;
use crate::error::Result;
use crate::sat::{at_least_one, at_most_one, Clause, Formula};

/// Generates the CNF for one Sudoku puzzle.
///
/// Cell exactly-one plus at-least-one per row, column and block is enough:
/// nine cells must cover nine digits, so no digit can repeat.
pub struct ConstraintGenerator<'a> {
    grid: &'a SudokuGrid,
    variables: SudokuVariables,
}

impl<'a> ConstraintGenerator<'a> {
    pub fn new(grid: &'a SudokuGrid) -> Self {
        Self {
            grid,
            variables: SudokuVariables,
        }
    }

    /// Generate all constraints for the puzzle
    pub fn generate_all_constraints(&self) -> Result<Formula> {
        let mut formula = Formula::new();

        formula.add_section("givens", self.generate_given_constraints()?);
        formula.add_section("cell at-least-one", self.generate_cell_at_least_one()?);
        formula.add_section("cell at-most-one", self.generate_cell_at_most_one()?);
        formula.add_section("row", self.generate_unit_constraints(row_cells)?);
        formula.add_section("column", self.generate_unit_constraints(column_cells)?);
        formula.add_section("block", self.generate_unit_constraints(block_cells)?);

        Ok(formula)
    }

    /// Unit clauses fixing every pre-filled cell
    fn generate_given_constraints(&self) -> Result<Vec<Clause>> {
        self.grid
            .givens()
            .map(|(row, col, value)| Ok(Clause::unit(self.variables.cell(row, col, value)?)))
            .collect()
    }

    /// Every cell holds some digit
    fn generate_cell_at_least_one(&self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::with_capacity(SIZE * SIZE);
        for row in 0..SIZE {
            for col in 0..SIZE {
                clauses.push(at_least_one(&self.cell_literals(row, col)?));
            }
        }
        Ok(clauses)
    }

    /// No cell holds two digits
    fn generate_cell_at_most_one(&self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::with_capacity(SIZE * SIZE * 36);
        for row in 0..SIZE {
            for col in 0..SIZE {
                clauses.extend(at_most_one(&self.cell_literals(row, col)?));
            }
        }
        Ok(clauses)
    }

    /// For each of the nine units produced by `cells_of` and each digit,
    /// some cell of the unit holds that digit
    fn generate_unit_constraints(&self, cells_of: fn(usize) -> [(usize, usize); SIZE]) -> Result<Vec<Clause>> {
        let mut clauses = Vec::with_capacity(SIZE * SIZE);
        for unit in 0..SIZE {
            let cells = cells_of(unit);
            for value in 1..=SIZE as u8 {
                let literals = cells
                    .iter()
                    .map(|&(row, col)| self.variables.cell(row, col, value))
                    .collect::<Result<Vec<i32>>>()?;
                clauses.push(at_least_one(&literals));
            }
        }
        Ok(clauses)
    }

    fn cell_literals(&self, row: usize, col: usize) -> Result<Vec<i32>> {
        (1..=SIZE as u8)
            .map(|value| self.variables.cell(row, col, value))
            .collect()
    }
}

fn row_cells(row: usize) -> [(usize, usize); SIZE] {
    std::array::from_fn(|col| (row, col))
}

fn column_cells(col: usize) -> [(usize, usize); SIZE] {
    std::array::from_fn(|row| (row, col))
}

fn block_cells(block: usize) -> [(usize, usize); SIZE] {
    let (top, left) = ((block / BLOCK) * BLOCK, (block % BLOCK) * BLOCK);
    std::array::from_fn(|k| (top + k / BLOCK, left + k % BLOCK))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clause_counts_for_empty_grid() {
        let grid = SudokuGrid::empty();
        let formula = ConstraintGenerator::new(&grid).generate_all_constraints().unwrap();

        assert_eq!(
            formula.sections(),
            &[
                ("givens", 0),
                ("cell at-least-one", 81),
                ("cell at-most-one", 81 * 36),
                ("row", 81),
                ("column", 81),
                ("block", 81),
            ]
        );
        assert_eq!(formula.max_variable(), 729);
    }

    #[test]
    fn test_given_constraints() {
        let mut grid = SudokuGrid::empty();
        grid.set(0, 0, 5).unwrap();
        grid.set(4, 7, 2).unwrap();

        let formula = ConstraintGenerator::new(&grid).generate_all_constraints().unwrap();
        let vars = SudokuVariables;

        assert_eq!(formula.sections()[0], ("givens", 2));
        assert_eq!(formula.clauses()[0], Clause::unit(vars.cell(0, 0, 5).unwrap()));
        assert_eq!(formula.clauses()[1], Clause::unit(vars.cell(4, 7, 2).unwrap()));
    }

    #[test]
    fn test_block_cells() {
        assert_eq!(block_cells(0)[8], (2, 2));
        assert_eq!(block_cells(4)[0], (3, 3));
        assert_eq!(block_cells(8)[4], (7, 7));
        assert_eq!(column_cells(3)[5], (5, 3));
        assert_eq!(row_cells(6)[1], (6, 1));
    }

    #[test]
    fn test_every_clause_is_non_empty() {
        let grid = SudokuGrid::empty();
        let formula = ConstraintGenerator::new(&grid).generate_all_constraints().unwrap();
        assert!(formula.clauses().iter().all(|c| !c.is_empty()));
    }
}
