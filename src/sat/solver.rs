//! SAT solver integration using CaDiCaL

use super::constraints::Clause;
use crate::error::{Error, Result};
use cadical::Solver;
use std::time::{Duration, Instant};

/// The oracle interface the encodings are solved against.
///
/// Implementations are opaque: callers only add clauses, ask for a verdict
/// and read back a model.
pub trait SatBackend {
    /// Add a single clause
    fn add_clause(&mut self, clause: &Clause) -> Result<()>;

    /// Decide satisfiability. `Ok(false)` means unsatisfiable; a solver
    /// that cannot reach a verdict returns `Err`.
    fn solve(&mut self) -> Result<bool>;

    /// One signed literal per variable `1..=n`, available after `solve`
    /// returned `Ok(true)`
    fn model(&self) -> Option<Vec<i32>>;

    /// Add clauses to the solver
    fn add_clauses(&mut self, clauses: &[Clause]) -> Result<()> {
        for clause in clauses {
            self.add_clause(clause)?;
        }
        Ok(())
    }
}

/// SAT solver wrapper for CaDiCaL
pub struct SatSolver {
    solver: Solver,
    variable_count: usize,
    clause_count: usize,
    satisfiable: bool,
    last_solve_time: Duration,
}

/// Result of SAT solving
#[derive(Debug, Clone)]
pub struct SolverSolution {
    pub model: Vec<i32>,
    pub solve_time: Duration,
}

impl SatSolver {
    /// Create a new SAT solver instance
    pub fn new() -> Self {
        Self {
            solver: Solver::new(),
            variable_count: 0,
            clause_count: 0,
            satisfiable: false,
            last_solve_time: Duration::ZERO,
        }
    }

    /// Solve and find multiple models up to a limit.
    ///
    /// Each model found is blocked over the variables in `1..=block_up_to`
    /// before searching again, so models differing only in higher variables
    /// count once.
    pub fn solve_multiple(&mut self, max_solutions: usize, block_up_to: i32) -> Result<Vec<SolverSolution>> {
        let mut solutions = Vec::new();
        let start_time = Instant::now();

        for _ in 0..max_solutions {
            if !SatBackend::solve(self)? {
                break;
            }
            let model = self.extract_model();
            self.add_blocking_clause(&model, block_up_to)?;
            solutions.push(SolverSolution {
                model,
                solve_time: start_time.elapsed(),
            });
        }

        Ok(solutions)
    }

    /// Extract the model from the solver
    fn extract_model(&self) -> Vec<i32> {
        (1..=self.variable_count as i32)
            .map(|var| match self.solver.value(var) {
                Some(true) => var,
                _ => -var,
            })
            .collect()
    }

    /// Add a blocking clause to prevent finding the same model again
    fn add_blocking_clause(&mut self, model: &[i32], block_up_to: i32) -> Result<()> {
        let blocking_literals: Vec<i32> = model
            .iter()
            .filter(|lit| lit.abs() <= block_up_to)
            .map(|&lit| -lit)
            .collect();

        self.add_clause(&Clause::new(blocking_literals))
    }

    /// Get the number of variables
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    /// Get the number of clauses
    pub fn clause_count(&self) -> usize {
        self.clause_count
    }

    /// Wall time of the most recent `solve`
    pub fn last_solve_time(&self) -> Duration {
        self.last_solve_time
    }
}

impl Default for SatSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SatBackend for SatSolver {
    fn add_clause(&mut self, clause: &Clause) -> Result<()> {
        if clause.is_empty() {
            return Err(Error::EmptyClause);
        }

        // Update variable count
        let max_var = clause.max_variable() as usize;
        if max_var > self.variable_count {
            self.variable_count = max_var;
        }

        self.solver.add_clause(clause.literals.iter().copied());
        self.clause_count += 1;
        self.satisfiable = false;
        Ok(())
    }

    fn solve(&mut self) -> Result<bool> {
        let start_time = Instant::now();
        let result = self.solver.solve();
        self.last_solve_time = start_time.elapsed();

        match result {
            Some(verdict) => {
                self.satisfiable = verdict;
                log::debug!(
                    "CaDiCaL answered {} on {} clauses / {} variables in {:.3}s",
                    if verdict { "SAT" } else { "UNSAT" },
                    self.clause_count,
                    self.variable_count,
                    self.last_solve_time.as_secs_f64()
                );
                Ok(verdict)
            }
            None => {
                self.satisfiable = false;
                Err(Error::Solver("CaDiCaL stopped without a verdict".to_string()))
            }
        }
    }

    fn model(&self) -> Option<Vec<i32>> {
        if self.satisfiable {
            Some(self.extract_model())
        } else {
            None
        }
    }
}

impl std::fmt::Display for SolverSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Solution:")?;
        writeln!(f, "  Solve time: {:.3}s", self.solve_time.as_secs_f64())?;
        writeln!(f, "  Variables assigned: {}", self.model.len())?;

        write!(f, "  Sample assignments: ")?;
        for (i, lit) in self.model.iter().take(10).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", lit.abs(), if *lit > 0 { "T" } else { "F" })?;
        }
        if self.model.len() > 10 {
            write!(f, ", ...")?;
        }
        writeln!(f)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_creation() {
        let solver = SatSolver::new();
        assert_eq!(solver.variable_count(), 0);
        assert_eq!(solver.clause_count(), 0);
        assert!(solver.model().is_none());
    }

    #[test]
    fn test_simple_satisfiable() {
        let mut solver = SatSolver::new();

        // x1 ∨ x2, ¬x1 ∨ x2
        solver.add_clause(&Clause::new(vec![1, 2])).unwrap();
        solver.add_clause(&Clause::new(vec![-1, 2])).unwrap();

        assert!(solver.solve().unwrap());
        let model = solver.model().unwrap();
        assert_eq!(model.len(), 2);
        // x2 must be true to satisfy both clauses
        assert_eq!(model[1], 2);
    }

    #[test]
    fn test_unsatisfiable() {
        let mut solver = SatSolver::new();

        solver.add_clause(&Clause::unit(1)).unwrap();
        solver.add_clause(&Clause::unit(-1)).unwrap();

        assert!(!solver.solve().unwrap());
        assert!(solver.model().is_none());
    }

    #[test]
    fn test_multiple_solutions() {
        let mut solver = SatSolver::new();

        // x1 ∨ x2 has three models
        solver.add_clause(&Clause::new(vec![1, 2])).unwrap();

        let solutions = solver.solve_multiple(5, 2).unwrap();
        assert_eq!(solutions.len(), 3);

        for solution in &solutions {
            assert!(solution.model.contains(&1) || solution.model.contains(&2));
        }
    }

    #[test]
    fn test_empty_clause_error() {
        let mut solver = SatSolver::new();
        assert_eq!(solver.add_clause(&Clause::new(vec![])), Err(Error::EmptyClause));
    }

    #[test]
    fn test_variable_count_tracking() {
        let mut solver = SatSolver::new();

        solver.add_clause(&Clause::new(vec![1, -5, 3])).unwrap();
        assert_eq!(solver.variable_count(), 5);

        solver.add_clause(&Clause::new(vec![2, -7])).unwrap();
        assert_eq!(solver.variable_count(), 7);
        assert_eq!(solver.clause_count(), 2);
    }
}
