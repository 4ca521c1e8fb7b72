//! Build, solve, decode: the pipeline shared by every puzzle encoding

use super::{Formula, SatBackend};
use crate::error::Result;
use std::time::{Duration, Instant};

/// A puzzle instance expressed as CNF.
pub trait PuzzleEncoding {
    /// What a satisfying model decodes to
    type Solution;

    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Number of variable IDs reserved by the encoding
    fn variable_count(&self) -> usize;

    /// Emit every clause of the instance
    fn build_formula(&self) -> Result<Formula>;

    /// Turn a satisfying model back into puzzle terms
    fn decode_model(&self, model: &[i32]) -> Result<Self::Solution>;
}

/// Verdict of one solve call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<S> {
    Solved(S),
    Unsatisfiable,
}

impl<S> Outcome<S> {
    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved(_))
    }

    pub fn solution(&self) -> Option<&S> {
        match self {
            Outcome::Solved(solution) => Some(solution),
            Outcome::Unsatisfiable => None,
        }
    }

    pub fn into_solution(self) -> Option<S> {
        match self {
            Outcome::Solved(solution) => Some(solution),
            Outcome::Unsatisfiable => None,
        }
    }
}

/// Statistics about the SAT encoding
#[derive(Debug, Clone)]
pub struct EncodingStatistics {
    pub puzzle: &'static str,
    pub total_variables: usize,
    pub used_variables: usize,
    pub total_clauses: usize,
    pub sections: Vec<(&'static str, usize)>,
    pub encode_time: Duration,
    pub solve_time: Duration,
}

/// Encode, hand the formula to `backend`, and decode the model if there is one.
pub fn solve_encoding<E, B>(encoding: &E, backend: &mut B) -> Result<(Outcome<E::Solution>, EncodingStatistics)>
where
    E: PuzzleEncoding,
    B: SatBackend,
{
    let encode_start = Instant::now();
    let formula = encoding.build_formula()?;
    let encode_time = encode_start.elapsed();

    log::debug!(
        "{}: {} clauses over {} variables",
        encoding.name(),
        formula.len(),
        formula.max_variable()
    );

    backend.add_clauses(formula.clauses())?;

    let solve_start = Instant::now();
    let satisfiable = backend.solve()?;
    let solve_time = solve_start.elapsed();

    let statistics = EncodingStatistics {
        puzzle: encoding.name(),
        total_variables: encoding.variable_count(),
        used_variables: formula.max_variable() as usize,
        total_clauses: formula.len(),
        sections: formula.sections().to_vec(),
        encode_time,
        solve_time,
    };

    if !satisfiable {
        log::info!("{}: unsatisfiable ({:.3}s)", encoding.name(), solve_time.as_secs_f64());
        return Ok((Outcome::Unsatisfiable, statistics));
    }

    let model = backend
        .model()
        .ok_or_else(|| crate::error::Error::Solver("satisfiable verdict without a model".to_string()))?;
    let solution = encoding.decode_model(&model)?;

    log::info!("{}: solved ({:.3}s)", encoding.name(), solve_time.as_secs_f64());
    Ok((Outcome::Solved(solution), statistics))
}

impl std::fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Encoding Statistics ({}):", self.puzzle)?;
        writeln!(f, "  Total variables: {}", self.total_variables)?;
        writeln!(f, "  Highest variable used: {}", self.used_variables)?;
        writeln!(f, "  Total clauses: {}", self.total_clauses)?;
        for (name, count) in &self.sections {
            writeln!(f, "    {:<22} {}", name, count)?;
        }
        writeln!(f, "  Encode time: {:.3}s", self.encode_time.as_secs_f64())?;
        writeln!(f, "  Solve time: {:.3}s", self.solve_time.as_secs_f64())?;
        Ok(())
    }
}
