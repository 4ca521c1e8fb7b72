//! SAT plumbing shared by the puzzle encodings

pub mod constraints;
pub mod encoder;
pub mod solver;
pub mod variables;

pub use constraints::{at_least_one, at_most_one, exactly_one, Clause, Formula};
pub use encoder::{solve_encoding, EncodingStatistics, Outcome, PuzzleEncoding};
pub use solver::{SatBackend, SatSolver, SolverSolution};
pub use variables::VariableEncoding;
