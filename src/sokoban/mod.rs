//! Sokoban planning as SAT

pub mod constraints;
pub mod decoder;
pub mod io;
pub mod level;
pub mod moves;
pub mod replay;
pub mod solver;
pub mod variables;

pub use constraints::ConstraintGenerator;
pub use decoder::{decode_plan, moves_from_path, Plan};
pub use io::{load_level, save_level, save_moves};
pub use level::{CellKind, Level};
pub use moves::{moves_to_string, parse_moves, Move, Position};
pub use replay::{replay, ReplayResult, ReplayState};
pub use solver::{solve_sokoban, solve_sokoban_with_statistics, verify_plan, SokobanEncoding, SokobanOutcome};
pub use variables::{Entity, Occupancy, SokobanVariables};
