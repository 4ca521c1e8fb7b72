//! Error types for puzzle encoding, solving and decoding

use thiserror::Error;

/// Errors raised by the encoding core.
///
/// An unsatisfiable instance is not an error: it is reported through the
/// `Unsatisfiable` outcome variants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("grid must have {expected} rows, found {found}")]
    InvalidRowCount { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    InvalidRowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cell ({row}, {col}) is outside the {size}x{size} grid")]
    CellOutOfRange { row: usize, col: usize, size: usize },

    #[error("value {value} at ({row}, {col}) is outside 0..=9")]
    InvalidDigit { row: usize, col: usize, value: u8 },

    #[error("unknown cell '{symbol}' at ({row}, {col})")]
    InvalidCellKind { row: usize, col: usize, symbol: char },

    #[error("level is empty")]
    EmptyLevel,

    #[error("level has no player")]
    MissingPlayer,

    #[error("level has more than one player: {first:?} and {second:?}")]
    MultiplePlayers {
        first: (usize, usize),
        second: (usize, usize),
    },

    #[error("level has no goal cells")]
    NoGoals,

    #[error("variable {0} is out of range")]
    VariableOutOfRange(String),

    #[error("literal {0} does not belong to this encoding")]
    UnknownVariable(i32),

    #[error("cell ({row}, {col}) received no value from the model")]
    CellUnassigned { row: usize, col: usize },

    #[error("cell ({row}, {col}) received several values from the model: {values:?}")]
    CellOverassigned {
        row: usize,
        col: usize,
        values: Vec<u8>,
    },

    #[error("no position for {entity} at timestep {t}")]
    PositionMissing { entity: String, t: usize },

    #[error("{entity} holds {count} positions at timestep {t}")]
    PositionAmbiguous {
        entity: String,
        t: usize,
        count: usize,
    },

    #[error("player jumped from {from:?} to {to:?} after timestep {t}")]
    IllegalStep {
        t: usize,
        from: (usize, usize),
        to: (usize, usize),
    },

    #[error("decoded solution breaks the puzzle rules: {0}")]
    InvalidSolution(String),

    #[error("cannot add an empty clause")]
    EmptyClause,

    #[error("SAT solver failed: {0}")]
    Solver(String),
}

pub type Result<T> = std::result::Result<T, Error>;
