//! Positions and move directions

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell of the padded grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighbouring cell in direction `mv`, if it has non-negative coordinates
    pub fn step(self, mv: Move) -> Option<Position> {
        let (dr, dc) = mv.delta();
        Some(Position {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }

    /// The direction leading from `self` to `other`; `Ok(None)` if they coincide,
    /// `Err(displacement)` if they are not neighbours
    pub fn direction_to(self, other: Position) -> Result<Option<Move>, (isize, isize)> {
        let dr = other.row as isize - self.row as isize;
        let dc = other.col as isize - self.col as isize;
        if (dr, dc) == (0, 0) {
            return Ok(None);
        }
        Move::from_delta(dr, dc).map(Some).ok_or((dr, dc))
    }
}

impl From<Position> for (usize, usize) {
    fn from(position: Position) -> Self {
        (position.row, position.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A player move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// `(row, col)` displacement
    pub fn delta(self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn from_delta(dr: isize, dc: isize) -> Option<Move> {
        Move::ALL.into_iter().find(|mv| mv.delta() == (dr, dc))
    }

    pub fn symbol(self) -> char {
        match self {
            Move::Up => 'U',
            Move::Down => 'D',
            Move::Left => 'L',
            Move::Right => 'R',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Move> {
        Move::ALL.into_iter().find(|mv| mv.symbol() == symbol.to_ascii_uppercase())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Render a move sequence as `UDLR` letters
pub fn moves_to_string(moves: &[Move]) -> String {
    moves.iter().map(|mv| mv.symbol()).collect()
}

/// Parse a `UDLR` string, ignoring whitespace
pub fn parse_moves(text: &str) -> Option<Vec<Move>> {
    text.chars()
        .filter(|ch| !ch.is_whitespace())
        .map(Move::from_symbol)
        .collect()
}
