//! Sokoban level representation
//!
//! Levels are stored padded with a one-cell border of `Padding`, so every
//! interior cell has four neighbours and every push target two cells away
//! from an open cell stays inside the grid.

use super::moves::{Move, Position};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Wall,
    Empty,
    Goal,
    Box,
    Player,
    /// Border added around the parsed level; behaves as a wall
    Padding,
}

impl CellKind {
    pub fn from_symbol(symbol: char) -> Option<CellKind> {
        match symbol {
            '#' => Some(CellKind::Wall),
            '.' => Some(CellKind::Empty),
            'G' => Some(CellKind::Goal),
            'B' => Some(CellKind::Box),
            'P' => Some(CellKind::Player),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            CellKind::Wall | CellKind::Padding => '#',
            CellKind::Empty => '.',
            CellKind::Goal => 'G',
            CellKind::Box => 'B',
            CellKind::Player => 'P',
        }
    }

    /// Whether an entity may ever stand here
    pub fn is_open(self) -> bool {
        !matches!(self, CellKind::Wall | CellKind::Padding)
    }
}

/// A parsed, padded Sokoban level.
///
/// Serialized as its unpadded text; deserializing goes through [`Level::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Level {
    cells: Vec<Vec<CellKind>>,
    player: Position,
    boxes: Vec<Position>,
    goals: Vec<Position>,
}

impl Level {
    /// Parse a level from text, one row per line (`#`, `.`, `G`, `B`, `P`).
    ///
    /// Blank lines at either end are ignored.
    pub fn parse(text: &str) -> Result<Level> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .skip_while(|line| line.is_empty())
            .collect();
        let end = lines.iter().rposition(|line| !line.is_empty()).map_or(0, |i| i + 1);

        let mut rows = Vec::with_capacity(end);
        for (row, line) in lines[..end].iter().enumerate() {
            let cells = line
                .chars()
                .enumerate()
                .map(|(col, symbol)| CellKind::from_symbol(symbol).ok_or(Error::InvalidCellKind { row, col, symbol }))
                .collect::<Result<Vec<_>>>()?;
            rows.push(cells);
        }

        Level::from_cells(rows)
    }

    /// Build a level from unpadded cell kinds
    pub fn from_cells(rows: Vec<Vec<CellKind>>) -> Result<Level> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(Error::EmptyLevel);
        }

        let width = rows[0].len();
        let mut cells = Vec::with_capacity(rows.len() + 2);
        cells.push(vec![CellKind::Padding; width + 2]);

        for (row, kinds) in rows.into_iter().enumerate() {
            if kinds.len() != width {
                return Err(Error::InvalidRowLength {
                    row,
                    expected: width,
                    found: kinds.len(),
                });
            }
            if let Some(col) = kinds.iter().position(|kind| *kind == CellKind::Padding) {
                return Err(Error::InvalidCellKind { row, col, symbol: '?' });
            }
            let mut padded = Vec::with_capacity(width + 2);
            padded.push(CellKind::Padding);
            padded.extend(kinds);
            padded.push(CellKind::Padding);
            cells.push(padded);
        }
        cells.push(vec![CellKind::Padding; width + 2]);

        let mut player: Option<Position> = None;
        let mut boxes = Vec::new();
        let mut goals = Vec::new();

        for (row, kinds) in cells.iter().enumerate() {
            for (col, kind) in kinds.iter().enumerate() {
                let position = Position::new(row, col);
                match kind {
                    CellKind::Player => {
                        if let Some(first) = player {
                            return Err(Error::MultiplePlayers {
                                first: first.into(),
                                second: position.into(),
                            });
                        }
                        player = Some(position);
                    }
                    CellKind::Box => boxes.push(position),
                    CellKind::Goal => goals.push(position),
                    _ => {}
                }
            }
        }

        let player = player.ok_or(Error::MissingPlayer)?;
        if goals.is_empty() {
            return Err(Error::NoGoals);
        }

        Ok(Level {
            cells,
            player,
            boxes,
            goals,
        })
    }

    /// Rows of the padded grid
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Columns of the padded grid
    pub fn cols(&self) -> usize {
        self.cells[0].len()
    }

    pub fn kind(&self, position: Position) -> CellKind {
        self.cells
            .get(position.row)
            .and_then(|row| row.get(position.col))
            .copied()
            .unwrap_or(CellKind::Padding)
    }

    pub fn is_open(&self, position: Position) -> bool {
        self.kind(position).is_open()
    }

    pub fn is_goal(&self, position: Position) -> bool {
        self.kind(position) == CellKind::Goal
    }

    /// Neighbour of `position` in direction `mv` if it is open
    pub fn open_neighbour(&self, position: Position, mv: Move) -> Option<Position> {
        position.step(mv).filter(|next| self.is_open(*next))
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn boxes(&self) -> &[Position] {
        &self.boxes
    }

    pub fn goals(&self) -> &[Position] {
        &self.goals
    }

    /// Every cell of the padded grid, row-major
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let cols = self.cols();
        (0..self.rows()).flat_map(move |row| (0..cols).map(move |col| Position::new(row, col)))
    }

    /// Cells an entity may occupy
    pub fn open_cells(&self) -> Vec<Position> {
        self.positions().filter(|p| self.is_open(*p)).collect()
    }

    /// Cells no entity may occupy, border included
    pub fn blocked_cells(&self) -> Vec<Position> {
        self.positions().filter(|p| !self.is_open(*p)).collect()
    }

    /// The level as text without the padding border
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.rows() * self.cols());
        for kinds in &self.cells[1..self.rows() - 1] {
            text.extend(kinds[1..kinds.len() - 1].iter().map(|kind| kind.symbol()));
            text.push('\n');
        }
        text
    }
}

impl TryFrom<String> for Level {
    type Error = Error;

    fn try_from(text: String) -> Result<Level> {
        Level::parse(&text)
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.to_text()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_pad() {
        let level = Level::parse("P.B.G\n#...#\n").unwrap();

        assert_eq!(level.rows(), 4);
        assert_eq!(level.cols(), 7);
        assert_eq!(level.player(), Position::new(1, 1));
        assert_eq!(level.boxes(), &[Position::new(1, 3)]);
        assert_eq!(level.goals(), &[Position::new(1, 5)]);
        assert_eq!(level.kind(Position::new(0, 0)), CellKind::Padding);
        assert_eq!(level.kind(Position::new(2, 1)), CellKind::Wall);
        assert!(!level.is_open(Position::new(3, 4)));
        assert!(level.is_goal(Position::new(1, 5)));
        assert_eq!(level.open_cells().len(), 8);
        assert_eq!(level.to_text(), "P.B.G\n#...#\n");
    }

    #[test]
    fn test_open_neighbour() {
        let level = Level::parse("P.G\n#.#\n").unwrap();
        let start = level.player();
        assert_eq!(level.open_neighbour(start, Move::Right), Some(Position::new(1, 2)));
        assert_eq!(level.open_neighbour(start, Move::Left), None);
        assert_eq!(level.open_neighbour(start, Move::Down), None);
    }

    #[test]
    fn test_malformed_levels() {
        assert_eq!(Level::parse(""), Err(Error::EmptyLevel));
        assert_eq!(Level::parse("..G\n"), Err(Error::MissingPlayer));
        assert_eq!(Level::parse("P.B\n"), Err(Error::NoGoals));
        assert_eq!(
            Level::parse("P.G\n.x.\n"),
            Err(Error::InvalidCellKind { row: 1, col: 1, symbol: 'x' })
        );
        assert_eq!(
            Level::parse("P.G\n..\n"),
            Err(Error::InvalidRowLength { row: 1, expected: 3, found: 2 })
        );
        assert_eq!(
            Level::parse("P.G\n..P\n"),
            Err(Error::MultiplePlayers { first: (1, 1), second: (2, 3) })
        );
    }

    #[test]
    fn test_surrounding_blank_lines_ignored() {
        let level = Level::parse("\n\nP.G\n\n").unwrap();
        assert_eq!(level.rows(), 3);
    }

    #[test]
    fn test_deserialize_validates() {
        let level = Level::parse("P.B.G\n#...#\n").unwrap();
        let json = serde_json::to_string(&level).unwrap();
        assert_eq!(json, "\"P.B.G\\n#...#\\n\"");
        assert_eq!(serde_json::from_str::<Level>(&json).unwrap(), level);

        assert!(serde_json::from_str::<Level>("\"\"").is_err());
        assert!(serde_json::from_str::<Level>("\"P.G\\n..P\"").is_err());
    }
}
