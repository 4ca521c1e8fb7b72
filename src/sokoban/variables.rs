//! Sokoban variable numbering
//!
//! `entity e occupies (row, col) at timestep t` is variable
//! `1 + e + E * (row + R * (col + C * t))` where `E` is the number of
//! entities (player plus boxes), `R` and `C` the padded grid dimensions.
//! Entity 0 is the player, entity `b + 1` is box `b`.

use super::moves::Position;
use crate::error::{Error, Result};
use crate::sat::VariableEncoding;
use std::fmt;

/// Something that occupies a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Entity {
    Player,
    /// Box by index in row-major order of the initial level
    Box(usize),
}

impl Entity {
    /// Position in the mixed radix: 0 for the player, `b + 1` for box `b`
    pub fn index(self) -> usize {
        match self {
            Entity::Player => 0,
            Entity::Box(b) => b + 1,
        }
    }

    pub fn from_index(index: usize) -> Entity {
        match index {
            0 => Entity::Player,
            b => Entity::Box(b - 1),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Player => write!(f, "player"),
            Entity::Box(b) => write!(f, "box {}", b),
        }
    }
}

/// A Sokoban proposition: `entity` is at `position` at timestep `t`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occupancy {
    pub entity: Entity,
    pub position: Position,
    pub t: usize,
}

impl Occupancy {
    pub fn new(entity: Entity, position: Position, t: usize) -> Self {
        Self { entity, position, t }
    }
}

/// Mixed-radix numbering for one level and horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SokobanVariables {
    entities: usize,
    rows: usize,
    cols: usize,
    horizon: usize,
}

impl SokobanVariables {
    /// Numbering for `boxes` boxes on a `rows x cols` grid over timesteps `0..=horizon`
    pub fn new(boxes: usize, rows: usize, cols: usize, horizon: usize) -> Self {
        Self {
            entities: boxes + 1,
            rows,
            cols,
            horizon,
        }
    }

    pub fn box_count(&self) -> usize {
        self.entities - 1
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn player(&self, position: Position, t: usize) -> Result<i32> {
        self.encode(&Occupancy::new(Entity::Player, position, t))
    }

    pub fn boxed(&self, b: usize, position: Position, t: usize) -> Result<i32> {
        self.encode(&Occupancy::new(Entity::Box(b), position, t))
    }

    /// Every entity, player first
    pub fn entities(&self) -> impl Iterator<Item = Entity> {
        (0..self.entities).map(Entity::from_index)
    }
}

impl VariableEncoding for SokobanVariables {
    type Key = Occupancy;

    fn encode(&self, key: &Occupancy) -> Result<i32> {
        let entity = key.entity.index();
        let Position { row, col } = key.position;
        if entity >= self.entities || row >= self.rows || col >= self.cols || key.t > self.horizon {
            return Err(Error::VariableOutOfRange(format!(
                "{} at {} t={}",
                key.entity, key.position, key.t
            )));
        }

        let id = 1 + entity + self.entities * (row + self.rows * (col + self.cols * key.t));
        i32::try_from(id).map_err(|_| Error::VariableOutOfRange(format!("id {} exceeds i32", id)))
    }

    fn decode(&self, variable: i32) -> Result<Occupancy> {
        if variable < 1 || variable as usize > self.variable_count() {
            return Err(Error::UnknownVariable(variable));
        }

        let mut rest = variable as usize - 1;
        let entity = rest % self.entities;
        rest /= self.entities;
        let row = rest % self.rows;
        rest /= self.rows;
        let col = rest % self.cols;
        let t = rest / self.cols;

        Ok(Occupancy {
            entity: Entity::from_index(entity),
            position: Position::new(row, col),
            t,
        })
    }

    fn variable_count(&self) -> usize {
        self.entities * self.rows * self.cols * (self.horizon + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_round_trip_is_a_bijection() {
        let vars = SokobanVariables::new(2, 4, 5, 3);
        let mut seen = HashSet::new();

        for t in 0..=3 {
            for row in 0..4 {
                for col in 0..5 {
                    for entity in vars.entities() {
                        let key = Occupancy::new(entity, Position::new(row, col), t);
                        let id = vars.encode(&key).unwrap();
                        assert_eq!(vars.decode(id).unwrap(), key);
                        assert!(seen.insert(id), "duplicate id {}", id);
                    }
                }
            }
        }

        assert_eq!(seen.len(), vars.variable_count());
        assert_eq!(seen.iter().min(), Some(&1));
        assert_eq!(seen.iter().max(), Some(&(vars.variable_count() as i32)));
    }

    #[test]
    fn test_known_ids() {
        let vars = SokobanVariables::new(1, 3, 4, 2);
        assert_eq!(vars.player(Position::new(0, 0), 0).unwrap(), 1);
        assert_eq!(vars.boxed(0, Position::new(0, 0), 0).unwrap(), 2);
        assert_eq!(vars.player(Position::new(1, 0), 0).unwrap(), 3);
        assert_eq!(vars.player(Position::new(0, 1), 0).unwrap(), 7);
        assert_eq!(vars.player(Position::new(0, 0), 1).unwrap(), 25);
        assert_eq!(vars.decode(25).unwrap().t, 1);
    }

    #[test]
    fn test_out_of_range() {
        let vars = SokobanVariables::new(1, 3, 4, 2);
        assert!(vars.boxed(1, Position::new(0, 0), 0).is_err());
        assert!(vars.player(Position::new(3, 0), 0).is_err());
        assert!(vars.player(Position::new(0, 4), 0).is_err());
        assert!(vars.player(Position::new(0, 0), 3).is_err());
        assert_eq!(vars.decode(0), Err(Error::UnknownVariable(0)));
        assert_eq!(vars.decode(73), Err(Error::UnknownVariable(73)));
    }

    #[test]
    fn test_zero_boxes() {
        let vars = SokobanVariables::new(0, 3, 3, 1);
        assert_eq!(vars.entities().collect::<Vec<_>>(), vec![Entity::Player]);
        assert_eq!(vars.variable_count(), 18);
        assert_eq!(vars.player(Position::new(2, 2), 1).unwrap(), 18);
    }

    #[test]
    fn test_entity_names() {
        assert_eq!(Entity::Player.to_string(), "player");
        assert_eq!(Entity::Box(2).to_string(), "box 2");
    }
}
