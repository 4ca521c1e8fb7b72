//! Model to move sequence
//!
//! True literals are bucketed by the timestep encoded in their variable ID,
//! so the model may list literals in any order.

use super::moves::{moves_to_string, Move, Position};
use super::variables::{Entity, SokobanVariables};
use crate::error::{Error, Result};
use crate::sat::VariableEncoding;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A decoded plan: one move per timestep transition where the player moved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub moves: Vec<Move>,
    /// Player cell for `t = 0..=T`, in padded coordinates
    pub player_path: Vec<Position>,
    /// `box_paths[b][t]`, in padded coordinates
    pub box_paths: Vec<Vec<Position>>,
}

impl Plan {
    pub fn horizon(&self) -> usize {
        self.player_path.len().saturating_sub(1)
    }

    /// Transitions in which the player stayed put
    pub fn idle_steps(&self) -> usize {
        self.horizon().saturating_sub(self.moves.len())
    }

    /// Box cells at the last timestep
    pub fn final_boxes(&self) -> Vec<Position> {
        self.box_paths
            .iter()
            .filter_map(|path| path.last().copied())
            .collect()
    }

    pub fn move_string(&self) -> String {
        moves_to_string(&self.moves)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.move_string())
    }
}

/// Reconstruct every entity's path and the player's moves from `model`.
///
/// Exactly one cell per entity per timestep is required; anything else means
/// the encoding is broken and is reported instead of guessed around.
pub fn decode_plan(variables: &SokobanVariables, model: &[i32]) -> Result<Plan> {
    let horizon = variables.horizon();
    let entities = variables.box_count() + 1;

    // cells[entity][t]
    let mut cells: Vec<Vec<Vec<Position>>> = vec![vec![Vec::new(); horizon + 1]; entities];
    for occupancy in variables.true_propositions(model) {
        cells[occupancy.entity.index()][occupancy.t].push(occupancy.position);
    }

    let mut paths = Vec::with_capacity(entities);
    for (index, per_step) in cells.into_iter().enumerate() {
        let entity = Entity::from_index(index);
        let path = per_step
            .into_iter()
            .enumerate()
            .map(|(t, found)| match found.as_slice() {
                [position] => Ok(*position),
                [] => Err(Error::PositionMissing {
                    entity: entity.to_string(),
                    t,
                }),
                _ => Err(Error::PositionAmbiguous {
                    entity: entity.to_string(),
                    t,
                    count: found.len(),
                }),
            })
            .collect::<Result<Vec<Position>>>()?;
        paths.push(path);
    }

    let mut paths = paths.into_iter();
    let player_path = paths.next().unwrap_or_default();
    let box_paths: Vec<Vec<Position>> = paths.collect();
    let moves = moves_from_path(&player_path)?;

    log::debug!(
        "decoded {} moves over {} timesteps for {} boxes",
        moves.len(),
        horizon,
        box_paths.len()
    );

    Ok(Plan {
        moves,
        player_path,
        box_paths,
    })
}

/// Moves between consecutive player cells; a stay yields no move
pub fn moves_from_path(path: &[Position]) -> Result<Vec<Move>> {
    let mut moves = Vec::with_capacity(path.len().saturating_sub(1));
    for (t, pair) in path.windows(2).enumerate() {
        let (from, to) = (pair[0], pair[1]);
        match from.direction_to(to) {
            Ok(Some(mv)) => moves.push(mv),
            Ok(None) => {}
            Err(_) => {
                return Err(Error::IllegalStep {
                    t,
                    from: from.into(),
                    to: to.into(),
                })
            }
        }
    }
    Ok(moves)
}
