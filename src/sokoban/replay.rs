//! Plan replay
//!
//! Independent of the SAT encoding: moves are simulated with ordinary
//! Sokoban rules, so a plan that replays cleanly is legal whatever the
//! clauses said.

use super::level::Level;
use super::moves::{Move, Position};
use serde::Serialize;

/// Entity positions at one point of a replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayState {
    pub player: Position,
    pub boxes: Vec<Position>,
}

impl ReplayState {
    pub fn initial(level: &Level) -> Self {
        Self {
            player: level.player(),
            boxes: level.boxes().to_vec(),
        }
    }

    pub fn all_boxes_on_goals(&self, level: &Level) -> bool {
        self.boxes.iter().all(|&b| level.is_goal(b))
    }

    /// Apply one move, or describe why it is illegal
    pub fn apply(&self, level: &Level, mv: Move) -> Result<ReplayState, String> {
        let next = level
            .open_neighbour(self.player, mv)
            .ok_or_else(|| format!("{} from {} walks into a wall", mv, self.player))?;

        let mut boxes = self.boxes.clone();
        if let Some(pushed) = boxes.iter().position(|&b| b == next) {
            let beyond = level
                .open_neighbour(next, mv)
                .ok_or_else(|| format!("{} pushes the box at {} into a wall", mv, next))?;
            if boxes.contains(&beyond) {
                return Err(format!("{} pushes the box at {} into another box", mv, next));
            }
            boxes[pushed] = beyond;
        }

        Ok(ReplayState { player: next, boxes })
    }
}

/// Outcome of replaying a move sequence
#[derive(Debug, Clone, Serialize)]
pub struct ReplayResult {
    /// Legal and solved
    pub is_valid: bool,
    /// Every move was a legal step or push
    pub legal: bool,
    /// All boxes on goals after the last replayed move
    pub solved: bool,
    pub steps_replayed: usize,
    /// Initial state followed by the state after each legal move
    pub states: Vec<ReplayState>,
    pub error_message: Option<String>,
}

impl ReplayResult {
    pub fn final_state(&self) -> Option<&ReplayState> {
        self.states.last()
    }
}

/// Replay `moves` from the initial state of `level`, stopping at the first illegal move
pub fn replay(level: &Level, moves: &[Move]) -> ReplayResult {
    let mut states = vec![ReplayState::initial(level)];
    let mut error_message = None;

    for (step, &mv) in moves.iter().enumerate() {
        let current = &states[states.len() - 1];
        match current.apply(level, mv) {
            Ok(next) => states.push(next),
            Err(reason) => {
                error_message = Some(format!("move {}: {}", step + 1, reason));
                break;
            }
        }
    }

    let legal = error_message.is_none();
    let steps_replayed = states.len() - 1;
    let solved = states[steps_replayed].all_boxes_on_goals(level);
    if legal && !solved {
        error_message = Some(format!("{} moves replayed but not every box is on a goal", steps_replayed));
    }

    ReplayResult {
        is_valid: legal && solved,
        legal,
        solved,
        steps_replayed,
        states,
        error_message,
    }
}
