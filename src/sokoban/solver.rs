//! Sokoban entry points

use super::constraints::ConstraintGenerator;
use super::decoder::{decode_plan, Plan};
use super::level::Level;
use super::replay::replay;
use super::variables::SokobanVariables;
use crate::error::{Error, Result};
use crate::sat::{solve_encoding, EncodingStatistics, Formula, Outcome, PuzzleEncoding, SatSolver, VariableEncoding};

/// A plan within the horizon, or an explicit "no plan"
pub type SokobanOutcome = Outcome<Plan>;

/// One level unrolled to a fixed horizon
pub struct SokobanEncoding<'a> {
    level: &'a Level,
    horizon: usize,
    variables: SokobanVariables,
}

impl<'a> SokobanEncoding<'a> {
    pub fn new(level: &'a Level, horizon: usize) -> Self {
        Self {
            level,
            horizon,
            variables: SokobanVariables::new(level.boxes().len(), level.rows(), level.cols(), horizon),
        }
    }
}

impl PuzzleEncoding for SokobanEncoding<'_> {
    type Solution = Plan;

    fn name(&self) -> &'static str {
        "sokoban"
    }

    fn variable_count(&self) -> usize {
        self.variables.variable_count()
    }

    fn build_formula(&self) -> Result<Formula> {
        ConstraintGenerator::new(self.level, self.horizon).generate_all_constraints()
    }

    fn decode_model(&self, model: &[i32]) -> Result<Plan> {
        decode_plan(&self.variables, model)
    }
}

/// Find a plan of at most `horizon` moves
pub fn solve_sokoban(level: &Level, horizon: usize) -> Result<SokobanOutcome> {
    solve_sokoban_with_statistics(level, horizon, true).map(|(outcome, _)| outcome)
}

/// Find a plan and report encoding statistics.
///
/// With `verify`, the decoded moves are replayed against the level; a plan
/// that is illegal or does not end in the decoded box positions is an error.
pub fn solve_sokoban_with_statistics(
    level: &Level,
    horizon: usize,
    verify: bool,
) -> Result<(SokobanOutcome, EncodingStatistics)> {
    let mut solver = SatSolver::new();
    let (outcome, statistics) = solve_encoding(&SokobanEncoding::new(level, horizon), &mut solver)?;

    if let (true, Outcome::Solved(plan)) = (verify, &outcome) {
        verify_plan(level, plan)?;
    }

    Ok((outcome, statistics))
}

/// Replay `plan` on `level` and compare the final boxes with the decoded ones
pub fn verify_plan(level: &Level, plan: &Plan) -> Result<()> {
    let result = replay(level, &plan.moves);
    if !result.is_valid {
        let reason = result.error_message.unwrap_or_else(|| "replay failed".to_string());
        log::warn!("sokoban plan {} rejected: {}", plan, reason);
        return Err(Error::InvalidSolution(reason));
    }

    let replayed = result.final_state().map(|state| state.boxes.clone()).unwrap_or_default();
    if replayed != plan.final_boxes() {
        log::warn!("sokoban plan {} ends with boxes {:?}, model says {:?}", plan, replayed, plan.final_boxes());
        return Err(Error::InvalidSolution(
            "replayed box positions differ from the model".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sokoban::moves::{Move, Position};

    /// Five moves: walk one cell, then push the box four cells
    const CORRIDOR: &str = "P.B...G";

    #[test]
    fn test_horizon_sensitivity() {
        let level = Level::parse(CORRIDOR).unwrap();

        assert_eq!(solve_sokoban(&level, 2).unwrap(), Outcome::Unsatisfiable);
        assert_eq!(solve_sokoban(&level, 4).unwrap(), Outcome::Unsatisfiable);

        let plan = solve_sokoban(&level, 5).unwrap().into_solution().unwrap();
        assert_eq!(plan.moves, vec![Move::Right; 5]);
        assert_eq!(plan.final_boxes(), vec![Position::new(1, 7)]);

        let plan = solve_sokoban(&level, 7).unwrap().into_solution().unwrap();
        assert!(replay(&level, &plan.moves).is_valid);
        assert_eq!(plan.horizon(), 7);
    }

    #[test]
    fn test_plan_around_a_corner() {
        let level = Level::parse(
            "#####\n\
             #P..#\n\
             #.B.#\n\
             #..G#\n\
             #####",
        )
        .unwrap();

        let (outcome, stats) = solve_sokoban_with_statistics(&level, 8, true).unwrap();
        let plan = outcome.into_solution().unwrap();
        let result = replay(&level, &plan.moves);

        assert!(result.is_valid);
        assert!(level.is_goal(plan.final_boxes()[0]));
        assert_eq!(stats.sections.len(), 9);
        assert_eq!(stats.total_clauses, stats.sections.iter().map(|(_, n)| n).sum::<usize>());
    }

    #[test]
    fn test_unverified_solve() {
        let level = Level::parse(CORRIDOR).unwrap();
        let (outcome, _) = solve_sokoban_with_statistics(&level, 5, false).unwrap();
        assert_eq!(outcome.into_solution().unwrap().moves, vec![Move::Right; 5]);
    }

    #[test]
    fn test_verify_plan_rejects_bad_plans() {
        let level = Level::parse(CORRIDOR).unwrap();
        let plan = solve_sokoban(&level, 5).unwrap().into_solution().unwrap();
        assert!(verify_plan(&level, &plan).is_ok());

        let mut backwards = plan.clone();
        backwards.moves = vec![Move::Left];
        assert!(matches!(verify_plan(&level, &backwards), Err(Error::InvalidSolution(_))));

        let mut unfinished = plan.clone();
        unfinished.moves.truncate(4);
        assert!(verify_plan(&level, &unfinished).is_err());

        let mut misplaced = plan.clone();
        if let Some(last) = misplaced.box_paths[0].last_mut() {
            *last = Position::new(1, 6);
        }
        assert_eq!(
            verify_plan(&level, &misplaced),
            Err(Error::InvalidSolution(
                "replayed box positions differ from the model".to_string()
            ))
        );
    }

    #[test]
    fn test_walls_block_the_only_route() {
        let level = Level::parse("P#B.G").unwrap();
        assert_eq!(solve_sokoban(&level, 6).unwrap(), Outcome::Unsatisfiable);
    }

    #[test]
    fn test_more_boxes_than_goals_is_unsatisfiable() {
        let level = Level::parse("P.B.B.G..").unwrap();
        assert_eq!(solve_sokoban(&level, 8).unwrap(), Outcome::Unsatisfiable);
    }

    #[test]
    fn test_two_boxes_two_goals() {
        let level = Level::parse("..G..\nPB.BG\n.....").unwrap();
        let plan = solve_sokoban(&level, 12).unwrap().into_solution().unwrap();

        let mut ends = plan.final_boxes();
        ends.sort();
        let mut goals = level.goals().to_vec();
        goals.sort();
        assert_eq!(ends, goals);
    }

    #[test]
    fn test_zero_box_level() {
        let level = Level::parse("P.G").unwrap();
        let plan = solve_sokoban(&level, 0).unwrap().into_solution().unwrap();
        assert!(plan.moves.is_empty());
        assert!(plan.box_paths.is_empty());
        assert_eq!(plan.player_path, vec![level.player()]);
    }
}
