//! Clause generation for Sokoban
//!
//! The level is unrolled over timesteps `0..=T`. Per-cell clauses are only
//! generated for open cells; blocked cells get one negative unit per entity
//! and timestep.

use super::level::Level;
use super::moves::{Move, Position};
use super::variables::{Entity, SokobanVariables};
use crate::error::Result;
use crate::sat::{at_least_one, at_most_one, exactly_one, Clause, Formula};

/// Generates the CNF for one level and horizon
pub struct ConstraintGenerator<'a> {
    level: &'a Level,
    variables: SokobanVariables,
    open_cells: Vec<Position>,
}

impl<'a> ConstraintGenerator<'a> {
    pub fn new(level: &'a Level, horizon: usize) -> Self {
        Self {
            level,
            variables: SokobanVariables::new(level.boxes().len(), level.rows(), level.cols(), horizon),
            open_cells: level.open_cells(),
        }
    }

    pub fn variables(&self) -> &SokobanVariables {
        &self.variables
    }

    /// Generate all constraints for the level
    pub fn generate_all_constraints(&self) -> Result<Formula> {
        let mut formula = Formula::new();

        formula.add_section("initial state", self.generate_initial_state()?);
        formula.add_section("blocked cells", self.generate_blocked_cells()?);
        formula.add_section("player exactly-one", self.generate_player_exactly_one()?);
        formula.add_section("box exactly-one", self.generate_box_exactly_one()?);
        formula.add_section("no overlap", self.generate_no_overlap()?);
        formula.add_section("player moves", self.generate_player_moves()?);
        formula.add_section("box pushes", self.generate_box_pushes()?);
        formula.add_section("box persistence", self.generate_box_persistence()?);
        formula.add_section("goals", self.generate_goals()?);

        Ok(formula)
    }

    fn horizon(&self) -> usize {
        self.variables.horizon()
    }

    fn box_count(&self) -> usize {
        self.variables.box_count()
    }

    fn literal(&self, entity: Entity, position: Position, t: usize) -> Result<i32> {
        match entity {
            Entity::Player => self.variables.player(position, t),
            Entity::Box(b) => self.variables.boxed(b, position, t),
        }
    }

    /// Literals for `entity` over every open cell at `t`
    fn open_literals(&self, entity: Entity, t: usize) -> Result<Vec<i32>> {
        self.open_cells
            .iter()
            .map(|&position| self.literal(entity, position, t))
            .collect()
    }

    /// Open neighbours of `position`, paired with the direction leading there
    fn open_neighbours(&self, position: Position) -> impl Iterator<Item = (Move, Position)> + '_ {
        Move::ALL
            .into_iter()
            .filter_map(move |mv| self.level.open_neighbour(position, mv).map(|next| (mv, next)))
    }

    /// Player and boxes at their starting cells
    fn generate_initial_state(&self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::with_capacity(self.box_count() + 1);
        clauses.push(Clause::unit(self.variables.player(self.level.player(), 0)?));
        for (b, &position) in self.level.boxes().iter().enumerate() {
            clauses.push(Clause::unit(self.variables.boxed(b, position, 0)?));
        }
        Ok(clauses)
    }

    /// No entity ever stands on a wall or the padding border
    fn generate_blocked_cells(&self) -> Result<Vec<Clause>> {
        let blocked = self.level.blocked_cells();
        let mut clauses = Vec::with_capacity((self.horizon() + 1) * blocked.len() * (self.box_count() + 1));
        for t in 0..=self.horizon() {
            for &position in &blocked {
                for entity in self.variables.entities() {
                    clauses.push(Clause::unit(-self.literal(entity, position, t)?));
                }
            }
        }
        Ok(clauses)
    }

    fn generate_player_exactly_one(&self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        for t in 0..=self.horizon() {
            clauses.extend(exactly_one(&self.open_literals(Entity::Player, t)?));
        }
        Ok(clauses)
    }

    fn generate_box_exactly_one(&self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        for b in 0..self.box_count() {
            for t in 0..=self.horizon() {
                clauses.extend(exactly_one(&self.open_literals(Entity::Box(b), t)?));
            }
        }
        Ok(clauses)
    }

    /// At most one entity per open cell per timestep.
    ///
    /// Box-box exclusion also means no two boxes can claim the same goal.
    fn generate_no_overlap(&self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        for t in 0..=self.horizon() {
            for &position in &self.open_cells {
                let literals = self
                    .variables
                    .entities()
                    .map(|entity| self.literal(entity, position, t))
                    .collect::<Result<Vec<i32>>>()?;
                clauses.extend(at_most_one(&literals));
            }
        }
        Ok(clauses)
    }

    /// `P(p, t) -> P(p, t+1) | P(n, t+1)` for each open neighbour `n`
    fn generate_player_moves(&self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::with_capacity(self.horizon() * self.open_cells.len());
        for t in 0..self.horizon() {
            for &position in &self.open_cells {
                let mut literals = vec![
                    -self.variables.player(position, t)?,
                    self.variables.player(position, t + 1)?,
                ];
                for (_, next) in self.open_neighbours(position) {
                    literals.push(self.variables.player(next, t + 1)?);
                }
                clauses.push(Clause::new(literals));
            }
        }
        Ok(clauses)
    }

    /// Player at `p`, box at `q = p + d`: the box stays at `q` or moves to
    /// `r = q + d`, and if it left `q` the player is now on `q`.
    ///
    /// A blocked `r` drops out of the first clause, which pins the box.
    fn generate_box_pushes(&self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        for t in 0..self.horizon() {
            for b in 0..self.box_count() {
                for &player in &self.open_cells {
                    for (mv, target) in self.open_neighbours(player) {
                        let p = self.variables.player(player, t)?;
                        let stays = self.variables.boxed(b, target, t + 1)?;
                        let here = self.variables.boxed(b, target, t)?;

                        let mut moved = vec![-p, -here, stays];
                        if let Some(beyond) = self.level.open_neighbour(target, mv) {
                            moved.push(self.variables.boxed(b, beyond, t + 1)?);
                        }
                        clauses.push(Clause::new(moved));

                        clauses.push(Clause::new(vec![
                            -p,
                            -here,
                            stays,
                            self.variables.player(target, t + 1)?,
                        ]));
                    }
                }
            }
        }
        Ok(clauses)
    }

    /// A box with no player beside it stays put
    fn generate_box_persistence(&self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::with_capacity(self.horizon() * self.box_count() * self.open_cells.len());
        for t in 0..self.horizon() {
            for b in 0..self.box_count() {
                for &position in &self.open_cells {
                    let mut literals = vec![-self.variables.boxed(b, position, t)?];
                    for (_, next) in self.open_neighbours(position) {
                        literals.push(self.variables.player(next, t)?);
                    }
                    literals.push(self.variables.boxed(b, position, t + 1)?);
                    clauses.push(Clause::new(literals));
                }
            }
        }
        Ok(clauses)
    }

    /// Every box ends on some goal at `T`
    fn generate_goals(&self) -> Result<Vec<Clause>> {
        let horizon = self.horizon();
        (0..self.box_count())
            .map(|b| {
                let literals = self
                    .level
                    .goals()
                    .iter()
                    .map(|&goal| self.variables.boxed(b, goal, horizon))
                    .collect::<Result<Vec<i32>>>()?;
                Ok(at_least_one(&literals))
            })
            .collect()
    }
}
