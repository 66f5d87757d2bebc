//! Deterministic enemy decisions.
//!
//! The policy reads the field and emits one [`Intent`] per enemy turn. It never
//! resolves anything itself; the turn controller feeds its intents through the
//! same resolver the hero uses. Only legal intents are produced, so a rejected
//! policy intent is an internal-consistency failure.
use crate::config::TieBreak;
use crate::field::Battlefield;
use crate::grid::{CardinalDirection, Position};
use crate::intent::Intent;
use crate::unit::{Unit, UnitId, UnitKind};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnemyPolicy {
    tie_break: TieBreak,
}

impl EnemyPolicy {
    pub fn new(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Chooses the intent for `enemy` on its turn.
    ///
    /// 1. Hero orthogonally adjacent: attack the hero.
    /// 2. Archetype holds position (sentinels): end turn.
    /// 3. Step to the neighbour with the shortest walkable path to the hero.
    /// 4. No such path: step to a walkable neighbour strictly closer by
    ///    Manhattan distance.
    /// 5. Otherwise end turn.
    pub fn decide(&self, field: &Battlefield, enemy: UnitId) -> Intent {
        let Some(unit) = field.unit(enemy).filter(|unit| unit.is_alive()) else {
            return Intent::EndTurn;
        };
        let UnitKind::Enemy(archetype) = unit.kind() else {
            return Intent::EndTurn;
        };
        let hero = field.hero();
        if !hero.is_alive() {
            return Intent::EndTurn;
        }

        if unit.position().is_adjacent(hero.position()) {
            return Intent::AttackAt(hero.position());
        }

        if !archetype.pursues() {
            return Intent::EndTurn;
        }
        self.approach(field, unit, hero.position())
            .map(Intent::MoveTo)
            .unwrap_or(Intent::EndTurn)
    }

    fn approach(&self, field: &Battlefield, unit: &Unit, goal: Position) -> Option<Position> {
        if unit.movement_range() == 0 {
            return None;
        }
        let grid = field.grid();
        let origin = unit.position();
        let distances = grid.distance_field(goal);

        let shortest = self
            .ordered_steps(origin)
            .into_iter()
            .filter(|step| grid.is_walkable(*step))
            .filter_map(|step| distances.distance(step).map(|d| (d, step)))
            .min_by_key(|(d, _)| *d)
            .map(|(_, step)| step);
        if shortest.is_some() {
            return shortest;
        }

        let current = origin.manhattan_distance(goal);
        self.ordered_steps(origin)
            .into_iter()
            .filter(|step| grid.is_walkable(*step))
            .find(|step| step.manhattan_distance(goal) < current)
    }

    /// Neighbouring tiles in tie-break order: preferred axis first, then the
    /// fixed North/South/East/West order within an axis.
    ///
    /// `min_by_key` keeps the first minimum, so this order decides ties.
    fn ordered_steps(&self, origin: Position) -> [Position; 4] {
        let mut directions = CardinalDirection::ALL;
        let prefer_vertical = matches!(self.tie_break, TieBreak::RowFirst);
        directions.sort_by_key(|direction| direction.is_vertical() != prefer_vertical);
        directions.map(|direction| origin.step(direction))
    }
}
