//! The grid plus every unit standing (or having stood) on it.
use crate::grid::{Grid, Position};
use crate::unit::{Unit, UnitId};

/// Breach of the occupancy/health invariants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvariantBreach {
    #[error("tile {position} references unknown unit {unit}")]
    UnknownOccupant { unit: UnitId, position: Position },

    #[error("dead unit {unit} still occupies {position}")]
    DeadOccupant { unit: UnitId, position: Position },

    #[error("unit {unit} is recorded at {recorded} but occupies {position}")]
    PositionDesync {
        unit: UnitId,
        recorded: Position,
        position: Position,
    },

    #[error("living unit {unit} at {position} is missing from occupancy")]
    MissingOccupant { unit: UnitId, position: Position },

    #[error("unit {unit} has health {health} above maximum {max_health}")]
    HealthOverflow {
        unit: UnitId,
        health: u32,
        max_health: u32,
    },

    #[error("unit {unit} stands on blocking terrain at {position}")]
    BlockedOccupant { unit: UnitId, position: Position },
}

/// Grid and units of one battle.
///
/// `units[0]` is the hero; `units[i + 1]` is roster entry `i`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Battlefield {
    grid: Grid,
    units: Vec<Unit>,
}

impl Battlefield {
    pub(crate) fn new(grid: Grid, units: Vec<Unit>) -> Self {
        Self { grid, units }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id.0 as usize)
    }

    pub(crate) fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(id.0 as usize)
    }

    pub fn hero(&self) -> &Unit {
        &self.units[UnitId::HERO.0 as usize]
    }

    /// Enemies in roster order, dead ones included.
    pub fn enemies(&self) -> &[Unit] {
        &self.units[1..]
    }

    pub fn enemy_count(&self) -> usize {
        self.units.len() - 1
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.enemies().iter().filter(|unit| unit.is_alive())
    }

    pub fn unit_at(&self, position: Position) -> Option<&Unit> {
        self.grid
            .occupant_at(position)
            .and_then(|id| self.unit(id))
    }

    /// Verifies occupancy and health invariants.
    ///
    /// - every occupied tile references exactly one living unit standing there
    /// - every living unit occupies its recorded tile, on passable terrain
    /// - health never exceeds maximum
    pub fn check_invariants(&self) -> Result<(), InvariantBreach> {
        for (&position, &id) in self.grid.occupancy() {
            let unit = self
                .unit(id)
                .ok_or(InvariantBreach::UnknownOccupant { unit: id, position })?;
            if !unit.is_alive() {
                return Err(InvariantBreach::DeadOccupant { unit: id, position });
            }
            if unit.position() != position {
                return Err(InvariantBreach::PositionDesync {
                    unit: id,
                    recorded: unit.position(),
                    position,
                });
            }
        }

        for unit in &self.units {
            if unit.health() > unit.max_health() {
                return Err(InvariantBreach::HealthOverflow {
                    unit: unit.id(),
                    health: unit.health(),
                    max_health: unit.max_health(),
                });
            }
            if !unit.is_alive() {
                continue;
            }
            let position = unit.position();
            if self.grid.occupant_at(position) != Some(unit.id()) {
                return Err(InvariantBreach::MissingOccupant {
                    unit: unit.id(),
                    position,
                });
            }
            let passable = self
                .grid
                .tile_at(position)
                .map(|terrain| terrain.is_passable())
                .unwrap_or(false);
            if !passable {
                return Err(InvariantBreach::BlockedOccupant {
                    unit: unit.id(),
                    position,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::EnemyArchetype;
    use crate::unit::{BaseStats, StatModifiers, UnitKind};

    fn field() -> Battlefield {
        let mut grid = Grid::open(3, 3);
        let hero = Unit::new(
            UnitId::HERO,
            UnitKind::Hero,
            "Hero",
            Position::new(0, 0),
            BaseStats::default(),
            StatModifiers::new(),
        );
        let enemy = Unit::new(
            UnitId(1),
            UnitKind::Enemy(EnemyArchetype::Marauder),
            "Orc",
            Position::new(2, 2),
            BaseStats::new(10, 3, 1, 1),
            StatModifiers::new(),
        );
        grid.place_occupant(hero.position(), hero.id()).unwrap();
        grid.place_occupant(enemy.position(), enemy.id()).unwrap();
        Battlefield::new(grid, vec![hero, enemy])
    }

    #[test]
    fn consistent_field_passes() {
        let field = field();
        assert_eq!(field.check_invariants(), Ok(()));
        assert_eq!(field.unit_at(Position::new(2, 2)).map(Unit::id), Some(UnitId(1)));
        assert_eq!(field.living_enemies().count(), 1);
    }

    #[test]
    fn desynced_position_is_detected() {
        let mut field = field();
        field
            .unit_mut(UnitId(1))
            .unwrap()
            .set_position(Position::new(1, 1));

        assert!(matches!(
            field.check_invariants(),
            Err(InvariantBreach::PositionDesync { .. })
        ));
    }

    #[test]
    fn dead_occupant_is_detected() {
        let mut field = field();
        field.unit_mut(UnitId(1)).unwrap().apply_damage(100);

        assert_eq!(
            field.check_invariants(),
            Err(InvariantBreach::DeadOccupant {
                unit: UnitId(1),
                position: Position::new(2, 2)
            })
        );
    }
}
