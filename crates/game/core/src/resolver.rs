//! Validation and application of a single move or attack.
//!
//! Every intent goes through `pre_validate` against the untouched field and is
//! applied only if that succeeds, so a rejected intent never partially
//! mutates the grid or any unit.
use crate::field::{Battlefield, InvariantBreach};
use crate::grid::Position;
use crate::intent::{IllegalAttack, IllegalMove, Intent, InvalidReason, Outcome};
use crate::unit::{Unit, UnitId};

/// Defines how a concrete intent validates against and mutates the field.
///
/// `apply` may assume `pre_validate` has succeeded; an error from `apply`
/// therefore means the field was already inconsistent.
pub trait IntentTransition {
    fn pre_validate(&self, field: &Battlefield, actor: UnitId) -> Result<(), InvalidReason>;

    fn apply(&self, field: &mut Battlefield, actor: UnitId) -> Result<Outcome, InvariantBreach>;
}

/// Damage dealt by a melee hit: `max(1, attack - defense)`.
///
/// The floor of 1 keeps every exchange progressing.
pub fn melee_damage(attacker: &Unit, defender: &Unit) -> u32 {
    let raw = i64::from(attacker.effective_attack()) - i64::from(defender.effective_defense());
    raw.clamp(1, i64::from(u32::MAX)) as u32
}

/// Resolves `intent` for `actor` against the field.
///
/// Rejections come back as [`Outcome::Invalid`]; `Err` is reserved for an
/// occupancy desync discovered while applying an already validated intent.
pub fn resolve(
    field: &mut Battlefield,
    actor: UnitId,
    intent: &Intent,
) -> Result<Outcome, InvariantBreach> {
    match *intent {
        Intent::MoveTo(destination) => drive(&MoveTransition { destination }, field, actor),
        Intent::AttackAt(target) => drive(&AttackTransition { target }, field, actor),
        Intent::EndTurn => Ok(Outcome::Invalid(InvalidReason::NotAnAction)),
    }
}

fn drive<T: IntentTransition>(
    transition: &T,
    field: &mut Battlefield,
    actor: UnitId,
) -> Result<Outcome, InvariantBreach> {
    if let Err(reason) = transition.pre_validate(field, actor) {
        return Ok(Outcome::Invalid(reason));
    }
    transition.apply(field, actor)
}

fn living_actor(field: &Battlefield, actor: UnitId) -> Result<&Unit, InvalidReason> {
    let unit = field
        .unit(actor)
        .ok_or(InvalidReason::ActorNotFound(actor))?;
    if !unit.is_alive() {
        return Err(InvalidReason::ActorDead(actor));
    }
    Ok(unit)
}

/// Walk to a tile along walkable tiles, within the actor's movement range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveTransition {
    pub destination: Position,
}

impl IntentTransition for MoveTransition {
    fn pre_validate(&self, field: &Battlefield, actor: UnitId) -> Result<(), InvalidReason> {
        let unit = living_actor(field, actor)?;
        let destination = self.destination;
        let grid = field.grid();

        let terrain = grid
            .tile_at(destination)
            .map_err(|_| IllegalMove::OutOfBounds { destination })?;
        if destination == unit.position() {
            return Err(IllegalMove::Stationary { destination }.into());
        }
        if terrain.is_blocking() {
            return Err(IllegalMove::Blocked { destination }.into());
        }
        if grid.occupant_at(destination).is_some() {
            return Err(IllegalMove::Occupied { destination }.into());
        }

        let range = unit.movement_range();
        if !unit.can_reach(destination) {
            return Err(IllegalMove::OutOfRange {
                destination,
                distance: unit.position().manhattan_distance(destination),
                range,
            }
            .into());
        }
        if grid
            .path_length(unit.position(), destination, range)
            .is_none()
        {
            return Err(IllegalMove::NoPath { destination, range }.into());
        }

        Ok(())
    }

    fn apply(&self, field: &mut Battlefield, actor: UnitId) -> Result<Outcome, InvariantBreach> {
        let from = field
            .unit(actor)
            .map(Unit::position)
            .ok_or(InvariantBreach::UnknownOccupant {
                unit: actor,
                position: self.destination,
            })?;

        let moved = field
            .grid_mut()
            .move_occupant(from, self.destination)
            .map_err(|_| InvariantBreach::MissingOccupant {
                unit: actor,
                position: from,
            })?;
        if moved != actor {
            return Err(InvariantBreach::PositionDesync {
                unit: moved,
                recorded: from,
                position: from,
            });
        }

        if let Some(unit) = field.unit_mut(actor) {
            unit.set_position(self.destination);
        }

        Ok(Outcome::Moved {
            unit: actor,
            from,
            to: self.destination,
        })
    }
}

/// Melee strike on the unit standing on an orthogonally adjacent tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackTransition {
    pub target: Position,
}

impl AttackTransition {
    fn target_unit<'a>(
        &self,
        field: &'a Battlefield,
        attacker: &Unit,
    ) -> Result<&'a Unit, InvalidReason> {
        let target = self.target;
        field
            .grid()
            .tile_at(target)
            .map_err(|_| IllegalAttack::OutOfBounds { target })?;
        if !attacker.position().is_adjacent(target) {
            return Err(IllegalAttack::NotAdjacent { target }.into());
        }

        let defender = field
            .unit_at(target)
            .ok_or(IllegalAttack::NoTarget { target })?;
        if !defender.is_alive() {
            return Err(IllegalAttack::TargetDead {
                target: defender.id(),
            }
            .into());
        }
        if !attacker.kind().is_hostile_to(defender.kind()) {
            return Err(IllegalAttack::FriendlyTarget {
                target: defender.id(),
            }
            .into());
        }
        Ok(defender)
    }
}

impl IntentTransition for AttackTransition {
    fn pre_validate(&self, field: &Battlefield, actor: UnitId) -> Result<(), InvalidReason> {
        let attacker = living_actor(field, actor)?;
        self.target_unit(field, attacker).map(|_| ())
    }

    fn apply(&self, field: &mut Battlefield, actor: UnitId) -> Result<Outcome, InvariantBreach> {
        let missing = InvariantBreach::UnknownOccupant {
            unit: actor,
            position: self.target,
        };
        let (target, damage) = {
            let attacker = field.unit(actor).ok_or(missing)?;
            let defender = field.unit_at(self.target).ok_or(missing)?;
            (defender.id(), melee_damage(attacker, defender))
        };

        let target_died = field
            .unit_mut(target)
            .map(|defender| defender.apply_damage(damage))
            .ok_or(missing)?;

        if target_died && field.grid_mut().remove_occupant(self.target) != Some(target) {
            return Err(InvariantBreach::MissingOccupant {
                unit: target,
                position: self.target,
            });
        }

        Ok(Outcome::Attacked {
            attacker: actor,
            target,
            damage,
            target_died,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::EnemyArchetype;
    use crate::grid::{Grid, GridLayout};
    use crate::unit::{BaseStats, StatModifiers, UnitKind};

    fn field_with(layout: &str, hero_at: Position, enemies: &[(Position, BaseStats)]) -> Battlefield {
        let mut grid = Grid::from_layout(&GridLayout::parse(layout).unwrap());
        let mut units = vec![Unit::new(
            UnitId::HERO,
            UnitKind::Hero,
            "Hero",
            hero_at,
            BaseStats::new(30, 10, 0, 2),
            StatModifiers::new(),
        )];
        for (index, (position, stats)) in enemies.iter().enumerate() {
            units.push(Unit::new(
                UnitId::enemy(index),
                UnitKind::Enemy(EnemyArchetype::Marauder),
                "Orc",
                *position,
                *stats,
                StatModifiers::new(),
            ));
        }
        for unit in &units {
            grid.place_occupant(unit.position(), unit.id()).unwrap();
        }
        Battlefield::new(grid, units)
    }

    #[test]
    fn move_relocates_only_the_mover() {
        let mut field = field_with(
            "....\n....\n....",
            Position::new(0, 0),
            &[(Position::new(3, 2), BaseStats::new(10, 1, 1, 1))],
        );

        let outcome = resolve(&mut field, UnitId::HERO, &Intent::MoveTo(Position::new(1, 1))).unwrap();

        assert_eq!(
            outcome,
            Outcome::Moved {
                unit: UnitId::HERO,
                from: Position::new(0, 0),
                to: Position::new(1, 1)
            }
        );
        assert_eq!(field.grid().occupant_at(Position::new(0, 0)), None);
        assert_eq!(field.grid().occupant_at(Position::new(1, 1)), Some(UnitId::HERO));
        assert_eq!(field.unit(UnitId(1)).unwrap().position(), Position::new(3, 2));
        assert_eq!(field.check_invariants(), Ok(()));
    }

    #[test]
    fn move_through_blocker_is_rejected_without_mutation() {
        let mut field = field_with(".#..\n....", Position::new(0, 0), &[]);
        let before = field.clone();

        let outcome = resolve(&mut field, UnitId::HERO, &Intent::MoveTo(Position::new(2, 0))).unwrap();

        assert_eq!(
            outcome,
            Outcome::Invalid(InvalidReason::IllegalMove(IllegalMove::NoPath {
                destination: Position::new(2, 0),
                range: 2
            }))
        );
        assert_eq!(field, before);
    }

    #[test]
    fn move_rejections_cover_each_cause() {
        let mut field = field_with(
            "..~\n...\n...",
            Position::new(0, 0),
            &[(Position::new(1, 0), BaseStats::new(10, 1, 1, 1))],
        );
        let before = field.clone();
        for destination in [
            Position::new(0, 5),
            Position::new(2, 0),
            Position::new(1, 0),
            Position::new(0, 0),
            Position::new(2, 2),
        ] {
            let outcome = resolve(&mut field, UnitId::HERO, &Intent::MoveTo(destination)).unwrap();
            assert!(outcome.is_invalid(), "{destination} should be rejected");
        }
        assert_eq!(field, before);

        assert!(matches!(
            resolve(&mut field, UnitId::HERO, &Intent::MoveTo(Position::new(2, 2))).unwrap(),
            Outcome::Invalid(InvalidReason::IllegalMove(IllegalMove::OutOfRange {
                distance: 4,
                range: 2,
                ..
            }))
        ));
        assert!(matches!(
            resolve(&mut field, UnitId::HERO, &Intent::MoveTo(Position::new(1, 0))).unwrap(),
            Outcome::Invalid(InvalidReason::IllegalMove(IllegalMove::Occupied { .. }))
        ));
        assert!(matches!(
            resolve(&mut field, UnitId::HERO, &Intent::MoveTo(Position::new(2, 0))).unwrap(),
            Outcome::Invalid(InvalidReason::IllegalMove(IllegalMove::Blocked { .. }))
        ));
    }

    #[test]
    fn attack_applies_floored_damage() {
        let mut field = field_with(
            "...\n...",
            Position::new(0, 0),
            &[(Position::new(0, 1), BaseStats::new(15, 1, 50, 1))],
        );

        let outcome = resolve(&mut field, UnitId::HERO, &Intent::AttackAt(Position::new(0, 1))).unwrap();

        assert_eq!(
            outcome,
            Outcome::Attacked {
                attacker: UnitId::HERO,
                target: UnitId(1),
                damage: 1,
                target_died: false
            }
        );
        assert_eq!(field.unit(UnitId(1)).unwrap().health(), 14);
    }

    #[test]
    fn lethal_attack_frees_the_tile() {
        let mut field = field_with(
            "...\n...",
            Position::new(0, 0),
            &[(Position::new(1, 0), BaseStats::new(5, 1, 0, 1))],
        );

        let outcome = resolve(&mut field, UnitId::HERO, &Intent::AttackAt(Position::new(1, 0))).unwrap();

        assert!(matches!(outcome, Outcome::Attacked { damage: 10, target_died: true, .. }));
        assert_eq!(field.grid().occupant_at(Position::new(1, 0)), None);
        assert!(!field.unit(UnitId(1)).unwrap().is_alive());
        assert_eq!(field.check_invariants(), Ok(()));

        let again = resolve(&mut field, UnitId::HERO, &Intent::AttackAt(Position::new(1, 0))).unwrap();
        assert_eq!(
            again,
            Outcome::Invalid(InvalidReason::IllegalAttack(IllegalAttack::NoTarget {
                target: Position::new(1, 0)
            }))
        );
    }

    #[test]
    fn attack_requires_adjacent_hostile_target() {
        let mut field = field_with(
            "....\n....",
            Position::new(0, 0),
            &[
                (Position::new(1, 1), BaseStats::new(5, 1, 0, 1)),
                (Position::new(2, 1), BaseStats::new(5, 1, 0, 1)),
            ],
        );

        assert!(matches!(
            resolve(&mut field, UnitId::HERO, &Intent::AttackAt(Position::new(1, 1))).unwrap(),
            Outcome::Invalid(InvalidReason::IllegalAttack(IllegalAttack::NotAdjacent { .. }))
        ));
        assert!(matches!(
            resolve(&mut field, UnitId::HERO, &Intent::AttackAt(Position::new(1, 0))).unwrap(),
            Outcome::Invalid(InvalidReason::IllegalAttack(IllegalAttack::NoTarget { .. }))
        ));
        assert!(matches!(
            resolve(&mut field, UnitId(1), &Intent::AttackAt(Position::new(2, 1))).unwrap(),
            Outcome::Invalid(InvalidReason::IllegalAttack(IllegalAttack::FriendlyTarget { .. }))
        ));
        assert_eq!(field.unit(UnitId(2)).unwrap().health(), 5);
    }

    #[test]
    fn end_turn_is_not_resolved() {
        let mut field = field_with("..", Position::new(0, 0), &[]);
        assert_eq!(
            resolve(&mut field, UnitId::HERO, &Intent::EndTurn).unwrap(),
            Outcome::Invalid(InvalidReason::NotAnAction)
        );
    }
}
