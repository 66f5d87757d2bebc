//! Combatants: identity, position, health, and effective stats.
//!
//! Units carry no scheduling logic; the turn controller decides who acts.
mod stats;

use std::fmt;

use crate::archetype::EnemyArchetype;
use crate::grid::Position;

pub use stats::{BaseStats, ModifierKind, StatModifiers};

/// Unique identifier for a unit within one battle.
///
/// The hero is always `UnitId::HERO`; enemies are numbered from 1 in roster
/// order, so `UnitId(i + 1)` is roster entry `i`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl UnitId {
    /// Reserved identifier for the controllable hero.
    pub const HERO: Self = Self(0);

    #[inline]
    pub const fn is_hero(self) -> bool {
        self.0 == Self::HERO.0
    }

    /// Identifier of the enemy at `roster_index`.
    pub const fn enemy(roster_index: usize) -> Self {
        Self(roster_index as u32 + 1)
    }

    /// Roster index of an enemy identifier.
    pub const fn roster_index(self) -> Option<usize> {
        if self.is_hero() {
            None
        } else {
            Some(self.0 as usize - 1)
        }
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which side a unit fights for, and for enemies which archetype it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitKind {
    Hero,
    Enemy(EnemyArchetype),
}

impl UnitKind {
    pub fn is_hero(self) -> bool {
        matches!(self, UnitKind::Hero)
    }

    pub fn archetype(self) -> Option<EnemyArchetype> {
        match self {
            UnitKind::Hero => None,
            UnitKind::Enemy(archetype) => Some(archetype),
        }
    }

    /// Hero and enemies are hostile to each other; enemies never fight enemies.
    pub fn is_hostile_to(self, other: UnitKind) -> bool {
        self.is_hero() != other.is_hero()
    }
}

/// A stateful combatant.
///
/// Health is always within `[0, max_health]` and a unit with zero health is
/// dead. Dead units stay in the battle's unit list (their roster slot keeps the
/// turn order stable) but own no tile.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    id: UnitId,
    kind: UnitKind,
    name: String,
    position: Position,
    health: u32,
    max_health: u32,
    base: BaseStats,
    modifiers: StatModifiers,
}

impl Unit {
    /// Creates a unit at full health.
    pub fn new(
        id: UnitId,
        kind: UnitKind,
        name: impl Into<String>,
        position: Position,
        base: BaseStats,
        modifiers: StatModifiers,
    ) -> Self {
        let max_health = modifiers
            .apply_unsigned(base.max_health, ModifierKind::MaxHealth)
            .max(1);
        Self {
            id,
            kind,
            name: name.into(),
            position,
            health: max_health,
            max_health,
            base,
            modifiers,
        }
    }

    /// Starts the unit at `health` instead of full, clamped to `[1, max]`.
    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health.clamp(1, self.max_health);
        self
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn base_stats(&self) -> &BaseStats {
        &self.base
    }

    pub fn modifiers(&self) -> &StatModifiers {
        &self.modifiers
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn effective_attack(&self) -> i32 {
        self.base
            .attack
            .saturating_add(self.modifiers.get(ModifierKind::Attack))
    }

    pub fn effective_defense(&self) -> i32 {
        self.base
            .defense
            .saturating_add(self.modifiers.get(ModifierKind::Defense))
    }

    pub fn movement_range(&self) -> u32 {
        self.modifiers
            .apply_unsigned(self.base.movement, ModifierKind::Movement)
    }

    /// Raw orthogonal distance check against the movement range.
    ///
    /// Path connectivity is the resolver's concern.
    pub fn can_reach(&self, target: Position) -> bool {
        self.position.manhattan_distance(target) <= self.movement_range()
    }

    /// Reduces health by `amount`, clamped at zero.
    ///
    /// Returns `true` only on the call that takes the unit from alive to dead.
    pub fn apply_damage(&mut self, amount: u32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        !self.is_alive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goblin(health: u32) -> Unit {
        Unit::new(
            UnitId(1),
            UnitKind::Enemy(EnemyArchetype::Marauder),
            "Goblin",
            Position::ORIGIN,
            BaseStats::new(health, 3, 1, 1),
            StatModifiers::new(),
        )
    }

    #[test]
    fn apply_damage_reports_death_transition_once() {
        let mut unit = goblin(10);

        assert!(!unit.apply_damage(4));
        assert_eq!(unit.health(), 6);
        assert!(unit.apply_damage(50));
        assert_eq!(unit.health(), 0);
        assert!(!unit.is_alive());
        assert!(!unit.apply_damage(1));
        assert_eq!(unit.health(), 0);
    }

    #[test]
    fn effective_stats_add_modifiers() {
        let modifiers = StatModifiers::new()
            .with(ModifierKind::Attack, 2)
            .with(ModifierKind::Defense, 2)
            .with(ModifierKind::MaxHealth, 10)
            .with(ModifierKind::Movement, 1);
        let hero = Unit::new(
            UnitId::HERO,
            UnitKind::Hero,
            "Hero",
            Position::new(2, 2),
            BaseStats::default(),
            modifiers,
        );

        assert_eq!(hero.effective_attack(), 7);
        assert_eq!(hero.effective_defense(), 4);
        assert_eq!(hero.max_health(), 40);
        assert_eq!(hero.health(), 40);
        assert_eq!(hero.movement_range(), 4);
        assert!(hero.can_reach(Position::new(4, 4)));
        assert!(!hero.can_reach(Position::new(5, 4)));
    }

    #[test]
    fn with_health_is_clamped() {
        assert_eq!(goblin(10).with_health(0).health(), 1);
        assert_eq!(goblin(10).with_health(99).health(), 10);
    }

    #[test]
    fn roster_ids_round_trip() {
        assert_eq!(UnitId::enemy(0), UnitId(1));
        assert_eq!(UnitId(3).roster_index(), Some(2));
        assert_eq!(UnitId::HERO.roster_index(), None);
    }
}
