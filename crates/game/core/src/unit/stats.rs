//! Base stat blocks and additive stat modifiers.
//!
//! Modifiers come from outside the battle (the hero's talents) and are copied
//! into the unit when the battle starts. They never change during a battle.
use std::collections::BTreeMap;

/// Unmodified combat stats of a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub max_health: u32,
    pub attack: i32,
    pub defense: i32,
    /// Tiles per turn.
    pub movement: u32,
}

impl BaseStats {
    pub const fn new(max_health: u32, attack: i32, defense: i32, movement: u32) -> Self {
        Self {
            max_health,
            attack,
            defense,
            movement,
        }
    }
}

impl Default for BaseStats {
    /// A fresh adventurer.
    fn default() -> Self {
        Self::new(30, 5, 2, 3)
    }
}

/// Stat a modifier applies to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ModifierKind {
    MaxHealth,
    Attack,
    Defense,
    Movement,
}

/// Read-only mapping of modifier kind to (additive) magnitude.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StatModifiers {
    entries: BTreeMap<ModifierKind, i32>,
}

impl StatModifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `magnitude` on top of whatever is already recorded for `kind`.
    pub fn add(&mut self, kind: ModifierKind, magnitude: i32) {
        let entry = self.entries.entry(kind).or_insert(0);
        *entry = entry.saturating_add(magnitude);
    }

    pub fn with(mut self, kind: ModifierKind, magnitude: i32) -> Self {
        self.add(kind, magnitude);
        self
    }

    pub fn get(&self, kind: ModifierKind) -> i32 {
        self.entries.get(&kind).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(|magnitude| *magnitude == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModifierKind, i32)> + '_ {
        self.entries.iter().map(|(kind, magnitude)| (*kind, *magnitude))
    }

    /// Combines `base` with the recorded modifier for `kind`, saturating at 0
    /// for unsigned stats.
    pub fn apply_unsigned(&self, base: u32, kind: ModifierKind) -> u32 {
        (i64::from(base) + i64::from(self.get(kind))).clamp(0, i64::from(u32::MAX)) as u32
    }
}

impl FromIterator<(ModifierKind, i32)> for StatModifiers {
    fn from_iter<T: IntoIterator<Item = (ModifierKind, i32)>>(iter: T) -> Self {
        let mut modifiers = Self::new();
        for (kind, magnitude) in iter {
            modifiers.add(kind, magnitude);
        }
        modifiers
    }
}
