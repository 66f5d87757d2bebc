//! Post-victory settlement: experience and loot.
//!
//! Settlement runs exactly once, when a battle enters `Victory`. Each defeated
//! enemy draws independently from its own loot table; there is no pooled draw.
use std::fmt;

use crate::config::RewardRules;
use crate::rng::{RngOracle, compute_seed, context};
use crate::unit::UnitId;

/// Identifier of an item handed to the inventory collaborator.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub item: ItemId,
    pub weight: u32,
}

/// Weighted drop table for one archetype.
///
/// A draw first rolls d100 against `drop_chance_percent`; on success one entry
/// is picked with probability proportional to its weight.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootTable {
    pub drop_chance_percent: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    entries: Vec<LootEntry>,
}

impl LootTable {
    pub fn new(drop_chance_percent: u8) -> Self {
        Self {
            drop_chance_percent: drop_chance_percent.min(100),
            entries: Vec::new(),
        }
    }

    /// Appends an entry; zero-weight entries can never be picked.
    pub fn push(&mut self, item: ItemId, weight: u32) {
        self.entries.push(LootEntry { item, weight });
    }

    pub fn with(mut self, item: impl Into<ItemId>, weight: u32) -> Self {
        self.push(item.into(), weight);
        self
    }

    pub fn entries(&self) -> &[LootEntry] {
        &self.entries
    }

    pub fn total_weight(&self) -> u64 {
        self.entries.iter().map(|entry| u64::from(entry.weight)).sum()
    }

    /// One independent draw for the enemy `unit` of a battle seeded with `seed`.
    pub fn draw<R>(&self, rng: &R, seed: u64, unit: UnitId) -> Option<ItemId>
    where
        R: RngOracle + ?Sized,
    {
        let total = self.total_weight();
        if total == 0 || self.drop_chance_percent == 0 {
            return None;
        }

        let drop_roll = rng.roll_d100(compute_seed(seed, 0, unit.0, context::LOOT_DROP));
        if drop_roll > u32::from(self.drop_chance_percent) {
            return None;
        }

        let pick_seed = compute_seed(seed, 0, unit.0, context::LOOT_PICK);
        let mut cursor = u64::from(rng.next_u32(pick_seed)) % total;
        for entry in &self.entries {
            let weight = u64::from(entry.weight);
            if cursor < weight {
                return Some(entry.item.clone());
            }
            cursor -= weight;
        }
        None
    }
}

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

/// Immutable settlement output consumed by progression and inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardSummary {
    pub outcome: BattleOutcome,
    pub experience: u32,
    pub loot: Vec<ItemId>,
    pub enemies_defeated: u32,
}

/// Terminal result handed back to the global-map collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleResult {
    pub outcome: BattleOutcome,
    /// Present only for victories.
    pub rewards: Option<RewardSummary>,
}

impl BattleResult {
    pub fn defeat() -> Self {
        Self {
            outcome: BattleOutcome::Defeat,
            rewards: None,
        }
    }

    pub fn victory(rewards: RewardSummary) -> Self {
        Self {
            outcome: BattleOutcome::Victory,
            rewards: Some(rewards),
        }
    }

    pub fn is_victory(&self) -> bool {
        matches!(self.outcome, BattleOutcome::Victory)
    }
}

/// Computes the reward summary for a won battle.
///
/// `defeated` lists every defeated enemy in roster order together with its
/// loot table.
pub fn settle<'a, R, I>(defeated: I, rules: &RewardRules, seed: u64, rng: &R) -> RewardSummary
where
    R: RngOracle + ?Sized,
    I: IntoIterator<Item = (UnitId, &'a LootTable)>,
{
    let mut loot = Vec::new();
    let mut enemies_defeated = 0u32;

    for (unit, table) in defeated {
        enemies_defeated += 1;
        if let Some(item) = table.draw(rng, seed, unit) {
            loot.push(item);
        }
    }

    RewardSummary {
        outcome: BattleOutcome::Victory,
        experience: rules.experience_for(enemies_defeated),
        loot,
        enemies_defeated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PcgRng;

    fn sure_drop() -> LootTable {
        LootTable::new(100).with("sword", 1).with("shield", 0)
    }

    #[test]
    fn guaranteed_drop_picks_only_weighted_entry() {
        let table = sure_drop();
        for seed in 0..64 {
            assert_eq!(
                table.draw(&PcgRng, seed, UnitId(1)),
                Some(ItemId::new("sword"))
            );
        }
    }

    #[test]
    fn zero_chance_or_empty_table_never_drops() {
        let never = LootTable::new(0).with("sword", 5);
        let empty = LootTable::new(100);
        for seed in 0..64 {
            assert_eq!(never.draw(&PcgRng, seed, UnitId(1)), None);
            assert_eq!(empty.draw(&PcgRng, seed, UnitId(1)), None);
        }
    }

    #[test]
    fn settle_draws_per_enemy_and_scales_experience() {
        let table = sure_drop();
        let rules = RewardRules::new(50, 25);
        let summary = settle(
            [(UnitId(1), &table), (UnitId(2), &table), (UnitId(3), &table)],
            &rules,
            7,
            &PcgRng,
        );

        assert_eq!(summary.outcome, BattleOutcome::Victory);
        assert_eq!(summary.enemies_defeated, 3);
        assert_eq!(summary.experience, 125);
        assert_eq!(summary.loot.len(), 3);
    }

    #[test]
    fn settle_is_deterministic_for_a_seed() {
        let table = LootTable::new(50).with("a", 1).with("b", 1).with("c", 1);
        let rules = RewardRules::default();
        let ids: Vec<UnitId> = (1..=8).map(UnitId).collect();

        let first = settle(ids.iter().map(|id| (*id, &table)), &rules, 99, &PcgRng);
        let second = settle(ids.iter().map(|id| (*id, &table)), &rules, 99, &PcgRng);
        assert_eq!(first, second);
    }
}
