//! Enemy archetypes: a closed set of tagged variants.
//!
//! Each tag maps to a stat template and a loot table through the
//! [`ArchetypeCatalog`]. Behaviour differences are expressed by the enemy
//! policy matching on the tag, never through trait objects.
use std::collections::BTreeMap;

use crate::reward::{ItemId, LootTable};
use crate::unit::BaseStats;

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
pub enum EnemyArchetype {
    /// Baseline melee chaser.
    Marauder,
    /// Slow to die, hits hard, easy to hit back.
    Brute,
    /// Holds its post and only strikes what comes adjacent.
    Sentinel,
}

impl EnemyArchetype {
    pub const ALL: [EnemyArchetype; 3] = [
        EnemyArchetype::Marauder,
        EnemyArchetype::Brute,
        EnemyArchetype::Sentinel,
    ];

    /// Whether the policy may walk this enemy towards the hero.
    pub fn pursues(self) -> bool {
        match self {
            EnemyArchetype::Marauder | EnemyArchetype::Brute => true,
            EnemyArchetype::Sentinel => false,
        }
    }
}

/// Stat block and drops shared by every enemy of one archetype.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArchetypeTemplate {
    pub name: String,
    pub stats: BaseStats,
    pub loot: LootTable,
}

impl ArchetypeTemplate {
    pub fn new(name: impl Into<String>, stats: BaseStats, loot: LootTable) -> Self {
        Self {
            name: name.into(),
            stats,
            loot,
        }
    }
}

/// Lookup from archetype tag to template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ArchetypeCatalog {
    templates: BTreeMap<EnemyArchetype, ArchetypeTemplate>,
}

impl ArchetypeCatalog {
    /// Catalog with no templates; every archetype must be inserted before use.
    pub fn empty() -> Self {
        Self {
            templates: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, archetype: EnemyArchetype, template: ArchetypeTemplate) {
        self.templates.insert(archetype, template);
    }

    pub fn get(&self, archetype: EnemyArchetype) -> Option<&ArchetypeTemplate> {
        self.templates.get(&archetype)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EnemyArchetype, &ArchetypeTemplate)> + '_ {
        self.templates.iter().map(|(kind, template)| (*kind, template))
    }

    /// Archetypes that have no template.
    pub fn missing(&self) -> Vec<EnemyArchetype> {
        EnemyArchetype::ALL
            .into_iter()
            .filter(|archetype| !self.templates.contains_key(archetype))
            .collect()
    }
}

impl Default for ArchetypeCatalog {
    fn default() -> Self {
        let mut catalog = Self::empty();
        catalog.insert(
            EnemyArchetype::Marauder,
            ArchetypeTemplate::new(
                "Orc Marauder",
                BaseStats::new(16, 4, 1, 1),
                standard_loot(60, [45, 33, 14, 8]),
            ),
        );
        catalog.insert(
            EnemyArchetype::Brute,
            ArchetypeTemplate::new(
                "Cave Troll",
                BaseStats::new(28, 7, 0, 1),
                standard_loot(80, [30, 35, 22, 13]),
            ),
        );
        catalog.insert(
            EnemyArchetype::Sentinel,
            ArchetypeTemplate::new(
                "Barrow Sentinel",
                BaseStats::new(20, 5, 3, 0),
                standard_loot(50, [40, 35, 17, 8]),
            ),
        );
        catalog
    }
}

/// Rarity tiers crossed with equipment slots, weighted per tier.
fn standard_loot(drop_chance_percent: u8, tier_weights: [u32; 4]) -> LootTable {
    const TIERS: [&str; 4] = ["common", "uncommon", "rare", "epic"];
    const SLOTS: [&str; 3] = ["weapon", "armor", "trinket"];

    let mut table = LootTable::new(drop_chance_percent);
    for (tier, weight) in TIERS.iter().zip(tier_weights) {
        for slot in SLOTS {
            table.push(ItemId::new(format!("{tier}_{slot}")), weight);
        }
    }
    table
}
