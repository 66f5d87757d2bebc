//! Inputs to `Battle::start`.
use crate::archetype::{ArchetypeCatalog, EnemyArchetype};
use crate::config::BattleConfig;
use crate::grid::{GridLayout, Position, TerrainKind};
use crate::unit::{BaseStats, StatModifiers};

use super::SetupError;

/// The hero as the progression record hands it over.
///
/// `modifiers` come from the talent collaborator and are copied into the hero
/// unit; the battle never writes them back.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroSetup {
    pub name: String,
    pub stats: BaseStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: StatModifiers,
    pub position: Position,
    /// Health carried over from earlier battles; `None` starts at full.
    #[cfg_attr(feature = "serde", serde(default))]
    pub health: Option<u32>,
}

impl HeroSetup {
    pub fn new(name: impl Into<String>, stats: BaseStats, position: Position) -> Self {
        Self {
            name: name.into(),
            stats,
            modifiers: StatModifiers::new(),
            position,
            health: None,
        }
    }

    pub fn with_modifiers(mut self, modifiers: StatModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_health(mut self, health: u32) -> Self {
        self.health = Some(health);
        self
    }
}

/// One roster entry. Overrides replace the archetype template's values.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySpawn {
    pub archetype: EnemyArchetype,
    pub position: Position,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: Option<BaseStats>,
}

impl EnemySpawn {
    pub fn new(archetype: EnemyArchetype, position: Position) -> Self {
        Self {
            archetype,
            position,
            name: None,
            stats: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_stats(mut self, stats: BaseStats) -> Self {
        self.stats = Some(stats);
        self
    }
}

/// Everything needed to start a battle.
///
/// Roster order is turn order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSetup {
    pub hero: HeroSetup,
    pub roster: Vec<EnemySpawn>,
    pub layout: GridLayout,
    #[cfg_attr(feature = "serde", serde(default))]
    pub catalog: ArchetypeCatalog,
    #[cfg_attr(feature = "serde", serde(default))]
    pub config: BattleConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: u64,
}

impl BattleSetup {
    pub fn new(hero: HeroSetup, layout: GridLayout) -> Self {
        Self {
            hero,
            roster: Vec::new(),
            layout,
            catalog: ArchetypeCatalog::default(),
            config: BattleConfig::default(),
            seed: 0,
        }
    }

    /// Builds a setup from a raw terrain matrix, rejecting ragged rows.
    pub fn from_terrain(
        hero: HeroSetup,
        roster: Vec<EnemySpawn>,
        terrain: Vec<Vec<TerrainKind>>,
    ) -> Result<Self, SetupError> {
        let layout = GridLayout::from_rows(terrain)?;
        Ok(Self::new(hero, layout).with_roster(roster))
    }

    pub fn with_enemy(mut self, spawn: EnemySpawn) -> Self {
        self.roster.push(spawn);
        self
    }

    pub fn with_roster(mut self, roster: Vec<EnemySpawn>) -> Self {
        self.roster = roster;
        self
    }

    pub fn with_catalog(mut self, catalog: ArchetypeCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::LayoutError;

    #[test]
    fn ragged_terrain_is_rejected() {
        let hero = HeroSetup::new("Hero", BaseStats::default(), Position::ORIGIN);
        let terrain = vec![
            vec![TerrainKind::Floor; 3],
            vec![TerrainKind::Floor, TerrainKind::Wall],
        ];

        assert_eq!(
            BattleSetup::from_terrain(hero, Vec::new(), terrain),
            Err(SetupError::Layout(LayoutError::RaggedRow {
                row: 1,
                width: 2,
                expected: 3
            }))
        );
    }
}
