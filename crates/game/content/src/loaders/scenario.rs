//! Scenario loader: hero and roster placement on a named map.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tactics_core::{ArchetypeCatalog, BattleConfig, BattleSetup, EnemySpawn, GridLayout, HeroSetup};

use crate::loaders::{LoadResult, read_file};

/// Unit placement for one battle. Terrain comes from the referenced map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    /// Map file name under `maps/`, without the `.ron` extension.
    pub map: String,
    pub hero: HeroSetup,
    pub roster: Vec<EnemySpawn>,
    #[serde(default)]
    pub seed: u64,
}

impl ScenarioSpec {
    /// Combines the placement with terrain, archetypes and rules.
    pub fn into_setup(
        self,
        layout: GridLayout,
        catalog: ArchetypeCatalog,
        config: BattleConfig,
    ) -> BattleSetup {
        BattleSetup::new(self.hero, layout)
            .with_roster(self.roster)
            .with_catalog(catalog)
            .with_config(config)
            .with_seed(self.seed)
    }
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<ScenarioSpec> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid scenario {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<ScenarioSpec> {
        let spec: ScenarioSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;

        if spec.roster.is_empty() {
            anyhow::bail!("scenario '{}' has an empty roster", spec.map);
        }

        Ok(spec)
    }
}
