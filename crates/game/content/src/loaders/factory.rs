//! Content factory for building battle setups from data files.

use std::path::{Path, PathBuf};

use tactics_core::{ArchetypeCatalog, BattleConfig, BattleSetup, GridLayout};

use crate::loaders::{
    ArchetypeLoader, ConfigLoader, LoadResult, MapLoader, ScenarioLoader, ScenarioSpec,
};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── archetypes.ron
/// ├── maps/
/// │   ├── ford.ron
/// │   └── barrow.ron
/// └── scenarios/
///     └── ambush.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle rules from `config.toml`, or defaults if the file is absent.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the archetype catalog from `archetypes.ron`, or the built-in
    /// catalog if the file is absent.
    pub fn load_archetypes(&self) -> LoadResult<ArchetypeCatalog> {
        let path = self.data_dir.join("archetypes.ron");
        if !path.exists() {
            return Ok(ArchetypeCatalog::default());
        }
        ArchetypeLoader::load(&path)
    }

    /// Load a layout from `maps/{map_name}.ron`.
    pub fn load_map(&self, map_name: &str) -> LoadResult<GridLayout> {
        let path = self.data_dir.join("maps").join(format!("{}.ron", map_name));
        MapLoader::load(&path)
    }

    /// Load unit placement from `scenarios/{scenario_name}.ron`.
    pub fn load_scenario(&self, scenario_name: &str) -> LoadResult<ScenarioSpec> {
        let path = self
            .data_dir
            .join("scenarios")
            .join(format!("{}.ron", scenario_name));
        ScenarioLoader::load(&path)
    }

    /// Load a scenario together with its map, archetypes and rules.
    pub fn build_setup(&self, scenario_name: &str) -> LoadResult<BattleSetup> {
        let scenario = self.load_scenario(scenario_name)?;
        let layout = self.load_map(&scenario.map)?;
        let catalog = self.load_archetypes()?;
        let config = self.load_config()?;
        Ok(scenario.into_setup(layout, catalog, config))
    }

    /// Names of every scenario under `scenarios/`, sorted.
    pub fn scenario_names(&self) -> LoadResult<Vec<String>> {
        list_ron_stems(&self.data_dir.join("scenarios"))
    }

    /// Names of every map under `maps/`, sorted.
    pub fn map_names(&self) -> LoadResult<Vec<String>> {
        list_ron_stems(&self.data_dir.join("maps"))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn list_ron_stems(dir: &Path) -> LoadResult<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let entries = std::fs::read_dir(dir)
        .map_err(|e| anyhow::anyhow!("Failed to list {}: {}", dir.display(), e))?;

    let mut names = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "ron") {
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_owned());
            }
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
