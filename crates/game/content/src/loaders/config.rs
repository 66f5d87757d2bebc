//! Battle rules loader.

use std::path::Path;

use tactics_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`BattleConfig::default`].
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.max_enemies == 0 {
            anyhow::bail!("max_enemies must be at least 1");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::TieBreak;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            tie_break = "column_first"

            [rewards]
            experience_per_enemy = 40
            "#,
        )
        .unwrap();

        assert_eq!(config.tie_break, TieBreak::ColumnFirst);
        assert_eq!(config.rewards.experience_per_enemy, 40);
        assert_eq!(config.rewards.base_experience, 50);
        assert_eq!(config.max_enemies, BattleConfig::DEFAULT_MAX_ENEMIES);
    }

    #[test]
    fn zero_roster_cap_is_rejected() {
        assert!(ConfigLoader::parse("max_enemies = 0").is_err());
        assert!(ConfigLoader::parse("tie_break = \"diagonal\"").is_err());
    }
}
