//! Enemy archetype catalog loader.

use std::path::Path;

use anyhow::Context;
use tactics_core::ArchetypeCatalog;

use crate::loaders::{LoadResult, read_file};

/// Loader for archetype catalogs from RON files.
///
/// The file maps every archetype tag to its template:
///
/// ```ron
/// {
///     Marauder: (
///         name: "Orc Marauder",
///         stats: (max_health: 16, attack: 4, defense: 1, movement: 1),
///         loot: (drop_chance_percent: 60, entries: [(item: "common_weapon", weight: 3)]),
///     ),
///     // Brute, Sentinel ...
/// }
/// ```
pub struct ArchetypeLoader;

impl ArchetypeLoader {
    pub fn load(path: &Path) -> LoadResult<ArchetypeCatalog> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid archetype catalog {}", path.display()))
    }

    /// Parse a catalog and check that it covers every archetype.
    pub fn parse(content: &str) -> LoadResult<ArchetypeCatalog> {
        let catalog: ArchetypeCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse archetypes RON: {}", e))?;

        let missing = catalog.missing();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|archetype| archetype.as_ref()).collect();
            anyhow::bail!("catalog has no template for: {}", names.join(", "));
        }

        for (archetype, template) in catalog.iter() {
            if template.loot.drop_chance_percent > 100 {
                anyhow::bail!(
                    "{} drop chance {}% exceeds 100%",
                    archetype,
                    template.loot.drop_chance_percent
                );
            }
            if template.stats.max_health == 0 {
                anyhow::bail!("{} must have positive max_health", archetype);
            }
        }

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::EnemyArchetype;

    const TEMPLATE: &str = r#"(
        name: "Grunt",
        stats: (max_health: 10, attack: 3, defense: 1, movement: 1),
        loot: (drop_chance_percent: 50, entries: [(item: "bone", weight: 1)]),
    )"#;

    #[test]
    fn complete_catalog_loads() {
        let content = format!(
            "{{ Marauder: {TEMPLATE}, Brute: {TEMPLATE}, Sentinel: {TEMPLATE} }}"
        );
        let catalog = ArchetypeLoader::parse(&content).unwrap();

        let brute = catalog.get(EnemyArchetype::Brute).unwrap();
        assert_eq!(brute.name, "Grunt");
        assert_eq!(brute.loot.entries().len(), 1);
        assert_eq!(brute.loot.entries()[0].item.as_str(), "bone");
    }

    #[test]
    fn incomplete_catalog_names_the_gap() {
        let content = format!("{{ Marauder: {TEMPLATE} }}");
        let err = ArchetypeLoader::parse(&content).unwrap_err();
        assert!(err.to_string().contains("brute, sentinel"));
    }
}
