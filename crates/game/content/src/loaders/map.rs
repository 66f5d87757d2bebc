//! Battlefield layout loader.
//!
//! Loads pure terrain data from map RON files. Unit placement is handled
//! separately via scenario files.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tactics_core::{GridLayout, Position, TerrainKind};

use crate::loaders::{LoadResult, read_file};

/// Map data structure for RON files (terrain only).
///
/// Every tile not listed in `tiles` is floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapDataRon {
    dimensions: (u32, u32),
    #[serde(default)]
    tiles: Vec<(i32, i32, TerrainKind)>, // (x, y, terrain)
}

/// Loader for battlefield layouts from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load a layout from a RON file.
    pub fn load(path: &Path) -> LoadResult<GridLayout> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid map {}", path.display()))
    }

    /// Parse a layout from RON text.
    pub fn parse(content: &str) -> LoadResult<GridLayout> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let (width, height) = data.dimensions;
        if width == 0 || height == 0 {
            anyhow::bail!("map dimensions must be non-zero, got {}x{}", width, height);
        }

        let mut layout = GridLayout::open(width, height);
        for (x, y, terrain) in data.tiles {
            layout.set(Position::new(x, y), terrain)?;
        }

        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlisted_tiles_are_floor() {
        let layout = MapLoader::parse(
            r#"(
                dimensions: (4, 3),
                tiles: [(1, 1, Wall), (2, 0, Water)],
            )"#,
        )
        .unwrap();

        assert_eq!(layout.dimensions().width, 4);
        assert_eq!(layout.terrain(Position::new(1, 1)), Some(TerrainKind::Wall));
        assert_eq!(layout.terrain(Position::new(2, 0)), Some(TerrainKind::Water));
        assert_eq!(layout.terrain(Position::new(3, 2)), Some(TerrainKind::Floor));
    }

    #[test]
    fn tiles_outside_dimensions_are_rejected() {
        let err = MapLoader::parse("(dimensions: (2, 2), tiles: [(5, 0, Wall)])").unwrap_err();
        assert!(err.to_string().contains("outside the layout"));

        assert!(MapLoader::parse("(dimensions: (0, 3))").is_err());
    }
}
