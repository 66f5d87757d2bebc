//! Content loaders for reading battle data from files.
//!
//! This module provides loaders that convert RON/TOML files into
//! `tactics-core` inputs. Every loader validates what serde alone cannot
//! (tile bounds, catalog completeness, drop chances) and reports failures with
//! the offending path.

pub mod archetypes;
pub mod config;
pub mod factory;
pub mod map;
pub mod scenario;

pub use archetypes::ArchetypeLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use map::MapLoader;
pub use scenario::{ScenarioLoader, ScenarioSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
