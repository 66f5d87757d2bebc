//! Data-driven battle content and loaders.
//!
//! This crate reads static battle content from RON/TOML data files:
//! - Battlefield layouts (data-driven via RON)
//! - Enemy archetype catalog with loot tables (data-driven via RON)
//! - Battle rules (data-driven via TOML)
//! - Scenarios that place a hero and a roster on a named map (RON)
//!
//! Content is turned into `tactics-core` inputs and never appears in battle
//! state itself.

#[cfg(feature = "loaders")]
pub mod loaders;

use std::path::PathBuf;

#[cfg(feature = "loaders")]
pub use loaders::{
    ArchetypeLoader, ConfigLoader, ContentFactory, MapLoader, ScenarioLoader, ScenarioSpec,
};

/// Directory holding the content shipped with this crate.
pub fn bundled_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}
