//! Intent provider implementations for driving the hero.

pub mod auto_hero;
pub mod scripted;

pub use auto_hero::AutoHero;
pub use scripted::ScriptedIntents;
