//! Runtime orchestration around the deterministic battle engine.
//!
//! This crate holds everything that lives between battles and drives them:
//! the hero's persistent record, talents, seeded encounter generation and the
//! session loop that plays a battle with a pluggable intent provider.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the battle driver
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] turns step records into events and combat log lines
//! - [`providers`] ships scripted and automatic heroes
//! - [`progression`], [`talents`], [`items`] and [`encounter`] cover the world
//!   between battles
pub mod api;
pub mod encounter;
pub mod events;
pub mod items;
pub mod progression;
pub mod providers;
pub mod session;
pub mod talents;

pub use api::{EndTurnProvider, IntentProvider, Result, RuntimeError};
pub use encounter::{EncounterGenerator, Location};
pub use events::{BattleEvent, HealthThreshold, extract_events, narrate, narrate_rewards};
pub use items::{Equipment, Item, ItemSlot, Rarity};
pub use progression::{HeroRecord, ProgressReport};
pub use providers::{AutoHero, ScriptedIntents};
pub use session::{BattleSession, SessionConfig, SessionReport};
pub use talents::{Talent, TalentBook, TalentError, TalentKind};
