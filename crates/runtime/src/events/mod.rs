//! Battle events derived from step records.
//!
//! The core battle only records what happened as [`tactics_core::StepRecord`]s.
//! This module turns those records into higher-level events and renders them
//! as combat log lines.

mod extractor;
mod game_event;
mod narration;

pub use extractor::extract_events;
pub use game_event::{BattleEvent, HealthThreshold};
pub use narration::{narrate, narrate_rewards};
