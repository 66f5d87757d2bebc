//! Deterministic tactical battle rules shared by the runtime and offline tools.
//!
//! `tactics-core` defines the canonical battle simulation: the grid, units,
//! intent resolution, enemy decisions, the turn state machine and reward
//! settlement. It performs no I/O and holds no global state. All battle
//! mutation flows through [`battle::Battle`], and supporting crates depend on
//! the types re-exported here.
pub mod archetype;
pub mod battle;
pub mod config;
pub mod error;
pub mod field;
pub mod grid;
pub mod intent;
pub mod policy;
pub mod resolver;
pub mod reward;
pub mod rng;
pub mod unit;

pub use archetype::{ArchetypeCatalog, ArchetypeTemplate, EnemyArchetype};
pub use battle::{
    Battle, BattleError, BattleSetup, EnemySpawn, HeroSetup, Phase, Rejection, SetupError,
    StepRecord, SubmitError,
};
pub use config::{BattleConfig, RewardRules, TieBreak};
pub use error::{ErrorSeverity, GameError};
pub use field::{Battlefield, InvariantBreach};
pub use grid::{
    CardinalDirection, DistanceField, Grid, GridDimensions, GridError, GridLayout, LayoutError,
    Position, TerrainKind,
};
pub use intent::{IllegalAttack, IllegalMove, Intent, InvalidReason, Outcome};
pub use policy::EnemyPolicy;
pub use resolver::{AttackTransition, IntentTransition, MoveTransition, melee_damage, resolve};
pub use reward::{
    BattleOutcome, BattleResult, ItemId, LootEntry, LootTable, RewardSummary, settle,
};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use unit::{BaseStats, ModifierKind, StatModifiers, Unit, UnitId, UnitKind};
