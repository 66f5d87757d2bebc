//! The battle state machine.
//!
//! A [`Battle`] exclusively owns its grid and units from [`Battle::start`]
//! until it is dropped. It advances only on discrete calls: [`Battle::submit`]
//! for the hero and [`Battle::advance`] for each enemy turn, so a UI loop and
//! a test harness drive it identically.
//!
//! ```text
//! HeroTurn --intent--> Resolving --enemies left--> EnemyTurn(0) --> ... --> HeroTurn
//!                          |                             |
//!                          +--none left--> Victory       +--hero dead--> Defeat
//! ```
mod errors;
mod setup;
mod turns;

use std::fmt;

pub use errors::{BattleError, Rejection, SetupError, SubmitError};
pub use setup::{BattleSetup, EnemySpawn, HeroSetup};

use crate::config::BattleConfig;
use crate::field::Battlefield;
use crate::grid::{Grid, Position};
use crate::intent::{Intent, Outcome};
use crate::policy::EnemyPolicy;
use crate::reward::{BattleResult, LootTable};
use crate::unit::{StatModifiers, Unit, UnitId, UnitKind};

/// Current state of the turn state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    HeroTurn,
    /// Turn of the enemy at this roster index.
    EnemyTurn(usize),
    /// An intent is being applied.
    Resolving,
    Victory,
    Defeat,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Victory | Phase::Defeat)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::HeroTurn => f.write_str("hero turn"),
            Phase::EnemyTurn(index) => write!(f, "enemy turn {index}"),
            Phase::Resolving => f.write_str("resolving"),
            Phase::Victory => f.write_str("victory"),
            Phase::Defeat => f.write_str("defeat"),
        }
    }
}

/// One resolved action, as exposed to renderers and logs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepRecord {
    /// Zero-based index of this record in the battle log.
    pub nonce: u64,
    pub actor: UnitId,
    pub intent: Intent,
    pub outcome: Outcome,
    pub phase_after: Phase,
}

#[derive(Clone, Debug)]
pub struct Battle {
    field: Battlefield,
    phase: Phase,
    config: BattleConfig,
    policy: EnemyPolicy,
    /// Loot table per roster index.
    loot: Vec<LootTable>,
    log: Vec<StepRecord>,
    seed: u64,
    result: Option<BattleResult>,
    fault: Option<BattleError>,
}

impl Battle {
    /// Validates the setup and places every unit. The battle opens on the
    /// hero's turn.
    pub fn start(setup: BattleSetup) -> Result<Self, SetupError> {
        let BattleSetup {
            hero,
            roster,
            layout,
            catalog,
            config,
            seed,
        } = setup;

        if roster.is_empty() {
            return Err(SetupError::EmptyRoster);
        }
        if roster.len() > config.max_enemies {
            return Err(SetupError::TooManyEnemies {
                count: roster.len(),
                max: config.max_enemies,
            });
        }

        let mut grid = Grid::from_layout(&layout);
        let mut units = Vec::with_capacity(roster.len() + 1);
        let mut loot = Vec::with_capacity(roster.len());

        let mut hero_unit = Unit::new(
            UnitId::HERO,
            UnitKind::Hero,
            hero.name,
            hero.position,
            hero.stats,
            hero.modifiers,
        );
        if let Some(health) = hero.health {
            hero_unit = hero_unit.with_health(health);
        }
        place(&mut grid, UnitId::HERO, hero.position)?;
        units.push(hero_unit);

        for (index, spawn) in roster.into_iter().enumerate() {
            let id = UnitId::enemy(index);
            let template = catalog
                .get(spawn.archetype)
                .ok_or(SetupError::MissingArchetype(spawn.archetype))?;
            place(&mut grid, id, spawn.position)?;
            units.push(Unit::new(
                id,
                UnitKind::Enemy(spawn.archetype),
                spawn.name.unwrap_or_else(|| template.name.clone()),
                spawn.position,
                spawn.stats.unwrap_or(template.stats),
                StatModifiers::new(),
            ));
            loot.push(template.loot.clone());
        }

        Ok(Self {
            field: Battlefield::new(grid, units),
            phase: Phase::HeroTurn,
            policy: EnemyPolicy::new(config.tie_break),
            config,
            loot,
            log: Vec::new(),
            seed,
            result: None,
            fault: None,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn field(&self) -> &Battlefield {
        &self.field
    }

    pub fn grid(&self) -> &Grid {
        self.field.grid()
    }

    /// Hero first, then the roster in turn order.
    pub fn units(&self) -> &[Unit] {
        self.field.units()
    }

    pub fn hero(&self) -> &Unit {
        self.field.hero()
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.field.unit(id)
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn log(&self) -> &[StepRecord] {
        &self.log
    }

    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.log.last().map(|record| &record.outcome)
    }

    /// Terminal result; `None` until the battle reaches `Victory` or `Defeat`.
    pub fn result(&self) -> Option<&BattleResult> {
        self.result.as_ref()
    }

    /// The fatal fault that halted this battle, if any.
    pub fn fault(&self) -> Option<&BattleError> {
        self.fault.as_ref()
    }

    /// Verifies occupancy and health invariants of the current state.
    pub fn check_invariants(&self) -> Result<(), BattleError> {
        self.field.check_invariants().map_err(BattleError::from)
    }
}

fn place(grid: &mut Grid, unit: UnitId, position: Position) -> Result<(), SetupError> {
    let terrain = grid
        .tile_at(position)
        .map_err(|_| SetupError::SpawnOutOfBounds { unit, position })?;
    if terrain.is_blocking() {
        return Err(SetupError::SpawnBlocked { unit, position });
    }
    if let Some(occupant) = grid.occupant_at(position) {
        return Err(SetupError::SpawnOccupied {
            unit,
            position,
            occupant,
        });
    }
    grid.place_occupant(position, unit)
        .map_err(|_| SetupError::SpawnBlocked { unit, position })
}
