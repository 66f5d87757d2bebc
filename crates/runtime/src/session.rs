//! Drives one battle from setup to settlement.
//!
//! A [`BattleSession`] owns nothing but borrowed progression state. It asks an
//! [`IntentProvider`] for hero intents, runs the enemy phase after each hero
//! turn, narrates every step and finally applies the result to the
//! [`HeroRecord`].
use tactics_core::{
    Battle, BattleResult, BattleSetup, GameError, Phase, StepRecord, SubmitError,
};
use tracing::{debug, error, info, warn};

use crate::api::{IntentProvider, Result, RuntimeError};
use crate::encounter::{EncounterGenerator, Location};
use crate::events::{extract_events, narrate, narrate_rewards};
use crate::progression::{HeroRecord, ProgressReport};

/// Limits that keep a misbehaving provider from stalling a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Consecutive rejected hero intents tolerated before giving up.
    pub max_rejections: u32,
    /// Hero turns played (each followed by the enemy phase) before giving up.
    pub max_rounds: u32,
}

impl SessionConfig {
    pub const DEFAULT_MAX_REJECTIONS: u32 = 3;
    pub const DEFAULT_MAX_ROUNDS: u32 = 500;
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_rejections: Self::DEFAULT_MAX_REJECTIONS,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
        }
    }
}

/// Everything a finished session produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionReport {
    pub result: BattleResult,
    pub progress: ProgressReport,
    pub log: Vec<StepRecord>,
    pub narration: Vec<String>,
    pub rounds: u32,
}

pub struct BattleSession<'a> {
    hero: &'a mut HeroRecord,
    config: SessionConfig,
}

impl<'a> BattleSession<'a> {
    pub fn new(hero: &'a mut HeroRecord) -> Self {
        Self::with_config(hero, SessionConfig::default())
    }

    pub fn with_config(hero: &'a mut HeroRecord, config: SessionConfig) -> Self {
        Self { hero, config }
    }

    pub fn hero(&self) -> &HeroRecord {
        self.hero
    }

    /// Generates an encounter for `location` around the hero record and
    /// plays it.
    pub fn run_encounter<P: IntentProvider>(
        &mut self,
        generator: &EncounterGenerator,
        location: &Location,
        seed: u64,
        provider: P,
    ) -> Result<SessionReport> {
        info!(
            target: "runtime::session",
            location = %location.name,
            difficulty = location.difficulty,
            seed,
            "entering location"
        );
        let setup = generator.generate(
            location,
            self.hero.hero_setup(generator.hero_start()),
            seed,
        );
        let mut report = self.run(setup, provider)?;
        report.narration.insert(
            0,
            format!("You enter {}! Prepare for battle.", location.name),
        );
        Ok(report)
    }

    /// Plays `setup` to a terminal phase and applies the result.
    ///
    /// The hero record is only touched once the battle has ended; any error
    /// leaves it unchanged.
    pub fn run<P: IntentProvider>(
        &mut self,
        setup: BattleSetup,
        mut provider: P,
    ) -> Result<SessionReport> {
        let mut battle = Battle::start(setup).inspect_err(|err| {
            warn!(target: "runtime::session", error = %err, "battle setup rejected");
        })?;
        info!(
            target: "runtime::session",
            hero = battle.hero().name(),
            enemies = battle.field().enemy_count(),
            seed = battle.seed(),
            "battle started"
        );

        let mut narration = Vec::new();
        let mut rounds = 0;
        let mut rejections = 0;

        while !battle.is_over() {
            if rounds >= self.config.max_rounds {
                error!(target: "runtime::session", rounds, "round limit reached");
                return Err(RuntimeError::RoundLimit { rounds });
            }

            let intent = provider.provide_intent(&battle)?;
            debug!(target: "runtime::session", ?intent, round = rounds, "hero intent");
            match battle.submit(intent) {
                Ok(Some(record)) => {
                    rejections = 0;
                    Self::observe(&battle, &record, &mut narration);
                }
                Ok(None) => {
                    rejections = 0;
                    debug!(target: "runtime::session", "hero ended turn");
                }
                Err(SubmitError::Rejected(rejection)) => {
                    rejections += 1;
                    warn!(
                        target: "runtime::session",
                        %rejection,
                        code = rejection.error_code(),
                        attempt = rejections,
                        "hero intent rejected"
                    );
                    provider.on_rejected(&rejection);
                    if rejections >= self.config.max_rejections {
                        return Err(RuntimeError::TooManyRejections {
                            count: rejections,
                            last: rejection,
                        });
                    }
                    continue;
                }
                Err(SubmitError::Fault(fault)) => {
                    error!(target: "runtime::session", error = %fault, "battle halted");
                    return Err(fault.into());
                }
            }

            // Each enemy step is observed before the next one resolves.
            while matches!(battle.phase(), Phase::EnemyTurn(_)) {
                let reply = battle.advance().inspect_err(|fault| {
                    error!(target: "runtime::session", error = %fault, "battle halted");
                })?;
                if let Some(record) = reply {
                    Self::observe(&battle, &record, &mut narration);
                }
            }
            rounds += 1;
        }

        let Some(result) = battle.result().cloned() else {
            error!(target: "runtime::session", phase = %battle.phase(), "battle ended unsettled");
            return Err(RuntimeError::Unsettled {
                phase: battle.phase(),
            });
        };
        if let Some(rewards) = &result.rewards {
            narration.extend(narrate_rewards(rewards));
        }
        let progress = self.hero.apply_result(&result);
        info!(
            target: "runtime::session",
            outcome = %result.outcome,
            experience = progress.experience_gained,
            levels = progress.levels_gained,
            loot = progress.loot.len(),
            rounds,
            "battle settled"
        );

        Ok(SessionReport {
            result,
            progress,
            log: battle.log().to_vec(),
            narration,
            rounds,
        })
    }

    fn observe(battle: &Battle, record: &StepRecord, narration: &mut Vec<String>) {
        debug!(
            target: "runtime::session",
            nonce = record.nonce,
            actor = %record.actor,
            outcome = ?record.outcome,
            phase = %record.phase_after,
            "step resolved"
        );
        narration.extend(
            extract_events(record, battle)
                .iter()
                .filter_map(|event| narrate(event, battle)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::EndTurnProvider;
    use crate::providers::ScriptedIntents;
    use tactics_core::{
        BaseStats, BattleOutcome, EnemyArchetype, EnemySpawn, GridLayout, HeroSetup, Intent,
        Position,
    };

    fn sparring(hero: &HeroRecord) -> BattleSetup {
        BattleSetup::new(hero.hero_setup(Position::new(0, 0)), GridLayout::open(3, 3))
            .with_enemy(
                EnemySpawn::new(EnemyArchetype::Sentinel, Position::new(1, 0))
                    .named("Training Dummy")
                    .with_stats(BaseStats::new(5, 0, 0, 0)),
            )
    }

    #[test]
    fn victory_updates_the_record() {
        let mut hero = HeroRecord::new("Aldric");
        let setup = sparring(&hero);
        let script = ScriptedIntents::new([Intent::AttackAt(Position::new(1, 0))]);
        let report = BattleSession::new(&mut hero).run(setup, script).unwrap();

        assert_eq!(report.result.outcome, BattleOutcome::Victory);
        assert_eq!(report.rounds, 1);
        assert_eq!(report.progress.experience_gained, 75);
        assert_eq!(
            &report.narration[..3],
            &[
                "Aldric strikes Training Dummy for 5 damage.".to_string(),
                "Training Dummy falls!".to_string(),
                "The battle is won!".to_string(),
            ]
        );
        assert_eq!(report.narration.last().map(String::as_str), Some("You gain 75 XP."));
        assert_eq!(hero.experience(), 75);
    }

    #[test]
    fn each_enemy_blow_is_narrated_at_its_own_health() {
        let mut hero = HeroRecord::with_stats("Aldric", BaseStats::new(40, 5, 0, 1));
        let warden = |name: &str, position: Position| {
            EnemySpawn::new(EnemyArchetype::Sentinel, position)
                .named(name)
                .with_stats(BaseStats::new(20, 16, 3, 0))
        };
        let setup = BattleSetup::new(hero.hero_setup(Position::new(0, 0)), GridLayout::open(3, 3))
            .with_enemy(warden("East Warden", Position::new(1, 0)))
            .with_enemy(warden("South Warden", Position::new(0, 1)));
        let script = ScriptedIntents::new([Intent::EndTurn, Intent::EndTurn]);

        let report = BattleSession::new(&mut hero).run(setup, script).unwrap();

        assert_eq!(report.result.outcome, BattleOutcome::Defeat);
        // 40 -> 24 stays wounded; 24 -> 8 turns critical; 8 -> 0 is lethal.
        assert_eq!(
            report.narration,
            vec![
                "East Warden hits Aldric for 16 damage!".to_string(),
                "South Warden hits Aldric for 16 damage!".to_string(),
                "Aldric is badly wounded.".to_string(),
                "East Warden hits Aldric for 16 damage!".to_string(),
                "Aldric falls!".to_string(),
                "The battle is lost.".to_string(),
            ]
        );
        assert_eq!(report.rounds, 2);
        assert_eq!(hero.health(), 20);
    }

    #[test]
    fn rejections_are_bounded() {
        let mut hero = HeroRecord::new("Aldric");
        let setup = sparring(&hero);
        let far = Intent::AttackAt(Position::new(2, 2));
        let err = BattleSession::new(&mut hero)
            .run(setup, ScriptedIntents::new([far, far, far]))
            .unwrap_err();

        assert!(matches!(err, RuntimeError::TooManyRejections { count: 3, .. }));
        assert_eq!(hero.experience(), 0);
    }

    #[test]
    fn stalemate_hits_the_round_limit() {
        let mut hero = HeroRecord::new("Aldric");
        let setup = sparring(&hero);
        let config = SessionConfig {
            max_rounds: 4,
            ..SessionConfig::default()
        };
        let err = BattleSession::with_config(&mut hero, config)
            .run(setup, EndTurnProvider)
            .unwrap_err();

        assert!(matches!(err, RuntimeError::RoundLimit { rounds: 4 }));
    }

    #[test]
    fn invalid_setup_is_reported() {
        let mut hero = HeroRecord::new("Aldric");
        let setup = BattleSetup::new(
            HeroSetup::new("Aldric", BaseStats::default(), Position::new(0, 0)),
            GridLayout::open(2, 2),
        );
        let err = BattleSession::new(&mut hero)
            .run(setup, EndTurnProvider)
            .unwrap_err();

        assert!(matches!(err, RuntimeError::Setup(_)));
    }
}
