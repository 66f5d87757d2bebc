//! Turn scheduling: hero submissions, enemy turns and terminal detection.
//!
//! Every applied action is followed by an invariant check; a breach halts the
//! battle instead of letting it continue on corrupted state.
use crate::intent::{Intent, Outcome};
use crate::resolver::resolve;
use crate::reward::{BattleResult, settle};
use crate::rng::PcgRng;
use crate::unit::{Unit, UnitId};

use super::{Battle, BattleError, Phase, Rejection, StepRecord, SubmitError};

impl Battle {
    /// Submits the hero's intent.
    ///
    /// `EndTurn` hands over to the first enemy without touching the field and
    /// returns `Ok(None)`. A move or attack is resolved and recorded. Rejected
    /// intents leave the battle exactly as it was, still on the hero's turn.
    pub fn submit(&mut self, intent: Intent) -> Result<Option<StepRecord>, SubmitError> {
        self.ensure_running()?;
        if self.phase != Phase::HeroTurn {
            return Err(Rejection::NotHeroTurn { phase: self.phase }.into());
        }

        if intent == Intent::EndTurn {
            self.phase = Phase::EnemyTurn(0);
            return Ok(None);
        }

        self.phase = Phase::Resolving;
        let outcome = match resolve(&mut self.field, UnitId::HERO, &intent) {
            Ok(outcome) => outcome,
            Err(breach) => return Err(self.halt(breach.into()).into()),
        };
        if let Some(reason) = outcome.invalid_reason() {
            self.phase = Phase::HeroTurn;
            return Err(Rejection::Invalid(reason).into());
        }
        self.verify()?;

        let next = self.terminal_phase().unwrap_or(Phase::EnemyTurn(0));
        Ok(Some(self.record(UnitId::HERO, intent, outcome, next)))
    }

    /// Plays the current enemy's turn.
    ///
    /// Returns `Ok(None)` without any effect when the enemy is already dead
    /// (the turn passes on) or when it is not an enemy's turn at all.
    pub fn advance(&mut self) -> Result<Option<StepRecord>, BattleError> {
        self.ensure_running()?;
        let Phase::EnemyTurn(index) = self.phase else {
            return Ok(None);
        };

        let actor = UnitId::enemy(index);
        if !self.field.unit(actor).is_some_and(Unit::is_alive) {
            self.phase = self.turn_after(index);
            return Ok(None);
        }

        let intent = self.policy.decide(&self.field, actor);
        self.phase = Phase::Resolving;
        let outcome = match intent {
            Intent::EndTurn => Outcome::Waited { unit: actor },
            _ => match resolve(&mut self.field, actor, &intent) {
                Ok(outcome) => outcome,
                Err(breach) => return Err(self.halt(breach.into())),
            },
        };
        if let Some(reason) = outcome.invalid_reason() {
            return Err(self.halt(BattleError::PolicyViolation {
                unit: actor,
                intent,
                reason,
            }));
        }
        self.verify()?;

        let next = self
            .terminal_phase()
            .unwrap_or_else(|| self.turn_after(index));
        Ok(Some(self.record(actor, intent, outcome, next)))
    }

    /// Plays enemy turns until the hero is up again or the battle is over.
    pub fn run_enemy_phase(&mut self) -> Result<Vec<StepRecord>, BattleError> {
        self.ensure_running()?;
        let mut records = Vec::new();
        while matches!(self.phase, Phase::EnemyTurn(_)) {
            if let Some(record) = self.advance()? {
                records.push(record);
            }
        }
        Ok(records)
    }

    fn ensure_running(&self) -> Result<(), BattleError> {
        match self.fault {
            Some(_) => Err(BattleError::Halted),
            None => Ok(()),
        }
    }

    fn halt(&mut self, error: BattleError) -> BattleError {
        self.fault = Some(error.clone());
        error
    }

    fn verify(&mut self) -> Result<(), BattleError> {
        match self.field.check_invariants() {
            Ok(()) => Ok(()),
            Err(breach) => Err(self.halt(breach.into())),
        }
    }

    fn turn_after(&self, index: usize) -> Phase {
        if index + 1 < self.field.enemy_count() {
            Phase::EnemyTurn(index + 1)
        } else {
            Phase::HeroTurn
        }
    }

    /// Defeat takes precedence: a dead hero loses even if the last enemy fell.
    fn terminal_phase(&self) -> Option<Phase> {
        if !self.field.hero().is_alive() {
            Some(Phase::Defeat)
        } else if self.field.living_enemies().next().is_none() {
            Some(Phase::Victory)
        } else {
            None
        }
    }

    fn record(
        &mut self,
        actor: UnitId,
        intent: Intent,
        outcome: Outcome,
        phase_after: Phase,
    ) -> StepRecord {
        let record = StepRecord {
            nonce: self.log.len() as u64,
            actor,
            intent,
            outcome,
            phase_after,
        };
        self.log.push(record.clone());
        self.enter(phase_after);
        record
    }

    fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        if self.result.is_some() {
            return;
        }
        match phase {
            Phase::Victory => {
                let defeated = self
                    .field
                    .enemies()
                    .iter()
                    .zip(&self.loot)
                    .filter(|(unit, _)| !unit.is_alive())
                    .map(|(unit, table)| (unit.id(), table));
                let summary = settle(defeated, &self.config.rewards, self.seed, &PcgRng);
                self.result = Some(BattleResult::victory(summary));
            }
            Phase::Defeat => self.result = Some(BattleResult::defeat()),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::archetype::EnemyArchetype;
    use crate::battle::{
        Battle, BattleError, BattleSetup, EnemySpawn, HeroSetup, Phase, Rejection, SubmitError,
    };
    use crate::field::InvariantBreach;
    use crate::grid::{GridLayout, Position};
    use crate::intent::{IllegalAttack, Intent, InvalidReason, Outcome};
    use crate::unit::{BaseStats, UnitId};

    fn duel() -> Battle {
        let setup = BattleSetup::new(
            HeroSetup::new("Hero", BaseStats::new(30, 10, 0, 2), Position::new(0, 0)),
            GridLayout::open(4, 4),
        )
        .with_enemy(
            EnemySpawn::new(EnemyArchetype::Marauder, Position::new(3, 3))
                .with_stats(BaseStats::new(8, 3, 0, 1)),
        )
        .with_enemy(
            EnemySpawn::new(EnemyArchetype::Sentinel, Position::new(3, 0))
                .with_stats(BaseStats::new(8, 3, 0, 0)),
        );
        Battle::start(setup).unwrap()
    }

    #[test]
    fn end_turn_skips_resolution() {
        let mut battle = duel();
        let before = battle.field().clone();

        assert_eq!(battle.submit(Intent::EndTurn), Ok(None));
        assert_eq!(battle.phase(), Phase::EnemyTurn(0));
        assert_eq!(battle.field(), &before);
        assert!(battle.log().is_empty());
    }

    #[test]
    fn intents_outside_hero_turn_are_rejected() {
        let mut battle = duel();
        battle.submit(Intent::EndTurn).unwrap();
        let before = battle.field().clone();

        assert_eq!(
            battle.submit(Intent::MoveTo(Position::new(1, 0))),
            Err(SubmitError::Rejected(Rejection::NotHeroTurn {
                phase: Phase::EnemyTurn(0)
            }))
        );
        assert_eq!(battle.field(), &before);
    }

    #[test]
    fn rejected_intent_keeps_the_turn() {
        let mut battle = duel();

        let err = battle.submit(Intent::AttackAt(Position::new(2, 2))).unwrap_err();
        assert_eq!(
            err.rejection(),
            Some(Rejection::Invalid(InvalidReason::IllegalAttack(
                IllegalAttack::NotAdjacent {
                    target: Position::new(2, 2)
                }
            )))
        );
        assert_eq!(battle.phase(), Phase::HeroTurn);
        assert!(battle.log().is_empty());
    }

    #[test]
    fn enemy_phase_walks_the_roster() {
        let mut battle = duel();
        battle.submit(Intent::MoveTo(Position::new(1, 0))).unwrap();
        assert_eq!(battle.phase(), Phase::EnemyTurn(0));

        let records = battle.run_enemy_phase().unwrap();

        assert_eq!(records.len(), 2);
        assert!(matches!(records[0].outcome, Outcome::Moved { unit: UnitId(1), .. }));
        assert_eq!(records[0].phase_after, Phase::EnemyTurn(1));
        assert_eq!(records[1].outcome, Outcome::Waited { unit: UnitId(2) });
        assert_eq!(records[1].phase_after, Phase::HeroTurn);
        assert_eq!(battle.phase(), Phase::HeroTurn);
        assert_eq!(battle.log().len(), 3);
        assert_eq!(battle.log()[2].nonce, 2);
    }

    #[test]
    fn advance_is_idle_on_hero_turn() {
        let mut battle = duel();
        assert_eq!(battle.advance(), Ok(None));
        assert_eq!(battle.phase(), Phase::HeroTurn);
    }

    #[test]
    fn breach_halts_the_battle() {
        let mut battle = duel();
        battle
            .field
            .unit_mut(UnitId(2))
            .unwrap()
            .set_position(Position::new(2, 2));

        let err = battle.submit(Intent::MoveTo(Position::new(0, 1))).unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Fault(BattleError::InconsistentState(
                InvariantBreach::PositionDesync { .. }
            ))
        ));
        assert!(battle.fault().is_some());
        assert_eq!(
            battle.submit(Intent::EndTurn),
            Err(SubmitError::Fault(BattleError::Halted))
        );
        assert_eq!(battle.run_enemy_phase(), Err(BattleError::Halted));
    }
}
