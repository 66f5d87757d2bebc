//! Event extraction from step records.
use tactics_core::{Battle, BattleOutcome, Outcome, Phase, StepRecord};

use super::game_event::{BattleEvent, HealthThreshold};

/// Extract high-level battle events from a step record.
///
/// `battle` must be the state right after the step resolved; health and
/// positions are read from it. Events are ordered the way they happened:
/// the action itself, derived health changes, then the end of battle.
pub fn extract_events(record: &StepRecord, battle: &Battle) -> Vec<BattleEvent> {
    let mut events = Vec::new();

    match record.outcome {
        Outcome::Moved { unit, from, to } => {
            events.push(BattleEvent::UnitMoved { unit, from, to });
        }
        Outcome::Attacked {
            attacker,
            target,
            damage,
            target_died,
        } => {
            let Some(victim) = battle.unit(target) else {
                tracing::warn!(
                    target: "runtime::events",
                    unit = %target,
                    "step record names a unit outside the roster"
                );
                return events;
            };
            events.push(BattleEvent::DamageTaken {
                attacker,
                target,
                amount: damage,
                health_after: victim.health(),
            });

            if target_died {
                events.push(BattleEvent::UnitDied {
                    unit: target,
                    position: victim.position(),
                });
            } else {
                let max = victim.max_health();
                let before = HealthThreshold::from_hp(victim.health() + damage, max);
                let after = HealthThreshold::from_hp(victim.health(), max);
                if after < before {
                    events.push(BattleEvent::HealthThresholdCrossed {
                        unit: target,
                        threshold: after,
                    });
                }
            }
        }
        Outcome::Waited { unit } => events.push(BattleEvent::UnitWaited { unit }),
        Outcome::Invalid(reason) => {
            tracing::warn!(
                target: "runtime::events",
                %reason,
                "invalid outcome reached the battle log"
            );
        }
    }

    match record.phase_after {
        Phase::Victory => events.push(BattleEvent::BattleEnded {
            outcome: BattleOutcome::Victory,
        }),
        Phase::Defeat => events.push(BattleEvent::BattleEnded {
            outcome: BattleOutcome::Defeat,
        }),
        _ => {}
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{
        BaseStats, BattleSetup, EnemyArchetype, EnemySpawn, GridLayout, HeroSetup, Intent,
        Position, UnitId,
    };

    fn duel(hero_attack: i32) -> Battle {
        let setup = BattleSetup::new(
            HeroSetup::new("Aldric", BaseStats::new(30, hero_attack, 0, 2), Position::new(0, 0)),
            GridLayout::open(4, 4),
        )
        .with_enemy(
            EnemySpawn::new(EnemyArchetype::Marauder, Position::new(1, 0))
                .with_stats(BaseStats::new(20, 3, 0, 1)),
        );
        Battle::start(setup).unwrap()
    }

    #[test]
    fn heavy_hit_crosses_a_threshold() {
        let mut battle = duel(16);
        let record = battle.submit(Intent::AttackAt(Position::new(1, 0))).unwrap().unwrap();

        assert_eq!(
            extract_events(&record, &battle),
            vec![
                BattleEvent::DamageTaken {
                    attacker: UnitId::HERO,
                    target: UnitId(1),
                    amount: 16,
                    health_after: 4,
                },
                BattleEvent::HealthThresholdCrossed {
                    unit: UnitId(1),
                    threshold: HealthThreshold::Critical,
                },
            ]
        );
    }

    #[test]
    fn killing_blow_ends_the_battle() {
        let mut battle = duel(25);
        let record = battle.submit(Intent::AttackAt(Position::new(1, 0))).unwrap().unwrap();

        let events = extract_events(&record, &battle);
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[1],
            BattleEvent::UnitDied {
                unit: UnitId(1),
                position: Position::new(1, 0),
            }
        );
        assert_eq!(
            events[2],
            BattleEvent::BattleEnded {
                outcome: BattleOutcome::Victory
            }
        );
    }

    #[test]
    fn moves_are_reported_as_is() {
        let mut battle = duel(1);
        let record = battle.submit(Intent::MoveTo(Position::new(0, 2))).unwrap().unwrap();

        assert_eq!(
            extract_events(&record, &battle),
            vec![BattleEvent::UnitMoved {
                unit: UnitId::HERO,
                from: Position::new(0, 0),
                to: Position::new(0, 2),
            }]
        );
    }
}
