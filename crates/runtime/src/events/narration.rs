//! Human-readable combat log lines.
use tactics_core::{Battle, BattleOutcome, RewardSummary, UnitId};

use super::game_event::{BattleEvent, HealthThreshold};

/// Renders one event as a log line, or `None` for events the log skips.
pub fn narrate(event: &BattleEvent, battle: &Battle) -> Option<String> {
    let name = |id: UnitId| {
        battle
            .unit(id)
            .map(|unit| unit.name().to_string())
            .unwrap_or_else(|| id.to_string())
    };

    let line = match *event {
        BattleEvent::UnitMoved { unit, to, .. } => format!("{} moves to {to}.", name(unit)),
        BattleEvent::DamageTaken {
            attacker,
            target,
            amount,
            ..
        } if target.is_hero() => {
            format!("{} hits {} for {amount} damage!", name(attacker), name(target))
        }
        BattleEvent::DamageTaken {
            attacker,
            target,
            amount,
            ..
        } => format!("{} strikes {} for {amount} damage.", name(attacker), name(target)),
        BattleEvent::HealthThresholdCrossed {
            unit,
            threshold: HealthThreshold::Critical,
        } => format!("{} is badly wounded.", name(unit)),
        BattleEvent::HealthThresholdCrossed { .. } => return None,
        BattleEvent::UnitDied { unit, .. } => format!("{} falls!", name(unit)),
        BattleEvent::UnitWaited { unit } if unit.is_hero() => return None,
        BattleEvent::UnitWaited { unit } => format!("{} holds its ground.", name(unit)),
        BattleEvent::BattleEnded {
            outcome: BattleOutcome::Victory,
        } => "The battle is won!".to_string(),
        BattleEvent::BattleEnded {
            outcome: BattleOutcome::Defeat,
        } => "The battle is lost.".to_string(),
    };
    Some(line)
}

/// Lines announcing settled rewards.
pub fn narrate_rewards(rewards: &RewardSummary) -> Vec<String> {
    rewards
        .loot
        .iter()
        .map(|item| format!("You claim {item}!"))
        .chain(std::iter::once(format!("You gain {} XP.", rewards.experience)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{
        BaseStats, BattleSetup, EnemyArchetype, EnemySpawn, GridLayout, HeroSetup, ItemId,
        Position,
    };

    fn battle() -> Battle {
        let setup = BattleSetup::new(
            HeroSetup::new("Hero", BaseStats::default(), Position::new(0, 0)),
            GridLayout::open(3, 3),
        )
        .with_enemy(EnemySpawn::new(EnemyArchetype::Marauder, Position::new(2, 2)));
        Battle::start(setup).unwrap()
    }

    #[test]
    fn attacks_read_from_the_attacker_side() {
        let battle = battle();
        let strike = BattleEvent::DamageTaken {
            attacker: UnitId::HERO,
            target: UnitId(1),
            amount: 5,
            health_after: 11,
        };
        let reply = BattleEvent::DamageTaken {
            attacker: UnitId(1),
            target: UnitId::HERO,
            amount: 3,
            health_after: 27,
        };

        assert_eq!(
            narrate(&strike, &battle).as_deref(),
            Some("Hero strikes Orc Marauder for 5 damage.")
        );
        assert_eq!(
            narrate(&reply, &battle).as_deref(),
            Some("Orc Marauder hits Hero for 3 damage!")
        );
        assert_eq!(
            narrate(
                &BattleEvent::UnitDied {
                    unit: UnitId(1),
                    position: Position::new(2, 2)
                },
                &battle
            )
            .as_deref(),
            Some("Orc Marauder falls!")
        );
    }

    #[test]
    fn quiet_events_are_skipped() {
        let battle = battle();
        assert_eq!(
            narrate(&BattleEvent::UnitWaited { unit: UnitId::HERO }, &battle),
            None
        );
        assert_eq!(
            narrate(
                &BattleEvent::HealthThresholdCrossed {
                    unit: UnitId(1),
                    threshold: HealthThreshold::Wounded
                },
                &battle
            ),
            None
        );
    }

    #[test]
    fn rewards_list_loot_then_experience() {
        let rewards = RewardSummary {
            outcome: BattleOutcome::Victory,
            experience: 75,
            loot: vec![ItemId::from("rare_armor")],
            enemies_defeated: 1,
        };
        assert_eq!(
            narrate_rewards(&rewards),
            vec!["You claim rare_armor!".to_string(), "You gain 75 XP.".to_string()]
        );
    }
}
