//! Battle events extracted from step records.
use tactics_core::{BattleOutcome, Position, UnitId};

/// High-level occurrences within one resolved step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEvent {
    /// A unit walked to a new tile.
    UnitMoved {
        unit: UnitId,
        from: Position,
        to: Position,
    },

    /// A unit took damage from an attack.
    DamageTaken {
        attacker: UnitId,
        target: UnitId,
        amount: u32,
        health_after: u32,
    },

    /// A unit's health crossed into a lower threshold without dying.
    HealthThresholdCrossed {
        unit: UnitId,
        threshold: HealthThreshold,
    },

    /// A unit died and left the grid.
    UnitDied { unit: UnitId, position: Position },

    /// A unit ended its turn without acting.
    UnitWaited { unit: UnitId },

    /// The step ended the battle.
    BattleEnded { outcome: BattleOutcome },
}

/// Health threshold levels for triggering effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HealthThreshold {
    /// 0% HP (dead)
    Dead,
    /// 1-24% HP
    Critical,
    /// 25-74% HP
    Wounded,
    /// 75-99% HP
    Healthy,
    /// 100% HP
    Full,
}

impl HealthThreshold {
    /// Calculate health threshold from current and max HP.
    pub fn from_hp(current: u32, max: u32) -> Self {
        if current == 0 {
            Self::Dead
        } else if max == 0 || current >= max {
            Self::Full
        } else {
            match (current * 100) / max {
                75..=99 => Self::Healthy,
                25..=74 => Self::Wounded,
                _ => Self::Critical,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_follow_percentages() {
        assert_eq!(HealthThreshold::from_hp(0, 30), HealthThreshold::Dead);
        assert_eq!(HealthThreshold::from_hp(7, 30), HealthThreshold::Critical);
        assert_eq!(HealthThreshold::from_hp(8, 30), HealthThreshold::Wounded);
        assert_eq!(HealthThreshold::from_hp(23, 30), HealthThreshold::Healthy);
        assert_eq!(HealthThreshold::from_hp(30, 30), HealthThreshold::Full);
        assert!(HealthThreshold::Critical < HealthThreshold::Wounded);
    }
}
