/// Battle configuration constants and tunable parameters.
///
/// Balance numbers (experience formula, enemy step ordering) are parameters
/// rather than hard-coded rules so that content can tune them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    pub rewards: RewardRules,
    /// Which axis enemies close first when several steps are equally short.
    pub tie_break: TieBreak,
    /// Upper bound on roster size accepted by `Battle::start`.
    pub max_enemies: usize,
}

impl BattleConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_ENEMIES: usize = 128;

    pub fn new() -> Self {
        Self {
            rewards: RewardRules::default(),
            tie_break: TieBreak::default(),
            max_enemies: Self::DEFAULT_MAX_ENEMIES,
        }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_rewards(mut self, rewards: RewardRules) -> Self {
        self.rewards = rewards;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Experience formula: `base_experience + experience_per_enemy * defeated`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RewardRules {
    pub base_experience: u32,
    pub experience_per_enemy: u32,
}

impl RewardRules {
    pub const DEFAULT_BASE_EXPERIENCE: u32 = 50;
    pub const DEFAULT_EXPERIENCE_PER_ENEMY: u32 = 25;

    pub const fn new(base_experience: u32, experience_per_enemy: u32) -> Self {
        Self {
            base_experience,
            experience_per_enemy,
        }
    }

    pub fn experience_for(&self, enemies_defeated: u32) -> u32 {
        self.base_experience
            .saturating_add(self.experience_per_enemy.saturating_mul(enemies_defeated))
    }
}

impl Default for RewardRules {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_BASE_EXPERIENCE,
            Self::DEFAULT_EXPERIENCE_PER_ENEMY,
        )
    }
}

/// Fixed ordering used to break ties between equally good enemy steps.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TieBreak {
    /// Prefer steps that reduce row distance (north/south) first.
    #[default]
    RowFirst,
    /// Prefer steps that reduce column distance (east/west) first.
    ColumnFirst,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn experience_scales_with_defeated_enemies() {
        let rules = RewardRules::default();
        assert_eq!(rules.experience_for(0), 50);
        assert_eq!(rules.experience_for(2), 100);
        assert_eq!(RewardRules::new(u32::MAX, 1).experience_for(3), u32::MAX);
    }

    #[test]
    fn tie_break_parses() {
        assert_eq!("column_first".parse::<TieBreak>(), Ok(TieBreak::ColumnFirst));
        assert_eq!(TieBreak::default(), TieBreak::RowFirst);
    }
}
