//! Persistent hero record carried between battles.
//!
//! The battle core never sees this type. The record hands a [`HeroSetup`] into
//! each battle and consumes the [`BattleResult`] that comes back.
use serde::{Deserialize, Serialize};
use tactics_core::{
    BaseStats, BattleOutcome, BattleResult, HeroSetup, ItemId, ModifierKind, Position,
    StatModifiers,
};

use crate::items::{Equipment, Item};
use crate::talents::{TalentBook, TalentError, TalentKind};

/// What applying one battle result changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressReport {
    pub experience_gained: u32,
    pub levels_gained: u32,
    pub loot: Vec<ItemId>,
    /// Loot that went straight into an empty equipment slot.
    pub equipped: Vec<ItemId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroRecord {
    pub name: String,
    pub base: BaseStats,
    health: u32,
    level: u32,
    experience: u32,
    talent_points: u32,
    talents: TalentBook,
    #[serde(default)]
    equipment: Equipment,
    backpack: Vec<ItemId>,
}

impl HeroRecord {
    pub const STARTING_TALENT_POINTS: u32 = 1;

    /// A level-1 hero at full health with one unspent talent point.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_stats(name, BaseStats::default())
    }

    pub fn with_stats(name: impl Into<String>, base: BaseStats) -> Self {
        let mut record = Self {
            name: name.into(),
            base,
            health: 0,
            level: 1,
            experience: 0,
            talent_points: Self::STARTING_TALENT_POINTS,
            talents: TalentBook::new(),
            equipment: Equipment::new(),
            backpack: Vec::new(),
        };
        record.heal_full();
        record
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn talent_points(&self) -> u32 {
        self.talent_points
    }

    pub fn talents(&self) -> &TalentBook {
        &self.talents
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    /// Loot that did not fit an empty equipment slot.
    pub fn backpack(&self) -> &[ItemId] {
        &self.backpack
    }

    /// Talent and equipment bonuses combined.
    pub fn modifiers(&self) -> StatModifiers {
        self.talents
            .modifiers()
            .iter()
            .chain(self.equipment.modifiers().iter())
            .collect()
    }

    /// Maximum health with talents and equipment applied; never below 1.
    pub fn max_health(&self) -> u32 {
        self.modifiers()
            .apply_unsigned(self.base.max_health, ModifierKind::MaxHealth)
            .max(1)
    }

    pub fn experience_to_next_level(&self) -> u32 {
        100 + (self.level - 1) * 50
    }

    pub fn heal_full(&mut self) {
        self.health = self.max_health();
    }

    /// Adds experience, levelling up as often as it allows. Each level grants
    /// one talent point and the remainder carries over.
    pub fn gain_experience(&mut self, amount: u32) -> u32 {
        self.experience = self.experience.saturating_add(amount);
        let mut levels = 0;
        while self.experience >= self.experience_to_next_level() {
            self.experience -= self.experience_to_next_level();
            self.level += 1;
            self.talent_points += 1;
            levels += 1;
        }
        levels
    }

    pub fn acquire_talent(&mut self, kind: TalentKind) -> Result<(), TalentError> {
        let before = self.max_health();
        self.talents.acquire(kind, &mut self.talent_points)?;
        // A vigor talent raises current health along with the maximum.
        let after = self.max_health();
        self.health = (self.health + after.saturating_sub(before)).min(after);
        Ok(())
    }

    /// The hero as it enters a battle at `position`, carrying current health.
    pub fn hero_setup(&self, position: Position) -> HeroSetup {
        HeroSetup::new(self.name.clone(), self.base, position)
            .with_modifiers(self.modifiers())
            .with_health(self.health)
    }

    /// Puts `id` into its equipment slot when that slot is empty, else into
    /// the backpack. Returns whether it was equipped.
    pub fn stow(&mut self, id: ItemId) -> bool {
        let Some(item) = Item::from_id(&id) else {
            self.backpack.push(id);
            return false;
        };
        match self.equipment.equip(item) {
            Ok(()) => true,
            Err(item) => {
                self.backpack.push(item.id);
                false
            }
        }
    }

    /// Applies a finished battle.
    ///
    /// Victory grants experience, equips loot into empty slots (the rest goes
    /// to the backpack) and heals to full. Defeat restores half of maximum health (at least 1) and grants
    /// nothing.
    pub fn apply_result(&mut self, result: &BattleResult) -> ProgressReport {
        match (result.outcome, &result.rewards) {
            (BattleOutcome::Victory, Some(rewards)) => {
                let levels_gained = self.gain_experience(rewards.experience);
                let mut equipped = Vec::new();
                for id in &rewards.loot {
                    if self.stow(id.clone()) {
                        equipped.push(id.clone());
                    }
                }
                self.heal_full();
                ProgressReport {
                    experience_gained: rewards.experience,
                    levels_gained,
                    loot: rewards.loot.clone(),
                    equipped,
                }
            }
            (BattleOutcome::Victory, None) => {
                self.heal_full();
                ProgressReport::default()
            }
            (BattleOutcome::Defeat, _) => {
                self.health = (self.max_health() / 2).max(1);
                ProgressReport::default()
            }
        }
    }
}
