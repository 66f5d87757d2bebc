//! Equipment dropped as loot.
//!
//! Loot tables hand out item identifiers of the form `<rarity>_<slot>`
//! (`rare_weapon`, `common_trinket`, ...). Identifiers in that form describe
//! equipment; anything else is an inert keepsake that stays in the backpack.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tactics_core::{ItemId, ModifierKind, StatModifiers};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ItemSlot {
    Weapon,
    Armor,
    Trinket,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
}

impl Rarity {
    /// Base bonus every piece of this rarity grants in its own slot.
    pub fn power(self) -> i32 {
        match self {
            Rarity::Common => 2,
            Rarity::Uncommon => 4,
            Rarity::Rare => 6,
            Rarity::Epic => 8,
        }
    }
}

/// A piece of equipment decoded from an [`ItemId`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub slot: ItemSlot,
    pub rarity: Rarity,
}

impl Item {
    /// Decodes a `<rarity>_<slot>` identifier; other identifiers yield `None`.
    pub fn from_id(id: &ItemId) -> Option<Self> {
        let (rarity, slot) = id.as_str().split_once('_')?;
        Some(Self {
            id: id.clone(),
            slot: slot.parse().ok()?,
            rarity: rarity.parse().ok()?,
        })
    }

    /// Display name such as "Rare Weapon".
    pub fn name(&self) -> String {
        let rarity = match self.rarity {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
        };
        let slot = match self.slot {
            ItemSlot::Weapon => "Weapon",
            ItemSlot::Armor => "Armor",
            ItemSlot::Trinket => "Trinket",
        };
        format!("{rarity} {slot}")
    }

    /// Stat bonuses while equipped. The item's own slot gets the full power,
    /// the other stats a fraction of it; trinkets mostly add health.
    pub fn modifiers(&self) -> StatModifiers {
        let power = self.rarity.power();
        let (attack, defense, health) = match self.slot {
            ItemSlot::Weapon => (power, power / 3, power),
            ItemSlot::Armor => (power / 2, power, power),
            ItemSlot::Trinket => (power / 2, power / 3, power * 3),
        };
        StatModifiers::new()
            .with(ModifierKind::Attack, attack)
            .with(ModifierKind::Defense, defense)
            .with(ModifierKind::MaxHealth, health)
    }
}

/// One item per slot at most.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Equipment {
    slots: BTreeMap<ItemSlot, Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: ItemSlot) -> Option<&Item> {
        self.slots.get(&slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> + '_ {
        self.slots.values()
    }

    /// Equips `item` if its slot is empty; otherwise hands it back.
    pub fn equip(&mut self, item: Item) -> Result<(), Item> {
        if self.slots.contains_key(&item.slot) {
            return Err(item);
        }
        self.slots.insert(item.slot, item);
        Ok(())
    }

    /// Sum of every equipped item's bonuses.
    pub fn modifiers(&self) -> StatModifiers {
        let mut total = StatModifiers::new();
        for item in self.slots.values() {
            for (kind, magnitude) in item.modifiers().iter() {
                total.add(kind, magnitude);
            }
        }
        total
    }
}
