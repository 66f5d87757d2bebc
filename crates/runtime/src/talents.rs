//! Talent catalog and the hero's acquired talents.
//!
//! Talents only ever surface in battle as a read-only [`StatModifiers`] map
//! copied into the hero unit at battle start.
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tactics_core::{ModifierKind, StatModifiers};

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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TalentKind {
    BladeMastery,
    ShieldWall,
    VeteransVigor,
    SwiftFoot,
}

impl TalentKind {
    pub const ALL: [TalentKind; 4] = [
        TalentKind::BladeMastery,
        TalentKind::ShieldWall,
        TalentKind::VeteransVigor,
        TalentKind::SwiftFoot,
    ];

    pub fn definition(self) -> Talent {
        match self {
            TalentKind::BladeMastery => Talent {
                kind: self,
                name: "Blade Mastery",
                description: "+2 Attack from rigorous sword training.",
                modifier: ModifierKind::Attack,
                magnitude: 2,
            },
            TalentKind::ShieldWall => Talent {
                kind: self,
                name: "Shield Wall",
                description: "+2 Defense by learning dwarven guard stances.",
                modifier: ModifierKind::Defense,
                magnitude: 2,
            },
            TalentKind::VeteransVigor => Talent {
                kind: self,
                name: "Veteran's Vigor",
                description: "+10 Max HP from hardened adventures.",
                modifier: ModifierKind::MaxHealth,
                magnitude: 10,
            },
            TalentKind::SwiftFoot => Talent {
                kind: self,
                name: "Swift Foot",
                description: "+1 Movement for quicker footwork.",
                modifier: ModifierKind::Movement,
                magnitude: 1,
            },
        }
    }
}

/// Static description of one talent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Talent {
    pub kind: TalentKind,
    pub name: &'static str,
    pub description: &'static str,
    pub modifier: ModifierKind,
    pub magnitude: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TalentError {
    #[error("no talent points left")]
    NoPoints,

    #[error("talent {0} already acquired")]
    AlreadyAcquired(TalentKind),
}

/// Talents the hero has acquired.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TalentBook {
    acquired: BTreeSet<TalentKind>,
}

impl TalentBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_acquired(&self, kind: TalentKind) -> bool {
        self.acquired.contains(&kind)
    }

    /// Spends one of `points` on `kind`.
    pub fn acquire(&mut self, kind: TalentKind, points: &mut u32) -> Result<(), TalentError> {
        if self.is_acquired(kind) {
            return Err(TalentError::AlreadyAcquired(kind));
        }
        if *points == 0 {
            return Err(TalentError::NoPoints);
        }
        *points -= 1;
        self.acquired.insert(kind);
        Ok(())
    }

    pub fn acquired(&self) -> impl Iterator<Item = TalentKind> + '_ {
        self.acquired.iter().copied()
    }

    /// Summed modifiers of every acquired talent.
    pub fn modifiers(&self) -> StatModifiers {
        self.acquired
            .iter()
            .map(|kind| {
                let talent = kind.definition();
                (talent.modifier, talent.magnitude)
            })
            .collect()
    }
}
