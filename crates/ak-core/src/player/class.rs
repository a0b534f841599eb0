//! Player class definitions

use strum::{Display, EnumIter, EnumString};

/// Player class
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum PlayerClass {
    #[default]
    Paladin = 0,
    Rogue = 1,
    Mage = 2,
}

impl PlayerClass {
    /// Map a 1-based menu choice to a class
    pub const fn from_choice(choice: i32) -> Option<Self> {
        match choice {
            1 => Some(PlayerClass::Paladin),
            2 => Some(PlayerClass::Rogue),
            3 => Some(PlayerClass::Mage),
            _ => None,
        }
    }

    /// Numeric code used in save records
    pub const fn code(self) -> i32 {
        self as i32
    }

    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(PlayerClass::Paladin),
            1 => Some(PlayerClass::Rogue),
            2 => Some(PlayerClass::Mage),
            _ => None,
        }
    }

    /// Starting (hp, damage)
    pub const fn base_stats(self) -> (i32, i32) {
        match self {
            PlayerClass::Paladin => (60, 7),
            PlayerClass::Rogue => (40, 10),
            PlayerClass::Mage => (45, 8),
        }
    }

    /// (max hp, damage) gained per level
    pub const fn level_growth(self) -> (i32, i32) {
        match self {
            PlayerClass::Paladin => (10, 1),
            PlayerClass::Rogue => (5, 3),
            PlayerClass::Mage => (7, 2),
        }
    }

    pub const fn can_cast(self) -> bool {
        matches!(self, PlayerClass::Mage)
    }

    pub const fn attack_verb(self) -> &'static str {
        match self {
            PlayerClass::Paladin => "swings their hammer at",
            PlayerClass::Rogue => "stabs sneakily at",
            PlayerClass::Mage => "flings a weak spark at",
        }
    }

    pub const fn blurb(self) -> &'static str {
        match self {
            PlayerClass::Paladin => "Tough, decent damage",
            PlayerClass::Rogue => "Squishy, high damage",
            PlayerClass::Mage => "Average, casts spells",
        }
    }
}
