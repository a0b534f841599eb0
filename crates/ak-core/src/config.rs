//! Game configuration
//!
//! A [`GameConfig`] is built once at startup by the front end and passed by
//! reference into every rule that depends on it. Nothing in this crate reads
//! the process environment.

use strum::{Display, EnumIter, EnumString};

use crate::monster::EnemyType;

/// Difficulty setting
///
/// Parses from `easy`/`normal`/`hard` (any case) or the numeric codes `0`/`1`/`2`.
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
pub enum Difficulty {
    #[strum(to_string = "easy", serialize = "0")]
    Easy,
    #[default]
    #[strum(to_string = "normal", serialize = "1")]
    Normal,
    #[strum(to_string = "hard", serialize = "2")]
    Hard,
}

impl Difficulty {
    /// Scale the magnitude of an offensive spell.
    ///
    /// Easy boosts player spells, hard weakens them.
    pub fn scale_spell_damage(self, damage: i32) -> i32 {
        match self {
            Difficulty::Easy => (damage as f64 * 1.5) as i32,
            Difficulty::Normal => damage,
            Difficulty::Hard => (damage as f64 * 0.7) as i32,
        }
    }

    /// Scale an enemy's raw damage at creation time.
    ///
    /// Easy weakens enemies, hard strengthens them.
    pub fn scale_enemy_damage(self, damage: i32) -> i32 {
        match self {
            Difficulty::Easy => (damage as f64 * 0.7) as i32,
            Difficulty::Normal => damage,
            Difficulty::Hard => (damage as f64 * 1.3) as i32,
        }
    }
}

/// Immutable settings threaded through combat, spells and enemy creation
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    /// Enables flavour text and the wide damage range of random magic
    pub easter_eggs: bool,
    /// Forces every spawned enemy to this archetype (debugging aid)
    pub enemy_type_override: Option<EnemyType>,
    /// Forces every spawned enemy's hp and max hp (debugging aid)
    pub enemy_hp_override: Option<i32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            easter_eggs: true,
            enemy_type_override: None,
            enemy_hp_override: None,
        }
    }
}

impl GameConfig {
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_easter_eggs(mut self, enabled: bool) -> Self {
        self.easter_eggs = enabled;
        self
    }
}
