//! Enemy entity and archetypes

use strum::{Display, EnumIter, EnumString};

/// Enemy archetype, declared in ascending order of difficulty
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum EnemyType {
    #[default]
    #[strum(to_string = "Goblin", serialize = "0")]
    Goblin = 0,
    #[strum(to_string = "Skeleton", serialize = "1")]
    Skeleton = 1,
    #[strum(to_string = "Zombie", serialize = "2")]
    Zombie = 2,
    #[strum(to_string = "Troll", serialize = "3")]
    Troll = 3,
    #[strum(to_string = "Orc", serialize = "4")]
    Orc = 4,
    #[strum(to_string = "Dragon", serialize = "5")]
    Dragon = 5,
    #[strum(to_string = "Boss", serialize = "6")]
    Boss = 6,
}

impl EnemyType {
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(EnemyType::Goblin),
            1 => Some(EnemyType::Skeleton),
            2 => Some(EnemyType::Zombie),
            3 => Some(EnemyType::Troll),
            4 => Some(EnemyType::Orc),
            5 => Some(EnemyType::Dragon),
            6 => Some(EnemyType::Boss),
            _ => None,
        }
    }

    /// Name shown to the player
    pub const fn name(self) -> &'static str {
        match self {
            EnemyType::Goblin => "Goblin",
            EnemyType::Skeleton => "Skeleton",
            EnemyType::Zombie => "Zombie",
            EnemyType::Troll => "Troll",
            EnemyType::Orc => "Orc Warrior",
            EnemyType::Dragon => "Fire Dragon",
            EnemyType::Boss => "Dungeon Master",
        }
    }
}

/// An enemy for a single encounter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    pub name: String,
    pub kind: EnemyType,
    pub hp: i32,
    pub max_hp: i32,
    pub damage: i32,
    pub level: i32,
    pub xp_value: i32,
    pub gold_value: i32,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Subtract damage, clamping at zero. Returns the hp actually lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp - amount.max(0)).max(0);
        before - self.hp
    }
}
