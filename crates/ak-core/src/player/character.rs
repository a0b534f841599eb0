//! Main player structure


use super::{PlayerClass, StatusFlags};
use crate::object::{Inventory, starting_item};
use crate::{STARTING_GOLD, XP_PER_LEVEL};

/// The player character
///
/// `hp` is kept within `0..=max_hp` by [`Player::take_damage`] and
/// [`Player::heal`]; code that writes the fields directly is expected to
/// preserve the same bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    // Identity
    pub name: String,
    pub class: PlayerClass,

    // Health and offence
    pub hp: i32,
    pub max_hp: i32,
    pub damage: i32,

    // Progression
    pub level: i32,
    pub xp: i32,
    pub gold: i32,
    pub kills: i32,
    pub area_level: i32,

    pub status: StatusFlags,
    pub inventory: Inventory,
}

impl Player {
    /// A bare level 1 character with class base stats and an empty inventory
    pub fn new(name: impl Into<String>, class: PlayerClass) -> Self {
        let (hp, damage) = class.base_stats();
        Self {
            name: name.into(),
            class,
            hp,
            max_hp: hp,
            damage,
            level: 1,
            xp: 0,
            gold: STARTING_GOLD,
            kills: 0,
            area_level: 1,
            status: StatusFlags::empty(),
            inventory: Inventory::default(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Experience required to reach the next level
    pub fn xp_needed(&self) -> i32 {
        XP_PER_LEVEL.saturating_mul(self.level)
    }

    /// Subtract damage, clamping at zero. Returns the hp actually lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp - amount.max(0)).max(0);
        before - self.hp
    }

    /// Restore hp, clamping at max hp. Returns the hp actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount.max(0)).min(self.max_hp);
        self.hp.max(before) - before
    }
}

/// Create a fresh level 1 character holding its class starting item
pub fn initialize_player(name: impl Into<String>, class: PlayerClass) -> Player {
    let mut player = Player::new(name, class);
    // a fresh inventory always has room for the first item
    let _ = player.inventory.add(starting_item(class));
    tracing::debug!(
        name = %player.name,
        class = %player.class,
        hp = player.hp,
        damage = player.damage,
        "player created"
    );
    player
}
