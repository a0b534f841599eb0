//! Core game constants

/// Number of explorable areas; area 5 hosts the final boss
pub const MAX_AREA: i32 = 5;

/// Slots allocated for a fresh inventory
pub const INITIAL_INVENTORY_CAPACITY: usize = 10;

/// Smallest capacity a restored inventory is allowed to have
pub const MIN_INVENTORY_CAPACITY: usize = INITIAL_INVENTORY_CAPACITY;

/// Experience needed per level: `XP_PER_LEVEL * level`
pub const XP_PER_LEVEL: i32 = 100;

/// Gold awarded on top of the kill reward when a kill causes a level-up
pub const LEVEL_UP_GOLD_BONUS: i32 = 10;

/// Percent chance that a defeated enemy drops a potion
pub const LOOT_DROP_PERCENT: u32 = 30;

/// Gold every new character starts with
pub const STARTING_GOLD: i32 = 10;

/// Kills required before the final boss can be challenged
pub const BOSS_KILL_REQUIREMENT: i32 = 10;

/// HP restored per player level when resting
pub const REST_HEAL_PER_LEVEL: i32 = 5;
