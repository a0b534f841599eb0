//! Monster system
//!
//! Enemy archetypes, the per-encounter Enemy entity and spawning rules.

mod enemy;
mod spawn;

pub use enemy::{Enemy, EnemyType};
pub use spawn::{build_enemy, pick_archetype, spawn_boss, spawn_enemy};
