//! Enemy creation
//!
//! Picks an archetype allowed in the current area and scales its stats from
//! the player's level. Difficulty and debug overrides come from
//! [`GameConfig`].

use super::{Enemy, EnemyType};
use crate::config::GameConfig;
use crate::rng::GameRng;
use crate::MAX_AREA;

/// Stat formula for one archetype; every value is `base + per_level * level`
struct ArchetypeStats {
    level_offset: i32,
    hp: (i32, i32),
    damage: (i32, i32),
    xp: (i32, i32),
    gold: (i32, i32),
}

const fn archetype_stats(kind: EnemyType) -> ArchetypeStats {
    match kind {
        EnemyType::Goblin => ArchetypeStats {
            level_offset: 0,
            hp: (20, 5),
            damage: (3, 1),
            xp: (20, 5),
            gold: (5, 2),
        },
        EnemyType::Skeleton => ArchetypeStats {
            level_offset: 1,
            hp: (25, 6),
            damage: (5, 1),
            xp: (30, 7),
            gold: (8, 2),
        },
        EnemyType::Zombie => ArchetypeStats {
            level_offset: 1,
            hp: (40, 8),
            damage: (4, 1),
            xp: (40, 8),
            gold: (10, 2),
        },
        EnemyType::Troll => ArchetypeStats {
            level_offset: 2,
            hp: (60, 10),
            damage: (7, 2),
            xp: (60, 10),
            gold: (15, 3),
        },
        EnemyType::Orc => ArchetypeStats {
            level_offset: 2,
            hp: (50, 8),
            damage: (8, 2),
            xp: (70, 12),
            gold: (20, 3),
        },
        EnemyType::Dragon => ArchetypeStats {
            level_offset: 4,
            hp: (150, 15),
            damage: (15, 3),
            xp: (200, 20),
            gold: (100, 10),
        },
        EnemyType::Boss => ArchetypeStats {
            level_offset: 5,
            hp: (300, 20),
            damage: (20, 3),
            xp: (500, 50),
            gold: (200, 20),
        },
    }
}

/// Pick an archetype for an area.
///
/// Areas 1-4 draw uniformly from Goblin up to a per-area cap. Area 5 returns
/// a Dragon one time in ten and otherwise draws from Goblin..=Orc. Any other
/// area level yields a Goblin.
pub fn pick_archetype(area_level: i32, rng: &mut GameRng) -> EnemyType {
    let max_type = match area_level {
        1 => EnemyType::Skeleton,
        2 => EnemyType::Zombie,
        3 => EnemyType::Troll,
        4 => EnemyType::Orc,
        5 => {
            if rng.one_in(10) {
                return EnemyType::Dragon;
            }
            EnemyType::Orc
        }
        _ => return EnemyType::Goblin,
    };

    let roll = rng.rn2(max_type as u32 + 1) as i32;
    EnemyType::from_code(roll).unwrap_or_default()
}

/// Build an enemy of the given archetype scaled to the player's level
pub fn build_enemy(kind: EnemyType, area_level: i32, player_level: i32) -> Enemy {
    let player_level = player_level.max(1);
    let stats = archetype_stats(kind);
    let level = player_level.saturating_add(stats.level_offset);
    let scaled =
        |(base, per_level): (i32, i32)| base.saturating_add(per_level.saturating_mul(level));

    let hp = scaled(stats.hp);
    tracing::debug!(
        kind = %kind,
        area = area_level.clamp(1, MAX_AREA),
        level,
        hp,
        "built enemy"
    );

    Enemy {
        name: kind.name().to_string(),
        kind,
        hp,
        max_hp: hp,
        damage: scaled(stats.damage),
        level,
        xp_value: scaled(stats.xp),
        gold_value: scaled(stats.gold),
    }
}

/// Apply debug hp override and difficulty scaling to a freshly built enemy
fn finish_enemy(mut enemy: Enemy, config: &GameConfig) -> Enemy {
    if let Some(hp) = config.enemy_hp_override.filter(|hp| *hp > 0) {
        enemy.hp = hp;
        enemy.max_hp = hp;
    }
    enemy.damage = config.difficulty.scale_enemy_damage(enemy.damage);
    enemy
}

/// Create the enemy for a regular encounter
pub fn spawn_enemy(
    area_level: i32,
    player_level: i32,
    config: &GameConfig,
    rng: &mut GameRng,
) -> Enemy {
    let area_level = area_level.clamp(1, MAX_AREA);
    let player_level = player_level.max(1);

    let kind = match config.enemy_type_override {
        Some(kind) => kind,
        None => pick_archetype(area_level, rng),
    };

    finish_enemy(build_enemy(kind, area_level, player_level), config)
}

/// Create the final boss
pub fn spawn_boss(player_level: i32, config: &GameConfig) -> Enemy {
    finish_enemy(
        build_enemy(EnemyType::Boss, MAX_AREA, player_level),
        config,
    )
}
