//! Experience and leveling

use super::Player;

/// Stat changes applied by a level-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelGrowth {
    pub new_level: i32,
    pub max_hp_gain: i32,
    pub damage_gain: i32,
}

/// Add experience and apply at most one level-up.
///
/// The threshold is `100 * level`. Crossing it raises the level by one,
/// carries the remainder over, grows stats by class and fully heals. Excess
/// experience beyond a second threshold is kept for the next call rather
/// than applied now.
pub fn award_xp(player: &mut Player, amount: i32) -> Option<LevelGrowth> {
    let needed = player.xp_needed();
    player.xp = player.xp.saturating_add(amount.max(0));

    if player.xp < needed {
        return None;
    }

    player.level = player.level.saturating_add(1);
    player.xp -= needed;

    let (max_hp_gain, damage_gain) = player.class.level_growth();
    player.max_hp = player.max_hp.saturating_add(max_hp_gain);
    player.damage = player.damage.saturating_add(damage_gain);
    player.hp = player.max_hp;

    tracing::info!(
        name = %player.name,
        level = player.level,
        max_hp = player.max_hp,
        damage = player.damage,
        "level up"
    );

    Some(LevelGrowth {
        new_level: player.level,
        max_hp_gain,
        damage_gain,
    })
}

impl Player {
    /// Convenience wrapper around [`award_xp`] returning whether a level-up happened
    pub fn award_xp(&mut self, amount: i32) -> bool {
        award_xp(self, amount).is_some()
    }
}
