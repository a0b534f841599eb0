//! Victory rewards
//!
//! Gold, experience, the level-up bonus, the kill count and a chance at a
//! potion drop.

use crate::monster::{Enemy, EnemyType};
use crate::object::health_potion;
use crate::player::{LevelGrowth, Player, award_xp};
use crate::rng::GameRng;
use crate::{LEVEL_UP_GOLD_BONUS, LOOT_DROP_PERCENT};

/// What happened to the loot roll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LootDrop {
    Nothing,
    /// Item name, now in the inventory
    Added(String),
    /// Item name, lost because the inventory was full
    Discarded(String),
}

/// Summary of everything granted for a kill
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VictoryRewards {
    /// Total gold gained, including any level-up bonus
    pub gold: i32,
    pub xp: i32,
    pub level_up: Option<LevelGrowth>,
    pub loot: LootDrop,
}

/// Grant the rewards for defeating `enemy`
pub fn award_victory(
    player: &mut Player,
    enemy: &Enemy,
    rng: &mut GameRng,
    messages: &mut Vec<String>,
) -> VictoryRewards {
    messages.push("--- VICTORY! ---".to_string());

    let mut gold = enemy.gold_value;
    player.gold = player.gold.saturating_add(enemy.gold_value);
    messages.push(format!(
        "You found {} gold! (Total: {})",
        enemy.gold_value, player.gold
    ));

    messages.push(format!("Gained {} experience!", enemy.xp_value));
    let level_up = award_xp(player, enemy.xp_value);
    if let Some(growth) = level_up {
        messages.push(format!(
            "LEVEL UP! You are now level {}. Max HP +{}, Damage +{}.",
            growth.new_level, growth.max_hp_gain, growth.damage_gain
        ));
        messages.push(format!(
            "Bonus for leveling up: +{} gold!",
            LEVEL_UP_GOLD_BONUS
        ));
        player.gold = player.gold.saturating_add(LEVEL_UP_GOLD_BONUS);
        gold = gold.saturating_add(LEVEL_UP_GOLD_BONUS);
    }

    player.kills = player.kills.saturating_add(1);

    let loot = if rng.percent(LOOT_DROP_PERCENT) {
        let strength = if enemy.kind >= EnemyType::Troll {
            player.level.saturating_add(1)
        } else {
            player.level
        };
        match player.inventory.add(health_potion(strength)) {
            Ok(index) => {
                let name = player
                    .inventory
                    .get(index)
                    .map(|item| item.name.clone())
                    .unwrap_or_default();
                messages.push(format!("Enemy dropped {}! Added to inventory.", name));
                LootDrop::Added(name)
            }
            Err(full) => {
                messages.push(format!(
                    "Enemy dropped {}, but your inventory is full.",
                    full.item.name
                ));
                LootDrop::Discarded(full.item.name)
            }
        }
    } else {
        LootDrop::Nothing
    };

    tracing::info!(
        enemy = %enemy.name,
        gold,
        xp = enemy.xp_value,
        kills = player.kills,
        "enemy defeated"
    );

    VictoryRewards {
        gold,
        xp: enemy.xp_value,
        level_up,
        loot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::build_enemy;
    use crate::player::{PlayerClass, initialize_player};

    #[test]
    fn test_basic_rewards() {
        let mut player = initialize_player("V", PlayerClass::Rogue);
        let goblin = build_enemy(EnemyType::Goblin, 1, 1);
        let mut rng = GameRng::new(5);
        let mut messages = Vec::new();

        let rewards = award_victory(&mut player, &goblin, &mut rng, &mut messages);

        assert_eq!(rewards.xp, 25);
        assert!(rewards.level_up.is_none());
        assert_eq!(rewards.gold, 7);
        assert_eq!(player.gold, 17);
        assert_eq!(player.xp, 25);
        assert_eq!(player.kills, 1);
    }

    #[test]
    fn test_level_up_bonus() {
        let mut player = initialize_player("V", PlayerClass::Paladin);
        player.xp = 90;
        let goblin = build_enemy(EnemyType::Goblin, 1, 1);
        let mut rng = GameRng::new(5);
        let mut messages = Vec::new();

        let rewards = award_victory(&mut player, &goblin, &mut rng, &mut messages);

        assert!(rewards.level_up.is_some());
        assert_eq!(rewards.gold, 7 + LEVEL_UP_GOLD_BONUS);
        assert_eq!(player.gold, 10 + 7 + LEVEL_UP_GOLD_BONUS);
        assert_eq!(player.level, 2);
        assert_eq!(player.xp, 15);
    }

    #[test]
    fn test_loot_rate_and_strength() {
        let troll = build_enemy(EnemyType::Troll, 3, 1);
        let mut rng = GameRng::new(8);
        let mut drops = 0;
        let trials = 5000;
        for _ in 0..trials {
            let mut player = initialize_player("V", PlayerClass::Mage);
            let mut messages = Vec::new();
            if let LootDrop::Added(name) =
                award_victory(&mut player, &troll, &mut rng, &mut messages).loot
            {
                drops += 1;
                assert_eq!(name, "Health Potion (Strength 2)");
            }
        }
        let rate = drops as f64 / trials as f64;
        assert!((0.26..0.34).contains(&rate), "drop rate {}", rate);
    }

    #[test]
    fn test_rewards_saturate_on_restored_extremes() {
        let mut player = initialize_player("V", PlayerClass::Paladin);
        player.gold = i32::MAX;
        player.kills = i32::MAX;
        player.level = 30_000_000;
        player.xp = i32::MAX - 1;
        let goblin = build_enemy(EnemyType::Goblin, 1, 1);
        let mut rng = GameRng::new(3);
        let mut messages = Vec::new();

        let rewards = award_victory(&mut player, &goblin, &mut rng, &mut messages);

        assert!(rewards.level_up.is_some());
        assert_eq!(player.gold, i32::MAX);
        assert_eq!(player.kills, i32::MAX);
        assert_eq!(player.level, 30_000_001);
        assert_eq!(player.xp, 0);
    }

    #[test]
    fn test_full_inventory_discards_loot() {
        let goblin = build_enemy(EnemyType::Goblin, 1, 1);
        let mut rng = GameRng::new(12);
        for _ in 0..100 {
            let mut player = initialize_player("V", PlayerClass::Mage);
            while player.inventory.add(health_potion(1)).is_ok() {}
            let capacity = player.inventory.capacity();
            let mut messages = Vec::new();
            let rewards = award_victory(&mut player, &goblin, &mut rng, &mut messages);
            assert_eq!(player.inventory.len(), capacity);
            assert!(!matches!(rewards.loot, LootDrop::Added(_)));
        }
    }
}
