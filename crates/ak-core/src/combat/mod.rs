//! Combat system
//!
//! Turn-based player-vs-enemy combat. Each call to [`Combat::take_turn`]
//! resolves one player decision followed, if the enemy survived, by one
//! enemy attack.

mod rewards;

pub use rewards::{LootDrop, VictoryRewards, award_victory};

use crate::config::GameConfig;
use crate::magic::{Spell, cast_spell};
use crate::monster::Enemy;
use crate::object::ItemKind;
use crate::player::Player;
use crate::rng::GameRng;

/// Where an encounter stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatStatus {
    /// Both combatants are standing
    Active,
    PlayerWon,
    PlayerLost,
}

impl CombatStatus {
    pub const fn is_over(self) -> bool {
        !matches!(self, CombatStatus::Active)
    }
}

/// The player's decision for one turn
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerAction {
    Attack,
    /// Consume the inventory item at this index
    UseItem(usize),
    CastSpell(Spell),
    /// No valid action; the turn passes with the given message
    Skip(&'static str),
}

/// One encounter between the player and an enemy
#[derive(Debug, Clone)]
pub struct Combat {
    pub enemy: Enemy,
    turn: u32,
    status: CombatStatus,
}

impl Combat {
    pub fn new(enemy: Enemy) -> Self {
        let status = if enemy.is_alive() {
            CombatStatus::Active
        } else {
            CombatStatus::PlayerWon
        };
        Self {
            enemy,
            turn: 0,
            status,
        }
    }

    pub fn status(&self) -> CombatStatus {
        self.status
    }

    /// Number of turns played so far
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Resolve one full turn.
    ///
    /// The enemy only strikes back if it is still alive after the player's
    /// action. Calling this after the fight is decided changes nothing.
    pub fn take_turn(
        &mut self,
        player: &mut Player,
        action: PlayerAction,
        config: &GameConfig,
        rng: &mut GameRng,
        messages: &mut Vec<String>,
    ) -> CombatStatus {
        if self.status.is_over() {
            return self.status;
        }
        if !player.is_alive() {
            self.status = CombatStatus::PlayerLost;
            return self.status;
        }

        self.turn += 1;
        messages.push(format!("--- Turn {} ---", self.turn));

        self.player_acts(player, action, config, rng, messages);

        if !self.enemy.is_alive() {
            messages.push(format!("{} has been defeated!", self.enemy.name));
            self.status = CombatStatus::PlayerWon;
            return self.status;
        }

        self.enemy_acts(player, messages);

        if !player.is_alive() {
            messages.push(format!("You have been defeated by {}!", self.enemy.name));
            self.status = CombatStatus::PlayerLost;
        }
        self.status
    }

    fn player_acts(
        &mut self,
        player: &mut Player,
        action: PlayerAction,
        config: &GameConfig,
        rng: &mut GameRng,
        messages: &mut Vec<String>,
    ) {
        let enemy = &mut self.enemy;
        match action {
            PlayerAction::Attack => {
                messages.push(format!(
                    "{} {} {}!",
                    player.name,
                    player.class.attack_verb(),
                    enemy.name
                ));
                enemy.take_damage(player.damage);
                messages.push(format!(
                    "{} takes {} damage. Remaining HP: {}/{}",
                    enemy.name, player.damage, enemy.hp, enemy.max_hp
                ));
                tracing::debug!(
                    attacker = %player.name,
                    target = %enemy.name,
                    damage = player.damage,
                    "player attack"
                );
            }
            PlayerAction::UseItem(index) => match player.inventory.remove(index) {
                Some(item) => {
                    messages.push(format!("Using {}...", item.name));
                    match item.kind {
                        ItemKind::Healing => {
                            player.heal(item.value);
                            messages.push(format!(
                                "{} healed! Current HP: {}/{}",
                                player.name, player.hp, player.max_hp
                            ));
                        }
                    }
                    tracing::debug!(item = %item.name, value = item.value, "item consumed");
                }
                None => messages.push("Invalid item number.".to_string()),
            },
            PlayerAction::CastSpell(spell) => {
                let outcome = cast_spell(player, &enemy.name, &spell, config, rng);
                messages.extend(outcome.messages);
                if outcome.damage > 0 {
                    enemy.take_damage(outcome.damage);
                    messages.push(format!(
                        "{} takes {} damage from the spell. Remaining HP: {}/{}",
                        enemy.name, outcome.damage, enemy.hp, enemy.max_hp
                    ));
                }
            }
            PlayerAction::Skip(reason) => {
                messages.push(reason.to_string());
                tracing::debug!(reason, "turn skipped");
            }
        }
    }

    fn enemy_acts(&mut self, player: &mut Player, messages: &mut Vec<String>) {
        let enemy = &self.enemy;
        messages.push(format!("{} attacks {}!", enemy.name, player.name));
        player.take_damage(enemy.damage);
        messages.push(format!(
            "{} takes {} damage. Remaining HP: {}/{}",
            player.name, enemy.damage, player.hp, player.max_hp
        ));
        tracing::debug!(
            attacker = %enemy.name,
            target = %player.name,
            damage = enemy.damage,
            "enemy attack"
        );
    }
}
