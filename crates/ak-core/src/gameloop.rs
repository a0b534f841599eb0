//! Main game loop
//!
//! The outer state machine: Menu, Explore, Shop and Combat, ending in
//! GameOver or Win. Every call to [`Game::step`] consumes one numeric
//! decision from the front end. Malformed input arrives as `None` and is
//! treated like any other invalid choice.

use strum::IntoEnumIterator;

use crate::combat::{Combat, CombatStatus, PlayerAction, award_victory};
use crate::config::GameConfig;
use crate::magic::{Spell, SpellKind};
use crate::monster::{spawn_boss, spawn_enemy};
use crate::object::health_potion;
use crate::player::Player;
use crate::rng::GameRng;
use crate::{BOSS_KILL_REQUIREMENT, MAX_AREA, REST_HEAL_PER_LEVEL};

/// Shop stock: label, price, potion strength above player level
const SHOP_STOCK: [(&str, i32, i32); 3] = [
    ("Health Potion", 20, 0),
    ("Strong Health Potion", 40, 1),
    ("Super Health Potion", 80, 2),
];

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Menu,
    /// Waiting for yes/no on quitting
    ConfirmQuit,
    Explore,
    /// Waiting for yes/no on the final boss
    ConfirmBoss,
    Shop,
    Combat,
    GameOver,
    Win,
}

impl GamePhase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Win)
    }
}

/// Pending request for the front end to persist the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveRequest {
    /// After a state-changing action
    Auto,
    /// The player asked to save; the result should be reported
    Manual,
}

/// A decision point: a title and options numbered from 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub options: Vec<String>,
    /// Whether 0 is accepted as "cancel"
    pub allows_cancel: bool,
}

impl Prompt {
    fn new(title: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            title: title.into(),
            options,
            allows_cancel: false,
        }
    }

    fn yes_no(title: impl Into<String>) -> Self {
        Self::new(title, vec!["Yes".to_string(), "No".to_string()])
    }

    fn cancellable(mut self) -> Self {
        self.allows_cancel = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CombatStep {
    Action,
    Item,
    Spell,
}

#[derive(Debug, Clone)]
struct Encounter {
    combat: Combat,
    step: CombatStep,
    is_boss: bool,
}

/// Full game state owned by the front end
#[derive(Debug, Clone)]
pub struct Game {
    pub player: Player,
    pub config: GameConfig,
    pub rng: GameRng,
    phase: GamePhase,
    encounter: Option<Encounter>,
    messages: Vec<String>,
    save_request: Option<SaveRequest>,
}

impl Game {
    pub fn new(player: Player, config: GameConfig, rng: GameRng) -> Self {
        Self {
            player,
            config,
            rng,
            phase: GamePhase::Menu,
            encounter: None,
            messages: Vec::new(),
            save_request: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// The combat in progress, if any
    pub fn combat(&self) -> Option<&Combat> {
        self.encounter.as_ref().map(|encounter| &encounter.combat)
    }

    /// Add a message for the display layer
    pub fn message(&mut self, msg: impl Into<String>) {
        self.messages.push(msg.into());
    }

    /// Drain messages produced since the last call
    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }

    /// Drain the pending save request, if any
    pub fn take_save_request(&mut self) -> Option<SaveRequest> {
        self.save_request.take()
    }

    fn request_save(&mut self, request: SaveRequest) {
        if self.save_request != Some(SaveRequest::Manual) {
            self.save_request = Some(request);
        }
    }

    /// Describe the decision the game is waiting for
    pub fn prompt(&self) -> Prompt {
        match self.phase {
            GamePhase::Menu => Prompt::new(
                "=== MAIN MENU ===",
                ["Explore", "Visit Shop", "View Character", "Save Game", "Quit Game"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
            GamePhase::ConfirmQuit => Prompt::yes_no("Are you sure you want to quit?"),
            GamePhase::Explore => Prompt::new(
                format!("=== AREA {} EXPLORATION ===", self.player.area_level),
                vec![
                    "Fight monster".to_string(),
                    format!("Rest (heal {} HP)", self.rest_amount()),
                    "Move to next area".to_string(),
                    "Return to menu".to_string(),
                ],
            ),
            GamePhase::ConfirmBoss => {
                Prompt::yes_no("Face the final boss? (WARNING: Very difficult!)")
            }
            GamePhase::Shop => {
                let mut options: Vec<String> = SHOP_STOCK
                    .iter()
                    .map(|(label, price, _)| format!("{} ({} gold)", label, price))
                    .collect();
                options.push("Exit Shop".to_string());
                Prompt::new(
                    format!("=== SHOP === Your Gold: {}", self.player.gold),
                    options,
                )
            }
            GamePhase::Combat => self.combat_prompt(),
            GamePhase::GameOver => Prompt::new("GAME OVER", Vec::new()),
            GamePhase::Win => Prompt::new("=== YOU HAVE COMPLETED THE GAME! ===", Vec::new()),
        }
    }

    fn combat_prompt(&self) -> Prompt {
        let Some(encounter) = &self.encounter else {
            return Prompt::new("", Vec::new());
        };
        match encounter.step {
            CombatStep::Action => {
                let enemy = &encounter.combat.enemy;
                let mut options = vec!["Attack".to_string(), "Use Item".to_string()];
                if self.player.class.can_cast() {
                    options.push("Cast Spell".to_string());
                }
                Prompt::new(
                    format!(
                        "{} ({}/{} HP) vs {} ({}/{} HP). Choose action",
                        self.player.name,
                        self.player.hp,
                        self.player.max_hp,
                        enemy.name,
                        enemy.hp,
                        enemy.max_hp
                    ),
                    options,
                )
            }
            CombatStep::Item => Prompt::new(
                "Choose item to use",
                self.player
                    .inventory
                    .iter()
                    .map(|item| item.name.clone())
                    .collect(),
            )
            .cancellable(),
            CombatStep::Spell => Prompt::new(
                "Choose spell to cast",
                SpellKind::iter().map(|kind| kind.label().to_string()).collect(),
            )
            .cancellable(),
        }
    }

    /// Apply one decision
    pub fn step(&mut self, choice: Option<i32>) {
        tracing::debug!(phase = ?self.phase, ?choice, "step");
        match self.phase {
            GamePhase::Menu => self.menu(choice),
            GamePhase::ConfirmQuit => {
                if choice == Some(1) {
                    self.message("Thanks for playing!");
                    self.phase = GamePhase::GameOver;
                } else {
                    self.phase = GamePhase::Menu;
                }
            }
            GamePhase::Explore => self.explore(choice),
            GamePhase::ConfirmBoss => {
                if choice == Some(1) {
                    let boss = spawn_boss(self.player.level, &self.config);
                    self.message("BOSS FIGHT!!!");
                    self.message(format!("The {} laughs menacingly...", boss.name));
                    self.start_combat(Combat::new(boss), true);
                } else {
                    self.phase = GamePhase::Menu;
                }
            }
            GamePhase::Shop => self.shop(choice),
            GamePhase::Combat => self.combat_step(choice),
            GamePhase::GameOver | GamePhase::Win => {}
        }
    }

    fn menu(&mut self, choice: Option<i32>) {
        match choice {
            Some(1) => self.phase = GamePhase::Explore,
            Some(2) => self.phase = GamePhase::Shop,
            Some(3) => {
                for line in self.character_sheet() {
                    self.message(line);
                }
            }
            Some(4) => self.request_save(SaveRequest::Manual),
            Some(5) => self.phase = GamePhase::ConfirmQuit,
            _ => self.message("Invalid choice. Please try again."),
        }
    }

    fn rest_amount(&self) -> i32 {
        self.player.level.saturating_mul(REST_HEAL_PER_LEVEL)
    }

    fn explore(&mut self, choice: Option<i32>) {
        self.phase = GamePhase::Menu;
        match choice {
            Some(1) => {
                let enemy = spawn_enemy(
                    self.player.area_level,
                    self.player.level,
                    &self.config,
                    &mut self.rng,
                );
                self.message(format!(
                    "A level {} {} appears! HP: {}/{}, Damage: {}",
                    enemy.level, enemy.name, enemy.hp, enemy.max_hp, enemy.damage
                ));
                self.start_combat(Combat::new(enemy), false);
            }
            Some(2) => {
                let amount = self.rest_amount();
                self.player.heal(amount);
                self.message(format!(
                    "You rest and recover {} HP. Current HP: {}/{}",
                    amount, self.player.hp, self.player.max_hp
                ));
                self.request_save(SaveRequest::Auto);
            }
            Some(3) => self.advance_area(),
            Some(4) => self.message("Returning to main menu."),
            _ => self.message("Invalid choice."),
        }
    }

    fn advance_area(&mut self) {
        let area = self.player.area_level;
        if area < MAX_AREA {
            if self.player.level > area {
                self.player.area_level += 1;
                self.message(format!("You advance to Area {}!", self.player.area_level));
                self.request_save(SaveRequest::Auto);
            } else {
                self.message(format!(
                    "You need to be at least level {} to advance!",
                    area + 1
                ));
            }
        } else if self.player.kills >= BOSS_KILL_REQUIREMENT {
            self.message("=== FINAL BOSS CHALLENGE ===");
            self.phase = GamePhase::ConfirmBoss;
        } else {
            self.message(format!(
                "You need to defeat at least {} monsters before facing the final boss!",
                BOSS_KILL_REQUIREMENT
            ));
            self.message(format!(
                "Monsters defeated: {}/{}",
                self.player.kills, BOSS_KILL_REQUIREMENT
            ));
        }
    }

    fn shop(&mut self, choice: Option<i32>) {
        self.phase = GamePhase::Menu;
        match choice {
            Some(n @ 1..=3) => {
                let (_, price, bonus) = SHOP_STOCK[(n - 1) as usize];
                if self.player.gold < price {
                    self.message("Not enough gold!");
                } else {
                    let potion = health_potion(self.player.level.saturating_add(bonus));
                    match self.player.inventory.add(potion) {
                        Ok(index) => {
                            self.player.gold -= price;
                            let name = self
                                .player
                                .inventory
                                .get(index)
                                .map(|item| item.name.clone())
                                .unwrap_or_default();
                            self.message(format!(
                                "Purchased {} for {} gold. Remaining gold: {}",
                                name, price, self.player.gold
                            ));
                        }
                        Err(_) => self.message("Inventory full! Can't buy more items."),
                    }
                }
            }
            Some(4) => self.message("Thanks for visiting the shop!"),
            _ => self.message("Invalid choice. Leaving shop."),
        }
        self.request_save(SaveRequest::Auto);
    }

    fn start_combat(&mut self, combat: Combat, is_boss: bool) {
        self.message("--- COMBAT START ---");
        self.message(format!(
            "You face a Level {} {}!",
            combat.enemy.level, combat.enemy.name
        ));
        self.encounter = Some(Encounter {
            combat,
            step: CombatStep::Action,
            is_boss,
        });
        self.phase = GamePhase::Combat;
    }

    fn combat_step(&mut self, choice: Option<i32>) {
        let Some(step) = self.encounter.as_ref().map(|encounter| encounter.step) else {
            self.phase = GamePhase::Menu;
            return;
        };

        let action = match step {
            CombatStep::Action => match choice {
                Some(1) => PlayerAction::Attack,
                Some(2) if self.player.inventory.is_empty() => {
                    PlayerAction::Skip("Inventory empty!")
                }
                Some(2) => {
                    self.set_combat_step(CombatStep::Item);
                    return;
                }
                Some(3) if self.player.class.can_cast() => {
                    self.set_combat_step(CombatStep::Spell);
                    return;
                }
                _ => PlayerAction::Skip("Invalid action choice. Turn skipped."),
            },
            CombatStep::Item => match choice {
                Some(0) => PlayerAction::Skip("Cancelled using item."),
                Some(n) if n >= 1 && (n as usize) <= self.player.inventory.len() => {
                    PlayerAction::UseItem(n as usize - 1)
                }
                _ => PlayerAction::Skip("Invalid item number."),
            },
            CombatStep::Spell => match choice.and_then(SpellKind::from_choice) {
                Some(kind) => PlayerAction::CastSpell(Spell::roll(kind, &mut self.rng)),
                None if choice == Some(0) => PlayerAction::Skip("Spell casting cancelled."),
                None => PlayerAction::Skip("Invalid spell choice."),
            },
        };

        self.resolve_turn(action);
    }

    fn set_combat_step(&mut self, step: CombatStep) {
        if let Some(encounter) = self.encounter.as_mut() {
            encounter.step = step;
        }
    }

    fn resolve_turn(&mut self, action: PlayerAction) {
        let Some(mut encounter) = self.encounter.take() else {
            return;
        };

        let status = encounter.combat.take_turn(
            &mut self.player,
            action,
            &self.config,
            &mut self.rng,
            &mut self.messages,
        );

        match status {
            CombatStatus::Active => {
                encounter.step = CombatStep::Action;
                self.encounter = Some(encounter);
            }
            CombatStatus::PlayerWon => {
                award_victory(
                    &mut self.player,
                    &encounter.combat.enemy,
                    &mut self.rng,
                    &mut self.messages,
                );
                self.request_save(SaveRequest::Auto);
                if encounter.is_boss {
                    self.message("=== YOU HAVE COMPLETED THE GAME! ===");
                    self.message("Congratulations on defeating the final boss!");
                    self.message(format!(
                        "Final stats: Level {}, {} kills, {} gold",
                        self.player.level, self.player.kills, self.player.gold
                    ));
                    self.phase = GamePhase::Win;
                } else {
                    self.phase = GamePhase::Menu;
                }
            }
            CombatStatus::PlayerLost => {
                self.message("GAME OVER");
                self.phase = GamePhase::GameOver;
            }
        }
    }

    /// Lines describing the player, for the View Character menu entry
    pub fn character_sheet(&self) -> Vec<String> {
        let p = &self.player;
        let mut lines = vec![
            "=== CHARACTER INFO ===".to_string(),
            format!("Name: {}", p.name),
            format!("Class: {}", p.class),
            format!("Level: {}", p.level),
            format!("HP: {}/{}", p.hp, p.max_hp),
            format!("Damage: {}", p.damage),
            format!("XP: {}/{}", p.xp, p.xp_needed()),
            format!("Gold: {}", p.gold),
            format!("Area: {}", p.area_level),
            format!("Kills: {}", p.kills),
            format!(
                "Inventory ({}/{}):",
                p.inventory.len(),
                p.inventory.capacity()
            ),
        ];
        if p.inventory.is_empty() {
            lines.push("  Empty".to_string());
        } else {
            lines.extend(
                p.inventory
                    .iter()
                    .enumerate()
                    .map(|(i, item)| format!("  {}. {}", i + 1, item.name)),
            );
        }
        lines
    }
}
