//! Spellcasting
//!
//! Each spell kind carries its own parameters. Parameters are rolled by the
//! caller with [`Spell::roll`] and then resolved by [`cast_spell`], which
//! turns them into a damage or heal magnitude.

use strum::{Display, EnumIter};

use crate::config::GameConfig;
use crate::player::Player;
use crate::rng::GameRng;

/// Spell kinds, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum SpellKind {
    Fire,
    Ice,
    Lightning,
    Heal,
    Random,
}

impl SpellKind {
    /// Map a 1-based menu choice to a spell kind
    pub const fn from_choice(choice: i32) -> Option<Self> {
        match choice {
            1 => Some(SpellKind::Fire),
            2 => Some(SpellKind::Ice),
            3 => Some(SpellKind::Lightning),
            4 => Some(SpellKind::Heal),
            5 => Some(SpellKind::Random),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SpellKind::Fire => "Fireball (dmg + burn)",
            SpellKind::Ice => "Frost Nova (dmg + freeze)",
            SpellKind::Lightning => "Lightning Bolt (dmg + chain)",
            SpellKind::Heal => "Healing Light (heal)",
            SpellKind::Random => "Random Magic (random effect)",
        }
    }
}

/// A spell together with the parameters for one cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spell {
    Fire { intensity: i32, burn_turns: i32 },
    Ice { radius: i32, freeze_chance: f64 },
    Lightning { power: i32, chain_targets: i32 },
    Heal { power: i32, duration: i32 },
    Random,
}

impl Spell {
    pub const fn kind(&self) -> SpellKind {
        match self {
            Spell::Fire { .. } => SpellKind::Fire,
            Spell::Ice { .. } => SpellKind::Ice,
            Spell::Lightning { .. } => SpellKind::Lightning,
            Spell::Heal { .. } => SpellKind::Heal,
            Spell::Random => SpellKind::Random,
        }
    }

    /// Draw fresh parameters for a cast of `kind`
    pub fn roll(kind: SpellKind, rng: &mut GameRng) -> Self {
        match kind {
            SpellKind::Fire => Spell::Fire {
                intensity: rng.rnd(10) as i32,
                burn_turns: rng.rnd(3) as i32,
            },
            SpellKind::Ice => Spell::Ice {
                radius: rng.rnd(5) as i32,
                freeze_chance: rng.rn2(100) as f64 / 100.0,
            },
            SpellKind::Lightning => Spell::Lightning {
                power: rng.rnd(5) as i32,
                chain_targets: rng.rn2(5) as i32,
            },
            SpellKind::Heal => Spell::Heal {
                power: rng.rnd(5) as i32,
                duration: rng.rnd(3) as i32,
            },
            SpellKind::Random => Spell::Random,
        }
    }
}

const RANDOM_EFFECTS: [&str; 7] = [
    "turns target into a sheep",
    "summons dancing skeletons",
    "creates a pizza out of thin air",
    "makes everything smell like elderberries",
    "plays elevator music from nowhere",
    "causes target to speak in rhymes",
    "changes gravity direction temporarily",
];

/// Result of resolving one cast
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpellOutcome {
    /// Damage to deal to the target, after difficulty scaling
    pub damage: i32,
    /// Heal magnitude applied to the caster
    pub heal: i32,
    /// Flavour description for random magic
    pub effect: Option<&'static str>,
    pub messages: Vec<String>,
}

/// Resolve a spell cast by `caster` at a target named `target`.
///
/// Healing is applied to the caster here; damage is returned for the caller
/// to apply. A caster that is not a Mage produces no effect.
pub fn cast_spell(
    caster: &mut Player,
    target: &str,
    spell: &Spell,
    config: &GameConfig,
    rng: &mut GameRng,
) -> SpellOutcome {
    let mut outcome = SpellOutcome::default();

    if !caster.class.can_cast() {
        outcome.messages.push(format!(
            "{} tries to cast a spell but isn't a mage! Nothing happens.",
            caster.name
        ));
        return outcome;
    }

    let eggs = config.easter_eggs;
    let raw_damage = match *spell {
        Spell::Fire {
            intensity,
            burn_turns,
        } => {
            let intensity = intensity.clamp(1, 10);
            outcome.messages.push(format!(
                "{} casts FIREBALL (intensity: {}) at {}!",
                caster.name, intensity, target
            ));
            outcome
                .messages
                .push(format!("Flames burn for {} turns!", burn_turns));
            if eggs && intensity >= 10 {
                outcome.messages.push("IT'S SUPER EFFECTIVE!".to_string());
            }
            5 + intensity * 2
        }
        Spell::Ice {
            radius,
            freeze_chance,
        } => {
            outcome.messages.push(format!(
                "{} casts FROST NOVA (radius: {}, freeze: {:.1}%) at {}!",
                caster.name,
                radius,
                freeze_chance * 100.0,
                target
            ));
            if eggs && radius >= 5 {
                outcome.messages.push("WINTER IS COMING!".to_string());
            }
            3 + radius * 3
        }
        Spell::Lightning {
            power,
            chain_targets,
        } => {
            outcome.messages.push(format!(
                "{} casts LIGHTNING BOLT (power: {}) at {}!",
                caster.name, power, target
            ));
            outcome.messages.push(format!(
                "Lightning chains to {} additional targets!",
                chain_targets
            ));
            if eggs && chain_targets >= 3 {
                outcome.messages.push("UNLIMITED POWER!".to_string());
            }
            power * 4
        }
        Spell::Heal { power, duration } => {
            let heal = power * 5;
            outcome.messages.push(format!(
                "{} casts HEALING LIGHT (power: {}) on self!",
                caster.name, power
            ));
            outcome
                .messages
                .push(format!("Healing continues for {} turns.", duration));
            caster.heal(heal);
            if eggs && power >= 5 {
                outcome.messages.push("WELLNESS INTENSIFIES!".to_string());
            }
            outcome.heal = heal;
            tracing::debug!(heal, duration, hp = caster.hp, "cast heal spell");
            return outcome;
        }
        Spell::Random => {
            if eggs {
                let effect = rng.choose(&RANDOM_EFFECTS).copied();
                outcome.messages.push(format!(
                    "{} casts CHAOTIC MAGIC at {}!",
                    caster.name, target
                ));
                if let Some(effect) = effect {
                    outcome.messages.push(format!("Random effect: {}", effect));
                }
                outcome.effect = effect;
                rng.rnd(15) as i32
            } else {
                outcome.messages.push(format!(
                    "{} tries to cast random magic, but nothing interesting happens.",
                    caster.name
                ));
                rng.rnd(5) as i32
            }
        }
    };

    outcome.damage = config.difficulty.scale_spell_damage(raw_damage);
    tracing::debug!(
        spell = %spell.kind(),
        raw_damage,
        damage = outcome.damage,
        difficulty = %config.difficulty,
        "cast offensive spell"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Difficulty;
    use crate::player::PlayerClass;
    use strum::IntoEnumIterator;

    fn mage() -> Player {
        Player::new("Merlin", PlayerClass::Mage)
    }

    fn cast(spell: Spell, config: &GameConfig) -> SpellOutcome {
        let mut rng = GameRng::new(9);
        cast_spell(&mut mage(), "Goblin", &spell, config, &mut rng)
    }

    #[test]
    fn test_fire_damage() {
        let config = GameConfig::default();
        let outcome = cast(Spell::Fire { intensity: 4, burn_turns: 2 }, &config);
        assert_eq!(outcome.damage, 13);
        assert_eq!(outcome.heal, 0);
    }

    #[test]
    fn test_fire_intensity_clamped() {
        let config = GameConfig::default();
        let outcome = cast(Spell::Fire { intensity: 50, burn_turns: 1 }, &config);
        assert_eq!(outcome.damage, 25);
        let outcome = cast(Spell::Fire { intensity: -2, burn_turns: 1 }, &config);
        assert_eq!(outcome.damage, 7);
    }

    #[test]
    fn test_ice_and_lightning_damage() {
        let config = GameConfig::default();
        let ice = cast(Spell::Ice { radius: 3, freeze_chance: 0.5 }, &config);
        assert_eq!(ice.damage, 12);
        let bolt = cast(Spell::Lightning { power: 5, chain_targets: 0 }, &config);
        assert_eq!(bolt.damage, 20);
    }

    #[test]
    fn test_difficulty_scales_offense() {
        let spell = Spell::Lightning { power: 4, chain_targets: 1 };
        let easy = cast(spell, &GameConfig::default().with_difficulty(Difficulty::Easy));
        let hard = cast(spell, &GameConfig::default().with_difficulty(Difficulty::Hard));
        assert_eq!(easy.damage, 24);
        assert_eq!(hard.damage, 11);
    }

    #[test]
    fn test_heal_ignores_difficulty() {
        for difficulty in Difficulty::iter() {
            let config = GameConfig::default().with_difficulty(difficulty);
            let mut caster = mage();
            caster.hp = 10;
            let mut rng = GameRng::new(1);
            let outcome = cast_spell(
                &mut caster,
                "Goblin",
                &Spell::Heal { power: 3, duration: 2 },
                &config,
                &mut rng,
            );
            assert_eq!(outcome.heal, 15);
            assert_eq!(outcome.damage, 0);
            assert_eq!(caster.hp, 25);
        }
    }

    #[test]
    fn test_heal_clamped_to_max() {
        let mut caster = mage();
        caster.hp = caster.max_hp - 2;
        let mut rng = GameRng::new(1);
        cast_spell(
            &mut caster,
            "Goblin",
            &Spell::Heal { power: 5, duration: 1 },
            &GameConfig::default(),
            &mut rng,
        );
        assert_eq!(caster.hp, caster.max_hp);
    }

    #[test]
    fn test_random_with_easter_eggs() {
        let config = GameConfig::default();
        let mut rng = GameRng::new(21);
        for _ in 0..200 {
            let outcome = cast_spell(&mut mage(), "Orc", &Spell::Random, &config, &mut rng);
            assert!((1..=15).contains(&outcome.damage));
            assert!(outcome.effect.is_some());
        }
    }

    #[test]
    fn test_random_without_easter_eggs() {
        let config = GameConfig::default().with_easter_eggs(false);
        let mut rng = GameRng::new(22);
        for _ in 0..200 {
            let outcome = cast_spell(&mut mage(), "Orc", &Spell::Random, &config, &mut rng);
            assert!((1..=5).contains(&outcome.damage));
            assert!(outcome.effect.is_none());
        }
    }

    #[test]
    fn test_non_mage_fizzles() {
        let mut rogue = Player::new("Shade", PlayerClass::Rogue);
        rogue.hp = 5;
        let mut rng = GameRng::new(3);
        let outcome = cast_spell(
            &mut rogue,
            "Goblin",
            &Spell::Heal { power: 5, duration: 3 },
            &GameConfig::default(),
            &mut rng,
        );
        assert_eq!(outcome.damage, 0);
        assert_eq!(outcome.heal, 0);
        assert_eq!(rogue.hp, 5);
        assert!(outcome.messages[0].contains("isn't a mage"));
    }

    #[test]
    fn test_roll_ranges() {
        let mut rng = GameRng::new(99);
        for _ in 0..500 {
            for kind in SpellKind::iter() {
                let spell = Spell::roll(kind, &mut rng);
                assert_eq!(spell.kind(), kind);
                match spell {
                    Spell::Fire { intensity, burn_turns } => {
                        assert!((1..=10).contains(&intensity));
                        assert!((1..=3).contains(&burn_turns));
                    }
                    Spell::Ice { radius, freeze_chance } => {
                        assert!((1..=5).contains(&radius));
                        assert!((0.0..1.0).contains(&freeze_chance));
                    }
                    Spell::Lightning { power, chain_targets } => {
                        assert!((1..=5).contains(&power));
                        assert!((0..=4).contains(&chain_targets));
                    }
                    Spell::Heal { power, duration } => {
                        assert!((1..=5).contains(&power));
                        assert!((1..=3).contains(&duration));
                    }
                    Spell::Random => {}
                }
            }
        }
    }

    #[test]
    fn test_spell_choice_mapping() {
        assert_eq!(SpellKind::from_choice(1), Some(SpellKind::Fire));
        assert_eq!(SpellKind::from_choice(5), Some(SpellKind::Random));
        assert_eq!(SpellKind::from_choice(0), None);
        assert_eq!(SpellKind::from_choice(6), None);
    }
}
