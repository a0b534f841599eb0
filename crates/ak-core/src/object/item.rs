//! Item definitions and the item factory

use strum::Display;

use crate::player::PlayerClass;
use crate::rng::GameRng;

/// Item family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[repr(u8)]
pub enum ItemKind {
    /// Restores hp equal to the item's value
    Healing = 0,
}

impl ItemKind {
    /// Numeric code used in save records
    pub const fn code(self) -> i32 {
        self as i32
    }

    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(ItemKind::Healing),
            _ => None,
        }
    }
}

/// Per-kind construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemParams {
    Healing { amount: i32 },
}

/// A single owned item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
    /// Magnitude of the effect (heal amount for healing items)
    pub value: i32,
}

impl Item {
    pub fn new(name: impl Into<String>, kind: ItemKind, value: i32) -> Self {
        Self {
            name: name.into(),
            kind,
            value: value.max(0),
        }
    }
}

/// Build an item from its kind-specific parameters
pub fn create_item(name: impl Into<String>, params: ItemParams) -> Item {
    match params {
        ItemParams::Healing { amount } => Item::new(name, ItemKind::Healing, amount),
    }
}

/// A potion whose name carries its strength; heals `strength * 10`
pub fn health_potion(strength: i32) -> Item {
    create_item(
        format!("Health Potion (Strength {})", strength),
        ItemParams::Healing {
            amount: strength.saturating_mul(10),
        },
    )
}

const POTION_ADJECTIVES: [&str; 8] = [
    "Bubbling",
    "Glowing",
    "Fizzy",
    "Questionable",
    "Magical",
    "Sketchy",
    "Ancient",
    "Homemade",
];

/// A potion with a random adjective and strength 1-5; heals `strength * 8`
pub fn random_potion(rng: &mut GameRng) -> Item {
    let strength = rng.rnd(5) as i32;
    let adjective = rng.choose(&POTION_ADJECTIVES).copied().unwrap_or("Plain");
    create_item(
        format!("{} Health Potion", adjective),
        ItemParams::Healing {
            amount: strength.saturating_mul(8),
        },
    )
}

/// The potion each class starts the game with
pub fn starting_item(class: PlayerClass) -> Item {
    let name = match class {
        PlayerClass::Paladin => "Blessed Health Potion",
        PlayerClass::Rogue => "Pilfered Health Potion",
        PlayerClass::Mage => "Brewed Health Potion",
    };
    create_item(name, ItemParams::Healing { amount: 20 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_health_potion() {
        let potion = health_potion(3);
        assert_eq!(potion.name, "Health Potion (Strength 3)");
        assert_eq!(potion.kind, ItemKind::Healing);
        assert_eq!(potion.value, 30);
    }

    #[test]
    fn test_random_potion_ranges() {
        let mut rng = GameRng::new(11);
        for _ in 0..200 {
            let potion = random_potion(&mut rng);
            assert!(potion.name.ends_with(" Health Potion"));
            assert!(potion.value % 8 == 0);
            assert!((8..=40).contains(&potion.value));
        }
    }

    #[test]
    fn test_starting_items_differ_by_class() {
        let names: Vec<_> = PlayerClass::iter()
            .map(|class| starting_item(class).name)
            .collect();
        assert_eq!(names.len(), 3);
        assert_ne!(names[0], names[1]);
        assert_ne!(names[1], names[2]);
        for class in PlayerClass::iter() {
            assert_eq!(starting_item(class).value, 20);
        }
    }

    #[test]
    fn test_item_kind_codes() {
        assert_eq!(ItemKind::Healing.code(), 0);
        assert_eq!(ItemKind::from_code(0), Some(ItemKind::Healing));
        assert_eq!(ItemKind::from_code(7), None);
    }

    #[test]
    fn test_negative_value_clamped() {
        let item = create_item("Dud", ItemParams::Healing { amount: -5 });
        assert_eq!(item.value, 0);
    }
}
