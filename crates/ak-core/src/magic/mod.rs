//! Magic system
//!
//! Spell casting for the Mage class.

mod spell;

pub use spell::{Spell, SpellKind, SpellOutcome, cast_spell};
