//! Player system
//!
//! Contains the Player struct, class definitions and progression rules.

mod character;
mod class;
mod experience;
mod status;

pub use character::{Player, initialize_player};
pub use class::PlayerClass;
pub use experience::{LevelGrowth, award_xp};
pub use status::StatusFlags;
