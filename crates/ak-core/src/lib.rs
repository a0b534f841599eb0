//! ak-core: Core combat and progression rules for Ashen Keep
//!
//! This crate contains all game logic with no I/O dependencies.
//! Every rule runs synchronously in response to one player decision, and
//! all randomness flows through an explicit [`GameRng`].

pub mod combat;
pub mod magic;
pub mod monster;
pub mod object;
pub mod player;

mod config;
mod consts;
mod gameloop;
mod rng;

pub use config::{Difficulty, GameConfig};
pub use consts::*;
pub use gameloop::{Game, GamePhase, Prompt, SaveRequest};
pub use rng::GameRng;
