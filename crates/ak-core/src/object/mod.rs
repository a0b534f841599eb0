//! Object system
//!
//! Items and the bounded inventory that owns them.

mod inventory;
mod item;

pub use inventory::{Inventory, InventoryFull};
pub use item::{
    Item, ItemKind, ItemParams, create_item, health_potion, random_potion, starting_item,
};
