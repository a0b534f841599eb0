//! Inventory management
//!
//! A bounded, ordered list of owned items. Removing an item shifts every
//! later item down one slot, so there are never gaps below `len()`.

use thiserror::Error;

use super::Item;
use crate::INITIAL_INVENTORY_CAPACITY;

/// Returned when an item does not fit; carries the item back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("inventory is full ({capacity} slots), cannot add {}", item.name)]
pub struct InventoryFull {
    pub item: Item,
    pub capacity: usize,
}

/// Bounded ordered item storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<Item>,
    capacity: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_capacity(INITIAL_INVENTORY_CAPACITY)
    }
}

impl Inventory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of items present
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of allocated slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Append an item after the last occupied slot
    pub fn add(&mut self, item: Item) -> Result<usize, InventoryFull> {
        if self.is_full() {
            return Err(InventoryFull {
                item,
                capacity: self.capacity,
            });
        }
        self.items.push(item);
        Ok(self.items.len() - 1)
    }

    /// Take the item at `index` out, compacting the remaining items
    pub fn remove(&mut self, index: usize) -> Option<Item> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::health_potion;
    use proptest::prelude::*;

    fn filled(count: usize, capacity: usize) -> Inventory {
        let mut inventory = Inventory::with_capacity(capacity);
        for i in 0..count {
            inventory.add(health_potion(i as i32 + 1)).unwrap();
        }
        inventory
    }

    #[test]
    fn test_add_until_full() {
        let mut inventory = filled(3, 3);
        assert!(inventory.is_full());

        let err = inventory.add(health_potion(9)).unwrap_err();
        assert_eq!(err.capacity, 3);
        assert_eq!(err.item.value, 90);
        assert_eq!(inventory.len(), 3);
    }

    #[test]
    fn test_remove_compacts() {
        let mut inventory = filled(4, 10);
        let removed = inventory.remove(1).unwrap();
        assert_eq!(removed.value, 20);
        assert_eq!(inventory.len(), 3);

        let values: Vec<_> = inventory.iter().map(|item| item.value).collect();
        assert_eq!(values, vec![10, 30, 40]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut inventory = filled(2, 10);
        assert!(inventory.remove(2).is_none());
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn test_default_capacity() {
        let inventory = Inventory::default();
        assert_eq!(inventory.capacity(), INITIAL_INVENTORY_CAPACITY);
        assert!(inventory.is_empty());
    }

    proptest! {
        #[test]
        fn prop_size_never_exceeds_capacity(capacity in 0usize..12, adds in 0usize..30) {
            let mut inventory = Inventory::with_capacity(capacity);
            for i in 0..adds {
                let _ = inventory.add(health_potion(i as i32));
                prop_assert!(inventory.len() <= inventory.capacity());
            }
        }

        #[test]
        fn prop_remove_preserves_order(count in 1usize..10, pick in 0usize..10) {
            let index = pick % count;
            let mut inventory = filled(count, 10);
            let before: Vec<i32> = inventory.iter().map(|item| item.value).collect();

            inventory.remove(index).unwrap();

            let mut expected = before.clone();
            expected.remove(index);
            let after: Vec<i32> = inventory.iter().map(|item| item.value).collect();
            prop_assert_eq!(after, expected);
            prop_assert_eq!(inventory.len(), count - 1);
        }
    }
}
