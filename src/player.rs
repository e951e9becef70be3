use schema::ItemKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Something the player can do on their half-turn.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum PlayerAction {
    /// Use one of the active combatant's moves, by name.
    UseMove { move_name: String },
    /// Consume an item from the inventory.
    UseItem { item: ItemKind },
}

/// The player's consumable items. Counts never go below zero.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inventory {
    pub heal: u32,
    pub full_restore: u32,
}

impl Default for Inventory {
    fn default() -> Self {
        Inventory {
            heal: 3,
            full_restore: 1,
        }
    }
}

impl Inventory {
    pub fn new(heal: u32, full_restore: u32) -> Self {
        Inventory { heal, full_restore }
    }

    pub fn count(&self, item: ItemKind) -> u32 {
        match item {
            ItemKind::Heal => self.heal,
            ItemKind::FullRestore => self.full_restore,
        }
    }

    pub fn has(&self, item: ItemKind) -> bool {
        self.count(item) > 0
    }

    /// Remove one of `item`. Returns false when there was none to take.
    pub fn consume(&mut self, item: ItemKind) -> bool {
        let slot = match item {
            ItemKind::Heal => &mut self.heal,
            ItemKind::FullRestore => &mut self.full_restore,
        };
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x{}, {} x{}",
            ItemKind::Heal,
            self.heal,
            ItemKind::FullRestore,
            self.full_restore
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_floors_at_zero() {
        let mut inventory = Inventory::new(1, 0);
        assert!(inventory.consume(ItemKind::Heal));
        assert!(!inventory.consume(ItemKind::Heal));
        assert!(!inventory.consume(ItemKind::FullRestore));
        assert_eq!(inventory, Inventory::new(0, 0));
    }

    #[test]
    fn test_default_matches_starting_bag() {
        let inventory = Inventory::default();
        assert_eq!(inventory.count(ItemKind::Heal), 3);
        assert_eq!(inventory.count(ItemKind::FullRestore), 1);
        assert_eq!(inventory.to_string(), "Potion x3, Full Restore x1");
    }
}
