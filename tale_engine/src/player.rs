//! The player: location, inventory, and flags.
//!
//! The player holds no reference back into the world; lookups that need
//! definitions take `&World` as a parameter.

use std::collections::HashMap;

use tale_data::Id;

use crate::style::GameStyle;
use crate::world::World;

#[derive(Debug, Clone, Default)]
pub struct Player {
    pub current_room: Id,
    /// Ordered and duplicate-free; order drives fuzzy name resolution.
    pub inventory: Vec<Id>,
    pub flags: HashMap<String, String>,
}

impl Player {
    pub fn new(start_room: Id, initial_inventory: Vec<Id>) -> Self {
        let mut player = Self {
            current_room: start_room,
            inventory: Vec::new(),
            flags: HashMap::new(),
        };
        for item_id in initial_inventory {
            player.add_item(item_id);
        }
        player
    }

    pub fn has_item(&self, item_id: &str) -> bool {
        self.inventory.iter().any(|id| id == item_id)
    }

    pub fn add_item(&mut self, item_id: Id) {
        if !self.has_item(&item_id) {
            self.inventory.push(item_id);
        }
    }

    pub fn remove_item(&mut self, item_id: &str) -> bool {
        let before = self.inventory.len();
        self.inventory.retain(|id| id != item_id);
        self.inventory.len() < before
    }

    /// Find a carried item by (partial) name: lowercase substring match,
    /// first hit in inventory order wins.
    pub fn find_item_by_name(&self, world: &World, name: &str) -> Option<Id> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.inventory
            .iter()
            .find(|id| {
                world
                    .item(id)
                    .is_some_and(|item| item.name.to_lowercase().contains(&needle))
            })
            .cloned()
    }

    pub fn show_inventory(&self, world: &World) {
        if self.inventory.is_empty() {
            println!("Your inventory is empty.");
            return;
        }
        println!("{}", "Inventory:".subheading_style());
        println!("----------");
        for item_id in &self.inventory {
            println!("- {}", world.item_name(item_id).item_style());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;

    fn world_with_items(items: &[(&str, &str)]) -> World {
        let mut world = World::default();
        for (id, name) in items {
            world.items.insert(
                (*id).to_string(),
                Item {
                    id: (*id).to_string(),
                    name: (*name).to_string(),
                    ..Item::default()
                },
            );
        }
        world
    }

    #[test]
    fn initial_inventory_is_deduplicated() {
        let player = Player::new("cell".to_string(), vec!["key".into(), "key".into()]);
        assert_eq!(player.inventory, vec!["key".to_string()]);
    }

    #[test]
    fn remove_item_reports_whether_anything_left() {
        let mut player = Player::new("cell".to_string(), vec!["key".into()]);
        assert!(player.remove_item("key"));
        assert!(!player.remove_item("key"));
    }

    #[test]
    fn name_lookup_prefers_earlier_inventory_entries() {
        let world = world_with_items(&[("key_small", "small key"), ("key_large", "large key")]);
        let player = Player::new("cell".to_string(), vec!["key_small".into(), "key_large".into()]);

        assert_eq!(player.find_item_by_name(&world, "key"), Some("key_small".to_string()));
        assert_eq!(player.find_item_by_name(&world, "LARGE"), Some("key_large".to_string()));
        assert_eq!(player.find_item_by_name(&world, "sword"), None);
    }
}
