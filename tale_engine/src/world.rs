//! The world model: immutable definitions plus the mutable session overlay.
//!
//! Definitions (rooms, items, NPCs, puzzles, end conditions) never change
//! after loading. Everything that play can alter lives in [`WorldState`]:
//! room item lists, puzzle solved flags, NPC instances, global flags, and
//! exit lock overrides. Save files snapshot the overlay and nothing else.

use std::collections::{BTreeMap, HashMap};

use log::warn;
use tale_data::Id;

use crate::endings::EndCondition;
use crate::item::Item;
use crate::npc::{NpcDef, NpcInstance};
use crate::puzzle::Puzzle;
use crate::room::{Room, exit_key};

/// A flag name paired with its value, used both for writes and for
/// equality requirements. Authored as `"name=value"` in dialogue fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagPair {
    pub name: String,
    pub value: String,
}

impl FlagPair {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    /// Parse the authored `"name=value"` form. The value may itself
    /// contain `=`; only the first one splits.
    pub fn parse(raw: &str) -> Option<Self> {
        let (name, value) = raw.split_once('=')?;
        Some(Self::new(name, value))
    }
}

/// Game-level metadata carried over from the world document.
#[derive(Debug, Clone, Default)]
pub struct GameInfo {
    pub title: String,
    pub version: String,
    pub welcome_message: String,
    pub help_text: String,
}

/// The mutable overlay over the world definition.
///
/// NPC instances live in a `BTreeMap` so fuzzy name resolution scans them
/// in a stable order.
#[derive(Debug, Clone, Default)]
pub struct WorldState {
    pub room_items: HashMap<Id, Vec<Id>>,
    pub puzzles_solved: HashMap<Id, bool>,
    pub npcs: BTreeMap<Id, NpcInstance>,
    pub global_flags: HashMap<String, String>,
    /// Exit lock overrides keyed `"roomId_direction"`, seeded from each
    /// exit's initial lock. `true` forces locked; `false` defers to the
    /// exit's derived requirements.
    pub exit_overrides: HashMap<String, bool>,
}

/// The full game world: definitions plus the session overlay.
#[derive(Debug, Clone, Default)]
pub struct World {
    pub info: GameInfo,
    pub rooms: HashMap<Id, Room>,
    pub items: HashMap<Id, Item>,
    pub npc_defs: HashMap<Id, NpcDef>,
    /// Puzzles scan in id order for the free-text `use` fallback.
    pub puzzles: BTreeMap<Id, Puzzle>,
    pub end_conditions: Vec<EndCondition>,
    pub state: WorldState,
}

impl World {
    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.items.get(item_id)
    }

    pub fn npc_def(&self, npc_id: &str) -> Option<&NpcDef> {
        self.npc_defs.get(npc_id)
    }

    pub fn puzzle(&self, puzzle_id: &str) -> Option<&Puzzle> {
        self.puzzles.get(puzzle_id)
    }

    /// Display name for an item id, falling back to the id itself when the
    /// definition is missing.
    /// Display name for an item, falling back to the id when unknown.
    pub fn item_name<'a>(&'a self, item_id: &'a str) -> &'a str {
        self.items.get(item_id).map_or(item_id, |item| item.name.as_str())
    }

    pub fn items_in_room(&self, room_id: &str) -> &[Id] {
        self.state.room_items.get(room_id).map_or(&[], Vec::as_slice)
    }

    pub fn add_item_to_room(&mut self, room_id: &str, item_id: &str) {
        let items = self.state.room_items.entry(room_id.to_string()).or_default();
        if !items.iter().any(|id| id == item_id) {
            items.push(item_id.to_string());
        }
    }

    pub fn remove_item_from_room(&mut self, room_id: &str, item_id: &str) -> bool {
        let Some(items) = self.state.room_items.get_mut(room_id) else {
            return false;
        };
        let before = items.len();
        items.retain(|id| id != item_id);
        items.len() < before
    }

    /// Find an item in a room by (partial) name: lowercase substring match,
    /// first hit in the room's item-list order wins. Ambiguity between
    /// overlapping names is resolved by that order, deliberately.
    pub fn find_item_in_room(&self, name: &str, room_id: &str) -> Option<Id> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.items_in_room(room_id)
            .iter()
            .find(|id| {
                self.items
                    .get(*id)
                    .is_some_and(|item| item.name.to_lowercase().contains(&needle))
            })
            .cloned()
    }

    /// Find an NPC in a room by (partial) name, same matching rules as
    /// [`World::find_item_in_room`].
    pub fn find_npc_in_room(&self, name: &str, room_id: &str) -> Option<Id> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.state
            .npcs
            .values()
            .find(|npc| {
                npc.current_room == room_id
                    && self
                        .npc_defs
                        .get(&npc.definition_id)
                        .is_some_and(|def| def.name.to_lowercase().contains(&needle))
            })
            .map(|npc| npc.definition_id.clone())
    }

    /// Ids of all NPCs currently standing in a room.
    pub fn npcs_in_room(&self, room_id: &str) -> Vec<Id> {
        self.state
            .npcs
            .values()
            .filter(|npc| npc.current_room == room_id)
            .map(|npc| npc.definition_id.clone())
            .collect()
    }

    pub fn global_flag(&self, name: &str) -> Option<&str> {
        self.state.global_flags.get(name).map(String::as_str)
    }

    pub fn set_global_flag(&mut self, name: &str, value: &str) {
        self.state.global_flags.insert(name.to_string(), value.to_string());
    }

    pub fn is_puzzle_solved(&self, puzzle_id: &str) -> bool {
        self.state.puzzles_solved.get(puzzle_id).copied().unwrap_or(false)
    }

    pub fn mark_puzzle_solved(&mut self, puzzle_id: &str) {
        self.state.puzzles_solved.insert(puzzle_id.to_string(), true);
    }

    pub fn exit_override(&self, key: &str) -> Option<bool> {
        self.state.exit_overrides.get(key).copied()
    }

    pub fn set_exit_locked(&mut self, room_id: &str, direction: &str, locked: bool) {
        let key = exit_key(room_id, direction);
        if !self.rooms.get(room_id).is_some_and(|room| room.exits.contains_key(direction)) {
            warn!("exit override for unknown exit '{key}'");
        }
        self.state.exit_overrides.insert(key, locked);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with_item(room_id: &str, item_id: &str, item_name: &str) -> World {
        let mut world = World::default();
        world.items.insert(
            item_id.to_string(),
            Item {
                id: item_id.to_string(),
                name: item_name.to_string(),
                ..Item::default()
            },
        );
        world
            .state
            .room_items
            .insert(room_id.to_string(), vec![item_id.to_string()]);
        world
    }

    #[test]
    fn flag_pair_parses_name_value() {
        assert_eq!(
            FlagPair::parse("met_guard=true"),
            Some(FlagPair::new("met_guard", "true"))
        );
        assert_eq!(FlagPair::parse("no_equals_sign"), None);
    }

    #[test]
    fn flag_pair_splits_on_first_equals() {
        assert_eq!(FlagPair::parse("note=a=b"), Some(FlagPair::new("note", "a=b")));
    }

    #[test]
    fn find_item_matches_substring_case_insensitively() {
        let world = world_with_item("cell", "key", "Rusty Key");
        assert_eq!(world.find_item_in_room("rusty", "cell"), Some("key".to_string()));
        assert_eq!(world.find_item_in_room("KEY", "cell"), Some("key".to_string()));
        assert_eq!(world.find_item_in_room("lamp", "cell"), None);
        assert_eq!(world.find_item_in_room("", "cell"), None);
    }

    #[test]
    fn find_item_first_match_wins_in_list_order() {
        let mut world = world_with_item("cell", "key_small", "small key");
        world.items.insert(
            "key_large".to_string(),
            Item {
                id: "key_large".to_string(),
                name: "large key".to_string(),
                ..Item::default()
            },
        );
        world
            .state
            .room_items
            .get_mut("cell")
            .unwrap()
            .push("key_large".to_string());

        assert_eq!(world.find_item_in_room("key", "cell"), Some("key_small".to_string()));
    }

    #[test]
    fn item_name_falls_back_to_id_for_unknown_items() {
        let world = world_with_item("cell", "key", "Rusty Key");
        assert_eq!(world.item_name("key"), "Rusty Key");
        assert_eq!(world.item_name("ghost"), "ghost");
    }

    #[test]
    fn room_item_add_is_idempotent() {
        let mut world = world_with_item("cell", "key", "key");
        world.add_item_to_room("cell", "key");
        assert_eq!(world.items_in_room("cell").len(), 1);
        assert!(world.remove_item_from_room("cell", "key"));
        assert!(!world.remove_item_from_room("cell", "key"));
    }

    #[test]
    fn npc_lookup_is_scoped_to_room() {
        let mut world = World::default();
        world.npc_defs.insert(
            "guard".to_string(),
            NpcDef {
                id: "guard".to_string(),
                name: "Prison Guard".to_string(),
                ..NpcDef::default()
            },
        );
        world.state.npcs.insert(
            "guard".to_string(),
            NpcInstance {
                definition_id: "guard".to_string(),
                current_room: "hall".to_string(),
                ..NpcInstance::default()
            },
        );

        assert_eq!(world.find_npc_in_room("guard", "hall"), Some("guard".to_string()));
        assert_eq!(world.find_npc_in_room("guard", "cell"), None);
    }
}
