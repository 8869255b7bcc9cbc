//! NPC definitions, dialogue trees, and live NPC instances.

use std::collections::HashMap;

use tale_data::Id;

use crate::world::FlagPair;

/// Immutable NPC definition, including its full dialogue tree.
#[derive(Debug, Clone, Default)]
pub struct NpcDef {
    pub id: Id,
    pub name: String,
    pub presence_description: String,
    pub initial_dialogue_node: Id,
    pub dialogue: HashMap<Id, DialogueNode>,
    pub initial_items: Vec<Id>,
    pub initial_flags: HashMap<String, String>,
}

/// One node of a dialogue tree: what the NPC says, side effects that apply
/// on every visit, and the player's response options.
#[derive(Debug, Clone, Default)]
pub struct DialogueNode {
    pub text: String,
    pub responses: Vec<ResponseOption>,
    pub gives_item: Option<Id>,
    pub sets_npc_flag: Option<FlagPair>,
    pub sets_global_flag: Option<FlagPair>,
    pub ends_dialogue: bool,
}

/// A selectable player response, gated by optional requirements.
#[derive(Debug, Clone, Default)]
pub struct ResponseOption {
    pub text: String,
    pub target_node: Id,
    pub requires_player_item: Option<Id>,
    pub requires_npc_flag: Option<FlagPair>,
    pub requires_global_flag: Option<FlagPair>,
}

/// Mutable per-session state of one NPC. Lives in the world-state overlay
/// and is snapshotted into save files.
#[derive(Debug, Clone, Default)]
pub struct NpcInstance {
    pub definition_id: Id,
    pub current_room: Id,
    pub current_node: Id,
    pub inventory: Vec<Id>,
    pub flags: HashMap<String, String>,
}

impl NpcInstance {
    pub fn flag(&self, name: &str) -> Option<&str> {
        self.flags.get(name).map(String::as_str)
    }

    pub fn set_flag(&mut self, name: &str, value: &str) {
        self.flags.insert(name.to_string(), value.to_string());
    }
}
