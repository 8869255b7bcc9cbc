use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::docs::Id;

/// Complete session snapshot written to `saves/<slot>.json`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SaveDocument {
    pub player_state: PlayerState,
    pub world_dynamic_state: WorldDynamicState,
    /// Version string of the world document the save was taken from.
    /// A mismatch on load is a warning, never a blocker.
    #[serde(default)]
    pub game_version: String,
    /// Unix epoch seconds at save time.
    #[serde(default)]
    pub save_timestamp: i64,
}

/// The player's portion of a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub current_room_id: Id,
    #[serde(default)]
    pub inventory_item_ids: Vec<Id>,
    #[serde(default)]
    pub player_flags: BTreeMap<String, String>,
}

/// The mutable world overlay: everything that can diverge from the
/// world definition during play.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorldDynamicState {
    #[serde(default)]
    pub room_item_states: BTreeMap<Id, Vec<Id>>,
    #[serde(default)]
    pub puzzle_solved_states: BTreeMap<Id, bool>,
    #[serde(default)]
    pub npc_instance_states: BTreeMap<Id, NpcInstanceState>,
    #[serde(default)]
    pub global_flag_states: BTreeMap<String, String>,
    /// Exit lock overrides keyed `"roomId_direction"`.
    #[serde(default)]
    pub room_exit_locked_states: BTreeMap<String, bool>,
}

/// Snapshot of one live NPC.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NpcInstanceState {
    pub definition_id: Id,
    pub current_room_id: Id,
    pub current_dialogue_node_id: Id,
    #[serde(default)]
    pub inventory_item_ids: Vec<Id>,
    #[serde(default)]
    pub npc_specific_flags: BTreeMap<String, String>,
}
