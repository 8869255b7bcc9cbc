use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable author-assigned identifier used across document references.
pub type Id = String;

/// Top-level world-definition document loaded by the engine.
///
/// Field names follow the authored JSON (camelCase). Maps are keyed by id;
/// iteration order of `BTreeMap` keeps name lookups and listings stable.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GameDocument {
    pub game_info: GameInfoDoc,
    pub player_start: PlayerStartDoc,
    #[serde(default)]
    pub rooms: BTreeMap<Id, RoomDoc>,
    #[serde(default)]
    pub items: BTreeMap<Id, ItemDoc>,
    #[serde(default)]
    pub npcs: BTreeMap<Id, NpcDoc>,
    #[serde(default)]
    pub puzzles: BTreeMap<Id, PuzzleDoc>,
    #[serde(default)]
    pub end_conditions: Vec<EndConditionDoc>,
    #[serde(default)]
    pub global_flags: BTreeMap<String, String>,
}

/// Game-level metadata and banner text.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GameInfoDoc {
    #[serde(default)]
    pub game_title: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub welcome_message: String,
    #[serde(default)]
    pub help_text: String,
}

/// Where the player begins and what they carry.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStartDoc {
    pub start_room_id: Id,
    #[serde(default)]
    pub initial_inventory: Vec<Id>,
}

/// Room definition: prose plus initial contents and the exit map.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RoomDoc {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub base_description: String,
    #[serde(default)]
    pub item_ids: Vec<Id>,
    #[serde(default)]
    pub npc_ids: Vec<Id>,
    #[serde(default)]
    pub exits: BTreeMap<String, ExitDoc>,
}

/// Exit: destination plus lock configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExitDoc {
    pub target_room_id: Id,
    #[serde(default)]
    pub is_initially_locked: bool,
    #[serde(default)]
    pub locked_message: Option<String>,
    #[serde(default)]
    pub unlocked_message: Option<String>,
    #[serde(default)]
    pub required_item_id_to_unlock: Option<Id>,
    #[serde(default)]
    pub required_puzzle_id_solved: Option<Id>,
    #[serde(default)]
    pub required_flag_name: Option<String>,
    #[serde(default)]
    pub required_flag_value: Option<String>,
}

/// Item definition, including its per-target use effects and combinations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItemDoc {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub takeable: bool,
    #[serde(default)]
    pub can_be_combined_with: Vec<Id>,
    #[serde(default)]
    pub combination_result_item_id: Option<Id>,
    /// Keyed by use-target tag: `"self"`, `"item:<id>"`, `"npc:<id>"`,
    /// or `"puzzle:<id>"`.
    #[serde(default)]
    pub use_effects: BTreeMap<String, UseEffectDoc>,
}

/// What happens when an item is used on a particular target.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UseEffectDoc {
    #[serde(default)]
    pub triggers_puzzle_id: Option<Id>,
    #[serde(default)]
    pub success_message: Option<String>,
    #[serde(default)]
    pub failure_message: Option<String>,
    #[serde(default)]
    pub consumes_item: bool,
    #[serde(default)]
    pub sets_flag_name: Option<String>,
    #[serde(default)]
    pub sets_flag_value: Option<String>,
}

/// NPC definition: presence prose, dialogue tree, and initial state.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NpcDoc {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub presence_description: String,
    pub initial_dialogue_node_id: Id,
    #[serde(default)]
    pub dialogue_tree: BTreeMap<Id, DialogueNodeDoc>,
    #[serde(default)]
    pub initial_item_ids: Vec<Id>,
    #[serde(default)]
    pub initial_npc_flags: BTreeMap<String, String>,
}

/// Node of a dialogue tree: spoken text, side effects, and responses.
///
/// `sets_npc_flag` / `sets_global_flag` are authored as `"name=value"`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DialogueNodeDoc {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub responses: Vec<ResponseOptionDoc>,
    #[serde(default)]
    pub gives_item_id: Option<Id>,
    #[serde(default)]
    pub sets_npc_flag: Option<String>,
    #[serde(default)]
    pub sets_global_flag: Option<String>,
    #[serde(default)]
    pub ends_dialogue: bool,
}

/// Player response option with optional visibility requirements.
///
/// Flag requirements are authored as `"name=value"`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResponseOptionDoc {
    #[serde(default)]
    pub text: String,
    pub target_node_id: Id,
    #[serde(default)]
    pub requires_player_item: Option<Id>,
    #[serde(default)]
    pub requires_npc_flag: Option<String>,
    #[serde(default)]
    pub requires_global_flag: Option<String>,
}

/// Puzzle definition: one solution condition, messages, and solve effects.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleDoc {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub solution_condition: Option<ConditionDoc>,
    #[serde(default)]
    pub success_message: Option<String>,
    #[serde(default)]
    pub failure_message: Option<String>,
    #[serde(default)]
    pub already_solved_message: Option<String>,
    #[serde(default)]
    pub effects_on_solve: Vec<EffectDoc>,
    #[serde(default)]
    pub sets_flag_on_solve: Option<String>,
    #[serde(default)]
    pub sets_flag_value_on_solve: Option<String>,
}

/// Raw, tag-discriminated solution condition. The engine converts this
/// into a typed condition at load time and warns on unknown tags.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConditionDoc {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub required_item_id: Option<Id>,
    #[serde(default)]
    pub required_target_id: Option<Id>,
    #[serde(default)]
    pub required_npc_id: Option<Id>,
    #[serde(default)]
    pub required_npc_flag: Option<String>,
    #[serde(default)]
    pub required_npc_flag_value: Option<String>,
    #[serde(default)]
    pub required_global_flag: Option<String>,
    #[serde(default)]
    pub required_global_flag_value: Option<String>,
}

/// Raw, tag-discriminated puzzle solve effect.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EffectDoc {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub target_room_id: Option<Id>,
    #[serde(default)]
    pub exit_direction: Option<String>,
    #[serde(default)]
    pub item_id_to_spawn_or_remove: Option<Id>,
    #[serde(default)]
    pub npc_id_to_move: Option<Id>,
    #[serde(default)]
    pub destination_room_id: Option<Id>,
    #[serde(default)]
    pub flag_to_set: Option<String>,
    #[serde(default)]
    pub flag_value: Option<String>,
}

/// Win/lose declaration: every listed criterion must hold.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EndConditionDoc {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub criteria: Vec<CriterionDoc>,
}

/// Raw, tag-discriminated end-condition criterion.
///
/// `PUZZLE_SOLVED` criteria carry the puzzle id in `item_id`; the authored
/// format reuses that field and the engine remaps it at load time.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CriterionDoc {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub item_id: Option<Id>,
    #[serde(default)]
    pub room_id: Option<Id>,
    #[serde(default)]
    pub flag_name: Option<String>,
    #[serde(default)]
    pub flag_value: Option<String>,
}
