use std::collections::BTreeMap;
use std::fmt;

use crate::docs::*;

/// Advisory finding from cross-reference validation of a `GameDocument`.
///
/// These are printed at startup and never abort a load; a dangling
/// reference degrades to a no-op at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    MissingReference { kind: &'static str, id: String, context: String },
    InvalidValue { context: String },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::MissingReference { kind, id, context } => {
                write!(f, "missing {kind} '{id}' ({context})")
            },
            ValidationWarning::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
        }
    }
}

/// Validate cross-references in a world-definition document.
pub fn validate_document(doc: &GameDocument) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if doc.player_start.start_room_id.trim().is_empty() {
        warnings.push(ValidationWarning::InvalidValue {
            context: "playerStart.startRoomId missing".to_string(),
        });
    } else {
        check_ref(
            "room",
            &doc.player_start.start_room_id,
            &doc.rooms,
            "playerStart.startRoomId",
            &mut warnings,
        );
    }
    for item_id in &doc.player_start.initial_inventory {
        check_ref("item", item_id, &doc.items, "playerStart.initialInventory", &mut warnings);
    }

    for (room_id, room) in &doc.rooms {
        for item_id in &room.item_ids {
            check_ref("item", item_id, &doc.items, &format!("room '{room_id}' itemIds"), &mut warnings);
        }
        for npc_id in &room.npc_ids {
            check_ref("npc", npc_id, &doc.npcs, &format!("room '{room_id}' npcIds"), &mut warnings);
        }
        for (direction, exit) in &room.exits {
            let context = format!("room '{room_id}' exit '{direction}'");
            check_ref("room", &exit.target_room_id, &doc.rooms, &context, &mut warnings);
            if let Some(item_id) = &exit.required_item_id_to_unlock {
                check_ref("item", item_id, &doc.items, &context, &mut warnings);
            }
            if let Some(puzzle_id) = &exit.required_puzzle_id_solved {
                check_ref("puzzle", puzzle_id, &doc.puzzles, &context, &mut warnings);
            }
            if exit.required_flag_name.is_some() != exit.required_flag_value.is_some() {
                warnings.push(ValidationWarning::InvalidValue {
                    context: format!("{context} requires flag name and value together"),
                });
            }
        }
    }

    for (item_id, item) in &doc.items {
        for partner_id in &item.can_be_combined_with {
            check_ref("item", partner_id, &doc.items, &format!("item '{item_id}' canBeCombinedWith"), &mut warnings);
        }
        if let Some(result_id) = &item.combination_result_item_id {
            check_ref("item", result_id, &doc.items, &format!("item '{item_id}' combinationResultItemId"), &mut warnings);
        }
        for effect in item.use_effects.values() {
            if let Some(puzzle_id) = &effect.triggers_puzzle_id {
                check_ref("puzzle", puzzle_id, &doc.puzzles, &format!("item '{item_id}' useEffects"), &mut warnings);
            }
        }
    }

    for (npc_id, npc) in &doc.npcs {
        for item_id in &npc.initial_item_ids {
            check_ref("item", item_id, &doc.items, &format!("npc '{npc_id}' initialItemIds"), &mut warnings);
        }
        if !npc.dialogue_tree.contains_key(&npc.initial_dialogue_node_id) {
            warnings.push(ValidationWarning::MissingReference {
                kind: "dialogue node",
                id: npc.initial_dialogue_node_id.clone(),
                context: format!("npc '{npc_id}' initialDialogueNodeId"),
            });
        }
        for (node_id, node) in &npc.dialogue_tree {
            let context = format!("npc '{npc_id}' dialogue node '{node_id}'");
            if let Some(item_id) = &node.gives_item_id {
                check_ref("item", item_id, &doc.items, &context, &mut warnings);
            }
            for response in &node.responses {
                if !npc.dialogue_tree.contains_key(&response.target_node_id) {
                    warnings.push(ValidationWarning::MissingReference {
                        kind: "dialogue node",
                        id: response.target_node_id.clone(),
                        context: context.clone(),
                    });
                }
                if let Some(item_id) = &response.requires_player_item {
                    check_ref("item", item_id, &doc.items, &context, &mut warnings);
                }
            }
        }
    }

    for (puzzle_id, puzzle) in &doc.puzzles {
        let context = format!("puzzle '{puzzle_id}'");
        if let Some(condition) = &puzzle.solution_condition {
            if let Some(item_id) = &condition.required_item_id {
                check_ref("item", item_id, &doc.items, &context, &mut warnings);
            }
            if let Some(npc_id) = &condition.required_npc_id {
                check_ref("npc", npc_id, &doc.npcs, &context, &mut warnings);
            }
        }
        for effect in &puzzle.effects_on_solve {
            if let Some(room_id) = &effect.target_room_id {
                check_ref("room", room_id, &doc.rooms, &context, &mut warnings);
            }
            if let Some(item_id) = &effect.item_id_to_spawn_or_remove {
                check_ref("item", item_id, &doc.items, &context, &mut warnings);
            }
            if let Some(npc_id) = &effect.npc_id_to_move {
                check_ref("npc", npc_id, &doc.npcs, &context, &mut warnings);
            }
            if let Some(room_id) = &effect.destination_room_id {
                check_ref("room", room_id, &doc.rooms, &context, &mut warnings);
            }
        }
    }

    for (index, end) in doc.end_conditions.iter().enumerate() {
        let context = format!("endConditions[{index}]");
        for criterion in &end.criteria {
            match criterion.kind.as_str() {
                "PLAYER_HAS_ITEM" => {
                    if let Some(item_id) = &criterion.item_id {
                        check_ref("item", item_id, &doc.items, &context, &mut warnings);
                    }
                },
                // PUZZLE_SOLVED reuses the itemId field for the puzzle id.
                "PUZZLE_SOLVED" => {
                    if let Some(puzzle_id) = &criterion.item_id {
                        check_ref("puzzle", puzzle_id, &doc.puzzles, &context, &mut warnings);
                    }
                },
                "PLAYER_IN_ROOM" => {
                    if let Some(room_id) = &criterion.room_id {
                        check_ref("room", room_id, &doc.rooms, &context, &mut warnings);
                    }
                },
                _ => {},
            }
        }
    }

    warnings
}

fn check_ref<V>(
    kind: &'static str,
    id: &str,
    known: &BTreeMap<Id, V>,
    context: &str,
    warnings: &mut Vec<ValidationWarning>,
) {
    if !known.contains_key(id) {
        warnings.push(ValidationWarning::MissingReference {
            kind,
            id: id.to_string(),
            context: context.to_string(),
        });
    }
}
