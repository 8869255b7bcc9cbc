//! Loading: document in, typed world out.
//!
//! The raw document's string-tagged unions (conditions, effects, criteria,
//! use-effect keys, `"name=value"` flag writes) are converted to the
//! engine's sum types here, at the boundary. Anything malformed or unknown
//! is reported as an advisory warning and dropped from the compiled world;
//! nothing no-ops silently at runtime. Only an unreadable or unparseable
//! document is a hard error.

use std::path::Path;

use anyhow::{Context, Result};
use tale_data as data;

use crate::endings::{Criterion, EndCondition, EndKind};
use crate::item::{Item, UseEffect, UseTarget};
use crate::npc::{DialogueNode, NpcDef, NpcInstance, ResponseOption};
use crate::player::Player;
use crate::puzzle::{Effect, Puzzle, SolutionCondition};
use crate::room::{Exit, Room, exit_key};
use crate::world::{FlagPair, GameInfo, World, WorldState};

/// A fully loaded session, plus the advisory warnings gathered while
/// validating and converting the document.
pub struct LoadedGame {
    pub world: World,
    pub player: Player,
    pub warnings: Vec<String>,
}

/// Load a world document from disk and compile it.
pub fn load_world(path: &Path) -> Result<LoadedGame> {
    let doc = data::load_game_document(path)
        .with_context(|| format!("loading world document '{}'", path.display()))?;
    Ok(build_game(doc))
}

/// Compile a parsed document into a runnable world and starting player.
pub fn build_game(doc: data::GameDocument) -> LoadedGame {
    let mut warnings: Vec<String> = data::validate_document(&doc)
        .iter()
        .map(ToString::to_string)
        .collect();

    let mut world = World {
        info: GameInfo {
            title: doc.game_info.game_title.clone(),
            version: doc.game_info.version.clone(),
            welcome_message: doc.game_info.welcome_message.clone(),
            help_text: doc.game_info.help_text.clone(),
        },
        ..World::default()
    };

    for (id, raw) in &doc.items {
        let item = convert_item(id, raw, &mut warnings);
        world.items.insert(id.clone(), item);
    }
    for (id, raw) in &doc.rooms {
        let room = convert_room(id, raw);
        world.rooms.insert(id.clone(), room);
    }
    for (id, raw) in &doc.npcs {
        let def = convert_npc(id, raw, &mut warnings);
        world.npc_defs.insert(id.clone(), def);
    }
    for (id, raw) in &doc.puzzles {
        if let Some(puzzle) = convert_puzzle(id, raw, &mut warnings) {
            world.puzzles.insert(id.clone(), puzzle);
        }
    }
    for (index, raw) in doc.end_conditions.iter().enumerate() {
        if let Some(end) = convert_end_condition(index, raw, &mut warnings) {
            world.end_conditions.push(end);
        }
    }

    world.state = initial_state(&doc, &world, &mut warnings);

    let player = Player::new(
        doc.player_start.start_room_id.clone(),
        doc.player_start.initial_inventory.clone(),
    );

    LoadedGame { world, player, warnings }
}

/// Seed the mutable overlay from the definitions: room item lists, unsolved
/// puzzles, NPC instances placed in the first room that lists them, default
/// global flags, and exit locks from each exit's initial state.
fn initial_state(doc: &data::GameDocument, world: &World, warnings: &mut Vec<String>) -> WorldState {
    let mut state = WorldState::default();

    for (room_id, room) in &doc.rooms {
        state.room_items.insert(room_id.clone(), room.item_ids.clone());
        for (direction, exit) in &room.exits {
            state
                .exit_overrides
                .insert(exit_key(room_id, direction), exit.is_initially_locked);
        }
    }

    for puzzle_id in world.puzzles.keys() {
        state.puzzles_solved.insert(puzzle_id.clone(), false);
    }

    for (npc_id, def) in &doc.npcs {
        let placement = doc
            .rooms
            .iter()
            .find(|(_, room)| room.npc_ids.iter().any(|id| id == npc_id))
            .map(|(room_id, _)| room_id.clone());
        let Some(start_room) = placement else {
            warnings.push(format!("npc '{npc_id}' is not placed in any room"));
            continue;
        };
        state.npcs.insert(
            npc_id.clone(),
            NpcInstance {
                definition_id: npc_id.clone(),
                current_room: start_room,
                current_node: def.initial_dialogue_node_id.clone(),
                inventory: def.initial_item_ids.clone(),
                flags: def.initial_npc_flags.clone().into_iter().collect(),
            },
        );
    }

    state.global_flags = doc.global_flags.clone().into_iter().collect();
    state
}

fn convert_item(id: &str, raw: &data::ItemDoc, warnings: &mut Vec<String>) -> Item {
    let mut item = Item {
        id: id.to_string(),
        name: raw.name.clone(),
        description: raw.description.clone(),
        takeable: raw.takeable,
        combines_with: raw.can_be_combined_with.clone(),
        combination_result: raw.combination_result_item_id.clone(),
        ..Item::default()
    };
    for (key, effect) in &raw.use_effects {
        let Some(target) = convert_use_target(key) else {
            warnings.push(format!("item '{id}': unknown use-effect target '{key}'"));
            continue;
        };
        item.use_effects.insert(
            target,
            UseEffect {
                triggers_puzzle: effect.triggers_puzzle_id.clone(),
                success_message: effect.success_message.clone(),
                failure_message: effect.failure_message.clone(),
                consumes_item: effect.consumes_item,
                sets_flag: flag_halves(&effect.sets_flag_name, &effect.sets_flag_value),
            },
        );
    }
    item
}

/// Use-effect keys are authored `"kind:id"`; the self target carries the
/// item's own id (`"self:<id>"`) and collapses to [`UseTarget::SelfUse`].
fn convert_use_target(key: &str) -> Option<UseTarget> {
    match key.split_once(':') {
        Some(("self", _)) => Some(UseTarget::SelfUse),
        Some(("item", id)) if !id.is_empty() => Some(UseTarget::Item(id.to_string())),
        Some(("npc", id)) if !id.is_empty() => Some(UseTarget::Npc(id.to_string())),
        Some(("puzzle", id)) if !id.is_empty() => Some(UseTarget::Puzzle(id.to_string())),
        None if key == "self" => Some(UseTarget::SelfUse),
        _ => None,
    }
}

fn convert_room(id: &str, raw: &data::RoomDoc) -> Room {
    let mut room = Room {
        id: id.to_string(),
        name: raw.name.clone(),
        base_description: raw.base_description.clone(),
        exits: Default::default(),
    };
    for (direction, exit) in &raw.exits {
        room.exits.insert(
            direction.clone(),
            Exit {
                target_room_id: exit.target_room_id.clone(),
                locked_message: exit.locked_message.clone(),
                unlocked_message: exit.unlocked_message.clone(),
                required_item: exit.required_item_id_to_unlock.clone(),
                required_puzzle: exit.required_puzzle_id_solved.clone(),
                required_flag: flag_halves(&exit.required_flag_name, &exit.required_flag_value),
            },
        );
    }
    room
}

fn convert_npc(id: &str, raw: &data::NpcDoc, warnings: &mut Vec<String>) -> NpcDef {
    let mut def = NpcDef {
        id: id.to_string(),
        name: raw.name.clone(),
        presence_description: raw.presence_description.clone(),
        initial_dialogue_node: raw.initial_dialogue_node_id.clone(),
        initial_items: raw.initial_item_ids.clone(),
        initial_flags: raw.initial_npc_flags.clone().into_iter().collect(),
        ..NpcDef::default()
    };
    for (node_id, node) in &raw.dialogue_tree {
        let context = format!("npc '{id}' node '{node_id}'");
        def.dialogue.insert(
            node_id.clone(),
            DialogueNode {
                text: node.text.clone(),
                gives_item: node.gives_item_id.clone(),
                sets_npc_flag: flag_write(&node.sets_npc_flag, &context, warnings),
                sets_global_flag: flag_write(&node.sets_global_flag, &context, warnings),
                ends_dialogue: node.ends_dialogue,
                responses: node
                    .responses
                    .iter()
                    .map(|response| ResponseOption {
                        text: response.text.clone(),
                        target_node: response.target_node_id.clone(),
                        requires_player_item: response.requires_player_item.clone(),
                        requires_npc_flag: flag_write(&response.requires_npc_flag, &context, warnings),
                        requires_global_flag: flag_write(
                            &response.requires_global_flag,
                            &context,
                            warnings,
                        ),
                    })
                    .collect(),
            },
        );
    }
    def
}

fn convert_puzzle(id: &str, raw: &data::PuzzleDoc, warnings: &mut Vec<String>) -> Option<Puzzle> {
    let Some(raw_condition) = &raw.solution_condition else {
        warnings.push(format!("puzzle '{id}' has no solution condition; dropped"));
        return None;
    };
    let condition = convert_condition(id, raw_condition, warnings)?;
    let effects = raw
        .effects_on_solve
        .iter()
        .filter_map(|effect| convert_effect(id, effect, warnings))
        .collect();
    Some(Puzzle {
        id: id.to_string(),
        description: raw.description.clone(),
        condition,
        success_message: raw.success_message.clone(),
        failure_message: raw.failure_message.clone(),
        already_solved_message: raw.already_solved_message.clone(),
        effects,
        flag_on_solve: flag_halves(&raw.sets_flag_on_solve, &raw.sets_flag_value_on_solve),
    })
}

fn convert_condition(
    puzzle_id: &str,
    raw: &data::ConditionDoc,
    warnings: &mut Vec<String>,
) -> Option<SolutionCondition> {
    let condition = match raw.kind.as_str() {
        "ITEM_USED_ON_TARGET" => match (&raw.required_item_id, &raw.required_target_id) {
            (Some(item_id), Some(target_id)) => Some(SolutionCondition::ItemUsedOnTarget {
                item_id: item_id.clone(),
                target_id: target_id.clone(),
            }),
            _ => None,
        },
        "NPC_STATE_REACHED" => match (
            &raw.required_npc_id,
            flag_halves(&raw.required_npc_flag, &raw.required_npc_flag_value),
        ) {
            (Some(npc_id), Some(flag)) => Some(SolutionCondition::NpcStateReached {
                npc_id: npc_id.clone(),
                flag,
            }),
            _ => None,
        },
        "GLOBAL_FLAG_SET" => {
            flag_halves(&raw.required_global_flag, &raw.required_global_flag_value)
                .map(|flag| SolutionCondition::GlobalFlagSet { flag })
        },
        "PLAYER_HAS_ITEM" => raw
            .required_item_id
            .clone()
            .map(|item_id| SolutionCondition::PlayerHasItem { item_id }),
        unknown => {
            warnings.push(format!(
                "puzzle '{puzzle_id}': unknown condition type '{unknown}'; puzzle dropped"
            ));
            return None;
        },
    };
    if condition.is_none() {
        warnings.push(format!(
            "puzzle '{puzzle_id}': condition '{}' is missing required fields; puzzle dropped",
            raw.kind
        ));
    }
    condition
}

fn convert_effect(
    puzzle_id: &str,
    raw: &data::EffectDoc,
    warnings: &mut Vec<String>,
) -> Option<Effect> {
    let effect = match raw.kind.as_str() {
        "UNLOCK_EXIT" => match (&raw.target_room_id, &raw.exit_direction) {
            (Some(room_id), Some(direction)) => Some(Effect::UnlockExit {
                room_id: room_id.clone(),
                direction: direction.clone(),
            }),
            _ => None,
        },
        "LOCK_EXIT" => match (&raw.target_room_id, &raw.exit_direction) {
            (Some(room_id), Some(direction)) => Some(Effect::LockExit {
                room_id: room_id.clone(),
                direction: direction.clone(),
            }),
            _ => None,
        },
        "SPAWN_ITEM" => match (&raw.target_room_id, &raw.item_id_to_spawn_or_remove) {
            (Some(room_id), Some(item_id)) => Some(Effect::SpawnItem {
                room_id: room_id.clone(),
                item_id: item_id.clone(),
            }),
            _ => None,
        },
        "REMOVE_ITEM" => match (&raw.target_room_id, &raw.item_id_to_spawn_or_remove) {
            (Some(room_id), Some(item_id)) => Some(Effect::RemoveItem {
                room_id: room_id.clone(),
                item_id: item_id.clone(),
            }),
            _ => None,
        },
        "MOVE_NPC" => match (&raw.npc_id_to_move, &raw.destination_room_id) {
            (Some(npc_id), Some(room_id)) => Some(Effect::MoveNpc {
                npc_id: npc_id.clone(),
                room_id: room_id.clone(),
            }),
            _ => None,
        },
        "SET_FLAG" => flag_halves(&raw.flag_to_set, &raw.flag_value)
            .map(|flag| Effect::SetFlag { flag }),
        unknown => {
            warnings.push(format!(
                "puzzle '{puzzle_id}': unknown effect type '{unknown}'; effect dropped"
            ));
            return None;
        },
    };
    if effect.is_none() {
        warnings.push(format!(
            "puzzle '{puzzle_id}': effect '{}' is missing required fields; effect dropped",
            raw.kind
        ));
    }
    effect
}

fn convert_end_condition(
    index: usize,
    raw: &data::EndConditionDoc,
    warnings: &mut Vec<String>,
) -> Option<EndCondition> {
    let kind = match raw.kind.to_uppercase().as_str() {
        "WIN" => EndKind::Win,
        "LOSE" => EndKind::Lose,
        unknown => {
            warnings.push(format!(
                "endConditions[{index}]: unknown type '{unknown}'; condition dropped"
            ));
            return None;
        },
    };
    let mut criteria = Vec::new();
    for raw_criterion in &raw.criteria {
        // A condition with an unusable criterion could never fire as a
        // whole, so the entire condition is dropped rather than loosened.
        let Some(criterion) = convert_criterion(index, raw_criterion, warnings) else {
            return None;
        };
        criteria.push(criterion);
    }
    Some(EndCondition {
        kind,
        message: raw.message.clone(),
        criteria,
    })
}

fn convert_criterion(
    index: usize,
    raw: &data::CriterionDoc,
    warnings: &mut Vec<String>,
) -> Option<Criterion> {
    let criterion = match raw.kind.as_str() {
        "PLAYER_HAS_ITEM" => raw
            .item_id
            .clone()
            .map(|item_id| Criterion::PlayerHasItem { item_id }),
        "PLAYER_IN_ROOM" => raw
            .room_id
            .clone()
            .map(|room_id| Criterion::PlayerInRoom { room_id }),
        "FLAG_SET" => {
            flag_halves(&raw.flag_name, &raw.flag_value).map(|flag| Criterion::FlagSet { flag })
        },
        // the authored format carries the puzzle id in itemId
        "PUZZLE_SOLVED" => raw
            .item_id
            .clone()
            .map(|puzzle_id| Criterion::PuzzleSolved { puzzle_id }),
        unknown => {
            warnings.push(format!(
                "endConditions[{index}]: unknown criterion type '{unknown}'; condition dropped"
            ));
            return None;
        },
    };
    if criterion.is_none() {
        warnings.push(format!(
            "endConditions[{index}]: criterion '{}' is missing required fields; condition dropped",
            raw.kind
        ));
    }
    criterion
}

/// Combine separately-authored flag name/value fields. One-sided pairs are
/// reported by document validation; here they simply collapse to `None`.
fn flag_halves(name: &Option<String>, value: &Option<String>) -> Option<FlagPair> {
    match (name, value) {
        (Some(name), Some(value)) => Some(FlagPair::new(name, value)),
        _ => None,
    }
}

/// Parse an authored `"name=value"` flag write.
fn flag_write(raw: &Option<String>, context: &str, warnings: &mut Vec<String>) -> Option<FlagPair> {
    let raw = raw.as_ref()?;
    let parsed = FlagPair::parse(raw);
    if parsed.is_none() {
        warnings.push(format!("{context}: malformed flag expression '{raw}'"));
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_room_doc() -> data::GameDocument {
        let mut doc = data::GameDocument::default();
        doc.game_info.game_title = "Escape".to_string();
        doc.game_info.version = "1.0".to_string();
        doc.game_info.welcome_message = "You wake in a cell.".to_string();
        doc.game_info.help_text = "Try 'go north'.".to_string();
        doc.player_start.start_room_id = "cell".to_string();
        doc.player_start.initial_inventory = vec!["spoon".to_string()];

        let mut cell = data::RoomDoc {
            name: "Cell".to_string(),
            base_description: "A damp stone cell.".to_string(),
            item_ids: vec!["key".to_string()],
            npc_ids: vec!["guard".to_string()],
            ..data::RoomDoc::default()
        };
        cell.exits.insert(
            "north".to_string(),
            data::ExitDoc {
                target_room_id: "hall".to_string(),
                is_initially_locked: true,
                ..data::ExitDoc::default()
            },
        );
        doc.rooms.insert("cell".to_string(), cell);
        doc.rooms.insert(
            "hall".to_string(),
            data::RoomDoc {
                name: "Hall".to_string(),
                ..data::RoomDoc::default()
            },
        );

        doc.items.insert(
            "key".to_string(),
            data::ItemDoc {
                name: "rusty key".to_string(),
                takeable: true,
                ..data::ItemDoc::default()
            },
        );
        doc.items.insert(
            "spoon".to_string(),
            data::ItemDoc {
                name: "bent spoon".to_string(),
                takeable: true,
                ..data::ItemDoc::default()
            },
        );

        doc.npcs.insert(
            "guard".to_string(),
            data::NpcDoc {
                name: "Guard".to_string(),
                initial_dialogue_node_id: "start".to_string(),
                dialogue_tree: [("start".to_string(), data::DialogueNodeDoc::default())]
                    .into_iter()
                    .collect(),
                initial_npc_flags: [("mood".to_string(), "bored".to_string())]
                    .into_iter()
                    .collect(),
                ..data::NpcDoc::default()
            },
        );

        doc.global_flags
            .insert("alarm".to_string(), "off".to_string());
        doc
    }

    #[test]
    fn builds_world_and_seeds_overlay() {
        let game = build_game(two_room_doc());
        assert!(game.warnings.is_empty(), "unexpected warnings: {:?}", game.warnings);

        assert_eq!(game.world.info.title, "Escape");
        assert_eq!(game.world.info.welcome_message, "You wake in a cell.");
        assert_eq!(game.world.info.help_text, "Try 'go north'.");
        assert_eq!(game.player.current_room, "cell");
        assert_eq!(game.player.inventory, vec!["spoon".to_string()]);
        assert_eq!(game.world.items_in_room("cell"), ["key".to_string()]);
        assert_eq!(game.world.exit_override("cell_north"), Some(true));
        assert_eq!(game.world.global_flag("alarm"), Some("off"));

        let guard = &game.world.state.npcs["guard"];
        assert_eq!(guard.current_room, "cell");
        assert_eq!(guard.current_node, "start");
        assert_eq!(guard.flag("mood"), Some("bored"));
    }

    #[test]
    fn unplaced_npc_is_warned_and_skipped() {
        let mut doc = two_room_doc();
        doc.rooms.get_mut("cell").unwrap().npc_ids.clear();
        let game = build_game(doc);
        assert!(!game.world.state.npcs.contains_key("guard"));
        assert!(game.warnings.iter().any(|w| w.contains("not placed")));
    }

    #[test]
    fn use_target_keys_parse_by_kind() {
        assert_eq!(convert_use_target("self:key"), Some(UseTarget::SelfUse));
        assert_eq!(convert_use_target("item:lock"), Some(UseTarget::Item("lock".into())));
        assert_eq!(convert_use_target("npc:guard"), Some(UseTarget::Npc("guard".into())));
        assert_eq!(
            convert_use_target("puzzle:gate"),
            Some(UseTarget::Puzzle("gate".into()))
        );
        assert_eq!(convert_use_target("door"), None);
        assert_eq!(convert_use_target("item:"), None);
    }

    #[test]
    fn unknown_condition_type_drops_puzzle_with_warning() {
        let mut doc = two_room_doc();
        doc.puzzles.insert(
            "gate".to_string(),
            data::PuzzleDoc {
                solution_condition: Some(data::ConditionDoc {
                    kind: "SOLVE_BY_VIBES".to_string(),
                    ..data::ConditionDoc::default()
                }),
                ..data::PuzzleDoc::default()
            },
        );
        let game = build_game(doc);
        assert!(game.world.puzzles.is_empty());
        assert!(game.warnings.iter().any(|w| w.contains("SOLVE_BY_VIBES")));
    }

    #[test]
    fn puzzle_solved_criterion_remaps_item_id() {
        let mut doc = two_room_doc();
        doc.end_conditions.push(data::EndConditionDoc {
            kind: "WIN".to_string(),
            message: "Done.".to_string(),
            criteria: vec![data::CriterionDoc {
                kind: "PUZZLE_SOLVED".to_string(),
                item_id: Some("gate".to_string()),
                ..data::CriterionDoc::default()
            }],
        });
        doc.puzzles.insert(
            "gate".to_string(),
            data::PuzzleDoc {
                solution_condition: Some(data::ConditionDoc {
                    kind: "PLAYER_HAS_ITEM".to_string(),
                    required_item_id: Some("key".to_string()),
                    ..data::ConditionDoc::default()
                }),
                ..data::PuzzleDoc::default()
            },
        );

        let game = build_game(doc);
        assert_eq!(
            game.world.end_conditions[0].criteria,
            vec![Criterion::PuzzleSolved {
                puzzle_id: "gate".to_string()
            }]
        );
    }

    #[test]
    fn malformed_dialogue_flag_write_is_warned() {
        let mut doc = two_room_doc();
        doc.npcs
            .get_mut("guard")
            .unwrap()
            .dialogue_tree
            .get_mut("start")
            .unwrap()
            .sets_npc_flag = Some("no_equals_here".to_string());

        let game = build_game(doc);
        let node = &game.world.npc_defs["guard"].dialogue["start"];
        assert!(node.sets_npc_flag.is_none());
        assert!(game.warnings.iter().any(|w| w.contains("no_equals_here")));
    }
}
