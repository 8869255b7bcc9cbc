//! The snapshot codec: session state to and from save documents.
//!
//! A save captures the player and the world-state overlay only; definitions
//! are reloaded from the world document every session. Slots live under
//! `saves/<name>.json` next to the working directory.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use tale_data::{
    DocumentError, NpcInstanceState, PlayerState, SaveDocument, WorldDynamicState,
    load_save_document, write_save_document,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc2822;

use crate::npc::NpcInstance;
use crate::player::Player;
use crate::world::{World, WorldState};

pub const SAVE_DIR: &str = "saves";

pub fn slot_path(dir: &Path, slot: &str) -> PathBuf {
    dir.join(format!("{slot}.json"))
}

/// Capture the current session as a save document.
pub fn snapshot(world: &World, player: &Player) -> SaveDocument {
    SaveDocument {
        player_state: PlayerState {
            current_room_id: player.current_room.clone(),
            inventory_item_ids: player.inventory.clone(),
            player_flags: player.flags.clone().into_iter().collect(),
        },
        world_dynamic_state: WorldDynamicState {
            room_item_states: world.state.room_items.clone().into_iter().collect(),
            puzzle_solved_states: world.state.puzzles_solved.clone().into_iter().collect(),
            npc_instance_states: world
                .state
                .npcs
                .iter()
                .map(|(id, npc)| {
                    (
                        id.clone(),
                        NpcInstanceState {
                            definition_id: npc.definition_id.clone(),
                            current_room_id: npc.current_room.clone(),
                            current_dialogue_node_id: npc.current_node.clone(),
                            inventory_item_ids: npc.inventory.clone(),
                            npc_specific_flags: npc.flags.clone().into_iter().collect(),
                        },
                    )
                })
                .collect(),
            global_flag_states: world.state.global_flags.clone().into_iter().collect(),
            room_exit_locked_states: world.state.exit_overrides.clone().into_iter().collect(),
        },
        game_version: world.info.version.clone(),
        save_timestamp: OffsetDateTime::now_utc().unix_timestamp(),
    }
}

/// Replace the session state with the snapshot's. Definitions are left
/// untouched.
pub fn restore(world: &mut World, player: &mut Player, doc: &SaveDocument) {
    player.current_room = doc.player_state.current_room_id.clone();
    player.inventory = doc.player_state.inventory_item_ids.clone();
    player.flags = doc.player_state.player_flags.clone().into_iter().collect();

    let dynamic = &doc.world_dynamic_state;
    world.state = WorldState {
        room_items: dynamic.room_item_states.clone().into_iter().collect(),
        puzzles_solved: dynamic.puzzle_solved_states.clone().into_iter().collect(),
        npcs: dynamic
            .npc_instance_states
            .iter()
            .map(|(id, npc)| {
                (
                    id.clone(),
                    NpcInstance {
                        definition_id: npc.definition_id.clone(),
                        current_room: npc.current_room_id.clone(),
                        current_node: npc.current_dialogue_node_id.clone(),
                        inventory: npc.inventory_item_ids.clone(),
                        flags: npc.npc_specific_flags.clone().into_iter().collect(),
                    },
                )
            })
            .collect(),
        global_flags: dynamic.global_flag_states.clone().into_iter().collect(),
        exit_overrides: dynamic.room_exit_locked_states.clone().into_iter().collect(),
    };
}

/// Write the current session to `<dir>/<slot>.json`.
pub fn save_to_dir(
    world: &World,
    player: &Player,
    dir: &Path,
    slot: &str,
) -> Result<PathBuf, DocumentError> {
    fs::create_dir_all(dir).map_err(|source| DocumentError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = slot_path(dir, slot);
    write_save_document(&path, &snapshot(world, player))?;
    info!("saved game to {}", path.display());
    Ok(path)
}

/// Outcome of a successful load.
#[derive(Debug)]
pub struct Restored {
    pub path: PathBuf,
    /// The save's version string when it differs from the running world's.
    pub version_mismatch: Option<String>,
    pub saved_at: i64,
}

/// Load `<dir>/<slot>.json` and restore it into the session. On any error
/// the session is left exactly as it was.
pub fn load_from_dir(
    world: &mut World,
    player: &mut Player,
    dir: &Path,
    slot: &str,
) -> Result<Restored, DocumentError> {
    let path = slot_path(dir, slot);
    let doc = load_save_document(&path)?;
    let version_mismatch = (!doc.game_version.is_empty()
        && doc.game_version != world.info.version)
        .then(|| doc.game_version.clone());
    restore(world, player, &doc);
    info!("restored game from {}", path.display());
    Ok(Restored {
        path,
        version_mismatch,
        saved_at: doc.save_timestamp,
    })
}

/// Human-readable form of a save timestamp, falling back to the raw epoch
/// seconds when out of range.
pub fn format_timestamp(epoch_seconds: i64) -> String {
    OffsetDateTime::from_unix_timestamp(epoch_seconds)
        .ok()
        .and_then(|stamp| stamp.format(&Rfc2822).ok())
        .unwrap_or_else(|| epoch_seconds.to_string())
}
