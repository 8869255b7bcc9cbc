//! `repl::look` module
//!
//! Handlers for looking around and examining things.

use log::warn;
use textwrap::{fill, termwidth};

use crate::player::Player;
use crate::style::GameStyle;
use crate::world::World;

/// Show the current room in full.
pub fn look_handler(world: &World, player: &Player) {
    match world.room(&player.current_room) {
        Some(room) => room.show(world, player),
        None => {
            warn!("player is in unknown room '{}'", player.current_room);
            println!("{}", "Error: Current room not found.".error_style());
        },
    }
}

/// Describe one thing by name: carried items first, then items in the room,
/// then NPCs, then the room itself via the keywords room/area/here.
pub fn examine_handler(world: &World, player: &Player, target_name: &str) {
    if target_name.is_empty() {
        println!("Examine what?");
        return;
    }

    if let Some(item_id) = player.find_item_by_name(world, target_name) {
        if let Some(item) = world.item(&item_id) {
            println!("{}", fill(&item.description, termwidth()).description_style());
        }
        return;
    }

    if let Some(item_id) = world.find_item_in_room(target_name, &player.current_room) {
        if let Some(item) = world.item(&item_id) {
            println!("{}", fill(&item.description, termwidth()).description_style());
        }
        return;
    }

    if let Some(npc_id) = world.find_npc_in_room(target_name, &player.current_room) {
        if let Some(def) = world.npc_def(&npc_id) {
            if def.presence_description.is_empty() {
                println!("{} is here.", def.name.npc_style());
            } else {
                println!("{}", def.presence_description.npc_style());
            }
        }
        return;
    }

    if matches!(target_name, "room" | "area" | "here") {
        look_handler(world, player);
        return;
    }

    println!("You don't see anything like that here.");
}
