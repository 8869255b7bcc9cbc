//! `repl::movement` module
//!
//! Handler for commands that change player location.

use log::{info, warn};

use crate::player::Player;
use crate::room::exit_key;
use crate::style::GameStyle;
use crate::world::World;

/// Move the player through an exit of the current room, if it is passable.
///
/// Directions resolve by exact key into the room's exit map; fuzzy matching
/// applies to things, not directions.
pub fn go_handler(world: &World, player: &mut Player, direction: &str) {
    if direction.is_empty() {
        println!("Go where? Please specify a direction.");
        return;
    }

    let Some(room) = world.room(&player.current_room) else {
        warn!("player is in unknown room '{}'", player.current_room);
        println!("{}", "Error: Current room not found.".error_style());
        return;
    };

    let Some(exit) = room.exits.get(direction) else {
        println!("There is no exit in that direction.");
        return;
    };

    let key = exit_key(&room.id, direction);
    if exit.is_locked(&key, player, world) {
        match &exit.locked_message {
            Some(message) if !message.is_empty() => println!("{}", message.exit_locked_style()),
            _ => println!("You can't go that way."),
        }
        info!("player blocked by locked exit '{key}'");
        return;
    }

    let destination = exit.target_room_id.clone();
    let unlocked_message = exit.unlocked_message.clone();

    player.current_room = destination.clone();
    info!("player moved {direction} to '{destination}'");

    if let Some(message) = unlocked_message {
        if !message.is_empty() {
            println!("{}", message.success_style());
        }
    }

    match world.room(&destination) {
        Some(new_room) => new_room.show(world, player),
        None => {
            warn!("exit '{key}' leads to unknown room '{destination}'");
            println!("{}", "Error: Current room not found.".error_style());
        },
    }
}
