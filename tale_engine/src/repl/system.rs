//! `repl::system` module
//!
//! Handlers outside the fiction: save, load, help, and quit.

use std::path::Path;

use anyhow::Result;
use log::warn;

use crate::player::Player;
use crate::repl::ReplControl;
use crate::repl::input::{InputEvent, InputManager};
use crate::repl::look::look_handler;
use crate::save::{SAVE_DIR, format_timestamp, load_from_dir, save_to_dir};
use crate::style::GameStyle;
use crate::world::World;

fn slot_or_default(slot: &str) -> &str {
    if slot.is_empty() { "default" } else { slot }
}

/// Save the session to a named slot ("default" when unnamed).
pub fn save_handler(world: &World, player: &Player, slot: &str) {
    let slot = slot_or_default(slot);
    match save_to_dir(world, player, Path::new(SAVE_DIR), slot) {
        Ok(path) => println!("Game saved successfully to {}", path.display()),
        Err(err) => {
            warn!("save to slot '{slot}' failed: {err}");
            println!("{}", format!("Error saving game: {err}").error_style());
        },
    }
}

/// Load a named slot into the session. Errors leave the session as it was;
/// a version mismatch only warns.
pub fn load_handler(world: &mut World, player: &mut Player, slot: &str) {
    let slot = slot_or_default(slot);
    match load_from_dir(world, player, Path::new(SAVE_DIR), slot) {
        Ok(restored) => {
            if let Some(saved_version) = &restored.version_mismatch {
                println!(
                    "Warning: Save file version ({saved_version}) differs from current version ({}).",
                    world.info.version
                );
                println!("Some features may not work as expected.");
            }
            println!(
                "Game loaded successfully from {} (saved {}).",
                restored.path.display(),
                format_timestamp(restored.saved_at)
            );
            look_handler(world, player);
        },
        Err(err) => {
            warn!("load from slot '{slot}' failed: {err}");
            println!("{}", format!("Error loading game: {err}").error_style());
        },
    }
}

/// Print the world's authored help text, or a built-in summary when the
/// document carries none.
pub fn help_handler(world: &World) {
    if world.info.help_text.is_empty() {
        println!("{}", "Commands:".subheading_style());
        println!("  go <direction>            move between rooms");
        println!("  take / drop <item>        pick things up or put them down");
        println!("  use <item> [on <target>]  apply an item to something");
        println!("  combine <item> and <item> join two carried items");
        println!("  talk to <npc>             start a conversation");
        println!("  examine <thing> / look    inspect things or the room");
        println!("  inventory                 list what you carry");
        println!("  save / load [slot]        snapshot or restore the game");
        println!("  quit                      leave the game");
    } else {
        println!("{}", world.info.help_text);
    }
}

/// Confirm and quit. Anything but y/yes keeps playing.
pub fn quit_handler(world: &World, input: &mut InputManager) -> Result<ReplControl> {
    println!("Are you sure you want to quit? (y/n)");
    match input.read_line("\n> ")? {
        InputEvent::Line(line) => {
            let answer = line.trim().to_lowercase();
            if answer == "y" || answer == "yes" {
                println!("Thanks for playing {}!", world.info.title.room_title_style());
                Ok(ReplControl::Quit)
            } else {
                println!("Continuing game.");
                Ok(ReplControl::Continue)
            }
        },
        InputEvent::Eof => Ok(ReplControl::Quit),
        InputEvent::Interrupted => {
            println!("Continuing game.");
            Ok(ReplControl::Continue)
        },
    }
}
