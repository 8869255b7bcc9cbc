//! The interpreter's read-eval-print loop.
//!
//! [`run_repl`] owns the prompt cycle: read a line, parse it, dispatch to a
//! handler, then check end conditions. Handlers live in the submodules by
//! verb family.

pub mod input;
pub mod item;
pub mod look;
pub mod movement;
pub mod npc;
pub mod system;

use anyhow::Result;
use log::info;
use textwrap::{fill, termwidth};

use crate::command::{ParsedCommand, parse_command};
use crate::endings::{EndKind, check_end_conditions};
use crate::player::Player;
use crate::repl::input::{InputEvent, InputManager};
use crate::style::GameStyle;
use crate::world::World;

/// Whether the loop should keep running after a command.
pub enum ReplControl {
    Continue,
    Quit,
}

/// Run the interpreter loop until the player quits, input ends, or an end
/// condition fires.
pub fn run_repl(world: &mut World, player: &mut Player) -> Result<()> {
    let mut input = InputManager::new();

    loop {
        let line = match input.read_line("\n> ")? {
            InputEvent::Line(line) => line,
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                println!("Command canceled.");
                continue;
            },
        };

        match dispatch_command(world, player, &line, &mut input)? {
            ReplControl::Continue => {},
            ReplControl::Quit => break,
        }

        if let Some(ending) = check_end_conditions(world, player) {
            let message = fill(&ending.message, termwidth());
            println!("\n{}", message.description_style());
            match ending.kind {
                EndKind::Win => {
                    println!("{}", "Congratulations! You have won the game!".success_style());
                },
                EndKind::Lose => println!("{}", "Game over.".error_style()),
            }
            info!("game ended: {:?}", ending.kind);
            break;
        }
    }

    println!("\nThanks for playing! Goodbye!");
    Ok(())
}

/// Parse one raw line and route it to the matching handler.
pub fn dispatch_command(
    world: &mut World,
    player: &mut Player,
    raw: &str,
    input: &mut InputManager,
) -> Result<ReplControl> {
    let command = parse_command(raw);
    info!("dispatching: {command:?}");

    match command.verb.as_str() {
        "" => println!("Please enter a command."),
        "go" | "move" | "walk" => movement::go_handler(world, player, &command.direct_object),
        "take" | "get" | "grab" | "pick" => {
            item::take_handler(world, player, &command.direct_object);
        },
        "drop" => item::drop_handler(world, player, &command.direct_object),
        "use" => {
            item::use_handler(world, player, &command.direct_object, &command.indirect_object);
        },
        "combine" => item::combine_handler(world, player, &command.direct_object),
        "talk" => npc::talk_handler(world, player, &command.direct_object, input)?,
        "examine" | "look" | "inspect" => match examine_target(&command) {
            Some(target) => look::examine_handler(world, player, target),
            None => look::look_handler(world, player),
        },
        "inventory" | "i" => player.show_inventory(world),
        "save" => system::save_handler(world, player, &command.direct_object),
        "load" => system::load_handler(world, player, &command.direct_object),
        "help" | "?" => system::help_handler(world),
        "quit" | "exit" => return system::quit_handler(world, input),
        _ => println!("I don't understand that command. Type 'help' for a list of commands."),
    }

    Ok(ReplControl::Continue)
}

/// What an examine-family verb should inspect: only the direct object
/// counts, so "look in box" re-renders the room rather than guessing at the
/// indirect object.
fn examine_target(command: &ParsedCommand) -> Option<&str> {
    if command.direct_object.is_empty() {
        None
    } else {
        Some(&command.direct_object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn examine_uses_only_the_direct_object() {
        assert_eq!(examine_target(&parse_command("examine statue")), Some("statue"));
        assert_eq!(examine_target(&parse_command("look at statue")), Some("statue"));
    }

    #[test]
    fn look_with_only_an_indirect_object_renders_the_room() {
        let command = parse_command("look in box");
        assert_eq!(command.indirect_object, "box");
        assert_eq!(examine_target(&command), None);
    }
}
