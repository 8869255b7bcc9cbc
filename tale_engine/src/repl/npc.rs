//! `repl::npc` module
//!
//! The talk handler: the blocking prompt loop around the pure dialogue
//! walker. All transition logic lives in [`crate::dialogue`]; this module
//! only prints nodes, lists choices, and reads numbers.

use anyhow::Result;
use log::{info, warn};
use textwrap::{fill, termwidth};

use crate::dialogue::{apply_node_effects, is_terminal, visible_responses};
use crate::npc::ResponseOption;
use crate::player::Player;
use crate::repl::input::{InputEvent, InputManager};
use crate::style::GameStyle;
use crate::world::World;

/// Talk to an NPC in the current room, walking its dialogue tree until a
/// terminal node, an empty choice list, or the player backs out.
pub fn talk_handler(
    world: &mut World,
    player: &mut Player,
    npc_name: &str,
    input: &mut InputManager,
) -> Result<()> {
    if npc_name.is_empty() {
        println!("Talk to whom? Please specify an NPC.");
        return Ok(());
    }
    let Some(npc_id) = world.find_npc_in_room(npc_name, &player.current_room) else {
        println!("There's no one like that here to talk to.");
        return Ok(());
    };
    let Some(def) = world.npc_def(&npc_id).cloned() else {
        warn!("npc instance '{npc_id}' has no definition");
        println!("{}", "Error: NPC definition not found.".error_style());
        return Ok(());
    };

    info!("dialogue started with '{npc_id}'");
    let mut current_node = world
        .state
        .npcs
        .get(&npc_id)
        .map_or_else(|| def.initial_dialogue_node.clone(), |npc| npc.current_node.clone());

    loop {
        let Some(node) = def.dialogue.get(&current_node).cloned() else {
            warn!("npc '{npc_id}' is on missing dialogue node '{current_node}'");
            println!("{}", "Error: Dialogue node not found.".error_style());
            break;
        };

        println!("\n{}: {}", def.name.npc_style(), fill(&node.text, termwidth()).speech_style());

        if let Some(granted_item) = apply_node_effects(world, player, &npc_id, &node) {
            println!("\nYou received: {}", world.item_name(&granted_item).item_style());
        }

        if is_terminal(&node) {
            break;
        }

        let npc_snapshot = match world.state.npcs.get(&npc_id) {
            Some(npc) => npc.clone(),
            None => break,
        };
        let choices: Vec<ResponseOption> = visible_responses(&node, world, player, &npc_snapshot)
            .into_iter()
            .cloned()
            .collect();
        if choices.is_empty() {
            println!("\nThe conversation ends.");
            break;
        }

        println!("\n{}", "Your responses:".subheading_style());
        for (index, choice) in choices.iter().enumerate() {
            println!("{}. {}", index + 1, choice.text);
        }
        println!("0. End conversation");

        let Some(choice) = read_choice(input, choices.len())? else {
            break;
        };
        if choice == 0 {
            println!("\nYou end the conversation.");
            break;
        }

        current_node = choices[choice - 1].target_node.clone();
        if let Some(npc) = world.state.npcs.get_mut(&npc_id) {
            npc.current_node = current_node.clone();
        }
    }
    Ok(())
}

/// Read a choice in `0..=max`, re-prompting until one arrives. Returns
/// `None` on end of input.
fn read_choice(input: &mut InputManager, max: usize) -> Result<Option<usize>> {
    loop {
        match input.read_line("\n> ")? {
            InputEvent::Eof => return Ok(None),
            // ctrl-c backs out of the conversation
            InputEvent::Interrupted => return Ok(Some(0)),
            InputEvent::Line(line) => match line.trim().parse::<usize>() {
                Ok(choice) if choice <= max => return Ok(Some(choice)),
                Ok(_) => {
                    println!("Please enter a valid option number (1-{max} or 0 to end).");
                },
                Err(_) => println!("Please enter a number."),
            },
        }
    }
}
