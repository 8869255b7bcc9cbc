//! The dialogue walker's pure core.
//!
//! Entering a node applies its side effects (item grant, NPC flag, global
//! flag) and the node's responses are filtered against the current state.
//! All prompting and printing stays in the REPL's talk handler; this module
//! only computes transitions, so it can be tested without a terminal.

use log::info;
use tale_data::Id;

use crate::npc::{DialogueNode, NpcInstance, ResponseOption};
use crate::player::Player;
use crate::world::World;

/// Apply a node's on-visit effects: set the NPC flag, set the global flag,
/// and grant the item. Effects re-apply on every visit; the item grant
/// dedupes through the inventory. Returns the granted item's id when the
/// grant actually added something, so the caller can announce it.
pub fn apply_node_effects(
    world: &mut World,
    player: &mut Player,
    npc_id: &str,
    node: &DialogueNode,
) -> Option<Id> {
    if let Some(flag) = &node.sets_npc_flag {
        if let Some(npc) = world.state.npcs.get_mut(npc_id) {
            npc.set_flag(&flag.name, &flag.value);
        }
    }
    if let Some(flag) = &node.sets_global_flag {
        world.set_global_flag(&flag.name, &flag.value);
    }
    if let Some(item_id) = &node.gives_item {
        if !player.has_item(item_id) {
            player.add_item(item_id.clone());
            info!("npc '{npc_id}' gave item '{item_id}'");
            return Some(item_id.clone());
        }
    }
    None
}

/// A node is terminal when it declares the conversation over or simply has
/// nowhere to go.
pub fn is_terminal(node: &DialogueNode) -> bool {
    node.ends_dialogue || node.responses.is_empty()
}

/// The responses the player may currently choose from, in authored order.
pub fn visible_responses<'a>(
    node: &'a DialogueNode,
    world: &World,
    player: &Player,
    npc: &NpcInstance,
) -> Vec<&'a ResponseOption> {
    node.responses
        .iter()
        .filter(|response| response_available(response, world, player, npc))
        .collect()
}

fn response_available(
    response: &ResponseOption,
    world: &World,
    player: &Player,
    npc: &NpcInstance,
) -> bool {
    if let Some(item_id) = &response.requires_player_item {
        if !player.has_item(item_id) {
            return false;
        }
    }
    if let Some(flag) = &response.requires_npc_flag {
        if npc.flag(&flag.name) != Some(flag.value.as_str()) {
            return false;
        }
    }
    if let Some(flag) = &response.requires_global_flag {
        if world.global_flag(&flag.name) != Some(flag.value.as_str()) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::FlagPair;

    fn npc_in_world(world: &mut World, npc_id: &str) {
        world.state.npcs.insert(
            npc_id.to_string(),
            NpcInstance {
                definition_id: npc_id.to_string(),
                current_room: "hall".to_string(),
                current_node: "start".to_string(),
                ..NpcInstance::default()
            },
        );
    }

    #[test]
    fn node_effects_apply_on_every_visit_but_grant_once() {
        let mut world = World::default();
        npc_in_world(&mut world, "guard");
        let mut player = Player::default();

        let node = DialogueNode {
            gives_item: Some("pass".to_string()),
            sets_npc_flag: Some(FlagPair::new("met_player", "true")),
            sets_global_flag: Some(FlagPair::new("guard_met", "true")),
            ..DialogueNode::default()
        };

        assert_eq!(
            apply_node_effects(&mut world, &mut player, "guard", &node),
            Some("pass".to_string())
        );
        assert_eq!(world.state.npcs["guard"].flag("met_player"), Some("true"));
        assert_eq!(world.global_flag("guard_met"), Some("true"));

        // revisiting re-applies flags but grants nothing new
        assert_eq!(apply_node_effects(&mut world, &mut player, "guard", &node), None);
        assert_eq!(player.inventory, vec!["pass".to_string()]);
    }

    #[test]
    fn terminal_when_flagged_or_out_of_responses() {
        let mut node = DialogueNode::default();
        assert!(is_terminal(&node));

        node.responses.push(ResponseOption::default());
        assert!(!is_terminal(&node));

        node.ends_dialogue = true;
        assert!(is_terminal(&node));
    }

    #[test]
    fn responses_filter_on_all_three_requirement_kinds() {
        let mut world = World::default();
        npc_in_world(&mut world, "guard");
        let mut player = Player::default();

        let node = DialogueNode {
            responses: vec![
                ResponseOption {
                    text: "always".to_string(),
                    target_node: "a".to_string(),
                    ..ResponseOption::default()
                },
                ResponseOption {
                    text: "needs pass".to_string(),
                    target_node: "b".to_string(),
                    requires_player_item: Some("pass".to_string()),
                    ..ResponseOption::default()
                },
                ResponseOption {
                    text: "needs npc trust".to_string(),
                    target_node: "c".to_string(),
                    requires_npc_flag: Some(FlagPair::new("trust", "high")),
                    ..ResponseOption::default()
                },
                ResponseOption {
                    text: "needs alarm off".to_string(),
                    target_node: "d".to_string(),
                    requires_global_flag: Some(FlagPair::new("alarm", "off")),
                    ..ResponseOption::default()
                },
            ],
            ..DialogueNode::default()
        };

        let npc = world.state.npcs["guard"].clone();
        let visible = visible_responses(&node, &world, &player, &npc);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].text, "always");

        player.add_item("pass".to_string());
        world.set_global_flag("alarm", "off");
        world.state.npcs.get_mut("guard").unwrap().set_flag("trust", "high");

        let npc = world.state.npcs["guard"].clone();
        let visible = visible_responses(&node, &world, &player, &npc);
        let texts: Vec<&str> = visible.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["always", "needs pass", "needs npc trust", "needs alarm off"]);
    }
}
