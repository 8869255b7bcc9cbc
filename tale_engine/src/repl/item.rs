//! `repl::item` module
//!
//! Handlers for the item verbs: take, drop, use, and combine.

use log::{info, warn};

use crate::item::UseTarget;
use crate::player::Player;
use crate::puzzle::{SolutionCondition, attempt_solve};
use crate::style::GameStyle;
use crate::world::World;

/// Pick up an item from the current room.
pub fn take_handler(world: &mut World, player: &mut Player, item_name: &str) {
    if item_name.is_empty() {
        println!("Take what? Please specify an item.");
        return;
    }
    let Some(item_id) = world.find_item_in_room(item_name, &player.current_room) else {
        println!("You don't see that here.");
        return;
    };
    let Some(item) = world.item(&item_id) else {
        warn!("room lists unknown item '{item_id}'");
        println!("You don't see that here.");
        return;
    };
    if !item.takeable {
        println!("You can't take that.");
        return;
    }
    let display_name = item.name.clone();
    let room_id = player.current_room.clone();
    world.remove_item_from_room(&room_id, &item_id);
    player.add_item(item_id.clone());
    info!("player took '{item_id}' from '{room_id}'");
    println!("You take the {}.", display_name.item_style());
}

/// Drop a carried item into the current room.
pub fn drop_handler(world: &mut World, player: &mut Player, item_name: &str) {
    if item_name.is_empty() {
        println!("Drop what? Please specify an item.");
        return;
    }
    let Some(item_id) = player.find_item_by_name(world, item_name) else {
        println!("You don't have that.");
        return;
    };
    player.remove_item(&item_id);
    let room_id = player.current_room.clone();
    world.add_item_to_room(&room_id, &item_id);
    info!("player dropped '{item_id}' in '{room_id}'");
    println!("You drop the {}.", world.item_name(&item_id).item_style());
}

/// Use a carried item, optionally on a target.
///
/// Target resolution order: items in the room, then NPCs in the room, then
/// free text matched against puzzle conditions that want this item. The
/// free-text path is what lets "use key on door" work when the door is
/// scenery rather than an item.
pub fn use_handler(world: &mut World, player: &mut Player, item_name: &str, target_name: &str) {
    if item_name.is_empty() {
        println!("Use what? Please specify an item.");
        return;
    }
    let Some(item_id) = player.find_item_by_name(world, item_name) else {
        println!("You don't have that.");
        return;
    };
    let item_display = world.item_name(&item_id).to_string();

    if target_name.is_empty() {
        let self_effect = world
            .item(&item_id)
            .and_then(|item| item.use_effect_for(&UseTarget::SelfUse))
            .cloned();
        if let Some(effect) = self_effect {
            if let Some(puzzle_id) = effect.triggers_puzzle.as_deref() {
                trigger_puzzle(world, player, puzzle_id, &item_id, "self");
            }
            return;
        }
        println!("You need to specify what to use the {} on.", item_display.item_style());
        return;
    }

    // a target item in the room?
    if let Some(target_item_id) = world.find_item_in_room(target_name, &player.current_room) {
        let effect = world
            .item(&item_id)
            .and_then(|item| item.use_effect_for(&UseTarget::Item(target_item_id.clone())))
            .cloned();
        if let Some(effect) = effect {
            if let Some(puzzle_id) = effect.triggers_puzzle.as_deref() {
                trigger_puzzle(world, player, puzzle_id, &item_id, &target_item_id);
            } else if let Some(message) = &effect.success_message {
                println!("{}", message.success_style());
                if effect.consumes_item {
                    player.remove_item(&item_id);
                    println!("The {} is consumed.", item_display.item_style());
                }
                if let Some(flag) = &effect.sets_flag {
                    world.set_global_flag(&flag.name, &flag.value);
                }
            } else {
                println!(
                    "You use the {} on the {} but nothing happens.",
                    item_display.item_style(),
                    world.item_name(&target_item_id).item_style()
                );
            }
            return;
        }
    }

    // a target NPC in the room?
    if let Some(npc_id) = world.find_npc_in_room(target_name, &player.current_room) {
        let effect = world
            .item(&item_id)
            .and_then(|item| item.use_effect_for(&UseTarget::Npc(npc_id.clone())))
            .cloned();
        if let Some(effect) = effect {
            if let Some(puzzle_id) = effect.triggers_puzzle.as_deref() {
                trigger_puzzle(world, player, puzzle_id, &item_id, &npc_id);
            } else if let Some(message) = &effect.success_message {
                println!("{}", message.success_style());
                if effect.consumes_item {
                    player.remove_item(&item_id);
                }
                if let Some(flag) = &effect.sets_flag {
                    world.set_global_flag(&flag.name, &flag.value);
                }
            } else {
                let npc_name = world
                    .npc_def(&npc_id)
                    .map_or_else(|| npc_id.clone(), |def| def.name.clone());
                println!(
                    "You use the {} on {} but nothing happens.",
                    item_display.item_style(),
                    npc_name.npc_style()
                );
            }
            return;
        }
    }

    // free-text scenery: a puzzle wanting this item whose target id appears
    // in the typed target name
    let needle = target_name.to_lowercase();
    let scenery_match = world.puzzles.iter().find_map(|(puzzle_id, puzzle)| {
        if let SolutionCondition::ItemUsedOnTarget { item_id: wanted, target_id } = &puzzle.condition {
            if *wanted == item_id && needle.contains(&target_id.to_lowercase()) {
                return Some((puzzle_id.clone(), target_id.clone()));
            }
        }
        None
    });
    if let Some((puzzle_id, target_id)) = scenery_match {
        trigger_puzzle(world, player, &puzzle_id, &item_id, &target_id);
        return;
    }

    println!("You can't use the {} on that.", item_display.item_style());
}

/// Run a puzzle attempt triggered by a `use`, consuming the item afterwards
/// when the item's puzzle-targeted effect says so.
fn trigger_puzzle(world: &mut World, player: &mut Player, puzzle_id: &str, item_id: &str, target_id: &str) {
    if !attempt_solve(world, player, puzzle_id, Some(item_id), Some(target_id)) {
        return;
    }

    let condition_wants_item = world
        .puzzle(puzzle_id)
        .is_some_and(|puzzle| condition_required_item(&puzzle.condition) == Some(item_id));
    let consumes = condition_wants_item
        && world
            .item(item_id)
            .and_then(|item| item.use_effect_for(&UseTarget::Puzzle(puzzle_id.to_string())))
            .is_some_and(|effect| effect.consumes_item);
    if consumes {
        player.remove_item(item_id);
        println!("The {} is consumed.", world.item_name(item_id).item_style());
    }
}

fn condition_required_item(condition: &SolutionCondition) -> Option<&str> {
    match condition {
        SolutionCondition::ItemUsedOnTarget { item_id, .. }
        | SolutionCondition::PlayerHasItem { item_id } => Some(item_id),
        _ => None,
    }
}

/// Combine two carried items into a new one.
///
/// The operands come from splitting the direct object once on the earliest
/// of " and ", " with ", or " using "; item names containing one of those
/// substrings, or three-part combinations, are not supported.
pub fn combine_handler(world: &World, player: &mut Player, combination: &str) {
    if combination.is_empty() {
        println!("Combine what? Please specify the items to combine.");
        return;
    }
    let Some((first_name, second_name)) = split_combination(combination) else {
        println!("Please specify two items to combine (e.g., 'combine X and Y').");
        return;
    };

    let Some(first_id) = player.find_item_by_name(world, first_name) else {
        println!("You don't have a {first_name}.");
        return;
    };
    let Some(second_id) = player.find_item_by_name(world, second_name) else {
        println!("You don't have a {second_name}.");
        return;
    };

    let (Some(first), Some(second)) = (world.item(&first_id), world.item(&second_id)) else {
        println!("You can't combine those items.");
        return;
    };

    // either item may declare the combination
    let result_id = if first.can_combine_with(&second_id) {
        first.combination_result.clone()
    } else if second.can_combine_with(&first_id) {
        second.combination_result.clone()
    } else {
        println!("You can't combine those items.");
        return;
    };

    let Some(result_id) = result_id else {
        println!("You try to combine the items, but nothing happens.");
        return;
    };

    player.remove_item(&first_id);
    player.remove_item(&second_id);
    player.add_item(result_id.clone());
    info!("combined '{first_id}' + '{second_id}' -> '{result_id}'");
    println!(
        "You combine the {} and the {} to create a {}.",
        world.item_name(&first_id).item_style(),
        world.item_name(&second_id).item_style(),
        world.item_name(&result_id).item_style()
    );
}

fn split_combination(combination: &str) -> Option<(&str, &str)> {
    const SEPARATORS: [&str; 3] = [" and ", " with ", " using "];
    let earliest = SEPARATORS
        .iter()
        .filter_map(|sep| combination.find(sep).map(|at| (at, *sep)))
        .min_by_key(|(at, _)| *at)?;
    let (first, rest) = combination.split_at(earliest.0);
    let second = &rest[earliest.1.len()..];
    let (first, second) = (first.trim(), second.trim());
    if first.is_empty() || second.is_empty() {
        return None;
    }
    Some((first, second))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combination_splits_on_earliest_separator() {
        assert_eq!(split_combination("wire and battery"), Some(("wire", "battery")));
        assert_eq!(split_combination("wire using battery"), Some(("wire", "battery")));
        assert_eq!(
            split_combination("wire and clamp with tape"),
            Some(("wire", "clamp with tape"))
        );
    }

    #[test]
    fn combination_needs_two_operands() {
        assert_eq!(split_combination("wire"), None);
        assert_eq!(split_combination("wire and "), None);
    }
}
