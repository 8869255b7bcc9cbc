//! The puzzle engine: solution conditions, solve effects, and `attempt_solve`.

use log::{info, warn};
use tale_data::Id;

use crate::player::Player;
use crate::style::GameStyle;
use crate::world::{FlagPair, World};

/// What it takes to solve a puzzle. Exactly one condition per puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolutionCondition {
    /// A specific item must be used on a specific target in this attempt.
    ItemUsedOnTarget { item_id: Id, target_id: Id },
    /// A named NPC's flag must hold a given value.
    NpcStateReached { npc_id: Id, flag: FlagPair },
    /// A global flag must hold a given value.
    GlobalFlagSet { flag: FlagPair },
    /// The player must be carrying a specific item.
    PlayerHasItem { item_id: Id },
}

impl SolutionCondition {
    /// Evaluate against the current state. `used_item` and `target` carry
    /// the ids from the triggering `use` command, when there is one.
    pub fn is_met(
        &self,
        world: &World,
        player: &Player,
        used_item: Option<&str>,
        target: Option<&str>,
    ) -> bool {
        match self {
            SolutionCondition::ItemUsedOnTarget { item_id, target_id } => {
                used_item == Some(item_id.as_str()) && target == Some(target_id.as_str())
            },
            SolutionCondition::NpcStateReached { npc_id, flag } => world
                .state
                .npcs
                .get(npc_id)
                .is_some_and(|npc| npc.flag(&flag.name) == Some(flag.value.as_str())),
            SolutionCondition::GlobalFlagSet { flag } => {
                world.global_flag(&flag.name) == Some(flag.value.as_str())
            },
            SolutionCondition::PlayerHasItem { item_id } => player.has_item(item_id),
        }
    }
}

/// One effect applied when a puzzle is solved. Effects are fire-and-forget:
/// applied in declared order, each degrading to a logged no-op when its
/// referent is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    UnlockExit { room_id: Id, direction: String },
    LockExit { room_id: Id, direction: String },
    SpawnItem { room_id: Id, item_id: Id },
    RemoveItem { room_id: Id, item_id: Id },
    MoveNpc { npc_id: Id, room_id: Id },
    SetFlag { flag: FlagPair },
}

/// Immutable puzzle definition. Solved status lives in the world-state
/// overlay.
#[derive(Debug, Clone)]
pub struct Puzzle {
    pub id: Id,
    pub description: String,
    pub condition: SolutionCondition,
    pub success_message: Option<String>,
    pub failure_message: Option<String>,
    pub already_solved_message: Option<String>,
    pub effects: Vec<Effect>,
    pub flag_on_solve: Option<FlagPair>,
}

/// Attempt to solve a puzzle. Returns true only on the transition from
/// unsolved to solved; repeat attempts print the already-solved message and
/// change nothing. On success: mark solved, print the success message,
/// apply effects in order, then set the optional flag-on-solve.
pub fn attempt_solve(
    world: &mut World,
    player: &mut Player,
    puzzle_id: &str,
    used_item: Option<&str>,
    target: Option<&str>,
) -> bool {
    let Some(puzzle) = world.puzzle(puzzle_id) else {
        warn!("attempt to solve unknown puzzle '{puzzle_id}'");
        return false;
    };

    if world.is_puzzle_solved(puzzle_id) {
        if let Some(message) = &puzzle.already_solved_message {
            println!("{}", message.description_style());
        }
        return false;
    }

    if !puzzle.condition.is_met(world, player, used_item, target) {
        if let Some(message) = &puzzle.failure_message {
            println!("{}", message.error_style());
        }
        return false;
    }

    let success_message = puzzle.success_message.clone();
    let effects = puzzle.effects.clone();
    let flag_on_solve = puzzle.flag_on_solve.clone();

    world.mark_puzzle_solved(puzzle_id);
    info!("puzzle '{puzzle_id}' solved");

    if let Some(message) = success_message {
        println!("{}", message.success_style());
    }
    apply_effects(world, &effects);
    if let Some(flag) = flag_on_solve {
        world.set_global_flag(&flag.name, &flag.value);
    }
    true
}

/// Apply solve effects in order.
pub fn apply_effects(world: &mut World, effects: &[Effect]) {
    for effect in effects {
        match effect {
            Effect::UnlockExit { room_id, direction } => {
                world.set_exit_locked(room_id, direction, false);
                info!("effect: unlocked exit '{room_id}' -> {direction}");
            },
            Effect::LockExit { room_id, direction } => {
                world.set_exit_locked(room_id, direction, true);
                info!("effect: locked exit '{room_id}' -> {direction}");
            },
            Effect::SpawnItem { room_id, item_id } => {
                world.add_item_to_room(room_id, item_id);
                info!("effect: spawned item '{item_id}' in '{room_id}'");
            },
            Effect::RemoveItem { room_id, item_id } => {
                if !world.remove_item_from_room(room_id, item_id) {
                    warn!("effect: item '{item_id}' not present in '{room_id}'");
                }
            },
            Effect::MoveNpc { npc_id, room_id } => {
                if let Some(npc) = world.state.npcs.get_mut(npc_id) {
                    npc.current_room = room_id.clone();
                    info!("effect: moved npc '{npc_id}' to '{room_id}'");
                } else {
                    warn!("effect: no npc instance '{npc_id}' to move");
                }
            },
            Effect::SetFlag { flag } => {
                world.set_global_flag(&flag.name, &flag.value);
                info!("effect: set flag '{}' = '{}'", flag.name, flag.value);
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_puzzle(id: &str, condition: SolutionCondition) -> Puzzle {
        Puzzle {
            id: id.to_string(),
            description: String::new(),
            condition,
            success_message: Some("It clicks open.".to_string()),
            failure_message: Some("Nothing happens.".to_string()),
            already_solved_message: Some("Already open.".to_string()),
            effects: vec![Effect::SetFlag {
                flag: FlagPair::new("gate", "open"),
            }],
            flag_on_solve: None,
        }
    }

    fn world_with(puzzle: Puzzle) -> World {
        let mut world = World::default();
        world.state.puzzles_solved.insert(puzzle.id.clone(), false);
        world.puzzles.insert(puzzle.id.clone(), puzzle);
        world
    }

    #[test]
    fn item_used_on_target_requires_both_ids() {
        let condition = SolutionCondition::ItemUsedOnTarget {
            item_id: "key".into(),
            target_id: "lock".into(),
        };
        let world = World::default();
        let player = Player::default();

        assert!(condition.is_met(&world, &player, Some("key"), Some("lock")));
        assert!(!condition.is_met(&world, &player, Some("key"), Some("door")));
        assert!(!condition.is_met(&world, &player, None, Some("lock")));
    }

    #[test]
    fn solve_is_monotonic_and_idempotent() {
        let puzzle = simple_puzzle(
            "gate",
            SolutionCondition::ItemUsedOnTarget {
                item_id: "key".into(),
                target_id: "lock".into(),
            },
        );
        let mut world = world_with(puzzle);
        let mut player = Player::default();

        assert!(attempt_solve(&mut world, &mut player, "gate", Some("key"), Some("lock")));
        assert!(world.is_puzzle_solved("gate"));
        assert_eq!(world.global_flag("gate"), Some("open"));

        // second attempt reports already-solved and changes nothing
        assert!(!attempt_solve(&mut world, &mut player, "gate", Some("key"), Some("lock")));
        assert!(world.is_puzzle_solved("gate"));
    }

    #[test]
    fn failed_attempt_leaves_puzzle_unsolved() {
        let puzzle = simple_puzzle(
            "gate",
            SolutionCondition::PlayerHasItem { item_id: "key".into() },
        );
        let mut world = world_with(puzzle);
        let mut player = Player::default();

        assert!(!attempt_solve(&mut world, &mut player, "gate", None, None));
        assert!(!world.is_puzzle_solved("gate"));
        assert_eq!(world.global_flag("gate"), None);
    }

    #[test]
    fn effects_apply_in_declared_order() {
        let mut world = World::default();
        world
            .state
            .room_items
            .insert("cell".to_string(), vec!["note".to_string()]);

        apply_effects(
            &mut world,
            &[
                Effect::RemoveItem {
                    room_id: "cell".into(),
                    item_id: "note".into(),
                },
                Effect::SpawnItem {
                    room_id: "cell".into(),
                    item_id: "ashes".into(),
                },
                Effect::SetFlag {
                    flag: FlagPair::new("note", "burned"),
                },
            ],
        );

        assert_eq!(world.items_in_room("cell"), ["ashes".to_string()]);
        assert_eq!(world.global_flag("note"), Some("burned"));
    }

    #[test]
    fn unlock_effect_clears_initial_lock() {
        let mut world = World::default();
        world.state.exit_overrides.insert("cell_north".to_string(), true);

        apply_effects(
            &mut world,
            &[Effect::UnlockExit {
                room_id: "cell".into(),
                direction: "north".into(),
            }],
        );
        assert_eq!(world.exit_override("cell_north"), Some(false));
    }
}
