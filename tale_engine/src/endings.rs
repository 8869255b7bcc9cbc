//! End-of-game conditions: win/lose declarations checked after every command.

use tale_data::Id;

use crate::player::Player;
use crate::world::{FlagPair, World};

/// A single end-condition criterion. All of a condition's criteria must
/// hold at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    PlayerHasItem { item_id: Id },
    PlayerInRoom { room_id: Id },
    FlagSet { flag: FlagPair },
    PuzzleSolved { puzzle_id: Id },
}

impl Criterion {
    pub fn is_met(&self, world: &World, player: &Player) -> bool {
        match self {
            Criterion::PlayerHasItem { item_id } => player.has_item(item_id),
            Criterion::PlayerInRoom { room_id } => player.current_room == *room_id,
            Criterion::FlagSet { flag } => world.global_flag(&flag.name) == Some(flag.value.as_str()),
            Criterion::PuzzleSolved { puzzle_id } => world.is_puzzle_solved(puzzle_id),
        }
    }
}

/// Whether meeting a condition ends the game in victory or defeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndKind {
    Win,
    Lose,
}

/// A declared way the game can end.
#[derive(Debug, Clone)]
pub struct EndCondition {
    pub kind: EndKind,
    pub message: String,
    pub criteria: Vec<Criterion>,
}

impl EndCondition {
    /// True when every criterion holds. A condition with no criteria never
    /// fires.
    pub fn criteria_met(&self, world: &World, player: &Player) -> bool {
        !self.criteria.is_empty()
            && self.criteria.iter().all(|criterion| criterion.is_met(world, player))
    }
}

/// Check the declared end conditions in order; the first fully-met one wins.
pub fn check_end_conditions<'a>(world: &'a World, player: &Player) -> Option<&'a EndCondition> {
    world
        .end_conditions
        .iter()
        .find(|condition| condition.criteria_met(world, player))
}
