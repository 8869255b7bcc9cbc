//! Tale: a data-driven text-adventure interpreter.
//!
//! A world definition authored as a JSON document is loaded once at startup
//! and converted into the engine's typed model. The interpreter then runs a
//! read-eval-print loop: parse a free-text command, dispatch it to a handler
//! that mutates the session state, check end conditions, repeat.

pub mod command;
pub mod dialogue;
pub mod endings;
pub mod item;
pub mod loader;
pub mod npc;
pub mod player;
pub mod puzzle;
pub mod repl;
pub mod room;
pub mod save;
pub mod style;
pub mod world;

pub use command::{ParsedCommand, parse_command};
pub use endings::{EndCondition, EndKind};
pub use item::{Item, UseEffect, UseTarget};
pub use loader::{LoadedGame, load_world};
pub use npc::{DialogueNode, NpcDef, NpcInstance, ResponseOption};
pub use player::Player;
pub use puzzle::{Effect, Puzzle, SolutionCondition};
pub use repl::run_repl;
pub use room::{Exit, Room, exit_key};
pub use world::{FlagPair, GameInfo, World, WorldState};
