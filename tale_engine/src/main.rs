//! Binary entry point: load a world document and run the interpreter.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use log::info;
use textwrap::{fill, termwidth};

use tale_engine::loader::load_world;
use tale_engine::repl::run_repl;
use tale_engine::style::GameStyle;

fn main() -> Result<()> {
    env_logger::init();

    let world_path = world_path_from_args();
    if !world_path.is_file() {
        bail!(
            "world file '{}' not found; pass a path to a game definition as the first argument",
            world_path.display()
        );
    }

    let mut game = load_world(&world_path)
        .with_context(|| format!("loading world from '{}'", world_path.display()))?;
    info!("loaded '{}' from {}", game.world.info.title, world_path.display());

    if !game.warnings.is_empty() {
        println!("{}", "WARNING: The game definition has the following issues:".error_style());
        for warning in &game.warnings {
            println!("- {warning}");
        }
        println!();
    }

    println!("{}", "========================================".room_title_style());
    println!(
        "{}",
        format!("{} v{}", game.world.info.title, game.world.info.version).room_title_style()
    );
    println!("{}", "========================================".room_title_style());
    if !game.world.info.welcome_message.is_empty() {
        println!("{}", fill(&game.world.info.welcome_message, termwidth()).description_style());
    }
    println!();

    if let Some(room) = game.world.room(&game.player.current_room) {
        room.show(&game.world, &game.player);
    }

    run_repl(&mut game.world, &mut game.player)
}

fn world_path_from_args() -> PathBuf {
    env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from("world.json"), PathBuf::from)
}
