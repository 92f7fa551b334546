use std::path::Path;

use colored::Colorize;

use cave_sim::{Game, GameConfig};

use super::CliError;

pub fn run(path: Option<&Path>) -> Result<(), CliError> {
    let world = super::load_world(path)?;
    // Binding the engine's named objects and verbs is part of the check.
    Game::new(&world, GameConfig::default())?;

    println!("  {} for '{}'.", "All checks passed".green().bold(), world.name);
    println!(
        "  {} locations, {} objects ({} treasures), {} hints",
        world.location_count(),
        world.objects().len(),
        world.treasures().count(),
        world.hints().len()
    );
    Ok(())
}
