//! CLI frontend for the cave adventure engine.

mod commands;
mod console;
mod render;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser)]
#[command(
    name = "cave",
    about = "Colossal Cave, played from the terminal",
    version,
    propagate_version = true
)]
struct Cli {
    /// More diagnostics on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game
    Play {
        /// World file (default: the built-in sample cave)
        #[arg(short, long)]
        world: Option<PathBuf>,

        /// Record every command to this file
        #[arg(short, long)]
        log: Option<PathBuf>,

        /// Old-style presentation: no prompt
        #[arg(short, long)]
        oldstyle: bool,

        /// Plain line input, without editing or history
        #[arg(short = 's', long)]
        no_editline: bool,

        /// Seed for the random generator (default: from the system)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Load and validate a world file
    Check {
        /// World file (default: the built-in sample cave)
        #[arg(short, long)]
        world: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let result = match cli.command {
        Commands::Play {
            world,
            log,
            oldstyle,
            no_editline,
            seed,
        } => commands::play::run(&commands::play::PlayOptions {
            world,
            log,
            oldstyle,
            no_editline,
            seed,
        }),
        Commands::Check { world } => commands::check::run(world.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(e.exit_code());
    }
}
