use std::io;
use std::path::PathBuf;

use colored::Colorize;

use cave_sim::{Ending, Game, GameConfig};

use super::CliError;
use crate::console::{CommandLog, TerminalConsole};
use crate::render::Renderer;

pub struct PlayOptions {
    pub world: Option<PathBuf>,
    pub log: Option<PathBuf>,
    pub oldstyle: bool,
    /// Input is always read as plain lines; the flag is accepted for compatibility.
    pub no_editline: bool,
    pub seed: Option<u64>,
}

pub fn run(opts: &PlayOptions) -> Result<(), CliError> {
    let world = super::load_world(opts.world.as_deref())?;
    let seed = opts.seed.unwrap_or_else(rand::random);
    if opts.no_editline {
        log::debug!("line editing disabled");
    }

    let log = match &opts.log {
        Some(path) => Some(CommandLog::create(path, seed).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?),
        None => None,
    };

    if opts.oldstyle {
        println!("Initialising...");
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = TerminalConsole::new(Renderer::new(&world), stdin.lock(), stdout.lock())
        .oldstyle(opts.oldstyle)
        .with_log(log);

    let mut game = Game::new(&world, GameConfig::default().with_seed(seed))?;
    let ending = game.play(&mut console)?;
    if let Some(e) = console.take_failure() {
        return Err(CliError::Terminal(e));
    }
    drop(console);

    let state = game.state();
    let how = match ending {
        Ending::Quit => "You quit.",
        Ending::EndOfInput => "End of input.",
        Ending::Died => "You are dead.",
        Ending::DwarvesAwoken => "The dwarves have woken.",
    };
    println!();
    println!("{}", how.bold());
    println!(
        "{}",
        format!(
            "{} turns, {} deaths, {} treasures still unseen",
            state.turns, state.deaths, state.tally
        )
        .dimmed()
    );
    Ok(())
}
