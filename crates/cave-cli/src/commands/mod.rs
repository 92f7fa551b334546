pub mod check;
pub mod play;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cave_core::{World, WorldError};
use cave_sim::SimError;

/// Why a command failed.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A file could not be read or written.
    #[error("{path}: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// What went wrong.
        source: io::Error,
    },

    /// The terminal went away.
    #[error("terminal: {0}")]
    Terminal(#[from] io::Error),

    /// The world file is unusable.
    #[error(transparent)]
    World(#[from] WorldError),

    /// The game stopped on an engine fault.
    #[error(transparent)]
    Sim(#[from] SimError),
}

impl CliError {
    /// Process exit status: the fault code for engine faults, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Sim(e) => e.fault_code().unwrap_or(1),
            _ => 1,
        }
    }
}

/// Load the world at `path`, or the built-in sample cave.
fn load_world(path: Option<&Path>) -> Result<World, CliError> {
    let Some(path) = path else {
        return Ok(World::sample()?);
    };
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let world = World::from_json(&text)?;
    log::info!("loaded world '{}' from {}", world.name, path.display());
    Ok(world)
}
