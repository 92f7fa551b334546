//! Turn-based simulation core for the cave adventure engine.
//!
//! Runs a game over a [`cave_core::World`]: travel, the dwarves and the
//! pirate, hints, the closing of the cave, death and reincarnation. All
//! mutable state lives in one [`GameState`] owned by a [`Game`], which lends
//! it to each component through a [`TurnContext`] for one step at a time.
//! Text never passes through here: the engine speaks in message numbers and
//! parameters to a [`Console`].

/// Verb handling behind the dispatcher.
pub mod actions;
/// Dwarves and the pirate.
pub mod adversary;
/// Objects and words the engine refers to by name.
pub mod cast;
/// Session tuning: seed, clocks, lamp life.
pub mod config;
/// The console seam: speech out, command lines in.
pub mod console;
/// Borrowed view of a session handed to each component.
pub mod context;
/// Death and reincarnation.
pub mod death;
/// The closing clocks and the lamp.
pub mod endgame;
/// Error types for the simulation crate.
pub mod error;
/// The hint engine.
pub mod hints;
/// Splitting command lines into words.
pub mod input;
/// Message numbers the engine speaks.
pub mod msg;
/// The game's pseudo-random generator.
pub mod rng;
/// The mutable game-state aggregate.
pub mod state;
/// Player movement through the travel table.
pub mod travel;
/// The turn dispatcher and game session.
pub mod turn;

/// Re-exports of [`actions::Actions`] and its companions.
pub use actions::{Actions, Flow, Request, StandardActions};
/// Re-export of [`cast::Cast`].
pub use cast::Cast;
/// Re-export of [`config::GameConfig`].
pub use config::GameConfig;
/// Re-exports of console types.
pub use console::{Console, Form, Param, ScriptConsole, Speech};
/// Re-export of [`context::TurnContext`].
pub use context::TurnContext;
/// Re-exports of [`error::EngineFault`], [`error::SimError`] and [`error::SimResult`].
pub use error::{EngineFault, SimError, SimResult};
/// Re-export of [`rng::Lcg`].
pub use rng::Lcg;
/// Re-exports of game-state types.
pub use state::{Activation, Endgame, GameState, Place};
/// Re-exports of [`turn::Game`] and [`turn::Ending`].
pub use turn::{Ending, Game};
