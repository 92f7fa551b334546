//! World model for the cave adventure engine.
//!
//! Everything here is immutable once loaded: locations with their condition
//! bits and travel rules, object definitions, vocabulary, hints, turn
//! thresholds and message texts. A [`World`] is built from a JSON document
//! (see [`WorldData`]) and validated in one pass, so the simulation never has
//! to decode packed travel values or chase dangling references at play time.

/// Error types for loading and validating a world.
pub mod error;
/// Hint table rows and the topics they cover.
pub mod hint;
/// Location identifiers, condition bits and cave zones.
pub mod location;
/// Object identifiers and static object definitions.
pub mod object;
/// Travel rules and the decoding of packed destination values.
pub mod travel;
/// Word lookup for motions, objects, actions and literal messages.
pub mod vocab;
/// The loaded world and its serialized form.
pub mod world;

/// Re-exports of [`error::WorldError`] and [`error::WorldResult`].
pub use error::{WorldError, WorldResult};
/// Re-exports of hint types.
pub use hint::{HintDef, HintTopic};
/// Re-exports of location types.
pub use location::{Conditions, Liquid, LocId, Location, Zone};
/// Re-exports of object types.
pub use object::{Fixed, ObjId, ObjectDef};
/// Re-exports of travel types.
pub use travel::{Destination, Maneuver, Precondition, TravelRule};
/// Re-exports of vocabulary types.
pub use vocab::{MotionId, Token, VerbId, Vocabulary, WordClass};
/// Re-exports of world types.
pub use world::{
    Landmarks, LocationData, ObjectData, TravelData, TurnThreshold, WordGroup, World, WorldData,
};

/// Index of a message in the world's message table.
pub type MessageId = u16;
