use crate::location::LocId;
use crate::object::ObjId;

/// Alias for `Result<T, WorldError>`.
pub type WorldResult<T> = Result<T, WorldError>;

/// Errors that can occur while loading or validating a world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The world document is not valid JSON or does not match the schema.
    #[error("malformed world data: {0}")]
    Json(#[from] serde_json::Error),

    /// A packed travel value does not decode to any destination class.
    #[error("location {origin}: travel value {value} does not decode ({reason})")]
    BadTravel {
        /// The location the rule belongs to.
        origin: LocId,
        /// The packed `1000 * M + N` value.
        value: u32,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// A location identifier is referenced but never defined.
    #[error("unknown location {0}")]
    UnknownLocation(LocId),

    /// An object identifier is referenced but never defined.
    #[error("unknown object {0}")]
    UnknownObject(ObjId),

    /// Identifiers must run contiguously from 1.
    #[error("{kind} identifiers must be contiguous from 1, found {found} at position {position}")]
    NonContiguous {
        /// "location" or "object".
        kind: &'static str,
        /// The identifier found.
        found: u16,
        /// Its position in the list (1-based).
        position: usize,
    },

    /// The engine refers to an object by name and the world lacks it.
    #[error("world has no object named \"{0}\"")]
    MissingObject(String),

    /// The engine refers to a word and the world's vocabulary lacks it.
    #[error("world vocabulary has no {class} word \"{word}\"")]
    MissingWord {
        /// The vocabulary class searched.
        class: &'static str,
        /// The word that was not found.
        word: String,
    },

    /// A generic validation failure.
    #[error("validation error: {0}")]
    Validation(String),
}
