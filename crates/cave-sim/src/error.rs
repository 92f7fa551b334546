use cave_core::{LocId, WorldError};

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Broken invariants. The session cannot continue after one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineFault {
    /// A failed precondition left no further rule to try.
    #[error("travel table exhausted at location {loc}")]
    TravelExhausted {
        /// Where the player was.
        loc: LocId,
    },

    /// The player is somewhere with no travel rules at all.
    #[error("location {loc} has no travel rules")]
    NoTravel {
        /// Where the player was.
        loc: LocId,
    },
}

impl EngineFault {
    /// Distinguishing code reported when the session aborts.
    pub fn code(&self) -> i32 {
        match self {
            Self::TravelExhausted { .. } => 25,
            Self::NoTravel { .. } => 26,
        }
    }
}

/// Errors from running a game.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// An engine invariant was violated.
    #[error("engine fault {code}: {0}", code = .0.code())]
    Fault(#[from] EngineFault),

    /// The world lacks something the engine needs.
    #[error(transparent)]
    World(#[from] WorldError),
}

impl SimError {
    /// Fault code, if this is an engine fault.
    pub fn fault_code(&self) -> Option<i32> {
        match self {
            Self::Fault(fault) => Some(fault.code()),
            Self::World(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_codes_are_distinct() {
        let a = EngineFault::TravelExhausted { loc: LocId(3) };
        let b = EngineFault::NoTravel { loc: LocId(3) };
        assert_ne!(a.code(), b.code());
    }

    #[test]
    fn fault_message_carries_code() {
        let err = SimError::from(EngineFault::NoTravel { loc: LocId(7) });
        assert_eq!(err.fault_code(), Some(26));
        assert_eq!(
            err.to_string(),
            "engine fault 26: location 7 has no travel rules"
        );
    }

    #[test]
    fn world_errors_have_no_code() {
        let err = SimError::from(WorldError::MissingObject("lamp".into()));
        assert_eq!(err.fault_code(), None);
        assert!(err.to_string().contains("lamp"));
    }
}
