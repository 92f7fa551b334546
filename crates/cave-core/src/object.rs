use std::fmt;

use serde::{Deserialize, Serialize};

use crate::location::LocId;

/// Identifier of an object. Valid identifiers run from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjId(pub u16);

impl ObjId {
    /// Position in per-object tables.
    pub fn index(self) -> usize {
        usize::from(self.0).saturating_sub(1)
    }
}

impl fmt::Display for ObjId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether an object can be picked up, and where its second end is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fixed {
    /// Can be carried.
    #[default]
    Movable,
    /// Stays where it is.
    Immovable,
    /// Spans two locations at once, and so stays put.
    Also(LocId),
}

impl Fixed {
    /// Decode the serialized form: `0` movable, negative immovable,
    /// positive a second location.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Movable,
            r if r < 0 => Self::Immovable,
            r => Self::Also(LocId(u16::try_from(r).unwrap_or(u16::MAX))),
        }
    }

    /// The second location, if any.
    pub fn second(self) -> Option<LocId> {
        match self {
            Self::Also(loc) => Some(loc),
            _ => None,
        }
    }
}

/// Static description of an object.
#[derive(Debug, Clone)]
pub struct ObjectDef {
    /// Identifier.
    pub id: ObjId,
    /// Mnemonic the engine uses to find well-known objects.
    pub name: String,
    /// Inventory line, if the object can be listed.
    pub inventory: Option<String>,
    /// Description per property value.
    pub states: Vec<String>,
    /// Initial location.
    pub place: LocId,
    /// Initial fixedness.
    pub fixed: Fixed,
    /// Counts toward the treasure tally.
    pub treasure: bool,
    /// Property value a treasure takes when first seen.
    pub found_state: i32,
}

impl ObjectDef {
    /// Description for property value `state`, if there is one.
    pub fn state_text(&self, state: i32) -> Option<&str> {
        usize::try_from(state)
            .ok()
            .and_then(|i| self.states.get(i))
            .map(String::as_str)
    }

    /// Initial property value: unseen for treasures.
    pub fn initial_prop(&self) -> i32 {
        if self.treasure { -1 } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_from_raw() {
        assert_eq!(Fixed::from_raw(0), Fixed::Movable);
        assert_eq!(Fixed::from_raw(-1), Fixed::Immovable);
        assert_eq!(Fixed::from_raw(4), Fixed::Also(LocId(4)));
        assert_eq!(Fixed::from_raw(4).second(), Some(LocId(4)));
        assert_eq!(Fixed::Immovable.second(), None);
    }

    #[test]
    fn state_text_ignores_negative() {
        let def = ObjectDef {
            id: ObjId(1),
            name: "lamp".into(),
            inventory: Some("Brass lantern".into()),
            states: vec!["off".into(), "on".into()],
            place: LocId(2),
            fixed: Fixed::Movable,
            treasure: false,
            found_state: 0,
        };
        assert_eq!(def.state_text(1), Some("on"));
        assert_eq!(def.state_text(-1), None);
        assert_eq!(def.state_text(2), None);
        assert_eq!(def.initial_prop(), 0);
    }

    #[test]
    fn object_index_is_zero_based() {
        assert_eq!(ObjId(1).index(), 0);
        assert_eq!(ObjId(27).index(), 26);
    }
}
