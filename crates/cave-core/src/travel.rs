//! Travel rules.
//!
//! In the world document a rule's outcome is packed as `Y = 1000 * M + N`.
//! `N` picks the destination class and `M` the precondition class:
//!
//! | `N`          | destination                    |
//! |--------------|--------------------------------|
//! | 1..=300      | location `N`                   |
//! | 301..=303    | special maneuver `N - 300`     |
//! | 501..        | print message `N - 500`        |
//!
//! | `M`          | precondition                                   |
//! |--------------|------------------------------------------------|
//! | 0            | none                                           |
//! | 1..=99       | `M`% chance                                    |
//! | 100          | none, but adversaries never use the rule       |
//! | 101..=200    | carrying object `M - 100`                      |
//! | 201..=300    | carrying or beside object `M - 200`           |
//! | 301..        | property of object `M % 100` is not `M/100 - 3`|
//!
//! Decoding happens once, at load time.

use crate::MessageId;
use crate::location::LocId;
use crate::object::ObjId;
use crate::vocab::MotionId;

/// One of the three scripted maneuvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Maneuver {
    /// A passage that only admits a nearly empty-handed player.
    NarrowPassage,
    /// Drops a specific object, then continues with the next rule.
    ForcedDrop,
    /// A toll bridge guarded by a troll.
    TrollBridge,
}

/// Where a rule leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    /// Move to a location.
    Location(LocId),
    /// Run a special maneuver.
    Special(Maneuver),
    /// Stay put and print a message.
    Message(MessageId),
}

/// When a rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precondition {
    /// Always.
    Always,
    /// With the given percent chance.
    Chance(u8),
    /// Always for the player. Adversaries never take this rule.
    PlayerOnly,
    /// The player is carrying the object.
    Carrying(ObjId),
    /// The player is carrying the object or standing beside it.
    CarryingOrHere(ObjId),
    /// The object's property is anything but `value`.
    PropNot {
        /// The object inspected.
        obj: ObjId,
        /// The forbidden property value.
        value: i32,
    },
}

/// Why a packed value failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// `N` is zero.
    NoDestination,
    /// `N` lies in 304..=500.
    UnknownManeuver,
    /// The precondition names object 0.
    NoObject,
}

impl DecodeError {
    /// Short explanation.
    pub fn reason(self) -> &'static str {
        match self {
            Self::NoDestination => "destination 0",
            Self::UnknownManeuver => "special maneuver outside 301..=303",
            Self::NoObject => "precondition names object 0",
        }
    }
}

impl Precondition {
    /// Decode the `M` part.
    pub fn decode(m: u32) -> Result<Self, DecodeError> {
        let obj = |n: u32| {
            u16::try_from(n)
                .ok()
                .filter(|&n| n != 0)
                .map(ObjId)
                .ok_or(DecodeError::NoObject)
        };
        Ok(match m {
            0 => Self::Always,
            1..=99 => Self::Chance(m as u8),
            100 => Self::PlayerOnly,
            101..=200 => Self::Carrying(obj(m - 100)?),
            201..=300 => Self::CarryingOrHere(obj(m - 200)?),
            _ => Self::PropNot {
                obj: obj(m % 100)?,
                value: (m / 100) as i32 - 3,
            },
        })
    }

    /// The object the precondition inspects, if any.
    pub fn object(self) -> Option<ObjId> {
        match self {
            Self::Carrying(o) | Self::CarryingOrHere(o) | Self::PropNot { obj: o, .. } => Some(o),
            _ => None,
        }
    }
}

impl Destination {
    /// Decode the `N` part.
    pub fn decode(n: u32) -> Result<Self, DecodeError> {
        match n {
            0 => Err(DecodeError::NoDestination),
            1..=300 => Ok(Self::Location(LocId(n as u16))),
            301 => Ok(Self::Special(Maneuver::NarrowPassage)),
            302 => Ok(Self::Special(Maneuver::ForcedDrop)),
            303 => Ok(Self::Special(Maneuver::TrollBridge)),
            304..=500 => Err(DecodeError::UnknownManeuver),
            _ => Ok(Self::Message(
                MessageId::try_from(n - 500).unwrap_or(MessageId::MAX),
            )),
        }
    }

    /// The location reached, if this is plain movement.
    pub fn location(self) -> Option<LocId> {
        match self {
            Self::Location(loc) => Some(loc),
            _ => None,
        }
    }
}

/// A directed edge out of a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelRule {
    /// Motions that select this rule. [`MotionId::FORCED`] selects it always.
    pub motions: Vec<MotionId>,
    /// Where it leads.
    pub destination: Destination,
    /// When it applies.
    pub condition: Precondition,
}

impl TravelRule {
    /// Build a rule from its packed value.
    pub fn decode(motions: Vec<MotionId>, y: u32) -> Result<Self, DecodeError> {
        Ok(Self {
            motions,
            destination: Destination::decode(y % 1000)?,
            condition: Precondition::decode(y / 1000)?,
        })
    }

    /// True if `motion` selects this rule.
    pub fn matches(&self, motion: MotionId) -> bool {
        self.motions
            .iter()
            .any(|&m| m == MotionId::FORCED || m == motion)
    }

    /// True if this rule is a forced move.
    pub fn is_forced(&self) -> bool {
        self.motions.first() == Some(&MotionId::FORCED)
    }

    /// True if the two rules have the same packed value.
    pub fn same_outcome(&self, other: &TravelRule) -> bool {
        self.destination == other.destination && self.condition == other.condition
    }
}
