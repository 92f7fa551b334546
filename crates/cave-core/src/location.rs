use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::travel::TravelRule;

/// Identifier of a location. `0` is limbo, the place of things not in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocId(pub u16);

impl LocId {
    /// Limbo: out of play.
    pub const NOWHERE: LocId = LocId(0);

    /// True for limbo.
    pub fn is_nowhere(self) -> bool {
        self == Self::NOWHERE
    }

    /// Position in per-location tables, with limbo at index 0.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for LocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

bitflags! {
    /// Per-location condition bits.
    ///
    /// Bits 11 and up mark locations a hint is interested in; the mapping
    /// from hint topic to bit lives in [`crate::hint::HintTopic::condition`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Conditions: u32 {
        /// Lit without a lamp.
        const LIGHT = 1 << 0;
        /// The liquid here is oil rather than water.
        const OILY = 1 << 1;
        /// There is liquid here.
        const FLUID = 1 << 2;
        /// The pirate must not enter.
        const NO_PIRATE = 1 << 3;
        /// "Back" is refused here.
        const NO_BACK = 1 << 4;
        /// Trying to get into the cave.
        const HINT_CAVE = 1 << 11;
        /// Trying to catch the bird.
        const HINT_BIRD = 1 << 12;
        /// Trying to deal with the snake.
        const HINT_SNAKE = 1 << 13;
        /// Lost in a maze.
        const HINT_MAZE = 1 << 14;
        /// Pondering the dark room.
        const HINT_DARK = 1 << 15;
        /// At Witt's End.
        const HINT_WITT = 1 << 16;
        /// Cliff with urn.
        const HINT_URN = 1 << 17;
        /// Lost in the forest.
        const HINT_WOODS = 1 << 18;
        /// Trying to deal with the ogre.
        const HINT_OGRE = 1 << 19;
        /// Found all treasures except the jade.
        const HINT_JADE = 1 << 20;
    }
}

impl Conditions {
    const HINT_MASK: u32 = !0 << 11;

    /// True if any hint-interest bit is set.
    pub fn has_hint_interest(self) -> bool {
        self.bits() & Self::HINT_MASK != 0
    }
}

impl Serialize for Conditions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Conditions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        Ok(Conditions::from_bits_retain(bits))
    }
}

/// Coarse region a location belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// Above ground.
    Surface,
    /// Inside, but short of the deep cave.
    #[default]
    Cave,
    /// The deep cave, where adversaries roam.
    Deep,
}

/// Liquid available at a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liquid {
    /// Water.
    Water,
    /// Oil.
    Oil,
}

/// A location in the loaded world.
#[derive(Debug, Clone)]
pub struct Location {
    /// Identifier.
    pub id: LocId,
    /// Full description.
    pub long: String,
    /// Abbreviated description, if any.
    pub short: Option<String>,
    /// Condition bits. Empty for forced-motion locations.
    pub conditions: Conditions,
    /// Region.
    pub zone: Zone,
    /// Outgoing travel rules in table order.
    pub travel: Vec<TravelRule>,
    /// The player is moved on immediately after the description.
    pub forced: bool,
}

impl Location {
    /// The limbo placeholder at index 0.
    pub(crate) fn limbo() -> Self {
        Self {
            id: LocId::NOWHERE,
            long: String::new(),
            short: None,
            conditions: Conditions::empty(),
            zone: Zone::Cave,
            travel: Vec::new(),
            forced: false,
        }
    }

    /// True if `flag` is set.
    pub fn has(&self, flag: Conditions) -> bool {
        self.conditions.contains(flag)
    }

    /// Above ground.
    pub fn outside(&self) -> bool {
        self.zone == Zone::Surface
    }

    /// Deep enough for adversaries.
    pub fn deep(&self) -> bool {
        self.zone == Zone::Deep
    }

    /// Liquid available here.
    pub fn liquid(&self) -> Option<Liquid> {
        if !self.has(Conditions::FLUID) {
            None
        } else if self.has(Conditions::OILY) {
            Some(Liquid::Oil)
        } else {
            Some(Liquid::Water)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(conditions: Conditions) -> Location {
        Location {
            conditions,
            ..Location::limbo()
        }
    }

    #[test]
    fn hint_interest_ignores_low_bits() {
        assert!(!(Conditions::LIGHT | Conditions::NO_BACK).has_hint_interest());
        assert!(Conditions::HINT_CAVE.has_hint_interest());
        assert!((Conditions::LIGHT | Conditions::HINT_JADE).has_hint_interest());
    }

    #[test]
    fn liquid_from_bits() {
        assert_eq!(loc(Conditions::LIGHT).liquid(), None);
        assert_eq!(loc(Conditions::FLUID).liquid(), Some(Liquid::Water));
        assert_eq!(
            loc(Conditions::FLUID | Conditions::OILY).liquid(),
            Some(Liquid::Oil)
        );
        // Oil bit without the fluid bit means nothing.
        assert_eq!(loc(Conditions::OILY).liquid(), None);
    }

    #[test]
    fn conditions_serialize_as_bits() {
        let c = Conditions::LIGHT | Conditions::HINT_BIRD;
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "4097");
        let back: Conditions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn limbo_is_nowhere() {
        assert!(LocId(0).is_nowhere());
        assert!(!LocId(3).is_nowhere());
        assert_eq!(LocId(7).index(), 7);
    }
}
