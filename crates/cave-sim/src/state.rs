//! The mutable game-state aggregate.
//!
//! One [`GameState`] exists per session. The turn dispatcher owns it and
//! lends it to the other components for the length of one operation.

use cave_core::{Fixed, LocId, ObjId, World};

use crate::config::GameConfig;

/// Where an object is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Place {
    /// Out of play.
    Limbo,
    /// In the player's hands.
    Carried,
    /// Lying at a location.
    At(LocId),
}

impl Place {
    /// The place for a location, with location 0 meaning limbo.
    pub fn at(loc: LocId) -> Self {
        if loc.is_nowhere() {
            Self::Limbo
        } else {
            Self::At(loc)
        }
    }
}

/// Per-object mutable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectState {
    /// Which object.
    pub id: ObjId,
    /// Primary location.
    pub place: Place,
    /// Fixedness, including any second location.
    pub fixed: Fixed,
    /// Property value. Negative on a treasure means not yet seen.
    pub prop: i32,
    /// Which of its inscriptions the object shows when read. Zero is the
    /// original one.
    pub inscription: u8,
}

/// How far the adversaries have woken up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Activation {
    /// Nothing happens until the player goes deep.
    Dormant,
    /// The player has been deep; the first meeting is pending.
    Encountered,
    /// Adversaries roam and throw knives that never hit.
    Active,
    /// At least one knife has been thrown. Accuracy grows with the level.
    Hostile(u8),
}

impl Activation {
    /// Chance in a thousand that a thrown knife hits.
    pub fn accuracy(self) -> u32 {
        match self {
            Self::Hostile(level) => 95 * u32::from(level),
            _ => 0,
        }
    }
}

/// One member of the adversary roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adversary {
    /// Current location, or nowhere once out of play.
    pub loc: LocId,
    /// Location before the last move.
    pub old_loc: LocId,
    /// Has noticed the player.
    pub seen: bool,
}

impl Adversary {
    fn starting_at(loc: LocId) -> Self {
        Self {
            loc,
            old_loc: loc,
            seen: false,
        }
    }
}

/// Whether generic adversaries are around a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Every generic adversary is out of play.
    Gone,
    /// None here, or the roster is not active yet.
    Elsewhere,
    /// The roster member at this index is here.
    Here(usize),
}

/// Where the last knife attack took place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KnifeSpot {
    /// No recent attack here.
    #[default]
    Hidden,
    /// Knives were thrown at this location this turn.
    At(LocId),
    /// The player has been told about the knives; no more tracking.
    Cautioned,
}

/// The endgame phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endgame {
    /// The cave is open.
    Open,
    /// The closing warning has been given.
    Warned,
    /// The cave is sealed.
    Closed,
}

/// Dwell tracking for one hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HintProgress {
    /// Consecutive turns at a qualifying location.
    pub dwell: i32,
    /// Taken; never offered again.
    pub granted: bool,
}

/// Everything that changes during a game.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Player location.
    pub loc: LocId,
    /// Destination chosen by the last command.
    pub new_loc: LocId,
    /// Previous location.
    pub old_loc: LocId,
    /// Location before the previous one: the last safe place after a death.
    pub old_loc2: LocId,

    objects: Vec<ObjectState>,
    /// Object named by the current command.
    pub object: Option<ObjId>,
    /// Object named by the previous command.
    pub old_obj: Option<ObjId>,

    /// Adversary activation level.
    pub activation: Activation,
    /// Generic adversaries followed by the antagonist.
    pub adversaries: Vec<Adversary>,
    /// Knife-attack bookkeeping.
    pub knife: KnifeSpot,

    /// Turns until the closing warning, once every treasure is found.
    pub clock1: i32,
    /// Turns from the warning until the cave closes.
    pub clock2: i32,
    /// The closing warning has been given.
    pub closing: bool,
    /// The cave is sealed.
    pub closed: bool,
    /// The player tried to leave after the warning.
    pub panic: bool,

    /// Treasures not yet seen.
    pub tally: u32,
    /// Commands accepted.
    pub turns: u32,
    /// Next turn threshold to watch for.
    pub threshold_index: usize,
    /// Points lost to turn thresholds.
    pub turn_penalty: u32,
    /// Points lost to hints.
    pub hint_penalty: i32,
    /// Hint bookkeeping, parallel to the world's hint table.
    pub hints: Vec<HintProgress>,

    /// Lamp turns remaining. Negative once the lamp has died.
    pub limit: i32,
    /// The low-lamp warning has been given.
    pub lamp_warned: bool,
    /// The player asked for instructions.
    pub novice: bool,
    /// Deaths so far.
    pub deaths: u32,

    /// Descriptions given per location since the last full one.
    pub abbrev: Vec<u32>,
    /// Times "look" has been used.
    pub detail: u32,
    /// The location being left was dark.
    pub was_dark: bool,
    /// Times the player typed "west" in full.
    pub west_count: u32,
    /// Times the player typed "go" with a direction.
    pub go_count: u32,
}

impl GameState {
    /// Fresh state for a new game in `world`.
    pub fn new(world: &World, config: &GameConfig) -> Self {
        let marks = world.landmarks();
        let objects: Vec<ObjectState> = world
            .objects()
            .iter()
            .map(|def| ObjectState {
                id: def.id,
                place: Place::at(def.place),
                fixed: def.fixed,
                prop: def.initial_prop(),
                inscription: 0,
            })
            .collect();
        let tally = world.treasures().count() as u32;
        let mut adversaries: Vec<Adversary> = marks
            .dwarf_starts
            .iter()
            .map(|&loc| Adversary::starting_at(loc))
            .collect();
        adversaries.push(Adversary::starting_at(marks.chest_hideout));

        Self {
            loc: marks.start,
            new_loc: marks.start,
            old_loc: LocId::NOWHERE,
            old_loc2: LocId::NOWHERE,
            objects,
            object: None,
            old_obj: None,
            activation: Activation::Dormant,
            adversaries,
            knife: KnifeSpot::Hidden,
            clock1: config.clock1,
            clock2: config.clock2,
            closing: false,
            closed: false,
            panic: false,
            tally,
            turns: 0,
            threshold_index: 0,
            turn_penalty: 0,
            hint_penalty: 0,
            hints: vec![HintProgress::default(); world.hints().len()],
            limit: config.lamp_limit,
            lamp_warned: false,
            novice: false,
            deaths: 0,
            abbrev: vec![0; world.location_count() + 1],
            detail: 0,
            was_dark: false,
            west_count: 0,
            go_count: 0,
        }
    }

    /// Current endgame phase.
    pub fn phase(&self) -> Endgame {
        if self.closed {
            Endgame::Closed
        } else if self.closing {
            Endgame::Warned
        } else {
            Endgame::Open
        }
    }

    // -----------------------------------------------------------------------
    // Objects
    // -----------------------------------------------------------------------

    fn slot(&self, id: ObjId) -> Option<&ObjectState> {
        self.objects.get(id.index()).filter(|o| o.id == id)
    }

    fn slot_mut(&mut self, id: ObjId) -> Option<&mut ObjectState> {
        self.objects.get_mut(id.index()).filter(|o| o.id == id)
    }

    /// All object states, in identifier order.
    pub fn objects(&self) -> &[ObjectState] {
        &self.objects
    }

    /// Where the object is.
    pub fn place(&self, id: ObjId) -> Place {
        self.slot(id).map_or(Place::Limbo, |o| o.place)
    }

    /// The object's property value.
    pub fn prop(&self, id: ObjId) -> i32 {
        self.slot(id).map_or(0, |o| o.prop)
    }

    /// Set the object's property value.
    pub fn set_prop(&mut self, id: ObjId, prop: i32) {
        if let Some(o) = self.slot_mut(id) {
            o.prop = prop;
        }
    }

    /// Which inscription the object shows.
    pub fn inscription(&self, id: ObjId) -> u8 {
        self.slot(id).map_or(0, |o| o.inscription)
    }

    /// Replace the object's inscription.
    pub fn set_inscription(&mut self, id: ObjId, inscription: u8) {
        if let Some(o) = self.slot_mut(id) {
            o.inscription = inscription;
        }
    }

    /// The object's fixedness.
    pub fn fixed(&self, id: ObjId) -> Fixed {
        self.slot(id).map_or(Fixed::Immovable, |o| o.fixed)
    }

    /// Change the object's fixedness.
    pub fn set_fixed(&mut self, id: ObjId, fixed: Fixed) {
        if let Some(o) = self.slot_mut(id) {
            o.fixed = fixed;
        }
    }

    /// The player is carrying the object.
    pub fn toting(&self, id: ObjId) -> bool {
        self.place(id) == Place::Carried
    }

    /// The object lies at `loc`, by either of its ends.
    pub fn at(&self, id: ObjId, loc: LocId) -> bool {
        self.slot(id).is_some_and(|o| {
            o.place == Place::At(loc) || (!loc.is_nowhere() && o.fixed.second() == Some(loc))
        })
    }

    /// The object is carried or at the player's location.
    pub fn here(&self, id: ObjId) -> bool {
        self.toting(id) || self.at(id, self.loc)
    }

    /// Put the object in the player's hands.
    pub fn carry(&mut self, id: ObjId) {
        self.move_to(id, Place::Carried);
    }

    /// Leave the object at `loc`.
    pub fn drop(&mut self, id: ObjId, loc: LocId) {
        self.move_to(id, Place::at(loc));
    }

    /// Take the object out of play.
    pub fn destroy(&mut self, id: ObjId) {
        self.move_to(id, Place::Limbo);
    }

    /// Set the object's primary location.
    pub fn move_to(&mut self, id: ObjId, place: Place) {
        if let Some(o) = self.slot_mut(id) {
            o.place = place;
        }
    }

    /// Move the object and return the property value that hides it until it
    /// has been handled: `-1 - prop`.
    pub fn put(&mut self, id: ObjId, loc: LocId, prop: i32) -> i32 {
        self.drop(id, loc);
        -1 - prop
    }

    /// Number of objects carried.
    pub fn holding(&self) -> usize {
        self.objects
            .iter()
            .filter(|o| o.place == Place::Carried)
            .count()
    }

    /// Objects carried, ascending.
    pub fn carried(&self) -> impl DoubleEndedIterator<Item = ObjId> + '_ {
        self.objects
            .iter()
            .filter(|o| o.place == Place::Carried)
            .map(|o| o.id)
    }

    /// Objects at `loc`, ascending.
    pub fn objects_at(&self, loc: LocId) -> impl Iterator<Item = ObjId> + '_ {
        self.objects
            .iter()
            .map(|o| o.id)
            .filter(move |&id| self.at(id, loc))
    }

    /// No object lies at `loc`.
    pub fn nothing_at(&self, loc: LocId) -> bool {
        self.objects_at(loc).next().is_none()
    }

    // -----------------------------------------------------------------------
    // Adversaries
    // -----------------------------------------------------------------------

    /// Roster index of the antagonist.
    pub fn antagonist(&self) -> usize {
        self.adversaries.len().saturating_sub(1)
    }

    /// Whether a generic adversary is at `loc`.
    pub fn presence(&self, loc: LocId) -> Presence {
        if self.activation < Activation::Active {
            return Presence::Elsewhere;
        }
        let mut presence = Presence::Gone;
        for (i, member) in self.adversaries[..self.antagonist()].iter().enumerate() {
            if member.loc == loc {
                return Presence::Here(i);
            }
            if !member.loc.is_nowhere() {
                presence = Presence::Elsewhere;
            }
        }
        presence
    }
}
