use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::MessageId;
use crate::error::{WorldError, WorldResult};
use crate::hint::HintDef;
use crate::location::{Conditions, LocId, Location, Zone};
use crate::object::{Fixed, ObjId, ObjectDef};
use crate::travel::{Destination, TravelRule};
use crate::vocab::{MotionId, Token, VerbId, Vocabulary};

const SAMPLE_CAVE: &str = include_str!("../data/sample_cave.json");

/// First message of the reincarnation ladder. Each rung is a question at
/// `81 + 2n` followed by its acceptance at `82 + 2n`.
const FIRST_REINCARNATION: MessageId = 81;
const MAX_REINCARNATIONS: u16 = 5;

// ---------------------------------------------------------------------------
// Serialized form
// ---------------------------------------------------------------------------

/// A travel rule as written in the world document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelData {
    /// Packed `1000 * M + N` value.
    pub y: u32,
    /// Motion numbers selecting the rule.
    pub motions: Vec<MotionId>,
}

/// A location as written in the world document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationData {
    /// Identifier, contiguous from 1.
    pub id: LocId,
    /// Full description.
    pub long: String,
    /// Abbreviated description.
    #[serde(default)]
    pub short: Option<String>,
    /// Condition bits.
    #[serde(default)]
    pub conditions: Conditions,
    /// Region.
    #[serde(default)]
    pub zone: Zone,
    /// Travel rules in table order.
    #[serde(default)]
    pub travel: Vec<TravelData>,
}

/// An object as written in the world document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectData {
    /// Identifier, contiguous from 1.
    pub id: ObjId,
    /// Mnemonic.
    pub name: String,
    /// Words naming the object.
    #[serde(default)]
    pub words: Vec<String>,
    /// Inventory line.
    #[serde(default)]
    pub inventory: Option<String>,
    /// Description per property value.
    #[serde(default)]
    pub states: Vec<String>,
    /// Initial location, `0` for limbo.
    #[serde(default)]
    pub place: LocId,
    /// `0` movable, negative immovable, positive a second location.
    #[serde(default)]
    pub fixed: i32,
    /// Property value set when a treasure is first seen.
    #[serde(default)]
    pub found_state: i32,
}

/// A group of words sharing one meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordGroup {
    /// Motion, verb or message number.
    pub id: u16,
    /// The words.
    pub words: Vec<String>,
}

/// A turn-count penalty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnThreshold {
    /// Turns after which the message fires.
    pub turns: u32,
    /// Points lost.
    pub penalty: u32,
    /// Message shown.
    pub text: String,
}

/// Locations the engine treats specially.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landmarks {
    /// Where the player starts; the lamp is left here after a death.
    pub start: LocId,
    /// Where the player wakes after reincarnation.
    pub revival: LocId,
    /// Outside the grate: above ground, but "cave" is not silly here.
    pub grate_outside: LocId,
    /// Where the hollow voice speaks and the closing clock pauses.
    pub y2: LocId,
    /// Starting locations of the generic adversaries.
    pub dwarf_starts: Vec<LocId>,
    /// Where an adversary goes if it starts on top of the player.
    pub dwarf_alternate: LocId,
    /// Where the antagonist hides the chest. Also its starting point.
    pub chest_hideout: LocId,
    /// Where the antagonist leaves its note.
    pub note_hideout: LocId,
    /// North-east end of the final repository.
    pub repository_ne: LocId,
    /// South-west end of the final repository.
    pub repository_sw: LocId,
    /// The two ends of the narrow passage.
    pub narrow_passage: [LocId; 2],
}

impl Landmarks {
    fn all(&self) -> impl Iterator<Item = LocId> + '_ {
        [
            self.start,
            self.revival,
            self.grate_outside,
            self.y2,
            self.dwarf_alternate,
            self.chest_hideout,
            self.note_hideout,
            self.repository_ne,
            self.repository_sw,
        ]
        .into_iter()
        .chain(self.narrow_passage)
        .chain(self.dwarf_starts.iter().copied())
    }
}

/// The world document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldData {
    /// Display name.
    pub name: String,
    /// Objects from this identifier on are treasures.
    pub first_treasure: u16,
    /// Special locations.
    pub landmarks: Landmarks,
    /// Locations.
    pub locations: Vec<LocationData>,
    /// Objects.
    pub objects: Vec<ObjectData>,
    /// Motion words.
    #[serde(default)]
    pub motions: Vec<WordGroup>,
    /// Action verbs.
    #[serde(default)]
    pub actions: Vec<WordGroup>,
    /// Words that just print a message.
    #[serde(default)]
    pub specials: Vec<WordGroup>,
    /// Message texts by number.
    #[serde(default)]
    pub messages: HashMap<MessageId, String>,
    /// Hint table.
    #[serde(default)]
    pub hints: Vec<HintDef>,
    /// Turn thresholds in ascending order.
    #[serde(default)]
    pub thresholds: Vec<TurnThreshold>,
}

impl WorldData {
    /// The built-in sample cave.
    pub fn sample() -> WorldResult<Self> {
        Ok(serde_json::from_str(SAMPLE_CAVE)?)
    }
}

// ---------------------------------------------------------------------------
// Loaded world
// ---------------------------------------------------------------------------

/// The loaded, validated world. Immutable for the rest of the session.
#[derive(Debug, Clone)]
pub struct World {
    /// Display name.
    pub name: String,
    locations: Vec<Location>,
    objects: Vec<ObjectDef>,
    vocabulary: Vocabulary,
    messages: HashMap<MessageId, String>,
    hints: Vec<HintDef>,
    thresholds: Vec<TurnThreshold>,
    landmarks: Landmarks,
}

impl World {
    /// Parse and validate a world document.
    pub fn from_json(json: &str) -> WorldResult<Self> {
        Self::from_data(serde_json::from_str(json)?)
    }

    /// The built-in sample cave.
    pub fn sample() -> WorldResult<Self> {
        Self::from_data(WorldData::sample()?)
    }

    /// Validate a world document and decode its travel table.
    pub fn from_data(data: WorldData) -> WorldResult<Self> {
        for (i, loc) in data.locations.iter().enumerate() {
            check_contiguous("location", loc.id.0, i)?;
        }
        for (i, obj) in data.objects.iter().enumerate() {
            check_contiguous("object", obj.id.0, i)?;
        }
        let location_count = data.locations.len();
        let object_count = data.objects.len();
        let known_loc = |loc: LocId| -> WorldResult<LocId> {
            if loc.index() <= location_count {
                Ok(loc)
            } else {
                Err(WorldError::UnknownLocation(loc))
            }
        };
        let known_obj = |obj: ObjId| -> WorldResult<ObjId> {
            if obj.0 >= 1 && usize::from(obj.0) <= object_count {
                Ok(obj)
            } else {
                Err(WorldError::UnknownObject(obj))
            }
        };

        let mut locations = vec![Location::limbo()];
        for loc in data.locations {
            let mut travel = Vec::with_capacity(loc.travel.len());
            for entry in loc.travel {
                if entry.motions.is_empty() {
                    return Err(WorldError::Validation(format!(
                        "location {}: travel rule {} has no motions",
                        loc.id, entry.y
                    )));
                }
                let rule = TravelRule::decode(entry.motions, entry.y).map_err(|e| {
                    WorldError::BadTravel {
                        origin: loc.id,
                        value: entry.y,
                        reason: e.reason(),
                    }
                })?;
                if let Destination::Location(dest) = rule.destination {
                    known_loc(dest)?;
                }
                if let Some(obj) = rule.condition.object() {
                    known_obj(obj)?;
                }
                travel.push(rule);
            }
            let forced = travel.first().is_some_and(TravelRule::is_forced);
            locations.push(Location {
                id: loc.id,
                long: loc.long,
                short: loc.short,
                conditions: if forced {
                    Conditions::empty()
                } else {
                    loc.conditions
                },
                zone: loc.zone,
                travel,
                forced,
            });
        }

        let mut vocabulary = Vocabulary::new();
        for group in &data.motions {
            for word in &group.words {
                vocabulary.insert(word, Token::Motion(MotionId(group.id)));
            }
        }

        let mut objects = Vec::with_capacity(object_count);
        for obj in data.objects {
            known_loc(obj.place)?;
            let fixed = Fixed::from_raw(obj.fixed);
            if let Some(second) = fixed.second() {
                known_loc(second)?;
            }
            for word in &obj.words {
                vocabulary.insert(word, Token::Object(obj.id));
            }
            objects.push(ObjectDef {
                id: obj.id,
                name: obj.name,
                inventory: obj.inventory,
                states: obj.states,
                place: obj.place,
                fixed,
                treasure: obj.id.0 >= data.first_treasure,
                found_state: obj.found_state,
            });
        }

        for group in &data.actions {
            for word in &group.words {
                vocabulary.insert(word, Token::Action(VerbId(group.id)));
            }
        }
        for group in &data.specials {
            for word in &group.words {
                vocabulary.insert(word, Token::Message(group.id));
            }
        }

        if data.landmarks.dwarf_starts.is_empty() {
            return Err(WorldError::Validation(
                "at least one dwarf start is required".into(),
            ));
        }
        for loc in data.landmarks.all() {
            if loc.is_nowhere() {
                return Err(WorldError::Validation("landmark at location 0".into()));
            }
            known_loc(loc)?;
        }

        for hint in &data.hints {
            for id in [hint.question, hint.answer] {
                if !data.messages.contains_key(&id) {
                    log::warn!("hint {:?} refers to missing message {id}", hint.topic);
                }
            }
        }
        if data.thresholds.windows(2).any(|w| w[0].turns >= w[1].turns) {
            return Err(WorldError::Validation(
                "turn thresholds must be in ascending order".into(),
            ));
        }

        log::debug!(
            "loaded world '{}': {} locations, {} objects, {} words",
            data.name,
            location_count,
            objects.len(),
            vocabulary.len()
        );

        Ok(Self {
            name: data.name,
            locations,
            objects,
            vocabulary,
            messages: data.messages,
            hints: data.hints,
            thresholds: data.thresholds,
            landmarks: data.landmarks,
        })
    }

    // -----------------------------------------------------------------------
    // Locations
    // -----------------------------------------------------------------------

    /// The location with this identifier. Unknown identifiers yield limbo.
    pub fn location(&self, id: LocId) -> &Location {
        self.locations
            .get(id.index())
            .unwrap_or(&self.locations[0])
    }

    /// All real locations, in identifier order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter().skip(1)
    }

    /// Number of real locations.
    pub fn location_count(&self) -> usize {
        self.locations.len() - 1
    }

    /// Special locations.
    pub fn landmarks(&self) -> &Landmarks {
        &self.landmarks
    }

    // -----------------------------------------------------------------------
    // Objects
    // -----------------------------------------------------------------------

    /// The object with this identifier.
    pub fn object(&self, id: ObjId) -> Option<&ObjectDef> {
        if id.0 == 0 {
            return None;
        }
        self.objects.get(id.index())
    }

    /// All objects, in identifier order.
    pub fn objects(&self) -> &[ObjectDef] {
        &self.objects
    }

    /// Identifiers of all objects, ascending.
    pub fn object_ids(&self) -> impl DoubleEndedIterator<Item = ObjId> + '_ {
        self.objects.iter().map(|o| o.id)
    }

    /// Identifiers of all treasures, ascending.
    pub fn treasures(&self) -> impl Iterator<Item = ObjId> + '_ {
        self.objects.iter().filter(|o| o.treasure).map(|o| o.id)
    }

    /// Find an object by mnemonic.
    pub fn object_named(&self, name: &str) -> WorldResult<ObjId> {
        self.objects
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.id)
            .ok_or_else(|| WorldError::MissingObject(name.to_string()))
    }

    // -----------------------------------------------------------------------
    // Text and tables
    // -----------------------------------------------------------------------

    /// Word lookup.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Message text.
    pub fn message(&self, id: MessageId) -> Option<&str> {
        self.messages.get(&id).map(String::as_str)
    }

    /// Hint table.
    pub fn hints(&self) -> &[HintDef] {
        &self.hints
    }

    /// Turn thresholds, ascending.
    pub fn thresholds(&self) -> &[TurnThreshold] {
        &self.thresholds
    }

    /// How many reincarnations the message table can narrate.
    pub fn max_deaths(&self) -> u32 {
        (0..MAX_REINCARNATIONS)
            .filter(|n| self.messages.contains_key(&(FIRST_REINCARNATION + 2 * n)))
            .map(|n| u32::from(n) + 1)
            .max()
            .unwrap_or(0)
    }
}

fn check_contiguous(kind: &'static str, found: u16, index: usize) -> WorldResult<()> {
    if usize::from(found) == index + 1 {
        Ok(())
    } else {
        Err(WorldError::NonContiguous {
            kind,
            found,
            position: index + 1,
        })
    }
}
