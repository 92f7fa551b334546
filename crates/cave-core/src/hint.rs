use serde::{Deserialize, Serialize};

use crate::MessageId;
use crate::location::Conditions;

/// The situation a hint addresses. Each topic owns one condition bit and
/// one eligibility test in the hint engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintTopic {
    /// Getting into the cave.
    Cave,
    /// Catching the bird.
    Bird,
    /// Getting past the snake.
    Snake,
    /// Lost in the maze.
    Maze,
    /// The dark room.
    Dark,
    /// Witt's End.
    Witt,
    /// The urn.
    Urn,
    /// The forest.
    Woods,
    /// The ogre.
    Ogre,
    /// The last treasure.
    Jade,
}

impl HintTopic {
    /// The location condition bit that marks where this hint applies.
    pub fn condition(self) -> Conditions {
        match self {
            Self::Cave => Conditions::HINT_CAVE,
            Self::Bird => Conditions::HINT_BIRD,
            Self::Snake => Conditions::HINT_SNAKE,
            Self::Maze => Conditions::HINT_MAZE,
            Self::Dark => Conditions::HINT_DARK,
            Self::Witt => Conditions::HINT_WITT,
            Self::Urn => Conditions::HINT_URN,
            Self::Woods => Conditions::HINT_WOODS,
            Self::Ogre => Conditions::HINT_OGRE,
            Self::Jade => Conditions::HINT_JADE,
        }
    }
}

/// A row of the hint table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintDef {
    /// What the hint is about.
    pub topic: HintTopic,
    /// Turns to dwell at a marked location before the hint is offered.
    pub turns: i32,
    /// Score penalty for taking the hint.
    pub penalty: i32,
    /// Message asking whether the player wants help.
    pub question: MessageId,
    /// Message with the hint itself.
    pub answer: MessageId,
}
