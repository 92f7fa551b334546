//! The seam between the engine and whoever is playing.
//!
//! The engine never formats text. It hands [`Speech`] values to a
//! [`Console`], which renders them, and reads raw command lines back.

use std::collections::VecDeque;

use cave_core::{LocId, MessageId, ObjId};

/// A message parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// A count.
    Number(i64),
    /// A word the player typed.
    Word(String),
}

/// Which location description to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    /// The full text.
    Long,
    /// The abbreviated text.
    Short,
}

/// Something the engine wants shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Speech {
    /// An indexed message with its parameters.
    Message {
        /// Message number.
        id: MessageId,
        /// Parameters, in `%1`, `%2` order.
        params: Vec<Param>,
    },
    /// A location description.
    Location {
        /// The location.
        loc: LocId,
        /// Long or short text.
        form: Form,
    },
    /// An object's description for a property value.
    Object {
        /// The object.
        obj: ObjId,
        /// Property value selecting the text.
        state: i32,
    },
    /// An object's inventory line.
    Inventory(ObjId),
    /// A turn-threshold message, by table index.
    Threshold(usize),
    /// Acknowledgement of the reseed debug command.
    SeedSet(u64),
}

impl Speech {
    /// A message without parameters.
    pub fn message(id: MessageId) -> Self {
        Self::Message {
            id,
            params: Vec::new(),
        }
    }

    /// The message number, if this is an indexed message.
    pub fn message_id(&self) -> Option<MessageId> {
        match self {
            Self::Message { id, .. } => Some(*id),
            _ => None,
        }
    }
}

/// Input and output for a game session.
pub trait Console {
    /// Show something to the player.
    fn speak(&mut self, speech: Speech);

    /// Read one raw command line. `None` means end of input.
    fn read_line(&mut self) -> Option<String>;
}

/// A console fed from a fixed script that records everything spoken.
#[derive(Debug, Clone, Default)]
pub struct ScriptConsole {
    input: VecDeque<String>,
    transcript: Vec<Speech>,
}

impl ScriptConsole {
    /// A console that will answer with `lines`, then report end of input.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Queue another line.
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.input.push_back(line.into());
    }

    /// Everything spoken so far.
    pub fn transcript(&self) -> &[Speech] {
        &self.transcript
    }

    /// Indexed messages spoken so far, in order.
    pub fn messages(&self) -> Vec<MessageId> {
        self.transcript.iter().filter_map(Speech::message_id).collect()
    }

    /// True if message `id` has been spoken.
    pub fn said(&self, id: MessageId) -> bool {
        self.transcript.iter().any(|s| s.message_id() == Some(id))
    }

    /// Forget the transcript so far.
    pub fn clear(&mut self) {
        self.transcript.clear();
    }

    /// Lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.input.len()
    }
}

impl Console for ScriptConsole {
    fn speak(&mut self, speech: Speech) {
        self.transcript.push(speech);
    }

    fn read_line(&mut self) -> Option<String> {
        self.input.pop_front()
    }
}
