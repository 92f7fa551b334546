use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::MessageId;
use crate::error::{WorldError, WorldResult};
use crate::object::ObjId;

/// Identifier of a motion word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MotionId(pub u16);

impl MotionId {
    /// Matches any command: the rule fires on its own.
    pub const FORCED: MotionId = MotionId(1);
}

/// Identifier of an action verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerbId(pub u16);

/// What a word means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Go somewhere.
    Motion(MotionId),
    /// Names an object.
    Object(ObjId),
    /// Do something.
    Action(VerbId),
    /// Print a fixed message and nothing else.
    Message(MessageId),
}

/// The four vocabulary classes, in lookup priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordClass {
    /// Motion words.
    Motion,
    /// Object words.
    Object,
    /// Action verbs.
    Action,
    /// Literal-message words.
    Message,
}

impl WordClass {
    fn name(self) -> &'static str {
        match self {
            Self::Motion => "motion",
            Self::Object => "object",
            Self::Action => "action",
            Self::Message => "message",
        }
    }

    fn matches(self, token: &Token) -> bool {
        matches!(
            (self, token),
            (Self::Motion, Token::Motion(_))
                | (Self::Object, Token::Object(_))
                | (Self::Action, Token::Action(_))
                | (Self::Message, Token::Message(_))
        )
    }
}

/// Word lookup. Words are significant to their first five characters and
/// case-insensitive. A word may carry several meanings; plain lookup returns
/// the first one registered.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: HashMap<String, Vec<Token>>,
}

impl Vocabulary {
    /// Number of significant characters in a word.
    pub const KEY_LEN: usize = 5;

    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a word to its lookup key.
    pub fn key(word: &str) -> String {
        word.chars()
            .take(Self::KEY_LEN)
            .flat_map(char::to_lowercase)
            .collect()
    }

    /// Register `word` with meaning `token`.
    pub fn insert(&mut self, word: &str, token: Token) {
        let meanings = self.words.entry(Self::key(word)).or_default();
        if !meanings.contains(&token) {
            meanings.push(token);
        }
    }

    /// First meaning of `word`.
    pub fn lookup(&self, word: &str) -> Option<Token> {
        self.words
            .get(&Self::key(word))
            .and_then(|meanings| meanings.first().copied())
    }

    /// Meaning of `word` within one class.
    pub fn lookup_class(&self, word: &str, class: WordClass) -> Option<Token> {
        self.words
            .get(&Self::key(word))
            .and_then(|meanings| meanings.iter().find(|t| class.matches(t)).copied())
    }

    /// Resolve a motion word the engine depends on.
    pub fn motion(&self, word: &str) -> WorldResult<MotionId> {
        match self.lookup_class(word, WordClass::Motion) {
            Some(Token::Motion(m)) => Ok(m),
            _ => Err(missing(word, WordClass::Motion)),
        }
    }

    /// Resolve an action verb the engine depends on.
    pub fn action(&self, word: &str) -> WorldResult<VerbId> {
        match self.lookup_class(word, WordClass::Action) {
            Some(Token::Action(v)) => Ok(v),
            _ => Err(missing(word, WordClass::Action)),
        }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True if no words are registered.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn missing(word: &str, class: WordClass) -> WorldError {
    WorldError::MissingWord {
        class: class.name(),
        word: word.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_truncate_and_fold_case() {
        assert_eq!(Vocabulary::key("INVENTORY"), "inven");
        assert_eq!(Vocabulary::key("Go"), "go");
    }

    #[test]
    fn first_meaning_wins() {
        let mut vocab = Vocabulary::new();
        vocab.insert("water", Token::Object(ObjId(15)));
        vocab.insert("water", Token::Action(VerbId(13)));
        assert_eq!(vocab.lookup("WATER"), Some(Token::Object(ObjId(15))));
        assert_eq!(
            vocab.lookup_class("water", WordClass::Action),
            Some(Token::Action(VerbId(13)))
        );
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn long_words_share_a_key() {
        let mut vocab = Vocabulary::new();
        vocab.insert("extinguish", Token::Action(VerbId(8)));
        assert_eq!(vocab.lookup("extin"), Some(Token::Action(VerbId(8))));
        assert_eq!(vocab.lookup("extinct"), Some(Token::Action(VerbId(8))));
    }

    #[test]
    fn missing_words_are_errors() {
        let mut vocab = Vocabulary::new();
        vocab.insert("back", Token::Motion(MotionId(8)));
        assert_eq!(vocab.motion("back").unwrap(), MotionId(8));
        assert!(matches!(
            vocab.action("back"),
            Err(WorldError::MissingWord { class: "action", .. })
        ));
    }
}
