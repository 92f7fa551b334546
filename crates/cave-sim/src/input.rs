use cave_core::Vocabulary;

/// One word of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// Lookup key: the first five characters, lowercased.
    pub key: String,
    /// The word as typed.
    pub text: String,
}

impl Word {
    /// Wrap a typed word.
    pub fn new(text: &str) -> Self {
        Self {
            key: Vocabulary::key(text),
            text: text.to_string(),
        }
    }
}

/// A command line reduced to at most two words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    /// First word.
    pub first: Word,
    /// Second word, if any.
    pub second: Option<Word>,
    /// The line as typed.
    pub raw: String,
}

impl Input {
    /// Split a raw line. Returns `None` for a blank line. Words past the
    /// second are ignored.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let first = Word::new(words.next()?);
        let second = words.next().map(Word::new);
        Some(Self {
            first,
            second,
            raw: line.trim().to_string(),
        })
    }
}
