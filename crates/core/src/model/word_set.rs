use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WordSetError {
    #[error("word cannot be empty")]
    EmptyWord,
}

//
// ─── ENTRY ─────────────────────────────────────────────────────────────────────
//

/// A single word paired with its translation or definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    word: String,
    meaning: String,
}

impl WordEntry {
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Translation (study) or model definition (grading).
    #[must_use]
    pub fn meaning(&self) -> &str {
        &self.meaning
    }
}

//
// ─── WORD SET ──────────────────────────────────────────────────────────────────
//

/// Ordered mapping from word to its paired value.
///
/// Words are unique keys; insertion order is the presentation order used by the
/// sequential study mode and the spelling sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSet {
    entries: Vec<WordEntry>,
    positions: HashMap<String, usize>,
    skipped: usize,
}

impl WordSet {
    /// Number of words presented by the spelling and definition phases.
    pub const CHALLENGE_LIMIT: usize = 10;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a word set from `(word, meaning)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `WordSetError::EmptyWord` if any word is blank.
    pub fn from_pairs<W, M>(pairs: impl IntoIterator<Item = (W, M)>) -> Result<Self, WordSetError>
    where
        W: Into<String>,
        M: Into<String>,
    {
        let mut set = Self::new();
        for (word, meaning) in pairs {
            set.insert(word, meaning)?;
        }
        Ok(set)
    }

    /// Insert a word. A repeated word keeps its original position and takes the new meaning.
    ///
    /// # Errors
    ///
    /// Returns `WordSetError::EmptyWord` if `word` is blank.
    pub fn insert(
        &mut self,
        word: impl Into<String>,
        meaning: impl Into<String>,
    ) -> Result<(), WordSetError> {
        let word = word.into();
        if word.trim().is_empty() {
            return Err(WordSetError::EmptyWord);
        }
        let meaning = meaning.into();
        if let Some(&position) = self.positions.get(&word) {
            self.entries[position].meaning = meaning;
        } else {
            self.positions.insert(word.clone(), self.entries.len());
            self.entries.push(WordEntry { word, meaning });
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&WordEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn meaning_of(&self, word: &str) -> Option<&str> {
        self.positions
            .get(word)
            .and_then(|&position| self.entries.get(position))
            .map(WordEntry::meaning)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordEntry> {
        self.entries.iter()
    }

    /// Blank keys dropped while decoding a payload.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// The first `CHALLENGE_LIMIT` entries, in insertion order.
    #[must_use]
    pub fn challenge_words(&self) -> &[WordEntry] {
        let end = self.entries.len().min(Self::CHALLENGE_LIMIT);
        &self.entries[..end]
    }
}

impl<'a> IntoIterator for &'a WordSet {
    type Item = &'a WordEntry;
    type IntoIter = std::slice::Iter<'a, WordEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for WordSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.word, &entry.meaning)?;
        }
        map.end()
    }
}

// Visiting the map directly keeps the document order of the JSON object.
struct WordSetVisitor;

impl<'de> Visitor<'de> for WordSetVisitor {
    type Value = WordSet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping words to strings")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut set = WordSet::new();
        while let Some((word, meaning)) = access.next_entry::<String, String>()? {
            // A blank key has nothing to study; the rest of the payload still counts.
            if set.insert(word, meaning).is_err() {
                set.skipped += 1;
            }
        }
        Ok(set)
    }
}

impl<'de> Deserialize<'de> for WordSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(WordSetVisitor)
    }
}
