use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::seed::{DecryptedSeed, Difficulty};
use crate::model::word_set::WordSet;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PhaseError {
    #[error("no words to study")]
    NoData,
    #[error("expected phase {expected}, session is in {actual}")]
    OutOfOrder {
        expected: SessionPhase,
        actual: SessionPhase,
    },
}

/// Stages of a session, in the only order they can occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Start,
    Study,
    Spelling,
    Definition,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Study => "study",
            Self::Spelling => "spelling",
            Self::Definition => "definition",
        };
        f.write_str(name)
    }
}

/// Top-level phase selector.
///
/// Owns only the phase indicator and the shared word set; each phase owns its own
/// results. A session built from an empty word set is stuck at `Start` for good.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    seed: String,
    words: Arc<WordSet>,
    difficulty: Difficulty,
    phase: SessionPhase,
}

impl GameSession {
    #[must_use]
    pub fn new(seed: impl Into<String>, words: WordSet, difficulty: Difficulty) -> Self {
        Self {
            seed: seed.into(),
            words: Arc::new(words),
            difficulty,
            phase: SessionPhase::Start,
        }
    }

    #[must_use]
    pub fn from_decrypted(seed: impl Into<String>, decrypted: DecryptedSeed) -> Self {
        let difficulty = decrypted.difficulty();
        Self::new(seed, decrypted.words, difficulty)
    }

    #[must_use]
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Read-only word set shared with every phase.
    #[must_use]
    pub fn words(&self) -> Arc<WordSet> {
        Arc::clone(&self.words)
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Permanent "no data" state: the word set is empty, nothing can start.
    #[must_use]
    pub fn is_dead_end(&self) -> bool {
        self.words.is_empty()
    }

    /// Leave `Start` for `Study` (learner pressed start).
    ///
    /// # Errors
    ///
    /// Returns `PhaseError::NoData` for an empty word set and
    /// `PhaseError::OutOfOrder` if the session already started.
    pub fn begin(&mut self) -> Result<SessionPhase, PhaseError> {
        if self.is_dead_end() {
            return Err(PhaseError::NoData);
        }
        self.advance(SessionPhase::Start, SessionPhase::Study)
    }

    /// # Errors
    ///
    /// Returns `PhaseError::OutOfOrder` unless the session is in `Study`.
    pub fn complete_study(&mut self) -> Result<SessionPhase, PhaseError> {
        self.advance(SessionPhase::Study, SessionPhase::Spelling)
    }

    /// # Errors
    ///
    /// Returns `PhaseError::OutOfOrder` unless the session is in `Spelling`.
    pub fn complete_spelling(&mut self) -> Result<SessionPhase, PhaseError> {
        self.advance(SessionPhase::Spelling, SessionPhase::Definition)
    }

    fn advance(
        &mut self,
        expected: SessionPhase,
        next: SessionPhase,
    ) -> Result<SessionPhase, PhaseError> {
        if self.phase != expected {
            return Err(PhaseError::OutOfOrder {
                expected,
                actual: self.phase,
            });
        }
        self.phase = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(pairs: &[(&str, &str)]) -> GameSession {
        let words = WordSet::from_pairs(pairs.iter().copied()).unwrap();
        GameSession::new("seed", words, Difficulty::default())
    }

    #[test]
    fn phases_advance_in_fixed_order() {
        let mut game = session(&[("cat", "a small animal")]);
        assert_eq!(game.phase(), SessionPhase::Start);
        assert_eq!(game.begin(), Ok(SessionPhase::Study));
        assert_eq!(game.complete_study(), Ok(SessionPhase::Spelling));
        assert_eq!(game.complete_spelling(), Ok(SessionPhase::Definition));
    }

    #[test]
    fn out_of_order_signals_are_rejected() {
        let mut game = session(&[("cat", "a small animal")]);
        assert_eq!(
            game.complete_spelling(),
            Err(PhaseError::OutOfOrder {
                expected: SessionPhase::Spelling,
                actual: SessionPhase::Start,
            })
        );
        game.begin().unwrap();
        game.complete_study().unwrap();
        // A second study completion never rewinds or skips.
        assert!(game.complete_study().is_err());
        assert!(game.begin().is_err());
        assert_eq!(game.phase(), SessionPhase::Spelling);
    }

    #[test]
    fn empty_word_set_never_leaves_start() {
        let mut game = GameSession::new("seed", WordSet::new(), Difficulty::default());
        assert!(game.is_dead_end());
        assert_eq!(game.begin(), Err(PhaseError::NoData));
        assert_eq!(game.begin(), Err(PhaseError::NoData));
        assert_eq!(game.phase(), SessionPhase::Start);
    }

    #[test]
    fn decrypted_seed_sets_difficulty() {
        let decrypted: DecryptedSeed =
            serde_json::from_str(r#"{"difficulty":5,"words":{"cat":"a small animal"}}"#)
                .unwrap();
        let game = GameSession::from_decrypted("abc", decrypted);
        assert_eq!(game.difficulty().secs(), 5);
        assert_eq!(game.seed(), "abc");
    }
}
