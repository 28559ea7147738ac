use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::study::TimerEpoch;
use crate::model::word_set::{WordEntry, WordSet};
use crate::time::millis_between;

/// How long feedback stays on screen before the next word.
pub const FEEDBACK_DELAY: Duration = Duration::from_millis(1500);

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SpellingError {
    #[error("cannot run a spelling challenge on an empty word set")]
    EmptyWordSet,
    #[error("answer cannot be blank")]
    BlankAnswer,
    #[error("previous answer is still being shown")]
    AwaitingAdvance,
    #[error("spelling challenge already completed")]
    Completed,
}

//
// ─── RESULTS ───────────────────────────────────────────────────────────────────
//

/// Outcome for one spelled word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellingResult {
    pub word: String,
    pub correct: bool,
    /// Exactly what the learner typed, untrimmed.
    pub user_answer: String,
    pub response_time_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect { expected: String },
}

impl Feedback {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Correct)
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Correct => "Awesome! You spelled that perfectly!".to_string(),
            Self::Incorrect { expected } => {
                format!("Oops! The correct spelling is \"{expected}\". Keep trying!")
            }
        }
    }
}

/// Case-insensitive, whitespace-trimmed equality. No fuzzy matching.
#[must_use]
pub fn spelling_matches(answer: &str, word: &str) -> bool {
    answer.trim().to_lowercase() == word.trim().to_lowercase()
}

/// Returned by [`SpellingChallenge::submit`]; the caller schedules the advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    pub result: SpellingResult,
    /// Pass back to [`SpellingChallenge::advance`] after [`FEEDBACK_DELAY`].
    pub advance_epoch: TimerEpoch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellingAdvance {
    /// The delayed advance belonged to an earlier attempt (e.g. before a restart).
    Stale,
    NextWord { index: usize },
    Completed,
}

//
// ─── CHALLENGE ─────────────────────────────────────────────────────────────────
//

/// Spelling test over the first ten words of a word set.
#[derive(Debug, Clone, PartialEq)]
pub struct SpellingChallenge {
    words: Arc<WordSet>,
    index: usize,
    input: String,
    results: Vec<SpellingResult>,
    feedback: Option<Feedback>,
    awaiting_advance: bool,
    completed: bool,
    epoch: TimerEpoch,
    prompted_at: DateTime<Utc>,
}

impl SpellingChallenge {
    /// `started_at` should come from the caller's clock.
    ///
    /// # Errors
    ///
    /// Returns `SpellingError::EmptyWordSet` if `words` is empty.
    pub fn new(words: Arc<WordSet>, started_at: DateTime<Utc>) -> Result<Self, SpellingError> {
        if words.is_empty() {
            return Err(SpellingError::EmptyWordSet);
        }
        Ok(Self {
            words,
            index: 0,
            input: String::new(),
            results: Vec::new(),
            feedback: None,
            awaiting_advance: false,
            completed: false,
            epoch: TimerEpoch::default(),
            prompted_at: started_at,
        })
    }

    fn challenge_words(&self) -> &[WordEntry] {
        self.words.challenge_words()
    }

    /// Number of words in this challenge (at most ten).
    #[must_use]
    pub fn total(&self) -> usize {
        self.challenge_words().len()
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The word to speak and spell; `None` once completed.
    #[must_use]
    pub fn current_word(&self) -> Option<&str> {
        if self.completed {
            return None;
        }
        self.challenge_words().get(self.index).map(WordEntry::word)
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn results(&self) -> &[SpellingResult] {
        &self.results
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn awaiting_advance(&self) -> bool {
        self.awaiting_advance
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.completed && !self.awaiting_advance && !self.input.trim().is_empty()
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|result| result.correct).count()
    }

    /// Replace the typed answer. Editing clears visible feedback.
    pub fn set_input(&mut self, value: impl Into<String>) {
        if self.completed || self.awaiting_advance {
            return;
        }
        self.input = value.into();
        self.feedback = None;
    }

    /// Check the typed answer against the current word and record the result.
    ///
    /// # Errors
    ///
    /// Returns `SpellingError::Completed`, `SpellingError::AwaitingAdvance` or
    /// `SpellingError::BlankAnswer` when the answer cannot be taken right now.
    pub fn submit(&mut self, at: DateTime<Utc>) -> Result<Submitted, SpellingError> {
        if self.completed {
            return Err(SpellingError::Completed);
        }
        if self.awaiting_advance {
            return Err(SpellingError::AwaitingAdvance);
        }
        if self.input.trim().is_empty() {
            return Err(SpellingError::BlankAnswer);
        }
        let word = self
            .challenge_words()
            .get(self.index)
            .map(|entry| entry.word().to_string())
            .ok_or(SpellingError::Completed)?;

        let correct = spelling_matches(&self.input, &word);
        let result = SpellingResult {
            word: word.clone(),
            correct,
            user_answer: self.input.clone(),
            response_time_ms: millis_between(self.prompted_at, at),
        };

        self.results.push(result.clone());
        self.feedback = Some(if correct {
            Feedback::Correct
        } else {
            Feedback::Incorrect { expected: word }
        });
        self.awaiting_advance = true;
        self.epoch.bump();

        Ok(Submitted {
            result,
            advance_epoch: self.epoch,
        })
    }

    /// Move past the feedback of the last submission.
    pub fn advance(&mut self, epoch: TimerEpoch, at: DateTime<Utc>) -> SpellingAdvance {
        if !self.awaiting_advance || epoch != self.epoch {
            return SpellingAdvance::Stale;
        }
        self.awaiting_advance = false;

        if self.index + 1 >= self.total() {
            self.completed = true;
            return SpellingAdvance::Completed;
        }

        self.index += 1;
        self.input.clear();
        self.feedback = None;
        self.prompted_at = at;
        SpellingAdvance::NextWord { index: self.index }
    }

    /// Start over from the first word. Any pending advance becomes stale.
    pub fn restart(&mut self, at: DateTime<Utc>) {
        self.index = 0;
        self.input.clear();
        self.results.clear();
        self.feedback = None;
        self.awaiting_advance = false;
        self.completed = false;
        self.epoch.bump();
        self.prompted_at = at;
    }
}
