use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;
use vocab_core::model::{
    Feedback, SpellingAdvance, SpellingChallenge, SpellingResult, TimerEpoch, WordSet,
};

use crate::views::ViewError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpellingIntent {
    Listen,
    Input(String),
    Submit,
    Restart,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub message: String,
    pub correct: bool,
}

impl FeedbackVm {
    fn from_feedback(feedback: &Feedback) -> Self {
        Self {
            message: feedback.message(),
            correct: feedback.is_correct(),
        }
    }

    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.correct {
            "spelling-feedback spelling-feedback--correct"
        } else {
            "spelling-feedback spelling-feedback--incorrect"
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpellingVm {
    challenge: SpellingChallenge,
}

impl SpellingVm {
    /// # Errors
    ///
    /// Returns `ViewError::Unknown` when there is nothing to spell.
    pub fn start(words: Arc<WordSet>, now: DateTime<Utc>) -> Result<Self, ViewError> {
        SpellingChallenge::new(words, now)
            .map(|challenge| Self { challenge })
            .map_err(|_| ViewError::Unknown)
    }

    #[must_use]
    pub fn current_word(&self) -> Option<&str> {
        self.challenge.current_word()
    }

    #[must_use]
    pub fn input(&self) -> &str {
        self.challenge.input()
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        format!(
            "Word {} of {}",
            self.challenge.index() + 1,
            self.challenge.total()
        )
    }

    #[must_use]
    pub fn feedback(&self) -> Option<FeedbackVm> {
        self.challenge.feedback().map(FeedbackVm::from_feedback)
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.challenge.can_submit()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.challenge.is_complete()
    }

    #[must_use]
    pub fn results(&self) -> &[SpellingResult] {
        self.challenge.results()
    }

    pub fn set_input(&mut self, value: String) {
        self.challenge.set_input(value);
    }

    /// Record the typed answer. Returns the epoch the delayed advance must carry.
    pub fn submit(&mut self, at: DateTime<Utc>) -> Option<TimerEpoch> {
        match self.challenge.submit(at) {
            Ok(submitted) => {
                debug!(
                    word = %submitted.result.word,
                    correct = submitted.result.correct,
                    "spelling answer recorded"
                );
                Some(submitted.advance_epoch)
            }
            Err(err) => {
                debug!(error = %err, "spelling answer rejected");
                None
            }
        }
    }

    pub fn advance(&mut self, epoch: TimerEpoch, at: DateTime<Utc>) -> SpellingAdvance {
        self.challenge.advance(epoch, at)
    }

    pub fn restart(&mut self, at: DateTime<Utc>) {
        self.challenge.restart(at);
    }
}
