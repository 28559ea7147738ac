use std::sync::Arc;

use vocab_core::model::font::{translation_scale, word_scale};
use vocab_core::model::{
    Difficulty, StudyEvent, StudyMode, StudySession, StudyTransition, TimerEpoch, WordEntry,
    WordSet,
};

use super::time_fmt::format_countdown;
use crate::views::ViewError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudyIntent {
    Tick(TimerEpoch),
    NextWord,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StudyCardVm {
    pub word: String,
    pub meaning: String,
    pub word_scale: f32,
    pub meaning_scale: f32,
}

impl StudyCardVm {
    fn from_entry(entry: &WordEntry) -> Self {
        Self {
            word: entry.word().to_string(),
            meaning: entry.meaning().to_string(),
            word_scale: word_scale(entry.word()),
            meaning_scale: translation_scale(entry.meaning()),
        }
    }

    #[must_use]
    pub fn word_style(&self) -> String {
        format!("font-size: {:.1}rem;", self.word_scale)
    }

    #[must_use]
    pub fn meaning_style(&self) -> String {
        format!("font-size: {:.1}rem;", self.meaning_scale)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StudyVm {
    session: StudySession,
}

impl StudyVm {
    /// # Errors
    ///
    /// Returns `ViewError::Unknown` when there is nothing to study.
    pub fn start(
        words: Arc<WordSet>,
        difficulty: Difficulty,
        mode: StudyMode,
    ) -> Result<Self, ViewError> {
        StudySession::new(words, difficulty, mode)
            .map(|session| Self { session })
            .map_err(|_| ViewError::Unknown)
    }

    #[must_use]
    pub fn mode(&self) -> StudyMode {
        self.session.mode()
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        self.session.mode().title()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }

    /// Epoch the countdown should run under, `None` once study is over.
    #[must_use]
    pub fn armed_epoch(&self) -> Option<TimerEpoch> {
        self.session
            .timer_armed()
            .then(|| self.session.epoch())
    }

    #[must_use]
    pub fn time_label(&self) -> String {
        format!("Time left: {}", format_countdown(self.session.time_left()))
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        format!(
            "Word {} of {}",
            self.session.index() + 1,
            self.session.words().len()
        )
    }

    #[must_use]
    pub fn current_card(&self) -> Option<StudyCardVm> {
        self.session.current().map(StudyCardVm::from_entry)
    }

    #[must_use]
    pub fn cards(&self) -> Vec<StudyCardVm> {
        self.session
            .words()
            .iter()
            .map(StudyCardVm::from_entry)
            .collect()
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.mode() == StudyMode::Sequential && !self.is_complete()
    }

    #[must_use]
    pub fn next_label(&self) -> &'static str {
        if self.session.is_last_word() {
            "Finish"
        } else {
            "Next word"
        }
    }

    pub fn apply(&mut self, intent: StudyIntent) -> StudyTransition {
        let event = match intent {
            StudyIntent::Tick(epoch) => StudyEvent::Tick { epoch },
            StudyIntent::NextWord => StudyEvent::NextWord,
        };
        self.session.apply(event)
    }
}
