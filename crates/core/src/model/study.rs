use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::seed::Difficulty;
use crate::model::word_set::{WordEntry, WordSet};

/// Shared countdown used by the simultaneous mode when `difficulty × words` is zero.
pub const FALLBACK_SHARED_SECS: u32 = 30;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StudyError {
    #[error("cannot study an empty word set")]
    EmptyWordSet,
}

//
// ─── MODE / EVENTS ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyMode {
    /// One word at a time, each with its own countdown.
    Sequential,
    /// Every word at once under one shared countdown.
    Simultaneous,
}

impl StudyMode {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Sequential => "Sequential Study",
            Self::Simultaneous => "Simultaneous Study",
        }
    }
}

/// Identifies the countdown a tick was scheduled for.
///
/// Bumped whenever the countdown is re-armed or stopped; ticks from an older epoch are
/// ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerEpoch(u64);

impl TimerEpoch {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    pub(crate) fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyEvent {
    /// One second elapsed on the countdown armed at `epoch`.
    Tick { epoch: TimerEpoch },
    /// The learner asked for the next word (sequential mode only).
    NextWord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyTransition {
    /// Stale tick, event after completion, or an action the mode does not support.
    Ignored,
    /// The countdown moved down by one second.
    Counted { time_left: u32 },
    /// A new word is on screen; the countdown was re-armed.
    Advanced { index: usize, time_left: u32 },
    /// The phase finished; no countdown remains armed.
    Completed,
}

/// `difficulty × words`, or `FALLBACK_SHARED_SECS` when that product is zero.
#[must_use]
pub fn simultaneous_budget(difficulty_secs: u32, word_count: usize) -> u32 {
    let words = u32::try_from(word_count).unwrap_or(u32::MAX);
    match difficulty_secs.saturating_mul(words) {
        0 => FALLBACK_SHARED_SECS,
        secs => secs,
    }
}

/// Countdown for the word after a manual advance: unused time carries over, capped at 2d.
#[must_use]
pub fn carried_over_secs(difficulty_secs: u32, time_left: u32) -> u32 {
    difficulty_secs
        .saturating_add(time_left)
        .min(difficulty_secs.saturating_mul(2))
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State of one study phase.
///
/// All mutation goes through [`StudySession::apply`], which keeps ticks and manual
/// advances from racing each other.
#[derive(Debug, Clone, PartialEq)]
pub struct StudySession {
    words: Arc<WordSet>,
    difficulty: Difficulty,
    mode: StudyMode,
    index: usize,
    /// Per-word countdown in sequential mode, shared countdown in simultaneous mode.
    time_left: u32,
    epoch: TimerEpoch,
    completed: bool,
}

impl StudySession {
    /// # Errors
    ///
    /// Returns `StudyError::EmptyWordSet` if `words` is empty.
    pub fn new(
        words: Arc<WordSet>,
        difficulty: Difficulty,
        mode: StudyMode,
    ) -> Result<Self, StudyError> {
        if words.is_empty() {
            return Err(StudyError::EmptyWordSet);
        }
        let time_left = match mode {
            StudyMode::Sequential => difficulty.secs(),
            StudyMode::Simultaneous => simultaneous_budget(difficulty.secs(), words.len()),
        };
        Ok(Self {
            words,
            difficulty,
            mode,
            index: 0,
            time_left,
            epoch: TimerEpoch::default(),
            completed: false,
        })
    }

    #[must_use]
    pub fn mode(&self) -> StudyMode {
        self.mode
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn words(&self) -> &WordSet {
        &self.words
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn current(&self) -> Option<&WordEntry> {
        self.words.get(self.index)
    }

    #[must_use]
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    #[must_use]
    pub fn epoch(&self) -> TimerEpoch {
        self.epoch
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// True while a one-second countdown should be running for `epoch()`.
    #[must_use]
    pub fn timer_armed(&self) -> bool {
        !self.completed
    }

    #[must_use]
    pub fn is_last_word(&self) -> bool {
        self.index + 1 >= self.words.len()
    }

    /// Apply one event and report what changed.
    pub fn apply(&mut self, event: StudyEvent) -> StudyTransition {
        if self.completed {
            return StudyTransition::Ignored;
        }
        match event {
            StudyEvent::Tick { epoch } if epoch != self.epoch => StudyTransition::Ignored,
            StudyEvent::Tick { .. } => self.tick(),
            StudyEvent::NextWord => match self.mode {
                StudyMode::Sequential => self.next_word(),
                StudyMode::Simultaneous => StudyTransition::Ignored,
            },
        }
    }

    fn tick(&mut self) -> StudyTransition {
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left > 0 {
            return StudyTransition::Counted {
                time_left: self.time_left,
            };
        }
        match self.mode {
            StudyMode::Simultaneous => self.complete(),
            StudyMode::Sequential if self.is_last_word() => self.complete(),
            StudyMode::Sequential => self.advance_to(self.difficulty.secs()),
        }
    }

    fn next_word(&mut self) -> StudyTransition {
        if self.is_last_word() {
            return self.complete();
        }
        let carried = carried_over_secs(self.difficulty.secs(), self.time_left);
        self.advance_to(carried)
    }

    fn advance_to(&mut self, time_left: u32) -> StudyTransition {
        self.index += 1;
        self.time_left = time_left;
        self.epoch.bump();
        StudyTransition::Advanced {
            index: self.index,
            time_left,
        }
    }

    fn complete(&mut self) -> StudyTransition {
        self.completed = true;
        self.time_left = 0;
        self.epoch.bump();
        StudyTransition::Completed
    }
}
