use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::word_set::WordSet;
use crate::time::millis_between;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DefinitionError {
    #[error("cannot collect definitions for an empty word set")]
    EmptyWordSet,
    #[error("no definition prompt at index {index}")]
    UnknownPrompt { index: usize },
    #[error("definitions can no longer be edited")]
    Locked,
    #[error("no grading request is in flight")]
    NotSubmitting,
    #[error("grading returned {actual} verdicts for {expected} answers")]
    Misaligned { expected: usize, actual: usize },
}

//
// ─── WIRE SHAPE ────────────────────────────────────────────────────────────────
//

/// One item of the batch sent to the subjective grader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingRequest {
    pub question: String,
    pub model_answer: String,
    pub student_answer: String,
}

/// Force a fail wherever the student left the answer empty.
///
/// `remote` is index-aligned with `requests`.
///
/// # Errors
///
/// Returns `DefinitionError::Misaligned` if the lengths differ.
pub fn override_empty_answers(
    requests: &[GradingRequest],
    remote: &[bool],
) -> Result<Vec<bool>, DefinitionError> {
    if requests.len() != remote.len() {
        return Err(DefinitionError::Misaligned {
            expected: requests.len(),
            actual: remote.len(),
        });
    }
    Ok(requests
        .iter()
        .zip(remote)
        .map(|(request, verdict)| !request.student_answer.trim().is_empty() && *verdict)
        .collect())
}

//
// ─── FORM ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionStatus {
    Editing,
    /// The batch is with the grader; inputs are locked.
    Submitting,
    /// Verdicts are in; the form is read-only for good.
    Graded,
    /// The grading call failed; answers are kept so the learner can retry.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionEntry {
    pub word: String,
    pub expected: String,
    pub answer: String,
}

/// Row of the read-only results view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionOutcome {
    pub word: String,
    pub answer: String,
    pub expected: String,
    pub passed: bool,
}

/// Free-text definitions for the first ten words, graded in one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionForm {
    entries: Vec<DefinitionEntry>,
    status: DefinitionStatus,
    verdicts: Vec<bool>,
    in_flight: Vec<GradingRequest>,
    opened_at: DateTime<Utc>,
    submitted_at: Option<DateTime<Utc>>,
}

impl DefinitionForm {
    /// # Errors
    ///
    /// Returns `DefinitionError::EmptyWordSet` if `words` is empty.
    pub fn new(words: &Arc<WordSet>, opened_at: DateTime<Utc>) -> Result<Self, DefinitionError> {
        if words.is_empty() {
            return Err(DefinitionError::EmptyWordSet);
        }
        let entries = words
            .challenge_words()
            .iter()
            .map(|entry| DefinitionEntry {
                word: entry.word().to_string(),
                expected: entry.meaning().to_string(),
                answer: String::new(),
            })
            .collect();
        Ok(Self {
            entries,
            status: DefinitionStatus::Editing,
            verdicts: Vec::new(),
            in_flight: Vec::new(),
            opened_at,
            submitted_at: None,
        })
    }

    #[must_use]
    pub fn entries(&self) -> &[DefinitionEntry] {
        &self.entries
    }

    #[must_use]
    pub fn status(&self) -> DefinitionStatus {
        self.status
    }

    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(
            self.status,
            DefinitionStatus::Editing | DefinitionStatus::Failed
        )
    }

    /// Final verdicts, empty until graded.
    #[must_use]
    pub fn verdicts(&self) -> &[bool] {
        &self.verdicts
    }

    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.verdicts.iter().filter(|passed| **passed).count()
    }

    /// Milliseconds between opening the form and the latest submission.
    #[must_use]
    pub fn response_time_ms(&self) -> Option<u64> {
        self.submitted_at
            .map(|submitted| millis_between(self.opened_at, submitted))
    }

    /// # Errors
    ///
    /// Returns `DefinitionError::Locked` once submitted and
    /// `DefinitionError::UnknownPrompt` for an out-of-range index.
    pub fn set_answer(
        &mut self,
        index: usize,
        answer: impl Into<String>,
    ) -> Result<(), DefinitionError> {
        if !self.is_editable() {
            return Err(DefinitionError::Locked);
        }
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(DefinitionError::UnknownPrompt { index })?;
        entry.answer = answer.into();
        Ok(())
    }

    /// The batch that would be sent right now, one request per prompt.
    #[must_use]
    pub fn requests(&self) -> Vec<GradingRequest> {
        self.entries
            .iter()
            .map(|entry| GradingRequest {
                question: entry.word.clone(),
                model_answer: entry.expected.clone(),
                student_answer: entry.answer.clone(),
            })
            .collect()
    }

    /// Lock the inputs and hand out the batch for the grader.
    ///
    /// # Errors
    ///
    /// Returns `DefinitionError::Locked` if a batch is in flight or already graded.
    pub fn begin_submit(
        &mut self,
        at: DateTime<Utc>,
    ) -> Result<Vec<GradingRequest>, DefinitionError> {
        if !self.is_editable() {
            return Err(DefinitionError::Locked);
        }
        let requests = self.requests();
        self.in_flight = requests.clone();
        self.status = DefinitionStatus::Submitting;
        self.submitted_at = Some(at);
        Ok(requests)
    }

    /// Store the grader's verdicts, forcing empty answers to fail.
    ///
    /// A misaligned response moves the form to `Failed`, like a transport error.
    ///
    /// # Errors
    ///
    /// Returns `DefinitionError::NotSubmitting` without an in-flight batch and
    /// `DefinitionError::Misaligned` when the verdict count is wrong.
    pub fn apply_verdicts(&mut self, remote: &[bool]) -> Result<&[bool], DefinitionError> {
        if self.status != DefinitionStatus::Submitting {
            return Err(DefinitionError::NotSubmitting);
        }
        match override_empty_answers(&self.in_flight, remote) {
            Ok(verdicts) => {
                self.verdicts = verdicts;
                self.in_flight.clear();
                self.status = DefinitionStatus::Graded;
                Ok(&self.verdicts)
            }
            Err(err) => {
                self.fail();
                Err(err)
            }
        }
    }

    /// Record a failed grading call. Answers stay intact for a retry.
    pub fn fail(&mut self) {
        if self.status == DefinitionStatus::Submitting {
            self.in_flight.clear();
            self.status = DefinitionStatus::Failed;
        }
    }

    /// Per-word results once graded.
    #[must_use]
    pub fn outcomes(&self) -> Vec<DefinitionOutcome> {
        self.entries
            .iter()
            .zip(&self.verdicts)
            .map(|(entry, passed)| DefinitionOutcome {
                word: entry.word.clone(),
                answer: entry.answer.clone(),
                expected: entry.expected.clone(),
                passed: *passed,
            })
            .collect()
    }
}
