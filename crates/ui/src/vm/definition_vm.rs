use std::sync::Arc;

use chrono::{DateTime, Utc};
use services::GradingError;
use tracing::warn;
use vocab_core::model::{DefinitionForm, DefinitionStatus, GradingRequest, WordSet};

use crate::views::ViewError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DefinitionIntent {
    Answer { index: usize, text: String },
    Submit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefinitionPromptVm {
    pub index: usize,
    pub word: String,
    pub answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefinitionResultVm {
    pub word: String,
    pub answer_label: String,
    pub expected: String,
    pub verdict_label: &'static str,
    pub passed: bool,
}

impl DefinitionResultVm {
    #[must_use]
    pub fn verdict_class(&self) -> &'static str {
        if self.passed {
            "verdict verdict--pass"
        } else {
            "verdict verdict--fail"
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DefinitionVm {
    form: DefinitionForm,
}

impl DefinitionVm {
    /// # Errors
    ///
    /// Returns `ViewError::Unknown` when there is nothing to define.
    pub fn start(words: &Arc<WordSet>, now: DateTime<Utc>) -> Result<Self, ViewError> {
        DefinitionForm::new(words, now)
            .map(|form| Self { form })
            .map_err(|_| ViewError::Unknown)
    }

    #[must_use]
    pub fn form(&self) -> &DefinitionForm {
        &self.form
    }

    #[must_use]
    pub fn status(&self) -> DefinitionStatus {
        self.form.status()
    }

    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.form.is_editable()
    }

    #[must_use]
    pub fn error(&self) -> Option<ViewError> {
        (self.status() == DefinitionStatus::Failed).then_some(ViewError::Grading)
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        match self.status() {
            DefinitionStatus::Submitting => "Grading...",
            DefinitionStatus::Failed => "Try again",
            DefinitionStatus::Editing | DefinitionStatus::Graded => "Submit",
        }
    }

    #[must_use]
    pub fn prompts(&self) -> Vec<DefinitionPromptVm> {
        self.form
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| DefinitionPromptVm {
                index,
                word: entry.word.clone(),
                answer: entry.answer.clone(),
            })
            .collect()
    }

    #[must_use]
    pub fn results(&self) -> Vec<DefinitionResultVm> {
        self.form
            .outcomes()
            .into_iter()
            .map(|outcome| DefinitionResultVm {
                answer_label: if outcome.answer.trim().is_empty() {
                    "No answer".to_string()
                } else {
                    outcome.answer
                },
                word: outcome.word,
                expected: outcome.expected,
                verdict_label: if outcome.passed {
                    "Correct"
                } else {
                    "Incorrect"
                },
                passed: outcome.passed,
            })
            .collect()
    }

    #[must_use]
    pub fn score_label(&self) -> String {
        format!(
            "{} of {} definitions accepted",
            self.form.passed_count(),
            self.form.verdicts().len()
        )
    }

    pub fn set_answer(&mut self, index: usize, text: String) {
        if let Err(err) = self.form.set_answer(index, text) {
            warn!(error = %err, "definition answer ignored");
        }
    }

    /// Lock the form and hand out the batch to grade.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if the form is not open for submission.
    pub fn begin_submit(&mut self, at: DateTime<Utc>) -> Result<Vec<GradingRequest>, ViewError> {
        self.form.begin_submit(at).map_err(|_| ViewError::Unknown)
    }

    /// Apply the grader's reply to the in-flight batch.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Grading` when the call failed or the reply did not line up
    /// with the batch. The typed answers are kept.
    pub fn finish(&mut self, graded: Result<Vec<bool>, GradingError>) -> Result<(), ViewError> {
        match graded {
            Ok(remote) => self.form.apply_verdicts(&remote).map(|_| ()).map_err(|err| {
                warn!(error = %err, "grading reply rejected");
                ViewError::Grading
            }),
            Err(err) => {
                warn!(error = %err, "grading request failed");
                self.form.fail();
                Err(ViewError::Grading)
            }
        }
    }
}
