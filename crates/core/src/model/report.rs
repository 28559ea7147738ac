use serde::{Deserialize, Serialize};

use crate::model::definition::DefinitionForm;
use crate::model::spelling::SpellingResult;

/// Which phase produced a question record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Spelling,
    Definition,
}

/// One answered question, in the shape the learning platform reports on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub kind: QuestionKind,
    pub content: String,
    pub answer_expected: String,
    pub answer_given: String,
    pub pass: bool,
    pub response_time_ms: u64,
}

/// Everything the learner answered in one seeded session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub seed: String,
    pub questions: Vec<QuestionRecord>,
}

impl SessionReport {
    #[must_use]
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            questions: Vec::new(),
        }
    }

    pub fn record_spelling(&mut self, results: &[SpellingResult]) {
        self.questions
            .extend(results.iter().map(|result| QuestionRecord {
                kind: QuestionKind::Spelling,
                content: result.word.clone(),
                answer_expected: result.word.clone(),
                answer_given: result.user_answer.clone(),
                pass: result.correct,
                response_time_ms: result.response_time_ms,
            }));
    }

    /// Adds graded definitions; ungraded forms contribute nothing.
    pub fn record_definitions(&mut self, form: &DefinitionForm) {
        let response_time_ms = form.response_time_ms().unwrap_or(0);
        self.questions
            .extend(form.outcomes().into_iter().map(|outcome| QuestionRecord {
                kind: QuestionKind::Definition,
                content: outcome.word,
                answer_expected: outcome.expected,
                answer_given: outcome.answer,
                pass: outcome.passed,
                response_time_ms,
            }));
    }

    #[must_use]
    pub fn passed(&self, kind: QuestionKind) -> usize {
        self.questions
            .iter()
            .filter(|question| question.kind == kind && question.pass)
            .count()
    }

    #[must_use]
    pub fn total(&self, kind: QuestionKind) -> usize {
        self.questions
            .iter()
            .filter(|question| question.kind == kind)
            .count()
    }
}
