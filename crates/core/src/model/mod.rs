pub mod definition;
pub mod font;
mod game;
mod report;
mod seed;
pub mod spelling;
pub mod study;
mod word_set;

pub use definition::{
    DefinitionEntry, DefinitionError, DefinitionForm, DefinitionOutcome, DefinitionStatus,
    GradingRequest,
};
pub use game::{GameSession, PhaseError, SessionPhase};
pub use report::{QuestionKind, QuestionRecord, SessionReport};
pub use seed::{DecryptedSeed, Difficulty, DifficultyError};
pub use spelling::{Feedback, SpellingAdvance, SpellingChallenge, SpellingError, SpellingResult};
pub use study::{StudyError, StudyEvent, StudyMode, StudySession, StudyTransition, TimerEpoch};
pub use word_set::{WordEntry, WordSet, WordSetError};
