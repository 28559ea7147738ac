use thiserror::Error;

use crate::model::{
    DefinitionError, DifficultyError, PhaseError, SpellingError, StudyError, WordSetError,
};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    WordSet(#[from] WordSetError),
    #[error(transparent)]
    Difficulty(#[from] DifficultyError),
    #[error(transparent)]
    Phase(#[from] PhaseError),
    #[error(transparent)]
    Study(#[from] StudyError),
    #[error(transparent)]
    Spelling(#[from] SpellingError),
    #[error(transparent)]
    Definition(#[from] DefinitionError),
}
