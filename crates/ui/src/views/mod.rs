mod definition;
mod game;
mod spelling;
mod state;
mod study;

#[cfg(test)]
pub(crate) mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use definition::DefinitionView;
pub use game::{GameIntent, GameView};
pub use spelling::SpellingView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use study::StudyView;
