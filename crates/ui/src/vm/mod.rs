mod definition_vm;
mod spelling_vm;
mod study_vm;
mod time_fmt;
mod timer;

pub use definition_vm::{DefinitionIntent, DefinitionPromptVm, DefinitionResultVm, DefinitionVm};
pub use spelling_vm::{FeedbackVm, SpellingIntent, SpellingVm};
pub use study_vm::{StudyCardVm, StudyIntent, StudyVm};
pub use time_fmt::format_countdown;
pub use timer::{TICK_INTERVAL, TimerSlot, spawn_after, spawn_ticker};
