use rand::Rng;

use vocab_core::model::StudyMode;

/// Chooses the study mode once per study phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StudyModePicker {
    /// 50/50 between sequential and simultaneous.
    #[default]
    Random,
    Fixed(StudyMode),
}

impl StudyModePicker {
    #[must_use]
    pub fn pick(self) -> StudyMode {
        self.pick_with(&mut rand::rng())
    }

    pub fn pick_with<R: Rng>(self, rng: &mut R) -> StudyMode {
        match self {
            Self::Fixed(mode) => mode,
            Self::Random => {
                if rng.random_bool(0.5) {
                    StudyMode::Sequential
                } else {
                    StudyMode::Simultaneous
                }
            }
        }
    }

    /// Parse `sequential` / `simultaneous` (case-insensitive).
    #[must_use]
    pub fn parse_fixed(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "sequential" => Some(Self::Fixed(StudyMode::Sequential)),
            "simultaneous" => Some(Self::Fixed(StudyMode::Simultaneous)),
            _ => None,
        }
    }
}
