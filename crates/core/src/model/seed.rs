use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::word_set::WordSet;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DifficultyError {
    #[error("difficulty must be > 0 seconds")]
    Zero,
}

/// Seconds allotted per word in sequential study.
///
/// Also scales the shared countdown of the simultaneous mode.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Difficulty(u32);

impl Difficulty {
    pub const DEFAULT_SECS: u32 = 10;

    /// # Errors
    ///
    /// Returns `DifficultyError::Zero` if `secs` is zero.
    pub fn new(secs: u32) -> Result<Self, DifficultyError> {
        if secs == 0 {
            return Err(DifficultyError::Zero);
        }
        Ok(Self(secs))
    }

    /// Resolve the optional numeric difficulty carried by a decrypted seed.
    ///
    /// Missing, non-finite and non-positive values fall back to the default; fractional
    /// values round to the nearest second, never below one.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_seed_value(raw: Option<f64>) -> Self {
        match raw {
            Some(value) if value.is_finite() && value > 0.0 => {
                let rounded = value.round().clamp(1.0, f64::from(u32::MAX));
                Self(rounded as u32)
            }
            _ => Self::default(),
        }
    }

    #[must_use]
    pub fn secs(self) -> u32 {
        self.0
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(Self::DEFAULT_SECS)
    }
}

impl fmt::Debug for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Difficulty({}s)", self.0)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Payload returned by the decrypt service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecryptedSeed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<f64>,
    pub words: WordSet,
}

impl DecryptedSeed {
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_seed_value(self.difficulty)
    }
}
