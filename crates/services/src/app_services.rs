use std::sync::Arc;

use tracing::{info, warn};

use vocab_core::model::{GameSession, StudyMode};

use crate::Clock;
use crate::config::ServiceConfig;
use crate::error::DecryptError;
use crate::grading_service::{GradingService, SubjectiveGrader};
use crate::seed_service::{SeedDecryptor, SeedService};
use crate::study_mode::StudyModePicker;

/// Assembles app-facing services for one game window.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    seeds: Arc<dyn SeedDecryptor>,
    grader: Arc<dyn SubjectiveGrader>,
    study_modes: StudyModePicker,
}

impl AppServices {
    /// Build services talking to the configured HTTP endpoints.
    #[must_use]
    pub fn from_config(config: &ServiceConfig, clock: Clock) -> Self {
        Self::new(
            clock,
            Arc::new(SeedService::new(config)),
            Arc::new(GradingService::new(config)),
        )
    }

    #[must_use]
    pub fn new(
        clock: Clock,
        seeds: Arc<dyn SeedDecryptor>,
        grader: Arc<dyn SubjectiveGrader>,
    ) -> Self {
        Self {
            clock,
            seeds,
            grader,
            study_modes: StudyModePicker::Random,
        }
    }

    #[must_use]
    pub fn with_study_modes(mut self, picker: StudyModePicker) -> Self {
        self.study_modes = picker;
        self
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn grader(&self) -> Arc<dyn SubjectiveGrader> {
        Arc::clone(&self.grader)
    }

    #[must_use]
    pub fn seeds(&self) -> Arc<dyn SeedDecryptor> {
        Arc::clone(&self.seeds)
    }

    /// Pick the mode for a study phase that is about to begin.
    #[must_use]
    pub fn pick_study_mode(&self) -> StudyMode {
        self.study_modes.pick()
    }

    /// Decrypt `seed` into a fresh session sitting at `Start`.
    ///
    /// An empty word set is not an error here; the session itself reports the dead end.
    ///
    /// # Errors
    ///
    /// Returns `DecryptError` when the seed cannot be decrypted.
    pub async fn load_session(&self, seed: &str) -> Result<GameSession, DecryptError> {
        let decrypted = self.seeds.decrypt(seed).await?;
        if decrypted.words.skipped() > 0 {
            warn!(skipped = decrypted.words.skipped(), "seed contained blank words");
        }
        let session = GameSession::from_decrypted(seed, decrypted);
        info!(
            words = session.words().len(),
            difficulty = %session.difficulty(),
            "session loaded"
        );
        Ok(session)
    }
}
