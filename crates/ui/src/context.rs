use std::sync::Arc;

use services::{AppServices, Clock};
use vocab_core::model::StudyMode;

use crate::platform::SpeakerRef;

pub trait UiApp: Send + Sync {
    fn services(&self) -> AppServices;
    /// Seed handed to the window at launch, if any.
    fn seed(&self) -> Option<String>;
    fn speaker(&self) -> SpeakerRef;
}

#[derive(Clone)]
pub struct AppContext {
    services: AppServices,
    seed: Option<String>,
    speaker: SpeakerRef,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let seed = app
            .seed()
            .map(|seed| seed.trim().to_string())
            .filter(|seed| !seed.is_empty());

        Self {
            services: app.services(),
            seed,
            speaker: app.speaker(),
        }
    }

    #[must_use]
    pub fn services(&self) -> AppServices {
        self.services.clone()
    }

    #[must_use]
    pub fn seed(&self) -> Option<&str> {
        self.seed.as_deref()
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.services.clock()
    }

    #[must_use]
    pub fn speaker(&self) -> SpeakerRef {
        Arc::clone(&self.speaker)
    }

    #[must_use]
    pub fn pick_study_mode(&self) -> StudyMode {
        self.services.pick_study_mode()
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
