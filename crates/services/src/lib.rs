#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod grading_service;
pub mod seed_service;
pub mod study_mode;

pub use vocab_core::Clock;

pub use app_services::AppServices;
pub use config::ServiceConfig;
pub use error::{ConfigError, DecryptError, GradingError};
pub use grading_service::{GradingService, SubjectiveGrader};
pub use seed_service::{SeedDecryptor, SeedService};
pub use study_mode::StudyModePicker;
