//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted while resolving `ServiceConfig`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("cannot read student token from {}", path.display())]
    TokenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{name} must be an http(s) URL, got {value:?}")]
    InvalidUrl { name: &'static str, value: String },
}

/// Errors emitted by `SeedService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecryptError {
    #[error("no student token is configured")]
    MissingToken,
    #[error("decrypt request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `GradingService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GradingError {
    #[error("grading request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
