use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.example-learning.app/v1";
pub const DEFAULT_DECRYPT_URL: &str = "https://slides.example-learning.app";

pub const API_BASE_URL_VAR: &str = "VOCAB_API_BASE_URL";
pub const DECRYPT_URL_VAR: &str = "VOCAB_DECRYPT_URL";
pub const STUDENT_TOKEN_VAR: &str = "VOCAB_STUDENT_TOKEN";
pub const TOKEN_FILE_VAR: &str = "VOCAB_TOKEN_FILE";

/// Endpoints and credentials for the two remote services.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub api_base_url: String,
    pub decrypt_base_url: String,
    pub student_token: Option<String>,
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("api_base_url", &self.api_base_url)
            .field("decrypt_base_url", &self.decrypt_base_url)
            .field("student_token", &self.student_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            decrypt_base_url: DEFAULT_DECRYPT_URL.to_string(),
            student_token: None,
        }
    }
}

impl ServiceConfig {
    /// Resolve endpoints and the student token from the environment.
    ///
    /// The token comes from `VOCAB_STUDENT_TOKEN`, else the first line of the file named by
    /// `VOCAB_TOKEN_FILE`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a URL is malformed or the token file cannot be read.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = non_empty_var(API_BASE_URL_VAR) {
            config = config.with_api_base_url(url)?;
        }
        if let Some(url) = non_empty_var(DECRYPT_URL_VAR) {
            config = config.with_decrypt_base_url(url)?;
        }
        if let Some(token) = non_empty_var(STUDENT_TOKEN_VAR) {
            config.student_token = Some(token);
        } else if let Some(path) = non_empty_var(TOKEN_FILE_VAR) {
            config = config.with_token_file(PathBuf::from(path))?;
        }
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` for a non-http(s) value.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Result<Self, ConfigError> {
        self.api_base_url = validate_url("api base url", url.into())?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` for a non-http(s) value.
    pub fn with_decrypt_base_url(mut self, url: impl Into<String>) -> Result<Self, ConfigError> {
        self.decrypt_base_url = validate_url("decrypt url", url.into())?;
        Ok(self)
    }

    #[must_use]
    pub fn with_student_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.student_token = (!token.trim().is_empty()).then(|| token.trim().to_string());
        self
    }

    /// Load the student token from the first non-empty line of `path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TokenFile` if the file cannot be read.
    pub fn with_token_file(mut self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::TokenFile {
            path: path.to_path_buf(),
            source,
        })?;
        self.student_token = raw
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string);
        Ok(self)
    }

    pub(crate) fn endpoint(base: &str, path: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn validate_url(name: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => {
            Ok(trimmed.to_string())
        }
        _ => Err(ConfigError::InvalidUrl { name, value }),
    }
}
