use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use vocab_core::model::DecryptedSeed;

use crate::config::ServiceConfig;
use crate::error::DecryptError;

/// Turns an opaque seed into a word set and difficulty.
#[async_trait]
pub trait SeedDecryptor: Send + Sync {
    async fn decrypt(&self, seed: &str) -> Result<DecryptedSeed, DecryptError>;
}

/// Client for the slides microservice `POST /decrypt` endpoint.
#[derive(Clone)]
pub struct SeedService {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl SeedService {
    #[must_use]
    pub fn new(config: &ServiceConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    #[must_use]
    pub fn with_client(client: Client, config: &ServiceConfig) -> Self {
        Self {
            client,
            base_url: config.decrypt_base_url.clone(),
            token: config.student_token.clone(),
        }
    }
}

#[async_trait]
impl SeedDecryptor for SeedService {
    /// # Errors
    ///
    /// Returns `DecryptError` when no token is configured, the request fails, the status
    /// is not 2xx, or the body is not a decrypted seed.
    async fn decrypt(&self, seed: &str) -> Result<DecryptedSeed, DecryptError> {
        let token = self.token.as_deref().ok_or(DecryptError::MissingToken)?;
        let url = ServiceConfig::endpoint(&self.base_url, "decrypt");
        debug!(%url, "decrypting seed");

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&DecryptRequest { encrypted: seed })
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "decrypt service rejected the seed");
            return Err(DecryptError::HttpStatus(response.status()));
        }

        let decrypted: DecryptedSeed = response.json().await?;
        debug!(
            words = decrypted.words.len(),
            difficulty = ?decrypted.difficulty,
            "seed decrypted"
        );
        Ok(decrypted)
    }
}

#[derive(Debug, Serialize)]
struct DecryptRequest<'a> {
    encrypted: &'a str,
}
