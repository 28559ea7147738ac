use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use vocab_core::model::GradingRequest;

use crate::config::ServiceConfig;
use crate::error::GradingError;

/// Grades free-text answers against model answers, one verdict per request.
#[async_trait]
pub trait SubjectiveGrader: Send + Sync {
    /// Raw verdicts from the grader, index-aligned with `requests`.
    async fn grade(&self, requests: &[GradingRequest]) -> Result<Vec<bool>, GradingError>;
}

/// Client for `POST {api}/utils/subjective/bool`.
#[derive(Clone)]
pub struct GradingService {
    client: Client,
    base_url: String,
}

impl GradingService {
    #[must_use]
    pub fn new(config: &ServiceConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    #[must_use]
    pub fn with_client(client: Client, config: &ServiceConfig) -> Self {
        Self {
            client,
            base_url: config.api_base_url.clone(),
        }
    }
}

#[async_trait]
impl SubjectiveGrader for GradingService {
    /// Sends the whole batch in a single call. No retries.
    ///
    /// # Errors
    ///
    /// Returns `GradingError` if the request fails or the status is not 2xx.
    async fn grade(&self, requests: &[GradingRequest]) -> Result<Vec<bool>, GradingError> {
        let url = ServiceConfig::endpoint(&self.base_url, "utils/subjective/bool");
        debug!(%url, count = requests.len(), "grading definitions");

        let response = self
            .client
            .post(url)
            .json(&GradeBatch { requests })
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "grading service rejected the batch");
            return Err(GradingError::HttpStatus(response.status()));
        }

        let body: GradeResponse = response.json().await?;
        Ok(body.responses)
    }
}

#[derive(Debug, Serialize)]
struct GradeBatch<'a> {
    requests: &'a [GradingRequest],
}

#[derive(Debug, Deserialize)]
struct GradeResponse {
    responses: Vec<bool>,
}
