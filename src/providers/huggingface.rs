//! HuggingFace Inference API client for zero-shot classification.
//!
//! This client uses HuggingFace's serverless inference endpoints.
//! See: <https://huggingface.co/docs/inference-providers/tasks/zero-shot-classification>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::ClassifyProvider;
use crate::config::{DEFAULT_BASE_URL, DEFAULT_REMOTE_MODEL, DEFAULT_TIMEOUT_SECS, RemoteConfig};
use crate::types::{Ranking, ScoredLabel};
use crate::{PetitionError, Result};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

/// Client for the HuggingFace Inference API.
#[derive(Clone)]
pub struct HuggingFaceClient {
    api_key: String,
    model: String,
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl std::fmt::Debug for HuggingFaceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl HuggingFaceClient {
    /// Create a client for the default endpoint and model.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        Self::build(api_key.into(), DEFAULT_REMOTE_MODEL.to_string(), base_url.into(), DEFAULT_TIMEOUT)
    }

    /// Create a client from resolved remote settings.
    pub fn from_config(config: &RemoteConfig) -> Result<Self> {
        Self::build(
            config.token.clone(),
            config.model.clone(),
            config.base_url.clone(),
            config.timeout,
        )
    }

    /// Use a different model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Use a different request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http = http_client(timeout)?;
        self.timeout = timeout;
        Ok(self)
    }

    /// The model ID requests are sent to.
    pub fn model_id(&self) -> &str {
        &self.model
    }

    fn build(api_key: String, model: String, base_url: String, timeout: Duration) -> Result<Self> {
        Ok(Self {
            api_key,
            model,
            http: http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Perform zero-shot classification.
    ///
    /// The ranking is returned in the order the API produced it.
    ///
    /// # Arguments
    /// * `text` - Text to classify
    /// * `labels` - Candidate labels
    pub async fn classify(&self, text: &str, labels: &[&str]) -> Result<Ranking> {
        if labels.is_empty() {
            return Err(PetitionError::InvalidInput(
                "at least one candidate label is required".to_string(),
            ));
        }

        let url = format!("{}/models/{}", self.base_url, self.model);
        debug!(%url, labels = labels.len(), "sending zero-shot request");

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&ZeroShotRequest {
                inputs: text,
                parameters: ZeroShotParameters {
                    candidate_labels: labels,
                },
            })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let response = check_status(response).await?;

        let body: ZeroShotResponse = response
            .json()
            .await
            .map_err(|e| self.transport_error(e))?;

        body.into_ranking()
    }

    fn transport_error(&self, err: reqwest::Error) -> PetitionError {
        if err.is_timeout() {
            PetitionError::Http(format!(
                "request timed out after {}s: {err}",
                self.timeout.as_secs()
            ))
        } else {
            PetitionError::Http(err.to_string())
        }
    }
}

fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| PetitionError::Configuration(format!("failed to build HTTP client: {e}")))
}

/// Anything but 200 is an API error carrying the status and response body.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(response);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            debug!(status = status.as_u16(), error = %e, "failed to read error response body");
            String::new()
        }
    };
    let message = match body.trim() {
        "" => status.canonical_reason().unwrap_or("no response body").to_string(),
        trimmed => trimmed.to_string(),
    };

    Err(PetitionError::Api {
        status: status.as_u16(),
        message,
    })
}

#[derive(Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [&'a str],
}

/// The API has answered in two shapes over time: parallel `labels` and
/// `scores` arrays, or a list of `{label, score}` objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum ZeroShotResponse {
    Columns {
        labels: Vec<String>,
        scores: Vec<f32>,
    },
    Rows(Vec<ScoredLabel>),
}

impl ZeroShotResponse {
    fn into_ranking(self) -> Result<Ranking> {
        let labels = match self {
            Self::Columns { labels, scores } => {
                if labels.len() != scores.len() {
                    return Err(PetitionError::DataError(format!(
                        "response has {} labels but {} scores",
                        labels.len(),
                        scores.len()
                    )));
                }
                labels
                    .into_iter()
                    .zip(scores)
                    .map(|(label, score)| ScoredLabel { label, score })
                    .collect()
            }
            Self::Rows(rows) => rows,
        };

        if labels.is_empty() {
            return Err(PetitionError::EmptyResponse);
        }

        Ok(Ranking::from_ranked(labels))
    }
}

// ============================================================================
// Provider Trait Implementation
// ============================================================================

#[async_trait]
impl ClassifyProvider for HuggingFaceClient {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn classify(&self, text: &str, labels: &[&str]) -> Result<Ranking> {
        // Delegate to the inherent method
        HuggingFaceClient::classify(self, text, labels).await
    }
}
