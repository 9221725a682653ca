use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use staffsearch_common::{AppConfig, Result, StaffSearchError};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::provider::{non_empty, EmbeddingProvider};
use crate::types::{ApiErrorBody, EmbedRequest, EmbedResponse};

const DEFAULT_MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// OpenAI embeddings API client
#[derive(Debug, Clone)]
pub struct OpenAiEmbedder {
    base_url: String,
    api_key: String,
    model: String,
    max_retries: u32,
    client: Client,
}

impl OpenAiEmbedder {
    /// Create new OpenAI embedder
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StaffSearchError::config(format!("Failed to create HTTP client: {}", e)))?;

        let model = model.into();
        info!("OpenAI embedder initialized: {} ({})", base_url, model);
        Ok(Self {
            base_url,
            api_key: api_key.into(),
            model,
            max_retries: DEFAULT_MAX_RETRIES,
            client,
        })
    }

    /// Create embedder from application config
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let api_key = config
            .openai_api_key
            .clone()
            .ok_or_else(|| StaffSearchError::config("OPENAI_API_KEY must be set in environment"))?;
        Self::new(&config.openai_base_url, api_key, &config.embedding_model)
    }

    /// Override the number of attempts per call (minimum 1)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    fn embeddings_url(&self) -> String {
        format!("{}/v1/embeddings", self.base_url)
    }

    /// Generate embedding with retry and exponential backoff
    async fn embed_with_retry(&self, text: &str) -> Result<Vec<f32>> {
        let url = self.embeddings_url();
        let request = EmbedRequest {
            model: &self.model,
            input: non_empty(text),
        };

        debug!("Generating embedding - Model: {}, Text length: {}", self.model, text.len());

        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.try_embed(&url, &request).await {
                Ok(embedding) => {
                    debug!("Received embedding - Dimension: {}", embedding.len());
                    return Ok(embedding);
                }
                Err(AttemptError { error, retryable: false }) => {
                    warn!("Embedding request rejected, not retrying: {}", error);
                    return Err(error);
                }
                Err(AttemptError { error, .. }) => {
                    if attempt < self.max_retries {
                        let delay = Duration::from_secs(2u64.pow(attempt - 1));
                        warn!(
                            "Embedding request failed (attempt {}/{}): {}. Retrying in {:?}...",
                            attempt, self.max_retries, error, delay
                        );
                        tokio::time::sleep(delay).await;
                    }
                    last_error = Some(error);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| StaffSearchError::embedding("All retries failed")))
    }

    /// Single attempt to generate embedding
    async fn try_embed(
        &self,
        url: &str,
        request: &EmbedRequest<'_>,
    ) -> std::result::Result<Vec<f32>, AttemptError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AttemptError::retry(format!("Failed to send embedding request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AttemptError {
                error: StaffSearchError::embedding(describe_failure(status, &body)),
                retryable: is_retryable(status),
            });
        }

        let result: EmbedResponse = response
            .json()
            .await
            .map_err(|e| AttemptError::retry(format!("Failed to parse embedding response: {}", e)))?;

        match result.into_first() {
            Some(embedding) if !embedding.is_empty() => Ok(embedding),
            _ => Err(AttemptError::retry("Empty embedding from provider")),
        }
    }
}

/// Failure of a single request and whether another attempt can help
struct AttemptError {
    error: StaffSearchError,
    retryable: bool,
}

impl AttemptError {
    fn retry(msg: impl Into<String>) -> Self {
        Self {
            error: StaffSearchError::embedding(msg),
            retryable: true,
        }
    }
}

/// Client errors other than rate limiting fail the same way on every attempt
fn is_retryable(status: StatusCode) -> bool {
    !status.is_client_error() || status == StatusCode::TOO_MANY_REQUESTS
}

/// Short description of a non-2xx response, preferring the API's own message
fn describe_failure(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.chars().take(200).collect());
    if detail.is_empty() {
        format!("Embedding API returned {}", status)
    } else {
        format!("Embedding API returned {}: {}", status, detail)
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_with_retry(text).await
    }

    fn model(&self) -> &str {
        &self.model
    }
}
