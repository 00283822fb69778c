//! HTTP client for OpenAI-compatible completion APIs.

use crate::openai_compat::{CompletionApiResponse, conversions};
use crate::{CompletionClient, CompletionRequest};
use async_trait::async_trait;
use reqwest::Client;
use stanza_error::{CompletionError, CompletionErrorKind};
use tracing::{debug, error, instrument};

const DEFAULT_PROMPT_PREFIX: &str = "Continue the following poem:\n";

/// Client for any API that serves `POST {base_url}/completions`.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    prompt_prefix: String,
}

impl OpenAICompatibleClient {
    /// Creates a new client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key for bearer authentication
    /// * `model` - Model identifier
    /// * `base_url` - API root, e.g. `https://api.fireworks.ai/inference/v1`
    #[instrument(skip(api_key), fields(model = %model))]
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        debug!(model = %model, url = %base_url, "Created completion client");

        Self {
            client: Client::new(),
            api_key,
            model,
            base_url,
            prompt_prefix: DEFAULT_PROMPT_PREFIX.to_string(),
        }
    }

    /// Replaces the text placed before the poem context.
    pub fn with_prompt_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prompt_prefix = prefix.into();
        self
    }

    /// Returns the model name.
    pub fn model_name(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionClient for OpenAICompatibleClient {
    #[instrument(skip(self, request), fields(model = %self.model, temperature = *request.temperature()))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let api_request = conversions::to_api_request(request, &self.model, &self.prompt_prefix)?;

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "HTTP request failed");
                if e.is_timeout() {
                    CompletionError::new(CompletionErrorKind::Timeout(e.to_string()))
                } else {
                    CompletionError::new(CompletionErrorKind::Http(format!(
                        "Request failed: {}",
                        e
                    )))
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            error!(status = %status, "Backend rate limit hit");
            return Err(CompletionError::new(CompletionErrorKind::RateLimit));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(status = %status, error = %error_text, "API error");
            return Err(CompletionError::new(CompletionErrorKind::Api {
                status: status.as_u16(),
                message: error_text,
            }));
        }

        let api_response: CompletionApiResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse response");
            CompletionError::new(CompletionErrorKind::ResponseParsing(format!(
                "Failed to parse JSON: {}",
                e
            )))
        })?;

        debug!(choices = api_response.choices.len(), "Received completion");
        conversions::from_api_response(api_response)
    }

    fn provider_name(&self) -> &'static str {
        "openai-compatible"
    }
}
