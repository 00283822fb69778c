//! The completion capability consumed by the generation engine.

use async_trait::async_trait;
use derive_builder::Builder;
use derive_getters::Getters;
use stanza_error::CompletionError;
use std::sync::Arc;

/// Parameters for a single completion call.
#[derive(Debug, Clone, PartialEq, Builder, Getters)]
#[builder(setter(into))]
pub struct CompletionRequest {
    /// Poem context to continue
    prompt: String,
    /// Sampling temperature
    temperature: f64,
    /// Maximum tokens to generate
    #[builder(default = "100")]
    max_tokens: u32,
    /// Sequences that end generation
    #[builder(default = "vec![\"\\n\".to_string()]")]
    stop: Vec<String>,
}

impl CompletionRequest {
    /// Creates a request with every field given.
    pub fn new(prompt: String, temperature: f64, max_tokens: u32, stop: Vec<String>) -> Self {
        Self {
            prompt,
            temperature,
            max_tokens,
            stop,
        }
    }

    /// Creates a new builder for CompletionRequest.
    pub fn builder() -> CompletionRequestBuilder {
        CompletionRequestBuilder::default()
    }
}

/// Produces one generated text fragment per call.
///
/// Implementations may be slow or fail; callers treat every failure as the
/// absence of a result.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Generates a continuation for the request.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;

    /// Name of the backend for logging.
    fn provider_name(&self) -> &'static str;
}

#[async_trait]
impl<C: CompletionClient + ?Sized> CompletionClient for Arc<C> {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        (**self).complete(request).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}
