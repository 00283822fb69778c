//! Data transfer objects for OpenAI-compatible completion APIs.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Completion request body.
#[derive(Debug, Clone, Serialize, Builder, Getters)]
#[builder(setter(into))]
pub struct CompletionApiRequest {
    /// Model identifier
    model: String,
    /// Full prompt text
    prompt: String,
    /// Maximum tokens to generate
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    /// Stop sequences
    #[builder(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stop: Vec<String>,
}

impl CompletionApiRequest {
    /// Creates a new builder for CompletionApiRequest.
    pub fn builder() -> CompletionApiRequestBuilder {
        CompletionApiRequestBuilder::default()
    }
}

/// A choice in the completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    /// Generated text
    pub text: String,
    /// Reason for finishing
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionUsage {
    /// Tokens in the prompt
    #[serde(default)]
    pub prompt_tokens: Option<usize>,
    /// Tokens in the completion
    #[serde(default)]
    pub completion_tokens: Option<usize>,
}

/// Completion response body.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionApiResponse {
    /// Response choices
    pub choices: Vec<CompletionChoice>,
    /// Token usage
    #[serde(default)]
    pub usage: Option<CompletionUsage>,
}
