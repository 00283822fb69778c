//! Text-completion backends for Stanza.
//!
//! The generation engine only sees the [`CompletionClient`] trait. This crate
//! provides the trait, an HTTP client for OpenAI-compatible `/completions`
//! endpoints, and a rate-limiting wrapper.

mod client;
mod openai_compat;
mod rate_limit;

pub use client::{CompletionClient, CompletionRequest, CompletionRequestBuilder};
pub use openai_compat::{
    CompletionApiRequest, CompletionApiResponse, CompletionChoice, OpenAICompatibleClient,
};
pub use rate_limit::RateLimitedClient;
