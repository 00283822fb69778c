//! Client for OpenAI-compatible text completion APIs.
//!
//! Used for Fireworks-hosted fine-tunes and any other provider that speaks the
//! legacy `/completions` format.

mod client;
mod conversions;
mod dto;

pub use client::OpenAICompatibleClient;
pub use dto::{CompletionApiRequest, CompletionApiResponse, CompletionChoice};
