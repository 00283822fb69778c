//! Conversions between Stanza requests and the completion wire format.

use crate::CompletionRequest;
use crate::openai_compat::{CompletionApiRequest, CompletionApiResponse};
use stanza_error::{CompletionError, CompletionErrorKind};

/// Builds the wire request, wrapping the poem context in the prompt prefix.
pub fn to_api_request(
    req: &CompletionRequest,
    model: &str,
    prompt_prefix: &str,
) -> Result<CompletionApiRequest, CompletionError> {
    CompletionApiRequest::builder()
        .model(model)
        .prompt(format!("{}{}\n", prompt_prefix, req.prompt()))
        .max_tokens(Some(*req.max_tokens()))
        .temperature(Some(*req.temperature()))
        .stop(req.stop().clone())
        .build()
        .map_err(|e| {
            CompletionError::new(CompletionErrorKind::Builder(format!(
                "Failed to build request: {}",
                e
            )))
        })
}

/// Extracts the text of the first choice.
pub fn from_api_response(response: CompletionApiResponse) -> Result<String, CompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.text)
        .ok_or_else(|| {
            CompletionError::new(CompletionErrorKind::ResponseParsing(
                "No choices in response".to_string(),
            ))
        })
}
