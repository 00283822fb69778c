//! Top-level error aggregating every crate-specific error.

use crate::{CompletionError, ConfigError, HttpError, StorageError};

/// Any error produced by the Stanza crates.
#[derive(Debug, Clone, derive_more::Display, derive_more::From, derive_more::Error)]
pub enum StanzaError {
    /// Completion backend failure
    #[display("{}", _0)]
    Completion(CompletionError),
    /// Configuration failure
    #[display("{}", _0)]
    Config(ConfigError),
    /// Storage failure
    #[display("{}", _0)]
    Storage(StorageError),
    /// HTTP server failure
    #[display("{}", _0)]
    Http(HttpError),
}

/// Result type for Stanza operations.
pub type StanzaResult<T> = Result<T, StanzaError>;
