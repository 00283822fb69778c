//! Error types for the Stanza line-alternative generator.
//!
//! Each concern has its own error struct carrying the source location where it
//! was raised. [`StanzaError`] wraps all of them for callers that cross crate
//! boundaries.

mod completion;
mod config;
mod error;
mod http;
mod storage;

pub use completion::{CompletionError, CompletionErrorKind};
pub use config::ConfigError;
pub use error::{StanzaError, StanzaResult};
pub use http::{HttpError, HttpErrorKind};
pub use storage::{StorageError, StorageErrorKind};
