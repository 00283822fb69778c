//! Completion backend error types.

/// Kinds of failures a completion backend call can produce.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CompletionErrorKind {
    /// HTTP/network error
    #[display("HTTP error: {}", _0)]
    Http(String),

    /// Backend returned a non-success status
    #[display("API error (status {}): {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message returned by the backend
        message: String,
    },

    /// Rate limit exceeded
    #[display("Rate limit exceeded")]
    RateLimit,

    /// Failed to parse the backend response
    #[display("Response parsing failed: {}", _0)]
    ResponseParsing(String),

    /// The call did not finish within its deadline
    #[display("Completion timed out: {}", _0)]
    Timeout(String),

    /// The attempt ended without producing an outcome
    #[display("Attempt aborted: {}", _0)]
    Aborted(String),

    /// Request could not be assembled
    #[display("Builder error: {}", _0)]
    Builder(String),
}

/// Completion error with location tracking.
///
/// # Examples
///
/// ```
/// use stanza_error::{CompletionError, CompletionErrorKind};
///
/// let err = CompletionError::new(CompletionErrorKind::RateLimit);
/// assert!(format!("{}", err).contains("Rate limit"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Completion Error: {} at line {} in {}", kind, line, file)]
pub struct CompletionError {
    /// The kind of error that occurred
    pub kind: CompletionErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CompletionError {
    /// Create a new completion error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CompletionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CompletionErrorKind {
        &self.kind
    }
}

impl From<CompletionErrorKind> for CompletionError {
    #[track_caller]
    fn from(kind: CompletionErrorKind) -> Self {
        Self::new(kind)
    }
}
