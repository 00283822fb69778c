//! HTTP server error types.

/// Stage of the server lifecycle that failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum HttpErrorKind {
    /// Listener could not be bound
    #[display("Failed to bind {}: {}", address, message)]
    Bind {
        /// Address that was requested
        address: String,
        /// Reason reported by the OS
        message: String,
    },
    /// Server stopped with an error after binding
    #[display("Server error: {}", _0)]
    Serve(String),
}

/// HTTP server error with source location.
///
/// # Examples
///
/// ```
/// use stanza_error::{HttpError, HttpErrorKind};
///
/// let err = HttpError::new(HttpErrorKind::Bind {
///     address: "127.0.0.1:8888".to_string(),
///     message: "Address already in use".to_string(),
/// });
/// assert!(matches!(err.kind(), HttpErrorKind::Bind { .. }));
/// assert!(err.to_string().contains("127.0.0.1:8888"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", kind, line, file)]
pub struct HttpError {
    /// What failed
    pub kind: HttpErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError at the current location.
    #[track_caller]
    pub fn new(kind: HttpErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &HttpErrorKind {
        &self.kind
    }
}
