//! Bearer-token guard for `/api` routes.

use crate::{ApiError, AppState};
use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

/// Rejects requests without the configured bearer token.
///
/// Passes everything through when no token is configured.
pub async fn require_token(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(expected) = state.access_token.as_deref() else {
        return next.run(request).await;
    };

    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if presented == Some(expected) {
        next.run(request).await
    } else {
        warn!(path = %request.uri().path(), "Rejected request without valid token");
        ApiError::new(StatusCode::UNAUTHORIZED, "Invalid or missing token").into_response()
    }
}
