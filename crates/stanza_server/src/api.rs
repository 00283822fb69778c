//! Routes and handlers.

use crate::auth::require_token;
use crate::{ApiError, AppState, ServerConfig};
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use serde_json::json;
use stanza_core::{
    Alternatives, GenerationRequest, PoemContent, PoemSummary, PreferenceRecord, SavePoemRequest,
};
use stanza_error::{HttpError, HttpErrorKind};
use stanza_storage::PREFERENCES_FILE_NAME;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::{debug, info, instrument, warn};

/// Creates the application router.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/generate_line", post(generate_line))
        .route("/record_preference", post(record_preference))
        .route("/download_preferences", get(download_preferences))
        .route("/save_poem", post(save_poem))
        .route("/list_poems", get(list_poems))
        .route("/poem/:poem_id", get(get_poem))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .with_state(state)
}

/// Builds the CORS policy for browser clients served from `origins`.
///
/// Credentials are allowed, so methods and headers mirror the preflight
/// request instead of using wildcards. Unparseable origins are skipped.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Binds the configured address and serves until Ctrl+C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
#[instrument(skip(router))]
pub async fn serve(config: &ServerConfig, router: Router) -> Result<(), HttpError> {
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| {
            HttpError::new(HttpErrorKind::Bind {
                address: address.clone(),
                message: e.to_string(),
            })
        })?;

    info!(url = %format!("http://{}", address), "Listening");

    let router = router.layer(cors_layer(config.cors_origins()));
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| HttpError::new(HttpErrorKind::Serve(e.to_string())))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutting down gracefully...");
}

/// Health check endpoint.
#[instrument(skip_all)]
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

#[instrument(skip_all)]
async fn generate_line(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Json<Alternatives> {
    debug!(current_text = %request.current_text(), "Received generate request");
    Json(state.engine.generate_for(&request).await)
}

#[instrument(skip_all)]
async fn record_preference(
    State(state): State<AppState>,
    Json(record): Json<PreferenceRecord>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(chosen = %record.chosen(), "Recording preference");
    state.preferences.append(&record).await?;
    Ok(Json(json!({ "status": "success" })))
}

#[instrument(skip_all)]
async fn download_preferences(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = state.preferences.contents().await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", PREFERENCES_FILE_NAME),
            ),
        ],
        bytes,
    ))
}

#[instrument(skip_all)]
async fn save_poem(
    State(state): State<AppState>,
    Json(request): Json<SavePoemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(poem_id = %request.id(), "Saving poem");
    state.poems.save(request.id(), request.content()).await?;
    Ok(Json(json!({ "status": "success", "id": request.id() })))
}

#[instrument(skip_all)]
async fn list_poems(State(state): State<AppState>) -> Result<Json<Vec<PoemSummary>>, ApiError> {
    Ok(Json(state.poems.list().await?))
}

#[instrument(skip(state))]
async fn get_poem(
    State(state): State<AppState>,
    Path(poem_id): Path<String>,
) -> Result<Json<PoemContent>, ApiError> {
    Ok(Json(state.poems.load(&poem_id).await?))
}
