//! Tests for the HTTP API routes.

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use stanza_completion::{CompletionClient, CompletionRequest};
use stanza_engine::{AlternativeEngine, EngineConfig};
use stanza_error::{CompletionError, CompletionErrorKind, HttpErrorKind};
use stanza_server::{AppState, ServerConfig, SharedEngine, cors_layer, create_router, serve};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;
use tower::ServiceExt;

/// Returns `line-<call_index>` for every call.
#[derive(Default)]
struct UniqueClient {
    calls: AtomicUsize,
}

#[async_trait]
impl CompletionClient for UniqueClient {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, CompletionError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("line-{}", n))
    }

    fn provider_name(&self) -> &'static str {
        "unique"
    }
}

/// Backend that is always down.
struct DownClient;

#[async_trait]
impl CompletionClient for DownClient {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, CompletionError> {
        Err(CompletionError::new(CompletionErrorKind::Http(
            "connection refused".to_string(),
        )))
    }

    fn provider_name(&self) -> &'static str {
        "down"
    }
}

fn engine_with(client: Arc<dyn CompletionClient>) -> SharedEngine {
    let config = EngineConfig::builder()
        .max_rounds(2usize)
        .build()
        .expect("Valid config");
    AlternativeEngine::new(client, config)
}

fn app(token: Option<&str>) -> (Router, TempDir) {
    let dir = tempfile::tempdir().expect("Temp dir");
    let state = AppState::new(
        engine_with(Arc::new(UniqueClient::default())),
        dir.path(),
        token.map(str::to_string),
    );
    (create_router(state), dir)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_check() {
    let (app, _dir) = app(None);
    let (status, body) = send_json(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_generate_line_returns_alternatives_and_temperatures() {
    let (app, _dir) = app(None);
    let (status, body) = send_json(
        &app,
        post_json("/api/generate_line", json!({ "current_text": "The sun sets slow" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let alternatives = body["alternatives"].as_array().expect("alternatives array");
    let temperatures = body["temperatures"].as_array().expect("temperatures array");
    assert_eq!(alternatives.len(), 5);
    assert_eq!(temperatures.len(), 5);
    assert!(body.get("rounds").is_none());
}

#[tokio::test]
async fn test_generate_line_with_backend_down_is_empty_success() {
    let dir = tempfile::tempdir().expect("Temp dir");
    let state = AppState::new(engine_with(Arc::new(DownClient)), dir.path(), None);
    let app = create_router(state);

    let (status, body) = send_json(
        &app,
        post_json("/api/generate_line", json!({ "current_text": "The sun sets slow" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alternatives"], json!([]));
    assert_eq!(body["temperatures"], json!([]));
}

#[tokio::test]
async fn test_preferences_round_trip_through_download() {
    let (app, _dir) = app(None);

    let (status, _) = send_json(&app, get("/api/download_preferences")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let record = json!({
        "current_text": "The sun sets slow",
        "alternatives": ["line-0", "line-1"],
        "chosen": "line-1"
    });
    let (status, body) = send_json(&app, post_json("/api/record_preference", record.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let response = app
        .clone()
        .oneshot(get("/api/download_preferences"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"line_preferences.jsonl\""
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    let line: Value = serde_json::from_str(text.trim_end()).unwrap();
    assert_eq!(line, record);
}

#[tokio::test]
async fn test_save_list_and_load_poem() {
    let (app, _dir) = app(None);

    let (status, body) = send_json(
        &app,
        post_json(
            "/api/save_poem",
            json!({ "id": "p42", "content": "The sun sets slow\nover hills of rye" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "success", "id": "p42" }));

    let (status, body) = send_json(&app, get("/api/list_poems")).await;
    assert_eq!(status, StatusCode::OK);
    let poems = body.as_array().expect("poem list");
    assert_eq!(poems.len(), 1);
    assert_eq!(poems[0]["id"], "p42");
    assert_eq!(poems[0]["first_line"], "The sun sets slow");
    assert!(
        poems[0]["filename"]
            .as_str()
            .unwrap()
            .ends_with("-p42-the-sun-sets-slow.txt")
    );

    let (status, body) = send_json(&app, get("/api/poem/p42")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "The sun sets slow\nover hills of rye");
}

#[tokio::test]
async fn test_save_poem_validation_errors() {
    let (app, _dir) = app(None);

    let (status, body) = send_json(
        &app,
        post_json("/api/save_poem", json!({ "id": "p1", "content": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Empty poem");

    let (status, body) = send_json(
        &app,
        post_json("/api/save_poem", json!({ "content": "verse" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "No poem ID provided");
}

#[tokio::test]
async fn test_missing_poem_is_404() {
    let (app, _dir) = app(None);
    let (status, body) = send_json(&app, get("/api/poem/ghost")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Poem not found");
}

#[tokio::test]
async fn test_token_required_when_configured() {
    let (app, _dir) = app(Some("s3cret"));

    let (status, _) = send(&app, get("/api/list_poems")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let wrong = Request::builder()
        .uri("/api/list_poems")
        .header(header::AUTHORIZATION, "Bearer nope")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, wrong).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let right = Request::builder()
        .uri("/api/list_poems")
        .header(header::AUTHORIZATION, "Bearer s3cret")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, right).await;
    assert_eq!(status, StatusCode::OK);

    // Health stays open
    let (status, _) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
}

fn with_cors(app: Router) -> Router {
    app.layer(cors_layer(ServerConfig::default().cors_origins()))
}

#[tokio::test]
async fn test_cors_allows_configured_origin_only() {
    let (app, _dir) = app(None);
    let app = with_cors(app);

    let allowed = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://localhost:8888")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(allowed).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:8888"
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );

    let foreign = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://elsewhere.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(foreign).await.unwrap();
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}

#[tokio::test]
async fn test_cors_preflight_skips_token_check() {
    let (app, _dir) = app(Some("s3cret"));
    let app = with_cors(app);

    let preflight = Request::builder()
        .method("OPTIONS")
        .uri("/api/generate_line")
        .header(header::ORIGIN, "http://localhost:8888")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization, content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(preflight).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
        "POST"
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:8888"
    );
}

#[tokio::test]
async fn test_serve_reports_bind_failure() {
    let occupied = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = occupied.local_addr().expect("addr").port();
    let config = ServerConfig::builder().port(port).build().expect("config");
    let (app, _dir) = app(None);

    let err = serve(&config, app).await.expect_err("port is taken");

    match err.kind() {
        HttpErrorKind::Bind { address, .. } => {
            assert_eq!(address, &format!("127.0.0.1:{}", port));
        }
        other => panic!("expected bind failure, got {:?}", other),
    }
}
