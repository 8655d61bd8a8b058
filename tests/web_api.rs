// tests/web_api.rs
// HTTP API round trips through the router with a fake service

mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use common::{FakeService, png};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tower::ServiceExt;

use cineprompt::llm::PromptService;
use cineprompt::error::PromptError;
use cineprompt::session::{Action, Session};
use cineprompt::web::{create_router, state::AppState};

fn app_with(service: Arc<dyn PromptService>) -> Router {
    create_router(AppState::new(Session::new(), service))
}

fn app() -> Router {
    app_with(Arc::new(FakeService::working()))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ============================================================================
// Read-only endpoints
// ============================================================================

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_session_snapshot() {
    let (status, body) = send(&app(), get("/api/session")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["view"], "generator");
    assert_eq!(body["data"]["library"]["templates"][0]["title"], "Scarface BTS");
}

#[tokio::test]
async fn test_keywords() {
    let (_, body) = send(&app(), get("/api/keywords")).await;
    let groups = body["data"].as_array().unwrap();
    assert_eq!(groups.len(), 8);
    assert_eq!(groups[0]["field"], "purpose");
    assert_eq!(groups[1]["field"], "userPerson");
}

#[tokio::test]
async fn test_templates() {
    let app = app();
    let (_, body) = send(&app, get("/api/templates")).await;
    let id = body["data"][1]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, get(&format!("/api/templates/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Dark Knight BTS");
    assert!(body["data"]["fullPrompt"].as_str().unwrap().starts_with("[1. Purpose]"));

    let (status, body) = send(&app, get("/api/templates/missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_format_is_stateless() {
    let section = json!({
        "purpose": "Test shot", "userPerson": "", "targetCharacter": "", "interaction": "",
        "environment": "", "lighting": "", "style": "", "negative": ""
    });
    let (status, body) = send(
        &app(),
        post("/api/format", json!({ "section": section, "strictIdentity": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let builder = body["data"]["builder"].as_str().unwrap();
    let display = body["data"]["display"].as_str().unwrap();
    assert!(builder.starts_with("[1. Purpose & Shot Type] Test shot"));
    assert!(builder.contains("[CRITICAL CONSTRAINT:"));
    assert!(display.contains("2.1 User: \n"));
}

// ============================================================================
// Actions
// ============================================================================

#[tokio::test]
async fn test_generate_and_copy() {
    let app = app();
    send(
        &app,
        post(
            "/api/actions",
            json!({ "type": "editField", "field": "purpose", "value": "Test shot" }),
        ),
    )
    .await;
    let (_, body) = send(&app, post("/api/actions", json!({ "type": "generate" }))).await;
    assert!(body["data"]["session"]["builder"]["finalPrompt"].is_string());

    let (status, body) = send(&app, post("/api/actions", json!({ "type": "copyPrompt" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        body["data"]["copied"]
            .as_str()
            .unwrap()
            .starts_with("[1. Purpose & Shot Type] Test shot")
    );
}

#[tokio::test]
async fn test_validation_error_envelope() {
    let (status, body) =
        send(&app(), post("/api/actions", json!({ "type": "copyPrompt" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["errorKind"], "validation");
}

#[tokio::test]
async fn test_service_failure_envelope() {
    let app = app_with(Arc::new(FakeService::failing()));
    let (status, body) = send(&app, post("/api/actions", json!({ "type": "optimize" }))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["errorKind"], "external_service");

    let (_, body) = send(&app, get("/api/session")).await;
    assert_eq!(body["data"]["builder"]["optimizing"], false);
}

#[tokio::test]
async fn test_analyze_with_data_url() {
    let app = app();
    send(
        &app,
        post(
            "/api/actions",
            json!({ "type": "selectAnalyzerImage", "image": png().to_data_url() }),
        ),
    )
    .await;
    let (status, body) = send(&app, post("/api/actions", json!({ "type": "analyze" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        body["data"]["session"]["analyzer"]["result"]["purpose"]
            .as_str()
            .unwrap()
            .starts_with("A photorealistic")
    );
}

#[tokio::test]
async fn test_non_image_upload_rejected() {
    let app = app();
    let (status, body) = send(
        &app,
        post(
            "/api/actions",
            json!({ "type": "selectAnalyzerImage", "image": "data:application/pdf;base64,JVBERi0=" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["errorKind"], "unsupported_input");
    assert!(body["error"].as_str().unwrap().contains("application/pdf"));

    let (_, body) = send(&app, get("/api/session")).await;
    assert!(body["data"]["analyzer"]["image"].is_null());
}

#[tokio::test]
async fn test_malformed_action_keeps_envelope() {
    let app = app();
    let (status, body) = send(&app, post("/api/actions", json!({ "type": "launchRocket" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorKind"], "validation");

    let request = Request::builder()
        .method("POST")
        .uri("/api/actions")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["errorKind"], "validation");
}

#[tokio::test]
async fn test_lock_released_while_service_runs() {
    let gate = Arc::new(Notify::new());
    let service = Arc::new(FakeService::gated(gate.clone()));
    let app = app_with(service.clone());

    let pending = tokio::spawn({
        let app = app.clone();
        async move { send(&app, post("/api/actions", json!({ "type": "optimize" }))).await }
    });

    while service.call_count() == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    // Session stays readable and a duplicate request is refused
    let (status, body) = send(&app, get("/api/session")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["builder"]["optimizing"], true);

    let (status, body) = send(&app, post("/api/actions", json!({ "type": "optimize" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["errorKind"], "busy");

    gate.notify_one();
    let (status, body) = pending.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["session"]["builder"]["optimizing"], false);
    assert_eq!(service.call_count(), 1);
}

#[tokio::test]
async fn test_abandoned_request_still_resolves() {
    let gate = Arc::new(Notify::new());
    let service = Arc::new(FakeService::gated(gate.clone()));
    let state = AppState::new(Session::new(), service.clone());

    // Caller gives up while the service call is pending
    let abandoned = tokio::time::timeout(Duration::from_millis(50), state.apply(Action::Optimize)).await;
    assert!(abandoned.is_err());
    assert!(state.snapshot().await.builder().is_optimizing());

    gate.notify_one();
    tokio::time::timeout(Duration::from_secs(5), async {
        while state.snapshot().await.builder().is_optimizing() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("abandoned optimize never resolved");

    let session = state.snapshot().await;
    assert_eq!(session.builder().form().purpose, " (optimized)");

    // The action is available again rather than stuck busy
    gate.notify_one();
    let outcome = state.apply(Action::Optimize).await;
    assert!(!matches!(outcome, Err(PromptError::Busy(_))));
    assert_eq!(
        outcome.unwrap().session.builder().form().purpose,
        " (optimized) (optimized)"
    );
    assert_eq!(service.call_count(), 2);
}
