// src/web/api.rs
// REST API handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PromptError;
use crate::image::ImagePayload;
use crate::prompt::{FormatOptions, PromptField, PromptSection, format_display, format_prompt, presets};
use crate::session::Action;
use crate::web::state::AppState;

/// Envelope for every `/api` response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            error_kind: None,
        }
    }

    pub fn err(error: &PromptError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_user_string()),
            error_kind: Some(error.kind()),
        }
    }
}

fn status_for(error: &PromptError) -> StatusCode {
    match error {
        PromptError::Validation(_) | PromptError::UnsupportedInput(_) => StatusCode::BAD_REQUEST,
        PromptError::Busy(_) => StatusCode::CONFLICT,
        PromptError::ExternalService(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: PromptError) -> Response {
    (status_for(&error), Json(ApiResponse::<()>::err(&error))).into_response()
}

// ═══════════════════════════════════════
// HEALTH
// ═══════════════════════════════════════

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// ═══════════════════════════════════════
// SESSION
// ═══════════════════════════════════════

pub async fn get_session(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.snapshot().await))
}

/// Decode an action body. A rejected `image` data URL is reported as
/// UnsupportedInput; any other malformed action is a Validation error.
fn decode_action(body: Value) -> Result<Action, PromptError> {
    if let Some(Value::String(url)) = body.get("image") {
        ImagePayload::from_data_url(url)?;
    }
    serde_json::from_value(body).map_err(|e| PromptError::Validation(format!("valid action ({})", e)))
}

/// Apply one tagged Action; service actions complete before the response
pub async fn dispatch_action(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let action = match payload {
        Ok(Json(body)) => decode_action(body),
        Err(rejection) => Err(PromptError::Validation(format!(
            "JSON action body ({})",
            rejection.body_text()
        ))),
    };
    let result = match action {
        Ok(action) => state.apply(action).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(outcome) => Json(ApiResponse::ok(outcome)).into_response(),
        Err(e) => error_response(e),
    }
}

// ═══════════════════════════════════════
// KEYWORDS & TEMPLATES
// ═══════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct KeywordGroup {
    field: PromptField,
    label: &'static str,
    presets: &'static [&'static str],
}

pub async fn list_keywords() -> impl IntoResponse {
    let groups: Vec<KeywordGroup> = PromptField::ALL
        .iter()
        .map(|&field| KeywordGroup {
            field,
            label: field.label(),
            presets: presets(field),
        })
        .collect();
    Json(ApiResponse::ok(groups))
}

pub async fn list_templates(State(state): State<AppState>) -> impl IntoResponse {
    let templates = state.session.lock().await.library().templates().list();
    Json(ApiResponse::ok(templates))
}

pub async fn get_template(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let template = state.session.lock().await.library().templates().get(&id);
    match template {
        Some(t) => Json(ApiResponse::ok(t)).into_response(),
        None => {
            let error = PromptError::Validation(format!("no template with id {}", id));
            (StatusCode::NOT_FOUND, Json(ApiResponse::<()>::err(&error))).into_response()
        }
    }
}

// ═══════════════════════════════════════
// FORMAT (stateless)
// ═══════════════════════════════════════

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatRequest {
    pub section: PromptSection,
    #[serde(default)]
    pub strict_identity: bool,
}

#[derive(Debug, Serialize)]
pub struct FormatResponse {
    pub builder: String,
    pub display: String,
}

pub async fn format_section(Json(req): Json<FormatRequest>) -> impl IntoResponse {
    Json(ApiResponse::ok(FormatResponse {
        builder: format_prompt(&req.section, FormatOptions::strict(req.strict_identity)),
        display: format_display(&req.section),
    }))
}
