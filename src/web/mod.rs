// src/web/mod.rs
// Local JSON API over one in-memory session

pub mod api;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::web::state::AppState;

/// Create the web server router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_router = Router::new()
        .route("/session", get(api::get_session))
        .route("/actions", post(api::dispatch_action))
        .route("/keywords", get(api::list_keywords))
        .route("/templates", get(api::list_templates))
        .route("/templates/{id}", get(api::get_template))
        .route("/format", post(api::format_section));

    Router::new()
        .route("/health", get(api::health))
        .nest("/api", api_router)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
