//! # medlink-server
//!
//! Binary crate wiring the auth module into a running HTTP server: config
//! loading, tracing, storage backend selection, and router assembly.

pub mod config;
pub mod observability;

use axum::http::{HeaderValue, StatusCode};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use medlink_auth::AuthHttpState;

use crate::config::ServerConfig;

/// Assembles the application router.
///
/// Mounts the auth routes under `/api/v1/auth`, adds request tracing and a
/// credentialed CORS layer for the configured client origins, and installs
/// the JSON 404 fallback.
pub fn build_router(state: AuthHttpState, config: &ServerConfig) -> Router {
    let mut cors = CorsLayer::new()
        .allow_credentials(true)
        .allow_methods(tower_http::cors::AllowMethods::mirror_request())
        .allow_headers(tower_http::cors::AllowHeaders::mirror_request());
    let origins: Vec<HeaderValue> = config
        .server
        .client_urls
        .iter()
        .filter_map(|url| url.parse().ok())
        .collect();
    if !origins.is_empty() {
        cors = cors.allow_origin(origins);
    }

    Router::new()
        .nest("/api/v1/auth", medlink_auth::router(state))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// JSON 404 for unmatched routes.
async fn not_found_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "msg": "Route not found" })),
    )
}
