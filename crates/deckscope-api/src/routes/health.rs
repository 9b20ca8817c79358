use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub gemini_api_configured: bool,
    pub parsing_api_configured: bool,
}

/// Liveness endpoint
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up")
    ),
    tag = "health"
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Pitch Deck IPO Readiness Analyzer API".to_string(),
        status: "active".to_string(),
    })
}

/// Detailed health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy")
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        gemini_api_configured: !state.config.gemini_api_key.is_empty(),
        parsing_api_configured: !state.config.parse_api_key.is_empty(),
    })
}
