//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    /// All three tables are in memory
    pub datasets_loaded: bool,
    /// Names offered in the dropdowns
    pub albums: usize,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let datasets_loaded = state.datasets.is_loaded();
    Json(HealthResponse {
        status: if datasets_loaded { "ok" } else { "loading" }.to_string(),
        module: "battle-ui".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        datasets_loaded,
        albums: state.lookup.names().len(),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
