//! battle-ui library - album comparison web service
//!
//! Serves one page with two album dropdowns and the JSON endpoints behind it.

use std::sync::Arc;

use axum::Router;
use battle_common::{AlbumLookup, Datasets};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod view;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Memoized, read-only tables
    pub datasets: Arc<Datasets>,
    /// Dropdown names and their album ids
    pub lookup: Arc<AlbumLookup>,
}

impl AppState {
    /// Create application state; loads the album directory if it has not
    /// been loaded yet
    pub fn new(datasets: Arc<Datasets>) -> battle_common::Result<Self> {
        let directory = datasets.directory()?;
        let lookup = AlbumLookup::from_directory(&directory);
        Ok(Self {
            datasets,
            lookup: Arc::new(lookup),
        })
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let api = Router::new()
        .route("/api/albums", get(api::list_albums))
        .route("/api/compare", get(api::get_comparison))
        .route("/api/buildinfo", get(api::get_build_info));

    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .merge(api::health_routes());

    Router::new()
        .merge(api)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
