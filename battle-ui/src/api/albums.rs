//! Dropdown contents

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// Every display name, in source file order
#[derive(Debug, Serialize)]
pub struct AlbumListResponse {
    pub albums: Vec<String>,
}

/// GET /api/albums
pub async fn list_albums(State(state): State<AppState>) -> Json<AlbumListResponse> {
    Json(AlbumListResponse {
        albums: state.lookup.names().to_vec(),
    })
}
