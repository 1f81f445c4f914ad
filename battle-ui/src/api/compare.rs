//! Album comparison endpoint
//!
//! Each request runs the whole pipeline from scratch: resolve both display
//! names, compare, build charts. A name that does not resolve ends the
//! request with 404; nothing from an earlier request is reused.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use super::ApiError;
use crate::view::{build_view, ComparisonView};
use crate::AppState;

/// Query parameters: the two selected display names
#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub first: String,
    pub second: String,
}

/// GET /api/compare?first=NAME&second=NAME
pub async fn get_comparison(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<ComparisonView>, ApiError> {
    let selection = state.lookup.resolve_pair(&query.first, &query.second)?;
    let view = build_view(&state.datasets, selection)?;
    Ok(Json(view))
}
