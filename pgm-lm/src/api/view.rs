//! View callbacks: current view, sort toggle, filter text
//!
//! None of these touch storage.

use axum::{extract::State, Json};
use serde::Deserialize;

use pgm_common::query::SortKey;
use pgm_common::CatalogView;

use super::ApiError;
use crate::AppState;

/// Body for POST /api/view/sort
#[derive(Debug, Deserialize)]
pub struct SortRequest {
    /// Column clicked: "id" or "name"
    pub key: String,
}

/// Body for POST /api/view/filter
#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    /// Search text; null or empty clears the filter
    #[serde(default)]
    pub text: Option<String>,
}

/// GET /api/view
pub async fn get_view(State(state): State<AppState>) -> Json<CatalogView> {
    let catalog = state.catalog.lock().await;
    Json(catalog.view())
}

/// POST /api/view/sort
///
/// Same key as the current sort flips direction; a new key sorts ascending.
pub async fn sort_view(
    State(state): State<AppState>,
    Json(request): Json<SortRequest>,
) -> Result<Json<CatalogView>, ApiError> {
    let key: SortKey = request.key.parse()?;
    let mut catalog = state.catalog.lock().await;
    Ok(Json(catalog.on_sort(key)))
}

/// POST /api/view/filter
pub async fn filter_view(
    State(state): State<AppState>,
    Json(request): Json<FilterRequest>,
) -> Json<CatalogView> {
    let mut catalog = state.catalog.lock().await;
    Json(catalog.on_filter(request.text.as_deref()))
}
