//! Mutation callbacks: add, edit, delete, validate, delete local data
//!
//! Each request holds the catalog lock until the write-through completes.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use pgm_common::validate::Validation;
use pgm_common::{CatalogView, RawProgramme};

use super::ApiError;
use crate::AppState;

/// Query parameters for POST /api/validate
#[derive(Debug, Deserialize)]
pub struct ValidateQuery {
    /// Id of the programme being edited, excluded from the uniqueness check
    pub editing: Option<i64>,
}

/// POST /api/programmes
pub async fn add_programme(
    State(state): State<AppState>,
    Json(form): Json<RawProgramme>,
) -> Result<Json<CatalogView>, ApiError> {
    let mut catalog = state.catalog.lock().await;
    let draft = catalog.draft_from_form(&form);
    Ok(Json(catalog.on_add(draft).await?))
}

/// PUT /api/programmes/:id
pub async fn edit_programme(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(form): Json<RawProgramme>,
) -> Result<Json<CatalogView>, ApiError> {
    let mut catalog = state.catalog.lock().await;
    let draft = catalog.draft_from_form(&form);
    Ok(Json(catalog.on_edit(id, draft).await?))
}

/// DELETE /api/programmes/:id
///
/// Deleting an id that is not present succeeds.
pub async fn delete_programme(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CatalogView>, ApiError> {
    let mut catalog = state.catalog.lock().await;
    Ok(Json(catalog.on_delete(id).await?))
}

/// POST /api/validate?editing=ID
///
/// Runs the validator on form input without changing anything.
pub async fn validate_programme(
    State(state): State<AppState>,
    Query(query): Query<ValidateQuery>,
    Json(form): Json<RawProgramme>,
) -> Json<Validation> {
    let catalog = state.catalog.lock().await;
    let draft = catalog.draft_from_form(&form);
    Json(catalog.validate(&draft, query.editing))
}

/// DELETE /api/local-data
///
/// Drops the stored snapshot and reloads from the feed.
pub async fn delete_local_data(
    State(state): State<AppState>,
) -> Result<Json<CatalogView>, ApiError> {
    let mut catalog = state.catalog.lock().await;
    Ok(Json(catalog.reset().await?))
}
