//! pgm-lm library - Programme List Manager
//!
//! Binds the catalog's presentation callbacks (sort, filter, add, edit,
//! delete) to a JSON HTTP surface.

use std::sync::Arc;

use axum::Router;
use pgm_common::Catalog;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Catalog session. Held across validate → mutate → persist so
    /// mutations complete one at a time.
    pub catalog: Arc<Mutex<Catalog>>,
}

impl AppState {
    /// Create new application state
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(Mutex::new(catalog)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{delete, get, post, put};

    let view = Router::new()
        .route("/api/view", get(api::get_view))
        .route("/api/view/sort", post(api::sort_view))
        .route("/api/view/filter", post(api::filter_view));

    let edit = Router::new()
        .route("/api/programmes", post(api::add_programme))
        .route(
            "/api/programmes/:id",
            put(api::edit_programme).delete(api::delete_programme),
        )
        .route("/api/validate", post(api::validate_programme))
        .route("/api/local-data", delete(api::delete_local_data));

    Router::new()
        .merge(view)
        .merge(edit)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
