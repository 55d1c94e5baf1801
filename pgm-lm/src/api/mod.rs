//! HTTP API handlers for pgm-lm

pub mod edit;
pub mod error;
pub mod health;
pub mod view;

pub use edit::{
    add_programme, delete_local_data, delete_programme, edit_programme, validate_programme,
};
pub use error::ApiError;
pub use health::health_routes;
pub use view::{filter_view, get_view, sort_view};
