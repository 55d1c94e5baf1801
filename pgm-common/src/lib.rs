//! # Programme Catalog Common Library
//!
//! Core of the programme list manager:
//! - Entity normalizer (raw records into typed drafts)
//! - Collection store (keyed, copy-on-write)
//! - Query engine (sort toggle state machine, name filter)
//! - Validator
//! - Persistence gateway and its adapters
//! - Catalog session sequencing the presentation callbacks
//! - Configuration loading

pub mod catalog;
pub mod config;
pub mod error;
pub mod feed;
pub mod normalize;
pub mod persistence;
pub mod programme;
pub mod query;
pub mod store;
pub mod validate;

pub use catalog::{Catalog, CatalogView};
pub use error::{Error, Result};
pub use programme::{Programme, ProgrammeDraft, RawProgramme};
