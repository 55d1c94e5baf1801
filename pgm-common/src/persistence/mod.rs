//! Persistence gateway: opaque async key-value storage
//!
//! The catalog writes its full snapshot under [`STORAGE_KEY`] after every
//! mutation. Failures propagate to the caller; nothing is retried.

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

mod memory;
mod sqlite;

pub use memory::MemoryGateway;
pub use sqlite::{init_database, SqliteGateway};

/// Key under which the programme snapshot is stored
pub const STORAGE_KEY: &str = "programmes";

#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Stored value for `key`, or `None` if never set (or removed)
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    async fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Removing an absent key is not an error
    async fn remove(&self, key: &str) -> Result<()>;
}
