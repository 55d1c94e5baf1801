//! Integration tests for the SQLite persistence gateway
//!
//! Tests cover:
//! - Database creation on first run
//! - get / set / remove round trip through the kv_store table
//! - Values survive reopening the database

use pgm_common::persistence::{init_database, PersistenceGateway, SqliteGateway, STORAGE_KEY};
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn test_database_created_when_missing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("programmes.db");
    assert!(!db_path.exists());

    let result = init_database(&db_path).await;
    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_get_set_remove() {
    let dir = TempDir::new().unwrap();
    let gateway = SqliteGateway::open(&dir.path().join("programmes.db"))
        .await
        .expect("Should open database");

    assert!(gateway.get(STORAGE_KEY).await.unwrap().is_none());

    let snapshot =
        json!([{"id": 1, "slug": "a", "name": "Alpha", "description": "d", "active": true}]);
    gateway.set(STORAGE_KEY, snapshot.clone()).await.unwrap();
    assert_eq!(gateway.get(STORAGE_KEY).await.unwrap(), Some(snapshot));

    // Overwrite replaces the whole value
    gateway.set(STORAGE_KEY, json!([])).await.unwrap();
    assert_eq!(gateway.get(STORAGE_KEY).await.unwrap(), Some(json!([])));

    gateway.remove(STORAGE_KEY).await.unwrap();
    assert!(gateway.get(STORAGE_KEY).await.unwrap().is_none());

    // Removing an absent key is not an error
    gateway.remove(STORAGE_KEY).await.unwrap();
}

#[tokio::test]
async fn test_value_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("programmes.db");

    {
        let gateway = SqliteGateway::open(&db_path).await.unwrap();
        gateway.set("other", json!({"n": 3})).await.unwrap();
        gateway.pool().close().await;
    }

    let gateway = SqliteGateway::open(&db_path).await.unwrap();
    assert_eq!(gateway.get("other").await.unwrap(), Some(json!({"n": 3})));
}
