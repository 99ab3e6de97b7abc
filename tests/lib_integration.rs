//! Integration tests exercising the mnemo library API from an external
//! crate perspective.
//!
//! Everything runs on the deterministic hash embedder, so no model
//! downloads are needed and results are reproducible.

use std::env;
use std::path::PathBuf;

use serde_json::{Map, Value};

use mnemo::errors::Error;
use mnemo::{Config, MemoryBackend, DEFAULT_TOP_K, HASH_EMBEDDING_DIMS};

fn ephemeral_config() -> Config {
    Config {
        database_path: None,
        collection: "test".to_string(),
        ..Config::default()
    }
}

fn file_config(db_path: &PathBuf) -> Config {
    Config {
        database_path: Some(db_path.clone()),
        collection: "test".to_string(),
        ..Config::default()
    }
}

/// Test the basic store/recall/forget round trip.
#[test]
fn test_store_recall_forget_round_trip() {
    let mut backend = MemoryBackend::open(&ephemeral_config()).expect("Failed to open backend");

    let id = backend
        .store("alpha", "value-alpha", None)
        .expect("Failed to store");
    assert!(!id.is_empty());

    let results = backend.recall("alpha", 1).expect("Failed to recall");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, id);
    assert_eq!(results[0].key, "alpha");
    assert_eq!(results[0].value, "value-alpha");
    assert!(results[0].distance.expect("distance present").abs() < 1e-6);

    let deleted = backend.forget("alpha", 1).expect("Failed to forget");
    assert_eq!(deleted, vec![id]);

    let results = backend.recall("alpha", 1).expect("Failed to recall");
    assert!(results.is_empty());
}

/// Test that memories survive closing and reopening a file-backed store.
#[test]
fn test_memories_persist_across_reopen() {
    let temp_dir = env::temp_dir();
    let db_path = temp_dir.join(format!("mnemo_test_{}.db", uuid::Uuid::new_v4()));

    {
        let mut backend = MemoryBackend::open(&file_config(&db_path)).expect("open backend");
        backend
            .store("persistent fact", "survives restarts", None)
            .expect("store");
    }

    {
        let mut backend = MemoryBackend::open(&file_config(&db_path)).expect("reopen backend");
        let results = backend.recall("persistent fact", 1).expect("recall");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].value, "survives restarts");
    }

    std::fs::remove_file(db_path).ok();
}

/// Test that collections in one database are isolated namespaces.
#[test]
fn test_collections_are_isolated() {
    let temp_dir = env::temp_dir();
    let db_path = temp_dir.join(format!("mnemo_test_{}.db", uuid::Uuid::new_v4()));

    let mut config_a = file_config(&db_path);
    config_a.collection = "personal".to_string();
    let mut backend_a = MemoryBackend::open(&config_a).expect("open personal");
    backend_a.store("secret", "a-only", None).expect("store");
    drop(backend_a);

    let mut config_b = file_config(&db_path);
    config_b.collection = "work".to_string();
    let mut backend_b = MemoryBackend::open(&config_b).expect("open work");

    let results = backend_b.recall("secret", 5).expect("recall");
    assert!(results.is_empty());

    std::fs::remove_file(db_path).ok();
}

/// Test that reopening a collection at a different dimension is refused.
#[test]
fn test_dimension_mismatch_on_reopen_is_unavailable() {
    let temp_dir = env::temp_dir();
    let db_path = temp_dir.join(format!("mnemo_test_{}.db", uuid::Uuid::new_v4()));

    {
        let config = file_config(&db_path);
        MemoryBackend::open(&config).expect("open at default dim");
    }

    let mut config = file_config(&db_path);
    config.embedding_dim = 64;
    let result = MemoryBackend::open(&config);

    match result {
        Err(Error::Index(mnemo::index::Error::Unavailable(_))) => {}
        Err(other) => panic!("Expected Unavailable index error, got {other:?}"),
        Ok(_) => panic!("Expected Unavailable index error, got a backend"),
    }

    std::fs::remove_file(db_path).ok();
}

/// Test that empty keys are rejected before touching the index.
#[test]
fn test_empty_key_is_invalid_argument() {
    let mut backend = MemoryBackend::open(&ephemeral_config()).expect("open backend");

    for result in [
        backend.store("", "value", None).map(|_| ()),
        backend.recall("   ", 3).map(|_| ()),
        backend.forget("", 3).map(|_| ()),
    ] {
        match result {
            Err(Error::InvalidArgument(_)) => {}
            other => panic!("Expected InvalidArgument, got {other:?}"),
        }
    }
}

/// Test forget on an empty collection returns empty, not an error.
#[test]
fn test_forget_on_empty_collection_is_empty() {
    let mut backend = MemoryBackend::open(&ephemeral_config()).expect("open backend");

    let deleted = backend
        .forget("nonexistent", DEFAULT_TOP_K)
        .expect("forget on empty store");
    assert!(deleted.is_empty());
}

/// Test that caller-supplied metadata round-trips and is never overwritten.
#[test]
fn test_metadata_round_trips() {
    let mut backend = MemoryBackend::open(&ephemeral_config()).expect("open backend");

    let mut meta = Map::new();
    meta.insert("source".to_string(), Value::String("integration".to_string()));
    meta.insert("priority".to_string(), Value::from(2));

    backend
        .store("tagged fact", "payload", Some(meta))
        .expect("store");

    let results = backend.recall("tagged fact", 1).expect("recall");
    let hit = &results[0];
    assert_eq!(
        hit.metadata["source"],
        Value::String("integration".to_string())
    );
    assert_eq!(hit.metadata["priority"], Value::from(2));
    assert_eq!(hit.metadata["key"], Value::String("tagged fact".to_string()));
    assert_eq!(hit.metadata["value"], Value::String("payload".to_string()));
}

/// Test recall saturates at the number of stored records.
#[test]
fn test_recall_saturates_at_collection_size() {
    let mut backend = MemoryBackend::open(&ephemeral_config()).expect("open backend");

    backend.store("one", "v1", None).expect("store");
    backend.store("two", "v2", None).expect("store");

    let results = backend.recall("one", 100).expect("recall");
    assert_eq!(results.len(), 2);
}

/// Test distances are non-decreasing and the exact key ranks first.
#[test]
fn test_recall_ordering_is_closest_first() {
    let mut backend = MemoryBackend::open(&ephemeral_config()).expect("open backend");

    backend
        .store("deploy target is staging", "v1", None)
        .expect("store");
    backend
        .store("favorite editor is helix", "v2", None)
        .expect("store");
    backend
        .store("coffee order is espresso", "v3", None)
        .expect("store");

    let results = backend
        .recall("deploy target is staging", 3)
        .expect("recall");
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].key, "deploy target is staging");

    let distances: Vec<f64> = results.iter().map(|r| r.distance.unwrap()).collect();
    for pair in distances.windows(2) {
        assert!(pair[0] <= pair[1], "distances must be non-decreasing");
    }
}

/// Test the default configuration shape.
#[test]
fn test_default_config_values() {
    let config = Config::default();

    assert_eq!(config.collection, "memories");
    assert_eq!(config.embedding_dim, HASH_EMBEDDING_DIMS);
    assert!(config.embedding_model.is_none());
    assert!(config.database_path.is_some());
}
