//! mnemo - a semantic key-value memory store for AI agents.
//!
//! Callers write a short textual `key` with an attached `value`, and later
//! retrieve or delete entries by *approximate semantic similarity* to a new
//! query key rather than exact match. All operations are synchronous (no
//! async/await required).
//!
//! With no embedding model configured, keys are vectorized by a
//! deterministic SHA-256 hash embedder: fully offline, bit-reproducible,
//! and good enough to match near-identical key strings. Configure a model
//! id to use learned ONNX embeddings instead.
//!
//! # Example
//!
//! ```
//! use mnemo::{Config, MemoryBackend};
//!
//! // In-memory store with the deterministic hash embedder
//! let config = Config {
//!     database_path: None,
//!     ..Config::default()
//! };
//! let mut backend = MemoryBackend::open(&config).expect("Failed to open backend");
//!
//! // Remember a fact under a key
//! let id = backend.store("favorite color", "blue", None).expect("store");
//!
//! // Recall by similarity to a query key, closest first
//! let results = backend.recall("favorite color", 3).expect("recall");
//! assert_eq!(results[0].value, "blue");
//!
//! // Forget the nearest matches
//! let deleted = backend.forget("favorite color", 1).expect("forget");
//! assert_eq!(deleted, vec![id]);
//! ```
//!
//! # Mutability Requirements
//!
//! Methods that generate embeddings (`store`, `recall`, `forget`) require
//! `&mut self` because the ONNX embedder internally mutates state for
//! tensor allocations.

pub mod commands;
pub mod config;
pub mod embedding;
pub mod errors;
pub mod index;
pub mod memory;
pub mod memory_types;
pub mod output;

// Re-export public API
pub use config::Config;
pub use embedding::{
    Embedder, HashEmbedder, OnnxEmbedder, HASH_EMBEDDING_DIMS, ONNX_EMBEDDING_DIMS,
};
pub use errors::Error;
pub use index::{SimilarityIndex, SqliteIndex};
pub use memory::{MemoryBackend, DEFAULT_TOP_K, MAX_INPUT_LENGTH, MAX_TOP_K};
pub use memory_types::RecordView;
