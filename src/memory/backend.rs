//! Core memory backend struct combining an embedder and an index handle.

use std::path::Component;

use crate::config::Config;
use crate::embedding::{Embedder, HashEmbedder, OnnxEmbedder};
use crate::errors::Error;
use crate::index::{SimilarityIndex, SqliteIndex};

/// Maximum allowed key/value length (100,000 characters).
pub const MAX_INPUT_LENGTH: usize = 100_000;
/// Default number of nearest neighbors for recall and forget.
pub const DEFAULT_TOP_K: usize = 3;
/// Maximum allowed `top_k` / limit for queries.
pub const MAX_TOP_K: usize = 10_000;

/// Memory backend mapping store/recall/forget onto a similarity index.
///
/// Owns its index handle and embedder explicitly: both are fixed at
/// construction and closed when the backend drops. There is no process-wide
/// state.
///
/// # Mutability Requirements
///
/// Methods that generate embeddings (`store`, `recall`, `forget`) require
/// `&mut self` because the ONNX embedder internally mutates state for tensor
/// allocations.
pub struct MemoryBackend {
    pub(crate) index: Box<dyn SimilarityIndex>,
    pub(crate) embedder: Box<dyn Embedder>,
}

impl MemoryBackend {
    /// Wire an explicit index handle and embedder together.
    ///
    /// # Errors
    ///
    /// Returns error if the index and embedder dimensionalities differ.
    pub fn new(
        index: Box<dyn SimilarityIndex>,
        embedder: Box<dyn Embedder>,
    ) -> Result<Self, Error> {
        if index.dimensions() != embedder.dimensions() {
            return Err(Error::Config(format!(
                "index dimension {} does not match embedder dimension {}",
                index.dimensions(),
                embedder.dimensions()
            )));
        }
        Ok(Self { index, embedder })
    }

    /// Open a backend from configuration.
    ///
    /// Embedder selection happens here, once: a configured model id builds
    /// the ONNX engine, otherwise the deterministic hash embedder at
    /// `config.embedding_dim`. The index opens at the chosen embedder's
    /// dimensionality; no `database_path` means an in-memory index.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Database path contains path traversal sequences (e.g., "../")
    /// - The index cannot be created or opened
    /// - The embedding model cannot be loaded
    pub fn open(config: &Config) -> Result<Self, Error> {
        // Path traversal guard: reject parent directory components (works on all platforms)
        if let Some(db_path) = &config.database_path {
            for component in db_path.components() {
                if matches!(component, Component::ParentDir) {
                    return Err(Error::Config(
                        "Invalid database path: contains '..' which may escape the intended directory".to_string(),
                    ));
                }
            }
        }

        let embedder: Box<dyn Embedder> = match &config.embedding_model {
            Some(model_id) => Box::new(OnnxEmbedder::new(model_id)?),
            None => Box::new(HashEmbedder::new(config.embedding_dim)),
        };

        let index = SqliteIndex::open(
            config.database_path.as_deref(),
            &config.collection,
            embedder.dimensions(),
        )?;

        Ok(Self {
            index: Box::new(index),
            embedder,
        })
    }

    /// Validate and trim a key (rejects empty and oversized keys).
    pub(crate) fn validate_key(key: &str) -> Result<&str, Error> {
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::InvalidArgument("key cannot be empty".to_string()));
        }
        if key.len() > MAX_INPUT_LENGTH {
            return Err(Error::InvalidArgument(format!(
                "key exceeds maximum length ({} > {})",
                key.len(),
                MAX_INPUT_LENGTH
            )));
        }
        Ok(key)
    }

    pub(crate) fn validate_top_k(top_k: usize) -> Result<(), Error> {
        if top_k > MAX_TOP_K {
            return Err(Error::InvalidArgument(format!(
                "top_k {} exceeds maximum allowed ({})",
                top_k, MAX_TOP_K
            )));
        }
        Ok(())
    }
}
