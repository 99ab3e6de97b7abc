//! Configuration validation logic.

use crate::errors::Error;
use std::path::PathBuf;

/// Largest accepted hash-embedding dimensionality.
const MAX_EMBEDDING_DIM: usize = 4096;

/// Validates configuration values.
pub struct ConfigValidator {
    /// Path to the SQLite database, if persistence is wanted.
    pub database_path: Option<PathBuf>,
    /// Collection (namespace) records are stored under.
    pub collection: String,
    /// Dimensionality of hash-based embeddings.
    pub embedding_dim: usize,
    /// Optional HuggingFace embedding model identifier.
    pub embedding_model: Option<String>,
}

impl ConfigValidator {
    /// Validate all configuration values for correctness and constraints.
    ///
    /// Checks that:
    /// - Collection name is not empty
    /// - Embedding dimension is between 1 and 4096
    /// - Embedding model, if set, is not empty
    /// - Database path, if set, is not empty
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if any validation check fails.
    pub fn validate(&self) -> Result<(), Error> {
        self.validate_collection()?;
        self.validate_embedding_dim()?;
        self.validate_embedding_model()?;
        self.validate_database_path()?;

        Ok(())
    }

    fn validate_collection(&self) -> Result<(), Error> {
        if self.collection.trim().is_empty() {
            return Err(Error::Config("Collection name cannot be empty".to_string()));
        }

        Ok(())
    }

    fn validate_embedding_dim(&self) -> Result<(), Error> {
        if self.embedding_dim == 0 || self.embedding_dim > MAX_EMBEDDING_DIM {
            return Err(Error::Config(format!(
                "Invalid embedding dimension: {} (must be between 1 and {})",
                self.embedding_dim, MAX_EMBEDDING_DIM
            )));
        }

        Ok(())
    }

    fn validate_embedding_model(&self) -> Result<(), Error> {
        if let Some(model) = &self.embedding_model {
            if model.trim().is_empty() {
                return Err(Error::Config("Embedding model cannot be empty".to_string()));
            }
        }

        Ok(())
    }

    fn validate_database_path(&self) -> Result<(), Error> {
        if let Some(path) = &self.database_path {
            if path.as_os_str().is_empty() {
                return Err(Error::Config("Database path cannot be empty".to_string()));
            }
        }

        Ok(())
    }
}
