//! Configuration system for mnemo.

mod env_parser;
mod loader;
mod overrides;
mod paths;
mod validation;

#[cfg(test)]
mod tests_utils;
#[cfg(test)]
use tests_utils::ENV_MUTEX;

use crate::embedding::HASH_EMBEDDING_DIMS;
use crate::errors::Error;
use serde::Deserialize;
use std::path::PathBuf;

pub use loader::ConfigFile;

/// Configuration values with priority: defaults < config file < env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to the SQLite database. `None` keeps the index in memory
    /// (ephemeral storage; nothing survives the process).
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Collection (namespace) records are stored under.
    #[serde(default)]
    pub collection: String,

    /// Dimensionality of hash-based embeddings. Ignored when an embedding
    /// model is configured (the model fixes its own dimensionality).
    #[serde(default)]
    pub embedding_dim: usize,

    /// HuggingFace embedding model identifier. `None` selects the
    /// deterministic hash embedder.
    #[serde(default)]
    pub embedding_model: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        // Use home directory with sensible fallback for systems without HOME
        let home = dirs::home_dir().unwrap_or_else(|| {
            std::env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
        });
        let mnemo_dir = home.join(".mnemo");

        Self {
            database_path: Some(mnemo_dir.join("memories.db")),
            collection: "memories".to_string(),
            embedding_dim: HASH_EMBEDDING_DIMS,
            embedding_model: None,
        }
    }
}

impl Config {
    /// Load configuration with defaults, file values, and environment overrides.
    ///
    /// # Errors
    ///
    /// Returns error if the config file is malformed, an environment
    /// override fails to parse, or validation rejects a value.
    pub fn load() -> Result<Self, Error> {
        let file_config = loader::load_from_file()?;

        let mut config = Config::default();

        if let Some(mut file) = file_config {
            paths::expand_tilde(&mut file.database_path);
            config.merge_from_file(file);
        }

        overrides::apply_env_overrides(
            &mut config.database_path,
            &mut config.collection,
            &mut config.embedding_dim,
            &mut config.embedding_model,
        )?;

        config.validate()?;

        Ok(config)
    }

    /// Merge configuration from a file into this config.
    fn merge_from_file(&mut self, file: ConfigFile) {
        if !file.database_path.as_os_str().is_empty() {
            self.database_path = Some(file.database_path);
        }
        if !file.collection.is_empty() {
            self.collection = file.collection;
        }
        self.embedding_dim = file.embedding_dim;
        if !file.embedding_model.is_empty() {
            self.embedding_model = Some(file.embedding_model);
        }
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), Error> {
        let validator = validation::ConfigValidator {
            database_path: self.database_path.clone(),
            collection: self.collection.clone(),
            embedding_dim: self.embedding_dim,
            embedding_model: self.embedding_model.clone(),
        };

        validator.validate()
    }

    /// Ensure the parent directory for the database path exists.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    pub fn ensure_directories(&self) -> Result<(), Error> {
        if let Some(db_path) = &self.database_path {
            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        Error::Config(format!(
                            "Failed to create database directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleanup_env_vars() {
        let vars = [
            "MNEMO_DATABASE_PATH",
            "MNEMO_COLLECTION",
            "MNEMO_EMBEDDING_DIM",
            "MNEMO_EMBEDDING_MODEL",
        ];
        for var in vars {
            // SAFETY: test holds ENV_MUTEX, no concurrent env access
            unsafe { std::env::remove_var(var) };
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config
            .database_path
            .as_ref()
            .unwrap()
            .ends_with(".mnemo/memories.db"));
        assert_eq!(config.collection, "memories");
        assert_eq!(config.embedding_dim, 128);
        assert!(config.embedding_model.is_none());
    }

    #[test]
    fn test_config_load_without_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        cleanup_env_vars();

        let config = Config::load().unwrap();

        assert!(config
            .database_path
            .as_ref()
            .unwrap()
            .ends_with(".mnemo/memories.db"));
        assert_eq!(config.collection, "memories");
        assert_eq!(config.embedding_dim, 128);
    }

    #[test]
    fn test_env_overrides_applied_on_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        cleanup_env_vars();

        // SAFETY: test holds ENV_MUTEX, no concurrent env access
        unsafe {
            std::env::set_var("MNEMO_COLLECTION", "scratch");
            std::env::set_var("MNEMO_EMBEDDING_DIM", "64");
        }

        let config = Config::load().unwrap();
        assert_eq!(config.collection, "scratch");
        assert_eq!(config.embedding_dim, 64);

        cleanup_env_vars();
    }
}
