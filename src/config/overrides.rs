//! Environment variable overrides for configuration.

use crate::errors::Error;
use std::path::PathBuf;

use super::env_parser;

#[cfg(test)]
use super::tests_utils::ENV_MUTEX;

/// Apply environment variable overrides to configuration.
pub fn apply_env_overrides(
    database_path: &mut Option<PathBuf>,
    collection: &mut String,
    embedding_dim: &mut usize,
    embedding_model: &mut Option<String>,
) -> Result<(), Error> {
    env_parser::apply_database_path_override(database_path)?;
    env_parser::apply_collection_override(collection)?;
    env_parser::apply_embedding_dim_override(embedding_dim)?;
    env_parser::apply_embedding_model_override(embedding_model)?;
    Ok(())
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
    fn test_env_var_overrides_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        cleanup_env_vars();

        // SAFETY: test holds ENV_MUTEX, no concurrent env access
        unsafe {
            std::env::set_var("MNEMO_DATABASE_PATH", "/custom/path/memories.db");
            std::env::set_var("MNEMO_COLLECTION", "env-collection");
            std::env::set_var("MNEMO_EMBEDDING_DIM", "256");
            std::env::set_var("MNEMO_EMBEDDING_MODEL", "env/model");
        }

        let mut database_path = Some(PathBuf::from("/default"));
        let mut collection = "memories".to_string();
        let mut embedding_dim = 128;
        let mut embedding_model = None;

        apply_env_overrides(
            &mut database_path,
            &mut collection,
            &mut embedding_dim,
            &mut embedding_model,
        )
        .unwrap();

        assert_eq!(database_path, Some(PathBuf::from("/custom/path/memories.db")));
        assert_eq!(collection, "env-collection");
        assert_eq!(embedding_dim, 256);
        assert_eq!(embedding_model, Some("env/model".to_string()));

        cleanup_env_vars();
    }

    #[test]
    fn test_invalid_embedding_dim() {
        let _guard = ENV_MUTEX.lock().unwrap();
        cleanup_env_vars();

        // SAFETY: test holds ENV_MUTEX, no concurrent env access
        unsafe { std::env::set_var("MNEMO_EMBEDDING_DIM", "invalid") };

        let mut database_path = None;
        let mut collection = "memories".to_string();
        let mut embedding_dim = 128;
        let mut embedding_model = None;

        let result = apply_env_overrides(
            &mut database_path,
            &mut collection,
            &mut embedding_dim,
            &mut embedding_model,
        );

        assert!(matches!(result, Err(Error::Config(_))));

        cleanup_env_vars();
    }

    #[test]
    fn test_empty_env_var_rejected() {
        let _guard = ENV_MUTEX.lock().unwrap();
        cleanup_env_vars();

        // SAFETY: test holds ENV_MUTEX, no concurrent env access
        unsafe { std::env::set_var("MNEMO_COLLECTION", "   ") };

        let mut database_path = None;
        let mut collection = "memories".to_string();
        let mut embedding_dim = 128;
        let mut embedding_model = None;

        let result = apply_env_overrides(
            &mut database_path,
            &mut collection,
            &mut embedding_dim,
            &mut embedding_model,
        );

        assert!(matches!(result, Err(Error::Config(_))));

        cleanup_env_vars();
    }

    #[test]
    fn test_no_env_vars_leaves_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        cleanup_env_vars();

        let mut database_path = Some(PathBuf::from("/default"));
        let mut collection = "memories".to_string();
        let mut embedding_dim = 128;
        let mut embedding_model = None;

        apply_env_overrides(
            &mut database_path,
            &mut collection,
            &mut embedding_dim,
            &mut embedding_model,
        )
        .unwrap();

        assert_eq!(database_path, Some(PathBuf::from("/default")));
        assert_eq!(collection, "memories");
        assert_eq!(embedding_dim, 128);
        assert!(embedding_model.is_none());
    }
}
