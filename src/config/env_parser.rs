//! Environment variable parsing utilities for configuration.

use crate::errors::Error;
use std::path::PathBuf;

use super::paths;

/// Parse environment variable value or return error if empty/whitespace.
fn parse_env_string(name: &str, value: &str) -> Result<String, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    Ok(value.to_string())
}

/// Parse environment variable as a path, expanding tilde.
fn parse_env_path(name: &str, value: &str) -> Result<PathBuf, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    Ok(paths::expand_tilde_path(&PathBuf::from(value)))
}

/// Parse environment variable as a usize.
fn parse_env_usize(name: &str, value: &str) -> Result<usize, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid {name} value: {e}")))
}

/// Apply MNEMO_DATABASE_PATH environment variable override.
pub fn apply_database_path_override(database_path: &mut Option<PathBuf>) -> Result<(), Error> {
    if let Ok(val) = std::env::var("MNEMO_DATABASE_PATH") {
        *database_path = Some(parse_env_path("MNEMO_DATABASE_PATH", &val)?);
    }
    Ok(())
}

/// Apply MNEMO_COLLECTION environment variable override.
pub fn apply_collection_override(collection: &mut String) -> Result<(), Error> {
    if let Ok(val) = std::env::var("MNEMO_COLLECTION") {
        *collection = parse_env_string("MNEMO_COLLECTION", &val)?;
    }
    Ok(())
}

/// Apply MNEMO_EMBEDDING_DIM environment variable override.
pub fn apply_embedding_dim_override(embedding_dim: &mut usize) -> Result<(), Error> {
    if let Ok(val) = std::env::var("MNEMO_EMBEDDING_DIM") {
        *embedding_dim = parse_env_usize("MNEMO_EMBEDDING_DIM", &val)?;
    }
    Ok(())
}

/// Apply MNEMO_EMBEDDING_MODEL environment variable override.
pub fn apply_embedding_model_override(embedding_model: &mut Option<String>) -> Result<(), Error> {
    if let Ok(val) = std::env::var("MNEMO_EMBEDDING_MODEL") {
        *embedding_model = Some(parse_env_string("MNEMO_EMBEDDING_MODEL", &val)?);
    }
    Ok(())
}
