//! Configuration file loading and parsing.

use crate::errors::Error;
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration loaded from TOML file.
///
/// Empty strings/paths mean "not set" and leave the defaults in place.
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub database_path: PathBuf,

    #[serde(default)]
    pub collection: String,

    #[serde(default = "default_embedding_dim")]
    pub embedding_dim: usize,

    #[serde(default)]
    pub embedding_model: String,
}

fn default_embedding_dim() -> usize {
    crate::embedding::HASH_EMBEDDING_DIMS
}

/// Load configuration from TOML file.
///
/// # Errors
///
/// Returns error if the file exists but cannot be read or parsed.
pub fn load_from_file() -> Result<Option<ConfigFile>, Error> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let config_dir = dirs::config_dir().unwrap_or_else(|| home.join(".config"));

    let config_path = config_dir.join("mnemo/config.toml");

    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file {}: {e}",
                config_path.display()
            ))
        })?;

        let config: ConfigFile = toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse config file {}: {e}",
                config_path.display()
            ))
        })?;

        Ok(Some(config))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_toml() {
        let content = r#"
This is not valid TOML
 [[unclosed bracket
 "#;

        let result: Result<ConfigFile, _> = toml::from_str(content);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_config_file() {
        let content = "";

        let result: Result<ConfigFile, _> = toml::from_str(content);
        assert!(result.is_ok());

        let config = result.unwrap();
        assert!(config.database_path.as_os_str().is_empty());
        assert!(config.collection.is_empty());
        assert!(config.embedding_model.is_empty());
        assert_eq!(config.embedding_dim, 128);
    }

    #[test]
    fn test_config_file_partial_toml() {
        let content = r#"
            database_path = "/test/memories.db"
            collection = "work"
        "#;

        let result: Result<ConfigFile, _> = toml::from_str(content);
        assert!(result.is_ok());

        let config = result.unwrap();
        assert_eq!(config.database_path, PathBuf::from("/test/memories.db"));
        assert_eq!(config.collection, "work");
        assert_eq!(config.embedding_dim, 128); // Missing field uses default 128
    }

    #[test]
    fn test_config_file_with_model() {
        let content = r#"
            embedding_model = "BAAI/bge-small-en-v1.5"
        "#;

        let config: ConfigFile = toml::from_str(content).unwrap();
        assert_eq!(config.embedding_model, "BAAI/bge-small-en-v1.5");
    }
}
