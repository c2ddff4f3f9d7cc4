//! Configuration file handling.
//!
//! This module provides loading and parsing of `.sqlgen.json` configuration files.
//! The file is optional; command-line flags take precedence over its values.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE: &str = ".sqlgen.json";

/// Default schema source path.
pub const DEFAULT_SCHEMA: &str = "schema.yaml";

/// Default generated script path.
pub const DEFAULT_OUTPUT: &str = "generated_db.sql";

/// Top-level configuration file structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to the YAML schema description
    pub schema: PathBuf,

    /// Path the generated SQL script is written to
    pub output: PathBuf,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            schema: PathBuf::from(DEFAULT_SCHEMA),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl ConfigFile {
    /// Load configuration from `path`, falling back to defaults if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The JSON is invalid or has unknown keys
    pub fn load_or_default(path: &Path) -> Result<Self, Box<dyn Error>> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            Box::new(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to read {}: {}", path.display(), e),
            )) as Box<dyn Error>
        })?;

        let config: ConfigFile = serde_json::from_str(&content).map_err(|e| {
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Invalid JSON in {}: {}", path.display(), e),
            )) as Box<dyn Error>
        })?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_full_deserialization() {
        let json = r#"
        {
            "schema": "db/schema.yaml",
            "output": "db/generated.sql"
        }
        "#;
        let config: ConfigFile = serde_json::from_str(json).unwrap();
        assert_eq!(config.schema, PathBuf::from("db/schema.yaml"));
        assert_eq!(config.output, PathBuf::from("db/generated.sql"));
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let json = r#"{ "output": "out.sql" }"#;
        let config: ConfigFile = serde_json::from_str(json).unwrap();
        assert_eq!(config.schema, PathBuf::from(DEFAULT_SCHEMA));
        assert_eq!(config.output, PathBuf::from("out.sql"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let json = r#"{ "schemas": "typo.yaml" }"#;
        let result: Result<ConfigFile, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = ConfigFile::load_or_default(Path::new("/nonexistent/.sqlgen.json")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{ "schema": "tables.yaml" }"#).unwrap();

        let config = ConfigFile::load_or_default(file.path()).unwrap();
        assert_eq!(config.schema, PathBuf::from("tables.yaml"));
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn test_invalid_json_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = ConfigFile::load_or_default(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid JSON"));
    }
}
