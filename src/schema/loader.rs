//! Schema source loading.
//!
//! The compiler only ever sees a `SchemaDescription`; how the underlying mapping is
//! obtained is hidden behind `SchemaLoader` so tests can hand in fixtures without
//! touching the filesystem.

use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use super::SchemaError;

/// Capability for turning a schema path into a raw mapping of tables.
pub trait SchemaLoader {
    /// Load the raw table mapping found at `path`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::SchemaLoad` if the source is missing, unreadable or not
    /// a mapping.
    fn load(&self, path: &Path) -> Result<Mapping, SchemaError>;
}

/// Reads YAML schema files from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlSchemaLoader;

impl YamlSchemaLoader {
    /// Parse YAML text into a table mapping.
    ///
    /// `source` is only used to label errors.
    pub fn parse_str(source: &str, content: &str) -> Result<Mapping, SchemaError> {
        let load_error = |message: String| SchemaError::SchemaLoad {
            path: source.to_string(),
            message,
        };

        let value: Value = serde_yaml::from_str(content).map_err(|e| load_error(e.to_string()))?;

        match value {
            Value::Mapping(mapping) => Ok(mapping),
            // An empty document parses as null
            Value::Null => Ok(Mapping::new()),
            _ => Err(load_error("top level is not a mapping of tables".to_string())),
        }
    }
}

impl SchemaLoader for YamlSchemaLoader {
    fn load(&self, path: &Path) -> Result<Mapping, SchemaError> {
        let content = fs::read_to_string(path).map_err(|e| SchemaError::SchemaLoad {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "read schema source");
        Self::parse_str(&path.display().to_string(), &content)
    }
}
