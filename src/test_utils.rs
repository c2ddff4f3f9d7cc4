//! Shared test utilities for compiler, generator and command tests.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_yaml::Mapping;
use tempfile::NamedTempFile;

use crate::schema::{
    FieldDescription, SchemaDescription, SchemaError, SchemaLoader, TableDescription,
    YamlSchemaLoader,
};

/// Create a temporary file containing the given YAML content.
pub fn create_temp_yaml_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".yaml").expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

/// Helper to normalize whitespace for comparison.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `user` with `name: text` and `age: integer`.
pub fn user_schema() -> SchemaDescription {
    SchemaDescription {
        tables: vec![TableDescription::new(
            "user",
            vec![
                FieldDescription::new("name", "text"),
                FieldDescription::new("age", "integer"),
            ],
        )],
    }
}

/// `user` followed by `post`.
pub fn user_post_schema() -> SchemaDescription {
    let mut schema = user_schema();
    schema.tables.push(TableDescription::new(
        "post",
        vec![
            FieldDescription::new("title", "Text"),
            FieldDescription::new("published", "timestamp"),
        ],
    ));
    schema
}

/// Loader serving YAML fixtures from memory, keyed by path.
#[derive(Debug, Default)]
pub struct InMemoryLoader {
    sources: HashMap<PathBuf, String>,
}

impl InMemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, yaml: &str) -> Self {
        self.sources.insert(PathBuf::from(path), yaml.to_string());
        self
    }
}

impl SchemaLoader for InMemoryLoader {
    fn load(&self, path: &Path) -> Result<Mapping, SchemaError> {
        let content = self.sources.get(path).ok_or_else(|| SchemaError::SchemaLoad {
            path: path.display().to_string(),
            message: "no such fixture".to_string(),
        })?;
        YamlSchemaLoader::parse_str(&path.display().to_string(), content)
    }
}
