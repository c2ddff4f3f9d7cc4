//! Core schema description types.
//!
//! A `SchemaDescription` is built once from the raw mapping produced by a
//! `SchemaLoader` and never mutated afterwards. Structural problems (the source is
//! not a mapping of mappings) are reported here as `SchemaLoad`; per-table problems
//! such as a missing `fields` mapping or an untyped field are kept in the model and
//! reported by the compilers as `InvalidSchema`, naming the offending table.

use serde_yaml::{Mapping, Value};

use super::SchemaError;

/// Key holding the field declarations of a table.
const FIELDS_KEY: &str = "fields";

/// A declared field and its SQL type, as written in the schema source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescription {
    /// Field name (e.g., "name", "age")
    pub name: String,

    /// SQL type keyword. None when the source gave no usable string.
    pub field_type: Option<String>,
}

/// A table and its field declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescription {
    /// Table name as written in the source (normalized on emission)
    pub name: String,

    /// Declared fields in source order. None when the table has no `fields` mapping.
    pub fields: Option<Vec<FieldDescription>>,
}

/// Ordered collection of tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDescription {
    pub tables: Vec<TableDescription>,
}

impl FieldDescription {
    pub fn new(name: &str, field_type: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type: Some(field_type.to_string()),
        }
    }
}

impl TableDescription {
    pub fn new(name: &str, fields: Vec<FieldDescription>) -> Self {
        Self {
            name: name.to_string(),
            fields: Some(fields),
        }
    }

    /// Lowercased table name, validated as an SQL identifier.
    pub fn ident(&self) -> Result<String, SchemaError> {
        normalize_identifier(&self.name).ok_or_else(|| SchemaError::InvalidSchema {
            table: self.name.clone(),
            message: "table name must be non-empty and contain no whitespace".to_string(),
        })
    }

    /// Declared fields, or `InvalidSchema` when the table has no `fields` mapping.
    pub fn declared_fields(&self) -> Result<&[FieldDescription], SchemaError> {
        self.fields.as_deref().ok_or_else(|| SchemaError::InvalidSchema {
            table: self.name.clone(),
            message: format!("missing '{}' mapping", FIELDS_KEY),
        })
    }
}

impl SchemaDescription {
    /// Build a description from the raw mapping returned by a loader.
    ///
    /// `source` identifies where the mapping came from and is only used in errors.
    ///
    /// # Errors
    ///
    /// Returns `SchemaLoad` if a table name is not a scalar or a table entry is
    /// neither a mapping nor empty.
    pub fn from_mapping(source: &str, mapping: &Mapping) -> Result<Self, SchemaError> {
        let load_error = |message: String| SchemaError::SchemaLoad {
            path: source.to_string(),
            message,
        };

        let mut tables = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let name = scalar_key(key)
                .ok_or_else(|| load_error(format!("table name {:?} is not a scalar", key)))?;

            let fields = match value {
                Value::Mapping(table) => parse_fields(source, &name, table)?,
                Value::Null => None,
                _ => {
                    return Err(load_error(format!(
                        "table '{}' is not a mapping",
                        name
                    )));
                }
            };

            tables.push(TableDescription { name, fields });
        }

        Ok(Self { tables })
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableDescription> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

fn parse_fields(
    source: &str,
    table: &str,
    mapping: &Mapping,
) -> Result<Option<Vec<FieldDescription>>, SchemaError> {
    // Anything but a mapping (absent, null, a list) counts as a missing declaration
    let Some(Value::Mapping(fields)) = mapping.get(FIELDS_KEY) else {
        return Ok(None);
    };

    let mut parsed = Vec::with_capacity(fields.len());
    for (key, value) in fields {
        let name = scalar_key(key).ok_or_else(|| SchemaError::SchemaLoad {
            path: source.to_string(),
            message: format!("field name {:?} in table '{}' is not a scalar", key, table),
        })?;
        let field_type = match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        };
        parsed.push(FieldDescription { name, field_type });
    }

    Ok(Some(parsed))
}

fn scalar_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Lowercase `raw` and check it is usable as an identifier.
///
/// Returns None for empty names or names with embedded whitespace.
pub(crate) fn normalize_identifier(raw: &str) -> Option<String> {
    if raw.is_empty() || raw.chars().any(char::is_whitespace) {
        return None;
    }
    Some(raw.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).expect("fixture should be a mapping")
    }

    #[test]
    fn test_from_mapping_preserves_table_order() {
        let schema = SchemaDescription::from_mapping(
            "test",
            &mapping("user:\n  fields:\n    name: text\npost:\n  fields:\n    title: text\n"),
        )
        .unwrap();

        let names: Vec<_> = schema.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["user", "post"]);
    }

    #[test]
    fn test_from_mapping_preserves_field_order() {
        let schema = SchemaDescription::from_mapping(
            "test",
            &mapping("user:\n  fields:\n    name: text\n    age: integer\n    bio: text\n"),
        )
        .unwrap();

        let fields = schema.tables[0].fields.as_ref().unwrap();
        assert_eq!(fields[0], FieldDescription::new("name", "text"));
        assert_eq!(fields[1], FieldDescription::new("age", "integer"));
        assert_eq!(fields[2], FieldDescription::new("bio", "text"));
    }

    #[test]
    fn test_from_mapping_empty_fields() {
        let schema =
            SchemaDescription::from_mapping("test", &mapping("tag:\n  fields: {}\n")).unwrap();
        assert_eq!(schema.tables[0].fields, Some(vec![]));
    }

    #[rstest]
    #[case::no_fields_key("user:\n  columns:\n    name: text\n")]
    #[case::null_fields("user:\n  fields:\n")]
    #[case::list_fields("user:\n  fields: [name, age]\n")]
    #[case::null_table("user:\n")]
    fn test_from_mapping_missing_fields_is_kept(#[case] yaml: &str) {
        let schema = SchemaDescription::from_mapping("test", &mapping(yaml)).unwrap();
        assert_eq!(schema.tables[0].fields, None);
    }

    #[test]
    fn test_from_mapping_non_string_type_is_missing() {
        let schema = SchemaDescription::from_mapping(
            "test",
            &mapping("user:\n  fields:\n    age: 5\n    name:\n"),
        )
        .unwrap();

        let fields = schema.tables[0].fields.as_ref().unwrap();
        assert_eq!(fields[0].field_type, None);
        assert_eq!(fields[1].field_type, None);
    }

    #[rstest]
    #[case::scalar_table("user: text\n")]
    #[case::list_table("user:\n  - name\n")]
    fn test_from_mapping_rejects_non_mapping_table(#[case] yaml: &str) {
        let result = SchemaDescription::from_mapping("schema.yaml", &mapping(yaml));
        match result {
            Err(SchemaError::SchemaLoad { path, message }) => {
                assert_eq!(path, "schema.yaml");
                assert!(message.contains("user"));
            }
            other => panic!("Expected SchemaLoad, got {:?}", other),
        }
    }

    #[test]
    fn test_ident_lowercases() {
        let table = TableDescription::new("UserAccount", vec![]);
        assert_eq!(table.ident().unwrap(), "useraccount");
    }

    #[rstest]
    #[case("")]
    #[case("user account")]
    #[case("user\taccount")]
    fn test_ident_rejects_invalid_names(#[case] name: &str) {
        let table = TableDescription::new(name, vec![]);
        assert!(matches!(
            table.ident(),
            Err(SchemaError::InvalidSchema { .. })
        ));
    }

    #[test]
    fn test_declared_fields_missing() {
        let table = TableDescription {
            name: "user".to_string(),
            fields: None,
        };
        let err = table.declared_fields().unwrap_err();
        assert!(err.to_string().contains("'user'"));
        assert!(err.to_string().contains("fields"));
    }
}
