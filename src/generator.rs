//! Schema-to-script generation.
//!
//! Composes the pure compile steps into a script and writes it out. Compilation
//! always finishes before the destination is touched, and the write goes through a
//! temporary file in the destination directory that replaces the destination only
//! once fully written.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::schema::{
    emit, GroupKind, PostgresCompiler, SchemaDescription, SchemaError, SchemaLoader,
    StatementGroup,
};

/// Per-table summary of a compiled schema
#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub name: String,
    /// Columns in the CREATE statement, including the synthetic id
    pub columns: usize,
}

/// Counts describing a compiled schema
#[derive(Debug, Default, Serialize)]
pub struct CompileSummary {
    pub tables: Vec<TableSummary>,
    pub table_statements: usize,
    pub column_statements: usize,
    pub trigger_statements: usize,
}

/// Result of the generate command execution
#[derive(Debug, Serialize)]
pub struct GenerateResult {
    pub schema: String,
    /// Destination path. None when nothing was written.
    pub output: Option<String>,
    pub summary: CompileSummary,
    /// The generated script, only kept for dry runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}

/// Result of the check command execution
#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub schema: String,
    pub summary: CompileSummary,
}

/// Load a schema through `loader` and build its description.
pub fn load_schema(
    loader: &dyn SchemaLoader,
    path: &Path,
) -> Result<SchemaDescription, SchemaError> {
    let mapping = loader.load(path)?;
    SchemaDescription::from_mapping(&path.display().to_string(), &mapping)
}

/// Run every compile step over `schema`.
///
/// Returns the table creation, column addition and trigger definition groups in
/// that order.
pub fn compile(schema: &SchemaDescription) -> Result<Vec<StatementGroup>, SchemaError> {
    let tables = PostgresCompiler::compile_tables(schema)?;
    let columns = PostgresCompiler::compile_timestamp_columns(schema)?;
    let triggers = PostgresCompiler::compile_triggers(schema)?;

    tracing::debug!(
        tables = schema.len(),
        statements = tables.len() + columns.len() + triggers.len(),
        "compiled schema"
    );
    Ok(vec![tables, columns, triggers])
}

/// Summarize a schema and the groups compiled from it.
pub fn summarize(schema: &SchemaDescription, groups: &[StatementGroup]) -> CompileSummary {
    let count = |kind: GroupKind| -> usize {
        groups
            .iter()
            .filter(|g| g.kind == kind)
            .map(StatementGroup::len)
            .sum()
    };

    CompileSummary {
        tables: schema
            .iter()
            .map(|t| TableSummary {
                name: t.name.to_lowercase(),
                columns: t.fields.as_ref().map_or(0, Vec::len) + 1,
            })
            .collect(),
        table_statements: count(GroupKind::TableCreation),
        column_statements: count(GroupKind::ColumnAddition),
        trigger_statements: count(GroupKind::TriggerDefinition),
    }
}

/// Load, compile and emit the schema at `schema_path`, then write the script to
/// `output_path`.
///
/// # Errors
///
/// Any load, validation or write error aborts the run. The destination is left
/// untouched unless the whole script was written.
pub fn generate(
    loader: &dyn SchemaLoader,
    schema_path: &Path,
    output_path: &Path,
) -> Result<GenerateResult, SchemaError> {
    let schema = load_schema(loader, schema_path)?;
    let groups = compile(&schema)?;
    let script = emit(&groups);

    write_atomic(output_path, &script)?;
    tracing::info!(
        output = %output_path.display(),
        tables = schema.len(),
        bytes = script.len(),
        "wrote generated script"
    );

    Ok(GenerateResult {
        schema: schema_path.display().to_string(),
        output: Some(output_path.display().to_string()),
        summary: summarize(&schema, &groups),
        script: None,
    })
}

/// Write `content` to `path` through a temporary sibling file.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), SchemaError> {
    let write_error = |e: std::io::Error| SchemaError::OutputWrite {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(content.as_bytes()).map_err(write_error)?;
    file.as_file().sync_all().map_err(write_error)?;
    file.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}
