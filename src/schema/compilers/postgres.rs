//! PostgreSQL DDL compiler.
//!
//! Generates the three statement groups of a generated script:
//!
//! ```sql
//! DROP TABLE IF EXISTS user CASCADE;
//! CREATE TABLE user (
//!   user_id SERIAL,
//!   user_name TEXT,
//!   PRIMARY KEY (user_id)
//! );
//!
//! ALTER TABLE user ADD COLUMN user_created TIMESTAMP;
//! ALTER TABLE user ADD COLUMN user_updated TIMESTAMP;
//!
//! CREATE OR REPLACE FUNCTION update_user_timestamp() ...
//! ```
//!
//! Every statement is safe to re-run: tables are dropped first, functions are
//! replaced and triggers are dropped if they exist before being created.

use std::collections::HashSet;

use super::{GroupKind, StatementGroup};
use crate::schema::definition::{normalize_identifier, FieldDescription, TableDescription};
use crate::schema::{SchemaDescription, SchemaError};

/// Type of the synthetic primary key column.
const ID_TYPE: &str = "SERIAL";

/// Type of the audit timestamp columns.
const TIMESTAMP_TYPE: &str = "TIMESTAMP";

/// Field names whose prefixed column the compiler generates itself.
const RESERVED_FIELDS: &[&str] = &["id", "created", "updated"];

/// Indentation of column lines inside `CREATE TABLE`.
const COLUMN_INDENT: &str = "  ";

/// Audit timestamp maintained by a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampColumn {
    Created,
    Updated,
}

impl TimestampColumn {
    /// Column suffix appended to the table name (e.g., `user_created`).
    pub fn suffix(&self) -> &'static str {
        match self {
            TimestampColumn::Created => "created",
            TimestampColumn::Updated => "updated",
        }
    }

    /// Verb prefixed to the trigger function name (e.g., `create_user_timestamp`).
    fn function_verb(&self) -> &'static str {
        match self {
            TimestampColumn::Created => "create",
            TimestampColumn::Updated => "update",
        }
    }

    /// Row event the trigger fires on.
    ///
    /// Triggers are specified to fire AFTER the event. PostgreSQL ignores changes
    /// to `NEW` in AFTER row triggers, so these functions do not set the column.
    fn event(&self) -> &'static str {
        match self {
            TimestampColumn::Created => "INSERT",
            TimestampColumn::Updated => "UPDATE",
        }
    }
}

/// Compiler for generating PostgreSQL DDL from schema descriptions.
pub struct PostgresCompiler;

impl PostgresCompiler {
    /// Generate `DROP TABLE` / `CREATE TABLE` pairs for every table, in schema order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSchema` if a table has no `fields` mapping, a field has no
    /// usable type, a table/field name is not a valid identifier, or two tables
    /// share a name once lowercased.
    pub fn compile_tables(schema: &SchemaDescription) -> Result<StatementGroup, SchemaError> {
        let mut group = StatementGroup::new(GroupKind::TableCreation);
        let mut seen = HashSet::new();
        for table in schema.iter() {
            if !seen.insert(table.ident()?) {
                return Err(SchemaError::InvalidSchema {
                    table: table.name.clone(),
                    message: "table name repeats an earlier table".to_string(),
                });
            }
            let (drop, create) = Self::compile_table(table)?;
            group.push(drop);
            group.push(create);
        }
        Ok(group)
    }

    /// Generate the drop and create statements for a single table.
    ///
    /// Produces output in the format:
    /// ```sql
    /// DROP TABLE IF EXISTS post CASCADE;
    /// CREATE TABLE post (
    ///   post_id SERIAL,
    ///   post_title TEXT,
    ///   PRIMARY KEY (post_id)
    /// );
    /// ```
    ///
    /// Fields named `id`, `created` or `updated`, and fields repeating another
    /// field once lowercased, are rejected since their columns would collide.
    pub fn compile_table(table: &TableDescription) -> Result<(String, String), SchemaError> {
        let name = table.ident()?;
        let fields = table.declared_fields()?;

        let mut lines = Vec::with_capacity(fields.len() + 2);
        let mut seen = HashSet::with_capacity(fields.len());
        lines.push(format!("{}_id {}", name, ID_TYPE));
        for field in fields {
            let (column, column_type) = Self::field_column(&table.name, &name, field)?;
            let field_name = &column[name.len() + 1..];
            let collision = if RESERVED_FIELDS.contains(&field_name) {
                Some("is reserved for a generated column")
            } else if !seen.insert(column.clone()) {
                Some("repeats an earlier field")
            } else {
                None
            };
            if let Some(reason) = collision {
                return Err(SchemaError::InvalidSchema {
                    table: table.name.clone(),
                    message: format!("field '{}' {}", field.name, reason),
                });
            }
            lines.push(format!("{} {}", column, column_type));
        }
        lines.push(format!("PRIMARY KEY ({}_id)", name));

        tracing::debug!(table = %name, columns = fields.len() + 1, "compiled table");

        let drop = format!("DROP TABLE IF EXISTS {} CASCADE;", name);
        let create = format!(
            "CREATE TABLE {} (\n{}{}\n);",
            name,
            COLUMN_INDENT,
            lines.join(&format!(",\n{}", COLUMN_INDENT))
        );
        Ok((drop, create))
    }

    /// Generate an `ALTER TABLE ... ADD COLUMN` statement.
    ///
    /// Names follow the same rules as table creation: the table is lowercased, the
    /// column is prefixed with the table name and the type is uppercased.
    pub fn compile_column_addition(
        table: &str,
        field: &str,
        field_type: &str,
    ) -> Result<String, SchemaError> {
        let name = normalize_identifier(table).ok_or_else(|| SchemaError::InvalidSchema {
            table: table.to_string(),
            message: "table name must be non-empty and contain no whitespace".to_string(),
        })?;
        let (column, column_type) =
            Self::field_column(table, &name, &FieldDescription::new(field, field_type))?;

        Ok(format!(
            "ALTER TABLE {} ADD COLUMN {} {};",
            name, column, column_type
        ))
    }

    /// Generate the `created` and `updated` audit columns for every table.
    pub fn compile_timestamp_columns(
        schema: &SchemaDescription,
    ) -> Result<StatementGroup, SchemaError> {
        let mut group = StatementGroup::new(GroupKind::ColumnAddition);
        for table in schema.iter() {
            for column in [TimestampColumn::Created, TimestampColumn::Updated] {
                group.push(Self::compile_column_addition(
                    &table.name,
                    column.suffix(),
                    TIMESTAMP_TYPE,
                )?);
            }
        }
        Ok(group)
    }

    /// Generate the `updated` and `created` trigger definitions for every table.
    pub fn compile_triggers(schema: &SchemaDescription) -> Result<StatementGroup, SchemaError> {
        let mut group = StatementGroup::new(GroupKind::TriggerDefinition);
        for table in schema.iter() {
            let name = table.ident()?;
            group.push(Self::compile_trigger(&name, TimestampColumn::Updated));
            group.push(Self::compile_trigger(&name, TimestampColumn::Created));
        }
        Ok(group)
    }

    /// Generate the function and trigger keeping one audit column current.
    ///
    /// `table` must already be normalized. Produces output in the format:
    /// ```sql
    /// CREATE OR REPLACE FUNCTION update_user_timestamp()
    /// RETURNS TRIGGER AS $$
    /// BEGIN
    ///   NEW.user_updated = now();
    ///   RETURN NEW;
    /// END;
    /// $$ LANGUAGE plpgsql;
    /// DROP TRIGGER IF EXISTS user_updated_trigger ON user;
    /// CREATE TRIGGER user_updated_trigger
    /// AFTER UPDATE ON user
    /// FOR EACH ROW EXECUTE PROCEDURE update_user_timestamp();
    /// ```
    pub fn compile_trigger(table: &str, column: TimestampColumn) -> String {
        let function = format!("{}_{}_timestamp", column.function_verb(), table);
        let trigger = format!("{}_{}_trigger", table, column.suffix());

        format!(
            "CREATE OR REPLACE FUNCTION {function}()\n\
             RETURNS TRIGGER AS $$\n\
             BEGIN\n\
             {indent}NEW.{table}_{suffix} = now();\n\
             {indent}RETURN NEW;\n\
             END;\n\
             $$ LANGUAGE plpgsql;\n\
             DROP TRIGGER IF EXISTS {trigger} ON {table};\n\
             CREATE TRIGGER {trigger}\n\
             AFTER {event} ON {table}\n\
             FOR EACH ROW EXECUTE PROCEDURE {function}();",
            function = function,
            trigger = trigger,
            table = table,
            suffix = column.suffix(),
            event = column.event(),
            indent = COLUMN_INDENT,
        )
    }

    /// Resolve a field to its prefixed column name and uppercased type.
    ///
    /// `raw_table` is only used to label errors.
    fn field_column(
        raw_table: &str,
        table: &str,
        field: &FieldDescription,
    ) -> Result<(String, String), SchemaError> {
        let invalid = |message: String| SchemaError::InvalidSchema {
            table: raw_table.to_string(),
            message,
        };

        let field_name = normalize_identifier(&field.name).ok_or_else(|| {
            invalid(format!(
                "field name '{}' must be non-empty and contain no whitespace",
                field.name
            ))
        })?;

        let column_type = field
            .field_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| invalid(format!("field '{}' has no type", field.name)))?;

        Ok((
            format!("{}_{}", table, field_name),
            column_type.to_uppercase(),
        ))
    }
}
