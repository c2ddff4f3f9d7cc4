//! Schema descriptions and their translation into SQL.
//!
//! The schema system consists of four parts:
//!
//! 1. **Core Types** (`definition.rs`):
//!    - `SchemaDescription` - Ordered list of tables read from the schema source
//!    - `TableDescription` - A table name and its (possibly missing) field declarations
//!    - `FieldDescription` - A field name and its (possibly missing) SQL type
//!
//! 2. **Loading** (`loader.rs`):
//!    - `SchemaLoader` - Capability trait turning a path into a raw YAML mapping
//!    - `YamlSchemaLoader` - Filesystem implementation
//!
//! 3. **Compilers** (`compilers/`):
//!    - `PostgresCompiler` - Produces table, column and trigger `StatementGroup`s
//!
//! 4. **Emission** (`emit.rs`):
//!    - `emit` - Concatenates statement groups into the final script text
//!
//! # Naming
//!
//! | Schema | Emitted |
//! |--------|---------|
//! | table `User` | `user` |
//! | synthetic key | `user_id SERIAL` |
//! | field `name: text` | `user_name TEXT` |
//! | audit columns | `user_created`, `user_updated` |

pub mod compilers;
mod definition;
mod emit;
mod loader;

pub use compilers::{GroupKind, PostgresCompiler, StatementGroup};
pub use definition::{FieldDescription, SchemaDescription, TableDescription};
pub use emit::emit;
pub use loader::{SchemaLoader, YamlSchemaLoader};

use thiserror::Error;

/// Schema loading, validation and output errors
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to load schema '{path}': {message}")]
    SchemaLoad { path: String, message: String },

    #[error("Invalid schema for table '{table}': {message}")]
    InvalidSchema { table: String, message: String },

    #[error("Failed to write output '{path}': {message}")]
    OutputWrite { path: String, message: String },
}
