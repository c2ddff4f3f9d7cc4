//! sqlgen library - SQL DDL generation from declarative schemas
//!
//! Reads a YAML description of tables and fields and compiles it into a
//! re-runnable PostgreSQL script: table creation, audit timestamp columns and the
//! triggers that maintain them.

pub mod cli;
pub mod commands;
pub mod config;
pub mod generator;
pub mod output;
pub mod schema;

#[macro_use]
pub mod test_macros;

#[cfg(test)]
pub mod test_utils;
