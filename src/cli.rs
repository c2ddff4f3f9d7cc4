//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and shared types.
//! Individual command definitions are in the `commands` module.

use clap::Parser;
use std::path::PathBuf;

use crate::commands::Command;
use crate::config::CONFIG_FILE;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate SQL DDL from a YAML schema", long_about = None)]
pub struct Args {
    /// Path to the JSON configuration file (optional; defaults apply if missing)
    #[arg(short, long, default_value = CONFIG_FILE, global = true)]
    pub config: PathBuf,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}
