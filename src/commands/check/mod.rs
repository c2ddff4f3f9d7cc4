mod execute;
mod output;

use std::path::PathBuf;

use clap::Args;

/// Validate a schema file without writing anything
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  sqlgen check                     # Validate schema.yaml
  sqlgen check -s db/schema.yaml   # Validate a specific file
  sqlgen check --format json       # Machine-readable summary")]
pub struct CheckCmd {
    /// Path to the YAML schema (overrides the config file)
    #[arg(short, long)]
    pub schema: Option<PathBuf>,
}
