mod execute;
pub(super) mod output;

use std::path::PathBuf;

use clap::Args;

/// Generate the SQL script from a schema file
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  sqlgen generate                              # schema.yaml -> generated_db.sql
  sqlgen generate -s db/schema.yaml -o db.sql  # Explicit paths
  sqlgen generate --dry-run                    # Print the script, write nothing")]
pub struct GenerateCmd {
    /// Path to the YAML schema (overrides the config file)
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// Path to write the generated script to (overrides the config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Compile and show the script without writing it
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}
