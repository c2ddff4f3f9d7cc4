use std::error::Error;

use super::CheckCmd;
use crate::commands::Execute;
use crate::config::ConfigFile;
use crate::generator::{compile, load_schema, summarize, CheckResult};
use crate::schema::YamlSchemaLoader;

impl Execute for CheckCmd {
    type Output = CheckResult;

    fn execute(self, config: &ConfigFile) -> Result<Self::Output, Box<dyn Error>> {
        let schema_path = self.schema.unwrap_or_else(|| config.schema.clone());

        // Compiling runs every validation generate would
        let schema = load_schema(&YamlSchemaLoader, &schema_path)?;
        let groups = compile(&schema)?;

        Ok(CheckResult {
            schema: schema_path.display().to_string(),
            summary: summarize(&schema, &groups),
        })
    }
}
