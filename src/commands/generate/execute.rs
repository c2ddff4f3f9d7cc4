use std::error::Error;

use super::GenerateCmd;
use crate::commands::Execute;
use crate::config::ConfigFile;
use crate::generator::{compile, generate, load_schema, summarize, GenerateResult};
use crate::schema::{emit, YamlSchemaLoader};

impl Execute for GenerateCmd {
    type Output = GenerateResult;

    fn execute(self, config: &ConfigFile) -> Result<Self::Output, Box<dyn Error>> {
        let schema_path = self.schema.unwrap_or_else(|| config.schema.clone());
        let output_path = self.output.unwrap_or_else(|| config.output.clone());

        if !self.dry_run {
            return Ok(generate(&YamlSchemaLoader, &schema_path, &output_path)?);
        }

        let schema = load_schema(&YamlSchemaLoader, &schema_path)?;
        let groups = compile(&schema)?;

        Ok(GenerateResult {
            schema: schema_path.display().to_string(),
            output: None,
            summary: summarize(&schema, &groups),
            script: Some(emit(&groups)),
        })
    }
}
