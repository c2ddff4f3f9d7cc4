//! Output formatting for generate command results.

use crate::generator::{CompileSummary, GenerateResult};
use crate::output::Outputable;

impl Outputable for GenerateResult {
    fn to_table(&self) -> String {
        // Dry runs print the script itself so it can be piped
        if let Some(script) = &self.script {
            return script.trim_end().to_string();
        }

        let mut output = String::new();
        output.push_str(&format!("Schema: {}\n", self.schema));
        if let Some(path) = &self.output {
            output.push_str(&format!("Output: {}\n", path));
        }
        output.push('\n');
        output.push_str(&format_summary(&self.summary));
        output
    }
}

/// Shared summary block for generate and check results.
pub(crate) fn format_summary(summary: &CompileSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!("Tables ({}):\n", summary.tables.len()));
    for table in &summary.tables {
        output.push_str(&format!("  {} ({} columns)\n", table.name, table.columns));
    }
    output.push('\n');
    output.push_str("Statements:\n");
    output.push_str(&format!("  Tables: {}\n", summary.table_statements));
    output.push_str(&format!("  Columns: {}\n", summary.column_statements));
    output.push_str(&format!("  Triggers: {}\n", summary.trigger_statements));

    output
}
