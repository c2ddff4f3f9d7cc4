//! Output formatting for check command results.

use crate::commands::generate::output::format_summary;
use crate::generator::CheckResult;
use crate::output::Outputable;

impl Outputable for CheckResult {
    fn to_table(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Schema OK: {}\n\n", self.schema));
        output.push_str(&format_summary(&self.summary));
        output
    }
}
