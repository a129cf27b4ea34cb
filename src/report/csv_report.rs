//! @ai:module:intent CSV report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api CsvReporter
//! @ai:module:stateless true

use crate::error::Result;
use crate::results::BenchmarkResults;
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// @ai:intent Trait for CSV report generation
pub trait CsvReporterTrait: Send + Sync {
    /// @ai:intent Write one row per result to a CSV file
    fn generate(&self, results: &BenchmarkResults, output_path: &Path) -> Result<()>;
}

/// @ai:intent Writes the tabular export as CSV, one row per result
pub struct CsvReporter;

impl CsvReporter {
    /// @ai:intent Create a new CSV reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Quote a field when it contains separators or quotes
    /// @ai:effects pure
    fn escape(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvReporterTrait for CsvReporter {
    /// @ai:intent Write one row per result to a CSV file, insertion order
    /// @ai:effects fs:write
    fn generate(&self, results: &BenchmarkResults, output_path: &Path) -> Result<()> {
        let mut out = String::from("model,task,score\n");

        for record in results.records() {
            writeln!(
                out,
                "{},{},{}",
                Self::escape(&record.model),
                Self::escape(&record.task),
                record.score
            )
            .unwrap();
        }

        std::fs::write(output_path, out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::TaskResult;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_generate_writes_header_and_rows() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("results.csv");

        let mut results = BenchmarkResults::new(
            vec!["openai:gpt-4".to_string()],
            vec!["capitals".to_string()],
        );
        results.add_result(TaskResult {
            model: "openai:gpt-4".to_string(),
            task: "capitals".to_string(),
            input_index: 0,
            output: "Paris".to_string(),
            score: 1.0,
            metadata: serde_json::Map::new(),
        });

        CsvReporter::new().generate(&results, &output).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content, "model,task,score\nopenai:gpt-4,capitals,1\n");
    }

    #[test]
    fn test_escape_quotes_embedded_separators() {
        assert_eq!(CsvReporter::escape("plain"), "plain");
        assert_eq!(CsvReporter::escape("a,b"), "\"a,b\"");
        assert_eq!(CsvReporter::escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
