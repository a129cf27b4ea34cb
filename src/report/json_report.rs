//! @ai:module:intent JSON report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReporter
//! @ai:module:stateless true

use crate::error::Result;
use crate::results::BenchmarkResults;
use std::path::Path;

/// @ai:intent Trait for JSON report generation
pub trait JsonReporterTrait: Send + Sync {
    /// @ai:intent Write the stable JSON document to a file
    fn generate(&self, results: &BenchmarkResults, output_path: &Path) -> Result<()>;
}

/// @ai:intent Writes the stable JSON results document
pub struct JsonReporter;

impl JsonReporter {
    /// @ai:intent Create a new JSON reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReporterTrait for JsonReporter {
    /// @ai:intent Write the stable JSON document to a file
    /// @ai:effects fs:write
    fn generate(&self, results: &BenchmarkResults, output_path: &Path) -> Result<()> {
        let json = results.to_json()?;
        std::fs::write(output_path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_writes_document() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("results.json");

        let results = BenchmarkResults::new(
            vec!["openai:gpt-4".to_string()],
            vec!["capitals".to_string()],
        );

        JsonReporter::new().generate(&results, &output).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("openai:gpt-4"));
        assert!(content.contains("\"models\""));
    }
}
