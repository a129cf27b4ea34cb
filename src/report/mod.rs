//! @ai:module:intent Report generation for benchmark results
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportGenerator, ReportFormat, JsonReporter, CsvReporter

pub mod csv_report;
pub mod json_report;

pub use csv_report::{CsvReporter, CsvReporterTrait};
pub use json_report::{JsonReporter, JsonReporterTrait};

use crate::error::{Error, Result};
use crate::results::BenchmarkResults;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// @ai:intent Requested report output format
///
/// Only `json` and `csv` are implemented; the others are accepted and
/// skipped with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Csv,
    Markdown,
    Html,
}

impl ReportFormat {
    /// @ai:intent Get string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
            ReportFormat::Markdown => "markdown",
            ReportFormat::Html => "html",
        }
    }

    /// @ai:intent File name written under the output directory
    /// @ai:effects pure
    pub fn file_name(&self) -> String {
        format!("results.{}", self.as_str())
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "html" => Ok(ReportFormat::Html),
            other => Err(Error::InvalidInput(format!(
                "unknown report format '{}'. Expected one of: json, csv, markdown, html",
                other
            ))),
        }
    }
}

/// @ai:intent Combined report generator for a set of requested formats
pub struct ReportGenerator {
    json: JsonReporter,
    csv: CsvReporter,
}

impl ReportGenerator {
    /// @ai:intent Create a new report generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            json: JsonReporter::new(),
            csv: CsvReporter::new(),
        }
    }

    /// @ai:intent Write `results.<format>` per requested format; skip unimplemented ones
    /// @ai:effects fs:write
    pub fn generate(
        &self,
        results: &BenchmarkResults,
        formats: &[ReportFormat],
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(output_dir)?;

        let mut written = Vec::new();

        for format in formats {
            let path = output_dir.join(format.file_name());

            match format {
                ReportFormat::Json => {
                    self.json.generate(results, &path)?;
                    written.push(path);
                }
                ReportFormat::Csv => {
                    self.csv.generate(results, &path)?;
                    written.push(path);
                }
                other => {
                    tracing::warn!("Report format '{}' is not implemented, skipping", other);
                }
            }
        }

        for path in &written {
            tracing::info!("Report written to {}", path.display());
        }

        Ok(written)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}
