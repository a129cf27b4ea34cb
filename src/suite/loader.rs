//! @ai:module:intent TOML loader for suite definition files
//! @ai:module:layer infrastructure
//! @ai:module:public_api SuiteLoader
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::suite::registry::SuiteRegistry;
use crate::suite::task::{BenchmarkSuite, SuiteFile};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// @ai:intent Trait for loading suite definitions
pub trait SuiteLoaderTrait: Send + Sync {
    /// @ai:intent Load all suites from a directory of TOML files
    fn load_all(&self, suites_dir: &Path) -> Result<Vec<BenchmarkSuite>>;

    /// @ai:intent Load suites and register them, returning the count
    fn load_into(&self, suites_dir: &Path, registry: &mut SuiteRegistry) -> Result<usize>;
}

/// @ai:intent Loads suite definitions from TOML files
pub struct SuiteLoader;

impl SuiteLoader {
    /// @ai:intent Create a new suite loader
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Parse a single suite file
    /// @ai:pre path points to a valid TOML file
    /// @ai:effects fs:read
    fn parse_suite_file(path: &Path) -> Result<BenchmarkSuite> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::SuiteFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let file: SuiteFile = toml::from_str(&content).map_err(|e| Error::SuiteFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        file.try_into()
    }

    /// @ai:intent Find all TOML files under a directory, in path order
    /// @ai:effects fs:read
    fn find_suite_files(suites_dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(suites_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "toml")
                    .unwrap_or(false)
            })
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        files
    }
}

impl Default for SuiteLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SuiteLoaderTrait for SuiteLoader {
    /// @ai:intent Load all suites from a directory of TOML files
    /// @ai:effects fs:read
    fn load_all(&self, suites_dir: &Path) -> Result<Vec<BenchmarkSuite>> {
        let files = Self::find_suite_files(suites_dir);
        let mut suites = Vec::with_capacity(files.len());

        for path in files {
            match Self::parse_suite_file(&path) {
                Ok(suite) => suites.push(suite),
                Err(e) => {
                    tracing::warn!("Skipping invalid suite file {}: {}", path.display(), e);
                }
            }
        }

        Ok(suites)
    }

    /// @ai:intent Load suites and register them, returning the count
    /// @ai:effects fs:read, state:write
    fn load_into(&self, suites_dir: &Path, registry: &mut SuiteRegistry) -> Result<usize> {
        let suites = self.load_all(suites_dir)?;
        let count = suites.len();

        for suite in suites {
            tracing::debug!("Registering suite '{}' ({} tasks)", suite.name, suite.len());
            registry.register(suite);
        }

        Ok(count)
    }
}
