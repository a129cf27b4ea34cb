//! @ai:module:intent Named lookup of registered benchmark suites
//! @ai:module:layer application
//! @ai:module:public_api SuiteRegistry
//! @ai:module:stateless false

use crate::error::{Error, Result};
use crate::suite::BenchmarkSuite;

/// @ai:intent Explicit registry instance mapping suite name to suite
///
/// Passed to the CLI and tests rather than living as a process-global.
/// `names()` returns registration order; overwriting a suite keeps its
/// original position so listings stay stable.
#[derive(Debug, Default)]
pub struct SuiteRegistry {
    suites: Vec<BenchmarkSuite>,
}

impl SuiteRegistry {
    /// @ai:intent Create an empty registry
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Store a suite under its name; last registration wins
    /// @ai:effects state:write
    pub fn register(&mut self, suite: BenchmarkSuite) {
        match self.suites.iter_mut().find(|s| s.name == suite.name) {
            Some(slot) => {
                tracing::debug!("Overwriting registered suite '{}'", suite.name);
                *slot = suite;
            }
            None => self.suites.push(suite),
        }
    }

    /// @ai:intent Look up a suite by name
    /// @ai:effects pure
    pub fn get(&self, name: &str) -> Result<&BenchmarkSuite> {
        self.suites
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| Error::SuiteNotFound {
                name: name.to_string(),
                known: self.names(),
            })
    }

    /// @ai:intent Registered suite names in registration order
    /// @ai:effects pure
    pub fn names(&self) -> Vec<String> {
        self.suites.iter().map(|s| s.name.clone()).collect()
    }

    /// @ai:intent Iterate registered suites in registration order
    /// @ai:effects pure
    pub fn iter(&self) -> impl Iterator<Item = &BenchmarkSuite> {
        self.suites.iter()
    }

    /// @ai:intent Number of registered suites
    /// @ai:effects pure
    pub fn len(&self) -> usize {
        self.suites.len()
    }

    /// @ai:intent Whether the registry is empty
    /// @ai:effects pure
    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }
}
