//! @ai:module:intent Define error types for the llamabench core
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Unified error type for all llamabench operations
///
/// Validation errors (`InvalidInput`, `SuiteNotFound`) are fatal to the call
/// that detected them. `Provider` and `Evaluator` errors are per-evaluation:
/// the runner captures them into the corresponding `TaskResult` instead of
/// propagating them across the aggregation boundary.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Benchmark suite '{name}' not found. Available suites: {}", .known.join(", "))]
    SuiteNotFound { name: String, known: Vec<String> },

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Evaluator error: {0}")]
    Evaluator(String),

    #[error("Failed to load suite file {path}: {message}")]
    SuiteFile { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
