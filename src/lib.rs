//! @ai:module:intent LlamaBench library: LLM benchmark orchestration
//! @ai:module:layer application
//! @ai:module:public_api config, error, evaluator, model, provider, report, results, runner, suite

pub mod config;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod provider;
pub mod report;
pub mod results;
pub mod runner;
pub mod suite;

pub use config::{BenchmarkConfig, ProviderSettings, RunOptions};
pub use error::{Error, Result};
pub use evaluator::Evaluator;
pub use model::ModelConfig;
pub use provider::{HttpProvider, MockProvider, ModelProvider, ProviderResponse};
pub use report::{ReportFormat, ReportGenerator};
pub use results::{BenchmarkResults, TaskResult};
pub use runner::{run, Runner};
pub use suite::{BenchmarkSuite, Record, SuiteLoader, SuiteRegistry, Task};
