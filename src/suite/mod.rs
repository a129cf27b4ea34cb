//! @ai:module:intent Suite definitions, loading, and registration
//! @ai:module:layer domain
//! @ai:module:public_api Task, BenchmarkSuite, Record, SuiteRegistry, SuiteLoader

pub mod loader;
pub mod registry;
pub mod task;

pub use loader::{SuiteLoader, SuiteLoaderTrait};
pub use registry::SuiteRegistry;
pub use task::{BenchmarkSuite, Record, SuiteDef, SuiteFile, Task, TaskDef};
