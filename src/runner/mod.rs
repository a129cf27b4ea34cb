//! @ai:module:intent Benchmark execution engine
//! @ai:module:layer application
//! @ai:module:public_api Runner, run

pub mod executor;

pub use executor::{run, Runner};
