//! @ai:module:intent Scoring strategies for model outputs
//! @ai:module:layer domain
//! @ai:module:public_api Evaluator, Score

pub mod exact_match;
pub mod numeric;

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// @ai:intent Numeric score with evaluator diagnostics
///
/// `value` is bounded to `0.0..=1.0`. `metadata` carries raw evaluator
/// diagnostics that the runner merges into the task result.
#[derive(Debug, Clone)]
pub struct Score {
    pub value: f64,
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Score {
    /// @ai:intent Create a score with empty metadata
    /// @ai:effects pure
    pub fn new(value: f64) -> Self {
        Self {
            value,
            metadata: serde_json::Map::new(),
        }
    }
}

/// @ai:intent Scoring strategy applied to a model output, one variant per strategy
///
/// Evaluators are pure functions of their inputs: re-running a benchmark
/// against identical provider outputs yields identical scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evaluator {
    ExactMatch,
    NumericTolerance { tolerance: f64 },
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator::ExactMatch
    }
}

impl Evaluator {
    /// @ai:intent Score a model output against an optional reference
    /// @ai:effects pure
    pub fn score(&self, output: &str, reference: Option<&str>) -> Result<Score> {
        match self {
            Evaluator::ExactMatch => exact_match::score(output, reference),
            Evaluator::NumericTolerance { tolerance } => {
                numeric::score(output, reference, *tolerance)
            }
        }
    }

    /// @ai:intent Get string representation of the strategy
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            Evaluator::ExactMatch => "exact_match",
            Evaluator::NumericTolerance { .. } => "numeric",
        }
    }
}

impl std::fmt::Display for Evaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
