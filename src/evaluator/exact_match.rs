//! @ai:module:intent Exact-string-match scoring with normalization
//! @ai:module:layer domain
//! @ai:module:public_api score
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::evaluator::Score;

/// @ai:intent Normalize an answer for comparison
/// @ai:effects pure
fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// @ai:intent Score 1.0 when output equals reference after trim + case-fold
/// @ai:pre reference is present (scoring requires a reference)
/// @ai:effects pure
pub fn score(output: &str, reference: Option<&str>) -> Result<Score> {
    let reference = reference.ok_or_else(|| {
        Error::InvalidInput("exact-match scoring requires a reference output".to_string())
    })?;

    let matched = normalize(output) == normalize(reference);
    let mut result = Score::new(if matched { 1.0 } else { 0.0 });
    result
        .metadata
        .insert("matched".to_string(), serde_json::Value::Bool(matched));

    Ok(result)
}
