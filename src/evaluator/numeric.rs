//! @ai:module:intent Numeric-tolerance scoring for quantitative answers
//! @ai:module:layer domain
//! @ai:module:public_api score
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::evaluator::Score;
use regex::Regex;
use std::sync::OnceLock;

/// @ai:intent Extract the first numeric literal from free-form text
/// @ai:effects pure
fn extract_number(text: &str) -> Option<f64> {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    let re = NUMBER.get_or_init(|| {
        Regex::new(r"-?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?").expect("numeric literal regex is valid")
    });

    re.find(text).and_then(|m| m.as_str().parse::<f64>().ok())
}

/// @ai:intent Score 1.0 when output and reference agree within an absolute tolerance
/// @ai:pre reference is present and contains a numeric value
/// @ai:effects pure
pub fn score(output: &str, reference: Option<&str>, tolerance: f64) -> Result<Score> {
    let reference = reference.ok_or_else(|| {
        Error::InvalidInput("numeric scoring requires a reference output".to_string())
    })?;

    let expected = extract_number(reference).ok_or_else(|| {
        Error::InvalidInput(format!(
            "numeric scoring requires a numeric reference, got: {}",
            reference
        ))
    })?;

    let mut result = match extract_number(output) {
        Some(actual) => {
            let within = (actual - expected).abs() <= tolerance;
            let mut s = Score::new(if within { 1.0 } else { 0.0 });
            s.metadata.insert("actual".to_string(), json_number(actual));
            s
        }
        None => {
            let mut s = Score::new(0.0);
            s.metadata.insert(
                "reason".to_string(),
                serde_json::Value::String("no numeric value in output".to_string()),
            );
            s
        }
    };

    result
        .metadata
        .insert("expected".to_string(), json_number(expected));
    result
        .metadata
        .insert("tolerance".to_string(), json_number(tolerance));

    Ok(result)
}

/// @ai:intent Convert f64 to a JSON number, falling back to null for non-finite values
/// @ai:effects pure
fn json_number(value: f64) -> serde_json::Value {
    serde_json::Number::from_f64(value)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}
