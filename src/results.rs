//! @ai:module:intent Result accumulation and rendering for benchmark runs
//! @ai:module:layer domain
//! @ai:module:public_api TaskResult, BenchmarkResults, ResultRecord, ResultsDocument

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Write as FmtWrite;

/// @ai:intent Outcome of one (model, task, input) evaluation
///
/// Never mutated after creation. A failed provider or evaluator call is
/// captured with a sentinel score of 0.0 and an `error` entry in metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResult {
    /// "provider:model" identifier
    pub model: String,
    /// Task name
    pub task: String,
    /// Index of the input within the task
    pub input_index: usize,
    /// Raw model output
    pub output: String,
    pub score: f64,
    /// Open metadata: latency, token counts, evaluator diagnostics, failures
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl TaskResult {
    /// @ai:intent Whether this evaluation was captured as a failure
    /// @ai:effects pure
    pub fn is_failure(&self) -> bool {
        self.metadata.contains_key("error")
    }
}

/// @ai:intent One row of the tabular export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub model: String,
    pub task: String,
    pub score: f64,
}

/// @ai:intent Serialized report shape: fixed top-level key order for diffing
///
/// The timestamp records when the run's accumulator was created; the
/// remaining keys appear in the fixed order models, tasks, results.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResultsDocument {
    #[serde(default)]
    pub timestamp: String,
    pub models: Vec<String>,
    pub tasks: Vec<String>,
    pub results: Vec<ResultRecord>,
}

/// @ai:intent Accumulates per-(model, task, input) outcomes for one run
///
/// `results` is in insertion order, which equals completion order: parallel
/// runs may interleave models and tasks, sequential runs preserve dispatch
/// order.
#[derive(Debug, Clone)]
pub struct BenchmarkResults {
    /// RFC 3339 creation time, surfaced in the JSON document
    pub timestamp: String,
    /// "provider:model" identifiers in caller-supplied order
    pub models: Vec<String>,
    /// Task names in suite/list order
    pub tasks: Vec<String>,
    pub results: Vec<TaskResult>,
}

impl BenchmarkResults {
    /// @ai:intent Create an empty container for a run
    /// @ai:effects time
    pub fn new(models: Vec<String>, tasks: Vec<String>) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            models,
            tasks,
            results: Vec::new(),
        }
    }

    /// @ai:intent Append a result; no deduplication
    /// @ai:effects state:write
    pub fn add_result(&mut self, result: TaskResult) {
        self.results.push(result);
    }

    /// @ai:intent Number of accumulated results
    /// @ai:effects pure
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// @ai:intent Whether no results have been accumulated
    /// @ai:effects pure
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// @ai:intent Tabular export: one record per result, insertion order
    /// @ai:effects pure
    pub fn records(&self) -> Vec<ResultRecord> {
        self.results
            .iter()
            .map(|r| ResultRecord {
                model: r.model.clone(),
                task: r.task.clone(),
                score: r.score,
            })
            .collect()
    }

    /// @ai:intent Stable JSON document with models, tasks, and result triples
    /// @ai:effects pure
    pub fn to_json(&self) -> Result<String> {
        let document = ResultsDocument {
            timestamp: self.timestamp.clone(),
            models: self.models.clone(),
            tasks: self.tasks.clone(),
            results: self.records(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// @ai:intent Results for one (model, task) cell
    /// @ai:effects pure
    fn cell(&self, model: &str, task: &str) -> Vec<&TaskResult> {
        self.results
            .iter()
            .filter(|r| r.model == model && r.task == task)
            .collect()
    }

    /// @ai:intent Deterministic summary table: models x tasks mean scores
    ///
    /// Rows are models, columns are tasks, cells are mean scores with a
    /// trailing Average row and column. A cell whose evaluations all failed
    /// renders "fail" instead of a number.
    /// @ai:effects pure
    pub fn summary(&self) -> String {
        let mut out = String::new();

        writeln!(out, "Benchmark Summary").unwrap();
        writeln!(out, "=================").unwrap();
        writeln!(out).unwrap();

        let model_width = self
            .models
            .iter()
            .map(|m| m.len())
            .chain(std::iter::once("Average".len()))
            .max()
            .unwrap_or(7);
        let task_widths: Vec<usize> = self.tasks.iter().map(|t| t.len().max(8)).collect();

        write!(out, "{:<width$}", "Model", width = model_width).unwrap();
        for (task, width) in self.tasks.iter().zip(&task_widths) {
            write!(out, "  {:>width$}", task, width = width).unwrap();
        }
        writeln!(out, "  {:>8}", "Average").unwrap();

        let total_width =
            model_width + task_widths.iter().map(|w| w + 2).sum::<usize>() + 10;
        writeln!(out, "{}", "-".repeat(total_width)).unwrap();

        for model in &self.models {
            write!(out, "{:<width$}", model, width = model_width).unwrap();

            for (task, width) in self.tasks.iter().zip(&task_widths) {
                let cell = self.cell(model, task);
                write!(out, "  {:>width$}", render_cell(&cell), width = width).unwrap();
            }

            let row: Vec<&TaskResult> = self.results.iter().filter(|r| &r.model == model).collect();
            writeln!(out, "  {:>8}", render_mean(&row)).unwrap();
        }

        write!(out, "{:<width$}", "Average", width = model_width).unwrap();
        for (task, width) in self.tasks.iter().zip(&task_widths) {
            let column: Vec<&TaskResult> =
                self.results.iter().filter(|r| &r.task == task).collect();
            write!(out, "  {:>width$}", render_mean(&column), width = width).unwrap();
        }
        let all: Vec<&TaskResult> = self.results.iter().collect();
        writeln!(out, "  {:>8}", render_mean(&all)).unwrap();

        out
    }
}

/// @ai:intent Mean score across results; "-" when empty
/// @ai:effects pure
fn render_mean(results: &[&TaskResult]) -> String {
    if results.is_empty() {
        return "-".to_string();
    }
    let mean = results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64;
    format!("{:.2}", mean)
}

/// @ai:intent Render a model x task cell, marking all-failed cells
/// @ai:effects pure
fn render_cell(results: &[&TaskResult]) -> String {
    if !results.is_empty() && results.iter().all(|r| r.is_failure()) {
        return "fail".to_string();
    }
    render_mean(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn result(model: &str, task: &str, score: f64) -> TaskResult {
        TaskResult {
            model: model.to_string(),
            task: task.to_string(),
            input_index: 0,
            output: String::new(),
            score,
            metadata: serde_json::Map::new(),
        }
    }

    fn failed(model: &str, task: &str) -> TaskResult {
        let mut r = result(model, task, 0.0);
        r.metadata.insert(
            "error".to_string(),
            serde_json::Value::String("provider exploded".to_string()),
        );
        r
    }

    fn sample() -> BenchmarkResults {
        let mut results = BenchmarkResults::new(
            vec!["openai:gpt-4".to_string(), "anthropic:claude".to_string()],
            vec!["capitals".to_string(), "sums".to_string()],
        );
        results.add_result(result("openai:gpt-4", "capitals", 1.0));
        results.add_result(result("openai:gpt-4", "sums", 0.5));
        results.add_result(result("anthropic:claude", "capitals", 0.0));
        results.add_result(result("anthropic:claude", "sums", 1.0));
        results
    }

    #[test]
    fn test_records_preserve_insertion_order() {
        let results = sample();
        let records = results.records();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].model, "openai:gpt-4");
        assert_eq!(records[0].task, "capitals");
        assert_eq!(records[3].model, "anthropic:claude");
        assert_eq!(records[3].score, 1.0);
    }

    #[test]
    fn test_to_json_round_trips() {
        let results = sample();
        let json = results.to_json().unwrap();

        let document: ResultsDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(document.timestamp, results.timestamp);
        assert_eq!(document.models, results.models);
        assert_eq!(document.tasks, results.tasks);
        assert_eq!(document.results, results.records());
    }

    #[test]
    fn test_to_json_carries_run_timestamp() {
        let results = sample();
        let json = results.to_json().unwrap();

        assert!(json.contains("\"timestamp\""));
        assert!(json.contains(&results.timestamp));
    }

    #[test]
    fn test_to_json_is_byte_stable() {
        let results = sample();
        assert_eq!(results.to_json().unwrap(), results.to_json().unwrap());

        let json = results.to_json().unwrap();
        let models_pos = json.find("\"models\"").unwrap();
        let tasks_pos = json.find("\"tasks\"").unwrap();
        let results_pos = json.find("\"results\"").unwrap();
        assert!(models_pos < tasks_pos && tasks_pos < results_pos);
    }

    #[test]
    fn test_summary_contains_cells_and_averages() {
        let results = sample();
        let summary = results.summary();

        assert!(summary.contains("openai:gpt-4"));
        assert!(summary.contains("capitals"));
        assert!(summary.contains("Average"));
        // gpt-4 row average of 1.0 and 0.5
        assert!(summary.contains("0.75"));
        // overall average of all four scores
        assert!(summary.contains("0.62"));
    }

    #[test]
    fn test_summary_is_deterministic() {
        let results = sample();
        assert_eq!(results.summary(), results.summary());
    }

    #[test]
    fn test_summary_marks_all_failed_cells() {
        let mut results = BenchmarkResults::new(
            vec!["openai:gpt-4".to_string()],
            vec!["capitals".to_string()],
        );
        results.add_result(failed("openai:gpt-4", "capitals"));

        assert!(results.summary().contains("fail"));
    }

    #[test]
    fn test_is_failure_detects_error_metadata() {
        assert!(failed("m", "t").is_failure());
        assert!(!result("m", "t", 1.0).is_failure());
    }
}
