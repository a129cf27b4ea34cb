//! @ai:module:intent Task and suite definitions for benchmark runs
//! @ai:module:layer domain
//! @ai:module:public_api Task, BenchmarkSuite, Record
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::evaluator::Evaluator;
use serde::Deserialize;
use std::collections::BTreeMap;

/// One few-shot example or one input: a string-keyed field mapping.
/// BTreeMap keeps field order deterministic for prompt rendering.
pub type Record = BTreeMap<String, String>;

/// @ai:intent A named unit of evaluation
///
/// Immutable once added to a suite. If `reference_outputs` is non-empty it
/// must be index-aligned with `inputs`, checked by [`Task::validate`] before
/// any dispatch.
#[derive(Debug, Clone)]
pub struct Task {
    pub name: String,
    pub description: String,
    pub instructions: String,
    /// Few-shot examples provided to the model, in order
    pub examples: Vec<Record>,
    /// Inputs evaluated one at a time, in order
    pub inputs: Vec<Record>,
    /// Reference outputs, index-aligned with `inputs` when non-empty
    pub reference_outputs: Vec<String>,
    pub evaluator: Evaluator,
}

impl Task {
    /// @ai:intent Create a task with no examples, inputs, or references
    /// @ai:effects pure
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            instructions: instructions.into(),
            examples: Vec::new(),
            inputs: Vec::new(),
            reference_outputs: Vec::new(),
            evaluator: Evaluator::default(),
        }
    }

    /// @ai:intent Check the task's input contract
    /// @ai:effects pure
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidInput("task name must be non-empty".to_string()));
        }

        if !self.reference_outputs.is_empty() && self.reference_outputs.len() != self.inputs.len() {
            return Err(Error::InvalidInput(format!(
                "task '{}' has {} reference outputs for {} inputs",
                self.name,
                self.reference_outputs.len(),
                self.inputs.len()
            )));
        }

        Ok(())
    }

    /// @ai:intent Reference output for the input at `index`, if any
    /// @ai:effects pure
    pub fn reference(&self, index: usize) -> Option<&str> {
        self.reference_outputs.get(index).map(|s| s.as_str())
    }
}

/// @ai:intent A named, ordered collection of benchmark tasks
///
/// Task order is significant: sequential runs evaluate tasks in suite order
/// and reports list them in the same order.
#[derive(Debug, Clone)]
pub struct BenchmarkSuite {
    pub name: String,
    pub description: String,
    pub tasks: Vec<Task>,
}

impl BenchmarkSuite {
    /// @ai:intent Create a suite from an ordered task list
    /// @ai:effects pure
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        tasks: Vec<Task>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            tasks,
        }
    }

    /// @ai:intent Number of tasks in the suite
    /// @ai:effects pure
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// @ai:intent Whether the suite has no tasks
    /// @ai:effects pure
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// @ai:intent Get a task by index
    /// @ai:effects pure
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }
}

/// @ai:intent Raw suite structure from a TOML file
#[derive(Debug, Deserialize)]
pub struct SuiteFile {
    pub suite: SuiteDef,
}

/// @ai:intent Suite definition from a TOML file
#[derive(Debug, Deserialize)]
pub struct SuiteDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tasks: Vec<TaskDef>,
}

/// @ai:intent Task definition from a TOML file
#[derive(Debug, Deserialize)]
pub struct TaskDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub instructions: String,
    #[serde(default)]
    pub examples: Vec<Record>,
    #[serde(default)]
    pub inputs: Vec<Record>,
    #[serde(default)]
    pub reference_outputs: Vec<String>,
    /// Evaluator name: "exact_match" (default) or "numeric"
    #[serde(default)]
    pub evaluator: Option<String>,
    /// Absolute tolerance for the "numeric" evaluator
    #[serde(default)]
    pub tolerance: Option<f64>,
}

impl TryFrom<TaskDef> for Task {
    type Error = Error;

    fn try_from(def: TaskDef) -> Result<Self> {
        let evaluator = match def.evaluator.as_deref() {
            None | Some("exact_match") => Evaluator::ExactMatch,
            Some("numeric") => Evaluator::NumericTolerance {
                tolerance: def.tolerance.unwrap_or(1e-6),
            },
            Some(other) => {
                return Err(Error::InvalidInput(format!(
                    "unknown evaluator '{}' for task '{}'",
                    other, def.name
                )))
            }
        };

        Ok(Task {
            name: def.name,
            description: def.description,
            instructions: def.instructions,
            examples: def.examples,
            inputs: def.inputs,
            reference_outputs: def.reference_outputs,
            evaluator,
        })
    }
}

impl TryFrom<SuiteFile> for BenchmarkSuite {
    type Error = Error;

    fn try_from(file: SuiteFile) -> Result<Self> {
        let tasks = file
            .suite
            .tasks
            .into_iter()
            .map(Task::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(BenchmarkSuite::new(file.suite.name, file.suite.description, tasks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_validate_accepts_aligned_references() {
        let mut task = Task::new("capitals", "", "Answer with the capital city.");
        task.inputs = vec![record(&[("country", "France")])];
        task.reference_outputs = vec!["Paris".to_string()];
        assert!(task.validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_empty_references() {
        let mut task = Task::new("freeform", "", "Write a haiku.");
        task.inputs = vec![record(&[("topic", "autumn")]), record(&[("topic", "sea")])];
        assert!(task.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_mismatched_references() {
        let mut task = Task::new("capitals", "", "Answer with the capital city.");
        task.inputs = vec![
            record(&[("country", "France")]),
            record(&[("country", "Japan")]),
        ];
        task.reference_outputs = vec!["Paris".to_string()];

        let err = task.validate().unwrap_err();
        assert!(err.to_string().contains("capitals"));
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let task = Task::new("  ", "", "instructions");
        assert!(task.validate().is_err());
    }

    #[test]
    fn test_suite_indexed_access() {
        let suite = BenchmarkSuite::new(
            "demo",
            "",
            vec![Task::new("a", "", "i"), Task::new("b", "", "i")],
        );
        assert_eq!(suite.len(), 2);
        assert!(!suite.is_empty());
        assert_eq!(suite.get(1).unwrap().name, "b");
        assert!(suite.get(2).is_none());
    }

    #[test]
    fn test_task_def_selects_numeric_evaluator() {
        let def = TaskDef {
            name: "sums".to_string(),
            description: String::new(),
            instructions: "Add the numbers.".to_string(),
            examples: vec![],
            inputs: vec![],
            reference_outputs: vec![],
            evaluator: Some("numeric".to_string()),
            tolerance: Some(0.01),
        };

        let task = Task::try_from(def).unwrap();
        assert_eq!(
            task.evaluator,
            Evaluator::NumericTolerance { tolerance: 0.01 }
        );
    }

    #[test]
    fn test_task_def_rejects_unknown_evaluator() {
        let def = TaskDef {
            name: "sums".to_string(),
            description: String::new(),
            instructions: "Add the numbers.".to_string(),
            examples: vec![],
            inputs: vec![],
            reference_outputs: vec![],
            evaluator: Some("vibes".to_string()),
            tolerance: None,
        };

        assert!(Task::try_from(def).is_err());
    }
}
