//! @ai:module:intent Benchmark orchestration across models, tasks, and inputs
//! @ai:module:layer application
//! @ai:module:public_api Runner, run
//! @ai:module:stateless false

use crate::config::RunOptions;
use crate::error::{Error, Result};
use crate::model::ModelConfig;
use crate::provider::ModelProvider;
use crate::results::{BenchmarkResults, TaskResult};
use crate::suite::{BenchmarkSuite, Record, Task};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// @ai:intent One unit of work: a (model, task, input) triple
#[derive(Debug, Clone)]
struct WorkItem {
    model_index: usize,
    task_index: usize,
    input_index: usize,
    input: Record,
    reference: Option<String>,
}

/// @ai:intent Orchestrates the Cartesian product of models x tasks x inputs
pub struct Runner<P: ModelProvider> {
    provider: Arc<P>,
}

impl<P: ModelProvider + 'static> Runner<P> {
    /// @ai:intent Create a runner over an injected model provider
    /// @ai:effects pure
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// @ai:intent Run a benchmark across models and tasks
    ///
    /// Exactly one of `suite` or `tasks` is used: an explicit task list takes
    /// precedence over a suite. Validation failures abort before any dispatch;
    /// per-evaluation provider or evaluator failures are captured as results.
    /// @ai:effects network
    pub async fn run(
        &self,
        models: &[ModelConfig],
        suite: Option<&BenchmarkSuite>,
        tasks: Option<&[Task]>,
        options: &RunOptions,
    ) -> Result<BenchmarkResults> {
        let effective_tasks: Vec<Task> = match (tasks, suite) {
            (Some(tasks), _) => tasks.to_vec(),
            (None, Some(suite)) => suite.tasks.clone(),
            (None, None) => Vec::new(),
        };

        let models = validate(models, &effective_tasks, options)?;

        let items = expand(&models, &effective_tasks);
        let total = items.len();

        let mut results = BenchmarkResults::new(
            models.iter().map(|m| m.id()).collect(),
            effective_tasks.iter().map(|t| t.name.clone()).collect(),
        );

        if options.parallel {
            tracing::info!(
                "Dispatching {} evaluations across {} workers",
                total,
                options.effective_workers()
            );
            self.run_parallel(models, effective_tasks, items, options, &mut results)
                .await;
        } else {
            tracing::info!("Running {} evaluations sequentially", total);
            self.run_sequential(&models, &effective_tasks, &items, &mut results)
                .await;
        }

        Ok(results)
    }

    /// @ai:intent Evaluate items one at a time in dispatch order
    /// @ai:effects network
    async fn run_sequential(
        &self,
        models: &[ModelConfig],
        tasks: &[Task],
        items: &[WorkItem],
        results: &mut BenchmarkResults,
    ) {
        for item in items {
            let result = evaluate_one(
                self.provider.as_ref(),
                &models[item.model_index],
                &tasks[item.task_index],
                item,
            )
            .await;
            results.add_result(result);
        }
    }

    /// @ai:intent Evaluate items on a bounded worker pool, appending in completion order
    /// @ai:effects network
    async fn run_parallel(
        &self,
        models: Vec<ModelConfig>,
        tasks: Vec<Task>,
        items: Vec<WorkItem>,
        options: &RunOptions,
        results: &mut BenchmarkResults,
    ) {
        let models = Arc::new(models);
        let tasks = Arc::new(tasks);
        let semaphore = Arc::new(Semaphore::new(options.effective_workers()));
        let mut workers: JoinSet<TaskResult> = JoinSet::new();

        for item in items {
            let provider = Arc::clone(&self.provider);
            let models = Arc::clone(&models);
            let tasks = Arc::clone(&tasks);
            let semaphore = Arc::clone(&semaphore);

            workers.spawn(async move {
                match semaphore.acquire_owned().await {
                    Ok(_permit) => {
                        evaluate_one(
                            provider.as_ref(),
                            &models[item.model_index],
                            &tasks[item.task_index],
                            &item,
                        )
                        .await
                    }
                    // The semaphore is never closed while workers run; treat
                    // a closed pool as a captured failure, not a panic.
                    Err(_) => failure_result(
                        &models[item.model_index],
                        &tasks[item.task_index],
                        &item,
                        String::new(),
                        "worker pool unavailable".to_string(),
                        "runner",
                    ),
                }
            });
        }

        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(result) => results.add_result(result),
                Err(e) => tracing::error!("Benchmark worker panicked: {}", e),
            }
        }
    }
}

/// @ai:intent Run a benchmark with a provider, without constructing a Runner
/// @ai:effects network
pub async fn run<P: ModelProvider + 'static>(
    provider: Arc<P>,
    models: &[ModelConfig],
    suite: Option<&BenchmarkSuite>,
    tasks: Option<&[Task]>,
    options: &RunOptions,
) -> Result<BenchmarkResults> {
    Runner::new(provider).run(models, suite, tasks, options).await
}

/// @ai:intent Check run inputs before any dispatch; returns effective models
///
/// Global passthrough params from the options are merged into each model's
/// params, with model-specific entries winning.
/// @ai:effects pure
fn validate(
    models: &[ModelConfig],
    tasks: &[Task],
    options: &RunOptions,
) -> Result<Vec<ModelConfig>> {
    if models.is_empty() {
        return Err(Error::InvalidInput("no models to benchmark".to_string()));
    }

    if tasks.is_empty() {
        return Err(Error::InvalidInput(
            "no tasks to run: supply a suite or an explicit task list".to_string(),
        ));
    }

    for task in tasks {
        task.validate()?;
    }

    let mut effective = Vec::with_capacity(models.len());
    for model in models {
        model.validate()?;

        let mut model = model.clone();
        if !options.params.is_empty() {
            let mut params = options.params.clone();
            params.append(&mut model.params);
            model.params = params;
        }
        effective.push(model);
    }

    Ok(effective)
}

/// @ai:intent Expand models x tasks x inputs into ordered work items
///
/// A task with no enumerated inputs gets a single synthetic empty input.
/// @ai:effects pure
fn expand(models: &[ModelConfig], tasks: &[Task]) -> Vec<WorkItem> {
    let mut items = Vec::new();

    for (model_index, _) in models.iter().enumerate() {
        for (task_index, task) in tasks.iter().enumerate() {
            if task.inputs.is_empty() {
                items.push(WorkItem {
                    model_index,
                    task_index,
                    input_index: 0,
                    input: Record::new(),
                    reference: task.reference(0).map(|s| s.to_string()),
                });
                continue;
            }

            for (input_index, input) in task.inputs.iter().enumerate() {
                items.push(WorkItem {
                    model_index,
                    task_index,
                    input_index,
                    input: input.clone(),
                    reference: task.reference(input_index).map(|s| s.to_string()),
                });
            }
        }
    }

    items
}

/// @ai:intent Evaluate one (model, task, input) triple, capturing failures as data
/// @ai:effects network
async fn evaluate_one<P: ModelProvider>(
    provider: &P,
    model: &ModelConfig,
    task: &Task,
    item: &WorkItem,
) -> TaskResult {
    let start = Instant::now();

    let response = match provider
        .generate(model, &task.instructions, &task.examples, &item.input)
        .await
    {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(
                "Provider failed for {} / {} input {}: {}",
                model.id(),
                task.name,
                item.input_index,
                e
            );
            return failure_result(model, task, item, String::new(), e.to_string(), "provider");
        }
    };

    let latency_ms = start.elapsed().as_millis() as u64;

    match task.evaluator.score(&response.content, item.reference.as_deref()) {
        Ok(score) => {
            let mut metadata = score.metadata;
            metadata.insert("evaluator".to_string(), task.evaluator.as_str().into());
            metadata.insert("latency_ms".to_string(), latency_ms.into());
            if let Some(tokens) = response.input_tokens {
                metadata.insert("input_tokens".to_string(), tokens.into());
            }
            if let Some(tokens) = response.output_tokens {
                metadata.insert("output_tokens".to_string(), tokens.into());
            }

            TaskResult {
                model: model.id(),
                task: task.name.clone(),
                input_index: item.input_index,
                output: response.content,
                score: score.value,
                metadata,
            }
        }
        Err(e) => {
            tracing::warn!(
                "Evaluator failed for {} / {} input {}: {}",
                model.id(),
                task.name,
                item.input_index,
                e
            );
            let mut result = failure_result(
                model,
                task,
                item,
                response.content,
                e.to_string(),
                "evaluator",
            );
            result
                .metadata
                .insert("latency_ms".to_string(), latency_ms.into());
            result
        }
    }
}

/// @ai:intent Build a sentinel result for a captured per-evaluation failure
/// @ai:effects pure
fn failure_result(
    model: &ModelConfig,
    task: &Task,
    item: &WorkItem,
    output: String,
    error: String,
    error_kind: &str,
) -> TaskResult {
    let mut metadata = serde_json::Map::new();
    metadata.insert("error".to_string(), error.into());
    metadata.insert("error_kind".to_string(), error_kind.into());

    TaskResult {
        model: model.id(),
        task: task.name.clone(),
        input_index: item.input_index,
        output,
        score: 0.0,
        metadata,
    }
}
