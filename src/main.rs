//! @ai:module:intent CLI for the LlamaBench benchmark framework
//! @ai:module:layer presentation

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use llamabench::{
    config::{BenchmarkConfig, RunOptions},
    model::ModelConfig,
    provider::HttpProvider,
    report::{ReportFormat, ReportGenerator},
    runner::Runner,
    suite::{SuiteLoader, SuiteLoaderTrait, SuiteRegistry, Task},
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "llamabench")]
#[command(about = "A benchmarking framework for evaluating and comparing LLMs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a benchmark
    Run {
        /// Models to benchmark (format: provider:model, e.g., openai:gpt-4)
        #[arg(long, num_args = 1.., required = true)]
        models: Vec<String>,

        /// Benchmark suite to run
        #[arg(long)]
        suite: Option<String>,

        /// Specific task names to run (takes precedence over --suite)
        #[arg(long, num_args = 1..)]
        tasks: Option<Vec<String>>,

        /// Run evaluations concurrently (default)
        #[arg(long, overrides_with = "sequential")]
        parallel: bool,

        /// Run evaluations one at a time
        #[arg(long, overrides_with = "parallel")]
        sequential: bool,

        /// Bound on concurrent evaluations
        #[arg(long)]
        num_workers: Option<usize>,

        /// Directory containing suite definition TOML files
        #[arg(long, default_value = "suites")]
        suites_dir: PathBuf,

        /// Output directory for results
        #[arg(short, long, default_value = "results")]
        output_dir: PathBuf,

        /// Report formats to write (json, csv, markdown, html)
        #[arg(long, num_args = 1.., default_values_t = ["json".to_string()])]
        report_formats: Vec<String>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List available suites
    List {
        /// List registered suite names
        #[arg(long)]
        suites: bool,

        /// Directory containing suite definition TOML files
        #[arg(long, default_value = "suites")]
        suites_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("llamabench=info")),
        )
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        return ExitCode::FAILURE;
    };

    let outcome = match command {
        Commands::Run {
            models,
            suite,
            tasks,
            parallel,
            sequential,
            num_workers,
            suites_dir,
            output_dir,
            report_formats,
            config,
        } => {
            run_benchmark(RunArgs {
                models,
                suite,
                tasks,
                parallel,
                sequential,
                num_workers,
                suites_dir,
                output_dir,
                report_formats,
                config,
            })
            .await
        }
        Commands::List { suites, suites_dir } => list_suites(suites, &suites_dir),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

struct RunArgs {
    models: Vec<String>,
    suite: Option<String>,
    tasks: Option<Vec<String>>,
    parallel: bool,
    sequential: bool,
    num_workers: Option<usize>,
    suites_dir: PathBuf,
    output_dir: PathBuf,
    report_formats: Vec<String>,
    config: Option<PathBuf>,
}

/// @ai:intent Run a benchmark and write requested reports
/// @ai:effects network, fs:write
async fn run_benchmark(args: RunArgs) -> Result<()> {
    let config = load_or_default_config(args.config)?;

    let models = args
        .models
        .iter()
        .map(|s| s.parse::<ModelConfig>())
        .collect::<llamabench::Result<Vec<_>>>()?;

    let formats = args
        .report_formats
        .iter()
        .map(|s| s.parse::<ReportFormat>())
        .collect::<llamabench::Result<Vec<_>>>()?;

    let registry = load_registry(&args.suites_dir)?;

    let explicit_tasks = match &args.tasks {
        Some(names) => Some(resolve_tasks(&registry, names)?),
        None => None,
    };

    let suite = select_suite(&registry, args.suite.as_deref(), explicit_tasks.is_some())?;

    let mut options = config.run.clone();
    apply_run_flags(&mut options, args.parallel, args.sequential, args.num_workers);

    let provider = Arc::new(HttpProvider::new(config.provider)?);
    let runner = Runner::new(provider);

    let results = runner
        .run(&models, suite.as_ref(), explicit_tasks.as_deref(), &options)
        .await?;

    let reporter = ReportGenerator::new();
    reporter.generate(&results, &formats, &args.output_dir)?;

    println!("{}", results.summary());
    println!("Results saved to {}", args.output_dir.display());

    Ok(())
}

/// @ai:intent List registered suites
/// @ai:effects fs:read, io
fn list_suites(suites: bool, suites_dir: &Path) -> Result<()> {
    // --suites is the only listing available today; the default lists them too
    let _ = suites;

    let registry = load_registry(suites_dir)?;

    println!("Available benchmark suites:");
    for suite in registry.iter() {
        println!("  - {} ({} tasks)", suite.name, suite.len());
    }

    Ok(())
}

/// @ai:intent Populate a registry from the suites directory
/// @ai:effects fs:read
fn load_registry(suites_dir: &Path) -> Result<SuiteRegistry> {
    let mut registry = SuiteRegistry::new();

    if suites_dir.exists() {
        let loader = SuiteLoader::new();
        let count = loader.load_into(suites_dir, &mut registry)?;
        tracing::info!("Registered {} suites from {}", count, suites_dir.display());
    } else {
        tracing::warn!(
            "Suites directory {} does not exist; no suites registered",
            suites_dir.display()
        );
    }

    Ok(registry)
}

/// @ai:intent Overlay command-line flags onto configured run options
///
/// The configured value survives unless a flag was given: `--parallel` and
/// `--sequential` are mutually overriding, and `--num-workers` replaces the
/// configured bound only when present.
/// @ai:effects pure
fn apply_run_flags(
    options: &mut RunOptions,
    parallel: bool,
    sequential: bool,
    num_workers: Option<usize>,
) {
    if parallel || sequential {
        options.parallel = !sequential;
    }
    if num_workers.is_some() {
        options.num_workers = num_workers;
    }
}

/// @ai:intent Resolve the `--suite` name, unless explicit tasks supersede it
///
/// Explicit tasks take precedence over a suite, so the suite name is not
/// even looked up when tasks are given.
/// @ai:effects pure
fn select_suite(
    registry: &SuiteRegistry,
    name: Option<&str>,
    explicit_tasks: bool,
) -> Result<Option<llamabench::BenchmarkSuite>> {
    match name {
        Some(name) if explicit_tasks => {
            tracing::warn!("Explicit --tasks given; ignoring --suite '{}'", name);
            Ok(None)
        }
        Some(name) => Ok(Some(registry.get(name)?.clone())),
        None => Ok(None),
    }
}

/// @ai:intent Resolve explicit task names across all registered suites
/// @ai:effects pure
fn resolve_tasks(registry: &SuiteRegistry, names: &[String]) -> Result<Vec<Task>> {
    let mut tasks = Vec::with_capacity(names.len());

    for name in names {
        let found = registry
            .iter()
            .flat_map(|suite| suite.tasks.iter())
            .find(|task| &task.name == name);

        match found {
            Some(task) => tasks.push(task.clone()),
            None => {
                let known: Vec<String> = registry
                    .iter()
                    .flat_map(|suite| suite.tasks.iter())
                    .map(|task| task.name.clone())
                    .collect();
                anyhow::bail!(
                    "Unknown task '{}'. Known tasks: {}",
                    name,
                    known.join(", ")
                );
            }
        }
    }

    Ok(tasks)
}

/// @ai:intent Load configuration or use defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>) -> Result<BenchmarkConfig> {
    match path {
        Some(p) => BenchmarkConfig::load(&p),
        None => {
            let default_path = PathBuf::from("llamabench.toml");

            if default_path.exists() {
                BenchmarkConfig::load(&default_path)
            } else {
                Ok(BenchmarkConfig::default())
            }
        }
    }
}
