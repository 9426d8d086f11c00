#![warn(missing_docs)]
//! Canonbench CLI Library
//!
//! Command line front end of the canonization benchmark. Use
//! `canonbench_cli::run()` for the stock engines, or build an
//! [`EngineRegistry`] with your own native canonizers and call
//! [`run_with_registry`].
//!
//! # Example
//!
//! ```ignore
//! use canonbench_cli::{Cli, EngineRegistry, CanonbenchConfig, run_with_registry};
//! use canonbench_core::NativeEngine;
//! use clap::Parser;
//!
//! fn main() -> anyhow::Result<()> {
//!     let cli = Cli::parse();
//!     let config = CanonbenchConfig::discover().unwrap_or_default();
//!     let mut registry = EngineRegistry::with_defaults(&config.engines);
//!     registry.register(Arc::new(NativeEngine::traces(Arc::new(MyTraces::load()?))));
//!     run_with_registry(cli, registry)
//! }
//! ```

mod config;
mod harness;
mod registry;

pub use config::{CONFIG_FILE, CanonbenchConfig, EnginesConfig, HarnessConfig, OutputConfig};
pub use harness::{BenchmarkHarness, HarnessError, HarnessEvent, HarnessParameters, HarnessState};
pub use registry::EngineRegistry;

use canonbench_core::{Evaluation, Outcome, RandomQueryGraphs};
use canonbench_report::{
    RunParameters, build_json_report, format_human_output, generate_json_report, log_file_name,
    write_evaluation_log,
};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use regex::Regex;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info};

/// Canonbench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "canonbench")]
#[command(author, version, about = "Canonbench - graph canonization benchmark")]
pub struct Cli {
    /// Optional subcommand (Run, List, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter engines by regex pattern on their name
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Configuration file (default: discover canonbench.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Wall-clock budget per dataset (e.g., "10s", "500ms")
    #[arg(long)]
    pub budget: Option<String>,

    /// Seed reset before every engine
    #[arg(long)]
    pub seed: Option<u64>,

    /// Largest size parameter
    #[arg(long)]
    pub max_size: Option<usize>,

    /// Graphs per dataset
    #[arg(long)]
    pub dataset_size: Option<usize>,

    /// Output directory for logs and reports
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write a JSON report
    #[arg(long)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Number of threads for writing reports
    /// 0 = use all available cores (default)
    #[arg(long, short = 'j', default_value = "0")]
    pub threads: usize,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate the selected engines (default)
    Run,
    /// List registered engines and whether they are available
    List,
    /// Write a default canonbench.toml into the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run the Canonbench CLI with the default engines.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(&cli)?;
    let registry = EngineRegistry::with_defaults(&config.engines);
    dispatch(&cli, config, &registry)
}

/// Run the Canonbench CLI with pre-parsed arguments and a custom engine registry.
pub fn run_with_registry(cli: Cli, registry: EngineRegistry) -> anyhow::Result<()> {
    init_logging(cli.verbose);
    let config = load_config(&cli)?;
    dispatch(&cli, config, &registry)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "canonbench=debug"
    } else {
        "canonbench=info"
    };
    // A subscriber installed by the embedding program wins
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn dispatch(cli: &Cli, config: CanonbenchConfig, registry: &EngineRegistry) -> anyhow::Result<()> {
    let config = apply_overrides(cli, config);
    match &cli.command {
        Some(Commands::List) => list_engines(cli, &config, registry),
        Some(Commands::Init { force }) => init_config(*force),
        Some(Commands::Run) | None => run_benchmarks(cli, &config, registry),
    }
}

/// Load the explicit configuration file, or discover one, or fall back to defaults
fn load_config(cli: &Cli) -> anyhow::Result<CanonbenchConfig> {
    match &cli.config {
        Some(path) => CanonbenchConfig::load(path),
        None => Ok(CanonbenchConfig::discover().unwrap_or_default()),
    }
}

/// Layer CLI flags over file values
pub fn apply_overrides(cli: &Cli, mut config: CanonbenchConfig) -> CanonbenchConfig {
    if let Some(budget) = &cli.budget {
        config.harness.budget = budget.clone();
    }
    if let Some(seed) = cli.seed {
        config.harness.seed = seed;
    }
    if let Some(max_size) = cli.max_size {
        config.harness.max_size = max_size;
    }
    if let Some(dataset_size) = cli.dataset_size {
        config.harness.dataset_size = dataset_size;
    }
    if let Some(output) = &cli.output {
        config.output.directory = output.clone();
    }
    if cli.json {
        config.output.json = true;
    }
    config
}

fn engine_filter(cli: &Cli) -> anyhow::Result<Regex> {
    Regex::new(&cli.filter).map_err(|e| anyhow::anyhow!("Invalid filter '{}': {}", cli.filter, e))
}

fn list_engines(
    cli: &Cli,
    config: &CanonbenchConfig,
    registry: &EngineRegistry,
) -> anyhow::Result<()> {
    let filter = engine_filter(cli)?;
    let engines = registry.select(&filter, &config.engines.enabled);

    println!("Canonbench Engines:");
    for engine in &engines {
        match engine.check_available() {
            Ok(()) => println!("├── {}", engine.id()),
            Err(e) => println!("├── {} (unavailable: {})", engine.id(), e),
        }
    }
    println!("{} of {} engines selected.", engines.len(), registry.len());
    Ok(())
}

fn init_config(force: bool) -> anyhow::Result<()> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() && !force {
        return Err(anyhow::anyhow!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }
    std::fs::write(path, CanonbenchConfig::default_toml())?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn run_benchmarks(
    cli: &Cli,
    config: &CanonbenchConfig,
    registry: &EngineRegistry,
) -> anyhow::Result<()> {
    if cli.threads > 0 {
        ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .ok();
    }

    let parameters = config.harness_parameters()?;
    let filter = engine_filter(cli)?;
    let engines = registry.select(&filter, &config.engines.enabled);
    if engines.is_empty() {
        println!("No engines selected.");
        return Ok(());
    }

    // Bootstrap failures are fatal before any evaluation starts
    let failures = EngineRegistry::check_available(&engines);
    if !failures.is_empty() {
        for failure in &failures {
            error!("{}", failure);
        }
        return Err(anyhow::anyhow!(
            "{} engine(s) unavailable, nothing was evaluated",
            failures.len()
        ));
    }

    let size_steps = parameters.size_steps();
    println!(
        "Running {} engine(s) over {} size steps ({} graphs each, budget {:?})...\n",
        engines.len(),
        size_steps.len(),
        parameters.dataset_size,
        parameters.budget
    );

    let start_time = Instant::now();
    let harness = BenchmarkHarness::new(parameters.clone(), Box::new(RandomQueryGraphs))?;
    let mut evaluations = Vec::with_capacity(engines.len());

    for engine in engines {
        let name = engine.id().to_string();
        let pb = ProgressBar::new(size_steps.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message(name.clone());

        let evaluation = harness.evaluate_with(engine, |event| match event {
            HarnessEvent::Transition(HarnessState::Running { size }) => {
                pb.set_message(format!("{} (size {})", name, size));
            }
            HarnessEvent::StepCompleted { .. } => pb.inc(1),
            HarnessEvent::CancellationRequested { size } => {
                pb.set_message(format!("{} (size {}, waiting for worker)", name, size));
            }
            _ => {}
        })?;

        pb.finish_with_message(match &evaluation.outcome {
            Outcome::Completed => format!("{} complete", name),
            Outcome::TimedOut { size } => format!("{} timed out at size {}", name, size),
            Outcome::Failed { size, .. } => format!("{} failed at size {}", name, size),
        });
        evaluations.push(evaluation);
    }

    let directory = &config.output.directory;
    let logs = write_logs(directory, &evaluations)?;
    for log in &logs {
        info!("Log written to {}", log.display());
    }

    if config.output.json {
        let run_parameters = RunParameters {
            initial_size: parameters.initial_size,
            growth_factor: parameters.growth_factor,
            max_size: parameters.max_size,
            dataset_size: parameters.dataset_size,
            budget_ns: parameters.budget.as_nanos() as u64,
            seed: parameters.seed,
            labels: parameters.labels,
        };
        let report = build_json_report(run_parameters, &evaluations);
        let path = directory.join("report.json");
        std::fs::write(&path, generate_json_report(&report)?)?;
        println!("Report written to: {}", path.display());
    }

    print!("{}", format_human_output(&evaluations));
    println!("Finished in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(())
}

/// Write one log per evaluation into `directory`, returning the paths written
pub fn write_logs(directory: &Path, evaluations: &[Evaluation]) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(directory)?;
    evaluations
        .par_iter()
        .map(|evaluation| {
            let path = directory.join(log_file_name(&evaluation.engine));
            let mut out = BufWriter::new(std::fs::File::create(&path)?);
            write_evaluation_log(&mut out, evaluation)?;
            out.flush()?;
            Ok::<_, anyhow::Error>(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "canonbench",
            "--budget",
            "250ms",
            "--seed",
            "7",
            "--max-size",
            "64",
            "--dataset-size",
            "3",
            "--output",
            "out",
            "--json",
        ]);
        let config = apply_overrides(&cli, CanonbenchConfig::default());
        assert_eq!(config.harness.budget, "250ms");
        assert_eq!(config.harness.seed, 7);
        assert_eq!(config.harness.max_size, 64);
        assert_eq!(config.harness.dataset_size, 3);
        assert_eq!(config.output.directory, PathBuf::from("out"));
        assert!(config.output.json);
        // untouched values keep file defaults
        assert_eq!(config.harness.initial_size, 4);
    }

    #[test]
    fn test_cli_subcommands() {
        let cli = Cli::parse_from(["canonbench", "list"]);
        assert!(matches!(cli.command, Some(Commands::List)));

        let cli = Cli::parse_from(["canonbench", "init", "--force"]);
        assert!(matches!(cli.command, Some(Commands::Init { force: true })));

        let cli = Cli::parse_from(["canonbench"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.filter, ".*");
    }

    #[test]
    fn test_invalid_filter() {
        let cli = Cli::parse_from(["canonbench", "("]);
        assert!(engine_filter(&cli).is_err());
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let cli = Cli::parse_from(["canonbench", "--config", "/nonexistent/canonbench.toml"]);
        assert!(load_config(&cli).is_err());

        let registry = EngineRegistry::new();
        assert!(run_with_registry(cli, registry).is_err());
    }

    #[test]
    fn test_explicit_config_loaded() {
        let path = std::env::temp_dir()
            .join(format!("canonbench-cli-{}.toml", std::process::id()));
        std::fs::write(&path, "[harness]\nseed = 11\nmax_size = 16\n").unwrap();

        let cli = Cli::parse_from(["canonbench", "--config", path.to_str().unwrap()]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.harness.seed, 11);
        assert_eq!(config.harness.max_size, 16);
        assert_eq!(config.harness.dataset_size, 10);

        std::fs::remove_file(&path).unwrap();
    }
}
