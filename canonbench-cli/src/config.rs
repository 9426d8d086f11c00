//! Configuration loading from canonbench.toml
//!
//! The configuration is discovered by walking up from the current directory.
//! Every field has a default, so an empty or missing file is valid.

use crate::harness::HarnessParameters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name looked up during discovery
pub const CONFIG_FILE: &str = "canonbench.toml";

/// Canonbench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CanonbenchConfig {
    /// Size steps, dataset and budget
    #[serde(default)]
    pub harness: HarnessConfig,
    /// Engine selection and process engine setup
    #[serde(default)]
    pub engines: EnginesConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Harness configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// First size parameter
    #[serde(default = "default_initial_size")]
    pub initial_size: usize,
    /// Multiplier between consecutive size steps
    #[serde(default = "default_growth_factor")]
    pub growth_factor: usize,
    /// Largest size parameter
    #[serde(default = "default_max_size")]
    pub max_size: usize,
    /// Graphs per dataset
    #[serde(default = "default_dataset_size")]
    pub dataset_size: usize,
    /// Wall-clock budget per dataset (e.g., "10s", "500ms")
    #[serde(default = "default_budget")]
    pub budget: String,
    /// Seed reset before every engine
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Distinct edge labels in generated graphs
    #[serde(default = "default_labels")]
    pub labels: usize,
    /// Pin the worker thread to `worker_cpu`
    #[serde(default = "default_pin_worker")]
    pub pin_worker: bool,
    /// CPU the worker pins itself to
    #[serde(default)]
    pub worker_cpu: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            initial_size: default_initial_size(),
            growth_factor: default_growth_factor(),
            max_size: default_max_size(),
            dataset_size: default_dataset_size(),
            budget: default_budget(),
            seed: default_seed(),
            labels: default_labels(),
            pin_worker: default_pin_worker(),
            worker_cpu: 0,
        }
    }
}

fn default_initial_size() -> usize {
    4
}
fn default_growth_factor() -> usize {
    2
}
fn default_max_size() -> usize {
    32768
}
fn default_dataset_size() -> usize {
    10
}
fn default_budget() -> String {
    "10s".to_string()
}
fn default_seed() -> u64 {
    1234
}
fn default_labels() -> usize {
    5
}
fn default_pin_worker() -> bool {
    true
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnginesConfig {
    /// Python interpreter for process engines
    #[serde(default = "default_python")]
    pub python: String,
    /// Directory holding the Scott entry point scripts
    #[serde(default = "default_scott_dir")]
    pub scott_dir: PathBuf,
    /// Engines to evaluate by name (empty = all registered)
    #[serde(default)]
    pub enabled: Vec<String>,
}

impl Default for EnginesConfig {
    fn default() -> Self {
        Self {
            python: default_python(),
            scott_dir: default_scott_dir(),
            enabled: Vec::new(),
        }
    }
}

fn default_python() -> String {
    "python3".to_string()
}
fn default_scott_dir() -> PathBuf {
    PathBuf::from("bindings/scott")
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for per-engine logs and reports
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
    /// Also write a JSON report
    #[serde(default)]
    pub json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            json: false,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("target/canonbench")
}

impl CanonbenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Resolve the harness section into validated parameters
    pub fn harness_parameters(&self) -> anyhow::Result<HarnessParameters> {
        let harness = &self.harness;
        let parameters = HarnessParameters {
            initial_size: harness.initial_size,
            growth_factor: harness.growth_factor,
            max_size: harness.max_size,
            dataset_size: harness.dataset_size,
            budget: Duration::from_nanos(Self::parse_duration(&harness.budget)?),
            seed: harness.seed,
            labels: harness.labels,
            pin_cpu: harness.pin_worker.then_some(harness.worker_cpu),
        };
        parameters.validate()?;
        Ok(parameters)
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Canonbench Configuration

[harness]
# First size parameter
initial_size = 4
# Multiplier between size steps
growth_factor = 2
# Largest size parameter
max_size = 32768
# Graphs per dataset
dataset_size = 10
# Wall-clock budget per dataset
budget = "10s"
# Seed reset before every engine
seed = 1234
# Distinct edge labels
labels = 5
# Pin the worker thread to one CPU
pin_worker = true
worker_cpu = 0

[engines]
# Python interpreter for the Scott engine
python = "python3"
# Directory with directed.py / undirected.py
scott_dir = "bindings/scott"
# Engines to run by name, empty = all
enabled = []

[output]
# Directory for logs and reports
directory = "target/canonbench"
# Also write report.json
json = false
"#
        .to_string()
    }

    /// Parse duration string (e.g., "3s", "500ms", "2m") to nanoseconds
    pub fn parse_duration(s: &str) -> anyhow::Result<u64> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow::anyhow!("Empty duration string"));
        }

        let (num_part, unit_part) = s
            .char_indices()
            .find(|(_, c)| c.is_alphabetic())
            .map(|(i, _)| s.split_at(i))
            .unwrap_or((s, "s"));

        let value: f64 = num_part
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid duration number: {}", num_part))?;
        if !value.is_finite() || value < 0.0 {
            return Err(anyhow::anyhow!("Invalid duration: {}", s));
        }

        let multiplier: u64 = match unit_part.to_lowercase().as_str() {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" | "" => 1_000_000_000,
            "m" | "min" => 60_000_000_000,
            _ => return Err(anyhow::anyhow!("Unknown duration unit: {}", unit_part)),
        };

        Ok((value * multiplier as f64) as u64)
    }
}
