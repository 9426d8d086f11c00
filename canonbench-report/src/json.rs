//! JSON Output
//!
//! Machine-readable report of a whole run. Standard deviations of
//! single-report steps are undefined and written as `null`.

use canonbench_core::{Evaluation, Outcome};
use canonbench_stats::{FieldSummary, Percentiles, TimingField, compute_percentiles};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Complete JSON report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Run metadata
    pub meta: ReportMeta,
    /// One entry per evaluated engine
    pub engines: Vec<EngineReport>,
}

/// Run metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// canonbench version
    pub version: String,
    /// When the report was generated
    pub timestamp: DateTime<Utc>,
    /// Harness parameters of the run
    pub parameters: RunParameters,
}

/// Harness parameters captured in report metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    /// First size parameter
    pub initial_size: usize,
    /// Multiplier between size steps
    pub growth_factor: usize,
    /// Largest size parameter
    pub max_size: usize,
    /// Graphs per dataset
    pub dataset_size: usize,
    /// Wall-clock budget per dataset in nanoseconds
    pub budget_ns: u64,
    /// Seed reset before every engine
    pub seed: u64,
    /// Distinct edge labels
    pub labels: usize,
}

/// One engine's evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineReport {
    /// Engine name
    pub engine: String,
    /// `completed`, `timed_out` or `failed`
    pub outcome: String,
    /// Size step at which the run stopped early
    pub stopped_at: Option<usize>,
    /// Error message of a failed run
    pub error: Option<String>,
    /// Completed steps
    pub steps: Vec<StepMetrics>,
}

/// Metrics of one completed size step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepMetrics {
    /// Size parameter
    pub size: usize,
    /// Graphs in the dataset
    pub graphs: usize,
    /// Mean node count
    pub nodes_mean: f64,
    /// Node count standard deviation, `None` for a single graph
    pub nodes_std_dev: Option<f64>,
    /// Mean edge count
    pub edges_mean: f64,
    /// Edge count standard deviation, `None` for a single graph
    pub edges_std_dev: Option<f64>,
    /// Mean and standard deviation of every timing field
    pub fields: Vec<FieldMetrics>,
    /// Percentiles of the total time
    pub total_percentiles: Percentiles,
}

/// Mean and standard deviation of one timing field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMetrics {
    /// Timing field
    pub field: TimingField,
    /// Mean in nanoseconds
    pub mean_ns: f64,
    /// Sample standard deviation in nanoseconds, `None` for a single report
    pub std_dev_ns: Option<f64>,
}

impl From<FieldSummary> for FieldMetrics {
    fn from(summary: FieldSummary) -> Self {
        Self {
            field: summary.field,
            mean_ns: summary.mean_ns,
            std_dev_ns: spread(summary.std_dev_ns),
        }
    }
}

/// Undefined spread (`NaN`) becomes `None`
fn spread(std_dev: f64) -> Option<f64> {
    (!std_dev.is_nan()).then_some(std_dev)
}

/// Assemble the report of a run
pub fn build_json_report(parameters: RunParameters, evaluations: &[Evaluation]) -> JsonReport {
    JsonReport {
        meta: ReportMeta {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            parameters,
        },
        engines: evaluations.iter().map(engine_report).collect(),
    }
}

fn engine_report(evaluation: &Evaluation) -> EngineReport {
    let (stopped_at, error) = match &evaluation.outcome {
        Outcome::Completed => (None, None),
        Outcome::TimedOut { size } => (Some(*size), None),
        Outcome::Failed { size, error } => (Some(*size), Some(error.to_string())),
    };

    let steps = evaluation
        .steps
        .iter()
        .map(|step| {
            let sizes = step.dataset.size_statistics();
            let totals: Vec<f64> = step
                .summary
                .reports()
                .iter()
                .map(|report| report.field(TimingField::Total) as f64)
                .collect();
            StepMetrics {
                size: step.size,
                graphs: step.dataset.len(),
                nodes_mean: sizes.nodes.mean(),
                nodes_std_dev: spread(sizes.nodes.std_dev()),
                edges_mean: sizes.edges.mean(),
                edges_std_dev: spread(sizes.edges.std_dev()),
                fields: step
                    .summary
                    .field_summaries()
                    .into_iter()
                    .map(FieldMetrics::from)
                    .collect(),
                total_percentiles: compute_percentiles(&totals),
            }
        })
        .collect();

    EngineReport {
        engine: evaluation.engine.to_string(),
        outcome: evaluation.outcome.kind().to_string(),
        stopped_at,
        error,
        steps,
    }
}

/// Generate a prettified JSON report
pub fn generate_json_report(report: &JsonReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
