//! Evaluation Results
//!
//! What one engine's run over the growing size steps produced. Every way a
//! run can end keeps the steps completed before it.

use crate::dataset::GraphDataSet;
use crate::error::EngineError;
use canonbench_stats::{EngineId, RuntimeSummary};

/// One completed size step: the dataset and the engine's summary on it
#[derive(Debug)]
pub struct SizeStep {
    /// Size parameter of this step
    pub size: usize,
    /// Dataset the engine was evaluated on
    pub dataset: GraphDataSet,
    /// Aggregated reports, one per graph
    pub summary: RuntimeSummary,
}

/// How an evaluation ended
#[derive(Debug)]
pub enum Outcome {
    /// Every size step up to the maximum completed
    Completed,
    /// The budget was exceeded at `size`
    TimedOut {
        /// Size parameter of the step that timed out
        size: usize,
    },
    /// The engine raised an error at `size`
    Failed {
        /// Size parameter of the step that failed
        size: usize,
        /// The engine error
        error: EngineError,
    },
}

impl Outcome {
    /// Short lowercase name: `completed`, `timed_out` or `failed`
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Completed => "completed",
            Outcome::TimedOut { .. } => "timed_out",
            Outcome::Failed { .. } => "failed",
        }
    }
}

/// Everything one engine's evaluation produced
#[derive(Debug)]
pub struct Evaluation {
    /// Engine that was evaluated
    pub engine: EngineId,
    /// Completed size steps in increasing size order
    pub steps: Vec<SizeStep>,
    /// Terminal state
    pub outcome: Outcome,
}

impl Evaluation {
    /// Largest size parameter that completed, if any
    pub fn largest_completed(&self) -> Option<usize> {
        self.steps.last().map(|step| step.size)
    }
}
