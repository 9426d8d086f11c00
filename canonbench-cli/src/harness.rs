//! Benchmark Harness
//!
//! Runs one engine against datasets of growing size on a dedicated worker,
//! each dataset under a wall-clock budget.
//!
//! ```text
//!            ┌────────── step completed ──────────┐
//!            ▼                                    │
//!   Growing ──── dataset submitted ────▶ Running ─┤
//!      │                                          ├── budget exceeded ──▶ TimedOut
//!      └── no size steps left ──▶ Completed       └── engine error ─────▶ Failed
//! ```
//!
//! Every terminal state keeps the steps completed before it. On timeout the
//! in-flight task is cancelled and its partial summary discarded; the worker
//! is then joined, which waits for an engine call that cannot be interrupted.

use canonbench_core::{
    CancelToken, Engine, EngineError, Evaluation, GraphDataSet, GraphGenerator, Outcome, SizeStep,
    Task, Worker, WorkerReply,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Errors that prevent an evaluation from starting
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HarnessError {
    /// Parameters would not produce a terminating size sequence.
    #[error("Invalid harness parameters: {0}")]
    InvalidParameters(String),

    /// The worker thread could not be started.
    #[error("Failed to start worker: {0}")]
    WorkerSpawn(#[from] std::io::Error),
}

/// Parameters of an evaluation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessParameters {
    /// First size parameter
    pub initial_size: usize,
    /// Multiplier between size steps
    pub growth_factor: usize,
    /// Largest size parameter
    pub max_size: usize,
    /// Graphs per dataset
    pub dataset_size: usize,
    /// Wall-clock budget per dataset
    pub budget: Duration,
    /// Seed reset before every engine
    pub seed: u64,
    /// Distinct edge labels
    pub labels: usize,
    /// CPU the worker pins itself to, `None` to leave it unpinned
    pub pin_cpu: Option<usize>,
}

impl Default for HarnessParameters {
    fn default() -> Self {
        Self {
            initial_size: 4,
            growth_factor: 2,
            max_size: 32768,
            dataset_size: 10,
            budget: Duration::from_secs(10),
            seed: 1234,
            labels: 5,
            pin_cpu: Some(0),
        }
    }
}

impl HarnessParameters {
    /// Check the parameters describe a finite, non-empty run
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.initial_size == 0 {
            return Err(HarnessError::InvalidParameters(
                "initial_size must be at least 1".to_string(),
            ));
        }
        if self.growth_factor < 2 {
            return Err(HarnessError::InvalidParameters(
                "growth_factor must be at least 2".to_string(),
            ));
        }
        if self.dataset_size == 0 {
            return Err(HarnessError::InvalidParameters(
                "dataset_size must be at least 1".to_string(),
            ));
        }
        if self.labels == 0 {
            return Err(HarnessError::InvalidParameters(
                "labels must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Size parameters in evaluation order: `initial, initial·g, ...` up to the maximum
    pub fn size_steps(&self) -> Vec<usize> {
        let mut steps = Vec::new();
        let mut size = self.initial_size;
        while size <= self.max_size && size > 0 {
            steps.push(size);
            match size.checked_mul(self.growth_factor) {
                Some(next) if next > size => size = next,
                _ => break,
            }
        }
        steps
    }
}

/// Harness state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessState {
    /// Generating the dataset for `size`
    Growing {
        /// Current size parameter
        size: usize,
    },
    /// Waiting for the worker to finish the dataset for `size`
    Running {
        /// Current size parameter
        size: usize,
    },
    /// Every size step completed
    Completed,
    /// The budget was exceeded at `size`
    TimedOut {
        /// Size parameter that timed out
        size: usize,
    },
    /// The engine failed at `size`
    Failed {
        /// Size parameter that failed
        size: usize,
    },
}

impl HarnessState {
    /// Whether no further transition is possible
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            HarnessState::Completed | HarnessState::TimedOut { .. } | HarnessState::Failed { .. }
        )
    }
}

/// Observable progress of an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessEvent {
    /// The harness entered a new state
    Transition(HarnessState),
    /// A size step finished within budget
    StepCompleted {
        /// Size parameter of the step
        size: usize,
    },
    /// The budget ran out and the in-flight task was asked to stop
    CancellationRequested {
        /// Size parameter of the step
        size: usize,
    },
    /// The worker thread actually exited
    WorkerExited,
}

/// Drives the growth loop for one engine at a time
pub struct BenchmarkHarness {
    parameters: HarnessParameters,
    generator: Box<dyn GraphGenerator>,
}

impl BenchmarkHarness {
    /// Create a harness drawing graphs from `generator`
    pub fn new(
        parameters: HarnessParameters,
        generator: Box<dyn GraphGenerator>,
    ) -> Result<Self, HarnessError> {
        parameters.validate()?;
        Ok(Self {
            parameters,
            generator,
        })
    }

    /// Parameters of this harness
    pub fn parameters(&self) -> &HarnessParameters {
        &self.parameters
    }

    /// Evaluate `engine` over every size step
    pub fn evaluate(&self, engine: Arc<dyn Engine>) -> Result<Evaluation, HarnessError> {
        self.evaluate_with(engine, |_| {})
    }

    /// Evaluate `engine`, reporting progress to `observer`
    pub fn evaluate_with(
        &self,
        engine: Arc<dyn Engine>,
        mut observer: impl FnMut(HarnessEvent),
    ) -> Result<Evaluation, HarnessError> {
        let parameters = &self.parameters;
        let engine_id = engine.id().clone();

        // Same seed for every engine, so every engine sees the same datasets
        let mut rng = StdRng::seed_from_u64(parameters.seed);
        let worker = Worker::spawn(parameters.pin_cpu)?;
        let mut steps = Vec::new();

        info!(engine = %engine_id, "Starting evaluation");

        let mut outcome = Outcome::Completed;
        for size in parameters.size_steps() {
            observer(HarnessEvent::Transition(HarnessState::Growing { size }));
            let dataset = match GraphDataSet::generate(
                parameters.dataset_size,
                size,
                parameters.labels,
                self.generator.as_ref(),
                &mut rng,
            ) {
                Ok(dataset) => dataset,
                Err(e) => {
                    error!(engine = %engine_id, size, "Dataset generation failed: {}", e);
                    outcome = Outcome::Failed {
                        size,
                        error: e.into(),
                    };
                    break;
                }
            };
            debug!(engine = %engine_id, size, graphs = dataset.len(), "Dataset generated");

            let cancel = CancelToken::new();
            let task = Task {
                engine: Arc::clone(&engine),
                dataset,
                cancel: cancel.clone(),
            };
            if worker.submit(task).is_err() {
                outcome = worker_lost(size);
                break;
            }
            observer(HarnessEvent::Transition(HarnessState::Running { size }));

            match worker.recv_timeout(parameters.budget) {
                Ok(WorkerReply::Completed { dataset, summary }) => {
                    info!(
                        engine = %engine_id,
                        size,
                        reports = summary.count(),
                        "Size step completed"
                    );
                    steps.push(SizeStep {
                        size,
                        dataset,
                        summary,
                    });
                    observer(HarnessEvent::StepCompleted { size });
                }
                Ok(WorkerReply::Failed { error, .. }) => {
                    error!(engine = %engine_id, size, "Engine failed: {}", error);
                    outcome = Outcome::Failed { size, error };
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {
                    cancel.cancel();
                    warn!(
                        engine = %engine_id,
                        size,
                        budget_ms = parameters.budget.as_millis() as u64,
                        "Budget exceeded, cancellation requested"
                    );
                    observer(HarnessEvent::CancellationRequested { size });
                    outcome = Outcome::TimedOut { size };
                    break;
                }
                // Cancellation is only requested after the wait above gave up
                Ok(WorkerReply::Cancelled { .. }) | Err(RecvTimeoutError::Disconnected) => {
                    outcome = worker_lost(size);
                    break;
                }
            }
        }

        observer(HarnessEvent::Transition(terminal_state(&outcome)));

        worker.shutdown();
        debug!(engine = %engine_id, "Worker exited");
        observer(HarnessEvent::WorkerExited);

        info!(
            engine = %engine_id,
            steps = steps.len(),
            outcome = outcome.kind(),
            "Evaluation finished"
        );

        Ok(Evaluation {
            engine: engine_id,
            steps,
            outcome,
        })
    }
}

fn worker_lost(size: usize) -> Outcome {
    error!(size, "Worker thread exited unexpectedly");
    Outcome::Failed {
        size,
        error: EngineError::Panicked("worker thread exited".to_string()),
    }
}

fn terminal_state(outcome: &Outcome) -> HarnessState {
    match outcome {
        Outcome::Completed => HarnessState::Completed,
        Outcome::TimedOut { size } => HarnessState::TimedOut { size: *size },
        Outcome::Failed { size, .. } => HarnessState::Failed { size: *size },
    }
}
