//! Benchmark Worker
//!
//! One dedicated thread runs engines over whole datasets. The controller hands
//! a dataset over by value, waits for the reply with a deadline, and may ask
//! the worker to stop early through a [`CancelToken`].
//!
//! Cancellation is cooperative: it is observed between graphs and handed to
//! [`Engine::canonize_cancellable`]. Engines that cannot be interrupted run
//! their current call to completion, so [`Worker::shutdown`] waits without a
//! bound for the thread to actually exit.

use crate::dataset::GraphDataSet;
use crate::engine::{Engine, run_timed};
use crate::error::EngineError;
use crate::measure::pin_to_cpu;
use canonbench_stats::RuntimeSummary;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SendError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, warn};

/// Shared flag asking an in-flight task to stop
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Run one engine over one dataset
pub struct Task {
    /// Engine to run
    pub engine: Arc<dyn Engine>,
    /// Dataset, owned by the worker until it replies
    pub dataset: GraphDataSet,
    /// Checked before every graph
    pub cancel: CancelToken,
}

/// Result of a task; the dataset is always handed back
#[derive(Debug)]
pub enum WorkerReply {
    /// Every graph was canonized
    Completed {
        /// Dataset that was evaluated
        dataset: GraphDataSet,
        /// One report per graph
        summary: RuntimeSummary,
    },
    /// An engine call failed or panicked
    Failed {
        /// Dataset that was being evaluated
        dataset: GraphDataSet,
        /// What went wrong
        error: EngineError,
    },
    /// Cancellation was observed before the dataset was finished
    Cancelled {
        /// Dataset that was being evaluated
        dataset: GraphDataSet,
        /// Graphs canonized before stopping
        evaluated: usize,
    },
}

/// Handle to the dedicated worker thread
pub struct Worker {
    tasks: Option<Sender<Task>>,
    replies: Receiver<WorkerReply>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    /// Start the worker thread, optionally pinned to `cpu`
    pub fn spawn(cpu: Option<usize>) -> std::io::Result<Self> {
        let (task_tx, task_rx) = mpsc::channel::<Task>();
        let (reply_tx, reply_rx) = mpsc::channel::<WorkerReply>();

        let handle = std::thread::Builder::new()
            .name("canonbench-worker".to_string())
            .spawn(move || {
                if let Some(cpu) = cpu {
                    if let Err(e) = pin_to_cpu(cpu) {
                        warn!(cpu, "Could not pin worker to CPU: {}", e);
                    }
                }

                while let Ok(task) = task_rx.recv() {
                    let reply = run_task(task);
                    if reply_tx.send(reply).is_err() {
                        break;
                    }
                }
            })?;

        Ok(Self {
            tasks: Some(task_tx),
            replies: reply_rx,
            handle: Some(handle),
        })
    }

    /// Hand a task to the worker. Fails only if the worker thread is gone.
    pub fn submit(&self, task: Task) -> Result<(), SendError<Task>> {
        match &self.tasks {
            Some(tasks) => tasks.send(task),
            None => Err(SendError(task)),
        }
    }

    /// Wait up to `timeout` for the reply to the submitted task
    pub fn recv_timeout(&self, timeout: Duration) -> Result<WorkerReply, RecvTimeoutError> {
        self.replies.recv_timeout(timeout)
    }

    /// Stop accepting tasks and wait for the thread to exit.
    ///
    /// Blocks for as long as an in-flight engine call takes to return.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.tasks.take();
        if let Some(handle) = self.handle.take() {
            debug!("Waiting for worker to exit");
            if handle.join().is_err() {
                warn!("Worker thread panicked outside an engine call");
            }
            debug!("Worker exited");
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.stop();
    }
}

enum Interrupted {
    Cancelled(usize),
    Failed(EngineError),
}

fn run_task(task: Task) -> WorkerReply {
    let Task {
        engine,
        dataset,
        cancel,
    } = task;

    match evaluate(engine.as_ref(), &dataset, &cancel) {
        Ok(summary) => WorkerReply::Completed { dataset, summary },
        Err(Interrupted::Cancelled(evaluated)) => {
            debug!(engine = %engine.id(), evaluated, "Task cancelled");
            WorkerReply::Cancelled { dataset, evaluated }
        }
        Err(Interrupted::Failed(error)) => WorkerReply::Failed { dataset, error },
    }
}

fn evaluate(
    engine: &dyn Engine,
    dataset: &GraphDataSet,
    cancel: &CancelToken,
) -> Result<RuntimeSummary, Interrupted> {
    let mut summary = RuntimeSummary::for_engine(engine.id().clone());

    for (index, graph) in dataset.graphs().iter().enumerate() {
        if cancel.is_cancelled() {
            return Err(Interrupted::Cancelled(index));
        }

        let report = panic::catch_unwind(AssertUnwindSafe(|| run_timed(engine, graph, cancel)))
            .map_err(|panic| Interrupted::Failed(EngineError::Panicked(panic_message(&*panic))))?
            .map_err(|e| match e {
                EngineError::Cancelled => Interrupted::Cancelled(index),
                e => Interrupted::Failed(e),
            })?;

        summary
            .add_report(report)
            .map_err(|e| Interrupted::Failed(e.into()))?;
    }

    Ok(summary)
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
