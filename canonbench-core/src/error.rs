//! Engine Errors

use canonbench_graph::GraphError;
use canonbench_ipc::ProtocolError;
use canonbench_stats::{EngineId, StatsError};
use thiserror::Error;

/// Errors raised while preparing or running an engine
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// The engine cannot run at all (missing library, missing script).
    ///
    /// Fatal for the whole benchmark run.
    #[error("Engine '{engine}' is unavailable: {reason}")]
    Unavailable {
        /// Engine that failed its availability check
        engine: EngineId,
        /// What is missing
        reason: String,
    },

    /// A native canonizer call reported a failure.
    #[error("Native call failed: {0}")]
    Native(String),

    /// Starting or talking to an engine process failed.
    #[error("Engine process error: {0}")]
    Process(#[from] std::io::Error),

    /// The engine process exited unsuccessfully.
    #[error("Engine process exited with {status}")]
    ProcessExit {
        /// Exit status as reported by the OS
        status: std::process::ExitStatus,
    },

    /// The engine process answered with malformed output.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The query graph could not be transformed into engine input.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A report could not be aggregated.
    #[error(transparent)]
    Stats(#[from] StatsError),

    /// The engine call was interrupted through its cancel token.
    #[error("Engine call cancelled")]
    Cancelled,

    /// The engine call panicked on the worker.
    #[error("Engine panicked: {0}")]
    Panicked(String),
}
