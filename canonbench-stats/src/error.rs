//! Statistics Errors

use crate::report::EngineId;
use thiserror::Error;

/// Errors from statistics aggregation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StatsError {
    /// A report from one engine was offered to a summary of another.
    #[error("Runtime report for engine '{got}' does not belong to summary of '{expected}'")]
    EngineMismatch {
        /// Engine the summary was built for
        expected: EngineId,
        /// Engine that produced the rejected report
        got: EngineId,
    },
}
