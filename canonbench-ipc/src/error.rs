//! Protocol Errors

use thiserror::Error;

/// Errors while talking to a process-based engine
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// Reading from or writing to the process pipes failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The process closed its output before both timing lines were written.
    #[error("Process output ended after {received} of 2 timing lines")]
    MissingTiming {
        /// Number of timing lines received
        received: usize,
    },

    /// A timing line is too short to carry the fixed prefix.
    #[error("Timing line too short: {line:?}")]
    TruncatedLine {
        /// Offending line
        line: String,
    },

    /// The value after the prefix is not a non-negative integer.
    #[error("Invalid timing value in line {line:?}")]
    InvalidTiming {
        /// Offending line
        line: String,
    },
}
