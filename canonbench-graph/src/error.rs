//! Graph Errors

use thiserror::Error;

/// Errors from graph construction and encoding
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphError {
    /// An edge endpoint does not belong to the graph it is added to.
    #[error("Unknown node: {0}")]
    UnknownNode(u32),

    /// The graph has more nodes than the signed color array can address.
    #[error("Graph too large for signed color encoding: {nodes} nodes")]
    TooManyNodes {
        /// Node count of the offending graph
        nodes: usize,
    },

    /// A color class names a node index outside the partitioned range.
    #[error("Color class member {index} out of range for {nodes} nodes")]
    IndexOutOfRange {
        /// Offending member
        index: u32,
        /// Total members across all classes
        nodes: usize,
    },
}
