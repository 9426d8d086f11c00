//! Dataset Size Statistics

use crate::running::RunningStatistics;
use serde::{Deserialize, Serialize};

/// Node and edge count statistics over the graphs of one dataset
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SizeStatistics {
    /// Node counts
    pub nodes: RunningStatistics,
    /// Edge counts
    pub edges: RunningStatistics,
}

impl SizeStatistics {
    /// Collect statistics from `(node_count, edge_count)` pairs
    pub fn from_counts(counts: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut stats = Self::default();
        for (nodes, edges) in counts {
            stats.nodes.push(nodes as f64);
            stats.edges.push(edges as f64);
        }
        stats
    }

    /// Number of graphs counted
    pub fn graphs(&self) -> u64 {
        self.nodes.count()
    }
}
