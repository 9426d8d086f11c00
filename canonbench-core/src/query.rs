//! Query Graph Payloads

use canonbench_graph::Graph;
use std::fmt;

/// A vertex of a query graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryVertex(pub u32);

impl fmt::Display for QueryVertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// An edge label of a query graph.
///
/// Displayed by its alias: `a`, `b`, ..., `z`, `aa`, `ab`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Predicate(pub u32);

impl Predicate {
    /// Short alphabetic alias used on the wire
    pub fn alias(self) -> String {
        let mut n = self.0 as u64 + 1;
        let mut letters = Vec::new();
        while n > 0 {
            n -= 1;
            letters.push(b'a' + (n % 26) as u8);
            n /= 26;
        }
        letters.reverse();
        String::from_utf8_lossy(&letters).into_owned()
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.alias())
    }
}

/// Labeled, directed query graph fed to every engine
pub type QueryGraph = Graph<QueryVertex, Predicate>;
