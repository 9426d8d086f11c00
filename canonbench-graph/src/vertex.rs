//! Node Payloads for Transformed Graphs
//!
//! Transforms introduce structural nodes next to the original query vertices.
//! The distinction is carried in the payload type itself so consumers never
//! have to inspect payloads at runtime to tell them apart.

use std::fmt;

/// Payload of a node in a transformed graph
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Vertex<V, L> {
    /// A node copied from the input graph
    Original(V),
    /// A structural node introduced by a transform
    Marker(Marker<L>),
}

impl<V, L> Vertex<V, L> {
    /// The marker of a structural node, `None` for original nodes
    pub fn marker(&self) -> Option<&Marker<L>> {
        match self {
            Vertex::Original(_) => None,
            Vertex::Marker(marker) => Some(marker),
        }
    }

    /// Whether this node was copied from the input graph
    pub fn is_original(&self) -> bool {
        matches!(self, Vertex::Original(_))
    }
}

/// Kind of structural node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Marker<L> {
    /// Source side of a split edge (undirected transform)
    Tail,
    /// Target side of a split edge (undirected transform)
    Head,
    /// A former edge label turned into a node
    Label(L),
}

impl<L: fmt::Display> fmt::Display for Marker<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Tail => f.write_str("tail"),
            Marker::Head => f.write_str("head"),
            Marker::Label(label) => write!(f, "{}", label),
        }
    }
}
