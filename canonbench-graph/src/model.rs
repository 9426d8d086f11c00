//! Directed Multigraph
//!
//! Nodes and edges receive stable integer identities on creation. Nothing is
//! ever removed, so an identity is never handed out twice. Several edges may
//! connect the same ordered pair of nodes.

use crate::error::GraphError;
use crate::AdjacencyList;
use std::fmt;

/// Identity of a node within one [`Graph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Position of the node in creation order
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Raw identity value
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of an edge within one [`Graph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(u32);

impl EdgeId {
    /// Raw identity value
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// A node and its payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<V> {
    id: NodeId,
    data: V,
}

impl<V> Node<V> {
    /// Identity of this node
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Payload of this node
    pub fn data(&self) -> &V {
        &self.data
    }
}

/// A directed edge with an optional label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<L> {
    id: EdgeId,
    source: NodeId,
    target: NodeId,
    label: Option<L>,
}

impl<L> Edge<L> {
    /// Identity of this edge
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// Tail of the edge
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Head of the edge
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Label carried by the edge, if any
    pub fn label(&self) -> Option<&L> {
        self.label.as_ref()
    }
}

/// Directed multigraph with node payloads of type `V` and edge labels of type `L`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph<V, L> {
    nodes: Vec<Node<V>>,
    edges: Vec<Edge<L>>,
}

impl<V, L> Default for Graph<V, L> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl<V, L> Graph<V, L> {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with room for the given number of nodes and edges
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
        }
    }

    /// Add a node carrying `data` and return its identity
    pub fn add_node(&mut self, data: V) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node { id, data });
        id
    }

    /// Add a directed edge from `source` to `target`
    ///
    /// Fails if either endpoint was not created by this graph.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        label: Option<L>,
    ) -> Result<EdgeId, GraphError> {
        for endpoint in [source, target] {
            if endpoint.index() >= self.nodes.len() {
                return Err(GraphError::UnknownNode(endpoint.raw()));
            }
        }
        Ok(self.push_edge(source, target, label))
    }

    /// Add an edge whose endpoints are known to belong to this graph.
    pub(crate) fn push_edge(&mut self, source: NodeId, target: NodeId, label: Option<L>) -> EdgeId {
        debug_assert!(source.index() < self.nodes.len() && target.index() < self.nodes.len());
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge {
            id,
            source,
            target,
            label,
        });
        id
    }

    /// Look up a node by identity
    pub fn node(&self, id: NodeId) -> Option<&Node<V>> {
        self.nodes.get(id.index())
    }

    /// Nodes in creation order
    pub fn nodes(&self) -> &[Node<V>] {
        &self.nodes
    }

    /// Edges in creation order
    pub fn edges(&self) -> &[Edge<L>] {
        &self.edges
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of edges that carry a label
    pub fn labeled_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.label.is_some()).count()
    }

    /// Outgoing adjacency over node positions (creation order)
    pub fn to_adjacency_list(&self) -> AdjacencyList {
        let mut adjacency = vec![Vec::new(); self.nodes.len()];
        for edge in &self.edges {
            adjacency[edge.source.index()].push(edge.target.raw());
        }
        adjacency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identities_are_sequential() {
        let mut graph: Graph<&str, u8> = Graph::new();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        assert_eq!(a.raw(), 0);
        assert_eq!(b.raw(), 1);

        let e1 = graph.add_edge(a, b, Some(1)).unwrap();
        let e2 = graph.add_edge(a, b, None).unwrap();
        assert_ne!(e1, e2);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.labeled_edge_count(), 1);
    }

    #[test]
    fn test_unknown_endpoint_rejected() {
        let mut graph: Graph<(), ()> = Graph::new();
        let a = graph.add_node(());

        let mut other: Graph<(), ()> = Graph::new();
        other.add_node(());
        let foreign = other.add_node(());

        let result = graph.add_edge(a, foreign, None);
        assert_eq!(result, Err(GraphError::UnknownNode(1)));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_adjacency_list() {
        let mut graph: Graph<(), ()> = Graph::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let c = graph.add_node(());
        graph.add_edge(a, b, None).unwrap();
        graph.add_edge(a, c, None).unwrap();
        graph.add_edge(c, a, None).unwrap();

        assert_eq!(graph.to_adjacency_list(), vec![vec![1, 2], vec![], vec![0]]);
    }
}
