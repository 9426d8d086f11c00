//! Graph Transforms
//!
//! Pure functions converting one graph representation into another. Engines
//! chain these to reach the input format they require:
//!
//! ```text
//! Graph<V, L> ──to_undirected_graph──▶ Graph<Vertex<V, L>, L>
//!      │                                      │
//!      └──mark_original──▶ Graph<Vertex<V, L>, L> ──edge_labels_to_nodes──▶ Graph<Vertex<V, L>, L>
//!                                                                              │
//!                                       number_vertices ◀──────────────────────┘
//!                                              │
//!                                   to_colored_graph ──▶ ColoredGraph
//! ```

use crate::model::{Graph, NodeId};
use crate::vertex::{Marker, Vertex};
use crate::AdjacencyList;
use fxhash::FxHashMap;
use std::hash::Hash;

/// Wrap every node of `graph` as [`Vertex::Original`] without changing structure.
pub fn mark_original<V: Clone, L: Clone>(graph: &Graph<V, L>) -> Graph<Vertex<V, L>, L> {
    let mut out = Graph::with_capacity(graph.node_count(), graph.edge_count());
    for node in graph.nodes() {
        out.add_node(Vertex::Original(node.data().clone()));
    }
    for edge in graph.edges() {
        out.push_edge(edge.source(), edge.target(), edge.label().cloned());
    }
    out
}

/// Split every edge `a --label--> c` into `a -> tail --label--> head -> c`.
///
/// The result is still stored as a directed graph but is only meaningful to
/// consumers that ignore edge direction. The label stays on the middle edge
/// only. Original nodes keep their position; the input edges are not copied.
///
/// Node count grows by `2·|E|`, edge count becomes `3·|E|`.
pub fn to_undirected_graph<V: Clone, L: Clone>(graph: &Graph<V, L>) -> Graph<Vertex<V, L>, L> {
    let mut out = Graph::with_capacity(
        graph.node_count() + 2 * graph.edge_count(),
        3 * graph.edge_count(),
    );

    let originals: Vec<NodeId> = graph
        .nodes()
        .iter()
        .map(|node| out.add_node(Vertex::Original(node.data().clone())))
        .collect();

    for edge in graph.edges() {
        let tail = out.add_node(Vertex::Marker(Marker::Tail));
        let head = out.add_node(Vertex::Marker(Marker::Head));

        out.push_edge(originals[edge.source().index()], tail, None);
        out.push_edge(tail, head, edge.label().cloned());
        out.push_edge(head, originals[edge.target().index()], None);
    }

    out
}

/// Replace every labeled edge `a --label--> c` by `a -> [label] -> c`.
///
/// Unlabeled edges are copied unchanged. Applied after [`to_undirected_graph`]
/// only the middle edge of each split needs a label node.
pub fn edge_labels_to_nodes<V: Clone, L: Clone>(
    graph: &Graph<Vertex<V, L>, L>,
) -> Graph<Vertex<V, L>, L> {
    let labeled = graph.labeled_edge_count();
    let mut out = Graph::with_capacity(
        graph.node_count() + labeled,
        graph.edge_count() + labeled,
    );

    for node in graph.nodes() {
        out.add_node(node.data().clone());
    }

    for edge in graph.edges() {
        match edge.label() {
            Some(label) => {
                let middle = out.add_node(Vertex::Marker(Marker::Label(label.clone())));
                out.push_edge(edge.source(), middle, None);
                out.push_edge(middle, edge.target(), None);
            }
            None => {
                out.push_edge(edge.source(), edge.target(), None);
            }
        }
    }

    out
}

/// Payload of a numbered node: its dense index, where it came from, and its data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Numbered<V> {
    /// Dense zero-based index used by every array representation
    pub index: u32,
    /// Identity of the node in the graph that was numbered
    pub origin: NodeId,
    /// Payload copied from the numbered node
    pub data: V,
}

/// A graph whose nodes carry a dense index in `[0, node_count)`
#[derive(Debug, Clone)]
pub struct NumberedGraph<V, L> {
    graph: Graph<Numbered<V>, L>,
}

impl<V, L> NumberedGraph<V, L> {
    /// Underlying graph
    pub fn graph(&self) -> &Graph<Numbered<V>, L> {
        &self.graph
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Dense index of a node of this graph
    pub fn index_of(&self, id: NodeId) -> Option<u32> {
        self.graph.node(id).map(|node| node.data().index)
    }

    /// Outgoing adjacency over dense indices
    pub fn adjacency_list(&self) -> AdjacencyList {
        let mut adjacency = vec![Vec::new(); self.graph.node_count()];
        for edge in self.graph.edges() {
            let source = self.dense(edge.source());
            adjacency[source as usize].push(self.dense(edge.target()));
        }
        adjacency
    }

    /// Edges as a flat `[src0, dst0, src1, dst1, ...]` array of dense indices
    pub fn edge_pairs(&self) -> Vec<u32> {
        let mut pairs = Vec::with_capacity(self.graph.edge_count() * 2);
        for edge in self.graph.edges() {
            pairs.push(self.dense(edge.source()));
            pairs.push(self.dense(edge.target()));
        }
        pairs
    }

    fn dense(&self, id: NodeId) -> u32 {
        self.graph.nodes()[id.index()].data().index
    }
}

/// Assign consecutive indices `0..n` to the nodes of `graph` in iteration order.
///
/// Edges are carried over into the numbered graph with their labels.
pub fn number_vertices<V: Clone, L: Clone>(graph: &Graph<V, L>) -> NumberedGraph<V, L> {
    let mut out = Graph::with_capacity(graph.node_count(), graph.edge_count());
    let mut lookup: FxHashMap<NodeId, NodeId> = FxHashMap::default();
    lookup.reserve(graph.node_count());

    for (index, node) in graph.nodes().iter().enumerate() {
        let numbered = out.add_node(Numbered {
            index: index as u32,
            origin: node.id(),
            data: node.data().clone(),
        });
        lookup.insert(node.id(), numbered);
    }

    for edge in graph.edges() {
        out.push_edge(
            lookup[&edge.source()],
            lookup[&edge.target()],
            edge.label().cloned(),
        );
    }

    NumberedGraph { graph: out }
}

/// Adjacency plus a partition of the node indices into color classes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColoredGraph {
    adjacency: AdjacencyList,
    classes: Vec<Vec<u32>>,
}

impl ColoredGraph {
    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Outgoing adjacency over dense indices
    pub fn adjacency(&self) -> &AdjacencyList {
        &self.adjacency
    }

    /// Mutable adjacency, for in-place post-processing
    pub fn adjacency_mut(&mut self) -> &mut AdjacencyList {
        &mut self.adjacency
    }

    /// Color classes; each is non-empty and every index occurs in exactly one
    pub fn classes(&self) -> &[Vec<u32>] {
        &self.classes
    }

    /// Split into adjacency and classes
    pub fn into_parts(self) -> (AdjacencyList, Vec<Vec<u32>>) {
        (self.adjacency, self.classes)
    }
}

/// Group node indices into color classes by payload.
///
/// All original nodes share one class. Structural nodes are grouped by marker:
/// one class for tails, one for heads, and one per distinct label value.
/// Classes appear in order of their first member's index.
pub fn to_colored_graph<V, L: Eq + Hash>(graph: &NumberedGraph<Vertex<V, L>, L>) -> ColoredGraph {
    let mut slots: FxHashMap<Option<&Marker<L>>, usize> = FxHashMap::default();
    let mut classes: Vec<Vec<u32>> = Vec::new();

    for node in graph.graph().nodes() {
        let numbered = node.data();
        let slot = *slots.entry(numbered.data.marker()).or_insert_with(|| {
            classes.push(Vec::new());
            classes.len() - 1
        });
        classes[slot].push(numbered.index);
    }

    ColoredGraph {
        adjacency: graph.adjacency_list(),
        classes,
    }
}
