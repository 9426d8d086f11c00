#![warn(missing_docs)]
//! Canonbench Graph - Query Graph Model and Transforms
//!
//! Provides the directed multigraph used as input and output of every transform,
//! plus the pipeline that turns a labeled query graph into the representations
//! canonization engines consume:
//! - Undirected form (each edge split into a tail/head proxy pair)
//! - Edge-labels-as-nodes form
//! - Dense vertex numbering
//! - Colored adjacency form with sign-delimited partition arrays

mod adjacency;
mod colors;
mod error;
mod model;
mod transform;
mod vertex;

pub use adjacency::make_bidirectional;
pub use colors::{ColorEncoding, encode_color_ids, encode_colors};
pub use error::GraphError;
pub use model::{Edge, EdgeId, Graph, Node, NodeId};
pub use transform::{
    ColoredGraph, Numbered, NumberedGraph, edge_labels_to_nodes, mark_original, number_vertices,
    to_colored_graph, to_undirected_graph,
};
pub use vertex::{Marker, Vertex};

/// Adjacency list over dense node indices: `adjacency[i]` lists the targets of node `i`.
pub type AdjacencyList = Vec<Vec<u32>>;
