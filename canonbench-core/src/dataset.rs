//! Graph Datasets
//!
//! A dataset is a fixed number of query graphs generated together with the
//! same parameters. Generation draws from an explicit seeded RNG so every
//! engine can be benchmarked on the same sequence of datasets.

use crate::query::{Predicate, QueryGraph, QueryVertex};
use canonbench_graph::{GraphError, NodeId};
use canonbench_stats::SizeStatistics;
use rand::Rng;
use rand::rngs::StdRng;

/// Source of random query graphs
pub trait GraphGenerator {
    /// Generate one query graph at size parameter `size` over `labels` distinct labels
    fn generate(
        &self,
        size: usize,
        labels: usize,
        rng: &mut StdRng,
    ) -> Result<QueryGraph, GraphError>;
}

/// Query graphs grown by random rule applications.
///
/// Starts from a single labeled edge between a source and a target vertex and
/// applies `size` rules, each picked uniformly:
/// - concatenation: split an edge `a -> b` into `a -> m -> b` through a new vertex
/// - conjunction: add an edge parallel to an existing one
/// - inverse: add an edge reversed to an existing one
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomQueryGraphs;

impl GraphGenerator for RandomQueryGraphs {
    fn generate(
        &self,
        size: usize,
        labels: usize,
        rng: &mut StdRng,
    ) -> Result<QueryGraph, GraphError> {
        let labels = labels.max(1);
        let label = |rng: &mut StdRng| Predicate(rng.gen_range(0..labels) as u32);

        let mut vertices: u32 = 2;
        let mut edges: Vec<(u32, u32, Predicate)> = vec![(0, 1, label(rng))];

        for _ in 0..size {
            let pick = rng.gen_range(0..edges.len());
            let (source, target, _) = edges[pick];
            match rng.gen_range(0..3) {
                0 => {
                    let middle = vertices;
                    vertices += 1;
                    edges[pick].1 = middle;
                    edges.push((middle, target, label(rng)));
                }
                1 => edges.push((source, target, label(rng))),
                _ => edges.push((target, source, label(rng))),
            }
        }

        let mut graph = QueryGraph::with_capacity(vertices as usize, edges.len());
        let ids: Vec<NodeId> = (0..vertices).map(|v| graph.add_node(QueryVertex(v))).collect();
        for (source, target, predicate) in edges {
            graph.add_edge(ids[source as usize], ids[target as usize], Some(predicate))?;
        }
        Ok(graph)
    }
}

/// Ordered, immutable collection of graphs generated with the same parameters
#[derive(Debug, Clone)]
pub struct GraphDataSet {
    size: usize,
    graphs: Vec<QueryGraph>,
}

impl GraphDataSet {
    /// Generate `count` graphs at size parameter `size`
    pub fn generate(
        count: usize,
        size: usize,
        labels: usize,
        generator: &dyn GraphGenerator,
        rng: &mut StdRng,
    ) -> Result<Self, GraphError> {
        let graphs = (0..count)
            .map(|_| generator.generate(size, labels, rng))
            .collect::<Result<_, _>>()?;
        Ok(Self { size, graphs })
    }

    /// Wrap already generated graphs
    pub fn from_graphs(size: usize, graphs: Vec<QueryGraph>) -> Self {
        Self { size, graphs }
    }

    /// Size parameter the graphs were generated at
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of graphs
    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    /// Whether the dataset holds no graphs
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    /// Graphs in generation order
    pub fn graphs(&self) -> &[QueryGraph] {
        &self.graphs
    }

    /// Node and edge count statistics
    pub fn size_statistics(&self) -> SizeStatistics {
        SizeStatistics::from_counts(
            self.graphs
                .iter()
                .map(|graph| (graph.node_count(), graph.edge_count())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn fingerprint(graph: &QueryGraph) -> Vec<(u32, u32, Predicate)> {
        graph
            .edges()
            .iter()
            .map(|e| (e.source().raw(), e.target().raw(), *e.label().unwrap()))
            .collect()
    }

    #[test]
    fn test_rule_count_bounds_growth() {
        let mut rng = StdRng::seed_from_u64(1234);
        let graph = RandomQueryGraphs.generate(16, 5, &mut rng).unwrap();
        // every rule adds exactly one edge, concatenation also adds one vertex
        assert_eq!(graph.edge_count(), 17);
        assert!(graph.node_count() >= 2 && graph.node_count() <= 18);
        assert_eq!(graph.labeled_edge_count(), graph.edge_count());
    }

    #[test]
    fn test_labels_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = RandomQueryGraphs.generate(64, 3, &mut rng).unwrap();
        assert!(graph.edges().iter().all(|e| e.label().unwrap().0 < 3));
    }

    #[test]
    fn test_same_seed_same_datasets() {
        let mut a = StdRng::seed_from_u64(1234);
        let mut b = StdRng::seed_from_u64(1234);
        let first = GraphDataSet::generate(10, 8, 5, &RandomQueryGraphs, &mut a).unwrap();
        let second = GraphDataSet::generate(10, 8, 5, &RandomQueryGraphs, &mut b).unwrap();

        assert_eq!(first.len(), 10);
        assert_eq!(first.size(), 8);
        for (x, y) in first.graphs().iter().zip(second.graphs()) {
            assert_eq!(fingerprint(x), fingerprint(y));
        }
    }

    #[test]
    fn test_size_statistics() {
        let mut rng = StdRng::seed_from_u64(1);
        let dataset = GraphDataSet::generate(4, 0, 5, &RandomQueryGraphs, &mut rng).unwrap();
        let stats = dataset.size_statistics();
        assert_eq!(stats.graphs(), 4);
        assert!((stats.nodes.mean() - 2.0).abs() < f64::EPSILON);
        assert!((stats.edges.mean() - 1.0).abs() < f64::EPSILON);
        assert_eq!(stats.edges.std_dev(), 0.0);
    }

    /// Emits an edge to a node that was never added
    struct Dangling;

    impl GraphGenerator for Dangling {
        fn generate(
            &self,
            _size: usize,
            _labels: usize,
            _rng: &mut StdRng,
        ) -> Result<QueryGraph, GraphError> {
            let mut other = QueryGraph::new();
            other.add_node(QueryVertex(0));
            let stray = other.add_node(QueryVertex(1));

            let mut graph = QueryGraph::new();
            let a = graph.add_node(QueryVertex(0));
            graph.add_edge(a, stray, Some(Predicate(0)))?;
            Ok(graph)
        }
    }

    #[test]
    fn test_generator_error_propagates() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = GraphDataSet::generate(3, 4, 5, &Dangling, &mut rng);
        assert!(matches!(result, Err(GraphError::UnknownNode(1))));
    }
}
