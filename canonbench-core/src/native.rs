//! Native Engine Pipelines
//!
//! Native engines share one call contract: they receive arrays over dense node
//! indices and report their setup and canonization times. What differs is the
//! chain of transforms producing those arrays:
//!
//! | Pipeline | Transforms | Input |
//! |----------|------------|-------|
//! | nauty    | labels to nodes, number, color | adjacency + end-marked colors |
//! | traces   | undirected, labels to nodes, number, color, bidirectional | adjacency + end-marked colors |
//! | nishe    | labels to nodes, number, color | adjacency + start-marked colors |
//! | bliss    | labels to nodes, number | edge list + color ids |

use crate::engine::{Engine, EngineTiming};
use crate::error::EngineError;
use crate::measure::Timer;
use crate::query::QueryGraph;
use canonbench_graph::{
    AdjacencyList, ColorEncoding, GraphError, edge_labels_to_nodes, encode_color_ids,
    encode_colors, make_bidirectional, mark_original, number_vertices, to_colored_graph,
    to_undirected_graph,
};
use canonbench_stats::EngineId;
use std::sync::Arc;

/// Arrays handed to a native canonizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeInput {
    /// Adjacency list plus a signed partition array
    Adjacency {
        /// `adjacency[i]` lists the neighbours of node `i`
        adjacency: AdjacencyList,
        /// Sign-delimited, 1-based color classes
        colors: Vec<i32>,
    },
    /// Flat edge list plus one color id per node
    EdgeList {
        /// Number of nodes
        node_count: u32,
        /// `[src0, dst0, src1, dst1, ...]`
        edges: Vec<u32>,
        /// Color id per node index
        colors: Vec<u32>,
    },
}

impl NativeInput {
    /// Number of nodes described by this input
    pub fn node_count(&self) -> usize {
        match self {
            NativeInput::Adjacency { adjacency, .. } => adjacency.len(),
            NativeInput::EdgeList { node_count, .. } => *node_count as usize,
        }
    }
}

/// Timings reported by a native canonizer, in nanoseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NativeTiming {
    /// Construction of the engine's own data structures
    pub setup_ns: u64,
    /// Canonization
    pub canonization_ns: u64,
}

/// The foreign call of a native engine
pub trait NativeCanonizer: Send + Sync {
    /// Verify the underlying library is loaded and callable
    fn check_available(&self) -> Result<(), String> {
        Ok(())
    }

    /// Canonize the prepared input
    fn compute_canon(&self, input: &NativeInput) -> Result<NativeTiming, EngineError>;
}

/// Transform chain preparing native input from a query graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    /// Directed colored adjacency, end-marked colors
    Nauty,
    /// Undirected colored adjacency with symmetric rows, end-marked colors
    Traces,
    /// Directed colored adjacency, start-marked colors
    Nishe,
    /// Edge list with integer color ids
    Bliss,
}

impl Pipeline {
    /// Run the transform chain
    pub fn prepare(self, graph: &QueryGraph) -> Result<NativeInput, GraphError> {
        match self {
            Pipeline::Nauty | Pipeline::Nishe => {
                let numbered = number_vertices(&edge_labels_to_nodes(&mark_original(graph)));
                let (adjacency, classes) = to_colored_graph(&numbered).into_parts();
                let encoding = if self == Pipeline::Nauty {
                    ColorEncoding::EndMarked
                } else {
                    ColorEncoding::StartMarked
                };
                Ok(NativeInput::Adjacency {
                    colors: encode_colors(&classes, encoding)?,
                    adjacency,
                })
            }
            Pipeline::Traces => {
                let numbered = number_vertices(&edge_labels_to_nodes(&to_undirected_graph(graph)));
                let (mut adjacency, classes) = to_colored_graph(&numbered).into_parts();
                make_bidirectional(&mut adjacency);
                Ok(NativeInput::Adjacency {
                    colors: encode_colors(&classes, ColorEncoding::EndMarked)?,
                    adjacency,
                })
            }
            Pipeline::Bliss => {
                let numbered = number_vertices(&edge_labels_to_nodes(&mark_original(graph)));
                let node_count = u32::try_from(numbered.node_count()).map_err(|_| {
                    GraphError::TooManyNodes {
                        nodes: numbered.node_count(),
                    }
                })?;
                Ok(NativeInput::EdgeList {
                    node_count,
                    edges: numbered.edge_pairs(),
                    colors: encode_color_ids(&numbered),
                })
            }
        }
    }
}

/// An engine reached through a [`NativeCanonizer`]
#[derive(Clone)]
pub struct NativeEngine {
    id: EngineId,
    pipeline: Pipeline,
    canonizer: Arc<dyn NativeCanonizer>,
}

impl NativeEngine {
    /// Create an engine with an explicit name and pipeline
    pub fn new(
        id: impl Into<EngineId>,
        pipeline: Pipeline,
        canonizer: Arc<dyn NativeCanonizer>,
    ) -> Self {
        Self {
            id: id.into(),
            pipeline,
            canonizer,
        }
    }

    /// nauty on its dense graph representation
    pub fn nauty_dense(canonizer: Arc<dyn NativeCanonizer>) -> Self {
        Self::new("Nauty (dense)", Pipeline::Nauty, canonizer)
    }

    /// nauty on its sparse graph representation
    pub fn nauty_sparse(canonizer: Arc<dyn NativeCanonizer>) -> Self {
        Self::new("Nauty (sparse)", Pipeline::Nauty, canonizer)
    }

    /// Traces
    pub fn traces(canonizer: Arc<dyn NativeCanonizer>) -> Self {
        Self::new("Traces", Pipeline::Traces, canonizer)
    }

    /// nishe
    pub fn nishe(canonizer: Arc<dyn NativeCanonizer>) -> Self {
        Self::new("Nishe", Pipeline::Nishe, canonizer)
    }

    /// bliss
    pub fn bliss(canonizer: Arc<dyn NativeCanonizer>) -> Self {
        Self::new("Bliss", Pipeline::Bliss, canonizer)
    }

    /// Transform chain of this engine
    pub fn pipeline(&self) -> Pipeline {
        self.pipeline
    }
}

impl std::fmt::Debug for NativeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeEngine")
            .field("id", &self.id)
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}

impl Engine for NativeEngine {
    fn id(&self) -> &EngineId {
        &self.id
    }

    fn check_available(&self) -> Result<(), EngineError> {
        self.canonizer
            .check_available()
            .map_err(|reason| EngineError::Unavailable {
                engine: self.id.clone(),
                reason,
            })
    }

    fn canonize(&self, graph: &QueryGraph) -> Result<EngineTiming, EngineError> {
        let timer = Timer::start();
        let input = self.pipeline.prepare(graph)?;
        let transform_ns = timer.elapsed_ns();

        let native = self.canonizer.compute_canon(&input)?;
        Ok(EngineTiming {
            transform_ns,
            native_setup_ns: native.setup_ns,
            canonization_ns: native.canonization_ns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Predicate, QueryVertex};
    use std::sync::Mutex;

    /// Records the input it was given and reports fixed timings
    #[derive(Default)]
    struct Recording {
        seen: Mutex<Vec<NativeInput>>,
    }

    impl NativeCanonizer for Recording {
        fn compute_canon(&self, input: &NativeInput) -> Result<NativeTiming, EngineError> {
            self.seen.lock().unwrap().push(input.clone());
            Ok(NativeTiming {
                setup_ns: 11,
                canonization_ns: 22,
            })
        }
    }

    struct Missing;

    impl NativeCanonizer for Missing {
        fn check_available(&self) -> Result<(), String> {
            Err("libnauty.so not found".to_string())
        }

        fn compute_canon(&self, _input: &NativeInput) -> Result<NativeTiming, EngineError> {
            unreachable!()
        }
    }

    /// 0 --a--> 1
    fn single_edge() -> QueryGraph {
        let mut graph = QueryGraph::new();
        let a = graph.add_node(QueryVertex(0));
        let b = graph.add_node(QueryVertex(1));
        graph.add_edge(a, b, Some(Predicate(0))).unwrap();
        graph
    }

    #[test]
    fn test_nauty_input() {
        let input = Pipeline::Nauty.prepare(&single_edge()).unwrap();
        assert_eq!(
            input,
            NativeInput::Adjacency {
                adjacency: vec![vec![2], vec![], vec![1]],
                colors: vec![1, -2, -3],
            }
        );
    }

    #[test]
    fn test_nishe_input() {
        let input = Pipeline::Nishe.prepare(&single_edge()).unwrap();
        assert_eq!(
            input,
            NativeInput::Adjacency {
                adjacency: vec![vec![2], vec![], vec![1]],
                colors: vec![-1, 2, -3],
            }
        );
    }

    #[test]
    fn test_traces_input_is_symmetric() {
        let input = Pipeline::Traces.prepare(&single_edge()).unwrap();
        let NativeInput::Adjacency { adjacency, colors } = input else {
            panic!("traces uses adjacency input");
        };

        // originals 0,1; tail 2; head 3; label node 4
        assert_eq!(adjacency.len(), 5);
        let directed: usize = 4;
        let entries: usize = adjacency.iter().map(Vec::len).sum();
        assert_eq!(entries, 2 * directed);
        for (source, row) in adjacency.iter().enumerate() {
            for &target in row {
                assert!(adjacency[target as usize].contains(&(source as u32)));
            }
        }
        assert_eq!(colors, vec![1, -2, -3, -4, -5]);
    }

    #[test]
    fn test_bliss_input() {
        let input = Pipeline::Bliss.prepare(&single_edge()).unwrap();
        assert_eq!(
            input,
            NativeInput::EdgeList {
                node_count: 3,
                edges: vec![0, 2, 2, 1],
                colors: vec![0, 0, 1],
            }
        );
    }

    #[test]
    fn test_engine_reports_native_timings() {
        let canonizer = Arc::new(Recording::default());
        let engine = NativeEngine::nauty_dense(canonizer.clone());
        let timing = engine.canonize(&single_edge()).unwrap();

        assert_eq!(engine.id().as_str(), "Nauty (dense)");
        assert_eq!(timing.native_setup_ns, 11);
        assert_eq!(timing.canonization_ns, 22);
        assert_eq!(canonizer.seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_unavailable_canonizer() {
        let engine = NativeEngine::traces(Arc::new(Missing));
        match engine.check_available() {
            Err(EngineError::Unavailable { engine, reason }) => {
                assert_eq!(engine.as_str(), "Traces");
                assert!(reason.contains("libnauty"));
            }
            other => panic!("expected unavailable, got {:?}", other),
        }
    }
}
