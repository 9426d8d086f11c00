#![warn(missing_docs)]
//! # Canonbench
//!
//! Measures how graph canonization engines scale with query size.
//!
//! Canonbench generates datasets of random query graphs of growing size and
//! times each engine on them:
//! - **Transforms**: query graphs are rewritten into the colored adjacency,
//!   edge list or line protocol input each engine expects
//! - **Timing Breakdown**: host-side setup, engine-side setup, canonization,
//!   residual and wall time per graph
//! - **Budgeted Growth**: every dataset runs under a wall-clock budget on a
//!   dedicated worker; a timed-out run keeps the steps completed before it
//! - **Logs and Reports**: per-engine text logs, JSON and terminal summaries
//!
//! ## Quick Start
//!
//! ```ignore
//! use canonbench::prelude::*;
//!
//! let harness = BenchmarkHarness::new(HarnessParameters::default(), Box::new(RandomQueryGraphs))?;
//! let engine = Arc::new(NativeEngine::nauty_dense(Arc::new(MyNauty::load()?)));
//! let evaluation = harness.evaluate(engine)?;
//! println!("{}", format_human_output(&[evaluation]));
//! ```

// Re-export graph model and transforms
pub use canonbench_graph::{
    AdjacencyList, ColorEncoding, ColoredGraph, Graph, GraphError, Marker, NumberedGraph, Vertex,
    edge_labels_to_nodes, encode_colors, make_bidirectional, mark_original, number_vertices,
    to_colored_graph, to_undirected_graph,
};

// Re-export statistics
pub use canonbench_stats::{
    EngineId, RunningStatistics, RuntimeReport, RuntimeSummary, SizeStatistics, TimingField,
};

// Re-export engines and datasets
pub use canonbench_core::{
    Engine, EngineError, EngineTiming, Evaluation, GraphDataSet, GraphGenerator, NativeCanonizer,
    NativeEngine, NativeInput, NativeTiming, Outcome, Pipeline, QueryGraph, RandomQueryGraphs,
    ScottEngine, ScottMode, SizeStep,
};

// Re-export reporting
pub use canonbench_report::{
    build_json_report, format_human_output, generate_json_report, write_evaluation_log,
};

// Re-export the harness
pub use canonbench_cli::{
    BenchmarkHarness, CanonbenchConfig, EngineRegistry, HarnessEvent, HarnessParameters,
    HarnessState,
};

/// Line protocol of the Scott process engine
pub use canonbench_ipc as ipc;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        BenchmarkHarness, Engine, EngineRegistry, HarnessParameters, NativeCanonizer,
        NativeEngine, NativeInput, NativeTiming, Pipeline, RandomQueryGraphs, ScottEngine,
        ScottMode, format_human_output,
    };
    pub use std::sync::Arc;
}

/// Run the Canonbench CLI.
///
/// Call this from a binary's `main()`:
/// ```ignore
/// fn main() {
///     canonbench::run().unwrap();
/// }
/// ```
pub use canonbench_cli::run;
