#![warn(missing_docs)]
//! Canonbench Core - Engines, Datasets and the Benchmark Worker
//!
//! Everything that runs between "here is a query graph" and "here is a
//! runtime summary":
//! - High-resolution wall-clock timing and CPU pinning
//! - The engine contract plus the transform pipelines of the native engines
//! - The process-based Scott engine speaking the line protocol
//! - Seeded dataset generation
//! - A single dedicated worker thread with cooperative cancellation
//! - The result types of an evaluation over growing size steps

mod dataset;
mod engine;
mod error;
mod evaluation;
mod measure;
mod native;
mod process;
mod query;
mod worker;

pub use dataset::{GraphDataSet, GraphGenerator, RandomQueryGraphs};
pub use engine::{Engine, EngineTiming, run_timed};
pub use error::EngineError;
pub use evaluation::{Evaluation, Outcome, SizeStep};
pub use measure::{Timer, pin_to_cpu};
pub use native::{NativeCanonizer, NativeEngine, NativeInput, NativeTiming, Pipeline};
pub use process::{ScottEngine, ScottMode};
pub use query::{Predicate, QueryGraph, QueryVertex};
pub use worker::{CancelToken, Task, Worker, WorkerReply};

// Re-export the statistics types engines and workers produce
pub use canonbench_stats::{EngineId, RuntimeReport, RuntimeSummary};
pub use canonbench_graph::GraphError;
