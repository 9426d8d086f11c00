//! Engine Contract
//!
//! An engine turns one query graph into the three inner measurements of a run.
//! [`run_timed`] wraps the call with the wall clock to produce a
//! [`RuntimeReport`].

use crate::error::EngineError;
use crate::measure::Timer;
use crate::query::QueryGraph;
use crate::worker::CancelToken;
use canonbench_stats::{EngineId, RuntimeReport};

/// Inner measurements of one engine invocation, in nanoseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineTiming {
    /// Host-side transform of the query graph into engine input
    pub transform_ns: u64,
    /// Engine-side construction of its own data structures
    pub native_setup_ns: u64,
    /// Engine-side canonization
    pub canonization_ns: u64,
}

/// A canonization engine under benchmark
pub trait Engine: Send + Sync {
    /// Display name, also used to identify reports
    fn id(&self) -> &EngineId;

    /// Verify the engine can run at all. Called once before any evaluation.
    fn check_available(&self) -> Result<(), EngineError> {
        Ok(())
    }

    /// Canonize one query graph
    fn canonize(&self, graph: &QueryGraph) -> Result<EngineTiming, EngineError>;

    /// Canonize one query graph, giving up with [`EngineError::Cancelled`]
    /// once `cancel` is set.
    ///
    /// Engines that cannot be interrupted run [`Engine::canonize`] to completion.
    fn canonize_cancellable(
        &self,
        graph: &QueryGraph,
        _cancel: &CancelToken,
    ) -> Result<EngineTiming, EngineError> {
        self.canonize(graph)
    }
}

/// Invoke `engine` on `graph` and record the wall time around the call
pub fn run_timed(
    engine: &dyn Engine,
    graph: &QueryGraph,
    cancel: &CancelToken,
) -> Result<RuntimeReport, EngineError> {
    let timer = Timer::start();
    let timing = engine.canonize_cancellable(graph, cancel)?;
    let total_ns = timer.elapsed_ns();

    Ok(RuntimeReport::new(
        engine.id().clone(),
        timing.transform_ns,
        timing.native_setup_ns,
        timing.canonization_ns,
        total_ns,
    ))
}
