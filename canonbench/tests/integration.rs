//! Integration tests for Canonbench
//!
//! These tests drive query graphs through the engine pipelines, the harness
//! and the report writers.

use canonbench::prelude::*;
use canonbench::{
    EngineError, EngineId, GraphDataSet, GraphGenerator, HarnessEvent, HarnessState, Outcome,
    Pipeline, QueryGraph, build_json_report, generate_json_report, write_evaluation_log,
};
use canonbench_core::{GraphError, Predicate, QueryVertex};
use canonbench_report::RunParameters;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Mutex;
use std::time::Duration;

/// Labeled paths with exactly `size` query vertices
struct LabeledPaths;

impl GraphGenerator for LabeledPaths {
    fn generate(
        &self,
        size: usize,
        labels: usize,
        _rng: &mut StdRng,
    ) -> Result<QueryGraph, GraphError> {
        let mut graph = QueryGraph::new();
        let nodes: Vec<_> = (0..size as u32).map(|v| graph.add_node(QueryVertex(v))).collect();
        for (i, pair) in nodes.windows(2).enumerate() {
            let label = Predicate((i % labels.max(1)) as u32);
            graph.add_edge(pair[0], pair[1], Some(label))?;
        }
        Ok(graph)
    }
}

/// Canonizer whose behavior depends on the prepared input size
struct Scripted {
    slow_above: usize,
    fail_above: usize,
    seen: Mutex<Vec<usize>>,
}

impl Scripted {
    fn new(slow_above: usize, fail_above: usize) -> Self {
        Self {
            slow_above,
            fail_above,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl NativeCanonizer for Scripted {
    fn compute_canon(&self, input: &NativeInput) -> Result<NativeTiming, EngineError> {
        let nodes = input.node_count();
        self.seen.lock().unwrap().push(nodes);
        if nodes > self.fail_above {
            return Err(EngineError::Native(format!("refusing {} nodes", nodes)));
        }
        if nodes > self.slow_above {
            std::thread::sleep(Duration::from_millis(400));
        }
        Ok(NativeTiming {
            setup_ns: 10,
            canonization_ns: nodes as u64,
        })
    }
}

fn parameters(budget: Duration) -> HarnessParameters {
    HarnessParameters {
        initial_size: 4,
        growth_factor: 2,
        max_size: 64,
        dataset_size: 3,
        budget,
        seed: 99,
        labels: 2,
        pin_cpu: None,
    }
}

fn run_parameters(parameters: &HarnessParameters) -> RunParameters {
    RunParameters {
        initial_size: parameters.initial_size,
        growth_factor: parameters.growth_factor,
        max_size: parameters.max_size,
        dataset_size: parameters.dataset_size,
        budget_ns: parameters.budget.as_nanos() as u64,
        seed: parameters.seed,
        labels: parameters.labels,
    }
}

/// Every native pipeline produces input for the same query graph
#[test]
fn test_pipelines_prepare_same_graph() {
    let graph = LabeledPaths.generate(5, 2, &mut StdRng::seed_from_u64(0)).unwrap();

    // 5 vertices plus 4 label nodes
    for pipeline in [Pipeline::Nauty, Pipeline::Nishe, Pipeline::Bliss] {
        let input = pipeline.prepare(&graph).unwrap();
        assert_eq!(input.node_count(), 9, "{:?}", pipeline);
    }

    // Undirected form: 5 vertices, tail and head per edge, then one label node per labeled edge
    let input = Pipeline::Traces.prepare(&graph).unwrap();
    let NativeInput::Adjacency { adjacency, .. } = input else {
        panic!("traces uses adjacency input");
    };
    assert_eq!(adjacency.len(), 5 + 4 * 2 + 4);
    for (i, row) in adjacency.iter().enumerate() {
        for &j in row {
            assert!(adjacency[j as usize].contains(&(i as u32)), "{} -> {} not mirrored", i, j);
        }
    }
}

/// The same seed yields the same datasets
#[test]
fn test_random_datasets_reproducible() {
    let generate = || {
        let mut rng = StdRng::seed_from_u64(1234);
        GraphDataSet::generate(10, 16, 5, &RandomQueryGraphs, &mut rng).unwrap()
    };
    let a = generate();
    let b = generate();
    assert_eq!(a.len(), 10);
    assert_eq!(a.graphs(), b.graphs());
    assert_eq!(a.size_statistics(), b.size_statistics());
}

/// A native engine runs to completion and every step is reported
#[test]
fn test_native_engine_completes() {
    let params = HarnessParameters {
        max_size: 16,
        ..parameters(Duration::from_secs(10))
    };
    let harness = BenchmarkHarness::new(params.clone(), Box::new(LabeledPaths)).unwrap();
    let canonizer = Arc::new(Scripted::new(usize::MAX, usize::MAX));
    let engine = Arc::new(NativeEngine::nauty_dense(canonizer.clone()));

    let evaluation = harness.evaluate(engine).unwrap();

    assert!(matches!(evaluation.outcome, Outcome::Completed));
    let sizes: Vec<usize> = evaluation.steps.iter().map(|s| s.size).collect();
    assert_eq!(sizes, vec![4, 8, 16]);
    for step in &evaluation.steps {
        assert_eq!(step.summary.count(), params.dataset_size);
        for report in step.summary.reports() {
            assert_eq!(report.native_setup_ns(), 10);
            assert_eq!(report.canonization_ns(), (2 * step.size - 1) as u64);
        }
    }
    assert_eq!(canonizer.seen.lock().unwrap().len(), 9);
}

/// Budget exceeded at size 16: the two earlier steps survive, cancellation
/// is requested before the worker is observed to exit
#[test]
fn test_timeout_keeps_partial_results() {
    let params = parameters(Duration::from_millis(150));
    let harness = BenchmarkHarness::new(params, Box::new(LabeledPaths)).unwrap();
    // size 8 prepares 15 nodes, size 16 prepares 31
    let engine = Arc::new(NativeEngine::nishe(Arc::new(Scripted::new(20, usize::MAX))));

    let mut events = Vec::new();
    let evaluation = harness.evaluate_with(engine, |event| events.push(event)).unwrap();

    assert!(matches!(evaluation.outcome, Outcome::TimedOut { size: 16 }));
    assert_eq!(evaluation.largest_completed(), Some(8));

    let cancelled = events
        .iter()
        .position(|e| matches!(e, HarnessEvent::CancellationRequested { size: 16 }))
        .unwrap();
    let terminal = events
        .iter()
        .position(|e| matches!(e, HarnessEvent::Transition(HarnessState::TimedOut { size: 16 })))
        .unwrap();
    let exited = events
        .iter()
        .position(|e| matches!(e, HarnessEvent::WorkerExited))
        .unwrap();
    assert!(cancelled < terminal);
    assert!(terminal < exited);
    assert_eq!(exited, events.len() - 1);
}

/// A failing engine stops the growth loop and the log covers the completed steps
#[test]
fn test_failure_log_and_json() {
    let params = parameters(Duration::from_secs(10));
    let harness = BenchmarkHarness::new(params.clone(), Box::new(LabeledPaths)).unwrap();
    let engine = Arc::new(NativeEngine::bliss(Arc::new(Scripted::new(usize::MAX, 20))));

    let evaluation = harness.evaluate(engine).unwrap();
    assert!(matches!(
        evaluation.outcome,
        Outcome::Failed {
            size: 16,
            error: EngineError::Native(_)
        }
    ));
    assert_eq!(evaluation.engine, EngineId::new("Bliss"));

    let mut buffer = Vec::new();
    write_evaluation_log(&mut buffer, &evaluation).unwrap();
    let log = String::from_utf8(buffer).unwrap();
    assert_eq!(log.matches("========== Dataset Report ==========").count(), 2);
    assert_eq!(log.matches("========== Runtime Report ==========").count(), 2);
    assert_eq!(log.matches("Algorithm: Bliss").count(), 2);
    let trailer: Vec<&str> = log
        .lines()
        .skip_while(|line| !line.starts_with("Raw data ("))
        .skip(1)
        .collect();
    assert_eq!(trailer.len(), 2);
    for line in trailer {
        assert_eq!(line.split(' ').count(), 10);
    }

    let report = build_json_report(run_parameters(&params), &[evaluation]);
    let json = generate_json_report(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let engine = &value["engines"][0];
    assert_eq!(engine["engine"], "Bliss");
    assert_eq!(engine["outcome"], "failed");
    assert_eq!(engine["stopped_at"], 16);
    assert_eq!(engine["steps"].as_array().unwrap().len(), 2);
    assert_eq!(value["meta"]["parameters"]["seed"], 99);
}

/// Engines sharing a harness see identical datasets
#[test]
fn test_engines_share_datasets() {
    let params = HarnessParameters {
        max_size: 8,
        ..parameters(Duration::from_secs(10))
    };
    let harness = BenchmarkHarness::new(params, Box::new(RandomQueryGraphs)).unwrap();
    let scripted = || Arc::new(Scripted::new(usize::MAX, usize::MAX));

    let nauty = harness.evaluate(Arc::new(NativeEngine::nauty_sparse(scripted()))).unwrap();
    let bliss = harness.evaluate(Arc::new(NativeEngine::bliss(scripted()))).unwrap();

    assert_eq!(nauty.steps.len(), 2);
    for (a, b) in nauty.steps.iter().zip(&bliss.steps) {
        assert_eq!(a.dataset.graphs(), b.dataset.graphs());
    }
}
