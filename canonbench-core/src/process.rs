//! Scott Process Engine
//!
//! Scott runs as a Python script, one process per graph. The graph is written
//! to the script's stdin with the line protocol; the script prints its own
//! setup and canonization times on stdout. A cancelled call kills the process.

use crate::engine::{Engine, EngineTiming};
use crate::error::EngineError;
use crate::measure::Timer;
use crate::query::QueryGraph;
use crate::worker::CancelToken;
use canonbench_graph::{number_vertices, to_undirected_graph};
use canonbench_ipc::{EdgeLine, NodeLine, ProtocolError, read_timings, write_graph};
use canonbench_stats::EngineId;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::Duration;
use tracing::debug;

/// How often a running Scott process is checked for exit and cancellation
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Which Scott entry point to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScottMode {
    /// Query graph as is
    Directed,
    /// Undirected form, marker nodes labeled `tail` / `head`
    Undirected,
}

impl ScottMode {
    /// Script file name inside the Scott bindings directory
    pub fn script(self) -> &'static str {
        match self {
            ScottMode::Directed => "directed.py",
            ScottMode::Undirected => "undirected.py",
        }
    }

    fn display_name(self) -> &'static str {
        match self {
            ScottMode::Directed => "Scott (directed)",
            ScottMode::Undirected => "Scott (undirected)",
        }
    }
}

/// The Scott engine, reached through a Python process
#[derive(Debug, Clone)]
pub struct ScottEngine {
    id: EngineId,
    mode: ScottMode,
    python: String,
    directory: PathBuf,
}

impl ScottEngine {
    /// Create an engine running `<directory>/<mode script>` with `python`
    pub fn new(mode: ScottMode, python: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            id: EngineId::new(mode.display_name()),
            mode,
            python: python.into(),
            directory: directory.into(),
        }
    }

    /// Entry point mode
    pub fn mode(&self) -> ScottMode {
        self.mode
    }

    /// Bindings directory the script runs in
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn script_path(&self) -> PathBuf {
        self.directory.join(self.mode.script())
    }

    fn spawn(&self) -> Result<Child, EngineError> {
        let script = self.script_path();
        let script = script.canonicalize().unwrap_or(script);
        let child = Command::new(&self.python)
            .arg(script)
            .current_dir(&self.directory)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;
        Ok(child)
    }

    fn write_input<W: std::io::Write>(
        &self,
        graph: &QueryGraph,
        writer: &mut W,
    ) -> Result<(), EngineError> {
        match self.mode {
            ScottMode::Directed => {
                let numbered = number_vertices(graph);
                let nodes = (0..numbered.node_count() as u32).map(|index| NodeLine {
                    index,
                    label: None::<&str>,
                });
                let pairs = numbered.edge_pairs();
                let edges = numbered
                    .graph()
                    .edges()
                    .iter()
                    .zip(pairs.chunks_exact(2))
                    .map(|(edge, pair)| EdgeLine {
                        source: pair[0],
                        target: pair[1],
                        label: edge.label().copied(),
                    });
                write_graph(writer, nodes, edges)?;
            }
            ScottMode::Undirected => {
                let numbered = number_vertices(&to_undirected_graph(graph));
                let nodes = numbered.graph().nodes().iter().map(|node| NodeLine {
                    index: node.data().index,
                    label: node.data().data.marker(),
                });
                let pairs = numbered.edge_pairs();
                let edges = numbered
                    .graph()
                    .edges()
                    .iter()
                    .zip(pairs.chunks_exact(2))
                    .map(|(edge, pair)| EdgeLine {
                        source: pair[0],
                        target: pair[1],
                        label: edge.label().copied(),
                    });
                write_graph(writer, nodes, edges)?;
            }
        }
        Ok(())
    }
}

impl Engine for ScottEngine {
    fn id(&self) -> &EngineId {
        &self.id
    }

    fn check_available(&self) -> Result<(), EngineError> {
        let script = self.script_path();
        if script.is_file() {
            Ok(())
        } else {
            Err(EngineError::Unavailable {
                engine: self.id.clone(),
                reason: format!("script not found at {}", script.display()),
            })
        }
    }

    fn canonize(&self, graph: &QueryGraph) -> Result<EngineTiming, EngineError> {
        self.canonize_cancellable(graph, &CancelToken::new())
    }

    fn canonize_cancellable(
        &self,
        graph: &QueryGraph,
        cancel: &CancelToken,
    ) -> Result<EngineTiming, EngineError> {
        let timer = Timer::start();
        let mut child = self.spawn()?;
        let stdin = child.stdin.take();
        let stdout = child.stdout.take();

        let (status, written, timing) = std::thread::scope(|scope| {
            // stdin is dropped when the writer finishes, closing the pipe
            let writer = scope.spawn(move || -> Result<u64, EngineError> {
                if let Some(stdin) = stdin {
                    self.write_input(graph, &mut BufWriter::new(stdin))?;
                }
                Ok(timer.elapsed_ns())
            });
            let reader = scope.spawn(move || match stdout {
                Some(stdout) => read_timings(BufReader::new(stdout)),
                None => Err(ProtocolError::MissingTiming { received: 0 }),
            });

            let status = wait_or_cancel(&mut child, cancel);
            if status.is_err() {
                let _ = child.kill();
                let _ = child.wait();
            }

            let written = writer.join().unwrap_or_else(|_| {
                Err(EngineError::Panicked("Scott input writer".to_string()))
            });
            let timing = reader.join().unwrap_or_else(|_| {
                Err(ProtocolError::MissingTiming { received: 0 })
            });
            (status, written, timing)
        });

        let status = status?;
        let transform_ns = written?;
        let timing = timing?;
        if !status.success() {
            return Err(EngineError::ProcessExit { status });
        }

        debug!(
            engine = %self.id,
            setup_ns = timing.setup_ns,
            canonization_ns = timing.canonization_ns,
            "Scott process finished"
        );

        Ok(EngineTiming {
            transform_ns,
            native_setup_ns: timing.setup_ns,
            canonization_ns: timing.canonization_ns,
        })
    }
}

/// Poll `child` until it exits or `cancel` is set
fn wait_or_cancel(child: &mut Child, cancel: &CancelToken) -> Result<ExitStatus, EngineError> {
    loop {
        if cancel.is_cancelled() {
            debug!(pid = child.id(), "Killing cancelled Scott process");
            return Err(EngineError::Cancelled);
        }
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}
