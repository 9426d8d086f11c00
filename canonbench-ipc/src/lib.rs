#![warn(missing_docs)]
//! Canonbench Process Protocol
//!
//! Line-oriented text protocol spoken with process-based canonization engines.
//! One process is started per graph:
//! - the host writes a node section and an edge section, each closed by `end`
//! - the engine answers with two timing lines (setup, canonization)
//!
//! ```text
//! 0 a          <- node index, optional label
//! 1
//! end
//! 0 0 1 a      <- edge id, source index, target index, optional label
//! end
//! ```

mod error;
mod reader;
mod writer;

pub use error::ProtocolError;
pub use reader::{ProcessTiming, parse_timing_line, read_timings};
pub use writer::{EdgeLine, NodeLine, write_edges, write_graph, write_nodes};

/// Line terminating the node and edge sections
pub const SECTION_END: &str = "end";

/// Length of the fixed prefix in front of each timing value
pub const TIMING_PREFIX_LEN: usize = 11;
