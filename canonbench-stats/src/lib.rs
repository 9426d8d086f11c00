#![warn(missing_docs)]
//! Canonbench Statistical Engine
//!
//! Aggregates engine runtimes without retaining more than the raw reports:
//! - Per-run timing breakdown (`RuntimeReport`) with derived "other" time
//! - Online mean and sample standard deviation per timing field
//! - Per-engine summaries that refuse reports from a different engine
//! - Dataset size statistics (node and edge counts)
//! - Percentiles over retained samples for tail reporting

mod dataset;
mod error;
mod percentiles;
mod report;
mod running;
mod summary;

pub use dataset::SizeStatistics;
pub use error::StatsError;
pub use percentiles::{Percentiles, compute_percentile, compute_percentiles};
pub use report::{EngineId, RuntimeReport, TimingField};
pub use running::RunningStatistics;
pub use summary::{FieldSummary, RuntimeSummary};
