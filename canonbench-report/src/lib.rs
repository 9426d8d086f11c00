#![warn(missing_docs)]
//! Canonbench Report - Evaluation Logs and Reports
//!
//! Generates the output of a benchmark run:
//! - Per-engine text log (dataset block, summary block, raw reports, raw summary lines)
//! - JSON report with run metadata and per-step metrics
//! - Human-readable terminal overview

mod format;
mod human;
mod json;
mod log;

pub use format::{format_mean_std, format_nanos, format_nanos_f64};
pub use human::format_human_output;
pub use json::{
    EngineReport, FieldMetrics, JsonReport, ReportMeta, RunParameters, StepMetrics,
    build_json_report, generate_json_report,
};
pub use log::{
    log_file_name, write_dataset_block, write_evaluation_log, write_raw_report, write_raw_summary,
    write_summary_block,
};
