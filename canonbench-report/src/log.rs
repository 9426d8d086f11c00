//! Evaluation Log
//!
//! Text log of one engine's evaluation. Per size step:
//!
//! ```text
//! ========== Dataset Report ==========
//! Graphs: 10
//! Nodes: 6.2 ± 1.3
//! Edges: 5.2 ± 1.3
//! ====================================
//! ========== Runtime Report ==========
//! Algorithm: Traces
//! Setup: 0m 0s 0ms 4120ns ± 0m 0s 0ms 380ns
//! ...
//! ====================================
//! Raw report data (setup, native setup, canonization, other, total)
//! 4012 1030 2210 811 8063
//! ...
//!
//! ```
//!
//! followed by one line of ten numbers per step (mean and standard deviation
//! of setup, native setup, canonization, other and total).

use crate::format::format_mean_std;
use canonbench_core::{Evaluation, RuntimeReport};
use canonbench_stats::{EngineId, RuntimeSummary, SizeStatistics, TimingField};
use std::io::{self, Write};

const RULE: &str = "====================================";

/// Write the dataset block
pub fn write_dataset_block<W: Write>(out: &mut W, stats: &SizeStatistics) -> io::Result<()> {
    writeln!(out, "========== Dataset Report ==========")?;
    writeln!(out, "Graphs: {}", stats.graphs())?;
    writeln!(out, "Nodes: {} \u{00B1} {}", stats.nodes.mean(), stats.nodes.std_dev())?;
    writeln!(out, "Edges: {} \u{00B1} {}", stats.edges.mean(), stats.edges.std_dev())?;
    writeln!(out, "{}", RULE)
}

/// Write the summary block: mean and standard deviation of every timing field
pub fn write_summary_block<W: Write>(out: &mut W, summary: &RuntimeSummary) -> io::Result<()> {
    writeln!(out, "========== Runtime Report ==========")?;
    let engine = summary.engine().map(EngineId::as_str).unwrap_or("-");
    writeln!(out, "Algorithm: {}", engine)?;
    for entry in summary.field_summaries() {
        writeln!(
            out,
            "{}: {}",
            entry.field.label(),
            format_mean_std(entry.mean_ns, entry.std_dev_ns)
        )?;
    }
    writeln!(out, "{}", RULE)
}

/// Write one report as `setup nativeSetup canonization other total`
pub fn write_raw_report<W: Write>(out: &mut W, report: &RuntimeReport) -> io::Result<()> {
    let values: Vec<String> = TimingField::ALL
        .iter()
        .map(|&field| report.field(field).to_string())
        .collect();
    writeln!(out, "{}", values.join(" "))
}

/// Write a summary as ten numbers: mean and standard deviation per field
pub fn write_raw_summary<W: Write>(out: &mut W, summary: &RuntimeSummary) -> io::Result<()> {
    let values: Vec<String> = summary
        .field_summaries()
        .iter()
        .flat_map(|entry| [entry.mean_ns.to_string(), entry.std_dev_ns.to_string()])
        .collect();
    writeln!(out, "{}", values.join(" "))
}

/// Write the complete log of one evaluation
pub fn write_evaluation_log<W: Write>(out: &mut W, evaluation: &Evaluation) -> io::Result<()> {
    for step in &evaluation.steps {
        write_dataset_block(out, &step.dataset.size_statistics())?;
        write_summary_block(out, &step.summary)?;
        writeln!(out, "Raw report data (setup, native setup, canonization, other, total)")?;
        for report in step.summary.reports() {
            write_raw_report(out, report)?;
        }
        writeln!(out)?;
    }

    writeln!(
        out,
        "Raw data (setup avg, setup stddev, native setup avg, native setup stddev, \
         canonization avg, canonization stddev, other avg, other stddev, total avg, total stddev)"
    )?;
    for step in &evaluation.steps {
        write_raw_summary(out, &step.summary)?;
    }
    out.flush()
}

/// Log file name for an engine: lowercase alphanumerics joined by `-`
pub fn log_file_name(engine: &EngineId) -> String {
    let mut slug = String::new();
    for c in engine.as_str().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("engine");
    }
    format!("{}.log", slug)
}
