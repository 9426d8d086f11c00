//! Terminal Output

use crate::format::format_mean_std;
use canonbench_core::{Evaluation, Outcome};
use canonbench_stats::TimingField;

/// Overview of a run: per engine, the total time of every completed step and
/// how the evaluation ended
pub fn format_human_output(evaluations: &[Evaluation]) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("Canonbench Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    for evaluation in evaluations {
        let status_icon = match evaluation.outcome {
            Outcome::Completed => "✓",
            Outcome::TimedOut { .. } => "⏱",
            Outcome::Failed { .. } => "✗",
        };
        output.push_str(&format!("{} {}\n", status_icon, evaluation.engine));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for step in &evaluation.steps {
            let summary = &step.summary;
            output.push_str(&format!(
                "  size {:>6}  graphs: {:>3}  total: {}\n",
                step.size,
                summary.count(),
                format_mean_std(
                    summary.mean(TimingField::Total),
                    summary.std_dev(TimingField::Total)
                )
            ));
        }

        match &evaluation.outcome {
            Outcome::Completed => output.push_str("  completed all size steps\n"),
            Outcome::TimedOut { size } => {
                output.push_str(&format!("  timed out at size {}\n", size));
            }
            Outcome::Failed { size, error } => {
                output.push_str(&format!("  failed at size {}: {}\n", size, error));
            }
        }
        output.push('\n');
    }

    output
}
