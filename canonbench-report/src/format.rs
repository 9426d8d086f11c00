//! Time Formatting

/// Format nanoseconds as `"{m}m {s}s {ms}ms {ns}ns"`.
///
/// The nanosecond part is the remainder below one millisecond.
pub fn format_nanos(nanos: u64) -> String {
    let ns = nanos % 1_000_000;
    let millis = nanos / 1_000_000;
    let ms = millis % 1000;
    let seconds = millis / 1000;
    let s = seconds % 60;
    let m = seconds / 60;
    format!("{}m {}s {}ms {}ns", m, s, ms, ns)
}

/// Format a fractional nanosecond value, rounded to the nearest nanosecond.
///
/// `NaN` (the spread of a single sample) is written as `NaN`.
pub fn format_nanos_f64(nanos: f64) -> String {
    if nanos.is_nan() {
        "NaN".to_string()
    } else {
        format_nanos(nanos.round().max(0.0) as u64)
    }
}

/// Format `mean ± std_dev`
pub fn format_mean_std(mean: f64, std_dev: f64) -> String {
    format!("{} \u{00B1} {}", format_nanos_f64(mean), format_nanos_f64(std_dev))
}
