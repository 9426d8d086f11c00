//! Runtime Summaries
//!
//! Aggregates the reports of one engine over one dataset. The raw reports are
//! retained for line-by-line export; the per-field statistics are maintained
//! online as reports arrive.

use crate::error::StatsError;
use crate::percentiles::compute_percentile;
use crate::report::{EngineId, RuntimeReport, TimingField};
use crate::running::RunningStatistics;

/// Mean and sample standard deviation of one timing field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSummary {
    /// Field these numbers describe
    pub field: TimingField,
    /// Mean in nanoseconds
    pub mean_ns: f64,
    /// Sample standard deviation in nanoseconds (`NaN` for a single report)
    pub std_dev_ns: f64,
}

/// One engine's aggregated reports over one dataset
#[derive(Debug, Clone, Default)]
pub struct RuntimeSummary {
    engine: Option<EngineId>,
    reports: Vec<RuntimeReport>,
    fields: [RunningStatistics; 5],
}

impl RuntimeSummary {
    /// Create an empty summary; the first report added fixes the engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty summary that only accepts reports from `engine`
    pub fn for_engine(engine: EngineId) -> Self {
        Self {
            engine: Some(engine),
            ..Self::default()
        }
    }

    /// Append a report.
    ///
    /// Reports from an engine other than the one this summary belongs to are
    /// rejected and leave the summary untouched.
    pub fn add_report(&mut self, report: RuntimeReport) -> Result<(), StatsError> {
        match &self.engine {
            Some(engine) if engine != report.engine() => {
                return Err(StatsError::EngineMismatch {
                    expected: engine.clone(),
                    got: report.engine().clone(),
                });
            }
            Some(_) => {}
            None => self.engine = Some(report.engine().clone()),
        }

        for field in TimingField::ALL {
            self.fields[field.slot()].push(report.field(field) as f64);
        }
        self.reports.push(report);
        Ok(())
    }

    /// Engine these reports belong to, `None` until the first report arrives
    pub fn engine(&self) -> Option<&EngineId> {
        self.engine.as_ref()
    }

    /// Number of reports
    pub fn count(&self) -> usize {
        self.reports.len()
    }

    /// Whether no report was added yet
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Raw reports in insertion order
    pub fn reports(&self) -> &[RuntimeReport] {
        &self.reports
    }

    /// Running statistics of one field
    pub fn statistics(&self, field: TimingField) -> &RunningStatistics {
        &self.fields[field.slot()]
    }

    /// Mean of one field in nanoseconds
    pub fn mean(&self, field: TimingField) -> f64 {
        self.statistics(field).mean()
    }

    /// Sample standard deviation of one field in nanoseconds
    pub fn std_dev(&self, field: TimingField) -> f64 {
        self.statistics(field).std_dev()
    }

    /// Mean and standard deviation of every field, in reporting order
    pub fn field_summaries(&self) -> [FieldSummary; 5] {
        TimingField::ALL.map(|field| FieldSummary {
            field,
            mean_ns: self.mean(field),
            std_dev_ns: self.std_dev(field),
        })
    }

    /// Percentile of one field over the retained reports
    pub fn percentile(&self, field: TimingField, percentile: f64) -> f64 {
        let samples: Vec<f64> = self
            .reports
            .iter()
            .map(|report| report.field(field) as f64)
            .collect();
        compute_percentile(&samples, percentile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(engine: &str, total: u64) -> RuntimeReport {
        RuntimeReport::new(engine.into(), 10, 20, 30, total)
    }

    #[test]
    fn test_aggregates_fields() {
        let mut summary = RuntimeSummary::new();
        summary.add_report(report("nauty", 100)).unwrap();
        summary.add_report(report("nauty", 200)).unwrap();

        assert_eq!(summary.count(), 2);
        assert_eq!(summary.engine(), Some(&EngineId::new("nauty")));
        assert!((summary.mean(TimingField::Total) - 150.0).abs() < f64::EPSILON);
        assert!((summary.mean(TimingField::Other) - 90.0).abs() < f64::EPSILON);
        assert_eq!(summary.std_dev(TimingField::Setup), 0.0);
        let expected = (5000.0f64).sqrt();
        assert!((summary.std_dev(TimingField::Total) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_single_report_std_dev_nan() {
        let mut summary = RuntimeSummary::new();
        summary.add_report(report("traces", 100)).unwrap();
        for field in TimingField::ALL {
            assert!(summary.std_dev(field).is_nan());
        }
    }

    #[test]
    fn test_identical_reports_std_dev_zero() {
        let mut summary = RuntimeSummary::new();
        summary.add_report(report("traces", 100)).unwrap();
        summary.add_report(report("traces", 100)).unwrap();
        for entry in summary.field_summaries() {
            assert_eq!(entry.std_dev_ns, 0.0);
        }
    }

    #[test]
    fn test_engine_mismatch_rejected() {
        let mut summary = RuntimeSummary::new();
        summary.add_report(report("nauty", 100)).unwrap();
        let before_mean = summary.mean(TimingField::Total);

        let result = summary.add_report(report("bliss", 900));
        assert_eq!(
            result,
            Err(StatsError::EngineMismatch {
                expected: "nauty".into(),
                got: "bliss".into(),
            })
        );
        assert_eq!(summary.count(), 1);
        assert_eq!(summary.statistics(TimingField::Total).count(), 1);
        assert_eq!(summary.mean(TimingField::Total), before_mean);
    }

    #[test]
    fn test_for_engine_rejects_first_foreign_report() {
        let mut summary = RuntimeSummary::for_engine("nishe".into());
        assert!(summary.add_report(report("bliss", 1)).is_err());
        assert!(summary.is_empty());
        assert!(summary.add_report(report("nishe", 1)).is_ok());
    }

    #[test]
    fn test_percentile() {
        let mut summary = RuntimeSummary::new();
        for total in [100, 200, 300, 400, 500] {
            summary.add_report(report("nauty", total)).unwrap();
        }
        assert!((summary.percentile(TimingField::Total, 50.0) - 300.0).abs() < 1e-9);
    }
}
