//! Runtime Reports
//!
//! One report per engine invocation. All timings are in nanoseconds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identity of a canonization engine (its display name)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineId(Arc<str>);

impl EngineId {
    /// Create an engine identity from its display name
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Display name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EngineId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Timing breakdown of a single engine invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeReport {
    engine: EngineId,
    transform_ns: u64,
    native_setup_ns: u64,
    canonization_ns: u64,
    total_ns: u64,
}

impl RuntimeReport {
    /// Create a report from the three inner measurements and the wall time around them
    pub fn new(
        engine: EngineId,
        transform_ns: u64,
        native_setup_ns: u64,
        canonization_ns: u64,
        total_ns: u64,
    ) -> Self {
        Self {
            engine,
            transform_ns,
            native_setup_ns,
            canonization_ns,
            total_ns,
        }
    }

    /// Engine that produced this report
    pub fn engine(&self) -> &EngineId {
        &self.engine
    }

    /// Host-side time spent transforming the query graph into engine input
    pub fn transform_ns(&self) -> u64 {
        self.transform_ns
    }

    /// Engine-side time spent building its own data structures
    pub fn native_setup_ns(&self) -> u64 {
        self.native_setup_ns
    }

    /// Engine-side time spent computing the canonical form
    pub fn canonization_ns(&self) -> u64 {
        self.canonization_ns
    }

    /// Wall time around the whole invocation
    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }

    /// Time not attributed to any measured phase (call overhead, process startup).
    ///
    /// Clamped at zero: the inner timers are independent of the wall clock and
    /// may add up to slightly more than the total.
    pub fn other_ns(&self) -> u64 {
        self.total_ns
            .saturating_sub(self.transform_ns)
            .saturating_sub(self.native_setup_ns)
            .saturating_sub(self.canonization_ns)
    }

    /// Value of one timing field
    pub fn field(&self, field: TimingField) -> u64 {
        match field {
            TimingField::Setup => self.transform_ns,
            TimingField::NativeSetup => self.native_setup_ns,
            TimingField::Canonization => self.canonization_ns,
            TimingField::Other => self.other_ns(),
            TimingField::Total => self.total_ns,
        }
    }
}

/// The five timing fields, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingField {
    /// Host-side transform time
    Setup,
    /// Engine-side setup time
    NativeSetup,
    /// Canonization time
    Canonization,
    /// Residual time
    Other,
    /// Wall time
    Total,
}

impl TimingField {
    /// All fields in reporting order
    pub const ALL: [TimingField; 5] = [
        TimingField::Setup,
        TimingField::NativeSetup,
        TimingField::Canonization,
        TimingField::Other,
        TimingField::Total,
    ];

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            TimingField::Setup => "Setup",
            TimingField::NativeSetup => "Setup (native)",
            TimingField::Canonization => "Canonization",
            TimingField::Other => "Other",
            TimingField::Total => "Total",
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            TimingField::Setup => 0,
            TimingField::NativeSetup => 1,
            TimingField::Canonization => 2,
            TimingField::Other => 3,
            TimingField::Total => 4,
        }
    }
}
