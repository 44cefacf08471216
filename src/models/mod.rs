//! Metric data contracts.
//!
//! A [`Metric`] is an immutable, named, pre-formatted measurement. The set of
//! metric kinds is open: anything implementing the trait can be published on
//! the dashboard.

mod heart_rate;
mod steps;

pub use heart_rate::HeartRate;
pub use steps::Steps;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

/// A single named measurement ready for display.
///
/// Implementations own their formatting. Values are never mutated after
/// construction, so they can be shared across tasks without locking.
pub trait Metric: fmt::Debug + Send + Sync {
    /// Unique identity of this reading.
    fn id(&self) -> Uuid;

    /// Display name (e.g. "Heart Rate").
    fn name(&self) -> &str;

    /// Formatted value (e.g. "72 BPM").
    fn value(&self) -> String;
}

/// Reference-counted handle to a metric of any kind.
pub type SharedMetric = Arc<dyn Metric>;

impl PartialEq for dyn Metric {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id() && self.name() == other.name() && self.value() == other.value()
    }
}

/// Plain serialisable view of a metric, used for JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricView {
    /// Unique identity of the reading.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Formatted value.
    pub value: String,
}

impl MetricView {
    /// Capture the current accessors of any metric.
    pub fn of(metric: &dyn Metric) -> Self {
        Self {
            id: metric.id(),
            name: metric.name().to_string(),
            value: metric.value(),
        }
    }
}

impl From<&SharedMetric> for MetricView {
    fn from(metric: &SharedMetric) -> Self {
        Self::of(metric.as_ref())
    }
}
