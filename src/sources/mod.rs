//! Metric source adapters.
//!
//! A [`MetricSource`] produces one [`Metric`](crate::models::Metric) per call.
//! The dashboard only depends on this trait, so the simulated sensors below can
//! be swapped for deterministic doubles in tests.

mod heart_rate;
mod steps;

pub use heart_rate::HeartRateSource;
pub use steps::StepsSource;

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::SharedMetric;

/// Error produced when a source cannot deliver a reading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The underlying sensor or service did not answer.
    #[error("{source_name} unavailable: {reason}")]
    Unavailable {
        /// Name of the failing source.
        source_name: String,
        /// Human-readable cause.
        reason: String,
    },
    /// The configured value range is empty.
    #[error("{source_name} has an empty value range ({min}..={max})")]
    InvalidRange {
        /// Name of the misconfigured source.
        source_name: String,
        /// Lower bound.
        min: u32,
        /// Upper bound.
        max: u32,
    },
}

impl FetchError {
    /// Shorthand for [`FetchError::Unavailable`].
    pub fn unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

/// Asynchronous provider of a single metric.
#[async_trait]
pub trait MetricSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetch one fresh reading. May suspend for an arbitrary time.
    async fn fetch_metric(&self) -> Result<SharedMetric, FetchError>;
}

/// Shared handle to any source.
pub type SharedSource = Arc<dyn MetricSource>;

/// Draw a uniformly distributed value, rejecting empty ranges.
fn sample(source_name: &str, min: u32, max: u32) -> Result<u32, FetchError> {
    use rand::Rng;

    if min > max {
        tracing::warn!(source = source_name, min, max, "Empty sample range");
        return Err(FetchError::InvalidRange {
            source_name: source_name.to_string(),
            min,
            max,
        });
    }
    Ok(rand::thread_rng().gen_range(min..=max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_within_bounds() {
        for _ in 0..200 {
            let v = sample("test", 60, 110).unwrap();
            assert!((60..=110).contains(&v));
        }
    }

    #[test]
    fn test_sample_single_value_range() {
        assert_eq!(sample("test", 7, 7).unwrap(), 7);
    }

    #[test]
    fn test_sample_rejects_empty_range() {
        let err = sample("heart_rate", 10, 5).unwrap_err();
        assert_eq!(
            err,
            FetchError::InvalidRange {
                source_name: "heart_rate".into(),
                min: 10,
                max: 5
            }
        );
    }

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::unavailable("steps", "sensor offline");
        assert_eq!(err.to_string(), "steps unavailable: sensor offline");
    }
}
